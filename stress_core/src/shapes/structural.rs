//! Standard structural shapes (AISC).
//!
//! Section properties for W, L, and HSS families, indexed by AISC Manual
//! label. The built-in tables carry a working subset of the AISC Shapes
//! Database v15 in US customary units (inches); lookups are
//! case-insensitive and fail with a structured not-found error.
//!
//! Width-to-thickness limits follow ANSI/AISC 360-16 Tables B4.1a/B4.1b.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{StressError, StressResult};

/// Standard shape family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFamily {
    /// Wide flange beam (W-shape)
    W,
    /// Single angle (L-shape)
    L,
    /// Hollow structural section, rectangular or square
    Hss,
}

impl StandardFamily {
    pub fn code(&self) -> &'static str {
        match self {
            StandardFamily::W => "W",
            StandardFamily::L => "L",
            StandardFamily::Hss => "HSS",
        }
    }
}

/// Member load regime for slenderness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadKind {
    Compression,
    Flexure,
}

/// Flexural section classification per AISC B4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlexureClass {
    Compact,
    Noncompact,
    SlenderElement,
}

/// Compression section classification per AISC B4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionClass {
    NonslenderElement,
    SlenderElement,
}

/// A standard structural shape with its tabulated section properties.
///
/// Fields not applicable to a family are `None`. All dimensions are
/// inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardShape {
    pub family: StandardFamily,
    /// AISC Manual label (e.g. "W14X90", "HSS6X6X3/8")
    pub label: String,
    /// Nominal weight per foot (lb/ft)
    pub weight: Option<f64>,
    /// Cross-sectional area
    pub a: f64,
    /// Overall depth (W: d, HSS: Ht, L: long leg)
    pub d: f64,
    /// Overall width (W: bf, HSS: B, L: short leg)
    pub b: f64,
    /// Flange thickness (W)
    pub tf: Option<f64>,
    /// Web thickness (W)
    pub tw: Option<f64>,
    /// Leg thickness (L)
    pub t: Option<f64>,
    /// Nominal wall thickness (HSS)
    pub tnom: Option<f64>,
    /// Design wall thickness (HSS)
    pub tdes: Option<f64>,
    /// Flat wall width along the section width (HSS)
    pub b_flat: Option<f64>,
    /// Flat wall depth along the section height (HSS)
    pub h_flat: Option<f64>,
    /// Centroid offset from the heel along x (L)
    pub x_bar: Option<f64>,
    /// Centroid offset from the heel along y (L)
    pub y_bar: Option<f64>,
    pub ix: f64,
    pub sx: Option<f64>,
    pub rx: Option<f64>,
    pub zx: Option<f64>,
    pub iy: f64,
    pub sy: Option<f64>,
    pub ry: Option<f64>,
    pub zy: Option<f64>,
    pub j: f64,
}

impl StandardShape {
    pub fn width(&self) -> f64 {
        self.b
    }

    pub fn height(&self) -> f64 {
        self.d
    }

    pub fn cx_right(&self) -> f64 {
        match self.family {
            // Angle legs measure from the heel through the centroid
            StandardFamily::L => self.d - self.x_bar.unwrap_or(0.0),
            _ => self.b / 2.0,
        }
    }

    pub fn cx_left(&self) -> f64 {
        match self.family {
            StandardFamily::L => -self.x_bar.unwrap_or(0.0),
            _ => -self.b / 2.0,
        }
    }

    pub fn cy_high(&self) -> f64 {
        match self.family {
            StandardFamily::L => self.b - self.y_bar.unwrap_or(0.0),
            _ => self.d / 2.0,
        }
    }

    pub fn cy_low(&self) -> f64 {
        match self.family {
            StandardFamily::L => -self.y_bar.unwrap_or(0.0),
            _ => -self.d / 2.0,
        }
    }

    /// Governing wall/leg thickness. HSS reports the design wall `tdes`;
    /// the width-to-thickness ratio uses `tnom` instead (AISC B4.1 note),
    /// and the two are intentionally not unified.
    pub fn t(&self) -> Option<f64> {
        match self.family {
            StandardFamily::W => None,
            StandardFamily::L => self.t,
            StandardFamily::Hss => self.tdes,
        }
    }

    /// Width-to-thickness ratio per AISC Table B4.1a
    pub fn width_to_thickness(&self) -> Option<f64> {
        match self.family {
            StandardFamily::W => self.tf.map(|tf| (self.b / 2.0) / tf),
            StandardFamily::L => self.t.map(|t| self.b / t),
            StandardFamily::Hss => match (self.b_flat, self.h_flat, self.tnom) {
                (Some(b), Some(h), Some(tnom)) => Some(b.max(h) / tnom),
                _ => None,
            },
        }
    }

    fn lambda_p(&self, e: f64, fy: f64) -> f64 {
        let root = (e / fy).sqrt();
        match self.family {
            StandardFamily::W => 0.38 * root,
            StandardFamily::L => 0.54 * root,
            StandardFamily::Hss => 2.42 * root,
        }
    }

    fn lambda_r_comp(&self, e: f64, fy: f64) -> f64 {
        let root = (e / fy).sqrt();
        match self.family {
            StandardFamily::W => 0.56 * root,
            StandardFamily::L => 0.45 * root,
            StandardFamily::Hss => 1.4 * root,
        }
    }

    fn lambda_r_flex(&self, e: f64, fy: f64) -> f64 {
        let root = (e / fy).sqrt();
        match self.family {
            StandardFamily::W => root,
            StandardFamily::L => 0.91 * root,
            StandardFamily::Hss => 5.7 * root,
        }
    }

    /// A section is compact if its width-to-thickness ratio does not
    /// exceed lambda_p.
    pub fn is_compact(&self, e: f64, fy: f64) -> Option<bool> {
        self.width_to_thickness()
            .map(|wt| wt <= self.lambda_p(e, fy))
    }

    /// A section is slender if its width-to-thickness ratio exceeds
    /// lambda_r for the given load regime.
    pub fn is_slender(&self, e: f64, fy: f64, load_kind: LoadKind) -> Option<bool> {
        let limit = match load_kind {
            LoadKind::Compression => self.lambda_r_comp(e, fy),
            LoadKind::Flexure => self.lambda_r_flex(e, fy),
        };
        self.width_to_thickness().map(|wt| wt > limit)
    }

    /// Flexural classification per AISC B4: compact / noncompact /
    /// slender-element.
    pub fn flexure_classification(&self, e: f64, fy: f64) -> Option<FlexureClass> {
        let wt = self.width_to_thickness()?;
        Some(if wt <= self.lambda_p(e, fy) {
            FlexureClass::Compact
        } else if wt <= self.lambda_r_flex(e, fy) {
            FlexureClass::Noncompact
        } else {
            FlexureClass::SlenderElement
        })
    }

    /// Compression classification per AISC B4: nonslender / slender-element
    pub fn compression_classification(&self, e: f64, fy: f64) -> Option<CompressionClass> {
        let wt = self.width_to_thickness()?;
        Some(if wt > self.lambda_r_comp(e, fy) {
            CompressionClass::SlenderElement
        } else {
            CompressionClass::NonslenderElement
        })
    }

    /// Flat shear wall length along x (AISC G4), HSS only
    pub fn h_x(&self) -> Option<f64> {
        match self.family {
            StandardFamily::Hss => self.t().map(|t| self.width() - 3.0 * t),
            _ => None,
        }
    }

    /// Flat shear wall length along y (AISC G4), HSS only
    pub fn h_y(&self) -> Option<f64> {
        match self.family {
            StandardFamily::Hss => self.t().map(|t| self.height() - 3.0 * t),
            _ => None,
        }
    }

    /// Family-specific dimension properties for record export
    pub fn dimension_properties(&self) -> Vec<(String, f64)> {
        let mut props: Vec<(String, f64)> = Vec::new();
        let mut push = |name: &str, value: Option<f64>| {
            if let Some(v) = value {
                props.push((name.to_string(), v));
            }
        };
        match self.family {
            StandardFamily::W => {
                push("d", Some(self.d));
                push("bf", Some(self.b));
                push("tf", self.tf);
                push("tw", self.tw);
            }
            StandardFamily::L => {
                push("d", Some(self.d));
                push("b", Some(self.b));
                push("t", self.t);
                push("x", self.x_bar);
                push("y", self.y_bar);
            }
            StandardFamily::Hss => {
                push("Ht", Some(self.d));
                push("B", Some(self.b));
                push("tnom", self.tnom);
                push("tdes", self.tdes);
            }
        }
        push("Sx", self.sx);
        push("Sy", self.sy);
        push("Zx", self.zx);
        push("Zy", self.zy);
        push("rx", self.rx);
        push("ry", self.ry);
        props
    }
}

impl std::fmt::Display for StandardShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (A={:.2} in², Ix={:.1} in⁴)",
            self.label, self.a, self.ix
        )
    }
}

// ============================================================================
// Label recognition and lookup
// ============================================================================

/// AISC type codes, longest first so "HSS" wins over "H" and "WT" over "W"
const LABEL_PREFIXES: [&str; 13] = [
    "PIPE", "HSS", "2L", "WT", "MT", "ST", "HP", "MC", "W", "M", "L", "C", "S",
];

/// Test if a string looks like a structural shape identifier (a known AISC
/// type code followed by a size designation). Does not check that the shape
/// exists.
pub fn is_standard_shape_label(label: &str) -> bool {
    shape_type_code(label).is_some()
}

fn shape_type_code(label: &str) -> Option<&'static str> {
    let normalized = normalize_label(label);
    LABEL_PREFIXES.iter().copied().find(|prefix| {
        normalized
            .strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
    })
}

fn normalize_label(label: &str) -> String {
    label.trim().to_uppercase().replace(' ', "")
}

/// Look up a standard shape by its AISC label. Fails with `ShapeNotFound`
/// for unknown type codes and for labels absent from the built-in tables.
pub fn standard_shape(label: &str) -> StressResult<StandardShape> {
    let normalized = normalize_label(label);
    SHAPE_DB
        .get(&normalized)
        .cloned()
        .ok_or_else(|| StressError::shape_not_found(label.trim()))
}

// ============================================================================
// Built-in tables (AISC Shapes Database v15 subset)
// ============================================================================

/// (label, weight, A, d, bf, tf, tw, Ix, Sx, rx, Zx, Iy, Sy, ry, Zy, J)
#[rustfmt::skip]
const W_SHAPES: [(&str, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64); 11] = [
    ("W6X9",   9.0,  2.68, 5.90, 3.94, 0.215, 0.17,  16.4,  5.56, 2.47, 6.23,  2.20, 1.11,  0.905, 1.72, 0.0398),
    ("W8X18",  18.0, 5.26, 8.14, 5.25, 0.33,  0.23,  61.9,  15.2, 3.43, 17.0,  7.97, 3.04,  1.23,  4.66, 0.172),
    ("W8X31",  31.0, 9.12, 8.00, 8.00, 0.435, 0.285, 110.0, 27.5, 3.47, 30.4,  37.1, 9.27,  2.02,  14.1, 0.536),
    ("W10X33", 33.0, 9.71, 9.73, 7.96, 0.435, 0.29,  170.0, 35.0, 4.19, 38.8,  36.6, 9.20,  1.94,  14.0, 0.583),
    ("W12X26", 26.0, 7.65, 12.2, 6.49, 0.38,  0.23,  204.0, 33.4, 5.17, 37.2,  17.3, 5.34,  1.51,  8.17, 0.30),
    ("W12X40", 40.0, 11.7, 11.9, 8.01, 0.515, 0.295, 307.0, 51.5, 5.13, 57.0,  44.1, 11.0,  1.94,  16.8, 0.86),
    ("W14X90", 90.0, 26.5, 14.0, 14.5, 0.71,  0.44,  999.0, 143.0, 6.14, 157.0, 362.0, 49.9, 3.70,  75.6, 4.06),
    ("W16X36", 36.0, 10.6, 15.9, 6.99, 0.43,  0.295, 448.0, 56.5, 6.51, 64.0,  24.5, 7.00,  1.52,  10.8, 0.545),
    ("W18X50", 50.0, 14.7, 18.0, 7.50, 0.57,  0.355, 800.0, 88.9, 7.38, 101.0, 40.1, 10.7,  1.65,  16.6, 1.24),
    ("W21X44", 44.0, 13.0, 20.7, 6.50, 0.45,  0.35,  843.0, 81.6, 8.06, 95.4,  20.7, 6.36,  1.26,  10.2, 0.77),
    ("W24X76", 76.0, 22.4, 23.9, 8.99, 0.68,  0.44,  2100.0, 176.0, 9.69, 200.0, 82.5, 18.4, 1.92,  28.6, 2.68),
];

/// Equal-leg angles: (label, A, d, b, t, x_bar, Ix, J); Iy = Ix and
/// y_bar = x_bar by symmetry
#[rustfmt::skip]
const L_SHAPES: [(&str, f64, f64, f64, f64, f64, f64, f64); 8] = [
    ("L2X2X1/4",  0.944, 2.0, 2.0, 0.25,  0.592, 0.348, 0.0209),
    ("L3X3X1/4",  1.44,  3.0, 3.0, 0.25,  0.842, 1.24,  0.0303),
    ("L3X3X3/8",  2.11,  3.0, 3.0, 0.375, 0.888, 1.76,  0.102),
    ("L4X4X3/8",  2.86,  4.0, 4.0, 0.375, 1.13,  4.36,  0.141),
    ("L4X4X1/2",  3.75,  4.0, 4.0, 0.50,  1.18,  5.56,  0.322),
    ("L5X5X1/2",  4.75,  5.0, 5.0, 0.50,  1.43,  11.3,  0.414),
    ("L6X6X1/2",  5.75,  6.0, 6.0, 0.50,  1.68,  19.9,  0.495),
    ("L6X6X3/4",  8.44,  6.0, 6.0, 0.75,  1.78,  28.2,  1.62),
];

/// (label, A, Ht, B, tnom, tdes, Ix, Zx, Iy, Zy, J)
#[rustfmt::skip]
const HSS_SHAPES: [(&str, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64); 6] = [
    ("HSS4X4X1/4", 3.37, 4.0, 4.0, 0.25,  0.233, 7.80,  4.69, 7.80,  4.69, 12.8),
    ("HSS6X4X1/4", 4.30, 6.0, 4.0, 0.25,  0.233, 20.9,  8.53, 11.1,  6.45, 23.6),
    ("HSS6X6X1/4", 5.24, 6.0, 6.0, 0.25,  0.233, 28.6,  11.2, 28.6,  11.2, 45.6),
    ("HSS6X6X3/8", 7.58, 6.0, 6.0, 0.375, 0.349, 39.5,  16.1, 39.5,  16.1, 64.6),
    ("HSS8X8X1/4", 7.10, 8.0, 8.0, 0.25,  0.233, 70.7,  20.5, 70.7,  20.5, 111.0),
    ("HSS8X8X1/2", 13.5, 8.0, 8.0, 0.50,  0.465, 125.0, 37.5, 125.0, 37.5, 204.0),
];

static SHAPE_DB: Lazy<HashMap<String, StandardShape>> = Lazy::new(|| {
    let mut db = HashMap::new();

    for &(label, weight, a, d, bf, tf, tw, ix, sx, rx, zx, iy, sy, ry, zy, j) in W_SHAPES.iter() {
        db.insert(
            label.to_string(),
            StandardShape {
                family: StandardFamily::W,
                label: label.to_string(),
                weight: Some(weight),
                a,
                d,
                b: bf,
                tf: Some(tf),
                tw: Some(tw),
                t: None,
                tnom: None,
                tdes: None,
                b_flat: None,
                h_flat: None,
                x_bar: None,
                y_bar: None,
                ix,
                sx: Some(sx),
                rx: Some(rx),
                zx: Some(zx),
                iy,
                sy: Some(sy),
                ry: Some(ry),
                zy: Some(zy),
                j,
            },
        );
    }

    for &(label, a, d, b, t, x_bar, ix, j) in L_SHAPES.iter() {
        db.insert(
            label.to_string(),
            StandardShape {
                family: StandardFamily::L,
                label: label.to_string(),
                weight: None,
                a,
                d,
                b,
                tf: None,
                tw: None,
                t: Some(t),
                tnom: None,
                tdes: None,
                b_flat: None,
                h_flat: None,
                x_bar: Some(x_bar),
                y_bar: Some(x_bar),
                ix,
                sx: None,
                rx: None,
                zx: None,
                iy: ix,
                sy: None,
                ry: None,
                zy: None,
                j,
            },
        );
    }

    for &(label, a, ht, b, tnom, tdes, ix, zx, iy, zy, j) in HSS_SHAPES.iter() {
        db.insert(
            label.to_string(),
            StandardShape {
                family: StandardFamily::Hss,
                label: label.to_string(),
                weight: None,
                a,
                d: ht,
                b,
                tf: None,
                tw: None,
                t: None,
                tnom: Some(tnom),
                tdes: Some(tdes),
                b_flat: Some(b - 3.0 * tdes),
                h_flat: Some(ht - 3.0 * tdes),
                x_bar: None,
                y_bar: None,
                ix,
                sx: None,
                rx: None,
                zx: Some(zx),
                iy,
                sy: None,
                ry: None,
                zy: Some(zy),
                j,
            },
        );
    }

    db
});
