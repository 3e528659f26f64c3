//! Weld shapes.
//!
//! Weld profiles are treated as line sections whose effective throat
//! depends on the weld process. The local coordinate system has `z` normal
//! to the profile, `y` vertical, and `x` horizontal.
//!
//! ```text
//!     Line            Box             Double line
//!       ┃          ┏━━━ y ━━━┓         ┃   y   ┃
//!       y          ┃    |    ┃         ┃   |   ┃
//!       ┃          ┃    o--x ┃         ┃   o---x
//!       o---x      ┗━━━━━━━━━┛         ┃       ┃
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{StressError, StressResult};

/// Weld process type, which determines the effective throat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeldType {
    /// Complete joint penetration: full leg size
    Cjp,
    /// Partial joint penetration: leg size less 1/8"
    Pjp,
    /// Fillet: leg size times 0.707
    Fillet,
    /// Flare bevel groove: factor times bar radius
    FlareBevel,
    /// Flare V-groove: factor times bar radius
    FlareVGroove,
}

impl WeldType {
    pub const ALL: [WeldType; 5] = [
        WeldType::Cjp,
        WeldType::Pjp,
        WeldType::Fillet,
        WeldType::FlareBevel,
        WeldType::FlareVGroove,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeldType::Cjp => "cjp",
            WeldType::Pjp => "pjp",
            WeldType::Fillet => "fillet",
            WeldType::FlareBevel => "flare bevel",
            WeldType::FlareVGroove => "flare v-groove",
        }
    }

    pub fn from_label(label: &str) -> StressResult<Self> {
        match label.trim().to_lowercase().as_str() {
            "cjp" => Ok(WeldType::Cjp),
            "pjp" => Ok(WeldType::Pjp),
            "fillet" => Ok(WeldType::Fillet),
            "flare bevel" => Ok(WeldType::FlareBevel),
            "flare v-groove" => Ok(WeldType::FlareVGroove),
            other => Err(StressError::invalid_input(
                "weld_type",
                other,
                "Expected one of cjp, pjp, fillet, flare bevel, flare v-groove",
            )),
        }
    }

    fn is_flare(&self) -> bool {
        matches!(self, WeldType::FlareBevel | WeldType::FlareVGroove)
    }
}

impl std::fmt::Display for WeldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Weld line profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "profile")]
pub enum WeldProfile {
    /// A single vertical line weld of length `d`
    Line { d: f64 },
    /// A rectangular weld, height `d` by width `b`
    Box { d: f64, b: f64 },
    /// Two vertical line welds of length `d`, spaced `b` apart
    DoubleLine { d: f64, b: f64 },
}

impl WeldProfile {
    /// Resolve a profile label ("line", "box", "double line") and its
    /// dimensions. Box and double-line profiles require `b`.
    pub fn from_label(label: &str, d: f64, b: Option<f64>) -> StressResult<Self> {
        let require_b = || {
            b.filter(|v| v.is_finite())
                .ok_or_else(|| StressError::missing_field("b"))
        };
        match label.trim().to_lowercase().as_str() {
            "line" => Ok(WeldProfile::Line { d }),
            "box" => Ok(WeldProfile::Box { d, b: require_b()? }),
            "double line" => Ok(WeldProfile::DoubleLine { d, b: require_b()? }),
            other => Err(StressError::invalid_input(
                "shape",
                other,
                "Not a valid weld shape label",
            )),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeldProfile::Line { .. } => "line",
            WeldProfile::Box { .. } => "box",
            WeldProfile::DoubleLine { .. } => "double line",
        }
    }

    pub fn d(&self) -> f64 {
        match *self {
            WeldProfile::Line { d }
            | WeldProfile::Box { d, .. }
            | WeldProfile::DoubleLine { d, .. } => d,
        }
    }

    pub fn b(&self) -> Option<f64> {
        match *self {
            WeldProfile::Line { .. } => None,
            WeldProfile::Box { b, .. } | WeldProfile::DoubleLine { b, .. } => Some(b),
        }
    }
}

/// A weld cross-section: a profile, a leg size, and a weld type that
/// together fix the effective throat.
///
/// Flare weld types need the bar radius and the flare groove factor to
/// resolve a throat; constructing one without them is an invalid-input
/// error, so a built `WeldShape` always has a computable throat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldShape {
    profile: WeldProfile,
    weld_type: WeldType,
    /// Leg size
    s: f64,
    radius: Option<f64>,
    flare_groove_factor: Option<f64>,
}

impl WeldShape {
    /// Build a non-flare weld shape
    pub fn new(profile: WeldProfile, s: f64, weld_type: WeldType) -> StressResult<Self> {
        if weld_type.is_flare() {
            return Err(StressError::invalid_input(
                "weld_type",
                weld_type.label(),
                "Flare weld types require radius and flare_groove_factor",
            ));
        }
        Ok(Self {
            profile,
            weld_type,
            s,
            radius: None,
            flare_groove_factor: None,
        })
    }

    /// Build a flare-bevel or flare-V-groove weld shape
    pub fn flare(
        profile: WeldProfile,
        s: f64,
        weld_type: WeldType,
        radius: f64,
        flare_groove_factor: f64,
    ) -> StressResult<Self> {
        if !weld_type.is_flare() {
            return Err(StressError::invalid_input(
                "weld_type",
                weld_type.label(),
                "Radius and flare_groove_factor apply only to flare weld types",
            ));
        }
        Ok(Self {
            profile,
            weld_type,
            s,
            radius: Some(radius),
            flare_groove_factor: Some(flare_groove_factor),
        })
    }

    pub fn profile(&self) -> WeldProfile {
        self.profile
    }

    pub fn weld_type(&self) -> WeldType {
        self.weld_type
    }

    /// Leg size
    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn d(&self) -> f64 {
        self.profile.d()
    }

    pub fn b(&self) -> Option<f64> {
        self.profile.b()
    }

    /// Effective throat thickness
    pub fn t(&self) -> f64 {
        match self.weld_type {
            WeldType::Cjp => self.s,
            WeldType::Pjp => self.s - 0.125,
            WeldType::Fillet => self.s * 0.707,
            WeldType::FlareBevel | WeldType::FlareVGroove => {
                // Guaranteed present by construction
                self.flare_groove_factor.unwrap_or(f64::NAN) * self.radius.unwrap_or(f64::NAN)
            }
        }
    }

    pub fn a(&self) -> f64 {
        let t = self.t();
        match self.profile {
            WeldProfile::Line { d } => d * t,
            WeldProfile::Box { d, b } => 2.0 * (b + d) * t,
            WeldProfile::DoubleLine { d, .. } => 2.0 * d * t,
        }
    }

    pub fn ix(&self) -> f64 {
        let t = self.t();
        match self.profile {
            WeldProfile::Line { d } => d.powi(3) * t / 12.0,
            WeldProfile::Box { d, b } => d.powi(2) / 6.0 * (d + 3.0 * b),
            WeldProfile::DoubleLine { d, .. } => d.powi(3) / 6.0 * t,
        }
    }

    pub fn iy(&self) -> f64 {
        let t = self.t();
        match self.profile {
            WeldProfile::Line { d } => d * t.powi(3) / 12.0,
            WeldProfile::Box { d, b } => b.powi(2) / 6.0 * (b + 3.0 * d),
            WeldProfile::DoubleLine { d, b } => d * b.powi(2) / 2.0 * t,
        }
    }

    pub fn j(&self) -> f64 {
        let t = self.t();
        match self.profile {
            WeldProfile::Line { d } => d.powi(3) * t / 12.0,
            WeldProfile::Box { d, b } => (b + d).powi(3) / 6.0,
            WeldProfile::DoubleLine { d, b } => d * (3.0 * b.powi(2) + d.powi(2)) / 6.0 * t,
        }
    }

    pub fn cx_right(&self) -> f64 {
        match self.profile {
            WeldProfile::Line { .. } => self.t() / 2.0,
            WeldProfile::Box { b, .. } | WeldProfile::DoubleLine { b, .. } => b / 2.0,
        }
    }

    pub fn cx_left(&self) -> f64 {
        -self.cx_right()
    }

    pub fn cy_high(&self) -> f64 {
        self.d() / 2.0
    }

    pub fn cy_low(&self) -> f64 {
        -self.d() / 2.0
    }

    /// Profile dimensions for record export
    pub fn dimension_properties(&self) -> Vec<(String, f64)> {
        let mut props = vec![("d".to_string(), self.d())];
        if let Some(b) = self.b() {
            props.push(("b".to_string(), b));
        }
        props.push(("s".to_string(), self.s));
        props.push(("t".to_string(), self.t()));
        props
    }
}

impl std::fmt::Display for WeldShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.b() {
            Some(b) => write!(f, "{} weld shape (d={}, b={})", self.profile.label(), self.d(), b),
            None => write!(f, "{} weld shape (d={})", self.profile.label(), self.d()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_throat_per_weld_type() {
        let line = WeldProfile::Line { d: 10.0 };
        assert_relative_eq!(WeldShape::new(line, 0.5, WeldType::Cjp).unwrap().t(), 0.5);
        assert_relative_eq!(WeldShape::new(line, 0.5, WeldType::Pjp).unwrap().t(), 0.375);
        assert_relative_eq!(
            WeldShape::new(line, 0.5, WeldType::Fillet).unwrap().t(),
            0.3535,
            epsilon = 1e-12
        );
        let flare = WeldShape::flare(line, 0.5, WeldType::FlareBevel, 0.4, 0.3125).unwrap();
        assert_relative_eq!(flare.t(), 0.125);
    }

    #[test]
    fn test_flare_requires_radius_and_factor() {
        let line = WeldProfile::Line { d: 10.0 };
        let err = WeldShape::new(line, 0.5, WeldType::FlareVGroove).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        // And the reverse: flare params on a fillet weld are rejected
        assert!(WeldShape::flare(line, 0.5, WeldType::Fillet, 0.4, 0.3125).is_err());
    }

    #[test]
    fn test_line_weld_properties() {
        let weld = WeldShape::new(WeldProfile::Line { d: 10.0 }, 0.5, WeldType::Cjp).unwrap();
        assert_relative_eq!(weld.a(), 5.0);
        assert_relative_eq!(weld.ix(), 1000.0 * 0.5 / 12.0);
        assert_relative_eq!(weld.iy(), 10.0 * 0.125 / 12.0);
        assert_relative_eq!(weld.j(), weld.ix());
        assert_relative_eq!(weld.cy_high(), 5.0);
        assert_relative_eq!(weld.cx_right(), 0.25);
    }

    #[test]
    fn test_box_weld_properties() {
        let weld =
            WeldShape::new(WeldProfile::Box { d: 4.0, b: 2.0 }, 0.25, WeldType::Cjp).unwrap();
        assert_relative_eq!(weld.a(), 2.0 * 6.0 * 0.25);
        assert_relative_eq!(weld.ix(), 16.0 / 6.0 * 10.0);
        assert_relative_eq!(weld.iy(), 4.0 / 6.0 * 14.0);
        assert_relative_eq!(weld.j(), 216.0 / 6.0);
        assert_relative_eq!(weld.cx_right(), 1.0);
        assert_relative_eq!(weld.cy_low(), -2.0);
    }

    #[test]
    fn test_double_line_weld_properties() {
        let weld = WeldShape::new(
            WeldProfile::DoubleLine { d: 6.0, b: 3.0 },
            0.5,
            WeldType::Cjp,
        )
        .unwrap();
        assert_relative_eq!(weld.a(), 6.0);
        assert_relative_eq!(weld.ix(), 216.0 / 6.0 * 0.5);
        assert_relative_eq!(weld.iy(), 6.0 * 9.0 / 2.0 * 0.5);
        assert_relative_eq!(weld.j(), 6.0 * (27.0 + 36.0) / 6.0 * 0.5);
    }

    #[test]
    fn test_profile_labels() {
        assert!(WeldProfile::from_label("line", 6.0, None).is_ok());
        assert!(WeldProfile::from_label("BOX", 6.0, Some(3.0)).is_ok());
        assert_eq!(
            WeldProfile::from_label("box", 6.0, None).unwrap_err(),
            StressError::missing_field("b")
        );
        assert!(WeldProfile::from_label("spiral", 6.0, None).is_err());
    }
}
