//! Structural bolts.
//!
//! A bolt resolves its nominal diameter from an explicit value, a radius,
//! or a standard fastener size label, snaps it to the nearest tabulated
//! standard size, and evaluates stresses on the tensile-area-equivalent
//! circular section. Allowable stresses follow AISC 360-16 Table J3.2 and
//! the combined tension/shear interaction of Section J3.

use std::f64::consts::PI;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::errors::{StressError, StressResult};
use crate::loads::Load;
use crate::materials::MaterialSpec;
use crate::shapes::Circle;
use crate::structural::{Group, StructuralElement, StructuralObject};

/// Thread series: UNC (coarse) or UNF (fine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ThreadSeries {
    #[default]
    Coarse,
    Fine,
}

impl ThreadSeries {
    pub fn label(&self) -> &'static str {
        match self {
            ThreadSeries::Coarse => "coarse",
            ThreadSeries::Fine => "fine",
        }
    }

    pub fn from_label(label: &str) -> StressResult<Self> {
        match label.trim().to_lowercase().as_str() {
            "coarse" => Ok(ThreadSeries::Coarse),
            "fine" => Ok(ThreadSeries::Fine),
            other => Err(StressError::invalid_input(
                "thread_series",
                other,
                "thread_series must be either \"coarse\" or \"fine\"",
            )),
        }
    }

    fn table(&self) -> &'static [(&'static str, f64, f64)] {
        match self {
            ThreadSeries::Coarse => &UNC_THREADS,
            ThreadSeries::Fine => &UNF_THREADS,
        }
    }
}

/// Unified National thread data: (size label, basic major diameter,
/// threads per inch). Machinery's Handbook / ASME B1.1.
#[rustfmt::skip]
const UNC_THREADS: [(&str, f64, f64); 20] = [
    ("4",     0.112,  40.0),
    ("5",     0.125,  40.0),
    ("6",     0.138,  32.0),
    ("8",     0.164,  32.0),
    ("10",    0.190,  24.0),
    ("12",    0.216,  24.0),
    ("1/4",   0.250,  20.0),
    ("5/16",  0.3125, 18.0),
    ("3/8",   0.375,  16.0),
    ("7/16",  0.4375, 14.0),
    ("1/2",   0.500,  13.0),
    ("9/16",  0.5625, 12.0),
    ("5/8",   0.625,  11.0),
    ("3/4",   0.750,  10.0),
    ("7/8",   0.875,  9.0),
    ("1",     1.000,  8.0),
    ("1-1/8", 1.125,  7.0),
    ("1-1/4", 1.250,  7.0),
    ("1-3/8", 1.375,  6.0),
    ("1-1/2", 1.500,  6.0),
];

#[rustfmt::skip]
const UNF_THREADS: [(&str, f64, f64); 20] = [
    ("4",     0.112,  48.0),
    ("5",     0.125,  44.0),
    ("6",     0.138,  40.0),
    ("8",     0.164,  36.0),
    ("10",    0.190,  32.0),
    ("12",    0.216,  28.0),
    ("1/4",   0.250,  28.0),
    ("5/16",  0.3125, 24.0),
    ("3/8",   0.375,  24.0),
    ("7/16",  0.4375, 20.0),
    ("1/2",   0.500,  20.0),
    ("9/16",  0.5625, 18.0),
    ("5/8",   0.625,  18.0),
    ("3/4",   0.750,  16.0),
    ("7/8",   0.875,  14.0),
    ("1",     1.000,  12.0),
    ("1-1/8", 1.125,  12.0),
    ("1-1/4", 1.250,  12.0),
    ("1-3/8", 1.375,  12.0),
    ("1-1/2", 1.500,  12.0),
];

/// Bolt size input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoltSize {
    /// Nominal diameter in decimal inches
    Diameter(f64),
    /// Nominal radius in decimal inches
    Radius(f64),
    /// Standard size label such as "#6", "10", or "1/4", with or without
    /// the pound sign
    Number(String),
}

impl From<&str> for BoltSize {
    fn from(label: &str) -> Self {
        BoltSize::Number(label.to_string())
    }
}

/// A structural bolt element.
///
/// Stresses are evaluated on a circular section sized from the thread
/// tensile area per AISC 360-16 Eq. A-3-7, so direct and shear stresses
/// reflect the threaded region.
#[derive(Debug, Clone, Serialize)]
pub struct Bolt {
    object: StructuralObject,
    series: ThreadSeries,
    d: f64,
    tpi: f64,
    a_t: f64,
    d_t: f64,
    f_nt: Option<f64>,
    f_nv: Option<f64>,
    f_u: Option<f64>,
    threads_excluded: Option<bool>,
}

impl Bolt {
    /// Resolve the nominal diameter, snap it to the nearest standard size
    /// for the thread series, and build the evaluator on the
    /// tensile-area-equivalent circle.
    pub fn new(
        size: BoltSize,
        loads: Option<Load>,
        material: Option<MaterialSpec>,
        series: ThreadSeries,
    ) -> StressResult<Self> {
        let table = series.table();

        let requested = match size {
            BoltSize::Diameter(d) => d,
            BoltSize::Radius(r) => 2.0 * r,
            BoltSize::Number(label) => {
                let stripped = label.trim().trim_start_matches('#');
                table
                    .iter()
                    .find(|(name, _, _)| *name == stripped)
                    .map(|(_, d, _)| *d)
                    .ok_or_else(|| {
                        StressError::invalid_input(
                            "number",
                            label.trim(),
                            "Not a standard fastener size for this thread series",
                        )
                    })?
            }
        };

        // Snap to the nearest valid nominal bolt size, then pick up the
        // pitch tabulated for that size
        let diameters: Vec<f64> = table.iter().map(|(_, dia, _)| *dia).collect();
        let d = crate::props::nearest_to(requested, &diameters);
        let tpi = table
            .iter()
            .find(|(_, dia, _)| *dia == d)
            .map(|(_, _, tpi)| *tpi)
            .expect("snapped diameter comes from the table");

        // Tensile stress area per AISC 360-16 Eq. A-3-7, and the diameter
        // of the equivalent circular section
        let a_t = PI / 4.0 * (d - 0.9743 / tpi).powi(2);
        let d_t = (4.0 * a_t / PI).sqrt();

        let object = StructuralObject::new(Circle::from_diameter(d_t), loads, material)?;
        Ok(Self {
            object,
            series,
            d,
            tpi,
            a_t,
            d_t,
            f_nt: None,
            f_nv: None,
            f_u: None,
            threads_excluded: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.object = self.object.with_name(name);
        self
    }

    /// Supply the bolt's specified minimum tensile strength, from which
    /// the nominal stresses of Table J3.2 are derived
    pub fn with_f_u(mut self, f_u: f64) -> Self {
        self.f_u = Some(f_u);
        self
    }

    /// Declare whether threads are excluded from the shear planes
    /// (Table J3.2 X vs. N classification)
    pub fn with_threads_excluded(mut self, excluded: bool) -> Self {
        self.threads_excluded = Some(excluded);
        self
    }

    /// Explicit nominal tensile stress override
    pub fn with_f_nt(mut self, f_nt: f64) -> Self {
        self.f_nt = Some(f_nt);
        self
    }

    /// Explicit nominal shear stress override
    pub fn with_f_nv(mut self, f_nv: f64) -> Self {
        self.f_nv = Some(f_nv);
        self
    }

    /// Snapped nominal diameter
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Nominal radius
    pub fn r(&self) -> f64 {
        self.d / 2.0
    }

    /// Threads per inch for the snapped size
    pub fn tpi(&self) -> f64 {
        self.tpi
    }

    pub fn thread_series(&self) -> ThreadSeries {
        self.series
    }

    /// Thread tensile stress area
    pub fn tensile_area(&self) -> f64 {
        self.a_t
    }

    /// Diameter of the tensile-area-equivalent circle
    pub fn tensile_diameter(&self) -> f64 {
        self.d_t
    }

    /// Nominal tensile stress F_nt per Table J3.2
    pub fn f_nt(&self) -> Option<f64> {
        match self.f_u {
            Some(f_u) => Some(0.75 * f_u),
            None => self.f_nt,
        }
    }

    /// Nominal shear stress F_nv per Table J3.2
    pub fn f_nv(&self) -> Option<f64> {
        match (self.f_u, self.threads_excluded) {
            (Some(f_u), Some(true)) => Some(0.563 * f_u),
            (Some(f_u), Some(false)) => Some(0.450 * f_u),
            _ => self.f_nv,
        }
    }

    /// ASD allowable tensile stress per J3-1, reduced for combined shear
    /// per Eq. J3-3b when the direct shear stress is non-negligible
    pub fn allowable_tensile_stress(&self) -> Option<f64> {
        const OMEGA: f64 = 2.0;
        let f_nt = self.f_nt()?;
        if self.object.svx().abs() > 1.0 || self.object.svy().abs() > 1.0 {
            let f_nv = self.f_nv()?;
            let f_rv = (self.object.svx().powi(2) + self.object.svy().powi(2)).sqrt();
            let reduced = 1.3 * f_nt - OMEGA * f_nt / f_nv * f_rv;
            Some(reduced.min(f_nt) / OMEGA)
        } else {
            Some(f_nt / OMEGA)
        }
    }

    /// ASD allowable shear stress per J3-1
    pub fn allowable_shear_stress(&self) -> Option<f64> {
        const OMEGA: f64 = 2.0;
        self.f_nv().map(|f_nv| f_nv / OMEGA)
    }
}

impl Deref for Bolt {
    type Target = StructuralObject;

    fn deref(&self) -> &StructuralObject {
        &self.object
    }
}

impl StructuralElement for Bolt {
    fn object(&self) -> &StructuralObject {
        &self.object
    }
}

/// A group of bolts to evaluate as a batch
pub type BoltGroup = Group<Bolt>;
