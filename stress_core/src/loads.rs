//! # Loads
//!
//! A generalized load containing three force and three moment components,
//! with transforms to other coordinate systems at 90 degree rotations.
//!
//! A load's orientation is declared by two axes: `primary` is the global
//! axis the element's local x-axis points in, `secondary` is the global
//! axis the element's local y-axis points in. When the orientation differs
//! from the canonical (x, y) pair, component values are remapped through a
//! fixed signed-permutation table covering every right-angle reorientation.
//!
//! ## Example
//!
//! ```rust
//! use stress_core::loads::Load;
//!
//! // A load expressed in a frame whose local x points along global z
//! let load = Load::new(10.0, 0.0, 50.0, 0.0, 0.0, 120.0)
//!     .oriented("z", "x")
//!     .unwrap();
//! assert_eq!(load.fx(), 50.0); // local x carries the global z force
//! ```

use std::ops::{Add, Mul};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{StressError, StressResult};
use crate::props::PropValue;

/// A signed coordinate axis label (`x`, `-x`, `y`, `-y`, `z`, `-z`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    NegX,
    Y,
    NegY,
    Z,
    NegZ,
}

impl Axis {
    /// All axis labels
    pub const ALL: [Axis; 6] = [Axis::X, Axis::NegX, Axis::Y, Axis::NegY, Axis::Z, Axis::NegZ];

    /// The physical axis with the sign stripped
    pub fn direction(&self) -> char {
        match self {
            Axis::X | Axis::NegX => 'x',
            Axis::Y | Axis::NegY => 'y',
            Axis::Z | Axis::NegZ => 'z',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::NegX => "-x",
            Axis::Y => "y",
            Axis::NegY => "-y",
            Axis::Z => "z",
            Axis::NegZ => "-z",
        }
    }
}

impl FromStr for Axis {
    type Err = StressError;

    /// Parse a label of the form "optional minus sign + one of x/y/z"
    fn from_str(s: &str) -> StressResult<Self> {
        match s.trim() {
            "x" => Ok(Axis::X),
            "-x" => Ok(Axis::NegX),
            "y" => Ok(Axis::Y),
            "-y" => Ok(Axis::NegY),
            "z" => Ok(Axis::Z),
            "-z" => Ok(Axis::NegZ),
            other => Err(StressError::invalid_input(
                "axis",
                other,
                "Expected one of x, y, z with an optional leading minus sign",
            )),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A load orientation: the global axes the element's local x (primary) and
/// local y (secondary) point in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation {
    pub primary: Axis,
    pub secondary: Axis,
}

impl Orientation {
    /// Build an orientation, rejecting pairs that reference the same
    /// physical axis (ignoring sign).
    pub fn new(primary: Axis, secondary: Axis) -> StressResult<Self> {
        if primary.direction() == secondary.direction() {
            return Err(StressError::invalid_input(
                "secondary",
                secondary.label(),
                format!(
                    "Load orientations are not a valid combination (primary={}, secondary={})",
                    primary.label(),
                    secondary.label()
                ),
            ));
        }
        Ok(Self { primary, secondary })
    }

    /// Parse an orientation from axis labels
    pub fn parse(primary: &str, secondary: &str) -> StressResult<Self> {
        Self::new(primary.parse()?, secondary.parse()?)
    }

    /// The canonical (x, y) orientation, which applies no transform
    pub fn canonical() -> Self {
        Self {
            primary: Axis::X,
            secondary: Axis::Y,
        }
    }

    pub fn is_canonical(&self) -> bool {
        *self == Self::canonical()
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::canonical()
    }
}

/// One orientation's component remapping. Each entry of the map is a signed
/// 1-based index into the raw component vector (fx, fy, fz, mx, my, mz):
/// transformed component `i` takes `sign(map[i]) * raw[abs(map[i]) - 1]`.
type ComponentMap = [i8; 6];

/// Signed-permutation table for every valid (primary, secondary) pair —
/// the 24 orientations reachable from (x, y) by 90-degree-multiple
/// rotations plus axis reflection. An enumerated array rather than a nested
/// lookup so a unit test can verify exhaustiveness.
#[rustfmt::skip]
const ORIENTATION_MAP: [(Axis, Axis, ComponentMap); 24] = [
    (Axis::X,    Axis::Y,    [ 1,  2,  3,  4,  5,  6]),
    (Axis::X,    Axis::NegY, [ 1, -2, -3,  4, -5, -6]),
    (Axis::X,    Axis::Z,    [ 1, -3,  2,  4, -6,  5]),
    (Axis::X,    Axis::NegZ, [ 1,  3, -2,  4,  6, -5]),
    (Axis::NegX, Axis::Y,    [-1,  2, -3, -4,  5, -6]),
    (Axis::NegX, Axis::NegY, [-1, -2,  3, -4, -5,  6]),
    (Axis::NegX, Axis::Z,    [-1, -3,  2, -4, -6,  5]),
    (Axis::NegX, Axis::NegZ, [-1,  3, -2, -4,  6, -5]),
    (Axis::Y,    Axis::X,    [ 2,  1, -3,  5,  4, -6]),
    (Axis::Y,    Axis::NegX, [-2,  1,  3, -5,  4,  6]),
    (Axis::Y,    Axis::Z,    [ 2,  3,  1,  5,  6,  4]),
    (Axis::Y,    Axis::NegZ, [-2,  3, -1, -5,  6, -4]),
    (Axis::NegY, Axis::X,    [ 2,  1,  3,  5,  4,  6]),
    (Axis::NegY, Axis::NegX, [-2,  1, -3, -5,  4, -6]),
    (Axis::NegY, Axis::Z,    [-2,  3, -1, -5,  6, -4]),
    (Axis::NegY, Axis::NegZ, [ 2,  3,  1,  5,  6,  4]),
    (Axis::Z,    Axis::X,    [ 3,  1,  2,  6,  4,  5]),
    (Axis::Z,    Axis::NegX, [-3, -1,  2, -6, -4,  5]),
    (Axis::Z,    Axis::Y,    [ 3,  2, -1,  6,  5, -4]),
    (Axis::Z,    Axis::NegY, [-3, -2, -1, -6, -5, -4]),
    (Axis::NegZ, Axis::X,    [-3,  1, -2, -6,  4, -5]),
    (Axis::NegZ, Axis::NegX, [ 3, -1, -2,  6, -4, -5]),
    (Axis::NegZ, Axis::Y,    [-3,  2,  1, -6,  5,  4]),
    (Axis::NegZ, Axis::NegY, [ 3, -2,  1,  6, -5,  4]),
];

fn component_map(orientation: Orientation) -> &'static ComponentMap {
    ORIENTATION_MAP
        .iter()
        .find(|(p, q, _)| *p == orientation.primary && *q == orientation.secondary)
        .map(|(_, _, map)| map)
        .expect("every valid orientation has a table entry")
}

fn apply_map(map: &ComponentMap, raw: &[f64; 6]) -> [f64; 6] {
    let mut out = [0.0; 6];
    for (slot, &entry) in out.iter_mut().zip(map) {
        let index = entry.unsigned_abs() as usize - 1;
        *slot = entry.signum() as f64 * raw[index];
    }
    out
}

/// A generic load with three force and three moment components.
///
/// Components are stored as given; the `value`/accessor views apply the
/// declared orientation transform. Immutable after construction apart from
/// orientation re-declaration (which consumes and rebuilds the load).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    fx: f64,
    fy: f64,
    fz: f64,
    mx: f64,
    my: f64,
    mz: f64,
    orientation: Orientation,
    name: Option<String>,
}

impl Load {
    /// Build a load in the canonical (x, y) orientation
    pub fn new(fx: f64, fy: f64, fz: f64, mx: f64, my: f64, mz: f64) -> Self {
        Self {
            fx,
            fy,
            fz,
            mx,
            my,
            mz,
            orientation: Orientation::canonical(),
            name: None,
        }
    }

    /// A zero load in the canonical orientation
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Re-declare the orientation from axis labels
    pub fn oriented(self, primary: &str, secondary: &str) -> StressResult<Self> {
        Ok(Self {
            orientation: Orientation::parse(primary, secondary)?,
            ..self
        })
    }

    /// Re-declare the orientation
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether the declared orientation differs from canonical (x, y)
    pub fn is_transformed(&self) -> bool {
        !self.orientation.is_canonical()
    }

    /// Components exactly as given, with no orientation transform
    pub fn raw_value(&self) -> [f64; 6] {
        [self.fx, self.fy, self.fz, self.mx, self.my, self.mz]
    }

    /// The six components as seen in the declared local orientation
    pub fn value(&self) -> [f64; 6] {
        let raw = self.raw_value();
        if self.is_transformed() {
            apply_map(component_map(self.orientation), &raw)
        } else {
            raw
        }
    }

    pub fn fx(&self) -> f64 {
        self.value()[0]
    }

    pub fn fy(&self) -> f64 {
        self.value()[1]
    }

    pub fn fz(&self) -> f64 {
        self.value()[2]
    }

    pub fn mx(&self) -> f64 {
        self.value()[3]
    }

    pub fn my(&self) -> f64 {
        self.value()[4]
    }

    pub fn mz(&self) -> f64 {
        self.value()[5]
    }

    /// The force components (fx, fy, fz) in the declared orientation
    pub fn force(&self) -> [f64; 3] {
        let v = self.value();
        [v[0], v[1], v[2]]
    }

    /// The moment components (mx, my, mz) in the declared orientation
    pub fn moment(&self) -> [f64; 3] {
        let v = self.value();
        [v[3], v[4], v[5]]
    }

    /// Look up a load property by name (`f_x`/`fx`, ..., `primary`,
    /// `secondary`), comparing with underscores stripped.
    pub fn get(&self, prop: &str) -> Option<PropValue> {
        match crate::props::standardized(prop).as_str() {
            "fx" => Some(self.fx().into()),
            "fy" => Some(self.fy().into()),
            "fz" => Some(self.fz().into()),
            "mx" => Some(self.mx().into()),
            "my" => Some(self.my().into()),
            "mz" => Some(self.mz().into()),
            "primary" => Some(self.orientation.primary.label().into()),
            "secondary" => Some(self.orientation.secondary.label().into()),
            _ => None,
        }
    }

    /// Properties for record export, keyed by the standard load names
    pub fn properties(&self) -> Vec<(String, PropValue)> {
        let v = self.value();
        vec![
            ("f_x".to_string(), v[0].into()),
            ("f_y".to_string(), v[1].into()),
            ("f_z".to_string(), v[2].into()),
            ("m_x".to_string(), v[3].into()),
            ("m_y".to_string(), v[4].into()),
            ("m_z".to_string(), v[5].into()),
            (
                "primary".to_string(),
                self.orientation.primary.label().into(),
            ),
            (
                "secondary".to_string(),
                self.orientation.secondary.label().into(),
            ),
        ]
    }
}

impl Add for Load {
    type Output = Load;

    /// Componentwise sum over the oriented values, producing a canonical
    /// (untransformed) load.
    fn add(self, other: Load) -> Load {
        let a = self.value();
        let b = other.value();
        Load::new(
            a[0] + b[0],
            a[1] + b[1],
            a[2] + b[2],
            a[3] + b[3],
            a[4] + b[4],
            a[5] + b[5],
        )
    }
}

impl Mul<f64> for Load {
    type Output = Load;

    /// Scale the oriented values, producing a canonical load
    fn mul(self, scalar: f64) -> Load {
        let v = self.value();
        Load::new(
            scalar * v[0],
            scalar * v[1],
            scalar * v[2],
            scalar * v[3],
            scalar * v[4],
            scalar * v[5],
        )
    }
}

impl std::fmt::Display for Load {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.value();
        let labels = ["fx", "fy", "fz", "mx", "my", "mz"];
        let parts: Vec<String> = labels
            .iter()
            .zip(&v)
            .filter(|(_, value)| **value != 0.0)
            .map(|(label, value)| format!("{label}={}", crate::props::nformat(*value)))
            .collect();
        write!(f, "{}", parts.join("   "))
    }
}

/// A generic load factor used for amplifying loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub value: f64,
    pub name: Option<String>,
}

impl Factor {
    pub fn new(value: f64) -> Self {
        Self { value, name: None }
    }

    pub fn named(value: f64, name: impl Into<String>) -> Self {
        Self {
            value,
            name: Some(name.into()),
        }
    }
}

impl Default for Factor {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Mul<f64> for Factor {
    type Output = f64;

    fn mul(self, scalar: f64) -> f64 {
        self.value * scalar
    }
}

impl Mul<Load> for Factor {
    type Output = Load;

    fn mul(self, load: Load) -> Load {
        load * self.value
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} = {}", name, self.value),
            None => write!(f, "Factor ({})", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_parsing() {
        assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
        assert_eq!("-z".parse::<Axis>().unwrap(), Axis::NegZ);
        assert!(" y ".parse::<Axis>().is_ok());
        assert!("q".parse::<Axis>().is_err());
        assert!("+x".parse::<Axis>().is_err());
        assert!("xy".parse::<Axis>().is_err());
    }

    #[test]
    fn test_orientation_rejects_same_direction() {
        assert!(Orientation::parse("x", "-x").is_err());
        assert!(Orientation::parse("z", "z").is_err());
        assert!(Orientation::parse("x", "y").is_ok());
        assert!(Orientation::parse("-z", "y").is_ok());
    }

    #[test]
    fn test_canonical_orientation_is_identity() {
        let load = Load::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert!(!load.is_transformed());
        assert_eq!(load.value(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_transform_z_x() {
        // Local x along global z, local y along global x: local frame sees
        // the global z force on its x axis, global x force on its y axis.
        let load = Load::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
            .oriented("z", "x")
            .unwrap();
        assert_eq!(load.value(), [3.0, 1.0, 2.0, 6.0, 4.0, 5.0]);
    }

    #[test]
    fn test_transform_x_negy() {
        let load = Load::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
            .oriented("x", "-y")
            .unwrap();
        assert_eq!(load.value(), [1.0, -2.0, -3.0, 4.0, -5.0, -6.0]);
    }

    #[test]
    fn test_table_covers_all_valid_pairs_once() {
        let mut seen = std::collections::HashSet::new();
        for (p, q, _) in &ORIENTATION_MAP {
            assert_ne!(p.direction(), q.direction());
            assert!(seen.insert((*p, *q)), "duplicate entry for ({p}, {q})");
        }
        let valid = Axis::ALL
            .iter()
            .flat_map(|p| Axis::ALL.iter().map(move |q| (*p, *q)))
            .filter(|(p, q)| p.direction() != q.direction())
            .count();
        assert_eq!(ORIENTATION_MAP.len(), valid);
        assert_eq!(ORIENTATION_MAP.len(), 24);
    }

    #[test]
    fn test_maps_are_signed_permutations() {
        for (_, _, map) in &ORIENTATION_MAP {
            let mut used = [false; 6];
            for &entry in map {
                let index = entry.unsigned_abs() as usize;
                assert!((1..=6).contains(&index));
                assert!(!used[index - 1]);
                used[index - 1] = true;
            }
            // Forces draw from force slots, moments from moment slots
            for (slot, &entry) in map.iter().enumerate() {
                let source = entry.unsigned_abs() as usize - 1;
                assert_eq!(slot < 3, source < 3);
            }
        }
    }

    #[test]
    fn test_transform_round_trips_through_inverse() {
        // Applying a map and then its transpose (the inverse of a signed
        // permutation) must reproduce the original components, for every
        // orientation in the table.
        let raw = [1.0, -2.0, 3.0, -4.0, 5.0, -6.0];
        for (_, _, map) in &ORIENTATION_MAP {
            let transformed = apply_map(map, &raw);
            let mut inverse = [0i8; 6];
            for (slot, &entry) in map.iter().enumerate() {
                let source = entry.unsigned_abs() as usize - 1;
                inverse[source] = entry.signum() * (slot as i8 + 1);
            }
            let back = apply_map(&inverse, &transformed);
            assert_eq!(back, raw);
        }
    }

    #[test]
    fn test_moment_map_mirrors_force_map() {
        for (_, _, map) in &ORIENTATION_MAP {
            for i in 0..3 {
                assert_eq!(map[i + 3].signum(), map[i].signum());
                assert_eq!(map[i + 3].unsigned_abs(), map[i].unsigned_abs() + 3);
            }
        }
    }

    #[test]
    fn test_addition_sums_oriented_values() {
        let a = Load::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
            .oriented("x", "-y")
            .unwrap();
        let b = Load::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0);
        let sum = a + b;
        assert!(!sum.is_transformed());
        assert_eq!(sum.value(), [2.0, -1.0, -2.0, 5.0, -4.0, -5.0]);
    }

    #[test]
    fn test_scaling() {
        let load = Load::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0) * 2.0;
        assert_eq!(load.value(), [2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn test_factor() {
        let factor = Factor::named(1.6, "live");
        assert_eq!(factor.clone() * 100.0, 160.0);
        let load = factor * Load::new(10.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(load.fx(), 16.0);
    }

    #[test]
    fn test_load_get() {
        let load = Load::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(load.get("f_z"), Some(PropValue::Num(3.0)));
        assert_eq!(load.get("mz"), Some(PropValue::Num(6.0)));
        assert_eq!(load.get("primary"), Some(PropValue::Text("x".to_string())));
        assert_eq!(load.get("A"), None);
    }
}
