//! # Materials Database
//!
//! Material property bags and a built-in database of common structural and
//! fastener steels. A material exposes at minimum the modulus of elasticity
//! (E), yield strength (Fy), ultimate strength (Fu), and density (rho),
//! plus any free-form extra properties.
//!
//! Property lookups accept the common aliases (`Fy`/`YS`/`F_y` for yield,
//! `Fu`/`UTS`/`Futs` for ultimate); aliases are resolved at the lookup
//! boundary by a fixed table.
//!
//! ## Example
//!
//! ```rust
//! use stress_core::materials::Material;
//!
//! let steel = Material::named("A36").unwrap();
//! assert_eq!(steel.fy(), Some(36_000.0));
//! assert_eq!(steel.get("YS").unwrap().as_f64(), Some(36_000.0));
//!
//! assert!(Material::named("unobtainium").is_err());
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{StressError, StressResult};
use crate::props::{standardized, PropValue};

/// A material property bag.
///
/// Values are in US customary units: psi for strengths and modulus,
/// lb/in^3 for density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Material {
    pub name: Option<String>,
    /// Modulus of elasticity (psi)
    pub e: Option<f64>,
    /// Minimum yield strength (psi)
    pub fy: Option<f64>,
    /// Minimum ultimate tensile strength (psi)
    pub fu: Option<f64>,
    /// Density (lb/in^3)
    pub rho: Option<f64>,
    /// Free-form extra properties, insertion order preserved
    pub extra: Vec<(String, PropValue)>,
}

impl Material {
    /// Build a fully specified material
    pub fn new(e: f64, fy: f64, fu: f64, rho: f64) -> Self {
        Self {
            e: Some(e),
            fy: Some(fy),
            fu: Some(fu),
            rho: Some(rho),
            ..Self::default()
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    /// Look up a material in the built-in database by name
    /// (case-insensitive). Fails with `MaterialNotFound` if absent.
    pub fn named(name: &str) -> StressResult<Material> {
        MATERIALS
            .get(&name.trim().to_uppercase())
            .cloned()
            .ok_or_else(|| StressError::material_not_found(name.trim()))
    }

    /// Whether a named material exists in the built-in database
    pub fn exists(name: &str) -> bool {
        MATERIALS.contains_key(&name.trim().to_uppercase())
    }

    /// Build a custom material from a property map. Keys are matched
    /// through the alias table (so `YS`, `F_y`, and `Fy` all set the yield
    /// strength); unrecognized keys are kept as extra properties.
    pub fn custom<I, K>(props: I) -> Material
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut material = Material::default();
        for (key, value) in props {
            let key: String = key.into();
            match standardized(&key).as_str() {
                "E" => material.e = Some(value),
                "Fy" | "YS" => material.fy = Some(value),
                "Fu" | "Futs" | "UTS" => material.fu = Some(value),
                "rho" => material.rho = Some(value),
                _ => material.extra.push((key, PropValue::Num(value))),
            }
        }
        material
    }

    pub fn e(&self) -> Option<f64> {
        self.e
    }

    pub fn fy(&self) -> Option<f64> {
        self.fy
    }

    pub fn fu(&self) -> Option<f64> {
        self.fu
    }

    pub fn rho(&self) -> Option<f64> {
        self.rho
    }

    /// Look up a property by name, resolving aliases with underscores
    /// stripped.
    pub fn get(&self, prop: &str) -> Option<PropValue> {
        match standardized(prop).as_str() {
            "E" => self.e.map(PropValue::Num),
            "Fy" | "YS" => self.fy.map(PropValue::Num),
            "Fu" | "Futs" | "UTS" => self.fu.map(PropValue::Num),
            "rho" | "density" => self.rho.map(PropValue::Num),
            std_name => self
                .extra
                .iter()
                .find(|(k, _)| standardized(k) == std_name)
                .map(|(_, v)| v.clone()),
        }
    }

    /// Properties for record export, keyed by the canonical material names
    pub fn properties(&self) -> Vec<(String, Option<PropValue>)> {
        let mut props: Vec<(String, Option<PropValue>)> = vec![
            ("E".to_string(), self.e.map(PropValue::Num)),
            ("Fy".to_string(), self.fy.map(PropValue::Num)),
            ("Fu".to_string(), self.fu.map(PropValue::Num)),
            ("rho".to_string(), self.rho.map(PropValue::Num)),
        ];
        for (key, value) in &self.extra {
            props.push((key.clone(), Some(value.clone())));
        }
        props
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "User-defined material"),
        }
    }
}

/// Built-in database: common structural and fastener steels plus a few
/// frequently checked alloys. (name, E, Fy, Fu, rho), psi and lb/in^3.
const BUILTIN_MATERIALS: [(&str, f64, f64, f64, f64); 9] = [
    ("A36", 29.0e6, 36_000.0, 58_000.0, 0.284),
    ("A992", 29.0e6, 50_000.0, 65_000.0, 0.284),
    ("A500 GR. B", 29.0e6, 46_000.0, 58_000.0, 0.284),
    ("A500 GR. C", 29.0e6, 50_000.0, 62_000.0, 0.284),
    ("A572 GR. 50", 29.0e6, 50_000.0, 65_000.0, 0.284),
    ("A325", 29.0e6, 92_000.0, 120_000.0, 0.284),
    ("A490", 29.0e6, 130_000.0, 150_000.0, 0.284),
    ("304 SS", 28.0e6, 30_000.0, 75_000.0, 0.289),
    ("6061-T6", 10.0e6, 35_000.0, 42_000.0, 0.098),
];

static MATERIALS: Lazy<HashMap<String, Material>> = Lazy::new(|| {
    BUILTIN_MATERIALS
        .iter()
        .map(|&(name, e, fy, fu, rho)| {
            (
                name.to_string(),
                Material::new(e, fy, fu, rho).with_name(name),
            )
        })
        .collect()
});

/// Material input: an already-built material, a database name, or a custom
/// property map.
#[derive(Debug, Clone)]
pub enum MaterialSpec {
    Material(Material),
    Name(String),
    Props(Vec<(String, f64)>),
}

impl MaterialSpec {
    /// Resolve to a material; named lookups fail with `MaterialNotFound`
    pub fn resolve(self) -> StressResult<Material> {
        match self {
            MaterialSpec::Material(material) => Ok(material),
            MaterialSpec::Name(name) => Material::named(&name),
            MaterialSpec::Props(props) => Ok(Material::custom(props)),
        }
    }
}

impl From<Material> for MaterialSpec {
    fn from(material: Material) -> Self {
        MaterialSpec::Material(material)
    }
}

impl From<&str> for MaterialSpec {
    fn from(name: &str) -> Self {
        MaterialSpec::Name(name.to_string())
    }
}

impl From<String> for MaterialSpec {
    fn from(name: String) -> Self {
        MaterialSpec::Name(name)
    }
}

impl From<Vec<(String, f64)>> for MaterialSpec {
    fn from(props: Vec<(String, f64)>) -> Self {
        MaterialSpec::Props(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup() {
        let a992 = Material::named("A992").unwrap();
        assert_eq!(a992.fy(), Some(50_000.0));
        assert_eq!(a992.fu(), Some(65_000.0));
        assert_eq!(a992.e(), Some(29.0e6));
        assert_eq!(a992.name.as_deref(), Some("A992"));
    }

    #[test]
    fn test_named_lookup_case_insensitive() {
        assert!(Material::named("a36").is_ok());
        assert!(Material::named(" A36 ").is_ok());
        assert!(Material::exists("a500 gr. b"));
    }

    #[test]
    fn test_named_lookup_missing_is_error() {
        let err = Material::named("A517").unwrap_err();
        assert_eq!(err, StressError::material_not_found("A517"));
    }

    #[test]
    fn test_alias_resolution() {
        let mat = Material::named("A36").unwrap();
        for alias in ["Fy", "F_y", "YS"] {
            assert_eq!(mat.get(alias).unwrap().as_f64(), Some(36_000.0));
        }
        for alias in ["Fu", "UTS", "Futs"] {
            assert_eq!(mat.get(alias).unwrap().as_f64(), Some(58_000.0));
        }
        assert_eq!(mat.get("E").unwrap().as_f64(), Some(29.0e6));
        assert_eq!(mat.get("rho").unwrap().as_f64(), Some(0.284));
        assert_eq!(mat.get("poisson"), None);
    }

    #[test]
    fn test_custom_material_aliases() {
        let mat = Material::custom([("YS", 42_000.0), ("UTS", 60_000.0), ("G", 11.2e6)]);
        assert_eq!(mat.fy(), Some(42_000.0));
        assert_eq!(mat.fu(), Some(60_000.0));
        assert_eq!(mat.e(), None);
        assert_eq!(mat.get("G").unwrap().as_f64(), Some(11.2e6));
    }

    #[test]
    fn test_properties_export() {
        let mat = Material::named("A36").unwrap();
        let props = mat.properties();
        let names: Vec<&str> = props.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["E", "Fy", "Fu", "rho"]);
    }
}
