//! Structural welds.
//!
//! Weld shapes use a local coordinate system with `z` normal to the
//! profile, `y` vertical, and `x` horizontal. Orientations are declared
//! through the load's `primary`/`secondary` axes: `primary` is the global
//! axis the weld's local +x points in, `secondary` the global axis its
//! local +y points in. Loads reported in the weld's local system need no
//! adjustment, as the canonical orientation is (x, y).

use std::ops::Deref;

use serde::Serialize;

use crate::errors::StressResult;
use crate::loads::Load;
use crate::materials::MaterialSpec;
use crate::shapes::{Shape, WeldProfile, WeldShape, WeldType};
use crate::stress::srss;
use crate::structural::{Group, StructuralElement, StructuralObject};

/// A structural weld element
#[derive(Debug, Clone, Serialize)]
pub struct Weld {
    object: StructuralObject,
    weld_type: WeldType,
    normal_allowable: Option<f64>,
    allowable_shear: Option<f64>,
    allowable_tension: Option<f64>,
}

impl Weld {
    pub fn new(
        shape: WeldShape,
        loads: Option<Load>,
        material: Option<MaterialSpec>,
    ) -> StressResult<Self> {
        let weld_type = shape.weld_type();
        let mut object = StructuralObject::new(Shape::Weld(shape), loads, material)?;
        object.push_info("weld_type", weld_type.label());
        if let Some(label) = object.label() {
            object.push_info("label", label);
        }
        Ok(Self {
            object,
            weld_type,
            normal_allowable: None,
            allowable_shear: None,
            allowable_tension: None,
        })
    }

    /// Resolve a profile label ("line", "box", "double line") and build
    /// the weld from leg size and weld type.
    pub fn from_label(
        label: &str,
        d: f64,
        b: Option<f64>,
        s: f64,
        weld_type: WeldType,
        loads: Option<Load>,
        material: Option<MaterialSpec>,
    ) -> StressResult<Self> {
        let profile = WeldProfile::from_label(label, d, b)?;
        Self::new(WeldShape::new(profile, s, weld_type)?, loads, material)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.object = self.object.with_name(name);
        self
    }

    /// Allowable for the combined normal stress ratio
    pub fn with_normal_allowable(mut self, allowable: f64) -> Self {
        self.normal_allowable = Some(allowable);
        self
    }

    /// Allowable shear stress for the shear ratios
    pub fn with_allowable_shear(mut self, allowable: f64) -> Self {
        self.allowable_shear = Some(allowable);
        self
    }

    /// Allowable tensile stress for the tensile ratio
    pub fn with_allowable_tension(mut self, allowable: f64) -> Self {
        self.allowable_tension = Some(allowable);
        self
    }

    pub fn weld_type(&self) -> WeldType {
        self.weld_type
    }

    fn weld_shape(&self) -> &WeldShape {
        match self.object.shape() {
            Shape::Weld(shape) => shape,
            _ => unreachable!("weld objects always carry a weld shape"),
        }
    }

    /// Leg size
    pub fn s(&self) -> f64 {
        self.weld_shape().s()
    }

    /// Effective throat
    pub fn t(&self) -> f64 {
        self.weld_shape().t()
    }

    // ========================== Stress Properties ========================

    /// Torsional shear component acting along x, at the extreme y fiber
    pub fn tx(&self) -> f64 {
        self.object.loads().mz() * self.object.shape().cy_max() / self.object.shape().j()
    }

    /// Torsional shear component acting along y, at the extreme x fiber
    pub fn ty(&self) -> f64 {
        self.object.loads().mz() * self.object.shape().cx_max() / self.object.shape().j()
    }

    /// Combined normal stress magnitude: axial plus both bending maxima
    pub fn s_normal(&self) -> f64 {
        self.object.sa().abs() + self.object.sbx() + self.object.sby()
    }

    /// Resultant shear in x: direct shear with the torsional component
    pub fn s_shear_x(&self) -> f64 {
        srss(&[self.object.svx(), self.tx()])
    }

    /// Resultant shear in y
    pub fn s_shear_y(&self) -> f64 {
        srss(&[self.object.svy(), self.ty()])
    }

    /// Combined normal stress over its allowable
    pub fn normal_stress_ratio(&self) -> Option<f64> {
        self.normal_allowable.map(|a| self.s_normal() / a)
    }

    /// Governing resultant shear over the allowable shear stress
    pub fn shear_stress_ratio(&self) -> Option<f64> {
        self.allowable_shear
            .map(|a| self.s_shear_x().max(self.s_shear_y()) / a)
    }

    /// Max tensile stress over the allowable tensile stress
    pub fn tensile_ratio(&self) -> Option<f64> {
        self.allowable_tension
            .map(|a| (self.object.max_tensile() / a).abs())
    }

    /// Max shear stress over the allowable shear stress
    pub fn shear_ratio(&self) -> Option<f64> {
        self.allowable_shear
            .map(|a| (self.object.max_shear() / a).abs())
    }
}

impl Deref for Weld {
    type Target = StructuralObject;

    fn deref(&self) -> &StructuralObject {
        &self.object
    }
}

impl StructuralElement for Weld {
    fn object(&self) -> &StructuralObject {
        &self.object
    }
}

/// A group of welds to evaluate as a batch
pub type WeldGroup = Group<Weld>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropValue;
    use approx::assert_relative_eq;

    fn line_weld(loads: Load) -> Weld {
        Weld::from_label(
            "line",
            10.0,
            None,
            0.5,
            WeldType::Cjp,
            Some(loads),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_weld_geometry() {
        let weld = line_weld(Load::zero());
        assert_relative_eq!(weld.s(), 0.5);
        assert_relative_eq!(weld.t(), 0.5);
        assert_relative_eq!(weld.shape().a(), 5.0);
        assert_eq!(weld.weld_type(), WeldType::Cjp);
    }

    #[test]
    fn test_fillet_throat() {
        let weld = Weld::from_label(
            "line",
            10.0,
            None,
            0.25,
            WeldType::Fillet,
            None,
            None,
        )
        .unwrap();
        assert_relative_eq!(weld.t(), 0.25 * 0.707, epsilon = 1e-12);
    }

    #[test]
    fn test_torsional_components() {
        // Line weld d=10, t=0.5: J = 1000*0.5/12, cy_max = 5, cx_max = 0.25
        let weld = line_weld(Load::new(0.0, 0.0, 0.0, 0.0, 0.0, 100.0));
        let j = 1000.0 * 0.5 / 12.0;
        assert_relative_eq!(weld.tx(), 100.0 * 5.0 / j, epsilon = 1e-9);
        assert_relative_eq!(weld.ty(), 100.0 * 0.25 / j, epsilon = 1e-9);
    }

    #[test]
    fn test_resultant_shears_combine_direct_and_torsion() {
        let weld = line_weld(Load::new(30.0, 40.0, 0.0, 0.0, 0.0, 100.0));
        let expected_x = (weld.svx().powi(2) + weld.tx().powi(2)).sqrt();
        let expected_y = (weld.svy().powi(2) + weld.ty().powi(2)).sqrt();
        assert_relative_eq!(weld.s_shear_x(), expected_x, epsilon = 1e-12);
        assert_relative_eq!(weld.s_shear_y(), expected_y, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_stress_sum() {
        let weld = line_weld(Load::new(0.0, 0.0, 500.0, 200.0, 50.0, 0.0));
        let expected = weld.sa().abs() + weld.sbx() + weld.sby();
        assert_relative_eq!(weld.s_normal(), expected, epsilon = 1e-12);
        assert!(weld.s_normal() > 0.0);
    }

    #[test]
    fn test_ratios_require_allowables() {
        let bare = line_weld(Load::new(0.0, 0.0, 500.0, 0.0, 0.0, 0.0));
        assert_eq!(bare.normal_stress_ratio(), None);
        assert_eq!(bare.shear_stress_ratio(), None);
        assert_eq!(bare.tensile_ratio(), None);
        assert_eq!(bare.shear_ratio(), None);

        let checked = line_weld(Load::new(0.0, 0.0, 500.0, 0.0, 0.0, 0.0))
            .with_normal_allowable(21_000.0)
            .with_allowable_shear(14_000.0)
            .with_allowable_tension(21_000.0);
        assert_relative_eq!(
            checked.normal_stress_ratio().unwrap(),
            checked.s_normal() / 21_000.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            checked.tensile_ratio().unwrap(),
            checked.max_tensile() / 21_000.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(checked.shear_ratio().unwrap(), 0.0);
    }

    #[test]
    fn test_oriented_weld_load() {
        // Loads given in a frame whose local x points along global z: the
        // global z force lands on the weld's local x as direct shear
        let loads = Load::new(0.0, 0.0, 800.0, 0.0, 0.0, 0.0)
            .oriented("z", "x")
            .unwrap();
        let weld = line_weld(loads);
        // Transformed: fx = raw fz
        assert_relative_eq!(weld.svx(), 800.0 / 5.0, epsilon = 1e-12);
        assert_relative_eq!(weld.sa(), 0.0);
    }

    #[test]
    fn test_weld_series_info_props() {
        let weld = line_weld(Load::zero()).with_name("W-1");
        let record = weld.series();
        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        // weld_type and label lead, right after Name
        assert_eq!(names[0], "Name");
        assert_eq!(names[1], "weld_type");
        assert_eq!(names[2], "label");
        assert_eq!(record.get("weld_type"), Some(&PropValue::Text("cjp".into())));
        assert_eq!(record.get("label"), Some(&PropValue::Text("line".into())));
    }

    #[test]
    fn test_weld_group() {
        let welds: Vec<Weld> = (1..=2)
            .map(|i| {
                line_weld(Load::new(0.0, 0.0, 100.0 * i as f64, 0.0, 0.0, 0.0))
                    .with_name(format!("W-{i}"))
            })
            .collect();
        let table = WeldGroup::new(welds).evaluate();
        assert_eq!(table.n_rows(), 2);
        assert!(table.columns.contains(&"weld_type".to_string()));
        let sa0 = table.value(0, "Sa").unwrap().as_f64().unwrap();
        let sa1 = table.value(1, "Sa").unwrap().as_f64().unwrap();
        assert_relative_eq!(sa1, 2.0 * sa0, epsilon = 1e-12);
    }
}
