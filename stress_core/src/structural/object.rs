//! The structural object evaluator.
//!
//! A [`StructuralObject`] combines a cross-section shape, a load, and an
//! optional material, and computes nominal stresses at up to 4 corners of
//! the section (left/right, top/bottom), along with combined quantities
//! based on the component stresses (von Mises, intensity, max shear).
//!
//! All component and corner stresses are computed once at construction;
//! the object is immutable afterwards, so every derived quantity is a pure
//! read.

use serde::Serialize;

use crate::errors::StressResult;
use crate::loads::Load;
use crate::materials::{Material, MaterialSpec};
use crate::props::{prop_category, PropCategory, PropValue, ResultRecord};
use crate::shapes::{Shape, ShapeSpec};
use crate::stress::StressElement;

/// The eleven nominal component stresses of a structural object
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentStresses {
    /// Direct axial stress (acts on Sz / S33)
    pub sa: f64,
    /// Direct shear stress in x (acts on Szx / S13)
    pub svx: f64,
    /// Direct shear stress in y (acts on Syz / S23)
    pub svy: f64,
    /// Torsional stress at the lower-left corner (acts on Sxy / S12)
    pub txy_ll: f64,
    /// Torsional stress at the lower-right corner
    pub txy_lr: f64,
    /// Torsional stress at the upper-left corner
    pub txy_ul: f64,
    /// Torsional stress at the upper-right corner
    pub txy_ur: f64,
    /// Bending stress about x-x, lower max fiber (signed)
    pub sbx_low: f64,
    /// Bending stress about x-x, upper max fiber
    pub sbx_high: f64,
    /// Bending stress about y-y, left-most max fiber (signed)
    pub sby_left: f64,
    /// Bending stress about y-y, right-most max fiber
    pub sby_right: f64,
}

impl ComponentStresses {
    /// Evaluate the closed-form nominal stress formulas. Degenerate
    /// geometry (zero A, J, Ix, Iy) propagates as inf/NaN rather than
    /// failing.
    fn compute(shape: &Shape, loads: &Load) -> Self {
        let a = shape.a();
        let j = shape.j();
        let torsion = |cy: f64, cx: f64| loads.mz() * (cy * cy + cx * cx).sqrt() / j;
        Self {
            sa: loads.fz() / a,
            svx: loads.fx() / a,
            svy: loads.fy() / a,
            txy_ll: torsion(shape.cy_low(), shape.cx_left()),
            txy_lr: torsion(shape.cy_low(), shape.cx_right()),
            txy_ul: torsion(shape.cy_high(), shape.cx_left()),
            txy_ur: torsion(shape.cy_high(), shape.cx_right()),
            sbx_low: loads.mx() * shape.cy_low() / shape.ix(),
            sbx_high: loads.mx() * shape.cy_high() / shape.ix(),
            sby_left: loads.my() * shape.cx_left() / shape.iy(),
            sby_right: loads.my() * shape.cx_right() / shape.iy(),
        }
    }

    /// (name, value) pairs in the canonical component-stress order
    pub fn record(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Sa", self.sa),
            ("Svx", self.svx),
            ("Svy", self.svy),
            ("Txy_lr", self.txy_lr),
            ("Txy_ll", self.txy_ll),
            ("Txy_ur", self.txy_ur),
            ("Txy_ul", self.txy_ul),
            ("Sbx_low", self.sbx_low),
            ("Sbx_high", self.sbx_high),
            ("Sby_left", self.sby_left),
            ("Sby_right", self.sby_right),
        ]
    }
}

/// Combined stress elements at the four corner points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CornerStresses {
    pub ll: StressElement,
    pub lr: StressElement,
    pub ul: StressElement,
    pub ur: StressElement,
}

impl CornerStresses {
    fn assemble(c: &ComponentStresses) -> Self {
        // Only the combined normal/shear state at the outer fiber is
        // modeled: Sxx = Syy = 0, Szz carries axial plus bending, Sxy the
        // corner torsion, Sxz/Syz the direct shears.
        let corner = |txy: f64, szz: f64| StressElement::new([0.0, 0.0, szz, txy, c.svx, c.svy]);
        Self {
            ll: corner(c.txy_ll, c.sa + c.sbx_low + c.sby_left).with_name("Sll"),
            lr: corner(c.txy_lr, c.sa + c.sbx_low + c.sby_right).with_name("Slr"),
            ul: corner(c.txy_ul, c.sa + c.sbx_high + c.sby_left).with_name("Sul"),
            ur: corner(c.txy_ur, c.sa + c.sbx_high + c.sby_right).with_name("Sur"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StressElement> {
        [&self.ll, &self.lr, &self.ul, &self.ur].into_iter()
    }
}

/// Max reduction in which NaN poisons the result, so degenerate section
/// quantities stay detectable in the resultants.
fn reduce_max(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(f64::NEG_INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    })
}

fn reduce_min(values: impl IntoIterator<Item = f64>) -> f64 {
    -reduce_max(values.into_iter().map(|v| -v))
}

/// A cross-section shape combined with a material and loads; the base for
/// `Member`, `Bolt`, and `Weld`.
#[derive(Debug, Clone, Serialize)]
pub struct StructuralObject {
    name: Option<String>,
    description: Option<String>,
    shape: Shape,
    loads: Load,
    material: Option<Material>,
    /// Extra identifying properties shown right after the name in records
    info: Vec<(String, PropValue)>,
    /// Free-form metadata (e.g. allowable stress overrides)
    meta: Vec<(String, PropValue)>,
    stresses: ComponentStresses,
    corners: CornerStresses,
}

impl StructuralObject {
    /// Resolve the inputs and evaluate all component and corner stresses.
    /// A zero load in the canonical orientation is used when `loads` is
    /// `None`.
    pub fn new(
        shape: impl Into<ShapeSpec>,
        loads: Option<Load>,
        material: Option<MaterialSpec>,
    ) -> StressResult<Self> {
        Self::with_dims(shape, &[], loads, material)
    }

    /// As `new`, with auxiliary dimensions for generic shape labels
    /// (e.g. "rectangle" resolved against `w`/`h` entries).
    pub fn with_dims(
        shape: impl Into<ShapeSpec>,
        dims: &[(String, f64)],
        loads: Option<Load>,
        material: Option<MaterialSpec>,
    ) -> StressResult<Self> {
        let shape = Shape::resolve_with(shape.into(), dims)?;
        let material = material.map(MaterialSpec::resolve).transpose()?;
        let loads = loads.unwrap_or_else(Load::zero);
        let stresses = ComponentStresses::compute(&shape, &loads);
        let corners = CornerStresses::assemble(&stresses);
        Ok(Self {
            name: None,
            description: None,
            shape,
            loads,
            material,
            info: Vec::new(),
            meta: Vec::new(),
            stresses,
            corners,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a free-form metadata entry
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.meta.push((key.into(), value.into()));
        self
    }

    pub(crate) fn push_info(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.info.push((key.into(), value.into()));
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn loads(&self) -> &Load {
        &self.loads
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// The label of the resolved shape, if it has one
    pub fn label(&self) -> Option<String> {
        self.shape.label()
    }

    // ======================= Stress Components ===========================

    pub fn component_stresses(&self) -> &ComponentStresses {
        &self.stresses
    }

    /// Nominal axial stress (Sz / S33)
    pub fn sa(&self) -> f64 {
        self.stresses.sa
    }

    /// Nominal direct shear stress in x (Szx / S13)
    pub fn svx(&self) -> f64 {
        self.stresses.svx
    }

    /// Nominal direct shear stress in y (Syz / S23)
    pub fn svy(&self) -> f64 {
        self.stresses.svy
    }

    /// Torsional stress, lower right (Sxy / S12)
    pub fn txy_lr(&self) -> f64 {
        self.stresses.txy_lr
    }

    /// Torsional stress, lower left
    pub fn txy_ll(&self) -> f64 {
        self.stresses.txy_ll
    }

    /// Torsional stress, upper right
    pub fn txy_ur(&self) -> f64 {
        self.stresses.txy_ur
    }

    /// Torsional stress, upper left
    pub fn txy_ul(&self) -> f64 {
        self.stresses.txy_ul
    }

    /// Bending stress about x-x, low side
    pub fn sbx_low(&self) -> f64 {
        self.stresses.sbx_low
    }

    /// Bending stress about x-x, high side
    pub fn sbx_high(&self) -> f64 {
        self.stresses.sbx_high
    }

    /// Bending stress about y-y, left side
    pub fn sby_left(&self) -> f64 {
        self.stresses.sby_left
    }

    /// Bending stress about y-y, right side
    pub fn sby_right(&self) -> f64 {
        self.stresses.sby_right
    }

    // ================= Corner point combined stresses ====================

    pub fn corner_stresses(&self) -> &CornerStresses {
        &self.corners
    }

    /// Lower-left corner stress element
    pub fn sll(&self) -> &StressElement {
        &self.corners.ll
    }

    /// Lower-right corner stress element
    pub fn slr(&self) -> &StressElement {
        &self.corners.lr
    }

    /// Upper-left corner stress element
    pub fn sul(&self) -> &StressElement {
        &self.corners.ul
    }

    /// Upper-right corner stress element
    pub fn sur(&self) -> &StressElement {
        &self.corners.ur
    }

    // ==================== Derived Stress Quantities ======================

    /// Maximum von Mises stress across all four corner points
    pub fn von_mises(&self) -> f64 {
        reduce_max(self.corners.iter().map(|s| s.von_mises()))
    }

    /// Maximum bending stress magnitude, x-x
    pub fn sbx(&self) -> f64 {
        self.stresses.sbx_high.abs().max(self.stresses.sbx_low.abs())
    }

    /// Maximum bending stress magnitude, y-y
    pub fn sby(&self) -> f64 {
        self.stresses.sby_right.abs().max(self.stresses.sby_left.abs())
    }

    /// Maximum tensile (signed) normal stress among the axial and bending
    /// components
    pub fn max_tensile(&self) -> f64 {
        reduce_max([
            self.stresses.sa,
            self.stresses.sbx_high,
            self.stresses.sbx_low,
            self.stresses.sby_left,
            self.stresses.sby_right,
        ])
    }

    /// Maximum shear stress magnitude among the direct shears and the four
    /// torsional terms
    pub fn max_shear(&self) -> f64 {
        reduce_max(
            [
                self.stresses.svx,
                self.stresses.svy,
                self.stresses.txy_lr,
                self.stresses.txy_ll,
                self.stresses.txy_ur,
                self.stresses.txy_ul,
            ]
            .map(f64::abs),
        )
    }

    /// Maximum bending stress magnitude on either axis
    pub fn max_bending(&self) -> f64 {
        reduce_max(
            [
                self.stresses.sbx_low,
                self.stresses.sbx_high,
                self.stresses.sby_left,
                self.stresses.sby_right,
            ]
            .map(f64::abs),
        )
    }

    /// Maximum membrane-plus-bending normal stress
    pub fn membrane_plus_bending_max(&self) -> f64 {
        reduce_max(self.membrane_plus_bending())
    }

    /// Minimum membrane-plus-bending normal stress
    pub fn membrane_plus_bending_min(&self) -> f64 {
        reduce_min(self.membrane_plus_bending())
    }

    fn membrane_plus_bending(&self) -> [f64; 4] {
        let sa = self.stresses.sa;
        [
            sa + self.stresses.sbx_high,
            sa + self.stresses.sbx_low,
            sa + self.stresses.sby_left,
            sa + self.stresses.sby_right,
        ]
    }

    /// (name, value) pairs in the canonical resultant-stress order
    pub fn resultant_record(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("von_mises", self.von_mises()),
            ("max_tensile", self.max_tensile()),
            ("max_shear", self.max_shear()),
            ("max_bending", self.max_bending()),
            ("membrane_plus_bending_min", self.membrane_plus_bending_min()),
            ("membrane_plus_bending_max", self.membrane_plus_bending_max()),
        ]
    }

    // ========================== Lookup and export ========================

    /// Get an arbitrary property by name, delegating the lookup to the
    /// owning sub-object by category; uncategorized names fall back to the
    /// free-form metadata.
    pub fn get(&self, prop: &str) -> Option<PropValue> {
        match prop_category(prop) {
            Some(PropCategory::Shape) => self.shape.get(prop),
            Some(PropCategory::Load) => self.loads.get(prop),
            Some(PropCategory::Material) => self.material.as_ref().and_then(|m| m.get(prop)),
            None => self
                .meta
                .iter()
                .find(|(k, _)| k == prop)
                .map(|(_, v)| v.clone()),
        }
    }

    /// Compute all derived properties and flatten them into an ordered
    /// record: name, info properties, component stresses, resultant
    /// stresses, then every shape, load, and material property. Duplicate
    /// names keep the first-seen value.
    pub fn series(&self) -> ResultRecord {
        let mut record = ResultRecord::new();
        record.push(
            "Name",
            Some(
                self.name
                    .clone()
                    .unwrap_or_else(|| "<unnamed>".to_string())
                    .into(),
            ),
        );
        for (key, value) in &self.info {
            record.push(key.clone(), Some(value.clone()));
        }
        for (key, value) in self.stresses.record() {
            record.push_num(key, value);
        }
        for (key, value) in self.resultant_record() {
            record.push_num(key, value);
        }
        for (key, value) in self.shape.properties() {
            record.push(key, Some(value));
        }
        for (key, value) in self.loads.properties() {
            record.push(key, Some(value));
        }
        if let Some(material) = &self.material {
            for (key, value) in material.properties() {
                record.push(key, value);
            }
        }
        record
    }

    /// The `series` record rendered as a two-column text table
    pub fn results_table(&self) -> String {
        self.series().to_table_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle};
    use approx::assert_relative_eq;

    fn member(shape: impl Into<ShapeSpec>, loads: Load) -> StructuralObject {
        StructuralObject::new(shape, Some(loads), None).unwrap()
    }

    #[test]
    fn test_pure_axial() {
        // Rectangle 4x8 under Fz=100: Sa = 100/32 = 3.125, nothing else
        let obj = member(
            Rectangle::new(4.0, 8.0),
            Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0),
        );
        assert_relative_eq!(obj.sa(), 3.125);
        assert_relative_eq!(obj.max_tensile(), 3.125);
        assert_relative_eq!(obj.max_shear(), 0.0);
        assert_relative_eq!(obj.max_bending(), 0.0);
        assert_relative_eq!(obj.von_mises(), 3.125, epsilon = 1e-9);
        assert_relative_eq!(obj.membrane_plus_bending_max(), 3.125);
        assert_relative_eq!(obj.membrane_plus_bending_min(), 3.125);
    }

    #[test]
    fn test_bending_about_x() {
        // Rectangle 4x2 under Mx=100: Sb = M*c/I with c = +-1, I = 2.667
        let obj = member(
            Rectangle::new(4.0, 2.0),
            Load::new(0.0, 0.0, 0.0, 100.0, 0.0, 0.0),
        );
        assert_relative_eq!(obj.sbx_high(), 100.0 / 2.6667, epsilon = 1e-3);
        assert_relative_eq!(obj.sbx_low(), -obj.sbx_high());
        assert_relative_eq!(obj.max_bending(), obj.sbx_high());
        assert_relative_eq!(obj.max_tensile(), obj.sbx_high());
        assert_relative_eq!(obj.membrane_plus_bending_min(), obj.sbx_low());
        assert_relative_eq!(obj.sbx(), obj.sbx_high());
        assert_relative_eq!(obj.sby(), 0.0);
        // The governing von Mises state is pure normal stress
        assert_relative_eq!(obj.von_mises(), obj.sbx_high(), epsilon = 1e-9);
    }

    #[test]
    fn test_torsion_on_circle() {
        // Circle r=1 under Mz=10: T = M*c/J at every corner, c = 1
        let obj = member(
            Circle::from_radius(1.0),
            Load::new(0.0, 0.0, 0.0, 0.0, 0.0, 10.0),
        );
        let j = std::f64::consts::PI / 4.0;
        // Corner radius is sqrt(1 + 1) for the unified corner convention
        let expected = 10.0 * 2.0_f64.sqrt() / j;
        assert_relative_eq!(obj.txy_lr(), expected, epsilon = 1e-9);
        assert_relative_eq!(obj.txy_ul(), expected, epsilon = 1e-9);
        assert_relative_eq!(obj.max_shear(), expected, epsilon = 1e-9);
        assert_relative_eq!(obj.max_tensile(), 0.0);
    }

    #[test]
    fn test_direct_shear() {
        let obj = member(
            Rectangle::new(2.0, 2.0),
            Load::new(8.0, -12.0, 0.0, 0.0, 0.0, 0.0),
        );
        assert_relative_eq!(obj.svx(), 2.0);
        assert_relative_eq!(obj.svy(), -3.0);
        assert_relative_eq!(obj.max_shear(), 3.0);
    }

    #[test]
    fn test_corner_elements_combine_components() {
        let obj = member(
            Rectangle::new(4.0, 2.0),
            Load::new(4.0, 8.0, 16.0, 10.0, 20.0, 5.0),
        );
        // Upper-right corner: Szz = Sa + Sbx_high + Sby_right
        let expected_szz = obj.sa() + obj.sbx_high() + obj.sby_right();
        assert_relative_eq!(obj.sur().sz(), expected_szz, epsilon = 1e-12);
        assert_relative_eq!(obj.sur().sxy(), obj.txy_ur(), epsilon = 1e-12);
        assert_relative_eq!(obj.sur().sxz(), obj.svx(), epsilon = 1e-12);
        assert_relative_eq!(obj.sur().syz(), obj.svy(), epsilon = 1e-12);
        assert_relative_eq!(obj.sur().sx(), 0.0);
        assert_relative_eq!(obj.sur().sy(), 0.0);
        // Lower-left corner picks up the signed low/left bending terms
        let expected_ll = obj.sa() + obj.sbx_low() + obj.sby_left();
        assert_relative_eq!(obj.sll().sz(), expected_ll, epsilon = 1e-12);
        // von Mises resultant is the governing corner
        let max_corner = obj
            .corner_stresses()
            .iter()
            .map(|s| s.von_mises())
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(obj.von_mises(), max_corner);
    }

    #[test]
    fn test_degenerate_torsion_constant_propagates_nan() {
        // Zero J with zero Mz divides 0 by 0; the resultant must surface
        // the NaN instead of hiding it
        let shape: Vec<(String, f64)> = [
            ("A", 4.0),
            ("Ix", 1.0),
            ("Iy", 1.0),
            ("J", 0.0),
            ("cx", 1.0),
            ("cy", 1.0),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();
        let obj = member(Shape::resolve(shape.into()).unwrap(), Load::zero());
        assert!(obj.txy_lr().is_nan());
        assert!(obj.max_shear().is_nan());
        // Axial path is unaffected
        assert_relative_eq!(obj.sa(), 0.0);
    }

    #[test]
    fn test_material_resolution_failure_surfaces() {
        let result = StructuralObject::new(
            ShapeSpec::from(Rectangle::new(1.0, 1.0)),
            None,
            Some("unobtainium".into()),
        );
        assert_eq!(result.unwrap_err().error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_get_delegates_by_category() {
        let obj = StructuralObject::new(
            ShapeSpec::from(Rectangle::new(4.0, 8.0)),
            Some(Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0)),
            Some("A36".into()),
        )
        .unwrap()
        .with_meta("allowable", 21_600.0);

        assert_relative_eq!(obj.get("A").unwrap().as_f64().unwrap(), 32.0);
        assert_relative_eq!(obj.get("f_z").unwrap().as_f64().unwrap(), 100.0);
        assert_relative_eq!(obj.get("Fy").unwrap().as_f64().unwrap(), 36_000.0);
        assert_relative_eq!(obj.get("allowable").unwrap().as_f64().unwrap(), 21_600.0);
        assert_eq!(obj.get("nonsense"), None);
    }

    #[test]
    fn test_series_layout() {
        let obj = member(
            Rectangle::new(4.0, 8.0),
            Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0),
        )
        .with_name("M-1");
        let record = obj.series();
        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();

        assert_eq!(names[0], "Name");
        let sa = names.iter().position(|n| *n == "Sa").unwrap();
        let vm = names.iter().position(|n| *n == "von_mises").unwrap();
        let area = names.iter().position(|n| *n == "A").unwrap();
        let fz = names.iter().position(|n| *n == "f_z").unwrap();
        assert!(sa < vm && vm < area && area < fz);

        assert_eq!(record.get("Name"), Some(&PropValue::Text("M-1".into())));
        assert_relative_eq!(record.get("Sa").unwrap().as_f64().unwrap(), 3.125);
        // No material attached: no material columns
        assert!(!record.contains("Fy"));
    }

    #[test]
    fn test_results_table_renders() {
        let obj = member(
            Rectangle::new(4.0, 8.0),
            Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0),
        );
        let table = obj.results_table();
        assert!(table.contains("Sa"));
        assert!(table.contains("3.12"));
    }
}
