//! A general structural member and groups of members.

use std::ops::Deref;

use serde::Serialize;

use crate::errors::StressResult;
use crate::loads::Load;
use crate::materials::MaterialSpec;
use crate::shapes::ShapeSpec;
use crate::structural::{Group, StructuralElement, StructuralObject};

/// A structural member under arbitrary loading defined by a
/// cross-sectional shape, material, and loads. Adds no behavior beyond
/// [`StructuralObject`]; it names the composition.
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    object: StructuralObject,
}

impl Member {
    pub fn new(
        shape: impl Into<ShapeSpec>,
        loads: Option<Load>,
        material: Option<MaterialSpec>,
    ) -> StressResult<Self> {
        Ok(Self {
            object: StructuralObject::new(shape, loads, material)?,
        })
    }

    /// As `new`, with auxiliary dimensions for generic shape labels
    pub fn with_dims(
        shape: impl Into<ShapeSpec>,
        dims: &[(String, f64)],
        loads: Option<Load>,
        material: Option<MaterialSpec>,
    ) -> StressResult<Self> {
        Ok(Self {
            object: StructuralObject::with_dims(shape, dims, loads, material)?,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.object = self.object.with_name(name);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.object = self.object.with_description(description);
        self
    }
}

impl Deref for Member {
    type Target = StructuralObject;

    fn deref(&self) -> &StructuralObject {
        &self.object
    }
}

impl StructuralElement for Member {
    fn object(&self) -> &StructuralObject {
        &self.object
    }
}

/// A group of structural members to evaluate as a batch
pub type MemberGroup = Group<Member>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropValue;
    use crate::shapes::Rectangle;
    use approx::assert_relative_eq;

    #[test]
    fn test_member_end_to_end() {
        // Axial-only member: Sa = 100/32 = 3.125 drives every resultant
        let member = Member::new(
            Rectangle::new(4.0, 8.0),
            Some(Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0)),
            None,
        )
        .unwrap()
        .with_name("M-1");

        assert_relative_eq!(member.sa(), 3.125);
        assert_relative_eq!(member.max_tensile(), 3.125);
        assert_relative_eq!(member.max_shear(), 0.0);
        assert_relative_eq!(member.von_mises(), 3.125, epsilon = 1e-9);
    }

    #[test]
    fn test_member_by_shape_label() {
        let member = Member::new(
            "W8X31",
            Some(Load::new(0.0, 0.0, 50_000.0, 0.0, 0.0, 0.0)),
            Some("A992".into()),
        )
        .unwrap();
        assert_relative_eq!(member.sa(), 50_000.0 / 9.12, epsilon = 1e-9);
        assert_eq!(member.material().unwrap().fy(), Some(50_000.0));
    }

    #[test]
    fn test_member_generic_label_with_dims() {
        let dims: Vec<(String, f64)> = vec![("w".to_string(), 4.0), ("h".to_string(), 8.0)];
        let member = Member::with_dims(
            "rectangle",
            &dims,
            Some(Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0)),
            None,
        )
        .unwrap();
        assert_relative_eq!(member.sa(), 3.125);
    }

    #[test]
    fn test_group_preserves_order_and_drops_null_columns() {
        let make = |name: &str, fz: f64| {
            Member::new(
                Rectangle::new(4.0, 8.0),
                Some(Load::new(0.0, 0.0, fz, 0.0, 0.0, 0.0)),
                None,
            )
            .unwrap()
            .with_name(name)
        };
        let group = MemberGroup::new(vec![make("first", 100.0), make("second", 200.0)]);
        let table = group.evaluate();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(
            table.value(0, "Name"),
            Some(&PropValue::Text("first".into()))
        );
        assert_eq!(
            table.value(1, "Name"),
            Some(&PropValue::Text("second".into()))
        );
        assert_relative_eq!(table.value(1, "Sa").unwrap().as_f64().unwrap(), 6.25);
        // No member has a material: material columns are gone entirely
        assert!(!table.columns.contains(&"Fy".to_string()));
        assert!(!table.columns.contains(&"E".to_string()));
    }

    #[test]
    fn test_group_column_ordering() {
        let member = Member::new(
            Rectangle::new(4.0, 8.0),
            Some(Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0)),
            Some("A36".into()),
        )
        .unwrap()
        .with_name("M-1");
        let table = MemberGroup::new(vec![member]).evaluate();

        let position = |name: &str| {
            table
                .columns
                .iter()
                .position(|c| c == name)
                .unwrap_or_else(|| panic!("missing column {name}"))
        };
        // Name first, then shape -> material -> load -> component -> resultant
        assert_eq!(position("Name"), 0);
        assert!(position("A") < position("Fy"));
        assert!(position("Fy") < position("f_z"));
        assert!(position("f_z") < position("Sa"));
        assert!(position("Sa") < position("von_mises"));
    }

    #[test]
    fn test_group_mixed_shapes_keep_shared_columns() {
        let rect = Member::new(
            Rectangle::new(4.0, 8.0),
            Some(Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0)),
            None,
        )
        .unwrap();
        let wide_flange =
            Member::new("W8X31", Some(Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0)), None).unwrap();
        let table = MemberGroup::new(vec![rect, wide_flange]).evaluate();
        // Shared geometric columns survive; per-family ones stay too since
        // at least one row fills them
        assert!(table.columns.contains(&"A".to_string()));
        assert!(table.columns.contains(&"w".to_string()));
        assert!(table.columns.contains(&"bf".to_string()));
        assert_eq!(table.value(0, "bf"), None);
    }

    #[test]
    fn test_group_indexing_and_iteration() {
        let member = Member::new(Rectangle::new(1.0, 1.0), None, None)
            .unwrap()
            .with_name("only");
        let group = MemberGroup::new(vec![member]).with_name("G1");
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].name(), Some("only"));
        assert_eq!(group.iter().count(), 1);
        assert_eq!(group.name(), Some("G1"));
    }
}
