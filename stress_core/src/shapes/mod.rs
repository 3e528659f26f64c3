//! # Shapes
//!
//! Cross-section property providers. A [`Shape`] unifies the generic
//! closed-form sections, the standard AISC families, weld line profiles,
//! and fully custom property bags behind the property set the stress
//! evaluator consumes: area, moments of inertia, torsion constant, and the
//! four extreme-fiber distances.
//!
//! `cx_left` and `cy_low` are negative distances from the centroid;
//! `cx_max`/`cy_max` are the largest absolute distances per axis, used for
//! torsion at the governing corner.
//!
//! ## Example
//!
//! ```rust
//! use stress_core::shapes::{Shape, ShapeSpec};
//!
//! let shape = Shape::resolve(ShapeSpec::from("W8X31")).unwrap();
//! assert_eq!(shape.a(), 9.12);
//!
//! assert!(Shape::resolve(ShapeSpec::from("W99X999")).is_err());
//! ```

pub mod generic;
pub mod structural;
pub mod weld;

pub use generic::{is_generic_shape_label, Circle, HollowRectangle, Rectangle};
pub use structural::{
    is_standard_shape_label, standard_shape, CompressionClass, FlexureClass, LoadKind,
    StandardFamily, StandardShape,
};
pub use weld::{WeldProfile, WeldShape, WeldType};

use serde::{Deserialize, Serialize};

use crate::errors::{StressError, StressResult};
use crate::props::PropValue;
use generic::{optional_dim, require_dim};

/// A user-defined shape built from a property map.
///
/// The evaluator's required properties (A, Ix, Iy, J, and the extreme
/// fibers) must be present; construction fails with `MissingField`
/// otherwise, rather than leaving a shape that faults during stress
/// computation. Symmetric sections may give `cx`/`cy` instead of the four
/// signed fiber distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomShape {
    pub name: Option<String>,
    a: f64,
    ix: f64,
    iy: f64,
    j: f64,
    cx_left: f64,
    cx_right: f64,
    cy_low: f64,
    cy_high: f64,
    extra: Vec<(String, f64)>,
}

impl CustomShape {
    pub fn from_props(props: &[(String, f64)]) -> StressResult<Self> {
        let fiber = |signed: &str, symmetric: &str, sign: f64| -> StressResult<f64> {
            if let Some(v) = optional_dim(props, signed) {
                return Ok(v);
            }
            if let Some(v) = optional_dim(props, symmetric) {
                return Ok(sign * v);
            }
            Err(StressError::missing_field(signed))
        };

        let consumed = [
            "A", "Ix", "Iy", "J", "cx_left", "cx_right", "cy_low", "cy_high", "cx", "cy",
        ];
        let extra = props
            .iter()
            .filter(|(k, _)| !consumed.iter().any(|c| c.eq_ignore_ascii_case(k)))
            .cloned()
            .collect();

        Ok(Self {
            name: None,
            a: require_dim(props, "A")?,
            ix: require_dim(props, "Ix")?,
            iy: require_dim(props, "Iy")?,
            j: require_dim(props, "J")?,
            cx_left: fiber("cx_left", "cx", -1.0)?,
            cx_right: fiber("cx_right", "cx", 1.0)?,
            cy_low: fiber("cy_low", "cy", -1.0)?,
            cy_high: fiber("cy_high", "cy", 1.0)?,
            extra,
        })
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }
}

/// A cross-section shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    HollowRectangle(HollowRectangle),
    Standard(StandardShape),
    Weld(WeldShape),
    Custom(CustomShape),
}

impl Shape {
    /// Cross-sectional area
    pub fn a(&self) -> f64 {
        match self {
            Shape::Circle(s) => s.a(),
            Shape::Rectangle(s) => s.a(),
            Shape::HollowRectangle(s) => s.a(),
            Shape::Standard(s) => s.a,
            Shape::Weld(s) => s.a(),
            Shape::Custom(s) => s.a,
        }
    }

    /// Moment of inertia about the x-x axis
    pub fn ix(&self) -> f64 {
        match self {
            Shape::Circle(s) => s.ix(),
            Shape::Rectangle(s) => s.ix(),
            Shape::HollowRectangle(s) => s.ix(),
            Shape::Standard(s) => s.ix,
            Shape::Weld(s) => s.ix(),
            Shape::Custom(s) => s.ix,
        }
    }

    /// Moment of inertia about the y-y axis
    pub fn iy(&self) -> f64 {
        match self {
            Shape::Circle(s) => s.iy(),
            Shape::Rectangle(s) => s.iy(),
            Shape::HollowRectangle(s) => s.iy(),
            Shape::Standard(s) => s.iy,
            Shape::Weld(s) => s.iy(),
            Shape::Custom(s) => s.iy,
        }
    }

    /// Torsion constant
    pub fn j(&self) -> f64 {
        match self {
            Shape::Circle(s) => s.j(),
            Shape::Rectangle(s) => s.j(),
            Shape::HollowRectangle(s) => s.j(),
            Shape::Standard(s) => s.j,
            Shape::Weld(s) => s.j(),
            Shape::Custom(s) => s.j,
        }
    }

    /// Signed distance from centroid to the left extreme fiber (negative)
    pub fn cx_left(&self) -> f64 {
        match self {
            Shape::Circle(s) => -s.c(),
            Shape::Rectangle(s) => -s.cx(),
            Shape::HollowRectangle(s) => -s.cx(),
            Shape::Standard(s) => s.cx_left(),
            Shape::Weld(s) => s.cx_left(),
            Shape::Custom(s) => s.cx_left,
        }
    }

    /// Distance from centroid to the right extreme fiber
    pub fn cx_right(&self) -> f64 {
        match self {
            Shape::Circle(s) => s.c(),
            Shape::Rectangle(s) => s.cx(),
            Shape::HollowRectangle(s) => s.cx(),
            Shape::Standard(s) => s.cx_right(),
            Shape::Weld(s) => s.cx_right(),
            Shape::Custom(s) => s.cx_right,
        }
    }

    /// Signed distance from centroid to the bottom extreme fiber (negative)
    pub fn cy_low(&self) -> f64 {
        match self {
            Shape::Circle(s) => -s.c(),
            Shape::Rectangle(s) => -s.cy(),
            Shape::HollowRectangle(s) => -s.cy(),
            Shape::Standard(s) => s.cy_low(),
            Shape::Weld(s) => s.cy_low(),
            Shape::Custom(s) => s.cy_low,
        }
    }

    /// Distance from centroid to the top extreme fiber
    pub fn cy_high(&self) -> f64 {
        match self {
            Shape::Circle(s) => s.c(),
            Shape::Rectangle(s) => s.cy(),
            Shape::HollowRectangle(s) => s.cy(),
            Shape::Standard(s) => s.cy_high(),
            Shape::Weld(s) => s.cy_high(),
            Shape::Custom(s) => s.cy_high,
        }
    }

    /// Max absolute distance to an extreme fiber along x
    pub fn cx_max(&self) -> f64 {
        self.cx_left().abs().max(self.cx_right())
    }

    /// Max absolute distance to an extreme fiber along y
    pub fn cy_max(&self) -> f64 {
        self.cy_high().max(self.cy_low().abs())
    }

    /// Max vector distance to an outer fiber on both axes, used for
    /// torsion at the governing corner
    pub fn cr_max(&self) -> f64 {
        (self.cx_max().powi(2) + self.cy_max().powi(2)).sqrt()
    }

    pub fn width(&self) -> Option<f64> {
        match self {
            Shape::Circle(s) => Some(s.width()),
            Shape::Rectangle(s) => Some(s.width()),
            Shape::HollowRectangle(s) => Some(s.width()),
            Shape::Standard(s) => Some(s.width()),
            Shape::Weld(_) | Shape::Custom(_) => None,
        }
    }

    pub fn height(&self) -> Option<f64> {
        match self {
            Shape::Circle(s) => Some(s.height()),
            Shape::Rectangle(s) => Some(s.height()),
            Shape::HollowRectangle(s) => Some(s.height()),
            Shape::Standard(s) => Some(s.height()),
            Shape::Weld(_) | Shape::Custom(_) => None,
        }
    }

    pub fn label(&self) -> Option<String> {
        match self {
            Shape::Circle(_) => Some("Circle".to_string()),
            Shape::Rectangle(_) => Some("Rectangle".to_string()),
            Shape::HollowRectangle(_) => Some("Hollow Rectangle".to_string()),
            Shape::Standard(s) => Some(s.label.clone()),
            Shape::Weld(s) => Some(s.profile().label().to_string()),
            Shape::Custom(s) => s.name.clone(),
        }
    }

    /// Look up a shape property by name, comparing with underscores
    /// stripped.
    pub fn get(&self, prop: &str) -> Option<PropValue> {
        let std = crate::props::standardized(prop);
        self.properties()
            .into_iter()
            .find(|(name, _)| crate::props::standardized(name) == std)
            .map(|(_, value)| value)
    }

    /// All shape properties for record export
    pub fn properties(&self) -> Vec<(String, PropValue)> {
        let mut props: Vec<(String, PropValue)> = Vec::new();
        if let Some(label) = self.label() {
            props.push(("label".to_string(), label.into()));
        }

        let dims: Vec<(String, f64)> = match self {
            Shape::Circle(s) => vec![("d".to_string(), s.d()), ("r".to_string(), s.r)],
            Shape::Rectangle(s) => vec![("w".to_string(), s.w), ("h".to_string(), s.h)],
            Shape::HollowRectangle(s) => vec![
                ("w".to_string(), s.w),
                ("h".to_string(), s.h),
                ("t".to_string(), s.t),
            ],
            Shape::Standard(s) => s.dimension_properties(),
            Shape::Weld(s) => s.dimension_properties(),
            Shape::Custom(s) => s.extra.clone(),
        };
        for (name, value) in dims {
            props.push((name, value.into()));
        }

        props.push(("A".to_string(), self.a().into()));
        if let Some(width) = self.width() {
            props.push(("width".to_string(), width.into()));
        }
        if let Some(height) = self.height() {
            props.push(("height".to_string(), height.into()));
        }
        props.push(("Ix".to_string(), self.ix().into()));
        props.push(("Iy".to_string(), self.iy().into()));
        props.push(("J".to_string(), self.j().into()));
        props.push(("cx_left".to_string(), self.cx_left().into()));
        props.push(("cx_right".to_string(), self.cx_right().into()));
        props.push(("cy_low".to_string(), self.cy_low().into()));
        props.push(("cy_high".to_string(), self.cy_high().into()));
        props.push(("cx_max".to_string(), self.cx_max().into()));
        props.push(("cy_max".to_string(), self.cy_max().into()));
        props
    }

    /// Resolve a shape spec; generic labels pull their dimensions from
    /// `dims` (e.g. "rectangle" needs `w` and `h`).
    pub fn resolve_with(spec: ShapeSpec, dims: &[(String, f64)]) -> StressResult<Shape> {
        match spec {
            ShapeSpec::Shape(shape) => Ok(shape),
            ShapeSpec::Props(props) => Ok(Shape::Custom(CustomShape::from_props(&props)?)),
            ShapeSpec::Label(label) => {
                if is_standard_shape_label(&label) {
                    return Ok(Shape::Standard(standard_shape(&label)?));
                }
                match label.trim().to_lowercase().as_str() {
                    "circle" => {
                        let r = match optional_dim(dims, "r") {
                            Some(r) => r,
                            None => require_dim(dims, "d")? / 2.0,
                        };
                        Ok(Shape::Circle(Circle::from_radius(r)))
                    }
                    "rectangle" => Ok(Shape::Rectangle(Rectangle::new(
                        require_dim(dims, "w")?,
                        require_dim(dims, "h")?,
                    ))),
                    "hollow rectangle" => Ok(Shape::HollowRectangle(HollowRectangle::new(
                        require_dim(dims, "w")?,
                        require_dim(dims, "h")?,
                        require_dim(dims, "t")?,
                    ))),
                    _ => Err(StressError::shape_not_found(label.trim())),
                }
            }
        }
    }

    /// Resolve a shape spec with no auxiliary dimensions
    pub fn resolve(spec: ShapeSpec) -> StressResult<Shape> {
        Self::resolve_with(spec, &[])
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Circle(s) => write!(f, "Circle shape (r={})", s.r),
            Shape::Rectangle(s) => write!(f, "Rectangle shape ({}x{})", s.w, s.h),
            Shape::HollowRectangle(s) => {
                write!(f, "Hollow rectangular section ({}x{}x{})", s.w, s.h, s.t)
            }
            Shape::Standard(s) => write!(f, "{s}"),
            Shape::Weld(s) => write!(f, "{s}"),
            Shape::Custom(s) => match &s.name {
                Some(name) => write!(f, "{name} (Custom shape)"),
                None => write!(f, "(Custom shape)"),
            },
        }
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Shape::Rectangle(s)
    }
}

impl From<HollowRectangle> for Shape {
    fn from(s: HollowRectangle) -> Self {
        Shape::HollowRectangle(s)
    }
}

impl From<StandardShape> for Shape {
    fn from(s: StandardShape) -> Self {
        Shape::Standard(s)
    }
}

impl From<WeldShape> for Shape {
    fn from(s: WeldShape) -> Self {
        Shape::Weld(s)
    }
}

impl From<CustomShape> for Shape {
    fn from(s: CustomShape) -> Self {
        Shape::Custom(s)
    }
}

/// Shape input: an already-built shape, a lookup label, or a custom
/// property map.
#[derive(Debug, Clone)]
pub enum ShapeSpec {
    Shape(Shape),
    Label(String),
    Props(Vec<(String, f64)>),
}

impl From<Shape> for ShapeSpec {
    fn from(shape: Shape) -> Self {
        ShapeSpec::Shape(shape)
    }
}

impl From<Circle> for ShapeSpec {
    fn from(shape: Circle) -> Self {
        ShapeSpec::Shape(shape.into())
    }
}

impl From<Rectangle> for ShapeSpec {
    fn from(shape: Rectangle) -> Self {
        ShapeSpec::Shape(shape.into())
    }
}

impl From<HollowRectangle> for ShapeSpec {
    fn from(shape: HollowRectangle) -> Self {
        ShapeSpec::Shape(shape.into())
    }
}

impl From<StandardShape> for ShapeSpec {
    fn from(shape: StandardShape) -> Self {
        ShapeSpec::Shape(shape.into())
    }
}

impl From<WeldShape> for ShapeSpec {
    fn from(shape: WeldShape) -> Self {
        ShapeSpec::Shape(shape.into())
    }
}

impl From<&str> for ShapeSpec {
    fn from(label: &str) -> Self {
        ShapeSpec::Label(label.to_string())
    }
}

impl From<String> for ShapeSpec {
    fn from(label: String) -> Self {
        ShapeSpec::Label(label)
    }
}

impl From<Vec<(String, f64)>> for ShapeSpec {
    fn from(props: Vec<(String, f64)>) -> Self {
        ShapeSpec::Props(props)
    }
}
