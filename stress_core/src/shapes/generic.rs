//! Generic closed-form shapes: solid circle, solid rectangle, and hollow
//! rectangle.
//!
//! All extreme-fiber distances follow the package convention: `cx_left`
//! and `cy_low` are negative distances from the centroid, `cx_right` and
//! `cy_high` positive.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{StressError, StressResult};

/// A solid circle defined by radius `r` or diameter `d`; radius takes
/// precedence when both are given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub r: f64,
}

impl Circle {
    pub fn from_radius(r: f64) -> Self {
        Self { r }
    }

    pub fn from_diameter(d: f64) -> Self {
        Self { r: d / 2.0 }
    }

    pub fn d(&self) -> f64 {
        2.0 * self.r
    }

    pub fn a(&self) -> f64 {
        PI * self.r.powi(2)
    }

    /// Moment of inertia about any centroidal axis
    pub fn i(&self) -> f64 {
        PI * self.r.powi(4) / 4.0
    }

    pub fn ix(&self) -> f64 {
        self.i()
    }

    pub fn iy(&self) -> f64 {
        self.i()
    }

    /// Plastic section modulus
    pub fn z(&self) -> f64 {
        self.d().powi(3) / 6.0
    }

    /// Elastic section modulus
    pub fn s(&self) -> f64 {
        self.i() / self.r
    }

    pub fn j(&self) -> f64 {
        PI * self.r.powi(4) / 4.0
    }

    /// Distance from centroid to the extreme fiber
    pub fn c(&self) -> f64 {
        self.r
    }

    pub fn width(&self) -> f64 {
        self.d()
    }

    pub fn height(&self) -> f64 {
        self.d()
    }
}

/// A solid rectangular section defined by width `w` and height `h`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn a(&self) -> f64 {
        self.w * self.h
    }

    pub fn ix(&self) -> f64 {
        self.w * self.h.powi(3) / 12.0
    }

    pub fn iy(&self) -> f64 {
        self.h * self.w.powi(3) / 12.0
    }

    pub fn zx(&self) -> f64 {
        self.w * self.h.powi(2) / 4.0
    }

    pub fn zy(&self) -> f64 {
        self.h * self.w.powi(2) / 4.0
    }

    pub fn cx(&self) -> f64 {
        self.w / 2.0
    }

    pub fn cy(&self) -> f64 {
        self.h / 2.0
    }

    pub fn sx(&self) -> f64 {
        self.ix() / self.cy()
    }

    pub fn sy(&self) -> f64 {
        self.iy() / self.cx()
    }

    /// Torsion constant for a solid rectangle.
    ///
    /// From Collins, "Mechanical Design of Machine Elements and Machines",
    /// 2nd Ed., Table 4.5.
    pub fn j(&self) -> f64 {
        let a = self.w.max(self.h) / 2.0;
        let b = self.w.min(self.h) / 2.0;
        a * b.powi(3) * (16.0 / 3.0 - 3.36 * b / a * (1.0 - b.powi(4) / (12.0 * a.powi(4))))
    }

    pub fn rx(&self) -> f64 {
        (self.ix() / self.a()).sqrt()
    }

    pub fn ry(&self) -> f64 {
        (self.iy() / self.a()).sqrt()
    }

    pub fn width(&self) -> f64 {
        self.w
    }

    pub fn height(&self) -> f64 {
        self.h
    }
}

/// A hollow rectangular section defined by outside width `w`, outside
/// height `h`, and wall thickness `t`.
///
/// ```text
///     ┏━━━━━━━━━┓
///     ┃ ┏━━━━━┓ ┃
///     ┃ ┃  y  ┃ ┃
///     ┃ ┃  |  ┃ ┃
///     ┃ ┃  +--┃-┃-x
///     ┃ ┃     ┃ ┃
///     ┃ ┗━━━━━┛ ┃
///     ┗━━━━━━━━━┛
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HollowRectangle {
    pub w: f64,
    pub h: f64,
    pub t: f64,
}

impl HollowRectangle {
    pub fn new(w: f64, h: f64, t: f64) -> Self {
        Self { w, h, t }
    }

    pub fn a(&self) -> f64 {
        self.h * self.w - (self.h - 2.0 * self.t) * (self.w - 2.0 * self.t)
    }

    pub fn cx(&self) -> f64 {
        self.w / 2.0
    }

    pub fn cy(&self) -> f64 {
        self.h / 2.0
    }

    pub fn ix(&self) -> f64 {
        (self.w * self.h.powi(3) - (self.w - 2.0 * self.t) * (self.h - 2.0 * self.t).powi(3))
            / 12.0
    }

    pub fn iy(&self) -> f64 {
        (self.h * self.w.powi(3) - (self.h - 2.0 * self.t) * (self.w - 2.0 * self.t).powi(3))
            / 12.0
    }

    pub fn zx(&self) -> f64 {
        self.w * self.h.powi(2) / 4.0
            - (self.w - 2.0 * self.t) * (self.h / 2.0 - self.t).powi(2)
    }

    pub fn zy(&self) -> f64 {
        self.h * self.w.powi(2) / 4.0
            - (self.h - 2.0 * self.t) * (self.w / 2.0 - self.t).powi(2)
    }

    /// Thin-walled closed-section torsion constant, J = 4*Am^2*t/p with
    /// Am and p taken at the wall midline (Roark, shear flow form).
    pub fn j(&self) -> f64 {
        let bm = self.w - self.t;
        let hm = self.h - self.t;
        self.t * bm.powi(2) * hm.powi(2) / (bm + hm)
    }

    pub fn width(&self) -> f64 {
        self.w
    }

    pub fn height(&self) -> f64 {
        self.h
    }
}

/// Whether a label names one of the generic shape classes
pub fn is_generic_shape_label(label: &str) -> bool {
    matches!(
        label.trim().to_lowercase().as_str(),
        "rectangle" | "circle" | "hollow rectangle"
    )
}

/// Pull a required dimension out of a custom property map
pub(crate) fn require_dim(dims: &[(String, f64)], key: &str) -> StressResult<f64> {
    dims.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| *v)
        .ok_or_else(|| StressError::missing_field(key))
}

pub(crate) fn optional_dim(dims: &[(String, f64)], key: &str) -> Option<f64> {
    dims.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_unit_radius() {
        let circle = Circle::from_radius(1.0);
        assert_relative_eq!(circle.a(), 3.14159, epsilon = 1e-4);
        assert_relative_eq!(circle.j(), 0.78540, epsilon = 1e-4);
        assert_relative_eq!(circle.ix(), circle.iy());
        assert_relative_eq!(circle.d(), 2.0);
    }

    #[test]
    fn test_circle_from_diameter() {
        let circle = Circle::from_diameter(2.0);
        assert_relative_eq!(circle.r, 1.0);
        assert_relative_eq!(circle.s(), circle.i() / circle.r);
        assert_relative_eq!(circle.z(), 8.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rectangle_4x2() {
        // Ix uses h cubed, Iy uses w cubed per the local axis convention
        let rect = Rectangle::new(4.0, 2.0);
        assert_relative_eq!(rect.a(), 8.0);
        assert_relative_eq!(rect.ix(), 2.667, epsilon = 1e-3);
        assert_relative_eq!(rect.iy(), 10.667, epsilon = 1e-3);
        assert_relative_eq!(rect.zx(), 4.0);
        assert_relative_eq!(rect.zy(), 8.0);
        assert_relative_eq!(rect.sx(), rect.ix() / 1.0);
        assert_relative_eq!(rect.sy(), rect.iy() / 2.0);
    }

    #[test]
    fn test_rectangle_torsion_square() {
        // Unit square: J = 0.1406 * a^4 from the exact series solution
        let square = Rectangle::new(1.0, 1.0);
        assert_relative_eq!(square.j(), 0.1406, epsilon = 2e-4);
        // Orientation of the rectangle must not matter
        let tall = Rectangle::new(2.0, 5.0);
        let wide = Rectangle::new(5.0, 2.0);
        assert_relative_eq!(tall.j(), wide.j(), epsilon = 1e-12);
    }

    #[test]
    fn test_hollow_rectangle() {
        let tube = HollowRectangle::new(4.0, 6.0, 0.5);
        assert_relative_eq!(tube.a(), 4.0 * 6.0 - 3.0 * 5.0);
        assert_relative_eq!(
            tube.ix(),
            (4.0 * 216.0 - 3.0 * 125.0) / 12.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            tube.iy(),
            (6.0 * 64.0 - 5.0 * 27.0) / 12.0,
            epsilon = 1e-12
        );
        assert!(tube.j() > 0.0);
        assert_relative_eq!(tube.cx(), 2.0);
        assert_relative_eq!(tube.cy(), 3.0);
    }

    #[test]
    fn test_generic_labels() {
        assert!(is_generic_shape_label("rectangle"));
        assert!(is_generic_shape_label("Circle"));
        assert!(is_generic_shape_label("HOLLOW RECTANGLE"));
        assert!(!is_generic_shape_label("W8X31"));
        assert!(!is_generic_shape_label("triangle"));
    }
}
