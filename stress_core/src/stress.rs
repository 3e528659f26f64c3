//! # Stress Element
//!
//! A basic stress element having six stress components (3 normals and
//! 3 shears) forming a symmetric 3x3 tensor, providing computed outputs
//! such as principal stresses, von Mises stress, and stress intensity.
//!
//! The eigen-decomposition runs exactly once, at construction; the element
//! is immutable afterwards and every derived quantity is a pure function of
//! the sorted principals.
//!
//! ## Example
//!
//! ```rust
//! use stress_core::stress::StressElement;
//!
//! // Uniaxial tension: only s33 nonzero
//! let element = StressElement::new([0.0, 0.0, 100.0, 0.0, 0.0, 0.0]);
//! assert!((element.von_mises() - 100.0).abs() < 1e-9);
//! assert!((element.p1() - 100.0).abs() < 1e-9);
//! ```

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::props::PropValue;

/// Square root of the sum of squares of the arguments
pub fn srss(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// A stress element containing 3 normal stresses and 3 shear stresses.
///
/// Component order is (s11, s22, s33, s12, s13, s23). Principal stresses
/// are sorted P1 >= P2 >= P3 with matching direction vectors; on repeated
/// eigenvalues the solver's (valid, arbitrary) eigenbasis is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressElement {
    s11: f64,
    s22: f64,
    s33: f64,
    s12: f64,
    s13: f64,
    s23: f64,
    principals: [f64; 3],
    directions: [Vector3<f64>; 3],
    name: Option<String>,
}

impl StressElement {
    /// Build from the six independent components
    /// (s11, s22, s33, s12, s13, s23)
    pub fn new(components: [f64; 6]) -> Self {
        let [s11, s22, s33, s12, s13, s23] = components;
        let matrix = Matrix3::new(
            s11, s12, s13, //
            s12, s22, s23, //
            s13, s23, s33,
        );
        let (principals, directions) = decompose(&matrix);
        Self {
            s11,
            s22,
            s33,
            s12,
            s13,
            s23,
            principals,
            directions,
            name: None,
        }
    }

    /// Build from a full 3x3 array. Only the upper triangle is read;
    /// symmetry is assumed, not validated.
    pub fn from_matrix(matrix: &Matrix3<f64>) -> Self {
        Self::new([
            matrix[(0, 0)],
            matrix[(1, 1)],
            matrix[(2, 2)],
            matrix[(0, 1)],
            matrix[(0, 2)],
            matrix[(1, 2)],
        ])
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

    // ------------------------------------------------------------------
    // Component accessors
    // ------------------------------------------------------------------

    pub fn sx(&self) -> f64 {
        self.s11
    }

    pub fn sy(&self) -> f64 {
        self.s22
    }

    pub fn sz(&self) -> f64 {
        self.s33
    }

    pub fn sxy(&self) -> f64 {
        self.s12
    }

    pub fn syz(&self) -> f64 {
        self.s23
    }

    pub fn szx(&self) -> f64 {
        self.s13
    }

    // Symmetric aliases
    pub fn syx(&self) -> f64 {
        self.s12
    }

    pub fn szy(&self) -> f64 {
        self.s23
    }

    pub fn sxz(&self) -> f64 {
        self.s13
    }

    /// The full symmetric 3x3 stress tensor
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.s11, self.s12, self.s13, //
            self.s12, self.s22, self.s23, //
            self.s13, self.s23, self.s33,
        )
    }

    // ------------------------------------------------------------------
    // Principal quantities
    // ------------------------------------------------------------------

    /// Principal stresses, P1 >= P2 >= P3
    pub fn principals(&self) -> [f64; 3] {
        self.principals
    }

    /// Principal stress direction vectors, matching `principals` order
    pub fn principal_dirs(&self) -> &[Vector3<f64>; 3] {
        &self.directions
    }

    /// First (maximum) principal stress
    pub fn p1(&self) -> f64 {
        self.principals[0]
    }

    /// Middle principal stress
    pub fn p2(&self) -> f64 {
        self.principals[1]
    }

    /// Third (minimum) principal stress
    pub fn p3(&self) -> f64 {
        self.principals[2]
    }

    /// The von Mises stress
    pub fn von_mises(&self) -> f64 {
        let [p1, p2, p3] = self.principals;
        (0.5 * ((p1 - p2).powi(2) + (p2 - p3).powi(2) + (p3 - p1).powi(2))).sqrt()
    }

    /// The stress intensity: maximum absolute principal difference
    pub fn intensity(&self) -> f64 {
        let [p1, p2, p3] = self.principals;
        (p1 - p2)
            .abs()
            .max((p2 - p3).abs())
            .max((p3 - p1).abs())
    }

    /// The first (maximum) principal shear stress
    pub fn tau1(&self) -> f64 {
        (self.p1() - self.p3()) / 2.0
    }

    /// The second principal shear stress
    pub fn tau2(&self) -> f64 {
        (self.p1() - self.p2()) / 2.0
    }

    /// The third principal shear stress
    pub fn tau3(&self) -> f64 {
        (self.p2() - self.p3()) / 2.0
    }

    /// Alias for `tau1`
    pub fn max_shear(&self) -> f64 {
        self.tau1()
    }

    /// The element stresses as a flat name/value list
    pub fn record(&self) -> Vec<(String, PropValue)> {
        vec![
            ("Sx".to_string(), self.sx().into()),
            ("Sy".to_string(), self.sy().into()),
            ("Sz".to_string(), self.sz().into()),
            ("Sxy".to_string(), self.sxy().into()),
            ("Syz".to_string(), self.syz().into()),
            ("Sxz".to_string(), self.sxz().into()),
        ]
    }
}

/// Eigen-decompose a symmetric 3x3 tensor and sort eigenpairs by
/// descending eigenvalue.
fn decompose(matrix: &Matrix3<f64>) -> ([f64; 3], [Vector3<f64>; 3]) {
    let eigen = matrix.symmetric_eigen();
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let principals = [
        eigen.eigenvalues[order[0]],
        eigen.eigenvalues[order[1]],
        eigen.eigenvalues[order[2]],
    ];
    let directions = [
        eigen.eigenvectors.column(order[0]).into_owned(),
        eigen.eigenvectors.column(order[1]).into_owned(),
        eigen.eigenvectors.column(order[2]).into_owned(),
    ];
    (principals, directions)
}

impl std::fmt::Display for StressElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StressElement [{:6.0},{:6.0},{:6.0},{:6.0},{:6.0},{:6.0}]",
            self.s11, self.s12, self.s13, self.s22, self.s23, self.s33
        )
    }
}
