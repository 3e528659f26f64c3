//! # stress_core - Structural Stress Evaluation Engine
//!
//! `stress_core` computes mechanical stresses on structural elements
//! (members, bolts, welds) from cross-section properties, material
//! properties, and applied loads, following AISC structural-steel design
//! conventions.
//!
//! An element combines a [`shapes::Shape`], an optional
//! [`materials::Material`], and a [`loads::Load`] into nominal component
//! stresses at the four extreme-fiber corners of the section, assembles a
//! symmetric stress tensor per corner, and reduces the tensors into the
//! resultant engineering quantities (von Mises stress, stress intensity,
//! principal stresses, max shear and bending).
//!
//! ## Design Philosophy
//!
//! - **Fail fast**: bad axis labels, missing shapes, and unknown materials
//!   error at construction; an object that builds is fully evaluable
//! - **Immutable after construction**: all stresses are computed once,
//!   eagerly; reads are pure
//! - **JSON-First**: evaluated objects, records, and tables serialize to
//!   JSON
//! - **NaN is data**: degenerate geometry (zero torsion constant, zero
//!   area) propagates as inf/NaN in the results rather than failing
//!
//! ## Quick Start
//!
//! ```rust
//! use stress_core::loads::Load;
//! use stress_core::shapes::Rectangle;
//! use stress_core::structural::Member;
//!
//! let member = Member::new(
//!     Rectangle::new(4.0, 8.0),
//!     Some(Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0)),
//!     Some("A36".into()),
//! )
//! .unwrap()
//! .with_name("M-1");
//!
//! assert_eq!(member.sa(), 3.125);
//! println!("{}", member.results_table());
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Force/moment loads with right-angle orientation transforms
//! - [`stress`] - Symmetric stress tensor element and derived quantities
//! - [`shapes`] - Cross-section property providers (generic, AISC, weld)
//! - [`materials`] - Material definitions and the built-in database
//! - [`structural`] - The evaluator: members, bolts, welds, and groups
//! - [`props`] - Property names, result records, and evaluation tables
//! - [`errors`] - Structured error types

pub mod errors;
pub mod loads;
pub mod materials;
pub mod props;
pub mod shapes;
pub mod stress;
pub mod structural;

// Re-export commonly used types at crate root for convenience
pub use errors::{StressError, StressResult};
pub use loads::{Axis, Factor, Load, Orientation};
pub use materials::{Material, MaterialSpec};
pub use props::{EvalTable, PropValue, ResultRecord};
pub use shapes::{Shape, ShapeSpec};
pub use stress::StressElement;
pub use structural::{
    Bolt, BoltGroup, Member, MemberGroup, StructuralObject, Weld, WeldGroup,
};
