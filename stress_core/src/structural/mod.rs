//! # Structural Elements
//!
//! The structural object evaluator and its specializations: general
//! members, bolts per AISC 360-16 Chapter J3, and welds. Groups batch
//! any of them into a single evaluation table.
//!
//! ## Example
//!
//! ```rust
//! use stress_core::loads::Load;
//! use stress_core::shapes::Rectangle;
//! use stress_core::structural::{Member, MemberGroup};
//!
//! let member = Member::new(
//!     Rectangle::new(4.0, 8.0),
//!     Some(Load::new(0.0, 0.0, 100.0, 0.0, 0.0, 0.0)),
//!     None,
//! )
//! .unwrap()
//! .with_name("M-1");
//!
//! let table = MemberGroup::new(vec![member]).evaluate();
//! assert_eq!(table.n_rows(), 1);
//! ```

pub mod bolt;
pub mod member;
pub mod object;
pub mod weld;

pub use bolt::{Bolt, BoltGroup, BoltSize, ThreadSeries};
pub use member::{Member, MemberGroup};
pub use object::{ComponentStresses, CornerStresses, StructuralObject};
pub use weld::{Weld, WeldGroup};

use std::ops::Index;

use serde::Serialize;

use crate::props::{EvalTable, ResultRecord};

/// An element that wraps a [`StructuralObject`] and can be evaluated as
/// part of a group.
pub trait StructuralElement {
    fn object(&self) -> &StructuralObject;

    /// The element's flat result record
    fn series(&self) -> ResultRecord {
        self.object().series()
    }
}

/// An ordered, non-unique collection of structural elements which can all
/// be evaluated at once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Group<T> {
    name: Option<String>,
    objects: Vec<T>,
}

impl<T: StructuralElement> Group<T> {
    pub fn new(objects: Vec<T>) -> Self {
        Self {
            name: None,
            objects,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn push(&mut self, object: T) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.objects.iter()
    }

    /// Compute all properties and derived quantities for every element and
    /// return them as a table, one row per element in input order.
    pub fn evaluate(&self) -> EvalTable {
        EvalTable::from_records(self.objects.iter().map(|obj| obj.series()).collect())
    }
}

impl<T> Index<usize> for Group<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.objects[index]
    }
}

impl<'a, T> IntoIterator for &'a Group<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

impl<T> IntoIterator for Group<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}
