//! The boundary between the anchor engine and the host view system
//!
//! The engine never owns views. It addresses them through [`ViewId`] handles
//! and reads or rewrites the constraint collections the host keeps per view
//! through the [`ViewHierarchy`] trait.

pub mod tree;

pub use tree::{HierarchyError, ViewTree};

use std::fmt;

use crate::anchor::{AnchorGroup, Attribute, Priority, Relation};

/// Non-owning handle to a view in the host hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub usize);

impl ViewId {
    /// The anchors of this view
    pub fn anchors(self) -> AnchorGroup {
        AnchorGroup::new(self)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// One side of a constraint: an attribute of a view, or of nothing at all
/// for constant constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
    pub view: Option<ViewId>,
    pub attribute: Attribute,
}

impl Operand {
    pub fn new(view: impl Into<Option<ViewId>>, attribute: Attribute) -> Self {
        Self {
            view: view.into(),
            attribute,
        }
    }

    /// The operand of a constant constraint
    pub fn none() -> Self {
        Self::new(None, Attribute::NotAnAttribute)
    }
}

/// Which way round a stored constraint matched a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Stored as `first = second`, the same order as the lookup
    Forward,
    /// Stored with the two operands swapped
    Reversed,
}

impl Orientation {
    /// Sign applied to a constant moved across a reversed constraint
    pub fn sign(&self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reversed => -1.0,
        }
    }
}

/// `first relation multiplier * second + constant`, at some priority
///
/// The two operands identify the constraint and cannot change once created;
/// everything else may be rewritten in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRecord {
    first_view: ViewId,
    first_attribute: Attribute,
    second: Operand,
    pub relation: Relation,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: Priority,
}

impl ConstraintRecord {
    pub fn new(view: ViewId, attribute: Attribute, relation: Relation, second: Operand) -> Self {
        Self {
            first_view: view,
            first_attribute: attribute,
            second,
            relation,
            multiplier: 1.0,
            constant: 0.0,
            priority: Priority::REQUIRED,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn first(&self) -> Operand {
        Operand::new(self.first_view, self.first_attribute)
    }

    pub fn second(&self) -> Operand {
        self.second
    }

    /// The view on the left-hand side; always present
    pub fn first_view(&self) -> ViewId {
        self.first_view
    }

    /// Whether this record relates `a` and `b`, and in which order
    pub fn orientation(&self, a: Operand, b: Operand) -> Option<Orientation> {
        let first = self.first();
        if first == a && self.second == b {
            Some(Orientation::Forward)
        } else if first == b && self.second == a {
            Some(Orientation::Reversed)
        } else {
            None
        }
    }

    /// Whether either operand refers to `view`
    pub fn references(&self, view: ViewId) -> bool {
        self.first_view == view || self.second.view == Some(view)
    }
}

/// Capabilities the host view system provides to the anchor engine
///
/// All calls happen on the thread that owns the hierarchy; implementations
/// need no internal synchronisation.
pub trait ViewHierarchy {
    /// Direct structural parent of `view`
    fn parent(&self, view: ViewId) -> Option<ViewId>;

    /// Constraints currently installed on `owner`
    fn constraints(&self, owner: ViewId) -> &[ConstraintRecord];

    /// Mutable access to the constraint at `index` in `owner`'s collection
    fn constraint_mut(&mut self, owner: ViewId, index: usize) -> Option<&mut ConstraintRecord>;

    /// Install a constraint on `owner`
    ///
    /// Fails with [`HierarchyError::UnknownView`] when the host does not know
    /// `owner`; the record is dropped.
    fn add_constraint(
        &mut self,
        owner: ViewId,
        record: ConstraintRecord,
    ) -> Result<(), HierarchyError>;

    /// Uninstall the constraint at `index` from `owner`
    fn remove_constraint(&mut self, owner: ViewId, index: usize) -> Option<ConstraintRecord>;

    /// Stop the host from synthesising constraints for `view` from its frame
    fn disable_implicit_constraints(&mut self, view: ViewId);
}
