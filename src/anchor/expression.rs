//! Anchor expressions and their scalar algebra
//!
//! An [`Anchor`] is a throwaway descriptor: every accessor read builds a new
//! one, builder methods and operators rewrite it in place and hand it back,
//! and binding consumes it.

use std::ops::{Add, Div, Mul, Sub};

use super::types::{Attribute, Intent, Priority, Relation};
use crate::hierarchy::{Operand, ViewId};

/// What an anchor points at
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Atomic(Attribute),
    /// Ordered member anchors of `center` or `fill`
    Composite(Vec<Anchor>),
}

/// One side of a constraint binding
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    owner: Option<ViewId>,
    target: Target,
    constant: f64,
    multiplier: f64,
    relation: Relation,
    priority: Priority,
    common_ancestor: Option<ViewId>,
    intent: Intent,
}

impl Anchor {
    pub(crate) fn atomic(owner: ViewId, attribute: Attribute) -> Self {
        Self::with_target(Some(owner), Target::Atomic(attribute))
    }

    pub(crate) fn composite(owner: ViewId, members: &[Attribute]) -> Self {
        let parts = members
            .iter()
            .map(|&attribute| Self::atomic(owner, attribute))
            .collect();
        Self::with_target(Some(owner), Target::Composite(parts))
    }

    /// An anchor with no view, used for constant width and height constraints
    ///
    /// ```rust
    /// use visual_anchors::{Anchor, Attribute};
    ///
    /// let anchor = 40.0 + Anchor::myself();
    /// assert_eq!(anchor.constant(), 40.0);
    /// assert_eq!(anchor.owner(), None);
    /// assert_eq!(anchor.attribute(), Attribute::NotAnAttribute);
    /// ```
    pub fn myself() -> Self {
        Self::with_target(None, Target::Atomic(Attribute::NotAnAttribute))
    }

    fn with_target(owner: Option<ViewId>, target: Target) -> Self {
        Self {
            owner,
            target,
            constant: 0.0,
            multiplier: 1.0,
            relation: Relation::Equal,
            priority: Priority::REQUIRED,
            common_ancestor: None,
            intent: Intent::Reconcile,
        }
    }

    /// Set the view that owns the resulting constraint. Only needed when the
    /// two views are not siblings and neither is the other's superview.
    pub fn ancestor(mut self, ancestor: impl Into<Option<ViewId>>) -> Self {
        self.common_ancestor = ancestor.into();
        self
    }

    pub fn equal(mut self) -> Self {
        self.relation = Relation::Equal;
        self
    }

    pub fn less_than_or_equal(mut self) -> Self {
        self.relation = Relation::LessThanOrEqual;
        self
    }

    pub fn greater_than_or_equal(mut self) -> Self {
        self.relation = Relation::GreaterThanOrEqual;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Delete the matching constraint instead of binding
    pub fn remove(mut self) -> Self {
        self.intent = Intent::Remove;
        self
    }

    /// Skip the lookup for an existing constraint and always create one
    pub fn force_create(mut self) -> Self {
        self.intent = Intent::ForceCreate;
        self
    }

    pub fn owner(&self) -> Option<ViewId> {
        self.owner
    }

    /// The bound attribute; [`Attribute::NotAnAttribute`] for composites
    pub fn attribute(&self) -> Attribute {
        match &self.target {
            Target::Atomic(attribute) => *attribute,
            Target::Composite(_) => Attribute::NotAnAttribute,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Member anchors of a composite
    pub fn parts(&self) -> Option<&[Anchor]> {
        match &self.target {
            Target::Atomic(_) => None,
            Target::Composite(parts) => Some(parts),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.target, Target::Composite(_))
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn priority_level(&self) -> Priority {
        self.priority
    }

    pub fn common_ancestor(&self) -> Option<ViewId> {
        self.common_ancestor
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub(crate) fn operand(&self) -> Operand {
        Operand::new(self.owner, self.attribute())
    }

    /// Arity as seen by composite fan-out; atomic anchors count as one
    pub(crate) fn arity(&self) -> usize {
        self.parts().map_or(1, <[Anchor]>::len)
    }

    /// Members of a composite as they were read, untouched
    pub(crate) fn into_parts(self) -> Vec<Anchor> {
        match self.target {
            Target::Atomic(_) => Vec::new(),
            Target::Composite(parts) => parts,
        }
    }

    /// Split a composite into its members, each carrying this anchor's
    /// scalars. Far edges receive the negated constant so that a positive
    /// constant acts as an inward margin.
    pub(crate) fn distribute(self) -> Vec<Anchor> {
        let Target::Composite(parts) = self.target else {
            return Vec::new();
        };
        parts
            .into_iter()
            .map(|mut part| {
                part.constant = if part.attribute().inverts_margin() {
                    -self.constant
                } else {
                    self.constant
                };
                part.multiplier = self.multiplier;
                part.common_ancestor = self.common_ancestor;
                part.relation = self.relation;
                part.priority = self.priority;
                part.intent = self.intent;
                part
            })
            .collect()
    }
}

impl Add<f64> for Anchor {
    type Output = Anchor;

    fn add(mut self, constant: f64) -> Anchor {
        self.constant += constant;
        self
    }
}

impl Add<Anchor> for f64 {
    type Output = Anchor;

    fn add(self, anchor: Anchor) -> Anchor {
        anchor + self
    }
}

impl Sub<f64> for Anchor {
    type Output = Anchor;

    fn sub(mut self, constant: f64) -> Anchor {
        self.constant -= constant;
        self
    }
}

/// Subtracts the scalar from the anchor's constant, same as `anchor - scalar`
impl Sub<Anchor> for f64 {
    type Output = Anchor;

    fn sub(self, anchor: Anchor) -> Anchor {
        anchor - self
    }
}

impl Mul<f64> for Anchor {
    type Output = Anchor;

    fn mul(mut self, multiplier: f64) -> Anchor {
        self.multiplier *= multiplier;
        self
    }
}

impl Mul<Anchor> for f64 {
    type Output = Anchor;

    fn mul(self, anchor: Anchor) -> Anchor {
        anchor * self
    }
}

impl Div<f64> for Anchor {
    type Output = Anchor;

    fn div(mut self, divisor: f64) -> Anchor {
        self.multiplier /= divisor;
        self
    }
}

/// Divides the anchor's multiplier by the scalar, same as `anchor / scalar`
impl Div<Anchor> for f64 {
    type Output = Anchor;

    fn div(self, anchor: Anchor) -> Anchor {
        anchor / self
    }
}
