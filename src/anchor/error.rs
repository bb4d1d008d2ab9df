//! Outcomes of binding an anchor, including the cases that do nothing
//!
//! Binding never fails. Conditions that prevent it from touching the
//! hierarchy are reported as a [`Skip`] inside the returned [`Binding`].

use thiserror::Error;

use super::types::Attribute;
use crate::hierarchy::ViewId;

/// Why a binding left the hierarchy untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    /// No view could be found to own the constraint, typically because a
    /// view is not attached yet
    #[error("no common ancestor for {view}.{attribute}")]
    UnresolvableAncestor { view: ViewId, attribute: Attribute },

    /// Composite anchors of different sizes, or a composite against an atomic
    /// anchor
    #[error("cannot bind {lhs} anchor(s) to {rhs} anchor(s)")]
    CompositeArityMismatch { lhs: usize, rhs: usize },

    /// A removal found nothing to remove
    #[error("no constraint on {view}.{attribute} to remove")]
    NoMatchingConstraint { view: ViewId, attribute: Attribute },

    /// Constant constraints only exist for width and height
    #[error("{view}.{attribute} cannot be bound to a constant")]
    ConstantOnNonDimension { view: ViewId, attribute: Attribute },
}

/// What a binding did to the hierarchy
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A new constraint was installed
    Created,
    /// An existing constraint received the new constant
    Updated,
    /// An existing constraint was uninstalled and a new one installed
    Replaced,
    /// An existing constraint was uninstalled
    Removed,
    /// One outcome per member of a composite anchor
    Composite(Vec<Binding>),
    Skipped(Skip),
}

impl Binding {
    /// Whether nothing was mutated
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Skipped(_) => true,
            Self::Composite(parts) => parts.iter().all(Binding::is_noop),
            _ => false,
        }
    }

    /// Every skip in this outcome, composite members included
    pub fn skips(&self) -> Vec<&Skip> {
        match self {
            Self::Skipped(skip) => vec![skip],
            Self::Composite(parts) => parts.iter().flat_map(Binding::skips).collect(),
            _ => Vec::new(),
        }
    }
}
