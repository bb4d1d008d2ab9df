//! Locating the view that owns a constraint, and the constraint itself

use super::expression::Anchor;
use super::types::Attribute;
use crate::hierarchy::{Operand, Orientation, ViewHierarchy, ViewId};

/// The view that must own a constraint between `view` and `rhs`
///
/// In order: an explicit ancestor on `rhs`; the superview of `view` when it
/// is `rhs`'s view or `rhs`'s view's superview; `view` itself for a constant
/// (`myself`) right-hand side.
pub fn common_ancestor<H>(hierarchy: &H, view: ViewId, rhs: &Anchor) -> Option<ViewId>
where
    H: ViewHierarchy + ?Sized,
{
    if let Some(ancestor) = rhs.common_ancestor() {
        return Some(ancestor);
    }

    match rhs.owner() {
        Some(other) => {
            let superview = hierarchy.parent(view)?;
            if superview == other || hierarchy.parent(other) == Some(superview) {
                Some(superview)
            } else {
                None
            }
        }
        None if rhs.attribute() == Attribute::NotAnAttribute => Some(view),
        None => None,
    }
}

/// A constraint found in an ancestor's collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found {
    pub index: usize,
    pub orientation: Orientation,
}

/// Find the first constraint in `ancestor` relating `lhs` and `rhs`, in
/// either order
pub fn find_constraint<H>(hierarchy: &H, ancestor: ViewId, lhs: Operand, rhs: Operand) -> Option<Found>
where
    H: ViewHierarchy + ?Sized,
{
    hierarchy
        .constraints(ancestor)
        .iter()
        .enumerate()
        .find_map(|(index, record)| {
            record
                .orientation(lhs, rhs)
                .map(|orientation| Found { index, orientation })
        })
}
