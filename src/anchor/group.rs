//! Named anchors of a view and the binding algorithm behind them

use super::error::{Binding, Skip};
use super::expression::Anchor;
use super::search::{common_ancestor, find_constraint};
use super::types::{AnchorKind, Attribute, Intent};
use crate::hierarchy::{ConstraintRecord, Operand, Orientation, ViewHierarchy, ViewId};

const LOG_TARGET: &str = "visual_anchors";

/// The anchors of one view
///
/// Reading an anchor builds a fresh [`Anchor`] tied to the view. Setting one
/// reconciles the view's constraints with the assigned expression:
///
/// ```rust
/// use visual_anchors::{Binding, ViewHierarchy, ViewTree};
///
/// let mut tree = ViewTree::new();
/// let root = tree.add_view("root");
/// let card = tree.add_view("card");
/// tree.add_subview(root, card).unwrap();
///
/// let binding = card.anchors().set_top(&mut tree, 5.0 + root.anchors().top());
/// assert_eq!(binding, Binding::Created);
///
/// // Same operands, new constant: the existing constraint is updated
/// let binding = card.anchors().set_top(&mut tree, 8.0 + root.anchors().top());
/// assert_eq!(binding, Binding::Updated);
/// assert_eq!(tree.constraints(root).len(), 1);
/// assert_eq!(tree.constraints(root)[0].constant, 8.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorGroup {
    view: ViewId,
}

impl AnchorGroup {
    pub fn new(view: ViewId) -> Self {
        Self { view }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// A new anchor for `kind` on this view
    pub fn anchor(&self, kind: AnchorKind) -> Anchor {
        match kind.attribute() {
            Some(attribute) => Anchor::atomic(self.view, attribute),
            None => Anchor::composite(self.view, kind.members().unwrap_or_default()),
        }
    }

    /// Bind this view's `kind` anchor to `rhs`
    pub fn bind<H>(&self, hierarchy: &mut H, kind: AnchorKind, rhs: Anchor) -> Binding
    where
        H: ViewHierarchy + ?Sized,
    {
        bind_anchors(hierarchy, self.view, self.anchor(kind), rhs)
    }
}

macro_rules! named_anchors {
    ($($(#[$doc:meta])* $kind:ident => $get:ident, $set:ident;)*) => {
        impl AnchorGroup {
            $(
                $(#[$doc])*
                pub fn $get(&self) -> Anchor {
                    self.anchor(AnchorKind::$kind)
                }

                #[doc = concat!("Bind `", stringify!($get), "` to `rhs`")]
                pub fn $set<H>(&self, hierarchy: &mut H, rhs: Anchor) -> Binding
                where
                    H: ViewHierarchy + ?Sized,
                {
                    self.bind(hierarchy, AnchorKind::$kind, rhs)
                }
            )*
        }
    };
}

named_anchors! {
    CenterX => center_x, set_center_x;
    CenterY => center_y, set_center_y;
    /// `center_x` and `center_y`, to be bound to another `center`
    Center => center, set_center;
    Top => top, set_top;
    Bottom => bottom, set_bottom;
    Leading => leading, set_leading;
    Trailing => trailing, set_trailing;
    /// `top`, `bottom`, `leading` and `trailing`, to be bound to another
    /// `fill`. The constant is negated on `bottom` and `trailing` so that it
    /// reads as a margin.
    Fill => fill, set_fill;
    Width => width, set_width;
    Height => height, set_height;
}

fn bind_anchors<H>(hierarchy: &mut H, view: ViewId, lhs: Anchor, rhs: Anchor) -> Binding
where
    H: ViewHierarchy + ?Sized,
{
    let Some(ancestor) = common_ancestor(hierarchy, view, &rhs) else {
        return skipped(Skip::UnresolvableAncestor {
            view,
            attribute: lhs.attribute(),
        });
    };

    match (lhs.is_composite(), rhs.is_composite()) {
        (false, false) => reconcile(hierarchy, ancestor, view, lhs.attribute(), &rhs),
        (true, true) if lhs.arity() == rhs.arity() => Binding::Composite(
            lhs.into_parts()
                .into_iter()
                .zip(rhs.distribute())
                .map(|(lhs, rhs)| bind_anchors(hierarchy, view, lhs, rhs))
                .collect(),
        ),
        _ => skipped(Skip::CompositeArityMismatch {
            lhs: lhs.arity(),
            rhs: rhs.arity(),
        }),
    }
}

fn reconcile<H>(
    hierarchy: &mut H,
    ancestor: ViewId,
    view: ViewId,
    attribute: Attribute,
    rhs: &Anchor,
) -> Binding
where
    H: ViewHierarchy + ?Sized,
{
    if rhs.owner().is_none() && !attribute.is_dimension() {
        return skipped(Skip::ConstantOnNonDimension { view, attribute });
    }

    let lhs = Operand::new(view, attribute);
    let found = match rhs.intent() {
        Intent::ForceCreate => None,
        Intent::Reconcile | Intent::Remove => {
            find_constraint(hierarchy, ancestor, lhs, rhs.operand())
        }
    };

    match (rhs.intent(), found) {
        (Intent::Remove, Some(found)) => {
            hierarchy.remove_constraint(ancestor, found.index);
            log::trace!(target: LOG_TARGET, "removed {view}.{attribute} from {ancestor}");
            Binding::Removed
        }
        (Intent::Remove, None) => skipped(Skip::NoMatchingConstraint { view, attribute }),
        (_, None) => create(hierarchy, ancestor, view, attribute, rhs, Binding::Created),
        (_, Some(found)) => {
            let updated = match hierarchy.constraint_mut(ancestor, found.index) {
                Some(record)
                    if found.orientation == Orientation::Forward
                        && record.relation == rhs.relation()
                        && record.multiplier == rhs.multiplier()
                        && record.priority == rhs.priority_level() =>
                {
                    record.constant = rhs.constant() * found.orientation.sign();
                    true
                }
                _ => false,
            };

            if updated {
                log::trace!(target: LOG_TARGET, "updated {view}.{attribute} on {ancestor}");
                Binding::Updated
            } else {
                hierarchy.remove_constraint(ancestor, found.index);
                create(hierarchy, ancestor, view, attribute, rhs, Binding::Replaced)
            }
        }
    }
}

/// Install a new record on `ancestor`, returning `outcome` once it is in place
fn create<H>(
    hierarchy: &mut H,
    ancestor: ViewId,
    view: ViewId,
    attribute: Attribute,
    rhs: &Anchor,
    outcome: Binding,
) -> Binding
where
    H: ViewHierarchy + ?Sized,
{
    let record = ConstraintRecord::new(view, attribute, rhs.relation(), rhs.operand())
        .with_multiplier(rhs.multiplier())
        .with_constant(rhs.constant())
        .with_priority(rhs.priority_level());
    if let Err(err) = hierarchy.add_constraint(ancestor, record) {
        log::debug!(target: LOG_TARGET, "cannot install {view}.{attribute}: {err}");
        return skipped(Skip::UnresolvableAncestor { view, attribute });
    }
    // Only after the host accepted the record
    hierarchy.disable_implicit_constraints(view);
    log::trace!(target: LOG_TARGET, "installed {view}.{attribute} on {ancestor}");
    outcome
}

fn skipped(skip: Skip) -> Binding {
    log::debug!(target: LOG_TARGET, "binding skipped: {skip}");
    Binding::Skipped(skip)
}
