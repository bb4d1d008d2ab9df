//! Anchor expressions and the engine that turns them into constraints
//!
//! A binding such as `a.anchors().set_top(&mut tree, 8.0 + b.anchors().bottom())`
//! goes through these steps:
//!
//! 1. Resolve the view that owns the constraint ([`search::common_ancestor`]).
//! 2. Fan composite anchors (`center`, `fill`) out to their members.
//! 3. Look for an equivalent constraint in either orientation
//!    ([`search::find_constraint`]) and update, replace, remove or create.

pub mod error;
pub mod expression;
pub mod group;
pub mod search;
pub mod types;

pub use error::{Binding, Skip};
pub use expression::{Anchor, Target};
pub use group::AnchorGroup;
pub use types::{AnchorKind, Attribute, Intent, Priority, Relation, UnknownAnchor};
