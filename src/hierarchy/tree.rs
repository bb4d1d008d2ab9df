//! In-memory view hierarchy

use thiserror::Error;

use super::{ConstraintRecord, ViewHierarchy, ViewId};

/// Errors from structural edits of a [`ViewTree`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("{0} does not exist")]
    UnknownView(ViewId),

    /// The child is the parent or one of its ancestors
    #[error("adding {child} under {parent} would create a cycle")]
    Cycle { parent: ViewId, child: ViewId },

    #[error("{0} has no superview")]
    NotAttached(ViewId),
}

#[derive(Debug, Clone)]
struct ViewNode {
    name: String,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    constraints: Vec<ConstraintRecord>,
    implicit_constraints: bool,
}

/// A tree of named views, each holding the constraints installed on it
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    nodes: Vec<ViewNode>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached view
    pub fn add_view(&mut self, name: impl Into<String>) -> ViewId {
        let id = ViewId(self.nodes.len());
        self.nodes.push(ViewNode {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            constraints: Vec::new(),
            implicit_constraints: true,
        });
        id
    }

    /// Make `child` the last subview of `parent`, detaching it from a
    /// different previous superview first
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> Result<(), HierarchyError> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_descendant_or_self(parent, child) {
            return Err(HierarchyError::Cycle { parent, child });
        }
        match self.nodes[child.0].parent {
            // Same superview: only the subview order changes, constraints stay
            Some(current) if current == parent => {
                self.nodes[parent.0].children.retain(|&c| c != child);
            }
            Some(_) => self.remove_from_superview(child)?,
            None => {}
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Detach `view` from its superview
    ///
    /// Every ancestor drops the constraints that reference `view` or any
    /// view below it.
    pub fn remove_from_superview(&mut self, view: ViewId) -> Result<(), HierarchyError> {
        let parent = self
            .node(view)?
            .parent
            .ok_or(HierarchyError::NotAttached(view))?;

        let subtree = self.subtree(view);
        let view_name = self.nodes[view.0].name.clone();
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            let node = &mut self.nodes[current.0];
            let before = node.constraints.len();
            node.constraints
                .retain(|record| !subtree.iter().any(|&v| record.references(v)));
            let dropped = before - node.constraints.len();
            if dropped > 0 {
                log::debug!(
                    target: "visual_anchors",
                    "dropped {} constraint(s) from '{}' while detaching '{}'",
                    dropped,
                    node.name,
                    view_name
                );
            }
            ancestor = self.nodes[current.0].parent;
        }

        self.nodes[parent.0].children.retain(|&c| c != view);
        self.nodes[view.0].parent = None;
        Ok(())
    }

    /// Look up a view by name
    pub fn find(&self, name: &str) -> Option<ViewId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(ViewId)
    }

    pub fn name(&self, view: ViewId) -> Option<&str> {
        self.nodes.get(view.0).map(|node| node.name.as_str())
    }

    pub fn superview(&self, view: ViewId) -> Option<ViewId> {
        self.nodes.get(view.0).and_then(|node| node.parent)
    }

    pub fn subviews(&self, view: ViewId) -> &[ViewId] {
        self.nodes
            .get(view.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// All views in creation order
    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        (0..self.nodes.len()).map(ViewId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the host still derives constraints for `view` from its frame
    pub fn uses_implicit_constraints(&self, view: ViewId) -> bool {
        self.nodes
            .get(view.0)
            .is_some_and(|node| node.implicit_constraints)
    }

    fn node(&self, view: ViewId) -> Result<&ViewNode, HierarchyError> {
        self.nodes.get(view.0).ok_or(HierarchyError::UnknownView(view))
    }

    /// Whether `view` is `root` or lies below it
    fn is_descendant_or_self(&self, view: ViewId, root: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(v) = current {
            if v == root {
                return true;
            }
            current = self.superview(v);
        }
        false
    }

    fn subtree(&self, root: ViewId) -> Vec<ViewId> {
        let mut stack = vec![root];
        let mut out = Vec::new();
        while let Some(view) = stack.pop() {
            out.push(view);
            stack.extend_from_slice(self.subviews(view));
        }
        out
    }
}

impl ViewHierarchy for ViewTree {
    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.superview(view)
    }

    fn constraints(&self, owner: ViewId) -> &[ConstraintRecord] {
        self.nodes
            .get(owner.0)
            .map(|node| node.constraints.as_slice())
            .unwrap_or_default()
    }

    fn constraint_mut(&mut self, owner: ViewId, index: usize) -> Option<&mut ConstraintRecord> {
        self.nodes
            .get_mut(owner.0)
            .and_then(|node| node.constraints.get_mut(index))
    }

    fn add_constraint(
        &mut self,
        owner: ViewId,
        record: ConstraintRecord,
    ) -> Result<(), HierarchyError> {
        let node = self
            .nodes
            .get_mut(owner.0)
            .ok_or(HierarchyError::UnknownView(owner))?;
        node.constraints.push(record);
        Ok(())
    }

    fn remove_constraint(&mut self, owner: ViewId, index: usize) -> Option<ConstraintRecord> {
        let node = self.nodes.get_mut(owner.0)?;
        (index < node.constraints.len()).then(|| node.constraints.remove(index))
    }

    fn disable_implicit_constraints(&mut self, view: ViewId) {
        if let Some(node) = self.nodes.get_mut(view.0) {
            node.implicit_constraints = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Attribute, Relation};
    use crate::hierarchy::Operand;

    fn edge(view: ViewId, other: ViewId) -> ConstraintRecord {
        ConstraintRecord::new(
            view,
            Attribute::Top,
            Relation::Equal,
            Operand::new(other, Attribute::Top),
        )
    }

    #[test]
    fn test_add_subview_sets_parent() {
        let mut tree = ViewTree::new();
        let root = tree.add_view("root");
        let child = tree.add_view("child");
        tree.add_subview(root, child).unwrap();

        assert_eq!(tree.superview(child), Some(root));
        assert_eq!(tree.subviews(root), &[child]);
        assert_eq!(tree.find("child"), Some(child));
        assert_eq!(tree.name(root), Some("root"));
    }

    #[test]
    fn test_add_subview_reparents() {
        let mut tree = ViewTree::new();
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        let c = tree.add_view("c");
        tree.add_subview(a, c).unwrap();
        tree.add_subview(b, c).unwrap();

        assert_eq!(tree.superview(c), Some(b));
        assert!(tree.subviews(a).is_empty());
    }

    #[test]
    fn test_add_subview_rejects_cycle() {
        let mut tree = ViewTree::new();
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        tree.add_subview(a, b).unwrap();

        assert_eq!(
            tree.add_subview(b, a),
            Err(HierarchyError::Cycle { parent: b, child: a })
        );
        assert_eq!(
            tree.add_subview(a, a),
            Err(HierarchyError::Cycle { parent: a, child: a })
        );
    }

    #[test]
    fn test_unknown_view() {
        let mut tree = ViewTree::new();
        let a = tree.add_view("a");
        assert_eq!(
            tree.add_subview(a, ViewId(7)),
            Err(HierarchyError::UnknownView(ViewId(7)))
        );
        assert_eq!(
            tree.remove_from_superview(a),
            Err(HierarchyError::NotAttached(a))
        );
    }

    #[test]
    fn test_remove_from_superview_drops_subtree_constraints() {
        let mut tree = ViewTree::new();
        let root = tree.add_view("root");
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        let inner = tree.add_view("inner");
        tree.add_subview(root, a).unwrap();
        tree.add_subview(root, b).unwrap();
        tree.add_subview(a, inner).unwrap();

        tree.add_constraint(root, edge(a, root)).unwrap();
        tree.add_constraint(root, edge(b, root)).unwrap();
        tree.add_constraint(root, edge(inner, b)).unwrap();
        tree.add_constraint(a, edge(inner, a)).unwrap();

        tree.remove_from_superview(a).unwrap();

        assert_eq!(tree.constraints(root), &[edge(b, root)]);
        // Constraints held inside the detached subtree survive
        assert_eq!(tree.constraints(a), &[edge(inner, a)]);
        assert_eq!(tree.superview(a), None);
    }

    #[test]
    fn test_add_constraint_to_unknown_view() {
        let mut tree = ViewTree::new();
        let a = tree.add_view("a");
        assert_eq!(
            tree.add_constraint(ViewId(5), edge(a, a)),
            Err(HierarchyError::UnknownView(ViewId(5)))
        );
        assert!(tree.constraints(ViewId(5)).is_empty());
    }

    #[test]
    fn test_readding_to_same_superview_keeps_constraints() {
        let mut tree = ViewTree::new();
        let root = tree.add_view("root");
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        tree.add_subview(root, a).unwrap();
        tree.add_subview(root, b).unwrap();
        tree.add_constraint(root, edge(a, root)).unwrap();

        tree.add_subview(root, a).unwrap();

        assert_eq!(tree.superview(a), Some(root));
        assert_eq!(tree.subviews(root), &[b, a]);
        assert_eq!(tree.constraints(root), &[edge(a, root)]);
    }

    #[test]
    fn test_remove_constraint_out_of_range() {
        let mut tree = ViewTree::new();
        let root = tree.add_view("root");
        assert_eq!(tree.remove_constraint(root, 0), None);
        assert_eq!(tree.remove_constraint(ViewId(9), 0), None);
    }

    #[test]
    fn test_implicit_constraints_flag() {
        let mut tree = ViewTree::new();
        let view = tree.add_view("v");
        assert!(tree.uses_implicit_constraints(view));
        tree.disable_implicit_constraints(view);
        assert!(!tree.uses_implicit_constraints(view));
    }
}
