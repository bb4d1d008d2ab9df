//! Integration tests for binding reconciliation against a view tree

use pretty_assertions::assert_eq;
use visual_anchors::{
    Anchor, Attribute, Binding, ConstraintRecord, Operand, Priority, Relation, Skip,
    ViewHierarchy, ViewId, ViewTree,
};

/// A parent with two children
fn family() -> (ViewTree, ViewId, ViewId, ViewId) {
    let mut tree = ViewTree::new();
    let parent = tree.add_view("parent");
    let a = tree.add_view("a");
    let b = tree.add_view("b");
    tree.add_subview(parent, a).unwrap();
    tree.add_subview(parent, b).unwrap();
    (tree, parent, a, b)
}

#[test]
fn test_binding_twice_keeps_one_record() {
    let (mut tree, parent, a, b) = family();
    let expr = || (b.anchors().leading() + 12.0).priority(Priority::HIGH);

    assert_eq!(a.anchors().set_leading(&mut tree, expr()), Binding::Created);
    let once = tree.constraints(parent).to_vec();

    assert_eq!(a.anchors().set_leading(&mut tree, expr()), Binding::Updated);
    assert_eq!(tree.constraints(parent), once.as_slice());
}

#[test]
fn test_rebinding_updates_constant_in_place() {
    let (mut tree, parent, a, b) = family();

    a.anchors().set_top(&mut tree, 4.0 + b.anchors().top());
    let binding = a.anchors().set_top(&mut tree, 9.0 + b.anchors().top());

    assert_eq!(binding, Binding::Updated);
    assert_eq!(tree.constraints(parent).len(), 1);
    assert_eq!(tree.constraints(parent)[0].constant, 9.0);
}

#[test]
fn test_reversed_binding_replaces_record() {
    let (mut tree, parent, a, b) = family();

    a.anchors().set_top(&mut tree, 4.0 + b.anchors().top());
    let binding = b.anchors().set_top(&mut tree, 6.0 + a.anchors().top());

    assert_eq!(binding, Binding::Replaced);
    let records = tree.constraints(parent);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].first(), Operand::new(b, Attribute::Top));
    assert_eq!(records[0].second(), Operand::new(a, Attribute::Top));
    assert_eq!(records[0].constant, 6.0);
}

#[test]
fn test_fill_inverts_far_edges() {
    let mut tree = ViewTree::new();
    let outer = tree.add_view("outer");
    let inner = tree.add_view("inner");
    tree.add_subview(outer, inner).unwrap();

    let binding = inner
        .anchors()
        .set_fill(&mut tree, 10.0 + outer.anchors().fill().ancestor(outer));
    assert_eq!(
        binding,
        Binding::Composite(vec![Binding::Created; 4])
    );

    let constants: Vec<(Attribute, f64)> = tree
        .constraints(outer)
        .iter()
        .map(|r| (r.first().attribute, r.constant))
        .collect();
    assert_eq!(
        constants,
        vec![
            (Attribute::Top, 10.0),
            (Attribute::Bottom, -10.0),
            (Attribute::Leading, 10.0),
            (Attribute::Trailing, -10.0),
        ]
    );
}

#[test]
fn test_remove_round_trip() {
    let (mut tree, parent, a, b) = family();
    a.anchors().set_width(&mut tree, b.anchors().width() * 2.0);
    let before = tree.constraints(parent).to_vec();

    a.anchors().set_height(&mut tree, b.anchors().height() - 3.0);
    let binding = a
        .anchors()
        .set_height(&mut tree, (b.anchors().height() - 3.0).remove());

    assert_eq!(binding, Binding::Removed);
    assert_eq!(tree.constraints(parent), before.as_slice());
}

#[test]
fn test_removing_unbound_expression_is_noop() {
    let (mut tree, parent, a, b) = family();
    a.anchors().set_width(&mut tree, b.anchors().width());
    let before = tree.constraints(parent).to_vec();

    let binding = a
        .anchors()
        .set_center_x(&mut tree, b.anchors().center_x().remove());

    assert!(binding.is_noop());
    assert_eq!(
        binding.skips(),
        vec![&Skip::NoMatchingConstraint {
            view: a,
            attribute: Attribute::CenterX
        }]
    );
    assert_eq!(tree.constraints(parent), before.as_slice());
}

#[test]
fn test_remove_matches_reversed_record() {
    let (mut tree, parent, a, b) = family();
    a.anchors().set_top(&mut tree, 4.0 + b.anchors().top());

    let binding = b
        .anchors()
        .set_top(&mut tree, a.anchors().top().remove());

    assert_eq!(binding, Binding::Removed);
    assert!(tree.constraints(parent).is_empty());
}

#[test]
fn test_algebra_applies_in_order() {
    let (_, _, a, _) = family();
    let expr = (10.0 + a.anchors().width()) * 2.0;

    assert_eq!(expr.constant(), 10.0);
    assert_eq!(expr.multiplier(), 2.0);
    assert_eq!(expr.owner(), Some(a));
    assert_eq!(expr.attribute(), Attribute::Width);
}

#[test]
fn test_top_offset_scenario() {
    let mut tree = ViewTree::new();
    let p = tree.add_view("p");
    let v = tree.add_view("v");
    tree.add_subview(p, v).unwrap();

    v.anchors().set_top(&mut tree, 5.0 + p.anchors().top());
    let expected = ConstraintRecord::new(
        v,
        Attribute::Top,
        Relation::Equal,
        Operand::new(p, Attribute::Top),
    )
    .with_constant(5.0);
    assert_eq!(tree.constraints(p), &[expected.clone()]);

    v.anchors().set_top(&mut tree, 8.0 + p.anchors().top());
    assert_eq!(tree.constraints(p), &[expected.with_constant(8.0)]);
}

#[test]
fn test_constant_width_scenario() {
    let mut tree = ViewTree::new();
    let v = tree.add_view("v");

    let binding = v.anchors().set_width(&mut tree, 40.0 + Anchor::myself());

    assert_eq!(binding, Binding::Created);
    assert_eq!(
        tree.constraints(v),
        &[ConstraintRecord::new(v, Attribute::Width, Relation::Equal, Operand::none())
            .with_constant(40.0)]
    );
    assert!(!tree.uses_implicit_constraints(v));
}

#[test]
fn test_detached_view_drops_its_constraints() {
    let (mut tree, parent, a, b) = family();
    a.anchors().set_top(&mut tree, b.anchors().top());
    b.anchors().set_width(&mut tree, parent.anchors().width() / 2.0);

    tree.remove_from_superview(a).unwrap();

    let records = tree.constraints(parent);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].first_view(), b);
}
