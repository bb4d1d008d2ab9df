//! Evaluation of binding scripts against a [`ViewTree`]

use thiserror::Error;

use crate::anchor::{Anchor, AnchorKind, Binding, Priority, Skip};
use crate::config::ScriptConfig;
use crate::error::render_report;
use crate::hierarchy::{HierarchyError, ViewId, ViewTree};
use crate::parser::ast::*;

const METHODS: [&str; 7] = [
    "ancestor",
    "priority",
    "equal",
    "less_than_or_equal",
    "greater_than_or_equal",
    "remove",
    "force_create",
];

/// Errors that stop a script
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("undefined view '{name}'")]
    UndefinedView {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("view '{name}' is already declared")]
    DuplicateView { name: String, span: Span },

    #[error("unknown anchor '{name}'")]
    UnknownAnchor {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("unknown method '{name}'")]
    UnknownMethod {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("invalid argument for '{method}': {reason}")]
    InvalidArgument {
        method: String,
        reason: String,
        span: Span,
    },

    #[error("invalid expression: {reason}")]
    InvalidExpression { reason: String, span: Span },

    #[error("{source}")]
    Hierarchy {
        #[source]
        source: HierarchyError,
        span: Span,
    },

    /// Only raised in strict mode
    #[error("binding of '{target}' had no effect: {skip}")]
    Skipped {
        target: String,
        skip: Skip,
        span: Span,
    },
}

impl ScriptError {
    fn invalid_expression(reason: impl Into<String>, span: &Span) -> Self {
        Self::InvalidExpression {
            reason: reason.into(),
            span: span.clone(),
        }
    }

    fn invalid_argument(method: &str, reason: impl Into<String>, span: &Span) -> Self {
        Self::InvalidArgument {
            method: method.to_string(),
            reason: reason.into(),
            span: span.clone(),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Self::UndefinedView { span, .. }
            | Self::DuplicateView { span, .. }
            | Self::UnknownAnchor { span, .. }
            | Self::UnknownMethod { span, .. }
            | Self::InvalidArgument { span, .. }
            | Self::InvalidExpression { span, .. }
            | Self::Hierarchy { span, .. }
            | Self::Skipped { span, .. } => span,
        }
    }

    /// "Did you mean" candidates, if any
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::UndefinedView { suggestions, .. }
            | Self::UnknownAnchor { suggestions, .. }
            | Self::UnknownMethod { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let note = match self.suggestions() {
            [] => None,
            suggestions => Some(format!("Did you mean: {}?", suggestions.join(", "))),
        };
        let message = self.to_string();
        render_report(source, filename, self.span(), &message, &message, note)
    }
}

/// The effect of one binding statement
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// `view.anchor` as written
    pub target: String,
    pub span: Span,
    pub binding: Binding,
}

/// A value produced while evaluating an expression
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Scalar(f64),
    Anchor(Anchor),
}

/// Run every statement of `script` against `tree`, in order
///
/// Views declared by the script are added to `tree`; bindings may also refer
/// to views that were already present.
pub fn run(
    script: &Script,
    tree: &mut ViewTree,
    config: &ScriptConfig,
) -> Result<Vec<Outcome>, ScriptError> {
    let mut outcomes = Vec::new();

    for stmt in &script.statements {
        match &stmt.node {
            Statement::View(decl) => declare_view(tree, decl)?,
            Statement::Bind(bind) => {
                let outcome = bind_statement(tree, bind, &stmt.span)?;
                if config.strict {
                    if let Some(skip) = outcome.binding.skips().first() {
                        return Err(ScriptError::Skipped {
                            target: outcome.target.clone(),
                            skip: (*skip).clone(),
                            span: outcome.span.clone(),
                        });
                    }
                }
                outcomes.push(outcome);
            }
        }
    }

    Ok(outcomes)
}

fn declare_view(tree: &mut ViewTree, decl: &ViewDecl) -> Result<(), ScriptError> {
    let name = decl.name.node.as_str();
    if tree.find(name).is_some() {
        return Err(ScriptError::DuplicateView {
            name: name.to_string(),
            span: decl.name.span.clone(),
        });
    }

    let parent = decl
        .parent
        .as_ref()
        .map(|parent| lookup_view(tree, parent))
        .transpose()?;

    let view = tree.add_view(name);
    if let Some(parent) = parent {
        tree.add_subview(parent, view)
            .map_err(|source| ScriptError::Hierarchy {
                source,
                span: decl.name.span.clone(),
            })?;
    }
    Ok(())
}

fn bind_statement(tree: &mut ViewTree, bind: &BindDecl, span: &Span) -> Result<Outcome, ScriptError> {
    let view = lookup_view(tree, &bind.target.view)?;
    let kind = lookup_anchor(&bind.target.anchor)?;

    let rhs = match eval(tree, &bind.value)? {
        Value::Anchor(anchor) => anchor,
        // `a.width = 40` reads as `a.width = 40 + myself`
        Value::Scalar(constant) => constant + Anchor::myself(),
    };

    let binding = view.anchors().bind(tree, kind, rhs);
    Ok(Outcome {
        target: format!("{}.{}", bind.target.view.node.as_str(), kind),
        span: span.clone(),
        binding,
    })
}

fn eval(tree: &ViewTree, expr: &Spanned<Expr>) -> Result<Value, ScriptError> {
    match &expr.node {
        Expr::Number(n) => Ok(Value::Scalar(*n)),
        Expr::Myself => Ok(Value::Anchor(Anchor::myself())),
        Expr::Anchor(anchor_ref) => {
            let view = lookup_view(tree, &anchor_ref.view)?;
            let kind = lookup_anchor(&anchor_ref.anchor)?;
            Ok(Value::Anchor(view.anchors().anchor(kind)))
        }
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval(tree, lhs)?;
            let rhs = eval(tree, rhs)?;
            apply_binary(*op, lhs, rhs, &expr.span)
        }
        Expr::Call {
            receiver,
            method,
            argument,
        } => {
            let Value::Anchor(anchor) = eval(tree, receiver)? else {
                return Err(ScriptError::invalid_expression(
                    format!("'{}' can only be called on an anchor", method.node.as_str()),
                    &expr.span,
                ));
            };
            call_method(tree, anchor, method, argument.as_ref())
        }
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value, span: &Span) -> Result<Value, ScriptError> {
    let divides_by_zero = op == BinaryOp::Div
        && matches!((&lhs, &rhs), (_, Value::Scalar(d)) | (Value::Scalar(d), Value::Anchor(_)) if *d == 0.0);
    if divides_by_zero {
        return Err(ScriptError::invalid_expression("division by zero", span));
    }

    let value = match (lhs, rhs) {
        (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }),
        (Value::Anchor(anchor), Value::Scalar(s)) => Value::Anchor(match op {
            BinaryOp::Add => anchor + s,
            BinaryOp::Sub => anchor - s,
            BinaryOp::Mul => anchor * s,
            BinaryOp::Div => anchor / s,
        }),
        (Value::Scalar(s), Value::Anchor(anchor)) => Value::Anchor(match op {
            BinaryOp::Add => s + anchor,
            BinaryOp::Sub => s - anchor,
            BinaryOp::Mul => s * anchor,
            BinaryOp::Div => s / anchor,
        }),
        (Value::Anchor(_), Value::Anchor(_)) => {
            return Err(ScriptError::invalid_expression(
                "two anchors cannot be combined; use one anchor and scalars",
                span,
            ))
        }
    };
    Ok(value)
}

fn call_method(
    tree: &ViewTree,
    anchor: Anchor,
    method: &Spanned<Identifier>,
    argument: Option<&Spanned<Argument>>,
) -> Result<Value, ScriptError> {
    let name = method.node.as_str();
    let no_argument = |anchor: Anchor| match argument {
        None => Ok(anchor),
        Some(arg) => Err(ScriptError::invalid_argument(name, "takes no argument", &arg.span)),
    };

    let anchor = match name {
        "ancestor" => match argument {
            Some(Spanned {
                node: Argument::View(view),
                span,
            }) => {
                let view = lookup_view(tree, &Spanned::new(view.clone(), span.clone()))?;
                anchor.ancestor(view)
            }
            Some(arg) => return Err(ScriptError::invalid_argument(name, "expected a view name", &arg.span)),
            None => return Err(ScriptError::invalid_argument(name, "expected a view name", &method.span)),
        },
        "priority" => match argument {
            Some(Spanned {
                node: Argument::Number(p),
                ..
            }) if (0.0..=1000.0).contains(p) => anchor.priority(Priority(*p as f32)),
            Some(arg) => {
                return Err(ScriptError::invalid_argument(
                    name,
                    "expected a number between 0 and 1000",
                    &arg.span,
                ))
            }
            None => {
                return Err(ScriptError::invalid_argument(
                    name,
                    "expected a number between 0 and 1000",
                    &method.span,
                ))
            }
        },
        "equal" => no_argument(anchor)?.equal(),
        "less_than_or_equal" => no_argument(anchor)?.less_than_or_equal(),
        "greater_than_or_equal" => no_argument(anchor)?.greater_than_or_equal(),
        "remove" => no_argument(anchor)?.remove(),
        "force_create" => no_argument(anchor)?.force_create(),
        other => {
            return Err(ScriptError::UnknownMethod {
                name: other.to_string(),
                span: method.span.clone(),
                suggestions: find_similar(METHODS.iter().copied(), other, 3),
            })
        }
    };
    Ok(Value::Anchor(anchor))
}

fn lookup_view(tree: &ViewTree, name: &Spanned<Identifier>) -> Result<ViewId, ScriptError> {
    let target = name.node.as_str();
    tree.find(target).ok_or_else(|| ScriptError::UndefinedView {
        name: target.to_string(),
        span: name.span.clone(),
        suggestions: find_similar(tree.views().filter_map(|v| tree.name(v)), target, 2),
    })
}

fn lookup_anchor(name: &Spanned<Identifier>) -> Result<AnchorKind, ScriptError> {
    let target = name.node.as_str();
    target.parse().map_err(|_| ScriptError::UnknownAnchor {
        name: target.to_string(),
        span: name.span.clone(),
        suggestions: find_similar(AnchorKind::ALL.iter().map(AnchorKind::as_str), target, 2),
    })
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a_chars.iter().enumerate() {
        let mut row = vec![i + 1; b_chars.len() + 1];
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        prev = row;
    }
    prev[b_chars.len()]
}

/// Find similar names within a maximum edit distance, closest first
fn find_similar<'a>(
    candidates: impl Iterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut close: Vec<(&str, usize)> = candidates
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    close.sort_by_key(|(_, d)| *d);
    close
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Attribute, Relation};
    use crate::hierarchy::ViewHierarchy;
    use crate::parser::parse;

    fn run_source(source: &str) -> Result<(ViewTree, Vec<Outcome>), ScriptError> {
        let script = parse(source).expect("Should parse");
        let mut tree = ViewTree::new();
        let outcomes = run(&script, &mut tree, &ScriptConfig::default())?;
        Ok((tree, outcomes))
    }

    fn run_err(source: &str) -> ScriptError {
        run_source(source).expect_err("Should fail")
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("leading", "leading"), 0);
        assert_eq!(levenshtein_distance("trailing", "trialing"), 2);
        assert_eq!(levenshtein_distance("top", "to"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_views_are_declared_with_parents() {
        let (tree, outcomes) = run_source("view root view a in root").unwrap();
        assert!(outcomes.is_empty());
        let root = tree.find("root").unwrap();
        let a = tree.find("a").unwrap();
        assert_eq!(tree.superview(a), Some(root));
    }

    #[test]
    fn test_binding_produces_outcome() {
        let (tree, outcomes) = run_source("view root view a in root a.top = 5 + root.top").unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].target, "a.top");
        assert_eq!(outcomes[0].binding, Binding::Created);

        let root = tree.find("root").unwrap();
        assert_eq!(tree.constraints(root)[0].constant, 5.0);
    }

    #[test]
    fn test_scalar_arithmetic_folds() {
        let (tree, _) = run_source("view a a.width = (2 + 3) * 8").unwrap();
        let a = tree.find("a").unwrap();
        let record = &tree.constraints(a)[0];
        assert_eq!(record.constant, 40.0);
        assert_eq!(record.second().attribute, Attribute::NotAnAttribute);
    }

    #[test]
    fn test_methods_apply_to_anchor() {
        let (tree, _) = run_source(
            "view root view a in root
             a.width = (root.width / 2).less_than_or_equal().priority(250)",
        )
        .unwrap();
        let root = tree.find("root").unwrap();
        let record = &tree.constraints(root)[0];
        assert_eq!(record.multiplier, 0.5);
        assert_eq!(record.relation, Relation::LessThanOrEqual);
        assert_eq!(record.priority, Priority::LOW);
    }

    #[test]
    fn test_undefined_view_suggests() {
        match run_err("view green green.top = gren.top") {
            ScriptError::UndefinedView {
                name, suggestions, ..
            } => {
                assert_eq!(name, "gren");
                assert_eq!(suggestions, vec!["green".to_string()]);
            }
            other => panic!("Expected UndefinedView, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_anchor_suggests() {
        match run_err("view a a.heigth = 10") {
            ScriptError::UnknownAnchor {
                name, suggestions, ..
            } => {
                assert_eq!(name, "heigth");
                assert_eq!(suggestions, vec!["height".to_string()]);
            }
            other => panic!("Expected UnknownAnchor, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_method_suggests() {
        let err = run_err("view a a.width = myself.remov()");
        assert_eq!(err.suggestions(), &["remove".to_string()]);
    }

    #[test]
    fn test_duplicate_view() {
        assert!(matches!(
            run_err("view a view a"),
            ScriptError::DuplicateView { .. }
        ));
    }

    #[test]
    fn test_two_anchors_cannot_combine() {
        assert!(matches!(
            run_err("view r view a in r view b in r a.top = b.top + r.top"),
            ScriptError::InvalidExpression { .. }
        ));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            run_err("view r view a in r a.width = r.width / 0"),
            ScriptError::InvalidExpression { .. }
        ));
    }

    #[test]
    fn test_method_on_scalar() {
        assert!(matches!(
            run_err("view a a.width = (4).remove()"),
            ScriptError::InvalidExpression { .. }
        ));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            run_err("view a a.width = myself.priority(2000)"),
            ScriptError::InvalidArgument { .. }
        ));
        assert!(matches!(
            run_err("view a a.width = myself.remove(3)"),
            ScriptError::InvalidArgument { .. }
        ));
        assert!(matches!(
            run_err("view a a.width = myself.ancestor()"),
            ScriptError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_skips_are_recorded_when_lenient() {
        let (_, outcomes) = run_source("view a view b a.top = b.top").unwrap();
        assert!(outcomes[0].binding.is_noop());
    }

    #[test]
    fn test_strict_mode_fails_on_skip() {
        let script = parse("view a view b a.top = b.top").unwrap();
        let mut tree = ViewTree::new();
        let err = run(&script, &mut tree, &ScriptConfig::new().with_strict(true)).unwrap_err();
        match err {
            ScriptError::Skipped { target, skip, .. } => {
                assert_eq!(target, "a.top");
                assert!(matches!(skip, Skip::UnresolvableAncestor { .. }));
            }
            other => panic!("Expected Skipped, got {:?}", other),
        }
    }

    #[test]
    fn test_format_renders_suggestion_note() {
        let source = "view green green.top = gren.top";
        let err = run_err(source);
        let rendered = err.format(source, "demo.anchors");
        assert!(rendered.contains("undefined view 'gren'"));
        assert!(rendered.contains("Did you mean: green?"));
    }
}
