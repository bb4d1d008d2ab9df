//! Visual Anchors - declarative layout constraints between views
//!
//! Bindings such as `green.fill = 10 + root.fill` are reconciled against the
//! constraints a view hierarchy already holds: an existing constraint between
//! the same two attributes is updated or replaced, otherwise a new one is
//! installed on the nearest common ancestor.
//!
//! # Example
//!
//! ```rust
//! use visual_anchors::{Anchor, Binding, ViewHierarchy, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let root = tree.add_view("root");
//! let child = tree.add_view("child");
//! tree.add_subview(root, child).unwrap();
//!
//! let binding = child.anchors().set_top(&mut tree, root.anchors().top() + 8.0);
//! assert_eq!(binding, Binding::Created);
//! assert_eq!(tree.constraints(root)[0].constant, 8.0);
//!
//! child.anchors().set_width(&mut tree, 40.0 + Anchor::myself());
//! assert_eq!(tree.constraints(child)[0].constant, 40.0);
//! ```

pub mod anchor;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod parser;
pub mod report;
pub mod script;

pub use anchor::{
    Anchor, AnchorGroup, AnchorKind, Attribute, Binding, Intent, Priority, Relation, Skip, Target,
};
pub use config::ScriptConfig;
pub use error::ParseError;
pub use hierarchy::{
    ConstraintRecord, HierarchyError, Operand, Orientation, ViewHierarchy, ViewId, ViewTree,
};
pub use parser::{parse, Script};
pub use report::Report;
pub use script::{Outcome, ScriptError};

use thiserror::Error;

/// Errors that can occur while running a binding script
#[derive(Debug, Error)]
pub enum RunError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while applying statements
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
}

impl From<Vec<ParseError>> for RunError {
    fn from(errors: Vec<ParseError>) -> Self {
        RunError::Parse(errors)
    }
}

impl RunError {
    /// Render every underlying error with source annotations
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RunError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            RunError::Script(e) => e.format(source, filename),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The tree a script built and what each binding did
#[derive(Debug, Clone)]
pub struct Session {
    pub tree: ViewTree,
    pub outcomes: Vec<Outcome>,
}

impl Session {
    pub fn report(&self) -> Report {
        Report::from_tree(&self.tree)
    }
}

/// Run a binding script on a fresh tree with default configuration
///
/// # Example
///
/// ```rust
/// use visual_anchors::run;
///
/// let session = run(r#"
///     view root
///     view red in root
///     red.center = root.center
///     red.width = root.height / 2
/// "#).unwrap();
///
/// assert_eq!(session.outcomes.len(), 2);
/// assert_eq!(session.report().constraint_count(), 3);
/// ```
pub fn run(source: &str) -> Result<Session, RunError> {
    run_with_config(source, &ScriptConfig::default())
}

/// Run a binding script on a fresh tree
pub fn run_with_config(source: &str, config: &ScriptConfig) -> Result<Session, RunError> {
    let script = parse(source)?;
    let mut tree = ViewTree::new();
    let outcomes = script::run(&script, &mut tree, config)?;
    Ok(Session { tree, outcomes })
}
