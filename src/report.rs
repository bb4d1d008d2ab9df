//! Snapshots of a view tree's installed constraints
//!
//! A [`Report`] captures every view with the constraints installed on it,
//! and renders either as aligned text for humans or as TOML.

use serde::Serialize;

use crate::anchor::{Attribute, Priority, Relation};
use crate::hierarchy::{ConstraintRecord, ViewHierarchy, ViewId, ViewTree};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub views: Vec<ViewReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superview: Option<String>,
    /// Whether the host still derives constraints from the view's frame
    pub implicit_constraints: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintEntry>,
}

/// A constraint with view handles replaced by names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintEntry {
    pub first: String,
    pub first_attribute: Attribute,
    pub relation: Relation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
    pub second_attribute: Attribute,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: Priority,
}

impl ConstraintEntry {
    fn from_record(tree: &ViewTree, record: &ConstraintRecord) -> Self {
        let second = record.second();
        Self {
            first: view_name(tree, record.first_view()),
            first_attribute: record.first().attribute,
            relation: record.relation,
            second: second.view.map(|view| view_name(tree, view)),
            second_attribute: second.attribute,
            multiplier: record.multiplier,
            constant: record.constant,
            priority: record.priority,
        }
    }
}

impl std::fmt::Display for ConstraintEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} {} ",
            self.first,
            self.first_attribute,
            self.relation.symbol()
        )?;

        match &self.second {
            Some(second) => {
                if self.multiplier != 1.0 {
                    write!(f, "{} * ", self.multiplier)?;
                }
                write!(f, "{}.{}", second, self.second_attribute)?;
                if self.constant > 0.0 {
                    write!(f, " + {}", self.constant)?;
                } else if self.constant < 0.0 {
                    write!(f, " - {}", -self.constant)?;
                }
            }
            None => write!(f, "{}", self.constant)?,
        }

        if !self.priority.is_required() {
            write!(f, " @{}", self.priority)?;
        }
        Ok(())
    }
}

fn view_name(tree: &ViewTree, view: ViewId) -> String {
    tree.name(view)
        .map(str::to_string)
        .unwrap_or_else(|| view.to_string())
}

impl Report {
    /// Capture every view of `tree` in creation order
    pub fn from_tree(tree: &ViewTree) -> Self {
        let views = tree
            .views()
            .map(|view| ViewReport {
                name: view_name(tree, view),
                superview: tree.superview(view).map(|parent| view_name(tree, parent)),
                implicit_constraints: tree.uses_implicit_constraints(view),
                constraints: tree
                    .constraints(view)
                    .iter()
                    .map(|record| ConstraintEntry::from_record(tree, record))
                    .collect(),
            })
            .collect();
        Self { views }
    }

    /// Total number of installed constraints
    pub fn constraint_count(&self) -> usize {
        self.views.iter().map(|v| v.constraints.len()).sum()
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for view in &self.views {
            match &view.superview {
                Some(parent) => writeln!(f, "view {} in {}", view.name, parent)?,
                None => writeln!(f, "view {}", view.name)?,
            }
            for constraint in &view.constraints {
                writeln!(f, "  {}", constraint)?;
            }
        }
        Ok(())
    }
}
