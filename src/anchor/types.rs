//! Value types shared by anchor expressions and constraint records

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A single layout attribute of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    CenterX,
    CenterY,
    Top,
    Bottom,
    Leading,
    Trailing,
    Width,
    Height,
    /// Placeholder second attribute of a constant constraint
    NotAnAttribute,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CenterX => "center_x",
            Self::CenterY => "center_y",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Leading => "leading",
            Self::Trailing => "trailing",
            Self::Width => "width",
            Self::Height => "height",
            Self::NotAnAttribute => "not_an_attribute",
        }
    }

    /// Width and height are the only attributes that accept a constant constraint
    pub fn is_dimension(&self) -> bool {
        matches!(self, Self::Width | Self::Height)
    }

    /// Far edges whose constant is negated when a composite is fanned out
    pub fn inverts_margin(&self) -> bool {
        matches!(self, Self::Trailing | Self::Bottom)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison between the two sides of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    #[default]
    Equal,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Layout priority of a constraint, on the platform's 0..=1000 scale
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Priority(pub f32);

impl Priority {
    pub const REQUIRED: Priority = Priority(1000.0);
    pub const HIGH: Priority = Priority(750.0);
    pub const LOW: Priority = Priority(250.0);
    pub const FITTING_SIZE: Priority = Priority(50.0);

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn is_required(&self) -> bool {
        *self == Self::REQUIRED
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl From<f32> for Priority {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a binding should do with the constraint it describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// Update or replace an equivalent constraint, creating one if none exists
    #[default]
    Reconcile,
    /// Create a new constraint without looking for an existing one
    ForceCreate,
    /// Delete the equivalent constraint
    Remove,
}

/// The named anchors exposed by an [`AnchorGroup`](super::AnchorGroup)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    CenterX,
    CenterY,
    /// `center_x` and `center_y`
    Center,
    Top,
    Bottom,
    Leading,
    Trailing,
    /// `top`, `bottom`, `leading` and `trailing`
    Fill,
    Width,
    Height,
}

impl AnchorKind {
    pub const ALL: [AnchorKind; 10] = [
        Self::CenterX,
        Self::CenterY,
        Self::Center,
        Self::Top,
        Self::Bottom,
        Self::Leading,
        Self::Trailing,
        Self::Fill,
        Self::Width,
        Self::Height,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Fill => "fill",
            other => other.attribute().map_or("", |attr| attr.as_str()),
        }
    }

    /// The single attribute behind an atomic anchor, `None` for composites
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            Self::CenterX => Some(Attribute::CenterX),
            Self::CenterY => Some(Attribute::CenterY),
            Self::Top => Some(Attribute::Top),
            Self::Bottom => Some(Attribute::Bottom),
            Self::Leading => Some(Attribute::Leading),
            Self::Trailing => Some(Attribute::Trailing),
            Self::Width => Some(Attribute::Width),
            Self::Height => Some(Attribute::Height),
            Self::Center | Self::Fill => None,
        }
    }

    /// Member attributes of a composite anchor, in binding order
    pub fn members(&self) -> Option<&'static [Attribute]> {
        match self {
            Self::Center => Some(&[Attribute::CenterX, Attribute::CenterY]),
            Self::Fill => Some(&[
                Attribute::Top,
                Attribute::Bottom,
                Attribute::Leading,
                Attribute::Trailing,
            ]),
            _ => None,
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor '{0}'")]
pub struct UnknownAnchor(pub String);

impl FromStr for AnchorKind {
    type Err = UnknownAnchor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "center_x" | "centerX" => Self::CenterX,
            "center_y" | "centerY" => Self::CenterY,
            other => {
                return Self::ALL
                    .into_iter()
                    .find(|kind| kind.as_str() == other)
                    .ok_or_else(|| UnknownAnchor(other.to_string()))
            }
        };
        Ok(kind)
    }
}
