//! Toggle scripts
//!
//! One operation per line: a verb followed by a single id.
//!
//! ```text
//! # grant the audit screen, drop user deletion
//! select-menu M3
//! deselect-resource R2
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fmt;
use std::str::FromStr;

use crate::error::{GrantError, GrantResult};

/// A single operator toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOp {
    SelectResource(String),
    DeselectResource(String),
    SelectMenu(String),
    DeselectMenu(String),
    SelectSystem(String),
    DeselectSystem(String),
    SelectAllInSystem(String),
    DeselectAllInSystem(String),
    SelectAllResources(String),
    DeselectAllResources(String),
    ExpandMenu(String),
}

impl ToggleOp {
    pub fn verb(&self) -> &'static str {
        match self {
            ToggleOp::SelectResource(_) => "select-resource",
            ToggleOp::DeselectResource(_) => "deselect-resource",
            ToggleOp::SelectMenu(_) => "select-menu",
            ToggleOp::DeselectMenu(_) => "deselect-menu",
            ToggleOp::SelectSystem(_) => "select-system",
            ToggleOp::DeselectSystem(_) => "deselect-system",
            ToggleOp::SelectAllInSystem(_) => "select-all-in-system",
            ToggleOp::DeselectAllInSystem(_) => "deselect-all-in-system",
            ToggleOp::SelectAllResources(_) => "select-all-resources",
            ToggleOp::DeselectAllResources(_) => "deselect-all-resources",
            ToggleOp::ExpandMenu(_) => "expand-menu",
        }
    }

    /// The system, menu, or resource id the operation targets
    pub fn target(&self) -> &str {
        match self {
            ToggleOp::SelectResource(id)
            | ToggleOp::DeselectResource(id)
            | ToggleOp::SelectMenu(id)
            | ToggleOp::DeselectMenu(id)
            | ToggleOp::SelectSystem(id)
            | ToggleOp::DeselectSystem(id)
            | ToggleOp::SelectAllInSystem(id)
            | ToggleOp::DeselectAllInSystem(id)
            | ToggleOp::SelectAllResources(id)
            | ToggleOp::DeselectAllResources(id)
            | ToggleOp::ExpandMenu(id) => id,
        }
    }
}

impl fmt::Display for ToggleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.target())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleParseError {
    #[error("empty operation")]
    Empty,

    #[error("unknown operation '{0}'")]
    UnknownVerb(String),

    #[error("'{0}' needs an id")]
    MissingId(String),

    #[error("'{verb}' takes one id, found extra input '{extra}'")]
    TrailingInput { verb: String, extra: String },
}

impl FromStr for ToggleOp {
    type Err = ToggleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().ok_or(ToggleParseError::Empty)?;
        let build: fn(String) -> ToggleOp = match verb {
            "select-resource" => ToggleOp::SelectResource,
            "deselect-resource" => ToggleOp::DeselectResource,
            "select-menu" => ToggleOp::SelectMenu,
            "deselect-menu" => ToggleOp::DeselectMenu,
            "select-system" => ToggleOp::SelectSystem,
            "deselect-system" => ToggleOp::DeselectSystem,
            "select-all-in-system" => ToggleOp::SelectAllInSystem,
            "deselect-all-in-system" => ToggleOp::DeselectAllInSystem,
            "select-all-resources" => ToggleOp::SelectAllResources,
            "deselect-all-resources" => ToggleOp::DeselectAllResources,
            "expand-menu" => ToggleOp::ExpandMenu,
            other => return Err(ToggleParseError::UnknownVerb(other.to_string())),
        };

        let id = parts
            .next()
            .ok_or_else(|| ToggleParseError::MissingId(verb.to_string()))?;
        let rest: Vec<&str> = parts.collect();
        if !rest.is_empty() {
            return Err(ToggleParseError::TrailingInput {
                verb: verb.to_string(),
                extra: rest.join(" "),
            });
        }

        Ok(build(id.to_string()))
    }
}

/// Parse a whole script; the first bad line aborts with its 1-based number.
pub fn parse_script(source: &str) -> GrantResult<Vec<ToggleOp>> {
    let mut ops = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let op = line.parse::<ToggleOp>().map_err(|err| GrantError::InvalidScript {
            line: index + 1,
            message: err.to_string(),
        })?;
        ops.push(op);
    }
    Ok(ops)
}
