//! Record kinds for things-json documents.
//!
//! This module contains every record that can appear in a document:
//! - Todo
//! - Project
//! - Heading
//! - ChecklistItem
//! - Container (the root array)
//!
//! plus the two closed variants that share a slot in an array
//! ([`ContainerItem`] and [`ProjectItem`]).

pub mod checklist_item;
pub mod container;
pub mod heading;
pub mod project;
pub mod todo;

pub use checklist_item::ChecklistItem;
pub use container::{Container, ContainerItem};
pub use heading::Heading;
pub use project::{Project, ProjectItem};
pub use todo::Todo;

use serde::{Deserialize, Serialize};

use crate::codec::{Field, Record};

/// Discriminant written to the `type` key of every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "to-do")]
    Todo,
    #[serde(rename = "project")]
    Project,
    #[serde(rename = "heading")]
    Heading,
    #[serde(rename = "checklist-item")]
    ChecklistItem,
}

impl Kind {
    /// Every known kind, in declaration order.
    pub const ALL: [Kind; 4] = [Self::Todo, Self::Project, Self::Heading, Self::ChecklistItem];

    /// Wire string for the `type` key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "to-do",
            Self::Project => "project",
            Self::Heading => "heading",
            Self::ChecklistItem => "checklist-item",
        }
    }

    /// Field table of the record kind.
    #[must_use]
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Todo => Todo::FIELDS,
            Self::Project => Project::FIELDS,
            Self::Heading => Heading::FIELDS,
            Self::ChecklistItem => ChecklistItem::FIELDS,
        }
    }

    /// Look up a kind by its wire string.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an envelope creates a new entity or updates an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Create,
    Update,
}

impl Operation {
    /// Wire string for the `operation` key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            _ => Err(format!("unknown operation '{s}' (expected create or update)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_strings() {
        assert_eq!(Kind::Todo.as_str(), "to-do");
        assert_eq!(Kind::ChecklistItem.to_string(), "checklist-item");
        assert_eq!(Kind::from_wire("heading"), Some(Kind::Heading));
        assert_eq!(Kind::from_wire("area"), None);
    }

    #[test]
    fn test_kind_fields() {
        assert!(Kind::Heading.fields().iter().any(|f| f.key == "archived"));
        assert!(!Kind::Project.fields().iter().any(|f| f.key == "checklist-items"));
        assert!(Kind::Todo.fields().iter().any(|f| f.key == "heading-id"));
    }

    #[test]
    fn test_kind_serde_matches_as_str() {
        for kind in Kind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn test_operation_default_and_parse() {
        assert_eq!(Operation::default(), Operation::Create);
        assert_eq!("update".parse::<Operation>(), Ok(Operation::Update));
        assert!("delete".parse::<Operation>().is_err());
        assert!("Create".parse::<Operation>().is_err());
    }
}
