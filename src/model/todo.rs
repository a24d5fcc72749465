//! To-do model.
//!
//! To-dos appear at the top level of a document and inside a project's
//! `items`. The `prepend-*`, `append-*` and `add-tags` fields only make
//! sense on `update` envelopes; see [`crate::validate`].

use chrono::{DateTime, Utc};

use crate::codec::fields::{
    ADD_TAGS, APPEND_CHECKLIST_ITEMS, APPEND_NOTES, CANCELED, CHECKLIST_ITEMS, COMPLETED,
    COMPLETION_DATE, CREATION_DATE, DEADLINE, HEADING, HEADING_ID, LIST, LIST_ID, NOTES,
    PREPEND_CHECKLIST_ITEMS, PREPEND_NOTES, TAGS, TITLE, WHEN,
};
use crate::codec::{AttributeReader, AttributeWriter, CodecResult, Field, Header, Record, impl_serde};
use crate::model::{ChecklistItem, Kind, Operation};

/// A to-do.
///
/// Every attribute is optional; `None` means "leave unspecified" and is
/// never written to the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Todo {
    pub operation: Operation,
    pub id: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub prepend_notes: Option<String>,
    pub append_notes: Option<String>,
    /// `today`, `tomorrow`, `evening`, `anytime`, `someday` or a date string.
    pub when: Option<String>,
    pub deadline: Option<String>,
    pub tags: Option<Vec<String>>,
    pub add_tags: Option<Vec<String>>,
    pub checklist_items: Option<Vec<ChecklistItem>>,
    pub prepend_checklist_items: Option<Vec<ChecklistItem>>,
    pub append_checklist_items: Option<Vec<ChecklistItem>>,
    pub list_id: Option<String>,
    pub list: Option<String>,
    pub heading_id: Option<String>,
    pub heading: Option<String>,
    pub completed: Option<bool>,
    pub canceled: Option<bool>,
    pub creation_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
}

impl Todo {
    /// Create a to-do with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Start an update envelope for an existing to-do.
    pub fn update(id: impl Into<String>) -> Self {
        Self {
            operation: Operation::Update,
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Set the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Set when the to-do is scheduled.
    #[must_use]
    pub fn with_when(mut self, when: &str) -> Self {
        self.when = Some(when.to_string());
        self
    }

    /// Set the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: &str) -> Self {
        self.deadline = Some(deadline.to_string());
        self
    }

    /// Replace the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Append a checklist item.
    #[must_use]
    pub fn with_checklist_item(mut self, item: ChecklistItem) -> Self {
        self.checklist_items.get_or_insert_with(Vec::new).push(item);
        self
    }

    /// File the to-do into a list by name.
    #[must_use]
    pub fn in_list(mut self, list: &str) -> Self {
        self.list = Some(list.to_string());
        self
    }

    /// Mark as completed.
    #[must_use]
    pub fn completed(mut self) -> Self {
        self.completed = Some(true);
        self
    }
}

impl Record for Todo {
    const KIND: Kind = Kind::Todo;
    const FIELDS: &'static [Field] = &[
        TITLE,
        NOTES,
        PREPEND_NOTES,
        APPEND_NOTES,
        WHEN,
        DEADLINE,
        TAGS,
        ADD_TAGS,
        CHECKLIST_ITEMS,
        PREPEND_CHECKLIST_ITEMS,
        APPEND_CHECKLIST_ITEMS,
        LIST_ID,
        LIST,
        HEADING_ID,
        HEADING,
        COMPLETED,
        CANCELED,
        CREATION_DATE,
        COMPLETION_DATE,
    ];

    fn operation(&self) -> Operation {
        self.operation
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn write_attributes(&self, out: &mut AttributeWriter<'_>) {
        out.text(TITLE, self.title.as_deref());
        out.text(NOTES, self.notes.as_deref());
        out.text(PREPEND_NOTES, self.prepend_notes.as_deref());
        out.text(APPEND_NOTES, self.append_notes.as_deref());
        out.text(WHEN, self.when.as_deref());
        out.text(DEADLINE, self.deadline.as_deref());
        out.tags(TAGS, self.tags.as_deref());
        out.tags(ADD_TAGS, self.add_tags.as_deref());
        out.records(CHECKLIST_ITEMS, self.checklist_items.as_deref());
        out.records(PREPEND_CHECKLIST_ITEMS, self.prepend_checklist_items.as_deref());
        out.records(APPEND_CHECKLIST_ITEMS, self.append_checklist_items.as_deref());
        out.text(LIST_ID, self.list_id.as_deref());
        out.text(LIST, self.list.as_deref());
        out.text(HEADING_ID, self.heading_id.as_deref());
        out.text(HEADING, self.heading.as_deref());
        out.flag(COMPLETED, self.completed);
        out.flag(CANCELED, self.canceled);
        out.date(CREATION_DATE, self.creation_date.as_ref());
        out.date(COMPLETION_DATE, self.completion_date.as_ref());
    }

    fn read_attributes(header: Header, attrs: &AttributeReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            operation: header.operation,
            id: header.id,
            title: attrs.text(TITLE)?,
            notes: attrs.text(NOTES)?,
            prepend_notes: attrs.text(PREPEND_NOTES)?,
            append_notes: attrs.text(APPEND_NOTES)?,
            when: attrs.text(WHEN)?,
            deadline: attrs.text(DEADLINE)?,
            tags: attrs.tags(TAGS)?,
            add_tags: attrs.tags(ADD_TAGS)?,
            checklist_items: attrs.records(CHECKLIST_ITEMS)?,
            prepend_checklist_items: attrs.records(PREPEND_CHECKLIST_ITEMS)?,
            append_checklist_items: attrs.records(APPEND_CHECKLIST_ITEMS)?,
            list_id: attrs.text(LIST_ID)?,
            list: attrs.text(LIST)?,
            heading_id: attrs.text(HEADING_ID)?,
            heading: attrs.text(HEADING)?,
            completed: attrs.flag(COMPLETED)?,
            canceled: attrs.flag(CANCELED)?,
            creation_date: attrs.date(CREATION_DATE)?,
            completion_date: attrs.date(COMPLETION_DATE)?,
        })
    }
}

impl_serde!(record Todo);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use chrono::TimeZone;
    use serde_json::json;

    fn populated() -> Todo {
        Todo {
            operation: Operation::Update,
            id: Some("todo-9".to_string()),
            title: Some("Buy milk".to_string()),
            notes: Some("2%".to_string()),
            prepend_notes: Some("Urgent: ".to_string()),
            append_notes: Some(" (organic)".to_string()),
            when: Some("evening".to_string()),
            deadline: Some("2024-06-01".to_string()),
            tags: Some(vec!["Errand".to_string(), "Home".to_string()]),
            add_tags: Some(vec!["Shopping".to_string()]),
            checklist_items: Some(vec![ChecklistItem::new("Whole"), ChecklistItem::new("Skim")]),
            prepend_checklist_items: Some(vec![ChecklistItem::new("First")]),
            append_checklist_items: Some(vec![ChecklistItem::new("Last").completed()]),
            list_id: Some("list-1".to_string()),
            list: Some("Groceries".to_string()),
            heading_id: Some("head-1".to_string()),
            heading: Some("Dairy".to_string()),
            completed: Some(false),
            canceled: Some(false),
            creation_date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
            completion_date: Some(Utc.with_ymd_and_hms(2024, 5, 2, 18, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_minimal_encoding_is_exact() {
        let todo = Todo::new("Pick up dry cleaning").with_when("today");
        assert_eq!(
            serde_json::to_string(&todo).unwrap(),
            r#"{"type":"to-do","operation":"create","attributes":{"title":"Pick up dry cleaning","when":"today"}}"#
        );
    }

    #[test]
    fn test_round_trip_populated() {
        let todo = populated();
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(serde_json::from_value::<Todo>(value).unwrap(), todo);
    }

    #[test]
    fn test_round_trip_all_absent() {
        let todo = Todo::default();
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["attributes"], json!({}));
        assert_eq!(serde_json::from_value::<Todo>(value).unwrap(), todo);
    }

    #[test]
    fn test_every_field_has_a_wire_key() {
        let value = serde_json::to_value(populated()).unwrap();
        let attributes = value["attributes"].as_object().unwrap();
        assert_eq!(attributes.len(), Todo::FIELDS.len());
        for field in Todo::FIELDS {
            assert!(attributes.contains_key(field.key), "missing {}", field.key);
        }
    }

    #[test]
    fn test_absent_fields_are_not_keys() {
        let todo = Todo {
            notes: None,
            tags: None,
            completion_date: None,
            ..populated()
        };
        let value = serde_json::to_value(&todo).unwrap();
        let attributes = value["attributes"].as_object().unwrap();
        assert!(!attributes.contains_key("notes"));
        assert!(!attributes.contains_key("tags"));
        assert!(!attributes.contains_key("completion-date"));
    }

    #[test]
    fn test_decode_update_scenario() {
        let value = json!({"type":"to-do","operation":"update","id":"abc123","attributes":{"completed":true}});
        let todo: Todo = serde_json::from_value(value).unwrap();
        assert_eq!(
            todo,
            Todo {
                operation: Operation::Update,
                id: Some("abc123".to_string()),
                completed: Some(true),
                ..Todo::default()
            }
        );
        assert_eq!(todo, Todo { completed: Some(true), ..Todo::update("abc123") });
    }

    #[test]
    fn test_checklist_items_must_be_checklist_envelopes() {
        let value = json!({
            "type": "to-do",
            "attributes": {"checklist-items": [{"type": "heading", "attributes": {}}]}
        });
        let err = crate::codec::envelope::decode::<Todo>(&value, &crate::codec::Iso8601).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { expected: Kind::ChecklistItem, .. }));
    }

    #[test]
    fn test_builders() {
        let todo = Todo::new("Pack")
            .with_notes("for the trip")
            .with_deadline("2024-07-01")
            .with_tags(["Travel"])
            .with_checklist_item(ChecklistItem::new("Passport"))
            .in_list("Vacation")
            .completed();
        assert_eq!(todo.tags, Some(vec!["Travel".to_string()]));
        assert_eq!(todo.checklist_items.as_ref().map(Vec::len), Some(1));
        assert_eq!(todo.completed, Some(true));
        assert_eq!(todo.operation, Operation::Create);
    }
}
