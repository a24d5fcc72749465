//! Project model.
//!
//! A project holds an ordered list of [`ProjectItem`]s, each either a to-do
//! or a heading. Projects cannot nest and carry no checklist of their own.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::codec::fields::{
    ADD_TAGS, APPEND_NOTES, AREA, AREA_ID, CANCELED, COMPLETED, COMPLETION_DATE, CREATION_DATE,
    DEADLINE, ITEMS, NOTES, PREPEND_NOTES, TAGS, TITLE, WHEN,
};
use crate::codec::{
    AttributeReader, AttributeWriter, CodecError, CodecResult, DatePolicy, Field, Header, Record,
    Variant, envelope, impl_serde,
};
use crate::model::{Heading, Kind, Operation, Todo};

/// A project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub operation: Operation,
    pub id: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub prepend_notes: Option<String>,
    pub append_notes: Option<String>,
    pub when: Option<String>,
    pub deadline: Option<String>,
    pub tags: Option<Vec<String>>,
    pub add_tags: Option<Vec<String>>,
    pub area_id: Option<String>,
    pub area: Option<String>,
    pub items: Option<Vec<ProjectItem>>,
    pub completed: Option<bool>,
    pub canceled: Option<bool>,
    pub creation_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
}

impl Project {
    /// Create a project with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Start an update envelope for an existing project.
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

    /// File the project into an area by name.
    #[must_use]
    pub fn in_area(mut self, area: &str) -> Self {
        self.area = Some(area.to_string());
        self
    }

    /// Append a to-do or heading.
    #[must_use]
    pub fn with_item(mut self, item: impl Into<ProjectItem>) -> Self {
        self.items.get_or_insert_with(Vec::new).push(item.into());
        self
    }
}

impl Record for Project {
    const KIND: Kind = Kind::Project;
    const FIELDS: &'static [Field] = &[
        TITLE,
        NOTES,
        PREPEND_NOTES,
        APPEND_NOTES,
        WHEN,
        DEADLINE,
        TAGS,
        ADD_TAGS,
        AREA_ID,
        AREA,
        ITEMS,
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
        out.text(AREA_ID, self.area_id.as_deref());
        out.text(AREA, self.area.as_deref());
        out.variants(ITEMS, self.items.as_deref());
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
            area_id: attrs.text(AREA_ID)?,
            area: attrs.text(AREA)?,
            items: attrs.variants(ITEMS)?,
            completed: attrs.flag(COMPLETED)?,
            canceled: attrs.flag(CANCELED)?,
            creation_date: attrs.date(CREATION_DATE)?,
            completion_date: attrs.date(COMPLETION_DATE)?,
        })
    }
}

impl_serde!(record Project);

/// An entry of a project's `items`: a to-do or a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectItem {
    Todo(Todo),
    Heading(Heading),
}

impl Variant for ProjectItem {
    const CANDIDATES: &'static [Kind] = &[Kind::Todo, Kind::Heading];

    fn kind(&self) -> Kind {
        match self {
            Self::Todo(_) => Kind::Todo,
            Self::Heading(_) => Kind::Heading,
        }
    }

    fn encode(&self, dates: &dyn DatePolicy) -> Value {
        match self {
            Self::Todo(todo) => envelope::encode(todo, dates),
            Self::Heading(heading) => envelope::encode(heading, dates),
        }
    }

    fn decode_as(kind: Kind, value: &Value, dates: &dyn DatePolicy) -> CodecResult<Self> {
        match kind {
            Kind::Todo => envelope::decode(value, dates).map(Self::Todo),
            Kind::Heading => envelope::decode(value, dates).map(Self::Heading),
            other => Err(CodecError::UnknownVariant {
                found: other.as_str().to_string(),
            }),
        }
    }
}

impl From<Todo> for ProjectItem {
    fn from(todo: Todo) -> Self {
        Self::Todo(todo)
    }
}

impl From<Heading> for ProjectItem {
    fn from(heading: Heading) -> Self {
        Self::Heading(heading)
    }
}

impl_serde!(variant ProjectItem);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_go_shopping_scenario() {
        let project = Project::new("Go Shopping")
            .with_item(Heading::new("Dairy"))
            .with_item(Todo::new("Milk"));

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["type"], "project");
        assert_eq!(
            value["attributes"]["items"],
            json!([
                {"type": "heading", "operation": "create", "attributes": {"title": "Dairy"}},
                {"type": "to-do", "operation": "create", "attributes": {"title": "Milk"}},
            ])
        );

        // Each element is a valid envelope of its own kind.
        let items = value["attributes"]["items"].as_array().unwrap();
        assert_eq!(serde_json::from_value::<Heading>(items[0].clone()).unwrap(), Heading::new("Dairy"));
        assert_eq!(serde_json::from_value::<Todo>(items[1].clone()).unwrap(), Todo::new("Milk"));

        assert_eq!(serde_json::from_value::<Project>(value).unwrap(), project);
    }

    #[test]
    fn test_variant_encoding_has_no_wrapper() {
        let direct = serde_json::to_value(Todo::new("Milk")).unwrap();
        let wrapped = serde_json::to_value(ProjectItem::from(Todo::new("Milk"))).unwrap();
        assert_eq!(direct, wrapped);
    }

    #[test]
    fn test_mixed_items_decode_in_order() {
        let value = json!({
            "type": "project",
            "attributes": {"items": [
                {"type": "to-do", "attributes": {"title": "A"}},
                {"type": "heading", "attributes": {"title": "B"}},
                {"type": "to-do", "attributes": {"title": "C"}},
                {"type": "heading", "attributes": {"title": "D"}},
            ]}
        });
        let project: Project = serde_json::from_value(value).unwrap();
        let kinds: Vec<_> = project.items.unwrap().iter().map(Variant::kind).collect();
        assert_eq!(kinds, [Kind::Todo, Kind::Heading, Kind::Todo, Kind::Heading]);
    }

    #[test]
    fn test_malformed_todo_item_is_not_a_heading() {
        let value = json!({"type": "to-do", "attributes": {"title": 1}});
        let err = crate::codec::variant::decode::<ProjectItem>(&value, &crate::codec::Iso8601)
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedField { ref key, .. } if key == "title"));
    }

    #[test]
    fn test_nested_project_is_rejected() {
        let value = json!({
            "type": "project",
            "attributes": {"items": [{"type": "project", "attributes": {}}]}
        });
        let err = serde_json::from_value::<Project>(value).unwrap_err();
        assert!(err.to_string().contains("unknown record type \"project\""));
    }

    #[test]
    fn test_empty_items_are_kept() {
        let project = Project {
            items: Some(Vec::new()),
            ..Project::new("Empty")
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["attributes"]["items"], json!([]));
        assert_eq!(serde_json::from_value::<Project>(value).unwrap(), project);
    }
}
