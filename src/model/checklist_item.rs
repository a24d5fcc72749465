//! Checklist item model.

use chrono::{DateTime, Utc};

use crate::codec::fields::{CANCELED, COMPLETED, COMPLETION_DATE, CREATION_DATE, TITLE};
use crate::codec::{AttributeReader, AttributeWriter, CodecResult, Field, Header, Record, impl_serde};
use crate::model::{Kind, Operation};

/// One entry of a to-do's checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistItem {
    pub operation: Operation,
    pub id: Option<String>,
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub canceled: Option<bool>,
    pub creation_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
}

impl ChecklistItem {
    /// Create a checklist item with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Mark as completed.
    #[must_use]
    pub fn completed(mut self) -> Self {
        self.completed = Some(true);
        self
    }
}

impl Record for ChecklistItem {
    const KIND: Kind = Kind::ChecklistItem;
    const FIELDS: &'static [Field] = &[TITLE, COMPLETED, CANCELED, CREATION_DATE, COMPLETION_DATE];

    fn operation(&self) -> Operation {
        self.operation
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn write_attributes(&self, out: &mut AttributeWriter<'_>) {
        out.text(TITLE, self.title.as_deref());
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
            completed: attrs.flag(COMPLETED)?,
            canceled: attrs.flag(CANCELED)?,
            creation_date: attrs.date(CREATION_DATE)?,
            completion_date: attrs.date(COMPLETION_DATE)?,
        })
    }
}

impl_serde!(record ChecklistItem);
