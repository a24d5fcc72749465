//! Heading model.
//!
//! Headings group to-dos inside a project and only appear in a project's
//! `items` array.

use chrono::{DateTime, Utc};

use crate::codec::fields::{ARCHIVED, COMPLETION_DATE, CREATION_DATE, TITLE};
use crate::codec::{AttributeReader, AttributeWriter, CodecResult, Field, Header, Record, impl_serde};
use crate::model::{Kind, Operation};

/// A section heading inside a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heading {
    pub operation: Operation,
    pub id: Option<String>,
    pub title: Option<String>,
    pub archived: Option<bool>,
    pub creation_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
}

impl Heading {
    /// Create a heading with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Mark as archived.
    #[must_use]
    pub fn archived(mut self) -> Self {
        self.archived = Some(true);
        self
    }
}

impl Record for Heading {
    const KIND: Kind = Kind::Heading;
    const FIELDS: &'static [Field] = &[TITLE, ARCHIVED, CREATION_DATE, COMPLETION_DATE];

    fn operation(&self) -> Operation {
        self.operation
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn write_attributes(&self, out: &mut AttributeWriter<'_>) {
        out.text(TITLE, self.title.as_deref());
        out.flag(ARCHIVED, self.archived);
        out.date(CREATION_DATE, self.creation_date.as_ref());
        out.date(COMPLETION_DATE, self.completion_date.as_ref());
    }

    fn read_attributes(header: Header, attrs: &AttributeReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            operation: header.operation,
            id: header.id,
            title: attrs.text(TITLE)?,
            archived: attrs.flag(ARCHIVED)?,
            creation_date: attrs.date(CREATION_DATE)?,
            completion_date: attrs.date(COMPLETION_DATE)?,
        })
    }
}

impl_serde!(record Heading);
