//! Field tables and the attribute readers/writers that apply them.
//!
//! Every record kind declares a static table of [`Field`]s giving the wire
//! key and JSON shape of each attribute. Encoders and decoders address
//! attributes only through these entries, so the table is the single place
//! a wire key is spelled.
//!
//! All fields in these tables are optional: an absent value is skipped on
//! encode and an absent key decodes to `None`. `null` is never written and is
//! rejected on read.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::date::DatePolicy;
use super::types::{CodecError, CodecResult, json_type_name};
use super::{Record, Variant, envelope, variant};

/// JSON shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A string.
    Text,
    /// A boolean.
    Flag,
    /// A timestamp string produced by the active [`DatePolicy`].
    Date,
    /// An array of strings.
    Tags,
    /// An array of `checklist-item` envelopes.
    Checklist,
    /// An array of project item envelopes (to-do or heading).
    Items,
}

/// One row of a field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Key inside `attributes`.
    pub key: &'static str,
    /// Expected JSON shape.
    pub shape: Shape,
    /// Only meaningful on `update` envelopes.
    pub update_only: bool,
}

impl Field {
    const fn new(key: &'static str, shape: Shape) -> Self {
        Self {
            key,
            shape,
            update_only: false,
        }
    }

    const fn for_update(self) -> Self {
        Self {
            update_only: true,
            ..self
        }
    }
}

pub const TITLE: Field = Field::new("title", Shape::Text);
pub const NOTES: Field = Field::new("notes", Shape::Text);
pub const PREPEND_NOTES: Field = Field::new("prepend-notes", Shape::Text).for_update();
pub const APPEND_NOTES: Field = Field::new("append-notes", Shape::Text).for_update();
pub const WHEN: Field = Field::new("when", Shape::Text);
pub const DEADLINE: Field = Field::new("deadline", Shape::Text);
pub const TAGS: Field = Field::new("tags", Shape::Tags);
pub const ADD_TAGS: Field = Field::new("add-tags", Shape::Tags).for_update();
pub const CHECKLIST_ITEMS: Field = Field::new("checklist-items", Shape::Checklist);
pub const PREPEND_CHECKLIST_ITEMS: Field =
    Field::new("prepend-checklist-items", Shape::Checklist).for_update();
pub const APPEND_CHECKLIST_ITEMS: Field =
    Field::new("append-checklist-items", Shape::Checklist).for_update();
pub const LIST_ID: Field = Field::new("list-id", Shape::Text);
pub const LIST: Field = Field::new("list", Shape::Text);
pub const HEADING_ID: Field = Field::new("heading-id", Shape::Text);
pub const HEADING: Field = Field::new("heading", Shape::Text);
pub const AREA_ID: Field = Field::new("area-id", Shape::Text);
pub const AREA: Field = Field::new("area", Shape::Text);
pub const ITEMS: Field = Field::new("items", Shape::Items);
pub const COMPLETED: Field = Field::new("completed", Shape::Flag);
pub const CANCELED: Field = Field::new("canceled", Shape::Flag);
pub const ARCHIVED: Field = Field::new("archived", Shape::Flag);
pub const CREATION_DATE: Field = Field::new("creation-date", Shape::Date);
pub const COMPLETION_DATE: Field = Field::new("completion-date", Shape::Date);

/// Look up a table row by wire key.
#[must_use]
pub fn find(table: &[Field], key: &str) -> Option<Field> {
    table.iter().copied().find(|field| field.key == key)
}

/// Builds an `attributes` object, skipping absent values.
pub struct AttributeWriter<'a> {
    table: &'static [Field],
    dates: &'a dyn DatePolicy,
    map: Map<String, Value>,
}

impl<'a> AttributeWriter<'a> {
    pub(crate) fn new(table: &'static [Field], dates: &'a dyn DatePolicy) -> Self {
        Self {
            table,
            dates,
            map: Map::new(),
        }
    }

    fn insert(&mut self, field: Field, shape: Shape, value: Value) {
        debug_assert!(self.table.contains(&field), "{} is not in this field table", field.key);
        debug_assert_eq!(field.shape, shape, "{} written with the wrong shape", field.key);
        self.map.insert(field.key.to_string(), value);
    }

    pub fn text(&mut self, field: Field, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(field, Shape::Text, Value::String(value.to_string()));
        }
    }

    pub fn flag(&mut self, field: Field, value: Option<bool>) {
        if let Some(value) = value {
            self.insert(field, Shape::Flag, Value::Bool(value));
        }
    }

    pub fn date(&mut self, field: Field, value: Option<&DateTime<Utc>>) {
        if let Some(value) = value {
            let text = self.dates.format(value);
            self.insert(field, Shape::Date, Value::String(text));
        }
    }

    pub fn tags(&mut self, field: Field, value: Option<&[String]>) {
        if let Some(tags) = value {
            let tags = tags.iter().cloned().map(Value::String).collect();
            self.insert(field, Shape::Tags, Value::Array(tags));
        }
    }

    pub fn records<R: Record>(&mut self, field: Field, value: Option<&[R]>) {
        if let Some(records) = value {
            let encoded = records
                .iter()
                .map(|record| envelope::encode(record, self.dates))
                .collect();
            self.insert(field, Shape::Checklist, Value::Array(encoded));
        }
    }

    pub fn variants<V: Variant>(&mut self, field: Field, value: Option<&[V]>) {
        if let Some(items) = value {
            let encoded = items.iter().map(|item| item.encode(self.dates)).collect();
            self.insert(field, Shape::Items, Value::Array(encoded));
        }
    }

    pub(crate) fn finish(self) -> Map<String, Value> {
        self.map
    }
}

/// Reads typed values out of an `attributes` object.
pub struct AttributeReader<'a> {
    table: &'static [Field],
    dates: &'a dyn DatePolicy,
    map: &'a Map<String, Value>,
}

impl<'a> AttributeReader<'a> {
    pub(crate) fn new(
        table: &'static [Field],
        map: &'a Map<String, Value>,
        dates: &'a dyn DatePolicy,
    ) -> Self {
        Self { table, dates, map }
    }

    fn get(&self, field: Field, shape: Shape) -> CodecResult<Option<&'a Value>> {
        debug_assert!(self.table.contains(&field), "{} is not in this field table", field.key);
        debug_assert_eq!(field.shape, shape, "{} read with the wrong shape", field.key);
        match self.map.get(field.key) {
            None => Ok(None),
            Some(Value::Null) => Err(CodecError::malformed(
                field.key,
                "null is not allowed; omit the key instead",
            )),
            Some(value) => Ok(Some(value)),
        }
    }

    fn array(&self, field: Field, shape: Shape) -> CodecResult<Option<&'a Vec<Value>>> {
        match self.get(field, shape)? {
            None => Ok(None),
            Some(Value::Array(values)) => Ok(Some(values)),
            Some(other) => Err(expected(field, "an array", other)),
        }
    }

    pub fn text(&self, field: Field) -> CodecResult<Option<String>> {
        match self.get(field, Shape::Text)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(expected(field, "a string", other)),
        }
    }

    pub fn flag(&self, field: Field) -> CodecResult<Option<bool>> {
        match self.get(field, Shape::Flag)? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(expected(field, "a boolean", other)),
        }
    }

    pub fn date(&self, field: Field) -> CodecResult<Option<DateTime<Utc>>> {
        match self.get(field, Shape::Date)? {
            None => Ok(None),
            Some(Value::String(s)) => self
                .dates
                .parse(s)
                .map(Some)
                .map_err(|reason| CodecError::malformed(field.key, reason)),
            Some(other) => Err(expected(field, "a date string", other)),
        }
    }

    pub fn tags(&self, field: Field) -> CodecResult<Option<Vec<String>>> {
        let Some(values) = self.array(field, Shape::Tags)? else {
            return Ok(None);
        };
        values
            .iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::String(s) => Ok(s.clone()),
                other => Err(CodecError::malformed(
                    field.key,
                    format!("element {index}: expected a string, found {}", json_type_name(other)),
                )),
            })
            .collect::<CodecResult<Vec<_>>>()
            .map(Some)
    }

    pub fn records<R: Record>(&self, field: Field) -> CodecResult<Option<Vec<R>>> {
        let Some(values) = self.array(field, Shape::Checklist)? else {
            return Ok(None);
        };
        values
            .iter()
            .map(|value| envelope::decode::<R>(value, self.dates))
            .collect::<CodecResult<Vec<_>>>()
            .map(Some)
    }

    pub fn variants<V: Variant>(&self, field: Field) -> CodecResult<Option<Vec<V>>> {
        let Some(values) = self.array(field, Shape::Items)? else {
            return Ok(None);
        };
        values
            .iter()
            .map(|value| variant::decode::<V>(value, self.dates))
            .collect::<CodecResult<Vec<_>>>()
            .map(Some)
    }

    /// Keys present in the object that the table does not know.
    pub(crate) fn unknown_keys(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let map: &'a Map<String, Value> = self.map;
        let table = self.table;
        map.keys()
            .map(String::as_str)
            .filter(move |key| find(table, key).is_none())
    }
}

fn expected(field: Field, what: &str, found: &Value) -> CodecError {
    CodecError::malformed(
        field.key,
        format!("expected {what}, found {}", json_type_name(found)),
    )
}
