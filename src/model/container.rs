//! Root document model.
//!
//! A document is a bare JSON array of to-do and project envelopes, in the
//! order the receiving application should process them.

use serde_json::Value;

use crate::codec::{CodecError, CodecResult, DatePolicy, Variant, envelope, impl_serde};
use crate::model::{Kind, Project, Todo};

/// A top-level entry: a to-do or a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerItem {
    Todo(Todo),
    Project(Project),
}

impl Variant for ContainerItem {
    const CANDIDATES: &'static [Kind] = &[Kind::Todo, Kind::Project];

    fn kind(&self) -> Kind {
        match self {
            Self::Todo(_) => Kind::Todo,
            Self::Project(_) => Kind::Project,
        }
    }

    fn encode(&self, dates: &dyn DatePolicy) -> Value {
        match self {
            Self::Todo(todo) => envelope::encode(todo, dates),
            Self::Project(project) => envelope::encode(project, dates),
        }
    }

    fn decode_as(kind: Kind, value: &Value, dates: &dyn DatePolicy) -> CodecResult<Self> {
        match kind {
            Kind::Todo => envelope::decode(value, dates).map(Self::Todo),
            Kind::Project => envelope::decode(value, dates).map(Self::Project),
            other => Err(CodecError::UnknownVariant {
                found: other.as_str().to_string(),
            }),
        }
    }
}

impl From<Todo> for ContainerItem {
    fn from(todo: Todo) -> Self {
        Self::Todo(todo)
    }
}

impl From<Project> for ContainerItem {
    fn from(project: Project) -> Self {
        Self::Project(project)
    }
}

impl_serde!(variant ContainerItem);

/// The root document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    items: Vec<ContainerItem>,
}

impl Container {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a to-do or project.
    pub fn push(&mut self, item: impl Into<ContainerItem>) {
        self.items.push(item.into());
    }

    /// Builder form of [`Container::push`].
    #[must_use]
    pub fn with(mut self, item: impl Into<ContainerItem>) -> Self {
        self.push(item);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContainerItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn items(&self) -> &[ContainerItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<ContainerItem> {
        self.items
    }
}

impl From<Vec<ContainerItem>> for Container {
    fn from(items: Vec<ContainerItem>) -> Self {
        Self { items }
    }
}

impl FromIterator<ContainerItem> for Container {
    fn from_iter<I: IntoIterator<Item = ContainerItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a ContainerItem;
    type IntoIter = std::slice::Iter<'a, ContainerItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Container {
    type Item = ContainerItem;
    type IntoIter = std::vec::IntoIter<ContainerItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl_serde!(document Container);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use serde_json::json;

    #[test]
    fn test_order_is_preserved() {
        let doc = Container::new()
            .with(Todo::new("A"))
            .with(Project::new("B"))
            .with(Todo::new("C"));

        let codec = Codec::default();
        let back = codec.parse(&codec.to_json(&doc).unwrap()).unwrap();

        let kinds: Vec<_> = back.iter().map(Variant::kind).collect();
        assert_eq!(kinds, [Kind::Todo, Kind::Project, Kind::Todo]);
        assert_eq!(back, doc);
    }

    #[test]
    fn test_encodes_as_bare_array() {
        let doc = Container::new().with(Todo::new("A"));
        let value = Codec::default().encode(&doc);
        assert_eq!(
            value,
            json!([{"type": "to-do", "operation": "create", "attributes": {"title": "A"}}])
        );
    }

    #[test]
    fn test_heading_is_not_top_level() {
        let value = json!([{"type": "heading", "attributes": {"title": "Dairy"}}]);
        assert!(matches!(
            Codec::default().decode(&value),
            Err(CodecError::UnknownVariant { ref found }) if found == "heading"
        ));
    }

    #[test]
    fn test_first_error_fails_whole_document() {
        let value = json!([
            {"type": "to-do", "attributes": {"title": "ok"}},
            {"type": "to-do"},
            {"type": "area", "attributes": {}},
        ]);
        assert!(matches!(
            Codec::default().decode(&value),
            Err(CodecError::MissingAttributes)
        ));
    }

    #[test]
    fn test_collect_and_iterate() {
        let doc: Container = vec![ContainerItem::from(Todo::new("A"))].into_iter().collect();
        assert_eq!(doc.len(), 1);
        assert!(!doc.is_empty());
        assert_eq!((&doc).into_iter().count(), 1);
        assert_eq!(doc.into_items().len(), 1);
    }
}
