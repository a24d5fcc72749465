//! Document checks beyond structural decoding.
//!
//! Decoding only guarantees that a document has the right shape. The checks
//! here flag envelopes that decode fine but are unlikely to do what the
//! author meant: updates without an id, update-only fields on a create, and
//! attribute keys the receiving application would silently ignore.
//!
//! Findings are advisory; `--strict` turns them into an error.

use serde_json::Value;

use crate::codec::fields::{self, Shape};
use crate::codec::{Iso8601, Record, envelope};
use crate::model::{ChecklistItem, Container, ContainerItem, Kind, Operation, Project, ProjectItem, Todo};

/// What a finding is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `operation` is `update` but there is no `id`.
    UpdateWithoutId,
    /// `id` is present but blank.
    EmptyId,
    /// An update-only field is set on a `create` envelope.
    UpdateOnlyField { key: &'static str },
    /// An attribute key the kind does not define.
    UnknownAttribute { key: String, suggestion: Option<&'static str> },
}

/// One advisory result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Location in the document, e.g. `[1].items[0]`.
    pub path: String,
    pub kind: Kind,
    pub rule: Rule,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): ", self.path, self.kind)?;
        match &self.rule {
            Rule::UpdateWithoutId => write!(f, "update without an id"),
            Rule::EmptyId => write!(f, "id is blank"),
            Rule::UpdateOnlyField { key } => {
                write!(f, "\"{key}\" only applies to update operations")
            }
            Rule::UnknownAttribute { key, suggestion: Some(s) } => {
                write!(f, "unknown attribute \"{key}\" (did you mean \"{s}\"?)")
            }
            Rule::UnknownAttribute { key, suggestion: None } => {
                write!(f, "unknown attribute \"{key}\"")
            }
        }
    }
}

/// Check a decoded document.
#[must_use]
pub fn check(doc: &Container) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (index, item) in doc.iter().enumerate() {
        let path = format!("[{index}]");
        match item {
            ContainerItem::Todo(todo) => check_todo(todo, &path, &mut findings),
            ContainerItem::Project(project) => check_project(project, &path, &mut findings),
        }
    }
    findings
}

fn check_project(project: &Project, path: &str, findings: &mut Vec<Finding>) {
    check_record(project, path, findings);
    for (index, item) in project.items.iter().flatten().enumerate() {
        let item_path = format!("{path}.{}[{index}]", fields::ITEMS.key);
        match item {
            ProjectItem::Todo(todo) => check_todo(todo, &item_path, findings),
            ProjectItem::Heading(heading) => check_record(heading, &item_path, findings),
        }
    }
}

fn check_todo(todo: &Todo, path: &str, findings: &mut Vec<Finding>) {
    check_record(todo, path, findings);
    let lists: [(&str, &Option<Vec<ChecklistItem>>); 3] = [
        (fields::CHECKLIST_ITEMS.key, &todo.checklist_items),
        (fields::PREPEND_CHECKLIST_ITEMS.key, &todo.prepend_checklist_items),
        (fields::APPEND_CHECKLIST_ITEMS.key, &todo.append_checklist_items),
    ];
    for (key, list) in lists {
        for (index, item) in list.iter().flatten().enumerate() {
            check_record(item, &format!("{path}.{key}[{index}]"), findings);
        }
    }
}

fn check_record<R: Record>(record: &R, path: &str, findings: &mut Vec<Finding>) {
    let mut push = |rule| {
        findings.push(Finding {
            path: path.to_string(),
            kind: R::KIND,
            rule,
        });
    };

    match (record.operation(), record.id()) {
        (Operation::Update, None) => push(Rule::UpdateWithoutId),
        (_, Some(id)) if id.trim().is_empty() => push(Rule::EmptyId),
        _ => {}
    }

    if record.operation() == Operation::Create {
        let encoded = envelope::encode(record, &Iso8601);
        let Some(attributes) = encoded.get(envelope::ATTRIBUTES_KEY).and_then(Value::as_object)
        else {
            return;
        };
        for key in attributes.keys() {
            if let Some(field) = fields::find(R::FIELDS, key) {
                if field.update_only {
                    push(Rule::UpdateOnlyField { key: field.key });
                }
            }
        }
    }
}

/// Scan raw JSON for attribute keys no record kind defines.
///
/// Decoding ignores such keys, so this works on the undecoded value. Parts
/// of the document that are not well-formed envelopes are skipped; decoding
/// reports those.
#[must_use]
pub fn unknown_attributes(document: &Value) -> Vec<Finding> {
    let mut findings = Vec::new();
    if let Some(elements) = document.as_array() {
        for (index, element) in elements.iter().enumerate() {
            scan_envelope(element, &format!("[{index}]"), &mut findings);
        }
    }
    findings
}

fn scan_envelope(value: &Value, path: &str, findings: &mut Vec<Finding>) {
    let Some(kind) = value
        .get(envelope::TYPE_KEY)
        .and_then(Value::as_str)
        .and_then(Kind::from_wire)
    else {
        return;
    };
    let Some(attributes) = value.get(envelope::ATTRIBUTES_KEY).and_then(Value::as_object) else {
        return;
    };

    let table = kind.fields();
    for (key, nested) in attributes {
        match fields::find(table, key) {
            Some(field) if matches!(field.shape, Shape::Checklist | Shape::Items) => {
                for (index, element) in nested.as_array().into_iter().flatten().enumerate() {
                    scan_envelope(element, &format!("{path}.{key}[{index}]"), findings);
                }
            }
            Some(_) => {}
            None => findings.push(Finding {
                path: path.to_string(),
                kind,
                rule: Rule::UnknownAttribute {
                    key: key.clone(),
                    suggestion: closest(key, table.iter().map(|f| f.key)),
                },
            }),
        }
    }
}

/// Suggest a known record type for a misspelled `type` value.
#[must_use]
pub fn suggest_kind(found: &str) -> Option<&'static str> {
    closest(&found.to_lowercase(), Kind::ALL.iter().map(Kind::as_str))
}

/// Closest candidate within edit distance 3, ties broken by order.
fn closest<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein_distance(input, candidate);
        if dist <= 3 && best.is_none_or(|(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;
    use serde_json::json;

    #[test]
    fn test_clean_document_has_no_findings() {
        let doc = Container::new()
            .with(Todo::new("Milk"))
            .with(Project::new("Trip").with_item(Heading::new("Before")));
        assert!(check(&doc).is_empty());
    }

    #[test]
    fn test_update_without_id() {
        let todo = Todo {
            operation: Operation::Update,
            completed: Some(true),
            ..Todo::default()
        };
        let findings = check(&Container::new().with(todo));
        assert_eq!(
            findings,
            vec![Finding {
                path: "[0]".to_string(),
                kind: Kind::Todo,
                rule: Rule::UpdateWithoutId,
            }]
        );
    }

    #[test]
    fn test_blank_id() {
        let project = Project {
            id: Some("  ".to_string()),
            ..Project::new("Trip")
        };
        let findings = check(&Container::new().with(project));
        assert_eq!(findings[0].rule, Rule::EmptyId);
    }

    #[test]
    fn test_update_only_fields_on_nested_create() {
        let todo = Todo {
            append_notes: Some("more".to_string()),
            ..Todo::new("Milk")
        };
        let doc = Container::new().with(Project::new("Shop").with_item(todo));
        let findings = check(&doc);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path, "[0].items[0]");
        assert_eq!(findings[0].rule, Rule::UpdateOnlyField { key: "append-notes" });
        assert_eq!(
            findings[0].to_string(),
            "[0].items[0] (to-do): \"append-notes\" only applies to update operations"
        );
    }

    #[test]
    fn test_update_only_fields_allowed_on_update() {
        let todo = Todo {
            add_tags: Some(vec!["Later".to_string()]),
            ..Todo::update("abc")
        };
        assert!(check(&Container::new().with(todo)).is_empty());
    }

    #[test]
    fn test_checklist_paths() {
        let item = ChecklistItem {
            operation: Operation::Update,
            ..ChecklistItem::new("Eggs")
        };
        let doc = Container::new().with(Todo::update("t1").with_checklist_item(item));
        let findings = check(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path, "[0].checklist-items[0]");
        assert_eq!(findings[0].kind, Kind::ChecklistItem);
    }

    #[test]
    fn test_unknown_attributes_with_suggestion() {
        let doc = json!([
            {"type": "to-do", "attributes": {"title": "x", "checklist_items": []}},
            {"type": "project", "attributes": {"items": [
                {"type": "heading", "attributes": {"titel": "Dairy", "mood": "ok"}}
            ]}},
        ]);
        let findings = unknown_attributes(&doc);

        assert_eq!(findings.len(), 3);
        assert_eq!(
            findings[0].rule,
            Rule::UnknownAttribute {
                key: "checklist_items".to_string(),
                suggestion: Some("checklist-items"),
            }
        );
        assert_eq!(findings[1].path, "[1].items[0]");
        assert_eq!(
            findings[1].rule,
            Rule::UnknownAttribute { key: "titel".to_string(), suggestion: Some("title") }
        );
        assert_eq!(
            findings[2].rule,
            Rule::UnknownAttribute { key: "mood".to_string(), suggestion: None }
        );
    }

    #[test]
    fn test_suggest_kind() {
        assert_eq!(suggest_kind("todo"), Some("to-do"));
        assert_eq!(suggest_kind("Heading"), Some("heading"));
        assert_eq!(suggest_kind("checklist"), None);
        assert_eq!(suggest_kind("area"), None);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }
}
