//! Decoding of closed variants that share one JSON slot.
//!
//! A variant is written exactly like the record it holds, so decoding has to
//! look at the discriminant. The `type` key is read once as a plain string
//! and matched against the variant's candidate kinds in priority order; the
//! first match decodes the whole envelope and any error it raises is final.

use serde_json::Value;

use super::Variant;
use super::date::DatePolicy;
use super::envelope;
use super::types::{CodecError, CodecResult};
use crate::model::Kind;

/// Pick the candidate kind for an envelope.
///
/// # Errors
///
/// `MissingDiscriminant` when `type` is absent, `UnknownVariant` when no
/// candidate matches.
pub fn select(value: &Value, candidates: &[Kind]) -> CodecResult<Kind> {
    let found = envelope::peek_type(value)?;
    candidates
        .iter()
        .copied()
        .find(|kind| kind.as_str() == found)
        .ok_or_else(|| CodecError::UnknownVariant {
            found: found.to_string(),
        })
}

/// Decode a variant by discriminant inspection.
///
/// # Errors
///
/// See [`select`]; errors from the selected kind's decoder propagate as is.
pub fn decode<V: Variant>(value: &Value, dates: &dyn DatePolicy) -> CodecResult<V> {
    let kind = select(value, V::CANDIDATES)?;
    tracing::debug!(%kind, "selected variant candidate");
    V::decode_as(kind, value, dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::date::Iso8601;
    use crate::model::{ContainerItem, Heading, ProjectItem, Todo};
    use serde_json::json;

    #[test]
    fn test_select_follows_candidates() {
        let todo = json!({"type": "to-do", "attributes": {}});
        let heading = json!({"type": "heading", "attributes": {}});

        assert_eq!(select(&todo, ProjectItem::CANDIDATES).unwrap(), Kind::Todo);
        assert_eq!(select(&heading, ProjectItem::CANDIDATES).unwrap(), Kind::Heading);
        assert!(matches!(
            select(&heading, ContainerItem::CANDIDATES),
            Err(CodecError::UnknownVariant { ref found }) if found == "heading"
        ));
    }

    #[test]
    fn test_decode_picks_kind_from_tag() {
        let items = [
            json!({"type": "heading", "attributes": {"title": "Dairy"}}),
            json!({"type": "to-do", "attributes": {"title": "Milk"}}),
        ];
        let decoded: Vec<ProjectItem> = items
            .iter()
            .map(|v| decode(v, &Iso8601).unwrap())
            .collect();

        assert_eq!(
            decoded,
            vec![
                ProjectItem::Heading(Heading::new("Dairy")),
                ProjectItem::Todo(Todo::new("Milk")),
            ]
        );
    }

    #[test]
    fn test_malformed_candidate_is_not_retried() {
        let value = json!({"type": "to-do", "attributes": {"title": 5}});
        let err = decode::<ProjectItem>(&value, &Iso8601).unwrap_err();
        assert!(matches!(err, CodecError::MalformedField { ref key, .. } if key == "title"));
    }

    #[test]
    fn test_unknown_and_missing_tags() {
        let area = json!({"type": "area", "attributes": {"title": "Home"}});
        assert!(matches!(
            decode::<ContainerItem>(&area, &Iso8601),
            Err(CodecError::UnknownVariant { ref found }) if found == "area"
        ));

        let untagged = json!({"attributes": {"title": "Home"}});
        assert!(matches!(
            decode::<ContainerItem>(&untagged, &Iso8601),
            Err(CodecError::MissingDiscriminant)
        ));
    }
}
