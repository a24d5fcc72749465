//! Content hashing for documents.
//!
//! The hash covers the canonical compact encoding (ISO-8601 dates, field
//! table key order), so two documents that decode to the same records hash
//! the same regardless of whitespace, key order or date offsets in the
//! source text.

use sha2::{Digest, Sha256};

use crate::codec::{Codec, CodecResult};
use crate::model::Container;

/// Compute a SHA256 hash of a document's canonical encoding.
///
/// # Errors
///
/// Only serializer faults.
pub fn content_hash(doc: &Container) -> CodecResult<String> {
    let json = Codec::default().to_json(doc)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, Todo};

    #[test]
    fn test_content_hash_deterministic() {
        let doc = Container::new().with(Todo::new("Milk"));

        let hash1 = content_hash(&doc).unwrap();
        let hash2 = content_hash(&doc.clone()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_content_hash_changes_with_content() {
        let a = Container::new().with(Todo::new("Milk"));
        let b = Container::new().with(Project::new("Milk"));

        assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_content_hash_ignores_formatting() {
        let codec = Codec::default();
        let compact = codec
            .parse(r#"[{"type":"to-do","attributes":{"when":"today","title":"Milk"}}]"#)
            .unwrap();
        let spaced = codec
            .parse("[\n  {\"attributes\": {\"title\": \"Milk\", \"when\": \"today\"}, \"type\": \"to-do\"}\n]")
            .unwrap();

        assert_eq!(content_hash(&compact).unwrap(), content_hash(&spaced).unwrap());
    }
}
