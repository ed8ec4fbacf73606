use std::collections::BTreeSet;

use super::metadata::DocumentMetadata;

/// Build the vault-wide tag set from cached note metadata.
///
/// Pure accumulation: every tag label on every note goes into the set, so
/// duplicates collapse and notes without tags contribute nothing. A
/// `BTreeSet` keeps the suggestion menu order stable between rebuilds.
pub fn build_tag_index<'a>(
    documents: impl IntoIterator<Item = &'a DocumentMetadata>,
) -> BTreeSet<String> {
    let mut tag_set = BTreeSet::new();
    for meta in documents {
        for record in &meta.tags {
            tag_set.insert(record.tag.clone());
        }
    }
    tag_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::metadata::TagRecord;

    fn meta(tags: &[&str]) -> DocumentMetadata {
        DocumentMetadata {
            tags: tags
                .iter()
                .map(|t| TagRecord {
                    tag: t.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        let docs: [&DocumentMetadata; 0] = [];
        let index = build_tag_index(docs);
        assert!(index.is_empty());
    }

    #[test]
    fn test_deduplicates_across_documents() {
        let a = meta(&["#a", "#b"]);
        let b = meta(&["#a", "#c"]);
        let index = build_tag_index([&a, &b]);

        let expected: BTreeSet<String> =
            ["#a", "#b", "#c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(index, expected);
    }

    #[test]
    fn test_untagged_documents_contribute_nothing() {
        let tagged = meta(&["#only"]);
        let untagged = meta(&[]);
        let index = build_tag_index([&untagged, &tagged, &untagged]);
        assert_eq!(index.len(), 1);
        assert!(index.contains("#only"));
    }

    #[test]
    fn test_every_label_comes_from_input() {
        let docs = [meta(&["#x", "#y", "#x"]), meta(&["#z"])];
        let index = build_tag_index(&docs);

        for label in &index {
            let present = docs
                .iter()
                .any(|d| d.tags.iter().any(|t| &t.tag == label));
            assert!(present, "label {} not found in any input document", label);
        }
        assert_eq!(index.len(), 3);
    }
}
