use std::collections::HashMap;

use regex_lite::Regex;

use super::document::DocumentId;

/// One `#tag` occurrence in a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub tag: String,
}

/// Cached derived summary of a note's content. Only tags for now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub tags: Vec<TagRecord>,
}

/// Extracts `#tag` labels from note text.
///
/// A tag is `#` followed by a letter, digit or underscore, then any run of
/// those plus `-`. `/` is deliberately not a tag character: labels go
/// straight into FLTK menu items, where `/` separates submenus.
pub struct TagScanner {
    re: Regex,
}

impl TagScanner {
    pub fn new() -> Self {
        let re = Regex::new(r"#[A-Za-z0-9_][A-Za-z0-9_-]*").expect("tag pattern is valid");
        Self { re }
    }

    /// Scan note text. Occurrences come back in document order, duplicates
    /// included; deduplication happens in the tag index.
    pub fn scan(&self, text: &str) -> DocumentMetadata {
        let tags = self
            .re
            .find_iter(text)
            .map(|m| TagRecord {
                tag: m.as_str().to_string(),
            })
            .collect();
        DocumentMetadata { tags }
    }
}

impl Default for TagScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-note metadata, keyed by document id. Refreshed lazily: notes flag
/// themselves dirty through their buffer modify callback, and
/// `AppState::refresh_tag_index` re-scans only those.
pub struct MetadataCache {
    scanner: TagScanner,
    entries: HashMap<DocumentId, DocumentMetadata>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self {
            scanner: TagScanner::new(),
            entries: HashMap::new(),
        }
    }

    /// Re-scan one note's text and replace its cached entry.
    pub fn refresh(&mut self, id: DocumentId, text: &str) {
        let meta = self.scanner.scan(text);
        self.entries.insert(id, meta);
    }

    pub fn remove(&mut self, id: DocumentId) {
        self.entries.remove(&id);
    }

    pub fn get(&self, id: DocumentId) -> Option<&DocumentMetadata> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.entries.contains_key(&id)
    }

    /// All cached entries, for the tag index builder. Notes that were never
    /// scanned simply don't appear.
    pub fn metadata(&self) -> impl Iterator<Item = &DocumentMetadata> {
        self.entries.values()
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(meta: &DocumentMetadata) -> Vec<&str> {
        meta.tags.iter().map(|t| t.tag.as_str()).collect()
    }

    #[test]
    fn test_scan_extracts_tags_in_order() {
        let scanner = TagScanner::new();
        let meta = scanner.scan("shopping #errands\nremember #todo and #errands");
        assert_eq!(labels(&meta), vec!["#errands", "#todo", "#errands"]);
    }

    #[test]
    fn test_scan_ignores_bare_hash() {
        let scanner = TagScanner::new();
        let meta = scanner.scan("# heading\n#- nope\nreal #tag-1_two");
        assert_eq!(labels(&meta), vec!["#tag-1_two"]);
    }

    #[test]
    fn test_scan_empty_text() {
        let scanner = TagScanner::new();
        assert!(scanner.scan("").tags.is_empty());
    }

    #[test]
    fn test_cache_refresh_replaces_entry() {
        let mut cache = MetadataCache::new();
        let id = DocumentId(1);

        cache.refresh(id, "#old");
        assert_eq!(labels(cache.get(id).unwrap()), vec!["#old"]);

        cache.refresh(id, "#new #new2");
        assert_eq!(labels(cache.get(id).unwrap()), vec!["#new", "#new2"]);
    }

    #[test]
    fn test_cache_remove() {
        let mut cache = MetadataCache::new();
        let id = DocumentId(7);
        cache.refresh(id, "#x");
        assert!(cache.contains(id));
        cache.remove(id);
        assert!(!cache.contains(id));
        assert_eq!(cache.metadata().count(), 0);
    }
}
