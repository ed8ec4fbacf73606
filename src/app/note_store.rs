use fltk::text::TextBuffer;

use super::document::{Document, DocumentId};

/// The set of open notes. This is the document store the tag index scans:
/// `documents()` lists every note, and the metadata cache keys off each
/// note's id.
pub struct NoteStore {
    documents: Vec<Document>,
    active_id: Option<DocumentId>,
    next_id: u64,
    untitled_counter: u32,
}

impl NoteStore {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            active_id: None,
            next_id: 1,
            untitled_counter: 0,
        }
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_untitled(&mut self) -> DocumentId {
        self.untitled_counter += 1;
        let id = self.next_document_id();
        let doc = Document::new_untitled(id, self.untitled_counter);
        self.documents.push(doc);
        self.active_id = Some(id);
        id
    }

    pub fn add_from_file(&mut self, path: String, content: &str) -> DocumentId {
        let id = self.next_document_id();
        let doc = Document::new_from_file(id, path, content);
        self.documents.push(doc);
        self.active_id = Some(id);
        id
    }

    pub fn active_doc(&self) -> Option<&Document> {
        let active_id = self.active_id?;
        self.documents.iter().find(|d| d.id == active_id)
    }

    pub fn active_doc_mut(&mut self) -> Option<&mut Document> {
        let active_id = self.active_id?;
        self.documents.iter_mut().find(|d| d.id == active_id)
    }

    pub fn active_buffer(&self) -> Option<TextBuffer> {
        self.active_doc().map(|d| d.buffer.clone())
    }

    pub fn set_active(&mut self, id: DocumentId) {
        if self.documents.iter().any(|d| d.id == id) {
            self.active_id = Some(id);
        }
    }

    /// Remove a note by id. Activates the nearest neighbor.
    /// Cleans up the buffer to free memory immediately.
    pub fn remove(&mut self, id: DocumentId) {
        let idx = match self.documents.iter().position(|d| d.id == id) {
            Some(i) => i,
            None => return,
        };
        let mut doc = self.documents.remove(idx);
        doc.cleanup();

        // Activate nearest neighbor
        if self.active_id == Some(id) {
            if self.documents.is_empty() {
                self.active_id = None;
            } else {
                let new_idx = if idx >= self.documents.len() {
                    self.documents.len() - 1
                } else {
                    idx
                };
                self.active_id = Some(self.documents[new_idx].id);
            }
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active_id
    }

    /// Find a note by file path, so opening the same file twice just
    /// activates the existing note.
    pub fn find_by_path(&self, path: &str) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|d| d.file_path.as_deref() == Some(path))
            .map(|d| d.id)
    }

    /// Next note id in order (for cycling)
    pub fn next_doc_id(&self) -> Option<DocumentId> {
        let active_id = self.active_id?;
        let idx = self.documents.iter().position(|d| d.id == active_id)?;
        let next_idx = (idx + 1) % self.documents.len();
        Some(self.documents[next_idx].id)
    }

    /// Previous note id in order (for cycling)
    pub fn prev_doc_id(&self) -> Option<DocumentId> {
        let active_id = self.active_id?;
        let idx = self.documents.iter().position(|d| d.id == active_id)?;
        let prev_idx = if idx == 0 {
            self.documents.len() - 1
        } else {
            idx - 1
        };
        Some(self.documents[prev_idx].id)
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_activates() {
        let mut store = NoteStore::new();
        let a = store.add_untitled();
        assert_eq!(store.active_id(), Some(a));
        let b = store.add_untitled();
        assert_eq!(store.active_id(), Some(b));
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_find_by_path() {
        let mut store = NoteStore::new();
        let id = store.add_from_file("/tmp/a.md".to_string(), "#a");
        store.add_untitled();
        assert_eq!(store.find_by_path("/tmp/a.md"), Some(id));
        assert_eq!(store.find_by_path("/tmp/missing.md"), None);
    }

    #[test]
    fn test_cycling_wraps() {
        let mut store = NoteStore::new();
        let a = store.add_untitled();
        let b = store.add_untitled();
        let c = store.add_untitled();
        assert_eq!(store.active_id(), Some(c));
        assert_eq!(store.next_doc_id(), Some(a));
        assert_eq!(store.prev_doc_id(), Some(b));

        store.set_active(a);
        assert_eq!(store.prev_doc_id(), Some(c));
    }

    #[test]
    fn test_remove_activates_neighbor() {
        let mut store = NoteStore::new();
        let a = store.add_untitled();
        let b = store.add_untitled();
        let c = store.add_untitled();

        store.set_active(b);
        store.remove(b);
        // Successor slides into the removed slot
        assert_eq!(store.active_id(), Some(c));
        assert_eq!(store.count(), 2);

        store.remove(c);
        assert_eq!(store.active_id(), Some(a));
    }

    #[test]
    fn test_remove_inactive_keeps_active() {
        let mut store = NoteStore::new();
        let a = store.add_untitled();
        let b = store.add_untitled();
        store.set_active(b);

        store.remove(a);
        assert_eq!(store.active_id(), Some(b));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_remove_last_leaves_empty_store() {
        let mut store = NoteStore::new();
        let a = store.add_untitled();
        store.remove(a);
        assert_eq!(store.active_id(), None);
        assert_eq!(store.count(), 0);

        // Removing an unknown id is a no-op
        store.remove(a);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_cycling_empty_store() {
        let store = NoteStore::new();
        assert_eq!(store.next_doc_id(), None);
        assert_eq!(store.prev_doc_id(), None);
    }
}
