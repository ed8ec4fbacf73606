use std::cell::Cell;
use std::rc::Rc;

use fltk::text::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// One open note. The buffer's modify callback flips two flags: the
/// unsaved-changes marker for the title bar and quit prompt, and the
/// metadata-dirty marker that tells the tag cache this note needs a
/// re-scan.
pub struct Document {
    pub id: DocumentId,
    pub buffer: TextBuffer,
    pub file_path: Option<String>,
    pub has_unsaved_changes: Rc<Cell<bool>>,
    pub metadata_dirty: Rc<Cell<bool>>,
    pub display_name: String,
    pub cursor_position: i32,
}

impl Document {
    pub fn new_untitled(id: DocumentId, counter: u32) -> Self {
        let display_name = if counter == 1 {
            "Untitled".to_string()
        } else {
            format!("Untitled {}", counter)
        };

        let buffer = TextBuffer::default();
        Self::with_buffer(id, buffer, None, display_name)
    }

    pub fn new_from_file(id: DocumentId, path: String, content: &str) -> Self {
        let display_name = extract_filename(&path);

        let mut buffer = TextBuffer::default();
        buffer.set_text(content);

        let doc = Self::with_buffer(id, buffer, Some(path), display_name);
        doc.has_unsaved_changes.set(false);
        doc
    }

    fn with_buffer(
        id: DocumentId,
        mut buffer: TextBuffer,
        file_path: Option<String>,
        display_name: String,
    ) -> Self {
        let has_unsaved_changes = Rc::new(Cell::new(false));
        let metadata_dirty = Rc::new(Cell::new(true));

        let changes = has_unsaved_changes.clone();
        let meta = metadata_dirty.clone();
        buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                changes.set(true);
                meta.set(true);
            }
        });

        Self {
            id,
            buffer,
            file_path,
            has_unsaved_changes,
            metadata_dirty,
            display_name,
            cursor_position: 0,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes.get()
    }

    pub fn mark_clean(&self) {
        self.has_unsaved_changes.set(false);
    }

    pub fn update_display_name(&mut self) {
        if let Some(ref path) = self.file_path {
            self.display_name = extract_filename(path);
        }
    }

    pub fn cleanup(&mut self) {
        self.buffer.set_text("");
    }
}

/// Last path component, for window titles
pub fn extract_filename(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename() {
        assert_eq!(extract_filename("/home/user/notes/todo.md"), "todo.md");
        assert_eq!(extract_filename("todo.md"), "todo.md");
    }

    #[test]
    fn test_cleanup_frees_buffer_text() {
        let mut doc = Document::new_from_file(DocumentId(1), "/tmp/a.md".to_string(), "#a #b");
        assert_eq!(doc.buffer.length(), 5);
        doc.cleanup();
        assert_eq!(doc.buffer.length(), 0);
    }

    #[test]
    fn test_untitled_display_names() {
        let first = Document::new_untitled(DocumentId(1), 1);
        let second = Document::new_untitled(DocumentId(2), 2);
        assert_eq!(first.display_name, "Untitled");
        assert_eq!(second.display_name, "Untitled 2");
    }
}
