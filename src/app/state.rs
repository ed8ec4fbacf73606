use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::rc::Rc;

use fltk::{app::Sender, dialog, prelude::*, text::TextEditor, window::Window};

use super::buffer_utils::buffer_text;
use super::document::DocumentId;
use super::messages::Message;
use super::metadata::MetadataCache;
use super::note_store::NoteStore;
use super::settings::AppSettings;
use super::suggest::{CursorAnchor, SuggestController, TRIGGER_KEY};
use super::tag_index::build_tag_index;
use crate::ui::dialogs::settings_dialog::show_settings_dialog;
use crate::ui::file_dialogs::{native_open_dialog, native_save_dialog};
use crate::ui::suggest_menu::show_suggestion_menu;

pub struct AppState {
    pub note_store: NoteStore,
    pub metadata: MetadataCache,
    pub tag_index: BTreeSet<String>,
    pub suggest: SuggestController,
    pub editor: TextEditor,
    pub window: Window,
    pub sender: Sender<Message>,
    pub settings: Rc<RefCell<AppSettings>>,
    /// Last directory used in a file open/save dialog.
    pub last_open_directory: Option<String>,
}

impl AppState {
    pub fn new(
        editor: TextEditor,
        window: Window,
        sender: Sender<Message>,
        settings: Rc<RefCell<AppSettings>>,
    ) -> Self {
        let mut note_store = NoteStore::new();
        note_store.add_untitled();

        Self {
            note_store,
            metadata: MetadataCache::new(),
            tag_index: BTreeSet::new(),
            suggest: SuggestController::new(),
            editor,
            window,
            sender,
            settings,
            last_open_directory: None,
        }
    }

    /// Bind the active note's buffer to the editor
    pub fn bind_active_buffer(&mut self) {
        if let Some(doc) = self.note_store.active_doc() {
            self.editor.set_buffer(doc.buffer.clone());
        }
        self.update_window_title();
    }

    /// Update the window title based on the active note
    pub fn update_window_title(&mut self) {
        if let Some(doc) = self.note_store.active_doc() {
            let prefix = if doc.is_dirty() { "*" } else { "" };
            self.window
                .set_label(&format!("{}{} - TagPad", prefix, doc.display_name));
        } else {
            self.window.set_label("Untitled - TagPad");
        }
    }

    /// Switch the editor to display a different note
    pub fn switch_to_document(&mut self, id: DocumentId) {
        // Save current note's cursor position
        if let Some(current) = self.note_store.active_doc_mut() {
            current.cursor_position = self.editor.insert_position();
        }

        self.note_store.set_active(id);

        if let Some(doc) = self.note_store.active_doc() {
            let buffer = doc.buffer.clone();
            let cursor = doc.cursor_position;
            self.editor.set_buffer(buffer);
            self.editor.set_insert_position(cursor);
            self.editor.show_insert_position();
        }

        self.update_window_title();
    }

    pub fn switch_to_next_note(&mut self) {
        if let Some(next_id) = self.note_store.next_doc_id() {
            self.switch_to_document(next_id);
        }
    }

    pub fn switch_to_previous_note(&mut self) {
        if let Some(prev_id) = self.note_store.prev_doc_id() {
            self.switch_to_document(prev_id);
        }
    }

    // --- Tag index ---

    /// Re-scan notes whose buffers changed since the last scan and rebuild
    /// the vault-wide tag set. Runs on every trigger keystroke and on the
    /// periodic rescan timer, so the menu never shows a stale snapshot.
    pub fn refresh_tag_index(&mut self) {
        for doc in self.note_store.documents() {
            if doc.metadata_dirty.get() || !self.metadata.contains(doc.id) {
                let text = buffer_text(&doc.buffer);
                self.metadata.refresh(doc.id, &text);
                doc.metadata_dirty.set(false);
            }
        }
        self.tag_index = build_tag_index(self.metadata.metadata());
    }

    /// Handle one forwarded keystroke. On a trigger match the index is
    /// rebuilt first, then the controller decides whether a menu opens.
    pub fn on_key(&mut self, key: char) {
        if key == TRIGGER_KEY {
            self.refresh_tag_index();
        }

        let editor = self.editor.clone();
        let plan = self
            .suggest
            .on_key(key, move || cursor_anchor(&editor), &self.tag_index);

        if let Some(plan) = plan {
            // popup() blocks until selection or click-away; the chosen
            // entry's message arrives through the channel afterwards
            show_suggestion_menu(&plan, &self.sender);
            self.suggest.menu_dismissed();
        }
    }

    /// Insert the chosen tag at the insert position
    pub fn insert_tag(&mut self, tag: &str) {
        self.editor.insert(tag);
        log::debug!("inserted tag {}", tag);
        self.update_window_title();
    }

    // --- File operations ---

    pub fn open_file(&mut self, path: String) {
        // Remember the parent directory for future open/save dialogs
        if let Some(parent) = std::path::Path::new(&path).parent() {
            self.last_open_directory = Some(parent.to_string_lossy().to_string());
        }
        match fs::read_to_string(&path) {
            Ok(content) => {
                if let Some(existing_id) = self.note_store.find_by_path(&path) {
                    self.switch_to_document(existing_id);
                    return;
                }
                let id = self.note_store.add_from_file(path, &content);
                self.switch_to_document(id);
                self.refresh_tag_index();
            }
            Err(e) => dialog::alert_default(&format!("Error opening file: {}", e)),
        }
    }

    pub fn file_new(&mut self) {
        let id = self.note_store.add_untitled();
        self.switch_to_document(id);
    }

    pub fn file_open(&mut self) {
        if let Some(path) = native_open_dialog(self.last_open_directory.as_deref()) {
            self.open_file(path);
        }
    }

    pub fn file_save(&mut self) {
        let (file_path, text) = {
            if let Some(doc) = self.note_store.active_doc() {
                (doc.file_path.clone(), buffer_text(&doc.buffer))
            } else {
                return;
            }
        };

        if let Some(ref path) = file_path {
            match fs::write(path, &text) {
                Ok(_) => {
                    if let Some(doc) = self.note_store.active_doc_mut() {
                        doc.mark_clean();
                    }
                    self.update_window_title();
                }
                Err(e) => dialog::alert_default(&format!("Error saving file: {}", e)),
            }
        } else {
            self.file_save_as();
        }
    }

    pub fn file_save_as(&mut self) {
        let text = {
            if let Some(doc) = self.note_store.active_doc() {
                buffer_text(&doc.buffer)
            } else {
                return;
            }
        };

        if let Some(path) = native_save_dialog(self.last_open_directory.as_deref()) {
            if let Some(parent) = std::path::Path::new(&path).parent() {
                self.last_open_directory = Some(parent.to_string_lossy().to_string());
            }
            match fs::write(&path, &text) {
                Ok(_) => {
                    if let Some(doc) = self.note_store.active_doc_mut() {
                        doc.file_path = Some(path);
                        doc.update_display_name();
                        doc.mark_clean();
                    }
                    self.update_window_title();
                }
                Err(e) => dialog::alert_default(&format!("Error saving file: {}", e)),
            }
        }
    }

    /// Close the active note, prompting if it has unsaved changes. The
    /// store always keeps at least one note open afterwards.
    pub fn close_note(&mut self) {
        let (id, dirty, name) = match self.note_store.active_doc() {
            Some(doc) => (doc.id, doc.is_dirty(), doc.display_name.clone()),
            None => return,
        };

        if dirty {
            let choice = dialog::choice2_default(
                &format!("\"{}\" has unsaved changes.", name),
                "Save",
                "Discard",
                "Cancel",
            );

            match choice {
                Some(0) => {
                    self.file_save();
                    if let Some(doc) = self.note_store.active_doc() {
                        if doc.is_dirty() {
                            // Save was cancelled; keep the note open
                            return;
                        }
                    }
                }
                Some(1) => {}
                _ => return,
            }
        }

        self.note_store.remove(id);
        self.metadata.remove(id);

        if self.note_store.count() == 0 {
            self.note_store.add_untitled();
        }
        if let Some(active_id) = self.note_store.active_id() {
            self.switch_to_document(active_id);
        }
        self.refresh_tag_index();
    }

    /// Handle quit request. Returns `true` if the app should exit.
    pub fn file_quit(&mut self) -> bool {
        if let Some(current) = self.note_store.active_doc_mut() {
            current.cursor_position = self.editor.insert_position();
        }

        let dirty_docs: Vec<DocumentId> = self
            .note_store
            .documents()
            .iter()
            .filter(|d| d.is_dirty())
            .map(|d| d.id)
            .collect();

        if dirty_docs.is_empty() {
            return true;
        }

        let choice = dialog::choice2_default(
            "You have unsaved changes in one or more notes.",
            "Save All",
            "Quit Without Saving",
            "Cancel",
        );

        match choice {
            Some(0) => {
                for id in dirty_docs {
                    self.switch_to_document(id);
                    self.file_save();
                    if let Some(doc) = self.note_store.active_doc() {
                        if doc.is_dirty() {
                            // Save was cancelled or failed; stay open
                            return false;
                        }
                    }
                }
                true
            }
            Some(1) => true,
            _ => false,
        }
    }

    // --- Settings ---

    pub fn open_settings(&mut self) {
        let current = self.settings.borrow().clone();
        if let Some(new_settings) = show_settings_dialog(&current) {
            if let Err(e) = new_settings.save() {
                log::warn!("Failed to save settings: {}", e);
            }
            *self.settings.borrow_mut() = new_settings;
        }
    }
}

/// Bottom-left corner of the glyph box at the editor's insert position, in
/// window coordinates. `None` when the editor has no buffer bound.
fn cursor_anchor(editor: &TextEditor) -> Option<CursorAnchor> {
    editor.buffer()?;
    let pos = editor.insert_position();
    let (x, y) = editor.position_to_xy(pos);
    Some(CursorAnchor {
        x,
        y: y + editor.text_size(),
    })
}
