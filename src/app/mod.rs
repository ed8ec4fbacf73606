//! Application layer.
//!
//! # Structure
//!
//! - `document.rs` / `note_store.rs` - open notes and the store the tag
//!   index scans
//! - `metadata.rs` / `tag_index.rs` - per-note tag extraction and the
//!   deduplicated vault-wide tag set
//! - `suggest.rs` - the `@`-trigger state machine that turns the tag set
//!   into a positioned menu plan
//! - `settings.rs` - persisted configuration
//! - `state.rs` - main application coordinator

pub mod buffer_utils;
pub mod document;
pub mod error;
pub mod messages;
pub mod metadata;
pub mod note_store;
pub mod settings;
pub mod state;
pub mod suggest;
pub mod tag_index;

// Re-exports for convenient external access
pub use document::{Document, DocumentId};
pub use error::AppError;
pub use messages::Message;
pub use metadata::{DocumentMetadata, MetadataCache, TagRecord, TagScanner};
pub use note_store::NoteStore;
pub use settings::AppSettings;
pub use suggest::{CursorAnchor, MenuEntry, MenuPlan, SuggestController, SuggestState, TRIGGER_KEY};
pub use tag_index::build_tag_index;
