/// All messages that can be sent through the FLTK channel.
/// Menu callbacks, the editor's key handler and the rescan timer each send
/// one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    FileQuit,

    // Notes
    NoteClose,
    NoteNext,
    NotePrevious,
    RescanTags,

    // Suggestions
    KeyPressed(char),
    InsertTag(String),

    // Settings & Help
    OpenSettings,
    ShowAbout,
}
