use fltk::dialog;

const NOTE_FILTER: &str = "*.{md,markdown,txt}";

pub fn native_open_dialog(dir: Option<&str>) -> Option<String> {
    dialog::file_chooser("Open File", NOTE_FILTER, dir.unwrap_or("."), false)
}

pub fn native_save_dialog(dir: Option<&str>) -> Option<String> {
    dialog::file_chooser("Save As", NOTE_FILTER, dir.unwrap_or("."), false)
}
