use std::cell::RefCell;
use std::rc::Rc;

use fltk::{app, enums::Event, prelude::*};

use tag_pad::app::messages::Message;
use tag_pad::app::settings::AppSettings;
use tag_pad::app::state::AppState;
use tag_pad::ui::dialogs::about::show_about_dialog;
use tag_pad::ui::main_window::build_main_window;
use tag_pad::ui::menu::build_menu;

/// How often the background timer re-scans open notes for new tags.
const RESCAN_INTERVAL_SECS: f64 = 5.0;

fn main() {
    env_logger::init();

    let settings = Rc::new(RefCell::new(AppSettings::load()));
    log::debug!("loaded settings: {:?}", settings.borrow());

    let fltk_app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window();
    build_menu(&mut widgets.menu, &sender);

    // Keystrokes are forwarded through the channel so the suggestion
    // controller sees every key; returning false keeps the editor's own
    // handling (the trigger character still gets typed). The handler dies
    // with the widget, so there is no global listener to tear down.
    let key_sender = sender;
    widgets.text_editor.handle(move |_, ev| {
        match ev {
            Event::KeyDown => {
                if let Some(ch) = app::event_text().chars().next() {
                    key_sender.send(Message::KeyPressed(ch));
                }
            }
            Event::Push => {
                log::debug!("click at ({}, {})", app::event_x(), app::event_y());
            }
            _ => {}
        }
        false
    });

    // Close button behaves like File/Quit (unsaved-changes prompt included)
    let close_sender = sender;
    widgets.wind.set_callback(move |_| {
        close_sender.send(Message::FileQuit);
    });

    widgets.wind.end();
    widgets.wind.show();

    let mut state = AppState::new(widgets.text_editor, widgets.wind, sender, settings);
    state.bind_active_buffer();
    state.refresh_tag_index();

    // Periodic rescan keeps the tag set fresh even while idle; the timer
    // is cancelled when the app exits
    let timer_sender = sender;
    app::add_timeout3(RESCAN_INTERVAL_SECS, move |handle| {
        timer_sender.send(Message::RescanTags);
        app::repeat_timeout3(RESCAN_INTERVAL_SECS, handle);
    });

    while fltk_app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::FileNew => state.file_new(),
                Message::FileOpen => state.file_open(),
                Message::FileSave => state.file_save(),
                Message::FileSaveAs => state.file_save_as(),
                Message::FileQuit => {
                    if state.file_quit() {
                        fltk_app.quit();
                    }
                }
                Message::NoteClose => state.close_note(),
                Message::NoteNext => state.switch_to_next_note(),
                Message::NotePrevious => state.switch_to_previous_note(),
                Message::RescanTags => {
                    state.refresh_tag_index();
                    log::debug!("rescan: {} tags", state.tag_index.len());
                }
                Message::KeyPressed(ch) => state.on_key(ch),
                Message::InsertTag(tag) => state.insert_tag(&tag),
                Message::OpenSettings => state.open_settings(),
                Message::ShowAbout => show_about_dialog(),
            }
        }
    }
}
