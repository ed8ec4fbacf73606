use fltk::{
    button::Button,
    enums::Color,
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::settings::AppSettings;

/// Show settings dialog and return updated settings if user clicked Save.
pub fn show_settings_dialog(current_settings: &AppSettings) -> Option<AppSettings> {
    let mut dialog = Window::default()
        .with_size(350, 160)
        .with_label("Settings")
        .center_screen();
    dialog.make_modal(true);

    Frame::default()
        .with_pos(15, 15)
        .with_size(320, 25)
        .with_label("Setting #1:")
        .with_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);

    let mut setting_input = Input::default().with_pos(30, 45).with_size(290, 30);
    setting_input.set_value(&current_settings.my_setting);

    let mut info_frame = Frame::default().with_pos(30, 80).with_size(290, 25);
    info_frame.set_label("It's a secret");
    info_frame.set_label_size(11);
    info_frame.set_label_color(Color::from_rgb(100, 100, 100));
    info_frame.set_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);

    let mut save_btn = Button::default().with_pos(150, 115).with_size(90, 30).with_label("Save");
    let mut cancel_btn = Button::default().with_pos(250, 115).with_size(90, 30).with_label("Cancel");

    dialog.end();
    dialog.show();

    let result = Rc::new(RefCell::new(None));
    let result_save = result.clone();
    let result_cancel = result.clone();

    let dialog_save = dialog.clone();
    let input_save = setting_input.clone();
    save_btn.set_callback(move |_| {
        *result_save.borrow_mut() = Some(AppSettings {
            my_setting: input_save.value(),
        });
        dialog_save.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        *result_cancel.borrow_mut() = None;
        dialog_cancel.clone().hide();
    });

    let result_close = result.clone();
    dialog.set_callback(move |w| {
        *result_close.borrow_mut() = None;
        w.hide();
    });

    super::run_dialog(&dialog);

    result.borrow().clone()
}
