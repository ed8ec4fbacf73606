use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuButton, MenuFlag},
    prelude::*,
};

use crate::app::messages::Message;
use crate::app::suggest::MenuPlan;

/// Pop the tag suggestion menu at the plan's anchor point. Each entry emits
/// its own message value through the channel; `popup()` blocks until the
/// user selects an entry or clicks away.
pub fn show_suggestion_menu(plan: &MenuPlan, sender: &Sender<Message>) {
    // 1x1 anchor rectangle so Wayland has a valid popup position
    let mut menu = MenuButton::new(plan.anchor.x, plan.anchor.y, 1, 1, None);
    let sc = Shortcut::None;
    let fl = MenuFlag::Normal;

    for entry in &plan.entries {
        menu.add_emit(&entry.label, sc, fl, *sender, entry.action.clone());
    }

    menu.popup();
}
