use std::collections::BTreeSet;

use super::messages::Message;

/// The keystroke that opens the tag suggestion menu.
pub const TRIGGER_KEY: char = '@';

/// Screen position (window coordinates) where the menu anchors: the
/// bottom-left corner of the glyph box at the insert position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorAnchor {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestState {
    Idle,
    MenuOpen,
}

/// One suggestion entry: a label and the message selecting it sends. The
/// action is a plain value rather than a captured closure, so the UI layer
/// can hand it to `add_emit` and ownership stays obvious.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub action: Message,
}

/// Everything the UI needs to pop the suggestion menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPlan {
    pub anchor: CursorAnchor,
    pub entries: Vec<MenuEntry>,
}

/// Two-state trigger controller: `Idle` until the trigger key arrives with
/// usable cursor geometry and a non-empty tag set, `MenuOpen` while the
/// popup is up. Every failure path (wrong key, no geometry, no tags) is a
/// silent no-op.
pub struct SuggestController {
    state: SuggestState,
}

impl SuggestController {
    pub fn new() -> Self {
        Self {
            state: SuggestState::Idle,
        }
    }

    pub fn state(&self) -> SuggestState {
        self.state
    }

    /// Handle one keystroke. The anchor provider is only consulted after
    /// the key matches, mirroring the order the geometry lookup actually
    /// costs something in.
    pub fn on_key(
        &mut self,
        key: char,
        anchor: impl FnOnce() -> Option<CursorAnchor>,
        tags: &BTreeSet<String>,
    ) -> Option<MenuPlan> {
        if key != TRIGGER_KEY {
            return None;
        }

        let anchor = anchor()?;

        if tags.is_empty() {
            return None;
        }

        let entries = tags
            .iter()
            .map(|tag| MenuEntry {
                label: tag.clone(),
                action: Message::InsertTag(tag.clone()),
            })
            .collect();

        self.state = SuggestState::MenuOpen;
        Some(MenuPlan { anchor, entries })
    }

    /// The host popup closed (selection or click-away); back to idle.
    pub fn menu_dismissed(&mut self) {
        self.state = SuggestState::Idle;
    }
}

impl Default for SuggestController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn anchor() -> Option<CursorAnchor> {
        Some(CursorAnchor { x: 120, y: 48 })
    }

    #[test]
    fn test_non_trigger_key_never_opens() {
        let mut ctrl = SuggestController::new();
        let plan = ctrl.on_key('x', anchor, &tags(&["#a"]));
        assert!(plan.is_none());
        assert_eq!(ctrl.state(), SuggestState::Idle);
    }

    #[test]
    fn test_non_trigger_key_skips_geometry_lookup() {
        let mut ctrl = SuggestController::new();
        let plan = ctrl.on_key(
            'a',
            || panic!("anchor provider consulted for a non-trigger key"),
            &tags(&["#a"]),
        );
        assert!(plan.is_none());
    }

    #[test]
    fn test_trigger_with_anchor_opens_menu() {
        let mut ctrl = SuggestController::new();
        let plan = ctrl
            .on_key(TRIGGER_KEY, anchor, &tags(&["#a", "#b"]))
            .expect("trigger with geometry and tags should open");

        assert_eq!(ctrl.state(), SuggestState::MenuOpen);
        assert_eq!(plan.anchor, CursorAnchor { x: 120, y: 48 });

        let labels: Vec<&str> = plan.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["#a", "#b"]);
    }

    #[test]
    fn test_entries_carry_insert_actions() {
        let mut ctrl = SuggestController::new();
        let plan = ctrl.on_key(TRIGGER_KEY, anchor, &tags(&["#todo"])).unwrap();
        assert_eq!(
            plan.entries[0].action,
            Message::InsertTag("#todo".to_string())
        );
    }

    #[test]
    fn test_trigger_without_anchor_is_silent_noop() {
        let mut ctrl = SuggestController::new();
        let plan = ctrl.on_key(TRIGGER_KEY, || None, &tags(&["#a"]));
        assert!(plan.is_none());
        assert_eq!(ctrl.state(), SuggestState::Idle);
    }

    #[test]
    fn test_trigger_with_empty_tag_set_is_noop() {
        let mut ctrl = SuggestController::new();
        let plan = ctrl.on_key(TRIGGER_KEY, anchor, &BTreeSet::new());
        assert!(plan.is_none());
        assert_eq!(ctrl.state(), SuggestState::Idle);
    }

    #[test]
    fn test_dismissal_returns_to_idle() {
        let mut ctrl = SuggestController::new();
        ctrl.on_key(TRIGGER_KEY, anchor, &tags(&["#a"])).unwrap();
        assert_eq!(ctrl.state(), SuggestState::MenuOpen);

        ctrl.menu_dismissed();
        assert_eq!(ctrl.state(), SuggestState::Idle);

        // Reopens fine afterwards
        assert!(ctrl.on_key(TRIGGER_KEY, anchor, &tags(&["#a"])).is_some());
    }
}
