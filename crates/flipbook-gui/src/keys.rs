use eframe::egui;
use flipbook_core::{Intent, Key, intent_for_key};

const BINDINGS: [(egui::Key, Key); 7] = [
    (egui::Key::ArrowLeft, Key::ArrowLeft),
    (egui::Key::ArrowRight, Key::ArrowRight),
    (egui::Key::Escape, Key::Escape),
    (egui::Key::Num0, Key::Zero),
    (egui::Key::Plus, Key::Plus),
    // `=` shares a key with `+` on most layouts
    (egui::Key::Equals, Key::Plus),
    (egui::Key::Minus, Key::Minus),
];

pub fn viewer_key(key: egui::Key) -> Option<Key> {
    BINDINGS
        .iter()
        .find(|(egui_key, _)| *egui_key == key)
        .map(|(_, key)| *key)
}

/// Intents for the keys pressed this frame
pub fn keyboard_intents(ctx: &egui::Context) -> Vec<Intent> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => viewer_key(*key).and_then(|key| intent_for_key(key, modifiers.command)),
                _ => None,
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_zoom_keys() {
        assert_eq!(viewer_key(egui::Key::Equals), Some(Key::Plus));
        assert_eq!(viewer_key(egui::Key::Num0), Some(Key::Zero));
        assert_eq!(viewer_key(egui::Key::A), None);
    }

    #[test]
    fn test_zoom_needs_command_modifier() {
        let key = viewer_key(egui::Key::Minus).unwrap();
        assert_eq!(intent_for_key(key, false), None);
        assert_eq!(intent_for_key(key, true), Some(Intent::AdjustZoom(-1)));
    }
}
