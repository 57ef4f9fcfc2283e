//! User intents and the keyboard shortcuts that produce them.

/// Something the reader asked the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Thumbnail click or explicit page jump (1-based)
    GoToPage(usize),
    NextPage,
    PreviousPage,
    /// Signed number of zoom steps
    AdjustZoom(i32),
    SetZoom(f32),
    ResetZoom,
    /// Double-click on the page
    ToggleZoom,
    /// Drag delta while zoomed in
    Pan { dx: f32, dy: f32 },
    /// New viewport size in pixels
    Resize { width: f32, height: f32 },
    /// Close the viewer; handled by whoever owns the session
    Close,
}

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Zero,
    Plus,
    Minus,
}

/// Map a key press to an intent. Zoom shortcuts need Ctrl (Cmd on macOS).
pub fn intent_for_key(key: Key, ctrl: bool) -> Option<Intent> {
    match (key, ctrl) {
        (Key::ArrowRight, _) => Some(Intent::NextPage),
        (Key::ArrowLeft, _) => Some(Intent::PreviousPage),
        (Key::Escape, _) => Some(Intent::Close),
        (Key::Zero, true) => Some(Intent::ResetZoom),
        (Key::Plus, true) => Some(Intent::AdjustZoom(1)),
        (Key::Minus, true) => Some(Intent::AdjustZoom(-1)),
        (Key::Zero | Key::Plus | Key::Minus, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_escape_ignore_ctrl() {
        for ctrl in [false, true] {
            assert_eq!(intent_for_key(Key::ArrowRight, ctrl), Some(Intent::NextPage));
            assert_eq!(
                intent_for_key(Key::ArrowLeft, ctrl),
                Some(Intent::PreviousPage)
            );
            assert_eq!(intent_for_key(Key::Escape, ctrl), Some(Intent::Close));
        }
    }

    #[test]
    fn test_zoom_shortcuts_need_ctrl() {
        assert_eq!(intent_for_key(Key::Zero, true), Some(Intent::ResetZoom));
        assert_eq!(intent_for_key(Key::Plus, true), Some(Intent::AdjustZoom(1)));
        assert_eq!(
            intent_for_key(Key::Minus, true),
            Some(Intent::AdjustZoom(-1))
        );

        assert_eq!(intent_for_key(Key::Zero, false), None);
        assert_eq!(intent_for_key(Key::Plus, false), None);
        assert_eq!(intent_for_key(Key::Minus, false), None);
    }
}
