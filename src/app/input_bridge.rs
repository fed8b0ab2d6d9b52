use crate::input::EditorKey;

/// Maps a GDK keyval to the editor's key vocabulary. Case is preserved so
/// color channel keys can tell increase from decrease.
pub(super) fn editor_key(key: gtk4::gdk::Key) -> Option<EditorKey> {
    match key {
        gtk4::gdk::Key::Up | gtk4::gdk::Key::KP_Up => Some(EditorKey::Up),
        gtk4::gdk::Key::Down | gtk4::gdk::Key::KP_Down => Some(EditorKey::Down),
        gtk4::gdk::Key::Delete | gtk4::gdk::Key::KP_Delete => Some(EditorKey::Delete),
        gtk4::gdk::Key::BackSpace => Some(EditorKey::Backspace),
        _ => key
            .to_unicode()
            .filter(|character| !character.is_control())
            .map(EditorKey::Character),
    }
}
