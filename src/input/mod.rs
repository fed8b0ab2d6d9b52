mod shortcut;

pub use shortcut::{resolve_key, ChannelStep, ColorChannel, EditorCommand, EditorKey};
