/// Symbolic key delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Character(char),
    Up,
    Down,
    Delete,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Alpha,
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStep {
    Decrease,
    Increase,
}

impl ChannelStep {
    pub const fn sign(self) -> f32 {
        match self {
            Self::Decrease => -1.0,
            Self::Increase => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Zero-based slot of the construction key (`'1'` is slot 0).
    NewShape(usize),
    RotateCounterClockwise,
    RotateClockwise,
    ZoomOut,
    ZoomIn,
    RaiseSelection,
    LowerSelection,
    DeleteSelection,
    AdjustChannel(ColorChannel, ChannelStep),
}

fn resolve_construction_key(c: char) -> Option<EditorCommand> {
    match c {
        '1'..='9' => c
            .to_digit(10)
            .and_then(|digit| usize::try_from(digit).ok())
            .map(|digit| EditorCommand::NewShape(digit - 1)),
        _ => None,
    }
}

fn resolve_view_key(c: char) -> Option<EditorCommand> {
    match c {
        '[' => Some(EditorCommand::RotateCounterClockwise),
        ']' => Some(EditorCommand::RotateClockwise),
        '-' => Some(EditorCommand::ZoomOut),
        '=' => Some(EditorCommand::ZoomIn),
        _ => None,
    }
}

fn resolve_color_key(c: char) -> Option<EditorCommand> {
    let channel = match c.to_ascii_lowercase() {
        'a' => ColorChannel::Alpha,
        'r' => ColorChannel::Red,
        'g' => ColorChannel::Green,
        'b' => ColorChannel::Blue,
        _ => return None,
    };
    let step = if c.is_ascii_uppercase() {
        ChannelStep::Increase
    } else {
        ChannelStep::Decrease
    };
    Some(EditorCommand::AdjustChannel(channel, step))
}

pub fn resolve_key(key: EditorKey) -> Option<EditorCommand> {
    match key {
        EditorKey::Up => Some(EditorCommand::RaiseSelection),
        EditorKey::Down => Some(EditorCommand::LowerSelection),
        EditorKey::Delete | EditorKey::Backspace => Some(EditorCommand::DeleteSelection),
        EditorKey::Character(c) => resolve_construction_key(c)
            .or_else(|| resolve_view_key(c))
            .or_else(|| resolve_color_key(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_key_maps_digits_to_zero_based_slots() {
        assert_eq!(
            resolve_key(EditorKey::Character('1')),
            Some(EditorCommand::NewShape(0))
        );
        assert_eq!(
            resolve_key(EditorKey::Character('3')),
            Some(EditorCommand::NewShape(2))
        );
        assert_eq!(
            resolve_key(EditorKey::Character('9')),
            Some(EditorCommand::NewShape(8))
        );
        assert_eq!(resolve_key(EditorKey::Character('0')), None);
    }

    #[test]
    fn resolve_key_maps_view_keys() {
        assert_eq!(
            resolve_key(EditorKey::Character('[')),
            Some(EditorCommand::RotateCounterClockwise)
        );
        assert_eq!(
            resolve_key(EditorKey::Character(']')),
            Some(EditorCommand::RotateClockwise)
        );
        assert_eq!(
            resolve_key(EditorKey::Character('-')),
            Some(EditorCommand::ZoomOut)
        );
        assert_eq!(
            resolve_key(EditorKey::Character('=')),
            Some(EditorCommand::ZoomIn)
        );
    }

    #[test]
    fn resolve_key_maps_selection_keys() {
        assert_eq!(
            resolve_key(EditorKey::Up),
            Some(EditorCommand::RaiseSelection)
        );
        assert_eq!(
            resolve_key(EditorKey::Down),
            Some(EditorCommand::LowerSelection)
        );
        assert_eq!(
            resolve_key(EditorKey::Delete),
            Some(EditorCommand::DeleteSelection)
        );
        assert_eq!(
            resolve_key(EditorKey::Backspace),
            Some(EditorCommand::DeleteSelection)
        );
    }

    #[test]
    fn resolve_key_maps_color_case_to_step_direction() {
        let cases = [
            ('a', ColorChannel::Alpha, ChannelStep::Decrease),
            ('A', ColorChannel::Alpha, ChannelStep::Increase),
            ('r', ColorChannel::Red, ChannelStep::Decrease),
            ('R', ColorChannel::Red, ChannelStep::Increase),
            ('g', ColorChannel::Green, ChannelStep::Decrease),
            ('G', ColorChannel::Green, ChannelStep::Increase),
            ('b', ColorChannel::Blue, ChannelStep::Decrease),
            ('B', ColorChannel::Blue, ChannelStep::Increase),
        ];
        for (c, channel, step) in cases {
            assert_eq!(
                resolve_key(EditorKey::Character(c)),
                Some(EditorCommand::AdjustChannel(channel, step)),
                "key {c:?}"
            );
        }
    }

    #[test]
    fn resolve_key_ignores_unknown_characters() {
        for c in ['x', 'Z', ' ', '\n', '+'] {
            assert_eq!(resolve_key(EditorKey::Character(c)), None, "key {c:?}");
        }
    }
}
