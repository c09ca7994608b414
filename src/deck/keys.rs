use super::controller::{Command, Mode};

/// A key press as reported by the browser (`KeyboardEvent.key` plus modifiers).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl KeyPress {
    pub fn plain(key: &str) -> Self {
        KeyPress {
            key: key.to_string(),
            ..Default::default()
        }
    }

    pub fn ctrl(key: &str) -> Self {
        KeyPress {
            key: key.to_string(),
            ctrl: true,
            ..Default::default()
        }
    }

    fn has_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// Map a key press to a command.
///
/// Ctrl/Cmd+Enter saves and Escape cancels while editing; every other key
/// then belongs to the text buffer. While viewing, unmodified keys navigate
/// (arrows, Page Up/Down, Space, Home, End), `e` opens the editor and `n`
/// adds a slide.
pub fn command_for(press: &KeyPress, mode: Mode) -> Option<Command> {
    let key = press.key.to_lowercase();

    match mode {
        Mode::Editing => match key.as_str() {
            "enter" if press.ctrl || press.meta => Some(Command::Save),
            "escape" if !press.has_modifier() => Some(Command::Cancel),
            _ => None,
        },
        Mode::Viewing => {
            if press.has_modifier() {
                return None;
            }
            match key.as_str() {
                "arrowright" | "pagedown" | " " => Some(Command::Next),
                "arrowleft" | "pageup" => Some(Command::Previous),
                "home" => Some(Command::First),
                "end" => Some(Command::Last),
                "e" => Some(Command::BeginEdit),
                "n" => Some(Command::Add),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_enter_saves_only_while_editing() {
        assert_eq!(command_for(&KeyPress::ctrl("Enter"), Mode::Editing), Some(Command::Save));
        assert_eq!(command_for(&KeyPress::ctrl("Enter"), Mode::Viewing), None);
        assert_eq!(command_for(&KeyPress::plain("Enter"), Mode::Editing), None);

        let cmd_enter = KeyPress {
            key: "Enter".to_string(),
            meta: true,
            ..Default::default()
        };
        assert_eq!(command_for(&cmd_enter, Mode::Editing), Some(Command::Save));
    }

    #[test]
    fn typing_in_the_editor_is_not_a_command() {
        for key in ["e", "n", "ArrowRight", " ", "Home"] {
            assert_eq!(command_for(&KeyPress::plain(key), Mode::Editing), None, "key {key:?}");
        }
        assert_eq!(command_for(&KeyPress::plain("Escape"), Mode::Editing), Some(Command::Cancel));
    }

    #[test]
    fn viewing_keys_navigate() {
        assert_eq!(command_for(&KeyPress::plain("ArrowRight"), Mode::Viewing), Some(Command::Next));
        assert_eq!(command_for(&KeyPress::plain(" "), Mode::Viewing), Some(Command::Next));
        assert_eq!(command_for(&KeyPress::plain("PageUp"), Mode::Viewing), Some(Command::Previous));
        assert_eq!(command_for(&KeyPress::plain("End"), Mode::Viewing), Some(Command::Last));
        assert_eq!(command_for(&KeyPress::plain("E"), Mode::Viewing), Some(Command::BeginEdit));
        assert_eq!(command_for(&KeyPress::plain("n"), Mode::Viewing), Some(Command::Add));
    }

    #[test]
    fn modified_keys_are_left_to_the_browser() {
        assert_eq!(command_for(&KeyPress::ctrl("n"), Mode::Viewing), None);
        let alt_right = KeyPress {
            key: "ArrowRight".to_string(),
            alt: true,
            ..Default::default()
        };
        assert_eq!(command_for(&alt_right, Mode::Viewing), None);
    }
}
