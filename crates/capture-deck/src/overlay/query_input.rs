use crate::AppCommand;

/// Keys the overlay reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayKey {
    /// Printable text produced by a key press.
    Text(String),
    /// Delete the last character.
    Backspace,
    /// Select the highlighted row.
    Enter,
    /// Close the overlay.
    Escape,
    /// Move the highlight up.
    Up,
    /// Move the highlight down.
    Down,
}

/// The overlay's text field, owned by the UI thread.
///
/// Turns key presses into app commands; every edit carries the full text.
#[derive(Debug, Default)]
pub struct QueryInput {
    text: String,
}

impl QueryInput {
    /// Creates an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the field for a new activation.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Applies one key press.
    ///
    /// Returns `None` when the key changed nothing.
    pub fn apply(&mut self, key: OverlayKey) -> Option<AppCommand> {
        match key {
            OverlayKey::Text(text) => {
                let before = self.text.len();
                self.text.extend(text.chars().filter(|c| !c.is_control()));
                (self.text.len() != before).then(|| self.changed())
            }
            OverlayKey::Backspace => self.text.pop().map(|_| self.changed()),
            OverlayKey::Enter => Some(AppCommand::SelectHighlighted),
            OverlayKey::Escape => Some(AppCommand::DismissSearch),
            OverlayKey::Up => Some(AppCommand::MoveHighlight { delta: -1 }),
            OverlayKey::Down => Some(AppCommand::MoveHighlight { delta: 1 }),
        }
    }

    fn changed(&self) -> AppCommand {
        AppCommand::QueryChanged {
            text: self.text.clone(),
        }
    }
}
