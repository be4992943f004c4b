use super::display_preference::DisplayPreference;
use serde::Deserialize;
use serde::Serialize;

/// Represents all user prefs. Read once at startup and shared with every view.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserPrefs {
    display_preference: DisplayPreference,
}

impl UserPrefs {
    pub fn from_env() -> Self {
        Self {
            display_preference: DisplayPreference::from_env(),
        }
    }

    pub fn display_preference(&self) -> &DisplayPreference {
        &self.display_preference
    }
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            display_preference: DisplayPreference::IDR,
        }
    }
}
