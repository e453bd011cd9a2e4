use super::{authenticate, Tracker};
use crate::error::{Error, Result};
use crate::models::{PreferencesUpdate, UserPreferences};

impl Tracker {
    /// The caller's preferences; first read creates the row with defaults
    pub fn get_user_preferences(&self, caller: Option<&str>) -> Result<UserPreferences> {
        let user = authenticate(caller)?;
        self.db.get_or_create_preferences(user)
    }

    pub fn update_user_preferences(
        &self,
        caller: Option<&str>,
        update: &PreferencesUpdate,
    ) -> Result<UserPreferences> {
        let user = authenticate(caller)?;

        for (field, value) in [
            ("currency", &update.currency),
            ("default_view", &update.default_view),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(Error::InvalidData(format!("{} cannot be empty", field)));
            }
        }

        self.db.get_or_create_preferences(user)?;
        self.db.update_preferences(user, update)?;
        self.db.get_or_create_preferences(user)
    }
}
