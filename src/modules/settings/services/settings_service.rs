use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::settings::models::Preferences;
use crate::modules::settings::repositories::PreferenceStore;

/// Account preferences, backed by an injected store.
pub struct SettingsService {
    store: Arc<dyn PreferenceStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Get the account's preferences; accounts that have never saved
    /// any get the defaults.
    pub async fn get_preferences(&self, account_id: &str) -> Result<Preferences> {
        let preferences = self.store.load(account_id).await?.unwrap_or_default();
        Ok(preferences)
    }

    /// Validate and replace the account's preferences.
    pub async fn update_preferences(
        &self,
        account_id: &str,
        preferences: Preferences,
    ) -> Result<Preferences> {
        preferences.validate().map_err(AppError::validation)?;

        self.store.save(account_id, &preferences).await?;

        tracing::info!(account_id = %account_id, "Preferences updated");

        Ok(preferences)
    }
}
