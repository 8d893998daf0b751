//! System settings endpoints. All admin only.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{ApiClient, ApiError};
use crate::models::Setting;

#[derive(Debug, Deserialize)]
struct SettingsEnvelope {
    settings: Vec<Setting>,
}

impl ApiClient {
    pub fn settings(&self) -> Result<Vec<Setting>, ApiError> {
        let envelope: SettingsEnvelope =
            self.send(self.get("/api/settings")?, "Failed to fetch settings")?;
        Ok(envelope.settings)
    }

    /// Upsert the given key/value pairs in one call.
    pub fn update_settings(
        &self,
        values: &BTreeMap<String, String>,
    ) -> Result<Vec<Setting>, ApiError> {
        let envelope: SettingsEnvelope = self.send(
            self.post("/api/settings")?.json(values),
            "Failed to update settings",
        )?;
        Ok(envelope.settings)
    }

    /// Seed the default sender settings. Returns only the settings this
    /// call created; existing keys are untouched.
    pub fn initialize_settings(&self) -> Result<Vec<Setting>, ApiError> {
        let envelope: SettingsEnvelope = self.send(
            self.post("/api/settings/initialize")?,
            "Failed to initialize settings",
        )?;
        Ok(envelope.settings)
    }
}
