// Settings module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::Preferences;
pub use repositories::{MySqlPreferenceStore, PreferenceStore};
pub use services::SettingsService;
