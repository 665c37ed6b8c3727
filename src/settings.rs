/// Settings record shared by the new tab page and the options page
use serde::{Deserialize, Serialize};

/// Background shown while waiting to redirect when nothing is configured
pub const DEFAULT_BACKGROUND_COLOR: &str = "#05060a";

/// Longest redirect delay the options page accepts (60 seconds)
pub const MAX_REDIRECT_DELAY_MS: f64 = 60_000.0;

/// Keys read from chrome.storage.local
pub const SETTINGS_KEYS: [&str; 3] = ["url", "redirectDelay", "backgroundColor"];

/// A validated, fully defaulted settings record as written by the options page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub url: String,
    pub redirect_delay: f64,
    pub background_color: String,
}

impl Settings {
    pub fn new(url: String, redirect_delay: f64, background_color: String) -> Settings {
        Settings {
            url,
            redirect_delay,
            background_color,
        }
    }
}

/// Raw record as it comes back from storage; any key may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredSettings {
    pub url: Option<String>,
    pub redirect_delay: Option<f64>,
    pub background_color: Option<String>,
}

impl StoredSettings {
    /// Stored URL, trimmed, if one is present and non-blank
    pub fn url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Delay actually used by the new tab page: the stored value when it is
    /// within `0..=MAX_REDIRECT_DELAY_MS`, otherwise zero
    pub fn effective_delay(&self) -> f64 {
        match self.redirect_delay {
            Some(delay) if (0.0..=MAX_REDIRECT_DELAY_MS).contains(&delay) => delay,
            _ => 0.0,
        }
    }

    /// Background color actually applied, falling back to the default for
    /// a missing or blank value
    pub fn effective_background_color(&self) -> &str {
        self.background_color
            .as_deref()
            .map(str::trim)
            .filter(|color| !color.is_empty())
            .unwrap_or(DEFAULT_BACKGROUND_COLOR)
    }
}

impl From<&Settings> for StoredSettings {
    fn from(settings: &Settings) -> Self {
        StoredSettings {
            url: Some(settings.url.clone()),
            redirect_delay: Some(settings.redirect_delay),
            background_color: Some(settings.background_color.clone()),
        }
    }
}
