/// Options page form: validation, saving, and warnings for stored values
use crate::error::StoreError;
use crate::settings::{Settings, StoredSettings, DEFAULT_BACKGROUND_COLOR};
use crate::storage::SettingsStore;
use crate::validation::{
    is_valid_delay_ms, parse_redirect_delay, validate_background_color, validate_url, ColorEngine,
};
use std::cell::Cell;
use thiserror::Error;

pub const URL_ERROR: &str = "Please enter a valid URL (e.g., https://example.com)";
pub const DELAY_ERROR: &str =
    "Please enter a valid delay (0-60000 milliseconds, non-negative number) (e.g., 0, 1000, 5000)";
pub const COLOR_ERROR: &str =
    "Please enter a valid CSS color (hex: #05060a, rgb: rgb(5,6,10), or named: black)";
pub const SAVE_ERROR: &str = "Failed to save settings. Please try again.";
pub const LOAD_ERROR: &str = "Failed to load settings. Please reload the page.";
pub const SUCCESS_MESSAGE: &str = "Settings saved successfully!";

/// How long the success message stays up
pub const SUCCESS_MESSAGE_MS: u64 = 3000;

/// Quiet period after the last URL keystroke before probing it
pub const URL_PROBE_DEBOUNCE_MS: u64 = 1000;

/// One-click background presets (name, value)
pub const PRESET_COLORS: [(&str, &str); 10] = [
    ("Midnight Blue", "#191970"),
    ("Charcoal", "#36454F"),
    ("Deep Purple", "#2D1B3D"),
    ("Obsidian", "#0B0B0B"),
    ("Dark Navy", "#000080"),
    ("Dark Slate", "#2F4F4F"),
    ("Rich Black", "#05060a"),
    ("Midnight", "#000e34"),
    ("Dark Slate Gray", "#2D2D2D"),
    ("Deep Indigo", "#4B0082"),
];

/// Raw text of the three form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub url: String,
    pub redirect_delay: String,
    pub background_color: String,
}

impl FormValues {
    /// Pre-populate the form from storage, applying the usual defaults
    pub fn from_stored(stored: &StoredSettings) -> FormValues {
        let redirect_delay = stored.redirect_delay.unwrap_or(0.0);

        FormValues {
            url: stored.url.clone().unwrap_or_default(),
            redirect_delay: redirect_delay.to_string(),
            background_color: stored
                .background_color
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
        }
    }
}

/// Per-field error messages; `None` means the field is fine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub url: Option<String>,
    pub redirect_delay: Option<String>,
    pub background_color: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.redirect_delay.is_none() && self.background_color.is_none()
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    #[error("form has invalid fields")]
    Invalid(FieldErrors),

    #[error("failed to save settings: {0}")]
    Storage(#[from] StoreError),
}

/// Run every validator and build the record to save.
/// All failing fields are reported together.
pub fn validate_form(values: &FormValues, engine: &dyn ColorEngine) -> Result<Settings, FieldErrors> {
    let mut errors = FieldErrors::default();

    let url = values.url.trim();
    if !validate_url(url) {
        errors.url = Some(URL_ERROR.to_string());
    }

    let redirect_delay = parse_redirect_delay(&values.redirect_delay).unwrap_or_else(|_| {
        errors.redirect_delay = Some(DELAY_ERROR.to_string());
        0.0
    });

    let color = match values.background_color.trim() {
        "" => DEFAULT_BACKGROUND_COLOR,
        color => color,
    };
    if !validate_background_color(color, engine) {
        errors.background_color = Some(COLOR_ERROR.to_string());
    }

    if errors.is_empty() {
        Ok(Settings::new(url.to_string(), redirect_delay, color.to_string()))
    } else {
        Err(errors)
    }
}

/// Validate the form and, only if every field passes, save it in one write
pub async fn submit<S: SettingsStore>(
    store: &S,
    values: &FormValues,
    engine: &dyn ColorEngine,
) -> Result<Settings, SubmitError> {
    let settings = validate_form(values, engine).map_err(SubmitError::Invalid)?;

    log::info!("[Options] Saving settings: {:?}", settings);
    store.set(&settings).await.map_err(|e| {
        log::error!("[Options] Error saving settings: {}", e);
        SubmitError::Storage(e)
    })?;
    log::info!("[Options] Settings saved successfully");

    Ok(settings)
}

/// Warning about a stored value that no longer validates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredWarning {
    InvalidUrl,
    InvalidDelay,
    InvalidColor,
}

impl StoredWarning {
    pub fn message(&self) -> &'static str {
        match self {
            StoredWarning::InvalidUrl => "Stored URL is invalid. Please update it.",
            StoredWarning::InvalidDelay => "Stored redirect delay is invalid. Using default (0ms).",
            StoredWarning::InvalidColor => "Stored background color is invalid. Using default (#05060a).",
        }
    }
}

/// Non-blocking warnings for whatever is currently in storage
pub fn stored_warnings(stored: &StoredSettings, engine: &dyn ColorEngine) -> Vec<StoredWarning> {
    let mut warnings = Vec::new();

    if let Some(url) = stored.url.as_deref().filter(|url| !url.is_empty()) {
        if !validate_url(url) {
            log::warn!("[Options] Invalid stored URL: {}", url);
            warnings.push(StoredWarning::InvalidUrl);
        }
    }

    if let Some(delay) = stored.redirect_delay {
        if !is_valid_delay_ms(delay) {
            log::warn!("[Options] Invalid stored redirect delay: {}", delay);
            warnings.push(StoredWarning::InvalidDelay);
        }
    }

    if let Some(color) = stored.background_color.as_deref().filter(|color| !color.is_empty()) {
        if !validate_background_color(color, engine) {
            log::warn!("[Options] Invalid stored background color: {}", color);
            warnings.push(StoredWarning::InvalidColor);
        }
    }

    warnings
}

/// Last-write-wins token source for debounced work.
///
/// Each new input takes a token with `next`; delayed work checks
/// `is_current` after every await and drops its result once a newer token
/// has been issued.
#[derive(Debug, Default)]
pub struct Debounce {
    generation: Cell<u32>,
}

impl Debounce {
    pub fn next(&self) -> u32 {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        generation
    }

    pub fn is_current(&self, token: u32) -> bool {
        self.generation.get() == token
    }
}

// Live checks while typing; an empty field never shows an error

pub fn check_url_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || validate_url(trimmed) {
        None
    } else {
        Some(URL_ERROR.to_string())
    }
}

pub fn check_delay_field(value: &str) -> Option<String> {
    if value.is_empty() || parse_redirect_delay(value).is_ok() {
        None
    } else {
        Some(DELAY_ERROR.to_string())
    }
}

pub fn check_color_field(value: &str, engine: &dyn ColorEngine) -> Option<String> {
    if validate_background_color(value, engine) {
        None
    } else {
        Some(COLOR_ERROR.to_string())
    }
}
