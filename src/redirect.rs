/// Redirect decision for the new tab page
use crate::settings::StoredSettings;
use crate::storage::SettingsStore;
use crate::validation::validate_url;
use std::time::Duration;

pub const NO_VALID_URL_MESSAGE: &str = "No valid URL configured. Please set a URL in the extension options.";

pub const LOAD_ERROR_MESSAGE: &str = "Error loading settings. Please check the extension configuration.";

/// What the new tab page does once settings are loaded
#[derive(Debug, Clone, PartialEq)]
pub enum RedirectDecision {
    Error(String),
    Immediate { url: String },
    Delayed { url: String, delay: Duration },
}

/// Observable state of the new tab page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPhase {
    Loading,
    Error,
    ImmediateRedirect,
    DelayedRedirect,
}

impl RedirectDecision {
    pub fn phase(&self) -> RedirectPhase {
        match self {
            RedirectDecision::Error(_) => RedirectPhase::Error,
            RedirectDecision::Immediate { .. } => RedirectPhase::ImmediateRedirect,
            RedirectDecision::Delayed { .. } => RedirectPhase::DelayedRedirect,
        }
    }
}

/// Everything the redirect logic needs from the page it runs on
#[allow(async_fn_in_trait)]
pub trait RedirectSurface {
    fn apply_background(&self, color: &str);
    fn set_loading_visible(&self, visible: bool);
    fn show_error(&self, message: &str);
    fn navigate(&self, url: &str);
    async fn sleep(&self, delay: Duration);
}

/// Decide where to go based on the stored settings
pub fn decide(stored: &StoredSettings) -> RedirectDecision {
    let url = match stored.url() {
        Some(url) if validate_url(url) => url.to_string(),
        _ => return RedirectDecision::Error(NO_VALID_URL_MESSAGE.to_string()),
    };

    if let Some(delay) = stored.redirect_delay {
        if delay != stored.effective_delay() {
            log::warn!("[NewTab] Ignoring out-of-range redirect delay: {} ms", delay);
        }
    }

    match Duration::try_from_secs_f64(stored.effective_delay() / 1000.0) {
        Ok(delay) if !delay.is_zero() => RedirectDecision::Delayed { url, delay },
        _ => RedirectDecision::Immediate { url },
    }
}

/// Load settings and carry out the redirect decision on `surface`.
///
/// The background is applied before the URL is checked. A delayed redirect
/// always fires once scheduled. Returns the phase the page ended in.
pub async fn run_redirect<S, U>(store: &S, surface: &U) -> RedirectPhase
where
    S: SettingsStore,
    U: RedirectSurface,
{
    log::info!("[NewTab] Loading settings from storage...");

    let stored = match store.get().await {
        Ok(stored) => stored,
        Err(e) => {
            log::error!("[NewTab] Error loading settings: {}", e);
            surface.show_error(LOAD_ERROR_MESSAGE);
            return RedirectPhase::Error;
        }
    };

    let color = stored.effective_background_color();
    surface.apply_background(color);
    log::info!("[NewTab] Applied background color: {}", color);

    let decision = decide(&stored);
    match &decision {
        RedirectDecision::Error(message) => {
            log::error!("[NewTab] No valid URL found in settings: {:?}", stored.url);
            surface.show_error(message);
        }
        RedirectDecision::Immediate { url } => {
            log::info!("[NewTab] Redirecting to: {}", url);
            surface.set_loading_visible(false);
            surface.navigate(url);
        }
        RedirectDecision::Delayed { url, delay } => {
            log::info!("[NewTab] Redirecting to: {} after {} ms delay", url, delay.as_millis());
            surface.set_loading_visible(true);
            surface.sleep(*delay).await;
            log::info!("[NewTab] Executing redirect to: {}", url);
            surface.navigate(url);
        }
    }

    decision.phase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Background(String),
        Loading(bool),
        Error(String),
        Navigate(String),
        Sleep(Duration),
    }

    #[derive(Default)]
    struct RecordingSurface {
        events: RefCell<Vec<Event>>,
    }

    impl RecordingSurface {
        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }

        fn navigations(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Navigate(url) => Some(url),
                    _ => None,
                })
                .collect()
        }
    }

    impl RedirectSurface for RecordingSurface {
        fn apply_background(&self, color: &str) {
            self.events.borrow_mut().push(Event::Background(color.to_string()));
        }

        fn set_loading_visible(&self, visible: bool) {
            self.events.borrow_mut().push(Event::Loading(visible));
        }

        fn show_error(&self, message: &str) {
            self.events.borrow_mut().push(Event::Error(message.to_string()));
        }

        fn navigate(&self, url: &str) {
            self.events.borrow_mut().push(Event::Navigate(url.to_string()));
        }

        async fn sleep(&self, delay: Duration) {
            self.events.borrow_mut().push(Event::Sleep(delay));
        }
    }

    fn stored(url: Option<&str>, delay: Option<f64>, color: Option<&str>) -> StoredSettings {
        StoredSettings {
            url: url.map(str::to_string),
            redirect_delay: delay,
            background_color: color.map(str::to_string),
        }
    }

    #[test]
    fn test_decide_missing_url() {
        let decision = decide(&StoredSettings::default());

        assert_eq!(decision, RedirectDecision::Error(NO_VALID_URL_MESSAGE.to_string()));
        assert_eq!(decision.phase(), RedirectPhase::Error);
    }

    #[test]
    fn test_decide_invalid_url() {
        let decision = decide(&stored(Some("not-a-valid-url"), None, None));

        assert!(matches!(decision, RedirectDecision::Error(ref msg) if msg.contains("No valid URL configured")));
    }

    #[test]
    fn test_decide_immediate() {
        assert_eq!(
            decide(&stored(Some("https://example.com"), Some(0.0), None)),
            RedirectDecision::Immediate { url: "https://example.com".to_string() }
        );
        assert_eq!(
            decide(&stored(Some("https://example.com"), None, None)).phase(),
            RedirectPhase::ImmediateRedirect
        );
        assert_eq!(
            decide(&stored(Some("https://example.com"), Some(-50.0), None)).phase(),
            RedirectPhase::ImmediateRedirect
        );
    }

    #[test]
    fn test_decide_delayed() {
        assert_eq!(
            decide(&stored(Some("https://example.com"), Some(2000.0), None)),
            RedirectDecision::Delayed {
                url: "https://example.com".to_string(),
                delay: Duration::from_millis(2000),
            }
        );
    }

    #[test]
    fn test_decide_out_of_range_delay_redirects_immediately() {
        for delay in [1e300, 5e9, 60001.0, f64::INFINITY] {
            assert_eq!(
                decide(&stored(Some("https://example.com"), Some(delay), None)),
                RedirectDecision::Immediate { url: "https://example.com".to_string() },
                "{}",
                delay
            );
        }
    }

    #[test]
    fn test_decide_max_delay_is_kept() {
        assert_eq!(
            decide(&stored(Some("https://example.com"), Some(60000.0), None)),
            RedirectDecision::Delayed {
                url: "https://example.com".to_string(),
                delay: Duration::from_secs(60),
            }
        );
    }

    #[test]
    fn test_empty_store_shows_error_without_navigation() {
        let store = MemoryStore::new();
        let surface = RecordingSurface::default();

        let phase = block_on(run_redirect(&store, &surface));

        assert_eq!(phase, RedirectPhase::Error);
        assert_eq!(
            surface.events(),
            vec![
                Event::Background("#05060a".to_string()),
                Event::Error(NO_VALID_URL_MESSAGE.to_string()),
            ]
        );
        assert!(surface.navigations().is_empty());
    }

    #[test]
    fn test_immediate_redirect_never_shows_loading() {
        let store = MemoryStore::with_settings(stored(Some("https://example.com"), Some(0.0), None));
        let surface = RecordingSurface::default();

        let phase = block_on(run_redirect(&store, &surface));

        assert_eq!(phase, RedirectPhase::ImmediateRedirect);
        assert!(!surface.events().contains(&Event::Loading(true)));
        assert!(!surface.events().iter().any(|e| matches!(e, Event::Sleep(_))));
        assert_eq!(surface.navigations(), vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_delayed_redirect_waits_full_delay() {
        let store = MemoryStore::with_settings(stored(Some("https://example.com"), Some(2000.0), Some("#ff0000")));
        let surface = RecordingSurface::default();

        let phase = block_on(run_redirect(&store, &surface));

        assert_eq!(phase, RedirectPhase::DelayedRedirect);
        assert_eq!(
            surface.events(),
            vec![
                Event::Background("#ff0000".to_string()),
                Event::Loading(true),
                Event::Sleep(Duration::from_millis(2000)),
                Event::Navigate("https://example.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_background_applied_even_when_url_invalid() {
        let store = MemoryStore::with_settings(stored(Some("not-a-valid-url"), None, Some("rgb(1, 2, 3)")));
        let surface = RecordingSurface::default();

        block_on(run_redirect(&store, &surface));

        assert_eq!(surface.events()[0], Event::Background("rgb(1, 2, 3)".to_string()));
        assert!(surface.navigations().is_empty());
    }

    #[test]
    fn test_storage_failure_is_reported() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let surface = RecordingSurface::default();

        let phase = block_on(run_redirect(&store, &surface));

        assert_eq!(phase, RedirectPhase::Error);
        assert_eq!(surface.events(), vec![Event::Error(LOAD_ERROR_MESSAGE.to_string())]);
    }
}
