/// Reachability probe for the configured URL
///
/// Sends a HEAD request in no-cors mode. The response is opaque from an
/// extension origin, so a completed request only proves the host answered;
/// HTTP error statuses look the same as success.
use crate::validation::is_web_url;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{AbortController, RequestInit, RequestMode};

/// Upper bound on a single probe
pub const PROBE_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Not an http(s) URL; nothing to probe
    Skipped,
    Reachable,
    TimedOut,
    Unreachable,
}

impl ProbeOutcome {
    /// Status line shown under the URL field
    pub fn status(&self) -> Option<&'static str> {
        match self {
            ProbeOutcome::Reachable => Some("URL is reachable"),
            _ => None,
        }
    }

    /// Advisory warning; never blocks saving
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            ProbeOutcome::TimedOut => Some("URL validation timed out. The URL may be unreachable."),
            ProbeOutcome::Unreachable => Some("URL is unreachable or network error occurred."),
            _ => None,
        }
    }

    /// Classify a failed fetch by the JS error name
    pub fn from_error_name(name: Option<&str>) -> ProbeOutcome {
        match name {
            Some("AbortError") => ProbeOutcome::TimedOut,
            _ => ProbeOutcome::Unreachable,
        }
    }
}

/// Shared flag telling the timeout task whether the fetch already finished
#[derive(Debug, Clone, Default)]
struct InFlight(Rc<Cell<bool>>);

impl InFlight {
    fn finish(&self) {
        self.0.set(true);
    }

    fn is_pending(&self) -> bool {
        !self.0.get()
    }
}

pub async fn probe_url(url: &str) -> ProbeOutcome {
    let url = url.trim();
    if !is_web_url(url) {
        return ProbeOutcome::Skipped;
    }

    let Some(window) = web_sys::window() else {
        return ProbeOutcome::Unreachable;
    };
    let controller = match AbortController::new() {
        Ok(controller) => controller,
        Err(e) => {
            log::error!("[Options] Could not create AbortController: {:?}", e);
            return ProbeOutcome::Unreachable;
        }
    };

    let init = RequestInit::new();
    init.set_method("HEAD");
    init.set_mode(RequestMode::NoCors);
    init.set_signal(Some(&controller.signal()));

    let in_flight = InFlight::default();
    {
        let controller = controller.clone();
        let in_flight = in_flight.clone();
        spawn_local(async move {
            yew::platform::time::sleep(Duration::from_millis(PROBE_TIMEOUT_MS)).await;
            if in_flight.is_pending() {
                controller.abort();
            }
        });
    }

    log::info!("[Options] Validating URL: {}", url);
    let result = JsFuture::from(window.fetch_with_str_and_init(url, &init)).await;
    in_flight.finish();

    let outcome = match result {
        Ok(_) => ProbeOutcome::Reachable,
        Err(err) => ProbeOutcome::from_error_name(error_name(&err).as_deref()),
    };
    log::info!("[Options] URL validation for {}: {:?}", url, outcome);

    outcome
}

fn error_name(err: &JsValue) -> Option<String> {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert_eq!(ProbeOutcome::from_error_name(Some("AbortError")), ProbeOutcome::TimedOut);
        assert_eq!(ProbeOutcome::from_error_name(Some("TypeError")), ProbeOutcome::Unreachable);
        assert_eq!(ProbeOutcome::from_error_name(None), ProbeOutcome::Unreachable);
    }

    #[test]
    fn test_in_flight_finish_seen_by_timer_copy() {
        let in_flight = InFlight::default();
        let timer_copy = in_flight.clone();

        assert!(timer_copy.is_pending());

        in_flight.finish();

        assert!(!timer_copy.is_pending());
    }

    #[test]
    fn test_messages() {
        assert_eq!(ProbeOutcome::Reachable.status(), Some("URL is reachable"));
        assert_eq!(ProbeOutcome::Reachable.warning(), None);
        assert_eq!(ProbeOutcome::Skipped.status(), None);
        assert_eq!(ProbeOutcome::Skipped.warning(), None);
        assert!(ProbeOutcome::TimedOut.warning().unwrap().contains("timed out"));
        assert!(ProbeOutcome::Unreachable.warning().unwrap().contains("unreachable"));
    }
}
