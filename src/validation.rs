/// Validation for the three settings fields: redirect URL, delay and color
use crate::error::ValidationError;
use crate::settings::MAX_REDIRECT_DELAY_MS;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Dot-separated labels (1-63 chars, no leading/trailing hyphen) ending in an
/// alphabetic TLD of at least two letters
static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    )
    .expect("domain pattern is valid")
});

static HEX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex pattern is valid"));

static RGB_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*[0-9]+\s*,\s*[0-9]+\s*,\s*[0-9]+\s*(,\s*[0-9.]+)?\s*\)$")
        .expect("rgb pattern is valid")
});

static HSL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^hsla?\(\s*[0-9]+\s*,\s*[0-9]+%\s*,\s*[0-9]+%\s*(,\s*[0-9.]+)?\s*\)$")
        .expect("hsl pattern is valid")
});

static COMPUTED_RGB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*([0-9]+)\s*,\s*([0-9]+)\s*,\s*([0-9]+)").expect("computed rgb pattern is valid")
});

/// Something that can tell whether a string is a CSS color, usually the
/// browser's own style engine
pub trait ColorEngine {
    fn accepts(&self, color: &str) -> bool;
}

/// No style engine available; only the built-in patterns apply
pub struct NoColorEngine;

impl ColorEngine for NoColorEngine {
    fn accepts(&self, _color: &str) -> bool {
        false
    }
}

/// Check whether a string is an acceptable redirect target
///
/// Rules:
/// 1. Blank input is rejected
/// 2. Input that fails to parse is only accepted as a relative reference
///    (`/path` or `./path`)
/// 3. http/https URLs must have a dotted hostname ending in an alphabetic TLD
/// 4. Any other scheme (chrome://, file://, data:, ...) is accepted as parsed
///
/// Examples:
/// - https://example.com → valid
/// - https://localhost → invalid (no dot)
/// - chrome://extensions → valid
/// - /start.html → valid
pub fn validate_url(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return false;
    }

    match Url::parse(trimmed) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => parsed
                .host_str()
                .map_or(false, |host| DOMAIN_PATTERN.is_match(host)),
            _ => true,
        },
        Err(_) => trimmed.starts_with('/') || trimmed.starts_with("./"),
    }
}

/// True when the string parses as an http or https URL
pub fn is_web_url(url: &str) -> bool {
    Url::parse(url.trim())
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Parse delay text from the options form into milliseconds.
/// Blank text means "use the default" and yields zero.
pub fn parse_redirect_delay(value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let delay: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::RedirectDelay(value.to_string()))?;

    if is_valid_delay_ms(delay) {
        Ok(delay)
    } else {
        Err(ValidationError::RedirectDelay(value.to_string()))
    }
}

pub fn validate_redirect_delay(value: &str) -> bool {
    parse_redirect_delay(value).is_ok()
}

/// Bounds check shared by form input and stored values
pub fn is_valid_delay_ms(delay: f64) -> bool {
    !delay.is_nan() && (0.0..=MAX_REDIRECT_DELAY_MS).contains(&delay)
}

/// Check whether a string is usable as a CSS background color.
/// Blank input is valid (the default color is used).
pub fn validate_background_color(color: &str, engine: &dyn ColorEngine) -> bool {
    let trimmed = color.trim();
    if trimmed.is_empty() {
        return true;
    }

    engine.accepts(trimmed)
        || HEX_PATTERN.is_match(trimmed)
        || RGB_PATTERN.is_match(trimmed)
        || HSL_PATTERN.is_match(trimmed)
}

/// Convert a color to the `#rrggbb` form a native color picker accepts.
///
/// Handles hex literals and the `rgb(r, g, b)` strings browsers produce when
/// they normalize a color. Returns `None` for anything else.
pub fn color_to_hex(color: &str) -> Option<String> {
    let trimmed = color.trim();

    if HEX_PATTERN.is_match(trimmed) {
        let digits = &trimmed[1..];
        let expanded = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            digits.to_string()
        };
        return Some(format!("#{}", expanded.to_lowercase()));
    }

    let captures = COMPUTED_RGB.captures(trimmed)?;
    let channel = |i: usize| captures.get(i)?.as_str().parse::<u8>().ok();

    Some(format!("#{:02x}{:02x}{:02x}", channel(1)?, channel(2)?, channel(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedColors;

    impl ColorEngine for NamedColors {
        fn accepts(&self, color: &str) -> bool {
            matches!(color, "black" | "red" | "rebeccapurple")
        }
    }

    #[test]
    fn test_validate_url_web() {
        assert!(validate_url("https://example.com"));
        assert!(validate_url("http://www.google.com/search?q=rust"));
        assert!(validate_url("https://news.bbc.co.uk/article"));
        assert!(validate_url("  https://example.com  "));
        assert!(validate_url("https://my-site.example.org:8080/path"));
    }

    #[test]
    fn test_validate_url_rejects_bad_hosts() {
        assert!(!validate_url("https://localhost"));
        assert!(!validate_url("http://localhost:3000"));
        assert!(!validate_url("https://192.168.1.1"));
        assert!(!validate_url("https://example.c0m"));
        assert!(!validate_url("https://example.c"));
        assert!(!validate_url("https://-bad.com"));
        assert!(!validate_url("https://bad-.com"));
    }

    #[test]
    fn test_validate_url_other_schemes() {
        assert!(validate_url("chrome://extensions"));
        assert!(validate_url("file:///home/user/start.html"));
        assert!(validate_url("data:text/html,<h1>Hi</h1>"));
        assert!(validate_url("about:blank"));
    }

    #[test]
    fn test_validate_url_relative() {
        assert!(validate_url("/start.html"));
        assert!(validate_url("./start.html"));
        assert!(!validate_url("start.html"));
    }

    #[test]
    fn test_validate_url_edge_cases() {
        assert!(!validate_url(""));
        assert!(!validate_url("   "));
        assert!(!validate_url("not-a-valid-url"));
        assert!(!validate_url("example.com"));
    }

    #[test]
    fn test_is_web_url() {
        assert!(is_web_url("https://example.com"));
        assert!(is_web_url("http://example.com"));
        assert!(!is_web_url("chrome://newtab"));
        assert!(!is_web_url("/start.html"));
    }

    #[test]
    fn test_validate_redirect_delay_bounds() {
        assert!(validate_redirect_delay("0"));
        assert!(validate_redirect_delay("1000"));
        assert!(validate_redirect_delay("60000"));
        assert!(validate_redirect_delay("250.5"));
        assert!(!validate_redirect_delay("60001"));
        assert!(!validate_redirect_delay("70000"));
        assert!(!validate_redirect_delay("-100"));
    }

    #[test]
    fn test_validate_redirect_delay_text() {
        assert!(validate_redirect_delay(""));
        assert!(validate_redirect_delay("  "));
        assert!(!validate_redirect_delay("abc"));
        assert!(!validate_redirect_delay("12px"));
        assert!(!validate_redirect_delay("NaN"));
        assert!(!validate_redirect_delay("inf"));
    }

    #[test]
    fn test_parse_redirect_delay() {
        assert_eq!(parse_redirect_delay(""), Ok(0.0));
        assert_eq!(parse_redirect_delay(" 2000 "), Ok(2000.0));
        assert_eq!(
            parse_redirect_delay("-1"),
            Err(ValidationError::RedirectDelay("-1".to_string()))
        );
    }

    #[test]
    fn test_is_valid_delay_ms() {
        assert!(is_valid_delay_ms(0.0));
        assert!(is_valid_delay_ms(60000.0));
        assert!(!is_valid_delay_ms(-0.5));
        assert!(!is_valid_delay_ms(f64::NAN));
        assert!(!is_valid_delay_ms(f64::INFINITY));
    }

    #[test]
    fn test_validate_background_color_patterns() {
        let engine = NoColorEngine;

        assert!(validate_background_color("", &engine));
        assert!(validate_background_color("#05060a", &engine));
        assert!(validate_background_color("#FFF", &engine));
        assert!(validate_background_color("rgb(5, 6, 10)", &engine));
        assert!(validate_background_color("rgba(5,6,10,0.5)", &engine));
        assert!(validate_background_color("hsl(120, 50%, 25%)", &engine));
        assert!(validate_background_color("hsla(120,50%,25%,0.3)", &engine));

        assert!(!validate_background_color("#12345", &engine));
        assert!(!validate_background_color("rgb(5, 6)", &engine));
        assert!(!validate_background_color("hsl(120, 50, 25)", &engine));
        assert!(!validate_background_color("black", &engine));
    }

    #[test]
    fn test_validate_background_color_uses_engine() {
        assert!(validate_background_color("black", &NamedColors));
        assert!(validate_background_color(" rebeccapurple ", &NamedColors));
        assert!(!validate_background_color("not-a-color", &NamedColors));
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(color_to_hex("#05060A"), Some("#05060a".to_string()));
        assert_eq!(color_to_hex("#abc"), Some("#aabbcc".to_string()));
        assert_eq!(color_to_hex("rgb(5, 6, 10)"), Some("#05060a".to_string()));
        assert_eq!(color_to_hex("rgba(255, 0, 0, 0.5)"), Some("#ff0000".to_string()));
        assert_eq!(color_to_hex("rgb(300, 0, 0)"), None);
        assert_eq!(color_to_hex("black"), None);
    }
}
