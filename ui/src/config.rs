//! Build-time configuration.
//!
//! Values are baked in with `option_env!` when the bundle is built, e.g.
//! `BACKEND_URL=https://events.example.com EMAIL_VERIFICATION=otp trunk build`.

use crate::ticket_gate::Verification;

const FALLBACK_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_REDIRECT_DELAY_MS: u32 = 1500;
const MAX_REDIRECT_DELAY_MS: u32 = 2000;
const DEFAULT_EVENTS_PER_PAGE: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base address of the events service.
    pub backend_url: String,
    /// Whether visitors confirm their email with a one-time passcode.
    pub verification: Verification,
    /// How long the success message stays up before the ticket redirect.
    pub redirect_delay_ms: u32,
    pub events_per_page: usize,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        Self::from_values(
            option_env!("BACKEND_URL"),
            origin.as_deref(),
            option_env!("EMAIL_VERIFICATION"),
            option_env!("REDIRECT_DELAY_MS"),
            option_env!("EVENTS_PER_PAGE"),
        )
    }

    pub fn from_values(
        backend_url: Option<&str>,
        page_origin: Option<&str>,
        verification: Option<&str>,
        redirect_delay_ms: Option<&str>,
        events_per_page: Option<&str>,
    ) -> Self {
        let backend_url = backend_url
            .or(page_origin)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(FALLBACK_BACKEND_URL)
            .trim()
            .to_string();

        let verification = match verification.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("otp") => {
                Verification::Otp
            }
            _ => Verification::Direct,
        };

        let redirect_delay_ms = redirect_delay_ms
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_REDIRECT_DELAY_MS)
            .min(MAX_REDIRECT_DELAY_MS);

        let events_per_page = events_per_page
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|per_page| *per_page > 0)
            .unwrap_or(DEFAULT_EVENTS_PER_PAGE);

        Self {
            backend_url,
            verification,
            redirect_delay_ms,
            events_per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_values(None, None, None, None, None);
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.verification, Verification::Direct);
        assert_eq!(config.redirect_delay_ms, 1500);
        assert_eq!(config.events_per_page, 9);
    }

    #[test]
    fn explicit_backend_wins_over_page_origin() {
        let config = AppConfig::from_values(
            Some("https://api.example.com"),
            Some("https://www.example.com"),
            None,
            None,
            None,
        );
        assert_eq!(config.backend_url, "https://api.example.com");

        let config = AppConfig::from_values(
            None,
            Some("https://www.example.com"),
            None,
            None,
            None,
        );
        assert_eq!(config.backend_url, "https://www.example.com");
    }

    #[test]
    fn parses_verification_and_numbers() {
        let config = AppConfig::from_values(
            None,
            None,
            Some("OTP"),
            Some("250"),
            Some("12"),
        );
        assert_eq!(config.verification, Verification::Otp);
        assert_eq!(config.redirect_delay_ms, 250);
        assert_eq!(config.events_per_page, 12);
    }

    #[test]
    fn bad_numbers_fall_back_and_delay_is_capped() {
        let config = AppConfig::from_values(
            None,
            None,
            Some("sms"),
            Some("60000"),
            Some("0"),
        );
        assert_eq!(config.verification, Verification::Direct);
        assert_eq!(config.redirect_delay_ms, 2000);
        assert_eq!(config.events_per_page, 9);

        let config =
            AppConfig::from_values(None, None, None, Some("soon"), Some("x"));
        assert_eq!(config.redirect_delay_ms, 1500);
        assert_eq!(config.events_per_page, 9);
    }
}
