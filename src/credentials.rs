use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // local@label(.label)*.tld; the local part is dot-separated runs, so a
    // leading, trailing or doubled dot can't match.
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9_$%-]+(\.[A-Za-z0-9_$%-]+)*@([A-Za-z0-9]+\.)+[A-Za-z]{2,6}$"
    )
    .unwrap();
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols a password may (and must at least once) contain.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-+=?.,;:";

/// Validator input
///
/// Anything that didn't arrive as text is `Other`, and every validator fails
/// closed on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Text(&'a str),
    Other,
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<Option<&'a str>> for Input<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(Input::Other, Input::Text)
    }
}

impl<'a> From<&'a serde_json::Value> for Input<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        value.as_str().into()
    }
}

/// Per-requirement password check results
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct PasswordReport {
    pub length: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub symbol: bool,
    #[serde(rename = "noInvalid")]
    pub no_invalid_chars: bool,
    pub pass: bool,
}

pub fn is_password_symbol(c: char) -> bool {
    PASSWORD_SYMBOLS.contains(c)
}

fn is_allowed_password_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_password_symbol(c)
}

/// Structural email check; no lookup, no normalisation.
pub fn verify_email<'a>(input: impl Into<Input<'a>>) -> bool {
    match input.into() {
        Input::Text(email) => EMAIL_REGEX.is_match(email),
        Input::Other => false,
    }
}

/// Check a password against every requirement
///
/// All checks are computed even when an earlier one fails so the caller can
/// report each missing requirement.
///
/// # Examples
/// ```
/// use roman_calc::credentials::verify_password;
///
/// let report = verify_password("Saranya1!");
/// assert!(report.pass);
///
/// let report = verify_password("Saranya1!_");
/// assert!(!report.no_invalid_chars);
/// assert!(!report.pass);
/// ```
pub fn verify_password<'a>(input: impl Into<Input<'a>>) -> PasswordReport {
    let password = match input.into() {
        Input::Text(password) => password,
        Input::Other => return PasswordReport::default(),
    };

    let length = password.chars().count() >= MIN_PASSWORD_LENGTH;
    let lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let symbol = password.chars().any(is_password_symbol);
    let no_invalid_chars = !password.is_empty() && password.chars().all(is_allowed_password_char);

    PasswordReport {
        length,
        lowercase,
        uppercase,
        digit,
        symbol,
        no_invalid_chars,
        pass: length && lowercase && uppercase && digit && symbol && no_invalid_chars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_emails() {
        assert!(verify_email("saranya@google.com"));
        assert!(verify_email("saranya@osu.google.com"));
        assert!(verify_email("saran.ya$17@osu.co.sg"));
        assert!(verify_email("user@example.com"));
        assert!(verify_email("a-b_c%d@x1.museum"));
    }

    #[test]
    fn rejects_malformed_emails() {
        let rejected = [
            "saranya.com",
            "saranya@",
            "saranya@google.c",
            "hello@example.c",
            "saranya @google.com",
            "saran..ya@google.com",
            ".username@example.com",
            "saranya.@google.com",
            "saranya@@google.com",
            "saranya@google.toolong",
            "saranya@google..com",
            "saranya@.com",
            "@google.com",
            "saranya@google.c0m",
            "",
        ];
        for email in rejected {
            assert!(!verify_email(email), "{:?} should be rejected", email);
        }
    }

    #[test]
    fn email_fails_closed_on_non_text() {
        assert!(!verify_email(Input::Other));
        assert!(!verify_email(&serde_json::json!(12345)));
        assert!(verify_email(&serde_json::json!("saranya@google.com")));
        assert!(!verify_email(None::<&str>));
    }

    #[test]
    fn valid_password_passes_every_check() {
        assert_eq!(
            verify_password("Saranya1!"),
            PasswordReport {
                length: true,
                lowercase: true,
                uppercase: true,
                digit: true,
                symbol: true,
                no_invalid_chars: true,
                pass: true,
            }
        );
        assert!(verify_password("abcABC123!").pass);
        assert!(verify_password("Saranya17!").pass);
    }

    #[test]
    fn each_missing_requirement_is_reported() {
        let short = verify_password("Sara17!");
        assert!(!short.length && !short.pass);

        let no_lower = verify_password("SARANYA1!");
        assert!(!no_lower.lowercase && !no_lower.pass);

        let no_upper = verify_password("saranya1!");
        assert!(!no_upper.uppercase && !no_upper.pass);

        let no_digit = verify_password("Saranya!");
        assert!(!no_digit.digit && !no_digit.pass);

        let no_symbol = verify_password("Saranya1");
        assert!(!no_symbol.symbol && !no_symbol.pass);
        assert!(no_symbol.no_invalid_chars);
    }

    #[test]
    fn invalid_characters_fail() {
        for password in ["Saranya1 !", "Saranya1!_", "abcd1234!A~", "Saranya1!é"] {
            let report = verify_password(password);
            assert!(!report.no_invalid_chars, "{:?}", password);
            assert!(!report.pass, "{:?}", password);
        }
    }

    #[test]
    fn blank_password_fails_everything() {
        let report = verify_password("    ");
        assert_eq!(report, PasswordReport::default());
        assert!(!verify_password("").pass);
    }

    #[test]
    fn non_text_password_fails_closed() {
        assert_eq!(verify_password(Input::Other), PasswordReport::default());
        assert!(!verify_password(&serde_json::json!(12345678)).pass);
    }

    #[test]
    fn report_serializes_with_ui_field_names() {
        let json = serde_json::to_value(verify_password("Saranya1!")).unwrap();
        assert_eq!(json["noInvalid"], serde_json::json!(true));
        assert_eq!(json["pass"], serde_json::json!(true));
    }
}
