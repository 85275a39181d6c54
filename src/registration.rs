use crate::credentials::{Input, PasswordReport, verify_email, verify_password};
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Registration successful!";
pub const INVALID_EMAIL: &str = "The email address you entered is invalid.";
pub const INVALID_PASSWORD: &str = "The password you entered is invalid.";

/// Highlight state of a form field after submission
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    Valid,
    Invalid,
}

impl FieldState {
    fn from_valid(valid: bool) -> Self {
        if valid {
            FieldState::Valid
        } else {
            FieldState::Invalid
        }
    }
}

/// Result of reviewing a registration form submission
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct RegistrationReview {
    pub email: FieldState,
    pub password: FieldState,
    pub password_report: PasswordReport,
    /// Feedback lines in display order. On success this holds only the
    /// success message.
    pub messages: Vec<String>,
}

impl RegistrationReview {
    pub fn is_accepted(&self) -> bool {
        self.email == FieldState::Valid && self.password == FieldState::Valid
    }
}

fn password_messages(report: &PasswordReport) -> Vec<&'static str> {
    [
        (report.length, "Password needs at least 8 characters."),
        (report.lowercase, "Password needs a lower case letter."),
        (report.uppercase, "Password needs an upper case letter."),
        (report.digit, "Password needs a numeric digit."),
        (report.symbol, "Password needs a symbol."),
        (report.no_invalid_chars, "Password contains invalid characters."),
    ]
    .into_iter()
    .filter(|(ok, _)| !ok)
    .map(|(_, message)| message)
    .collect()
}

/// Review a registration submission
///
/// # Arguments
/// * `email` - Submitted email field
/// * `password` - Submitted password field
///
/// # Returns
/// * `RegistrationReview` - Per-field state plus the feedback messages. The
///   email message comes first, then the general password message, then one
///   line per unmet password requirement.
pub fn review_registration<'a, 'b>(
    email: impl Into<Input<'a>>,
    password: impl Into<Input<'b>>,
) -> RegistrationReview {
    let email_ok = verify_email(email);
    let report = verify_password(password);

    let mut messages = Vec::new();
    if !email_ok {
        messages.push(INVALID_EMAIL.to_string());
    }
    if !report.pass {
        messages.push(INVALID_PASSWORD.to_string());
        messages.extend(password_messages(&report).into_iter().map(String::from));
    }
    if messages.is_empty() {
        messages.push(SUCCESS_MESSAGE.to_string());
    }

    RegistrationReview {
        email: FieldState::from_valid(email_ok),
        password: FieldState::from_valid(report.pass),
        password_report: report,
        messages,
    }
}
