use crate::error::ModernizerError;

/// Maps an integer value to a standard (subtractive) Roman numeral.
///
/// The calculator only ever asks by value, so implementations never need to
/// parse numerals themselves.
pub trait Modernizer {
    fn modernize(&self, value: u16) -> Result<String, ModernizerError>;
}

const STANDARD_SYMBOLS: [(u16, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// In-process modernizer
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardModernizer;

impl Modernizer for StandardModernizer {
    fn modernize(&self, value: u16) -> Result<String, ModernizerError> {
        if !(1..=3999).contains(&value) {
            return Err(ModernizerError::OutOfRange(value));
        }
        let mut remaining = value;
        let mut numeral = String::new();
        for (amount, symbol) in STANDARD_SYMBOLS.iter() {
            while remaining >= *amount {
                numeral.push_str(symbol);
                remaining -= amount;
            }
        }
        Ok(numeral)
    }
}

#[cfg(feature = "remote")]
pub use remote::RemoteModernizer;

#[cfg(feature = "remote")]
mod remote {
    use super::Modernizer;
    use crate::error::ModernizerError;
    use log::debug;
    use serde::Deserialize;
    use std::time::Duration;
    use ureq::Agent;

    pub const DEFAULT_BASE_URL: &str = "https://romans.justyy.workers.dev";

    #[derive(Debug, Deserialize)]
    struct RomansResponse {
        result: Option<String>,
    }

    /// Modernizer backed by the public romans conversion API
    ///
    /// Requests are blocking; callers that run inside an async runtime should
    /// move the call onto a blocking thread themselves.
    pub struct RemoteModernizer {
        agent: Agent,
        base_url: String,
    }

    impl RemoteModernizer {
        pub fn new(base_url: impl Into<String>) -> Self {
            let agent = ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(10))
                .build();
            RemoteModernizer {
                agent,
                base_url: base_url.into().trim_end_matches('/').to_string(),
            }
        }

        pub fn endpoint(&self, value: u16) -> String {
            format!("{}/api/romans/?n={}", self.base_url, value)
        }
    }

    /// ureq reports 4xx/5xx as errors; those are bad responses, not transport failures.
    fn call_error(err: ureq::Error) -> ModernizerError {
        match err {
            ureq::Error::Status(code, response) => ModernizerError::BadResponse(format!(
                "HTTP {}: {}",
                code,
                response.status_text()
            )),
            other => ModernizerError::Transport(other.to_string()),
        }
    }

    impl Default for RemoteModernizer {
        fn default() -> Self {
            Self::new(DEFAULT_BASE_URL)
        }
    }

    impl Modernizer for RemoteModernizer {
        fn modernize(&self, value: u16) -> Result<String, ModernizerError> {
            let url = self.endpoint(value);
            debug!("GET {}", url);

            let response = self
                .agent
                .get(&url)
                .call()
                .map_err(call_error)?;

            if response.status() != 200 {
                return Err(ModernizerError::BadResponse(format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.status_text()
                )));
            }

            let body: RomansResponse = response
                .into_json()
                .map_err(|e| ModernizerError::BadResponse(e.to_string()))?;

            body.result
                .filter(|numeral| !numeral.is_empty())
                .ok_or_else(|| ModernizerError::BadResponse("missing result".to_string()))
        }
    }

}
