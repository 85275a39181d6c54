use crate::error::NumeralError;
use crate::modernizer::Modernizer;
use crate::numeral;

/// Converts a number as it is being typed.
///
/// The additive rendering follows every keystroke; the modern rendering is
/// only produced on request and goes stale as soon as the input changes.
#[derive(Clone, Debug, Default)]
pub struct LiveConverter {
    input: String,
    additive: String,
    modern: Option<String>,
}

impl LiveConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the typed text and return the additive rendering
    ///
    /// Empty, non-numeric and out-of-range text renders as an empty string.
    pub fn update(&mut self, text: &str) -> &str {
        if text != self.input {
            self.modern = None;
        }
        self.input = text.to_string();
        self.additive = numeral::convert_text_to_numeral(text).unwrap_or_default();
        &self.additive
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn additive(&self) -> &str {
        &self.additive
    }

    pub fn modern(&self) -> Option<&str> {
        self.modern.as_deref()
    }

    /// Ask `modernizer` for the standard rendering of the current input.
    ///
    /// Returns `Ok(None)` without contacting the modernizer when nothing has
    /// been typed.
    pub fn convert_modern(
        &mut self,
        modernizer: &dyn Modernizer,
    ) -> Result<Option<&str>, NumeralError> {
        if self.input.trim().is_empty() {
            self.modern = None;
            return Ok(None);
        }
        let value = numeral::check_range(numeral::parse_arabic(&self.input)?)?;
        let modern = modernizer.modernize(value as u16)?;
        self.modern = Some(modern);
        Ok(self.modern.as_deref())
    }
}
