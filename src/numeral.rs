use crate::error::NumeralError;
use crate::modernizer::Modernizer;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_VALUE: i64 = 1;
pub const MAX_VALUE: i64 = 3999;

// Descending order; no subtractive pairs.
const SYMBOLS: [(i64, char); 6] = [
    (1000, 'M'),
    (100, 'C'),
    (50, 'L'),
    (10, 'X'),
    (5, 'V'),
    (1, 'I'),
];

/// Arithmetic operators understood by the engine
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parses both the ASCII forms (`+ - * /`) and the display glyphs (`− × ÷`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" => Some(Operator::Add),
            "-" | "−" => Some(Operator::Subtract),
            "*" | "×" | "x" => Some(Operator::Multiply),
            "/" | "÷" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '−',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    /// Applies the operator to two integers.
    ///
    /// Division truncates toward zero. Overflow is reported as a range error
    /// since such a result could never be re-encoded anyway.
    pub fn apply(&self, lhs: i64, rhs: i64) -> Result<i64, NumeralError> {
        let result = match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Divide => {
                if rhs == 0 {
                    return Err(NumeralError::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        result.ok_or_else(|| NumeralError::Range(format!("{} {} {}", lhs, self.glyph(), rhs)))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// One completed binary operation, every operand in additive form
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CalculationRecord {
    pub lhs: String,
    pub operator: Operator,
    pub rhs: String,
    pub result: String,
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.lhs, self.operator, self.rhs, self.result
        )
    }
}

pub fn check_range(n: i64) -> Result<i64, NumeralError> {
    if (MIN_VALUE..=MAX_VALUE).contains(&n) {
        Ok(n)
    } else {
        Err(NumeralError::Range(n.to_string()))
    }
}

/// Convert an integer to its additive numeral
///
/// Each symbol is repeated as many times as it fits into the remaining value
/// before moving to the next smaller one, so 4 is `IIII` and 9 is `VIIII`.
///
/// # Errors
/// * `NumeralError::Range` if `n` is outside [1, 3999]
///
/// # Examples
/// ```
/// use roman_calc::numeral::convert_to_numeral;
///
/// assert_eq!(convert_to_numeral(2025).unwrap(), "MMXXV");
/// assert_eq!(convert_to_numeral(9).unwrap(), "VIIII");
/// ```
pub fn convert_to_numeral(n: i64) -> Result<String, NumeralError> {
    let mut remaining = check_range(n)?;
    let mut numeral = String::new();

    for (value, symbol) in SYMBOLS.iter() {
        while remaining >= *value {
            numeral.push(*symbol);
            remaining -= value;
        }
    }

    Ok(numeral)
}

/// Parses typed text as an integer; anything that isn't one is a range error.
pub fn parse_arabic(text: &str) -> Result<i64, NumeralError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Err(NumeralError::Range(format!("{:?}", text)));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| NumeralError::Range(format!("{:?}", text)))
}

pub fn convert_text_to_numeral(text: &str) -> Result<String, NumeralError> {
    convert_to_numeral(parse_arabic(text)?)
}

fn symbol_value(symbol: char) -> Option<i64> {
    SYMBOLS
        .iter()
        .find(|(_, s)| *s == symbol)
        .map(|(value, _)| *value)
}

/// Convert an additive numeral back to an integer
///
/// Additive numerals never contain subtractive pairs, so the value is just the
/// sum of the symbols. An empty string sums to 0.
///
/// # Errors
/// * `NumeralError::InvalidSymbol` for any character other than `M C L X V I`
pub fn convert_to_arabic(numeral: &str) -> Result<i64, NumeralError> {
    numeral
        .chars()
        .enumerate()
        .try_fold(0i64, |acc, (position, symbol)| match symbol_value(symbol) {
            Some(value) => Ok(acc + value),
            None => Err(NumeralError::InvalidSymbol { symbol, position }),
        })
}

fn evaluate(a: &str, operator: Operator, b: &str) -> Result<(i64, String), NumeralError> {
    let lhs = convert_to_arabic(a)?;
    let rhs = convert_to_arabic(b)?;
    if operator == Operator::Divide && rhs == 0 {
        return Err(NumeralError::DivisionByZero);
    }
    // Only a divisor may be empty; every other operand must be representable.
    for (numeral, value) in [(a, lhs), (b, rhs)] {
        if check_range(value).is_err() {
            return Err(NumeralError::Range(format!("operand {:?} = {}", numeral, value)));
        }
    }
    let value = operator.apply(lhs, rhs)?;
    // Checked here so a bad result is reported as such, not as a bad input.
    if check_range(value).is_err() {
        return Err(NumeralError::Range(format!(
            "{} {} {} = {}",
            lhs, operator, rhs, value
        )));
    }
    Ok((value, convert_to_numeral(value)?))
}

/// Stateless form of [`NumeralEngine::perform_operation`]; nothing is recorded.
pub fn perform_operation(a: &str, operator: Operator, b: &str) -> Result<String, NumeralError> {
    evaluate(a, operator, b).map(|(_, numeral)| numeral)
}

/// Map an additive numeral to standard subtractive notation
///
/// The collaborator is queried by value, not by the additive string.
pub fn modernize(additive: &str, modernizer: &dyn Modernizer) -> Result<String, NumeralError> {
    let value = check_range(convert_to_arabic(additive)?)?;
    modernizer.modernize(value as u16).map_err(|e| {
        warn!("Modernizer failed for {}: {}", value, e);
        NumeralError::from(e)
    })
}

/// Calculation session holding the append-only operation history.
#[derive(Clone, Debug, Default)]
pub struct NumeralEngine {
    history: Vec<CalculationRecord>,
}

impl NumeralEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a session from previously saved records.
    pub fn with_history(history: Vec<CalculationRecord>) -> Self {
        NumeralEngine { history }
    }

    /// Apply `operator` to two additive numerals and record it
    ///
    /// # Arguments
    /// * `a` - Left operand numeral
    /// * `operator` - Operation to apply
    /// * `b` - Right operand numeral
    ///
    /// # Returns
    /// * `Result<String, NumeralError>` - The result numeral
    ///
    /// # Errors
    /// * `NumeralError::DivisionByZero` if `b` converts to 0 for a division
    /// * `NumeralError::Range` if either operand (other than a zero divisor)
    ///   or the result is outside [1, 3999]
    /// * `NumeralError::InvalidSymbol` if either operand isn't an additive numeral
    ///
    /// Failed operations leave the history untouched.
    pub fn perform_operation(
        &mut self,
        a: &str,
        operator: Operator,
        b: &str,
    ) -> Result<String, NumeralError> {
        let (value, result) = evaluate(a, operator, b).inspect_err(|e| {
            warn!("Rejected {} {} {}: {}", a, operator, b, e);
        })?;

        debug!("{} {} {} = {} ({})", a, operator, b, result, value);
        self.history.push(CalculationRecord {
            lhs: a.to_string(),
            operator,
            rhs: b.to_string(),
            result: result.clone(),
        });
        Ok(result)
    }

    pub fn history(&self) -> &[CalculationRecord] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modernizer::StandardModernizer;

    #[test]
    fn converts_small_values_additively() {
        let cases = [
            (1, "I"),
            (2, "II"),
            (3, "III"),
            (4, "IIII"),
            (5, "V"),
            (8, "VIII"),
            (9, "VIIII"),
            (10, "X"),
            (30, "XXX"),
            (40, "XXXX"),
            (50, "L"),
            (73, "LXXIII"),
            (90, "LXXXX"),
            (100, "C"),
            (232, "CCXXXII"),
            (1000, "M"),
        ];
        for (n, expected) in cases {
            assert_eq!(convert_to_numeral(n).unwrap(), expected, "n = {}", n);
        }
    }

    #[test]
    fn converts_large_values() {
        assert_eq!(convert_to_numeral(2025).unwrap(), "MMXXV");
        assert_eq!(convert_to_numeral(3567).unwrap(), "MMMCCCCCLXVII");
        assert_eq!(convert_to_numeral(999).unwrap(), "CCCCCCCCCLXXXXVIIII");
        assert_eq!(
            convert_to_numeral(3999).unwrap(),
            "MMMCCCCCCCCCLXXXXVIIII"
        );
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(convert_to_numeral(0), Err(NumeralError::Range(_))));
        assert!(matches!(convert_to_numeral(-7), Err(NumeralError::Range(_))));
        assert!(matches!(convert_to_numeral(4000), Err(NumeralError::Range(_))));
        assert!(matches!(convert_to_numeral(5000), Err(NumeralError::Range(_))));
    }

    #[test]
    fn rejects_non_numeric_text() {
        for text in ["x", "saranya", "1.5", "", "  ", "12a"] {
            assert!(
                matches!(convert_text_to_numeral(text), Err(NumeralError::Range(_))),
                "text = {:?}",
                text
            );
        }
        assert_eq!(convert_text_to_numeral(" 12 ").unwrap(), "XII");
    }

    #[test]
    fn output_uses_only_descending_symbols() {
        for n in MIN_VALUE..=MAX_VALUE {
            let numeral = convert_to_numeral(n).unwrap();
            let values: Vec<i64> = numeral.chars().map(|c| symbol_value(c).unwrap()).collect();
            assert!(values.windows(2).all(|w| w[0] >= w[1]), "{}", numeral);
            assert_eq!(convert_to_arabic(&numeral).unwrap(), n);
        }
    }

    #[test]
    fn arabic_sums_symbols() {
        assert_eq!(convert_to_arabic("").unwrap(), 0);
        assert_eq!(convert_to_arabic("IIII").unwrap(), 4);
        assert_eq!(convert_to_arabic("XXXXXXXX").unwrap(), 80);
        assert_eq!(
            convert_to_arabic("XIV"),
            Ok(16),
            "subtractive pairs are just summed"
        );
        assert_eq!(
            convert_to_arabic("XIZ"),
            Err(NumeralError::InvalidSymbol {
                symbol: 'Z',
                position: 2
            })
        );
        assert!(convert_to_arabic("ii").is_err());
    }

    #[test]
    fn operator_parsing() {
        assert_eq!(Operator::from_symbol("+"), Some(Operator::Add));
        assert_eq!(Operator::from_symbol("−"), Some(Operator::Subtract));
        assert_eq!(Operator::from_symbol("×"), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol("/"), Some(Operator::Divide));
        assert_eq!(Operator::from_symbol("%"), None);
    }

    #[test]
    fn performs_basic_operations() {
        assert_eq!(perform_operation("I", Operator::Add, "II").unwrap(), "III");
        assert_eq!(perform_operation("VI", Operator::Subtract, "II").unwrap(), "IIII");
        assert_eq!(perform_operation("IIII", Operator::Multiply, "VIII").unwrap(), "XXXII");
        assert_eq!(perform_operation("X", Operator::Divide, "V").unwrap(), "II");
        // 7 / 2 truncates
        assert_eq!(perform_operation("VII", Operator::Divide, "II").unwrap(), "III");
    }

    #[test]
    fn operation_results_must_be_representable() {
        assert!(matches!(
            perform_operation("II", Operator::Subtract, "II"),
            Err(NumeralError::Range(_))
        ));
        assert!(matches!(
            perform_operation("I", Operator::Divide, "II"),
            Err(NumeralError::Range(_))
        ));
        assert!(matches!(
            perform_operation("MM", Operator::Multiply, "II"),
            Err(NumeralError::Range(_))
        ));
    }

    #[test]
    fn division_by_empty_divisor() {
        assert_eq!(
            perform_operation("X", Operator::Divide, ""),
            Err(NumeralError::DivisionByZero)
        );
    }

    #[test]
    fn operands_must_be_representable() {
        assert!(matches!(
            perform_operation("", Operator::Add, "V"),
            Err(NumeralError::Range(_))
        ));
        assert!(matches!(
            perform_operation("X", Operator::Multiply, ""),
            Err(NumeralError::Range(_))
        ));
        assert!(matches!(
            perform_operation("MMMM", Operator::Subtract, "I"),
            Err(NumeralError::Range(_))
        ));
        assert_eq!(
            perform_operation("", Operator::Divide, ""),
            Err(NumeralError::DivisionByZero)
        );

        let mut engine = NumeralEngine::new();
        assert!(engine.perform_operation("", Operator::Add, "V").is_err());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn engine_records_successful_operations_only() {
        let mut engine = NumeralEngine::new();
        let three = engine.perform_operation("I", Operator::Add, "II").unwrap();
        let six = engine.perform_operation(&three, Operator::Add, "III").unwrap();
        let ten = engine.perform_operation(&six, Operator::Add, "IIII").unwrap();
        assert!(engine.perform_operation(&ten, Operator::Divide, "").is_err());
        let two = engine.perform_operation(&ten, Operator::Divide, "V").unwrap();
        assert_eq!(two, "II");

        let history = engine.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[1].to_string(), "III + III = VI");
        assert_eq!(history[3].to_string(), "X ÷ V = II");

        engine.clear_history();
        assert!(engine.history().is_empty());
    }

    #[test]
    fn modernizes_by_value() {
        let modernizer = StandardModernizer;
        assert_eq!(modernize("LXXXXVIIII", &modernizer).unwrap(), "XCIX");
        assert_eq!(modernize("IIII", &modernizer).unwrap(), "IV");
        assert!(matches!(modernize("", &modernizer), Err(NumeralError::Range(_))));
    }
}
