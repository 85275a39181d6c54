use crate::error::NumeralError;
use crate::modernizer::Modernizer;
use crate::numeral::{self, CalculationRecord, MAX_VALUE, NumeralEngine, Operator};
use log::debug;

/// A keypad button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Operator(Operator),
    Equals,
    Modern,
    Clear,
}

impl Key {
    /// Parses key names as used by the keypad (`"7"`, `"add"`, `"equals"`, ...)
    /// as well as the bare operator symbols.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(op) = Operator::from_symbol(name) {
            return Some(Key::Operator(op));
        }
        match name.to_lowercase().as_str() {
            "add" => Some(Key::Operator(Operator::Add)),
            "subtract" => Some(Key::Operator(Operator::Subtract)),
            "multiply" => Some(Key::Operator(Operator::Multiply)),
            "divide" => Some(Key::Operator(Operator::Divide)),
            "equals" | "=" => Some(Key::Equals),
            "modern" => Some(Key::Modern),
            "clear" | "c" => Some(Key::Clear),
            digit if digit.len() == 1 => digit
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .map(|d| Key::Digit(d as u8)),
            _ => None,
        }
    }
}

/// The number currently being typed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    /// No digit has been pressed since the last operator.
    Empty,
    Digits(i64),
}

impl Entry {
    /// A leading zero key leaves the entry at 0, which is not an operand.
    pub fn has_value(&self) -> bool {
        matches!(self, Entry::Digits(n) if *n >= 1)
    }

    /// Additive numeral for the entry; empty text for nothing (or zero) entered.
    pub fn numeral(&self) -> String {
        match self {
            Entry::Digits(n) if *n >= 1 => numeral::convert_to_numeral(*n).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Keypad-driven calculator session
pub struct Calculator {
    engine: NumeralEngine,
    modernizer: Box<dyn Modernizer>,
    accumulator: Option<String>,
    pending: Option<Operator>,
    entry: Entry,
    display: String,
    evaluated: bool,
}

impl Calculator {
    pub fn new(modernizer: Box<dyn Modernizer>) -> Self {
        Self::with_engine(NumeralEngine::new(), modernizer)
    }

    pub fn with_engine(engine: NumeralEngine, modernizer: Box<dyn Modernizer>) -> Self {
        Calculator {
            engine,
            modernizer,
            accumulator: None,
            pending: None,
            entry: Entry::Empty,
            display: String::new(),
            evaluated: false,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn entry(&self) -> Entry {
        self.entry
    }

    pub fn history(&self) -> &[CalculationRecord] {
        self.engine.history()
    }

    pub fn engine(&self) -> &NumeralEngine {
        &self.engine
    }

    /// Press a key and return the new display text
    ///
    /// On an arithmetic error the pending calculation is dropped and the
    /// display shows the error; the history is never touched by a failure.
    /// A digit that would push the entry past 3999 is rejected and changes
    /// nothing.
    pub fn press(&mut self, key: Key) -> Result<&str, NumeralError> {
        debug!("key {:?}", key);
        match key {
            Key::Digit(d) => self.press_digit(d)?,
            Key::Operator(op) => self.press_operator(op)?,
            Key::Equals => self.press_equals()?,
            Key::Modern => self.press_modern()?,
            Key::Clear => self.reset(String::new()),
        }
        Ok(&self.display)
    }

    /// Presses each named key in turn, stopping at the first failure.
    pub fn press_all(&mut self, names: &[&str]) -> Result<&str, NumeralError> {
        for name in names {
            let key = Key::parse(name).ok_or_else(|| NumeralError::Range((*name).to_string()))?;
            self.press(key)?;
        }
        Ok(&self.display)
    }

    fn press_digit(&mut self, digit: u8) -> Result<(), NumeralError> {
        if self.evaluated {
            self.accumulator = None;
            self.pending = None;
            self.evaluated = false;
        }
        let current = match self.entry {
            Entry::Empty => 0,
            Entry::Digits(n) => n,
        };
        let next = current * 10 + digit as i64;
        if next > MAX_VALUE {
            return Err(NumeralError::Range(next.to_string()));
        }
        self.entry = Entry::Digits(next);
        self.display = self.entry.numeral();
        Ok(())
    }

    /// Chained input is evaluated one binary step at a time, so `1 + 2 + 3 =`
    /// records `I + II = III` and then `III + III = VI`.
    fn press_operator(&mut self, op: Operator) -> Result<(), NumeralError> {
        self.evaluated = false;
        if self.entry.has_value() {
            let operand = self.entry.numeral();
            let value = match (self.accumulator.take(), self.pending) {
                (Some(acc), Some(pending)) => self.apply(&acc, pending, &operand)?,
                _ => operand,
            };
            self.display = value.clone();
            self.accumulator = Some(value);
            self.entry = Entry::Empty;
        }
        if self.accumulator.is_some() {
            self.pending = Some(op);
        }
        Ok(())
    }

    fn press_equals(&mut self) -> Result<(), NumeralError> {
        // A repeated equals has no pending operator and must keep the result.
        if self.accumulator.is_none() || self.pending.is_none() {
            return Ok(());
        }
        let (Some(acc), Some(op)) = (self.accumulator.take(), self.pending.take()) else {
            return Ok(());
        };
        let operand = self.entry.numeral();
        let result = self.apply(&acc, op, &operand)?;
        self.display = result.clone();
        self.accumulator = Some(result);
        self.entry = Entry::Empty;
        self.evaluated = true;
        Ok(())
    }

    fn press_modern(&mut self) -> Result<(), NumeralError> {
        let shown = match self.entry {
            Entry::Digits(_) if !self.evaluated => self.entry.numeral(),
            _ => self.accumulator.clone().unwrap_or_default(),
        };
        match numeral::modernize(&shown, self.modernizer.as_ref()) {
            Ok(modern) => {
                self.display = modern;
                Ok(())
            }
            Err(e) => {
                self.display = e.to_string();
                Err(e)
            }
        }
    }

    fn apply(&mut self, lhs: &str, op: Operator, rhs: &str) -> Result<String, NumeralError> {
        self.engine.perform_operation(lhs, op, rhs).inspect_err(|e| {
            self.reset(e.to_string());
        })
    }

    fn reset(&mut self, display: String) {
        self.accumulator = None;
        self.pending = None;
        self.entry = Entry::Empty;
        self.evaluated = false;
        self.display = display;
    }
}
