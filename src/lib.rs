/*!
# Roman Calculator Core

Arithmetic on "additive" Roman numerals plus the credential validators used by
the calculator's registration form, written in Rust.

## Overview

Additive numerals never use subtractive pairs: 4 is `IIII`, 9 is `VIIII` and
99 is `LXXXXVIIII`. The engine converts integers in [1, 3999] to that form and
back, performs the four basic operations on numerals, and keeps a history of
every completed operation. Standard notation (`XCIX`) is produced by a
pluggable modernizer.

## Architecture

### Numeral Engine
- **numeral**: conversion in both directions, `Operator`, `perform_operation`,
  the `NumeralEngine` session and its `CalculationRecord` history
- **modernizer**: the `Modernizer` seam with a local implementation and an
  optional HTTP-backed one (feature `remote`)
- **calculator**: keypad state machine (digits, operators, equals, modern)
- **converter**: live converter following the typed number

### Credential Validation
- **credentials**: `verify_email` and `verify_password`; both fail closed on
  non-text input and never return errors
- **registration**: turns validator results into per-field state and messages

### Persistence
- **storage**: `KeyValueStore` with in-memory and gzip/bincode file backends,
  and a `HistoryRepository` keeping calculation history per user

## Error Handling

Conversion and arithmetic failures are `NumeralError` values
(`Range`, `InvalidSymbol`, `DivisionByZero`, `Modernizer`). Validators report
through `bool` and `PasswordReport` instead.
*/

pub mod calculator;
pub mod converter;
pub mod credentials;
pub mod error;
pub mod modernizer;
pub mod numeral;
pub mod registration;
pub mod storage;

/// Re-export the common entry points
pub use calculator::{Calculator, Entry, Key};
pub use converter::LiveConverter;
pub use credentials::{Input, PasswordReport, verify_email, verify_password};
pub use error::{ModernizerError, NumeralError, StorageError};
pub use modernizer::{Modernizer, StandardModernizer};
pub use numeral::{
    CalculationRecord, NumeralEngine, Operator, convert_to_arabic, convert_to_numeral, modernize,
    perform_operation,
};
pub use registration::{FieldState, RegistrationReview, review_registration};
pub use storage::{FileStore, HistoryRepository, KeyValueStore, MemoryStore};
