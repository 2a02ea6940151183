//! Field validation for todo input.
//!
//! Every function here takes the raw string a user typed and returns either the
//! normalized value that gets stored, or a [`ValidationError`]. None of them
//! touch the store.
//!
//! Rules:
//! - Task: trimmed, at least [`MIN_TASK_LEN`] characters
//! - Due date: trimmed, exactly `YYYY-MM-DD`, a real calendar date
//! - Labels: comma separated, trimmed, empty segments dropped (never fails)
//! - Completed: `yes`/`y`/`true`/`1` or `no`/`n`/`false`/`0`/empty, any case
//!
//! Priority parsing lives with the type, see [`crate::model::Priority`].

use chrono::NaiveDate;

/// Minimum number of characters in a task after trimming.
pub const MIN_TASK_LEN: usize = 2;

/// The only accepted due date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trims the task and checks its length.
///
/// ```
/// use todoz::validation::{validate_task, ValidationError};
///
/// assert_eq!(validate_task("  ok ").unwrap(), "ok");
/// assert_eq!(validate_task(" x "), Err(ValidationError::TaskTooShort));
/// ```
pub fn validate_task(raw: &str) -> Result<String, ValidationError> {
    let task = raw.trim();
    if task.chars().count() < MIN_TASK_LEN {
        return Err(ValidationError::TaskTooShort);
    }
    Ok(task.to_string())
}

/// Parses a due date in the fixed `YYYY-MM-DD` layout.
///
/// chrono alone is lenient about field widths (`2025-3-1` parses), so the
/// shape is checked first.
pub fn validate_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let input = raw.trim();
    if !has_date_shape(input) {
        return Err(ValidationError::InvalidDateFormat(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDateFormat(input.to_string()))
}

fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Splits a comma separated label list.
///
/// Order and duplicates are preserved; blank segments are dropped.
///
/// ```
/// use todoz::validation::validate_labels;
///
/// assert_eq!(validate_labels("  ,, a , ,b,"), vec!["a", "b"]);
/// assert!(validate_labels("").is_empty());
/// ```
pub fn validate_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Interprets a yes/no style answer.
pub fn validate_completed(raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" | "" => Ok(false),
        _ => Err(ValidationError::InvalidCompletedValue(raw.trim().to_string())),
    }
}

/// Error type for field validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task is shorter than [`MIN_TASK_LEN`] after trimming
    TaskTooShort,
    /// Due date is empty or not `YYYY-MM-DD`
    InvalidDateFormat(String),
    /// Priority is not one of `LOW`, `MEDIUM`, `HIGH`
    InvalidPriority(String),
    /// Completed flag is not a recognised yes/no answer
    InvalidCompletedValue(String),
    /// Any other malformed input
    InvalidInput(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TaskTooShort => write!(
                f,
                "task must be at least {} characters long",
                MIN_TASK_LEN
            ),
            ValidationError::InvalidDateFormat(input) => {
                write!(f, "invalid date format '{}', expected YYYY-MM-DD", input)
            }
            ValidationError::InvalidPriority(input) => {
                write!(
                    f,
                    "invalid priority '{}', expected one of LOW, MEDIUM, HIGH",
                    input
                )
            }
            ValidationError::InvalidCompletedValue(input) => {
                write!(f, "invalid completed value '{}', expected yes or no", input)
            }
            ValidationError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}
