//! Invocation of the utilities with loosely typed JSON arguments.
//!
//! This is the boundary where type, arity and integrality are checked before
//! a typed function in `strings`, `dates` or `math` runs.

use crate::core::{dates, math, strings};
use crate::utils::error::{Result, UtilError};
use crate::utils::validation::{validate_integer, validate_number_truncated, validate_text};
use chrono::NaiveDateTime;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const INPUT_MUST_BE_NUMBER: &str = "Input must be a number";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Reverse,
    Capitalize,
    Count,
    Truncate,
    FormatDate,
    AddDays,
    DaysBetween,
    IsWeekend,
    Factorial,
    Fibonacci,
    Gcd,
    IsPrime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationGroup {
    String,
    Date,
    Math,
}

impl fmt::Display for OperationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Date => write!(f, "date"),
            Self::Math => write!(f, "math"),
        }
    }
}

impl Operation {
    pub fn all() -> &'static [Operation] {
        &[
            Self::Reverse,
            Self::Capitalize,
            Self::Count,
            Self::Truncate,
            Self::FormatDate,
            Self::AddDays,
            Self::DaysBetween,
            Self::IsWeekend,
            Self::Factorial,
            Self::Fibonacci,
            Self::Gcd,
            Self::IsPrime,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Reverse => "reverse",
            Self::Capitalize => "capitalize",
            Self::Count => "count",
            Self::Truncate => "truncate",
            Self::FormatDate => "formatDate",
            Self::AddDays => "addDays",
            Self::DaysBetween => "daysBetween",
            Self::IsWeekend => "isWeekend",
            Self::Factorial => "factorial",
            Self::Fibonacci => "fibonacci",
            Self::Gcd => "gcd",
            Self::IsPrime => "isPrime",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Self::Reverse
            | Self::Capitalize
            | Self::IsWeekend
            | Self::Factorial
            | Self::Fibonacci
            | Self::IsPrime => 1,
            Self::Count
            | Self::Truncate
            | Self::FormatDate
            | Self::AddDays
            | Self::DaysBetween
            | Self::Gcd => 2,
        }
    }

    pub fn group(&self) -> OperationGroup {
        match self {
            Self::Reverse | Self::Capitalize | Self::Count | Self::Truncate => {
                OperationGroup::String
            }
            Self::FormatDate | Self::AddDays | Self::DaysBetween | Self::IsWeekend => {
                OperationGroup::Date
            }
            Self::Factorial | Self::Fibonacci | Self::Gcd | Self::IsPrime => OperationGroup::Math,
        }
    }

    /// Checks `args` and runs the operation, returning its result as JSON.
    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        self.check_arity(args.len())?;
        tracing::debug!("Invoking {} with {} argument(s)", self.name(), args.len());

        let result = match self {
            Self::Reverse => Value::from(strings::reverse(text_arg(&args[0])?)),
            Self::Capitalize => Value::from(strings::capitalize(text_arg(&args[0])?)),
            Self::Count => {
                let both_strings = || UtilError::invalid_argument("Both arguments must be strings");
                let text = validate_text(&args[0], both_strings)?;
                let needle = validate_text(&args[1], both_strings)?;
                Value::from(strings::count(text, needle)?)
            }
            Self::Truncate => {
                let text = validate_text(&args[0], || {
                    UtilError::invalid_argument("First argument must be a string")
                })?;
                Value::from(strings::truncate(text, length_arg(&args[1])?))
            }
            Self::FormatDate => {
                let date = date_arg(&args[0])?;
                let pattern = validate_text(&args[1], || {
                    UtilError::invalid_format("Invalid format string")
                })?;
                Value::from(dates::format_date(&date, pattern)?)
            }
            Self::AddDays => {
                let date = date_arg(&args[0])?;
                let days = validate_number_truncated(&args[1], || {
                    UtilError::invalid_number("Days must be a number")
                })?;
                encode_date(&dates::add_days(&date, days)?)
            }
            Self::DaysBetween => {
                let from = date_arg(&args[0])?;
                let to = date_arg(&args[1])?;
                Value::from(dates::days_between(&from, &to))
            }
            Self::IsWeekend => Value::from(dates::is_weekend(&date_arg(&args[0])?)),
            Self::Factorial => {
                let n = integer_arg(
                    &args[0],
                    "Factorial is only defined for non-negative integers",
                )?;
                Value::from(math::factorial(n)?)
            }
            Self::Fibonacci => {
                let n = integer_arg(&args[0], "Fibonacci index must be a non-negative integer")?;
                Value::from(math::fibonacci(n)?)
            }
            Self::Gcd => {
                let type_error = || UtilError::not_a_number("Both inputs must be numbers");
                let fraction_error = || UtilError::non_integer("GCD is only defined for integers");
                // Both arguments are type-checked before either is checked for a fraction.
                if !args[0].is_number() || !args[1].is_number() {
                    return Err(type_error());
                }
                let a = validate_integer(&args[0], type_error, fraction_error)?;
                let b = validate_integer(&args[1], type_error, fraction_error)?;
                Value::from(math::gcd(a, b)?)
            }
            Self::IsPrime => {
                let n = integer_arg(&args[0], "Prime check is only defined for integers")?;
                Value::from(math::is_prime(n)?)
            }
        };

        Ok(result)
    }

    fn check_arity(&self, given: usize) -> Result<()> {
        if given == self.arity() {
            return Ok(());
        }

        let message = match self {
            Self::Fibonacci => "Fibonacci requires exactly one argument".to_string(),
            Self::Gcd => "GCD requires exactly two arguments".to_string(),
            _ => format!(
                "{} requires exactly {} argument(s), got {}",
                self.name(),
                self.arity(),
                given
            ),
        };
        Err(UtilError::missing_argument(message))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operation {
    type Err = UtilError;

    /// Accepts both `isPrime` and `is_prime` spellings, case-insensitively.
    fn from_str(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::all()
            .iter()
            .copied()
            .find(|op| op.name().to_lowercase() == normalized)
            .ok_or_else(|| UtilError::UnknownOperation {
                name: name.to_string(),
            })
    }
}

fn text_arg(value: &Value) -> Result<&str> {
    validate_text(value, || UtilError::invalid_argument("Input must be a string"))
}

fn length_arg(value: &Value) -> Result<usize> {
    let length_error = || UtilError::invalid_argument("Length must be a non-negative integer");
    let length = validate_integer(value, length_error, length_error)?;
    usize::try_from(length).map_err(|_| length_error())
}

fn integer_arg(value: &Value, fraction_message: &str) -> Result<i64> {
    validate_integer(
        value,
        || UtilError::not_a_number(INPUT_MUST_BE_NUMBER),
        || UtilError::non_integer(fraction_message),
    )
}

fn date_arg(value: &Value) -> Result<NaiveDateTime> {
    let text = validate_text(value, || UtilError::invalid_date("Invalid date provided"))?;
    dates::parse_date(text)
}

fn encode_date(date: &NaiveDateTime) -> Value {
    Value::from(date.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}
