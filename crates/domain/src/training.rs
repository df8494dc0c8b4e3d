use std::fmt;

use derive_more::{Display, Into};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(pub(crate) u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    /// Reads the leading integer, so `"6.5"` and `"6 reps"` are both 6.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let parsed_value = leading_number(value, false)
            .parse::<i64>()
            .map_err(|_| RepsError::ParseError)?;
        u32::try_from(parsed_value)
            .map_err(|_| RepsError::OutOfRange)
            .and_then(Reps::new)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// A duration in whole seconds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(pub(crate) u32);

impl Time {
    pub const ZERO: Time = Time(0);

    pub fn new(value: u32) -> Result<Self, TimeError> {
        if !(0..1000).contains(&value) {
            return Err(TimeError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// One second less, saturating at zero.
    #[must_use]
    pub fn decremented(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<Time> for i64 {
    fn from(value: Time) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<&str> for Time {
    type Error = TimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Time::new(parsed_value),
            Err(_) => Err(TimeError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TimeError {
    #[error("Time must be in the range 0 to 999 s")]
    OutOfRange,
    #[error("Time must be an integer")]
    ParseError,
}

/// A non-negative load in kilograms.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(pub(crate) f32);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    /// Reads the leading decimal, so `"62.5kg"` is 62.5.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match leading_number(value, true).parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be a finite number of at least 0 kg")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Share of the recorded maximum used as working weight.
///
/// Values above 100 are valid: bodyweight movements are prescribed at 100 and
/// weighted variations may exceed it.
#[derive(Debug, Default, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(pub(crate) u32);

impl Percentage {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} %", self.0)
    }
}

/// Prescribed repetitions as shown to the user, e.g. `8-10` or `45-60s`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub struct RepRange(pub(crate) &'static str);

impl RepRange {
    #[must_use]
    pub fn new(value: &'static str) -> Self {
        Self(value)
    }

    /// Leading integer of the range, ignoring any unit or suffix.
    #[must_use]
    pub fn lower_bound(&self) -> Option<Reps> {
        let first = self.0.split('-').next().unwrap_or_default();
        leading_number(first, false)
            .parse::<u32>()
            .ok()
            .and_then(|v| Reps::new(v).ok())
    }
}

/// Longest prefix of the input, after leading whitespace, which forms a
/// number. Integers are an optional sign followed by digits. Decimals may add
/// a fraction and an exponent.
fn leading_number(input: &str, decimal: bool) -> &str {
    let input = input.trim_start();
    let bytes = input.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    end += digits(end);
    if decimal {
        if bytes.get(end) == Some(&b'.') {
            end += 1 + digits(end + 1);
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
            let exponent = digits(end + 1 + sign);
            if exponent > 0 {
                end += 1 + sign + exponent;
            }
        }
    }

    &input[..end]
}
