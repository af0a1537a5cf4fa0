use std::time::Duration;

use crate::error::{AppError, AppResult, ValidationError};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;

/// Parse a duration with an optional ms/s/m/h suffix; a bare number is
/// interpreted as milliseconds. Zero is valid and means "no pacing".
pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let value = s.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::DurationEmpty));
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(AppError::validation(
            ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            },
        ));
    }

    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part.parse().map_err(|err| {
        AppError::validation(ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
    })?;

    match unit_part.trim() {
        "" | "ms" => Ok(Duration::from_millis(number)),
        "s" => Ok(Duration::from_secs(number)),
        "m" => number
            .checked_mul(SECS_PER_MINUTE)
            .map(Duration::from_secs)
            .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow)),
        "h" => number
            .checked_mul(SECS_PER_HOUR)
            .map(Duration::from_secs)
            .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow)),
        unit => Err(AppError::validation(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        })),
    }
}
