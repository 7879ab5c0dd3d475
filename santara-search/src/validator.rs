use chrono::NaiveDate;
use thiserror::Error;

use santara_core::{FilterOptions, SearchRequest, TimeRange};

/// A request rejection, reported as the offending field plus a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

const CABIN_CLASSES: &[&str] = &["economy", "premium", "business", "first"];

/// Rejects malformed requests before any provider call or cache lookup.
/// Validation is pure: the same request always yields the same verdict.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, req: &SearchRequest) -> Result<(), ValidationError> {
        validate_airport_code(&req.origin, "origin")?;
        validate_airport_code(&req.destination, "destination")?;

        if req.origin.eq_ignore_ascii_case(&req.destination) {
            return Err(ValidationError::new(
                "destination",
                "origin and destination must be different",
            ));
        }

        let departure_date = parse_date(&req.departure_date, "departureDate")?;

        if let Some(return_date) = req.return_date.as_deref().filter(|d| !d.is_empty()) {
            let return_date = parse_date(return_date, "returnDate")?;
            if return_date < departure_date {
                return Err(ValidationError::new(
                    "returnDate",
                    "return date must be on or after departure date",
                ));
            }
        }

        if req.passengers < 1 {
            return Err(ValidationError::new(
                "passengers",
                "must have at least 1 passenger",
            ));
        }
        if req.passengers > 9 {
            return Err(ValidationError::new(
                "passengers",
                "maximum 9 passengers per search",
            ));
        }

        if !CABIN_CLASSES.contains(&req.cabin_class.to_lowercase().as_str()) {
            return Err(ValidationError::new(
                "cabinClass",
                "cabin class must be economy, premium, business, or first",
            ));
        }

        if let Some(filters) = &req.filters {
            validate_filters(filters)?;
        }
        if let Some(filters) = &req.return_filters {
            validate_filters(filters)?;
        }

        Ok(())
    }
}

fn validate_airport_code(code: &str, field: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::new(field, "airport code is required"));
    }
    if code.len() != 3 {
        return Err(ValidationError::new(
            field,
            "airport code must be 3 characters (IATA code)",
        ));
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new(
            field,
            "airport code must contain only letters",
        ));
    }
    Ok(())
}

fn validate_filters(filters: &FilterOptions) -> Result<(), ValidationError> {
    if let Some(min) = filters.min_price {
        if min < 0.0 {
            return Err(ValidationError::new(
                "minPrice",
                "minimum price cannot be negative",
            ));
        }
    }
    if let Some(max) = filters.max_price {
        if max < 0.0 {
            return Err(ValidationError::new(
                "maxPrice",
                "maximum price cannot be negative",
            ));
        }
    }
    if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
        if min > max {
            return Err(ValidationError::new(
                "maxPrice",
                "maximum price must be greater than minimum price",
            ));
        }
    }

    if let Some(range) = filters.departure_time {
        validate_time_range(range, "departureTime")?;
    }
    if let Some(range) = filters.arrival_time {
        validate_time_range(range, "arrivalTime")?;
    }

    if let Some(max_duration) = filters.max_duration {
        if max_duration == 0 {
            return Err(ValidationError::new(
                "maxDuration",
                "maximum duration must be positive",
            ));
        }
    }

    Ok(())
}

fn validate_time_range(range: TimeRange, field: &str) -> Result<(), ValidationError> {
    if range.start > 23 {
        return Err(ValidationError::new(
            &format!("{field}.start"),
            "start hour must be between 0 and 23",
        ));
    }
    if range.end > 23 {
        return Err(ValidationError::new(
            &format!("{field}.end"),
            "end hour must be between 0 and 23",
        ));
    }
    if range.start > range.end {
        return Err(ValidationError::new(
            field,
            "start hour must be less than or equal to end hour",
        ));
    }
    Ok(())
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, "date is required"));
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    Err(ValidationError::new(
        field,
        "invalid date format (expected YYYY-MM-DD, YYYY/MM/DD, DD-MM-YYYY, or DD/MM/YYYY)",
    ))
}
