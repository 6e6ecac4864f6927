//! Input validation for rostering problems.
//!
//! Checks raw cycle and demand input before any model is built.
//! Detects:
//! - Non-positive cycle length or work span
//! - Negative or zero rest span (a zero rest span makes every cohort identical)
//! - Work span + rest span not equal to the cycle length
//! - Demand vectors of the wrong length
//! - Negative or out-of-range demand entries
//!
//! All problems are collected, not just the first one.

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Cycle length is zero, negative, or too large.
    CycleLength,
    /// Work span is zero or negative.
    WorkSpan,
    /// Rest span is zero or negative.
    RestSpan,
    /// Work span + rest span differs from the cycle length.
    SpanMismatch,
    /// Demand vector length differs from the cycle length.
    DemandLength,
    /// A demand entry is negative.
    NegativeDemand,
    /// A demand entry does not fit a headcount.
    DemandOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a raw cycle configuration.
///
/// Checks:
/// 1. `cycle_length` is positive and fits a `u32`
/// 2. `work_span` is positive
/// 3. `rest_span` is positive
/// 4. `work_span + rest_span == cycle_length`
pub fn validate_cycle(cycle_length: i64, work_span: i64, rest_span: i64) -> ValidationResult {
    let mut errors = Vec::new();

    if cycle_length <= 0 || u32::try_from(cycle_length).is_err() {
        errors.push(ValidationError::new(
            ValidationErrorKind::CycleLength,
            format!("cycle length must be a positive 32-bit count, got {cycle_length}"),
        ));
    }

    if work_span <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::WorkSpan,
            format!("work span must be positive, got {work_span}"),
        ));
    }

    if rest_span <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::RestSpan,
            format!("rest span must be positive, got {rest_span}"),
        ));
    }

    if work_span.saturating_add(rest_span) != cycle_length {
        errors.push(ValidationError::new(
            ValidationErrorKind::SpanMismatch,
            format!(
                "work span {work_span} + rest span {rest_span} must equal cycle length {cycle_length}"
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a raw demand vector against a cycle length.
///
/// Every entry is checked, so a vector with several bad days reports each one.
pub fn validate_demand(cycle_length: usize, values: &[i64]) -> ValidationResult {
    let mut errors = Vec::new();

    if values.len() != cycle_length {
        errors.push(ValidationError::new(
            ValidationErrorKind::DemandLength,
            format!(
                "expected {cycle_length} demand entries, got {}",
                values.len()
            ),
        ));
    }

    for (day, &value) in values.iter().enumerate() {
        if value < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDemand,
                format!("day {day} has negative demand {value}"),
            ));
        } else if u32::try_from(value).is_err() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DemandOverflow,
                format!("day {day} demand {value} exceeds the headcount range"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
