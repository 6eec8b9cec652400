//! Field validators
//!
//! Every validator is a pure function returning the first problem found
//! for one field. [`validate_employee`] runs them in a fixed order and
//! stops at the first failure.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, Role, Salary};

// ── Field labels ────────────────────────────────────────────────────

pub const FIELD_FIRST_NAME: &str = "First Name";
pub const FIELD_LAST_NAME: &str = "Last Name";
pub const FIELD_EMAIL: &str = "Email";
pub const FIELD_ROLE: &str = "Role";
pub const FIELD_SALARY: &str = "Salary";
pub const FIELD_PHONE: &str = "Phone Number";

/// Required length of a phone number
pub const PHONE_LEN: usize = 10;

// ── Email patterns ──────────────────────────────────────────────────

// The dot between domain and suffix is unescaped, so it matches any char.
static LEGACY_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.]+@[a-zA-Z0-9]+.[a-zA-Z]{2,}$").expect("legacy email pattern")
});

static STRICT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.]+@[A-Za-z0-9]+\.[A-Za-z]{2,}$").expect("strict email pattern")
});

/// Which email pattern to enforce
///
/// `Legacy` reproduces the historical pattern literally, including the
/// any-character match before the suffix. `Strict` requires a real dot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailPattern {
    #[default]
    Legacy,
    Strict,
}

impl EmailPattern {
    fn regex(&self) -> &'static Regex {
        match self {
            EmailPattern::Legacy => &LEGACY_EMAIL,
            EmailPattern::Strict => &STRICT_EMAIL,
        }
    }
}

impl FromStr for EmailPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(EmailPattern::Legacy),
            "strict" => Ok(EmailPattern::Strict),
            other => Err(format!("unknown email validation mode: {other}")),
        }
    }
}

impl fmt::Display for EmailPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailPattern::Legacy => f.write_str("legacy"),
            EmailPattern::Strict => f.write_str("strict"),
        }
    }
}

// ── Errors ──────────────────────────────────────────────────────────

/// A rejected field value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

// ── Validators ──────────────────────────────────────────────────────

pub fn validate_name(field: &'static str, value: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::new(field, "cannot be empty. Enter again"));
    }
    Ok(())
}

pub fn validate_email(value: &str, pattern: EmailPattern) -> ValidationResult {
    if !pattern.regex().is_match(value) {
        return Err(ValidationError::new(
            FIELD_EMAIL,
            "email should contain @ and . Enter valid email",
        ));
    }
    Ok(())
}

/// Exactly [`PHONE_LEN`] ASCII digits, no sign or separators
pub fn validate_phone(value: &str) -> ValidationResult {
    if value.len() != PHONE_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new(
            FIELD_PHONE,
            "phone number must be 10 digits long",
        ));
    }
    Ok(())
}

pub fn validate_role(value: &str) -> ValidationResult {
    value
        .parse::<Role>()
        .map(|_| ())
        .map_err(|_| ValidationError::new(FIELD_ROLE, "given role cannot be accepted"))
}

/// Fails only for zero; a non-zero number outside the decimal range gets its own message
pub fn validate_salary(value: Salary) -> ValidationResult {
    match value {
        Salary::OutOfRange(_) => Err(ValidationError::new(
            FIELD_SALARY,
            "salary is out of range. Enter salary again",
        )),
        s if s.is_zero() => Err(ValidationError::new(
            FIELD_SALARY,
            "salary cannot be ZERO. Enter salary again",
        )),
        Salary::Amount(_) => Ok(()),
    }
}

/// Validate every checked field of an employee, stopping at the first failure.
///
/// Order: first name, last name, email, role, salary, phone number.
/// `id` and `password` carry no format rules.
pub fn validate_employee(employee: &Employee, email: EmailPattern) -> ValidationResult {
    let checks: [&dyn Fn() -> ValidationResult; 6] = [
        &|| validate_name(FIELD_FIRST_NAME, &employee.first_name),
        &|| validate_name(FIELD_LAST_NAME, &employee.last_name),
        &|| validate_email(&employee.email, email),
        &|| validate_role(&employee.role),
        &|| validate_salary(employee.salary),
        &|| validate_phone(&employee.phone_number),
    ];
    checks.iter().try_for_each(|check| check())
}
