use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// First violated rule for a field, in the order the rules are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NullValue,
    WrongType,
    TooShort,
    ContainsDigit,
    InvalidFormat,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NullValue => write!(f, "must not be null"),
            Violation::WrongType => write!(f, "has the wrong type"),
            Violation::TooShort => write!(f, "is too short"),
            Violation::ContainsDigit => write!(f, "must not contain digits"),
            Violation::InvalidFormat => write!(f, "has an invalid format"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub violation: Violation,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.violation)
    }
}

impl std::error::Error for FieldError {}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email regex"));

/// Symbols accepted (and required, at least one) in a password.
const PASSWORD_SYMBOLS: &str = "@$!%*?&";
const PASSWORD_MIN_LEN: usize = 8;

fn fail(field: &'static str, violation: Violation) -> FieldError {
    FieldError { field, violation }
}

fn require_str<'a>(field: &'static str, value: Option<&'a Value>) -> Result<&'a str, FieldError> {
    match value {
        None | Some(Value::Null) => Err(fail(field, Violation::NullValue)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(fail(field, Violation::WrongType)),
    }
}

fn name_field(
    field: &'static str,
    value: Option<&Value>,
    min_len: usize,
) -> Result<String, FieldError> {
    let s = require_str(field, value)?;
    if s.chars().any(|c| c.is_ascii_digit()) {
        return Err(fail(field, Violation::ContainsDigit));
    }
    if s.chars().count() < min_len {
        return Err(fail(field, Violation::TooShort));
    }
    Ok(s.to_owned())
}

pub fn user_name(value: Option<&Value>) -> Result<String, FieldError> {
    name_field("name", value, 3)
}

pub fn user_email(value: Option<&Value>) -> Result<String, FieldError> {
    let s = require_str("email", value)?;
    if !EMAIL_RE.is_match(s) {
        return Err(fail("email", Violation::InvalidFormat));
    }
    Ok(s.to_owned())
}

/// Validates the raw password and hands it back for immediate hashing.
/// The regex crate has no lookaround, so the character-class requirements
/// are spelled out as scans over the same acceptance set.
pub fn user_password(value: Option<&Value>) -> Result<String, FieldError> {
    let s = require_str("password", value)?;
    let acceptable =
        |c: char| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c);
    let ok = s.chars().count() >= PASSWORD_MIN_LEN
        && s.chars().all(acceptable)
        && s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
    if !ok {
        return Err(fail("password", Violation::InvalidFormat));
    }
    Ok(s.to_owned())
}

pub fn ingredient_name(value: Option<&Value>) -> Result<String, FieldError> {
    name_field("ingredient_name", value, 2)
}

pub fn recipe_name(value: Option<&Value>) -> Result<String, FieldError> {
    name_field("name", value, 3)
}

pub fn recipe_cooktime(value: Option<&Value>) -> Result<i32, FieldError> {
    let field = "cooktime";
    let minutes = match value {
        None | Some(Value::Null) => return Err(fail(field, Violation::NullValue)),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| fail(field, Violation::WrongType))?,
        Some(_) => return Err(fail(field, Violation::WrongType)),
    };
    if minutes <= 0 || minutes > i64::from(i32::MAX) {
        return Err(fail(field, Violation::InvalidFormat));
    }
    Ok(minutes as i32)
}

pub fn recipe_instructions(value: Option<&Value>) -> Result<String, FieldError> {
    let field = "instructions";
    let s = require_str(field, value)?;
    if s.trim().chars().count() < 10 {
        return Err(fail(field, Violation::TooShort));
    }
    Ok(s.to_owned())
}

pub fn quantity(value: Option<&Value>) -> Result<String, FieldError> {
    let field = "quantity";
    let s = require_str(field, value)?;
    if s.trim().is_empty() {
        return Err(fail(field, Violation::TooShort));
    }
    Ok(s.to_owned())
}
