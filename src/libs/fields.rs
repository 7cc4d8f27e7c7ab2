//! Typed, validating value slots for records.
//!
//! A record type declares its columns once as a static slice of
//! [`FieldDescriptor`]s. Every record instance builds its own [`Field`]s from
//! those descriptors, so values never leak between instances while the
//! metadata (names, labels, rules) stays shared and immutable.
//!
//! ## Validation
//!
//! Externally supplied text goes through [`Field::validate`] before it is
//! stored. The base rule runs first: an empty value for a required field
//! fails with [`ValidationError::ValueRequired`], and an empty value for an
//! optional field takes the kind's default without further checks. Non-empty
//! values are then checked by the kind's own rule:
//!
//! | Kind       | Rule                                                  |
//! |------------|-------------------------------------------------------|
//! | `Text`     | character count within `min_length..=max_length`      |
//! | `Email`    | the `Text` rule, then both `.` and `@` present        |
//! | `Date`     | parses as `YYYY-MM-DD`                                |
//! | `AutoDate` | parses as `YYYY-MM-DD`; unset reads as today's date   |
//! | `Integer`  | parses as a whole number                              |
//!
//! ## Usage
//!
//! ```rust
//! use amelia::libs::fields::{FieldDescriptor, FieldValue};
//!
//! static NAME: FieldDescriptor = FieldDescriptor::text("name", "Event name");
//!
//! let mut field = NAME.build();
//! assert!(field.set_raw("ab").is_err());
//! field.set_raw("Spring Fair")?;
//! assert_eq!(field.get_value()?, FieldValue::Text("Spring Fair".into()));
//! # Ok::<(), amelia::libs::fields::FieldError>(())
//! ```

use chrono::{Local, NaiveDate};
use rusqlite::types::Value;
use std::fmt;
use thiserror::Error;

/// On-disk and console format of every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_MAX_LENGTH: usize = 35;

/// A value that failed a field rule. Recoverable: the caller asks again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Value is required")]
    ValueRequired,

    #[error("Length exceeded: expected {min} to {max} characters, got {len}")]
    LengthExceeded { min: usize, max: usize, len: usize },

    #[error("Wrong date format: '{0}' (expected YYYY-MM-DD)")]
    WrongDateFormat(String),

    #[error("Wrong e-mail format: '{0}'")]
    WrongEmailFormat(String),

    #[error("Not an integer: '{0}'")]
    NotAnInteger(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field was read before any value was stored in it.
    #[error("Value of field '{0}' is not set")]
    ValueNotSet(String),

    #[error("{field}: {source}")]
    Invalid {
        field: String,
        #[source]
        source: ValidationError,
    },
}

impl FieldError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            FieldError::Invalid { source, .. } => Some(source),
            FieldError::ValueNotSet(_) => None,
        }
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Integer(number) => write!(f, "{}", number),
            FieldValue::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(text) => Value::Text(text),
            FieldValue::Integer(number) => Value::Integer(number),
            FieldValue::Date(date) => Value::Text(date.format(DATE_FORMAT).to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { min_length: usize, max_length: usize },
    Email { min_length: usize, max_length: usize },
    Date,
    AutoDate,
    Integer,
}

impl FieldKind {
    /// Value an optional field takes when it is given empty input.
    fn default_value(self) -> Option<FieldValue> {
        match self {
            FieldKind::Text { .. } | FieldKind::Email { .. } => Some(FieldValue::Text(String::new())),
            FieldKind::Integer => Some(FieldValue::Integer(0)),
            FieldKind::Date | FieldKind::AutoDate => None,
        }
    }

    fn check(self, raw: &str) -> Result<FieldValue, ValidationError> {
        match self {
            FieldKind::Text { min_length, max_length } => check_length(raw, min_length, max_length),
            FieldKind::Email { min_length, max_length } => {
                let value = check_length(raw, min_length, max_length)?;
                if !(raw.contains('.') && raw.contains('@')) {
                    return Err(ValidationError::WrongEmailFormat(raw.to_string()));
                }
                Ok(value)
            }
            FieldKind::Date | FieldKind::AutoDate => parse_date(raw)
                .map(FieldValue::Date)
                .ok_or_else(|| ValidationError::WrongDateFormat(raw.to_string())),
            FieldKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| ValidationError::NotAnInteger(raw.to_string())),
        }
    }

    /// Converts a stored column value; no rules are applied to data read back.
    fn load(self, value: Value) -> Option<FieldValue> {
        match (self, value) {
            (_, Value::Null) => None,
            (FieldKind::Integer, Value::Integer(number)) => Some(FieldValue::Integer(number)),
            // Only whole reals inside the i64 range load as integers.
            (FieldKind::Integer, Value::Real(number))
                if number.fract() == 0.0 && number >= i64::MIN as f64 && number < i64::MAX as f64 =>
            {
                Some(FieldValue::Integer(number as i64))
            }
            (FieldKind::Date | FieldKind::AutoDate, Value::Text(text)) => match parse_date(&text) {
                Some(date) => Some(FieldValue::Date(date)),
                None => Some(FieldValue::Text(text)),
            },
            (_, Value::Integer(number)) => Some(FieldValue::Text(number.to_string())),
            (_, Value::Real(number)) => Some(FieldValue::Text(number.to_string())),
            (_, Value::Text(text)) => Some(FieldValue::Text(text)),
            (_, Value::Blob(bytes)) => Some(FieldValue::Text(String::from_utf8_lossy(&bytes).into_owned())),
        }
    }
}

fn check_length(raw: &str, min: usize, max: usize) -> Result<FieldValue, ValidationError> {
    let len = raw.chars().count();
    if len < min || len > max {
        return Err(ValidationError::LengthExceeded { min, max, len });
    }
    Ok(FieldValue::Text(raw.to_string()))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Immutable metadata for one column of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Storage column name.
    pub name: &'static str,
    /// Label used in prompts and detail views.
    pub verbose_name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
    /// Whether the console asks for this field when creating or editing.
    pub editable: bool,
}

impl FieldDescriptor {
    const fn with_kind(name: &'static str, verbose_name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            verbose_name,
            kind,
            required: true,
            help: None,
            editable: true,
        }
    }

    pub const fn text(name: &'static str, verbose_name: &'static str) -> Self {
        Self::with_kind(
            name,
            verbose_name,
            FieldKind::Text {
                min_length: DEFAULT_MIN_LENGTH,
                max_length: DEFAULT_MAX_LENGTH,
            },
        )
    }

    pub const fn email(name: &'static str, verbose_name: &'static str) -> Self {
        Self::with_kind(
            name,
            verbose_name,
            FieldKind::Email {
                min_length: DEFAULT_MIN_LENGTH,
                max_length: DEFAULT_MAX_LENGTH,
            },
        )
    }

    pub const fn date(name: &'static str, verbose_name: &'static str) -> Self {
        Self::with_kind(name, verbose_name, FieldKind::Date).help("Date in YYYY-MM-DD format")
    }

    /// Never prompted for; reads as today's date until a value is stored.
    pub const fn auto_date(name: &'static str, verbose_name: &'static str) -> Self {
        Self {
            required: false,
            editable: false,
            ..Self::with_kind(name, verbose_name, FieldKind::AutoDate)
        }
    }

    pub const fn integer(name: &'static str, verbose_name: &'static str) -> Self {
        Self::with_kind(name, verbose_name, FieldKind::Integer)
    }

    pub const fn optional(self) -> Self {
        Self { required: false, ..self }
    }

    pub const fn help(self, help: &'static str) -> Self {
        Self { help: Some(help), ..self }
    }

    /// Adjusts the length bounds of text-like kinds; other kinds are unchanged.
    pub const fn length(self, min_length: usize, max_length: usize) -> Self {
        let kind = match self.kind {
            FieldKind::Text { .. } => FieldKind::Text { min_length, max_length },
            FieldKind::Email { .. } => FieldKind::Email { min_length, max_length },
            other => other,
        };
        Self { kind, ..self }
    }

    pub fn build(&'static self) -> Field {
        Field { descriptor: self, value: None }
    }
}

/// One value slot of a record instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    descriptor: &'static FieldDescriptor,
    value: Option<FieldValue>,
}

impl Field {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn verbose_name(&self) -> &'static str {
        self.descriptor.verbose_name
    }

    pub fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn get_value(&self) -> Result<FieldValue, FieldError> {
        match (&self.value, self.descriptor.kind) {
            (Some(value), _) => Ok(value.clone()),
            (None, FieldKind::AutoDate) => Ok(FieldValue::Date(Local::now().date_naive())),
            (None, _) => Err(FieldError::ValueNotSet(self.name().to_string())),
        }
    }

    /// Value as written to the store. Optional fields that were never set are
    /// stored as their kind's default, or NULL when the kind has none;
    /// required ones fail like [`Field::get_value`].
    pub fn get_db_value(&self) -> Result<Value, FieldError> {
        match self.get_value() {
            Ok(value) => Ok(value.into()),
            Err(FieldError::ValueNotSet(_)) if !self.descriptor.required => {
                Ok(self.descriptor.kind.default_value().map(Value::from).unwrap_or(Value::Null))
            }
            Err(err) => Err(err),
        }
    }

    /// Stores an already typed value without running any rule.
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = Some(value);
    }

    /// Runs the base rule and then the kind's rule over external input.
    ///
    /// Returns `None` when an optional field without a default receives empty
    /// input, which leaves the field unset.
    pub fn validate(&self, raw: &str) -> Result<Option<FieldValue>, FieldError> {
        if raw.is_empty() {
            if self.descriptor.required {
                return Err(self.invalid(ValidationError::ValueRequired));
            }
            return Ok(self.descriptor.kind.default_value());
        }
        self.descriptor.kind.check(raw).map(Some).map_err(|source| self.invalid(source))
    }

    /// Validates external input and stores it.
    pub fn set_raw(&mut self, raw: &str) -> Result<(), FieldError> {
        self.value = self.validate(raw)?;
        Ok(())
    }

    pub(crate) fn load(&mut self, value: Value) {
        self.value = self.descriptor.kind.load(value);
    }

    fn invalid(&self, source: ValidationError) -> FieldError {
        FieldError::Invalid {
            field: self.name().to_string(),
            source,
        }
    }
}
