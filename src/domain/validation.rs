//! Declarative form validation.
//!
//! A [`FormSchema`] is a tagged-rule list evaluated against a field map,
//! producing [`ValidationOutcome::Valid`] or a per-field error mapping. The
//! schema is re-evaluated on every change; the first failing rule per field
//! wins. Cross-field equality covers the confirm-password case.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, OnceLock, PoisonError};

use regex::Regex;

/// Field identifier used by schemas and form state.
pub type FieldName = &'static str;

/// Email field name shared by the login and signup schemas.
pub const EMAIL: FieldName = "email";
/// Password field name shared by the login and signup schemas.
pub const PASSWORD: FieldName = "password";
/// Confirm-password field name used by the signup schema.
pub const CONFIRM_PASSWORD: FieldName = "confirmPassword";
/// Title field name used by the create-post schema.
pub const TITLE: FieldName = "title";
/// Body field name used by the create-post schema.
pub const BODY: FieldName = "body";

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const DIGIT_PATTERN: &str = "[0-9]";
const LOWERCASE_PATTERN: &str = "[a-z]";
const UPPERCASE_PATTERN: &str = "[A-Z]";
const SYMBOL_PATTERN: &str = "[^A-Za-z0-9]";

static PATTERN_CACHE: OnceLock<Mutex<HashMap<&'static str, Regex>>> = OnceLock::new();

fn compiled(pattern: &'static str) -> Regex {
    let cache = PATTERN_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
    guard
        .entry(pattern)
        .or_insert_with(|| {
            Regex::new(pattern)
                .unwrap_or_else(|error| panic!("validation pattern failed to compile: {error}"))
        })
        .clone()
}

/// A single validation rule with its user-facing failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty.
    Required { message: &'static str },
    /// Value must hold at least `min` characters.
    MinLength { min: usize, message: &'static str },
    /// Value must match the regex `pattern`.
    Pattern {
        pattern: &'static str,
        message: &'static str,
    },
    /// Value must equal the normalised value of another field.
    MatchesField {
        other: FieldName,
        message: &'static str,
    },
}

impl Rule {
    fn check(
        &self,
        value: &str,
        normalized: &BTreeMap<FieldName, String>,
    ) -> Option<&'static str> {
        match self {
            Self::Required { message } => value.is_empty().then_some(*message),
            Self::MinLength { min, message } => (value.chars().count() < *min).then_some(*message),
            Self::Pattern { pattern, message } => {
                (!compiled(pattern).is_match(value)).then_some(*message)
            }
            Self::MatchesField { other, message } => {
                let peer = normalized.get(other).map_or("", String::as_str);
                (value != peer).then_some(*message)
            }
        }
    }
}

/// Input normalisation applied before any rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Use the value exactly as typed.
    #[default]
    Preserve,
    /// Trim surrounding whitespace and lowercase, as for email addresses.
    TrimLowercase,
}

impl Normalization {
    fn apply(self, value: &str) -> String {
        match self {
            Self::Preserve => value.to_owned(),
            Self::TrimLowercase => value.trim().to_lowercase(),
        }
    }
}

/// Rules and normalisation for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    name: FieldName,
    normalization: Normalization,
    rules: Vec<Rule>,
}

impl FieldSchema {
    /// Start a field schema with no rules.
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            normalization: Normalization::default(),
            rules: Vec::new(),
        }
    }

    /// Set the normalisation applied before rules run.
    pub fn normalized(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Append a rule; rules run in insertion order.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Field identifier.
    pub fn name(&self) -> FieldName {
        self.name
    }
}

/// Result of evaluating a schema against a field map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every field satisfied its rules.
    Valid,
    /// At least one field failed; first failing message per field.
    Invalid(BTreeMap<FieldName, String>),
}

impl ValidationOutcome {
    /// Whether the whole form is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The error message recorded for a field, if any.
    pub fn error(&self, field: FieldName) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(errors) => errors.get(field).map(String::as_str),
        }
    }
}

/// Declarative validation schema for one form.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use postboard::domain::validation::{login_schema, EMAIL, PASSWORD};
///
/// let schema = login_schema();
/// let mut values = BTreeMap::new();
/// values.insert(EMAIL, "a@b.com".to_owned());
/// values.insert(PASSWORD, "Secret123!".to_owned());
/// assert!(schema.validate(&values).is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Build a schema from field definitions.
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Names of the fields this schema covers, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.iter().map(FieldSchema::name)
    }

    /// Normalise a raw value the way this schema's field would see it.
    pub fn normalize(&self, field: FieldName, value: &str) -> String {
        self.fields
            .iter()
            .find(|schema| schema.name == field)
            .map_or_else(|| value.to_owned(), |schema| schema.normalization.apply(value))
    }

    /// Evaluate every field; missing entries are treated as empty input.
    pub fn validate(&self, values: &BTreeMap<FieldName, String>) -> ValidationOutcome {
        let normalized: BTreeMap<FieldName, String> = self
            .fields
            .iter()
            .map(|schema| {
                let raw = values.get(schema.name).map_or("", String::as_str);
                (schema.name, schema.normalization.apply(raw))
            })
            .collect();

        let mut errors = BTreeMap::new();
        for schema in &self.fields {
            let value = normalized.get(schema.name).map_or("", String::as_str);
            if let Some(message) = schema
                .rules
                .iter()
                .find_map(|rule| rule.check(value, &normalized))
            {
                errors.insert(schema.name, message.to_owned());
            }
        }

        if errors.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(errors)
        }
    }
}

fn password_strength_rules(field: FieldSchema) -> FieldSchema {
    field
        .rule(Rule::MinLength {
            min: 8,
            message: "Password must be at least 8 characters",
        })
        .rule(Rule::Pattern {
            pattern: DIGIT_PATTERN,
            message: "Password must contain at least one number",
        })
        .rule(Rule::Pattern {
            pattern: LOWERCASE_PATTERN,
            message: "Password must contain at least one lowercase letter",
        })
        .rule(Rule::Pattern {
            pattern: UPPERCASE_PATTERN,
            message: "Password must contain at least one uppercase letter",
        })
        .rule(Rule::Pattern {
            pattern: SYMBOL_PATTERN,
            message: "Password must contain at least one symbol",
        })
}

fn email_field() -> FieldSchema {
    FieldSchema::new(EMAIL)
        .normalized(Normalization::TrimLowercase)
        .rule(Rule::Required {
            message: "Email is required",
        })
        .rule(Rule::Pattern {
            pattern: EMAIL_PATTERN,
            message: "Please enter a valid email address",
        })
}

/// Schema for the login form.
pub fn login_schema() -> FormSchema {
    FormSchema::new(vec![
        email_field(),
        password_strength_rules(FieldSchema::new(PASSWORD)),
    ])
}

/// Schema for the signup form, including confirm-password equality.
pub fn signup_schema() -> FormSchema {
    FormSchema::new(vec![
        email_field(),
        password_strength_rules(FieldSchema::new(PASSWORD)),
        FieldSchema::new(CONFIRM_PASSWORD)
            .rule(Rule::Required {
                message: "Please confirm your password",
            })
            .rule(Rule::MatchesField {
                other: PASSWORD,
                message: "Passwords do not match",
            }),
    ])
}

/// Schema for the create-post form.
pub fn post_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldSchema::new(TITLE).rule(Rule::Required {
            message: "Title is required",
        }),
        FieldSchema::new(BODY).rule(Rule::MinLength {
            min: 10,
            message: "Content must be at least 10 characters",
        }),
    ])
}
