//! Per-form ephemeral state.
//!
//! Tracks the value/error/touched triple for each schema field, re-validates
//! on every change, and gates the submit affordance while the form is
//! invalid or a submission is in flight. State lives only as long as its
//! screen; nothing is persisted.

use std::collections::BTreeMap;

use super::validation::{FieldName, FormSchema, ValidationOutcome};

/// Live state of one form bound to a [`FormSchema`].
///
/// # Examples
/// ```
/// use postboard::domain::FormState;
/// use postboard::domain::validation::{login_schema, EMAIL, PASSWORD};
///
/// let mut form = FormState::new(login_schema());
/// assert!(!form.can_submit());
/// form.set_value(EMAIL, "a@b.com");
/// form.set_value(PASSWORD, "Secret123!");
/// assert!(form.can_submit());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    schema: FormSchema,
    values: BTreeMap<FieldName, String>,
    touched: BTreeMap<FieldName, bool>,
    outcome: ValidationOutcome,
    in_flight: bool,
}

impl FormState {
    /// Initialise empty state for the schema; an empty form starts invalid
    /// whenever the schema has any failing rule on empty input.
    pub fn new(schema: FormSchema) -> Self {
        let values: BTreeMap<FieldName, String> = schema
            .field_names()
            .map(|name| (name, String::new()))
            .collect();
        let touched = schema.field_names().map(|name| (name, false)).collect();
        let outcome = schema.validate(&values);
        Self {
            schema,
            values,
            touched,
            outcome,
            in_flight: false,
        }
    }

    /// Record a keystroke: store the raw value, mark the field touched, and
    /// re-validate the whole form. Unknown fields are ignored.
    pub fn set_value(&mut self, field: FieldName, value: impl Into<String>) {
        if !self.values.contains_key(field) {
            return;
        }
        self.values.insert(field, value.into());
        self.touched.insert(field, true);
        self.outcome = self.schema.validate(&self.values);
    }

    /// Raw value currently held for a field.
    pub fn value(&self, field: FieldName) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    /// Whether the user has edited the field.
    pub fn touched(&self, field: FieldName) -> bool {
        self.touched.get(field).copied().unwrap_or(false)
    }

    /// Current error message for a field, if any.
    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.outcome.error(field)
    }

    /// Whether every field currently satisfies its rules.
    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    /// Whether a submission is currently in flight.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submit affordance: enabled only while valid and not in flight.
    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.in_flight
    }

    /// Try to start a submission; returns false when gated.
    pub fn begin_submission(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Mark the in-flight submission as settled.
    pub fn finish_submission(&mut self) {
        self.in_flight = false;
    }

    /// Normalised values ready for submission, keyed by field.
    pub fn submission_values(&self) -> BTreeMap<FieldName, String> {
        self.values
            .iter()
            .map(|(name, value)| (*name, self.schema.normalize(*name, value.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::validation::{login_schema, post_schema, EMAIL, PASSWORD, TITLE};

    #[test]
    fn empty_form_starts_invalid_and_untouched() {
        let form = FormState::new(login_schema());
        assert!(!form.is_valid());
        assert!(!form.touched(EMAIL));
        assert!(form.error(EMAIL).is_some());
    }

    #[test]
    fn every_change_revalidates() {
        let mut form = FormState::new(login_schema());
        form.set_value(EMAIL, "a@b.com");
        form.set_value(PASSWORD, "Secret123!");
        assert!(form.is_valid());

        form.set_value(PASSWORD, "short");
        assert!(!form.is_valid());
        assert!(form.touched(PASSWORD));
    }

    #[test]
    fn submission_gates_on_validity_and_in_flight() {
        let mut form = FormState::new(login_schema());
        assert!(!form.begin_submission());

        form.set_value(EMAIL, "a@b.com");
        form.set_value(PASSWORD, "Secret123!");
        assert!(form.begin_submission());

        // A second submission while one is pending is suppressed.
        assert!(!form.can_submit());
        assert!(!form.begin_submission());

        form.finish_submission();
        assert!(form.can_submit());
    }

    #[test]
    fn submission_values_are_normalised() {
        let mut form = FormState::new(login_schema());
        form.set_value(EMAIL, "  A@B.COM ");
        let values = form.submission_values();
        assert_eq!(values.get(EMAIL).map(String::as_str), Some("a@b.com"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut form = FormState::new(post_schema());
        form.set_value("nonexistent", "value");
        assert_eq!(form.value("nonexistent"), "");
        assert_eq!(form.value(TITLE), "");
    }
}
