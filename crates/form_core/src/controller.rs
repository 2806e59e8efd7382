//! Live form state with per-field revalidation.

use std::collections::BTreeMap;

use shared::{
    domain::{RegistrationForm, SessionCount},
    error::{Field, FieldError, FieldPath},
};

use crate::{roster, rules};

/// Holds the current form values together with the inline field errors.
/// Every mutation re-validates the touched field, so the error set always
/// reflects what the user last entered; aggregate validity is computed over
/// the whole form regardless of which fields were touched.
#[derive(Debug, Clone, Default)]
pub struct RegistrationController {
    form: RegistrationForm,
    errors: BTreeMap<FieldPath, String>,
}

impl RegistrationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Inline errors for touched fields, in display order.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.errors
            .iter()
            .map(|(path, message)| FieldError::new(*path, message.clone()))
            .collect()
    }

    pub fn error_for(&self, path: FieldPath) -> Option<&str> {
        self.errors.get(&path).map(String::as_str)
    }

    /// The form can be submitted: the representative passes and, when a
    /// team is being registered, every roster row passes. Untouched fields
    /// count; unselected session choices are not pre-valid.
    pub fn is_valid(&self) -> bool {
        rules::validate_form(&self.form).is_empty()
    }

    /// Validates everything and records the errors inline, as a submit
    /// attempt does.
    pub fn validate_all(&mut self) -> Vec<FieldError> {
        let errors = rules::validate_form(&self.form);
        self.errors = errors
            .iter()
            .map(|error| (error.path, error.message.clone()))
            .collect();
        errors
    }

    /// Sets one of the representative's free-text fields and re-validates
    /// it. Non-text fields have dedicated setters and are left untouched
    /// here. A blank phone is stored as absent.
    pub fn set_representative_text(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Option<FieldError> {
        let value = value.into();
        let representative = &mut self.form.representative;
        match field {
            Field::FirstName => representative.first_name = value,
            Field::LastName => representative.last_name = value,
            Field::Email => representative.email = value,
            Field::Role => representative.role = value,
            Field::Company => representative.company = value,
            Field::TaxId => representative.tax_id = value,
            Field::Phone => {
                representative.phone = (!value.trim().is_empty()).then_some(value);
            }
            Field::Sessions | Field::RegisteringTeam | Field::Headcount => {
                return self.current_error(FieldPath::Representative(field));
            }
        }
        self.revalidate_representative_field(field)
    }

    /// Sets a free-text field on the roster row at `index`; out-of-range
    /// rows are ignored.
    pub fn set_member_text(
        &mut self,
        index: usize,
        field: Field,
        value: impl Into<String>,
    ) -> Option<FieldError> {
        let value = value.into();
        let Some(member) = self.form.team.get_mut(index) else {
            return None;
        };
        match field {
            Field::FirstName => member.first_name = value,
            Field::LastName => member.last_name = value,
            Field::Email => member.email = value,
            Field::Role => member.role = value,
            Field::Phone => {
                member.phone = (!value.trim().is_empty()).then_some(value);
            }
            Field::Company | Field::TaxId | Field::Sessions | Field::RegisteringTeam
            | Field::Headcount => {
                return self.current_error(FieldPath::TeamMember { index, field });
            }
        }
        self.revalidate_member_field(index, field)
    }

    pub fn set_representative_sessions(
        &mut self,
        sessions: Option<SessionCount>,
    ) -> Option<FieldError> {
        self.form.representative.sessions = sessions;
        self.revalidate_representative_field(Field::Sessions)
    }

    pub fn set_member_sessions(
        &mut self,
        index: usize,
        sessions: Option<SessionCount>,
    ) -> Option<FieldError> {
        let Some(member) = self.form.team.get_mut(index) else {
            return None;
        };
        member.sessions = sessions;
        self.revalidate_member_field(index, Field::Sessions)
    }

    /// Turning the team flag on reconciles the roster to the current
    /// headcount; turning it off clears the roster (its data is not
    /// submitted) along with any member errors.
    pub fn set_registering_team(&mut self, registering: bool) {
        self.form.representative.registering_team = registering;
        if registering {
            self.sync_roster();
        } else {
            self.form.team.clear();
            self.errors
                .retain(|path, _| matches!(path, FieldPath::Representative(_)));
        }
    }

    /// Updates the headcount, re-validates it, and reconciles the roster
    /// when a team is being registered.
    pub fn set_headcount(&mut self, headcount: u32) -> Option<FieldError> {
        self.form.representative.headcount = headcount;
        if self.form.representative.registering_team {
            self.sync_roster();
        }
        self.revalidate_representative_field(Field::Headcount)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn sync_roster(&mut self) {
        if roster::reconcile_team(&mut self.form.team, self.form.representative.headcount) {
            let len = self.form.team.len();
            self.errors.retain(|path, _| match path {
                FieldPath::TeamMember { index, .. } => *index < len,
                FieldPath::Representative(_) => true,
            });
        }
    }

    fn revalidate_representative_field(&mut self, field: Field) -> Option<FieldError> {
        let error = rules::validate_representative_field(&self.form.representative, field);
        self.record(FieldPath::Representative(field), error)
    }

    fn revalidate_member_field(&mut self, index: usize, field: Field) -> Option<FieldError> {
        let member = self.form.team.get(index)?;
        let error = rules::validate_member_field(index, member, field);
        self.record(FieldPath::TeamMember { index, field }, error)
    }

    fn record(&mut self, path: FieldPath, error: Option<FieldError>) -> Option<FieldError> {
        match error {
            Some(error) => {
                self.errors.insert(path, error.message.clone());
                Some(error)
            }
            None => {
                self.errors.remove(&path);
                None
            }
        }
    }

    fn current_error(&self, path: FieldPath) -> Option<FieldError> {
        self.errors
            .get(&path)
            .map(|message| FieldError::new(path, message.clone()))
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
