//! Field validators for the registration form.
//!
//! Each validator takes a candidate value and returns the localized message
//! for a rejected one. `validate_representative_field` and
//! `validate_member_field` map fields to their validators, and
//! `validate_form` is the whole-object combinator used for aggregate
//! validity.

use std::sync::OnceLock;

use regex::Regex;
use shared::{
    domain::{
        RegistrationForm, Representative, SessionCount, TeamMember, MAX_HEADCOUNT, MIN_HEADCOUNT,
    },
    error::{Field, FieldError, FieldPath},
};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

fn tax_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ASCII hyphen or U+2010, then a digit or verification 'k'.
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+[-‐][0-9kK]$").expect("tax id pattern"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("phone pattern"))
}

pub fn required_text(field: Field, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("Por favor complete el campo {}", field.label()))
    } else {
        None
    }
}

pub fn email(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("El email es obligatorio".into())
    } else if !email_pattern().is_match(value) {
        Some("Por favor ingrese un email válido".into())
    } else {
        None
    }
}

pub fn tax_id(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("El RUT de la empresa es obligatorio".into())
    } else if !tax_id_pattern().is_match(value) {
        Some("El RUT debe tener el formato correcto (ejemplo: 12345678-9)".into())
    } else {
        None
    }
}

/// Phone is optional: absence (or blank) is valid, a present value must
/// look like a phone number.
pub fn phone(value: Option<&str>) -> Option<String> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() || phone_pattern().is_match(value) {
        None
    } else {
        Some("Por favor ingrese un número de teléfono válido".into())
    }
}

pub fn representative_sessions(value: Option<SessionCount>) -> Option<String> {
    if value.is_none() {
        Some("Debe seleccionar el número de sesiones".into())
    } else {
        None
    }
}

/// Team members cannot opt out of every session.
pub fn member_sessions(value: Option<SessionCount>) -> Option<String> {
    match value {
        None => Some("Número de sesiones es obligatorio".into()),
        Some(SessionCount::Skip) => {
            Some("Los miembros del equipo deben elegir 1 o 2 sesiones".into())
        }
        Some(_) => None,
    }
}

pub fn headcount(value: u32) -> Option<String> {
    if value < MIN_HEADCOUNT {
        Some("Debe incluir al menos 1 persona".into())
    } else if value > MAX_HEADCOUNT {
        Some("El máximo permitido es 50 personas por registro".into())
    } else {
        None
    }
}

/// Fields validated on the representative, in display order.
pub const REPRESENTATIVE_FIELDS: [Field; 9] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Role,
    Field::Company,
    Field::TaxId,
    Field::Phone,
    Field::Sessions,
    Field::Headcount,
];

/// Fields validated on each team member, in display order.
pub const MEMBER_FIELDS: [Field; 6] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Role,
    Field::Phone,
    Field::Sessions,
];

pub fn validate_representative_field(
    representative: &Representative,
    field: Field,
) -> Option<FieldError> {
    let message = match field {
        Field::FirstName => required_text(field, &representative.first_name),
        Field::LastName => required_text(field, &representative.last_name),
        Field::Email => email(&representative.email),
        Field::Role => required_text(field, &representative.role),
        Field::Company => required_text(field, &representative.company),
        Field::TaxId => tax_id(&representative.tax_id),
        Field::Phone => phone(representative.phone.as_deref()),
        Field::Sessions => representative_sessions(representative.sessions),
        Field::Headcount => headcount(representative.headcount),
        Field::RegisteringTeam => None,
    };
    message.map(|message| FieldError::new(FieldPath::Representative(field), message))
}

pub fn validate_member_field(index: usize, member: &TeamMember, field: Field) -> Option<FieldError> {
    let message = match field {
        Field::FirstName => required_text(field, &member.first_name),
        Field::LastName => required_text(field, &member.last_name),
        Field::Email => email(&member.email),
        Field::Role => required_text(field, &member.role),
        Field::Phone => phone(member.phone.as_deref()),
        Field::Sessions => member_sessions(member.sessions),
        Field::Company | Field::TaxId | Field::RegisteringTeam | Field::Headcount => None,
    };
    message.map(|message| FieldError::new(FieldPath::TeamMember { index, field }, message))
}

pub fn validate_representative(representative: &Representative) -> Vec<FieldError> {
    REPRESENTATIVE_FIELDS
        .iter()
        .filter_map(|field| validate_representative_field(representative, *field))
        .collect()
}

pub fn validate_member(index: usize, member: &TeamMember) -> Vec<FieldError> {
    MEMBER_FIELDS
        .iter()
        .filter_map(|field| validate_member_field(index, member, *field))
        .collect()
}

/// Whole-form combinator: the form is valid iff the representative passes
/// and, when a team is being registered, every member passes too.
pub fn validate_form(form: &RegistrationForm) -> Vec<FieldError> {
    let mut errors = validate_representative(&form.representative);
    if form.representative.registering_team {
        for (index, member) in form.team.iter().enumerate() {
            errors.extend(validate_member(index, member));
        }
    }
    errors
}
