use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every editable field of the registration form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Role,
    Company,
    TaxId,
    Phone,
    Sessions,
    RegisteringTeam,
    Headcount,
}

impl Field {
    /// Label shown next to the field on the form, used inside validation
    /// messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "Nombre",
            Field::LastName => "Apellido",
            Field::Email => "Email",
            Field::Role => "Cargo",
            Field::Company => "Empresa",
            Field::TaxId => "RUT Empresa",
            Field::Phone => "Teléfono",
            Field::Sessions => "Número de Sesiones",
            Field::RegisteringTeam => "Inscripción de equipo",
            Field::Headcount => "Cantidad de Personas",
        }
    }

    /// Stable key used when rendering a field path.
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "nombre",
            Field::LastName => "apellido",
            Field::Email => "email",
            Field::Role => "cargo",
            Field::Company => "empresa",
            Field::TaxId => "rutEmpresa",
            Field::Phone => "telefono",
            Field::Sessions => "cuantasSesiones",
            Field::RegisteringTeam => "soloInscribiendoEquipo",
            Field::Headcount => "cantidadPersonas",
        }
    }
}

/// Locates a field: on the representative, or on a team member row by its
/// position in the roster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldPath {
    Representative(Field),
    TeamMember { index: usize, field: Field },
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Representative(field) => {
                write!(f, "representante.{}", field.key())
            }
            FieldPath::TeamMember { index, field } => {
                write!(f, "equipo.{}.{}", index, field.key())
            }
        }
    }
}

/// A field-scoped validation failure with its localized message. Field
/// errors never block the evaluation of other fields.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{path}: {message}")]
pub struct FieldError {
    pub path: FieldPath,
    pub message: String,
}

impl FieldError {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}
