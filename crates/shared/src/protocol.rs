use serde::{Deserialize, Serialize};

use crate::domain::{RegistrationForm, Representative, SessionCount, TeamMember};

/// Per-person record as the recording service expects it. Company identity
/// and headcount never appear here; they live at the top level of the
/// registration payload or are dropped entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPayload {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub cargo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(rename = "cuantasSesiones")]
    pub cuantas_sesiones: SessionCount,
}

/// Wire body POSTed to the recording service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    pub empresa: String,
    #[serde(rename = "rutEmpresa")]
    pub rut_empresa: String,
    pub representante: PersonPayload,
    pub equipo: Vec<PersonPayload>,
}

impl PersonPayload {
    fn from_representative(representative: &Representative) -> Self {
        Self {
            nombre: representative.first_name.clone(),
            apellido: representative.last_name.clone(),
            email: representative.email.clone(),
            cargo: representative.role.clone(),
            telefono: representative.phone.clone(),
            // The coordinator only submits validated state; an unselected
            // choice can still serialize and falls back to opting out.
            cuantas_sesiones: representative.sessions.unwrap_or(SessionCount::Skip),
        }
    }

    fn from_member(member: &TeamMember) -> Self {
        Self {
            nombre: member.first_name.clone(),
            apellido: member.last_name.clone(),
            email: member.email.clone(),
            cargo: member.role.clone(),
            telefono: member.phone.clone(),
            cuantas_sesiones: member.sessions.unwrap_or(SessionCount::One),
        }
    }
}

impl RegistrationPayload {
    /// Maps form state into the wire shape: company name and tax ID are
    /// hoisted to the top level, the headcount and team flag are dropped,
    /// and the roster is carried over unchanged and in order.
    pub fn from_form(form: &RegistrationForm) -> Self {
        Self {
            empresa: form.representative.company.clone(),
            rut_empresa: form.representative.tax_id.clone(),
            representante: PersonPayload::from_representative(&form.representative),
            equipo: form.team.iter().map(PersonPayload::from_member).collect(),
        }
    }
}

/// Structured result the recording service replies with, when its response
/// body is readable at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}
