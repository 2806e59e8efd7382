use serde::{Deserialize, Serialize};

/// Smallest accepted headcount (the representative alone).
pub const MIN_HEADCOUNT: u32 = 1;
/// Largest accepted headcount per registration.
pub const MAX_HEADCOUNT: u32 = 50;

/// Number of event sessions a person will attend. The representative may
/// opt out entirely; team members must attend at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SessionCount {
    Skip,
    One,
    Two,
}

impl From<SessionCount> for u8 {
    fn from(value: SessionCount) -> Self {
        match value {
            SessionCount::Skip => 0,
            SessionCount::One => 1,
            SessionCount::Two => 2,
        }
    }
}

impl TryFrom<u8> for SessionCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SessionCount::Skip),
            1 => Ok(SessionCount::One),
            2 => Ok(SessionCount::Two),
            other => Err(format!("invalid session count: {other}")),
        }
    }
}

/// The primary registrant. Carries the company identity and the headcount
/// that drives the team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Representative {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub company: String,
    pub tax_id: String,
    pub phone: Option<String>,
    /// Starts unselected; the user must pick explicitly.
    pub sessions: Option<SessionCount>,
    pub registering_team: bool,
    pub headcount: u32,
}

impl Default for Representative {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            role: String::new(),
            company: String::new(),
            tax_id: String::new(),
            phone: None,
            sessions: None,
            registering_team: false,
            headcount: MIN_HEADCOUNT,
        }
    }
}

/// An additional registrant entered as part of the representative's
/// registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub sessions: Option<SessionCount>,
}

impl TeamMember {
    /// Blank roster row appended when the headcount grows.
    pub fn blank() -> Self {
        Self {
            sessions: Some(SessionCount::One),
            ..Self::default()
        }
    }
}

/// Full form state: one representative plus the ordered team roster.
/// Roster order is display order and submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub representative: Representative,
    pub team: Vec<TeamMember>,
}
