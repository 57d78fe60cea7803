use serde::{Deserialize, Serialize};

/// Статус учётной записи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    /// Код, совпадает с serde-представлением
    pub fn code(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }

    /// Глагол для уведомлений ("activated" / "deactivated")
    pub fn past_tense(&self) -> &'static str {
        match self {
            UserStatus::Active => "activated",
            UserStatus::Inactive => "deactivated",
        }
    }

    pub fn all() -> Vec<UserStatus> {
        vec![UserStatus::Active, UserStatus::Inactive]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}
