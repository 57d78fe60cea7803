use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub use crate::enums::user_status::UserStatus;

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    /// Названия групп пользователя
    #[serde(default)]
    pub groups: BTreeSet<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub join_date: NaiveDate,
    pub last_login: NaiveDateTime,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn is_in_group(&self, group_name: &str) -> bool {
        self.groups.contains(group_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub description: String,
}

/// Данные для создания пользователя; id и аватар назначает провайдер
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserDto {
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    #[serde(default)]
    pub groups: BTreeSet<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub join_date: NaiveDate,
    pub last_login: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: 7,
            name: "Robert Taylor".into(),
            email: "robert.taylor@example.com".into(),
            status: UserStatus::Inactive,
            groups: ["Developers".to_string()].into_iter().collect(),
            role: None,
            join_date: NaiveDate::from_ymd_opt(2023, 7, 22).unwrap(),
            last_login: NaiveDate::from_ymd_opt(2024, 8, 13)
                .unwrap()
                .and_hms_opt(10, 45, 0)
                .unwrap(),
            avatar: None,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["status"], "inactive");
        assert_eq!(value["groups"], serde_json::json!(["Developers"]));
        assert_eq!(value["join_date"], "2023-07-22");

        let back: User = serde_json::from_value(value).unwrap();
        assert_eq!(back, user);
        assert!(back.is_in_group("Developers"));
        assert!(!back.is_in_group("Support"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "id": 1,
            "name": "Ann",
            "email": "a@x.com",
            "status": "active",
            "join_date": "2024-01-01",
            "last_login": "2024-01-01T08:00:00"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.groups.is_empty());
        assert_eq!(user.role, None);
        assert_eq!(user.avatar, None);
    }
}
