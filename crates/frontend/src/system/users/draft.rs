use std::collections::BTreeSet;

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use contracts::system::users::{Group, NewUserDto, UserStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid email format")]
    InvalidEmail,
}

/// Несохранённое состояние формы создания пользователя
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
    pub groups: BTreeSet<String>,
    pub join_date: NaiveDate,
    pub last_login: NaiveDateTime,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self::new(&[], local_now())
    }
}

/// Текущее локальное время с точностью до секунды
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

impl UserDraft {
    /// Новый черновик: активен, дата вступления сегодня, выбрана первая группа
    pub fn new(groups: &[Group], now: NaiveDateTime) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: String::new(),
            status: UserStatus::Active,
            groups: groups.first().map(|g| g.name.clone()).into_iter().collect(),
            join_date: now.date(),
            last_login: now,
        }
    }

    pub fn toggle_group(&mut self, group_name: &str, checked: bool) {
        if checked {
            self.groups.insert(group_name.to_string());
        } else {
            self.groups.remove(group_name);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    pub fn to_dto(&self) -> NewUserDto {
        let role = self.role.trim();
        NewUserDto {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            status: self.status,
            groups: self.groups.clone(),
            role: if role.is_empty() {
                None
            } else {
                Some(role.to_string())
            },
            join_date: self.join_date,
            last_login: self.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::users::testing::{at, sample_groups};

    #[test]
    fn test_defaults() {
        let now = at(2024, 8, 13, 9, 30);
        let draft = UserDraft::new(&sample_groups(), now);
        assert_eq!(draft.status, UserStatus::Active);
        assert_eq!(draft.join_date, now.date());
        assert_eq!(draft.last_login, now);
        assert_eq!(
            draft.groups.iter().cloned().collect::<Vec<_>>(),
            vec!["Administrators".to_string()]
        );

        let no_groups = UserDraft::new(&[], now);
        assert!(no_groups.groups.is_empty());
    }

    #[test]
    fn test_required_fields() {
        let mut draft = UserDraft::new(&[], at(2024, 1, 1, 0, 0));
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingFields(vec!["name", "email"]))
        );

        draft.name = "Ann".into();
        draft.email = "   ".into();
        let err = draft.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields: email");

        draft.email = "ann.example.com".into();
        assert_eq!(draft.validate(), Err(ValidationError::InvalidEmail));

        draft.email = "a@x.com".into();
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_role_is_optional_and_dto_is_trimmed() {
        let mut draft = UserDraft::new(&[], at(2024, 1, 1, 0, 0));
        draft.name = "  Ann ".into();
        draft.email = "a@x.com ".into();
        assert!(draft.validate().is_ok());

        let dto = draft.to_dto();
        assert_eq!(dto.name, "Ann");
        assert_eq!(dto.email, "a@x.com");
        assert_eq!(dto.role, None);

        draft.role = "Tester".into();
        assert_eq!(draft.to_dto().role.as_deref(), Some("Tester"));
    }

    #[test]
    fn test_toggle_group() {
        let mut draft = UserDraft::new(&sample_groups(), at(2024, 1, 1, 0, 0));
        draft.toggle_group("Support", true);
        draft.toggle_group("Support", true);
        draft.toggle_group("Administrators", false);
        assert_eq!(
            draft.groups.iter().cloned().collect::<Vec<_>>(),
            vec!["Support".to_string()]
        );
    }
}
