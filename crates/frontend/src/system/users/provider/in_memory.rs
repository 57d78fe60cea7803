use std::cell::RefCell;
use std::collections::BTreeSet;

use async_trait::async_trait;
use contracts::system::users::{Group, NewUserDto, User, UserId, UserStatus};

use super::{seed, ProviderResult, UserProvider};

/// Аватар ui-avatars по отображаемому имени
pub fn avatar_url(name: &str, background: &str, color: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background={}&color={}",
        urlencoding::encode(name),
        background,
        color
    )
}

/// Провайдер, хранящий пользователей и группы в памяти страницы
#[derive(Debug, Default)]
pub struct InMemoryUserProvider {
    users: RefCell<Vec<User>>,
    groups: RefCell<Vec<Group>>,
}

impl InMemoryUserProvider {
    pub fn new(users: Vec<User>, groups: Vec<Group>) -> Self {
        Self {
            users: RefCell::new(users),
            groups: RefCell::new(groups),
        }
    }

    /// Провайдер с демо-данными
    pub fn seeded() -> Self {
        Self::new(seed::users(), seed::groups())
    }

    fn with_user<R>(&self, id: UserId, f: impl FnOnce(&mut User) -> R) -> Option<R> {
        self.users.borrow_mut().iter_mut().find(|u| u.id == id).map(f)
    }
}

#[async_trait(?Send)]
impl UserProvider for InMemoryUserProvider {
    async fn list_users(&self) -> ProviderResult<Vec<User>> {
        Ok(self.users.borrow().clone())
    }

    async fn list_groups(&self) -> ProviderResult<Vec<Group>> {
        Ok(self.groups.borrow().clone())
    }

    async fn set_user_status(&self, id: UserId, status: UserStatus) -> ProviderResult<bool> {
        Ok(self.with_user(id, |user| user.status = status).is_some())
    }

    async fn toggle_user_group(&self, id: UserId, group_name: &str) -> ProviderResult<bool> {
        let updated = self.with_user(id, |user| {
            if !user.groups.remove(group_name) {
                user.groups.insert(group_name.to_string());
            }
        });
        Ok(updated.is_some())
    }

    async fn set_user_groups(&self, id: UserId, groups: BTreeSet<String>) -> ProviderResult<bool> {
        Ok(self.with_user(id, |user| user.groups = groups).is_some())
    }

    async fn delete_user(&self, id: UserId) -> ProviderResult<bool> {
        let mut users = self.users.borrow_mut();
        match users.iter().position(|u| u.id == id) {
            Some(index) => {
                users.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_user(&self, dto: NewUserDto) -> ProviderResult<User> {
        let mut users = self.users.borrow_mut();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            avatar: Some(avatar_url(&dto.name, "007bff", "fff")),
            name: dto.name,
            email: dto.email,
            status: dto.status,
            groups: dto.groups,
            role: dto.role,
            join_date: dto.join_date,
            last_login: dto.last_login,
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::users::testing::{at, new_user};
    use futures::executor::block_on;

    #[test]
    fn test_seeded_directory() {
        let provider = InMemoryUserProvider::seeded();
        let users = block_on(provider.list_users()).unwrap();
        let groups = block_on(provider.list_groups()).unwrap();

        assert_eq!(users.len(), 12);
        assert_eq!(users.iter().map(|u| u.id).max(), Some(12));
        assert_eq!(groups.len(), 3);
        assert_eq!(users[0].name, "John Doe");
        assert!(users[0].is_in_group("Administrators"));
        assert_eq!(users[0].join_date, at(2023, 1, 15, 0, 0).date());
        assert_eq!(users[0].last_login, at(2024, 8, 13, 9, 30));
        assert_eq!(
            users[0].avatar.as_deref(),
            Some("https://ui-avatars.com/api/?name=John%20Doe&background=007bff&color=fff")
        );
    }

    #[test]
    fn test_create_assigns_next_id_and_avatar() {
        let provider = InMemoryUserProvider::seeded();
        let user = block_on(provider.create_user(new_user("Ann", "a@x.com"))).unwrap();
        assert_eq!(user.id, 13);
        assert_eq!(
            user.avatar.as_deref(),
            Some("https://ui-avatars.com/api/?name=Ann&background=007bff&color=fff")
        );
        assert_eq!(block_on(provider.list_users()).unwrap().len(), 13);
    }

    #[test]
    fn test_create_after_delete_stays_above_max() {
        let provider = InMemoryUserProvider::seeded();
        assert!(block_on(provider.delete_user(5)).unwrap());
        let user = block_on(provider.create_user(new_user("Bo", "b@x.com"))).unwrap();
        assert_eq!(user.id, 13);

        let empty = InMemoryUserProvider::default();
        let first = block_on(empty.create_user(new_user("Cy", "c@x.com"))).unwrap();
        assert_eq!(first.id, 1);
    }

    #[test]
    fn test_toggle_group_adds_then_removes() {
        let provider = InMemoryUserProvider::seeded();
        let member = |p: &InMemoryUserProvider| {
            block_on(p.list_users())
                .unwrap()
                .into_iter()
                .find(|u| u.id == 5)
                .map(|u| u.is_in_group("Developers"))
        };

        assert_eq!(member(&provider), Some(false));
        assert!(block_on(provider.toggle_user_group(5, "Developers")).unwrap());
        assert_eq!(member(&provider), Some(true));
        assert!(block_on(provider.toggle_user_group(5, "Developers")).unwrap());
        assert_eq!(member(&provider), Some(false));
    }

    #[test]
    fn test_unknown_ids_answer_false() {
        let provider = InMemoryUserProvider::seeded();
        assert!(!block_on(provider.set_user_status(99, UserStatus::Inactive)).unwrap());
        assert!(!block_on(provider.toggle_user_group(99, "Support")).unwrap());
        assert!(!block_on(provider.set_user_groups(99, BTreeSet::new())).unwrap());
        assert!(!block_on(provider.delete_user(99)).unwrap());
        assert_eq!(block_on(provider.list_users()).unwrap().len(), 12);
    }

    #[test]
    fn test_status_and_group_replace() {
        let provider = InMemoryUserProvider::seeded();
        assert!(block_on(provider.set_user_status(3, UserStatus::Active)).unwrap());

        let groups: BTreeSet<String> = ["Developers", "Support"]
            .into_iter()
            .map(String::from)
            .collect();
        assert!(block_on(provider.set_user_groups(3, groups.clone())).unwrap());

        let users = block_on(provider.list_users()).unwrap();
        let user = users.iter().find(|u| u.id == 3).unwrap();
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.groups, groups);
    }

    #[test]
    fn test_delete_twice() {
        let provider = InMemoryUserProvider::seeded();
        assert!(block_on(provider.delete_user(2)).unwrap());
        assert!(!block_on(provider.delete_user(2)).unwrap());
        assert_eq!(block_on(provider.list_users()).unwrap().len(), 11);
    }
}
