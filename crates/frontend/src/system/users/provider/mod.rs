//! Провайдер данных страницы управления пользователями
//!
//! Страница работает с данными только через [`UserProvider`]. Встроенная
//! реализация держит всё в памяти и сбрасывается при перезагрузке; сетевой
//! провайдер подключается без изменений во view-model.

mod in_memory;
mod seed;

use std::collections::BTreeSet;

use async_trait::async_trait;
use contracts::system::users::{Group, NewUserDto, User, UserId, UserStatus};
use thiserror::Error;

pub use in_memory::InMemoryUserProvider;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Операции над коллекциями пользователей и групп.
///
/// Для неизвестного id изменения возвращают `Ok(false)`; `Err` только при
/// сбое самого вызова.
#[async_trait(?Send)]
pub trait UserProvider {
    async fn list_users(&self) -> ProviderResult<Vec<User>>;

    async fn list_groups(&self) -> ProviderResult<Vec<Group>>;

    async fn set_user_status(&self, id: UserId, status: UserStatus) -> ProviderResult<bool>;

    /// Добавить группу, если пользователь не состоит в ней, иначе убрать
    async fn toggle_user_group(&self, id: UserId, group_name: &str) -> ProviderResult<bool>;

    /// Заменить весь набор групп
    async fn set_user_groups(&self, id: UserId, groups: BTreeSet<String>) -> ProviderResult<bool>;

    async fn delete_user(&self, id: UserId) -> ProviderResult<bool>;

    /// Назначить id больше всех существующих и добавить пользователя
    async fn create_user(&self, dto: NewUserDto) -> ProviderResult<User>;
}
