//! Тестовые данные и управляемые заглушки для тестов управления пользователями

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use contracts::system::users::{Group, NewUserDto, User, UserId, UserStatus};

use super::provider::{InMemoryUserProvider, ProviderError, ProviderResult, UserProvider};
use super::view_model::{ConfirmDialog, Timer};

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn sample_users(count: u64) -> Vec<User> {
    (1..=count)
        .map(|id| User {
            id,
            name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            status: UserStatus::Active,
            groups: BTreeSet::new(),
            role: None,
            join_date: at(2023, 1, 1, 0, 0).date(),
            last_login: at(2024, 1, 1, 12, 0),
            avatar: None,
        })
        .collect()
}

pub fn sample_groups() -> Vec<Group> {
    ["Administrators", "Developers", "Support"]
        .into_iter()
        .zip(1u64..)
        .map(|(name, id)| Group {
            id,
            name: name.to_string(),
            description: format!("{name} team"),
        })
        .collect()
}

pub fn new_user(name: &str, email: &str) -> NewUserDto {
    NewUserDto {
        name: name.to_string(),
        email: email.to_string(),
        status: UserStatus::Active,
        groups: BTreeSet::new(),
        role: None,
        join_date: at(2024, 8, 13, 0, 0).date(),
        last_login: at(2024, 8, 13, 9, 0),
    }
}

/// Отвечает на подтверждения из очереди (по умолчанию "да") и запоминает вопросы
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<bool>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            prompts: RefCell::default(),
        }
    }
}

impl ConfirmDialog for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(true)
    }
}

type Task = Box<dyn FnOnce()>;

/// Таймер, который выполняет задачи только по команде теста
#[derive(Default)]
pub struct ManualTimer {
    tasks: RefCell<Vec<(Duration, Task)>>,
}

impl ManualTimer {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.tasks.borrow().iter().map(|(d, _)| *d).collect()
    }

    pub fn fire_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for (_, task) in tasks {
            task();
        }
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay, task));
    }
}

/// Провайдер в памяти, который можно перевести в режим ошибок; считает
/// изменяющие вызовы
#[derive(Default)]
pub struct FlakyProvider {
    inner: InMemoryUserProvider,
    pub failing: Cell<bool>,
    pub mutations: Cell<usize>,
}

impl FlakyProvider {
    pub fn seeded() -> Self {
        Self {
            inner: InMemoryUserProvider::seeded(),
            ..Self::default()
        }
    }

    fn check(&self) -> ProviderResult<()> {
        if self.failing.get() {
            Err(ProviderError::Unavailable("connection reset".into()))
        } else {
            Ok(())
        }
    }

    fn mutate(&self) -> ProviderResult<()> {
        self.mutations.set(self.mutations.get() + 1);
        self.check()
    }
}

#[async_trait(?Send)]
impl UserProvider for FlakyProvider {
    async fn list_users(&self) -> ProviderResult<Vec<User>> {
        self.check()?;
        self.inner.list_users().await
    }

    async fn list_groups(&self) -> ProviderResult<Vec<Group>> {
        self.check()?;
        self.inner.list_groups().await
    }

    async fn set_user_status(&self, id: UserId, status: UserStatus) -> ProviderResult<bool> {
        self.mutate()?;
        self.inner.set_user_status(id, status).await
    }

    async fn toggle_user_group(&self, id: UserId, group_name: &str) -> ProviderResult<bool> {
        self.mutate()?;
        self.inner.toggle_user_group(id, group_name).await
    }

    async fn set_user_groups(&self, id: UserId, groups: BTreeSet<String>) -> ProviderResult<bool> {
        self.mutate()?;
        self.inner.set_user_groups(id, groups).await
    }

    async fn delete_user(&self, id: UserId) -> ProviderResult<bool> {
        self.mutate()?;
        self.inner.delete_user(id).await
    }

    async fn create_user(&self, dto: NewUserDto) -> ProviderResult<User> {
        self.mutate()?;
        if dto.email.ends_with("@blocked.test") {
            return Err(ProviderError::Rejected("domain is blocked".into()));
        }
        self.inner.create_user(dto).await
    }
}

/// Future, остающийся в Pending заданное число опросов и будящий себя каждый раз
struct PendingPolls(u64);

impl Future for PendingPolls {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            return Poll::Ready(());
        }
        self.0 -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// Провайдер в памяти, где удаление меньших id идёт дольше: параллельные
/// удаления завершаются по убыванию id. Считает загрузки и пишет порядок
/// завершения.
#[derive(Default)]
pub struct SlowDeleteProvider {
    inner: InMemoryUserProvider,
    pub list_calls: Cell<usize>,
    pub group_calls: Cell<usize>,
    pub finished: RefCell<Vec<UserId>>,
}

impl SlowDeleteProvider {
    pub fn seeded() -> Self {
        Self {
            inner: InMemoryUserProvider::seeded(),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl UserProvider for SlowDeleteProvider {
    async fn list_users(&self) -> ProviderResult<Vec<User>> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.inner.list_users().await
    }

    async fn list_groups(&self) -> ProviderResult<Vec<Group>> {
        self.group_calls.set(self.group_calls.get() + 1);
        self.inner.list_groups().await
    }

    async fn set_user_status(&self, id: UserId, status: UserStatus) -> ProviderResult<bool> {
        self.inner.set_user_status(id, status).await
    }

    async fn toggle_user_group(&self, id: UserId, group_name: &str) -> ProviderResult<bool> {
        self.inner.toggle_user_group(id, group_name).await
    }

    async fn set_user_groups(&self, id: UserId, groups: BTreeSet<String>) -> ProviderResult<bool> {
        self.inner.set_user_groups(id, groups).await
    }

    async fn delete_user(&self, id: UserId) -> ProviderResult<bool> {
        PendingPolls(20u64.saturating_sub(id)).await;
        self.finished.borrow_mut().push(id);
        self.inner.delete_user(id).await
    }

    async fn create_user(&self, dto: NewUserDto) -> ProviderResult<User> {
        self.inner.create_user(dto).await
    }
}
