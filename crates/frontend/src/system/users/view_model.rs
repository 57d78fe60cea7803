//! Логика страницы управления пользователями.
//!
//! [`UserManagement`] владеет одним провайдером и управляет [`ManagementState`]
//! в [`StateStore`]. В браузере хранилище это сигнал Leptos, в тестах
//! `Rc<RefCell<_>>`. Состояние заимствуется только между await, не через них.
//!
//! Каждое изменяющее действие заканчивается одним исходом: перезагрузка и
//! уведомление об успехе либо уведомление об ошибке.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use contracts::system::users::{Group, User, UserId, UserStatus};
use futures::future::join_all;

use super::draft::{local_now, UserDraft};
use super::provider::UserProvider;
use super::ui::list::state::UsersListState;
use crate::shared::notifications::{NotificationCenter, NotificationKind, NOTIFICATION_TTL};

/// Синхронное подтверждение перед удалением
pub trait ConfirmDialog {
    fn confirm(&self, message: &str) -> bool;
}

/// Однократный отложенный запуск
pub trait Timer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Всё, что отображает страница
#[derive(Debug, Clone, Default)]
pub struct ManagementState {
    pub list: UsersListState,
    pub groups: Vec<Group>,
    pub draft: UserDraft,
    pub show_create_modal: bool,
    pub notifications: NotificationCenter,
    /// Вызовы провайдера, ожидающие завершения
    pub in_flight: usize,
}

impl ManagementState {
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

/// Общая ячейка с [`ManagementState`].
///
/// Если значение уже освобождено, чтение и запись дают `R::default()`.
pub trait StateStore: Clone + 'static {
    fn read<R: Default>(&self, f: impl FnOnce(&ManagementState) -> R) -> R;
    fn write<R: Default>(&self, f: impl FnOnce(&mut ManagementState) -> R) -> R;
}

impl StateStore for Rc<RefCell<ManagementState>> {
    fn read<R: Default>(&self, f: impl FnOnce(&ManagementState) -> R) -> R {
        f(&self.borrow())
    }

    fn write<R: Default>(&self, f: impl FnOnce(&mut ManagementState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Итог массового удаления; `deleted.len() + failed.len() == requested`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteOutcome {
    pub requested: usize,
    pub deleted: Vec<UserId>,
    pub failed: Vec<UserId>,
}

impl BulkDeleteOutcome {
    pub fn completed(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }
}

pub fn status_badge_class(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "status-active",
        UserStatus::Inactive => "status-inactive",
    }
}

pub fn is_user_in_group(user: &User, group_name: &str) -> bool {
    user.is_in_group(group_name)
}

#[derive(Clone)]
pub struct UserManagement<S: StateStore> {
    provider: Rc<dyn UserProvider>,
    confirm: Rc<dyn ConfirmDialog>,
    timer: Rc<dyn Timer>,
    state: S,
}

impl<S: StateStore> UserManagement<S> {
    pub fn new(
        provider: Rc<dyn UserProvider>,
        confirm: Rc<dyn ConfirmDialog>,
        timer: Rc<dyn Timer>,
        state: S,
    ) -> Self {
        Self {
            provider,
            confirm,
            timer,
            state,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub async fn init(&self) {
        self.load_users().await;
        self.load_groups().await;
    }

    // ------------------------------------------------------------------
    // Загрузка
    // ------------------------------------------------------------------

    pub async fn load_users(&self) -> bool {
        match self.track(self.provider.list_users()).await {
            Ok(users) => {
                log::debug!("loaded {} users", users.len());
                self.state.write(|s| s.list.set_users(users));
                true
            }
            Err(e) => {
                self.notify_error(format!("Failed to load users: {e}"));
                false
            }
        }
    }

    pub async fn load_groups(&self) -> bool {
        match self.track(self.provider.list_groups()).await {
            Ok(groups) => {
                log::debug!("loaded {} groups", groups.len());
                self.state.write(|s| s.groups = groups);
                true
            }
            Err(e) => {
                self.notify_error(format!("Failed to load groups: {e}"));
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Пагинация
    // ------------------------------------------------------------------

    pub fn first_page(&self) -> bool {
        self.state.write(|s| s.list.first_page())
    }

    pub fn previous_page(&self) -> bool {
        self.state.write(|s| s.list.previous_page())
    }

    pub fn next_page(&self) -> bool {
        self.state.write(|s| s.list.next_page())
    }

    pub fn last_page(&self) -> bool {
        self.state.write(|s| s.list.last_page())
    }

    pub fn go_to_page(&self, page: usize) -> bool {
        self.state.write(|s| s.list.go_to_page(page))
    }

    // ------------------------------------------------------------------
    // Выбор
    // ------------------------------------------------------------------

    pub fn toggle_select_all(&self) {
        self.state.write(|s| s.list.toggle_select_all());
    }

    pub fn toggle_select_user(&self, id: UserId) {
        self.state.write(|s| s.list.toggle_select_user(id));
    }

    pub fn is_user_selected(&self, id: UserId) -> bool {
        self.state.read(|s| s.list.is_selected(id))
    }

    pub fn all_selected(&self) -> bool {
        self.state.read(|s| s.list.all_selected())
    }

    // ------------------------------------------------------------------
    // Изменения
    // ------------------------------------------------------------------

    pub async fn activate_user(&self, id: UserId) -> bool {
        self.set_status(id, UserStatus::Active).await
    }

    pub async fn deactivate_user(&self, id: UserId) -> bool {
        self.set_status(id, UserStatus::Inactive).await
    }

    async fn set_status(&self, id: UserId, status: UserStatus) -> bool {
        let name = self.user_label(id);
        match self.track(self.provider.set_user_status(id, status)).await {
            Ok(true) => {
                self.load_users().await;
                self.notify_success(format!("User {name} {}", status.past_tense()));
                true
            }
            Ok(false) => {
                self.notify_error(format!("User {name} was not found"));
                false
            }
            Err(e) => {
                self.notify_error(format!("Failed to update status of {name}: {e}"));
                false
            }
        }
    }

    /// Переключить членство в группе; текст сообщения по состоянию до вызова
    pub async fn toggle_user_group(&self, id: UserId, group_name: &str) -> bool {
        let name = self.user_label(id);
        let was_member = self
            .state
            .read(|s| s.list.find(id).is_some_and(|u| u.is_in_group(group_name)));

        match self.track(self.provider.toggle_user_group(id, group_name)).await {
            Ok(true) => {
                self.load_users().await;
                let message = if was_member {
                    format!("User {name} removed from {group_name}")
                } else {
                    format!("User {name} added to {group_name}")
                };
                self.notify_success(message);
                true
            }
            Ok(false) => {
                self.notify_error(format!("User {name} was not found"));
                false
            }
            Err(e) => {
                self.notify_error(format!("Failed to change groups of {name}: {e}"));
                false
            }
        }
    }

    pub async fn replace_user_groups(&self, id: UserId, groups: BTreeSet<String>) -> bool {
        let name = self.user_label(id);
        match self.track(self.provider.set_user_groups(id, groups)).await {
            Ok(true) => {
                self.load_users().await;
                self.notify_success(format!("Groups of {name} updated"));
                true
            }
            Ok(false) => {
                self.notify_error(format!("User {name} was not found"));
                false
            }
            Err(e) => {
                self.notify_error(format!("Failed to change groups of {name}: {e}"));
                false
            }
        }
    }

    pub async fn delete_user(&self, id: UserId) -> bool {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this user?")
        {
            return false;
        }

        let name = self.user_label(id);
        match self.track(self.provider.delete_user(id)).await {
            Ok(true) => {
                self.state.write(|s| s.list.deselect(id));
                self.load_users().await;
                self.notify_success(format!("User {name} deleted"));
                true
            }
            Ok(false) => {
                self.notify_error(format!("User {name} was not found"));
                false
            }
            Err(e) => {
                self.notify_error(format!("Failed to delete {name}: {e}"));
                false
            }
        }
    }

    /// Удалить отмеченных после подтверждения; `None`, если ничего не запускалось
    pub async fn delete_selected_users(&self) -> Option<BulkDeleteOutcome> {
        let ids = self.state.read(|s| s.list.selected_ids());
        if ids.is_empty() {
            self.notify_error("Please select users to delete.");
            return None;
        }

        let prompt = format!(
            "Are you sure you want to delete {} selected user(s)?",
            ids.len()
        );
        if !self.confirm.confirm(&prompt) {
            return None;
        }

        Some(self.delete_users(&ids).await)
    }

    /// Одно удаление на каждый уникальный id, ожидание всех завершений, затем
    /// одна перезагрузка и по одному итоговому сообщению на вид исхода.
    pub async fn delete_users(&self, ids: &[UserId]) -> BulkDeleteOutcome {
        let unique: BTreeSet<UserId> = ids.iter().copied().collect();
        let mut outcome = BulkDeleteOutcome {
            requested: unique.len(),
            ..BulkDeleteOutcome::default()
        };
        if unique.is_empty() {
            return outcome;
        }

        let provider = &self.provider;
        let calls = unique
            .iter()
            .map(|&id| async move { (id, provider.delete_user(id).await) });
        let results = self.track(join_all(calls)).await;

        for (id, result) in results {
            match result {
                Ok(true) => outcome.deleted.push(id),
                Ok(false) => outcome.failed.push(id),
                Err(e) => {
                    log::warn!("delete of user {id} failed: {e}");
                    outcome.failed.push(id);
                }
            }
        }
        debug_assert_eq!(outcome.completed(), outcome.requested);

        self.state.write(|s| {
            for id in &outcome.deleted {
                s.list.deselect(*id);
            }
        });
        self.load_users().await;

        if !outcome.deleted.is_empty() {
            self.notify_success(format!("Deleted {} user(s)", outcome.deleted.len()));
        }
        if !outcome.failed.is_empty() {
            self.notify_error(format!("Failed to delete {} user(s)", outcome.failed.len()));
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Форма создания
    // ------------------------------------------------------------------

    pub fn open_create_modal(&self) {
        let now = local_now();
        self.state.write(|s| {
            s.show_create_modal = true;
            s.draft = UserDraft::new(&s.groups, now);
        });
    }

    pub fn close_create_modal(&self) {
        let now = local_now();
        self.state.write(|s| {
            s.show_create_modal = false;
            s.draft = UserDraft::new(&s.groups, now);
        });
    }

    pub fn reset_draft(&self) {
        let now = local_now();
        self.state
            .write(|s| s.draft = UserDraft::new(&s.groups, now));
    }

    pub fn update_draft(&self, f: impl FnOnce(&mut UserDraft)) {
        self.state.write(|s| f(&mut s.draft));
    }

    pub fn toggle_draft_group(&self, group_name: &str, checked: bool) {
        self.update_draft(|d| d.toggle_group(group_name, checked));
    }

    /// Проверить черновик и отправить. Форма закрывается только при успехе.
    pub async fn create_user(&self) -> Option<User> {
        let draft = self.state.read(|s| s.draft.clone());
        if let Err(e) = draft.validate() {
            self.notify_error(e.to_string());
            return None;
        }

        match self.track(self.provider.create_user(draft.to_dto())).await {
            Ok(user) => {
                log::info!("created user {} ({})", user.id, user.name);
                self.load_users().await;
                self.close_create_modal();
                self.notify_success(format!("User {} created", user.name));
                Some(user)
            }
            Err(e) => {
                self.notify_error(format!("Failed to create user: {e}"));
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Уведомления
    // ------------------------------------------------------------------

    pub fn notify_success(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Success, message.into())
    }

    pub fn notify_error(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Error, message.into())
    }

    pub fn dismiss(&self, id: u64) -> bool {
        self.state.write(|s| s.notifications.dismiss(id))
    }

    fn notify(&self, kind: NotificationKind, message: String) -> u64 {
        match kind {
            NotificationKind::Success => log::info!("{message}"),
            NotificationKind::Error => log::warn!("{message}"),
        }
        let id = self.state.write(|s| s.notifications.push(kind, message));

        let state = self.state.clone();
        self.timer.schedule(
            NOTIFICATION_TTL,
            Box::new(move || {
                state.write(|s| s.notifications.dismiss(id));
            }),
        );
        id
    }

    // ------------------------------------------------------------------
    // Вспомогательные
    // ------------------------------------------------------------------

    fn user_label(&self, id: UserId) -> String {
        self.state
            .read(|s| s.list.find(id).map(|u| format!("\"{}\"", u.name)))
            .unwrap_or_else(|| format!("#{id}"))
    }

    async fn track<T>(&self, call: impl Future<Output = T>) -> T {
        self.state.write(|s| s.in_flight += 1);
        let result = call.await;
        self.state
            .write(|s| s.in_flight = s.in_flight.saturating_sub(1));
        result
    }
}
