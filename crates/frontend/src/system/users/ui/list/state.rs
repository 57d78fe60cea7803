use std::collections::BTreeSet;

use contracts::system::users::{User, UserId};

pub const PAGE_SIZE: usize = 10;

/// Загруженные пользователи, окно пагинации и выбранные чекбоксы.
///
/// Страницы нумеруются с 1. `total_pages` не меньше 1, в `selected` только id
/// из `users`.
#[derive(Clone, Debug)]
pub struct UsersListState {
    pub users: Vec<User>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub selected: BTreeSet<UserId>,
    pub is_loaded: bool,
}

impl Default for UsersListState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            page: 1,
            page_size: PAGE_SIZE,
            total_pages: 1,
            selected: BTreeSet::new(),
            is_loaded: false,
        }
    }
}

impl UsersListState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Заменить коллекцию, убрать выбор исчезнувших пользователей и
    /// пересчитать окно.
    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
        let existing: BTreeSet<UserId> = self.users.iter().map(|u| u.id).collect();
        self.selected.retain(|id| existing.contains(id));
        self.is_loaded = true;
        self.recalc_pagination();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.recalc_pagination();
    }

    /// Страница вне диапазона сбрасывается на первую.
    fn recalc_pagination(&mut self) {
        self.total_pages = if self.users.is_empty() {
            1
        } else {
            self.users.len().div_ceil(self.page_size)
        };
        if self.page == 0 || self.page > self.total_pages {
            self.page = 1;
        }
    }

    pub fn total_count(&self) -> usize {
        self.users.len()
    }

    pub fn visible(&self) -> &[User] {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.users.len());
        self.users.get(start..end).unwrap_or(&[])
    }

    pub fn visible_ids(&self) -> Vec<UserId> {
        self.visible().iter().map(|u| u.id).collect()
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    // Навигация: запрос вне [1, total_pages] ничего не меняет

    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.page = page;
        true
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page + 1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Выбраны все видимые пользователи (false для пустой страницы)
    pub fn all_selected(&self) -> bool {
        let visible = self.visible();
        !visible.is_empty() && visible.iter().all(|u| self.selected.contains(&u.id))
    }

    /// Выбрать всю видимую страницу или снять выбор, если она уже выбрана.
    /// Выбор на других страницах сохраняется.
    pub fn toggle_select_all(&mut self) {
        let ids = self.visible_ids();
        if self.all_selected() {
            for id in ids {
                self.selected.remove(&id);
            }
        } else {
            self.selected.extend(ids);
        }
    }

    pub fn toggle_select_user(&mut self, id: UserId) {
        if self.selected.contains(&id) {
            self.selected.remove(&id);
        } else if self.find(id).is_some() {
            self.selected.insert(id);
        }
    }

    pub fn is_selected(&self, id: UserId) -> bool {
        self.selected.contains(&id)
    }

    pub fn deselect(&mut self, id: UserId) {
        self.selected.remove(&id);
    }

    pub fn selected_ids(&self) -> Vec<UserId> {
        self.selected.iter().copied().collect()
    }
}
