use std::rc::Rc;

use crate::system::users::provider::{InMemoryUserProvider, UserProvider};
use crate::system::users::ui::list::{ProviderHandle, UsersListPage};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Один провайдер на всю страницу; замена на сетевой меняет только эту строку
    let provider: Rc<dyn UserProvider> = Rc::new(InMemoryUserProvider::seeded());
    let handle: ProviderHandle = StoredValue::new_local(provider);
    provide_context(handle);

    view! {
        <main class="app-main">
            <UsersListPage />
        </main>
    }
}
