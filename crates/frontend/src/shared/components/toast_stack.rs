use crate::shared::icons::icon;
use crate::shared::notifications::Notification;
use leptos::prelude::*;

/// Стек уведомлений, новые внизу
#[component]
pub fn ToastStack(
    #[prop(into)] notifications: Signal<Vec<Notification>>,
    on_dismiss: Callback<u64>,
) -> impl IntoView {
    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || notifications.get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.css_class()>
                            <span class="toast__message">{n.message}</span>
                            <button
                                class="toast__close"
                                title="Dismiss"
                                on:click=move |_| on_dismiss.run(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
