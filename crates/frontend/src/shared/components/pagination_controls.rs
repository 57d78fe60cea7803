use crate::shared::icons::icon;
use leptos::prelude::*;

/// Навигация по страницам (первая / предыдущая / следующая / последняя), нумерация с 1.
///
/// `on_page_change` получает целевую страницу; проверку диапазона делает владелец.
#[component]
pub fn PaginationControls(
    /// Текущая страница (с 1)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    total_pages: Signal<usize>,

    /// Общее количество записей на всех страницах
    #[prop(into)]
    total_count: Signal<usize>,

    #[prop(into)]
    has_previous: Signal<bool>,

    #[prop(into)]
    has_next: Signal<bool>,

    on_page_change: Callback<usize>,
) -> impl IntoView {
    let on_first = move || !has_previous.get();
    let on_last = move || !has_next.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=on_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
                disabled=on_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!(
                    "Page {} of {} ({} users)",
                    current_page.get(),
                    total_pages.get().max(1),
                    total_count.get()
                )}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=on_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get())
                disabled=on_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
        </div>
    }
}
