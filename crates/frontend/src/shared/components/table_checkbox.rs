use leptos::prelude::*;

/// Чекбокс выбора строки в отдельной ячейке `<td>`.
///
/// Клик не всплывает до строки.
#[component]
pub fn TableCheckbox(
    #[prop(into)] checked: Signal<bool>,
    on_change: Callback<bool>,
    /// Подпись для screen reader, например "Select John Doe"
    #[prop(optional, into)]
    label: String,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                aria-label=label
                prop:checked=move || checked.get()
                prop:disabled=move || disabled.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </td>
    }
}
