use contracts::enums::user_status::UserStatus;
use leptos::prelude::*;

use crate::shared::date_utils::{parse_input_date, to_input_date};
use crate::system::users::draft::UserDraft;
use crate::system::users::ui::list::{spawn_action, with_model, PageModel};
use crate::system::users::view_model::ManagementState;

/// Модальная форма создания пользователя.
///
/// Ввод сразу пишется в `ManagementState::draft`: после закрытия форма
/// открывается с чистым черновиком, после неудачной отправки введённое сохраняется.
#[component]
pub fn CreateUserForm(
    model: StoredValue<PageModel, LocalStorage>,
    state: RwSignal<ManagementState>,
) -> impl IntoView {
    let is_saving = Signal::derive(move || state.with(|s| s.is_busy()));

    let on_close = move || with_model(model, |vm| vm.close_create_modal());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        spawn_action(model, |vm| async move {
            vm.create_user().await;
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Add New User"</h3>
                    <button class="btn-close" on:click=move |_| on_close()>"×"</button>
                </div>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="name">"Name *"</label>
                        <input
                            type="text"
                            id="name"
                            prop:value=draft_field(state, |d| d.name.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                with_model(model, |vm| vm.update_draft(|d| d.name = value));
                            }
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="email">"Email *"</label>
                        <input
                            type="email"
                            id="email"
                            prop:value=draft_field(state, |d| d.email.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                with_model(model, |vm| vm.update_draft(|d| d.email = value));
                            }
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="role">"Role"</label>
                        <input
                            type="text"
                            id="role"
                            prop:value=draft_field(state, |d| d.role.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                with_model(model, |vm| vm.update_draft(|d| d.role = value));
                            }
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="status">"Status"</label>
                        <select
                            id="status"
                            prop:value=draft_field(state, |d| d.status.code().to_string())
                            on:change=move |ev| {
                                if let Some(status) = UserStatus::from_code(&event_target_value(&ev)) {
                                    with_model(model, |vm| vm.update_draft(|d| d.status = status));
                                }
                            }
                            disabled=move || is_saving.get()
                        >
                            {UserStatus::all().into_iter().map(|status| view! {
                                <option value=status.code()>{status.display_name()}</option>
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="join_date">"Join Date"</label>
                        <input
                            type="date"
                            id="join_date"
                            prop:value=draft_field(state, |d| to_input_date(&d.join_date))
                            on:change=move |ev| {
                                if let Some(date) = parse_input_date(&event_target_value(&ev)) {
                                    with_model(model, |vm| vm.update_draft(|d| d.join_date = date));
                                }
                            }
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <fieldset class="form-group">
                        <legend>"Groups"</legend>
                        {move || state.with(|s| s.groups.clone()).into_iter().map(|group| {
                            let name = group.name.clone();
                            let checked_name = group.name.clone();
                            view! {
                                <label class="form-check" title=group.description.clone()>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || state.with(|s| s.draft.groups.contains(&checked_name))
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            with_model(model, |vm| vm.toggle_draft_group(&name, checked));
                                        }
                                        disabled=move || is_saving.get()
                                    />
                                    " "
                                    {group.name.clone()}
                                </label>
                            }
                        }).collect_view()}
                    </fieldset>

                    <div class="form-actions">
                        <button
                            type="button"
                            class="btn-secondary"
                            on:click=move |_| with_model(model, |vm| vm.reset_draft())
                            disabled=move || is_saving.get()
                        >
                            "Reset"
                        </button>
                        <button
                            type="button"
                            class="btn-secondary"
                            on:click=move |_| on_close()
                            disabled=move || is_saving.get()
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_saving.get()
                        >
                            {move || if is_saving.get() { "Saving..." } else { "Create User" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

fn draft_field(
    state: RwSignal<ManagementState>,
    field: fn(&UserDraft) -> String,
) -> impl Fn() -> String + Copy + Send + Sync + 'static {
    move || state.with(|s| field(&s.draft))
}
