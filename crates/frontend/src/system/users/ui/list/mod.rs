pub mod state;

use std::future::Future;
use std::rc::Rc;

use contracts::system::users::{Group, User, UserStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table_checkbox::TableCheckbox;
use crate::shared::components::toast_stack::ToastStack;
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::icons::icon;
use crate::system::users::provider::{InMemoryUserProvider, UserProvider};
use crate::system::users::ui::browser::{BrowserConfirm, GlooTimer};
use crate::system::users::view_model::{status_badge_class, ManagementState, UserManagement};

/// View-model поверх сигнала Leptos
pub type PageModel = UserManagement<RwSignal<ManagementState>>;

/// Провайдер из контекста; хэндл `Copy + Send`, сам провайдер живёт в UI-потоке
pub type ProviderHandle = StoredValue<Rc<dyn UserProvider>, LocalStorage>;

/// Запуск асинхронного действия view-model на локальном executor
pub(crate) fn spawn_action<F, Fut>(model: StoredValue<PageModel, LocalStorage>, action: F)
where
    F: FnOnce(PageModel) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    if let Some(vm) = model.try_get_value() {
        spawn_local(action(vm));
    }
}

/// Синхронный вызов view-model
pub(crate) fn with_model<R: Default>(
    model: StoredValue<PageModel, LocalStorage>,
    f: impl FnOnce(&PageModel) -> R,
) -> R {
    model.try_with_value(f).unwrap_or_default()
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    let provider: Rc<dyn UserProvider> = use_context::<ProviderHandle>()
        .and_then(|handle| handle.try_get_value())
        .unwrap_or_else(|| {
            log::warn!("no user provider in context, using the demo directory");
            Rc::new(InMemoryUserProvider::seeded())
        });

    let state = RwSignal::new(ManagementState::default());
    let model = StoredValue::new_local(UserManagement::new(
        provider,
        Rc::new(BrowserConfirm),
        Rc::new(GlooTimer),
        state,
    ));

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.list.is_loaded) {
            spawn_action(model, |vm| async move { vm.init().await });
        }
    });

    let busy = Signal::derive(move || state.with(|s| s.is_busy()));
    let visible = Signal::derive(move || state.with(|s| s.list.visible().to_vec()));
    let groups = Signal::derive(move || state.with(|s| s.groups.clone()));
    let selected_count = Signal::derive(move || state.with(|s| s.list.selected.len()));
    let all_selected = Signal::derive(move || state.with(|s| s.list.all_selected()));

    let delete_selected = move |_| {
        spawn_action(model, |vm| async move {
            vm.delete_selected_users().await;
        });
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"User Management"</h1>
                    <Badge>
                        {move || state.with(|s| s.list.total_count()).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| with_model(model, |vm| vm.open_create_modal())
                    >
                        {icon("plus")}
                        " Add User"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=delete_selected
                        disabled=Signal::derive(move || busy.get() || selected_count.get() == 0)
                    >
                        {icon("trash")}
                        {move || format!(" Delete Selected ({})", selected_count.get())}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel-header__center">
                    <PaginationControls
                        current_page=Signal::derive(move || state.with(|s| s.list.page))
                        total_pages=Signal::derive(move || state.with(|s| s.list.total_pages))
                        total_count=Signal::derive(move || state.with(|s| s.list.total_count()))
                        has_previous=Signal::derive(move || state.with(|s| s.list.has_previous()))
                        has_next=Signal::derive(move || state.with(|s| s.list.has_next()))
                        on_page_change=Callback::new(move |page: usize| {
                            with_model(model, |vm| vm.go_to_page(page));
                        })
                    />
                </div>

                <div class="table-wrapper">
                    <Table attr:id="users-table" attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false class="fixed-checkbox-column">
                                    <input
                                        type="checkbox"
                                        class="table__checkbox"
                                        title="Select page"
                                        prop:checked=move || all_selected.get()
                                        on:change=move |_| with_model(model, |vm| vm.toggle_select_all())
                                    />
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>"User"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>"Email"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>"Status"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=220.0>"Groups"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>"Role"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>"Joined"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=130.0>"Last Login"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|u| (u.id, u.status, u.groups.clone())
                                children=move |user| {
                                    view! { <UserRow user=user groups=groups model=model state=state busy=busy /> }
                                }
                            />
                        </TableBody>
                    </Table>

                    {move || visible.with(|v| v.is_empty()).then(|| view! {
                        <div class="table__empty">"No users"</div>
                    })}
                </div>

                {move || state.with(|s| s.show_create_modal).then(|| view! {
                    <super::details::CreateUserForm model=model state=state />
                })}
            </div>

            <ToastStack
                notifications=Signal::derive(move || state.with(|s| s.notifications.items().to_vec()))
                on_dismiss=Callback::new(move |id: u64| {
                    with_model(model, |vm| vm.dismiss(id));
                })
            />
        </div>
    }
}

#[component]
fn UserRow(
    user: User,
    #[prop(into)] groups: Signal<Vec<Group>>,
    model: StoredValue<PageModel, LocalStorage>,
    state: RwSignal<ManagementState>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let id = user.id;
    let is_active = user.status.is_active();
    let membership = user.groups.clone();
    let joined = format_date(&user.join_date);
    let last_login = format_datetime(&user.last_login);

    let toggle_status = move |_| {
        spawn_action(model, move |vm| async move {
            if is_active {
                vm.deactivate_user(id).await;
            } else {
                vm.activate_user(id).await;
            }
        });
    };

    let delete = move |_| {
        spawn_action(model, move |vm| async move {
            vm.delete_user(id).await;
        });
    };

    view! {
        <TableRow>
            <TableCheckbox
                checked=Signal::derive(move || state.with(|s| s.list.is_selected(id)))
                on_change=Callback::new(move |_: bool| with_model(model, |vm| vm.toggle_select_user(id)))
                label=format!("Select {}", user.name)
                disabled=busy
            />
            <TableCell>
                <TableCellLayout truncate=true>
                    <div class="user-cell">
                        {user.avatar.clone().map(|src| view! {
                            <img class="user-cell__avatar" src=src alt="" width="32" height="32" />
                        })}
                        <span style="font-weight: 500;">{user.name.clone()}</span>
                    </div>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{user.email.clone()}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <span class=format!("badge {}", status_badge_class(user.status))>
                        {user.status.display_name()}
                    </span>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <div class="group-chips">
                    {move || {
                        let membership = membership.clone();
                        groups.get().into_iter().map(|group| {
                            let member = membership.contains(&group.name);
                            let name = group.name.clone();
                            let class = if member { "group-chip group-chip--on" } else { "group-chip" };
                            view! {
                                <button
                                    class=class
                                    title=group.description.clone()
                                    disabled=move || busy.get()
                                    on:click=move |_| {
                                        let name = name.clone();
                                        spawn_action(model, move |vm| async move {
                                            vm.toggle_user_group(id, &name).await;
                                        });
                                    }
                                >
                                    {group.name.clone()}
                                </button>
                            }
                        }).collect_view()
                    }}
                </div>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>{user.role.clone().unwrap_or_else(|| "-".to_string())}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{joined}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{last_login}</TableCellLayout>
            </TableCell>
            <TableCell>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=toggle_status
                    disabled=busy
                    attr:title=status_action_label(user.status)
                >
                    {if is_active { icon("user-x") } else { icon("user-check") }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=delete
                    disabled=busy
                    attr:title="Delete"
                >
                    {icon("trash")}
                </Button>
            </TableCell>
        </TableRow>
    }
}

/// Подпись кнопки смены статуса
pub fn status_action_label(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "Deactivate",
        UserStatus::Inactive => "Activate",
    }
}
