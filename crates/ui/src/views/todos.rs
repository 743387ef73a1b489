use dioxus::prelude::*;
use workout_core::model::{Priority, TodoFilter, TodoId, TodoSortBy, TodoStats};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, todo_view_error, view_state_from_resource};
use crate::vm::{
    AddTodoFieldError, AddTodoForm, SORT_OPTIONS, TodoItemVm, TodoListState, map_todo_items,
    stats_label,
};

#[derive(Clone, Debug, PartialEq)]
struct TodoListData {
    items: Vec<TodoItemVm>,
    stats: TodoStats,
}

#[component]
pub fn TodosView() -> Element {
    let ctx = use_context::<AppContext>();
    let todos = ctx.todos();
    let list_state = use_signal(TodoListState::default);
    let form = use_signal(AddTodoForm::default);
    let form_error = use_signal(|| None::<AddTodoFieldError>);
    let action_error = use_signal(|| None::<ViewError>);

    let resource = {
        let todos = todos.clone();
        use_resource(move || {
            let todos = todos.clone();
            let query = list_state.read().query();
            async move {
                let items = todos
                    .get_all(query)
                    .await
                    .map_err(|e| todo_view_error("load todos", &e))?;
                let stats = todos
                    .stats()
                    .await
                    .map_err(|e| todo_view_error("load todo stats", &e))?;
                Ok::<_, ViewError>(TodoListData {
                    items: map_todo_items(&items),
                    stats,
                })
            }
        })
    };
    let state = view_state_from_resource(resource);

    let on_toggle = {
        let todos = todos.clone();
        use_callback(move |id: TodoId| {
            let todos = todos.clone();
            let mut action_error = action_error;
            let mut resource = resource;
            spawn(async move {
                match todos.toggle_complete(id).await {
                    Ok(_) => {
                        action_error.set(None);
                        resource.restart();
                    }
                    Err(err) => action_error.set(Some(todo_view_error("toggle todo", &err))),
                }
            });
        })
    };

    let on_delete = {
        let todos = todos.clone();
        use_callback(move |id: TodoId| {
            let todos = todos.clone();
            let mut action_error = action_error;
            let mut resource = resource;
            spawn(async move {
                match todos.delete(id).await {
                    Ok(()) => {
                        action_error.set(None);
                        resource.restart();
                    }
                    Err(err) => action_error.set(Some(todo_view_error("delete todo", &err))),
                }
            });
        })
    };

    let on_clear = {
        let todos = todos.clone();
        use_callback(move |()| {
            let todos = todos.clone();
            let mut action_error = action_error;
            let mut resource = resource;
            spawn(async move {
                match todos.delete_completed().await {
                    Ok(_) => {
                        action_error.set(None);
                        resource.restart();
                    }
                    Err(err) => {
                        action_error.set(Some(todo_view_error("clear completed", &err)));
                    }
                }
            });
        })
    };

    let on_submit = use_callback(move |()| {
        let mut form = form;
        let mut form_error = form_error;
        let draft = match form.peek().to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                form_error.set(Some(err));
                return;
            }
        };
        let todos = todos.clone();
        let mut action_error = action_error;
        let mut list_state = list_state;
        let mut resource = resource;
        spawn(async move {
            match todos.create(draft).await {
                Ok(_) => {
                    form.write().reset();
                    form_error.set(None);
                    action_error.set(None);
                    list_state.write().adding = false;
                    resource.restart();
                }
                Err(err) => action_error.set(Some(todo_view_error("create todo", &err))),
            }
        });
    });

    let on_cancel = use_callback(move |()| {
        let mut form = form;
        let mut form_error = form_error;
        let mut list_state = list_state;
        form.write().reset();
        form_error.set(None);
        list_state.write().adding = false;
    });

    let controls = list_state();
    let has_completed = matches!(&state, ViewState::Ready(data) if data.stats.has_completed());

    rsx! {
        div { class: "page todos",
            h2 { "Todos" }

            TodoControls {
                state: controls,
                has_completed,
                on_filter: move |filter| {
                    let mut list_state = list_state;
                    list_state.write().set_filter(filter);
                },
                on_sort: move |sort_by| {
                    let mut list_state = list_state;
                    list_state.write().set_sort_by(sort_by);
                },
                on_toggle_order: move |()| {
                    let mut list_state = list_state;
                    list_state.write().toggle_order();
                },
                on_add: move |()| {
                    let mut list_state = list_state;
                    list_state.write().toggle_adding();
                },
                on_clear,
            }

            if controls.adding {
                AddTodoPanel {
                    form,
                    error: form_error(),
                    on_submit,
                    on_cancel,
                }
            }

            if let Some(err) = action_error() {
                p { class: "error", "{err.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.items.is_empty() {
                        div { class: "empty-state",
                            h3 { "No todos yet" }
                            p { "Start by adding your first todo!" }
                        }
                    } else {
                        ul { class: "todo-list",
                            for item in data.items {
                                TodoRow { key: "{item.id}", item, on_toggle, on_delete }
                            }
                        }
                    }
                    if let Some(label) = stats_label(&data.stats) {
                        p { class: "todo-stats", "{label}" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

const fn toggle_class(active: bool) -> &'static str {
    if active { "btn btn-filter active" } else { "btn btn-filter" }
}

#[component]
fn TodoControls(
    state: TodoListState,
    has_completed: bool,
    on_filter: EventHandler<TodoFilter>,
    on_sort: EventHandler<TodoSortBy>,
    on_toggle_order: EventHandler<()>,
    on_add: EventHandler<()>,
    on_clear: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "todo-controls",
            div { class: "todo-filters",
                for filter in TodoFilter::ALL {
                    button {
                        class: toggle_class(filter == state.filter),
                        onclick: move |_| on_filter.call(filter),
                        "{filter.label()}"
                    }
                }
            }
            div { class: "todo-sort",
                select {
                    title: "Sort todos",
                    value: "{state.sort_by.as_str()}",
                    onchange: move |evt| {
                        if let Ok(sort_by) = evt.value().parse::<TodoSortBy>() {
                            on_sort.call(sort_by);
                        }
                    },
                    for (sort_by, label) in SORT_OPTIONS {
                        option {
                            value: "{sort_by.as_str()}",
                            selected: sort_by == state.sort_by,
                            "{label}"
                        }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    title: "Toggle sort order",
                    onclick: move |_| on_toggle_order.call(()),
                    "{state.sort_order.arrow()}"
                }
            }
            div { class: "todo-actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_add.call(()),
                    "Add Todo"
                }
                if has_completed {
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| on_clear.call(()),
                        "Clear Completed"
                    }
                }
            }
        }
    }
}

#[component]
fn AddTodoPanel(
    form: Signal<AddTodoForm>,
    error: Option<AddTodoFieldError>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let current = form();
    let can_submit = current.can_submit();

    rsx! {
        div { class: "add-todo",
            h3 { "Add New Todo" }
            label {
                "Title *"
                input {
                    r#type: "text",
                    placeholder: "What needs to be done?",
                    value: "{current.title}",
                    oninput: move |evt| {
                        let mut form = form;
                        form.write().title = evt.value();
                    },
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            on_submit.call(());
                        }
                    },
                }
            }
            label {
                "Description"
                textarea {
                    rows: "3",
                    placeholder: "Add more details...",
                    value: "{current.description}",
                    oninput: move |evt| {
                        let mut form = form;
                        form.write().description = evt.value();
                    },
                }
            }
            label {
                "Priority"
                select {
                    value: "{current.priority.as_str()}",
                    onchange: move |evt| {
                        if let Ok(priority) = evt.value().parse::<Priority>() {
                            let mut form = form;
                            form.write().priority = priority;
                        }
                    },
                    for priority in Priority::ALL {
                        option {
                            value: "{priority.as_str()}",
                            selected: priority == current.priority,
                            "{priority}"
                        }
                    }
                }
            }
            label {
                "Due Date"
                input {
                    r#type: "date",
                    value: "{current.due_date}",
                    oninput: move |evt| {
                        let mut form = form;
                        form.write().due_date = evt.value();
                    },
                }
            }
            if let Some(err) = error {
                p { class: "error", "{err.message()}" }
            }
            div { class: "form-actions",
                button {
                    class: "btn btn-primary",
                    disabled: !can_submit,
                    onclick: move |_| on_submit.call(()),
                    "Add Todo"
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn TodoRow(item: TodoItemVm, on_toggle: EventHandler<TodoId>, on_delete: EventHandler<TodoId>) -> Element {
    let id = item.id;
    let row_class = if item.completed { "todo-item done" } else { "todo-item" };
    let check_label = if item.completed { "✓" } else { "" };

    rsx! {
        li { class: row_class,
            button {
                class: "todo-check",
                title: "Toggle complete",
                onclick: move |_| on_toggle.call(id),
                "{check_label}"
            }
            div { class: "todo-body",
                div { class: "todo-head",
                    h4 { class: "todo-title", "{item.title}" }
                    span { class: item.priority_class(), "{item.priority}" }
                    if let Some(due) = item.due_label.clone() {
                        span { class: "todo-due", "{due}" }
                    }
                }
                if let Some(description) = item.description.clone() {
                    p { class: "todo-description", "{description}" }
                }
                div { class: "todo-foot",
                    span { class: "todo-created", "{item.created_label}" }
                    button {
                        class: "btn btn-link",
                        onclick: move |_| on_delete.call(id),
                        "Delete"
                    }
                }
            }
        }
    }
}
