//! Protected task dashboard

use super::{INPUT_CLASS, bind_text};
use crate::app::Route;
use todo_frontend_common::{
    ErrorBanner, Spinner, TaskAction, TaskList, use_client, use_client_callback, user_message,
};
use todo_http::client::{ClientError, TodoClient};
use todo_http::types::{Task, TaskUpdate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

/// Report a failed call, sending the user to sign in when the session is gone
fn report(error: &ClientError, tasks: &UseReducerHandle<TaskList>, navigator: &Option<Navigator>) {
    if error.is_unauthorized() {
        if let Some(navigator) = navigator {
            navigator.replace(&Route::Login);
        }
        return;
    }
    tasks.dispatch(TaskAction::Failed(user_message(error)));
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let client = use_client();
    let navigator = use_navigator();
    let tasks = use_reducer(TaskList::default);
    let email = use_state(|| None::<String>);
    let draft = use_state(String::new);

    // Load tasks and the session user on mount
    {
        let tasks = tasks.clone();
        let email = email.clone();
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            let scoped = client.with_cancellation(client.cancellation().child_token());
            let cancel = scoped.cancellation().clone();
            spawn_local(async move {
                if let Ok(status) = scoped.session_status().await {
                    email.set(status.user.map(|user| user.email));
                }
                match scoped.list_tasks().await {
                    Ok(list) => tasks.dispatch(TaskAction::Loaded(list)),
                    Err(e) => report(&e, &tasks, &navigator),
                }
            });
            move || cancel.cancel()
        });
    }

    let on_add = {
        let tasks = tasks.clone();
        let draft = draft.clone();
        let navigator = navigator.clone();
        use_client_callback(move |e: SubmitEvent, client: TodoClient| {
            e.prevent_default();
            let text = (*draft).clone();
            let draft = draft.clone();
            let tasks = tasks.clone();
            let navigator = navigator.clone();
            async move {
                if text.trim().is_empty() {
                    return;
                }
                match client.create_task(&text).await {
                    Ok(task) => {
                        draft.set(String::new());
                        tasks.dispatch(TaskAction::Added(task));
                    }
                    Err(e) => report(&e, &tasks, &navigator),
                }
            }
        })
    };

    let on_toggle = {
        let tasks = tasks.clone();
        let navigator = navigator.clone();
        use_client_callback(move |task: Task, client: TodoClient| {
            let tasks = tasks.clone();
            let navigator = navigator.clone();
            async move {
                match client.update_task(&task.id, &TaskUpdate::done(!task.done)).await {
                    Ok(updated) => tasks.dispatch(TaskAction::Updated(updated)),
                    Err(e) => report(&e, &tasks, &navigator),
                }
            }
        })
    };

    let on_delete = {
        let tasks = tasks.clone();
        let navigator = navigator.clone();
        use_client_callback(move |id: String, client: TodoClient| {
            let tasks = tasks.clone();
            let navigator = navigator.clone();
            async move {
                match client.delete_task(&id).await {
                    Ok(()) => tasks.dispatch(TaskAction::Removed(id)),
                    Err(e) => report(&e, &tasks, &navigator),
                }
            }
        })
    };

    let on_logout = {
        let navigator = navigator.clone();
        use_client_callback(move |_: MouseEvent, client: TodoClient| {
            let navigator = navigator.clone();
            async move {
                if let Err(e) = client.logout().await {
                    tracing::warn!(error = %e, "Logout request failed");
                }
                if let Some(navigator) = navigator {
                    navigator.replace(&Route::Login);
                }
            }
        })
    };

    let on_dismiss = {
        let tasks = tasks.clone();
        Callback::from(move |_: MouseEvent| tasks.dispatch(TaskAction::DismissError))
    };

    html! {
        <div class="min-h-screen bg-gray-50">
            <nav class="bg-white border-b border-gray-200">
                <div class="max-w-3xl mx-auto px-4 flex justify-between h-16 items-center">
                    <h1 class="text-xl font-bold text-gray-800">{"My tasks"}</h1>
                    <div class="flex items-center gap-4">
                        if let Some(email) = &*email {
                            <span class="text-sm text-gray-600">{email}</span>
                        }
                        <button onclick={on_logout} class="text-sm text-gray-600 hover:text-gray-900">
                            {"Sign out"}
                        </button>
                    </div>
                </div>
            </nav>

            <main class="max-w-3xl mx-auto px-4 py-8">
                if let Some(message) = &tasks.error {
                    <ErrorBanner message={message.clone()} on_dismiss={Some(on_dismiss)} />
                }

                <form class="flex gap-3 mb-6" onsubmit={on_add}>
                    <input
                        type="text"
                        class={INPUT_CLASS}
                        placeholder="What needs doing?"
                        value={(*draft).clone()}
                        oninput={bind_text(&draft)}
                    />
                    <button type="submit" class="px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white rounded-md">
                        {"Add"}
                    </button>
                </form>

                if tasks.is_loading {
                    <Spinner text={Some("Loading tasks...".to_string())} />
                } else if tasks.tasks.is_empty() {
                    <p class="text-center text-gray-500">{"Nothing to do."}</p>
                } else {
                    <ul class="bg-white rounded-lg shadow divide-y divide-gray-200">
                        { for tasks.tasks.iter().map(|task| task_row(task, &on_toggle, &on_delete)) }
                    </ul>
                    <p class="mt-4 text-sm text-gray-500">{format!("{} remaining", tasks.remaining())}</p>
                }
            </main>
        </div>
    }
}

fn task_row(task: &Task, on_toggle: &Callback<Task>, on_delete: &Callback<String>) -> Html {
    let toggle = {
        let task = task.clone();
        on_toggle.reform(move |_: Event| task.clone())
    };
    let delete = {
        let id = task.id.clone();
        on_delete.reform(move |_: MouseEvent| id.clone())
    };
    let text_class = if task.done {
        "flex-1 text-gray-400 line-through"
    } else {
        "flex-1 text-gray-800"
    };

    html! {
        <li key={task.id.clone()} class="flex items-center gap-3 px-4 py-3">
            <input type="checkbox" checked={task.done} onchange={toggle} />
            <span class={text_class}>{&task.text}</span>
            <button onclick={delete} class="text-sm text-red-500 hover:text-red-700">{"Delete"}</button>
        </li>
    }
}
