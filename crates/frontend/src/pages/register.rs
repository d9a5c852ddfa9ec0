//! Account creation page

use super::{INPUT_CLASS, PRIMARY_BUTTON_CLASS, bind_text};
use crate::app::Route;
use todo_frontend_common::{ErrorBanner, use_client, user_message};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Register)]
pub fn register() -> Html {
    let client = use_client();
    let navigator = use_navigator();

    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            if *password != *confirm {
                error.set(Some("Passwords do not match.".to_string()));
                return;
            }
            submitting.set(true);
            error.set(None);

            let client = client.clone();
            let navigator = navigator.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let error = error.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match client.register(email.trim(), &password).await {
                    Ok(response) => {
                        tracing::info!(user_id = %response.user_id, "Account created");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(e) => error.set(Some(user_message(&e))),
                }
                submitting.set(false);
            });
        })
    };

    let can_submit = !email.trim().is_empty() && !password.is_empty() && !*submitting;

    html! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4">
            <div class="max-w-md w-full bg-white rounded-lg shadow-md p-8">
                <h1 class="text-2xl font-bold text-gray-800 mb-6 text-center">{"Create an account"}</h1>

                if let Some(message) = &*error {
                    <ErrorBanner message={message.clone()} />
                }

                <form onsubmit={on_submit}>
                    <div class="mb-4">
                        <label for="email" class="block text-sm font-medium text-gray-700 mb-2">{"Email"}</label>
                        <input type="email" id="email" class={INPUT_CLASS} value={(*email).clone()} oninput={bind_text(&email)} />
                    </div>
                    <div class="mb-4">
                        <label for="password" class="block text-sm font-medium text-gray-700 mb-2">{"Password"}</label>
                        <input type="password" id="password" class={INPUT_CLASS} value={(*password).clone()} oninput={bind_text(&password)} />
                    </div>
                    <div class="mb-6">
                        <label for="confirm" class="block text-sm font-medium text-gray-700 mb-2">{"Confirm password"}</label>
                        <input type="password" id="confirm" class={INPUT_CLASS} value={(*confirm).clone()} oninput={bind_text(&confirm)} />
                    </div>
                    <button type="submit" class={PRIMARY_BUTTON_CLASS} disabled={!can_submit}>
                        {if *submitting { "Creating account..." } else { "Create account" }}
                    </button>
                </form>

                <p class="mt-6 text-center text-sm text-gray-600">
                    {"Already registered? "}
                    <Link<Route> to={Route::Login} classes="text-blue-600 hover:underline">
                        {"Sign in"}
                    </Link<Route>>
                </p>
            </div>
        </div>
    }
}
