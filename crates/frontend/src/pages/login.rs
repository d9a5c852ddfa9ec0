//! Sign-in page

use super::{INPUT_CLASS, PRIMARY_BUTTON_CLASS, bind_text};
use crate::app::Route;
use todo_frontend_common::{ErrorBanner, use_client, user_message};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Login)]
pub fn login() -> Html {
    let client = use_client();
    let navigator = use_navigator();

    let email = use_state(String::new);
    let password = use_state(String::new);
    let remember_me = use_state(|| false);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_remember_change = {
        let remember_me = remember_me.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            remember_me.set(input.checked());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let remember_me = remember_me.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            submitting.set(true);
            error.set(None);

            let client = client.clone();
            let navigator = navigator.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let remember_me = *remember_me;
            let error = error.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match client.login(email.trim(), &password, remember_me).await {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Login failed");
                        error.set(Some(user_message(&e)));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let can_submit = !email.trim().is_empty() && !password.is_empty() && !*submitting;

    html! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4">
            <div class="max-w-md w-full bg-white rounded-lg shadow-md p-8">
                <h1 class="text-2xl font-bold text-gray-800 mb-6 text-center">{"Sign in"}</h1>

                if let Some(message) = &*error {
                    <ErrorBanner message={message.clone()} />
                }

                <form onsubmit={on_submit}>
                    <div class="mb-4">
                        <label for="email" class="block text-sm font-medium text-gray-700 mb-2">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            class={INPUT_CLASS}
                            value={(*email).clone()}
                            oninput={bind_text(&email)}
                        />
                    </div>
                    <div class="mb-4">
                        <label for="password" class="block text-sm font-medium text-gray-700 mb-2">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            class={INPUT_CLASS}
                            value={(*password).clone()}
                            oninput={bind_text(&password)}
                        />
                    </div>
                    <label class="flex items-center gap-2 mb-6 text-sm text-gray-700">
                        <input type="checkbox" checked={*remember_me} onchange={on_remember_change} />
                        {"Remember me"}
                    </label>
                    <button type="submit" class={PRIMARY_BUTTON_CLASS} disabled={!can_submit}>
                        {if *submitting { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>

                <p class="mt-6 text-center text-sm text-gray-600">
                    {"No account yet? "}
                    <Link<Route> to={Route::Register} classes="text-blue-600 hover:underline">
                        {"Create one"}
                    </Link<Route>>
                </p>
            </div>
        </div>
    }
}
