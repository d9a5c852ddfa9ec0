//! API client context
//!
//! One [`TodoClient`] is created when the app mounts and handed to every
//! component through a context, so the cookie jar, token store and recovery
//! state are shared by the whole page.

use crate::components::ErrorBanner;
use crate::config::FrontendConfig;
use crate::storage::LocalStorageTokenStore;
use std::future::Future;
use todo_http::client::{ClientError, TodoClient};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Build the browser client from the compiled-in configuration
pub fn create_client() -> Result<TodoClient, ClientError> {
    let settings = FrontendConfig::settings();
    TodoClient::builder()
        .settings(&settings)
        .token_store(LocalStorageTokenStore::new(settings.token_key.clone()).shared())
        .build()
}

#[derive(Properties, PartialEq)]
pub struct ClientProviderProps {
    pub children: Children,
}

/// Provides the shared client to its children
#[function_component(ClientProvider)]
pub fn client_provider(props: &ClientProviderProps) -> Html {
    let client = use_memo((), |_| {
        create_client().map_err(|error| {
            tracing::error!(%error, "Failed to create API client");
            error.to_string()
        })
    });

    match &*client {
        Ok(client) => html! {
            <ContextProvider<TodoClient> context={client.clone()}>
                {props.children.clone()}
            </ContextProvider<TodoClient>>
        },
        Err(message) => html! {
            <ErrorBanner message={message.clone()} />
        },
    }
}

/// Hook to use the shared client
#[hook]
pub fn use_client() -> TodoClient {
    use_context::<TodoClient>()
        .expect("TodoClient not found. Make sure to wrap your component with ClientProvider")
}

/// Hook to create callbacks that run an async API call
#[hook]
pub fn use_client_callback<F, Fut, T>(f: F) -> Callback<T>
where
    F: Fn(T, TodoClient) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
    T: 'static,
{
    let client = use_client();

    Callback::from(move |event: T| {
        spawn_local(f(event, client.clone()));
    })
}
