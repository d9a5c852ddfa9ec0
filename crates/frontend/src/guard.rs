//! Route guard component
//!
//! Runs the navigation guard whenever the location changes and holds back
//! protected pages until it allows them. Leaving a page before the checks
//! finish cancels them.

use crate::app::Route;
use todo_core::{CancellationToken, GuardDecision, NavigationGuard, RouteTable};
use todo_frontend_common::{Spinner, use_client};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RouteGuardProps {
    pub children: Children,
}

#[function_component(RouteGuard)]
pub fn route_guard(props: &RouteGuardProps) -> Html {
    let client = use_client();
    let navigator = use_navigator();
    let path = use_location()
        .map(|location| location.path().to_string())
        .unwrap_or_else(|| "/".to_string());
    // Path most recently approved by the guard
    let approved = use_state(|| None::<String>);

    {
        let approved = approved.clone();
        use_effect_with(path.clone(), move |path| {
            // An approval never carries over to a later visit
            approved.set(None);
            let cancel = CancellationToken::new();
            let path = path.clone();
            let task_cancel = cancel.clone();

            spawn_local(async move {
                let guard = NavigationGuard::new(client);
                match guard.before_each(&path, &task_cancel).await {
                    GuardDecision::Proceed => approved.set(Some(path)),
                    GuardDecision::Redirect(target) => {
                        tracing::info!(from = %path, to = %target, "Redirecting unauthenticated navigation");
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::recognize(&target).unwrap_or(Route::Login));
                        }
                    }
                    GuardDecision::Abort => tracing::debug!(%path, "Navigation checks cancelled"),
                }
            });

            move || cancel.cancel()
        });
    }

    if may_render(&path, approved.as_deref()) {
        return html! { <>{ props.children.clone() }</> };
    }

    html! {
        <div class="min-h-screen flex items-center justify-center">
            <Spinner text={Some("Checking your session...".to_string())} />
        </div>
    }
}

/// Whether the page at `path` may be shown given the guard's last approval
fn may_render(path: &str, approved: Option<&str>) -> bool {
    !RouteTable::standard().resolve(path).requires_auth() || approved == Some(path)
}
