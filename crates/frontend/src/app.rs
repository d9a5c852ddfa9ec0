use crate::guard::RouteGuard;
use crate::pages::{Dashboard, Login, NotFound, Register};
use todo_frontend_common::ClientProvider;
use yew::prelude::*;
use yew_router::prelude::*;

/// Client-side routes
///
/// Paths mirror `todo_core::routes::ROUTES`; the guard consults that table
/// to decide which of these need a session.
#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/register")]
    Register,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <Login /> },
        Route::Dashboard => html! { <Dashboard /> },
        Route::Register => html! { <Register /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ClientProvider>
            <BrowserRouter>
                <RouteGuard>
                    <Switch<Route> render={switch} />
                </RouteGuard>
            </BrowserRouter>
        </ClientProvider>
    }
}
