use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="min-h-screen flex flex-col items-center justify-center">
            <h1 class="text-2xl font-bold text-gray-800 mb-4">{"Page not found"}</h1>
            <Link<Route> to={Route::Login} classes="text-blue-600 hover:underline">
                {"Back to sign in"}
            </Link<Route>>
        </div>
    }
}
