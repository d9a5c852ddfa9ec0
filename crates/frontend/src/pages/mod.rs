mod dashboard;
mod login;
mod not_found;
mod register;

pub use dashboard::Dashboard;
pub use login::Login;
pub use not_found::NotFound;
pub use register::Register;

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Input handler that mirrors a text field into state
fn bind_text(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-blue-500";
const PRIMARY_BUTTON_CLASS: &str = "w-full px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white rounded-md transition-colors disabled:bg-gray-300 disabled:cursor-not-allowed";
