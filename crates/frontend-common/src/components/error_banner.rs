//! Inline error message

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
    /// Shows a dismiss button when set
    #[prop_or_default]
    pub on_dismiss: Option<Callback<MouseEvent>>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    html! {
        <div class="bg-red-50 dark:bg-red-900 border border-red-200 dark:border-red-700 rounded-md p-3 mb-4 flex justify-between items-start" role="alert">
            <p class="text-sm text-red-700 dark:text-red-300 m-0">{&props.message}</p>
            if let Some(on_dismiss) = &props.on_dismiss {
                <button class="ml-3 text-red-500 hover:text-red-700" onclick={on_dismiss.clone()}>{"×"}</button>
            }
        </div>
    }
}
