pub mod client;
pub mod components;
pub mod config;
pub mod errors;
pub mod storage;
pub mod tasks;

pub use client::{ClientProvider, create_client, use_client, use_client_callback};
pub use components::{ErrorBanner, Spinner};
pub use config::FrontendConfig;
pub use errors::user_message;
pub use storage::LocalStorageTokenStore;
pub use tasks::{TaskAction, TaskList};
