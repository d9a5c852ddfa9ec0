//! Todo client core: routing, navigation guard and session token storage

pub mod config;
pub mod error;
pub mod guard;
pub mod routes;
pub mod token;

pub use config::ClientSettings;
pub use error::{CoreError, CoreResult};
pub use guard::{GuardDecision, NavigationGuard, RestoreOutcome, SessionCheck, SessionProbe};
pub use routes::{RouteDescriptor, RouteId, RouteMatch, RouteTable};
pub use token::{MemoryTokenStore, SharedTokenStore, TokenStore};

pub use tokio_util::sync::CancellationToken;
