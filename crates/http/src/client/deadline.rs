//! Per-call timeout and cancellation

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::ClientError;

/// Drive `future` until it completes, `cancel` fires or `timeout` elapses
pub(crate) async fn run<F, T>(
    future: F,
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, reqwest::Error>>,
{
    let guarded = async {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ClientError::Cancelled),
            result = future => result.map_err(ClientError::from),
        }
    };

    match timeout {
        Some(limit) => with_timeout(limit, guarded).await,
        None => guarded.await,
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn with_timeout<T>(
    limit: Duration,
    future: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    tokio::time::timeout(limit, future)
        .await
        .unwrap_or(Err(ClientError::Timeout(limit)))
}

#[cfg(target_arch = "wasm32")]
async fn with_timeout<T>(
    limit: Duration,
    future: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    use futures::future::{Either, select};

    // No tokio timer driver in the browser
    let sleep = gloo_timers::future::sleep(limit);
    match select(Box::pin(future), sleep).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ClientError::Timeout(limit)),
    }
}
