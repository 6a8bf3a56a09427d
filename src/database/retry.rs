//! Retry-once execution around a single statement

use async_trait::async_trait;
use std::future::Future;

use super::transient::TransientKind;

/// Something able to verify (and if needed rebuild) the database connection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reconnect: Send + Sync {
    /// Returns `true` when a live connection is available afterwards.
    async fn ensure_connection(&self) -> bool;
}

/// Run `op`, retrying it at most once after a successful reconnect.
///
/// Only connection-class failures trigger a reconnect. If the reconnect
/// fails, or the error is a query/data error, the original error is returned
/// as-is. The outcome of the retry is returned whatever it is.
pub async fn retry_once<R, T, F, Fut>(reconnector: &R, label: &str, mut op: F) -> Result<T, sqlx::Error>
where
    R: Reconnect + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let err = match op().await {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let Some(kind) = TransientKind::classify(&err) else {
        return Err(err);
    };

    tracing::warn!(operation = label, kind = %kind, error = %err, "Connection error, attempting reconnect");

    if !reconnector.ensure_connection().await {
        tracing::error!(operation = label, kind = %kind, "Reconnect failed, giving up");
        return Err(err);
    }

    tracing::info!(operation = label, "Reconnected, retrying once");
    op().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::{assert_err, assert_ok};

    fn reset() -> sqlx::Error {
        sqlx::Error::Io(io::Error::from(io::ErrorKind::ConnectionReset))
    }

    #[tokio::test]
    async fn success_never_reconnects() {
        let mut reconnector = MockReconnect::new();
        reconnector.expect_ensure_connection().never();

        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result = retry_once(&reconnector, "select", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, sqlx::Error>(7)
        })
        .await;

        assert_eq!(assert_ok!(result), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_error_retries_once_after_reconnect() {
        let mut reconnector = MockReconnect::new();
        reconnector.expect_ensure_connection().times(1).returning(|| true);

        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result = retry_once(&reconnector, "select", move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(reset())
            } else {
                Ok("row")
            }
        })
        .await;

        assert_eq!(assert_ok!(result), "row");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_failure_is_not_retried_again() {
        let mut reconnector = MockReconnect::new();
        reconnector.expect_ensure_connection().times(1).returning(|| true);

        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<(), _> = retry_once(&reconnector, "insert", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(reset())
        })
        .await;

        assert!(matches!(assert_err!(result), sqlx::Error::Io(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_reconnect_propagates_original_error() {
        let mut reconnector = MockReconnect::new();
        reconnector.expect_ensure_connection().times(1).returning(|| false);

        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<(), _> = retry_once(&reconnector, "select", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(sqlx::Error::PoolTimedOut)
        })
        .await;

        assert!(matches!(assert_err!(result), sqlx::Error::PoolTimedOut));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn query_errors_skip_reconnect() {
        let mut reconnector = MockReconnect::new();
        reconnector.expect_ensure_connection().never();

        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<(), _> = retry_once(&reconnector, "select", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(sqlx::Error::Protocol("syntax error at or near \"SELEC\"".into()))
        })
        .await;

        match assert_err!(result) {
            sqlx::Error::Protocol(msg) => assert!(msg.contains("SELEC")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
