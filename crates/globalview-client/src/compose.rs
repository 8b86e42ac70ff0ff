//! Page composition helpers.

use std::future::Future;

use crate::error::ClientError;

/// Awaits one panel's data, substituting `T::default()` on failure.
///
/// A failed panel renders its empty state instead of failing the page. The
/// error is logged with the panel name.
pub async fn panel_or_default<T, F>(panel: &str, fetch: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, ClientError>>,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(panel, error = %e, "panel data unavailable, using empty state");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_passes_through() {
        let value = panel_or_default("kpis", async { Ok::<_, ClientError>(vec![1, 2]) }).await;
        assert_eq!(value, [1, 2]);
    }

    #[tokio::test]
    async fn failure_yields_default() {
        let value: Vec<u32> = panel_or_default("calls", async {
            Err(ClientError::Status {
                status: 503,
                body: "down".into(),
            })
        })
        .await;
        assert!(value.is_empty());
    }
}
