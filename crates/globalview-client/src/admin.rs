//! Administrative actions.

use serde_json::json;

use crate::client::{GlobalviewClient, RequestOptions};
use crate::error::ClientError;

impl GlobalviewClient {
    /// Asks the backend to drop its response cache. Nothing is cached on this
    /// side, so there is no local effect.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn clear_cache(&self) -> Result<(), ClientError> {
        self.post_json(
            &["globalview", "cache", "clear"],
            &json!({}),
            &RequestOptions::default(),
        )
        .await?;
        tracing::info!("backend cache cleared");
        Ok(())
    }
}
