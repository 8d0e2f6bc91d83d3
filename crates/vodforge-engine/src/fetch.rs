//! Source fetching.

use std::path::Path;

use tracing::debug;

use vodforge_models::Locator;
use vodforge_storage::ObjectStore;

use crate::error::{EngineError, EngineResult};

/// Download the object at `locator` and write its full body to `dest`.
///
/// The pipeline depends on a complete local file; storage is not
/// streamed into the encoder.
pub async fn fetch_source(
    store: &dyn ObjectStore,
    locator: &Locator,
    dest: &Path,
) -> EngineResult<()> {
    debug!("Fetching {} to {}", locator, dest.display());

    let body = store
        .get(locator.bucket(), locator.key())
        .await
        .map_err(EngineError::Fetch)?;

    tokio::fs::write(dest, body).await?;
    Ok(())
}
