//! Slot provider port.

use async_trait::async_trait;

use crate::domain::{CoefficientRecord, Warehouse};
use crate::error::FetchError;

/// Read-only access to the provider's published data.
///
/// Every failure (network, timeout, status, payload) surfaces as the single
/// [`FetchError`] kind. Implementations must bound how long a call waits.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// Fetch the complete, unfiltered list of coefficient observations.
    ///
    /// Records come back in provider order; no ordering is guaranteed.
    async fn fetch_coefficients(&self) -> Result<Vec<CoefficientRecord>, FetchError>;

    /// Fetch the warehouse directory.
    async fn fetch_warehouses(&self) -> Result<Vec<Warehouse>, FetchError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;
}
