//! Read-only dashboard pipeline: server-computed statistics and
//! recommendations. All aggregation happens server-side.

use crate::types::{DashboardStats, Recommendation};
use crate::{Error, SustainClient};

/// The two dashboard reads, joined.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recommendations: Vec<Recommendation>,
}

/// Fetches statistics and recommendations concurrently and waits for both.
/// No ordering is guaranteed between the two reads. A failure in either is
/// logged and returned, leaving the caller's view in its loading state.
///
/// # Errors
/// Returns the first failing read's error.
pub async fn load(client: &SustainClient) -> Result<DashboardData, Error> {
    let (stats, recommendations) = tokio::join!(client.dashboard(), client.recommendations());
    if let Err(err) = &stats {
        tracing::warn!("dashboard stats fetch failed: {err}");
    }
    if let Err(err) = &recommendations {
        tracing::warn!("recommendations fetch failed: {err}");
    }
    Ok(DashboardData {
        stats: stats?,
        recommendations: recommendations?.recommendations,
    })
}
