//! Canonical view models handed to the rendering layer.
//!
//! Every record is built fresh per request by an assembler in the client
//! crate and never mutated afterwards. All types serialize with camelCase keys
//! so they can be emitted as JSON unchanged.

mod calls;
mod campaigns;
mod communication;
mod growth;
mod investors;
mod kpi;
mod leaders;
mod markets;

use serde::Serialize;

pub use calls::{ActionItem, ActionItemStatus, CallAttendee, WeeklyCallDetail, WeeklyCallListItem, WeeklyCallsMetrics};
pub use campaigns::{CampaignImpact, CampaignListItem, CampaignStatus};
pub use communication::{
    ChannelCount, CommunicationHealth, CommunicationMetrics, FollowUp, FollowUpSource,
    FollowUpStatus, WeeklyBoard, WeeklyBoardLeader, WeeklyStatus, WeeklySummary,
};
pub use growth::{GrowthEvent, GrowthEventStatus, GrowthEventType, GrowthKpi, GrowthKpiSnapshot};
pub use investors::Investor;
pub use kpi::{KpiData, KpiSet, TrendDirection};
pub use leaders::{
    BiLeaderScorecard, Consistency, DailyClosure, HighGrowthLeader, LeaderPerformanceDetail,
    LeaderPerformanceGrid, LeaderPerformanceRow, LeaderStatus, LegStrength, LegSummary,
    StagnatingLeader, TopLeader, TopPerformer, VolumeTrendOverview, VolumeTrendPoint,
};
pub use markets::{InterventionStatus, MarketIntervention, Severity, TopRegion};

/// Page metadata for paginated grids.
///
/// Built through [`Pagination::new`], which guarantees
/// `1 <= current_page <= total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl Pagination {
    /// Reconciles the server's page numbers with the requested page size.
    ///
    /// `total_pages` falls back to `ceil(total_count / limit)` when the server
    /// omits it, is never below 1, and `current_page` is clamped into range.
    #[must_use]
    pub fn new(page: u32, limit: u32, total_count: u64, total_pages: Option<u32>) -> Self {
        let computed = if limit == 0 {
            1
        } else {
            u32::try_from(total_count.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        };
        let total_pages = total_pages.unwrap_or(computed).max(1);
        Self {
            current_page: page.clamp(1, total_pages),
            total_pages,
            total_count,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_count: 0,
        }
    }
}

/// A page of records plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_computes_total_pages_from_count() {
        let p = Pagination::new(2, 10, 25, None);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.current_page, 2);
    }

    #[test]
    fn pagination_clamps_current_page_to_total() {
        let p = Pagination::new(9, 10, 25, Some(3));
        assert_eq!(p.current_page, 3);
        assert!(p.current_page <= p.total_pages);
    }

    #[test]
    fn pagination_never_reports_zero_pages() {
        let p = Pagination::new(1, 20, 0, Some(0));
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn pagination_page_zero_is_first_page() {
        let p = Pagination::new(0, 20, 100, None);
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(1, 10, 5, None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"currentPage": 1, "totalPages": 1, "totalCount": 5})
        );
    }
}
