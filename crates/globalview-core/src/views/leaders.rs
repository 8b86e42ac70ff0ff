use serde::Serialize;

use super::kpi::TrendDirection;
use super::Pagination;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderStatus {
    #[default]
    Active,
    Inactive,
    AtRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Consistency {
    Consistent,
    Volatile,
    Improving,
    Declining,
}

/// Leader row on the "top leaders" panel.
///
/// Carries country and city only; region is not shown on this panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLeader {
    pub id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub business_volume: f64,
    pub growth_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagnatingLeader {
    pub id: String,
    pub name: String,
    pub market: String,
    pub business_volume: f64,
    pub growth_percent: f64,
    pub team_size: u32,
    /// `None` means the leader has never been contacted.
    pub days_since_last_contact: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighGrowthLeader {
    pub id: String,
    pub name: String,
    pub market: String,
    pub business_volume: f64,
    pub growth_percent: f64,
    pub growth_trend: TrendDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub role: String,
    pub market: String,
    pub business_volume: f64,
    pub growth_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegSummary {
    pub id: String,
    pub name: String,
    pub volume: f64,
}

/// Downline legs split at the qualifying threshold, each side sorted by
/// volume descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegStrength {
    pub threshold: f64,
    pub strong_legs: Vec<LegSummary>,
    pub weak_legs: Vec<LegSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiLeaderScorecard {
    pub id: String,
    pub name: String,
    pub role: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub market: String,
    pub business_volume: f64,
    pub lifetime_volume: Option<f64>,
    pub growth_percent: f64,
    pub growth_trend: TrendDirection,
    pub status: LeaderStatus,
    pub consistency: Option<Consistency>,
    pub team_size: u32,
    pub days_since_last_contact: Option<i64>,
    pub leg_strength: LegStrength,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeTrendPoint {
    pub period: String,
    pub volume: f64,
    /// Change against the preceding point; the first point is always 0.
    pub change_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeTrendOverview {
    pub daily: Vec<VolumeTrendPoint>,
    pub weekly: Vec<VolumeTrendPoint>,
    pub monthly: Vec<VolumeTrendPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyClosure {
    pub date: String,
    pub total_volume: f64,
    pub order_count: u64,
    pub new_leaders: u64,
    pub volume_change_percent: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderPerformanceRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub level: Option<u32>,
    pub market: String,
    pub personal_volume: f64,
    pub team_volume: f64,
    pub growth_percent: f64,
    pub status: LeaderStatus,
    pub team_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderPerformanceGrid {
    pub leaders: Vec<LeaderPerformanceRow>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderPerformanceDetail {
    pub leader: LeaderPerformanceRow,
    pub consistency: Option<Consistency>,
    pub monthly_volumes: Vec<VolumeTrendPoint>,
    pub leg_strength: LegStrength,
}
