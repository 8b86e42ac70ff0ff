use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterventionStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

/// A market flagged for attention, used by both the intervention and the
/// weak-markets panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIntervention {
    pub market: String,
    pub change_percent: f64,
    pub severity: Severity,
    pub reason: String,
    pub status: InterventionStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRegion {
    pub market: String,
    pub business_volume: f64,
    pub leader_count: u32,
    pub growth_percent: f64,
}
