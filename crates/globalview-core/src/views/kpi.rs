use serde::Serialize;

/// Direction of a signed change; exactly zero is neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Neutral,
}

impl TrendDirection {
    #[must_use]
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    pub value: f64,
    pub trend_percent: f64,
    pub trend: TrendDirection,
}

/// The fixed set of headline KPIs shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    pub total_volume: KpiData,
    pub active_leaders: KpiData,
    pub new_leaders: KpiData,
    pub average_growth: KpiData,
    pub retention_rate: KpiData,
    pub markets_covered: KpiData,
    pub at_risk_leaders: KpiData,
}

impl KpiSet {
    /// Wire keys of the seven KPIs, in display order.
    pub const KEYS: [&'static str; 7] = [
        "totalVolume",
        "activeLeaders",
        "newLeaders",
        "averageGrowth",
        "retentionRate",
        "marketsCovered",
        "atRiskLeaders",
    ];
}
