use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum GrowthEventType {
    #[serde(rename = "City Launch")]
    CityLaunch,
    #[serde(rename = "Country Expansion")]
    CountryExpansion,
    #[serde(rename = "Leadership Promotion")]
    LeadershipPromotion,
    #[default]
    #[serde(rename = "Special Growth Campaign")]
    SpecialGrowthCampaign,
}

impl GrowthEventType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GrowthEventType::CityLaunch => "City Launch",
            GrowthEventType::CountryExpansion => "Country Expansion",
            GrowthEventType::LeadershipPromotion => "Leadership Promotion",
            GrowthEventType::SpecialGrowthCampaign => "Special Growth Campaign",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum GrowthEventStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[default]
    #[serde(rename = "On Hold")]
    OnHold,
}

impl GrowthEventStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GrowthEventStatus::Planned => "Planned",
            GrowthEventStatus::InProgress => "In Progress",
            GrowthEventStatus::Completed => "Completed",
            GrowthEventStatus::OnHold => "On Hold",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthKpi {
    pub value: f64,
    /// Always 0 for now; deltas are not computed from history.
    pub change: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthKpiSnapshot {
    pub volume: GrowthKpi,
    pub activations: GrowthKpi,
    pub retention: GrowthKpi,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthEvent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: GrowthEventType,
    pub status: GrowthEventStatus,
    pub market: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub owner_name: Option<String>,
    pub kpis: GrowthKpiSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_event_serializes_labels() {
        let event = GrowthEvent {
            event_type: GrowthEventType::CityLaunch,
            status: GrowthEventStatus::InProgress,
            ..GrowthEvent::default()
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "City Launch");
        assert_eq!(json["status"], "In Progress");
    }
}
