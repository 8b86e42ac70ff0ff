//! Growth event assembler.

use std::collections::HashMap;

use globalview_core::normalize::{compose_market, map_growth_event_status, map_growth_event_type};
use globalview_core::views::{GrowthEvent, GrowthKpi, GrowthKpiSnapshot};
use serde_json::Value;

use crate::client::GlobalviewClient;
use crate::error::ClientError;
use crate::query::ListQuery;
use crate::types::{list_from, value_as_f64, RawGrowthEvent};

impl GlobalviewClient {
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_growth_events(&self, query: &ListQuery) -> Result<Vec<GrowthEvent>, ClientError> {
        let body = self
            .get_json(&["globalview", "growth", "events"], &query.to_params())
            .await?;
        Ok(list_from::<RawGrowthEvent>(&body, "events")
            .iter()
            .map(map_growth_event)
            .collect())
    }
}

/// Reads a KPI value that may be a number, a numeric string, or
/// `{"value": n}`.
fn kpi(kpis: &HashMap<String, Value>, key: &str) -> GrowthKpi {
    let value = kpis
        .get(key)
        .and_then(|v| value_as_f64(v).or_else(|| v.get("value").and_then(value_as_f64)))
        .unwrap_or(0.0);
    GrowthKpi { value, change: 0.0 }
}

#[must_use]
pub fn map_growth_event(raw: &RawGrowthEvent) -> GrowthEvent {
    GrowthEvent {
        id: raw.id.clone().unwrap_or_default(),
        name: raw.resolved_name().unwrap_or_default().to_string(),
        event_type: map_growth_event_type(raw.event_type.as_deref()),
        status: map_growth_event_status(raw.status.as_deref()),
        market: compose_market(
            raw.country.as_deref(),
            raw.region.as_deref(),
            raw.city.as_deref(),
        ),
        start_date: raw.start_date.clone(),
        end_date: raw.end_date.clone(),
        owner_name: raw.owner_name.clone(),
        kpis: GrowthKpiSnapshot {
            volume: kpi(&raw.kpis, "volume"),
            activations: kpi(&raw.kpis, "activations"),
            retention: kpi(&raw.kpis, "retention"),
        },
    }
}

#[cfg(test)]
mod tests {
    use globalview_core::views::{GrowthEventStatus, GrowthEventType};
    use serde_json::json;

    use super::*;

    fn event(value: serde_json::Value) -> RawGrowthEvent {
        serde_json::from_value(value).expect("fixture should decode")
    }

    #[test]
    fn growth_event_maps_type_status_and_kpis() {
        let mapped = map_growth_event(&event(json!({
            "id": "G1",
            "name": "Bogotá launch",
            "type": "CITY_LAUNCH",
            "status": "IN_PROGRESS",
            "country": "Colombia",
            "city": "Bogotá",
            "kpis": {"volume": 12000, "activations": "35", "retention": {"value": 0.82}, "nps": 70}
        })));
        assert_eq!(mapped.event_type, GrowthEventType::CityLaunch);
        assert_eq!(mapped.status, GrowthEventStatus::InProgress);
        assert_eq!(mapped.market, "Colombia - Bogotá");
        assert_eq!(mapped.kpis.volume.value, 12000.0);
        assert_eq!(mapped.kpis.activations.value, 35.0);
        assert_eq!(mapped.kpis.retention.value, 0.82);
        assert_eq!(mapped.kpis.volume.change, 0.0);
    }

    #[test]
    fn growth_event_defaults_unknown_values() {
        let mapped = map_growth_event(&event(json!({"type": "HACKATHON", "status": "CANCELLED"})));
        assert_eq!(mapped.event_type, GrowthEventType::SpecialGrowthCampaign);
        assert_eq!(mapped.status, GrowthEventStatus::OnHold);
        assert_eq!(mapped.kpis, GrowthKpiSnapshot::default());
    }

    #[test]
    fn growth_event_serializes_labels() {
        let mapped = map_growth_event(&event(json!({"type": "COUNTRY_EXPANSION", "status": "PLANNED"})));
        let json = serde_json::to_value(&mapped).unwrap();
        assert_eq!(json["type"], "Country Expansion");
        assert_eq!(json["status"], "Planned");
    }
}
