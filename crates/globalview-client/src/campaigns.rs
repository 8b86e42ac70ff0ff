//! Campaign list and impact assemblers.

use globalview_core::format::{format_duration, percent_change};
use globalview_core::normalize::{compose_market, map_campaign_status, normalize_count};
use globalview_core::views::{CampaignImpact, CampaignListItem};

use crate::client::GlobalviewClient;
use crate::error::ClientError;
use crate::query::{ListQuery, QueryParams};
use crate::types::{list_from, object_from, RawCampaign};

impl GlobalviewClient {
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_campaigns(&self, query: &ListQuery) -> Result<Vec<CampaignListItem>, ClientError> {
        let body = self
            .get_json(&["globalview", "campaigns"], &query.to_params())
            .await?;
        Ok(list_from::<RawCampaign>(&body, "campaigns")
            .iter()
            .map(map_campaign)
            .collect())
    }

    /// Before/after volume and activations attributed to one campaign.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_campaign_impact(&self, campaign_id: &str) -> Result<CampaignImpact, ClientError> {
        let body = self
            .get_json(
                &["globalview", "campaigns", campaign_id, "impact"],
                &QueryParams::new(),
            )
            .await?;
        let raw: RawCampaign = object_from(&body, "impact");
        Ok(map_campaign_impact(&raw, campaign_id))
    }
}

#[must_use]
pub fn map_campaign(raw: &RawCampaign) -> CampaignListItem {
    CampaignListItem {
        id: raw.resolved_id().unwrap_or_default().to_string(),
        name: raw.name.clone().unwrap_or_default(),
        status: map_campaign_status(raw.status.as_deref()),
        market: compose_market(
            raw.country.as_deref(),
            raw.region.as_deref(),
            raw.city.as_deref(),
        ),
        duration: format_duration(raw.start_date.as_deref(), raw.end_date.as_deref()),
        start_date: raw.start_date.clone(),
        end_date: raw.end_date.clone(),
        budget: raw.budget.unwrap_or(0.0),
        leads_generated: normalize_count(raw.leads_generated),
    }
}

/// `campaign_id` is used when the response does not echo the id.
#[must_use]
pub fn map_campaign_impact(raw: &RawCampaign, campaign_id: &str) -> CampaignImpact {
    let volume_before = raw.volume_before.unwrap_or(0.0);
    let volume_after = raw.volume_after.unwrap_or(0.0);
    CampaignImpact {
        campaign_id: raw
            .resolved_id()
            .filter(|id| !id.is_empty())
            .unwrap_or(campaign_id)
            .to_string(),
        name: raw.name.clone().unwrap_or_default(),
        status: map_campaign_status(raw.status.as_deref()),
        duration: format_duration(raw.start_date.as_deref(), raw.end_date.as_deref()),
        volume_before,
        volume_after,
        volume_lift_percent: percent_change(volume_before, volume_after),
        new_activations: normalize_count(raw.new_activations),
        participating_leaders: normalize_count(raw.participating_leaders),
    }
}

#[cfg(test)]
mod tests {
    use globalview_core::views::CampaignStatus;
    use serde_json::json;

    use super::*;

    fn campaign(value: serde_json::Value) -> RawCampaign {
        serde_json::from_value(value).expect("fixture should decode")
    }

    #[test]
    fn campaign_row_formats_duration_and_market() {
        let row = map_campaign(&campaign(json!({
            "id": 3,
            "name": "Spring push",
            "status": "active",
            "country": "Mexico",
            "city": "Monterrey",
            "startDate": "2025-03-01",
            "endDate": "2025-03-15T12:00:00Z",
            "budget": "2500.75",
            "leadsGenerated": 41
        })));
        assert_eq!(row.id, "3");
        assert_eq!(row.status, CampaignStatus::Active);
        assert_eq!(row.market, "Mexico - Monterrey");
        assert_eq!(row.duration, "15 days");
        assert_eq!(row.budget, 2500.75);
        assert_eq!(row.leads_generated, 41);
    }

    #[test]
    fn campaign_without_end_date_has_dash_duration() {
        let row = map_campaign(&campaign(json!({"startDate": "2025-03-01", "status": "PAUSED"})));
        assert_eq!(row.duration, "-");
        assert_eq!(row.status, CampaignStatus::Paused);
    }

    #[test]
    fn unknown_campaign_status_is_paused() {
        let row = map_campaign(&campaign(json!({"status": "ARCHIVED"})));
        assert_eq!(row.status.label(), "Paused");
    }

    #[test]
    fn impact_computes_lift_and_keeps_requested_id() {
        let impact = map_campaign_impact(
            &campaign(json!({
                "name": "Spring push",
                "status": "COMPLETED",
                "volumeBefore": 8000,
                "volumeAfter": 9000,
                "newActivations": 12,
                "participatingLeaders": 30
            })),
            "C-77",
        );
        assert_eq!(impact.campaign_id, "C-77");
        assert_eq!(impact.status, CampaignStatus::Completed);
        assert_eq!(impact.volume_lift_percent, 12.5);
        assert_eq!(impact.new_activations, 12);
    }

    #[test]
    fn impact_with_zero_baseline_has_no_lift() {
        let impact = map_campaign_impact(&campaign(json!({"volumeAfter": 500})), "C-1");
        assert_eq!(impact.volume_lift_percent, 0.0);
    }
}
