//! Investor directory assembler.

use globalview_core::normalize::{compose_market, UNKNOWN};
use globalview_core::views::{Investor, Page};

use crate::client::GlobalviewClient;
use crate::error::ClientError;
use crate::query::{into_page, ListQuery};
use crate::types::{list_from, RawInvestor};

impl GlobalviewClient {
    /// Paginated investor list, optionally filtered by `query.search`.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_investors(&self, query: &ListQuery) -> Result<Page<Investor>, ClientError> {
        let body = self
            .get_json(&["globalview", "investors"], &query.to_params())
            .await?;
        let items = list_from::<RawInvestor>(&body, "investors")
            .iter()
            .map(map_investor)
            .collect();
        Ok(into_page(items, &body, query))
    }
}

#[must_use]
pub fn map_investor(raw: &RawInvestor) -> Investor {
    let cap_total = raw.cap_total.unwrap_or(0.0);
    Investor {
        id: raw.id.clone().unwrap_or_default(),
        name: raw
            .resolved_name()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN)
            .to_string(),
        email: raw.email.clone(),
        phone: raw.phone.clone(),
        market: compose_market(
            raw.country.as_deref(),
            raw.region.as_deref(),
            raw.city.as_deref(),
        ),
        country: raw.country.clone(),
        city: raw.city.clone(),
        total_invested: raw.total_invested.unwrap_or(0.0),
        cap_total,
        cap_remaining: raw.cap_remaining.unwrap_or(cap_total),
        package_active: raw.package_active.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn investor_maps_financials_and_market() {
        let raw: RawInvestor = serde_json::from_value(json!({
            "id": "I1",
            "fullName": "Eva",
            "email": "eva@example.com",
            "country": "Spain",
            "region": "Catalonia",
            "city": "Barcelona",
            "totalInvested": "15000",
            "capTotal": 50000,
            "capRemaining": 35000,
            "packageActive": true
        }))
        .unwrap();
        let investor = map_investor(&raw);
        assert_eq!(investor.market, "Spain - Catalonia - Barcelona");
        assert_eq!(investor.total_invested, 15000.0);
        assert_eq!(investor.cap_remaining, 35000.0);
        assert!(investor.package_active);
    }

    #[test]
    fn investor_defaults_missing_fields() {
        let raw: RawInvestor = serde_json::from_value(json!({"capTotal": 1000})).unwrap();
        let investor = map_investor(&raw);
        assert_eq!(investor.name, "Unknown");
        assert_eq!(investor.cap_remaining, 1000.0);
        assert!(!investor.package_active);
        assert_eq!(investor.phone, None);
    }
}
