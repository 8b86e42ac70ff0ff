use serde::Serialize;

/// Display status of a campaign. Serializes as its label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CampaignStatus {
    Active,
    Draft,
    Completed,
    #[default]
    Paused,
}

impl CampaignStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Draft => "Draft",
            CampaignStatus::Completed => "Completed",
            CampaignStatus::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListItem {
    pub id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub market: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// `"<N> days"`, or `"-"` when either date is unusable.
    pub duration: String,
    pub budget: f64,
    pub leads_generated: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignImpact {
    pub campaign_id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub duration: String,
    pub volume_before: f64,
    pub volume_after: f64,
    pub volume_lift_percent: f64,
    pub new_activations: u32,
    pub participating_leaders: u32,
}
