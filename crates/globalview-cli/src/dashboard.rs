//! The combined dashboard: every panel fetched concurrently, each falling
//! back to its empty state on failure.

use globalview_client::{panel_or_default, GlobalviewClient, ListQuery};
use globalview_core::views::{
    CommunicationMetrics, KpiSet, MarketIntervention, TopLeader, WeeklyCallsMetrics,
    WeeklySummary,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Dashboard {
    pub kpis: KpiSet,
    pub top_leaders: Vec<TopLeader>,
    pub interventions: Vec<MarketIntervention>,
    pub weekly_calls: WeeklyCallsMetrics,
    pub communication: CommunicationMetrics,
    pub weekly_summary: WeeklySummary,
}

pub(crate) async fn build_dashboard(client: &GlobalviewClient, query: &ListQuery) -> Dashboard {
    let (kpis, top_leaders, interventions, weekly_calls, communication, weekly_summary) = tokio::join!(
        panel_or_default("kpis", client.get_kpis(query)),
        panel_or_default("top leaders", client.get_top_leaders(query)),
        panel_or_default(
            "interventions",
            client.get_markets_needing_intervention(query)
        ),
        panel_or_default("weekly calls", client.get_weekly_calls_metrics(query)),
        panel_or_default("communication", client.get_communication_metrics()),
        panel_or_default("weekly summary", client.get_weekly_summary(None)),
    );

    Dashboard {
        kpis,
        top_leaders,
        interventions,
        weekly_calls,
        communication,
        weekly_summary,
    }
}
