//! Communication assemblers: contact health windows, follow-ups, and the
//! weekly contact board.

use chrono::{DateTime, Utc};
use globalview_core::format::{round1, EM_DASH};
use globalview_core::normalize::{
    channel_label, classify_followup_status, compose_market, map_followup_source,
    normalize_count, role_label, synthesize_followup_id, UNKNOWN,
};
use globalview_core::views::{
    ChannelCount, CommunicationHealth, CommunicationMetrics, FollowUp, FollowUpStatus,
    WeeklyBoard, WeeklyBoardLeader, WeeklyStatus, WeeklySummary,
};
use serde::Serialize;
use serde_json::Value;

use crate::auth::decode_identity;
use crate::client::{GlobalviewClient, RequestOptions};
use crate::error::ClientError;
use crate::query::{ListQuery, QueryParams};
use crate::types::{
    list_from, object_from, RawFollowUp, RawHealth, RawWeeklyBoardEntry, RawWeeklySummary,
};

/// Contact-health windows combined by [`GlobalviewClient::get_communication_metrics`].
pub const HEALTH_WINDOWS: [u32; 3] = [7, 14, 30];

/// Whose follow-ups to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OwnerFilter {
    /// The caller's own, read from the token. Falls back to everyone's when
    /// the token carries no readable identity.
    #[default]
    Mine,
    All,
    User(String),
}

/// Filters for [`GlobalviewClient::get_followups`].
#[derive(Debug, Clone, Default)]
pub struct FollowUpQuery {
    pub owner: OwnerFilter,
    pub due_before: Option<String>,
    pub list: ListQuery,
}

impl FollowUpQuery {
    fn to_params(&self, token: Option<&str>) -> QueryParams {
        let mut params = self.list.to_params();
        let owner = match &self.owner {
            OwnerFilter::Mine => token.and_then(decode_identity).map(|id| id.user_id),
            OwnerFilter::All => None,
            OwnerFilter::User(id) => Some(id.clone()),
        };
        params.push_opt("ownerGvUserId", owner);
        params.push_opt("dueBefore", self.due_before.as_deref());
        params
    }
}

/// Body of a weekly status write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStatusUpdate {
    pub leader_user_id: String,
    pub date: String,
    pub status: WeeklyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn communication(endpoint: &str) -> [&str; 3] {
    ["globalview", "communication", endpoint]
}

fn weekly(endpoint: &str) -> [&str; 4] {
    ["globalview", "communication", "weekly", endpoint]
}

impl GlobalviewClient {
    /// Contact coverage over the last `days` days.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_communication_health(
        &self,
        days: u32,
    ) -> Result<CommunicationHealth, ClientError> {
        let mut params = QueryParams::new();
        params.push("days", days);
        let body = self.get_json(&communication("health"), &params).await?;
        let raw: RawHealth = object_from(&body, "health");
        Ok(map_health(&raw, days))
    }

    /// The 7, 14, and 30 day health windows plus the overdue follow-up count,
    /// fetched in parallel.
    ///
    /// # Errors
    ///
    /// Fails if any of the four calls fails.
    pub async fn get_communication_metrics(&self) -> Result<CommunicationMetrics, ClientError> {
        let [w7, w14, w30] = HEALTH_WINDOWS;
        let followups = FollowUpQuery::default();
        let (last_7_days, last_14_days, last_30_days, followups) = tokio::try_join!(
            self.get_communication_health(w7),
            self.get_communication_health(w14),
            self.get_communication_health(w30),
            self.get_followups(&followups),
        )?;
        Ok(CommunicationMetrics {
            last_7_days,
            last_14_days,
            last_30_days,
            overdue_follow_ups: count_overdue(&followups),
        })
    }

    /// Follow-ups, by default the caller's own.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_followups(&self, query: &FollowUpQuery) -> Result<Vec<FollowUp>, ClientError> {
        let params = query.to_params(self.token());
        let body = self.get_json(&communication("followups"), &params).await?;
        let now = Utc::now();
        Ok(list_from::<RawFollowUp>(&body, "followups")
            .iter()
            .map(|raw| map_followup(raw, now))
            .collect())
    }

    /// Contact board for the week containing `date` (server default: this week).
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_weekly_board(&self, date: Option<&str>) -> Result<WeeklyBoard, ClientError> {
        let mut params = QueryParams::new();
        params.push_opt("date", date);
        let body = self.get_json(&weekly("board"), &params).await?;
        Ok(map_weekly_board(&body, Utc::now()))
    }

    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_weekly_summary(&self, date: Option<&str>) -> Result<WeeklySummary, ClientError> {
        let mut params = QueryParams::new();
        params.push_opt("date", date);
        let body = self.get_json(&weekly("summary"), &params).await?;
        let raw: RawWeeklySummary = object_from(&body, "summary");
        Ok(map_weekly_summary(&raw))
    }

    /// Records a leader's weekly contact status. Any status may follow any
    /// other. The board is not updated locally; re-fetch it to see the change.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn update_weekly_status(&self, update: &WeeklyStatusUpdate) -> Result<(), ClientError> {
        let body = serde_json::to_value(update).map_err(|e| ClientError::Deserialize {
            context: "weekly status update".to_string(),
            source: e,
        })?;
        self.post_json(&weekly("status"), &body, &RequestOptions::default())
            .await?;
        Ok(())
    }
}

#[must_use]
pub fn map_health(raw: &RawHealth, requested_days: u32) -> CommunicationHealth {
    let total_leaders = normalize_count(raw.total_leaders);
    let contacted_leaders = normalize_count(raw.contacted_leaders);
    let contact_rate = raw.contact_rate.map_or_else(
        || share_percent(contacted_leaders, total_leaders),
        round1,
    );
    CommunicationHealth {
        window_days: raw
            .resolved_window()
            .map_or(requested_days, |d| normalize_count(Some(d))),
        total_leaders,
        contacted_leaders,
        contact_rate,
        by_channel: raw
            .by_channel
            .iter()
            .map(|c| ChannelCount {
                channel: channel_label(c.channel.as_deref(), UNKNOWN),
                count: normalize_count(c.count),
            })
            .collect(),
    }
}

/// Uses the server id when present, otherwise a stable synthesized one.
#[must_use]
pub fn map_followup(raw: &RawFollowUp, now: DateTime<Utc>) -> FollowUp {
    let leader_id = raw.resolved_leader_id().unwrap_or_default().to_string();
    let title = raw.title.clone().unwrap_or_default();
    let id = raw
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| {
            synthesize_followup_id(&leader_id, raw.due_date.as_deref().unwrap_or_default(), &title)
        });
    FollowUp {
        id,
        leader_name: raw
            .leader_name
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        status: classify_followup_status(raw.status.as_deref(), raw.due_date.as_deref(), now),
        source: map_followup_source(raw.source.as_deref()),
        leader_id,
        title,
        due_date: raw.due_date.clone(),
        owner_name: raw.owner_name.clone(),
        notes: raw.notes.clone(),
    }
}

#[must_use]
pub fn count_overdue(followups: &[FollowUp]) -> u32 {
    let overdue = followups
        .iter()
        .filter(|f| f.status == FollowUpStatus::Overdue)
        .count();
    u32::try_from(overdue).unwrap_or(u32::MAX)
}

/// Unknown status strings read as not contacted.
#[must_use]
pub fn map_board_entry(raw: &RawWeeklyBoardEntry, now: DateTime<Utc>) -> WeeklyBoardLeader {
    WeeklyBoardLeader {
        leader_id: raw.resolved_leader_id().unwrap_or_default().to_string(),
        name: raw.resolved_name().unwrap_or(UNKNOWN).to_string(),
        role: role_label(raw.role.as_deref(), EM_DASH),
        market: compose_market(
            raw.country.as_deref(),
            raw.region.as_deref(),
            raw.city.as_deref(),
        ),
        status: raw
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        notes: raw.notes.clone(),
        follow_up: raw.follow_up.as_ref().map(|f| map_followup(f, now)),
    }
}

#[must_use]
pub fn map_weekly_board(body: &Value, now: DateTime<Utc>) -> WeeklyBoard {
    WeeklyBoard {
        week_start: body
            .get("weekStart")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        leaders: list_from::<RawWeeklyBoardEntry>(body, "leaders")
            .iter()
            .map(|raw| map_board_entry(raw, now))
            .collect(),
    }
}

#[must_use]
pub fn map_weekly_summary(raw: &RawWeeklySummary) -> WeeklySummary {
    let total_leaders = normalize_count(raw.total_leaders);
    let completed = normalize_count(raw.completed);
    WeeklySummary {
        week_start: raw.week_start.clone().unwrap_or_default(),
        total_leaders,
        not_contacted: normalize_count(raw.not_contacted),
        contacted: normalize_count(raw.contacted),
        need_followup: normalize_count(raw.need_followup),
        completed,
        completion_percent: share_percent(completed, total_leaders),
    }
}

fn share_percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(f64::from(part) / f64::from(whole) * 100.0)
}

#[cfg(test)]
#[path = "communication_test.rs"]
mod tests;
