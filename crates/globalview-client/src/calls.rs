//! Weekly leadership call assemblers.

use globalview_core::format::{parse_timestamp, round1, EM_DASH};
use globalview_core::normalize::{
    channel_label, clamp_participation, is_present, map_action_item_status, normalize_count,
    normalize_role, role_label, UNKNOWN,
};
use globalview_core::views::{
    ActionItem, CallAttendee, WeeklyCallDetail, WeeklyCallListItem, WeeklyCallsMetrics,
};

use crate::client::GlobalviewClient;
use crate::error::ClientError;
use crate::query::{ListQuery, QueryParams};
use crate::types::{list_from, object_from, RawAttendee, RawCall};

impl GlobalviewClient {
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_calls(&self, query: &ListQuery) -> Result<Vec<WeeklyCallListItem>, ClientError> {
        let body = self
            .get_json(&["globalview", "calls"], &query.to_params())
            .await?;
        Ok(list_from::<RawCall>(&body, "calls")
            .iter()
            .map(map_call_list_item)
            .collect())
    }

    /// Full detail of one call: attendees with participation and action items.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_call_summary(&self, call_id: &str) -> Result<WeeklyCallDetail, ClientError> {
        let body = self
            .get_json(&["globalview", "calls", call_id, "summary"], &QueryParams::new())
            .await?;
        let raw: RawCall = object_from(&body, "call");
        let mut detail = map_call_detail(&raw);
        if detail.id.is_empty() {
            detail.id = call_id.to_string();
        }
        Ok(detail)
    }

    /// Attendance figures for the latest two calls.
    ///
    /// Lists calls, picks the two most recent by `scheduledAt`, then fetches
    /// the latest call's summary to count no-shows.
    ///
    /// # Errors
    ///
    /// Fails if either the list or the summary call fails.
    pub async fn get_weekly_calls_metrics(
        &self,
        query: &ListQuery,
    ) -> Result<WeeklyCallsMetrics, ClientError> {
        let calls = self.get_calls(query).await?;
        let (latest, previous) = latest_two(calls);
        let detail = match &latest {
            Some(call) => Some(self.get_call_summary(&call.id).await?),
            None => None,
        };
        Ok(build_weekly_calls_metrics(latest, previous, detail.as_ref()))
    }
}

fn required_roles(raw: &RawCall) -> Vec<String> {
    raw.required_roles
        .iter()
        .filter_map(|role| normalize_role(Some(role.as_str())))
        .collect()
}

/// Server attendance rate when sent, else the share of attendees present.
fn attendance_percent(raw: &RawCall) -> f64 {
    if let Some(rate) = raw.attendance_summary.attendance_rate {
        return round1(rate);
    }
    let invited = raw.attendees.len();
    if invited == 0 {
        return 0.0;
    }
    let present = raw
        .attendees
        .iter()
        .filter(|a| is_present(a.status.as_deref()))
        .count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = present as f64 / invited as f64;
    round1(ratio * 100.0)
}

#[must_use]
pub fn map_call_list_item(raw: &RawCall) -> WeeklyCallListItem {
    let summary = &raw.attendance_summary;
    let counted_present = raw
        .attendees
        .iter()
        .filter(|a| is_present(a.status.as_deref()))
        .count();
    WeeklyCallListItem {
        id: raw.id.clone().unwrap_or_default(),
        title: raw.title.clone().unwrap_or_default(),
        scheduled_at: raw.scheduled_at.clone().unwrap_or_default(),
        channel: channel_label(raw.channel.as_deref(), EM_DASH),
        required_roles: required_roles(raw),
        attendance_percent: attendance_percent(raw),
        total_invited: summary
            .total_invited
            .map_or_else(|| saturating_u32(raw.attendees.len()), |n| normalize_count(Some(n))),
        total_present: summary
            .total_present
            .map_or_else(|| saturating_u32(counted_present), |n| normalize_count(Some(n))),
    }
}

#[must_use]
pub fn map_attendee(raw: &RawAttendee) -> CallAttendee {
    let status = raw
        .status
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_ascii_uppercase();
    CallAttendee {
        user_id: raw.resolved_id().unwrap_or_default().to_string(),
        name: raw.resolved_name().unwrap_or(UNKNOWN).to_string(),
        role: role_label(raw.role.as_deref(), EM_DASH),
        present: is_present(Some(status.as_str())),
        status,
        participation_score: clamp_participation(raw.participation_score),
    }
}

#[must_use]
pub fn map_call_detail(raw: &RawCall) -> WeeklyCallDetail {
    WeeklyCallDetail {
        id: raw.id.clone().unwrap_or_default(),
        title: raw.title.clone().unwrap_or_default(),
        scheduled_at: raw.scheduled_at.clone().unwrap_or_default(),
        channel: channel_label(raw.channel.as_deref(), EM_DASH),
        required_roles: required_roles(raw),
        attendance_percent: attendance_percent(raw),
        attendees: raw.attendees.iter().map(map_attendee).collect(),
        action_items: raw
            .action_items
            .iter()
            .map(|item| ActionItem {
                id: item.id.clone().unwrap_or_default(),
                description: item.resolved_description().unwrap_or_default().to_string(),
                owner_name: item
                    .owner_name
                    .clone()
                    .unwrap_or_else(|| EM_DASH.to_string()),
                due_date: item.due_date.clone(),
                status: map_action_item_status(item.status.as_deref()),
            })
            .collect(),
    }
}

/// Most recent and second most recent call by `scheduledAt`. Calls whose
/// timestamp does not parse sort last.
#[must_use]
pub fn latest_two(
    mut calls: Vec<WeeklyCallListItem>,
) -> (Option<WeeklyCallListItem>, Option<WeeklyCallListItem>) {
    calls.sort_by_key(|call| std::cmp::Reverse(parse_timestamp(&call.scheduled_at)));
    let mut iter = calls.into_iter();
    (iter.next(), iter.next())
}

/// Attendance is the latest call's own rate; the change is measured against
/// the previous call. No-shows come from the latest call's summary.
#[must_use]
pub fn build_weekly_calls_metrics(
    latest: Option<WeeklyCallListItem>,
    previous: Option<WeeklyCallListItem>,
    latest_detail: Option<&WeeklyCallDetail>,
) -> WeeklyCallsMetrics {
    let attendance_percent = latest.as_ref().map_or(0.0, |c| c.attendance_percent);
    let attendance_change = match (&latest, &previous) {
        (Some(l), Some(p)) => round1(l.attendance_percent - p.attendance_percent),
        _ => 0.0,
    };
    WeeklyCallsMetrics {
        no_show_count: latest_detail.map_or(0, WeeklyCallDetail::no_show_count),
        attendance_percent,
        attendance_change,
        latest_call: latest,
        previous_call: previous,
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
