//! Raw `GlobalView` API payloads.
//!
//! The backend is loosely typed: numbers occasionally arrive as strings, ids
//! as numbers, and almost any field may be missing. Every field is therefore
//! optional and decoded leniently; assemblers supply the defaults. List
//! endpoints wrap records in an envelope keyed by collection name
//! (`{"leaders": [...]}`) but a bare array is accepted too.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lenient field decoders.
mod lenient {
    use serde::de::DeserializeOwned;

    use super::{Deserialize, Deserializer, Value};

    /// Accepts a JSON number, a numeric string, or null.
    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(value_as_f64))
    }

    /// Accepts a string or a number, rendering numbers as strings.
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Treats an explicit `null` like a missing key.
    pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
    }

    /// A nested array where `null` is empty and malformed entries are
    /// skipped instead of failing the enclosing record.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter_map(|(idx, v)| {
                    serde_json::from_value(v)
                        .map_err(|e| {
                            tracing::warn!(index = idx, error = %e, "skipping malformed nested entry");
                        })
                        .ok()
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn value_as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite())
    }
}

pub(crate) use lenient::value_as_f64;

/// Extracts a list of `T` from a response that is either a bare array or an
/// object holding the array under `key` (or `data`).
///
/// Entries that fail to decode are logged and skipped so one malformed record
/// cannot fail the list. A missing list is empty.
pub(crate) fn list_from<T: DeserializeOwned>(body: &Value, key: &str) -> Vec<T> {
    let entries = match body {
        Value::Array(items) => Some(items),
        Value::Object(map) => map
            .get(key)
            .or_else(|| map.get("data"))
            .and_then(Value::as_array),
        _ => None,
    };
    entries
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(idx, v)| {
            serde_json::from_value::<T>(v.clone())
                .map_err(|e| {
                    tracing::warn!(key, index = idx, error = %e, "skipping malformed entry");
                })
                .ok()
        })
        .collect()
}

/// Returns `body[key]` when present, otherwise `body` itself.
pub(crate) fn unwrap_key<'a>(body: &'a Value, key: &str) -> &'a Value {
    body.get(key).filter(|v| v.is_object()).unwrap_or(body)
}

/// Decodes the object at `body[key]` (or `body` itself).
///
/// A `null` body is the default record. Any other undecodable shape is logged
/// and also falls back to the default, so the panel renders its empty state.
pub(crate) fn object_from<T: DeserializeOwned + Default>(body: &Value, key: &str) -> T {
    let source = unwrap_key(body, key);
    if source.is_null() {
        return T::default();
    }
    serde_json::from_value(source.clone()).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "undecodable object, using empty record");
        T::default()
    })
}

fn first<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates.iter().copied().find_map(Option::as_deref)
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPagination {
    #[serde(deserialize_with = "lenient::number")]
    pub page: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub current_page: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub limit: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_count: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_pages: Option<f64>,
}

impl RawPagination {
    pub(crate) fn from_body(body: &Value) -> Self {
        match body.get("pagination") {
            Some(p) if p.is_object() => object_from(p, "pagination"),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn resolved_page(&self) -> Option<f64> {
        self.page.or(self.current_page)
    }

    #[must_use]
    pub fn resolved_total(&self) -> Option<f64> {
        self.total.or(self.total_count)
    }
}

// ---------------------------------------------------------------------------
// BI: leaders
// ---------------------------------------------------------------------------

/// A leader record as returned by any of the BI leader endpoints. Each
/// endpoint fills a different subset of the fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLeader {
    #[serde(deserialize_with = "lenient::string")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub business_volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub lifetime_volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub personal_volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub team_volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub growth_percent: Option<f64>,
    pub status: Option<String>,
    pub consistency: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub team_size: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub days_since_last_contact: Option<f64>,
    pub last_contact_at: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub leg_threshold: Option<f64>,
    #[serde(deserialize_with = "lenient::list")]
    pub legs: Vec<RawLeg>,
    #[serde(deserialize_with = "lenient::number")]
    pub level: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub rank: Option<f64>,
}

impl RawLeader {
    /// `userId`, falling back to `id`.
    #[must_use]
    pub fn resolved_id(&self) -> Option<&str> {
        first(&[&self.user_id, &self.id])
    }

    /// `fullName`, falling back to `name`.
    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        first(&[&self.full_name, &self.name])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLeg {
    #[serde(deserialize_with = "lenient::string")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume: Option<f64>,
}

impl RawLeg {
    #[must_use]
    pub fn resolved_id(&self) -> Option<&str> {
        first(&[&self.user_id, &self.id])
    }

    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        first(&[&self.full_name, &self.name])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVolumePoint {
    pub period: Option<String>,
    pub date: Option<String>,
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume: Option<f64>,
}

impl RawVolumePoint {
    /// `period`, then `date`, then `label`.
    #[must_use]
    pub fn resolved_period(&self) -> Option<&str> {
        first(&[&self.period, &self.date, &self.label])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDailyClosure {
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub order_count: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub new_leaders: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume_change_percent: Option<f64>,
}

// ---------------------------------------------------------------------------
// BI: markets and KPIs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMarket {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub change_percent: Option<f64>,
    pub reason: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub business_volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub leader_count: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub growth_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawKpi {
    #[serde(deserialize_with = "lenient::number")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub trend_percent: Option<f64>,
    /// Either a direction (`"up"`, `"down"`, `"neutral"`) or, from older
    /// endpoints, the percentage itself.
    pub trend: Option<Value>,
}

impl RawKpi {
    /// `trendPercent`, falling back to a numeric `trend`.
    #[must_use]
    pub fn resolved_trend_percent(&self) -> Option<f64> {
        self.trend_percent
            .or_else(|| self.trend.as_ref().and_then(value_as_f64))
    }

    /// The direction named by a textual `trend`, if any.
    #[must_use]
    pub fn trend_label(&self) -> Option<&str> {
        self.trend.as_ref().and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCall {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub scheduled_at: Option<String>,
    pub channel: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub required_roles: Vec<String>,
    #[serde(deserialize_with = "lenient::null_default")]
    pub attendance_summary: RawAttendanceSummary,
    #[serde(deserialize_with = "lenient::list")]
    pub attendees: Vec<RawAttendee>,
    #[serde(deserialize_with = "lenient::list")]
    pub action_items: Vec<RawActionItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAttendanceSummary {
    #[serde(deserialize_with = "lenient::number")]
    pub attendance_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_invited: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_present: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAttendee {
    #[serde(deserialize_with = "lenient::string")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub participation_score: Option<f64>,
}

impl RawAttendee {
    #[must_use]
    pub fn resolved_id(&self) -> Option<&str> {
        first(&[&self.user_id, &self.id])
    }

    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        first(&[&self.full_name, &self.name])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawActionItem {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub owner_name: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

impl RawActionItem {
    /// `description`, falling back to `title`.
    #[must_use]
    pub fn resolved_description(&self) -> Option<&str> {
        first(&[&self.description, &self.title])
    }
}

// ---------------------------------------------------------------------------
// Campaigns and growth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCampaign {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub campaign_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub budget: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub leads_generated: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume_before: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume_after: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub new_activations: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub participating_leaders: Option<f64>,
}

impl RawCampaign {
    /// `id`, falling back to `campaignId`.
    #[must_use]
    pub fn resolved_id(&self) -> Option<&str> {
        first(&[&self.id, &self.campaign_id])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawGrowthEvent {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub owner_name: Option<String>,
    /// Free-form KPI map; values are numbers, numeric strings, or
    /// `{"value": n}` objects.
    #[serde(deserialize_with = "lenient::null_default")]
    pub kpis: HashMap<String, Value>,
}

impl RawGrowthEvent {
    /// `name`, falling back to `title`.
    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        first(&[&self.name, &self.title])
    }
}

// ---------------------------------------------------------------------------
// Investors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInvestor {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_invested: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub cap_total: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub cap_remaining: Option<f64>,
    pub package_active: Option<bool>,
}

impl RawInvestor {
    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        first(&[&self.full_name, &self.name])
    }
}

// ---------------------------------------------------------------------------
// Communication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawHealth {
    #[serde(deserialize_with = "lenient::number")]
    pub window_days: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub days: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_leaders: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub contacted_leaders: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub contact_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::list")]
    pub by_channel: Vec<RawChannelCount>,
}

impl RawHealth {
    /// `windowDays`, falling back to `days`.
    #[must_use]
    pub fn resolved_window(&self) -> Option<f64> {
        self.window_days.or(self.days)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawChannelCount {
    pub channel: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub count: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFollowUp {
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub leader_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub leader_user_id: Option<String>,
    pub leader_name: Option<String>,
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub owner_name: Option<String>,
    pub notes: Option<String>,
}

impl RawFollowUp {
    /// `leaderId`, falling back to `leaderUserId`.
    #[must_use]
    pub fn resolved_leader_id(&self) -> Option<&str> {
        first(&[&self.leader_id, &self.leader_user_id])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWeeklyBoardEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub leader_user_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub leader_id: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub follow_up: Option<RawFollowUp>,
}

impl RawWeeklyBoardEntry {
    /// `leaderUserId`, falling back to `leaderId`.
    #[must_use]
    pub fn resolved_leader_id(&self) -> Option<&str> {
        first(&[&self.leader_user_id, &self.leader_id])
    }

    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        first(&[&self.full_name, &self.name])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWeeklySummary {
    pub week_start: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_leaders: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub not_contacted: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub contacted: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub need_followup: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub completed: Option<f64>,
}
