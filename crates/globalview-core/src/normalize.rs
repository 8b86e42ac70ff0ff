//! Pure mapping rules from loosely-typed backend values to view-model values.
//!
//! Every function here is total. Missing or unrecognised input degrades to a
//! documented default so one bad record never fails a whole list.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::format::parse_timestamp;
use crate::views::{
    ActionItemStatus, CampaignStatus, Consistency, FollowUpSource, FollowUpStatus,
    GrowthEventStatus, GrowthEventType, InterventionStatus, LeaderStatus, LegStrength, LegSummary,
    Severity,
};

/// Fallback label for a missing role or channel in data tables.
pub const UNKNOWN: &str = "Unknown";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Trims and upper-cases a backend enum value; blank input is `None`.
fn wire_key(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_uppercase)
}

/// Converts a `SNAKE_CASE` role code into `"Title Case With Spaces"`.
///
/// Already-formatted labels pass through unchanged, so the function is
/// idempotent. Returns `None` for missing or blank input.
#[must_use]
pub fn normalize_role(raw: Option<&str>) -> Option<String> {
    let words: Vec<String> = raw?
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// [`normalize_role`] with a call-site specific fallback (`"Unknown"` or `"—"`).
#[must_use]
pub fn role_label(raw: Option<&str>, fallback: &str) -> String {
    normalize_role(raw).unwrap_or_else(|| fallback.to_string())
}

/// Maps a backend channel code to its display name.
///
/// The five known codes are matched case-insensitively; anything else is
/// returned as sent. Returns `None` for missing or blank input.
#[must_use]
pub fn normalize_channel(raw: Option<&str>) -> Option<String> {
    let trimmed = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let display = match trimmed.to_ascii_uppercase().as_str() {
        "WHATSAPP" => "WhatsApp",
        "TELEGRAM" => "Telegram",
        "PHONE" => "Phone",
        "EMAIL" => "Email",
        "ZOOM" => "Zoom",
        _ => return Some(trimmed.to_string()),
    };
    Some(display.to_string())
}

/// [`normalize_channel`] with a call-site specific fallback.
#[must_use]
pub fn channel_label(raw: Option<&str>, fallback: &str) -> String {
    normalize_channel(raw).unwrap_or_else(|| fallback.to_string())
}

/// Joins the present location segments with `" - "`.
///
/// Blank segments are dropped, so the result never has a leading, trailing,
/// or doubled separator.
#[must_use]
pub fn compose_market(country: Option<&str>, region: Option<&str>, city: Option<&str>) -> String {
    [country, region, city]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

/// `high` when `|change| >= 30`, `medium` when `>= 15`, otherwise `low`.
#[must_use]
pub fn classify_severity(change_percent: f64) -> Severity {
    let magnitude = change_percent.abs();
    if magnitude >= 30.0 {
        Severity::High
    } else if magnitude >= 15.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

#[must_use]
pub fn map_leader_status(raw: Option<&str>) -> LeaderStatus {
    match wire_key(raw).as_deref() {
        Some("AT_RISK") => LeaderStatus::AtRisk,
        Some("INACTIVE") => LeaderStatus::Inactive,
        _ => LeaderStatus::Active,
    }
}

#[must_use]
pub fn map_consistency(raw: Option<&str>) -> Option<Consistency> {
    match wire_key(raw).as_deref() {
        Some("CONSISTENT") => Some(Consistency::Consistent),
        Some("VOLATILE") => Some(Consistency::Volatile),
        Some("IMPROVING") => Some(Consistency::Improving),
        Some("DECLINING") => Some(Consistency::Declining),
        _ => None,
    }
}

#[must_use]
pub fn map_intervention_status(raw: Option<&str>) -> InterventionStatus {
    match wire_key(raw).map(|k| k.replace('-', "_")).as_deref() {
        Some("IN_PROGRESS") => InterventionStatus::InProgress,
        Some("RESOLVED") => InterventionStatus::Resolved,
        _ => InterventionStatus::Open,
    }
}

/// Collapses the five backend follow-up states into the three UI states.
///
/// `RESOLVED` and `IGNORED` are always `completed`. Any other status is
/// `overdue` when the due date is strictly before `now`, and `open` otherwise
/// (including when the due date is missing or unparseable).
#[must_use]
pub fn classify_followup_status(
    raw_status: Option<&str>,
    due_date: Option<&str>,
    now: DateTime<Utc>,
) -> FollowUpStatus {
    if matches!(wire_key(raw_status).as_deref(), Some("RESOLVED" | "IGNORED")) {
        return FollowUpStatus::Completed;
    }
    match due_date.and_then(parse_timestamp) {
        Some(due) if due < now => FollowUpStatus::Overdue,
        _ => FollowUpStatus::Open,
    }
}

#[must_use]
pub fn map_followup_source(raw: Option<&str>) -> FollowUpSource {
    match wire_key(raw).as_deref() {
        Some("CALL") => FollowUpSource::Call,
        Some("ALERT") => FollowUpSource::Alert,
        _ => FollowUpSource::Manual,
    }
}

/// Builds a stable id for a follow-up the server sent without one:
/// `leaderId-dueDate-title` with each whitespace run replaced by `-`.
#[must_use]
pub fn synthesize_followup_id(leader_id: &str, due_date: &str, title: &str) -> String {
    let raw = format!("{leader_id}-{due_date}-{title}");
    WHITESPACE_RUN.replace_all(&raw, "-").into_owned()
}

#[must_use]
pub fn map_growth_event_type(raw: Option<&str>) -> GrowthEventType {
    match wire_key(raw).as_deref() {
        Some("CITY_LAUNCH") => GrowthEventType::CityLaunch,
        Some("COUNTRY_EXPANSION") => GrowthEventType::CountryExpansion,
        Some("LEADERSHIP_PROMOTION") => GrowthEventType::LeadershipPromotion,
        _ => GrowthEventType::SpecialGrowthCampaign,
    }
}

#[must_use]
pub fn map_growth_event_status(raw: Option<&str>) -> GrowthEventStatus {
    match wire_key(raw).as_deref() {
        Some("PLANNED") => GrowthEventStatus::Planned,
        Some("IN_PROGRESS") => GrowthEventStatus::InProgress,
        Some("COMPLETED") => GrowthEventStatus::Completed,
        _ => GrowthEventStatus::OnHold,
    }
}

#[must_use]
pub fn map_campaign_status(raw: Option<&str>) -> CampaignStatus {
    match wire_key(raw).as_deref() {
        Some("ACTIVE") => CampaignStatus::Active,
        Some("DRAFT") => CampaignStatus::Draft,
        Some("COMPLETED") => CampaignStatus::Completed,
        _ => CampaignStatus::Paused,
    }
}

#[must_use]
pub fn map_action_item_status(raw: Option<&str>) -> ActionItemStatus {
    match wire_key(raw).as_deref() {
        Some("COMPLETED" | "DONE") => ActionItemStatus::Completed,
        _ => ActionItemStatus::Pending,
    }
}

/// Only an explicit `PRESENT` counts as attended.
#[must_use]
pub fn is_present(raw_status: Option<&str>) -> bool {
    wire_key(raw_status).as_deref() == Some("PRESENT")
}

/// Clamps a participation score into `0..=3`; missing or NaN is 0.
#[must_use]
pub fn clamp_participation(score: Option<f64>) -> u8 {
    match score {
        Some(s) if s.is_finite() => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let clamped = s.round().clamp(0.0, 3.0) as u8;
            clamped
        }
        _ => 0,
    }
}

/// Rounds a loosely-typed count to a non-negative integer; missing is 0.
#[must_use]
pub fn normalize_count(raw: Option<f64>) -> u32 {
    match raw {
        Some(v) if v.is_finite() => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = v.round().clamp(0.0, f64::from(u32::MAX)) as u32;
            count
        }
        _ => 0,
    }
}

/// Splits legs at `threshold`: `volume >= threshold` is strong.
#[must_use]
pub fn partition_legs(threshold: f64, legs: Vec<LegSummary>) -> LegStrength {
    let (mut strong_legs, mut weak_legs): (Vec<_>, Vec<_>) =
        legs.into_iter().partition(|leg| leg.volume >= threshold);
    strong_legs.sort_by(|a, b| b.volume.total_cmp(&a.volume));
    weak_legs.sort_by(|a, b| b.volume.total_cmp(&a.volume));
    LegStrength {
        threshold,
        strong_legs,
        weak_legs,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
