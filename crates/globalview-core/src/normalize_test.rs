use chrono::TimeZone;

use super::*;
use crate::format::EM_DASH;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
}

// -----------------------------------------------------------------------
// roles
// -----------------------------------------------------------------------

#[test]
fn normalize_role_title_cases_snake_case() {
    assert_eq!(
        normalize_role(Some("COUNTRY_HEAD")).as_deref(),
        Some("Country Head")
    );
    assert_eq!(
        normalize_role(Some("regional_sales_LEAD")).as_deref(),
        Some("Regional Sales Lead")
    );
}

#[test]
fn normalize_role_is_idempotent() {
    for raw in ["COUNTRY_HEAD", "Country Head", "city leader", "x", "__A__B__"] {
        let once = normalize_role(Some(raw));
        let twice = normalize_role(once.as_deref());
        assert_eq!(once, twice, "role {raw:?} not idempotent");
    }
}

#[test]
fn normalize_role_missing_or_blank_is_none() {
    assert_eq!(normalize_role(None), None);
    assert_eq!(normalize_role(Some("")), None);
    assert_eq!(normalize_role(Some("___")), None);
}

#[test]
fn role_label_uses_call_site_fallback() {
    assert_eq!(role_label(None, UNKNOWN), "Unknown");
    assert_eq!(role_label(Some(""), EM_DASH), EM_DASH);
    assert_eq!(role_label(Some("LEADER"), EM_DASH), "Leader");
}

// -----------------------------------------------------------------------
// channels
// -----------------------------------------------------------------------

#[test]
fn normalize_channel_maps_known_codes() {
    assert_eq!(normalize_channel(Some("WHATSAPP")).as_deref(), Some("WhatsApp"));
    assert_eq!(normalize_channel(Some("telegram")).as_deref(), Some("Telegram"));
    assert_eq!(normalize_channel(Some("PHONE")).as_deref(), Some("Phone"));
    assert_eq!(normalize_channel(Some("Email")).as_deref(), Some("Email"));
    assert_eq!(normalize_channel(Some("ZOOM")).as_deref(), Some("Zoom"));
}

#[test]
fn normalize_channel_passes_unknown_codes_through() {
    assert_eq!(normalize_channel(Some("SIGNAL")).as_deref(), Some("SIGNAL"));
}

#[test]
fn normalize_channel_is_idempotent() {
    for raw in ["WHATSAPP", "whatsapp", "WhatsApp", "ZOOM", "Carrier Pigeon"] {
        let once = normalize_channel(Some(raw));
        let twice = normalize_channel(once.as_deref());
        assert_eq!(once, twice, "channel {raw:?} not idempotent");
    }
}

#[test]
fn channel_label_falls_back_for_missing() {
    assert_eq!(channel_label(None, UNKNOWN), "Unknown");
    assert_eq!(channel_label(Some("  "), EM_DASH), EM_DASH);
}

// -----------------------------------------------------------------------
// markets
// -----------------------------------------------------------------------

#[test]
fn compose_market_joins_all_segments() {
    assert_eq!(
        compose_market(Some("Brazil"), Some("SP"), Some("São Paulo")),
        "Brazil - SP - São Paulo"
    );
}

#[test]
fn compose_market_never_produces_stray_separators() {
    let options = [None, Some(""), Some("  "), Some("X")];
    for country in options {
        for region in options {
            for city in options {
                let market = compose_market(country, region, city);
                assert!(!market.starts_with(" - "), "leading separator: {market:?}");
                assert!(!market.ends_with(" - "), "trailing separator: {market:?}");
                assert!(!market.contains(" -  - "), "doubled separator: {market:?}");
                assert!(!market.contains(" - - "), "doubled separator: {market:?}");
            }
        }
    }
}

#[test]
fn compose_market_all_missing_is_empty() {
    assert_eq!(compose_market(None, Some(""), None), "");
}

// -----------------------------------------------------------------------
// severity
// -----------------------------------------------------------------------

#[test]
fn classify_severity_band_edges() {
    assert_eq!(classify_severity(30.0), Severity::High);
    assert_eq!(classify_severity(29.99), Severity::Medium);
    assert_eq!(classify_severity(15.0), Severity::Medium);
    assert_eq!(classify_severity(14.99), Severity::Low);
    assert_eq!(classify_severity(0.0), Severity::Low);
}

#[test]
fn classify_severity_is_symmetric_and_monotonic() {
    let samples = [0.0, 1.0, 14.9, 15.0, 20.0, 29.9, 30.0, 55.0, 1e9];
    let mut previous = Severity::Low;
    for x in samples {
        assert_eq!(classify_severity(x), classify_severity(-x));
        let current = classify_severity(x);
        assert!(current >= previous, "severity decreased at {x}");
        previous = current;
    }
}

#[test]
fn classify_severity_nan_is_low() {
    assert_eq!(classify_severity(f64::NAN), Severity::Low);
}

// -----------------------------------------------------------------------
// statuses
// -----------------------------------------------------------------------

#[test]
fn map_leader_status_cases() {
    assert_eq!(map_leader_status(Some("AT_RISK")), LeaderStatus::AtRisk);
    assert_eq!(map_leader_status(Some("INACTIVE")), LeaderStatus::Inactive);
    assert_eq!(map_leader_status(Some("ACTIVE")), LeaderStatus::Active);
    assert_eq!(map_leader_status(Some("SUSPENDED")), LeaderStatus::Active);
    assert_eq!(map_leader_status(None), LeaderStatus::Active);
}

#[test]
fn map_consistency_unknown_is_none() {
    assert_eq!(map_consistency(Some("VOLATILE")), Some(Consistency::Volatile));
    assert_eq!(map_consistency(Some("improving")), Some(Consistency::Improving));
    assert_eq!(map_consistency(Some("STEADY")), None);
    assert_eq!(map_consistency(None), None);
}

#[test]
fn map_intervention_status_defaults_open() {
    assert_eq!(
        map_intervention_status(Some("IN_PROGRESS")),
        InterventionStatus::InProgress
    );
    assert_eq!(
        map_intervention_status(Some("in-progress")),
        InterventionStatus::InProgress
    );
    assert_eq!(
        map_intervention_status(Some("RESOLVED")),
        InterventionStatus::Resolved
    );
    assert_eq!(map_intervention_status(None), InterventionStatus::Open);
}

// -----------------------------------------------------------------------
// follow-ups
// -----------------------------------------------------------------------

#[test]
fn followup_resolved_or_ignored_is_completed_even_when_due_later() {
    for status in ["RESOLVED", "IGNORED", "resolved"] {
        assert_eq!(
            classify_followup_status(Some(status), Some("2030-01-01"), now()),
            FollowUpStatus::Completed
        );
        assert_eq!(
            classify_followup_status(Some(status), Some("2020-01-01"), now()),
            FollowUpStatus::Completed
        );
    }
}

#[test]
fn followup_past_due_is_overdue() {
    assert_eq!(
        classify_followup_status(Some("OPEN"), Some("2025-03-15T11:59:59Z"), now()),
        FollowUpStatus::Overdue
    );
    assert_eq!(
        classify_followup_status(Some("IN_PROGRESS"), Some("2025-03-01"), now()),
        FollowUpStatus::Overdue
    );
}

#[test]
fn followup_due_now_or_later_is_open() {
    assert_eq!(
        classify_followup_status(Some("OPEN"), Some("2025-03-15T12:00:00Z"), now()),
        FollowUpStatus::Open
    );
    assert_eq!(
        classify_followup_status(Some("SNOOZED"), Some("2025-04-01"), now()),
        FollowUpStatus::Open
    );
}

#[test]
fn followup_without_usable_due_date_is_open() {
    assert_eq!(
        classify_followup_status(Some("OPEN"), None, now()),
        FollowUpStatus::Open
    );
    assert_eq!(
        classify_followup_status(None, Some("whenever"), now()),
        FollowUpStatus::Open
    );
}

#[test]
fn followup_source_defaults_to_manual() {
    assert_eq!(map_followup_source(Some("CALL")), FollowUpSource::Call);
    assert_eq!(map_followup_source(Some("alert")), FollowUpSource::Alert);
    assert_eq!(map_followup_source(Some("MANUAL")), FollowUpSource::Manual);
    assert_eq!(map_followup_source(Some("EMAIL")), FollowUpSource::Manual);
    assert_eq!(map_followup_source(None), FollowUpSource::Manual);
}

#[test]
fn synthesized_followup_id_replaces_whitespace_runs() {
    assert_eq!(
        synthesize_followup_id("U1", "2025-03-20", "Call  back\tabout volume"),
        "U1-2025-03-20-Call-back-about-volume"
    );
}

// -----------------------------------------------------------------------
// growth events and campaigns
// -----------------------------------------------------------------------

#[test]
fn growth_event_type_labels() {
    assert_eq!(map_growth_event_type(Some("CITY_LAUNCH")).label(), "City Launch");
    assert_eq!(
        map_growth_event_type(Some("COUNTRY_EXPANSION")).label(),
        "Country Expansion"
    );
    assert_eq!(
        map_growth_event_type(Some("LEADERSHIP_PROMOTION")).label(),
        "Leadership Promotion"
    );
    assert_eq!(
        map_growth_event_type(Some("FLASH_SALE")).label(),
        "Special Growth Campaign"
    );
    assert_eq!(map_growth_event_type(None).label(), "Special Growth Campaign");
}

#[test]
fn growth_event_status_labels() {
    assert_eq!(map_growth_event_status(Some("PLANNED")).label(), "Planned");
    assert_eq!(map_growth_event_status(Some("IN_PROGRESS")).label(), "In Progress");
    assert_eq!(map_growth_event_status(Some("COMPLETED")).label(), "Completed");
    assert_eq!(map_growth_event_status(Some("CANCELLED")).label(), "On Hold");
}

#[test]
fn campaign_status_labels() {
    assert_eq!(map_campaign_status(Some("ACTIVE")).label(), "Active");
    assert_eq!(map_campaign_status(Some("DRAFT")).label(), "Draft");
    assert_eq!(map_campaign_status(Some("COMPLETED")).label(), "Completed");
    assert_eq!(map_campaign_status(Some("PAUSED")).label(), "Paused");
    assert_eq!(map_campaign_status(Some("ARCHIVED")).label(), "Paused");
}

// -----------------------------------------------------------------------
// calls
// -----------------------------------------------------------------------

#[test]
fn only_explicit_present_counts_as_attended() {
    assert!(is_present(Some("PRESENT")));
    assert!(is_present(Some("present")));
    assert!(!is_present(Some("ABSENT")));
    assert!(!is_present(Some("LATE")));
    assert!(!is_present(None));
}

#[test]
fn participation_score_is_clamped() {
    assert_eq!(clamp_participation(Some(2.0)), 2);
    assert_eq!(clamp_participation(Some(7.0)), 3);
    assert_eq!(clamp_participation(Some(-1.0)), 0);
    assert_eq!(clamp_participation(Some(f64::NAN)), 0);
    assert_eq!(clamp_participation(None), 0);
}

#[test]
fn action_item_status_defaults_pending() {
    assert_eq!(
        map_action_item_status(Some("COMPLETED")),
        ActionItemStatus::Completed
    );
    assert_eq!(map_action_item_status(Some("OPEN")), ActionItemStatus::Pending);
    assert_eq!(map_action_item_status(None), ActionItemStatus::Pending);
}

// -----------------------------------------------------------------------
// legs
// -----------------------------------------------------------------------

fn leg(id: &str, volume: f64) -> LegSummary {
    LegSummary {
        id: id.to_owned(),
        name: id.to_owned(),
        volume,
    }
}

#[test]
fn partition_legs_splits_at_threshold_and_sorts_descending() {
    let strength = partition_legs(
        1000.0,
        vec![leg("a", 500.0), leg("b", 1000.0), leg("c", 4000.0), leg("d", 900.0)],
    );
    let strong: Vec<&str> = strength.strong_legs.iter().map(|l| l.id.as_str()).collect();
    let weak: Vec<&str> = strength.weak_legs.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(strong, ["c", "b"]);
    assert_eq!(weak, ["d", "a"]);
    assert!((strength.threshold - 1000.0).abs() < f64::EPSILON);
}

#[test]
fn normalize_count_rounds_and_clamps() {
    assert_eq!(normalize_count(Some(12.4)), 12);
    assert_eq!(normalize_count(Some(-3.0)), 0);
    assert_eq!(normalize_count(Some(f64::INFINITY)), 0);
    assert_eq!(normalize_count(None), 0);
}
