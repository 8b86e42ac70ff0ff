//! Printing view models as JSON or plain-text tables.

use clap::ValueEnum;
use globalview_core::format::{format_currency, format_date, format_percent};
use globalview_core::views::{
    BiLeaderScorecard, CampaignListItem, FollowUp, FollowUpStatus, Investor, Page, Pagination,
    TopLeader, WeeklyBoard,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Table,
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints `value` as JSON, or through `table` when a table was requested.
pub(crate) fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    table: fn(&T),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => {
            table(value);
            Ok(())
        }
    }
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn print_pagination(pagination: &Pagination) {
    println!(
        "page {} of {} ({} total)",
        pagination.current_page, pagination.total_pages, pagination.total_count
    );
}

pub(crate) fn top_leaders_table(leaders: &[TopLeader]) {
    if leaders.is_empty() {
        println!("no leaders for this period");
        return;
    }
    println!(
        "{:<10}{:<24}{:<16}{:<18}{:>16}{:>10}",
        "ID", "NAME", "COUNTRY", "CITY", "VOLUME", "GROWTH"
    );
    for leader in leaders {
        println!(
            "{:<10}{:<24}{:<16}{:<18}{:>16}{:>10}",
            truncate(&leader.id, 8),
            truncate(&leader.name, 22),
            truncate(&leader.country, 14),
            truncate(&leader.city, 16),
            format_currency(leader.business_volume),
            format_percent(leader.growth_percent),
        );
    }
}

pub(crate) fn scorecards_table(page: &Page<BiLeaderScorecard>) {
    println!(
        "{:<24}{:<20}{:<28}{:>16}{:>10}{:>10}",
        "NAME", "ROLE", "MARKET", "VOLUME", "GROWTH", "CONTACT"
    );
    for card in &page.items {
        let contact = card
            .days_since_last_contact
            .map_or_else(|| "never".to_string(), |d| format!("{d}d"));
        println!(
            "{:<24}{:<20}{:<28}{:>16}{:>10}{:>10}",
            truncate(&card.name, 22),
            truncate(&card.role, 18),
            truncate(&card.market, 26),
            format_currency(card.business_volume),
            format_percent(card.growth_percent),
            contact,
        );
    }
    print_pagination(&page.pagination);
}

pub(crate) fn followups_table(followups: &[FollowUp]) {
    if followups.is_empty() {
        println!("no follow-ups");
        return;
    }
    println!("{:<10}{:<15}{:<24}TITLE", "STATUS", "DUE", "LEADER");
    for followup in followups {
        let status = match followup.status {
            FollowUpStatus::Open => "open",
            FollowUpStatus::Overdue => "OVERDUE",
            FollowUpStatus::Completed => "done",
        };
        println!(
            "{:<10}{:<15}{:<24}{}",
            status,
            format_date(followup.due_date.as_deref()),
            truncate(&followup.leader_name, 22),
            truncate(&followup.title, 50),
        );
    }
}

pub(crate) fn board_table(board: &WeeklyBoard) {
    println!("week of {}", format_date(Some(board.week_start.as_str())));
    println!("{:<24}{:<20}{:<16}NOTES", "LEADER", "ROLE", "STATUS");
    for leader in &board.leaders {
        println!(
            "{:<24}{:<20}{:<16}{}",
            truncate(&leader.name, 22),
            truncate(&leader.role, 18),
            leader.status.as_str(),
            leader.notes.as_deref().unwrap_or("\u{2014}"),
        );
    }
}

pub(crate) fn campaigns_table(campaigns: &[CampaignListItem]) {
    if campaigns.is_empty() {
        println!("no campaigns");
        return;
    }
    println!(
        "{:<28}{:<11}{:<26}{:<10}{:>14}",
        "NAME", "STATUS", "MARKET", "DURATION", "BUDGET"
    );
    for campaign in campaigns {
        println!(
            "{:<28}{:<11}{:<26}{:<10}{:>14}",
            truncate(&campaign.name, 26),
            campaign.status.label(),
            truncate(&campaign.market, 24),
            campaign.duration,
            format_currency(campaign.budget),
        );
    }
}

pub(crate) fn investors_table(page: &Page<Investor>) {
    println!(
        "{:<24}{:<26}{:>16}{:>16}{:>8}",
        "NAME", "MARKET", "INVESTED", "CAP LEFT", "ACTIVE"
    );
    for investor in &page.items {
        println!(
            "{:<24}{:<26}{:>16}{:>16}{:>8}",
            truncate(&investor.name, 22),
            truncate(&investor.market, 24),
            format_currency(investor.total_invested),
            format_currency(investor.cap_remaining),
            if investor.package_active { "yes" } else { "no" },
        );
    }
    print_pagination(&page.pagination);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Recife", 10), "Recife");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("São Paulo Centro", 9), "São Paulo...");
    }
}
