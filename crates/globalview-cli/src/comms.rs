//! Communication command handlers: contact health, follow-ups, and the
//! weekly contact board.

use clap::Subcommand;
use globalview_client::{FollowUpQuery, GlobalviewClient, OwnerFilter, WeeklyStatusUpdate};
use globalview_core::views::WeeklyStatus;

use crate::output::{self, print_json, OutputFormat};

/// Sub-commands available under `comms`.
#[derive(Debug, Subcommand)]
pub(crate) enum CommsCommands {
    /// Contact coverage over a window of days
    Health {
        #[arg(long, default_value = "7")]
        days: u32,
    },
    /// 7/14/30 day health plus overdue follow-ups
    Metrics,
    /// Follow-ups; your own unless `--all` or `--owner` is given
    Followups {
        /// Everyone's follow-ups
        #[arg(long, conflicts_with = "owner")]
        all: bool,
        /// A specific owner's GlobalView user id
        #[arg(long)]
        owner: Option<String>,
        /// Only follow-ups due before this date
        #[arg(long)]
        due_before: Option<String>,
        /// Backend status filter (e.g. OPEN)
        #[arg(long)]
        status: Option<String>,
    },
    /// Weekly contact board
    Board {
        /// Any date in the week (default: this week)
        #[arg(long)]
        date: Option<String>,
    },
    /// Weekly contact totals
    Summary {
        #[arg(long)]
        date: Option<String>,
    },
    /// Set a leader's weekly contact status
    SetStatus {
        #[arg(long)]
        leader: String,
        /// Week date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// NOT_CONTACTED, CONTACTED, NEED_FOLLOWUP or COMPLETED
        #[arg(long)]
        status: WeeklyStatus,
        #[arg(long)]
        notes: Option<String>,
    },
}

fn owner_filter(all: bool, owner: Option<String>) -> OwnerFilter {
    match (all, owner) {
        (_, Some(id)) => OwnerFilter::User(id),
        (true, None) => OwnerFilter::All,
        (false, None) => OwnerFilter::Mine,
    }
}

/// Runs one `comms` sub-command.
///
/// # Errors
///
/// Returns an error if the API call fails or the output cannot be encoded.
pub(crate) async fn run(
    client: &GlobalviewClient,
    command: CommsCommands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        CommsCommands::Health { days } => {
            print_json(&client.get_communication_health(days).await?)
        }
        CommsCommands::Metrics => print_json(&client.get_communication_metrics().await?),
        CommsCommands::Followups {
            all,
            owner,
            due_before,
            status,
        } => {
            let mut query = FollowUpQuery {
                owner: owner_filter(all, owner),
                due_before,
                ..FollowUpQuery::default()
            };
            query.list.status = status;
            let followups = client.get_followups(&query).await?;
            output::emit(format, followups.as_slice(), output::followups_table)
        }
        CommsCommands::Board { date } => {
            let board = client.get_weekly_board(date.as_deref()).await?;
            output::emit(format, &board, output::board_table)
        }
        CommsCommands::Summary { date } => {
            print_json(&client.get_weekly_summary(date.as_deref()).await?)
        }
        CommsCommands::SetStatus {
            leader,
            date,
            status,
            notes,
        } => {
            let update = WeeklyStatusUpdate {
                leader_user_id: leader,
                date,
                status,
                notes,
            };
            client.update_weekly_status(&update).await?;
            tracing::info!(leader = %update.leader_user_id, status = %update.status, "weekly status updated");
            println!("{} -> {}", update.leader_user_id, update.status);
            Ok(())
        }
    }
}
