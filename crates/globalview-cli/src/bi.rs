//! Business-intelligence command handlers.

use clap::{Subcommand, ValueEnum};
use globalview_client::{GlobalviewClient, ListQuery, SortOrder, TrendPeriod, ViewMode};

use crate::output::{self, print_json, OutputFormat};
use crate::RangeArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PeriodArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<PeriodArg> for TrendPeriod {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Daily => TrendPeriod::Daily,
            PeriodArg::Weekly => TrendPeriod::Weekly,
            PeriodArg::Monthly => TrendPeriod::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    #[value(name = "self")]
    SelfOnly,
    Team,
}

/// Sub-commands available under `bi`.
#[derive(Debug, Subcommand)]
pub(crate) enum BiCommands {
    /// The seven headline KPIs
    Kpis {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Volume trend; all three granularities when `--period` is omitted
    Trends {
        #[arg(long, value_enum)]
        period: Option<PeriodArg>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Leaders with the highest business volume
    TopLeaders {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Leaders whose volume has stalled
    Stagnating {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Markets flagged for intervention
    Interventions {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Declining markets, most severe first
    WeakMarkets {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Leader scorecards with leg strength and contact recency
    Scorecards {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "20")]
        limit: u32,
    },
    /// Fastest-growing leaders
    HighGrowth {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Regions ranked by volume
    TopRegions {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Ranked performers
    TopPerformers {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Closing figures for one day (default: today)
    DailyClosure {
        #[arg(long)]
        date: Option<String>,
    },
    /// Leader performance grid, or one leader's detail with `--id`
    Performance {
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(long)]
        level: Option<u32>,
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort descending instead of ascending (only with `--sort-by`)
        #[arg(long)]
        desc: bool,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        role_type: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "25")]
        limit: u32,
    },
}

/// Runs one `bi` sub-command and prints its view model.
///
/// # Errors
///
/// Returns an error if the API call fails or the output cannot be encoded.
pub(crate) async fn run(
    client: &GlobalviewClient,
    command: BiCommands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        BiCommands::Kpis { range } => print_json(&client.get_kpis(&range.to_query()).await?),
        BiCommands::Trends {
            period: Some(period),
            range,
        } => print_json(
            &client
                .get_volume_trends(&range.to_query(), period.into())
                .await?,
        ),
        BiCommands::Trends {
            period: None,
            range,
        } => print_json(&client.get_volume_trend_overview(&range.to_query()).await?),
        BiCommands::TopLeaders { range, limit } => {
            let mut query = range.to_query();
            query.limit = limit;
            let leaders = client.get_top_leaders(&query).await?;
            output::emit(format, leaders.as_slice(), output::top_leaders_table)
        }
        BiCommands::Stagnating { range } => {
            print_json(&client.get_stagnating_leaders(&range.to_query()).await?)
        }
        BiCommands::Interventions { range } => print_json(
            &client
                .get_markets_needing_intervention(&range.to_query())
                .await?,
        ),
        BiCommands::WeakMarkets { range } => {
            print_json(&client.get_weak_markets(&range.to_query()).await?)
        }
        BiCommands::Scorecards {
            range,
            search,
            page,
            limit,
        } => {
            let mut query = range.to_query().with_page(page, limit);
            query.search = search;
            let cards = client.get_leader_scorecards(&query).await?;
            output::emit(format, &cards, output::scorecards_table)
        }
        BiCommands::HighGrowth { range } => {
            print_json(&client.get_high_growth_leaders(&range.to_query()).await?)
        }
        BiCommands::TopRegions { range } => {
            print_json(&client.get_top_regions(&range.to_query()).await?)
        }
        BiCommands::TopPerformers { range } => {
            print_json(&client.get_top_performers(&range.to_query()).await?)
        }
        BiCommands::DailyClosure { date } => {
            print_json(&client.get_daily_closure(date.as_deref()).await?)
        }
        BiCommands::Performance {
            id: Some(id),
            range,
            ..
        } => print_json(
            &client
                .get_leader_performance_detail(&id, &range.to_query())
                .await?,
        ),
        BiCommands::Performance {
            id: None,
            range,
            search,
            mode,
            level,
            sort_by,
            desc,
            status,
            role_type,
            page,
            limit,
        } => {
            let sort_order = sort_by
                .as_ref()
                .map(|_| if desc { SortOrder::Desc } else { SortOrder::Asc });
            let query = ListQuery {
                search,
                mode: mode.map(|m| match m {
                    ModeArg::SelfOnly => ViewMode::SelfOnly,
                    ModeArg::Team => ViewMode::Team,
                }),
                level,
                sort_by,
                sort_order,
                status,
                role_type,
                ..range.to_query().with_page(page, limit)
            };
            print_json(&client.get_leader_performance_grid(&query).await?)
        }
    }
}
