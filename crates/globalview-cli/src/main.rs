mod bi;
mod comms;
mod dashboard;
mod investors;
mod output;

use clap::{Args, Parser, Subcommand};
use globalview_client::{resolve_token, AuthCookies, GlobalviewClient, ListQuery};
use tracing_subscriber::EnvFilter;

use crate::bi::BiCommands;
use crate::comms::CommsCommands;
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "globalview")]
#[command(about = "GlobalView leadership dashboard command line interface")]
struct Cli {
    /// Cookie header carrying `gv_token` or `globalview_token`
    #[arg(long, env = "GLOBALVIEW_COOKIE", global = true, hide_env_values = true)]
    cookie: Option<String>,

    /// Output format for list views
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// ISO-8601 reporting range shared by most views.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct RangeArgs {
    /// Range start (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,
    /// Range end (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,
}

impl RangeArgs {
    pub(crate) fn to_query(&self) -> ListQuery {
        ListQuery::default().with_range(self.start_date.clone(), self.end_date.clone())
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Exchange credentials for a token and print the cookie to store
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "GLOBALVIEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Print the cookies that clear a stored session
    Logout,
    /// Business-intelligence views
    Bi {
        #[command(subcommand)]
        command: BiCommands,
    },
    /// Weekly leadership calls
    Calls {
        #[command(subcommand)]
        command: CallsCommands,
    },
    /// Campaign list, or one campaign's impact with `--id`
    Campaigns {
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Growth events
    Growth {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Investor directory
    Investors {
        /// Free-text filter
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "20")]
        limit: u32,
        /// Read search terms from stdin, one per line, with debounce
        #[arg(long)]
        interactive: bool,
    },
    /// Communication health, follow-ups, and the weekly board
    Comms {
        #[command(subcommand)]
        command: CommsCommands,
    },
    /// All dashboard panels; a failing panel shows its empty state
    Dashboard {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Backend cache administration
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Debug, Subcommand)]
enum CallsCommands {
    /// List calls
    List {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Attendees and action items of one call
    Summary {
        #[arg(long)]
        id: String,
    },
    /// Attendance and no-shows for the latest two calls
    Metrics {
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Debug, Subcommand)]
enum CacheCommands {
    /// Clear the backend response cache
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = globalview_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("globalview: run with --help to list commands");
        return Ok(());
    };

    let mut cookies = cli
        .cookie
        .as_deref()
        .map(AuthCookies::from_cookie_header)
        .unwrap_or_default();
    let token = resolve_token(&cookies, config.api_token.as_deref());
    let client = GlobalviewClient::new(&config, token)?;
    let format = cli.output;

    match command {
        Commands::Login { email, password } => {
            let response = client.login(&email, &password).await?;
            println!("Set-Cookie: {}", cookies.store_token(&response.token));
            print_json(&response.user)?;
        }
        Commands::Logout => {
            for header in cookies.logout() {
                println!("Set-Cookie: {header}");
            }
            tracing::info!("session cookies cleared");
        }
        Commands::Bi { command } => bi::run(&client, command, format).await?,
        Commands::Calls { command } => match command {
            CallsCommands::List { range } => {
                print_json(&client.get_calls(&range.to_query()).await?)?;
            }
            CallsCommands::Summary { id } => print_json(&client.get_call_summary(&id).await?)?,
            CallsCommands::Metrics { range } => {
                print_json(&client.get_weekly_calls_metrics(&range.to_query()).await?)?;
            }
        },
        Commands::Campaigns { id: Some(id), .. } => {
            print_json(&client.get_campaign_impact(&id).await?)?;
        }
        Commands::Campaigns { id: None, range } => {
            let campaigns = client.get_campaigns(&range.to_query()).await?;
            output::emit(format, campaigns.as_slice(), output::campaigns_table)?;
        }
        Commands::Growth { range } => {
            print_json(&client.get_growth_events(&range.to_query()).await?)?;
        }
        Commands::Investors {
            search,
            page,
            limit,
            interactive,
        } => {
            if interactive {
                investors::run_interactive(client, config.search_debounce_ms, limit, format)
                    .await?;
            } else {
                let mut query = ListQuery::default().with_page(page, limit);
                query.search = search;
                let investors = client.get_investors(&query).await?;
                output::emit(format, &investors, output::investors_table)?;
            }
        }
        Commands::Comms { command } => comms::run(&client, command, format).await?,
        Commands::Dashboard { range } => {
            let dashboard = dashboard::build_dashboard(&client, &range.to_query()).await;
            print_json(&dashboard)?;
        }
        Commands::Cache {
            command: CacheCommands::Clear,
        } => {
            client.clear_cache().await?;
            println!("cache cleared");
        }
    }

    Ok(())
}
