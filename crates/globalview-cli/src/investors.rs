//! Interactive investor search: one query per stdin line, debounced so only
//! the settled term reaches the API.

use std::sync::Arc;

use globalview_client::{ClientError, GlobalviewClient, ListQuery, SearchDebouncer};
use globalview_core::views::{Investor, Page};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::output::{self, OutputFormat};

pub(crate) async fn run_interactive(
    client: GlobalviewClient,
    debounce_ms: u64,
    limit: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let client = Arc::new(client);
    let debouncer = SearchDebouncer::from_millis(debounce_ms);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut searches = JoinSet::new();

    eprintln!("type a search term per line; ctrl-d to quit");
    while let Some(line) = lines.next_line().await? {
        let client = Arc::clone(&client);
        let debouncer = debouncer.clone();
        searches.spawn(async move {
            debouncer
                .run(line, |term| async move {
                    let query = ListQuery::default().with_page(1, limit).with_search(term);
                    client.get_investors(&query).await
                })
                .await
        });

        while let Some(done) = searches.try_join_next() {
            print_settled(done?, format)?;
        }
    }

    while let Some(done) = searches.join_next().await {
        print_settled(done?, format)?;
    }
    Ok(())
}

fn print_settled(
    settled: Option<Result<Page<Investor>, ClientError>>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match settled {
        Some(Ok(page)) => output::emit(format, &page, output::investors_table),
        Some(Err(error)) => {
            tracing::warn!(error = %error, "investor search failed");
            Ok(())
        }
        None => Ok(()),
    }
}
