//! Shopping-list binary
//!
//! Reads commands from stdin and prints the affected page after each one.
//! Logs go to stderr; set `SHOPPING_LIST_LOG` to change the filter.

use basket_core::environment::SystemClock;
use futures::StreamExt;
use shopping_list::{AppConfig, ContainerWatcher, ShoppingListEnvironment, cli, new_store};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(config.env_filter()?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let env = ShoppingListEnvironment::new(Arc::new(SystemClock));
    let store = new_store(env, &config);

    // Log every committed change
    let mut changes = ContainerWatcher::new(&store).into_stream();
    let watcher = tokio::spawn(async move {
        while let Some(change) = changes.next().await {
            tracing::info!(
                shopping_list_id = %change.shopping_list_id(),
                ?change,
                "Container changed"
            );
        }
    });

    println!("{}\n", cli::HELP);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let result = cli::run(&store, stdin, &mut stdout).await;

    store.shutdown(store.config().default_shutdown_timeout).await?;
    watcher.abort();

    result
}
