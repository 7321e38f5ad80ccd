//! mos - list Marketing OS pages from the terminal.
//!
//! Loads the page's seed collection through a simulated source, applies the
//! search, filters and sort given on the command line, and prints one page
//! of rows as a table or JSON.

mod args;
mod render;

use std::error::Error;

use clap::Parser;
use mos_core::RecordList;
use mos_pages::{
    ApiToken, AuditEntry, Draft, Entity, ErrorEntry, ExecutionEntry, Guardrail, Page, PageRecord,
    Signal,
};
use mos_source::{ListController, MosConfig, SimulatedSource};
use tracing_subscriber::EnvFilter;

use args::{filter_value, Cli};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => MosConfig::load(path)?,
        None => MosConfig::load_standard()?,
    };

    // Setup logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.page {
        Page::Drafts => run::<Draft>(&cli, &config).await,
        Page::Signals => run::<Signal>(&cli, &config).await,
        Page::Executions => run::<ExecutionEntry>(&cli, &config).await,
        Page::Tokens => run::<ApiToken>(&cli, &config).await,
        Page::Audit => run::<AuditEntry>(&cli, &config).await,
        Page::Errors => run::<ErrorEntry>(&cli, &config).await,
        Page::Entities => run::<Entity>(&cli, &config).await,
        Page::Guardrails => run::<Guardrail>(&cli, &config).await,
    }
}

async fn run<R>(cli: &Cli, config: &MosConfig) -> Result<(), Box<dyn Error>>
where
    R: PageRecord,
    R::Status: Send + Sync,
{
    let list = RecordList::new(R::schema(), Vec::new())?.with_sort_reset(config.list.sort_reset);
    let source = SimulatedSource::from_config(R::seed(), &config.source);
    let (mut controller, _guard) = ListController::mount(list, source);
    controller.load().await?;

    let list = controller.list_mut();
    if let Some(text) = &cli.search {
        list.set_search_text(text.as_str());
    }
    for (key, raw) in &cli.filters {
        let kind = list.schema().filterable(key)?.kind;
        list.set_filter(key, filter_value(kind, raw))?;
    }
    if let Some((key, direction)) = &cli.sort {
        list.set_sort(key, direction.unwrap_or(config.list.sort_reset))?;
    }
    if cli.unsorted {
        list.clear_sort();
    }

    if let Some(label) = &cli.bulk {
        let status = R::parse_status(label)
            .ok_or_else(|| format!("'{}' is not a status on {}", label, R::PAGE.slug()))?;
        controller.list_mut().select_all();
        let outcome = controller.apply_bulk_action(status).await;
        tracing::info!(
            applied = outcome.applied.len(),
            failed = outcome.failed.len(),
            "Bulk action applied"
        );
        for (id, err) in &outcome.failed {
            eprintln!("{}: {}", id, err);
        }
    }

    let list = controller.list();
    let page_size = config.list.page_size;
    let offset = render::page_offset(cli.page_number, page_size);
    let rows = list.visible_page(offset, page_size);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", R::PAGE.title());
    println!("{}", render::table::<R>(&rows));
    println!(
        "{}",
        render::range_line(offset, rows.len(), list.visible().len())
    );
    if let Some(line) = render::status_line(&list.status_counts()) {
        println!("{}", line);
    }
    Ok(())
}
