use anyhow::{Result, bail};
use colored::Colorize;
use finboard_application::FinboardServices;
use finboard_core::search::SearchState;

use crate::render;

pub async fn run(app: &FinboardServices, query: &str) -> Result<()> {
    app.search.search(query);

    match app.search.settled().await {
        SearchState::Ready { results, .. } if results.is_empty() => {
            println!("{}", "No matching assets".bright_black());
        }
        SearchState::Ready { results, .. } => println!("{}", render::search_results(&results)),
        SearchState::Failed { message, .. } => bail!("Search failed: {}", message),
        _ => println!("{}", "Nothing to search for".bright_black()),
    }
    Ok(())
}
