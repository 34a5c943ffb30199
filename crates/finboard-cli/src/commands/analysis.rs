use anyhow::{Context, Result, bail};
use colored::Colorize;
use finboard_application::{FinboardServices, Submission};
use finboard_core::FinboardError;
use finboard_core::analysis::AnalysisForm;

use crate::render;

pub async fn analyze(app: &FinboardServices, symbol: &str, from: &str, to: &str) -> Result<()> {
    let form = AnalysisForm::new(symbol, from, to);

    match app.analysis.submit(&form).await {
        Ok(Submission::Created(record)) => {
            println!(
                "{} {} ({})",
                "Created analysis".green(),
                record.id.to_string().bold(),
                record.activo
            );
            println!();
            println!("{}", render::record_detail(&record));
            Ok(())
        }
        Ok(Submission::Rejected(errors)) => {
            Err(FinboardError::from(errors)).context("Invalid input, nothing was sent")
        }
        Ok(Submission::InFlight) => bail!("An analysis request is already pending"),
        Err(e) => bail!("Analysis failed: {}", e.user_message()),
    }
}

pub async fn list(app: &FinboardServices) {
    let records = app.records.list().await;
    if records.is_empty() {
        println!("{}", "No cached analyses".bright_black());
        return;
    }
    let selected = app.selection.selected_id().await;
    println!("{}", render::record_rows(&records, selected));
}

pub async fn show(app: &FinboardServices, id: Option<i64>) -> Result<()> {
    let record = match id {
        Some(id) => Some(
            app.selection
                .select(id)
                .await
                .with_context(|| format!("No cached analysis with id {}", id))?,
        ),
        None => app.selection.selected().await,
    };

    match record {
        Some(record) => println!("{}", render::record_detail(&record)),
        None => println!("{}", "No data available".bright_black()),
    }
    Ok(())
}

pub async fn remote(app: &FinboardServices) -> Result<()> {
    let records = match app.analysis.fetch_remote().await {
        Ok(records) => records,
        Err(e) => bail!("Could not fetch analyses: {}", e.user_message()),
    };
    if records.is_empty() {
        println!("{}", "No analyses on the server".bright_black());
        return Ok(());
    }
    println!("{}", render::record_rows(&records, None));
    Ok(())
}
