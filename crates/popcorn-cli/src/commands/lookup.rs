use super::build_flow;
use super::loading::with_spinner;
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use popcorn_core::{DetailView, ResultsView};
use serde_json::json;

/// One-shot search. Provider failures are reported, not returned as errors.
pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let (_config, mut flow) = build_flow()?;

    if let Some(pending) = flow.search(query) {
        let outcome = with_spinner(format!("Searching for \"{}\"...", pending.query()), pending.run()).await;
        flow.apply_search(outcome);
    }

    match flow.results() {
        ResultsView::Results(results) => {
            if output.is_human() {
                output.println(render::result_count(results));
                if !results.is_empty() {
                    output.println(render::results_table(results).to_string());
                }
            } else {
                output.json(&json!({
                    "query": flow.query(),
                    "count": results.len(),
                    "results": results,
                }));
            }
        }
        ResultsView::Error(message) => output.error(message),
        ResultsView::Loading { query } => {
            // apply_search always runs for a fresh request
            tracing::warn!(query = %query, "Search still loading after completion");
        }
    }

    Ok(())
}

/// One-shot details lookup
pub async fn run_details(imdb_id: &str, output: &Output) -> Result<()> {
    let imdb_id = imdb_id.trim();
    if imdb_id.is_empty() {
        output.error("No IMDb id given");
        return Ok(());
    }

    let (_config, mut flow) = build_flow()?;

    if let Some(pending) = flow.select(imdb_id) {
        let outcome = with_spinner(format!("Loading {}...", pending.imdb_id()), pending.run()).await;
        flow.apply_details(outcome);
    }

    match flow.details() {
        DetailView::Open(panel) => {
            if output.is_human() {
                output.println(render::details_table(panel.details()).to_string());
            } else {
                output.json(&json!({ "details": panel.details() }));
            }
        }
        DetailView::Error { message, .. } => output.error(message),
        DetailView::Loading { .. } | DetailView::Closed => {
            tracing::warn!(imdb_id = %imdb_id, "Details request finished without a result");
        }
    }

    Ok(())
}
