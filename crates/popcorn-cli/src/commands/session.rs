use super::build_flow;
use super::loading::{is_interactive, with_spinner};
use super::prompts::{prompt_select, prompt_string};
use super::star_prompt::prompt_star_rating;
use crate::output::Output;
use crate::render;
use color_eyre::eyre::bail;
use color_eyre::Result;
use dialoguer::console::Term;
use owo_colors::OwoColorize;
use popcorn_core::{DetailView, FlowError, ResultsView, SearchFlow};

#[derive(Debug, Clone, PartialEq)]
enum MenuItem {
    Open { imdb_id: String, label: String },
    Rate,
    AddToWatched,
    Back,
    NewSearch,
    Quit,
}

impl MenuItem {
    fn label(&self) -> String {
        match self {
            MenuItem::Open { label, .. } => label.clone(),
            MenuItem::Rate => "★ Rate this movie".to_string(),
            MenuItem::AddToWatched => "+ Add to watched list".to_string(),
            MenuItem::Back => "← Back to watched list".to_string(),
            MenuItem::NewSearch => "🔍 New search".to_string(),
            MenuItem::Quit => "Quit".to_string(),
        }
    }
}

/// Menu for the current state: results first, then actions for the open view
fn menu_items(flow: &SearchFlow) -> Vec<MenuItem> {
    let mut items = Vec::new();

    if let ResultsView::Results(results) = flow.results() {
        for result in results {
            let marker = if flow.selected_id() == Some(result.imdb_id.as_str()) {
                "▸"
            } else {
                " "
            };
            items.push(MenuItem::Open {
                imdb_id: result.imdb_id.clone(),
                label: format!("{} {} ({})", marker, result.title, result.year),
            });
        }
    }

    match flow.details() {
        DetailView::Open(panel) => {
            if flow.open_watched_rating().is_none() {
                items.push(MenuItem::Rate);
                if panel.can_add() {
                    items.push(MenuItem::AddToWatched);
                }
            }
            items.push(MenuItem::Back);
        }
        DetailView::Error { .. } | DetailView::Loading { .. } => items.push(MenuItem::Back),
        DetailView::Closed => {}
    }

    items.push(MenuItem::NewSearch);
    items.push(MenuItem::Quit);
    items
}

/// Start on the selected result, or on the first action when nothing is selected
fn default_index(items: &[MenuItem], flow: &SearchFlow) -> usize {
    if matches!(flow.details(), DetailView::Open(_)) {
        if let Some(idx) = items.iter().position(|i| matches!(i, MenuItem::Rate | MenuItem::AddToWatched)) {
            return idx;
        }
    }
    flow.selected_id()
        .and_then(|id| {
            items
                .iter()
                .position(|i| matches!(i, MenuItem::Open { imdb_id, .. } if imdb_id == id))
        })
        .unwrap_or(0)
}

fn draw(flow: &SearchFlow, output: &Output) {
    output.println(format!(
        "{} {}",
        "🍿 popcorn".bold(),
        format!("searching \"{}\" on {}", flow.query(), flow.provider_name()).bright_black()
    ));

    match flow.results() {
        ResultsView::Loading { query } => output.println(format!("Loading results for \"{}\"...", query)),
        ResultsView::Error(message) => output.println(format!("{} {}", "⛔️".red(), message)),
        ResultsView::Results(results) => output.println(render::result_count(results)),
    }
    output.println("");

    match flow.details() {
        DetailView::Closed => {
            output.println(render::watched_summary(&flow.summary()).to_string());
            if !flow.watched().is_empty() {
                output.println(render::watched_table(flow.watched().entries()).to_string());
            }
        }
        DetailView::Loading { imdb_id } => output.println(format!("Loading {}...", imdb_id)),
        DetailView::Error { message, .. } => output.println(format!("{} {}", "⛔️".red(), message)),
        DetailView::Open(panel) => match flow.open_watched_rating() {
            Some(rating) => {
                output.println(render::details_table(panel.details()).to_string());
                output.println(format!("You rated this movie {} 🌟", rating));
            }
            None => output.println(render::detail_panel(panel)),
        },
    }
    output.println("");
}

async fn run_search(flow: &mut SearchFlow, query: &str) {
    if let Some(pending) = flow.search(query) {
        let outcome = with_spinner(format!("Searching for \"{}\"...", pending.query()), pending.run()).await;
        flow.apply_search(outcome);
    }
}

async fn open_details(flow: &mut SearchFlow, imdb_id: &str) {
    if let Some(pending) = flow.select(imdb_id) {
        let outcome = with_spinner(format!("Loading {}...", pending.imdb_id()), pending.run()).await;
        flow.apply_details(outcome);
    }
}

fn rate_open_movie(flow: &mut SearchFlow, output: &Output) -> Result<()> {
    if let DetailView::Open(panel) = flow.details_mut() {
        match prompt_star_rating(panel.rating_mut())? {
            Some(value) => output.success(format!("Rated {} {}", panel.details().title, value)),
            None => output.info("Rating cancelled"),
        }
    }
    Ok(())
}

fn add_open_movie(flow: &mut SearchFlow, output: &Output) {
    match flow.add_watched() {
        Ok(entry) => output.success(format!(
            "Added {} to your watched list ({} 🌟)",
            entry.title, entry.user_rating
        )),
        Err(FlowError::Unrated) => output.warn("Rate the movie before adding it"),
        Err(e) => output.warn(e.to_string()),
    }
}

/// The session draws its screens through `Output`, so it needs human, non-quiet output
fn check_output_mode(output: &Output) -> Result<()> {
    if !output.is_human() {
        bail!("The interactive session only supports --output human");
    }
    if output.is_quiet() {
        bail!("The interactive session cannot run with --quiet");
    }
    Ok(())
}

/// Interactive search, rate and collect loop
pub async fn run_session(query: Option<String>, output: &Output) -> Result<()> {
    check_output_mode(output)?;
    if !is_interactive() {
        bail!("The interactive session needs a terminal. Use 'popcorn search' or 'popcorn details' instead");
    }

    let (config, mut flow) = build_flow()?;
    let initial_query = query.unwrap_or_else(|| config.session.initial_query.clone());
    tracing::info!(provider = %flow.provider_name(), query = %initial_query, "Starting session");

    run_search(&mut flow, &initial_query).await;

    let term = Term::stdout();
    loop {
        term.clear_screen()?;
        draw(&flow, output);

        let items = menu_items(&flow);
        let labels: Vec<String> = items.iter().map(MenuItem::label).collect();
        let choice = prompt_select("What next?", &labels, default_index(&items, &flow))?;

        match &items[choice] {
            MenuItem::Open { imdb_id, .. } => open_details(&mut flow, imdb_id).await,
            MenuItem::Rate => rate_open_movie(&mut flow, output)?,
            MenuItem::AddToWatched => add_open_movie(&mut flow, output),
            MenuItem::Back => flow.close_details(),
            MenuItem::NewSearch => {
                let next = prompt_string("Search movies", Some(flow.query()))?;
                run_search(&mut flow, &next).await;
            }
            MenuItem::Quit => break,
        }
    }

    let summary = flow.summary();
    if summary.count > 0 {
        output.println(render::watched_summary(&summary).to_string());
    }
    output.info(format!("Watched {} movies this session", summary.count));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_output_mode_requires_human_and_not_quiet() {
        assert!(check_output_mode(&Output::new(OutputFormat::Human, false)).is_ok());

        let quiet = check_output_mode(&Output::new(OutputFormat::Human, true)).unwrap_err();
        assert!(quiet.to_string().contains("--quiet"));

        let json = check_output_mode(&Output::new(OutputFormat::Json, false)).unwrap_err();
        assert!(json.to_string().contains("--output human"));
    }

    #[test]
    fn test_menu_labels_are_distinct() {
        let items = [
            MenuItem::Rate,
            MenuItem::AddToWatched,
            MenuItem::Back,
            MenuItem::NewSearch,
            MenuItem::Quit,
        ];
        let mut labels: Vec<String> = items.iter().map(MenuItem::label).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), items.len());
    }

    #[test]
    fn test_open_item_uses_its_label() {
        let item = MenuItem::Open {
            imdb_id: "tt0816692".to_string(),
            label: "  Interstellar (2014)".to_string(),
        };
        assert_eq!(item.label(), "  Interstellar (2014)");
    }
}
