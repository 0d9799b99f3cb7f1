use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use popcorn_core::DetailPanel;
use popcorn_models::{MovieDetails, SearchResult, WatchedEntry, WatchedSummary};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

pub fn result_count(results: &[SearchResult]) -> String {
    format!("Found {} results", results.len().to_string().bold())
}

pub fn results_table(results: &[SearchResult]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("#"), header("Title"), header("Year"), header("IMDb ID")]);
    for (idx, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&result.title),
            Cell::new(&result.year),
            Cell::new(&result.imdb_id).fg(Color::DarkGrey),
        ]);
    }
    table
}

pub fn details_table(details: &MovieDetails) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(&details.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(&details.year),
    ]);

    let provider_rating = details
        .provider_rating
        .map(|r| format!("⭐ {} IMDb rating", r))
        .unwrap_or_else(|| "⭐ N/A".to_string());

    let rows = [
        ("Released", format!("{} • {}", or_unknown(&details.released), or_unknown(&details.runtime))),
        ("Genre", or_unknown(&details.genre).to_string()),
        ("Rating", provider_rating),
        ("Plot", or_unknown(&details.plot).to_string()),
        ("Starring", or_unknown(&details.actors).to_string()),
        ("Directed by", or_unknown(&details.director).to_string()),
        ("Poster", details.poster_url.clone().unwrap_or_else(|| "N/A".to_string())),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

/// Details plus the current state of the rating widget
pub fn detail_panel(panel: &DetailPanel) -> String {
    let mut out = details_table(panel.details()).to_string();
    out.push('\n');
    out.push_str(&format!("Your rating: {}", panel.rating().render()));
    if panel.can_add() {
        out.push_str(&format!("  {}", "(ready to add to your watched list)".bright_black()));
    }
    out
}

pub fn watched_summary(summary: &WatchedSummary) -> Table {
    let mut table = styled_table();
    table.set_header(vec![Cell::new("Movies you watched")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);
    table.add_row(vec![
        Cell::new(format!("#️⃣ {} movies", summary.count)),
        Cell::new(format!("⭐ {:.2}", summary.avg_provider_rating)),
        Cell::new(format!("🌟 {:.2}", summary.avg_user_rating)),
        Cell::new(format!("⏳ {:.0} min", summary.avg_runtime_minutes)),
    ]);
    table
}

pub fn watched_table(entries: &[WatchedEntry]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header("Title"),
        header("⭐ IMDb"),
        header("🌟 Yours"),
        header("⏳ Runtime"),
    ]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(
                entry
                    .provider_rating
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            Cell::new(entry.user_rating),
            Cell::new(
                entry
                    .runtime_minutes
                    .map(|m| format!("{} min", m))
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
        ]);
    }
    table
}
