use color_eyre::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use movie_shelf_models::{MovieDetail, MovieSummary};
use movie_shelf_core::{DetailState, KeyEvent, SearchState, Session};
use movie_shelf_sources::OmdbClient;
use owo_colors::OwoColorize;
use std::time::Duration;
use tracing::debug;

use crate::commands::prompts;
use crate::output::{Output, OutputFormat};

/// Rating scale of the shelf, matching the catalog's 10-point critic scale.
const MAX_RATING: f32 = 10.0;

pub async fn run(output: &Output) -> Result<()> {
    let mut session = super::open_session()?;

    output.info("Type a query of three or more characters to search the catalog.");
    output.info("An empty input clears the search; type 'q' to leave.");

    loop {
        render_shelf_summary(&session, output);

        session.set_search_focus(true);
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Search movies")
            .allow_empty(true)
            .interact_text()?;
        session.set_search_focus(false);

        let input = input.trim().to_string();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            // Enter with the search box unfocused clears the query.
            session.handle_key(KeyEvent::Enter);
            continue;
        }

        debug!("Query changed to {:?}", input);
        session.set_query(input);
        let spinner = fetch_spinner(output, "Searching...");
        session.search_settled().await;
        spinner.finish_and_clear();

        match session.search_state() {
            SearchState::Idle => {
                output.info("Keep typing - queries under three characters are ignored.");
            }
            SearchState::Loading => {}
            SearchState::Failed(err) => output.error(err.to_string()),
            SearchState::Loaded(results) => {
                output.success(format!("Found {} results", results.len()));
                browse_results(&mut session, &results, output).await?;
            }
        }
    }

    Ok(())
}

fn render_shelf_summary(session: &Session<OmdbClient>, output: &Output) {
    let stats = session.stats();
    if stats.count == 0 {
        return;
    }
    output.println(format!(
        "Shelf: {} movies · critic {:.2} · yours {:.2} · {:.0} min avg",
        stats.count, stats.avg_critic_rating, stats.avg_user_rating, stats.avg_runtime
    ));
}

async fn browse_results(
    session: &mut Session<OmdbClient>,
    results: &[MovieSummary],
    output: &Output,
) -> Result<()> {
    loop {
        let mut items: Vec<String> = results
            .iter()
            .map(|movie| format!("{} ({})", movie.title, movie.year))
            .collect();
        items.push("New search".to_string());

        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Pick a movie")
            .items(&items)
            .default(0)
            .interact()?;

        if picked == results.len() {
            return Ok(());
        }

        show_detail(session, &results[picked].imdb_id, output).await?;
    }
}

async fn show_detail(
    session: &mut Session<OmdbClient>,
    imdb_id: &str,
    output: &Output,
) -> Result<()> {
    session.select(imdb_id);
    let spinner = fetch_spinner(output, "Loading details...");
    session.detail_settled().await;
    spinner.finish_and_clear();

    match session.detail_state() {
        DetailState::Loaded(detail) => render_detail(&detail, output),
        DetailState::Failed(err) => {
            output.error(err.to_string());
            session.close_detail();
            return Ok(());
        }
        _ => {}
    }

    if session.selected_is_watched() {
        if let Some(rating) = session.watched_rating(imdb_id) {
            output.info(format!("You rated this movie {}.", rating));
        }
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Action")
            .items(&["Back"])
            .default(0)
            .interact()?;
        session.handle_key(KeyEvent::Escape);
        return Ok(());
    }

    loop {
        let mut choices = vec!["Rate"];
        if session.pending_rating() > 0.0 {
            choices.push("Add to shelf");
        }
        choices.push("Back");

        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Action")
            .items(&choices)
            .default(0)
            .interact()?;

        match choices[picked] {
            "Rate" => {
                let rating = prompts::prompt_rating("Your rating (1-10)", MAX_RATING)?;
                session.rate(rating);
            }
            "Add to shelf" => {
                if session.confirm_add() {
                    output.success("Added to your watched shelf");
                } else {
                    output.warn("Nothing was added");
                }
                return Ok(());
            }
            _ => {
                session.handle_key(KeyEvent::Escape);
                return Ok(());
            }
        }
    }
}

fn render_detail(detail: &MovieDetail, output: &Output) {
    output.println(format!("\n{} ({})", detail.title.bold(), detail.year));
    output.println(format!(
        "{} · {} min · ⭐ {} IMDb",
        detail.released, detail.runtime_minutes, detail.critic_rating
    ));
    output.println(&detail.genre);
    output.println(format!("{}", detail.plot.italic()));
    output.println(format!("Starring {}", detail.actors));
    output.println(format!("Directed by {}", detail.director));
}

fn fetch_spinner(output: &Output, msg: &str) -> ProgressBar {
    if output.is_quiet() || output.format() != OutputFormat::Human {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(msg.to_string());
    spinner
}
