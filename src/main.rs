mod config;
mod error;
mod journal_entry;
mod journal_state;
mod logging;
mod mood;
mod sentiment;
mod ui;

use crate::error::JournalError;
use crate::journal_entry::JournalEntry;
use crate::journal_state::JournalStore;
use crate::sentiment::{LexiconScorer, SentimentScorer};
use crate::ui::{Action, UI};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "mood-journal", version, about = "Journal your day and get a mood check-in")]
struct Args {
    /// Journal CSV file to use instead of the configured one
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse and save one entry without opening the UI
    Add { text: String },
    /// Print every saved entry
    List {
        #[arg(long)]
        json: bool,
    },
}

/// Trims and validates raw input, scores it, and appends it to the store.
///
/// Blank input is rejected here and never reaches the store.
fn submit(
    store: &mut JournalStore,
    scorer: &impl SentimentScorer,
    raw: &str,
) -> Result<JournalEntry, JournalError> {
    let text = raw.trim();
    if text.is_empty() {
        debug!("rejected empty submission");
        return Err(JournalError::EmptyInput);
    }
    let score = scorer.score_text(text);
    let entry = store.append(text, score)?;
    info!(score, mood = %entry.mood, "saved entry");
    Ok(entry)
}

fn describe(e: &JournalError) -> String {
    match std::error::Error::source(e) {
        Some(source) => format!("{e}: {source}"),
        None => e.to_string(),
    }
}

fn run_ui(store: &mut JournalStore, scorer: &impl SentimentScorer) -> Result<()> {
    let mut ui = UI::new()?;

    loop {
        ui.display(store)?;

        if let Some(action) = ui.handle_input(store)? {
            match action {
                Action::Write => {
                    let Some(text) = ui.get_new_entry()? else {
                        continue;
                    };
                    match submit(store, scorer, &text) {
                        Ok(entry) => ui.show_result(&entry)?,
                        Err(JournalError::EmptyInput) => ui.show_warning(
                            "Empty Entry",
                            "Please write something about your day.",
                        )?,
                        Err(e) => {
                            error!(error = %describe(&e), "could not save entry");
                            ui.show_warning("Entry Not Saved", &describe(&e))?;
                        }
                    }
                }
                Action::View => {
                    ui.view_entries(store)?;
                }
                Action::Search => {
                    if let Some(query) = ui.get_search_query()? {
                        let results = store.search_entries(&query);
                        ui.display_search_results(&query, &results)?;
                    }
                }
                Action::Help => ui.show_instructions()?,
                Action::Quit => break,
            }
        }
    }

    Ok(())
}

fn print_entries(store: &JournalStore, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.get_entries())?);
        return Ok(());
    }
    for entry in store.get_entries() {
        println!(
            "[{}] {} | {}",
            entry.formatted_timestamp(),
            entry.mood,
            ui::preview(&entry.text, 60)
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut config = config::load_or_default();
    if let Some(path) = args.journal {
        config.journal_path = path;
    }
    if let Err(e) = logging::init(&config.log_dir, &config.log_level) {
        eprintln!("Logging disabled: {e}");
    }

    let mut store = JournalStore::open(&config.journal_path)
        .wrap_err_with(|| format!("Failed to load journal {}", config.journal_path.display()))?;
    let scorer = config
        .extra_words
        .iter()
        .fold(LexiconScorer::default(), |scorer, (word, valence)| {
            scorer.with_word(word, *valence)
        });

    match args.command {
        Some(Command::Add { text }) => {
            let entry = submit(&mut store, &scorer, &text)?;
            println!("Mood: {}", entry.mood);
            println!("Suggestion: {}", entry.suggestion);
        }
        Some(Command::List { json }) => print_entries(&store, json)?,
        None => run_ui(&mut store, &scorer)?,
    }

    Ok(())
}
