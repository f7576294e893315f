//! quizzy: timed quiz and memory-match game in the terminal.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use quiz_core::model::{Category, CategoryFilter, Difficulty, DifficultyFilter, QuizFilter, Theme};
use quiz_core::quiz::{DEFAULT_QUESTION_COUNT, DEFAULT_TIME_LIMIT_SECS};
use services::{
    AppServices, CatalogSource, Clock, Mode, NotificationSink, RecordingSink, TracingSink,
};

mod config;
mod terminal;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "quizzy", version, about = "Timed quiz and memory-match game")]
struct Cli {
    /// SQLite URL or file path for stored preferences
    #[arg(long, global = true, env = "QUIZZY_DB_URL")]
    db: Option<String>,

    /// JSON question catalog to use instead of the built-in one
    #[arg(long, global = true, env = "QUIZZY_CATALOG")]
    catalog: Option<PathBuf>,

    /// Language code for this run (en, es, fr, de, hi, bn, te)
    #[arg(long, global = true, env = "QUIZZY_LANGUAGE")]
    language: Option<String>,

    /// Treat the system as preferring dark mode when no theme is stored
    #[arg(long, global = true, env = "QUIZZY_PREFERS_DARK")]
    prefers_dark: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a timed quiz
    Play(PlayArgs),

    /// Play the memory game, then the quiz with the memory bonus
    Memory(PlayArgs),

    /// Show or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },

    /// Count catalog questions per category and difficulty
    Catalog {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// technical, programming, general, non-technical or all
    #[arg(long, default_value = "all")]
    category: String,

    /// easy, intermediate, hard or all
    #[arg(long, default_value = "easy")]
    difficulty: String,

    /// Number of questions
    #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
    count: usize,

    /// Seconds per question
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_SECS)]
    time_limit: u32,

    /// Seed for reproducible question and card order
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the stored theme and language
    Show,
    /// Set the theme, or toggle it when no value is given
    Theme { value: Option<String> },
    /// Set the language
    Language { code: String },
}

async fn open_services(
    config: &AppConfig,
    notifier: Arc<dyn NotificationSink>,
) -> anyhow::Result<AppServices> {
    config.prepare_database()?;
    let services = AppServices::new_sqlite(
        &config.db_url,
        Clock::system(),
        catalog_source(config),
        config.system,
        notifier,
    )
    .await?;
    Ok(services)
}

fn catalog_source(config: &AppConfig) -> CatalogSource<'_> {
    config
        .catalog
        .as_deref()
        .map_or(CatalogSource::Builtin, CatalogSource::File)
}

async fn play(config: &AppConfig, mode: Mode, args: PlayArgs) -> anyhow::Result<()> {
    let sink = RecordingSink::new();
    let services = open_services(config, Arc::new(sink.clone())).await?;
    let language = match config.language {
        Some(language) => language,
        None => services.preferences().load_language().await?,
    };

    let mut controller = services.controller(args.seed);
    controller.select_mode(mode);
    controller.select_category(&args.category);
    controller.select_difficulty(&args.difficulty);
    controller.select_question_count(args.count)?;
    controller.select_time_limit(args.time_limit)?;
    controller.start()?;

    let tick_interval = services.timings().tick_interval;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let outcome =
            terminal::run_session(&mut controller, &mut lines, &sink, language, tick_interval)
                .await?;
        let Some(summary) = outcome else {
            tracing::info!("player quit before the quiz finished");
            return Ok(());
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }
        print!("{}", terminal::render_result(&summary, language));

        if !terminal::ask_play_again(&mut lines, language).await? {
            return Ok(());
        }
        terminal::play_again(&mut controller)?;
    }
}

async fn prefs(config: &AppConfig, action: PrefsAction) -> anyhow::Result<()> {
    let sink = RecordingSink::new();
    let services = open_services(config, Arc::new(sink.clone())).await?;
    let preferences = services.preferences();

    match action {
        PrefsAction::Show => {
            let current = preferences.load().await?;
            println!("theme: {}", current.theme);
            println!(
                "language: {} ({})",
                current.language,
                current.language.native_name()
            );
        }
        PrefsAction::Theme { value: Some(raw) } => {
            preferences.set_theme(raw.parse::<Theme>()?).await?;
        }
        PrefsAction::Theme { value: None } => {
            preferences.toggle_theme().await?;
        }
        PrefsAction::Language { code } => {
            preferences.set_language(code.parse()?).await?;
        }
    }

    for notification in sink.drain() {
        println!("{}", notification.message);
    }
    Ok(())
}

fn catalog(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let services = AppServices::in_memory(
        Clock::system(),
        catalog_source(config),
        config.system,
        Arc::new(TracingSink),
    )?;
    let catalog = services.catalog();

    let mut rows = Vec::new();
    for category in Category::ALL {
        for difficulty in Difficulty::ALL {
            let filter = QuizFilter::new(
                CategoryFilter::Only(category),
                DifficultyFilter::Only(difficulty),
            );
            rows.push((category, difficulty, catalog.count_matching(&filter)));
        }
    }

    if json {
        let counts: Vec<_> = rows
            .iter()
            .map(|(category, difficulty, count)| {
                serde_json::json!({
                    "category": category.as_str(),
                    "difficulty": difficulty.as_str(),
                    "count": count,
                })
            })
            .collect();
        let body = serde_json::json!({ "total": catalog.len(), "counts": counts });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{:<16}{:<14}{:>5}", "category", "difficulty", "count");
        for (category, difficulty, count) in rows {
            println!("{:<16}{:<14}{count:>5}", category.as_str(), difficulty.as_str());
        }
        println!("{:<30}{:>5}", "total", catalog.len());
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::resolve(
        cli.db.as_deref(),
        cli.catalog,
        cli.language.as_deref(),
        cli.prefers_dark,
    )?;
    tracing::debug!(db = %config.db_url, "configuration resolved");

    match cli.command {
        Commands::Play(args) => play(&config, Mode::Quiz, args).await,
        Commands::Memory(args) => play(&config, Mode::Memory, args).await,
        Commands::Prefs { action } => prefs(&config, action.unwrap_or(PrefsAction::Show)).await,
        Commands::Catalog { json } => catalog(&config, json),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        process::exit(2);
    }
}
