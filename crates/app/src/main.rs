mod input;
mod render;

use std::fmt;
use std::io::Write as _;
use std::sync::Arc;

use services::{AppServices, AppSettingsService, QuizConfig, QuizController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use ui::{AppContext, UiApp, build_app_context};

use crate::input::{Command, HELP};
use crate::render::{Palette, render};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct TerminalApp {
    services: AppServices,
}

impl UiApp for TerminalApp {
    fn quiz(&self) -> QuizController {
        self.services.quiz()
    }

    fn app_settings(&self) -> Arc<AppSettingsService> {
        self.services.app_settings()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    questions_url: Option<String>,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--questions-url <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://quiz.sqlite3");
    eprintln!("  --questions-url {}", services::DEFAULT_QUESTIONS_URL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_QUESTIONS_URL, QUIZ_TIME_BUDGET_SECS, QUIZ_REVEAL_DELAY_MS");
    eprintln!("  RUST_LOG (log filter, logs go to stderr)");
    eprintln!();
    eprintln!("Commands while running:");
    eprintln!("{HELP}");
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_db_url: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            db_url: env_db_url
                .filter(|value| !value.trim().is_empty())
                .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url),
            questions_url: None,
            help: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--questions-url" => {
                    parsed.questions_url = Some(require_value(args, "--questions-url")?);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path = std::path::Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn draw(context: &AppContext) {
    let frame = render(&context.screen(), Palette::for_theme(context.dark_theme()));
    let mut stdout = std::io::stdout().lock();
    // A closed stdout only loses this frame.
    let _ = stdout.write_all(frame.as_bytes());
    let _ = stdout.flush();
}

fn spawn_restart(quiz: &QuizController) {
    let quiz = quiz.clone();
    tokio::spawn(async move {
        quiz.restart().await;
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Redraw,
    Keep,
    Quit,
}

async fn handle(context: &AppContext, command: Command) -> Flow {
    let quiz = context.quiz();
    match command {
        Command::Answer(index) => {
            quiz.select_option(index);
        }
        Command::Skip => {
            quiz.skip_question();
        }
        Command::Previous => {
            quiz.go_to_previous_question();
        }
        Command::Next => {
            quiz.go_to_next_question();
        }
        Command::Finish => {
            quiz.finish_test();
        }
        Command::Restart => spawn_restart(quiz),
        Command::ToggleTheme => {
            if let Err(err) = context.app_settings().toggle_dark_theme().await {
                tracing::error!(error = %err, "failed to save theme preference");
            }
        }
        Command::Help => {
            println!("{HELP}");
            return Flow::Keep;
        }
        Command::Quit => return Flow::Quit,
    }
    Flow::Redraw
}

async fn event_loop(context: AppContext) -> std::io::Result<()> {
    let quiz = context.quiz().clone();
    let mut state_rx = quiz.subscribe_state();
    let mut time_rx = quiz.subscribe_time_left();
    let mut theme_rx = context.app_settings().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let loader = quiz.clone();
    tokio::spawn(async move {
        loader.start().await;
    });

    draw(&context);
    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = time_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = theme_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let Some(command) = Command::parse(&line) else {
                    tracing::debug!(input = %line.trim(), "ignored unknown command");
                    continue;
                };
                match handle(&context, command).await {
                    Flow::Redraw => {}
                    Flow::Keep => continue,
                    Flow::Quit => break,
                }
            }
        }
        draw(&context);
    }

    quiz.finish_test();
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv, std::env::var("QUIZ_DB_URL").ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let mut config = QuizConfig::from_env()?;
    if let Some(raw) = args.questions_url.as_deref() {
        config = config.with_questions_url(raw)?;
    }

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url, &config).await?;
    tracing::info!(db = %args.db_url, questions = %config.questions_url, "starting quiz");

    let app: Arc<dyn UiApp> = Arc::new(TerminalApp { services });
    event_loop(build_app_context(&app)).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
