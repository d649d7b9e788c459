//! Turnout interactive terminal
//!
//! Loads the remote document, then reads commands from stdin until `quit`
//! or end of input.

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use turnout::config::Config;
use turnout::logging;
use turnout::record::{Field, RecordDraft};
use turnout::session::Session;
use turnout::view::{Page, TextRenderer, View};

#[derive(Parser)]
#[command(name = "turnout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Log and review turnout gear cleanings")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Remote document URL, overriding the config
    #[arg(long, conflicts_with = "offline")]
    remote_url: Option<String>,

    /// Work against an in-process document instead of the remote
    #[arg(long)]
    offline: bool,
}

const HELP: &str = "\
Commands:
  search [term]   Search by name or serial number
  add             Log a cleaning
  logs            Show every record
  chart           Cleanings per firefighter
  sync            Reload everything from the cloud
  help            Show this help
  quit            Exit
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Add,
    Logs,
    Chart,
    Sync,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" => Command::Empty,
        "search" | "home" => Command::Search(rest.to_string()),
        "add" => Command::Add,
        "logs" => Command::Logs,
        "chart" => Command::Chart,
        "sync" => Command::Sync,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", text)?;
    stdout.flush()
}

/// Ask for each form field in turn; `None` on end of input
async fn read_draft<R>(lines: &mut Lines<R>) -> std::io::Result<Option<RecordDraft>>
where
    R: AsyncBufRead + Unpin,
{
    let mut draft = RecordDraft::default();
    for field in Field::all() {
        prompt(&format!("  {}: ", field.label()))?;
        match lines.next_line().await? {
            Some(value) => draft.set(*field, value),
            None => return Ok(None),
        }
    }

    prompt("  Advanced Inspection Completed? [y/N]: ")?;
    let Some(answer) = lines.next_line().await? else {
        return Ok(None);
    };
    draft.inspection = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");

    Ok(Some(draft))
}

async fn show(renderer: &TextRenderer, session: &Session, view: &View) {
    println!();
    print!("{}", renderer.render(view));
    print!("{}", renderer.notifications(&session.notifications().active().await));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(url) = args.remote_url {
        config.remote.url = Some(url);
    }
    if args.offline {
        config.remote.url = None;
    }

    logging::init(&config.logging);
    tracing::info!("Turnout v{}", env!("CARGO_PKG_VERSION"));

    let session = Session::from_config(&config)?;
    let renderer = TextRenderer::default();

    let view = session.start().await;
    show(&renderer, &session, &view).await;
    print!("\n{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("\nturnout> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let view = match parse_command(&line) {
            Command::Quit => break,
            Command::Empty => continue,
            Command::Help => {
                print!("{}", HELP);
                continue;
            }
            Command::Unknown(word) => {
                println!("Unknown command: {} (try `help`)", word);
                continue;
            }
            Command::Search(term) => session.set_search(term).await,
            Command::Logs => session.navigate(Page::Logs).await,
            Command::Chart => session.navigate(Page::Chart).await,
            Command::Sync => {
                // Failures are already posted as notifications
                let _ = session.sync_now().await;
                session.current_view().await
            }
            Command::Add => {
                session.navigate(Page::Add).await;
                let Some(draft) = read_draft(&mut lines).await? else {
                    break;
                };

                match session.update_draft(draft.clone()).await {
                    View::Add(form) if !form.can_submit => View::Add(form),
                    _ => {
                        // Form is complete, so submit cannot be rejected
                        let _ = session.submit(draft).await;
                        session.current_view().await
                    }
                }
            }
        };

        show(&renderer, &session, &view).await;
    }

    tracing::info!("Turnout shutting down");
    Ok(())
}
