//! Interactive customer lookup with a model-written summary and chat.

#[macro_use]
extern crate tracing;

use std::env;
use std::path::PathBuf;
use std::pin::pin;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use raiox::command::{self, Command, Input};
use raiox::core::conversation::AskOutcome;
use raiox::core::{DatasetLoader, Lookup, ModelClient, Session, WorkbookSource};
use raiox::render;
use raiox::terminal::Terminal;
use raiox_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use tokio::select;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Raio X: consulta de clientes de banda larga")]
struct Cli {
    /// Spreadsheet to load. Repeat to add fallbacks, tried in order.
    #[arg(long = "dataset", value_name = "PATH")]
    datasets: Vec<PathBuf>,

    /// Chat model name.
    #[arg(long)]
    model: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
    if api_key.trim().is_empty() {
        bail!("OPENAI_API_KEY environment variable is not set");
    }

    let source = if cli.datasets.is_empty() {
        WorkbookSource::default_locations()
    } else {
        WorkbookSource::new(cli.datasets)
    };
    let dataset = DatasetLoader::new(source)
        .load()
        .context("failed to load the customer spreadsheet")?;

    let mut config = OpenAIConfigBuilder::with_api_key(api_key);
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    let config = config.build();
    debug!(?config, "model provider configured");
    let client = ModelClient::new(OpenAIProvider::new(config));

    println!("{} clientes carregados.", dataset.len());
    print!("{}", render::help());
    println!();

    let mut session = Session::new(dataset, client);
    let mut terminal = Terminal::stdin();
    loop {
        let prompt = match session.record() {
            None => "Cliente> ".to_owned(),
            Some(_) if !session.draft().is_empty() => "... ".to_owned(),
            Some(record) => format!("{}> ", record.identifier()),
        };
        let Some(line) = terminal.read_line(&prompt).await else {
            break;
        };

        match Input::parse(&line) {
            Input::Command(Command::Quit) => break,
            Input::Command(command) => run_command(&mut session, command).await,
            // Without a customer every line is an identifier.
            _ if session.record().is_none() => {
                select_customer(&mut session, command::strip_line_ending(&line))
                    .await;
            }
            Input::Continued(text) => {
                let draft = session.draft_mut();
                draft.push_str(text);
                draft.push('\n');
            }
            Input::Text(text) => {
                session.draft_mut().push_str(text);
                let question = session.take_draft();
                ask(&mut session, &question).await;
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(session: &mut Session, command: Command) {
    match command {
        Command::Customer(identifier) => {
            select_customer(session, &identifier).await;
        }
        Command::Reset => {
            session.reset();
            println!("Sessão limpa.");
        }
        Command::Conversation => show_transcript(session),
        Command::Help => print!("{}", render::help()),
        Command::Unknown(name) => {
            println!("Comando desconhecido: :{name}. Use :ajuda.");
        }
        Command::Quit => {}
    }
}

async fn select_customer(session: &mut Session, identifier: &str) {
    match session.select(identifier) {
        Lookup::Cleared => {}
        Lookup::NotFound => println!("{}", render::not_found()),
        Lookup::Found(record) => {
            print!("{}", render::key_fields(&record));
            println!();
            let summary =
                with_spinner("📊 Gerando resumo...", session.summary()).await;
            if let Some(summary) = summary {
                print!("{}", render::summary(summary));
                println!();
            }
            if session.transcript().is_some() {
                show_transcript(session);
            }
        }
    }
}

async fn ask(session: &mut Session, question: &str) {
    match with_spinner("🤔 Pensando...", session.ask(question)).await {
        Some(AskOutcome::Answered | AskOutcome::Failed) => {
            show_transcript(session);
        }
        Some(AskOutcome::Ignored) | None => {}
    }
}

fn show_transcript(session: &Session) {
    match session.transcript() {
        Some(transcript) => {
            print!("{}", render::transcript(transcript));
            println!();
        }
        None => println!("Nenhuma pergunta feita ainda."),
    }
}

/// Drives `fut` to completion while a spinner ticks on stderr.
async fn with_spinner<F: Future>(message: &'static str, fut: F) -> F::Output {
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(
        ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    progress_bar.set_message(message);

    let mut fut = pin!(fut);
    let output = loop {
        progress_bar.inc(1);
        select! {
            output = &mut fut => break output,
            _ = sleep(Duration::from_millis(100)) => {}
        }
    };

    // Finish the spinner before printing anything else.
    progress_bar.finish_and_clear();
    output
}
