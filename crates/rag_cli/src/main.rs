use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use rag_client::{BackendClient, BackendTransport, FilePayload};
use rag_core::{Config, Message, Role};
use rag_ingest::{IngestClient, IngestOutcome};
use rag_session::{ChatSession, SendOutcome};

#[derive(Parser)]
#[command(name = "rag-cli")]
#[command(about = "Terminal front end for the RAG assistant")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides config file and RAG_SERVER_URL)
    #[arg(long)]
    server_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat (the default)
    Chat,
    /// Send a single message
    Send {
        /// Message content
        message: String,
    },
    /// Add a typed fact to the knowledge base
    Ingest {
        /// Fact to remember
        text: String,
    },
    /// Upload a file (text, PDF, or image) to the knowledge base
    Upload {
        /// Path to the file
        path: PathBuf,
    },
    /// Preview knowledge-base matches for a query
    Search {
        /// Search query
        query: String,
    },
    /// Print the persisted conversation history
    History,
    /// Delete the persisted conversation history
    ClearHistory,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::new();
    if let Some(server_url) = cli.server_url {
        config.server_url = server_url.trim_end_matches('/').to_string();
    }
    let client = BackendClient::new(&config)?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_interactive_chat(client).await,
        Commands::Send { message } => send_message(client, &message).await,
        Commands::Ingest { text } => ingest_text(client, &text).await,
        Commands::Upload { path } => upload_file(client, &path).await,
        Commands::Search { query } => search(client, &query).await,
        Commands::History => show_history(client).await,
        Commands::ClearHistory => clear_history_once(client).await,
    }
}

/// Match `/name` or `/name <arg>`, but not `/namesake`.
fn command_arg<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(name)?;
    if rest.is_empty() || rest.starts_with(' ') {
        Some(rest.trim())
    } else {
        None
    }
}

fn print_message(message: &Message) {
    let label = format!("{}:", message.role.label());
    match message.role {
        Role::User => println!("{} {}", label.cyan().bold(), message.content),
        Role::Agent => println!("{} {}", label.green().bold(), message.content),
    }
}

fn report_ingest_outcome(outcome: &IngestOutcome) {
    match outcome {
        IngestOutcome::Accepted { message } if message.is_empty() => {
            println!("{}", "✅ Added to the knowledge base".green());
        }
        IngestOutcome::Accepted { message } => {
            println!("{}", format!("✅ {}", message).green());
        }
        IngestOutcome::Failed { error } => {
            println!("{}", format!("❌ Ingestion failed: {}", error).red());
        }
        IngestOutcome::Skipped => {
            println!("{}", "Nothing to ingest".dimmed());
        }
    }
}

async fn read_file_payload(path: &Path) -> anyhow::Result<FilePayload> {
    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    // The accept hint only; the server does the actual validation.
    let mime_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
    Ok(FilePayload::new(bytes, filename, mime_type))
}

async fn run_interactive_chat(client: BackendClient) -> anyhow::Result<()> {
    let mut session = ChatSession::new(client.clone());
    let mut ingest = IngestClient::new(client.clone());

    println!("{}", "🤖 RAG Agent".cyan().bold());
    println!(
        "{}",
        "Commands: /ingest <fact>, /upload <path>, /search <query>, /clear ('exit' or 'quit' to leave)"
            .dimmed()
    );
    println!();

    // History must land before the first prompt so a late-arriving load
    // cannot overwrite an optimistic user message.
    session.hydrate().await;
    for message in session.messages() {
        print_message(message);
    }
    println!();

    loop {
        print!("{} ", "You:".cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("{}", "👋 Goodbye!".cyan());
            break;
        }
        if input.is_empty() {
            continue;
        }

        if let Some(fact) = command_arg(input, "/ingest") {
            ingest.text_form_mut().set_draft(fact);
            let outcome = ingest.submit_text().await;
            report_ingest_outcome(&outcome);
            continue;
        }
        if let Some(path) = command_arg(input, "/upload") {
            let path = PathBuf::from(path);
            match read_file_payload(&path).await {
                Ok(file) => {
                    ingest.file_picker_mut().select(file);
                    let outcome = ingest.submit_file().await;
                    report_ingest_outcome(&outcome);
                }
                Err(err) => println!("{}", format!("❌ Cannot read {}: {}", path.display(), err).red()),
            }
            continue;
        }
        if let Some(query) = command_arg(input, "/search") {
            print_search_results(&client, query).await;
            continue;
        }
        if input == "/clear" {
            match session.clear_history().await {
                Ok(()) => println!("{}", "🗑 History cleared".yellow()),
                Err(err) => {
                    println!("{}", format!("❌ Failed to clear history: {}", err).red().bold());
                    println!("{}", "The conversation is unchanged.".red());
                }
            }
            continue;
        }

        match session.send(input).await {
            SendOutcome::Replied | SendOutcome::Failed => {
                if let Some(reply) = session.messages().last() {
                    print_message(reply);
                }
            }
            SendOutcome::Skipped => {}
        }
        println!();
    }

    Ok(())
}

async fn send_message(client: BackendClient, message: &str) -> anyhow::Result<()> {
    let mut session = ChatSession::new(client);
    session.hydrate().await;

    match session.send(message).await {
        SendOutcome::Skipped => println!("{}", "Nothing to send".dimmed()),
        _ => {
            if let Some(reply) = session.messages().last() {
                print_message(reply);
            }
        }
    }
    Ok(())
}

async fn ingest_text(client: BackendClient, text: &str) -> anyhow::Result<()> {
    let mut ingest = IngestClient::new(client);
    ingest.text_form_mut().set_draft(text);
    let outcome = ingest.submit_text().await;
    report_ingest_outcome(&outcome);
    Ok(())
}

async fn upload_file(client: BackendClient, path: &Path) -> anyhow::Result<()> {
    let file = read_file_payload(path).await?;
    println!(
        "{}",
        format!("🚀 Uploading {} ({} bytes)", file.filename, file.bytes.len()).cyan()
    );

    let mut ingest = IngestClient::new(client);
    ingest.file_picker_mut().select(file);
    let outcome = ingest.submit_file().await;
    report_ingest_outcome(&outcome);
    Ok(())
}

async fn search(client: BackendClient, query: &str) -> anyhow::Result<()> {
    print_search_results(&client, query).await;
    Ok(())
}

async fn print_search_results(client: &BackendClient, query: &str) {
    if query.is_empty() {
        println!("{}", "Nothing to search for".dimmed());
        return;
    }

    match client.search(query).await {
        Ok(hits) if hits.is_empty() => {
            println!("{}", "No matches in the knowledge base".dimmed());
        }
        Ok(hits) => {
            println!("{}", format!("🔍 Top {} matches:", hits.len()).cyan());
            for hit in hits {
                println!("{} {}", format!("[{:.4}]", hit.score).dimmed(), hit.content);
            }
        }
        Err(err) => println!("{}", format!("❌ Search failed: {}", err).red()),
    }
}

async fn show_history(client: BackendClient) -> anyhow::Result<()> {
    match client.fetch_history().await {
        Ok(history) if history.is_empty() => {
            println!("{}", "No persisted history".dimmed());
        }
        Ok(history) => {
            println!("{}", format!("{} messages", history.len()).dimmed());
            for message in &history {
                print_message(message);
            }
        }
        Err(err) => println!("{}", format!("❌ Failed to load history: {}", err).red()),
    }
    Ok(())
}

async fn clear_history_once(client: BackendClient) -> anyhow::Result<()> {
    let mut session = ChatSession::new(client);
    match session.clear_history().await {
        Ok(()) => println!("{}", "🗑 History cleared".yellow()),
        Err(err) => {
            println!("{}", format!("❌ Failed to clear history: {}", err).red().bold());
            println!("{}", "The persisted conversation is unchanged.".red());
        }
    }
    Ok(())
}
