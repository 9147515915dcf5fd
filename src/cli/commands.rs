//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::chunking::Chunker;
use crate::cli::output::{
    OutputFormat, format_chunks, format_files, format_history, format_reply, format_request,
    format_stats, format_upload_report,
};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::error::{CommandError, Error, Result};
use crate::inference::{ChatRequest, InferenceClient};
use crate::io::read_document;
use crate::session::Session;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Help text for the interactive session.
const CHAT_HELP: &str = "\
Commands:
  /upload <path>...  add documents (.txt, .pdf, .doc, .docx)
  /files             list uploaded documents
  /history           show the conversation
  /stats             show session counters
  /help              show this help
  /quit              end the session
Anything else is sent to the model.
";

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the command fails.
pub async fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = Config::from_cli(cli)?;
    debug!(
        endpoint = %config.endpoint,
        model = %config.model,
        chunk_size = config.chunk_size,
        overlap = config.overlap,
        "resolved configuration"
    );

    match &cli.command {
        Commands::Chunk { file } => cmd_chunk(&config, file, format),
        Commands::Prompt { files, message } => cmd_prompt(&config, files, message, format),
        Commands::Ask { files, message } => cmd_ask(&config, files, message, format).await,
        Commands::Chat { files } => cmd_chat(&config, files, format).await,
    }
}

fn cmd_chunk(config: &Config, file: &Path, format: OutputFormat) -> Result<String> {
    let document = read_document(file)?;
    let chunks = config.chunker().chunk(0, &document.content)?;
    info!(file = %document.name, chunks = chunks.len(), "chunked document");
    Ok(format_chunks(&document.name, &chunks, format))
}

fn cmd_prompt(
    config: &Config,
    files: &[PathBuf],
    message: &str,
    format: OutputFormat,
) -> Result<String> {
    require_message(message)?;
    let session = load_session(config, files);
    let messages = session.preview_prompt(message);
    let request = ChatRequest::new(&config.model, &messages);
    Ok(format_request(&request, format))
}

async fn cmd_ask(
    config: &Config,
    files: &[PathBuf],
    message: &str,
    format: OutputFormat,
) -> Result<String> {
    require_message(message)?;
    let client = config.client()?;
    let mut session = load_session(config, files);

    let reply = session
        .submit(&client, message)
        .await
        .cloned()
        .ok_or_else(|| Error::InvalidState {
            message: "session is busy".to_string(),
        })?;
    Ok(format_reply(&reply, format))
}

async fn cmd_chat(config: &Config, files: &[PathBuf], format: OutputFormat) -> Result<String> {
    let client = config.client()?;
    let mut session = Session::with_chunker(config.chunker());
    let mut stdout = io::stdout();

    if !files.is_empty() {
        let report = session.upload(files);
        write!(stdout, "{}", format_upload_report(&report, format))?;
    }

    let stdin = BufReader::new(tokio::io::stdin());
    run_chat(&mut session, &client, stdin, &mut stdout, format).await?;
    Ok(String::new())
}

/// Drives an interactive session: one input line per turn.
///
/// A line is read only after the previous turn has finished, so at most
/// one request is ever outstanding. Blank lines are skipped. Lines that
/// start with `/` are session commands; everything else is sent to the
/// model through `client`.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails. Failed
/// chat requests are not errors; they show up as the fallback reply.
pub async fn run_chat<C, R, W>(
    session: &mut Session,
    client: &C,
    mut input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<()>
where
    C: InferenceClient + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut buf = Vec::new();

    loop {
        if format == OutputFormat::Text {
            write!(output, "> ")?;
            output.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let rendered = if let Some(command) = trimmed.strip_prefix('/') {
            let (name, args) = command
                .split_once(char::is_whitespace)
                .unwrap_or((command, ""));
            match name {
                "quit" | "exit" => break,
                "help" => CHAT_HELP.to_string(),
                "files" => format_files(session.files(), format),
                "history" => format_history(session.history(), format),
                "stats" => format_stats(&session.stats(), format),
                "upload" => {
                    let paths = split_args(args);
                    if paths.is_empty() {
                        "Usage: /upload <path>...\n".to_string()
                    } else {
                        format_upload_report(&session.upload(&paths), format)
                    }
                }
                other => format!("Unknown command '/{other}'. Type /help for commands.\n"),
            }
        } else {
            match session.submit(client, line).await {
                Some(reply) => format_reply(reply, format),
                None => continue,
            }
        };

        write!(output, "{rendered}")?;
        output.flush()?;
    }

    Ok(())
}

/// Splits `/upload` arguments on whitespace. Double or single quotes
/// group a path containing spaces. Outside single quotes a backslash
/// escapes a following space, quote or backslash; any other backslash is
/// kept as is.
fn split_args(args: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote = None;
    let mut chars = args.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => {
                quote = Some(c);
                in_arg = true;
            }
            (Some('\''), c) => current.push(c),
            (_, '\\') => {
                match chars.next_if(|&n| n.is_whitespace() || matches!(n, '"' | '\'' | '\\')) {
                    Some(next) => current.push(next),
                    None => current.push('\\'),
                }
                in_arg = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_arg {
                    out.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (_, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        out.push(current);
    }
    out
}

/// Builds a session and uploads `files` into it, in order.
fn load_session(config: &Config, files: &[PathBuf]) -> Session {
    let mut session = Session::with_chunker(config.chunker());
    if !files.is_empty() {
        let report = session.upload(files);
        debug!(
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            failed = report.failed.len(),
            chunks = report.chunks_added,
            "uploaded documents"
        );
    }
    session
}

fn require_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(CommandError::InvalidArgument("message must not be blank".to_string()).into());
    }
    Ok(())
}
