//! Command-line front end
//!
//! Runs the subcommand selected in [`Config`] against a prepared
//! [`DictionaryStore`].

use std::io::{Read, Write};

use anyhow::{Context, Result};

use crate::config::{Command, Config, OutputFormat};
use crate::dictionary::DictionaryStore;
use crate::lsp::server::serve;
use crate::translate::{AnnotatedLine, translate_document};

/// Prefix marking glosses that contain unknown tokens
pub const UNKNOWN_MARKER: &str = "? ";

/// Run the configured subcommand
pub async fn run(config: Config) -> Result<()> {
    let store = DictionaryStore::from_config(&config)?;

    if let Some(model) = config.get_effective_model() {
        if !store.snapshot().has_model(&model) {
            log::warn!("Unknown model '{}', using the base dictionary only", model);
        }
    }

    match config.command.clone() {
        Command::Annotate { input, format } => {
            let content = match &input {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read program: {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read program from stdin")?;
                    buf
                }
            };

            let lines = annotate(&content, &config, &store);
            let rendered = match format {
                OutputFormat::Text => render_text(&lines),
                OutputFormat::Json => render_json(&lines)?,
            };
            write_stdout(&rendered)
        }
        Command::ExportDict { output } => match output {
            Some(path) => {
                store.export_file(&path)?;
                log::info!("Dictionary exported to {}", path.display());
                Ok(())
            }
            None => write_stdout(&(store.export_json()? + "\n")),
        },
        Command::Models => {
            let snapshot = store.snapshot();
            let mut out = String::new();
            for model in snapshot.list_models() {
                out.push_str(model);
                out.push('\n');
            }
            write_stdout(&out)
        }
        Command::Serve => serve(config, store).await,
    }
}

/// Translate a program file's content with the configured model
///
/// A final line terminator ends the last line instead of starting an empty one.
pub fn annotate(content: &str, config: &Config, store: &DictionaryStore) -> Vec<AnnotatedLine> {
    let dictionary = store.snapshot();
    let model = config.resolve_model(dictionary.detect_modeline_model(content));

    let body = content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content);

    translate_document(body, &dictionary, model.as_deref())
}

/// `<source>\t<gloss>` per line, gloss prefixed with `? ` when unknown tokens were seen
pub fn render_text(lines: &[AnnotatedLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.source);
        out.push('\t');
        if line.has_unknown {
            out.push_str(UNKNOWN_MARKER);
        }
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

pub fn render_json(lines: &[AnnotatedLine]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(lines).context("Failed to serialize annotations")?;
    json.push('\n');
    Ok(json)
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write output")
}
