use anyhow::{Context, Result};
use chatfmt::{render_image_block, render_styled_text, Annotation, RenderOptions, StyleKind};
use clap::{Parser, Subcommand};
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

use crate::input::{load_annotations, load_text};
mod input;

#[derive(Parser)]
#[command(name = "chatfmt", about = "Render chat entities and images for the terminal")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Apply entities to a message and print the styled result
    Text {
        /// Message text; read from stdin when neither --text nor --text-file is given
        #[arg(short, long, conflicts_with = "text_file")]
        text: Option<String>,
        #[arg(long)]
        text_file: Option<PathBuf>,
        /// Entity as kind:offset:length[:payload], offsets in UTF-16 code units
        #[arg(short, long = "entity")]
        entities: Vec<Annotation>,
        /// JSON file with an array of {kind, offset, length, payload?}
        #[arg(long)]
        entities_file: Option<PathBuf>,
        /// Keep newlines instead of folding the message onto one line
        #[arg(short, long)]
        multiline: bool,
        /// Wrap to this many columns in multiline mode (0 = no wrap)
        #[arg(short, long, default_value = "0")]
        width: usize,
    },
    /// Render a PNG or JPEG as half-block cells
    Image {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(long, default_value = "40")]
        max_width: u32,
        #[arg(long, default_value = "20")]
        max_height: u32,
        /// Print the number of rows after the image
        #[arg(long)]
        show_lines: bool,
    },
    /// List entity kinds with a styled sample of each
    Kinds,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Cmd::Text {
            text,
            text_file,
            entities,
            entities_file,
            multiline,
            width,
        } => {
            let text = load_text(text, text_file.as_deref())?;
            let annotations = load_annotations(entities, entities_file.as_deref())?;
            let options = if multiline {
                RenderOptions::multiline(width)
            } else {
                RenderOptions::single_line()
            };
            tracing::debug!(
                chars = text.chars().count(),
                entities = annotations.len(),
                ?options,
                "rendering text"
            );
            println!("{}", render_styled_text(&text, &annotations, &options));
        }
        Cmd::Image {
            file,
            max_width,
            max_height,
            show_lines,
        } => {
            let bytes =
                fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let rendered = render_image_block(&bytes, max_width, max_height)
                .with_context(|| format!("rendering {}", file.display()))?;
            println!("{}", rendered.text);
            if show_lines {
                eprintln!(
                    "{} lines ({}x{} px)",
                    rendered.line_count, rendered.width, rendered.height
                );
            }
        }
        Cmd::Kinds => {
            for kind in StyleKind::ALL {
                let name = kind.name();
                let mut sample = Annotation::new(kind, 0, name.len());
                if kind == StyleKind::TextLink {
                    sample = sample.with_payload("https://example.com");
                }
                println!("{}", render_styled_text(name, &[sample], &RenderOptions::single_line()));
            }
        }
    }
    Ok(())
}
