use anyhow::{Context, Result};
use chatfmt::Annotation;
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

/// Message text from the flag, a file, or stdin, in that order.
pub fn load_text(text: Option<String>, path: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = path {
        return fs::read_to_string(path).with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("reading message from stdin")?;
    // A trailing newline from `echo` or a heredoc is not part of the message.
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

/// Entities from `--entity` flags followed by those in the JSON file.
pub fn load_annotations(
    mut flags: Vec<Annotation>,
    path: Option<&Path>,
) -> Result<Vec<Annotation>> {
    if let Some(path) = path {
        let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let from_file: Vec<Annotation> = serde_json::from_str(&json)
            .with_context(|| format!("parsing entities in {}", path.display()))?;
        tracing::debug!(count = from_file.len(), path = %path.display(), "loaded entities");
        flags.extend(from_file);
    }
    Ok(flags)
}
