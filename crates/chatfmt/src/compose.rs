//! Active-span compositing of styled text.
use std::borrow::Cow;

use crate::{
    entity::{Annotation, StyleKind},
    span::{normalize, Edge, NormalizedSpan, Schedule},
    style::{self, MUTED_FG},
    wrap::wrap_ansi,
};

/// How composed text is laid out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Keep `\n` as is. When false every newline becomes a single space so a
    /// message fits on one line.
    pub preserve_newlines: bool,
    /// Word-wrap to this many visible columns. Only applied together with
    /// `preserve_newlines`; `Some(0)` and `None` both mean no wrapping.
    pub wrap_width: Option<usize>,
}

impl RenderOptions {
    pub fn single_line() -> Self {
        RenderOptions::default()
    }

    pub fn multiline(wrap_width: usize) -> Self {
        Self {
            preserve_newlines: true,
            wrap_width: Some(wrap_width),
        }
    }

    fn effective_wrap(&self) -> Option<usize> {
        self.wrap_width
            .filter(|width| self.preserve_newlines && *width > 0)
    }
}

/// Apply `annotations` to `text` and return a string ready to print.
///
/// Malformed annotations never fail the call; they are clamped to the text
/// or dropped. The result depends only on the arguments.
pub fn render_styled_text(
    text: &str,
    annotations: &[Annotation],
    options: &RenderOptions,
) -> String {
    let spans = normalize(text, annotations);
    let composed = if spans.is_empty() {
        adjust_newlines(text, options.preserve_newlines).into_owned()
    } else {
        composite(text, &spans, options.preserve_newlines)
    };
    match options.effective_wrap() {
        Some(width) => wrap_ansi(&composed, width),
        None => composed,
    }
}

/// One visual line per message: newlines become spaces, no wrapping.
pub fn render_single_line(text: &str, annotations: &[Annotation]) -> String {
    render_styled_text(text, annotations, &RenderOptions::single_line())
}

/// Newlines kept, long lines word-wrapped to `width` columns (0 disables).
pub fn render_multiline(text: &str, annotations: &[Annotation], width: usize) -> String {
    render_styled_text(text, annotations, &RenderOptions::multiline(width))
}

fn adjust_newlines(segment: &str, preserve_newlines: bool) -> Cow<'_, str> {
    if preserve_newlines || !segment.contains('\n') {
        Cow::Borrowed(segment)
    } else {
        Cow::Owned(segment.replace('\n', " "))
    }
}

fn composite(text: &str, spans: &[NormalizedSpan<'_>], preserve_newlines: bool) -> String {
    let schedule = Schedule::new(spans, text.len());
    let mut out = String::with_capacity(text.len() * 2);
    // Indices into `spans`, in activation order.
    let mut active: Vec<usize> = Vec::new();
    let mut edges = schedule.boundaries().iter().peekable();

    for (start, end) in schedule.segments() {
        while let Some(boundary) = edges.next_if(|b| b.pos == start) {
            match boundary.edge {
                Edge::End => active.retain(|&index| index != boundary.span),
                Edge::Start => active.push(boundary.span),
            }
        }

        let segment = adjust_newlines(&text[start..end], preserve_newlines);
        let codes = style::resolve(active.iter().map(|&index| spans[index].kind));
        style::push_wrapped(&mut out, &segment, &codes);

        for &index in active.iter().rev() {
            let span = &spans[index];
            if span.kind != StyleKind::TextLink || span.end != end {
                continue;
            }
            if let Some(target) = span.payload.filter(|target| !target.is_empty()) {
                style::push_wrapped(&mut out, &format!(" ({target})"), &[MUTED_FG]);
            }
        }
    }

    tracing::trace!(
        spans = spans.len(),
        segments = schedule.cuts().len().saturating_sub(1),
        "composited styled text"
    );
    out
}
