//! Span normalization and boundary scheduling.
//!
//! [`normalize`] turns protocol annotations into byte ranges over the text;
//! [`Schedule`] orders their edges and cuts the text into segments over
//! which the set of active spans is constant.
use crate::{entity::Annotation, offset::Utf16Map, StyleKind};

/// An annotation resolved to a non-empty byte range of the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizedSpan<'a> {
    pub kind: StyleKind,
    pub payload: Option<&'a str>,
    pub start: usize,
    pub end: usize,
}

/// Clamp every annotation to the text and convert it to byte offsets.
///
/// Annotations that are empty or entirely out of range after clamping are
/// dropped without error. Output keeps input order.
pub fn normalize<'a>(text: &str, annotations: &'a [Annotation]) -> Vec<NormalizedSpan<'a>> {
    let map = Utf16Map::new(text);
    let limit = map.len_utf16();
    let mut spans = Vec::with_capacity(annotations.len());
    for annotation in annotations {
        let offset = annotation.offset;
        let end = annotation.end().min(limit);
        if offset >= end {
            tracing::trace!(
                kind = %annotation.kind,
                offset,
                length = annotation.length,
                "dropping empty or out-of-range annotation"
            );
            continue;
        }
        let start = map.byte_offset(offset);
        let end = map.byte_offset(end);
        // Only possible when the range covers nothing but a low surrogate.
        if start >= end {
            tracing::trace!(kind = %annotation.kind, offset, "dropping split surrogate annotation");
            continue;
        }
        spans.push(NormalizedSpan {
            kind: annotation.kind,
            payload: annotation.payload.as_deref(),
            start,
            end,
        });
    }
    spans
}

/// Ends sort before starts at the same position, so a span closing where
/// another opens is never active together with it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Edge {
    End,
    Start,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Boundary {
    pub pos: usize,
    pub edge: Edge,
    /// Index into the span slice the schedule was built from.
    pub span: usize,
}

/// Sorted span edges plus the cut points they induce.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    boundaries: Vec<Boundary>,
    cuts: Vec<usize>,
}

impl Schedule {
    pub fn new(spans: &[NormalizedSpan<'_>], text_len: usize) -> Self {
        let mut boundaries = Vec::with_capacity(spans.len() * 2);
        for (index, span) in spans.iter().enumerate() {
            boundaries.push(Boundary {
                pos: span.start,
                edge: Edge::Start,
                span: index,
            });
            boundaries.push(Boundary {
                pos: span.end,
                edge: Edge::End,
                span: index,
            });
        }
        // Stable, so equal (pos, edge) keep input order.
        boundaries.sort_by_key(|b| (b.pos, b.edge));

        let mut cuts = Vec::with_capacity(boundaries.len() + 2);
        cuts.push(0);
        cuts.extend(boundaries.iter().map(|b| b.pos));
        cuts.push(text_len);
        cuts.sort_unstable();
        cuts.dedup();

        Self { boundaries, cuts }
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Distinct ascending byte positions, always starting at 0 and ending at
    /// the text length.
    pub fn cuts(&self) -> &[usize] {
        &self.cuts
    }

    /// Adjacent cut pairs, i.e. the segments of the text.
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cuts.windows(2).map(|w| (w[0], w[1]))
    }
}
