use chatfmt::{
    offset::Utf16Map,
    span::{normalize, Edge, Schedule},
    Annotation, StyleKind,
};
use pretty_assertions::assert_eq;

#[test]
fn ascii_map_is_identity() {
    let map = Utf16Map::new("abc");
    assert_eq!(map.as_slice(), &[0, 1, 2, 3]);
    assert_eq!(map.len_utf16(), 3);
}

#[test]
fn empty_text_map() {
    let map = Utf16Map::new("");
    assert_eq!(map.as_slice(), &[0]);
    assert_eq!(map.len_utf16(), 0);
    assert_eq!(map.byte_offset(5), 0);
}

#[test]
fn multibyte_bmp_chars_take_one_unit() {
    // Each Cyrillic letter is two bytes, one code unit.
    let map = Utf16Map::new("Пр");
    assert_eq!(map.as_slice(), &[0, 2, 4]);
}

#[test]
fn surrogate_pair_halves_share_start_byte() {
    let map = Utf16Map::new("a\u{1F600}b");
    // a, high, low, b, end
    assert_eq!(map.as_slice(), &[0, 1, 1, 5, 6]);
    assert_eq!(map.len_utf16(), 4);
}

#[test]
fn map_is_monotonic_and_on_char_boundaries() {
    let text = "x\u{1F44D}\u{1F3FD} Привет 你好 \u{1F1FA}\u{1F1F8}!";
    let map = Utf16Map::new(text);
    assert_eq!(map.len_utf16(), text.encode_utf16().count());
    assert_eq!(*map.as_slice().last().unwrap(), text.len());
    for pair in map.as_slice().windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    for &byte in map.as_slice() {
        assert!(text.is_char_boundary(byte));
    }
}

#[test]
fn normalize_converts_and_clamps() {
    let text = "Привет мир";
    let annotations = [
        Annotation::new(StyleKind::Bold, 0, 6),
        Annotation::new(StyleKind::Italic, 7, 50),
        Annotation::new(StyleKind::Code, 40, 2),
        Annotation::new(StyleKind::Underline, 3, 0),
    ];
    let spans = normalize(text, &annotations);
    let ranges: Vec<_> = spans.iter().map(|s| (s.kind, s.start, s.end)).collect();
    assert_eq!(
        ranges,
        vec![(StyleKind::Bold, 0, 12), (StyleKind::Italic, 13, 19)]
    );
}

#[test]
fn normalize_keeps_payload() {
    let annotations = [Annotation::text_link(0, 2, "https://a.b")];
    let spans = normalize("hi", &annotations);
    assert_eq!(spans[0].payload, Some("https://a.b"));
}

#[test]
fn schedule_orders_ends_before_starts() {
    let annotations = [
        Annotation::new(StyleKind::Italic, 2, 2),
        Annotation::new(StyleKind::Bold, 0, 2),
    ];
    let spans = normalize("abcd", &annotations);
    let schedule = Schedule::new(&spans, 4);
    let order: Vec<_> = schedule
        .boundaries()
        .iter()
        .map(|b| (b.pos, b.edge, b.span))
        .collect();
    assert_eq!(
        order,
        vec![
            (0, Edge::Start, 1),
            (2, Edge::End, 1),
            (2, Edge::Start, 0),
            (4, Edge::End, 0),
        ]
    );
    assert_eq!(schedule.cuts(), &[0, 2, 4]);
}

#[test]
fn schedule_adds_text_bounds_to_cuts() {
    let annotations = [Annotation::new(StyleKind::Bold, 2, 1)];
    let spans = normalize("hello", &annotations);
    let schedule = Schedule::new(&spans, 5);
    assert_eq!(schedule.cuts(), &[0, 2, 3, 5]);
    let segments: Vec<_> = schedule.segments().collect();
    assert_eq!(segments, vec![(0, 2), (2, 3), (3, 5)]);
}

#[test]
fn schedule_without_spans() {
    let schedule = Schedule::new(&[], 0);
    assert_eq!(schedule.cuts(), &[0]);
    assert_eq!(schedule.segments().count(), 0);
}
