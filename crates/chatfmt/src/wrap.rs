//! Word wrapping for strings that already carry ANSI escape sequences.
//!
//! Width is measured in terminal columns with `unicode-width`; CSI sequences
//! are zero-width and are never split. Every line break closes the open SGR
//! state and reopens it on the following line, so each output line can be
//! printed on its own.
use unicode_width::UnicodeWidthChar;

use crate::style::RESET;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Token<'a> {
    /// A complete `ESC [ … final` sequence.
    Escape(&'a str),
    Char(char),
}

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.rest.starts_with("\x1b[") {
            let len = self.rest.as_bytes()[2..]
                .iter()
                .position(|b| (0x40..=0x7e).contains(b))
                .map_or(self.rest.len(), |i| i + 3);
            let (seq, rest) = self.rest.split_at(len);
            self.rest = rest;
            return Some(Token::Escape(seq));
        }
        let ch = self.rest.chars().next()?;
        self.rest = &self.rest[ch.len_utf8()..];
        Some(Token::Char(ch))
    }
}

fn tokens(s: &str) -> Tokens<'_> {
    Tokens { rest: s }
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display width of `s`, ignoring escape sequences.
pub fn visible_width(s: &str) -> usize {
    tokens(s)
        .map(|token| match token {
            Token::Escape(_) => 0,
            Token::Char(ch) => char_width(ch),
        })
        .sum()
}

/// Remove every CSI escape sequence from `s`.
pub fn strip_ansi(s: &str) -> String {
    tokens(s)
        .filter_map(|token| match token {
            Token::Escape(_) => None,
            Token::Char(ch) => Some(ch),
        })
        .collect()
}

/// Wrap `s` so that no line is wider than `width` visible columns.
///
/// Breaks happen at spaces; a word wider than `width` is broken by
/// character. Existing newlines are kept. `width == 0` returns the input
/// unchanged.
pub fn wrap_ansi(s: &str, width: usize) -> String {
    if width == 0 {
        return s.to_string();
    }
    let mut wrapper = Wrapper::new(width, s.len());
    for (index, paragraph) in s.split('\n').enumerate() {
        if index > 0 {
            wrapper.newline();
        }
        for token in tokens(paragraph) {
            wrapper.push(token);
        }
        wrapper.finish_paragraph();
    }
    wrapper.out
}

struct Wrapper<'a> {
    width: usize,
    out: String,
    line_width: usize,
    /// Spaces seen since the last word, written only if a word follows on
    /// the same line.
    space: usize,
    word: Vec<Token<'a>>,
    word_width: usize,
    /// SGR sequences written since the last reset.
    open: Vec<&'a str>,
}

impl<'a> Wrapper<'a> {
    fn new(width: usize, capacity: usize) -> Self {
        Self {
            width,
            out: String::with_capacity(capacity + capacity / 4),
            line_width: 0,
            space: 0,
            word: Vec::new(),
            word_width: 0,
            open: Vec::new(),
        }
    }

    fn push(&mut self, token: Token<'a>) {
        match token {
            Token::Escape(_) => self.word.push(token),
            Token::Char(' ') => {
                self.flush_word();
                self.space += 1;
            }
            Token::Char(ch) => {
                let w = char_width(ch);
                if self.word_width > 0 && self.word_width + w > self.width {
                    self.flush_word();
                    self.newline();
                }
                self.word.push(token);
                self.word_width += w;
                if self.line_width + self.space + self.word_width > self.width {
                    if self.line_width > 0 {
                        self.newline();
                    } else {
                        self.space = 0;
                    }
                }
            }
        }
    }

    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        // Escapes alone leave pending spaces pending, so they are still
        // measured against the next visible word.
        if self.word.iter().any(|token| matches!(token, Token::Char(_))) {
            self.write_spaces();
        }
        for token in std::mem::take(&mut self.word) {
            match token {
                Token::Escape(seq) => self.write_escape(seq),
                Token::Char(ch) => self.out.push(ch),
            }
        }
        self.line_width += self.word_width;
        self.word_width = 0;
    }

    fn finish_paragraph(&mut self) {
        self.flush_word();
        if self.line_width + self.space <= self.width {
            self.write_spaces();
        }
        self.space = 0;
    }

    fn write_spaces(&mut self) {
        for _ in 0..self.space {
            self.out.push(' ');
        }
        self.line_width += self.space;
        self.space = 0;
    }

    fn write_escape(&mut self, seq: &'a str) {
        if seq == RESET || seq == "\x1b[m" {
            self.open.clear();
        } else if seq.ends_with('m') {
            self.open.push(seq);
        }
        self.out.push_str(seq);
    }

    fn newline(&mut self) {
        if !self.open.is_empty() {
            self.out.push_str(RESET);
        }
        self.out.push('\n');
        for seq in &self.open {
            self.out.push_str(seq);
        }
        self.line_width = 0;
        self.space = 0;
    }
}
