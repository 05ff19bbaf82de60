//! Message entities as they arrive from the chat protocol.
//!
//! Offsets and lengths are UTF-16 code units, matching the upstream wire
//! format. Nothing here is validated; [`crate::span::normalize`] clamps and
//! drops whatever does not fit the text.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseAnnotationError;

/// Closed set of entity kinds the compositor knows how to style.
///
/// Kinds added to the protocol later resolve to [`StyleKind::Unknown`] and
/// render as plain text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Pre,
    Url,
    TextLink,
    Email,
    Mention,
    MentionName,
    Hashtag,
    BotCommand,
    Cashtag,
    Spoiler,
    Blockquote,
    Phone,
    #[default]
    Unknown,
}

impl StyleKind {
    pub const ALL: [StyleKind; 18] = [
        StyleKind::Bold,
        StyleKind::Italic,
        StyleKind::Underline,
        StyleKind::Strikethrough,
        StyleKind::Code,
        StyleKind::Pre,
        StyleKind::Url,
        StyleKind::TextLink,
        StyleKind::Email,
        StyleKind::Mention,
        StyleKind::MentionName,
        StyleKind::Hashtag,
        StyleKind::BotCommand,
        StyleKind::Cashtag,
        StyleKind::Spoiler,
        StyleKind::Blockquote,
        StyleKind::Phone,
        StyleKind::Unknown,
    ];

    /// Kebab-case name used on the command line and in JSON.
    pub fn name(self) -> &'static str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Underline => "underline",
            StyleKind::Strikethrough => "strikethrough",
            StyleKind::Code => "code",
            StyleKind::Pre => "pre",
            StyleKind::Url => "url",
            StyleKind::TextLink => "text-link",
            StyleKind::Email => "email",
            StyleKind::Mention => "mention",
            StyleKind::MentionName => "mention-name",
            StyleKind::Hashtag => "hashtag",
            StyleKind::BotCommand => "bot-command",
            StyleKind::Cashtag => "cashtag",
            StyleKind::Spoiler => "spoiler",
            StyleKind::Blockquote => "blockquote",
            StyleKind::Phone => "phone",
            StyleKind::Unknown => "unknown",
        }
    }

    /// Resolve a kind from its name. Case, `_` vs `-`, and the upstream
    /// aliases (`strike`, `text-url`, `phone-number`) are accepted; anything
    /// else is [`StyleKind::Unknown`].
    pub fn from_name(name: &str) -> StyleKind {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "bold" => StyleKind::Bold,
            "italic" => StyleKind::Italic,
            "underline" => StyleKind::Underline,
            "strikethrough" | "strike" => StyleKind::Strikethrough,
            "code" => StyleKind::Code,
            "pre" => StyleKind::Pre,
            "url" => StyleKind::Url,
            "textlink" | "texturl" => StyleKind::TextLink,
            "email" => StyleKind::Email,
            "mention" => StyleKind::Mention,
            "mentionname" => StyleKind::MentionName,
            "hashtag" => StyleKind::Hashtag,
            "botcommand" => StyleKind::BotCommand,
            "cashtag" => StyleKind::Cashtag,
            "spoiler" => StyleKind::Spoiler,
            "blockquote" => StyleKind::Blockquote,
            "phone" | "phonenumber" => StyleKind::Phone,
            _ => StyleKind::Unknown,
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for StyleKind {
    fn from(value: String) -> Self {
        StyleKind::from_name(&value)
    }
}

impl From<StyleKind> for String {
    fn from(kind: StyleKind) -> Self {
        kind.name().to_string()
    }
}

/// A styled range over a message, addressed in UTF-16 code units.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    pub kind: StyleKind,
    pub offset: usize,
    pub length: usize,
    /// Kind-specific data, e.g. the target of a [`StyleKind::TextLink`].
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub payload: Option<String>,
}

impl Annotation {
    pub fn new(kind: StyleKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            payload: None,
        }
    }

    pub fn text_link(offset: usize, length: usize, url: impl Into<String>) -> Self {
        Self::new(StyleKind::TextLink, offset, length).with_payload(url)
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// One past the last code unit covered, saturating on overflow.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }
}

/// Parses `kind:offset:length[:payload]`. The payload is everything after
/// the third colon, so URLs survive intact.
impl FromStr for Annotation {
    type Err = ParseAnnotationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut fields = s.splitn(4, ':');
        let (Some(kind), Some(offset), Some(length)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseAnnotationError::Shape(s.to_string()));
        };
        let offset = offset
            .trim()
            .parse()
            .map_err(|_| ParseAnnotationError::Number {
                field: "offset",
                value: offset.to_string(),
            })?;
        let length = length
            .trim()
            .parse()
            .map_err(|_| ParseAnnotationError::Number {
                field: "length",
                value: length.to_string(),
            })?;
        let mut annotation = Annotation::new(StyleKind::from_name(kind), offset, length);
        if let Some(payload) = fields.next().filter(|p| !p.is_empty()) {
            annotation.payload = Some(payload.to_string());
        }
        Ok(annotation)
    }
}
