//! SGR parameter table for every [`StyleKind`].
//!
//! All colors are fixed 24-bit values; there is no palette negotiation.
use crate::entity::StyleKind;

pub const RESET: &str = "\x1b[0m";

pub const BOLD: &str = "1";
pub const ITALIC: &str = "3";
pub const UNDERLINE: &str = "4";
pub const REVERSE: &str = "7";
pub const STRIKETHROUGH: &str = "9";

pub const CODE_FG: &str = "38;2;255;158;100";
pub const PRE_FG: &str = "38;2;169;177;214";
pub const BLOCK_BG: &str = "48;2;26;27;38";
pub const LINK_FG: &str = "38;2;122;162;247";
pub const MENTION_FG: &str = "38;2;187;154;247";
pub const TAG_FG: &str = "38;2;125;207;255";
pub const QUOTE_FG: &str = "38;2;169;177;214";
/// Color of the ` (target)` suffix printed after a text link.
pub const MUTED_FG: &str = "38;2;86;95;137";

impl StyleKind {
    /// SGR parameters contributed by one active span of this kind.
    ///
    /// Blockquote contributes nothing here; its color is appended once after
    /// every other active code (see [`resolve`]).
    pub fn codes(self) -> &'static [&'static str] {
        match self {
            StyleKind::Bold => &[BOLD],
            StyleKind::Italic => &[ITALIC],
            StyleKind::Underline => &[UNDERLINE],
            StyleKind::Strikethrough => &[STRIKETHROUGH],
            StyleKind::Code => &[CODE_FG, BLOCK_BG],
            StyleKind::Pre => &[PRE_FG, BLOCK_BG],
            StyleKind::Url | StyleKind::TextLink | StyleKind::Email => &[UNDERLINE, LINK_FG],
            StyleKind::Phone => &[LINK_FG],
            StyleKind::Mention | StyleKind::MentionName => &[MENTION_FG],
            StyleKind::Hashtag | StyleKind::BotCommand | StyleKind::Cashtag => &[TAG_FG],
            StyleKind::Spoiler => &[REVERSE],
            StyleKind::Blockquote | StyleKind::Unknown => &[],
        }
    }
}

/// Accumulate the codes of `kinds` in order, then the blockquote color if any
/// blockquote is among them.
pub fn resolve<I>(kinds: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = StyleKind>,
{
    let mut codes = Vec::new();
    let mut quoted = false;
    for kind in kinds {
        quoted |= kind == StyleKind::Blockquote;
        codes.extend_from_slice(kind.codes());
    }
    if quoted {
        codes.push(QUOTE_FG);
    }
    codes
}

/// `ESC [ p1 ; p2 ; … m`
pub fn sgr(codes: &[&str]) -> String {
    format!("\x1b[{}m", codes.join(";"))
}

/// Write `text` wrapped in one combined SGR sequence and a reset. With no
/// codes the text is written bare.
pub fn push_wrapped(out: &mut String, text: &str, codes: &[&str]) {
    if codes.is_empty() {
        out.push_str(text);
        return;
    }
    out.push_str(&sgr(codes));
    out.push_str(text);
    out.push_str(RESET);
}
