//! UTF-16 code unit to UTF-8 byte offset translation.

/// Lookup table from UTF-16 code unit index to byte offset in a `&str`.
///
/// Holds `len_utf16 + 1` entries; the last one is the byte length of the
/// text. Both halves of a surrogate pair map to the first byte of the
/// character, so every entry is a valid `char` boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utf16Map {
    offsets: Vec<usize>,
}

impl Utf16Map {
    pub fn new(text: &str) -> Self {
        let mut offsets = Vec::with_capacity(text.len() + 1);
        for (byte, ch) in text.char_indices() {
            for _ in 0..ch.len_utf16() {
                offsets.push(byte);
            }
        }
        offsets.push(text.len());
        Self { offsets }
    }

    /// Number of UTF-16 code units in the text.
    pub fn len_utf16(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Byte offset of code unit `index`, clamped to the end of the text.
    pub fn byte_offset(&self, index: usize) -> usize {
        let last = self.len_utf16();
        self.offsets[index.min(last)]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }
}
