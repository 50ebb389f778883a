//! Character sets understood by the scanner.
//!
//! The client character set is chosen per connection, so the scanner cannot
//! assume UTF-8. Before it inspects a byte for quotes, backslashes or
//! whitespace it asks the charset how long the character starting at that
//! byte is, and steps over the whole character. In GBK, for example, the
//! second byte of `0xD5 0x5C` is not a backslash.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{Encoding, BIG5, GB18030, GBK, WINDOWS_1252};

/// A client character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// 4-byte UTF-8.
    #[default]
    Utf8mb4,
    /// 3-byte UTF-8.
    Utf8,
    /// 7-bit ASCII.
    Ascii,
    /// ISO-8859-1 / cp1252.
    Latin1,
    /// Raw bytes.
    Binary,
    /// Simplified Chinese, 1 or 2 bytes.
    Gbk,
    /// Chinese national standard, 1, 2 or 4 bytes.
    Gb18030,
    /// Traditional Chinese, 1 or 2 bytes.
    Big5,
}

/// A collation of a [`Charset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collation {
    /// Collation name.
    pub name: &'static str,
    /// MySQL collation id.
    pub id: u16,
    /// Owning character set.
    pub charset: Charset,
    /// Whether this is the charset's default collation.
    pub is_default: bool,
}

const fn collation(name: &'static str, id: u16, charset: Charset, is_default: bool) -> Collation {
    Collation {
        name,
        id,
        charset,
        is_default,
    }
}

static COLLATIONS: &[Collation] = &[
    collation("utf8mb4_bin", 46, Charset::Utf8mb4, true),
    collation("utf8mb4_general_ci", 45, Charset::Utf8mb4, false),
    collation("utf8mb4_unicode_ci", 224, Charset::Utf8mb4, false),
    collation("utf8mb4_0900_ai_ci", 255, Charset::Utf8mb4, false),
    collation("utf8_bin", 83, Charset::Utf8, true),
    collation("utf8_general_ci", 33, Charset::Utf8, false),
    collation("utf8_unicode_ci", 192, Charset::Utf8, false),
    collation("ascii_bin", 65, Charset::Ascii, true),
    collation("ascii_general_ci", 11, Charset::Ascii, false),
    collation("latin1_bin", 47, Charset::Latin1, true),
    collation("latin1_swedish_ci", 8, Charset::Latin1, false),
    collation("binary", 63, Charset::Binary, true),
    collation("gbk_bin", 87, Charset::Gbk, true),
    collation("gbk_chinese_ci", 28, Charset::Gbk, false),
    collation("gb18030_bin", 249, Charset::Gb18030, true),
    collation("gb18030_chinese_ci", 248, Charset::Gb18030, false),
    collation("big5_bin", 84, Charset::Big5, true),
    collation("big5_chinese_ci", 1, Charset::Big5, false),
];

impl Charset {
    /// Looks up a charset by name or alias.
    ///
    /// Labels are trimmed and compared case-insensitively, so `" UTF-8 "`
    /// finds [`Charset::Utf8`].
    #[must_use]
    pub fn lookup(label: &str) -> Option<Self> {
        let cs = match label.trim().to_ascii_lowercase().as_str() {
            "utf8mb4" => Self::Utf8mb4,
            "utf8" | "utf-8" | "utf8mb3" => Self::Utf8,
            "ascii" | "us-ascii" => Self::Ascii,
            "latin1" | "iso-8859-1" | "l1" | "cp1252" => Self::Latin1,
            "binary" => Self::Binary,
            "gbk" | "gb2312" | "cp936" => Self::Gbk,
            "gb18030" => Self::Gb18030,
            "big5" => Self::Big5,
            _ => return None,
        };
        Some(cs)
    }

    /// Returns the canonical charset name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Utf8mb4 => "utf8mb4",
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
            Self::Binary => "binary",
            Self::Gbk => "gbk",
            Self::Gb18030 => "gb18030",
            Self::Big5 => "big5",
        }
    }

    /// Returns the default collation.
    #[must_use]
    pub fn default_collation(&self) -> &'static Collation {
        COLLATIONS
            .iter()
            .find(|c| c.charset == *self && c.is_default)
            .unwrap_or(&COLLATIONS[0])
    }

    /// Returns how many bytes the character starting at `bytes[0]` occupies.
    ///
    /// Always at least 1 and never more than `bytes.len()`, so a scanner can
    /// advance by the result without further checks. Truncated or malformed
    /// sequences count as a single byte. Returns 0 only for empty input.
    #[must_use]
    pub fn next_char_len(&self, bytes: &[u8]) -> usize {
        let Some(&lead) = bytes.first() else {
            return 0;
        };
        if lead < 0x80 {
            return 1;
        }
        let len = match self {
            Self::Utf8mb4 | Self::Utf8 => utf8_len(bytes),
            Self::Ascii | Self::Latin1 | Self::Binary => 1,
            Self::Gbk | Self::Big5 => 2,
            Self::Gb18030 => match bytes.get(1) {
                Some(b'0'..=b'9') => 4,
                _ => 2,
            },
        };
        len.min(bytes.len())
    }
}

impl Charset {
    /// Decodes text in this charset. Malformed sequences become U+FFFD.
    #[must_use]
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self.encoding() {
            Some(encoding) => encoding.decode_without_bom_handling(bytes).0,
            None => String::from_utf8_lossy(bytes),
        }
    }

    /// The legacy encoding behind a non-UTF-8 charset. MySQL's latin1 is
    /// cp1252.
    fn encoding(self) -> Option<&'static Encoding> {
        match self {
            Self::Latin1 => Some(WINDOWS_1252),
            Self::Gbk => Some(GBK),
            Self::Gb18030 => Some(GB18030),
            Self::Big5 => Some(BIG5),
            Self::Utf8mb4 | Self::Utf8 | Self::Ascii | Self::Binary => None,
        }
    }
}

fn utf8_len(bytes: &[u8]) -> usize {
    let len = match bytes[0] {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return 1,
    };
    if bytes.len() < len || !bytes[1..len].iter().all(|b| b & 0xC0 == 0x80) {
        return 1;
    }
    len
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Collation {
    /// Looks up a collation by name, ignoring ASCII case.
    #[must_use]
    pub fn lookup(name: &str) -> Option<&'static Self> {
        let name = name.trim();
        COLLATIONS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_normalizes_labels() {
        assert_eq!(Charset::lookup(" UTF-8 "), Some(Charset::Utf8));
        assert_eq!(Charset::lookup("UTF8MB4"), Some(Charset::Utf8mb4));
        assert_eq!(Charset::lookup("gb2312"), Some(Charset::Gbk));
        assert_eq!(Charset::lookup("klingon"), None);
    }

    #[test]
    fn test_default_collation() {
        assert_eq!(Charset::Utf8mb4.default_collation().name, "utf8mb4_bin");
        assert_eq!(Charset::Gbk.default_collation().name, "gbk_bin");
        let c = Collation::lookup("LATIN1_SWEDISH_CI").map(|c| c.charset);
        assert_eq!(c, Some(Charset::Latin1));
    }

    #[test]
    fn test_decode_per_charset() {
        assert_eq!(Charset::Gbk.decode(&[0xD6, 0xD0, b'x']), "中x");
        assert_eq!(Charset::Big5.decode(&[0xA4, 0xA4]), "中");
        assert_eq!(Charset::Latin1.decode(&[b'c', 0xE9]), "cé");
        assert_eq!(Charset::Utf8mb4.decode("中".as_bytes()), "中");
        assert_eq!(Charset::Utf8mb4.decode(&[0xFF]), "\u{FFFD}");
    }

    #[test]
    fn test_utf8_char_len() {
        assert_eq!(Charset::Utf8mb4.next_char_len(b"a"), 1);
        assert_eq!(Charset::Utf8mb4.next_char_len("é".as_bytes()), 2);
        assert_eq!(Charset::Utf8mb4.next_char_len("中x".as_bytes()), 3);
        assert_eq!(Charset::Utf8mb4.next_char_len("😀".as_bytes()), 4);
        // A lead byte without continuation bytes is a single byte.
        assert_eq!(Charset::Utf8mb4.next_char_len(&[0xD5, 0x5C]), 1);
        assert_eq!(Charset::Utf8mb4.next_char_len(&[0xE4, 0xB8]), 1);
        assert_eq!(Charset::Utf8mb4.next_char_len(&[]), 0);
    }

    #[test]
    fn test_gbk_char_len() {
        assert_eq!(Charset::Gbk.next_char_len(&[0xD5, 0x5C]), 2);
        assert_eq!(Charset::Gbk.next_char_len(&[0x5C, 0x27]), 1);
        assert_eq!(Charset::Gbk.next_char_len(&[0xD5]), 1);
    }

    #[test]
    fn test_gb18030_char_len() {
        assert_eq!(Charset::Gb18030.next_char_len(&[0x81, 0x30, 0x81, 0x30]), 4);
        assert_eq!(Charset::Gb18030.next_char_len(&[0x81, 0x40]), 2);
    }

    #[test]
    fn test_single_byte_charsets() {
        assert_eq!(Charset::Latin1.next_char_len(&[0xE9, 0x27]), 1);
        assert_eq!(Charset::Binary.next_char_len(&[0xFF, 0xFF]), 1);
    }
}
