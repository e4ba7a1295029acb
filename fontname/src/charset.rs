//! Decode name strings under one candidate charset.
//!
//! Decoding never fails, a bad byte sequence decodes to replacement
//! characters and the result is marked not clean.

use encoding_rs::Encoding;
use std::{char::REPLACEMENT_CHARACTER, ops::RangeInclusive};

/// Charsets found in `name` tables of real world fonts.
///
/// Mac CJK encodings of OpenType are close enough to their Windows
/// counterparts, the Windows ones are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum Charset {
    #[strum(serialize = "UTF-16BE")]
    Utf16Be,
    #[strum(serialize = "macintosh")]
    MacRoman,
    #[strum(serialize = "x-mac-cyrillic")]
    MacCyrillic,
    #[strum(serialize = "Shift_JIS")]
    ShiftJis,
    #[strum(serialize = "Big5")]
    Big5,
    /// EUC-CN, the strict GB2312 subset of GBK.
    #[strum(serialize = "GB2312")]
    Gb2312,
    #[strum(serialize = "GBK")]
    Gbk,
    #[strum(serialize = "EUC-KR")]
    EucKr,
    #[strum(serialize = "US-ASCII")]
    Ascii,
    /// Maps every byte to the char of same value, never fails.
    #[strum(serialize = "ISO-8859-1")]
    Latin1,
    /// UTF-16BE string produced by a tool that read GB2312 bytes as Big5,
    /// decoding reverses the mistake.
    #[strum(serialize = "UTF-16BE(Big5>GB2312)")]
    Big5Misread,
}

impl Charset {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn is_utf16(self) -> bool {
        matches!(self, Self::Utf16Be | Self::Big5Misread)
    }

    fn encoding(self) -> Option<&'static Encoding> {
        match self {
            Self::Utf16Be => Some(encoding_rs::UTF_16BE),
            Self::MacRoman => Some(encoding_rs::MACINTOSH),
            Self::MacCyrillic => Some(encoding_rs::X_MAC_CYRILLIC),
            Self::ShiftJis => Some(encoding_rs::SHIFT_JIS),
            Self::Big5 => Some(encoding_rs::BIG5),
            // `encoding_rs` has no GB2312, GBK is compatible to it
            Self::Gb2312 | Self::Gbk => Some(encoding_rs::GBK),
            Self::EucKr => Some(encoding_rs::EUC_KR),
            Self::Ascii | Self::Latin1 | Self::Big5Misread => None,
        }
    }

    /// True if `text` can be written in this charset without loss.
    pub fn can_encode(self, text: &str) -> bool {
        match self {
            Self::Utf16Be | Self::Big5Misread => true,
            Self::Ascii => text.is_ascii(),
            Self::Latin1 => text.chars().all(|c| u32::from(c) < 0x100),
            _ => self.encoding().is_some_and(|encoding| {
                let (bytes, _, unmappable) = encoding.encode(text);
                !unmappable && self.accepts(&bytes)
            }),
        }
    }

    /// Byte structure check of the strict charsets, `encoding_rs` decoders
    /// also accept vendor extensions (HKSCS, UHC, GBK) beyond them.
    fn accepts(self, raw: &[u8]) -> bool {
        const EUC_TRAIL: [RangeInclusive<u8>; 1] = [0xa1..=0xfe];
        const BIG5_TRAIL: [RangeInclusive<u8>; 2] = [0x40..=0x7e, 0xa1..=0xfe];

        match self {
            Self::Big5 => is_double_byte(raw, 0xa1..=0xf9, &BIG5_TRAIL),
            Self::Gb2312 => is_double_byte(raw, 0xa1..=0xf7, &EUC_TRAIL),
            Self::EucKr => is_double_byte(raw, 0xa1..=0xfe, &EUC_TRAIL),
            _ => true,
        }
    }
}

/// How raw bytes are fed to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framing {
    Whole,
    /// Every real byte is preceded by a redundant 0x00, keep the odd ones.
    OddBytes,
    /// String cut in the middle of its last character, drop the tail.
    Truncated,
}

/// Output of one decode attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Decoded without malformed sequences, anomalous chars or empty result.
    pub clean: bool,
}

impl Decoded {
    fn new(text: &str, well_formed: bool) -> Self {
        // padding, not part of the name
        let text = text.trim_end_matches('\0');
        let clean = well_formed && !text.is_empty() && !text.chars().any(is_anomaly);
        Self {
            text: text.to_owned(),
            clean,
        }
    }

    fn malformed(self) -> Self {
        Self {
            clean: false,
            ..self
        }
    }

    pub fn anomalies(&self) -> usize {
        self.text.chars().filter(|c| is_anomaly(*c)).count()
    }

    /// Text with anomalous chars removed.
    pub fn stripped(&self) -> String {
        self.text.chars().filter(|c| !is_anomaly(*c)).collect()
    }
}

/// Replacement char, control chars and noncharacters never appear in a
/// sane font name.
pub fn is_anomaly(c: char) -> bool {
    c == REPLACEMENT_CHARACTER || c.is_control() || is_noncharacter(c)
}

/// U+FDD0..U+FDEF, and the last two code points of every plane.
fn is_noncharacter(c: char) -> bool {
    let cp = u32::from(c);
    (0xfdd0..=0xfdef).contains(&cp) || cp & 0xfffe == 0xfffe
}

/// Decode `raw` as `charset`, reframed by `framing`.
pub fn try_decode(raw: &[u8], charset: Charset, framing: Framing) -> Decoded {
    match framing {
        Framing::Whole => decode(raw, charset),
        Framing::OddBytes => {
            let bytes: Vec<u8> = raw.iter().skip(1).step_by(2).copied().collect();
            decode(&bytes, charset)
        }
        Framing::Truncated => {
            let whole = decode(raw, charset);
            if whole.clean {
                return whole;
            }
            // double byte charsets lose at most two bytes of a character
            (1..=2)
                .filter(|cut| raw.len() > *cut)
                .map(|cut| decode(&raw[..raw.len() - cut], charset))
                .find(|d| d.clean)
                .unwrap_or(whole)
        }
    }
}

fn decode(raw: &[u8], charset: Charset) -> Decoded {
    match charset {
        Charset::Ascii => match std::str::from_utf8(raw) {
            Ok(s) if raw.is_ascii() => Decoded::new(s, true),
            _ => decode_latin1(raw).malformed(),
        },
        Charset::Latin1 => decode_latin1(raw),
        Charset::Big5Misread => decode_big5_misread(raw),
        Charset::Utf16Be if raw.len() % 2 != 0 => {
            decode_with(encoding_rs::UTF_16BE, raw).malformed()
        }
        _ => match charset.encoding() {
            Some(encoding) if charset.accepts(raw) => decode_with(encoding, raw),
            Some(encoding) => decode_with(encoding, raw).malformed(),
            None => decode_latin1(raw).malformed(),
        },
    }
}

fn decode_with(encoding: &'static Encoding, raw: &[u8]) -> Decoded {
    match encoding.decode_without_bom_handling_and_without_replacement(raw) {
        Some(text) => Decoded::new(&text, true),
        None => {
            let (text, _) = encoding.decode_without_bom_handling(raw);
            log::trace!("{} malformed: {:02x?}", encoding.name(), raw);
            Decoded::new(&text, false)
        }
    }
}

fn decode_latin1(raw: &[u8]) -> Decoded {
    let text: String = raw.iter().map(|b| char::from(*b)).collect();
    Decoded::new(&text, true)
}

/// Big5 encodes the misread text back to the original GB2312 bytes.
fn decode_big5_misread(raw: &[u8]) -> Decoded {
    let misread = decode(raw, Charset::Utf16Be);
    if !misread.clean {
        return misread;
    }

    let (bytes, _, unmappable) = encoding_rs::BIG5.encode(&misread.text);
    let (text, _) = encoding_rs::GBK.decode_without_bom_handling(&bytes);
    let mut chars: Vec<char> = text.chars().collect();
    // some strings carry a redundant byte, it breaks the last character
    if chars.len() >= 2 && chars[chars.len() - 2] == REPLACEMENT_CHARACTER {
        chars.truncate(chars.len() - 2);
    }
    let text: String = chars.into_iter().collect();
    Decoded::new(&text, !unmappable)
}

/// ASCII bytes, or a `lead` byte followed by a byte in one of `trails`.
fn is_double_byte(raw: &[u8], lead: RangeInclusive<u8>, trails: &[RangeInclusive<u8>]) -> bool {
    let mut iter = raw.iter();
    while let Some(b) = iter.next() {
        if *b < 0x80 {
            continue;
        }
        if !lead.contains(b) {
            return false;
        }
        match iter.next() {
            Some(trail) if trails.iter().any(|r| r.contains(trail)) => {}
            _ => return false,
        }
    }
    true
}
