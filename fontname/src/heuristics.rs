//! Candidate charsets of a name record.
//!
//! Knowledge about how fonts in the wild mislabel their name records lives
//! in `RULES`, an ordered table of matchers and the candidates they add.
//! The table is evaluated top-down, every matching rule appends its
//! candidates, and a charset/framing pair is only tried once.

use crate::{
    charset::{try_decode, Charset, Decoded, Framing},
    record::{platform_id, NameRecord},
};
use phf::phf_map;

/// Why a candidate is tried, decides the issue level of a clean decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Source {
    /// Charset declared by platform and encoding ID.
    Declared,
    /// Charset implied by the language ID.
    Language,
    /// Byte content matches a known mislabeling pattern.
    Signature,
    /// Bytes need to be reframed or reinterpreted, the data itself is damaged.
    Repair,
    /// Charset commonly mislabeled as another one.
    Fallback,
    /// Decodes anything, only used when nothing else makes sense.
    LastResort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub charset: Charset,
    pub framing: Framing,
    pub source: Source,
}

impl Candidate {
    pub const fn new(charset: Charset, source: Source) -> Self {
        Self::framed(charset, Framing::Whole, source)
    }

    pub const fn framed(charset: Charset, framing: Framing, source: Source) -> Self {
        Self {
            charset,
            framing,
            source,
        }
    }

    pub fn decode(&self, raw: &[u8]) -> Decoded {
        try_decode(raw, self.charset, self.framing)
    }
}

static MAC_ENCODINGS: phf::Map<u16, Charset> = phf_map! {
    0u16 => Charset::MacRoman,
    1u16 => Charset::ShiftJis,
    2u16 => Charset::Big5,
    3u16 => Charset::EucKr,
    7u16 => Charset::MacCyrillic,
    25u16 => Charset::Gb2312,
};

static WINDOWS_ENCODINGS: phf::Map<u16, Charset> = phf_map! {
    // Symbol
    0u16 => Charset::Utf16Be,
    1u16 => Charset::Utf16Be,
    2u16 => Charset::ShiftJis,
    // PRC
    3u16 => Charset::Gb2312,
    4u16 => Charset::Big5,
    // Wansung
    5u16 => Charset::EucKr,
    10u16 => Charset::Utf16Be,
};

static ISO_ENCODINGS: phf::Map<u16, Charset> = phf_map! {
    0u16 => Charset::Ascii,
    1u16 => Charset::Utf16Be,
    2u16 => Charset::Latin1,
};

/// CJK names stored under Mac Roman are often in the charset of their
/// language.
static MAC_LANGUAGE_CHARSETS: phf::Map<u16, Charset> = phf_map! {
    11u16 => Charset::ShiftJis,
    19u16 => Charset::Big5,
    23u16 => Charset::EucKr,
    33u16 => Charset::Gb2312,
};

/// Charset the record's platform and encoding IDs claim.
pub fn declared_charset(platform: u16, encoding: u16) -> Option<Charset> {
    match platform {
        platform_id::UNICODE => Some(Charset::Utf16Be),
        platform_id::MACINTOSH => MAC_ENCODINGS.get(&encoding).copied(),
        platform_id::ISO => ISO_ENCODINGS.get(&encoding).copied(),
        platform_id::WINDOWS => WINDOWS_ENCODINGS.get(&encoding).copied(),
        _ => None,
    }
}

/// What a rule looks at.
struct Probe<'a> {
    record: &'a NameRecord<'a>,
    declared: Option<Charset>,
}

impl<'a> Probe<'a> {
    fn raw(&self) -> &'a [u8] {
        self.record.raw
    }

    fn declared_utf16(&self) -> bool {
        self.declared == Some(Charset::Utf16Be)
    }

    /// Declared charset is a legacy (non unicode) one.
    fn declared_legacy(&self) -> bool {
        self.declared.is_some_and(|c| !c.is_utf16())
    }

    fn high_bytes(&self) -> usize {
        self.raw().iter().filter(|b| **b > 0x7f).count()
    }

    /// Among all supported charsets only UTF-16 may have 0x00 inside.
    fn has_inner_zero(&self) -> bool {
        let raw = self.raw();
        let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        raw[..end].contains(&0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Pick {
    Fixed(Candidate),
    /// The declared charset, if the record has one.
    Declared(Framing, Source),
    /// Charset of the record's Macintosh language.
    Language,
}

const fn fixed(charset: Charset, source: Source) -> Pick {
    Pick::Fixed(Candidate::new(charset, source))
}

struct Rule {
    matches: fn(&Probe) -> bool,
    picks: &'static [Pick],
}

static RULES: &[Rule] = &[
    // Redundant 0x00 before every byte (eg: 微软简中圆)
    Rule {
        matches: zero_interleaved,
        picks: &[Pick::Declared(Framing::OddBytes, Source::Repair)],
    },
    // UTF-16 marked as legacy charset (eg: HG半古印体)
    Rule {
        matches: zero_inside_legacy,
        picks: &[fixed(Charset::Utf16Be, Source::Signature)],
    },
    Rule {
        matches: cjk_language_under_mac_roman,
        picks: &[Pick::Language],
    },
    // Mac Roman never fails, catch Big5 (eg: 華康布丁體) and Shift_JIS
    // (eg: EPSON 丸ゴシック体Ｍ) first, Big5 is more likely to fail.
    Rule {
        matches: many_high_bytes_under_mac_roman,
        picks: &[
            fixed(Charset::Big5, Source::Signature),
            fixed(Charset::ShiftJis, Source::Signature),
        ],
    },
    // 恅隋 series (eg: 文鼎粗圆简 stored as 恅隋棉埴潠翷)
    Rule {
        matches: big5_misread_prefix,
        picks: &[Pick::Fixed(Candidate::new(
            Charset::Big5Misread,
            Source::Repair,
        ))],
    },
    // Vendor prefixes of legacy strings marked as UTF-16
    // (eg: 华康楷体W5-A, 華康中黑體(P)-UN, 汉鼎简中楷)
    Rule {
        matches: gb2312_vendor_prefix,
        picks: &[fixed(Charset::Gb2312, Source::Signature)],
    },
    Rule {
        matches: big5_vendor_prefix,
        picks: &[fixed(Charset::Big5, Source::Signature)],
    },
    Rule {
        matches: ascii_vendor_prefix,
        picks: &[fixed(Charset::Ascii, Source::Signature)],
    },
    // GB2312 marked as Mac Japanese (eg: 森泽UD新黑 Gb4 DB)
    Rule {
        matches: gb2312_marked_shift_jis,
        picks: &[fixed(Charset::Gb2312, Source::Signature)],
    },
    // UTF-16 marked as legacy charset, without 0x00 (eg: 麗流隷書)
    Rule {
        matches: utf16_fits_declared,
        picks: &[fixed(Charset::Utf16Be, Source::Signature)],
    },
    Rule {
        matches: always,
        picks: &[Pick::Declared(Framing::Whole, Source::Declared)],
    },
    // Simplified Chinese marked as Japanese, without a known prefix
    // (eg: 方正准圆)
    Rule {
        matches: declared_shift_jis,
        picks: &[fixed(Charset::Gb2312, Source::Fallback)],
    },
    // GBK extension marked as GB2312 (eg: 方正字迹-黄陵野鶴行書 繁U)
    Rule {
        matches: declared_gb2312,
        picks: &[fixed(Charset::Gbk, Source::Repair)],
    },
    // Data permanently lost, recover the remaining part (eg: 文鼎勘亭流)
    Rule {
        matches: always,
        picks: &[Pick::Declared(Framing::Truncated, Source::Repair)],
    },
    Rule {
        matches: always,
        picks: &[
            fixed(Charset::Utf16Be, Source::Fallback),
            fixed(Charset::Big5, Source::Fallback),
            fixed(Charset::Gb2312, Source::Fallback),
            fixed(Charset::ShiftJis, Source::Fallback),
            fixed(Charset::EucKr, Source::Fallback),
            fixed(Charset::Gbk, Source::Fallback),
        ],
    },
    // a latin name has few high bytes
    Rule {
        matches: few_high_bytes,
        picks: &[fixed(Charset::MacRoman, Source::Fallback)],
    },
    Rule {
        matches: always,
        picks: &[fixed(Charset::Latin1, Source::LastResort)],
    },
];

fn always(_: &Probe) -> bool {
    true
}

fn zero_interleaved(p: &Probe) -> bool {
    p.declared_legacy() && p.has_inner_zero() && p.raw().iter().step_by(2).all(|b| *b == 0)
}

fn zero_inside_legacy(p: &Probe) -> bool {
    p.declared_legacy() && p.has_inner_zero() && !zero_interleaved(p)
}

fn cjk_language_under_mac_roman(p: &Probe) -> bool {
    p.record.platform_id == platform_id::MACINTOSH
        && p.record.encoding_id == 0
        && MAC_LANGUAGE_CHARSETS.contains_key(&p.record.language_id)
        && p.high_bytes() > 0
}

fn many_high_bytes_under_mac_roman(p: &Probe) -> bool {
    p.declared == Some(Charset::MacRoman) && p.high_bytes() > 3
}

fn few_high_bytes(p: &Probe) -> bool {
    p.high_bytes() <= 3
}

fn big5_misread_prefix(p: &Probe) -> bool {
    p.declared_utf16() && p.raw().starts_with(&[0x60, 0x45, 0x96, 0x8b])
}

fn gb2312_vendor_prefix(p: &Probe) -> bool {
    // 华康
    p.declared_utf16() && p.raw().starts_with(&[0xbb, 0xaa, 0xbf, 0xb5])
}

fn big5_vendor_prefix(p: &Probe) -> bool {
    // 華康
    p.declared_utf16() && p.raw().starts_with(&[0xb5, 0xd8, 0xb1, 0x64])
}

fn ascii_vendor_prefix(p: &Probe) -> bool {
    p.declared_utf16() && p.raw().starts_with(b"HanDing")
}

fn gb2312_marked_shift_jis(p: &Probe) -> bool {
    // 森泽
    p.declared == Some(Charset::ShiftJis) && p.raw().starts_with(&[0xc9, 0xad, 0xd4, 0xf3])
}

/// Legacy charsets cover a small set of characters at code points far from
/// Unicode ones, text decoded from real legacy bytes as UTF-16 is unlikely
/// to be encodable in the declared charset.
fn utf16_fits_declared(p: &Probe) -> bool {
    let Some(declared) = p.declared else {
        return false;
    };
    if declared.is_utf16() || p.raw().len() % 2 != 0 {
        return false;
    }

    let decoded = try_decode(p.raw(), Charset::Utf16Be, Framing::Whole);
    decoded.clean && declared.can_encode(&decoded.text)
}

fn declared_shift_jis(p: &Probe) -> bool {
    p.declared == Some(Charset::ShiftJis)
}

fn declared_gb2312(p: &Probe) -> bool {
    p.declared == Some(Charset::Gb2312)
}

/// Candidates to decode `record` with, most trusted first.
///
/// Never empty: the last candidate decodes any byte string.
pub fn candidates_for_record(record: &NameRecord) -> Vec<Candidate> {
    let probe = Probe {
        record,
        declared: declared_charset(record.platform_id, record.encoding_id),
    };

    let mut r: Vec<Candidate> = Vec::new();
    for rule in RULES.iter().filter(|rule| (rule.matches)(&probe)) {
        for pick in rule.picks {
            let candidate = match *pick {
                Pick::Fixed(c) => Some(c),
                Pick::Declared(framing, source) => probe
                    .declared
                    .map(|charset| Candidate::framed(charset, framing, source)),
                Pick::Language => MAC_LANGUAGE_CHARSETS
                    .get(&record.language_id)
                    .map(|charset| Candidate::new(*charset, Source::Language)),
            };
            let Some(candidate) = candidate else {
                continue;
            };
            if !r
                .iter()
                .any(|c| c.charset == candidate.charset && c.framing == candidate.framing)
            {
                r.push(candidate);
            }
        }
    }
    r
}

/// Candidates by IDs alone, as for a record without content.
pub fn candidates_for(platform: u16, encoding: u16, language: u16) -> Vec<Candidate> {
    candidates_for_record(&NameRecord::new(platform, encoding, language, 0, &[]))
}
