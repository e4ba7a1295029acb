//! Raw name records, as stored in the `name` table.

/// [Platform IDs](https://learn.microsoft.com/en-us/typography/opentype/spec/name#platform-ids)
pub mod platform_id {
    pub const UNICODE: u16 = 0;
    pub const MACINTOSH: u16 = 1;
    pub const ISO: u16 = 2;
    pub const WINDOWS: u16 = 3;
    pub const CUSTOM: u16 = 4;
}

/// [Name IDs](https://learn.microsoft.com/en-us/typography/opentype/spec/name#name-ids)
/// used to pick display names.
pub mod name_id {
    pub const FAMILY: u16 = 1;
    pub const SUBFAMILY: u16 = 2;
    pub const FULL_NAME: u16 = 4;
    pub const TYPOGRAPHIC_FAMILY: u16 = 16;
    pub const TYPOGRAPHIC_SUBFAMILY: u16 = 17;
}

/// Macintosh language codes of the CJK scripts.
pub mod mac_language {
    pub const ENGLISH: u16 = 0;
    pub const JAPANESE: u16 = 11;
    pub const CHINESE_TRADITIONAL: u16 = 19;
    pub const KOREAN: u16 = 23;
    pub const CHINESE_SIMPLIFIED: u16 = 33;
}

/// One record of the `name` table, borrowed from font data.
///
/// `raw` is the string exactly as stored, nothing is decoded ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRecord<'a> {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub raw: &'a [u8],
}

impl<'a> NameRecord<'a> {
    pub fn new(
        platform_id: u16,
        encoding_id: u16,
        language_id: u16,
        name_id: u16,
        raw: &'a [u8],
    ) -> Self {
        Self {
            platform_id,
            encoding_id,
            language_id,
            name_id,
            raw,
        }
    }

    /// True if the platform mandates UTF-16BE, and no guessing is needed.
    pub fn is_unicode(&self) -> bool {
        match self.platform_id {
            platform_id::UNICODE => true,
            // Symbol, Unicode BMP, Unicode full repertoire
            platform_id::WINDOWS => matches!(self.encoding_id, 0 | 1 | 10),
            // ISO 10646
            platform_id::ISO => self.encoding_id == 1,
            _ => false,
        }
    }

    pub fn writing_system(&self) -> WritingSystem {
        WritingSystem::of(self.platform_id, self.language_id)
    }
}

impl<'a> From<ttf_parser::name::Name<'a>> for NameRecord<'a> {
    fn from(name: ttf_parser::name::Name<'a>) -> Self {
        use ttf_parser::PlatformId;

        let platform_id = match name.platform_id {
            PlatformId::Unicode => platform_id::UNICODE,
            PlatformId::Macintosh => platform_id::MACINTOSH,
            PlatformId::Iso => platform_id::ISO,
            PlatformId::Windows => platform_id::WINDOWS,
            PlatformId::Custom => platform_id::CUSTOM,
        };
        Self::new(
            platform_id,
            name.encoding_id,
            name.language_id,
            name.name_id,
            name.name,
        )
    }
}

/// Script a name record is expected to be written in.
///
/// Records of the same writing system carry the same text in different
/// encodings, records of different writing systems are translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum WritingSystem {
    #[strum(serialize = "zh-Hans")]
    SimplifiedChinese,
    #[strum(serialize = "zh-Hant")]
    TraditionalChinese,
    #[strum(serialize = "ja")]
    Japanese,
    #[strum(serialize = "ko")]
    Korean,
    #[strum(serialize = "latn")]
    Western,
}

impl WritingSystem {
    pub fn of(platform: u16, language: u16) -> Self {
        match platform {
            platform_id::WINDOWS => Self::from_windows_lcid(language),
            platform_id::MACINTOSH => Self::from_mac_language(language),
            _ => Self::Western,
        }
    }

    fn from_windows_lcid(lcid: u16) -> Self {
        const PRIMARY_CHINESE: u16 = 0x04;
        const PRIMARY_JAPANESE: u16 = 0x11;
        const PRIMARY_KOREAN: u16 = 0x12;

        match lcid & 0x3ff {
            // PRC 0x0804, Singapore 0x1004; Taiwan, Hong Kong and Macao
            // are traditional
            PRIMARY_CHINESE => match lcid {
                0x0804 | 0x1004 => Self::SimplifiedChinese,
                _ => Self::TraditionalChinese,
            },
            PRIMARY_JAPANESE => Self::Japanese,
            PRIMARY_KOREAN => Self::Korean,
            _ => Self::Western,
        }
    }

    fn from_mac_language(language: u16) -> Self {
        match language {
            mac_language::CHINESE_SIMPLIFIED => Self::SimplifiedChinese,
            mac_language::CHINESE_TRADITIONAL => Self::TraditionalChinese,
            mac_language::JAPANESE => Self::Japanese,
            mac_language::KOREAN => Self::Korean,
            _ => Self::Western,
        }
    }
}
