//! Compose a display name from all name records of a font.

use crate::{
    record::{name_id, NameRecord, WritingSystem},
    score::{decode_name, DecodeResult, IssueLevel},
};

/// Which kind of name to display. Each class lists name IDs to try in
/// order, the first ID present in any record is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameClass {
    /// Typographic family, falls back to legacy family.
    #[default]
    TypographicFamily,
    Family,
    FullName,
    /// Typographic subfamily, falls back to legacy subfamily.
    TypographicSubfamily,
}

impl NameClass {
    pub fn name_ids(self) -> &'static [u16] {
        match self {
            Self::TypographicFamily => &[name_id::TYPOGRAPHIC_FAMILY, name_id::FAMILY],
            Self::Family => &[name_id::FAMILY],
            Self::FullName => &[name_id::FULL_NAME],
            Self::TypographicSubfamily => &[name_id::TYPOGRAPHIC_SUBFAMILY, name_id::SUBFAMILY],
        }
    }
}

/// Default order of writing systems in a display name.
pub const DEFAULT_PREFERENCE: [WritingSystem; 5] = [
    WritingSystem::SimplifiedChinese,
    WritingSystem::TraditionalChinese,
    WritingSystem::Japanese,
    WritingSystem::Korean,
    WritingSystem::Western,
];

pub const DEFAULT_SEPARATOR: &str = " & ";

/// Builds display names out of name records.
///
/// ```
/// use fontname::{NameClass, Selector, WritingSystem};
///
/// let selector = Selector::new()
///     .with_class(NameClass::FullName)
///     .with_separator(" / ")
///     .with_preference([WritingSystem::Western]);
/// assert_eq!("", selector.display_name(&[]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    class: NameClass,
    separator: String,
    preference: Vec<WritingSystem>,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            class: NameClass::default(),
            separator: DEFAULT_SEPARATOR.to_owned(),
            preference: DEFAULT_PREFERENCE.to_vec(),
        }
    }
}

/// Best decoded record of one writing system.
struct Group {
    writing_system: WritingSystem,
    result: DecodeResult,
    unicode: bool,
}

impl Group {
    fn better_than(&self, other: &Group) -> bool {
        self.result.issue < other.result.issue
            || (self.result.issue == other.result.issue && self.unicode && !other.unicode)
    }
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: NameClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Writing systems not listed follow the listed ones, in the order
    /// first seen.
    pub fn with_preference(mut self, order: impl IntoIterator<Item = WritingSystem>) -> Self {
        self.preference = order.into_iter().collect();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Records of the first name ID of the class that has any.
    fn filter<'a, 'b>(&self, records: &'b [NameRecord<'a>]) -> Vec<&'b NameRecord<'a>> {
        self.class
            .name_ids()
            .iter()
            .map(|id| records.iter().filter(|r| r.name_id == *id).collect::<Vec<_>>())
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }

    fn groups(&self, records: &[NameRecord]) -> Vec<Group> {
        let mut groups: Vec<Group> = Vec::new();
        for record in self.filter(records) {
            let group = Group {
                writing_system: record.writing_system(),
                result: decode_name(record),
                unicode: record.is_unicode(),
            };
            match groups
                .iter_mut()
                .find(|g| g.writing_system == group.writing_system)
            {
                Some(g) => {
                    if group.better_than(g) {
                        *g = group;
                    }
                }
                None => groups.push(group),
            }
        }

        // stable, unlisted writing systems keep the order first seen
        groups.sort_by_key(|g| {
            self.preference
                .iter()
                .position(|ws| *ws == g.writing_system)
                .unwrap_or(self.preference.len())
        });
        groups
    }

    /// Decoded names, one per writing system, ordered and deduplicated.
    /// Names that fail to decode are left out.
    pub fn display_names(&self, records: &[NameRecord]) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut r = Vec::new();
        for group in self.groups(records) {
            if group.result.issue == IssueLevel::Fail {
                continue;
            }
            let key = normalize(&group.result.text);
            if seen.contains(&key) {
                continue;
            }
            log::debug!(
                "{} name: {:?} ({})",
                group.writing_system,
                group.result.text,
                group.result.issue
            );
            seen.push(key);
            r.push(group.result.text);
        }
        r
    }

    pub fn display_name(&self, records: &[NameRecord]) -> String {
        self.display_names(records).join(&self.separator)
    }
}

/// Case and whitespace insensitive form of a name.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Display name of a font out of its name records, each writing system
/// joined by `" & "`.
pub fn get_display_name(records: &[NameRecord]) -> String {
    Selector::default().display_name(records)
}
