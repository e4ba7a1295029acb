//! Read name records out of font files and font collections.

use crate::{record::NameRecord, select::Selector};
use ttf_parser::{name, Face, FaceParsingError};

/// Error may returned reading a font.
#[derive(PartialEq, Eq, Debug, Clone, Copy, thiserror::Error)]
pub enum FontError {
    #[error("Parse font failed: {0}")]
    Face(#[from] FaceParsingError),

    #[error("Malformed name table")]
    MalformedNameTable,

    #[error("Font has no name table")]
    MissingNameTable,

    #[error("Face index {index} out of range, font has {count} face(s)")]
    FaceIndexOutOfRange { index: u32, count: u32 },
}

pub type Result<T> = std::result::Result<T, FontError>;

/// Records of a raw `name` table.
pub fn read_name_table(data: &[u8]) -> Result<Vec<NameRecord<'_>>> {
    let table = name::Table::parse(data).ok_or(FontError::MalformedNameTable)?;
    Ok(table.names.into_iter().map(NameRecord::from).collect())
}

/// Number of faces in `data`, 1 unless it is a TTC/OTC collection.
pub fn face_count(data: &[u8]) -> u32 {
    ttf_parser::fonts_in_collection(data).unwrap_or(1)
}

/// Name records of face `index`, `index` is 0 for a plain font.
pub fn read_font(data: &[u8], index: u32) -> Result<Vec<NameRecord<'_>>> {
    let count = face_count(data);
    if index >= count {
        return Err(FontError::FaceIndexOutOfRange { index, count });
    }

    let face = Face::parse(data, index)?;
    if face.tables().name.is_none() {
        return Err(FontError::MissingNameTable);
    }
    Ok(face.names().into_iter().map(NameRecord::from).collect())
}

/// Display name of each face of a font or font collection.
pub fn display_names(data: &[u8], selector: &Selector) -> Result<Vec<String>> {
    (0..face_count(data))
        .map(|index| {
            let records = read_font(data, index)?;
            let name = selector.display_name(&records);
            if name.is_empty() {
                log::warn!("face {} has no display name", index);
            }
            Ok(name)
        })
        .collect()
}

/// Display names of all faces, joined by the selector separator. Faces
/// without a display name are left out.
pub fn joined_display_name(data: &[u8], selector: &Selector) -> Result<String> {
    let names = display_names(data, selector)?;
    Ok(names
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(selector.separator()))
}
