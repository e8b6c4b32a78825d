//! System font lookup
//!
//! Uses fontdb to find an installed face by family name, falling back to the
//! generic sans-serif family.

use crate::font::FontFace;
use crate::{Result, TextError};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use std::sync::Arc;

/// Load a regular-weight system face by family name
///
/// `None` asks for the generic sans-serif family. A named family that isn't
/// installed also falls back to sans-serif before giving up.
pub fn load_system_face(family: Option<&str>) -> Result<Arc<FontFace>> {
    let mut db = Database::new();
    db.load_system_fonts();
    tracing::debug!("System fonts loaded: {} faces", db.faces().count());

    let id = family
        .and_then(|name| find_face_id(&db, Family::Name(name)))
        .or_else(|| {
            if let Some(name) = family {
                tracing::warn!("Font '{}' not found, using sans-serif", name);
            }
            find_face_id(&db, Family::SansSerif)
        })
        .ok_or_else(|| TextError::FontNotFound(family.unwrap_or("sans-serif").to_string()))?;

    let (data, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| TextError::FontLoadError("Font source not found".to_string()))?;

    let face = FontFace::from_data_with_index(data, index)?;
    tracing::debug!("Loaded system face '{}'", face.family_name());
    Ok(Arc::new(face))
}

fn find_face_id(db: &Database, family: Family<'_>) -> Option<fontdb::ID> {
    let families = [family];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        style: Style::Normal,
        stretch: Stretch::Normal,
    };
    db.query(&query)
}
