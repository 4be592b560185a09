use std::path::Path;

use thiserror::Error;

use crate::model::errors::RankError;
use crate::model::profile::ProfileOverrides;

pub mod cache;
pub mod document;
pub mod numbers;

use cache::open_maybe_gz;
use document::PortalDocument;

pub const MIN_SEMESTER: u32 = 1;
pub const MAX_SEMESTER: u32 = 10;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Rank(#[from] RankError),
}

/// Reads a portal export (`.json` or `.json.gz`).
pub fn load_input(path: &Path) -> Result<PortalDocument, InputError> {
    let reader = open_maybe_gz(path)?;
    let mut doc: PortalDocument = serde_json::from_reader(reader)?;

    if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&doc.semester) {
        return Err(InputError::InvalidInput(format!(
            "semester must lie in {MIN_SEMESTER}..={MAX_SEMESTER}, got {}",
            doc.semester
        )));
    }

    drop_bonus_courses(&mut doc);

    tracing::info!(
        path = %path.display(),
        semester = doc.semester,
        units = doc.units.len(),
        marks = doc.marks.len(),
        "loaded portal export"
    );
    Ok(doc)
}

/// Reads a JSON params file such as `{"rounding": "pessimistic"}`.
pub fn load_params(path: &Path) -> Result<ProfileOverrides, InputError> {
    let reader = open_maybe_gz(path)?;
    let overrides = serde_json::from_reader(reader)?;
    tracing::debug!(path = %path.display(), "loaded params file");
    Ok(overrides)
}

/// Bonus lines carry an id ending in `_0` and never hold graded work.
fn drop_bonus_courses(doc: &mut PortalDocument) {
    for unit in &mut doc.units {
        unit.courses.retain(|course| {
            let bonus = course.id.ends_with("_0");
            if bonus {
                tracing::debug!(unit = %unit.id, course = %course.id, "skipping bonus course");
            }
            !bonus
        });
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
