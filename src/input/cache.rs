use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::input::InputError;
use crate::input::document::RawMarkRecord;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Retrieved mark data for one export, looked up by assessment id.
///
/// Passed explicitly to whatever builds assessments so several exports can be
/// processed side by side.
#[derive(Debug, Clone, Default)]
pub struct MarksTable {
    by_key: HashMap<String, RawMarkRecord>,
}

impl MarksTable {
    /// Later records with an already-seen key are ignored.
    pub fn from_records(records: Vec<RawMarkRecord>) -> Self {
        let mut by_key = HashMap::with_capacity(records.len());
        for record in records {
            if by_key.contains_key(&record.key) {
                tracing::warn!(key = %record.key, "duplicate mark record; keeping first");
                continue;
            }
            by_key.insert(record.key.clone(), record);
        }
        Self { by_key }
    }

    pub fn get(&self, key: &str) -> Option<&RawMarkRecord> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
