use serde::Deserialize;

/// A mark as it appears in the export: a JSON number or a locale-formatted string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawMark {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalDocument {
    pub semester: u32,
    #[serde(default)]
    pub units: Vec<RawUnit>,
    #[serde(default)]
    pub marks: Vec<RawMarkRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUnit {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub courses: Vec<RawCourse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCourse {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub assessments: Vec<RawAssessment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAssessment {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Score distribution published for one assessment, keyed by assessment id.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMarkRecord {
    pub key: String,
    #[serde(default)]
    pub subject: Option<RawMark>,
    #[serde(default)]
    pub scores: Vec<RawMark>,
}
