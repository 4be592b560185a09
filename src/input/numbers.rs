use crate::input::document::RawMark;

/// Parses a mark as published, accepting `12,5` as well as `12.5`.
pub fn parse_mark_str(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty mark".to_string());
    }
    let normalized = trimmed.replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| format!("invalid mark {trimmed:?}"))?;
    if !value.is_finite() {
        return Err(format!("non-finite mark {trimmed:?}"));
    }
    Ok(value)
}

pub fn parse_mark(raw: &RawMark) -> Result<f64, String> {
    match raw {
        RawMark::Number(v) => Ok(*v),
        RawMark::Text(s) => parse_mark_str(s),
    }
}

/// `None` when the subject did not sit the assessment.
pub fn parse_subject_mark(raw: Option<&RawMark>) -> Result<Option<f64>, String> {
    match raw {
        None => Ok(None),
        Some(RawMark::Text(s)) if is_absent_marker(s) => Ok(None),
        Some(mark) => parse_mark(mark).map(Some),
    }
}

pub fn parse_marks(raw: &[RawMark]) -> Result<Vec<f64>, String> {
    raw.iter().map(parse_mark).collect()
}

fn is_absent_marker(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t == "-"
}
