//! Lecture series data structure.

use serde::{Deserialize, Serialize};

/// One recorded lecture series as published on the video portal.
///
/// `department` and `year` are derived from fixed positional segments of the
/// series URL, never from descriptor content. A record is created once per
/// unique URL and not mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesRecord {
    /// Series title from the descriptor
    pub title: Option<String>,

    /// Series description from the descriptor
    pub description: Option<String>,

    /// Department code (raw URL segment 4)
    pub department: String,

    /// Academic year (raw URL segment 5)
    pub year: String,

    /// Number of recorded episodes
    pub episode_count: usize,

    /// Comma-joined creator names, when the descriptor carries any
    pub lecturer: Option<String>,

    /// Series page URL; unique key of the dataset
    pub url: String,

    /// True iff the descriptor's protection token equals `"NONE"`
    pub accessible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_round_trip() {
        let record = SeriesRecord {
            title: Some("Quantum Mechanics I".to_string()),
            description: None,
            department: "d-phys".to_string(),
            year: "2018".to_string(),
            episode_count: 13,
            lecturer: Some("A. Lecturer".to_string()),
            url: "https://video.example/lectures/d-phys/2018/autumn/001.html".to_string(),
            accessible: true,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: SeriesRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
