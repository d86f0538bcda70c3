//! Course catalogue data structure.

use serde::{Deserialize, Serialize};

/// One catalogued course as listed in the official course catalogue.
///
/// Deduplicated by full-record equality across an entire correlator run,
/// not just within one year/semester partition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CourseRecord {
    /// Course number (e.g., "402-0810-00L")
    pub number: String,

    /// Course title
    pub title: String,

    /// Academic year of the query that found the course
    pub year: String,

    /// Credit points as printed in the catalogue
    pub credits: String,

    /// Course-type marker (lecture, recitation, ...)
    pub course_type: String,

    /// Department code mapped from the catalogue display name
    pub department: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample() -> CourseRecord {
        CourseRecord {
            number: "402-0810-00L".to_string(),
            title: "Computational Quantum Physics".to_string(),
            year: "2018".to_string(),
            credits: "8".to_string(),
            course_type: "V".to_string(),
            department: "d-phys".to_string(),
        }
    }

    #[test]
    fn identical_records_hash_equal() {
        let mut set = HashSet::new();
        assert!(set.insert(sample()));
        assert!(!set.insert(sample()));
    }

    #[test]
    fn differing_year_is_a_distinct_record() {
        let mut other = sample();
        other.year = "2019".to_string();
        let mut set = HashSet::new();
        assert!(set.insert(sample()));
        assert!(set.insert(other));
    }
}
