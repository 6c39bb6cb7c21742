//! Case Reference Generation
//!
//! Display reference for a submitted report: `INC-<year>-<6 digits>`.
//! Generated once per submission, not persisted and not checked for
//! collisions.

use chrono::{Datelike, Local};
use rand::Rng;

/// Generate a fresh case reference for the current year
pub fn generate() -> String {
    let serial: u32 = rand::rng().random_range(0..=999_999);
    format!("INC-{}-{:06}", Local::now().year(), serial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_case_reference_format() {
        let pattern = Regex::new(r"^INC-\d{4}-\d{6}$").unwrap();
        for _ in 0..200 {
            let reference = generate();
            assert!(pattern.is_match(&reference), "bad reference: {reference}");
        }
    }

    #[test]
    fn test_case_reference_uses_current_year() {
        let year = Local::now().year().to_string();
        let reference = generate();
        assert_eq!(&reference[4..8], year.as_str());
    }
}
