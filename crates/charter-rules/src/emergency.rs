//! # Extraordinary Measures
//!
//! Limits on martial law, the state of emergency and the state of natural
//! disaster (Art. 228–232).
//!
//! | Measure              | Initial limit | Extension                          |
//! |----------------------|---------------|------------------------------------|
//! | martial law          | none          | not applicable                     |
//! | state of emergency   | 90 days       | once, up to 60 days, Sejm consent  |
//! | natural disaster     | 30 days       | not handled here                   |
//!
//! While any measure is in force the Constitution and the electoral
//! statutes may not be amended (Art. 228(6)). No election may be held
//! during the measure or within 90 days after it ends (Art. 228(7)).

use chrono::NaiveDate;

use charter_core::{Article, Citation, EmergencyDeclaration, EmergencyKind, Violation};

const ART_228_6: Article = Article::cite("228(6)");
const ART_228_7: Article = Article::cite("228(7)");
const ART_229: Article = Article::cite("229");
const ART_230_1: Article = Article::cite("230(1)");
const ART_230_2: Article = Article::cite("230(2)");
const ART_232: Article = Article::cite("232");

/// Longest extension of a state of emergency (Art. 230(2)).
pub const EMERGENCY_MAX_EXTENSION_DAYS: u32 = 60;

/// Days after a measure ends during which no election may be held
/// (Art. 228(7)).
pub const ELECTION_QUIET_PERIOD_DAYS: i64 = 90;

fn refused(article: Article, message: String) -> Result<(), Violation> {
    Err(Violation::EmergencyPower(Citation::new(article, message)))
}

fn governing_article(kind: EmergencyKind) -> Article {
    match kind {
        EmergencyKind::MartialLaw => ART_229,
        EmergencyKind::StateOfEmergency => ART_230_1,
        EmergencyKind::NaturalDisaster => ART_232,
    }
}

/// Check the declared length of a measure (Art. 229, 230(1), 232).
pub fn validate_emergency_declaration(decl: &EmergencyDeclaration) -> Result<(), Violation> {
    let article = governing_article(decl.kind);
    if decl.duration_days == 0 {
        return refused(article, format!("a {} must last at least one day", decl.kind));
    }
    match decl.kind.max_initial_days() {
        Some(max) if decl.duration_days > max => refused(
            article,
            format!(
                "a {} may be declared for at most {max} days, got {}",
                decl.kind, decl.duration_days
            ),
        ),
        _ => Ok(()),
    }
}

/// Check an extension of a state of emergency (Art. 230(2)).
///
/// Only a state of emergency may be extended, only once, by at most 60
/// days, and only with the consent of the Sejm. `previous_extensions`
/// counts extensions already granted for this declaration.
pub fn validate_emergency_extension(
    decl: &EmergencyDeclaration,
    extension_days: u32,
    sejm_consent: bool,
    previous_extensions: u32,
) -> Result<(), Violation> {
    if decl.kind != EmergencyKind::StateOfEmergency {
        return refused(
            ART_230_2,
            format!("only a state of emergency may be extended, not a {}", decl.kind),
        );
    }
    if previous_extensions > 0 {
        return refused(
            ART_230_2,
            "a state of emergency may be extended only once".to_string(),
        );
    }
    if extension_days == 0 || extension_days > EMERGENCY_MAX_EXTENSION_DAYS {
        return refused(
            ART_230_2,
            format!(
                "an extension must last 1 to {EMERGENCY_MAX_EXTENSION_DAYS} days, got {extension_days}"
            ),
        );
    }
    if !sejm_consent {
        return refused(
            ART_230_2,
            "an extension requires the consent of the Sejm".to_string(),
        );
    }
    Ok(())
}

/// No constitutional or electoral amendment while a measure is in force
/// (Art. 228(6)).
pub fn check_amendment_permitted(
    decl: &EmergencyDeclaration,
    on: NaiveDate,
) -> Result<(), Violation> {
    if decl.in_force_on(on) {
        return refused(
            ART_228_6,
            format!(
                "the Constitution may not be amended while a {} is in force ({on})",
                decl.kind
            ),
        );
    }
    Ok(())
}

/// No election during a measure or within 90 days after it ends
/// (Art. 228(7)).
///
/// The day after the last day in force counts as day 0; an election on
/// day 90 or later is permitted.
pub fn check_election_permitted(
    decl: &EmergencyDeclaration,
    election_date: NaiveDate,
) -> Result<(), Violation> {
    if decl.in_force_on(election_date) {
        return refused(
            ART_228_7,
            format!("no election may be held while a {} is in force", decl.kind),
        );
    }
    match decl.days_since_end(election_date) {
        Some(elapsed) if elapsed < ELECTION_QUIET_PERIOD_DAYS => refused(
            ART_228_7,
            format!(
                "no election within {ELECTION_QUIET_PERIOD_DAYS} days after a {} ends; {elapsed} days have passed",
                decl.kind
            ),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::ViolationKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn declaration(kind: EmergencyKind, days: u32) -> EmergencyDeclaration {
        EmergencyDeclaration {
            kind,
            start_date: date(2024, 1, 1),
            duration_days: days,
            reason: "flooding".into(),
        }
    }

    #[test]
    fn test_initial_limits() {
        assert!(validate_emergency_declaration(&declaration(EmergencyKind::StateOfEmergency, 90)).is_ok());
        let err =
            validate_emergency_declaration(&declaration(EmergencyKind::StateOfEmergency, 91))
                .unwrap_err();
        assert_eq!(err.kind(), ViolationKind::EmergencyPower);
        assert_eq!(err.article().as_str(), "230(1)");

        let err = validate_emergency_declaration(&declaration(EmergencyKind::NaturalDisaster, 31))
            .unwrap_err();
        assert_eq!(err.article().as_str(), "232");
        assert!(validate_emergency_declaration(&declaration(EmergencyKind::MartialLaw, 400)).is_ok());
        assert!(validate_emergency_declaration(&declaration(EmergencyKind::MartialLaw, 0)).is_err());
    }

    #[test]
    fn test_extension_rules() {
        let soe = declaration(EmergencyKind::StateOfEmergency, 90);
        assert!(validate_emergency_extension(&soe, 60, true, 0).is_ok());
        assert!(validate_emergency_extension(&soe, 61, true, 0).is_err());
        assert!(validate_emergency_extension(&soe, 30, false, 0).is_err());
        assert!(validate_emergency_extension(&soe, 30, true, 1).is_err());
        let disaster = declaration(EmergencyKind::NaturalDisaster, 30);
        let err = validate_emergency_extension(&disaster, 10, true, 0).unwrap_err();
        assert_eq!(err.article().as_str(), "230(2)");
    }

    #[test]
    fn test_no_amendment_during_measure() {
        let decl = declaration(EmergencyKind::NaturalDisaster, 30);
        assert!(check_amendment_permitted(&decl, date(2023, 12, 31)).is_ok());
        let err = check_amendment_permitted(&decl, date(2024, 1, 30)).unwrap_err();
        assert_eq!(err.article().as_str(), "228(6)");
        assert!(check_amendment_permitted(&decl, date(2024, 1, 31)).is_ok());
    }

    #[test]
    fn test_election_quiet_period() {
        // In force 2024-01-01 ..= 2024-01-30; day 0 after it is 2024-01-31.
        let decl = declaration(EmergencyKind::NaturalDisaster, 30);
        assert!(check_election_permitted(&decl, date(2024, 1, 15)).is_err());
        let err = check_election_permitted(&decl, date(2024, 4, 29)).unwrap_err();
        assert_eq!(err.article().as_str(), "228(7)");
        assert!(check_election_permitted(&decl, date(2024, 4, 30)).is_ok());
    }
}
