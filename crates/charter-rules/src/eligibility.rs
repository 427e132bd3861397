//! # Eligibility for Elected Office
//!
//! Passive electoral rights to the Sejm and Senate (Art. 99) and to the
//! presidency (Art. 127). Age is measured on election day.
//!
//! A final conviction to imprisonment for an intentional crime prosecuted
//! ex officio (Art. 99(3)) removes passive rights to both chambers and
//! means the person lacks the full electoral rights Art. 127(3) requires.

use chrono::NaiveDate;

use charter_core::{Article, Citation, Citizen, Violation};

use crate::failures;

/// Minimum age of a Deputy (Art. 99(1)).
pub const SEJM_MIN_AGE: u32 = 21;

/// Minimum age of a Senator (Art. 99(2)).
pub const SENATE_MIN_AGE: u32 = 30;

/// Minimum age of the President (Art. 127(3)).
pub const PRESIDENT_MIN_AGE: u32 = 35;

/// Citizens who must nominate a presidential candidate (Art. 127(3)).
pub const PRESIDENT_MIN_SIGNATURES: u64 = 100_000;

/// The President may be re-elected only once (Art. 127(2)).
pub const MAX_PRESIDENTIAL_TERMS: u32 = 2;

const ART_99_1: Article = Article::cite("99(1)");
const ART_99_2: Article = Article::cite("99(2)");
const ART_127_2: Article = Article::cite("127(2)");
const ART_127_3: Article = Article::cite("127(3)");

fn chamber_conditions(citizen: &Citizen, on: NaiveDate, min_age: u32) -> Vec<(bool, String)> {
    let age = citizen.age_on(on);
    vec![
        (!citizen.polish_citizen, "must be a Polish citizen".to_string()),
        (age < min_age, format!("must be at least {min_age} (is {age})")),
        (
            citizen.criminal_record,
            "convicted by final judgment for an intentional crime prosecuted ex officio (Art. 99(3))"
                .to_string(),
        ),
    ]
}

/// Passive electoral right to the Sejm (Art. 99(1), (3)).
pub fn check_sejm_eligibility(citizen: &Citizen, election_date: NaiveDate) -> Result<(), Violation> {
    match failures(&chamber_conditions(citizen, election_date, SEJM_MIN_AGE)) {
        None => Ok(()),
        Some(reasons) => Err(Violation::Eligibility(Citation::new(
            ART_99_1,
            format!("{} ineligible for the Sejm: {reasons}", citizen.name),
        ))),
    }
}

/// Passive electoral right to the Senate (Art. 99(2), (3)).
pub fn check_senate_eligibility(
    citizen: &Citizen,
    election_date: NaiveDate,
) -> Result<(), Violation> {
    match failures(&chamber_conditions(citizen, election_date, SENATE_MIN_AGE)) {
        None => Ok(()),
        Some(reasons) => Err(Violation::Eligibility(Citation::new(
            ART_99_2,
            format!("{} ineligible for the Senate: {reasons}", citizen.name),
        ))),
    }
}

/// Eligibility for the presidency (Art. 127(3)).
///
/// `signatures` counts citizens with Sejm voting rights who nominated the
/// candidate.
pub fn check_presidential_eligibility(
    citizen: &Citizen,
    election_date: NaiveDate,
    signatures: u64,
) -> Result<(), Violation> {
    let age = citizen.age_on(election_date);
    let conditions = [
        (!citizen.polish_citizen, "must be a Polish citizen".to_string()),
        (
            age < PRESIDENT_MIN_AGE,
            format!("must be at least {PRESIDENT_MIN_AGE} (is {age})"),
        ),
        (
            citizen.criminal_record,
            "lacks full electoral rights to the Sejm (Art. 99(3))".to_string(),
        ),
        (
            signatures < PRESIDENT_MIN_SIGNATURES,
            format!("needs at least {PRESIDENT_MIN_SIGNATURES} signatures (has {signatures})"),
        ),
    ];
    match failures(&conditions) {
        None => Ok(()),
        Some(reasons) => Err(Violation::Eligibility(Citation::new(
            ART_127_3,
            format!("{} ineligible for the presidency: {reasons}", citizen.name),
        ))),
    }
}

/// Whether a candidate who already served `consecutive_terms` may run
/// again (Art. 127(2)).
pub fn check_presidential_term(consecutive_terms: u32) -> Result<(), Violation> {
    if consecutive_terms < MAX_PRESIDENTIAL_TERMS {
        return Ok(());
    }
    Err(Violation::Eligibility(Citation::new(
        ART_127_2,
        format!(
            "the President may serve at most {MAX_PRESIDENTIAL_TERMS} terms; already served {consecutive_terms}"
        ),
    )))
}
