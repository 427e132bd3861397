//! # Courts and the Constitutional Tribunal
//!
//! Judges are appointed by the President on the motion of the National
//! Council of the Judiciary (Art. 179). The Constitutional Tribunal has 15
//! judges chosen for a single nine-year term (Art. 194(1)).

use charter_core::{Article, Citation, Judge, Violation};

use crate::failures;

/// Judges of the Constitutional Tribunal (Art. 194(1)).
pub const TRIBUNAL_BENCH_SIZE: u32 = 15;

/// Term of a Tribunal judge in years (Art. 194(1)).
pub const TRIBUNAL_TERM_YEARS: u32 = 9;

const ART_179: Article = Article::cite("179");
const ART_194_1: Article = Article::cite("194(1)");

/// Check the appointment procedure of a judge (Art. 179).
pub fn check_judicial_appointment(judge: &Judge) -> Result<(), Violation> {
    let conditions = [
        (
            !judge.appointed_by_president,
            "not appointed by the President".to_string(),
        ),
        (
            !judge.krs_nominated,
            "not proposed by the National Council of the Judiciary".to_string(),
        ),
    ];
    match failures(&conditions) {
        None => Ok(()),
        Some(reasons) => Err(Violation::Judicial(Citation::new(
            ART_179,
            format!("appointment of {} invalid: {reasons}", judge.name),
        ))),
    }
}

/// Check the composition and term of the Constitutional Tribunal
/// (Art. 194(1)).
pub fn check_tribunal_bench(judges: u32, term_years: u32) -> Result<(), Violation> {
    let conditions = [
        (
            judges != TRIBUNAL_BENCH_SIZE,
            format!("the Tribunal has {TRIBUNAL_BENCH_SIZE} judges, got {judges}"),
        ),
        (
            term_years != TRIBUNAL_TERM_YEARS,
            format!("judges serve {TRIBUNAL_TERM_YEARS} years, got {term_years}"),
        ),
    ];
    match failures(&conditions) {
        None => Ok(()),
        Some(reasons) => Err(Violation::Tribunal(Citation::new(ART_194_1, reasons))),
    }
}
