//! # Parliament
//!
//! Incompatibility of the mandate (Art. 103, applied to Senators by
//! Art. 108), parliamentary immunity (Art. 105), and the nationwide
//! referendum (Art. 125).

use charter_core::{Article, Chamber, Citation, ReferendumResult, Violation};

const ART_103: Article = Article::cite("103");
const ART_105: Article = Article::cite("105");
const ART_125: Article = Article::cite("125");
const ART_125_3: Article = Article::cite("125(3)");

/// Offices that may not be held jointly with a parliamentary mandate.
pub const INCOMPATIBLE_OFFICES: &[&str] = &[
    "Senator",
    "President of the National Bank of Poland",
    "President of the Supreme Chamber of Control",
    "Commissioner for Citizens' Rights",
    "Commissioner for Children's Rights",
    "Member of the Council for Monetary Policy",
    "Member of the National Council of Radio Broadcasting and Television",
    "Ambassador",
    "Civil servant",
    "Soldier on active duty",
    "Police officer",
    "Security services officer",
];

/// Whether `office` may be held by a Deputy or Senator (Art. 103(1)).
///
/// Matching ignores case and surrounding whitespace.
pub fn check_incompatibility(office: &str) -> Result<(), Violation> {
    let wanted = office.trim();
    let hit = INCOMPATIBLE_OFFICES
        .iter()
        .find(|listed| listed.eq_ignore_ascii_case(wanted));
    match hit {
        None => Ok(()),
        Some(listed) => Err(Violation::Incompatibility {
            citation: Citation::new(
                ART_103,
                format!("a parliamentary mandate cannot be held jointly with the office of {listed}"),
            ),
            office: (*listed).to_string(),
        }),
    }
}

/// Whether a member of `chamber` may be prosecuted (Art. 105(2), 108).
///
/// Criminal accountability requires the consent of the member's chamber.
pub fn check_parliamentary_immunity(chamber: Chamber, consent_given: bool) -> Result<(), Violation> {
    match chamber {
        Chamber::Sejm | Chamber::Senate if consent_given => Ok(()),
        Chamber::Sejm | Chamber::Senate => Err(Violation::Immunity(Citation::new(
            ART_105,
            format!("criminal prosecution requires the consent of the {chamber}"),
        ))),
        Chamber::Electorate => Err(Violation::Immunity(Citation::new(
            ART_105,
            "parliamentary immunity belongs to Deputies and Senators only",
        ))),
    }
}

/// Result of a nationwide referendum (Art. 125(3)).
///
/// Binding when more than half of those eligible took part, then carried
/// by more votes for than against.
pub fn validate_referendum(result: &ReferendumResult) -> Result<(), Violation> {
    if result.eligible == 0 {
        return Err(Violation::Referendum(Citation::new(
            ART_125,
            "the number of eligible voters must be positive",
        )));
    }
    let turnout = u128::from(result.votes_for) + u128::from(result.votes_against);
    if turnout * 2 <= u128::from(result.eligible) {
        return Err(Violation::Referendum(Citation::new(
            ART_125_3,
            format!(
                "not binding: turnout {turnout} of {} does not exceed half",
                result.eligible
            ),
        )));
    }
    if result.votes_for <= result.votes_against {
        return Err(Violation::Referendum(Citation::new(
            ART_125,
            format!(
                "rejected: {} for, {} against",
                result.votes_for, result.votes_against
            ),
        )));
    }
    Ok(())
}
