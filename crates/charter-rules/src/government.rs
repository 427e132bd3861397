//! # Accountability of the Council of Ministers
//!
//! The constructive vote of no confidence (Art. 158), the vote of no
//! confidence in a single minister (Art. 159), and indictment of a member
//! of the Council of Ministers before the State Tribunal (Art. 156).
//!
//! Every vote here is measured against the statutory number of Deputies,
//! not the votes cast.

use charter_core::{
    evaluate_majority_cited, Article, Chamber, Citation, Majority, MinisterNoConfidenceMotion,
    NoConfidenceMotion, ReferenceBase, Violation, VoteTally, SEJM_SEATS,
};

use crate::failures;

/// Deputies needed to move a vote of no confidence in the Council (Art. 158(1)).
pub const NO_CONFIDENCE_MIN_SIGNATORIES: u64 = 46;

/// Deputies needed to move a vote of no confidence in a minister (Art. 159(1)).
pub const MINISTER_NO_CONFIDENCE_MIN_SIGNATORIES: u64 = 69;

/// Deputies needed to move an indictment of a minister (Art. 156(2)).
pub const INDICTMENT_MIN_SIGNATORIES: u64 = 115;

const ART_156_2: Article = Article::cite("156(2)");
const ART_158_1: Article = Article::cite("158(1)");
const ART_159_1: Article = Article::cite("159(1)");

/// Run a Sejm vote against the statutory seats and fold any failure into
/// the caller's violation family.
fn sejm_vote(
    tally: &VoteTally,
    requirement: Majority,
    article: &Article,
) -> Result<(), String> {
    if tally.chamber() != Chamber::Sejm {
        return Err(format!("voted in the {}, not the Sejm", tally.chamber()));
    }
    evaluate_majority_cited(
        tally,
        requirement,
        ReferenceBase::Seats(SEJM_SEATS),
        article.clone(),
    )
    .map_err(|v| v.message().to_string())
}

/// Constructive vote of no confidence (Art. 158(1)).
///
/// The motion needs 46 signatories and a named successor; it carries with
/// an absolute majority of the statutory number of Deputies.
pub fn validate_no_confidence(
    motion: &NoConfidenceMotion,
    tally: &VoteTally,
) -> Result<(), Violation> {
    let successor_missing = motion
        .successor
        .as_deref()
        .map_or(true, |name| name.trim().is_empty());
    let conditions = [
        (
            motion.signatories < NO_CONFIDENCE_MIN_SIGNATORIES,
            format!(
                "motion signed by {} Deputies, at least {NO_CONFIDENCE_MIN_SIGNATORIES} required",
                motion.signatories
            ),
        ),
        (
            successor_missing,
            "motion must name a candidate for Prime Minister".to_string(),
        ),
    ];
    if let Some(reasons) = failures(&conditions) {
        return Err(Violation::NoConfidence(Citation::new(ART_158_1, reasons)));
    }
    sejm_vote(tally, Majority::Absolute, &ART_158_1)
        .map_err(|reason| Violation::NoConfidence(Citation::new(ART_158_1, reason)))
}

/// Vote of no confidence in an individual minister (Art. 159(1)).
pub fn validate_minister_no_confidence(
    motion: &MinisterNoConfidenceMotion,
    tally: &VoteTally,
) -> Result<(), Violation> {
    if motion.signatories < MINISTER_NO_CONFIDENCE_MIN_SIGNATORIES {
        return Err(Violation::NoConfidence(Citation::new(
            ART_159_1,
            format!(
                "motion against {} signed by {} Deputies, at least {MINISTER_NO_CONFIDENCE_MIN_SIGNATORIES} required",
                motion.minister, motion.signatories
            ),
        )));
    }
    sejm_vote(tally, Majority::Absolute, &ART_159_1).map_err(|reason| {
        Violation::NoConfidence(Citation::new(
            ART_159_1,
            format!("motion against {}: {reason}", motion.minister),
        ))
    })
}

/// Resolution holding a member of the Council of Ministers accountable
/// before the State Tribunal (Art. 156(2)).
///
/// Moved by the President or by at least 115 Deputies; adopted by three
/// fifths of the statutory number of Deputies.
pub fn validate_minister_indictment(
    signatories: u64,
    moved_by_president: bool,
    tally: &VoteTally,
) -> Result<(), Violation> {
    if !moved_by_president && signatories < INDICTMENT_MIN_SIGNATORIES {
        return Err(Violation::StateTribunal(Citation::new(
            ART_156_2,
            format!(
                "motion signed by {signatories} Deputies, at least {INDICTMENT_MIN_SIGNATORIES} required unless moved by the President"
            ),
        )));
    }
    sejm_vote(tally, Majority::ThreeFifths, &ART_156_2)
        .map_err(|reason| Violation::StateTribunal(Citation::new(ART_156_2, reason)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::ViolationKind;

    fn sejm(votes_for: u64, against: u64) -> VoteTally {
        VoteTally::new(Chamber::Sejm, votes_for, against, 0)
    }

    fn motion(signatories: u64) -> NoConfidenceMotion {
        NoConfidenceMotion {
            signatories,
            successor: Some("Jan Nowak".into()),
        }
    }

    #[test]
    fn test_constructive_vote_thresholds() {
        assert!(validate_no_confidence(&motion(46), &sejm(231, 200)).is_ok());
        let err = validate_no_confidence(&motion(46), &sejm(230, 100)).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::NoConfidence);
        assert_eq!(err.article().as_str(), "158(1)");
        assert!(validate_no_confidence(&motion(45), &sejm(300, 100)).is_err());
    }

    #[test]
    fn test_constructive_vote_needs_successor() {
        let m = NoConfidenceMotion {
            signatories: 100,
            successor: Some("   ".into()),
        };
        let err = validate_no_confidence(&m, &sejm(300, 100)).unwrap_err();
        assert!(err.message().contains("candidate"));
    }

    #[test]
    fn test_vote_in_wrong_chamber() {
        let tally = VoteTally::new(Chamber::Senate, 90, 0, 0);
        let err = validate_no_confidence(&motion(50), &tally).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::NoConfidence);
        assert!(err.message().contains("Sejm"));
    }

    #[test]
    fn test_minister_motion() {
        let m = MinisterNoConfidenceMotion {
            minister: "Minister of Health".into(),
            signatories: 69,
        };
        assert!(validate_minister_no_confidence(&m, &sejm(231, 0)).is_ok());
        let m = MinisterNoConfidenceMotion {
            signatories: 68,
            ..m
        };
        let err = validate_minister_no_confidence(&m, &sejm(231, 0)).unwrap_err();
        assert_eq!(err.article().as_str(), "159(1)");
    }

    #[test]
    fn test_indictment_three_fifths_of_seats() {
        // 3/5 of 460 is 276.
        assert!(validate_minister_indictment(115, false, &sejm(276, 0)).is_ok());
        let err = validate_minister_indictment(115, false, &sejm(275, 0)).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::StateTribunal);
        assert!(validate_minister_indictment(0, true, &sejm(280, 10)).is_ok());
        assert!(validate_minister_indictment(114, false, &sejm(300, 0)).is_err());
    }
}
