//! # Vote Arithmetic
//!
//! Quorum and majority evaluation over exact integer counts.
//!
//! Every threshold is a comparison between two integer products, computed
//! in `u128` so that no pair of `u64` counts can overflow. There is no
//! division and no floating point: `for * 3 >= base * 2` is the whole
//! definition of a two-thirds majority.
//!
//! ## Thresholds
//!
//! | Requirement    | Passes iff              | Base           |
//! |----------------|-------------------------|----------------|
//! | `Simple`       | `for > against`         | ignored        |
//! | `Absolute`     | `for * 2 > base`        | caller-chosen  |
//! | `TwoThirds`    | `for * 3 >= base * 2`   | caller-chosen  |
//! | `ThreeFifths`  | `for * 5 >= base * 3`   | caller-chosen  |
//!
//! The base is always supplied as a [`ReferenceBase`]: votes cast, or an
//! explicit statutory seat count. Nothing here infers it.
//!
//! ## Quorum
//!
//! `present * 2 >= statutory_total`, evaluated against attendance rather
//! than against the votes cast.

use serde::{Deserialize, Serialize};

use crate::violation::{Article, Citation, Violation};

/// Statutory number of Deputies (Art. 96(1)).
pub const SEJM_SEATS: u64 = 460;

/// Statutory number of Senators (Art. 97(1)).
pub const SENATE_SEATS: u64 = 100;

/// Quorum and majority rules for both chambers.
const ART_120: Article = Article::cite("120");

// ─── Chamber ─────────────────────────────────────────────────────────

/// The body casting a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chamber {
    /// Lower house, 460 Deputies.
    Sejm,
    /// Upper house, 100 Senators.
    Senate,
    /// The electorate voting in a referendum.
    Electorate,
}

impl Chamber {
    /// Statutory seat count, if the body has one.
    pub fn statutory_seats(self) -> Option<u64> {
        match self {
            Self::Sejm => Some(SEJM_SEATS),
            Self::Senate => Some(SENATE_SEATS),
            Self::Electorate => None,
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sejm => "Sejm",
            Self::Senate => "Senate",
            Self::Electorate => "Electorate",
        }
    }
}

impl std::fmt::Display for Chamber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Fraction ────────────────────────────────────────────────────────

/// An unreduced ratio of two counts, kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    /// Numerator.
    pub numerator: u64,
    /// Denominator.
    pub denominator: u64,
}

impl Fraction {
    /// Build a fraction.
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// ─── Majority ────────────────────────────────────────────────────────

/// Required majority for a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Majority {
    /// More votes for than against.
    Simple,
    /// More than half of the reference base.
    Absolute,
    /// At least two thirds of the reference base.
    TwoThirds,
    /// At least three fifths of the reference base.
    ThreeFifths,
}

/// The fraction of the reference base a requirement demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    /// Required share of the base.
    pub fraction: Fraction,
    /// `true` when the share must be exceeded, `false` when it must be reached.
    pub strict: bool,
}

impl Majority {
    /// All requirements in declaration order.
    pub const ALL: [Majority; 4] = [
        Self::Simple,
        Self::Absolute,
        Self::TwoThirds,
        Self::ThreeFifths,
    ];

    /// The required fraction and whether it is a strict bound.
    ///
    /// For `Simple` the fraction is one half of the for/against votes,
    /// strictly exceeded.
    pub fn threshold(self) -> Threshold {
        match self {
            Self::Simple | Self::Absolute => Threshold {
                fraction: Fraction::new(1, 2),
                strict: true,
            },
            Self::TwoThirds => Threshold {
                fraction: Fraction::new(2, 3),
                strict: false,
            },
            Self::ThreeFifths => Threshold {
                fraction: Fraction::new(3, 5),
                strict: false,
            },
        }
    }

    /// Human-readable label used in violation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "simple majority",
            Self::Absolute => "absolute majority",
            Self::TwoThirds => "two-thirds majority",
            Self::ThreeFifths => "three-fifths majority",
        }
    }
}

impl std::fmt::Display for Majority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Simple => "SIMPLE",
            Self::Absolute => "ABSOLUTE",
            Self::TwoThirds => "TWO_THIRDS",
            Self::ThreeFifths => "THREE_FIFTHS",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Majority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "SIMPLE" => Ok(Self::Simple),
            "ABSOLUTE" => Ok(Self::Absolute),
            "TWO_THIRDS" => Ok(Self::TwoThirds),
            "THREE_FIFTHS" => Ok(Self::ThreeFifths),
            other => Err(format!("unknown majority requirement: {other}")),
        }
    }
}

// ─── Reference Base ──────────────────────────────────────────────────

/// Denominator a majority is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceBase {
    /// All votes cast, abstentions included.
    VotesCast,
    /// A fixed statutory number of seats.
    Seats(u64),
}

impl ReferenceBase {
    /// Resolve the denominator for a particular tally.
    pub fn resolve(self, tally: &VoteTally) -> u64 {
        match self {
            Self::VotesCast => tally.total_cast(),
            Self::Seats(n) => n,
        }
    }
}

// ─── Vote Tally ──────────────────────────────────────────────────────

/// The outcome of a single vote. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteTally {
    chamber: Chamber,
    votes_for: u64,
    votes_against: u64,
    #[serde(default)]
    abstentions: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    present: Option<u64>,
}

impl VoteTally {
    /// Record a vote. Attendance defaults to the number of votes cast.
    pub fn new(chamber: Chamber, votes_for: u64, votes_against: u64, abstentions: u64) -> Self {
        Self {
            chamber,
            votes_for,
            votes_against,
            abstentions,
            present: None,
        }
    }

    /// Record attendance separately from the votes cast.
    pub fn with_attendance(mut self, present: u64) -> Self {
        self.present = Some(present);
        self
    }

    /// The voting body.
    pub fn chamber(&self) -> Chamber {
        self.chamber
    }

    /// Votes in favour.
    pub fn votes_for(&self) -> u64 {
        self.votes_for
    }

    /// Votes against.
    pub fn votes_against(&self) -> u64 {
        self.votes_against
    }

    /// Abstentions.
    pub fn abstentions(&self) -> u64 {
        self.abstentions
    }

    /// `for + against + abstain`, saturating.
    pub fn total_cast(&self) -> u64 {
        self.votes_for
            .saturating_add(self.votes_against)
            .saturating_add(self.abstentions)
    }

    /// Members present. Never less than the votes actually cast.
    pub fn attendance(&self) -> u64 {
        self.present
            .map_or(self.total_cast(), |p| p.max(self.total_cast()))
    }
}

impl std::fmt::Display for VoteTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} for, {} against, {} abstaining",
            self.chamber, self.votes_for, self.votes_against, self.abstentions
        )
    }
}

// ─── Quorum ──────────────────────────────────────────────────────────

/// Minimum attendance for a body of `statutory_total` members.
pub fn quorum_required(statutory_total: u64) -> u64 {
    statutory_total / 2 + statutory_total % 2
}

/// Check the attendance quorum, citing Art. 120.
pub fn check_quorum(present: u64, statutory_total: u64) -> Result<(), Violation> {
    check_quorum_cited(present, statutory_total, ART_120)
}

/// Check the attendance quorum, citing the supplied provision.
pub fn check_quorum_cited(
    present: u64,
    statutory_total: u64,
    article: Article,
) -> Result<(), Violation> {
    if u128::from(present) * 2 >= u128::from(statutory_total) {
        return Ok(());
    }
    let required = quorum_required(statutory_total);
    Err(Violation::Quorum {
        citation: Citation::new(
            article,
            format!("{present} present, {required} required (of {statutory_total})"),
        ),
        present,
        statutory_total,
        required,
    })
}

// ─── Majority ────────────────────────────────────────────────────────

/// Evaluate a majority requirement, citing Art. 120.
pub fn evaluate_majority(
    tally: &VoteTally,
    requirement: Majority,
    reference_base: ReferenceBase,
) -> Result<(), Violation> {
    evaluate_majority_cited(tally, requirement, reference_base, ART_120)
}

/// Evaluate a majority requirement, citing the supplied provision.
pub fn evaluate_majority_cited(
    tally: &VoteTally,
    requirement: Majority,
    reference_base: ReferenceBase,
    article: Article,
) -> Result<(), Violation> {
    let votes_for = u128::from(tally.votes_for());
    let votes_against = u128::from(tally.votes_against());
    let base = reference_base.resolve(tally);
    let wide_base = u128::from(base);

    let passed = match requirement {
        Majority::Simple => votes_for > votes_against,
        Majority::Absolute => votes_for * 2 > wide_base,
        Majority::TwoThirds => votes_for * 3 >= wide_base * 2,
        Majority::ThreeFifths => votes_for * 5 >= wide_base * 3,
    };
    if passed {
        return Ok(());
    }

    let (achieved, message) = match requirement {
        Majority::Simple => (
            Fraction::new(
                tally.votes_for(),
                tally.votes_for().saturating_add(tally.votes_against()),
            ),
            format!(
                "{} not reached: {} for, {} against",
                requirement.label(),
                tally.votes_for(),
                tally.votes_against()
            ),
        ),
        _ => {
            let threshold = requirement.threshold();
            let bound = if threshold.strict { "more than" } else { "at least" };
            (
                Fraction::new(tally.votes_for(), base),
                format!(
                    "{} not reached: {} for of {} ({}), {} {} required",
                    requirement.label(),
                    tally.votes_for(),
                    base,
                    base_label(reference_base),
                    bound,
                    threshold.fraction
                ),
            )
        }
    };

    Err(Violation::Majority {
        citation: Citation::new(article, message),
        requirement,
        votes_for: tally.votes_for(),
        votes_against: tally.votes_against(),
        reference_base: base,
        achieved,
        required: requirement.threshold().fraction,
    })
}

/// Quorum on the tally's attendance, then the majority requirement.
///
/// The Electorate has no statutory seat count; its quorum is the caller's
/// concern and is skipped here.
pub fn evaluate_vote(
    tally: &VoteTally,
    requirement: Majority,
    reference_base: ReferenceBase,
    article: Article,
) -> Result<(), Violation> {
    if let Some(seats) = tally.chamber().statutory_seats() {
        check_quorum_cited(tally.attendance(), seats, article.clone())?;
    }
    evaluate_majority_cited(tally, requirement, reference_base, article)
}

fn base_label(base: ReferenceBase) -> &'static str {
    match base {
        ReferenceBase::VotesCast => "votes cast",
        ReferenceBase::Seats(_) => "statutory seats",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::ViolationKind;

    fn sejm(votes_for: u64, against: u64, abstain: u64) -> VoteTally {
        VoteTally::new(Chamber::Sejm, votes_for, against, abstain)
    }

    // ── Quorum ──────────────────────────────────────────────────────

    #[test]
    fn test_quorum_boundary_sejm() {
        assert!(check_quorum(230, 460).is_ok());
        let err = check_quorum(229, 460).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::Quorum);
        assert_eq!(err.article().as_str(), "120");
        match err {
            Violation::Quorum {
                present, required, ..
            } => {
                assert_eq!(present, 229);
                assert_eq!(required, 230);
            }
            other => panic!("expected quorum violation, got {other:?}"),
        }
    }

    #[test]
    fn test_quorum_odd_total() {
        assert_eq!(quorum_required(101), 51);
        assert!(check_quorum(51, 101).is_ok());
        assert!(check_quorum(50, 101).is_err());
    }

    #[test]
    fn test_quorum_cited_uses_given_article() {
        let err = check_quorum_cited(10, 100, Article::cite("235(6)")).unwrap_err();
        assert_eq!(err.article().as_str(), "235(6)");
    }

    // ── Majorities ──────────────────────────────────────────────────

    #[test]
    fn test_simple_ignores_abstentions() {
        let tally = sejm(100, 99, 250);
        assert!(evaluate_majority(&tally, Majority::Simple, ReferenceBase::VotesCast).is_ok());
        let tie = sejm(100, 100, 0);
        assert!(evaluate_majority(&tie, Majority::Simple, ReferenceBase::VotesCast).is_err());
    }

    #[test]
    fn test_two_thirds_exact_boundary() {
        let base = ReferenceBase::Seats(300);
        assert!(evaluate_majority(&sejm(200, 100, 0), Majority::TwoThirds, base).is_ok());
        let err = evaluate_majority(&sejm(199, 101, 0), Majority::TwoThirds, base).unwrap_err();
        match err {
            Violation::Majority {
                achieved,
                required,
                reference_base,
                ..
            } => {
                assert_eq!(achieved, Fraction::new(199, 300));
                assert_eq!(required, Fraction::new(2, 3));
                assert_eq!(reference_base, 300);
            }
            other => panic!("expected majority violation, got {other:?}"),
        }
    }

    #[test]
    fn test_absolute_is_strict() {
        let base = ReferenceBase::Seats(460);
        assert!(evaluate_majority(&sejm(230, 0, 0), Majority::Absolute, base).is_err());
        assert!(evaluate_majority(&sejm(231, 0, 0), Majority::Absolute, base).is_ok());
    }

    #[test]
    fn test_three_fifths_of_votes_cast() {
        // 300 cast, 180 needed.
        assert!(
            evaluate_majority(&sejm(180, 100, 20), Majority::ThreeFifths, ReferenceBase::VotesCast)
                .is_ok()
        );
        assert!(
            evaluate_majority(&sejm(179, 101, 20), Majority::ThreeFifths, ReferenceBase::VotesCast)
                .is_err()
        );
    }

    #[test]
    fn test_no_overflow_at_extremes() {
        let tally = sejm(u64::MAX, 0, 0);
        let base = ReferenceBase::Seats(u64::MAX);
        assert!(evaluate_majority(&tally, Majority::TwoThirds, base).is_ok());
        assert!(evaluate_majority(&tally, Majority::Absolute, base).is_ok());
    }

    // ── Tally ───────────────────────────────────────────────────────

    #[test]
    fn test_attendance_never_below_votes_cast() {
        assert_eq!(sejm(10, 10, 10).attendance(), 30);
        assert_eq!(sejm(10, 10, 10).with_attendance(5).attendance(), 30);
        assert_eq!(sejm(10, 10, 10).with_attendance(300).attendance(), 300);
    }

    #[test]
    fn test_evaluate_vote_checks_quorum_first() {
        let tally = sejm(200, 10, 0);
        let err = evaluate_vote(
            &tally,
            Majority::Simple,
            ReferenceBase::VotesCast,
            Article::cite("120"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ViolationKind::Quorum);

        let tally = sejm(200, 10, 0).with_attendance(400);
        assert!(evaluate_vote(
            &tally,
            Majority::Simple,
            ReferenceBase::VotesCast,
            Article::cite("120"),
        )
        .is_ok());
    }

    #[test]
    fn test_identical_tallies_compare_equal() {
        assert_eq!(sejm(1, 2, 3), sejm(1, 2, 3));
        assert_ne!(sejm(1, 2, 3), sejm(1, 2, 3).with_attendance(460));
    }

    #[test]
    fn test_majority_parse_and_display() {
        for m in Majority::ALL {
            assert_eq!(m.to_string().parse::<Majority>().unwrap(), m);
        }
        assert_eq!("two-thirds".parse::<Majority>().unwrap(), Majority::TwoThirds);
        assert!("most".parse::<Majority>().is_err());
    }

    // ── Property tests ──────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_majority() -> impl Strategy<Value = Majority> {
            prop_oneof![
                Just(Majority::Simple),
                Just(Majority::Absolute),
                Just(Majority::TwoThirds),
                Just(Majority::ThreeFifths),
            ]
        }

        proptest! {
            #[test]
            fn majority_is_monotonic_in_votes_for(
                votes_for in 0u64..1_000,
                extra in 1u64..1_000,
                against in 0u64..1_000,
                seats in 0u64..2_000,
                requirement in any_majority(),
            ) {
                let base = ReferenceBase::Seats(seats);
                let before = sejm(votes_for, against, 0);
                let after = sejm(votes_for + extra, against, 0);
                if evaluate_majority(&before, requirement, base).is_ok() {
                    prop_assert!(evaluate_majority(&after, requirement, base).is_ok());
                }
            }

            #[test]
            fn two_thirds_boundary_is_exact(k in 1u64..10_000) {
                let seats = k * 3;
                let base = ReferenceBase::Seats(seats);
                prop_assert!(evaluate_majority(&sejm(k * 2, 0, 0), Majority::TwoThirds, base).is_ok());
                prop_assert!(evaluate_majority(&sejm(k * 2 - 1, 0, 0), Majority::TwoThirds, base).is_err());
            }

            #[test]
            fn quorum_matches_definition(present in 0u64..1_000, total in 0u64..1_000) {
                prop_assert_eq!(check_quorum(present, total).is_ok(), present * 2 >= total);
                prop_assert_eq!(present >= quorum_required(total), present * 2 >= total);
            }
        }
    }
}
