//! # Constitutional Amendment State Machine
//!
//! Art. 235. A bill amending the Constitution passes the Sejm by two
//! thirds, the Senate by an absolute majority of its statutory seats, and,
//! when it touches chapter I, II or XII, a confirmatory referendum.
//!
//! ## States
//!
//! ```text
//! FIRST_READING ──▶ SEJM_VOTE ──2/3──▶ SENATE_VOTE ──abs──┬──────────────▶ PRESIDENT_SIGNATURE ──▶ ENACTED
//!                       │                   │             │                        ▲
//!                       │ fail              │ fail        └──▶ REFERENDUM ──pass───┘
//!                       ▼                   ▼                     │ fail
//!                   REJECTED ◀──────────────┴─────────────────────┘
//! ```
//!
//! The 30-day interval between the first reading and the Sejm vote is
//! recorded as a [`Window`] and is not enforced here: the caller owns the
//! clock.

use serde::{Deserialize, Serialize};

use charter_core::{
    check_quorum_cited, evaluate_majority_cited, AmendmentInitiative, AmendmentProposal, Article,
    Chamber, Majority, ProcedureId, ReferenceBase, ReferendumResult, Violation, VoteTally, Window,
    AMENDMENT_MIN_DEPUTIES, SEJM_SEATS, SENATE_SEATS,
};

use crate::history::{refused, History, Procedure, Stage, Trigger, VoteOutcome};

const ART_235_1: Article = Article::cite("235(1)");
const ART_235_4: Article = Article::cite("235(4)");
const ART_235_6: Article = Article::cite("235(6)");
const ART_235_7: Article = Article::cite("235(7)");

// ─── Amendment Stage ─────────────────────────────────────────────────

/// Stage of a constitutional amendment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmendmentStage {
    /// First reading in the Sejm.
    FirstReading,
    /// Awaiting the Sejm vote.
    SejmVote,
    /// Awaiting the Senate vote.
    SenateVote,
    /// Awaiting the confirmatory referendum.
    Referendum,
    /// Awaiting the President's signature.
    PresidentSignature,
    /// Signed (terminal).
    Enacted,
    /// A vote or the referendum failed (terminal).
    Rejected,
}

impl AmendmentStage {
    /// All stages in declaration order.
    pub const ALL: [AmendmentStage; 7] = [
        Self::FirstReading,
        Self::SejmVote,
        Self::SenateVote,
        Self::Referendum,
        Self::PresidentSignature,
        Self::Enacted,
        Self::Rejected,
    ];
}

impl Stage for AmendmentStage {
    const MACHINE: &'static str = "amendment";
    const INITIAL: Self = Self::FirstReading;

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Enacted | Self::Rejected)
    }
}

impl std::fmt::Display for AmendmentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FirstReading => "FIRST_READING",
            Self::SejmVote => "SEJM_VOTE",
            Self::SenateVote => "SENATE_VOTE",
            Self::Referendum => "REFERENDUM",
            Self::PresidentSignature => "PRESIDENT_SIGNATURE",
            Self::Enacted => "ENACTED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

// ─── Amendment Procedure ─────────────────────────────────────────────

/// A constitutional amendment with its stage and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmendmentProcedure {
    id: ProcedureId,
    proposal: AmendmentProposal,
    stage: AmendmentStage,
    history: History<AmendmentStage>,
}

impl Procedure for AmendmentProcedure {
    type Stage = AmendmentStage;
    type Subject = AmendmentProposal;

    fn id(&self) -> ProcedureId {
        self.id
    }

    fn subject(&self) -> &AmendmentProposal {
        &self.proposal
    }

    fn stage(&self) -> AmendmentStage {
        self.stage
    }

    fn history(&self) -> &History<AmendmentStage> {
        &self.history
    }
}

impl AmendmentProcedure {
    /// Open the procedure after validating who introduced it (Art. 235(1)).
    ///
    /// # Errors
    ///
    /// `Amendment` when fewer than 92 Deputies sponsor it, or when the
    /// proposal touches no chapter.
    pub fn initiate(proposal: AmendmentProposal) -> Result<Self, Violation> {
        if let AmendmentInitiative::Deputies(n) = proposal.initiative {
            if n < AMENDMENT_MIN_DEPUTIES {
                return Err(refused(
                    AmendmentStage::INITIAL,
                    Violation::amendment(
                        ART_235_1,
                        None,
                        format!(
                            "{n} Deputies sponsor the amendment, at least {AMENDMENT_MIN_DEPUTIES} required"
                        ),
                    ),
                ));
            }
        }
        if proposal.chapters.is_empty() {
            return Err(refused(
                AmendmentStage::INITIAL,
                Violation::amendment(ART_235_1, None, "the amendment names no chapter"),
            ));
        }
        Ok(Self {
            id: ProcedureId::new(),
            proposal,
            stage: AmendmentStage::INITIAL,
            history: History::new(),
        })
    }

    /// The proposal under consideration.
    pub fn proposal(&self) -> &AmendmentProposal {
        &self.proposal
    }

    /// Whether a referendum stage lies on this amendment's path.
    pub fn requires_referendum(&self) -> bool {
        self.proposal.requires_referendum()
    }

    /// Close the first reading. The Sejm may vote no earlier than 30 days
    /// later.
    pub fn complete_first_reading(&mut self) -> Result<(), Violation> {
        self.require(AmendmentStage::FirstReading, ART_235_4)?;
        self.advance(
            AmendmentStage::SejmVote,
            Trigger::event("first reading completed"),
            Some(Window::new(30, ART_235_4)),
        );
        Ok(())
    }

    /// Sejm vote: two thirds of votes cast, quorum of half the seats.
    pub fn sejm_vote(&mut self, tally: &VoteTally) -> Result<VoteOutcome, Violation> {
        self.require(AmendmentStage::SejmVote, ART_235_4)?;
        self.require_chamber(tally, Chamber::Sejm, ART_235_4)?;
        self.check_quorum(tally.attendance(), SEJM_SEATS, ART_235_4)?;
        let result = evaluate_majority_cited(
            tally,
            Majority::TwoThirds,
            ReferenceBase::VotesCast,
            ART_235_4,
        );
        let (next, window) = if result.is_ok() {
            (AmendmentStage::SenateVote, Some(Window::new(60, ART_235_4)))
        } else {
            (AmendmentStage::Rejected, None)
        };
        Ok(self.record_vote(
            next,
            tally,
            Majority::TwoThirds,
            ReferenceBase::VotesCast,
            result,
            window,
        ))
    }

    /// Senate vote: absolute majority of the statutory seats.
    pub fn senate_vote(&mut self, tally: &VoteTally) -> Result<VoteOutcome, Violation> {
        self.require(AmendmentStage::SenateVote, ART_235_4)?;
        self.require_chamber(tally, Chamber::Senate, ART_235_4)?;
        self.check_quorum(tally.attendance(), SENATE_SEATS, ART_235_4)?;
        let base = ReferenceBase::Seats(SENATE_SEATS);
        let result = evaluate_majority_cited(tally, Majority::Absolute, base, ART_235_4);
        let (next, window) = match (&result, self.requires_referendum()) {
            (Err(_), _) => (AmendmentStage::Rejected, None),
            (Ok(()), true) => (
                AmendmentStage::Referendum,
                Some(Window::new(60, ART_235_6)),
            ),
            (Ok(()), false) => (
                AmendmentStage::PresidentSignature,
                Some(Window::new(21, ART_235_7)),
            ),
        };
        Ok(self.record_vote(next, tally, Majority::Absolute, base, result, window))
    }

    /// Confirmatory referendum: binding at a turnout of at least half the
    /// eligible voters, adopted by a majority of those voting.
    ///
    /// A non-binding or lost referendum rejects the amendment.
    pub fn referendum(&mut self, result: &ReferendumResult) -> Result<VoteOutcome, Violation> {
        self.require(AmendmentStage::Referendum, ART_235_6)?;
        if result.eligible == 0 || result.turnout() > result.eligible {
            return Err(self.procedural(
                ART_235_6,
                format!(
                    "turnout {} is inconsistent with {} eligible voters",
                    result.turnout(),
                    result.eligible
                ),
            ));
        }
        let tally = VoteTally::new(
            Chamber::Electorate,
            result.votes_for,
            result.votes_against,
            0,
        );
        let verdict = check_quorum_cited(result.turnout(), result.eligible, ART_235_6).and_then(
            |()| {
                evaluate_majority_cited(
                    &tally,
                    Majority::Simple,
                    ReferenceBase::VotesCast,
                    ART_235_6,
                )
            },
        );
        let (next, window) = if verdict.is_ok() {
            (
                AmendmentStage::PresidentSignature,
                Some(Window::new(21, ART_235_7)),
            )
        } else {
            (AmendmentStage::Rejected, None)
        };
        let trigger = Trigger::Referendum {
            result: *result,
            passed: verdict.is_ok(),
        };
        self.advance(next, trigger, window);
        Ok(match verdict {
            Ok(()) => VoteOutcome::Passed,
            Err(v) => VoteOutcome::Failed(v),
        })
    }

    /// The President signs the amendment (Art. 235(7)).
    pub fn president_sign(&mut self) -> Result<(), Violation> {
        self.require(AmendmentStage::PresidentSignature, ART_235_7)?;
        self.advance(
            AmendmentStage::Enacted,
            Trigger::event("signed by the President"),
            None,
        );
        Ok(())
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn require(&self, expected: AmendmentStage, article: Article) -> Result<(), Violation> {
        if self.stage.is_terminal() {
            return Err(self.procedural(
                article,
                format!("the amendment procedure ended in {}", self.stage),
            ));
        }
        if self.stage != expected {
            return Err(self.procedural(
                article,
                format!("operation requires {expected}, amendment is at {}", self.stage),
            ));
        }
        Ok(())
    }

    fn require_chamber(
        &self,
        tally: &VoteTally,
        chamber: Chamber,
        article: Article,
    ) -> Result<(), Violation> {
        if tally.chamber() == chamber {
            return Ok(());
        }
        Err(self.procedural(
            article,
            format!("vote must be held in the {chamber}, got {}", tally.chamber()),
        ))
    }

    fn check_quorum(&self, present: u64, total: u64, article: Article) -> Result<(), Violation> {
        check_quorum_cited(present, total, article).map_err(|v| refused(self.stage, v))
    }

    fn procedural(&self, article: Article, message: impl Into<String>) -> Violation {
        refused(
            self.stage,
            Violation::amendment(article, Some(self.stage.to_string()), message),
        )
    }

    fn record_vote(
        &mut self,
        next: AmendmentStage,
        tally: &VoteTally,
        requirement: Majority,
        reference_base: ReferenceBase,
        result: Result<(), Violation>,
        window: Option<Window>,
    ) -> VoteOutcome {
        let trigger = Trigger::Vote {
            tally: tally.clone(),
            requirement,
            reference_base,
            passed: result.is_ok(),
        };
        self.advance(next, trigger, window);
        match result {
            Ok(()) => VoteOutcome::Passed,
            Err(v) => VoteOutcome::Failed(v),
        }
    }

    fn advance(&mut self, to: AmendmentStage, trigger: Trigger, window: Option<Window>) {
        self.history.append(self.stage, to, trigger, window);
        self.stage = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::{Chapter, ViolationKind};

    fn proposal(chapters: Vec<Chapter>) -> AmendmentProposal {
        AmendmentProposal {
            title: "Amendment of the Constitution".into(),
            initiative: AmendmentInitiative::Deputies(120),
            chapters,
        }
    }

    fn sejm(votes_for: u64, against: u64) -> VoteTally {
        VoteTally::new(Chamber::Sejm, votes_for, against, 0)
    }

    fn senate(votes_for: u64, against: u64) -> VoteTally {
        VoteTally::new(Chamber::Senate, votes_for, against, 0)
    }

    fn through_senate(chapters: Vec<Chapter>) -> AmendmentProcedure {
        let mut a = AmendmentProcedure::initiate(proposal(chapters)).unwrap();
        a.complete_first_reading().unwrap();
        a.sejm_vote(&sejm(310, 100)).unwrap().into_result().unwrap();
        a.senate_vote(&senate(70, 20)).unwrap().into_result().unwrap();
        a
    }

    #[test]
    fn test_initiative_thresholds() {
        let short = AmendmentProposal {
            initiative: AmendmentInitiative::Deputies(91),
            ..proposal(vec![Chapter::IV])
        };
        let err = AmendmentProcedure::initiate(short).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::Amendment);
        assert_eq!(err.article().as_str(), "235(1)");

        for initiative in [
            AmendmentInitiative::Deputies(92),
            AmendmentInitiative::Senate,
            AmendmentInitiative::President,
        ] {
            let p = AmendmentProposal {
                initiative,
                ..proposal(vec![Chapter::IV])
            };
            assert!(AmendmentProcedure::initiate(p).is_ok());
        }
    }

    #[test]
    fn test_path_without_referendum() {
        let mut a = through_senate(vec![Chapter::VII]);
        assert_eq!(a.stage(), AmendmentStage::PresidentSignature);
        a.president_sign().unwrap();
        assert_eq!(
            a.history().path(),
            vec![
                AmendmentStage::FirstReading,
                AmendmentStage::SejmVote,
                AmendmentStage::SenateVote,
                AmendmentStage::PresidentSignature,
                AmendmentStage::Enacted,
            ]
        );
        assert!(!a.history().visited(AmendmentStage::Referendum));
        let first = &a.history().entries()[0];
        assert_eq!(first.window.as_ref().map(|w| w.days), Some(30));
    }

    #[test]
    fn test_rights_chapter_requires_referendum() {
        let mut a = through_senate(vec![Chapter::II]);
        assert_eq!(a.stage(), AmendmentStage::Referendum);
        let result = ReferendumResult {
            votes_for: 9_000_000,
            votes_against: 7_000_000,
            eligible: 30_000_000,
        };
        assert!(a.referendum(&result).unwrap().is_passed());
        a.president_sign().unwrap();
        assert_eq!(a.stage(), AmendmentStage::Enacted);
    }

    #[test]
    fn test_referendum_below_half_turnout_rejects() {
        let mut a = through_senate(vec![Chapter::I]);
        let result = ReferendumResult {
            votes_for: 10_000_000,
            votes_against: 4_999_999,
            eligible: 30_000_000,
        };
        let outcome = a.referendum(&result).unwrap();
        assert_eq!(
            outcome.violation().map(Violation::kind),
            Some(ViolationKind::Quorum)
        );
        assert_eq!(a.stage(), AmendmentStage::Rejected);
    }

    #[test]
    fn test_referendum_at_exactly_half_turnout_is_binding() {
        let mut a = through_senate(vec![Chapter::XII]);
        let result = ReferendumResult {
            votes_for: 8_000_000,
            votes_against: 7_000_000,
            eligible: 30_000_000,
        };
        assert!(a.referendum(&result).unwrap().is_passed());
    }

    #[test]
    fn test_referendum_lost_on_votes_rejects() {
        let mut a = through_senate(vec![Chapter::II]);
        let result = ReferendumResult {
            votes_for: 7_000_000,
            votes_against: 9_000_000,
            eligible: 30_000_000,
        };
        let outcome = a.referendum(&result).unwrap();
        assert_eq!(
            outcome.violation().map(Violation::kind),
            Some(ViolationKind::Majority)
        );
        assert_eq!(a.stage(), AmendmentStage::Rejected);
    }

    #[test]
    fn test_inconsistent_referendum_is_refused() {
        let mut a = through_senate(vec![Chapter::II]);
        let before = a.clone();
        let result = ReferendumResult {
            votes_for: 10,
            votes_against: 10,
            eligible: 15,
        };
        assert_eq!(
            a.referendum(&result).unwrap_err().kind(),
            ViolationKind::Amendment
        );
        assert_eq!(a, before);
    }

    #[test]
    fn test_sejm_two_thirds_boundary() {
        // 300 of 450 is exactly two thirds.
        let mut a = AmendmentProcedure::initiate(proposal(vec![Chapter::IV])).unwrap();
        a.complete_first_reading().unwrap();
        assert!(a.sejm_vote(&sejm(300, 150)).unwrap().is_passed());

        let mut b = AmendmentProcedure::initiate(proposal(vec![Chapter::IV])).unwrap();
        b.complete_first_reading().unwrap();
        let outcome = b.sejm_vote(&sejm(299, 151)).unwrap();
        assert!(!outcome.is_passed());
        assert_eq!(b.stage(), AmendmentStage::Rejected);
    }

    #[test]
    fn test_senate_absolute_majority_of_seats() {
        let mut a = AmendmentProcedure::initiate(proposal(vec![Chapter::IV])).unwrap();
        a.complete_first_reading().unwrap();
        let _ = a.sejm_vote(&sejm(310, 100)).unwrap();
        // 50 of 100 seats is not more than half.
        let outcome = a.senate_vote(&senate(50, 10)).unwrap();
        let violation = outcome.into_result().unwrap_err();
        assert_eq!(violation.kind(), ViolationKind::Majority);
        assert_eq!(a.stage(), AmendmentStage::Rejected);
    }

    #[test]
    fn test_wrong_stage_leaves_record_unchanged() {
        let mut a = AmendmentProcedure::initiate(proposal(vec![Chapter::II])).unwrap();
        let before = a.clone();
        let err = a.sejm_vote(&sejm(400, 10)).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::Amendment);
        assert_eq!(err.stage(), Some("FIRST_READING"));
        assert!(a.president_sign().is_err());
        assert!(a.referendum(&ReferendumResult {
            votes_for: 1,
            votes_against: 0,
            eligible: 1,
        })
        .is_err());
        assert_eq!(a, before);
    }

    #[test]
    fn test_terminal_refuses_everything() {
        let mut a = through_senate(vec![Chapter::IV]);
        a.president_sign().unwrap();
        let before = a.clone();
        assert!(a.president_sign().is_err());
        assert!(a.complete_first_reading().is_err());
        assert!(a.senate_vote(&senate(90, 0)).is_err());
        assert_eq!(a, before);
        assert!(a.history().verify_sequence().is_ok());
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        CompleteFirstReading,
        SejmVote,
        SejmVoteFails,
        SenateVote,
        Referendum,
        PresidentSign,
    }

    fn apply(a: &mut AmendmentProcedure, step: Step) -> Result<(), Violation> {
        match step {
            Step::CompleteFirstReading => a.complete_first_reading(),
            Step::SejmVote => a.sejm_vote(&sejm(310, 100)).map(|_| ()),
            Step::SejmVoteFails => a.sejm_vote(&sejm(200, 200)).map(|_| ()),
            Step::SenateVote => a.senate_vote(&senate(70, 20)).map(|_| ()),
            Step::Referendum => a
                .referendum(&ReferendumResult {
                    votes_for: 9_000_000,
                    votes_against: 7_000_000,
                    eligible: 30_000_000,
                })
                .map(|_| ()),
            Step::PresidentSign => a.president_sign(),
        }
    }

    fn at(stage: AmendmentStage) -> AmendmentProcedure {
        use AmendmentStage::*;
        let through_senate = vec![Step::CompleteFirstReading, Step::SejmVote, Step::SenateVote];
        let (chapter, steps) = match stage {
            FirstReading => (Chapter::IV, vec![]),
            SejmVote => (Chapter::IV, vec![Step::CompleteFirstReading]),
            SenateVote => (Chapter::IV, vec![Step::CompleteFirstReading, Step::SejmVote]),
            Referendum => (Chapter::II, through_senate),
            PresidentSignature => (Chapter::IV, through_senate),
            Enacted => (Chapter::IV, [through_senate, vec![Step::PresidentSign]].concat()),
            Rejected => (
                Chapter::IV,
                vec![Step::CompleteFirstReading, Step::SejmVoteFails],
            ),
        };
        let mut a = AmendmentProcedure::initiate(proposal(vec![chapter])).unwrap();
        for step in steps {
            apply(&mut a, step).unwrap_or_else(|v| panic!("{step:?} toward {stage}: {v}"));
        }
        assert_eq!(a.stage(), stage);
        a
    }

    /// Every operation with the stage it may be called from.
    fn operations() -> Vec<(Step, AmendmentStage)> {
        vec![
            (Step::CompleteFirstReading, AmendmentStage::FirstReading),
            (Step::SejmVote, AmendmentStage::SejmVote),
            (Step::SenateVote, AmendmentStage::SenateVote),
            (Step::Referendum, AmendmentStage::Referendum),
            (Step::PresidentSign, AmendmentStage::PresidentSignature),
        ]
    }

    #[test]
    fn test_every_operation_refused_outside_its_stage() {
        for stage in AmendmentStage::ALL {
            let record = at(stage);
            for (step, allowed) in operations() {
                if allowed == stage {
                    continue;
                }
                let mut attempt = record.clone();
                let err = apply(&mut attempt, step)
                    .expect_err(&format!("{step:?} should be refused at {stage}"));
                assert_eq!(err.kind(), ViolationKind::Amendment, "{step:?} from {stage}");
                assert_eq!(err.stage(), Some(stage.to_string().as_str()));
                assert_eq!(attempt, record, "{step:?} mutated the record at {stage}");
            }
        }
    }

    #[test]
    fn test_every_operation_accepted_from_its_stage() {
        for (step, allowed) in operations() {
            let mut record = at(allowed);
            let before = record.history().len();
            apply(&mut record, step).unwrap_or_else(|v| panic!("{step:?} from {allowed}: {v}"));
            assert_eq!(record.history().len(), before + 1);
            assert!(record.history().verify_sequence().is_ok());
        }
    }

    #[test]
    fn test_sejm_vote_quorum_and_chamber() {
        let mut a = AmendmentProcedure::initiate(proposal(vec![Chapter::IV])).unwrap();
        a.complete_first_reading().unwrap();
        let before = a.clone();
        assert_eq!(
            a.sejm_vote(&sejm(200, 10)).unwrap_err().kind(),
            ViolationKind::Quorum
        );
        assert_eq!(
            a.sejm_vote(&senate(90, 0)).unwrap_err().kind(),
            ViolationKind::Amendment
        );
        assert_eq!(a, before);
    }
}
