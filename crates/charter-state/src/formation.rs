//! # Government Formation State Machine
//!
//! The three-attempt sequence of Art. 154–155.
//!
//! ## States
//!
//! ```text
//! PRESIDENT_DESIGNATES ──fail──▶ SEJM_ELECTS ──fail──▶ PRESIDENT_APPOINTS_RETRY ──fail──▶ FAILED
//!        │  absolute                 │  absolute                │  simple
//!        └──────────────┬────────────┴──────────────────────────┘
//!                       ▼
//!                    SUCCESS
//! ```
//!
//! | Attempt | Stage                      | Requirement                   | Article |
//! |---------|----------------------------|-------------------------------|---------|
//! | 1       | `PRESIDENT_DESIGNATES`     | absolute majority of 460 seats | 154(2) |
//! | 2       | `SEJM_ELECTS`              | absolute majority of 460 seats | 154(3) |
//! | 3       | `PRESIDENT_APPOINTS_RETRY` | simple majority               | 155(1)  |
//!
//! Each vote needs a quorum. A vote held without quorum is refused and the
//! attempt is not consumed. `FAILED` obliges the President to shorten the
//! Sejm's term (Art. 155(2)).

use serde::{Deserialize, Serialize};

use charter_core::{
    check_quorum_cited, evaluate_majority_cited, Article, Chamber, Majority, ProcedureId,
    ReferenceBase, Violation, VoteTally, Window, SEJM_SEATS,
};

use crate::history::{refused, History, Procedure, Stage, Trigger, VoteOutcome};

const ART_154_1: Article = Article::cite("154(1)");
const ART_154_2: Article = Article::cite("154(2)");
const ART_154_3: Article = Article::cite("154(3)");
const ART_155_1: Article = Article::cite("155(1)");

// ─── Formation Stage ─────────────────────────────────────────────────

/// Stage of the government formation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormationStage {
    /// Attempt 1: the President's nominee seeks a vote of confidence.
    PresidentDesignates,
    /// Attempt 2: the Sejm elects its own Prime Minister.
    SejmElects,
    /// Attempt 3: the President's new nominee seeks confidence.
    PresidentAppointsRetry,
    /// A Council of Ministers won confidence (terminal).
    Success,
    /// All three attempts failed (terminal).
    Failed,
}

impl FormationStage {
    /// All stages in declaration order.
    pub const ALL: [FormationStage; 5] = [
        Self::PresidentDesignates,
        Self::SejmElects,
        Self::PresidentAppointsRetry,
        Self::Success,
        Self::Failed,
    ];

    /// Attempt number for the non-terminal stages.
    pub fn attempt(self) -> Option<u8> {
        match self {
            Self::PresidentDesignates => Some(1),
            Self::SejmElects => Some(2),
            Self::PresidentAppointsRetry => Some(3),
            Self::Success | Self::Failed => None,
        }
    }
}

impl Stage for FormationStage {
    const MACHINE: &'static str = "formation";
    const INITIAL: Self = Self::PresidentDesignates;

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl std::fmt::Display for FormationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PresidentDesignates => "PRESIDENT_DESIGNATES",
            Self::SejmElects => "SEJM_ELECTS",
            Self::PresidentAppointsRetry => "PRESIDENT_APPOINTS_RETRY",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Rule applied at one attempt.
struct AttemptRule {
    requirement: Majority,
    reference_base: ReferenceBase,
    article: Article,
    on_failure: FormationStage,
}

fn rule_for(stage: FormationStage) -> Option<AttemptRule> {
    let absolute = ReferenceBase::Seats(SEJM_SEATS);
    match stage {
        FormationStage::PresidentDesignates => Some(AttemptRule {
            requirement: Majority::Absolute,
            reference_base: absolute,
            article: ART_154_2,
            on_failure: FormationStage::SejmElects,
        }),
        FormationStage::SejmElects => Some(AttemptRule {
            requirement: Majority::Absolute,
            reference_base: absolute,
            article: ART_154_3,
            on_failure: FormationStage::PresidentAppointsRetry,
        }),
        FormationStage::PresidentAppointsRetry => Some(AttemptRule {
            requirement: Majority::Simple,
            reference_base: ReferenceBase::VotesCast,
            article: ART_155_1,
            on_failure: FormationStage::Failed,
        }),
        FormationStage::Success | FormationStage::Failed => None,
    }
}

// ─── Government Formation ────────────────────────────────────────────

/// Subject of a formation sequence: the Sejm term it takes place in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormationContext {
    /// Description of the occasion, e.g. "after the 2023 election".
    pub occasion: String,
}

/// A government formation sequence with its stage and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GovernmentFormation {
    id: ProcedureId,
    context: FormationContext,
    stage: FormationStage,
    history: History<FormationStage>,
}

impl Procedure for GovernmentFormation {
    type Stage = FormationStage;
    type Subject = FormationContext;

    fn id(&self) -> ProcedureId {
        self.id
    }

    fn subject(&self) -> &FormationContext {
        &self.context
    }

    fn stage(&self) -> FormationStage {
        self.stage
    }

    fn history(&self) -> &History<FormationStage> {
        &self.history
    }
}

impl GovernmentFormation {
    /// Start at attempt 1 (`PRESIDENT_DESIGNATES`, Art. 154(1)).
    pub fn new(occasion: impl Into<String>) -> Self {
        Self {
            id: ProcedureId::new(),
            context: FormationContext {
                occasion: occasion.into(),
            },
            stage: FormationStage::PresidentDesignates,
            history: History::new(),
        }
    }

    /// Current attempt number, `None` once the sequence has ended.
    pub fn attempt(&self) -> Option<u8> {
        self.stage.attempt()
    }

    /// Whether the Sejm must be dissolved (Art. 155(2)).
    pub fn dissolution_required(&self) -> bool {
        self.stage == FormationStage::Failed
    }

    /// Prime Minister who won confidence, if any.
    pub fn prime_minister(&self) -> Option<&str> {
        self.history.iter().find_map(|e| match &e.trigger {
            Trigger::Confidence {
                nominee,
                passed: true,
                ..
            } => Some(nominee.as_str()),
            _ => None,
        })
    }

    /// Attempt 1: confidence vote on the President's nominee (Art. 154(2)).
    pub fn confidence_vote(
        &mut self,
        nominee: &str,
        tally: &VoteTally,
    ) -> Result<VoteOutcome, Violation> {
        self.require(FormationStage::PresidentDesignates, ART_154_2)?;
        self.hold_vote(nominee, tally)
    }

    /// Attempt 2: the Sejm elects its own candidate (Art. 154(3)).
    pub fn sejm_election_vote(
        &mut self,
        nominee: &str,
        tally: &VoteTally,
    ) -> Result<VoteOutcome, Violation> {
        self.require(FormationStage::SejmElects, ART_154_3)?;
        self.hold_vote(nominee, tally)
    }

    /// Attempt 3: confidence vote on the President's second nominee (Art. 155(1)).
    pub fn retry_confidence_vote(
        &mut self,
        nominee: &str,
        tally: &VoteTally,
    ) -> Result<VoteOutcome, Violation> {
        self.require(FormationStage::PresidentAppointsRetry, ART_155_1)?;
        self.hold_vote(nominee, tally)
    }

    /// Hold the vote due at the current attempt.
    pub fn vote(&mut self, nominee: &str, tally: &VoteTally) -> Result<VoteOutcome, Violation> {
        match self.stage {
            FormationStage::PresidentDesignates => self.confidence_vote(nominee, tally),
            FormationStage::SejmElects => self.sejm_election_vote(nominee, tally),
            FormationStage::PresidentAppointsRetry => self.retry_confidence_vote(nominee, tally),
            FormationStage::Success | FormationStage::Failed => Err(self.procedural(
                ART_154_1,
                "the formation sequence has ended; no further vote may be held",
            )),
        }
    }

    fn hold_vote(&mut self, nominee: &str, tally: &VoteTally) -> Result<VoteOutcome, Violation> {
        let (rule, attempt) = match (rule_for(self.stage), self.stage.attempt()) {
            (Some(rule), Some(attempt)) => (rule, attempt),
            _ => {
                return Err(self.procedural(ART_154_1, "the formation sequence has ended"));
            }
        };
        if nominee.trim().is_empty() {
            return Err(self.procedural(rule.article, "a candidate for Prime Minister must be named"));
        }
        if tally.chamber() != Chamber::Sejm {
            return Err(self.procedural(
                rule.article,
                format!("confidence is voted by the Sejm, got {}", tally.chamber()),
            ));
        }
        check_quorum_cited(tally.attendance(), SEJM_SEATS, rule.article.clone())
            .map_err(|v| refused(self.stage, v))?;

        let result = evaluate_majority_cited(
            tally,
            rule.requirement,
            rule.reference_base,
            rule.article.clone(),
        );
        let passed = result.is_ok();
        let next = if passed {
            FormationStage::Success
        } else {
            rule.on_failure
        };
        // A failed attempt opens the 14-day period of the next one.
        let window = match next {
            FormationStage::SejmElects => Some(Window::new(14, ART_154_3)),
            FormationStage::PresidentAppointsRetry => Some(Window::new(14, ART_155_1)),
            _ => None,
        };
        let trigger = Trigger::Confidence {
            attempt,
            nominee: nominee.to_string(),
            tally: tally.clone(),
            requirement: rule.requirement,
            reference_base: rule.reference_base,
            passed,
        };
        self.history.append(self.stage, next, trigger, window);
        self.stage = next;
        Ok(match result {
            Ok(()) => VoteOutcome::Passed,
            Err(v) => VoteOutcome::Failed(v),
        })
    }

    fn require(&self, expected: FormationStage, article: Article) -> Result<(), Violation> {
        if self.stage.is_terminal() {
            return Err(self.procedural(
                article,
                format!("the formation sequence ended in {}", self.stage),
            ));
        }
        if self.stage != expected {
            return Err(self.procedural(
                article,
                format!(
                    "vote belongs to {expected}, the sequence is at {}",
                    self.stage
                ),
            ));
        }
        Ok(())
    }

    fn procedural(&self, article: Article, message: impl Into<String>) -> Violation {
        refused(
            self.stage,
            Violation::government_formation(article, self.stage, message),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::ViolationKind;

    fn sejm(votes_for: u64, against: u64) -> VoteTally {
        VoteTally::new(Chamber::Sejm, votes_for, against, 0)
    }

    fn formation() -> GovernmentFormation {
        GovernmentFormation::new("after the 2023 election")
    }

    fn at(stage: FormationStage) -> GovernmentFormation {
        let mut f = formation();
        let tallies: &[(u64, u64)] = match stage {
            FormationStage::PresidentDesignates => &[],
            FormationStage::SejmElects => &[(200, 230)],
            FormationStage::PresidentAppointsRetry => &[(200, 230), (200, 230)],
            FormationStage::Failed => &[(200, 230), (200, 230), (200, 230)],
            FormationStage::Success => &[(240, 200)],
        };
        for (votes_for, against) in tallies {
            let _ = f.vote("Candidate", &sejm(*votes_for, *against)).unwrap();
        }
        assert_eq!(f.stage(), stage);
        f
    }

    #[test]
    fn test_three_failed_attempts_end_in_failure() {
        let mut f = formation();
        let tally = sejm(200, 230);
        for expected in [
            FormationStage::SejmElects,
            FormationStage::PresidentAppointsRetry,
            FormationStage::Failed,
        ] {
            let outcome = f.vote("Jan Nowak", &tally).unwrap();
            assert_eq!(
                outcome.violation().map(Violation::kind),
                Some(ViolationKind::Majority)
            );
            assert_eq!(f.stage(), expected);
        }
        assert!(f.dissolution_required());
        assert!(f.is_terminal());
        assert_eq!(f.attempt(), None);
        assert_eq!(f.prime_minister(), None);
    }

    #[test]
    fn test_third_attempt_needs_only_simple_majority() {
        let mut f = formation();
        let tally = sejm(220, 200);
        // 440 < 460: fails the absolute majority twice.
        assert!(!f.vote("A", &tally).unwrap().is_passed());
        assert!(!f.vote("B", &tally).unwrap().is_passed());
        assert_eq!(f.attempt(), Some(3));
        assert!(f.vote("C", &tally).unwrap().is_passed());
        assert_eq!(f.stage(), FormationStage::Success);
        assert_eq!(f.prime_minister(), Some("C"));
        assert!(!f.dissolution_required());
    }

    #[test]
    fn test_attempts_recorded_in_strictly_increasing_order() {
        let f = at(FormationStage::Failed);
        let attempts: Vec<u8> = f
            .history()
            .iter()
            .filter_map(|e| match &e.trigger {
                Trigger::Confidence { attempt, .. } => Some(*attempt),
                _ => None,
            })
            .collect();
        assert_eq!(attempts, vec![1, 2, 3]);
        assert_eq!(f.history().entries()[0].window.as_ref().map(|w| w.days), Some(14));
        assert!(f.history().entries()[2].window.is_none());
    }

    #[test]
    fn test_quorum_failure_does_not_consume_attempt() {
        let mut f = formation();
        let before = f.clone();
        let err = f.vote("A", &sejm(100, 20)).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::Quorum);
        assert_eq!(err.article().as_str(), "154(2)");
        assert_eq!(f, before);
    }

    #[test]
    fn test_named_operation_refused_at_wrong_attempt() {
        for stage in FormationStage::ALL {
            let record = at(stage);
            type Named = fn(&mut GovernmentFormation, &str, &VoteTally) -> Result<VoteOutcome, Violation>;
            let ops: [(FormationStage, Named); 3] = [
                (FormationStage::PresidentDesignates, GovernmentFormation::confidence_vote),
                (FormationStage::SejmElects, GovernmentFormation::sejm_election_vote),
                (
                    FormationStage::PresidentAppointsRetry,
                    GovernmentFormation::retry_confidence_vote,
                ),
            ];
            for (allowed, op) in ops {
                if allowed == stage {
                    continue;
                }
                let mut attempt = record.clone();
                let err = op(&mut attempt, "X", &sejm(300, 10)).unwrap_err();
                assert_eq!(err.kind(), ViolationKind::GovernmentFormation);
                assert_eq!(attempt, record);
            }
        }
    }

    #[test]
    fn test_terminal_rejects_dispatcher() {
        for stage in [FormationStage::Success, FormationStage::Failed] {
            let mut f = at(stage);
            let before = f.clone();
            let err = f.vote("Late", &sejm(300, 10)).unwrap_err();
            assert_eq!(err.kind(), ViolationKind::GovernmentFormation);
            assert_eq!(err.stage(), Some(stage.to_string().as_str()));
            assert_eq!(f, before);
        }
    }

    #[test]
    fn test_nominee_and_chamber_required() {
        let mut f = formation();
        assert_eq!(
            f.vote("  ", &sejm(300, 10)).unwrap_err().kind(),
            ViolationKind::GovernmentFormation
        );
        let senate = VoteTally::new(Chamber::Senate, 80, 10, 0);
        assert_eq!(
            f.vote("A", &senate).unwrap_err().kind(),
            ViolationKind::GovernmentFormation
        );
        assert!(f.history().is_empty());
    }
}
