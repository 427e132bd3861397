//! # Append-Only Transition History
//!
//! Shared by all three procedural machines. A [`History`] is an ordered log
//! of [`TransitionRecord`]s that can only grow: the append path is private
//! to this crate and there is no removal or edit API.
//!
//! ## Audit
//!
//! - [`History::verify_sequence`] checks that entries are numbered `0..n`
//!   and that each entry starts where the previous one ended. A history
//!   loaded from an external log can be validated before it is trusted.
//! - [`History::digest`] pins a snapshot with a SHA-256 over the JCS
//!   canonical form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use charter_core::{
    sha256_digest, CanonicalBytes, CharterError, ContentDigest, Majority, PresidentialDecision,
    ProcedureId, ReferenceBase, ReferendumResult, SenateDecision, TribunalRuling, Violation,
    VoteTally, Window,
};

// ─── Stage Trait ─────────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for crate::bill::BillStage {}
    impl Sealed for crate::formation::FormationStage {}
    impl Sealed for crate::amendment::AmendmentStage {}
}

/// A closed stage enumeration of one procedural machine.
///
/// Sealed: only the three stage enums of this crate implement it.
pub trait Stage:
    private::Sealed + Copy + Eq + std::fmt::Debug + std::fmt::Display + Serialize
{
    /// Name of the machine, used in logs.
    const MACHINE: &'static str;

    /// The unique initial stage.
    const INITIAL: Self;

    /// Whether no further transition is legal.
    fn is_terminal(&self) -> bool;
}

// ─── Procedure Trait ─────────────────────────────────────────────────

/// Read-only view shared by every procedural record.
pub trait Procedure {
    /// Stage enumeration of the machine.
    type Stage: Stage;
    /// The immutable subject the procedure is about.
    type Subject;

    /// Identifier assigned at creation.
    fn id(&self) -> ProcedureId;

    /// The subject.
    fn subject(&self) -> &Self::Subject;

    /// Current stage.
    fn stage(&self) -> Self::Stage;

    /// Full transition history.
    fn history(&self) -> &History<Self::Stage>;

    /// Whether the record accepts no further transitions.
    fn is_terminal(&self) -> bool {
        self.stage().is_terminal()
    }

    /// Digest of the current history.
    fn history_digest(&self) -> Result<ContentDigest, CharterError> {
        self.history().digest()
    }
}

// ─── Trigger ─────────────────────────────────────────────────────────

/// What caused a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// A procedural step with no vote attached.
    Event {
        /// What happened.
        description: String,
    },
    /// A chamber vote.
    Vote {
        /// The tally.
        tally: VoteTally,
        /// Required majority.
        requirement: Majority,
        /// Base the majority was evaluated against.
        reference_base: ReferenceBase,
        /// Whether the vote carried.
        passed: bool,
    },
    /// A confidence vote in a government formation attempt.
    Confidence {
        /// Attempt number, 1 to 3.
        attempt: u8,
        /// Candidate for Prime Minister.
        nominee: String,
        /// The tally.
        tally: VoteTally,
        /// Required majority.
        requirement: Majority,
        /// Base the majority was evaluated against.
        reference_base: ReferenceBase,
        /// Whether the vote carried.
        passed: bool,
    },
    /// A Senate resolution on a bill.
    SenateResolution {
        /// The resolution adopted.
        decision: SenateDecision,
        /// The Senate vote.
        tally: VoteTally,
    },
    /// The President's action on a bill.
    PresidentialDecision {
        /// The decision.
        decision: PresidentialDecision,
    },
    /// A Constitutional Tribunal ruling.
    TribunalRuling {
        /// The ruling.
        ruling: TribunalRuling,
    },
    /// Removal of provisions found unconstitutional.
    Excision {
        /// The provisions removed.
        provisions: Vec<String>,
    },
    /// A referendum.
    Referendum {
        /// The result.
        result: ReferendumResult,
        /// Whether the result was binding and in favour.
        passed: bool,
    },
}

impl Trigger {
    pub(crate) fn event(description: impl Into<String>) -> Self {
        Self::Event {
            description: description.into(),
        }
    }
}

// ─── Transition Record ───────────────────────────────────────────────

/// One entry of a procedural history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// Position in the history, starting at 0.
    pub sequence: u64,
    /// Stage before the transition.
    pub from: S,
    /// Stage after the transition.
    pub to: S,
    /// The triggering vote, decision, or event.
    pub trigger: Trigger,
    /// Time window opened by this transition, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Inconsistencies found by [`History::verify_sequence`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// An entry carries the wrong sequence number.
    #[error("history entry at position {position} has sequence {found}")]
    SequenceGap {
        /// Index in the log.
        position: usize,
        /// Sequence number found.
        found: u64,
    },

    /// An entry does not start where the previous one ended.
    #[error("history entry {sequence} starts at {found}, expected {expected}")]
    Discontinuity {
        /// Sequence number of the offending entry.
        sequence: u64,
        /// Stage the entry should have started from.
        expected: String,
        /// Stage it starts from.
        found: String,
    },

    /// The history continues past a terminal stage.
    #[error("history entry {sequence} leaves terminal stage {stage}")]
    PastTerminal {
        /// Sequence number of the offending entry.
        sequence: u64,
        /// The terminal stage.
        stage: String,
    },
}

// ─── History ─────────────────────────────────────────────────────────

/// Ordered, append-only log of transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History<S> {
    entries: Vec<TransitionRecord<S>>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S: Stage> History<S> {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in order.
    pub fn entries(&self) -> &[TransitionRecord<S>] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has happened yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.entries.last()
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TransitionRecord<S>> {
        self.entries.iter()
    }

    /// Every stage visited, starting with the initial stage.
    pub fn path(&self) -> Vec<S> {
        std::iter::once(S::INITIAL)
            .chain(self.entries.iter().map(|e| e.to))
            .collect()
    }

    /// Whether the record has ever entered `stage`.
    pub fn visited(&self, stage: S) -> bool {
        self.entries.iter().any(|e| e.to == stage)
    }

    /// Check numbering, continuity from the initial stage, and that nothing
    /// follows a terminal stage.
    pub fn verify_sequence(&self) -> Result<(), HistoryError> {
        let mut current = S::INITIAL;
        for (position, entry) in self.entries.iter().enumerate() {
            if usize::try_from(entry.sequence).ok() != Some(position) {
                return Err(HistoryError::SequenceGap {
                    position,
                    found: entry.sequence,
                });
            }
            if current.is_terminal() {
                return Err(HistoryError::PastTerminal {
                    sequence: entry.sequence,
                    stage: current.to_string(),
                });
            }
            if entry.from != current {
                return Err(HistoryError::Discontinuity {
                    sequence: entry.sequence,
                    expected: current.to_string(),
                    found: entry.from.to_string(),
                });
            }
            current = entry.to;
        }
        Ok(())
    }

    /// SHA-256 digest of the canonical history.
    pub fn digest(&self) -> Result<ContentDigest, CharterError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&canonical))
    }

    /// Append a transition. Only the owning machine calls this, after every
    /// check has passed.
    pub(crate) fn append(&mut self, from: S, to: S, trigger: Trigger, window: Option<Window>) {
        // usize is at most 64 bits on every supported target.
        let sequence = self.entries.len() as u64;
        tracing::debug!(
            machine = S::MACHINE,
            from = %from,
            to = %to,
            sequence,
            "transition applied"
        );
        self.entries.push(TransitionRecord {
            sequence,
            from,
            to,
            trigger,
            window,
        });
    }
}

impl<'a, S> IntoIterator for &'a History<S> {
    type Item = &'a TransitionRecord<S>;
    type IntoIter = std::slice::Iter<'a, TransitionRecord<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Log a refused transition and hand the violation back to the caller.
pub(crate) fn refused<S: Stage>(stage: S, violation: Violation) -> Violation {
    tracing::debug!(
        machine = S::MACHINE,
        stage = %stage,
        kind = %violation.kind(),
        article = %violation.article(),
        "transition refused"
    );
    violation
}

// ─── Vote Outcome ────────────────────────────────────────────────────

/// Result of a vote that was validly held.
///
/// A vote that cannot be held at all (wrong stage, wrong chamber, no
/// quorum) is an `Err` and leaves the record untouched. A vote that was
/// held and failed moves the record to the procedure's failure successor
/// and is reported here with its violation.
#[must_use = "a failed vote carries a violation that must be handled"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote carried.
    Passed,
    /// The vote failed; the record moved to the failure successor.
    Failed(Violation),
}

impl VoteOutcome {
    /// `true` if the vote carried.
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// The violation of a failed vote.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Passed => None,
            Self::Failed(v) => Some(v),
        }
    }

    /// `Ok(())` if the vote carried, otherwise the violation.
    pub fn into_result(self) -> Result<(), Violation> {
        match self {
            Self::Passed => Ok(()),
            Self::Failed(v) => Err(v),
        }
    }
}
