//! # Procedure Replay
//!
//! `charter replay <scenario>` builds one procedural record, applies a
//! list of events in order, and prints the final stage, the full history,
//! and the history digest.
//!
//! ## Scenario Format
//!
//! The `machine` field selects the procedure. Events without data are bare
//! names; events with data are single-key maps.
//!
//! ```yaml
//! machine: bill
//! bill:
//!   title: Act on Public Roads
//!   sponsor: Council of Ministers
//! events:
//!   - submit
//!   - sejm_vote: { chamber: sejm, votes_for: 240, votes_against: 200 }
//!   - senate_receive
//!   - senate_resolve:
//!       decision: accept
//!       tally: { chamber: senate, votes_for: 60, votes_against: 30 }
//!   - forward_to_president
//!   - president_receive
//!   - president_decide: sign
//!   - promulgate
//! ```
//!
//! Replay stops at the first refused event. A vote that is held but fails
//! is not a refusal: the record moves to the failure stage and replay
//! continues. Exit code 2 means an event was refused.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use charter_core::{
    AmendmentProposal, Bill, PresidentialDecision, ProcedureId, ReferendumResult,
    SenateDecision, TribunalRuling, Violation, VoteTally,
};
use charter_state::{
    AmendmentProcedure, BillProcedure, GovernmentFormation, Procedure, Stage, Trigger,
    VoteOutcome,
};

use crate::config::CliConfig;
use crate::{emit, load_document, EXIT_OK, EXIT_VIOLATION};

/// Arguments of `charter replay`.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Scenario file (YAML or JSON).
    pub scenario: PathBuf,
}

// ─── Scenario ───────────────────────────────────────────────────────

/// A procedure and the events to drive it through.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "machine", rename_all = "snake_case")]
pub enum Scenario {
    /// Ordinary legislative procedure.
    Bill {
        /// The bill.
        bill: Bill,
        /// Events in order.
        #[serde(default)]
        events: Vec<BillEvent>,
    },
    /// Formation of the Council of Ministers.
    Formation {
        /// Why a government is being formed.
        occasion: String,
        /// Events in order.
        #[serde(default)]
        events: Vec<FormationEvent>,
    },
    /// Amendment of the Constitution.
    Amendment {
        /// The amending bill.
        proposal: AmendmentProposal,
        /// Events in order.
        #[serde(default)]
        events: Vec<AmendmentEvent>,
    },
}

/// Operations on a bill procedure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillEvent {
    Submit,
    Withdraw,
    SejmVote(VoteTally),
    SenateReceive,
    SenateResolve {
        decision: SenateDecision,
        tally: VoteTally,
    },
    SenateDeadlineLapsed,
    SejmOverrideSenate(VoteTally),
    ForwardToPresident,
    PresidentReceive,
    PresidentDecide(PresidentialDecision),
    OverrideVeto(VoteTally),
    SignAfterOverride,
    TribunalRuling(TribunalRuling),
    ExciseProvisions(Vec<String>),
    Promulgate,
}

impl BillEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Withdraw => "withdraw",
            Self::SejmVote(_) => "sejm_vote",
            Self::SenateReceive => "senate_receive",
            Self::SenateResolve { .. } => "senate_resolve",
            Self::SenateDeadlineLapsed => "senate_deadline_lapsed",
            Self::SejmOverrideSenate(_) => "sejm_override_senate",
            Self::ForwardToPresident => "forward_to_president",
            Self::PresidentReceive => "president_receive",
            Self::PresidentDecide(_) => "president_decide",
            Self::OverrideVeto(_) => "override_veto",
            Self::SignAfterOverride => "sign_after_override",
            Self::TribunalRuling(_) => "tribunal_ruling",
            Self::ExciseProvisions(_) => "excise_provisions",
            Self::Promulgate => "promulgate",
        }
    }

    fn apply(&self, bill: &mut BillProcedure) -> Result<VoteOutcome, Violation> {
        let done = |r: Result<(), Violation>| r.map(|()| VoteOutcome::Passed);
        match self {
            Self::Submit => done(bill.submit()),
            Self::Withdraw => done(bill.withdraw()),
            Self::SejmVote(tally) => bill.sejm_vote(tally),
            Self::SenateReceive => done(bill.senate_receive()),
            Self::SenateResolve { decision, tally } => {
                done(bill.senate_resolve(*decision, tally))
            }
            Self::SenateDeadlineLapsed => done(bill.senate_deadline_lapsed()),
            Self::SejmOverrideSenate(tally) => bill.sejm_override_senate(tally),
            Self::ForwardToPresident => done(bill.forward_to_president()),
            Self::PresidentReceive => done(bill.president_receive()),
            Self::PresidentDecide(decision) => done(bill.president_decide(*decision)),
            Self::OverrideVeto(tally) => bill.override_veto(tally),
            Self::SignAfterOverride => done(bill.sign_after_override()),
            Self::TribunalRuling(ruling) => done(bill.tribunal_ruling(ruling.clone())),
            Self::ExciseProvisions(provisions) => done(bill.excise_provisions(provisions)),
            Self::Promulgate => done(bill.promulgate()),
        }
    }
}

/// Votes in a government formation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationEvent {
    /// Attempt 1.
    ConfidenceVote { nominee: String, tally: VoteTally },
    /// Attempt 2.
    SejmElectionVote { nominee: String, tally: VoteTally },
    /// Attempt 3.
    RetryConfidenceVote { nominee: String, tally: VoteTally },
    /// Whichever attempt is due.
    Vote { nominee: String, tally: VoteTally },
}

impl FormationEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ConfidenceVote { .. } => "confidence_vote",
            Self::SejmElectionVote { .. } => "sejm_election_vote",
            Self::RetryConfidenceVote { .. } => "retry_confidence_vote",
            Self::Vote { .. } => "vote",
        }
    }

    fn apply(&self, formation: &mut GovernmentFormation) -> Result<VoteOutcome, Violation> {
        match self {
            Self::ConfidenceVote { nominee, tally } => formation.confidence_vote(nominee, tally),
            Self::SejmElectionVote { nominee, tally } => {
                formation.sejm_election_vote(nominee, tally)
            }
            Self::RetryConfidenceVote { nominee, tally } => {
                formation.retry_confidence_vote(nominee, tally)
            }
            Self::Vote { nominee, tally } => formation.vote(nominee, tally),
        }
    }
}

/// Operations on a constitutional amendment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentEvent {
    CompleteFirstReading,
    SejmVote(VoteTally),
    SenateVote(VoteTally),
    Referendum(ReferendumResult),
    PresidentSign,
}

impl AmendmentEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::CompleteFirstReading => "complete_first_reading",
            Self::SejmVote(_) => "sejm_vote",
            Self::SenateVote(_) => "senate_vote",
            Self::Referendum(_) => "referendum",
            Self::PresidentSign => "president_sign",
        }
    }

    fn apply(&self, amendment: &mut AmendmentProcedure) -> Result<VoteOutcome, Violation> {
        match self {
            Self::CompleteFirstReading => {
                amendment.complete_first_reading().map(|()| VoteOutcome::Passed)
            }
            Self::SejmVote(tally) => amendment.sejm_vote(tally),
            Self::SenateVote(tally) => amendment.senate_vote(tally),
            Self::Referendum(result) => amendment.referendum(result),
            Self::PresidentSign => amendment.president_sign().map(|()| VoteOutcome::Passed),
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────

/// What happened to one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// The transition was taken.
    Applied,
    /// The vote was held and failed; the record moved to its failure stage.
    VoteFailed {
        /// Why the vote failed.
        violation: Violation,
    },
    /// The event was refused and the record left unchanged.
    Refused {
        /// Why it was refused.
        violation: Violation,
    },
}

/// One replayed event.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Position in the scenario, starting at 0.
    pub index: usize,
    /// Event name.
    pub event: &'static str,
    /// Outcome.
    #[serde(flatten)]
    pub status: StepStatus,
}

/// Result of `charter replay`.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// Machine replayed.
    pub machine: &'static str,
    /// Identifier of the record, absent when it could not be created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure_id: Option<ProcedureId>,
    /// Final stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Whether the final stage is terminal.
    pub terminal: bool,
    /// Full transition history.
    pub history: serde_json::Value,
    /// Digest of the history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Per-event outcomes.
    pub steps: Vec<StepReport>,
    /// Whether any event was refused.
    pub refused: bool,
    /// Text rendering of the history.
    #[serde(skip)]
    lines: Vec<String>,
}

fn step(index: usize, event: &'static str, result: Result<VoteOutcome, Violation>) -> StepReport {
    let status = match result {
        Ok(VoteOutcome::Passed) => StepStatus::Applied,
        Ok(VoteOutcome::Failed(violation)) => StepStatus::VoteFailed { violation },
        Err(violation) => StepStatus::Refused { violation },
    };
    StepReport {
        index,
        event,
        status,
    }
}

fn describe(trigger: &Trigger) -> String {
    match trigger {
        Trigger::Event { description } => description.clone(),
        Trigger::Vote {
            tally,
            requirement,
            passed,
            ..
        } => format!("{} ({}) {}", requirement.label(), tally, verdict(*passed)),
        Trigger::Confidence {
            attempt,
            nominee,
            tally,
            passed,
            ..
        } => format!("attempt {attempt}: {nominee} ({tally}) {}", verdict(*passed)),
        Trigger::SenateResolution { decision, tally } => {
            format!("Senate resolution: {decision} ({tally})")
        }
        Trigger::PresidentialDecision { decision } => format!("President: {decision}"),
        Trigger::TribunalRuling { ruling } => format!("Tribunal: {ruling:?}"),
        Trigger::Excision { provisions } => format!("excised {}", provisions.join(", ")),
        Trigger::Referendum { result, passed } => format!(
            "referendum: {} for, {} against of {} eligible {}",
            result.votes_for,
            result.votes_against,
            result.eligible,
            verdict(*passed)
        ),
    }
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "passed"
    } else {
        "failed"
    }
}

/// Apply `events` to `procedure`, stopping at the first refusal, and
/// report the resulting record.
fn drive<P, E>(
    procedure: &mut P,
    events: &[E],
    name: impl Fn(&E) -> &'static str,
    apply: impl Fn(&E, &mut P) -> Result<VoteOutcome, Violation>,
) -> Result<ReplayReport>
where
    P: Procedure,
{
    let mut steps = Vec::with_capacity(events.len());
    for (index, event) in events.iter().enumerate() {
        let result = apply(event, procedure);
        let refused = result.is_err();
        if let Err(v) = &result {
            tracing::warn!(index, event = name(event), stage = %procedure.stage(), "event refused: {v}");
        } else {
            tracing::debug!(index, event = name(event), stage = %procedure.stage(), "event applied");
        }
        steps.push(step(index, name(event), result));
        if refused {
            break;
        }
    }

    let history = procedure.history();
    let lines = history
        .iter()
        .map(|entry| {
            let window = entry
                .window
                .as_ref()
                .map(|w| format!(" [window {w}]"))
                .unwrap_or_default();
            format!(
                "{:>3}  {} -> {}  {}{window}",
                entry.sequence,
                entry.from,
                entry.to,
                describe(&entry.trigger)
            )
        })
        .collect();
    let digest = procedure
        .history_digest()
        .context("computing history digest")?;
    let refused = steps
        .iter()
        .any(|s| matches!(s.status, StepStatus::Refused { .. }));
    Ok(ReplayReport {
        machine: <P::Stage as Stage>::MACHINE,
        procedure_id: Some(procedure.id()),
        stage: Some(procedure.stage().to_string()),
        terminal: procedure.is_terminal(),
        history: serde_json::to_value(history).context("serializing history")?,
        digest: Some(digest.to_string()),
        steps,
        refused,
        lines,
    })
}

/// Replay a scenario without printing.
pub fn replay(scenario: &Scenario) -> Result<ReplayReport> {
    match scenario {
        Scenario::Bill { bill, events } => {
            let mut procedure = BillProcedure::new(bill.clone());
            drive(&mut procedure, events, BillEvent::name, BillEvent::apply)
        }
        Scenario::Formation { occasion, events } => {
            let mut procedure = GovernmentFormation::new(occasion.clone());
            drive(&mut procedure, events, FormationEvent::name, FormationEvent::apply)
        }
        Scenario::Amendment { proposal, events } => {
            match AmendmentProcedure::initiate(proposal.clone()) {
                Ok(mut procedure) => drive(
                    &mut procedure,
                    events,
                    AmendmentEvent::name,
                    AmendmentEvent::apply,
                ),
                Err(violation) => {
                    tracing::warn!("amendment refused at initiation: {violation}");
                    Ok(ReplayReport {
                        machine: "amendment",
                        procedure_id: None,
                        stage: None,
                        terminal: false,
                        history: serde_json::Value::Array(Vec::new()),
                        digest: None,
                        steps: vec![StepReport {
                            index: 0,
                            event: "initiate",
                            status: StepStatus::Refused { violation },
                        }],
                        refused: true,
                        lines: Vec::new(),
                    })
                }
            }
        }
    }
}

fn render(report: &ReplayReport) -> String {
    let mut out = format!("machine: {}\n", report.machine);
    for line in &report.lines {
        out.push_str(line);
        out.push('\n');
    }
    for s in &report.steps {
        match &s.status {
            StepStatus::Applied => {}
            StepStatus::VoteFailed { violation } => {
                out.push_str(&format!("step {} {}: vote failed: {violation}\n", s.index, s.event));
            }
            StepStatus::Refused { violation } => {
                out.push_str(&format!("step {} {}: REFUSED: {violation}\n", s.index, s.event));
            }
        }
    }
    out.push_str(&format!(
        "stage: {}{}\n",
        report.stage.as_deref().unwrap_or("-"),
        if report.terminal { " (terminal)" } else { "" }
    ));
    out.push_str(&format!("digest: {}", report.digest.as_deref().unwrap_or("-")));
    out
}

/// Execute `charter replay`.
pub fn run_replay(args: &ReplayArgs, config: &CliConfig) -> Result<u8> {
    let scenario: Scenario = load_document(&args.scenario)?;
    let report = replay(&scenario)?;
    tracing::info!(
        machine = report.machine,
        stage = report.stage.as_deref().unwrap_or("-"),
        steps = report.steps.len(),
        refused = report.refused,
        "replay complete"
    );
    emit(config.output, &report, render)?;
    Ok(if report.refused { EXIT_VIOLATION } else { EXIT_OK })
}
