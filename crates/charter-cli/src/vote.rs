//! # Vote Arithmetic Commands
//!
//! `charter majority` evaluates a tally against one of the four majority
//! requirements; `charter quorum` checks attendance. Both print a report
//! and exit with 2 when the rule is violated.
//!
//! ```bash
//! charter majority --chamber sejm --for 231 --against 200 --requirement absolute --base seats
//! charter majority --chamber sejm --for 240 --against 160 --requirement three-fifths
//! charter quorum --present 229
//! ```

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use charter_core::{
    check_quorum, evaluate_majority, quorum_required, Chamber, Majority, ReferenceBase,
    Violation, VoteTally,
};

use crate::config::CliConfig;
use crate::{emit, EXIT_OK, EXIT_VIOLATION};

/// Voting body, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChamberArg {
    /// The Sejm.
    Sejm,
    /// The Senate.
    Senate,
    /// The electorate in a referendum.
    Electorate,
}

impl From<ChamberArg> for Chamber {
    fn from(value: ChamberArg) -> Self {
        match value {
            ChamberArg::Sejm => Chamber::Sejm,
            ChamberArg::Senate => Chamber::Senate,
            ChamberArg::Electorate => Chamber::Electorate,
        }
    }
}

/// Denominator of a majority, as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BaseArg {
    /// All votes cast, abstentions included.
    VotesCast,
    /// The statutory number of seats of the chamber.
    Seats,
}

/// Arguments of `charter majority`.
#[derive(Args, Debug)]
pub struct MajorityArgs {
    /// Voting body.
    #[arg(long, value_enum, default_value = "sejm")]
    pub chamber: ChamberArg,

    /// Votes in favour.
    #[arg(long = "for")]
    pub votes_for: u64,

    /// Votes against.
    #[arg(long = "against")]
    pub votes_against: u64,

    /// Abstentions.
    #[arg(long = "abstain", default_value_t = 0)]
    pub abstentions: u64,

    /// Members present, when different from the votes cast.
    #[arg(long)]
    pub present: Option<u64>,

    /// simple, absolute, two-thirds or three-fifths.
    #[arg(long)]
    pub requirement: Majority,

    /// What the majority is measured against.
    #[arg(long, value_enum, default_value = "votes-cast")]
    pub base: BaseArg,

    /// Seat count for `--base seats`, overriding the configuration.
    #[arg(long)]
    pub seats: Option<u64>,
}

/// Arguments of `charter quorum`.
#[derive(Args, Debug)]
pub struct QuorumArgs {
    /// Members present.
    #[arg(long)]
    pub present: u64,

    /// Statutory number of members; defaults to the chamber's seats.
    #[arg(long)]
    pub total: Option<u64>,

    /// Chamber whose seats are used when `--total` is absent.
    #[arg(long, value_enum, default_value = "sejm")]
    pub chamber: ChamberArg,
}

/// Result of `charter majority`.
#[derive(Debug, Serialize)]
pub struct MajorityReport {
    /// The tally evaluated.
    pub tally: VoteTally,
    /// Requirement applied.
    pub requirement: Majority,
    /// Base resolved for this tally.
    pub reference_base: ReferenceBase,
    /// Whether the quorum was met, when attendance was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quorum_met: Option<bool>,
    /// Whether the vote carried.
    pub passed: bool,
    /// The violation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
}

/// Result of `charter quorum`.
#[derive(Debug, Serialize)]
pub struct QuorumReport {
    /// Members present.
    pub present: u64,
    /// Statutory number of members.
    pub statutory_total: u64,
    /// Attendance needed.
    pub required: u64,
    /// Whether the quorum was met.
    pub met: bool,
    /// The violation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
}

/// Build the majority report without printing it.
pub fn evaluate(args: &MajorityArgs, config: &CliConfig) -> Result<MajorityReport> {
    let chamber = Chamber::from(args.chamber);
    let mut tally = VoteTally::new(chamber, args.votes_for, args.votes_against, args.abstentions);
    if let Some(present) = args.present {
        tally = tally.with_attendance(present);
    }
    let reference_base = match args.base {
        BaseArg::VotesCast => ReferenceBase::VotesCast,
        BaseArg::Seats => {
            let seats = args
                .seats
                .or_else(|| config.seats.of(chamber))
                .with_context(|| format!("the {chamber} has no statutory seat count; pass --seats"))?;
            ReferenceBase::Seats(seats)
        }
    };

    // Quorum is checked only when attendance is given explicitly.
    let quorum = match (args.present, args.seats.or_else(|| config.seats.of(chamber))) {
        (Some(present), Some(total)) => Some(check_quorum(present, total)),
        _ => None,
    };
    let quorum_met = quorum.as_ref().map(Result::is_ok);
    let result = match quorum {
        Some(Err(v)) => Err(v),
        _ => evaluate_majority(&tally, args.requirement, reference_base),
    };
    tracing::info!(
        chamber = %chamber,
        requirement = %args.requirement,
        votes_for = args.votes_for,
        votes_against = args.votes_against,
        passed = result.is_ok(),
        "majority evaluated"
    );
    Ok(MajorityReport {
        tally,
        requirement: args.requirement,
        reference_base,
        quorum_met,
        passed: result.is_ok(),
        violation: result.err(),
    })
}

/// Execute `charter majority`.
pub fn run_majority(args: &MajorityArgs, config: &CliConfig) -> Result<u8> {
    let report = evaluate(args, config)?;
    emit(config.output, &report, |r| match &r.violation {
        None => format!("PASSED: {} ({})", r.requirement.label(), r.tally),
        Some(v) => format!("FAILED: {v}"),
    })?;
    Ok(if report.passed { EXIT_OK } else { EXIT_VIOLATION })
}

/// Execute `charter quorum`.
pub fn run_quorum(args: &QuorumArgs, config: &CliConfig) -> Result<u8> {
    let chamber = Chamber::from(args.chamber);
    let total = args
        .total
        .or_else(|| config.seats.of(chamber))
        .with_context(|| format!("the {chamber} has no statutory seat count; pass --total"))?;
    let result = check_quorum(args.present, total);
    let report = QuorumReport {
        present: args.present,
        statutory_total: total,
        required: quorum_required(total),
        met: result.is_ok(),
        violation: result.err(),
    };
    emit(config.output, &report, |r| match &r.violation {
        None => format!(
            "QUORUM MET: {} present, {} required (of {})",
            r.present, r.required, r.statutory_total
        ),
        Some(v) => format!("NO QUORUM: {v}"),
    })?;
    Ok(if report.met { EXIT_OK } else { EXIT_VIOLATION })
}
