//! # charter-state — Procedural State Machines
//!
//! Three independent machines, each a record holding an immutable subject,
//! a current stage, and an append-only [`History`]:
//!
//! - [`BillProcedure`]: the ordinary legislative procedure (Art. 118–123).
//! - [`GovernmentFormation`]: the three-attempt formation sequence
//!   (Art. 154–155).
//! - [`AmendmentProcedure`]: amending the Constitution (Art. 235).
//!
//! ## Transition Contract
//!
//! Every operation validates the current stage first. An operation invoked
//! from the wrong stage, from a terminal stage, in the wrong chamber, or
//! without a quorum returns a cited [`Violation`](charter_core::Violation)
//! and leaves the record exactly as it was. A vote that was validly held
//! but failed moves the record to its failure successor and reports the
//! violation through [`VoteOutcome::Failed`].
//!
//! Machines never read a clock. Deadlines are recorded as
//! [`Window`](charter_core::Window)s on the history entry that opens them.

pub mod amendment;
pub mod bill;
pub mod formation;
pub mod history;

pub use amendment::{AmendmentProcedure, AmendmentStage};
pub use bill::{BillProcedure, BillStage};
pub use formation::{FormationContext, FormationStage, GovernmentFormation};
pub use history::{History, HistoryError, Procedure, Stage, TransitionRecord, Trigger, VoteOutcome};
