//! # charter-core — Foundational Types for the Constitutional Rulebook
//!
//! Every other crate in the workspace depends on `charter-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One violation enum.** [`Violation`] has one variant per rule family,
//!    22 in total. Every rule either holds or fails with exactly one variant,
//!    and every variant carries a non-empty [`Article`] citation.
//!
//! 2. **Exact vote arithmetic.** Majorities and quorums are comparisons of
//!    integer products computed in `u128`. No division, no floats. The
//!    reference base is always explicit ([`ReferenceBase`]).
//!
//! 3. **Exact decimals.** Monetary figures are [`Decimal`]: an `i128`
//!    mantissa and a scale. Comparisons are exact; overflow is an error.
//!
//! 4. **Deadlines are data.** A [`Window`] records how long a procedure
//!    grants; nothing in this crate reads a clock.
//!
//! 5. **`sha256_digest()` accepts only `&CanonicalBytes`.** Audit digests
//!    always flow through JCS canonicalization.
//!
//! ## Crate Policy
//!
//! - Leaf of the DAG: no dependencies on other `charter-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public record types derive `Debug`, `Clone`, `PartialEq` and
//!   `Serialize`/`Deserialize`.

pub mod canonical;
pub mod decimal;
pub mod digest;
pub mod error;
pub mod identity;
pub mod legislation;
pub mod records;
pub mod temporal;
pub mod violation;
pub mod voting;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use decimal::{Decimal, DECIMAL_SCALE_MAX};
pub use digest::{sha256_digest, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, CharterError};
pub use identity::ProcedureId;
pub use legislation::{
    AmendmentInitiative, AmendmentProposal, Bill, Chapter, PresidentialDecision,
    ReferendumResult, SenateDecision, TribunalRuling, AMENDMENT_MIN_DEPUTIES,
};
pub use records::{
    CentralBankCandidate, Citizen, Court, EmergencyDeclaration, EmergencyKind,
    ExtraditionRequest, Judge, LegalActKind, LocalDissolution, MinisterNoConfidenceMotion,
    NoConfidenceMotion, OversightAppointment, OversightOrgan, PersonalMeasure, PublicDebt,
    RightsRestriction,
};
pub use temporal::{days_between, Window};
pub use violation::{Article, Citation, Violation, ViolationKind, VIOLATION_KIND_COUNT};
pub use voting::{
    check_quorum, check_quorum_cited, evaluate_majority, evaluate_majority_cited,
    evaluate_vote, quorum_required, Chamber, Fraction, Majority, ReferenceBase, Threshold,
    VoteTally, SEJM_SEATS, SENATE_SEATS,
};
