//! # charter-rules — Standalone Constitutional Predicates
//!
//! Each predicate is a pure function over [`charter_core`] records. It
//! returns `Ok(())` when the rule holds and otherwise exactly one
//! [`Violation`](charter_core::Violation) discriminant with the provision
//! it cites. There is no warning tier and no silent `false`.
//!
//! | Module         | Provisions                          |
//! |----------------|-------------------------------------|
//! | [`eligibility`] | Art. 99, 127                       |
//! | [`parliament`]  | Art. 103, 105, 125                 |
//! | [`rights`]      | Art. 31(3), 38–40, 55              |
//! | [`finance`]     | Art. 216(5), 227(4)                |
//! | [`emergency`]   | Art. 228–232                       |
//! | [`government`]  | Art. 156, 158, 159                 |
//! | [`judiciary`]   | Art. 179, 194                      |
//! | [`oversight`]   | Art. 171, 205, 209, 214            |
//! | [`hierarchy`]   | Art. 87                            |
//!
//! Where a rule has several conditions, every failed condition is listed
//! in the message of the single violation returned.

pub mod eligibility;
pub mod emergency;
pub mod finance;
pub mod government;
pub mod hierarchy;
pub mod judiciary;
pub mod oversight;
pub mod parliament;
pub mod rights;

pub use eligibility::{
    check_presidential_eligibility, check_presidential_term, check_sejm_eligibility,
    check_senate_eligibility,
};
pub use emergency::{
    check_amendment_permitted, check_election_permitted, validate_emergency_declaration,
    validate_emergency_extension,
};
pub use finance::{check_central_bank_president, check_debt_ceiling};
pub use government::{
    validate_minister_indictment, validate_minister_no_confidence, validate_no_confidence,
};
pub use hierarchy::check_legal_hierarchy;
pub use judiciary::{check_judicial_appointment, check_tribunal_bench};
pub use oversight::{check_oversight_appointment, validate_local_dissolution};
pub use parliament::{check_incompatibility, check_parliamentary_immunity, validate_referendum};
pub use rights::{check_personal_inviolability, validate_extradition, validate_rights_restriction};

/// Join failed conditions into one message, or `None` when none failed.
pub(crate) fn failures(conditions: &[(bool, String)]) -> Option<String> {
    let failed: Vec<&str> = conditions
        .iter()
        .filter(|(failed, _)| *failed)
        .map(|(_, reason)| reason.as_str())
        .collect();
    (!failed.is_empty()).then(|| failed.join("; "))
}
