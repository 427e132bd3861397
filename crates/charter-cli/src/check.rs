//! # Standalone Predicate Checks
//!
//! `charter check <predicate> --input <file>` loads a YAML or JSON record,
//! runs one predicate from `charter-rules` on it, and reports whether the
//! rule holds. A violation exits with 2.
//!
//! Single-record predicates take the record itself as the document. The
//! others take a small envelope naming each argument:
//!
//! ```yaml
//! # charter check sejm-eligibility --input candidate.yaml
//! citizen:
//!   name: Anna Kowalska
//!   date_of_birth: 2004-06-01
//! election_date: 2025-10-12
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use charter_core::{
    CentralBankCandidate, Chamber, Citizen, EmergencyDeclaration, ExtraditionRequest, Judge,
    LegalActKind, LocalDissolution, MinisterNoConfidenceMotion, NoConfidenceMotion,
    OversightAppointment, PersonalMeasure, PublicDebt, ReferendumResult, RightsRestriction,
    Violation, VoteTally,
};
use charter_rules as rules;

use crate::config::CliConfig;
use crate::{emit, load_document, EXIT_OK, EXIT_VIOLATION};

/// Predicates reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PredicateName {
    /// Art. 99(1): `{citizen, election_date}`.
    SejmEligibility,
    /// Art. 99(2): `{citizen, election_date}`.
    SenateEligibility,
    /// Art. 127(3): `{citizen, election_date, signatures}`.
    PresidentialEligibility,
    /// Art. 127(2): `{consecutive_terms}`.
    PresidentialTerm,
    /// Art. 103: `{office}`.
    Incompatibility,
    /// Art. 105: `{chamber, consent_given}`.
    Immunity,
    /// Art. 125: a referendum result.
    Referendum,
    /// Art. 31(3): a rights restriction.
    RightsRestriction,
    /// Art. 38–40: a measure affecting a person.
    PersonalInviolability,
    /// Art. 55: an extradition request.
    Extradition,
    /// Art. 216(5): `{debt, gdp}`.
    DebtCeiling,
    /// Art. 227(4): a central bank candidate.
    CentralBank,
    /// Art. 229, 230(1), 232: an emergency declaration.
    EmergencyDeclaration,
    /// Art. 230(2): `{declaration, extension_days, sejm_consent, previous_extensions}`.
    EmergencyExtension,
    /// Art. 228(6): `{declaration, date}`.
    AmendmentPermitted,
    /// Art. 228(7): `{declaration, date}`.
    ElectionPermitted,
    /// Art. 158(1): `{motion, tally}`.
    NoConfidence,
    /// Art. 159(1): `{motion, tally}`.
    MinisterNoConfidence,
    /// Art. 156(2): `{signatories, moved_by_president, tally}`.
    MinisterIndictment,
    /// Art. 179: a judge.
    JudicialAppointment,
    /// Art. 194(1): `{judges, term_years}`.
    TribunalBench,
    /// Art. 205, 209, 214: an oversight appointment.
    OversightAppointment,
    /// Art. 171(3): a dissolution request.
    LocalDissolution,
    /// Art. 87: `{subordinate, superior}`.
    LegalHierarchy,
}

/// Arguments of `charter check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Predicate to run.
    #[arg(value_enum)]
    pub predicate: PredicateName,

    /// YAML or JSON input document.
    #[arg(long, short)]
    pub input: PathBuf,
}

/// Result of `charter check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Predicate run.
    pub predicate: PredicateName,
    /// Whether the rule holds.
    pub holds: bool,
    /// The violation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
}

// ─── Input Envelopes ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Candidacy {
    citizen: Citizen,
    election_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresidentialCandidacy {
    citizen: Citizen,
    election_date: NaiveDate,
    signatures: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Terms {
    consecutive_terms: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Office {
    office: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Immunity {
    chamber: Chamber,
    #[serde(default)]
    consent_given: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Extension {
    declaration: EmergencyDeclaration,
    extension_days: u32,
    #[serde(default)]
    sejm_consent: bool,
    #[serde(default)]
    previous_extensions: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatedDeclaration {
    declaration: EmergencyDeclaration,
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Motion<M> {
    motion: M,
    tally: VoteTally,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Indictment {
    #[serde(default)]
    signatories: u64,
    #[serde(default)]
    moved_by_president: bool,
    tally: VoteTally,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Bench {
    judges: u32,
    term_years: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Hierarchy {
    subordinate: LegalActKind,
    superior: LegalActKind,
}

// ─── Dispatch ───────────────────────────────────────────────────────

fn apply<T: DeserializeOwned>(
    path: &Path,
    predicate: impl FnOnce(T) -> Result<(), Violation>,
) -> Result<Result<(), Violation>> {
    let input: T = load_document(path)?;
    Ok(predicate(input))
}

/// Load `path` and run `predicate` on it.
///
/// The outer `Result` is a failure to read the input; the inner one is the
/// predicate's verdict.
pub fn evaluate(predicate: PredicateName, path: &Path) -> Result<Result<(), Violation>> {
    use PredicateName as P;
    match predicate {
        P::SejmEligibility => apply(path, |c: Candidacy| {
            rules::check_sejm_eligibility(&c.citizen, c.election_date)
        }),
        P::SenateEligibility => apply(path, |c: Candidacy| {
            rules::check_senate_eligibility(&c.citizen, c.election_date)
        }),
        P::PresidentialEligibility => apply(path, |c: PresidentialCandidacy| {
            rules::check_presidential_eligibility(&c.citizen, c.election_date, c.signatures)
        }),
        P::PresidentialTerm => apply(path, |t: Terms| {
            rules::check_presidential_term(t.consecutive_terms)
        }),
        P::Incompatibility => apply(path, |o: Office| rules::check_incompatibility(&o.office)),
        P::Immunity => apply(path, |i: Immunity| {
            rules::check_parliamentary_immunity(i.chamber, i.consent_given)
        }),
        P::Referendum => apply(path, |r: ReferendumResult| rules::validate_referendum(&r)),
        P::RightsRestriction => apply(path, |r: RightsRestriction| {
            rules::validate_rights_restriction(&r)
        }),
        P::PersonalInviolability => apply(path, |m: PersonalMeasure| {
            rules::check_personal_inviolability(&m)
        }),
        P::Extradition => apply(path, |r: ExtraditionRequest| rules::validate_extradition(&r)),
        P::DebtCeiling => apply(path, |d: PublicDebt| rules::check_debt_ceiling(&d)),
        P::CentralBank => apply(path, |c: CentralBankCandidate| {
            rules::check_central_bank_president(&c)
        }),
        P::EmergencyDeclaration => apply(path, |d: EmergencyDeclaration| {
            rules::validate_emergency_declaration(&d)
        }),
        P::EmergencyExtension => apply(path, |e: Extension| {
            rules::validate_emergency_extension(
                &e.declaration,
                e.extension_days,
                e.sejm_consent,
                e.previous_extensions,
            )
        }),
        P::AmendmentPermitted => apply(path, |d: DatedDeclaration| {
            rules::check_amendment_permitted(&d.declaration, d.date)
        }),
        P::ElectionPermitted => apply(path, |d: DatedDeclaration| {
            rules::check_election_permitted(&d.declaration, d.date)
        }),
        P::NoConfidence => apply(path, |m: Motion<NoConfidenceMotion>| {
            rules::validate_no_confidence(&m.motion, &m.tally)
        }),
        P::MinisterNoConfidence => apply(path, |m: Motion<MinisterNoConfidenceMotion>| {
            rules::validate_minister_no_confidence(&m.motion, &m.tally)
        }),
        P::MinisterIndictment => apply(path, |i: Indictment| {
            rules::validate_minister_indictment(i.signatories, i.moved_by_president, &i.tally)
        }),
        P::JudicialAppointment => apply(path, |j: Judge| rules::check_judicial_appointment(&j)),
        P::TribunalBench => apply(path, |b: Bench| {
            rules::check_tribunal_bench(b.judges, b.term_years)
        }),
        P::OversightAppointment => apply(path, |a: OversightAppointment| {
            rules::check_oversight_appointment(&a)
        }),
        P::LocalDissolution => apply(path, |d: LocalDissolution| {
            rules::validate_local_dissolution(&d)
        }),
        P::LegalHierarchy => apply(path, |h: Hierarchy| {
            rules::check_legal_hierarchy(h.subordinate, h.superior)
        }),
    }
}

/// Execute `charter check`.
pub fn run_check(args: &CheckArgs, config: &CliConfig) -> Result<u8> {
    let verdict = evaluate(args.predicate, &args.input)?;
    match &verdict {
        Ok(()) => tracing::info!(predicate = ?args.predicate, "rule holds"),
        Err(v) => tracing::info!(predicate = ?args.predicate, kind = %v.kind(), "rule violated"),
    }
    let report = CheckReport {
        predicate: args.predicate,
        holds: verdict.is_ok(),
        violation: verdict.err(),
    };
    emit(config.output, &report, |r| match &r.violation {
        None => "HOLDS".to_string(),
        Some(v) => format!("VIOLATION [{}] {v}", v.kind()),
    })?;
    Ok(if report.holds { EXIT_OK } else { EXIT_VIOLATION })
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::ViolationKind;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn sejm_eligibility_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "candidate.yaml",
            "citizen:\n  name: Anna Kowalska\n  date_of_birth: 2004-10-13\nelection_date: 2025-10-12\n",
        );
        let err = evaluate(PredicateName::SejmEligibility, &path)
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind(), ViolationKind::Eligibility);
        assert_eq!(err.article().as_str(), "99(1)");
    }

    #[test]
    fn debt_ceiling_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "debt.json", r#"{"debt": "1800000.00", "gdp": "3000000"}"#);
        assert!(evaluate(PredicateName::DebtCeiling, &path).unwrap().is_ok());
        let path = write(&dir, "over.json", r#"{"debt": "1800000.01", "gdp": "3000000"}"#);
        let err = evaluate(PredicateName::DebtCeiling, &path)
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind(), ViolationKind::DebtCeiling);
    }

    #[test]
    fn no_confidence_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "motion.yaml",
            "motion:\n  signatories: 46\n  successor: Jan Nowak\ntally:\n  chamber: sejm\n  votes_for: 231\n  votes_against: 200\n",
        );
        assert!(evaluate(PredicateName::NoConfidence, &path).unwrap().is_ok());
    }

    #[test]
    fn legal_hierarchy_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "acts.yaml", "subordinate: statute\nsuperior: regulation\n");
        let args = CheckArgs {
            predicate: PredicateName::LegalHierarchy,
            input: path,
        };
        assert_eq!(run_check(&args, &CliConfig::default()).unwrap(), EXIT_VIOLATION);
    }

    #[test]
    fn malformed_input_is_a_command_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bench.yaml", "judges: fifteen\n");
        assert!(evaluate(PredicateName::TribunalBench, &path).is_err());
        let path = write(&dir, "bench.yaml", "judges: 15\nterm_years: 9\nchair: X\n");
        assert!(evaluate(PredicateName::TribunalBench, &path).is_err());
    }
}
