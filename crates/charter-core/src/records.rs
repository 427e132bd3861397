//! # Domain Records — Persons, Offices, and Public Acts
//!
//! Plain value types the standalone predicates evaluate. They are built
//! from pre-validated field values and never change afterwards; two
//! records built from the same fields compare equal.
//!
//! Boolean fields describe facts established elsewhere (a court ruling, a
//! chamber resolution). The records do not derive them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;
use crate::temporal::days_between;

fn yes() -> bool {
    true
}

// ─── Persons ─────────────────────────────────────────────────────────

/// A natural person standing for office.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citizen {
    /// Full name.
    pub name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Holds Polish citizenship.
    #[serde(default = "yes")]
    pub polish_citizen: bool,
    /// Final conviction for an intentional crime prosecuted ex officio (Art. 99(3)).
    #[serde(default)]
    pub criminal_record: bool,
}

impl Citizen {
    /// A citizen with no conviction.
    pub fn new(name: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date_of_birth,
            polish_citizen: true,
            criminal_record: false,
        }
    }

    /// Completed years of age on `date`. Zero for dates before birth.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let born = self.date_of_birth;
        let mut years = date.year() - born.year();
        if (date.month(), date.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        u32::try_from(years).unwrap_or(0)
    }
}

/// Courts named in Art. 175.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Court {
    /// Supreme Court.
    Supreme,
    /// Common courts.
    Common,
    /// Administrative courts.
    Administrative,
    /// Military courts.
    Military,
}

/// A judicial appointment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Judge {
    /// Full name.
    pub name: String,
    /// Court of appointment.
    pub court: Court,
    /// Appointed by the President.
    #[serde(default = "yes")]
    pub appointed_by_president: bool,
    /// Proposed by the National Council of the Judiciary.
    #[serde(default = "yes")]
    pub krs_nominated: bool,
}

/// State oversight organs (Art. 202–215).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversightOrgan {
    /// Supreme Audit Office.
    Nik,
    /// Commissioner for Citizens' Rights.
    Rpo,
    /// National Broadcasting Council.
    Krrit,
}

impl std::fmt::Display for OversightOrgan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Nik => "President of the Supreme Audit Office",
            Self::Rpo => "Commissioner for Citizens' Rights",
            Self::Krrit => "member of the National Broadcasting Council",
        })
    }
}

/// Appointment to an oversight organ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OversightAppointment {
    /// The organ.
    pub organ: OversightOrgan,
    /// The appointee.
    pub name: String,
    /// Appointed or approved by the Sejm.
    #[serde(default)]
    pub sejm_approved: bool,
    /// Consented to by the Senate.
    #[serde(default)]
    pub senate_approved: bool,
    /// Appointed by the President.
    #[serde(default)]
    pub president_appointed: bool,
}

/// Candidate for President of the National Bank of Poland.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CentralBankCandidate {
    /// Full name.
    pub name: String,
    /// Member of a political party.
    #[serde(default)]
    pub party_member: bool,
    /// Member of a trade union.
    #[serde(default)]
    pub union_member: bool,
    /// Performs public activities incompatible with the dignity of the office.
    #[serde(default)]
    pub incompatible_public_activity: bool,
}

// ─── Government ──────────────────────────────────────────────────────

/// Constructive vote of no confidence in the Council of Ministers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoConfidenceMotion {
    /// Deputies who signed the motion.
    pub signatories: u64,
    /// Candidate for Prime Minister named in the motion.
    #[serde(default)]
    pub successor: Option<String>,
}

/// Vote of no confidence in an individual minister.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinisterNoConfidenceMotion {
    /// The minister concerned.
    pub minister: String,
    /// Deputies who signed the motion.
    pub signatories: u64,
}

// ─── Rights ──────────────────────────────────────────────────────────

/// A proposed limitation of a constitutional freedom, tested under Art. 31(3).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RightsRestriction {
    /// What the limitation does.
    pub description: String,
    /// Imposed by statute.
    pub by_statute: bool,
    /// Necessary in a democratic state.
    pub necessary_in_democratic_state: bool,
    /// Serves security, public order, environment, health, public morals,
    /// or the freedoms of others.
    pub legitimate_aim: bool,
    /// Proportionate to that aim.
    pub proportionate: bool,
    /// Leaves the essence of the freedom intact.
    pub preserves_essence: bool,
}

/// A request to extradite a person (Art. 55).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraditionRequest {
    /// The person is a Polish citizen.
    pub subject_is_polish_citizen: bool,
    /// Non-violent offence committed for political reasons.
    pub political_nonviolent_offense: bool,
    /// Granting the request would violate human rights.
    pub violates_human_rights: bool,
    /// A court has ruled the extradition admissible.
    pub court_approved: bool,
    /// Requested by an international judicial body.
    pub international_judicial_body: bool,
    /// Grounded in a ratified treaty or implementing statute.
    pub based_on_ratified_treaty: bool,
    /// Genocide, crime against humanity, war crime, or aggression.
    pub genocide_or_war_crime: bool,
    /// The act was committed outside Polish territory.
    pub act_committed_abroad: bool,
    /// The act is an offence under Polish law, then and now.
    pub double_criminality: bool,
}

/// A measure applied to a person by a public authority (Art. 38–40).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalMeasure {
    /// What the measure is.
    pub description: String,
    /// The measure deprives the person of life.
    pub deprives_of_life: bool,
    /// Scientific or medical experimentation.
    pub experimentation: bool,
    /// The person gave voluntary consent to the experimentation.
    pub voluntary_consent: bool,
    /// Torture, or cruel, inhuman or degrading treatment or punishment.
    pub cruel_treatment: bool,
    /// Corporal punishment.
    pub corporal_punishment: bool,
}

// ─── Public finance ──────────────────────────────────────────────────

/// Public debt and annual GDP, for the Art. 216(5) ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicDebt {
    /// Total public debt.
    pub debt: Decimal,
    /// Annual gross domestic product.
    pub gdp: Decimal,
}

// ─── Local self-government ───────────────────────────────────────────

/// Motion to dissolve a constituent body of local self-government
/// (Art. 171(3)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalDissolution {
    /// The council or assembly concerned.
    pub body: String,
    /// Moved by the Prime Minister.
    pub prime_minister_motion: bool,
    /// The body flagrantly violated the Constitution or a statute.
    pub flagrant_violation: bool,
}

// ─── Emergencies ─────────────────────────────────────────────────────

/// Extraordinary measures (Art. 228(1)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyKind {
    /// Martial law (Art. 229).
    MartialLaw,
    /// State of emergency (Art. 230).
    StateOfEmergency,
    /// State of natural disaster (Art. 232).
    NaturalDisaster,
}

impl EmergencyKind {
    /// Longest initial declaration permitted, if the Constitution caps it.
    pub fn max_initial_days(self) -> Option<u32> {
        match self {
            Self::MartialLaw => None,
            Self::StateOfEmergency => Some(90),
            Self::NaturalDisaster => Some(30),
        }
    }
}

impl std::fmt::Display for EmergencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MartialLaw => "martial law",
            Self::StateOfEmergency => "state of emergency",
            Self::NaturalDisaster => "state of natural disaster",
        })
    }
}

/// Introduction of an extraordinary measure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmergencyDeclaration {
    /// Which measure.
    pub kind: EmergencyKind,
    /// First day in force.
    pub start_date: NaiveDate,
    /// Declared length in days.
    pub duration_days: u32,
    /// Stated grounds.
    #[serde(default)]
    pub reason: String,
}

impl EmergencyDeclaration {
    /// First day after the measure ends.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date
            .checked_add_days(chrono::Days::new(u64::from(self.duration_days)))
    }

    /// Whether the measure is in force on `date`.
    pub fn in_force_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date().map_or(true, |end| date < end)
    }

    /// Days since the measure ended; `None` while it has not ended.
    pub fn days_since_end(&self, date: NaiveDate) -> Option<i64> {
        let end = self.end_date()?;
        let elapsed = days_between(end, date);
        (elapsed >= 0).then_some(elapsed)
    }
}

// ─── Sources of law ──────────────────────────────────────────────────

/// Universally binding sources of law, highest rank first (Art. 87–91).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalActKind {
    /// The Constitution.
    Constitution,
    /// Ratified international agreement.
    RatifiedTreaty,
    /// Statute.
    Statute,
    /// Regulation.
    Regulation,
    /// Enactment of local law.
    LocalAct,
}

impl LegalActKind {
    /// Position in the hierarchy; lower is stronger.
    pub fn rank(self) -> u8 {
        match self {
            Self::Constitution => 0,
            Self::RatifiedTreaty => 1,
            Self::Statute => 2,
            Self::Regulation => 3,
            Self::LocalAct => 4,
        }
    }
}

impl std::fmt::Display for LegalActKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Constitution => "Constitution",
            Self::RatifiedTreaty => "ratified international agreement",
            Self::Statute => "statute",
            Self::Regulation => "regulation",
            Self::LocalAct => "enactment of local law",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let c = Citizen::new("Jan Kowalski", date(2003, 10, 15));
        assert_eq!(c.age_on(date(2024, 10, 14)), 20);
        assert_eq!(c.age_on(date(2024, 10, 15)), 21);
        assert_eq!(c.age_on(date(1990, 1, 1)), 0);
    }

    #[test]
    fn test_identical_records_are_equal() {
        let a = Citizen::new("Anna Nowak", date(1970, 1, 1));
        let b = Citizen::new("Anna Nowak", date(1970, 1, 1));
        assert_eq!(a, b);
        let d1 = PublicDebt {
            debt: "600".parse().unwrap(),
            gdp: "1000.00".parse().unwrap(),
        };
        let d2 = PublicDebt {
            debt: "600.0".parse().unwrap(),
            gdp: "1000".parse().unwrap(),
        };
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_citizen_serde_defaults() {
        let c: Citizen =
            serde_json::from_str(r#"{"name": "Ewa", "date_of_birth": "1980-05-01"}"#).unwrap();
        assert!(c.polish_citizen);
        assert!(!c.criminal_record);
    }

    #[test]
    fn test_emergency_in_force_window() {
        let decl = EmergencyDeclaration {
            kind: EmergencyKind::StateOfEmergency,
            start_date: date(2024, 1, 1),
            duration_days: 30,
            reason: "border crisis".into(),
        };
        assert_eq!(decl.end_date(), Some(date(2024, 1, 31)));
        assert!(decl.in_force_on(date(2024, 1, 30)));
        assert!(!decl.in_force_on(date(2024, 1, 31)));
        assert_eq!(decl.days_since_end(date(2024, 1, 20)), None);
        assert_eq!(decl.days_since_end(date(2024, 3, 1)), Some(30));
    }

    #[test]
    fn test_legal_act_ranks_are_ordered() {
        assert!(LegalActKind::Constitution.rank() < LegalActKind::RatifiedTreaty.rank());
        assert!(LegalActKind::RatifiedTreaty.rank() < LegalActKind::Statute.rank());
        assert!(LegalActKind::Regulation.rank() < LegalActKind::LocalAct.rank());
    }
}
