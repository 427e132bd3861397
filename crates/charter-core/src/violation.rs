//! # Violation Taxonomy — Single Source of Truth
//!
//! Every rule in the rulebook either holds or fails with exactly one
//! [`Violation`]. A violation always carries a [`Citation`]: a human-readable
//! explanation of the concrete mismatch and the [`Article`] of the violated
//! provision. There is no warning tier and no silent `false`.
//!
//! ## Structure
//!
//! One enum, 22 variants, one per rule family. Variants whose rule has a
//! numeric or structural shape carry a payload next to the citation
//! (quorum counts, majority counts and thresholds, debt and GDP figures,
//! the stage a procedural transition was attempted from). Callers branch
//! on the variant, or on the `Copy` discriminant returned by
//! [`Violation::kind`], and never on the message text.
//!
//! Adding a rule family means adding a variant here; every exhaustive
//! `match` over [`ViolationKind`] then has to handle it.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal::Decimal;
use crate::error::CharterError;
use crate::voting::{Fraction, Majority};

// ─── Article ─────────────────────────────────────────────────────────

/// A citation of a constitutional provision, e.g. `"216(5)"`.
///
/// Never empty. Statically known provisions are built with
/// [`Article::cite`]; runtime strings go through [`Article::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Article(Cow<'static, str>);

impl Article {
    /// Cite a statically known provision.
    ///
    /// Evaluated in const context this rejects an empty literal at compile time.
    pub const fn cite(provision: &'static str) -> Self {
        assert!(!provision.is_empty(), "article citation must not be empty");
        Self(Cow::Borrowed(provision))
    }

    /// Cite a provision from a runtime string.
    pub fn new(provision: impl Into<String>) -> Result<Self, CharterError> {
        let provision = provision.into();
        if provision.trim().is_empty() {
            return Err(CharterError::EmptyCitation);
        }
        Ok(Self(Cow::Owned(provision)))
    }

    /// The provision as written, e.g. `"122(5)"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Article {
    type Error = CharterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Article> for String {
    fn from(article: Article) -> Self {
        article.0.into_owned()
    }
}

impl std::fmt::Display for Article {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Citation ────────────────────────────────────────────────────────

/// The fields every violation shares: what went wrong and where it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Explanation of the specific mismatch (e.g. "229 present, 230 required").
    pub message: String,
    /// The violated provision.
    pub article: Article,
}

impl Citation {
    /// Build a citation.
    pub fn new(article: Article, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            article,
        }
    }
}

impl std::fmt::Display for Citation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Art. {}: {}", self.article, self.message)
    }
}

// ─── Violation ───────────────────────────────────────────────────────

/// A typed, article-cited failure of a constitutional rule.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Attendance below the statutory minimum.
    #[error("{citation}")]
    Quorum {
        /// Shared explanation and provision.
        citation: Citation,
        /// Members present.
        present: u64,
        /// Statutory number of members of the body.
        statutory_total: u64,
        /// Minimum attendance that would have satisfied the quorum.
        required: u64,
    },

    /// Required majority not reached.
    #[error("{citation}")]
    Majority {
        /// Shared explanation and provision.
        citation: Citation,
        /// The majority that was required.
        requirement: Majority,
        /// Votes in favour.
        votes_for: u64,
        /// Votes against.
        votes_against: u64,
        /// Denominator the requirement was evaluated against.
        reference_base: u64,
        /// The ratio actually achieved.
        achieved: Fraction,
        /// The threshold ratio that was required.
        required: Fraction,
    },

    /// Eligibility criteria for office not met.
    #[error("{0}")]
    Eligibility(Citation),

    /// A lower-ranked act placed above a higher-ranked source of law.
    #[error("{0}")]
    LegalHierarchy(Citation),

    /// Public debt would exceed the constitutional ceiling.
    #[error("{citation}")]
    DebtCeiling {
        /// Shared explanation and provision.
        citation: Citation,
        /// Public debt figure evaluated.
        debt: Decimal,
        /// Annual GDP figure evaluated.
        gdp: Decimal,
    },

    /// Emergency powers exceeded or misused.
    #[error("{0}")]
    EmergencyPower(Citation),

    /// Constitutional amendment procedure violated.
    #[error("{citation}")]
    Amendment {
        /// Shared explanation and provision.
        citation: Citation,
        /// Stage of the amendment procedure when the violation occurred.
        stage: Option<String>,
    },

    /// Legislative procedure violated.
    #[error("{citation}")]
    LegislativeProcess {
        /// Shared explanation and provision.
        citation: Citation,
        /// Stage of the bill when the violation occurred.
        stage: Option<String>,
    },

    /// Disproportionate restriction of a constitutional right.
    #[error("{0}")]
    RightsRestriction(Citation),

    /// Government formation procedure violated.
    #[error("{citation}")]
    GovernmentFormation {
        /// Shared explanation and provision.
        citation: Citation,
        /// Stage of the formation sequence when the violation occurred.
        stage: Option<String>,
    },

    /// No-confidence motion rules violated.
    #[error("{0}")]
    NoConfidence(Citation),

    /// Local self-government rules violated.
    #[error("{0}")]
    LocalGovernment(Citation),

    /// Appointment to a state oversight organ violated.
    #[error("{0}")]
    Oversight(Citation),

    /// Judicial independence or appointment rules violated.
    #[error("{0}")]
    Judicial(Citation),

    /// Office held jointly with an incompatible parliamentary mandate.
    #[error("{citation}")]
    Incompatibility {
        /// Shared explanation and provision.
        citation: Citation,
        /// The incompatible office.
        office: String,
    },

    /// Parliamentary immunity disregarded.
    #[error("{0}")]
    Immunity(Citation),

    /// National referendum rules violated.
    #[error("{0}")]
    Referendum(Citation),

    /// State Tribunal rules violated.
    #[error("{0}")]
    StateTribunal(Citation),

    /// Central bank independence violated.
    #[error("{0}")]
    CentralBank(Citation),

    /// Constitutional Tribunal rules violated.
    #[error("{0}")]
    Tribunal(Citation),

    /// Legal protection of life violated.
    #[error("{0}")]
    LifeProtection(Citation),

    /// Extradition rules violated.
    #[error("{0}")]
    Extradition(Citation),
}

impl Violation {
    /// Build a legislative-process violation raised at `stage`.
    pub fn legislative_process(
        article: Article,
        stage: impl std::fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self::LegislativeProcess {
            citation: Citation::new(article, message),
            stage: Some(stage.to_string()),
        }
    }

    /// Build an amendment-procedure violation, optionally raised at a stage.
    pub fn amendment(
        article: Article,
        stage: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Amendment {
            citation: Citation::new(article, message),
            stage,
        }
    }

    /// Build a government-formation violation raised at `stage`.
    pub fn government_formation(
        article: Article,
        stage: impl std::fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self::GovernmentFormation {
            citation: Citation::new(article, message),
            stage: Some(stage.to_string()),
        }
    }

    /// The discriminant of this violation.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::Quorum { .. } => ViolationKind::Quorum,
            Self::Majority { .. } => ViolationKind::Majority,
            Self::Eligibility(_) => ViolationKind::Eligibility,
            Self::LegalHierarchy(_) => ViolationKind::LegalHierarchy,
            Self::DebtCeiling { .. } => ViolationKind::DebtCeiling,
            Self::EmergencyPower(_) => ViolationKind::EmergencyPower,
            Self::Amendment { .. } => ViolationKind::Amendment,
            Self::LegislativeProcess { .. } => ViolationKind::LegislativeProcess,
            Self::RightsRestriction(_) => ViolationKind::RightsRestriction,
            Self::GovernmentFormation { .. } => ViolationKind::GovernmentFormation,
            Self::NoConfidence(_) => ViolationKind::NoConfidence,
            Self::LocalGovernment(_) => ViolationKind::LocalGovernment,
            Self::Oversight(_) => ViolationKind::Oversight,
            Self::Judicial(_) => ViolationKind::Judicial,
            Self::Incompatibility { .. } => ViolationKind::Incompatibility,
            Self::Immunity(_) => ViolationKind::Immunity,
            Self::Referendum(_) => ViolationKind::Referendum,
            Self::StateTribunal(_) => ViolationKind::StateTribunal,
            Self::CentralBank(_) => ViolationKind::CentralBank,
            Self::Tribunal(_) => ViolationKind::Tribunal,
            Self::LifeProtection(_) => ViolationKind::LifeProtection,
            Self::Extradition(_) => ViolationKind::Extradition,
        }
    }

    /// The shared explanation and provision.
    pub fn citation(&self) -> &Citation {
        match self {
            Self::Quorum { citation, .. }
            | Self::Majority { citation, .. }
            | Self::DebtCeiling { citation, .. }
            | Self::Amendment { citation, .. }
            | Self::LegislativeProcess { citation, .. }
            | Self::GovernmentFormation { citation, .. }
            | Self::Incompatibility { citation, .. } => citation,
            Self::Eligibility(citation)
            | Self::LegalHierarchy(citation)
            | Self::EmergencyPower(citation)
            | Self::RightsRestriction(citation)
            | Self::NoConfidence(citation)
            | Self::LocalGovernment(citation)
            | Self::Oversight(citation)
            | Self::Judicial(citation)
            | Self::Immunity(citation)
            | Self::Referendum(citation)
            | Self::StateTribunal(citation)
            | Self::CentralBank(citation)
            | Self::Tribunal(citation)
            | Self::LifeProtection(citation)
            | Self::Extradition(citation) => citation,
        }
    }

    /// The violated provision.
    pub fn article(&self) -> &Article {
        &self.citation().article
    }

    /// The explanation of the mismatch.
    pub fn message(&self) -> &str {
        &self.citation().message
    }

    /// The stage a procedural violation was raised at, if any.
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::Amendment { stage, .. }
            | Self::LegislativeProcess { stage, .. }
            | Self::GovernmentFormation { stage, .. } => stage.as_deref(),
            _ => None,
        }
    }
}

// ─── Violation Kind ──────────────────────────────────────────────────

/// Field-less discriminant of [`Violation`], one per rule family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Attendance quorum.
    Quorum,
    /// Voting majority.
    Majority,
    /// Eligibility for office.
    Eligibility,
    /// Hierarchy of sources of law.
    LegalHierarchy,
    /// Public debt ceiling.
    DebtCeiling,
    /// Emergency powers.
    EmergencyPower,
    /// Constitutional amendment procedure.
    Amendment,
    /// Legislative procedure.
    LegislativeProcess,
    /// Restriction of rights and freedoms.
    RightsRestriction,
    /// Government formation.
    GovernmentFormation,
    /// Vote of no confidence.
    NoConfidence,
    /// Local self-government.
    LocalGovernment,
    /// State oversight organs.
    Oversight,
    /// Courts and judges.
    Judicial,
    /// Incompatibility of offices.
    Incompatibility,
    /// Parliamentary immunity.
    Immunity,
    /// National referendum.
    Referendum,
    /// State Tribunal.
    StateTribunal,
    /// Central bank.
    CentralBank,
    /// Constitutional Tribunal.
    Tribunal,
    /// Protection of life.
    LifeProtection,
    /// Extradition.
    Extradition,
}

/// Total number of violation kinds.
pub const VIOLATION_KIND_COUNT: usize = 22;

impl ViolationKind {
    /// All violation kinds in declaration order.
    pub const ALL: [ViolationKind; VIOLATION_KIND_COUNT] = [
        Self::Quorum,
        Self::Majority,
        Self::Eligibility,
        Self::LegalHierarchy,
        Self::DebtCeiling,
        Self::EmergencyPower,
        Self::Amendment,
        Self::LegislativeProcess,
        Self::RightsRestriction,
        Self::GovernmentFormation,
        Self::NoConfidence,
        Self::LocalGovernment,
        Self::Oversight,
        Self::Judicial,
        Self::Incompatibility,
        Self::Immunity,
        Self::Referendum,
        Self::StateTribunal,
        Self::CentralBank,
        Self::Tribunal,
        Self::LifeProtection,
        Self::Extradition,
    ];

    /// Canonical snake_case name, matching the serde tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quorum => "quorum",
            Self::Majority => "majority",
            Self::Eligibility => "eligibility",
            Self::LegalHierarchy => "legal_hierarchy",
            Self::DebtCeiling => "debt_ceiling",
            Self::EmergencyPower => "emergency_power",
            Self::Amendment => "amendment",
            Self::LegislativeProcess => "legislative_process",
            Self::RightsRestriction => "rights_restriction",
            Self::GovernmentFormation => "government_formation",
            Self::NoConfidence => "no_confidence",
            Self::LocalGovernment => "local_government",
            Self::Oversight => "oversight",
            Self::Judicial => "judicial",
            Self::Incompatibility => "incompatibility",
            Self::Immunity => "immunity",
            Self::Referendum => "referendum",
            Self::StateTribunal => "state_tribunal",
            Self::CentralBank => "central_bank",
            Self::Tribunal => "tribunal",
            Self::LifeProtection => "life_protection",
            Self::Extradition => "extradition",
        }
    }

    /// Whether violations of this kind are raised by the procedural state machines.
    pub fn is_procedural(&self) -> bool {
        matches!(
            self,
            Self::LegislativeProcess | Self::GovernmentFormation | Self::Amendment
        )
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
