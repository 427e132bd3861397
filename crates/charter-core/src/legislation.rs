//! # Domain Records — Legislation
//!
//! Subjects and decisions consumed by the procedural state machines: bills,
//! chamber and presidential decisions, Tribunal rulings, constitutional
//! amendment proposals, and referendum results.

use serde::{Deserialize, Serialize};

/// Statutory Sejm seats divided by five (Art. 235(1)).
pub const AMENDMENT_MIN_DEPUTIES: u64 = 92;

// ─── Bills ───────────────────────────────────────────────────────────

/// A bill under the ordinary legislative procedure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bill {
    /// Title of the bill.
    pub title: String,
    /// Who introduced it (Art. 118).
    pub sponsor: String,
    /// Designated urgent by the Council of Ministers (Art. 123).
    #[serde(default)]
    pub urgent: bool,
}

impl Bill {
    /// A non-urgent bill.
    pub fn new(title: impl Into<String>, sponsor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sponsor: sponsor.into(),
            urgent: false,
        }
    }

    /// The same bill designated urgent.
    pub fn urgent(mut self) -> Self {
        self.urgent = true;
        self
    }
}

/// Senate resolution on a bill passed by the Sejm (Art. 121(2)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenateDecision {
    /// Adopt without amendment.
    Accept,
    /// Introduce amendments.
    Amend,
    /// Reject in its entirety.
    Reject,
}

impl std::fmt::Display for SenateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Accept => "accept",
            Self::Amend => "amend",
            Self::Reject => "reject",
        })
    }
}

/// The President's action on a bill (Art. 122).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresidentialDecision {
    /// Sign the bill.
    Sign,
    /// Return it to the Sejm for reconsideration.
    Veto,
    /// Refer it to the Constitutional Tribunal.
    ReferToTribunal,
}

impl std::fmt::Display for PresidentialDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Sign => "sign",
            Self::Veto => "veto",
            Self::ReferToTribunal => "refer to tribunal",
        })
    }
}

/// Constitutional Tribunal ruling on a referred bill (Art. 122(3)–(4)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TribunalRuling {
    /// The bill conforms to the Constitution.
    Constitutional,
    /// Only the listed provisions are unconstitutional and are severable.
    PartiallyUnconstitutional {
        /// Provisions found unconstitutional.
        provisions: Vec<String>,
    },
    /// The bill as a whole is unconstitutional.
    Unconstitutional,
}

// ─── Constitutional amendments ───────────────────────────────────────

/// Who may initiate an amendment (Art. 235(1)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentInitiative {
    /// A group of Deputies of the given size.
    Deputies(u64),
    /// The Senate.
    Senate,
    /// The President.
    President,
}

impl std::fmt::Display for AmendmentInitiative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deputies(n) => write!(f, "{n} Deputies"),
            Self::Senate => f.write_str("the Senate"),
            Self::President => f.write_str("the President"),
        }
    }
}

/// Chapters of the Constitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chapter {
    /// The Republic.
    I,
    /// Freedoms, rights and obligations.
    II,
    /// Sources of law.
    III,
    /// The Sejm and the Senate.
    IV,
    /// The President.
    V,
    /// The Council of Ministers.
    VI,
    /// Local self-government.
    VII,
    /// Courts and tribunals.
    VIII,
    /// Organs of state control.
    IX,
    /// Public finances.
    X,
    /// Extraordinary measures.
    XI,
    /// Amending the Constitution.
    XII,
    /// Final provisions.
    XIII,
}

impl Chapter {
    /// Amending this chapter lets the initiators demand a referendum (Art. 235(6)).
    pub fn requires_referendum(self) -> bool {
        matches!(self, Self::I | Self::II | Self::XII)
    }
}

/// A bill to amend the Constitution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmendmentProposal {
    /// Title of the amending bill.
    pub title: String,
    /// Who introduced it.
    pub initiative: AmendmentInitiative,
    /// Chapters the amendment touches.
    pub chapters: Vec<Chapter>,
}

impl AmendmentProposal {
    /// Whether a confirmatory referendum follows the parliamentary votes.
    pub fn requires_referendum(&self) -> bool {
        self.chapters.iter().any(|c| c.requires_referendum())
    }
}

// ─── Referendums ─────────────────────────────────────────────────────

/// Result of a nationwide or confirmatory referendum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferendumResult {
    /// Valid votes in favour.
    pub votes_for: u64,
    /// Valid votes against.
    pub votes_against: u64,
    /// Persons entitled to vote.
    pub eligible: u64,
}

impl ReferendumResult {
    /// Voters who took part, saturating.
    pub fn turnout(&self) -> u64 {
        self.votes_for.saturating_add(self.votes_against)
    }
}
