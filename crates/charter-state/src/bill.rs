//! # Bill Lifecycle State Machine
//!
//! The ordinary legislative procedure of Art. 118–123.
//!
//! ## States
//!
//! ```text
//! DRAFT ──▶ SEJM_DELIBERATION ──vote──▶ SENT_TO_SENATE ──▶ SENATE_REVIEW
//!   │             │    └──fail──▶ REJECTED                    │
//!   └─────────────┴──▶ WITHDRAWN                              ├──▶ SENATE_ACCEPTED ──┐
//!                                                             ├──▶ SENATE_AMENDED ───┤ Sejm override
//!                                                             └──▶ SENATE_REJECTED ──┤ (fail ──▶ REJECTED)
//!                                                                                    ▼
//!                                                                         SENT_TO_PRESIDENT
//!                                                                                    │
//!            ┌──────────────────────────────────────────────────────▶ PRESIDENT_REVIEW
//!            │                                                     │        │         │
//!            │                          PRESIDENT_SIGNED ◀─────────┘        │         │
//!            │                            │        ▲                        ▼         │
//!            │                            ▼        └── VETO_OVERRIDDEN ◀── PRESIDENT_VETOED
//!            │                         ENACTED            (3/5; fail ──▶ REJECTED)    │
//!            │                                                                        ▼
//!            ├──── constitutional ─────────────────────────────────── REFERRED_TO_TRIBUNAL
//!            │                                                          │         │
//!            └── excise ── PARTIALLY_UNCONSTITUTIONAL ◀─────────────────┘         └──▶ REJECTED
//! ```
//!
//! Terminal stages: `ENACTED`, `REJECTED`, `WITHDRAWN`.
//!
//! Every operation checks the current stage first. A refused operation
//! returns a violation and leaves the record exactly as it was.

use serde::{Deserialize, Serialize};

use charter_core::{
    check_quorum_cited, evaluate_majority_cited, evaluate_vote, Article, Bill, Chamber,
    Majority, PresidentialDecision, ProcedureId, ReferenceBase, SenateDecision, TribunalRuling,
    Violation, VoteTally, Window, SEJM_SEATS,
};

use crate::history::{refused, History, Procedure, Stage, Trigger, VoteOutcome};

const ART_118: Article = Article::cite("118");
const ART_119_4: Article = Article::cite("119(4)");
const ART_120: Article = Article::cite("120");
const ART_121_2: Article = Article::cite("121(2)");
const ART_121_3: Article = Article::cite("121(3)");
const ART_122_2: Article = Article::cite("122(2)");
const ART_122_3: Article = Article::cite("122(3)");
const ART_122_4: Article = Article::cite("122(4)");
const ART_122_5: Article = Article::cite("122(5)");
const ART_123_3: Article = Article::cite("123(3)");

// ─── Bill Stage ──────────────────────────────────────────────────────

/// Stage of a bill in the legislative procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStage {
    /// Introduced, not yet before the Sejm.
    Draft,
    /// Under deliberation in the Sejm.
    SejmDeliberation,
    /// Passed by the Sejm, awaiting transmission to the Senate.
    SentToSenate,
    /// Before the Senate.
    SenateReview,
    /// Adopted by the Senate without amendment.
    SenateAccepted,
    /// The Senate introduced amendments.
    SenateAmended,
    /// The Senate rejected the bill.
    SenateRejected,
    /// Awaiting presentation to the President.
    SentToPresident,
    /// Before the President.
    PresidentReview,
    /// Signed by the President.
    PresidentSigned,
    /// Returned by the President for reconsideration.
    PresidentVetoed,
    /// Veto overridden by the Sejm; the President must sign.
    VetoOverridden,
    /// Referred to the Constitutional Tribunal.
    ReferredToTribunal,
    /// Found partially unconstitutional; provisions must be excised.
    PartiallyUnconstitutional,
    /// Promulgated (terminal).
    Enacted,
    /// Rejected (terminal).
    Rejected,
    /// Withdrawn by the sponsor (terminal).
    Withdrawn,
}

impl BillStage {
    /// All stages in declaration order.
    pub const ALL: [BillStage; 17] = [
        Self::Draft,
        Self::SejmDeliberation,
        Self::SentToSenate,
        Self::SenateReview,
        Self::SenateAccepted,
        Self::SenateAmended,
        Self::SenateRejected,
        Self::SentToPresident,
        Self::PresidentReview,
        Self::PresidentSigned,
        Self::PresidentVetoed,
        Self::VetoOverridden,
        Self::ReferredToTribunal,
        Self::PartiallyUnconstitutional,
        Self::Enacted,
        Self::Rejected,
        Self::Withdrawn,
    ];
}

impl Stage for BillStage {
    const MACHINE: &'static str = "bill";
    const INITIAL: Self = Self::Draft;

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Enacted | Self::Rejected | Self::Withdrawn)
    }
}

impl std::fmt::Display for BillStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::SejmDeliberation => "SEJM_DELIBERATION",
            Self::SentToSenate => "SENT_TO_SENATE",
            Self::SenateReview => "SENATE_REVIEW",
            Self::SenateAccepted => "SENATE_ACCEPTED",
            Self::SenateAmended => "SENATE_AMENDED",
            Self::SenateRejected => "SENATE_REJECTED",
            Self::SentToPresident => "SENT_TO_PRESIDENT",
            Self::PresidentReview => "PRESIDENT_REVIEW",
            Self::PresidentSigned => "PRESIDENT_SIGNED",
            Self::PresidentVetoed => "PRESIDENT_VETOED",
            Self::VetoOverridden => "VETO_OVERRIDDEN",
            Self::ReferredToTribunal => "REFERRED_TO_TRIBUNAL",
            Self::PartiallyUnconstitutional => "PARTIALLY_UNCONSTITUTIONAL",
            Self::Enacted => "ENACTED",
            Self::Rejected => "REJECTED",
            Self::Withdrawn => "WITHDRAWN",
        };
        f.write_str(s)
    }
}

// ─── Bill Procedure ──────────────────────────────────────────────────

/// A bill together with its legislative stage and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillProcedure {
    id: ProcedureId,
    bill: Bill,
    stage: BillStage,
    history: History<BillStage>,
}

impl Procedure for BillProcedure {
    type Stage = BillStage;
    type Subject = Bill;

    fn id(&self) -> ProcedureId {
        self.id
    }

    fn subject(&self) -> &Bill {
        &self.bill
    }

    fn stage(&self) -> BillStage {
        self.stage
    }

    fn history(&self) -> &History<BillStage> {
        &self.history
    }
}

impl BillProcedure {
    /// Start the procedure in `DRAFT`.
    pub fn new(bill: Bill) -> Self {
        Self {
            id: ProcedureId::new(),
            bill,
            stage: BillStage::Draft,
            history: History::new(),
        }
    }

    /// The bill.
    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    /// Provisions removed after a partial unconstitutionality ruling.
    pub fn excised_provisions(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter_map(|e| match &e.trigger {
                Trigger::Excision { provisions } => Some(provisions),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    // ── Sejm ────────────────────────────────────────────────────────

    /// Put the bill before the Sejm (`DRAFT → SEJM_DELIBERATION`, Art. 118).
    pub fn submit(&mut self) -> Result<(), Violation> {
        self.require(&[BillStage::Draft], "submission to the Sejm", ART_118)?;
        self.advance(
            BillStage::SejmDeliberation,
            Trigger::event(format!("submitted by {}", self.bill.sponsor)),
            None,
        );
        Ok(())
    }

    /// Sponsor withdraws the bill (`DRAFT | SEJM_DELIBERATION → WITHDRAWN`, Art. 119(4)).
    pub fn withdraw(&mut self) -> Result<(), Violation> {
        self.require(
            &[BillStage::Draft, BillStage::SejmDeliberation],
            "withdrawal",
            ART_119_4,
        )?;
        self.advance(
            BillStage::Withdrawn,
            Trigger::event(format!("withdrawn by {}", self.bill.sponsor)),
            None,
        );
        Ok(())
    }

    /// Sejm vote on the bill (Art. 120): quorum, then a simple majority.
    ///
    /// `SEJM_DELIBERATION → SENT_TO_SENATE` on success, `→ REJECTED` when the
    /// majority is not reached.
    pub fn sejm_vote(&mut self, tally: &VoteTally) -> Result<VoteOutcome, Violation> {
        self.require(&[BillStage::SejmDeliberation], "Sejm vote", ART_120)?;
        self.require_chamber(tally, Chamber::Sejm, ART_120)?;
        self.check_quorum(tally, ART_120)?;
        let requirement = Majority::Simple;
        let base = ReferenceBase::VotesCast;
        let result = evaluate_majority_cited(tally, requirement, base, ART_120);
        let next = match result {
            Ok(()) => BillStage::SentToSenate,
            Err(_) => BillStage::Rejected,
        };
        Ok(self.record_vote(next, tally, requirement, base, result, None))
    }

    // ── Senate ──────────────────────────────────────────────────────

    /// The Senate receives the bill and its window opens
    /// (`SENT_TO_SENATE → SENATE_REVIEW`).
    ///
    /// 30 days, or 14 for an urgent bill (Art. 121(2), 123(3)).
    pub fn senate_receive(&mut self) -> Result<(), Violation> {
        self.require(&[BillStage::SentToSenate], "Senate receipt", ART_121_2)?;
        let window = if self.bill.urgent {
            Window::new(14, ART_123_3)
        } else {
            Window::new(30, ART_121_2)
        };
        self.advance(
            BillStage::SenateReview,
            Trigger::event("received by the Senate"),
            Some(window),
        );
        Ok(())
    }

    /// The Senate adopts a resolution (Art. 121(2)).
    ///
    /// The resolution itself needs quorum and a simple majority; a failed
    /// resolution vote is refused and the bill stays in `SENATE_REVIEW`.
    pub fn senate_resolve(
        &mut self,
        decision: SenateDecision,
        tally: &VoteTally,
    ) -> Result<(), Violation> {
        self.require(&[BillStage::SenateReview], "Senate resolution", ART_121_2)?;
        self.require_chamber(tally, Chamber::Senate, ART_121_2)?;
        evaluate_vote(tally, Majority::Simple, ReferenceBase::VotesCast, ART_121_2)
            .map_err(|v| refused(self.stage, v))?;
        let next = match decision {
            SenateDecision::Accept => BillStage::SenateAccepted,
            SenateDecision::Amend => BillStage::SenateAmended,
            SenateDecision::Reject => BillStage::SenateRejected,
        };
        self.advance(
            next,
            Trigger::SenateResolution {
                decision,
                tally: tally.clone(),
            },
            None,
        );
        Ok(())
    }

    /// The Senate let its window lapse; the bill is deemed adopted as passed
    /// by the Sejm (`SENATE_REVIEW → SENATE_ACCEPTED`, Art. 121(2)).
    ///
    /// The caller decides that the window has lapsed.
    pub fn senate_deadline_lapsed(&mut self) -> Result<(), Violation> {
        self.require(&[BillStage::SenateReview], "Senate lapse", ART_121_2)?;
        self.advance(
            BillStage::SenateAccepted,
            Trigger::event("Senate window lapsed; deemed adopted"),
            None,
        );
        Ok(())
    }

    /// Sejm vote on Senate amendments or rejection (Art. 121(3)): absolute
    /// majority of the statutory seats, in the presence of a quorum.
    ///
    /// `SENATE_AMENDED | SENATE_REJECTED → SENT_TO_PRESIDENT` on success,
    /// `→ REJECTED` otherwise.
    pub fn sejm_override_senate(&mut self, tally: &VoteTally) -> Result<VoteOutcome, Violation> {
        self.require(
            &[BillStage::SenateAmended, BillStage::SenateRejected],
            "Sejm override of the Senate",
            ART_121_3,
        )?;
        self.require_chamber(tally, Chamber::Sejm, ART_121_3)?;
        self.check_quorum(tally, ART_121_3)?;
        let requirement = Majority::Absolute;
        let base = ReferenceBase::Seats(SEJM_SEATS);
        let result = evaluate_majority_cited(tally, requirement, base, ART_121_3);
        let next = match result {
            Ok(()) => BillStage::SentToPresident,
            Err(_) => BillStage::Rejected,
        };
        Ok(self.record_vote(next, tally, requirement, base, result, None))
    }

    /// Present the Senate-accepted bill to the President
    /// (`SENATE_ACCEPTED → SENT_TO_PRESIDENT`, Art. 122(1)).
    pub fn forward_to_president(&mut self) -> Result<(), Violation> {
        self.require(
            &[BillStage::SenateAccepted],
            "presentation to the President",
            ART_122_2,
        )?;
        self.advance(
            BillStage::SentToPresident,
            Trigger::event("presented to the President"),
            None,
        );
        Ok(())
    }

    // ── President ───────────────────────────────────────────────────

    /// The President receives the bill and the signing window opens
    /// (`SENT_TO_PRESIDENT → PRESIDENT_REVIEW`).
    ///
    /// 21 days, or 7 for an urgent bill (Art. 122(2), 123(3)).
    pub fn president_receive(&mut self) -> Result<(), Violation> {
        self.require(&[BillStage::SentToPresident], "presidential receipt", ART_122_2)?;
        let window = if self.bill.urgent {
            Window::new(7, ART_123_3)
        } else {
            Window::new(21, ART_122_2)
        };
        self.advance(
            BillStage::PresidentReview,
            Trigger::event("received by the President"),
            Some(window),
        );
        Ok(())
    }

    /// The President signs, vetoes, or refers the bill (Art. 122).
    ///
    /// After a referral the President may not veto the bill or refer it again.
    pub fn president_decide(&mut self, decision: PresidentialDecision) -> Result<(), Violation> {
        self.require(&[BillStage::PresidentReview], "presidential decision", ART_122_2)?;
        let referred = self.history.visited(BillStage::ReferredToTribunal);
        let next = match decision {
            PresidentialDecision::Sign => BillStage::PresidentSigned,
            PresidentialDecision::Veto if referred => {
                return Err(self.procedural(
                    ART_122_5,
                    "a bill already reviewed by the Constitutional Tribunal cannot be vetoed",
                ));
            }
            PresidentialDecision::Veto => BillStage::PresidentVetoed,
            PresidentialDecision::ReferToTribunal if referred => {
                return Err(self.procedural(
                    ART_122_3,
                    "the bill has already been referred to the Constitutional Tribunal",
                ));
            }
            PresidentialDecision::ReferToTribunal => BillStage::ReferredToTribunal,
        };
        self.advance(next, Trigger::PresidentialDecision { decision }, None);
        Ok(())
    }

    /// Sejm vote to override a veto (Art. 122(5)): three fifths of the votes
    /// cast, in the presence of a quorum.
    ///
    /// `PRESIDENT_VETOED → VETO_OVERRIDDEN` on success, `→ REJECTED` otherwise.
    pub fn override_veto(&mut self, tally: &VoteTally) -> Result<VoteOutcome, Violation> {
        self.require(&[BillStage::PresidentVetoed], "veto override", ART_122_5)?;
        self.require_chamber(tally, Chamber::Sejm, ART_122_5)?;
        self.check_quorum(tally, ART_122_5)?;
        let requirement = Majority::ThreeFifths;
        let base = ReferenceBase::VotesCast;
        let result = evaluate_majority_cited(tally, requirement, base, ART_122_5);
        let next = match result {
            Ok(()) => BillStage::VetoOverridden,
            Err(_) => BillStage::Rejected,
        };
        // The 7-day signing period opens with the override.
        let window = result.is_ok().then(|| Window::new(7, ART_122_5));
        Ok(self.record_vote(next, tally, requirement, base, result, window))
    }

    /// The President signs a bill whose veto was overridden
    /// (`VETO_OVERRIDDEN → PRESIDENT_SIGNED`, Art. 122(5)).
    pub fn sign_after_override(&mut self) -> Result<(), Violation> {
        self.require(&[BillStage::VetoOverridden], "signature after override", ART_122_5)?;
        self.advance(
            BillStage::PresidentSigned,
            Trigger::PresidentialDecision {
                decision: PresidentialDecision::Sign,
            },
            None,
        );
        Ok(())
    }

    // ── Constitutional Tribunal ─────────────────────────────────────

    /// Apply the Tribunal's ruling (Art. 122(3)–(4)).
    ///
    /// Constitutional: back to `PRESIDENT_REVIEW`. Partially unconstitutional:
    /// `PARTIALLY_UNCONSTITUTIONAL`, pending excision. Unconstitutional:
    /// `REJECTED`.
    pub fn tribunal_ruling(&mut self, ruling: TribunalRuling) -> Result<(), Violation> {
        self.require(&[BillStage::ReferredToTribunal], "Tribunal ruling", ART_122_3)?;
        let next = match &ruling {
            TribunalRuling::Constitutional => BillStage::PresidentReview,
            TribunalRuling::PartiallyUnconstitutional { provisions } if provisions.is_empty() => {
                return Err(self.procedural(
                    ART_122_4,
                    "a partial unconstitutionality ruling must name the provisions concerned",
                ));
            }
            TribunalRuling::PartiallyUnconstitutional { .. } => {
                BillStage::PartiallyUnconstitutional
            }
            TribunalRuling::Unconstitutional => BillStage::Rejected,
        };
        self.advance(next, Trigger::TribunalRuling { ruling }, None);
        Ok(())
    }

    /// Remove the provisions the Tribunal found unconstitutional and return
    /// the bill to the President (`PARTIALLY_UNCONSTITUTIONAL → PRESIDENT_REVIEW`,
    /// Art. 122(4)).
    ///
    /// `provisions` must name exactly the provisions in the ruling.
    pub fn excise_provisions(&mut self, provisions: &[String]) -> Result<(), Violation> {
        self.require(
            &[BillStage::PartiallyUnconstitutional],
            "excision of provisions",
            ART_122_4,
        )?;
        let ruled = self.ruled_provisions();
        let mut expected: Vec<&str> = ruled.iter().map(String::as_str).collect();
        let mut given: Vec<&str> = provisions.iter().map(String::as_str).collect();
        expected.sort_unstable();
        expected.dedup();
        given.sort_unstable();
        given.dedup();
        if expected != given {
            return Err(self.procedural(
                ART_122_4,
                format!(
                    "excised provisions [{}] do not match the ruling [{}]",
                    given.join(", "),
                    expected.join(", ")
                ),
            ));
        }
        self.advance(
            BillStage::PresidentReview,
            Trigger::Excision {
                provisions: provisions.to_vec(),
            },
            None,
        );
        Ok(())
    }

    /// Promulgate the signed bill (`PRESIDENT_SIGNED → ENACTED`, Art. 122(2)).
    pub fn promulgate(&mut self) -> Result<(), Violation> {
        self.require(&[BillStage::PresidentSigned], "promulgation", ART_122_2)?;
        self.advance(
            BillStage::Enacted,
            Trigger::event("promulgated in the Journal of Laws"),
            None,
        );
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────

    fn ruled_provisions(&self) -> Vec<String> {
        self.history
            .iter()
            .rev()
            .find_map(|e| match &e.trigger {
                Trigger::TribunalRuling {
                    ruling: TribunalRuling::PartiallyUnconstitutional { provisions },
                } => Some(provisions.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn require(
        &self,
        allowed: &[BillStage],
        operation: &str,
        article: Article,
    ) -> Result<(), Violation> {
        if self.stage.is_terminal() {
            return Err(self.procedural(
                article,
                format!("{operation} refused: the bill is in terminal stage {}", self.stage),
            ));
        }
        if !allowed.contains(&self.stage) {
            let expected: Vec<String> = allowed.iter().map(ToString::to_string).collect();
            return Err(self.procedural(
                article,
                format!(
                    "{operation} requires stage {}, the bill is at {}",
                    expected.join(" or "),
                    self.stage
                ),
            ));
        }
        Ok(())
    }

    fn require_chamber(
        &self,
        tally: &VoteTally,
        chamber: Chamber,
        article: Article,
    ) -> Result<(), Violation> {
        if tally.chamber() != chamber {
            return Err(self.procedural(
                article,
                format!("vote must be held in the {chamber}, got {}", tally.chamber()),
            ));
        }
        Ok(())
    }

    fn check_quorum(&self, tally: &VoteTally, article: Article) -> Result<(), Violation> {
        let seats = tally.chamber().statutory_seats().unwrap_or(SEJM_SEATS);
        check_quorum_cited(tally.attendance(), seats, article).map_err(|v| refused(self.stage, v))
    }

    fn procedural(&self, article: Article, message: impl Into<String>) -> Violation {
        refused(
            self.stage,
            Violation::legislative_process(article, self.stage, message),
        )
    }

    fn record_vote(
        &mut self,
        next: BillStage,
        tally: &VoteTally,
        requirement: Majority,
        reference_base: ReferenceBase,
        result: Result<(), Violation>,
        window: Option<Window>,
    ) -> VoteOutcome {
        let trigger = Trigger::Vote {
            tally: tally.clone(),
            requirement,
            reference_base,
            passed: result.is_ok(),
        };
        self.advance(next, trigger, window);
        match result {
            Ok(()) => VoteOutcome::Passed,
            Err(v) => VoteOutcome::Failed(v),
        }
    }

    fn advance(&mut self, to: BillStage, trigger: Trigger, window: Option<Window>) {
        self.history.append(self.stage, to, trigger, window);
        self.stage = to;
    }
}
