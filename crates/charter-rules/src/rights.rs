//! # Freedoms and Rights
//!
//! The Art. 31(3) proportionality test, the protection of life and
//! personal inviolability (Art. 38–40), and extradition (Art. 55).

use charter_core::{
    Article, Citation, ExtraditionRequest, PersonalMeasure, RightsRestriction, Violation,
};

use crate::failures;

const ART_31_3: Article = Article::cite("31(3)");
const ART_38: Article = Article::cite("38");
const ART_39: Article = Article::cite("39");
const ART_40: Article = Article::cite("40");
const ART_55_1: Article = Article::cite("55(1)");
const ART_55_2: Article = Article::cite("55(2)");
const ART_55_4: Article = Article::cite("55(4)");
const ART_55_5: Article = Article::cite("55(5)");

/// Test a limitation of a constitutional freedom against its five
/// cumulative conditions (Art. 31(3)).
pub fn validate_rights_restriction(restriction: &RightsRestriction) -> Result<(), Violation> {
    let conditions = [
        (!restriction.by_statute, "not imposed by statute".to_string()),
        (
            !restriction.necessary_in_democratic_state,
            "not necessary in a democratic state".to_string(),
        ),
        (
            !restriction.legitimate_aim,
            "pursues no legitimate aim (security, public order, environment, health, public morals, freedoms of others)"
                .to_string(),
        ),
        (
            !restriction.proportionate,
            "not proportionate to the aim pursued".to_string(),
        ),
        (
            !restriction.preserves_essence,
            "violates the essence of the freedom or right".to_string(),
        ),
    ];
    match failures(&conditions) {
        None => Ok(()),
        Some(reasons) => Err(Violation::RightsRestriction(Citation::new(
            ART_31_3,
            format!("restriction '{}' fails: {reasons}", restriction.description),
        ))),
    }
}

/// Check a measure against the protection of life (Art. 38), the ban on
/// experimentation without consent (Art. 39), and the ban on torture and
/// corporal punishment (Art. 40).
///
/// The first provision violated is cited.
pub fn check_personal_inviolability(measure: &PersonalMeasure) -> Result<(), Violation> {
    let refuse = |article: Article, what: &str| -> Result<(), Violation> {
        Err(Violation::LifeProtection(Citation::new(
            article,
            format!("'{}' {what}", measure.description),
        )))
    };
    if measure.deprives_of_life {
        return refuse(ART_38, "deprives a person of life");
    }
    if measure.experimentation && !measure.voluntary_consent {
        return refuse(ART_39, "subjects a person to experimentation without consent");
    }
    if measure.cruel_treatment {
        return refuse(ART_40, "is cruel, inhuman or degrading treatment");
    }
    if measure.corporal_punishment {
        return refuse(ART_40, "applies corporal punishment");
    }
    Ok(())
}

/// Decide whether an extradition is constitutionally permissible (Art. 55).
///
/// Order of evaluation:
///
/// 1. Art. 55(4) bars extradition of anyone for a non-violent political
///    offence, or where it would violate human rights.
/// 2. Art. 55(5): a court must have ruled it admissible.
/// 3. Non-citizens face no further constitutional bar.
/// 4. Art. 55(3): an international judicial body acting under a ratified
///    treaty, for genocide, crimes against humanity, war crimes or
///    aggression, is exempt from the Art. 55(2) conditions.
/// 5. Art. 55(2): treaty-based extradition of a citizen needs the act to
///    be committed abroad and to be an offence under Polish law.
/// 6. Otherwise Art. 55(1) forbids extraditing a Polish citizen.
pub fn validate_extradition(request: &ExtraditionRequest) -> Result<(), Violation> {
    let refuse = |article: Article, message: String| -> Result<(), Violation> {
        Err(Violation::Extradition(Citation::new(article, message)))
    };
    if request.political_nonviolent_offense {
        return refuse(
            ART_55_4,
            "prohibited: a non-violent offence committed for political reasons".into(),
        );
    }
    if request.violates_human_rights {
        return refuse(
            ART_55_4,
            "prohibited: would violate the freedoms and rights of persons and citizens".into(),
        );
    }
    if !request.court_approved {
        return refuse(
            ART_55_5,
            "inadmissible: no court has ruled on admissibility".into(),
        );
    }
    if !request.subject_is_polish_citizen {
        return Ok(());
    }
    if request.international_judicial_body
        && request.based_on_ratified_treaty
        && request.genocide_or_war_crime
    {
        return Ok(());
    }
    if request.based_on_ratified_treaty {
        let conditions = [
            (
                !request.act_committed_abroad,
                "act was not committed outside Polish territory".to_string(),
            ),
            (
                !request.double_criminality,
                "act is not an offence under Polish law".to_string(),
            ),
        ];
        return match failures(&conditions) {
            None => Ok(()),
            Some(reasons) => refuse(
                ART_55_2,
                format!("extradition of a Polish citizen denied: {reasons}"),
            ),
        };
    }
    refuse(
        ART_55_1,
        "extradition of a Polish citizen is prohibited".into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::ViolationKind;

    fn valid_restriction() -> RightsRestriction {
        RightsRestriction {
            description: "assembly ban near a polling station".into(),
            by_statute: true,
            necessary_in_democratic_state: true,
            legitimate_aim: true,
            proportionate: true,
            preserves_essence: true,
        }
    }

    fn citizen_request() -> ExtraditionRequest {
        ExtraditionRequest {
            subject_is_polish_citizen: true,
            court_approved: true,
            ..ExtraditionRequest::default()
        }
    }

    // ── Art. 31(3) ──────────────────────────────────────────────────

    #[test]
    fn test_restriction_all_conditions_met() {
        assert!(validate_rights_restriction(&valid_restriction()).is_ok());
    }

    #[test]
    fn test_restriction_lists_every_failure() {
        let r = RightsRestriction {
            by_statute: false,
            proportionate: false,
            ..valid_restriction()
        };
        let err = validate_rights_restriction(&r).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::RightsRestriction);
        assert_eq!(err.article().as_str(), "31(3)");
        assert!(err.message().contains("statute"));
        assert!(err.message().contains("proportionate"));
        assert!(!err.message().contains("essence"));
    }

    // ── Art. 38–40 ──────────────────────────────────────────────────

    #[test]
    fn test_experimentation_with_consent_permitted() {
        let m = PersonalMeasure {
            description: "clinical trial".into(),
            experimentation: true,
            voluntary_consent: true,
            ..PersonalMeasure::default()
        };
        assert!(check_personal_inviolability(&m).is_ok());
        let m = PersonalMeasure {
            voluntary_consent: false,
            ..m
        };
        let err = check_personal_inviolability(&m).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::LifeProtection);
        assert_eq!(err.article().as_str(), "39");
    }

    #[test]
    fn test_corporal_punishment_forbidden() {
        let m = PersonalMeasure {
            description: "flogging".into(),
            corporal_punishment: true,
            ..PersonalMeasure::default()
        };
        assert_eq!(
            check_personal_inviolability(&m).unwrap_err().article().as_str(),
            "40"
        );
    }

    // ── Art. 55 ─────────────────────────────────────────────────────

    #[test]
    fn test_citizen_without_treaty_is_protected() {
        let err = validate_extradition(&citizen_request()).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::Extradition);
        assert_eq!(err.article().as_str(), "55(1)");
    }

    #[test]
    fn test_treaty_conditions() {
        let req = ExtraditionRequest {
            based_on_ratified_treaty: true,
            act_committed_abroad: true,
            double_criminality: true,
            ..citizen_request()
        };
        assert!(validate_extradition(&req).is_ok());
        let req = ExtraditionRequest {
            double_criminality: false,
            ..req
        };
        assert_eq!(
            validate_extradition(&req).unwrap_err().article().as_str(),
            "55(2)"
        );
    }

    #[test]
    fn test_international_tribunal_exception() {
        let req = ExtraditionRequest {
            international_judicial_body: true,
            based_on_ratified_treaty: true,
            genocide_or_war_crime: true,
            ..citizen_request()
        };
        assert!(validate_extradition(&req).is_ok());
    }

    #[test]
    fn test_political_bar_precedes_everything() {
        let req = ExtraditionRequest {
            political_nonviolent_offense: true,
            court_approved: false,
            ..ExtraditionRequest::default()
        };
        assert_eq!(
            validate_extradition(&req).unwrap_err().article().as_str(),
            "55(4)"
        );
    }

    #[test]
    fn test_court_ruling_required_for_foreigners() {
        let req = ExtraditionRequest::default();
        assert_eq!(
            validate_extradition(&req).unwrap_err().article().as_str(),
            "55(5)"
        );
        let req = ExtraditionRequest {
            court_approved: true,
            ..req
        };
        assert!(validate_extradition(&req).is_ok());
    }
}
