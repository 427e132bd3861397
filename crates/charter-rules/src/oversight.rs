//! # Organs of State Control and Local Self-Government
//!
//! Appointment of the heads of the oversight organs (Art. 205, 209, 214)
//! and the Sejm's power to dissolve a local self-government body
//! (Art. 171(3)).

use charter_core::{
    Article, Citation, LocalDissolution, OversightAppointment, OversightOrgan, Violation,
};

use crate::failures;

const ART_171_3: Article = Article::cite("171(3)");
const ART_205_1: Article = Article::cite("205(1)");
const ART_209_1: Article = Article::cite("209(1)");
const ART_214_1: Article = Article::cite("214(1)");

/// Check who appointed an oversight officer.
///
/// The President of the Supreme Audit Office (Art. 205(1)) and the
/// Commissioner for Citizens' Rights (Art. 209(1)) are appointed by the
/// Sejm with the consent of the Senate. Members of the National
/// Broadcasting Council are appointed by the Sejm, the Senate and the
/// President (Art. 214(1)); each member needs one of them.
pub fn check_oversight_appointment(appointment: &OversightAppointment) -> Result<(), Violation> {
    let article = match appointment.organ {
        OversightOrgan::Nik => ART_205_1,
        OversightOrgan::Rpo => ART_209_1,
        OversightOrgan::Krrit => ART_214_1,
    };
    let reasons = match appointment.organ {
        OversightOrgan::Nik | OversightOrgan::Rpo => failures(&[
            (
                !appointment.sejm_approved,
                "not appointed by the Sejm".to_string(),
            ),
            (
                !appointment.senate_approved,
                "the Senate has not consented".to_string(),
            ),
        ]),
        OversightOrgan::Krrit => {
            let appointed = appointment.sejm_approved
                || appointment.senate_approved
                || appointment.president_appointed;
            (!appointed).then(|| {
                "not appointed by the Sejm, the Senate or the President".to_string()
            })
        }
    };
    match reasons {
        None => Ok(()),
        Some(reasons) => Err(Violation::Oversight(Citation::new(
            article,
            format!(
                "{} as {}: {reasons}",
                appointment.name, appointment.organ
            ),
        ))),
    }
}

/// Dissolution of a constituent body of local self-government by the Sejm
/// (Art. 171(3)).
///
/// Requires a motion of the Prime Minister and a flagrant violation of the
/// Constitution or a statute.
pub fn validate_local_dissolution(request: &LocalDissolution) -> Result<(), Violation> {
    let conditions = [
        (
            !request.prime_minister_motion,
            "not moved by the Prime Minister".to_string(),
        ),
        (
            !request.flagrant_violation,
            "no flagrant violation of the Constitution or a statute".to_string(),
        ),
    ];
    match failures(&conditions) {
        None => Ok(()),
        Some(reasons) => Err(Violation::LocalGovernment(Citation::new(
            ART_171_3,
            format!("dissolution of {} refused: {reasons}", request.body),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::ViolationKind;

    fn appointment(organ: OversightOrgan) -> OversightAppointment {
        OversightAppointment {
            organ,
            name: "Piotr Zieliński".into(),
            sejm_approved: false,
            senate_approved: false,
            president_appointed: false,
        }
    }

    #[test]
    fn test_audit_office_needs_both_chambers() {
        let a = OversightAppointment {
            sejm_approved: true,
            ..appointment(OversightOrgan::Nik)
        };
        let err = check_oversight_appointment(&a).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::Oversight);
        assert_eq!(err.article().as_str(), "205(1)");
        let a = OversightAppointment {
            senate_approved: true,
            ..a
        };
        assert!(check_oversight_appointment(&a).is_ok());
    }

    #[test]
    fn test_commissioner_cites_own_article() {
        let err = check_oversight_appointment(&appointment(OversightOrgan::Rpo)).unwrap_err();
        assert_eq!(err.article().as_str(), "209(1)");
    }

    #[test]
    fn test_broadcasting_council_any_appointing_body() {
        let err = check_oversight_appointment(&appointment(OversightOrgan::Krrit)).unwrap_err();
        assert_eq!(err.article().as_str(), "214(1)");
        let a = OversightAppointment {
            president_appointed: true,
            ..appointment(OversightOrgan::Krrit)
        };
        assert!(check_oversight_appointment(&a).is_ok());
    }

    #[test]
    fn test_local_dissolution() {
        let request = LocalDissolution {
            body: "Rada Miasta".into(),
            prime_minister_motion: true,
            flagrant_violation: false,
        };
        let err = validate_local_dissolution(&request).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::LocalGovernment);
        assert_eq!(err.article().as_str(), "171(3)");
        let request = LocalDissolution {
            flagrant_violation: true,
            ..request
        };
        assert!(validate_local_dissolution(&request).is_ok());
    }
}
