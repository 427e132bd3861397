//! # Sources of Law
//!
//! The universally binding sources of law form a strict order (Art. 87–91):
//! the Constitution, ratified international agreements, statutes,
//! regulations, and enactments of local law.

use charter_core::{Article, Citation, LegalActKind, Violation};

const ART_87: Article = Article::cite("87");

/// An act of kind `subordinate` may be subordinate to `superior` only if it
/// ranks strictly lower.
pub fn check_legal_hierarchy(
    subordinate: LegalActKind,
    superior: LegalActKind,
) -> Result<(), Violation> {
    if subordinate.rank() > superior.rank() {
        return Ok(());
    }
    Err(Violation::LegalHierarchy(Citation::new(
        ART_87,
        format!("a {subordinate} does not rank below a {superior}"),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::ViolationKind;

    const ORDER: [LegalActKind; 5] = [
        LegalActKind::Constitution,
        LegalActKind::RatifiedTreaty,
        LegalActKind::Statute,
        LegalActKind::Regulation,
        LegalActKind::LocalAct,
    ];

    #[test]
    fn test_strict_order() {
        for (i, superior) in ORDER.iter().enumerate() {
            for (j, subordinate) in ORDER.iter().enumerate() {
                let result = check_legal_hierarchy(*subordinate, *superior);
                assert_eq!(result.is_ok(), j > i, "{subordinate} under {superior}");
            }
        }
    }

    #[test]
    fn test_statute_cannot_override_constitution() {
        let err =
            check_legal_hierarchy(LegalActKind::Constitution, LegalActKind::Statute).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::LegalHierarchy);
        assert_eq!(err.article().as_str(), "87");
    }
}
