//! # Public Finance
//!
//! The public debt ceiling (Art. 216(5)) and the political neutrality of
//! the President of the National Bank of Poland (Art. 227(4)).
//!
//! The ceiling compares `debt × 5` with `GDP × 3` in exact decimal
//! arithmetic. Figures too large to multiply exactly are refused rather
//! than rounded.

use charter_core::{Article, CentralBankCandidate, Citation, PublicDebt, Violation};

use crate::failures;

const ART_216_5: Article = Article::cite("216(5)");
const ART_227_4: Article = Article::cite("227(4)");

/// Public debt may not exceed three fifths of annual GDP (Art. 216(5)).
pub fn check_debt_ceiling(figures: &PublicDebt) -> Result<(), Violation> {
    let refuse = |message: String| -> Result<(), Violation> {
        Err(Violation::DebtCeiling {
            citation: Citation::new(ART_216_5, message),
            debt: figures.debt,
            gdp: figures.gdp,
        })
    };
    if !figures.gdp.is_positive() {
        return refuse(format!("GDP must be positive, got {}", figures.gdp));
    }
    if figures.debt.is_negative() {
        return refuse(format!("public debt cannot be negative, got {}", figures.debt));
    }
    let (debt_x5, gdp_x3) = match (figures.debt.checked_mul_int(5), figures.gdp.checked_mul_int(3)) {
        (Ok(debt), Ok(gdp)) => (debt, gdp),
        (Err(e), _) | (_, Err(e)) => {
            return refuse(format!("figures cannot be compared exactly: {e}"));
        }
    };
    if debt_x5 <= gdp_x3 {
        return Ok(());
    }
    refuse(format!(
        "public debt {} exceeds 3/5 of GDP {}",
        figures.debt, figures.gdp
    ))
}

/// The President of the National Bank of Poland may not belong to a party
/// or trade union, nor perform incompatible public activities (Art. 227(4)).
pub fn check_central_bank_president(candidate: &CentralBankCandidate) -> Result<(), Violation> {
    let conditions = [
        (candidate.party_member, "belongs to a political party".to_string()),
        (candidate.union_member, "belongs to a trade union".to_string()),
        (
            candidate.incompatible_public_activity,
            "performs public activities incompatible with the office".to_string(),
        ),
    ];
    match failures(&conditions) {
        None => Ok(()),
        Some(reasons) => Err(Violation::CentralBank(Citation::new(
            ART_227_4,
            format!("{} {reasons}", candidate.name),
        ))),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use charter_core::Decimal;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ceiling_matches_integer_rule(debt in 0i64..1_000_000_000, gdp in 1i64..1_000_000_000) {
            let figures = PublicDebt { debt: Decimal::from(debt), gdp: Decimal::from(gdp) };
            let expected = i128::from(debt) * 5 <= i128::from(gdp) * 3;
            prop_assert_eq!(check_debt_ceiling(&figures).is_ok(), expected);
        }
    }
}
