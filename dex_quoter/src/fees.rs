//! Basis-point arithmetic for secondary fees.
//!
//! Every fee is computed against the same base amount. Fees never compound:
//! a 1% and a 2% fee on 1,000,000 take exactly 10,000 and 20,000.

use dex_models::models::fee::BASIS_POINT_PRECISION;
use dex_models::models::{Coin, CoinAmount, SecondaryFee, U256, mul_div};
use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

use crate::error::{ModelsResultExt, QuoterResult};

/// A configured fee together with what it takes from a trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryFeeAmount {
    pub fee: SecondaryFee,
    pub amount: CoinAmount,
}

/// `amount * basis_points / 10000`, truncated
pub fn fee_amount(amount: &CoinAmount, fee: &SecondaryFee) -> QuoterResult<CoinAmount> {
    let value = mul_div(
        amount.value,
        U256::from(fee.basis_points),
        U256::from(BASIS_POINT_PRECISION),
    )
    .into_quoter()
    .attach_printable_lazy(|| format!("Computing {} bps fee on {amount}", fee.basis_points))?;
    Ok(CoinAmount::new(amount.token.clone(), value))
}

pub fn compute_secondary_fees(
    amount_subject_to_fees: &CoinAmount,
    fees: &[SecondaryFee],
) -> QuoterResult<Vec<SecondaryFeeAmount>> {
    fees.iter()
        .map(|fee| -> QuoterResult<SecondaryFeeAmount> {
            Ok(SecondaryFeeAmount {
                fee: fee.clone(),
                amount: fee_amount(amount_subject_to_fees, fee)?,
            })
        })
        .collect()
}

/// Sum of all fee amounts, zero on `token` when there are none
pub fn total_fees(
    token: &Coin,
    fee_amounts: &[SecondaryFeeAmount],
) -> QuoterResult<CoinAmount> {
    fee_amounts
        .iter()
        .try_fold(CoinAmount::zero(token.clone()), |total, fee| {
            total.checked_add(&fee.amount).into_quoter()
        })
}

/// Deducts every fee, each computed on the original `amount`
pub fn amount_less_fees(amount: &CoinAmount, fees: &[SecondaryFee]) -> QuoterResult<CoinAmount> {
    fees.iter().try_fold(amount.clone(), |remaining, fee| {
        let taken = fee_amount(amount, fee)?;
        remaining
            .checked_sub(&taken)
            .into_quoter()
            .attach_printable("Secondary fees exceed the trade amount")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{erc20_amount, fee, usdc};

    #[test]
    fn test_fee_amount_truncates() {
        let amount = erc20_amount(usdc(), 999);
        let taken = fee_amount(&amount, &fee(100)).unwrap();
        // 999 * 100 / 10000 = 9.99
        assert_eq!(taken.value, U256::from(9u64));
        assert_eq!(taken.token, amount.token);
    }

    #[test]
    fn test_amount_less_fees_does_not_compound() {
        let amount = erc20_amount(usdc(), 1_000_000);
        let remaining = amount_less_fees(&amount, &[fee(100), fee(200)]).unwrap();
        assert_eq!(remaining.value, U256::from(970_000u64));
    }

    #[test]
    fn test_amount_less_fees_without_fees() {
        let amount = erc20_amount(usdc(), 1_000_000);
        assert_eq!(amount_less_fees(&amount, &[]).unwrap(), amount);
    }

    #[test]
    fn test_amount_less_fees_underflow() {
        // Two full fees take 200% of the amount
        let amount = erc20_amount(usdc(), 1_000);
        let err = amount_less_fees(&amount, &[fee(10_000), fee(10_000)]).unwrap_err();
        assert_eq!(*err.current_context(), crate::error::Error::ArithmeticUnderflow);
    }

    #[test]
    fn test_compute_and_total_fees() {
        let amount = erc20_amount(usdc(), 1_000_000);
        let fee_amounts = compute_secondary_fees(&amount, &[fee(100), fee(200)]).unwrap();
        assert_eq!(fee_amounts.len(), 2);
        assert_eq!(fee_amounts[0].amount.value, U256::from(10_000u64));
        assert_eq!(fee_amounts[1].amount.value, U256::from(20_000u64));
        assert_eq!(fee_amounts[1].fee.basis_points, 200);

        let total = total_fees(&amount.token, &fee_amounts).unwrap();
        assert_eq!(total.value, U256::from(30_000u64));
    }

    #[test]
    fn test_total_fees_empty_is_zero() {
        let token: Coin = usdc().into();
        let total = total_fees(&token, &[]).unwrap();
        assert!(total.is_zero());
        assert_eq!(total.token, token);
    }
}
