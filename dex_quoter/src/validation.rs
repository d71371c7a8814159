use dex_models::models::fee::BASIS_POINT_PRECISION;
use dex_models::models::{Coin, CoinAmount, SecondaryFee, normalize_address};
use error_stack::{ResultExt, report};
use rust_decimal::Decimal;

use crate::error::{Error, QuoterResult};
use crate::native_token::NativeTokenService;
use crate::trade_request::TradeDirection;

pub const DEFAULT_MAX_HOPS: u8 = 2;
pub const MIN_MAX_HOPS: u8 = 1;
pub const MAX_MAX_HOPS: u8 = 10;

/// Cap on the sum of all configured secondary fees (10%)
pub const MAX_SECONDARY_FEE_BASIS_POINTS: u32 = 1_000;

/// 0.1%
pub fn default_slippage() -> Decimal {
    Decimal::new(1, 1)
}

/// 50%
pub fn max_slippage() -> Decimal {
    Decimal::new(50, 0)
}

pub fn validate_slippage(slippage_percent: Decimal) -> QuoterResult<()> {
    if slippage_percent.is_sign_negative() && !slippage_percent.is_zero() {
        return Err(report!(Error::InvalidSlippage(format!(
            "{slippage_percent} is negative"
        ))));
    }
    if slippage_percent > max_slippage() {
        return Err(report!(Error::InvalidSlippage(format!(
            "{slippage_percent} exceeds the maximum of {}",
            max_slippage()
        ))));
    }
    Ok(())
}

pub fn validate_max_hops(max_hops: u8) -> QuoterResult<()> {
    if !(MIN_MAX_HOPS..=MAX_MAX_HOPS).contains(&max_hops) {
        return Err(report!(Error::InvalidMaxHops(format!(
            "{max_hops} is outside {MIN_MAX_HOPS}..={MAX_MAX_HOPS}"
        ))));
    }
    Ok(())
}

pub fn validate_secondary_fees(fees: &[SecondaryFee]) -> QuoterResult<()> {
    let mut total_basis_points: u32 = 0;
    for fee in fees {
        normalize_address(&fee.recipient)
            .change_context(Error::InvalidSecondaryFee(format!(
                "recipient {} is not an address",
                fee.recipient
            )))?;
        if fee.basis_points > BASIS_POINT_PRECISION {
            return Err(report!(Error::InvalidSecondaryFee(format!(
                "{} basis points exceeds {BASIS_POINT_PRECISION}",
                fee.basis_points
            ))));
        }
        total_basis_points += u32::from(fee.basis_points);
    }
    if total_basis_points > MAX_SECONDARY_FEE_BASIS_POINTS {
        return Err(report!(Error::InvalidSecondaryFee(format!(
            "total of {total_basis_points} basis points exceeds {MAX_SECONDARY_FEE_BASIS_POINTS}"
        ))));
    }
    Ok(())
}

pub fn validate_amount(amount: &CoinAmount) -> QuoterResult<()> {
    if amount.is_zero() {
        return Err(report!(Error::InvalidAmount(format!(
            "amount of {} must be greater than zero",
            amount.token
        ))));
    }
    Ok(())
}

pub fn validate_token_chain(token: &Coin, service: &NativeTokenService) -> QuoterResult<()> {
    if token.chain_id() != service.chain_id() {
        return Err(report!(Error::InvalidToken(format!(
            "{token} is on {} but the exchange is configured for {}",
            token.chain_id(),
            service.chain_id()
        ))));
    }
    Ok(())
}

/// Native currency and its wrapped token count as the same asset here:
/// exchanging one for the other is a wrap, not a swap
pub fn validate_different_tokens(
    token_in: &Coin,
    token_out: &Coin,
    service: &NativeTokenService,
) -> QuoterResult<()> {
    if service.maybe_wrap_token(token_in)? == service.maybe_wrap_token(token_out)? {
        return Err(report!(Error::InvalidToken(format!(
            "token in {token_in} and token out {token_out} are the same asset"
        ))));
    }
    Ok(())
}

pub fn validate_trade(
    direction: &TradeDirection,
    fees: &[SecondaryFee],
    slippage_percent: Decimal,
    max_hops: u8,
    service: &NativeTokenService,
) -> QuoterResult<()> {
    validate_slippage(slippage_percent)?;
    validate_max_hops(max_hops)?;
    validate_secondary_fees(fees)?;
    validate_amount(direction.specified_amount())?;
    validate_token_chain(direction.token_in(), service)?;
    validate_token_chain(direction.token_out(), service)?;
    validate_different_tokens(direction.token_in(), direction.token_out(), service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{CHAIN, erc20_amount, fee, service, usdc, wimx};
    use dex_models::constants::chains::ChainId;
    use dex_models::models::Erc20Token;

    #[test]
    fn test_validate_slippage() {
        assert!(validate_slippage(Decimal::ZERO).is_ok());
        assert!(validate_slippage(default_slippage()).is_ok());
        assert!(validate_slippage(max_slippage()).is_ok());
        assert!(validate_slippage(Decimal::new(5001, 2)).is_err());
        assert!(validate_slippage(Decimal::new(-1, 1)).is_err());
    }

    #[test]
    fn test_validate_max_hops() {
        assert!(validate_max_hops(0).is_err());
        assert!(validate_max_hops(1).is_ok());
        assert!(validate_max_hops(DEFAULT_MAX_HOPS).is_ok());
        assert!(validate_max_hops(10).is_ok());
        assert!(validate_max_hops(11).is_err());
    }

    #[test]
    fn test_validate_secondary_fees() {
        assert!(validate_secondary_fees(&[]).is_ok());
        assert!(validate_secondary_fees(&[fee(500), fee(500)]).is_ok());

        let err = validate_secondary_fees(&[fee(500), fee(501)]).unwrap_err();
        assert!(matches!(err.current_context(), Error::InvalidSecondaryFee(_)));

        let bad_recipient = SecondaryFee {
            recipient: "not-an-address".to_string(),
            basis_points: 10,
        };
        assert!(validate_secondary_fees(&[bad_recipient]).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(&erc20_amount(usdc(), 1)).is_ok());
        assert!(validate_amount(&erc20_amount(usdc(), 0)).is_err());
    }

    #[test]
    fn test_validate_token_chain() {
        let service = service();
        assert!(validate_token_chain(&usdc().into(), &service).is_ok());
        let foreign = Erc20Token::new(ChainId::Ethereum, &usdc().address, 6).unwrap();
        assert!(validate_token_chain(&foreign.into(), &service).is_err());
    }

    #[test]
    fn test_native_and_wrapped_are_the_same_asset() {
        let service = service();
        let native: Coin = CHAIN.native_token().into();
        assert!(validate_different_tokens(&native, &wimx().into(), &service).is_err());
        assert!(validate_different_tokens(&usdc().into(), &usdc().into(), &service).is_err());
        assert!(validate_different_tokens(&native, &usdc().into(), &service).is_ok());
    }
}
