use dex_models::models::{Coin, CoinAmount, Erc20Token, U256, U256Decimal};
use error_stack::{ResultExt, report};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::error::{Error, ModelsResultExt, QuoterResult};
use crate::fees::{self, SecondaryFeeAmount};
use crate::router::QuoteResult;
use crate::slippage::{Fraction, slippage_multiplier};
use crate::trade_request::{TradeDirection, TradeRequest, TradeType};

/// The selected router candidate with every amount the caller needs.
///
/// All values are derived once in [`Quote::finalize`]; accessors only read.
#[derive(Debug, Clone)]
pub struct Quote<'a> {
    trade_request: &'a TradeRequest,
    quote_result: QuoteResult,
    amount_in_for_swap: CoinAmount<Erc20Token>,
    amount_out: CoinAmount<Erc20Token>,
    quoted_amount: CoinAmount,
    amount_in_subject_to_fees: CoinAmount,
    slippage_multiplier: Fraction,
    amount_in_for_approval: CoinAmount,
    secondary_fees: Vec<SecondaryFeeAmount>,
    total_fees: CoinAmount,
    amount_with_max_slippage: CoinAmount,
}

impl<'a> Quote<'a> {
    pub fn finalize(
        trade_request: &'a TradeRequest,
        quote_result: QuoteResult,
    ) -> QuoterResult<Self> {
        let expected = trade_request.our_quote_req_other_token();
        if quote_result.amount.token != *expected {
            return Err(report!(Error::TokenMismatch(format!(
                "router quoted {} but {} was requested",
                quote_result.amount.token.address, expected.address
            ))));
        }

        let service = trade_request.native_token_service();
        let trade_type = trade_request.trade_type();
        let multiplier = slippage_multiplier(trade_type, trade_request.slippage_percent())?;
        let configured_fees = trade_request.secondary_fees();

        match trade_request.direction() {
            TradeDirection::ExactInput { amount_in, .. } => {
                let amount_in_subject_to_fees = amount_in.clone();
                let secondary_fees =
                    fees::compute_secondary_fees(&amount_in_subject_to_fees, configured_fees)?;
                let total_fees =
                    fees::total_fees(&amount_in_subject_to_fees.token, &secondary_fees)?;

                // Fees were netted out before routing, the router output is final
                let quoted_amount: CoinAmount = quote_result.amount.clone().into();
                let amount_with_max_slippage =
                    apply_slippage(&multiplier, &quoted_amount, trade_request.other_token())?;

                let amount_in_for_approval = if service.is_native_token(&amount_in.token) {
                    CoinAmount::zero(amount_in.token.clone())
                } else {
                    amount_in.clone()
                };

                Ok(Self {
                    trade_request,
                    amount_in_for_swap: service.maybe_wrap_amount(amount_in)?,
                    amount_out: quote_result.amount.clone(),
                    quote_result,
                    quoted_amount,
                    amount_in_subject_to_fees,
                    slippage_multiplier: multiplier,
                    amount_in_for_approval,
                    secondary_fees,
                    total_fees,
                    amount_with_max_slippage,
                })
            }
            TradeDirection::ExactOutput {
                amount_out,
                token_in,
            } => {
                // Present the router's wrapped answer in the user's own input coin
                let amount_in_subject_to_fees: CoinAmount = if service.is_native_token(token_in) {
                    service.unwrap_amount(&quote_result.amount)?.into()
                } else {
                    quote_result.amount.clone().into()
                };
                let secondary_fees =
                    fees::compute_secondary_fees(&amount_in_subject_to_fees, configured_fees)?;
                let total_fees =
                    fees::total_fees(&amount_in_subject_to_fees.token, &secondary_fees)?;

                // Fees are paid on top of what the router needs
                let quoted_amount = amount_in_subject_to_fees
                    .checked_add(&total_fees)
                    .into_quoter()
                    .attach_printable("Adding secondary fees to the quoted input")?;
                let amount_with_max_slippage =
                    apply_slippage(&multiplier, &quoted_amount, trade_request.other_token())?;

                let amount_in_for_approval =
                    if service.is_native_token(&amount_with_max_slippage.token) {
                        CoinAmount::zero(amount_with_max_slippage.token.clone())
                    } else {
                        amount_with_max_slippage.clone()
                    };

                Ok(Self {
                    trade_request,
                    amount_in_for_swap: service.maybe_wrap_amount(&quoted_amount)?,
                    amount_out: service.maybe_wrap_amount(amount_out)?,
                    quote_result,
                    quoted_amount,
                    amount_in_subject_to_fees,
                    slippage_multiplier: multiplier,
                    amount_in_for_approval,
                    secondary_fees,
                    total_fees,
                    amount_with_max_slippage,
                })
            }
        }
    }

    pub fn trade_request(&self) -> &TradeRequest {
        self.trade_request
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_request.trade_type()
    }

    pub fn quote_result(&self) -> &QuoteResult {
        &self.quote_result
    }

    /// Wrapped input the swap transaction should carry
    pub fn amount_in_for_swap(&self) -> &CoinAmount<Erc20Token> {
        &self.amount_in_for_swap
    }

    pub fn amount_out(&self) -> &CoinAmount<Erc20Token> {
        &self.amount_out
    }

    /// The amount shown to the user on the side the router decided
    pub fn quoted_amount(&self) -> &CoinAmount {
        &self.quoted_amount
    }

    pub fn amount_in_subject_to_fees(&self) -> &CoinAmount {
        &self.amount_in_subject_to_fees
    }

    pub fn slippage_multiplier(&self) -> &Fraction {
        &self.slippage_multiplier
    }

    /// Zero when the input is native currency, which needs no ERC-20 allowance
    pub fn amount_in_for_approval(&self) -> &CoinAmount {
        &self.amount_in_for_approval
    }

    pub fn secondary_fees(&self) -> &[SecondaryFeeAmount] {
        &self.secondary_fees
    }

    pub fn total_fees(&self) -> &CoinAmount {
        &self.total_fees
    }

    /// Minimum output for exact input, maximum input for exact output
    pub fn amount_with_max_slippage(&self) -> &CoinAmount {
        &self.amount_with_max_slippage
    }

    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary {
            trade_type: self.trade_type(),
            quoted_amount: self.quoted_amount.clone(),
            amount_with_max_slippage: self.amount_with_max_slippage.clone(),
            slippage_percent: self.trade_request.slippage_percent(),
            amount_in_for_swap: self.amount_in_for_swap.clone(),
            amount_in_for_approval: self.amount_in_for_approval.clone(),
            fees: self.secondary_fees.clone(),
            total_fees: self.total_fees.clone(),
            gas_estimate: self.quote_result.gas_estimate,
        }
    }
}

fn apply_slippage(
    multiplier: &Fraction,
    quoted_amount: &CoinAmount,
    other_token: &Coin,
) -> QuoterResult<CoinAmount> {
    let value = multiplier
        .multiply(quoted_amount.value)
        .attach_printable_lazy(|| format!("Applying slippage to {quoted_amount}"))?;
    Ok(CoinAmount::new(other_token.clone(), value))
}

/// Owned, serializable view of a [`Quote`] for callers outside the engine
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub trade_type: TradeType,
    pub quoted_amount: CoinAmount,
    pub amount_with_max_slippage: CoinAmount,
    pub slippage_percent: Decimal,
    pub amount_in_for_swap: CoinAmount<Erc20Token>,
    pub amount_in_for_approval: CoinAmount,
    pub fees: Vec<SecondaryFeeAmount>,
    pub total_fees: CoinAmount,
    #[serde_as(as = "U256Decimal")]
    pub gas_estimate: U256,
}
