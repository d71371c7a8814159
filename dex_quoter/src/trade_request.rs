use std::sync::Arc;

use dex_models::models::{Coin, CoinAmount, Erc20Token, SecondaryFee};
use error_stack::report;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, QuoterResult};
use crate::fees;
use crate::native_token::NativeTokenService;
use crate::quote::Quote;
use crate::router::QuoteResult;
use crate::validation::validate_trade;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// What the user fixed and what they leave to the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeDirection {
    /// Spend exactly `amount_in`, receive as much `token_out` as possible
    ExactInput {
        amount_in: CoinAmount,
        token_out: Coin,
    },
    /// Receive exactly `amount_out`, spend as little `token_in` as possible
    ExactOutput {
        amount_out: CoinAmount,
        token_in: Coin,
    },
}

impl TradeDirection {
    pub fn trade_type(&self) -> TradeType {
        match self {
            TradeDirection::ExactInput { .. } => TradeType::ExactInput,
            TradeDirection::ExactOutput { .. } => TradeType::ExactOutput,
        }
    }

    pub fn token_in(&self) -> &Coin {
        match self {
            TradeDirection::ExactInput { amount_in, .. } => &amount_in.token,
            TradeDirection::ExactOutput { token_in, .. } => token_in,
        }
    }

    pub fn token_out(&self) -> &Coin {
        match self {
            TradeDirection::ExactInput { token_out, .. } => token_out,
            TradeDirection::ExactOutput { amount_out, .. } => &amount_out.token,
        }
    }

    /// The side whose amount the router decides
    pub fn other_token(&self) -> &Coin {
        match self {
            TradeDirection::ExactInput { token_out, .. } => token_out,
            TradeDirection::ExactOutput { token_in, .. } => token_in,
        }
    }

    /// The side whose amount the user fixed
    pub fn specified_amount(&self) -> &CoinAmount {
        match self {
            TradeDirection::ExactInput { amount_in, .. } => amount_in,
            TradeDirection::ExactOutput { amount_out, .. } => amount_out,
        }
    }
}

/// A user's trade intent, with the router-facing amount already derived.
///
/// Immutable once built. The native token service is shared, never copied.
#[derive(Debug, Clone)]
pub struct TradeRequest {
    direction: TradeDirection,
    secondary_fees: Vec<SecondaryFee>,
    slippage_percent: Decimal,
    max_hops: u8,
    native_token_service: Arc<NativeTokenService>,
    amount_less_fees: Option<CoinAmount>,
    our_quote_req_amount: CoinAmount<Erc20Token>,
    our_quote_req_other_token: Erc20Token,
}

impl TradeRequest {
    pub fn exact_input(
        amount_in: CoinAmount,
        token_out: Coin,
        secondary_fees: Vec<SecondaryFee>,
        slippage_percent: Decimal,
        max_hops: u8,
        native_token_service: Arc<NativeTokenService>,
    ) -> QuoterResult<Self> {
        Self::new(
            TradeDirection::ExactInput {
                amount_in,
                token_out,
            },
            secondary_fees,
            slippage_percent,
            max_hops,
            native_token_service,
        )
    }

    pub fn exact_output(
        token_in: Coin,
        amount_out: CoinAmount,
        secondary_fees: Vec<SecondaryFee>,
        slippage_percent: Decimal,
        max_hops: u8,
        native_token_service: Arc<NativeTokenService>,
    ) -> QuoterResult<Self> {
        Self::new(
            TradeDirection::ExactOutput {
                amount_out,
                token_in,
            },
            secondary_fees,
            slippage_percent,
            max_hops,
            native_token_service,
        )
    }

    pub fn new(
        direction: TradeDirection,
        secondary_fees: Vec<SecondaryFee>,
        slippage_percent: Decimal,
        max_hops: u8,
        native_token_service: Arc<NativeTokenService>,
    ) -> QuoterResult<Self> {
        validate_trade(
            &direction,
            &secondary_fees,
            slippage_percent,
            max_hops,
            &native_token_service,
        )?;

        // Exact input nets fees out before routing; exact output adds them
        // back on the input side once the router has answered.
        let (amount_less_fees, our_quote_req_amount) = match &direction {
            TradeDirection::ExactInput { amount_in, .. } => {
                let net = fees::amount_less_fees(amount_in, &secondary_fees)?;
                let wrapped = native_token_service.maybe_wrap_amount(&net)?;
                (Some(net), wrapped)
            }
            TradeDirection::ExactOutput { amount_out, .. } => {
                (None, native_token_service.maybe_wrap_amount(amount_out)?)
            }
        };
        let our_quote_req_other_token =
            native_token_service.maybe_wrap_token(direction.other_token())?;

        Ok(Self {
            direction,
            secondary_fees,
            slippage_percent,
            max_hops,
            native_token_service,
            amount_less_fees,
            our_quote_req_amount,
            our_quote_req_other_token,
        })
    }

    pub fn direction(&self) -> &TradeDirection {
        &self.direction
    }

    pub fn trade_type(&self) -> TradeType {
        self.direction.trade_type()
    }

    pub fn token_in(&self) -> &Coin {
        self.direction.token_in()
    }

    pub fn token_out(&self) -> &Coin {
        self.direction.token_out()
    }

    pub fn other_token(&self) -> &Coin {
        self.direction.other_token()
    }

    pub fn specified_amount(&self) -> &CoinAmount {
        self.direction.specified_amount()
    }

    pub fn secondary_fees(&self) -> &[SecondaryFee] {
        &self.secondary_fees
    }

    pub fn slippage_percent(&self) -> Decimal {
        self.slippage_percent
    }

    pub fn max_hops(&self) -> u8 {
        self.max_hops
    }

    pub fn native_token_service(&self) -> &NativeTokenService {
        &self.native_token_service
    }

    /// Exact input only: the input left once every fee is taken
    pub fn amount_less_fees(&self) -> Option<&CoinAmount> {
        self.amount_less_fees.as_ref()
    }

    /// Wrapped, fee-adjusted amount to hand to the router
    pub fn our_quote_req_amount(&self) -> &CoinAmount<Erc20Token> {
        &self.our_quote_req_amount
    }

    /// Wrapped token the router should quote against
    pub fn our_quote_req_other_token(&self) -> &Erc20Token {
        &self.our_quote_req_other_token
    }

    /// Picks the candidate with the greatest amount and finalizes it
    pub fn get_best_quote(&self, quotes: Vec<QuoteResult>) -> QuoterResult<Quote<'_>> {
        let best = select_best_quote_result(quotes)?;
        Quote::finalize(self, best)
    }
}

/// Greatest `amount.value` wins, for both trade types. Ties keep the earlier
/// candidate.
pub fn select_best_quote_result(quotes: Vec<QuoteResult>) -> QuoterResult<QuoteResult> {
    let mut candidates = quotes.into_iter();
    let mut best = candidates
        .next()
        .ok_or_else(|| report!(Error::NoCandidates))?;
    for candidate in candidates {
        if candidate.amount.value > best.amount.value {
            best = candidate;
        }
    }
    Ok(best)
}
