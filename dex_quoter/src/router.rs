use async_trait::async_trait;
use dex_models::models::{CoinAmount, Erc20Token, U256, U256Decimal};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::error::QuoterResult;
use crate::trade_request::TradeType;

/// One candidate route returned by a router
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    /// Router specific, opaque to the engine
    pub route: serde_json::Value,
    /// Output for exact input, input for exact output. Always on the wrapped
    /// side of the trade.
    pub amount: CoinAmount<Erc20Token>,
    #[serde_as(as = "U256Decimal")]
    pub gas_estimate: U256,
}

/// Route search over on-chain liquidity.
///
/// `amount` is the fixed side of the trade and `other_token` the side to quote.
/// Both are ERC-20s: native currency is wrapped before the router is called.
#[async_trait]
pub trait QuoteRouter: Send + Sync {
    async fn get_quotes(
        &self,
        amount: &CoinAmount<Erc20Token>,
        other_token: &Erc20Token,
        trade_type: TradeType,
        max_hops: u8,
    ) -> QuoterResult<Vec<QuoteResult>>;
}
