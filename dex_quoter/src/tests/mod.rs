use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dex_models::constants::chains::ChainId;
use dex_models::models::{Coin, CoinAmount, Erc20Token, SecondaryFee, U256};
use error_stack::report;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{Error, QuoterResult};
use crate::native_token::NativeTokenService;
use crate::router::{QuoteResult, QuoteRouter};
use crate::trade_request::TradeType;

pub const CHAIN: ChainId = ChainId::ImmutableZkEvm;

pub const USDC_ADDRESS: &str = "0x6de8acc0d406837030ce4dd28e7c08c5a96a30d2";
pub const FEE_RECIPIENT: &str = "0x8ba1f109551bd432803012645ac136ddd64dba72";

pub fn init_tracing_in_tests() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().pretty().with_ansi(true))
        .try_init()
        .ok();
}

pub fn service() -> Arc<NativeTokenService> {
    Arc::new(NativeTokenService::for_chain(CHAIN))
}

pub fn usdc() -> Erc20Token {
    Erc20Token::new(CHAIN, USDC_ADDRESS, 6)
        .unwrap()
        .with_symbol("USDC")
}

pub fn wimx() -> Erc20Token {
    CHAIN.wrapped_native_token()
}

pub fn native_amount(value: u64) -> CoinAmount {
    CoinAmount::new(Coin::from(CHAIN.native_token()), U256::from(value))
}

pub fn erc20_amount(token: Erc20Token, value: u64) -> CoinAmount {
    CoinAmount::new(Coin::from(token), U256::from(value))
}

pub fn fee(basis_points: u16) -> SecondaryFee {
    SecondaryFee::new(FEE_RECIPIENT, basis_points).unwrap()
}

pub fn quote_result(token: Erc20Token, value: u64) -> QuoteResult {
    QuoteResult {
        route: serde_json::json!({ "pools": ["0x01", "0x02"] }),
        amount: CoinAmount::new(token, U256::from(value)),
        gas_estimate: U256::from(150_000u64),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub amount: CoinAmount<Erc20Token>,
    pub other_token: Erc20Token,
    pub trade_type: TradeType,
    pub max_hops: u8,
}

/// Answers every request with one candidate per configured value, denominated
/// in the requested other token
#[derive(Default)]
pub struct MockRouter {
    pub candidates: Vec<u64>,
    pub fail: bool,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl MockRouter {
    pub fn with_candidates(candidates: Vec<u64>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteRouter for MockRouter {
    async fn get_quotes(
        &self,
        amount: &CoinAmount<Erc20Token>,
        other_token: &Erc20Token,
        trade_type: TradeType,
        max_hops: u8,
    ) -> QuoterResult<Vec<QuoteResult>> {
        self.requests.lock().unwrap().push(RecordedRequest {
            amount: amount.clone(),
            other_token: other_token.clone(),
            trade_type,
            max_hops,
        });
        if self.fail {
            return Err(report!(Error::RouterError).attach_printable("pool state unavailable"));
        }
        Ok(self
            .candidates
            .iter()
            .map(|value| quote_result(other_token.clone(), *value))
            .collect())
    }
}
