use std::sync::Arc;

use dex_models::models::{Coin, CoinAmount};
use error_stack::ResultExt;
use rust_decimal::Decimal;

use crate::config::ExchangeConfig;
use crate::error::{Error, QuoterResult};
use crate::native_token::NativeTokenService;
use crate::quote::QuoteSummary;
use crate::router::QuoteRouter;
use crate::trade_request::TradeRequest;

/// Entry point for callers: builds the trade request, asks the router and
/// finalizes the best candidate
pub struct Exchange {
    config: ExchangeConfig,
    native_token_service: Arc<NativeTokenService>,
    router: Arc<dyn QuoteRouter>,
}

impl Exchange {
    pub fn new(config: ExchangeConfig, router: Arc<dyn QuoteRouter>) -> QuoterResult<Self> {
        config.validate()?;
        let native_token_service = Arc::new(config.native_token_service()?);
        Ok(Self {
            config,
            native_token_service,
            router,
        })
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub fn native_token_service(&self) -> Arc<NativeTokenService> {
        self.native_token_service.clone()
    }

    pub fn exact_input_request(
        &self,
        amount_in: CoinAmount,
        token_out: Coin,
        slippage_percent: Option<Decimal>,
        max_hops: Option<u8>,
    ) -> QuoterResult<TradeRequest> {
        TradeRequest::exact_input(
            amount_in,
            token_out,
            self.config.secondary_fees.clone(),
            slippage_percent.unwrap_or(self.config.default_slippage),
            max_hops.unwrap_or(self.config.default_max_hops),
            self.native_token_service.clone(),
        )
    }

    pub fn exact_output_request(
        &self,
        token_in: Coin,
        amount_out: CoinAmount,
        slippage_percent: Option<Decimal>,
        max_hops: Option<u8>,
    ) -> QuoterResult<TradeRequest> {
        TradeRequest::exact_output(
            token_in,
            amount_out,
            self.config.secondary_fees.clone(),
            slippage_percent.unwrap_or(self.config.default_slippage),
            max_hops.unwrap_or(self.config.default_max_hops),
            self.native_token_service.clone(),
        )
    }

    pub async fn quote_from_amount_in(
        &self,
        amount_in: CoinAmount,
        token_out: Coin,
        slippage_percent: Option<Decimal>,
        max_hops: Option<u8>,
    ) -> QuoterResult<QuoteSummary> {
        let request = self.exact_input_request(amount_in, token_out, slippage_percent, max_hops)?;
        self.quote(&request).await
    }

    pub async fn quote_from_amount_out(
        &self,
        token_in: Coin,
        amount_out: CoinAmount,
        slippage_percent: Option<Decimal>,
        max_hops: Option<u8>,
    ) -> QuoterResult<QuoteSummary> {
        let request = self.exact_output_request(token_in, amount_out, slippage_percent, max_hops)?;
        self.quote(&request).await
    }

    /// Routes an already built request
    pub async fn quote(&self, request: &TradeRequest) -> QuoterResult<QuoteSummary> {
        tracing::debug!(
            "Requesting {:?} quotes for {} against {} with max {} hops",
            request.trade_type(),
            request.our_quote_req_amount(),
            request.our_quote_req_other_token(),
            request.max_hops()
        );

        let candidates = self
            .router
            .get_quotes(
                request.our_quote_req_amount(),
                request.our_quote_req_other_token(),
                request.trade_type(),
                request.max_hops(),
            )
            .await
            .change_context(Error::RouterError)
            .attach_printable_lazy(|| {
                format!(
                    "Router failed for {} -> {}",
                    request.token_in(),
                    request.token_out()
                )
            })?;

        tracing::debug!("Router returned {} candidates", candidates.len());

        let quote = request.get_best_quote(candidates)?;

        tracing::info!(
            "Selected {:?} quote: quoted {} with worst case {}, total fees {}",
            quote.trade_type(),
            quote.quoted_amount(),
            quote.amount_with_max_slippage(),
            quote.total_fees()
        );

        Ok(quote.summary())
    }
}
