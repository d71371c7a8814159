use std::str::FromStr;

use dex_models::constants::chains::ChainId;
use dex_models::models::{Erc20Token, NativeToken, SecondaryFee};
use error_stack::{ResultExt, report};
use rust_decimal::Decimal;

use crate::error::{Error, QuoterResult};
use crate::native_token::NativeTokenService;
use crate::validation::{
    DEFAULT_MAX_HOPS, default_slippage, validate_max_hops, validate_secondary_fees,
    validate_slippage,
};

pub const ENV_CHAIN_ID: &str = "DEX_CHAIN_ID";
pub const ENV_DEFAULT_SLIPPAGE: &str = "DEX_DEFAULT_SLIPPAGE";
pub const ENV_DEFAULT_MAX_HOPS: &str = "DEX_DEFAULT_MAX_HOPS";
pub const ENV_SECONDARY_FEES: &str = "DEX_SECONDARY_FEES";

/// Per-deployment settings shared by every quote
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeConfig {
    pub chain_id: ChainId,
    pub secondary_fees: Vec<SecondaryFee>,
    pub default_slippage: Decimal,
    pub default_max_hops: u8,
    pub native_token: Option<NativeToken>,
    pub wrapped_native_token: Option<Erc20Token>,
}

impl ExchangeConfig {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            secondary_fees: vec![],
            default_slippage: default_slippage(),
            default_max_hops: DEFAULT_MAX_HOPS,
            native_token: None,
            wrapped_native_token: None,
        }
    }

    pub fn with_secondary_fees(mut self, secondary_fees: Vec<SecondaryFee>) -> Self {
        self.secondary_fees = secondary_fees;
        self
    }

    pub fn with_default_slippage(mut self, slippage_percent: Decimal) -> Self {
        self.default_slippage = slippage_percent;
        self
    }

    pub fn with_default_max_hops(mut self, max_hops: u8) -> Self {
        self.default_max_hops = max_hops;
        self
    }

    pub fn with_native_token(mut self, native_token: NativeToken) -> Self {
        self.native_token = Some(native_token);
        self
    }

    pub fn with_wrapped_native_token(mut self, wrapped_native_token: Erc20Token) -> Self {
        self.wrapped_native_token = Some(wrapped_native_token);
        self
    }

    pub fn validate(&self) -> QuoterResult<()> {
        validate_slippage(self.default_slippage)
            .attach_printable("Default slippage is invalid")?;
        validate_max_hops(self.default_max_hops)
            .attach_printable("Default max hops is invalid")?;
        validate_secondary_fees(&self.secondary_fees)?;
        self.native_token_service().map(|_| ())
    }

    /// Chain table entries unless overridden
    pub fn native_token_service(&self) -> QuoterResult<NativeTokenService> {
        let native_token = self
            .native_token
            .clone()
            .unwrap_or_else(|| self.chain_id.native_token());
        let wrapped_token = self
            .wrapped_native_token
            .clone()
            .unwrap_or_else(|| self.chain_id.wrapped_native_token());
        if native_token.chain_id != self.chain_id {
            return Err(report!(Error::ConfigError(format!(
                "native token override is on {} but the exchange is on {}",
                native_token.chain_id, self.chain_id
            ))));
        }
        NativeTokenService::new(native_token, wrapped_token)
    }

    /// Reads `DEX_*` variables, loading `.env` first when present
    pub fn from_env() -> QuoterResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Only `DEX_CHAIN_ID` is required; everything else keeps its default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> QuoterResult<Self> {
        let chain_id = lookup(ENV_CHAIN_ID)
            .ok_or_else(|| report!(Error::ConfigError(format!("{ENV_CHAIN_ID} is not set"))))?;
        let chain_id = ChainId::try_from(chain_id.trim())
            .change_context(Error::ConfigError(format!("{ENV_CHAIN_ID} is invalid")))?;

        let mut config = Self::new(chain_id);

        if let Some(raw) = lookup(ENV_DEFAULT_SLIPPAGE) {
            config.default_slippage = Decimal::from_str(raw.trim())
                .map_err(|e| {
                    report!(Error::ConfigError(format!(
                        "{ENV_DEFAULT_SLIPPAGE} is not a decimal: {e}"
                    )))
                })?
                .normalize();
        }

        if let Some(raw) = lookup(ENV_DEFAULT_MAX_HOPS) {
            config.default_max_hops = raw.trim().parse::<u8>().map_err(|e| {
                report!(Error::ConfigError(format!(
                    "{ENV_DEFAULT_MAX_HOPS} is not a hop count: {e}"
                )))
            })?;
        }

        if let Some(raw) = lookup(ENV_SECONDARY_FEES) {
            config.secondary_fees = parse_secondary_fees(&raw)?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// `recipient:bps,recipient:bps`. Blank input means no fees.
pub fn parse_secondary_fees(raw: &str) -> QuoterResult<Vec<SecondaryFee>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> QuoterResult<SecondaryFee> {
            let (recipient, basis_points) = entry.split_once(':').ok_or_else(|| {
                report!(Error::ConfigError(format!(
                    "secondary fee `{entry}` is not recipient:basis_points"
                )))
            })?;
            let basis_points = basis_points.trim().parse::<u16>().map_err(|e| {
                report!(Error::ConfigError(format!(
                    "secondary fee `{entry}` has invalid basis points: {e}"
                )))
            })?;
            SecondaryFee::new(recipient.trim(), basis_points).change_context(
                Error::InvalidSecondaryFee(format!("secondary fee `{entry}` is invalid")),
            )
        })
        .collect()
}
