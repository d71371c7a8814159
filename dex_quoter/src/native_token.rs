use dex_models::constants::chains::ChainId;
use dex_models::models::{Coin, CoinAmount, Erc20Token, NativeToken};
use error_stack::report;
use serde::{Deserialize, Serialize};

use crate::error::{Error, QuoterResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Native,
    WrappedNative,
    Erc20,
}

/// Maps a chain's native currency to and from its wrapped ERC-20.
///
/// Routers only know ERC-20 pools, so native amounts are reinterpreted as the
/// wrapped token before routing and converted back when presented to the user.
/// The service is stateless and meant to be shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTokenService {
    native_token: NativeToken,
    wrapped_token: Erc20Token,
}

impl NativeTokenService {
    pub fn new(native_token: NativeToken, wrapped_token: Erc20Token) -> QuoterResult<Self> {
        if native_token.chain_id != wrapped_token.chain_id {
            return Err(report!(Error::ConfigError(format!(
                "native token is on {} but wrapped token {} is on {}",
                native_token.chain_id, wrapped_token.address, wrapped_token.chain_id
            ))));
        }
        Ok(Self {
            native_token,
            wrapped_token,
        })
    }

    /// Service backed by the static chain table
    pub fn for_chain(chain_id: ChainId) -> Self {
        Self {
            native_token: chain_id.native_token(),
            wrapped_token: chain_id.wrapped_native_token(),
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.native_token.chain_id
    }

    pub fn native_token(&self) -> &NativeToken {
        &self.native_token
    }

    pub fn wrapped_token(&self) -> &Erc20Token {
        &self.wrapped_token
    }

    pub fn wrap_amount(
        &self,
        amount: &CoinAmount<NativeToken>,
    ) -> QuoterResult<CoinAmount<Erc20Token>> {
        if amount.token != self.native_token {
            return Err(report!(Error::TokenMismatch(format!(
                "token {} is not native to {}",
                amount.token,
                self.chain_id()
            ))));
        }
        Ok(CoinAmount::new(self.wrapped_token.clone(), amount.value))
    }

    pub fn unwrap_amount(
        &self,
        amount: &CoinAmount<Erc20Token>,
    ) -> QuoterResult<CoinAmount<NativeToken>> {
        if amount.token != self.wrapped_token {
            return Err(report!(Error::TokenMismatch(format!(
                "token {} is not wrapped",
                amount.token.address
            ))));
        }
        Ok(CoinAmount::new(self.native_token.clone(), amount.value))
    }

    /// Native coins become the wrapped token, ERC-20s pass through unchanged
    pub fn maybe_wrap_token(&self, token: &Coin) -> QuoterResult<Erc20Token> {
        match token {
            Coin::Native(native) => {
                if *native != self.native_token {
                    return Err(report!(Error::TokenMismatch(format!(
                        "token {native} is not native to {}",
                        self.chain_id()
                    ))));
                }
                Ok(self.wrapped_token.clone())
            }
            Coin::Erc20(erc20) => Ok(erc20.clone()),
        }
    }

    pub fn maybe_wrap_amount(
        &self,
        amount: &CoinAmount<Coin>,
    ) -> QuoterResult<CoinAmount<Erc20Token>> {
        let token = self.maybe_wrap_token(&amount.token)?;
        Ok(CoinAmount::new(token, amount.value))
    }

    pub fn is_native_token(&self, token: &Coin) -> bool {
        match token {
            Coin::Native(native) => native.chain_id == self.native_token.chain_id,
            Coin::Erc20(_) => false,
        }
    }

    pub fn is_wrapped_token(&self, token: &Coin) -> bool {
        match token {
            Coin::Native(_) => false,
            Coin::Erc20(erc20) => *erc20 == self.wrapped_token,
        }
    }

    pub fn token_kind(&self, token: &Coin) -> TokenKind {
        if self.is_native_token(token) {
            TokenKind::Native
        } else if self.is_wrapped_token(token) {
            TokenKind::WrappedNative
        } else {
            TokenKind::Erc20
        }
    }
}
