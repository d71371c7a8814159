use std::fmt;
use std::hash::{Hash, Hasher};

use error_stack::{ResultExt, report};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::constants::chains::ChainId;
use crate::error::{Error, ModelsResult};
use crate::models::address::{addresses_equal, normalize_address};
use crate::models::uint::{U256, U256Decimal};

/// A chain's gas currency. Carries no contract address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeToken {
    pub chain_id: ChainId,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl NativeToken {
    pub fn new(chain_id: ChainId, decimals: u8) -> Self {
        Self {
            chain_id,
            decimals,
            symbol: None,
            name: None,
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

// Native currencies are identified by chain alone
impl PartialEq for NativeToken {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id
    }
}

impl Eq for NativeToken {}

impl Hash for NativeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
    }
}

impl fmt::Display for NativeToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{symbol} (native, {})", self.chain_id),
            None => write!(f, "native ({})", self.chain_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Erc20Token {
    pub chain_id: ChainId,
    pub address: String,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl Erc20Token {
    /// Builds a token after validating and lowercasing `address`
    pub fn new(chain_id: ChainId, address: &str, decimals: u8) -> ModelsResult<Self> {
        let address = normalize_address(address)
            .attach_printable_lazy(|| format!("Invalid ERC-20 token on {chain_id}"))?;
        Ok(Self {
            chain_id,
            address,
            decimals,
            symbol: None,
            name: None,
        })
    }

    /// For addresses from the static chain table, which are known to be valid
    pub(crate) fn from_static(chain_id: ChainId, address: &'static str, decimals: u8) -> Self {
        Self {
            chain_id,
            address: address.to_string(),
            decimals,
            symbol: None,
            name: None,
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

impl PartialEq for Erc20Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && addresses_equal(&self.address, &other.address)
    }
}

impl Eq for Erc20Token {}

impl Hash for Erc20Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for Erc20Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coin {
    Native(NativeToken),
    Erc20(Erc20Token),
}

impl Coin {
    pub fn chain_id(&self) -> ChainId {
        match self {
            Coin::Native(token) => token.chain_id,
            Coin::Erc20(token) => token.chain_id,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Coin::Native(token) => token.decimals,
            Coin::Erc20(token) => token.decimals,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Coin::Native(_) => None,
            Coin::Erc20(token) => Some(&token.address),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Coin::Native(_))
    }

    pub fn as_erc20(&self) -> Option<&Erc20Token> {
        match self {
            Coin::Native(_) => None,
            Coin::Erc20(token) => Some(token),
        }
    }

    pub fn as_native(&self) -> Option<&NativeToken> {
        match self {
            Coin::Native(token) => Some(token),
            Coin::Erc20(_) => None,
        }
    }
}

impl From<NativeToken> for Coin {
    fn from(token: NativeToken) -> Self {
        Coin::Native(token)
    }
}

impl From<Erc20Token> for Coin {
    fn from(token: Erc20Token) -> Self {
        Coin::Erc20(token)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Coin::Native(token) => write!(f, "{token}"),
            Coin::Erc20(token) => write!(f, "{token}"),
        }
    }
}

/// An integer quantity of `token`, in the token's smallest unit
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinAmount<T = Coin> {
    pub token: T,
    #[serde_as(as = "U256Decimal")]
    pub value: U256,
}

impl<T> CoinAmount<T> {
    pub fn new(token: T, value: U256) -> Self {
        Self { token, value }
    }

    pub fn zero(token: T) -> Self {
        Self {
            token,
            value: U256::zero(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Same value under a different token identity
    pub fn with_token<U>(self, token: U) -> CoinAmount<U> {
        CoinAmount {
            token,
            value: self.value,
        }
    }
}

impl<T> CoinAmount<T>
where
    T: Clone + PartialEq + fmt::Display,
{
    fn ensure_same_token(&self, other: &Self, op: &str) -> ModelsResult<()> {
        if self.token != other.token {
            return Err(report!(Error::TokenMismatch(format!(
                "cannot {op} {} and {}",
                self.token, other.token
            ))));
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Self) -> ModelsResult<Self> {
        self.ensure_same_token(other, "add")?;
        let value = self.value.checked_add(other.value).ok_or_else(|| {
            report!(Error::ArithmeticOverflow)
                .attach_printable(format!("{} + {} on {}", self.value, other.value, self.token))
        })?;
        Ok(Self::new(self.token.clone(), value))
    }

    pub fn checked_sub(&self, other: &Self) -> ModelsResult<Self> {
        self.ensure_same_token(other, "subtract")?;
        let value = self.value.checked_sub(other.value).ok_or_else(|| {
            report!(Error::ArithmeticUnderflow)
                .attach_printable(format!("{} - {} on {}", self.value, other.value, self.token))
        })?;
        Ok(Self::new(self.token.clone(), value))
    }
}

impl From<CoinAmount<Erc20Token>> for CoinAmount<Coin> {
    fn from(amount: CoinAmount<Erc20Token>) -> Self {
        CoinAmount::new(Coin::Erc20(amount.token), amount.value)
    }
}

impl From<CoinAmount<NativeToken>> for CoinAmount<Coin> {
    fn from(amount: CoinAmount<NativeToken>) -> Self {
        CoinAmount::new(Coin::Native(amount.token), amount.value)
    }
}

impl<T: fmt::Display> fmt::Display for CoinAmount<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.value, self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usdc() -> Erc20Token {
        Erc20Token::new(
            ChainId::ImmutableZkEvm,
            "0x6de8aCC0D406837030CE4dd28e7c08C5a96a30d2",
            6,
        )
        .unwrap()
        .with_symbol("USDC")
    }

    #[test]
    fn test_erc20_equality_ignores_metadata_and_case() {
        let a = usdc();
        let b = Erc20Token::new(
            ChainId::ImmutableZkEvm,
            "0x6de8acc0d406837030ce4dd28e7c08c5a96a30d2",
            6,
        )
        .unwrap();
        assert_eq!(a, b);

        let other_chain = Erc20Token::new(ChainId::Ethereum, &a.address, 6).unwrap();
        assert_ne!(a, other_chain);
    }

    #[test]
    fn test_native_token_has_no_address() {
        let native: Coin = ChainId::ImmutableZkEvm.native_token().into();
        assert!(native.is_native());
        assert_eq!(native.address(), None);

        let erc20: Coin = usdc().into();
        assert!(!erc20.is_native());
        assert_eq!(erc20.address(), Some("0x6de8acc0d406837030ce4dd28e7c08c5a96a30d2"));
    }

    #[test]
    fn test_checked_add_and_sub() {
        let a = CoinAmount::new(usdc(), U256::from(700u64));
        let b = CoinAmount::new(usdc(), U256::from(300u64));
        assert_eq!(a.checked_add(&b).unwrap().value, U256::from(1000u64));
        assert_eq!(a.checked_sub(&b).unwrap().value, U256::from(400u64));
    }

    #[test]
    fn test_checked_sub_underflow() {
        let a = CoinAmount::new(usdc(), U256::from(1u64));
        let b = CoinAmount::new(usdc(), U256::from(2u64));
        let err = a.checked_sub(&b).unwrap_err();
        assert_eq!(*err.current_context(), Error::ArithmeticUnderflow);
    }

    #[test]
    fn test_checked_add_overflow() {
        let a = CoinAmount::new(usdc(), U256::MAX);
        let b = CoinAmount::new(usdc(), U256::one());
        let err = a.checked_add(&b).unwrap_err();
        assert_eq!(*err.current_context(), Error::ArithmeticOverflow);
    }

    #[test]
    fn test_checked_add_token_mismatch() {
        let a = CoinAmount::new(usdc(), U256::one());
        let b = CoinAmount::new(ChainId::ImmutableZkEvm.wrapped_native_token(), U256::one());
        let err = a.checked_add(&b).unwrap_err();
        assert!(matches!(err.current_context(), Error::TokenMismatch(_)));
    }

    #[test]
    fn test_coin_amount_serializes_value_as_string() {
        let amount: CoinAmount = CoinAmount::new(usdc(), U256::from(42u64)).into();
        let json = serde_json::to_value(&amount).unwrap();
        assert_eq!(json["value"], "42");
        assert_eq!(
            json["token"]["erc20"]["address"],
            "0x6de8acc0d406837030ce4dd28e7c08c5a96a30d2"
        );

        let back: CoinAmount = serde_json::from_str(&json.to_string()).unwrap();
        assert_eq!(back, amount);
    }
}
