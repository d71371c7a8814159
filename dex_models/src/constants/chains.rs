use error_stack::{Report, report};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error::Error;
use crate::models::coin::{Erc20Token, NativeToken};

pub const NATIVE_TOKEN_DECIMALS: u8 = 18;

pub const WRAPPED_NATIVE_TOKEN_ETHEREUM_ADDRESS: &str =
    "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";

pub const WRAPPED_NATIVE_TOKEN_IMMUTABLE_ZKEVM_ADDRESS: &str =
    "0x3a0c2ba54d6cbd3121f01b96dfd20e99d1696c9d";

pub const WRAPPED_NATIVE_TOKEN_IMMUTABLE_ZKEVM_TESTNET_ADDRESS: &str =
    "0x1ccca691501174b4a623ceda58cc8f1a76dc3439";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, EnumIter, Hash)]
#[repr(u32)]
pub enum ChainId {
    Ethereum = 1,
    ImmutableZkEvm = 13371,
    ImmutableZkEvmTestnet = 13473,
}

impl ChainId {
    pub fn supported_chains() -> Vec<ChainId> {
        ChainId::iter().collect()
    }

    pub fn native_token_symbol(self) -> &'static str {
        match self {
            ChainId::Ethereum => "ETH",
            ChainId::ImmutableZkEvm | ChainId::ImmutableZkEvmTestnet => "IMX",
        }
    }

    pub fn native_token_name(self) -> &'static str {
        match self {
            ChainId::Ethereum => "Ether",
            ChainId::ImmutableZkEvm | ChainId::ImmutableZkEvmTestnet => "Immutable X",
        }
    }

    pub fn wrapped_native_token_address(self) -> &'static str {
        match self {
            ChainId::Ethereum => WRAPPED_NATIVE_TOKEN_ETHEREUM_ADDRESS,
            ChainId::ImmutableZkEvm => WRAPPED_NATIVE_TOKEN_IMMUTABLE_ZKEVM_ADDRESS,
            ChainId::ImmutableZkEvmTestnet => WRAPPED_NATIVE_TOKEN_IMMUTABLE_ZKEVM_TESTNET_ADDRESS,
        }
    }

    /// The chain's gas currency as configured in the static table
    pub fn native_token(self) -> NativeToken {
        NativeToken::new(self, NATIVE_TOKEN_DECIMALS)
            .with_symbol(self.native_token_symbol())
            .with_name(self.native_token_name())
    }

    /// The ERC-20 that wraps the chain's gas currency 1:1
    pub fn wrapped_native_token(self) -> Erc20Token {
        let symbol = format!("W{}", self.native_token_symbol());
        let name = format!("Wrapped {}", self.native_token_name());
        Erc20Token::from_static(self, self.wrapped_native_token_address(), NATIVE_TOKEN_DECIMALS)
            .with_symbol(&symbol)
            .with_name(&name)
    }
}

impl TryFrom<u32> for ChainId {
    type Error = Report<Error>;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        serde_json::from_str(&value.to_string()).map_err(|e| {
            Report::new(Error::ParseError)
                .attach_printable(format!("Failed to parse chain ID: {e}"))
        })
    }
}

impl TryFrom<&str> for ChainId {
    type Error = Report<Error>;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Ethereum" | "1" => Ok(Self::Ethereum),
            "ImmutableZkEvm" | "Immutable zkEVM" | "13371" => Ok(Self::ImmutableZkEvm),
            "ImmutableZkEvmTestnet" | "Immutable zkEVM Testnet" | "13473" => {
                Ok(Self::ImmutableZkEvmTestnet)
            }
            _ => Err(report!(Error::ChainError(format!(
                "Invalid chain name: {value}"
            )))),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ethereum => write!(f, "Ethereum"),
            Self::ImmutableZkEvm => write!(f, "Immutable zkEVM"),
            Self::ImmutableZkEvmTestnet => write!(f, "Immutable zkEVM Testnet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_display() {
        assert_eq!(ChainId::Ethereum.to_string(), "Ethereum");
        assert_eq!(ChainId::ImmutableZkEvm.to_string(), "Immutable zkEVM");
        assert_eq!(
            ChainId::ImmutableZkEvmTestnet.to_string(),
            "Immutable zkEVM Testnet"
        );
    }

    #[test]
    fn test_supported_chains() {
        let chains = ChainId::supported_chains();
        assert_eq!(chains.len(), 3);
        assert!(chains.contains(&ChainId::Ethereum));
        assert!(chains.contains(&ChainId::ImmutableZkEvm));
        assert!(chains.contains(&ChainId::ImmutableZkEvmTestnet));
    }

    #[test]
    fn test_from_u32() {
        assert_eq!(ChainId::try_from(1).expect("Should work"), ChainId::Ethereum);
        assert_eq!(
            ChainId::try_from(13371).expect("Should work"),
            ChainId::ImmutableZkEvm
        );
        assert_eq!(
            ChainId::try_from(13473).expect("Should work"),
            ChainId::ImmutableZkEvmTestnet
        );
        assert!(ChainId::try_from(9999).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(ChainId::try_from("13371").unwrap(), ChainId::ImmutableZkEvm);
        assert_eq!(ChainId::try_from("Ethereum").unwrap(), ChainId::Ethereum);
        assert!(ChainId::try_from("Solana").is_err());
    }

    #[test]
    fn test_wrapped_native_token_belongs_to_chain() {
        for chain in ChainId::supported_chains() {
            let wrapped = chain.wrapped_native_token();
            assert_eq!(wrapped.chain_id, chain);
            assert_eq!(wrapped.address, chain.wrapped_native_token_address());
            assert_eq!(wrapped.decimals, chain.native_token().decimals);
        }
        assert_eq!(
            ChainId::ImmutableZkEvm.wrapped_native_token().symbol.as_deref(),
            Some("WIMX")
        );
    }
}
