use crate::error::{Error, ModelsResult};
use error_stack::report;
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};
use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

construct_uint! {
    pub struct U512(8);
}

impl From<U256> for U512 {
    fn from(value: U256) -> Self {
        let mut words = [0u64; 8];
        words[..4].copy_from_slice(&value.0);
        U512(words)
    }
}

impl TryFrom<U512> for U256 {
    type Error = error_stack::Report<Error>;

    fn try_from(value: U512) -> Result<Self, Self::Error> {
        if value.0[4..].iter().any(|word| *word != 0) {
            return Err(report!(Error::ArithmeticOverflow)
                .attach_printable(format!("{value} does not fit in 256 bits")));
        }
        let mut words = [0u64; 4];
        words.copy_from_slice(&value.0[..4]);
        Ok(U256(words))
    }
}

/// Computes `floor(value * numerator / denominator)`, widening to 512 bits so the
/// product can never overflow
pub fn mul_div(value: U256, numerator: U256, denominator: U256) -> ModelsResult<U256> {
    if denominator.is_zero() {
        return Err(report!(Error::DivisionByZero).attach_printable("Dividing by zero"));
    }
    let result = U512::from(value) * U512::from(numerator) / U512::from(denominator);
    U256::try_from(result).map_err(|e| e.attach_printable("Result too large to fit in U256"))
}

/// Parses a base-10 amount string
pub fn parse_u256(value: &str) -> ModelsResult<U256> {
    U256::from_dec_str(value.trim()).map_err(|e| {
        report!(Error::ParseError).attach_printable(format!("Invalid amount '{value}': {e:?}"))
    })
}

/// `serde_with` adapter writing amounts as base-10 strings, the way ERC-20 values
/// are exchanged with JSON consumers
pub struct U256Decimal;

impl SerializeAs<U256> for U256Decimal {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&source.to_string())
    }
}

impl<'de> DeserializeAs<'de, U256> for U256Decimal {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(&raw)
            .map_err(|e| serde::de::Error::custom(format!("invalid U256 '{raw}': {e:?}")))
    }
}
