use dex_models::models::{U256, mul_div};
use error_stack::{ResultExt, report};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{Error, ModelsResultExt, QuoterResult};
use crate::trade_request::TradeType;

/// Exact rational number over `U256`. Never touches floating point, so the same
/// inputs always produce the same bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    numerator: U256,
    denominator: U256,
}

impl Fraction {
    pub fn new(numerator: U256, denominator: U256) -> QuoterResult<Self> {
        if denominator.is_zero() {
            return Err(report!(Error::ArithmeticOverflow)
                .attach_printable("Fraction denominator must not be zero"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn one() -> Self {
        Self {
            numerator: U256::one(),
            denominator: U256::one(),
        }
    }

    pub fn numerator(&self) -> U256 {
        self.numerator
    }

    pub fn denominator(&self) -> U256 {
        self.denominator
    }

    pub fn invert(self) -> QuoterResult<Self> {
        Self::new(self.denominator, self.numerator)
    }

    /// `self + other` without reducing
    pub fn add(self, other: Fraction) -> QuoterResult<Self> {
        let overflow = || report!(Error::ArithmeticOverflow).attach_printable("Adding fractions");
        let left = self
            .numerator
            .checked_mul(other.denominator)
            .ok_or_else(overflow)?;
        let right = other
            .numerator
            .checked_mul(self.denominator)
            .ok_or_else(overflow)?;
        let numerator = left.checked_add(right).ok_or_else(overflow)?;
        let denominator = self
            .denominator
            .checked_mul(other.denominator)
            .ok_or_else(overflow)?;
        Self::new(numerator, denominator)
    }

    /// `floor(value * self)`
    pub fn multiply(&self, value: U256) -> QuoterResult<U256> {
        mul_div(value, self.numerator, self.denominator).into_quoter()
    }
}

/// `slippage_percent / 100` as an exact fraction
pub fn slippage_fraction(slippage_percent: Decimal) -> QuoterResult<Fraction> {
    if slippage_percent.is_sign_negative() && !slippage_percent.is_zero() {
        return Err(report!(Error::InvalidSlippage(format!(
            "{slippage_percent} is negative"
        ))));
    }
    let normalized = slippage_percent.normalize();
    let mantissa = u128::try_from(normalized.mantissa()).map_err(|_| {
        report!(Error::InvalidSlippage(format!("{slippage_percent} is negative")))
    })?;
    let scale = normalized.scale() as usize;
    let denominator = U256::exp10(scale)
        .checked_mul(U256::from(100u64))
        .ok_or_else(|| report!(Error::ArithmeticOverflow))?;
    Fraction::new(U256::from(mantissa), denominator)
}

/// Multiplier turning a quoted amount into its worst acceptable value.
///
/// Exact output raises the maximum input: `1 + s/100`.
/// Exact input lowers the minimum output: `1 / (1 + s/100)`.
pub fn slippage_multiplier(
    trade_type: TradeType,
    slippage_percent: Decimal,
) -> QuoterResult<Fraction> {
    let tolerance = Fraction::one()
        .add(slippage_fraction(slippage_percent)?)
        .attach_printable_lazy(|| format!("Slippage {slippage_percent}%"))?;
    match trade_type {
        TradeType::ExactInput => tolerance.invert(),
        TradeType::ExactOutput => Ok(tolerance),
    }
}

/// Converts a float percent (e.g. `0.5`) into a `Decimal` without carrying
/// binary representation noise into the fraction
pub fn slippage_from_f64(slippage_percent: f64) -> QuoterResult<Decimal> {
    if !slippage_percent.is_finite() {
        return Err(report!(Error::InvalidSlippage(
            "slippage percentage is not finite".to_string()
        )));
    }
    if slippage_percent < 0.0 {
        return Err(report!(Error::InvalidSlippage(format!(
            "{slippage_percent} is negative"
        ))));
    }
    // f64 Display is the shortest string that round-trips, so 0.1 stays 0.1
    Decimal::from_str(&slippage_percent.to_string())
        .map(|d| d.normalize())
        .map_err(|e| {
            report!(Error::InvalidSlippage(format!(
                "{slippage_percent} cannot be represented: {e}"
            )))
        })
}
