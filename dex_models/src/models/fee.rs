use error_stack::{ResultExt, report};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ModelsResult};
use crate::models::address::normalize_address;

/// 10000 basis points = 100%
pub const BASIS_POINT_PRECISION: u16 = 10_000;

/// Platform or referrer fee skimmed from a trade
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryFee {
    pub recipient: String,
    pub basis_points: u16,
}

impl SecondaryFee {
    pub fn new(recipient: &str, basis_points: u16) -> ModelsResult<Self> {
        let recipient = normalize_address(recipient)
            .attach_printable("Invalid secondary fee recipient")?;
        if basis_points > BASIS_POINT_PRECISION {
            return Err(report!(Error::InvalidFee(format!(
                "{basis_points} basis points exceeds {BASIS_POINT_PRECISION}"
            ))));
        }
        Ok(Self {
            recipient,
            basis_points,
        })
    }
}
