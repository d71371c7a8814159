use crate::error::{Error, ModelsResult};
use error_stack::report;

const EVM_ADDRESS_HEX_LEN: usize = 40;

/// Validates an EVM address and returns it lowercased
pub fn normalize_address(address: &str) -> ModelsResult<String> {
    let trimmed = address.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| {
            report!(Error::InvalidAddress(address.to_string()))
                .attach_printable("Address must start with 0x")
        })?;

    if hex.len() != EVM_ADDRESS_HEX_LEN {
        return Err(report!(Error::InvalidAddress(address.to_string())).attach_printable(
            format!("Expected {EVM_ADDRESS_HEX_LEN} hex characters, got {}", hex.len()),
        ));
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(report!(Error::InvalidAddress(address.to_string()))
            .attach_printable("Address contains non-hex characters"));
    }

    Ok(format!("0x{}", hex.to_ascii_lowercase()))
}

pub fn addresses_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
