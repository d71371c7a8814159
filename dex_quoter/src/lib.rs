pub mod config;
pub mod error;
pub mod exchange;
pub mod fees;
pub mod native_token;
pub mod quote;
pub mod router;
pub mod slippage;
#[cfg(test)]
pub mod tests;
pub mod trade_request;
pub mod validation;
