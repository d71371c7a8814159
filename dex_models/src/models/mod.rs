pub mod address;
pub mod coin;
pub mod fee;
pub mod uint;

pub use self::address::{addresses_equal, normalize_address};
pub use self::coin::{Coin, CoinAmount, Erc20Token, NativeToken};
pub use self::fee::SecondaryFee;
pub use self::uint::{U256, U256Decimal, U512, mul_div, parse_u256};
