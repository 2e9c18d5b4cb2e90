//! Epoch-style payment processor: HMAC-SHA1 signed GET requests answered
//! with a proprietary XML body.

mod digest;
mod epoch;
mod response;

pub use digest::{SignedParams, hmac_sha1_hex};
pub use epoch::EpochClient;
pub use response::{ResultCode, parse_result_code};
