//! Identifier types.

mod attempt;
mod id_macro;
mod pairing_id;

pub use attempt::AttemptToken;
pub use pairing_id::PairingId;
