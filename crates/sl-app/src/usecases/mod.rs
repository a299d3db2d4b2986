//! Use cases grouped by flow.

pub mod pairing;
pub mod recovery;
pub mod session;
pub mod wallet;
