//! Single entry point tying pairing and recovery together.

mod outcome;
mod resolver;

pub use outcome::SessionOutcome;
pub use resolver::SessionResolver;
