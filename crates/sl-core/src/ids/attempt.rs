use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Generation token for one `start()` invocation of the pairing flow.
///
/// Tokens increase monotonically. Every asynchronous continuation captures
/// the token of the attempt it belongs to and may only mutate state while
/// that token is still the newest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttemptToken(u64);

impl AttemptToken {
    /// Token held before any attempt was started.
    pub const INITIAL: AttemptToken = AttemptToken(0);

    pub fn value(self) -> u64 {
        self.0
    }

    /// Token of the attempt superseding this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Default for AttemptToken {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Display for AttemptToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_token_supersedes_previous() {
        let first = AttemptToken::INITIAL.next();
        let second = first.next();
        assert!(second > first);
        assert_ne!(first, second);
        assert_eq!(second.value(), 2);
    }
}
