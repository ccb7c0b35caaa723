use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identity of one catalog request.
///
/// Completions carry the token back; only the most recently issued token
/// for an entry is accepted, which makes "last request wins" independent
/// of network completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl Display for FetchToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic token source, owned by the workflow session.
#[derive(Debug, Default)]
pub struct FetchTokenMinter {
    next: u64,
}

impl FetchTokenMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> FetchToken {
        let token = FetchToken(self.next);
        self.next += 1;
        token
    }
}
