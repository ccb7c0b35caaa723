use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Arena key for one product entry.
///
/// Minted from a session-local monotonic counter and never reused, so an
/// in-flight catalog fetch can never be misattributed to a later entry
/// that happens to occupy the same display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
