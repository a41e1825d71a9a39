//! Events that drive lending transitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Events that move a book between `Available` and `Borrowed`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LendingEvent {
    /// A member checks the book out
    Borrow(String),
    /// A member brings the book back
    Return(String),
}

impl LendingEvent {
    /// Id of the member who triggered the event
    #[must_use]
    pub fn member_id(&self) -> &str {
        match self {
            Self::Borrow(id) | Self::Return(id) => id,
        }
    }
}

impl fmt::Display for LendingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrow(id) => write!(f, "Borrow({id})"),
            Self::Return(id) => write!(f, "Return({id})"),
        }
    }
}
