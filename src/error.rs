//! Error type shared by every library operation.

use thiserror::Error;

/// Failures reported by catalog, membership and lending operations.
///
/// None of these are fatal; every failing operation leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// No book with this title is in the catalog
    #[error("Book '{0}' not found.")]
    BookNotFound(String),
    /// No member with this id is registered
    #[error("Member with ID '{0}' not found.")]
    MemberNotFound(String),
    /// The book is already lent out
    #[error("Sorry, '{0}' is already borrowed.")]
    AlreadyBorrowed(String),
    /// The member is not holding the book they tried to return
    #[error("{member} does not have '{title}'")]
    NotHeldByMember {
        /// Name of the member attempting the return
        member: String,
        /// Title of the book being returned
        title: String,
    },
    /// Every book matching the title is lent out, so none can be removed
    #[error("Book '{0}' not found or is currently borrowed.")]
    StillBorrowed(String),
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;
