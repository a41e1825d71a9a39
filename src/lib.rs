//! In-memory library catalog for tracking books, members and lending.
//!
//! A [`Library`] owns every [`Book`] and [`Member`] and is the only place
//! where a member and a book meet. Members hold [`BookId`] handles rather
//! than the books themselves, so the catalog stays the single owner.

pub mod book;
pub mod error;
pub mod events;
pub mod library;
pub mod member;
pub mod observers;
pub mod report;
pub mod shell;
pub mod timestamp;

#[cfg(test)]
mod test_support;

pub use book::{Availability, Book, BookId};
pub use error::{LibraryError, Result};
pub use events::LendingEvent;
pub use library::{LendingRecord, Library, MemberSummary, SearchQuery};
pub use member::Member;
pub use shell::{Shell, ShellOptions};
