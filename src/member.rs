//! Library members and their borrow/return transitions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    book::{Availability, Book, BookId},
    error::{LibraryError, Result},
};

/// A registered borrower
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Member {
    /// Display name
    pub name: String,
    /// Identifier, unique by convention only
    pub member_id: String,
    /// Books currently held, in borrow order
    borrowed_books: Vec<BookId>,
}

impl Member {
    /// Create a member holding no books
    #[must_use]
    pub fn new(name: impl Into<String>, member_id: impl Into<String>) -> Self {
        Self { name: name.into(), member_id: member_id.into(), borrowed_books: Vec::new() }
    }

    /// Check a book out to this member
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::AlreadyBorrowed` if the book is not available.
    /// Neither the member nor the book is changed in that case.
    pub fn borrow(&mut self, book: &mut Book) -> Result<()> {
        if !book.is_available() {
            return Err(LibraryError::AlreadyBorrowed(book.title.clone()));
        }

        self.borrowed_books.push(book.id);
        book.availability = Availability::Borrowed;
        debug!(member = %self.member_id, book = %book.id, "book checked out");
        Ok(())
    }

    /// Take a book back from this member
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotHeldByMember` if this member does not hold
    /// the book. Neither the member nor the book is changed in that case.
    pub fn return_book(&mut self, book: &mut Book) -> Result<()> {
        let Some(pos) = self.borrowed_books.iter().position(|id| *id == book.id) else {
            return Err(LibraryError::NotHeldByMember {
                member: self.name.clone(),
                title: book.title.clone(),
            });
        };

        self.borrowed_books.remove(pos);
        book.availability = Availability::Available;
        debug!(member = %self.member_id, book = %book.id, "book checked in");
        Ok(())
    }

    /// Handles of the books this member holds, oldest first
    #[must_use]
    pub fn borrowed_books(&self) -> &[BookId] {
        &self.borrowed_books
    }

    /// Whether this member holds the given book
    #[must_use]
    pub fn holds(&self, book: BookId) -> bool {
        self.borrowed_books.contains(&book)
    }

    /// Number of books currently held
    #[must_use]
    pub fn borrowed_count(&self) -> usize {
        self.borrowed_books.len()
    }
}
