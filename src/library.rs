//! The catalog, the membership roll and the lending ledger.

use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    book::{Availability, Book, BookId},
    error::{LibraryError, Result},
    events::LendingEvent,
    member::Member,
    observers::LendingObserver,
    timestamp::TimeStamp,
};

/// Default number of ledger entries kept before the oldest are dropped
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// One successful borrow or return
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LendingRecord {
    /// Book that changed state
    pub book: BookId,
    /// Title of the book at the time of the transition
    pub title: String,
    /// Member who triggered the transition
    pub member_id: String,
    /// Name of that member
    pub member_name: String,
    /// State before the transition
    pub from: Availability,
    /// State after the transition
    pub to: Availability,
    /// The event that triggered the transition
    pub event: LendingEvent,
    /// When the transition occurred
    pub timestamp: TimeStamp,
}

/// Criteria for [`Library::search_book`].
///
/// A book matches when any supplied criterion is a case-insensitive substring
/// of the corresponding field. Empty criteria count as not supplied, so an
/// empty query matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring to look for in the title
    pub title: Option<String>,
    /// Substring to look for in the author
    pub author: Option<String>,
    /// Substring to look for in the genre
    pub genre: Option<String>,
}

impl SearchQuery {
    /// Query on title alone
    #[must_use]
    pub fn by_title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }

    /// Query on author alone
    #[must_use]
    pub fn by_author(author: impl Into<String>) -> Self {
        Self { author: Some(author.into()), ..Self::default() }
    }

    /// Query on genre alone
    #[must_use]
    pub fn by_genre(genre: impl Into<String>) -> Self {
        Self { genre: Some(genre.into()), ..Self::default() }
    }

    /// Add a title criterion
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add an author criterion
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Add a genre criterion
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// OR across the three criteria
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        clause(self.title.as_deref(), &book.title)
            || clause(self.author.as_deref(), &book.author)
            || clause(self.genre.as_deref(), &book.genre)
    }
}

/// Case-insensitive substring test; a missing or empty criterion never matches
fn clause(criterion: Option<&str>, field: &str) -> bool {
    criterion
        .filter(|needle| !needle.is_empty())
        .is_some_and(|needle| field.to_lowercase().contains(&needle.to_lowercase()))
}

/// Printable view of a member with the titles they hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary<'a> {
    /// Member name
    pub name: &'a str,
    /// Member id
    pub member_id: &'a str,
    /// Titles in borrow order
    pub titles: Vec<&'a str>,
}

impl fmt::Display for MemberSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let borrowed =
            if self.titles.is_empty() { "None".to_string() } else { self.titles.join(", ") };
        write!(
            f,
            "Member: {}, ID: {}, Borrowed Books: {borrowed}",
            self.name, self.member_id
        )
    }
}

/// Owner of the catalog and the membership roll
pub struct Library {
    /// Catalog in insertion order
    books: Vec<Book>,
    /// Members in insertion order
    members: Vec<Member>,
    /// Next handle to hand out
    next_book_id: u64,
    /// Record of lending transitions, oldest first
    history: VecDeque<LendingRecord>,
    /// Maximum number of history entries to keep
    max_history_size: usize,
    /// Registered lending observers
    observers: Vec<Box<dyn LendingObserver>>,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("books", &self.books)
            .field("members", &self.members)
            .field("next_book_id", &self.next_book_id)
            .field("history", &self.history)
            .field("max_history_size", &self.max_history_size)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Create an empty library
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_size(DEFAULT_HISTORY_SIZE)
    }

    /// Create an empty library keeping at most `max_history_size` ledger entries
    #[must_use]
    pub fn with_history_size(max_history_size: usize) -> Self {
        Self {
            books: Vec::new(),
            members: Vec::new(),
            next_book_id: 1,
            history: VecDeque::new(),
            max_history_size,
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified of lending transitions
    pub fn register_observer(&mut self, observer: Box<dyn LendingObserver>) {
        self.observers.push(observer);
    }

    /// Add a new available book to the end of the catalog.
    ///
    /// Titles are not deduplicated.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        published_year: impl Into<String>,
    ) -> BookId {
        let id = BookId::new(self.next_book_id);
        self.next_book_id = self.next_book_id.saturating_add(1);

        let book = Book::new(id, title, author, genre, published_year);
        info!(book = %id, title = %book.title, "book added to the catalog");
        self.books.push(book);
        id
    }

    /// Remove the first available book whose title matches
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::StillBorrowed` if books with this title exist but
    /// all of them are lent out, and `LibraryError::BookNotFound` if none exist.
    pub fn remove_book(&mut self, title: &str) -> Result<Book> {
        let removable = self.books.iter().position(|b| b.title_matches(title) && b.is_available());
        if let Some(pos) = removable {
            let book = self.books.remove(pos);
            info!(book = %book.id, title = %book.title, "book removed from the catalog");
            return Ok(book);
        }

        if self.books.iter().any(|b| b.title_matches(title)) {
            debug!(%title, "refusing to remove a borrowed book");
            Err(LibraryError::StillBorrowed(title.to_string()))
        } else {
            Err(LibraryError::BookNotFound(title.to_string()))
        }
    }

    /// Every book matching `query`, in catalog order
    #[must_use]
    pub fn search_book(&self, query: &SearchQuery) -> Vec<&Book> {
        let results: Vec<&Book> = self.books.iter().filter(|b| query.matches(b)).collect();
        debug!(?query, hits = results.len(), "catalog search");
        results
    }

    /// All books in insertion order
    pub fn list_books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Register a member. Ids are not checked for uniqueness.
    pub fn add_member(&mut self, name: impl Into<String>, member_id: impl Into<String>) {
        let member = Member::new(name, member_id);
        info!(member = %member.member_id, name = %member.name, "member added");
        self.members.push(member);
    }

    /// Remove the first member with this id, whatever they are holding.
    ///
    /// Books held by the removed member stay `Borrowed` with nobody able to
    /// return them; see [`Library::orphaned_books`].
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::MemberNotFound` if no member has this id.
    pub fn remove_member(&mut self, member_id: &str) -> Result<Member> {
        let pos = self.member_index(member_id)?;
        let member = self.members.remove(pos);

        if member.borrowed_count() > 0 {
            warn!(
                member = %member.member_id,
                held = member.borrowed_count(),
                "member removed while holding books; those books stay borrowed"
            );
        } else {
            info!(member = %member.member_id, "member removed");
        }
        Ok(member)
    }

    /// Lend a book to a member
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::MemberNotFound` or `LibraryError::BookNotFound`
    /// when a lookup fails (member first), and `LibraryError::AlreadyBorrowed`
    /// when the book is lent out.
    pub fn borrow_book(&mut self, member_id: &str, title: &str) -> Result<LendingRecord> {
        let member_idx = self.member_index(member_id)?;
        let book_idx = self.book_index(title)?;

        let (member_name, snapshot) = {
            let member = self
                .members
                .get_mut(member_idx)
                .ok_or_else(|| LibraryError::MemberNotFound(member_id.to_string()))?;
            let book = self
                .books
                .get_mut(book_idx)
                .ok_or_else(|| LibraryError::BookNotFound(title.to_string()))?;

            member.borrow(book)?;
            (member.name.clone(), book.clone())
        };

        Ok(self.record_transition(
            &snapshot,
            member_name,
            Availability::Available,
            LendingEvent::Borrow(member_id.to_string()),
        ))
    }

    /// Take a book back from a member
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::MemberNotFound` or `LibraryError::BookNotFound`
    /// when a lookup fails (member first), and `LibraryError::NotHeldByMember`
    /// when the member does not hold the book.
    pub fn return_book(&mut self, member_id: &str, title: &str) -> Result<LendingRecord> {
        let member_idx = self.member_index(member_id)?;
        let book_idx = self.book_index(title)?;

        let (member_name, snapshot) = {
            let member = self
                .members
                .get_mut(member_idx)
                .ok_or_else(|| LibraryError::MemberNotFound(member_id.to_string()))?;
            let book = self
                .books
                .get_mut(book_idx)
                .ok_or_else(|| LibraryError::BookNotFound(title.to_string()))?;

            member.return_book(book)?;
            (member.name.clone(), book.clone())
        };

        Ok(self.record_transition(
            &snapshot,
            member_name,
            Availability::Borrowed,
            LendingEvent::Return(member_id.to_string()),
        ))
    }

    /// Summary of a member and the titles they currently hold
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::MemberNotFound` if no member has this id.
    pub fn display_member_info(&self, member_id: &str) -> Result<MemberSummary<'_>> {
        let member = self.get_member(member_id)?;
        let titles = member
            .borrowed_books()
            .iter()
            .filter_map(|id| self.book_by_id(*id))
            .map(|b| b.title.as_str())
            .collect();

        Ok(MemberSummary { name: &member.name, member_id: &member.member_id, titles })
    }

    /// First book whose title matches case-insensitively
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BookNotFound` if no title matches.
    pub fn get_book(&self, title: &str) -> Result<&Book> {
        let idx = self.book_index(title)?;
        self.books.get(idx).ok_or_else(|| LibraryError::BookNotFound(title.to_string()))
    }

    /// First member with exactly this id
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::MemberNotFound` if no member has this id.
    pub fn get_member(&self, member_id: &str) -> Result<&Member> {
        let idx = self.member_index(member_id)?;
        self.members.get(idx).ok_or_else(|| LibraryError::MemberNotFound(member_id.to_string()))
    }

    /// Look up a book by its handle
    #[must_use]
    pub fn book_by_id(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// All members in insertion order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Number of books in the catalog
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of registered members
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Borrowed books that no current member holds
    pub fn orphaned_books(&self) -> impl Iterator<Item = &Book> {
        self.books
            .iter()
            .filter(|b| !b.is_available() && !self.members.iter().any(|m| m.holds(b.id)))
    }

    /// Lending ledger, oldest first
    pub fn history(&self) -> impl Iterator<Item = &LendingRecord> {
        self.history.iter()
    }

    /// Ledger entries triggered by one member id, oldest first
    pub fn member_history<'a>(
        &'a self,
        member_id: &'a str,
    ) -> impl Iterator<Item = &'a LendingRecord> {
        self.history.iter().filter(move |r| r.member_id == member_id)
    }

    /// Position of the first book whose title matches
    fn book_index(&self, title: &str) -> Result<usize> {
        let found = self.books.iter().position(|b| b.title_matches(title));
        debug!(%title, found = found.is_some(), "book lookup");
        found.ok_or_else(|| LibraryError::BookNotFound(title.to_string()))
    }

    /// Position of the first member with exactly this id
    fn member_index(&self, member_id: &str) -> Result<usize> {
        let found = self.members.iter().position(|m| m.member_id == member_id);
        debug!(%member_id, found = found.is_some(), "member lookup");
        found.ok_or_else(|| LibraryError::MemberNotFound(member_id.to_string()))
    }

    /// Notify observers and append to the bounded ledger
    fn record_transition(
        &mut self,
        book: &Book,
        member_name: String,
        from: Availability,
        event: LendingEvent,
    ) -> LendingRecord {
        let to = book.availability;
        for observer in &self.observers {
            observer.on_state_change(book, from, to, &event);
        }

        let record = LendingRecord {
            book: book.id,
            title: book.title.clone(),
            member_id: event.member_id().to_string(),
            member_name,
            from,
            to,
            event,
            timestamp: TimeStamp::now(),
        };

        self.history.push_back(record.clone());
        while self.history.len() > self.max_history_size {
            self.history.pop_front();
        }

        record
    }
}
