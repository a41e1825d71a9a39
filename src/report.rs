//! Text and JSON renderings of catalog state for the shell.

use crate::{
    book::{Availability, Book},
    library::{LendingRecord, Library},
};

/// Text renderings of catalog state for the shell
#[derive(Debug)]
pub struct CatalogReport;

/// Counts shown by [`CatalogReport::stats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Books in the catalog
    pub books: usize,
    /// Books currently lent out
    pub borrowed: usize,
    /// Registered members
    pub members: usize,
    /// Lent-out books no current member holds
    pub orphaned: usize,
    /// Entries in the lending ledger
    pub history_entries: usize,
}

impl CatalogStats {
    /// Count everything in one pass over the library's views
    #[must_use]
    pub fn collect(library: &Library) -> Self {
        Self {
            books: library.book_count(),
            borrowed: library.list_books().filter(|b| !b.is_available()).count(),
            members: library.member_count(),
            orphaned: library.orphaned_books().count(),
            history_entries: library.history().count(),
        }
    }
}

impl CatalogReport {
    /// Every book, one per line, under a heading
    #[must_use]
    pub fn catalog(library: &Library) -> String {
        let mut out = String::from("Library Books:\n");
        for book in library.list_books() {
            out.push_str(&book.to_string());
            out.push('\n');
        }
        out
    }

    /// Search hits under a heading, or a no-results line
    #[must_use]
    pub fn search_results(results: &[&Book]) -> String {
        if results.is_empty() {
            return "No matching books found.\n".to_string();
        }

        let mut out = String::from("Search Results:\n");
        for book in results {
            out.push_str(&book.to_string());
            out.push('\n');
        }
        out
    }

    /// Generate a markdown table of lending history
    #[must_use]
    pub fn history_table(records: &[&LendingRecord]) -> String {
        if records.is_empty() {
            return "No transitions recorded yet.\n".to_string();
        }

        let mut table = String::from("| # | Book | Member | From | Event | To |\n");
        table.push_str("|---|------|--------|------|-------|----|\n");

        for (n, record) in (1_usize..).zip(records) {
            table.push_str(&format!(
                "| {n} | {} | {} ({}) | {} | {} | {} |\n",
                record.title,
                record.member_name,
                record.member_id,
                Self::format_state(record.from),
                record.event,
                Self::format_state(record.to)
            ));
        }

        table
    }

    /// Summary counts, including books orphaned by member removal
    #[must_use]
    pub fn stats(library: &Library) -> String {
        let stats = CatalogStats::collect(library);
        let mut out = String::from("=== Catalog Statistics ===\n");
        out.push_str(&format!("Total books: {}\n", stats.books));
        out.push_str(&format!("Borrowed books: {}\n", stats.borrowed));
        out.push_str(&format!("Members: {}\n", stats.members));
        out.push_str(&format!("History entries: {}\n", stats.history_entries));

        if stats.orphaned > 0 {
            out.push_str(&format!("Borrowed books with no holder: {}\n", stats.orphaned));
            for book in library.orphaned_books() {
                out.push_str(&format!("  {} {}\n", book.id, book.title));
            }
        }
        out
    }

    /// Pretty JSON array of books
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn books_json(books: &[&Book]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(books)
    }

    /// Pretty JSON array of the whole catalog
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn catalog_json(library: &Library) -> serde_json::Result<String> {
        let books: Vec<&Book> = library.list_books().collect();
        Self::books_json(&books)
    }

    /// Format a state for display
    fn format_state(state: Availability) -> &'static str {
        match state {
            Availability::Available => "[shelf] Available",
            Availability::Borrowed => "[out] Borrowed",
        }
    }
}
