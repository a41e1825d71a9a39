//! Observers notified after lending transitions.

use tracing::info;

use crate::{
    book::{Availability, Book},
    events::LendingEvent,
};

/// Trait for lending transition observation
pub trait LendingObserver {
    /// Called after a book changes state
    fn on_state_change(
        &self,
        book: &Book,
        from: Availability,
        to: Availability,
        event: &LendingEvent,
    );
}

/// Logs all transitions that occur in the library
#[derive(Debug)]
pub struct TransitionLogger;

impl LendingObserver for TransitionLogger {
    fn on_state_change(
        &self,
        book: &Book,
        from: Availability,
        to: Availability,
        event: &LendingEvent,
    ) {
        info!(
            target: "library_catalog::transitions",
            book = %book.id,
            title = %book.title,
            state = to.description(),
            "{from:?} --({event})--> {to:?}"
        );
    }
}

/// Announces check-outs and returns
#[derive(Debug)]
pub struct NotificationService;

impl LendingObserver for NotificationService {
    fn on_state_change(
        &self,
        book: &Book,
        from: Availability,
        to: Availability,
        event: &LendingEvent,
    ) {
        match (from, to, event) {
            (Availability::Available, Availability::Borrowed, LendingEvent::Borrow(member)) => {
                info!(
                    target: "library_catalog::notifications",
                    "'{}' has been checked out by {member}",
                    book.title
                );
            }
            (Availability::Borrowed, Availability::Available, LendingEvent::Return(member)) => {
                info!(
                    target: "library_catalog::notifications",
                    "'{}' has been returned by {member}",
                    book.title
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{book::BookId, library::Library, test_support::capture_logs};

    fn library_with(observer: Box<dyn LendingObserver>) -> Library {
        let mut library = Library::new();
        library.register_observer(observer);
        library.add_book("Dune", "Herbert", "Sci-Fi", "1965");
        library.add_member("Alice", "M1");
        library
    }

    #[test]
    fn test_notification_service_announces_checkout_and_return() {
        let mut library = library_with(Box::new(NotificationService));

        let logs = capture_logs(|| {
            assert!(library.borrow_book("M1", "Dune").is_ok());
            assert!(library.return_book("M1", "Dune").is_ok());
        });

        assert!(logs.contains("'Dune' has been checked out by M1"));
        assert!(logs.contains("'Dune' has been returned by M1"));
    }

    #[test]
    fn test_notification_service_silent_on_failed_borrow() {
        let mut library = library_with(Box::new(NotificationService));
        library.add_member("Bob", "M2");
        assert!(library.borrow_book("M1", "Dune").is_ok());

        let logs = capture_logs(|| {
            assert!(library.borrow_book("M2", "Dune").is_err());
        });
        assert!(!logs.contains("has been checked out"));
    }

    #[test]
    fn test_notification_service_ignores_other_transitions() {
        let book = Book::new(BookId::new(1), "Dune", "Herbert", "Sci-Fi", "1965");

        let logs = capture_logs(|| {
            NotificationService.on_state_change(
                &book,
                Availability::Borrowed,
                Availability::Borrowed,
                &LendingEvent::Borrow("M1".to_string()),
            );
            NotificationService.on_state_change(
                &book,
                Availability::Available,
                Availability::Borrowed,
                &LendingEvent::Return("M1".to_string()),
            );
        });
        assert!(logs.is_empty());
    }

    #[test]
    fn test_transition_logger_records_each_transition() {
        let mut library = library_with(Box::new(TransitionLogger));

        let logs = capture_logs(|| {
            assert!(library.borrow_book("M1", "Dune").is_ok());
            assert!(library.return_book("M1", "Dune").is_ok());
        });

        assert!(logs.contains("Available --(Borrow(M1))--> Borrowed"));
        assert!(logs.contains("Borrowed --(Return(M1))--> Available"));
        assert!(logs.contains("Book is checked out by a member"));
    }
}
