use crate::{book::Book, user::User};

/// Trait for loan activity observation
pub trait LoanObserver {
    /// Called after a book has been checked out
    fn on_checkout(&self, book: &Book, user: &User);

    /// Called after a book has been returned
    fn on_return(&self, book: &Book, user: &User);
}

/// Logs every loan movement in the library
#[derive(Debug)]
pub struct LoanLogger;

impl LoanObserver for LoanLogger {
    fn on_checkout(&self, book: &Book, user: &User) {
        println!("LOGGER: \"{}\" checked out by {}", book.title(), user.full_name());
    }

    fn on_return(&self, book: &Book, user: &User) {
        println!("LOGGER: \"{}\" returned by {}", book.title(), user.full_name());
    }
}

/// Sends notifications for notable loan events
#[derive(Debug)]
pub struct NotificationService;

impl LoanObserver for NotificationService {
    fn on_checkout(&self, book: &Book, user: &User) {
        println!("NOTIFICATION: Enjoy \"{}\", {}!", book.title(), user.first_name());
    }

    fn on_return(&self, book: &Book, _user: &User) {
        println!("NOTIFICATION: \"{}\" is available again!", book.title());
    }
}
