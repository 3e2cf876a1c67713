use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use thiserror::Error;

use crate::{book::Book, observers::LoanObserver, user::UserHandle};

/// Error type for library circulation operations
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The book is not in the catalog: already checked out, or never added
    #[error("book \"{title}\" is not available for checkout")]
    BookNotAvailable {
        /// Title of the requested book
        title: String,
    },
    /// The user does not currently hold the book
    #[error("book \"{title}\" is not checked out by {borrower}")]
    BookNotCheckedOut {
        /// Title of the offered book
        title: String,
        /// Full name of the user who offered it
        borrower: String,
    },
}

/// A single-branch lending library
///
/// Owns the catalog of available books and the member registry, plus
/// the borrow index tracking who holds each checked-out book. Every book
/// cycles between exactly two states: on the shelf (in the catalog) or
/// on loan (a key of the borrow index), never both.
pub struct Library {
    /// Name of the library
    name: String,
    /// Books currently available for checkout, unique by ISBN
    catalog: HashSet<Book>,
    /// Registered members, unique by id
    members: HashSet<UserHandle>,
    /// Borrow index: the user currently holding each checked-out book
    loans: HashMap<Book, UserHandle>,
    /// Registered loan activity observers
    observers: Vec<Box<dyn LoanObserver>>,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("catalog", &self.catalog)
            .field("members", &self.members)
            .field("loans", &self.loans)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Library {
    /// Create a new, empty library with the given name
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            catalog: HashSet::new(),
            members: HashSet::new(),
            loans: HashMap::new(),
            observers: Vec::new(),
        }
    }

    /// Get the name of the library
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an observer to be notified of loan activity
    pub fn register_observer(&mut self, observer: Box<dyn LoanObserver>) {
        self.observers.push(observer);
    }

    /// Add a book to the catalog
    ///
    /// Returns `true` if the book was added, `false` if a book with the
    /// same ISBN is already part of the collection, shelved or on loan.
    pub fn add_book(&mut self, book: Book) -> bool {
        if self.loans.contains_key(&book) {
            return false;
        }
        self.catalog.insert(book)
    }

    /// Register a user as a member of the library
    ///
    /// Returns `true` if the user was added, `false` if already registered
    pub fn add_member(&mut self, user: &UserHandle) -> bool {
        self.members.insert(user.clone())
    }

    /// Check a book out to a user
    ///
    /// The book moves from the catalog into the user's borrowed set and
    /// the borrow index records the pairing. Membership is not a
    /// precondition: any user may check out a book.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::BookNotAvailable`] if the book is not in
    /// the catalog, because it is already checked out or was never added
    ///
    /// # Panics
    ///
    /// Panics if `user` is currently borrowed
    pub fn checkout(&mut self, book: &Book, user: &UserHandle) -> Result<(), LibraryError> {
        let Some(stored) = self.catalog.take(book) else {
            return Err(LibraryError::BookNotAvailable { title: book.title().to_string() });
        };

        user.borrow_mut().add_book(stored.clone());
        self.loans.insert(stored, user.clone());

        let borrower = user.borrow();
        for observer in &self.observers {
            observer.on_checkout(book, &borrower);
        }

        Ok(())
    }

    /// Accept a book back from a user
    ///
    /// The book leaves the user's borrowed set, goes back into the
    /// catalog, and its borrow index entry is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::BookNotCheckedOut`] if the book is not in
    /// the user's borrowed set
    ///
    /// # Panics
    ///
    /// Panics if `user` is currently borrowed
    pub fn return_book(&mut self, book: &Book, user: &UserHandle) -> Result<(), LibraryError> {
        let held = user.borrow_mut().remove_book(book);
        if !held {
            return Err(LibraryError::BookNotCheckedOut {
                title: book.title().to_string(),
                borrower: user.borrow().full_name(),
            });
        }

        // Reshelve the instance held by the index; fall back to the
        // caller's copy when the index entry has drifted away
        if let Some((stored, _)) = self.loans.remove_entry(book) {
            self.catalog.insert(stored);
        } else {
            self.catalog.insert(book.clone());
        }

        let borrower = user.borrow();
        for observer in &self.observers {
            observer.on_return(book, &borrower);
        }

        Ok(())
    }

    /// Get the users who currently hold at least one checked-out book
    ///
    /// A user holding several books appears once
    #[must_use]
    pub fn active_borrowers(&self) -> HashSet<UserHandle> {
        self.loans.values().cloned().collect()
    }

    /// Look up who currently holds a book
    ///
    /// Returns `None` for a book that is not checked out, including one
    /// the library has never seen
    #[must_use]
    pub fn current_borrower(&self, book: &Book) -> Option<UserHandle> {
        self.loans.get(book).cloned()
    }

    /// Get the books currently available for checkout
    #[must_use]
    pub fn available_books(&self) -> &HashSet<Book> {
        &self.catalog
    }

    /// Get the registered members
    #[must_use]
    pub fn members(&self) -> &HashSet<UserHandle> {
        &self.members
    }

    /// Get a view of the borrow index
    #[must_use]
    pub fn loans(&self) -> &HashMap<Book, UserHandle> {
        &self.loans
    }
}

// Implementing display for nicer output
impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} available, {} on loan, {} members",
            self.name,
            self.catalog.len(),
            self.loans.len(),
            self.members.len()
        )
    }
}
