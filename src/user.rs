use std::{
    cell::{Ref, RefCell, RefMut},
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::book::Book;

/// A library member who can check out and return books
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    /// Unique identifier, generated at construction
    id: Uuid,
    /// The member's first name
    first_name: String,
    /// The member's last name
    last_name: String,
    /// The member's email address
    email: String,
    /// Books currently checked out to this member, unique by ISBN
    #[serde(default)]
    borrowed: HashSet<Book>,
}

impl User {
    /// Create a new member with a freshly generated id and no books
    #[must_use]
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            borrowed: HashSet::new(),
        }
    }

    /// Get the member's unique id
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the member's first name
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Get the member's last name
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Get the member's full name (first + last)
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Get the member's email address
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replace the member's email address
    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    /// Add a book to the member's checked-out collection
    ///
    /// Returns `true` if the book was newly added, `false` if a book with
    /// the same ISBN was already present
    pub fn add_book(&mut self, book: Book) -> bool {
        self.borrowed.insert(book)
    }

    /// Remove a book from the member's checked-out collection
    ///
    /// Returns `true` if the book was present, `false` otherwise
    pub fn remove_book(&mut self, book: &Book) -> bool {
        self.borrowed.remove(book)
    }

    /// Get the books currently checked out to this member
    #[must_use]
    pub fn borrowed_books(&self) -> &HashSet<Book> {
        &self.borrowed
    }
}

// Two users are the same member only when their ids match; identical
// names and emails do not make two independently created users equal
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Borrowed titles appear in set iteration order, which is unordered
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let titles: Vec<&str> = self.borrowed.iter().map(Book::title).collect();
        write!(
            f,
            "First Name: {}\nLast Name: {}\nEmail: {}\nBooks Checked Out: {}",
            self.first_name,
            self.last_name,
            self.email,
            titles.join(", ")
        )
    }
}

/// Shared, mutable handle to a [`User`]
///
/// The library's member registry, the borrow index, and the caller all
/// observe the same underlying user through clones of one handle.
#[derive(Debug, Clone)]
pub struct UserHandle(Rc<RefCell<User>>);

impl UserHandle {
    /// Wrap a user in a shareable handle
    #[must_use]
    pub fn new(user: User) -> Self {
        Self(Rc::new(RefCell::new(user)))
    }

    /// Get the id of the underlying user
    ///
    /// # Panics
    ///
    /// Panics if the user is currently mutably borrowed
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.0.borrow().id()
    }

    /// Borrow the underlying user immutably
    ///
    /// # Panics
    ///
    /// Panics if the user is currently mutably borrowed
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, User> {
        self.0.borrow()
    }

    /// Borrow the underlying user mutably
    ///
    /// # Panics
    ///
    /// Panics if the user is already borrowed
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, User> {
        self.0.borrow_mut()
    }
}

impl From<User> for UserHandle {
    fn from(user: User) -> Self {
        Self::new(user)
    }
}

// Handle equality follows user identity, so any two handles to the same
// member compare equal wherever they appear
impl PartialEq for UserHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for UserHandle {}

impl Hash for UserHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0.borrow(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper function to build a book for loan tests
    #[allow(clippy::expect_used)]
    fn book(isbn: &str, title: &str) -> Book {
        Book::new(isbn, title, "Test Author", 2000).expect("fixture ISBN should be valid")
    }

    #[test]
    fn new_generates_an_id_and_an_empty_set() {
        let u = User::new("John", "Cena", "ucantcme@example.com");
        assert_eq!(u.first_name(), "John");
        assert_eq!(u.last_name(), "Cena");
        assert_eq!(u.email(), "ucantcme@example.com");
        assert!(u.borrowed_books().is_empty());
        assert!(!u.id().is_nil());
    }

    #[test]
    #[allow(clippy::eq_op)]
    fn users_are_equal_only_by_id() {
        let u = User::new("John", "Cena", "ucantcme@example.com");
        let twin = User::new("John", "Cena", "ucantcme@example.com");
        assert_eq!(u, u);
        assert_ne!(u, twin);
    }

    #[test]
    fn add_book_rejects_duplicates() {
        let mut u = User::new("Mike", "Myers", "mm@example.com");
        assert!(u.add_book(book("978-0-7432-7356-5", "The Great Gatsby")));
        assert!(!u.add_book(book("978-0-7432-7356-5", "The Great Gatsby")));
        assert_eq!(u.borrowed_books().len(), 1);
    }

    #[test]
    fn remove_book_reports_absence() {
        let mut u = User::new("Mike", "Myers", "mm@example.com");
        let gatsby = book("978-0-7432-7356-5", "The Great Gatsby");

        assert!(!u.remove_book(&gatsby));
        assert!(u.add_book(gatsby.clone()));
        assert!(u.remove_book(&gatsby));
        assert!(u.borrowed_books().is_empty());
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let u = User::new("James", "Bond", "007@example.com");
        assert_eq!(u.full_name(), "James Bond");
    }

    #[test]
    fn set_email_overwrites_unconditionally() {
        let mut u = User::new("James", "Bond", "007@example.com");
        u.set_email("not-a-valid-email");
        assert_eq!(u.email(), "not-a-valid-email");
    }

    #[test]
    fn display_lists_name_email_and_borrowed_titles() {
        let mut u = User::new("John", "Cena", "ucantcme@example.com");
        assert!(u.add_book(book("978-0-7432-7356-5", "The Great Gatsby")));
        assert!(u.add_book(book("978-0-06-112008-4", "To Kill a Mockingbird")));

        // Set iteration order is not stable, so only containment is asserted
        let output = u.to_string();
        assert!(output.contains("First Name: John"));
        assert!(output.contains("Last Name: Cena"));
        assert!(output.contains("Email: ucantcme@example.com"));
        assert!(output.contains("The Great Gatsby"));
        assert!(output.contains("To Kill a Mockingbird"));
    }

    #[test]
    fn handles_share_one_underlying_user() {
        let handle = UserHandle::new(User::new("Mike", "Myers", "mm@example.com"));
        let alias = handle.clone();

        alias.borrow_mut().set_email("mike@example.com");

        assert_eq!(handle.borrow().email(), "mike@example.com");
        assert_eq!(handle, alias);
    }

    #[test]
    fn handles_compare_by_user_identity() {
        let mike = UserHandle::new(User::new("Mike", "Myers", "mm@example.com"));
        let doppelganger = UserHandle::new(User::new("Mike", "Myers", "mm@example.com"));
        assert_ne!(mike, doppelganger);
    }
}
