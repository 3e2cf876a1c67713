use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a book is constructed without an ISBN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ISBN cannot be empty")]
pub struct InvalidIsbn;

/// A book in the library catalog, uniquely identified by its ISBN
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(try_from = "RawBook")]
pub struct Book {
    /// Unique ISBN of the book
    isbn: String,
    /// Title of the book, may be empty
    title: String,
    /// Author of the book, may be empty
    author: String,
    /// Year the book was published
    publish_year: i32,
}

/// Wire representation of a book, validated into [`Book`] on deserialization
#[derive(Debug, Deserialize)]
struct RawBook {
    /// Unique ISBN of the book
    isbn: String,
    /// Title of the book, empty when absent
    #[serde(default)]
    title: String,
    /// Author of the book, empty when absent
    #[serde(default)]
    author: String,
    /// Year the book was published
    publish_year: i32,
}

impl TryFrom<RawBook> for Book {
    type Error = InvalidIsbn;

    fn try_from(raw: RawBook) -> Result<Self, Self::Error> {
        Self::new(&raw.isbn, &raw.title, &raw.author, raw.publish_year)
    }
}

impl Book {
    /// Create a new book
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIsbn`] if `isbn` is empty
    pub fn new(
        isbn: &str,
        title: &str,
        author: &str,
        publish_year: i32,
    ) -> Result<Self, InvalidIsbn> {
        if isbn.is_empty() {
            return Err(InvalidIsbn);
        }

        Ok(Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            publish_year,
        })
    }

    /// Get the ISBN of the book
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Get the title of the book
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the author of the book
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Get the year the book was published
    #[must_use]
    pub fn publish_year(&self) -> i32 {
        self.publish_year
    }
}

// Two books with the same ISBN are the same catalog item, whatever the
// rest of their metadata says
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

// The ISBN is deliberately left out of the display form
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}\nAuthor: {}\nPublication Year: {}",
            self.title, self.author, self.publish_year
        )
    }
}
