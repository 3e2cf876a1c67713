//! Lending library domain model for a single-branch library.
//!
//! This crate models a catalog of unique books and a registry of
//! members, linked by the checkout/return workflow. Books are identified
//! by ISBN, members by a generated id, and every book cycles between
//! the shelf and exactly one borrower. The model is in-memory and
//! single-threaded; user handles are `Rc`-based and not `Send`.

pub mod book;
pub mod library;
pub mod observers;
pub mod user;

pub use book::{Book, InvalidIsbn};
pub use library::{Library, LibraryError};
pub use observers::{LoanLogger, LoanObserver, NotificationService};
pub use user::{User, UserHandle};
