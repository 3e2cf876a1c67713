use lending_library::{Book, Library, LoanLogger, NotificationService, User, UserHandle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create the library and register observers
    let mut library = Library::new("Fairfax County Public Library");
    library.register_observer(Box::new(LoanLogger));
    library.register_observer(Box::new(NotificationService));

    // Seed the catalog
    let lotr = Book::new("978-0-09-556397-5", "The Lord of the Rings", "J.R.R. Tolkien", 1954)?;
    let mockingbird = Book::new("978-0-06-112008-4", "To Kill a Mockingbird", "Harper Lee", 1960)?;
    let gatsby = Book::new("978-0-7432-7356-5", "The Great Gatsby", "F. Scott Fitzgerald", 1925)?;

    library.add_book(lotr.clone());
    library.add_book(mockingbird.clone());
    library.add_book(gatsby.clone());

    // Register members
    let alice = UserHandle::new(User::new("Alice", "Nguyen", "alice@example.com"));
    let bob = UserHandle::new(User::new("Bob", "Okafor", "bob@example.com"));
    library.add_member(&alice);
    library.add_member(&bob);

    println!("{library}");

    println!("\n=== Checkout ===");
    library.checkout(&lotr, &alice)?;
    library.checkout(&mockingbird, &alice)?;
    library.checkout(&gatsby, &bob)?;

    println!("{library}");
    println!("Active borrowers: {}", library.active_borrowers().len());
    if let Some(holder) = library.current_borrower(&lotr) {
        println!("\"{}\" is with {}", lotr.title(), holder.borrow().full_name());
    }

    println!("\n=== Alice's card ===");
    println!("{alice}");

    // Bob asks for a book that is already out
    println!("\n=== Unavailable book ===");
    match library.checkout(&lotr, &bob) {
        Ok(()) => println!("Checked out: {}", lotr.title()),
        Err(e) => println!("Error: {e}"),
    }

    // Bob offers back a book he never had
    println!("\n=== Return without checkout ===");
    match library.return_book(&mockingbird, &bob) {
        Ok(()) => println!("Returned: {}", mockingbird.title()),
        Err(e) => println!("Error: {e}"),
    }

    println!("\n=== Return ===");
    library.return_book(&lotr, &alice)?;
    library.return_book(&mockingbird, &alice)?;
    library.return_book(&gatsby, &bob)?;

    println!("{library}");
    Ok(())
}
