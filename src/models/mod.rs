//! Domain models persisted as JSON collections

pub mod book;
pub mod borrow;
pub mod borrower;
pub mod external;
pub mod product;

pub use book::Book;
pub use borrow::{BorrowRecord, BorrowStatus};
pub use borrower::Borrower;
pub use external::{ExternalApiLog, ExternalBookInfo};
pub use product::Product;

/// A record stored in a flat-file JSON collection.
///
/// Each entity names its backing collection and exposes its integer
/// identifier explicitly, so the store never has to inspect records
/// at runtime to find an id.
pub trait Entity: Clone + Send + Sync + 'static {
    /// File stem of the backing collection (e.g. `Books` -> `Books.json`)
    const COLLECTION: &'static str;

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}
