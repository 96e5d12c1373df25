//! Repository layer over the flat-file JSON store

pub mod books;
pub mod borrowers;
pub mod borrows;
pub mod external;
pub mod products;
pub mod store;

use std::sync::Arc;

use store::JsonStore;

/// Main repository struct holding the shared store
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<JsonStore>,
    pub books: books::BooksRepository,
    pub borrowers: borrowers::BorrowersRepository,
    pub borrows: borrows::BorrowsRepository,
    pub products: products::ProductsRepository,
    pub book_info: external::BookInfoRepository,
    pub api_logs: external::ApiLogsRepository,
}

impl Repository {
    /// Create a new repository with the given store
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self {
            books: books::BooksRepository::new(store.clone()),
            borrowers: borrowers::BorrowersRepository::new(store.clone()),
            borrows: borrows::BorrowsRepository::new(store.clone()),
            products: products::ProductsRepository::new(store.clone()),
            book_info: external::BookInfoRepository::new(store.clone()),
            api_logs: external::ApiLogsRepository::new(store.clone()),
            store,
        }
    }
}

/// Skip/take pagination. A page below 1 clamps to the first page.
pub(crate) fn paginate<T>(records: Vec<T>, page: i64, page_size: i64) -> Vec<T> {
    let skip = page.saturating_sub(1).max(0).saturating_mul(page_size.max(0)) as usize;
    records
        .into_iter()
        .skip(skip)
        .take(page_size.max(0) as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::paginate;

    #[test]
    fn paginate_clamps_page_below_one_to_first_page() {
        let v: Vec<i32> = (1..=5).collect();
        assert_eq!(paginate(v.clone(), 0, 2), vec![1, 2]);
        assert_eq!(paginate(v.clone(), -3, 2), vec![1, 2]);
        assert_eq!(paginate(v.clone(), i64::MIN, 2), vec![1, 2]);
        assert_eq!(paginate(v, 1, 2), vec![1, 2]);
    }

    #[test]
    fn paginate_takes_requested_window() {
        let v: Vec<i32> = (1..=5).collect();
        assert_eq!(paginate(v.clone(), 2, 2), vec![3, 4]);
        assert_eq!(paginate(v.clone(), 3, 2), vec![5]);
        assert_eq!(paginate(v, 4, 2), Vec::<i32>::new());
    }
}
