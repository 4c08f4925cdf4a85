//! HTTP request handlers.

pub mod books;
pub mod health;
pub mod index;

pub use books::{
    create_book_handler, delete_book_handler, get_book_handler, list_books_handler,
    patch_book_handler, replace_book_handler,
};
pub use health::health_handler;
pub use index::{
    create_document_handler, delete_document_handler, get_document_handler, query_index_handler,
};
