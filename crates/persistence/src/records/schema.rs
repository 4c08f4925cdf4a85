//! SQLite schema for the books table.

use rusqlite::Connection;

use crate::error::{StorageError, StorageResult};

/// Initializes the books table.
///
/// Genres are stored as a JSON array in a single text column; dates as
/// ISO `YYYY-MM-DD` text.
pub fn initialize(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            editorial TEXT,
            pages INTEGER NOT NULL,
            genres TEXT NOT NULL,
            published_date TEXT NOT NULL,
            rating INTEGER NOT NULL,
            price REAL NOT NULL,
            cover_image TEXT NOT NULL,
            dimensions TEXT NOT NULL,
            stock INTEGER NOT NULL,
            visible INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_books_title ON books (title);
        CREATE INDEX IF NOT EXISTS idx_books_author ON books (author);",
    )
    .map_err(|e| StorageError::sqlite(format!("Failed to initialize schema: {}", e)))
}
