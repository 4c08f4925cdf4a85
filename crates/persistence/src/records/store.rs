//! CRUD and predicate search for book records.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Row, ToSql, params, params_from_iter};

use crate::error::{StorageError, StorageResult};
use crate::model::Book;

use super::SqliteRecordStore;

const BOOK_COLUMNS: &str = "id, title, author, editorial, pages, genres, published_date, \
     rating, price, cover_image, dimensions, stock, visible";

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    let genres_json: String = row.get(5)?;
    let genres: Vec<String> = serde_json::from_str(&genres_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    let date_text: String = row.get(6)?;
    let published_date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(Book {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        author: row.get(2)?,
        editorial: row.get(3)?,
        pages: row.get(4)?,
        genres,
        published_date,
        rating: row.get(7)?,
        price: row.get(8)?,
        cover_image: row.get(9)?,
        dimensions: row.get(10)?,
        stock: row.get(11)?,
        visible: row.get(12)?,
    })
}

impl SqliteRecordStore {
    /// Returns every book record.
    pub fn list(&self) -> StorageResult<Vec<Book>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS))
            .map_err(|e| StorageError::sqlite(format!("Failed to prepare list: {}", e)))?;

        let rows = stmt
            .query_map([], book_from_row)
            .map_err(|e| StorageError::sqlite(format!("Failed to list books: {}", e)))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StorageError::sqlite(format!("Failed to read book row: {}", e)))
    }

    /// Predicate search over records.
    ///
    /// Filters are AND-composed: title and editorial match as
    /// substrings, author and visible as exact equality.
    pub fn search(
        &self,
        title: Option<&str>,
        author: Option<&str>,
        editorial: Option<&str>,
        visible: Option<bool>,
    ) -> StorageResult<Vec<Book>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = title {
            clauses.push("title LIKE ?");
            values.push(Box::new(format!("%{}%", title)));
        }
        if let Some(author) = author {
            clauses.push("author = ?");
            values.push(Box::new(author.to_string()));
        }
        if let Some(editorial) = editorial {
            clauses.push("editorial LIKE ?");
            values.push(Box::new(format!("%{}%", editorial)));
        }
        if let Some(visible) = visible {
            clauses.push("visible = ?");
            values.push(Box::new(visible));
        }

        let mut sql = format!("SELECT {} FROM books", BOOK_COLUMNS);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StorageError::sqlite(format!("Failed to prepare search: {}", e)))?;

        let rows = stmt
            .query_map(params_from_iter(values.iter().map(|v| v.as_ref())), book_from_row)
            .map_err(|e| StorageError::sqlite(format!("Failed to search books: {}", e)))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StorageError::sqlite(format!("Failed to read book row: {}", e)))
    }

    /// Fetches a record by identifier.
    pub fn get(&self, id: i64) -> StorageResult<Option<Book>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            &format!("SELECT {} FROM books WHERE id = ?1", BOOK_COLUMNS),
            params![id],
            book_from_row,
        );

        match result {
            Ok(book) => Ok(Some(book)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::sqlite(format!("Failed to read book: {}", e))),
        }
    }

    /// Inserts a record and returns it with the store-assigned id.
    pub fn insert(&self, book: &Book) -> StorageResult<Book> {
        let genres = serde_json::to_string(&book.genres).map_err(|e| {
            StorageError::Serialization {
                message: format!("Failed to serialize genres: {}", e),
            }
        })?;

        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO books (title, author, editorial, pages, genres, published_date,
                                rating, price, cover_image, dimensions, stock, visible)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                book.title,
                book.author,
                book.editorial,
                book.pages,
                genres,
                book.published_date.format("%Y-%m-%d").to_string(),
                book.rating,
                book.price,
                book.cover_image,
                book.dimensions,
                book.stock,
                book.visible,
            ],
        )
        .map_err(|e| StorageError::sqlite(format!("Failed to insert book: {}", e)))?;

        let mut stored = book.clone();
        stored.id = Some(conn.last_insert_rowid());
        Ok(stored)
    }

    /// Overwrites every mutable field of the record with the given id.
    pub fn update(&self, id: i64, book: &Book) -> StorageResult<()> {
        let genres = serde_json::to_string(&book.genres).map_err(|e| {
            StorageError::Serialization {
                message: format!("Failed to serialize genres: {}", e),
            }
        })?;

        let conn = self.get_connection()?;
        conn.execute(
            "UPDATE books
             SET title = ?1, author = ?2, editorial = ?3, pages = ?4, genres = ?5,
                 published_date = ?6, rating = ?7, price = ?8, cover_image = ?9,
                 dimensions = ?10, stock = ?11, visible = ?12
             WHERE id = ?13",
            params![
                book.title,
                book.author,
                book.editorial,
                book.pages,
                genres,
                book.published_date.format("%Y-%m-%d").to_string(),
                book.rating,
                book.price,
                book.cover_image,
                book.dimensions,
                book.stock,
                book.visible,
                id,
            ],
        )
        .map_err(|e| StorageError::sqlite(format!("Failed to update book: {}", e)))?;

        Ok(())
    }

    /// Deletes a record; reports whether a row was removed.
    pub fn delete(&self, id: i64) -> StorageResult<bool> {
        let conn = self.get_connection()?;
        let affected = conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])
            .map_err(|e| StorageError::sqlite(format!("Failed to delete book: {}", e)))?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::SqliteRecordStore;

    fn sample_book(title: &str, author: &str, visible: bool) -> Book {
        Book {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            editorial: Some("Estupendo".to_string()),
            pages: 300,
            genres: vec!["Drama".to_string(), "Suspenso".to_string()],
            published_date: NaiveDate::from_ymd_opt(2015, 3, 14).unwrap(),
            rating: 4,
            price: 25.0,
            cover_image: "http://covers.example.com/b.png".to_string(),
            dimensions: "20x15".to_string(),
            stock: 5,
            visible,
        }
    }

    fn store() -> SqliteRecordStore {
        let store = SqliteRecordStore::in_memory().expect("in-memory store");
        store.init_schema().expect("schema");
        store
    }

    #[test]
    fn test_insert_assigns_id_and_round_trips() {
        let store = store();
        let stored = store.insert(&sample_book("Clean Code", "Robert Martin", true)).unwrap();
        let id = stored.id.expect("assigned id");

        let fetched = store.get(id).unwrap().expect("book present");
        assert_eq!(fetched, stored);
        assert_eq!(fetched.genres, vec!["Drama", "Suspenso"]);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = store();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn test_search_predicates_are_and_composed() {
        let store = store();
        store.insert(&sample_book("Clean Code", "Robert Martin", true)).unwrap();
        store.insert(&sample_book("Clean Architecture", "Robert Martin", false)).unwrap();
        store.insert(&sample_book("Refactoring", "Martin Fowler", true)).unwrap();

        // Title substring match
        let by_title = store.search(Some("Clean"), None, None, None).unwrap();
        assert_eq!(by_title.len(), 2);

        // Author is exact equality
        let by_author = store.search(None, Some("Robert"), None, None).unwrap();
        assert!(by_author.is_empty());
        let by_author = store.search(None, Some("Robert Martin"), None, None).unwrap();
        assert_eq!(by_author.len(), 2);

        // Conjunction narrows
        let narrowed = store
            .search(Some("Clean"), Some("Robert Martin"), None, Some(true))
            .unwrap();
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].title, "Clean Code");
    }

    #[test]
    fn test_update_overwrites_fields() {
        let store = store();
        let stored = store.insert(&sample_book("Draft", "Someone", false)).unwrap();
        let id = stored.id.unwrap();

        let mut replacement = sample_book("Final", "Someone Else", true);
        replacement.id = Some(id);
        store.update(id, &replacement).unwrap();

        let fetched = store.get(id).unwrap().unwrap();
        assert_eq!(fetched.title, "Final");
        assert_eq!(fetched.author, "Someone Else");
        assert!(fetched.visible);
    }

    #[test]
    fn test_delete_reports_whether_row_existed() {
        let store = store();
        let stored = store.insert(&sample_book("Gone", "Soon", true)).unwrap();
        let id = stored.id.unwrap();

        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
    }

    #[test]
    fn test_file_backed_store_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.db");

        {
            let store = SqliteRecordStore::open(&path).unwrap();
            store.init_schema().unwrap();
            store.insert(&sample_book("Durable", "Author", true)).unwrap();
        }

        let store = SqliteRecordStore::open(&path).unwrap();
        store.init_schema().unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
