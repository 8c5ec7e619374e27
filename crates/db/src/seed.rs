use std::path::Path;

use crate::error::StoreError;
use crate::filter::BookFilter;
use crate::model::NewBook;
use crate::store::BookStore;

/// Populate an empty collection from a JSON array of books.
///
/// Returns the number of inserted documents. A non-empty collection or a
/// missing file is left alone.
pub async fn seed_from_file(store: &dyn BookStore, path: &Path) -> Result<usize, StoreError> {
    if store.count(&BookFilter::default()).await? > 0 {
        return Ok(0);
    }
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!(path = %path.display(), "seed file not found, skipping");
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
    let books: Vec<NewBook> =
        serde_json::from_str(&raw).map_err(|source| StoreError::SeedDecode {
            path: path.to_path_buf(),
            source,
        })?;

    let inserted = books.len();
    for book in books {
        store.insert(book).await?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::store::MemoryBookStore;

    const SAMPLE: &str = r#"[
        {"title": "Dune", "author": "Frank Herbert", "genre": "Fiction", "publishedYear": 1965, "price": 9.99, "imageUrl": "/dune.webp", "bookUrl": "/books/dune"},
        {"title": "Sapiens", "author": "Yuval Noah Harari", "genre": "Non-Fiction", "price": 14.5}
    ]"#;

    fn seed_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn seeds_empty_collection() {
        let store = MemoryBookStore::new();
        let file = seed_file(SAMPLE);

        assert_eq!(seed_from_file(&store, file.path()).await.unwrap(), 2);
        assert_eq!(store.count(&BookFilter::default()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn leaves_populated_collection_alone() {
        let store = MemoryBookStore::new();
        let file = seed_file(SAMPLE);
        seed_from_file(&store, file.path()).await.unwrap();

        assert_eq!(seed_from_file(&store, file.path()).await.unwrap(), 0);
        assert_eq!(store.count(&BookFilter::default()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_skipped() {
        let store = MemoryBookStore::new();
        let inserted = seed_from_file(&store, Path::new("/nonexistent/books.json"))
            .await
            .unwrap();
        assert_eq!(inserted, 0);
    }

    #[tokio::test]
    async fn malformed_file_is_reported() {
        let store = MemoryBookStore::new();
        let file = seed_file("{ not json");
        let error = seed_from_file(&store, file.path()).await.unwrap_err();
        assert!(matches!(error, StoreError::SeedDecode { .. }));
    }
}
