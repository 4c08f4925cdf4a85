//! Document CRUD and query execution against the search index.

use elasticsearch::{DeleteParts, GetParts, IndexParts, SearchParts};
use serde_json::Value;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::model::{BookDocument, BookSearchResponse, FacetBucket};

use super::SearchIndexStore;
use super::query::{self, SearchFilters};

impl SearchIndexStore {
    /// Indexes a document and returns it with the index-assigned id.
    pub async fn save(&self, document: &BookDocument) -> StorageResult<BookDocument> {
        let response = self
            .client()
            .index(IndexParts::Index(self.index_name()))
            .body(document)
            .send()
            .await
            .map_err(|e| StorageError::elasticsearch(format!("Failed to index document: {}", e)))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| StorageError::elasticsearch(format!("Failed to read index response: {}", e)))?;

        let id = body["_id"].as_str().ok_or_else(|| {
            StorageError::elasticsearch("Index response carried no _id".to_string())
        })?;

        let mut stored = document.clone();
        stored.id = Some(id.to_string());
        Ok(stored)
    }

    /// Fetches a document by identifier.
    pub async fn get(&self, id: &str) -> StorageResult<Option<BookDocument>> {
        let response = self
            .client()
            .get(GetParts::IndexId(self.index_name(), id))
            .send()
            .await
            .map_err(|e| StorageError::elasticsearch(format!("Failed to get document: {}", e)))?;

        if response.status_code() == 404 {
            return Ok(None);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StorageError::elasticsearch(format!("Failed to read get response: {}", e)))?;

        if body["found"].as_bool() != Some(true) {
            return Ok(None);
        }

        let mut document: BookDocument = serde_json::from_value(body["_source"].clone())
            .map_err(|e| StorageError::Serialization {
                message: format!("Malformed document source: {}", e),
            })?;
        document.id = body["_id"].as_str().map(str::to_string);
        Ok(Some(document))
    }

    /// Deletes a document; reports whether it existed.
    pub async fn delete(&self, id: &str) -> StorageResult<bool> {
        let response = self
            .client()
            .delete(DeleteParts::IndexId(self.index_name(), id))
            .send()
            .await
            .map_err(|e| StorageError::elasticsearch(format!("Failed to delete document: {}", e)))?;

        if response.status_code() == 404 {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StorageError::elasticsearch(format!("Failed to read delete response: {}", e)))?;

        Ok(body["result"].as_str() == Some("deleted"))
    }

    /// Runs the filter query and assembles documents plus facets.
    ///
    /// Degrades to an empty result when the cluster is unreachable or
    /// the index does not exist yet, so a cold index reads as an empty
    /// catalogue rather than an error.
    pub async fn search(
        &self,
        filters: &SearchFilters,
        base_url: &str,
    ) -> StorageResult<BookSearchResponse> {
        let body = query::build_query(filters);

        let response = match self
            .client()
            .search(SearchParts::Index(&[self.index_name()]))
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Search request failed, returning empty result: {}", e);
                return Ok(BookSearchResponse::default());
            }
        };

        let payload: Value = response
            .json()
            .await
            .map_err(|e| StorageError::elasticsearch(format!("Failed to read search response: {}", e)))?;

        if let Some(error_type) = payload["error"]["type"].as_str() {
            if error_type == "index_not_found_exception" {
                debug!("Index {} does not exist yet", self.index_name());
                return Ok(BookSearchResponse::default());
            }
            return Err(StorageError::elasticsearch(format!(
                "Search failed: {}",
                error_type
            )));
        }

        let mut books = Vec::new();
        if let Some(hits) = payload["hits"]["hits"].as_array() {
            for hit in hits {
                let mut document: BookDocument = serde_json::from_value(hit["_source"].clone())
                    .map_err(|e| StorageError::Serialization {
                        message: format!("Malformed search hit: {}", e),
                    })?;
                document.id = hit["_id"].as_str().map(str::to_string);
                books.push(document);
            }
        }

        let aggs = parse_facets(&payload, filters, base_url);
        Ok(BookSearchResponse { books, aggs })
    }
}

fn parse_facets(payload: &Value, filters: &SearchFilters, base_url: &str) -> Vec<FacetBucket> {
    let buckets = match payload["aggregations"][query::TITLE_AGGREGATION]["buckets"].as_array() {
        Some(buckets) => buckets,
        None => return Vec::new(),
    };

    buckets
        .iter()
        .filter_map(|bucket| {
            let key = bucket["key"].as_str()?;
            Some(FacetBucket {
                key: key.to_string(),
                count: bucket["doc_count"].as_i64().unwrap_or(0),
                url: query::facet_url(base_url, key, filters),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_facets_builds_refinement_links() {
        let payload = json!({
            "aggregations": {
                query::TITLE_AGGREGATION: {
                    "buckets": [
                        { "key": "Clean Code", "doc_count": 3 },
                        { "key": "Refactoring", "doc_count": 1 },
                    ]
                }
            }
        });
        let filters = SearchFilters {
            author: Some("Robert Martin".to_string()),
            aggregate: true,
            ..Default::default()
        };

        let facets = parse_facets(&payload, &filters, "http://localhost:8080");
        assert_eq!(facets.len(), 2);
        assert_eq!(facets[0].key, "Clean Code");
        assert_eq!(facets[0].count, 3);
        assert_eq!(
            facets[0].url,
            "http://localhost:8080/index/books?title=Clean Code&author=Robert Martin&editorial="
        );
        assert_eq!(facets[1].count, 1);
    }

    #[test]
    fn test_parse_facets_without_aggregations_is_empty() {
        let payload = json!({ "hits": { "hits": [] } });
        let facets = parse_facets(&payload, &SearchFilters::default(), "http://localhost:8080");
        assert!(facets.is_empty());
    }
}
