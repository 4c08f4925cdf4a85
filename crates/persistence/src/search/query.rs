//! Query DSL builder for the search index.
//!
//! Translates the flat, independently-optional HTTP filters into a
//! single bool query, and assembles aggregation buckets into
//! response-ready facet links.

use serde_json::{Value, json};

/// Name of the terms aggregation over titles.
pub const TITLE_AGGREGATION: &str = "Title Aggregation";

/// Path that facet links point back at.
pub const SEARCH_PATH: &str = "/index/books";

/// Bucket cap for the title aggregation. See the terms-aggregation
/// `size` documentation for the trade-offs of raising it.
const TITLE_AGGREGATION_SIZE: u32 = 1000;

/// Typeahead fields queried alongside an exact title match.
const DESCRIPTION_SEARCH_FIELDS: [&str; 3] =
    ["description", "description._2gram", "description._3gram"];

/// The flat filter set accepted by the search endpoint.
///
/// `genres`, `rating` and `price` are accepted for interface
/// compatibility but do not participate in the query (see
/// [`build_query`]).
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SearchFilters {
    pub title: Option<String>,
    pub author: Option<String>,
    pub editorial: Option<String>,
    pub genres: Option<String>,
    pub rating: Option<String>,
    pub price: Option<String>,
    #[serde(default)]
    pub aggregate: bool,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Builds the complete search request body for the given filters.
///
/// The filters fold into a conjunctive bool query:
///
/// - a title adds an exact `term` clause *and* a `bool_prefix`
///   multi-match over the description typeahead fields;
/// - an author adds an analyzed `match` clause;
/// - an empty filter set falls back to `match_all` so that it selects
///   everything rather than nothing;
/// - `visible = true` is appended unconditionally, after the fallback,
///   so it always narrows the result.
///
/// With `aggregate` set, a terms aggregation on `title` is attached and
/// the hit size forced to zero: aggregation requests are facet-only
/// round trips.
pub fn build_query(filters: &SearchFilters) -> Value {
    let mut must: Vec<Value> = Vec::new();

    if let Some(title) = present(&filters.title) {
        must.push(json!({ "term": { "title": title } }));
    }

    if let Some(author) = present(&filters.author) {
        must.push(json!({ "match": { "author": author } }));
    }

    if let Some(title) = present(&filters.title) {
        must.push(json!({
            "multi_match": {
                "query": title,
                "type": "bool_prefix",
                "fields": DESCRIPTION_SEARCH_FIELDS,
            }
        }));
    }

    // An empty filter set must select everything, not nothing.
    if must.is_empty() {
        must.push(json!({ "match_all": {} }));
    }

    // Implicit entity-state guard, applied to every request.
    must.push(json!({ "term": { "visible": true } }));

    let mut body = json!({
        "query": { "bool": { "must": must } },
    });

    if filters.aggregate {
        body["aggs"] = json!({
            TITLE_AGGREGATION: {
                "terms": { "field": "title", "size": TITLE_AGGREGATION_SIZE }
            }
        });
        body["size"] = json!(0);
    }

    // genres, rating and price are accepted as parameters but have no
    // clause handling; they do not narrow the query.
    body
}

/// Builds the facet URL for one aggregation bucket.
///
/// The bucket key becomes a `title` parameter on the search path, and
/// the original title/author/editorial filters are re-appended behind
/// it, so a bucket link repeats an incoming title filter. The editorial
/// parameter rides on the author check rather than its own.
pub fn facet_url(base_url: &str, bucket_key: &str, filters: &SearchFilters) -> String {
    format!(
        "{}{}?title={}{}",
        base_url,
        SEARCH_PATH,
        bucket_key,
        refinement_params(filters)
    )
}

fn refinement_params(filters: &SearchFilters) -> String {
    let mut params = String::new();

    if let Some(title) = present(&filters.title) {
        params.push_str("&title=");
        params.push_str(title);
    }
    if let Some(author) = present(&filters.author) {
        params.push_str("&author=");
        params.push_str(author);
        params.push_str("&editorial=");
        params.push_str(filters.editorial.as_deref().unwrap_or(""));
    }

    if params.ends_with('&') {
        params.pop();
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must_clauses(body: &Value) -> &Vec<Value> {
        body["query"]["bool"]["must"].as_array().expect("must array")
    }

    #[test]
    fn test_empty_filters_fall_back_to_match_all_plus_guard() {
        let body = build_query(&SearchFilters::default());
        let must = must_clauses(&body);

        assert_eq!(must.len(), 2);
        assert!(must[0].get("match_all").is_some());
        assert_eq!(must[1], json!({ "term": { "visible": true } }));
        assert!(body.get("aggs").is_none());
        assert!(body.get("size").is_none());
    }

    #[test]
    fn test_title_adds_term_and_typeahead_clauses() {
        let filters = SearchFilters {
            title: Some("Clean Code".to_string()),
            ..Default::default()
        };
        let body = build_query(&filters);
        let must = must_clauses(&body);

        assert_eq!(must.len(), 3);
        assert_eq!(must[0], json!({ "term": { "title": "Clean Code" } }));
        assert_eq!(must[1]["multi_match"]["type"], json!("bool_prefix"));
        assert_eq!(
            must[1]["multi_match"]["fields"],
            json!(["description", "description._2gram", "description._3gram"])
        );
        assert_eq!(must[2], json!({ "term": { "visible": true } }));
    }

    #[test]
    fn test_author_adds_match_clause_between_title_clauses() {
        let filters = SearchFilters {
            title: Some("Clean Code".to_string()),
            author: Some("Robert Martin".to_string()),
            ..Default::default()
        };
        let must = must_clauses(&build_query(&filters)).clone();

        assert_eq!(must.len(), 4);
        assert!(must[0].get("term").is_some());
        assert_eq!(must[1], json!({ "match": { "author": "Robert Martin" } }));
        assert!(must[2].get("multi_match").is_some());
        assert_eq!(must[3], json!({ "term": { "visible": true } }));
    }

    #[test]
    fn test_blank_filters_count_as_absent() {
        let filters = SearchFilters {
            title: Some("   ".to_string()),
            author: Some(String::new()),
            ..Default::default()
        };
        let body = build_query(&filters);
        let must = must_clauses(&body);

        assert_eq!(must.len(), 2);
        assert!(must[0].get("match_all").is_some());
    }

    #[test]
    fn test_genres_rating_price_do_not_narrow_the_query() {
        let filters = SearchFilters {
            genres: Some("Drama,Suspenso".to_string()),
            rating: Some("4".to_string()),
            price: Some("30.5".to_string()),
            ..Default::default()
        };
        let body = build_query(&filters);
        let must = must_clauses(&body);

        // Only the fallback and the visibility guard remain.
        assert_eq!(must.len(), 2);
        assert!(must[0].get("match_all").is_some());
    }

    #[test]
    fn test_aggregate_mode_requests_facets_only() {
        let filters = SearchFilters {
            aggregate: true,
            ..Default::default()
        };
        let body = build_query(&filters);

        assert_eq!(body["size"], json!(0));
        let agg = &body["aggs"][TITLE_AGGREGATION]["terms"];
        assert_eq!(agg["field"], json!("title"));
        assert_eq!(agg["size"], json!(1000));
    }

    #[test]
    fn test_facet_url_reappends_filters_with_duplicated_title() {
        let filters = SearchFilters {
            title: Some("Clean Code".to_string()),
            author: Some("Robert Martin".to_string()),
            editorial: Some("Estupendo".to_string()),
            ..Default::default()
        };

        let url = facet_url("http://localhost:8080", "Clean Code", &filters);
        assert!(url.ends_with(
            "?title=Clean Code&title=Clean Code&author=Robert Martin&editorial=Estupendo"
        ));
        assert!(url.starts_with("http://localhost:8080/index/books?"));
    }

    #[test]
    fn test_facet_url_editorial_rides_on_author() {
        // Editorial alone is dropped from the link.
        let filters = SearchFilters {
            editorial: Some("Estupendo".to_string()),
            ..Default::default()
        };
        let url = facet_url("http://localhost:8080", "Refactoring", &filters);
        assert!(url.ends_with("?title=Refactoring"));

        // With an author but no editorial, an empty editorial parameter
        // is still emitted.
        let filters = SearchFilters {
            author: Some("Martin Fowler".to_string()),
            ..Default::default()
        };
        let url = facet_url("http://localhost:8080", "Refactoring", &filters);
        assert!(url.ends_with("?title=Refactoring&author=Martin Fowler&editorial="));
    }
}
