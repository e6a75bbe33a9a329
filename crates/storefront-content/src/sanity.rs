//! # Sanity Client
//!
//! Queries the CMS HTTP query API with GROQ.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_products()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET https://<project>.apicdn.sanity.io/v<version>/data/query/<dataset> │
//! │        ?query=*[_type == "product"]{...}                                │
//! │        &$slug="asgaard-sofa"            (by-slug only, JSON-encoded)   │
//! │        Authorization: Bearer <token>    (optional)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  200 { "ms": 4, "query": "...", "result": [ {...}, {...} ] }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  result records ──► ProductRecord ──► Product (invalid ones skipped)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Mapping
//! - connect / TLS / timeout  → `ContentError::Http`
//! - non-2xx status           → `ContentError::Status`
//! - body is not an envelope  → `ContentError::Decode`

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use storefront_core::Product;
use tracing::{debug, info};
use url::Url;

use crate::config::ContentConfig;
use crate::error::{ContentError, ContentResult};
use crate::provider::ContentProvider;
use crate::record::{product_from_value, products_from_values};

/// Fields projected into the record shape `ProductRecord` expects.
macro_rules! product_projection {
    () => {
        r#"{
  "id": _id,
  name,
  "slug": slug.current,
  description,
  price,
  discountPercentage,
  isFeaturedProduct,
  stockLevel,
  category,
  "image": image.asset._ref
}"#
    };
}

/// Every product document.
pub const ALL_PRODUCTS_QUERY: &str = concat!(r#"*[_type == "product"]"#, product_projection!());

/// The product document with slug `$slug`, or null.
pub const PRODUCT_BY_SLUG_QUERY: &str = concat!(
    r#"*[_type == "product" && slug.current == $slug][0]"#,
    product_projection!()
);

/// Longest error body kept in `ContentError::Status`.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
struct QueryEnvelope<T> {
    result: T,
}

/// Extracts `result` from a query response body.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> ContentResult<T> {
    let envelope: QueryEnvelope<T> = serde_json::from_str(body)?;
    Ok(envelope.result)
}

/// HTTP client for the CMS query API.
#[derive(Debug, Clone)]
pub struct SanityClient {
    config: ContentConfig,
    http: reqwest::Client,
}

impl SanityClient {
    /// Creates a client after validating `config`.
    pub fn new(config: ContentConfig) -> ContentResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        info!(
            project = %config.project_id,
            dataset = %config.dataset,
            cdn = config.use_cdn,
            "Content client ready"
        );

        Ok(SanityClient { config, http })
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Builds the query URL. Parameters are JSON-encoded and prefixed with `$`.
    pub fn query_url(&self, groq: &str, params: &[(&str, Value)]) -> ContentResult<Url> {
        let mut url = Url::parse(&format!(
            "https://{}/v{}/data/query/{}",
            self.config.api_host(),
            self.config.api_version,
            self.config.dataset
        ))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("query", groq);
            for (name, value) in params {
                query.append_pair(&format!("${}", name), &value.to_string());
            }
        }

        Ok(url)
    }

    /// Runs a query and decodes its `result`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, Value)],
    ) -> ContentResult<T> {
        let url = self.query_url(groq, params)?;
        debug!(host = url.host_str().unwrap_or_default(), "Querying CMS");

        let mut request = self.http.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(ContentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_envelope(&body)
    }
}

#[async_trait]
impl ContentProvider for SanityClient {
    fn name(&self) -> &'static str {
        "sanity"
    }

    async fn fetch_products(&self) -> ContentResult<Vec<Product>> {
        let records: Vec<Value> = self.query(ALL_PRODUCTS_QUERY, &[]).await?;
        debug!(records = records.len(), "Fetched product records");
        Ok(products_from_values(records))
    }

    async fn fetch_product_by_slug(&self, slug: &str) -> ContentResult<Option<Product>> {
        let record: Option<Value> = self
            .query(PRODUCT_BY_SLUG_QUERY, &[("slug", Value::from(slug))])
            .await?;
        Ok(record.and_then(product_from_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(use_cdn: bool) -> SanityClient {
        SanityClient::new(ContentConfig::new("abc123").use_cdn(use_cdn)).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(matches!(
            SanityClient::new(ContentConfig::new("")),
            Err(ContentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_query_url_shape() {
        let url = client(true).query_url("*[_type == \"product\"]", &[]).unwrap();

        assert_eq!(url.host_str(), Some("abc123.apicdn.sanity.io"));
        assert_eq!(url.path(), "/v2024-01-01/data/query/production");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("query".to_string(), "*[_type == \"product\"]".to_string())]
        );
    }

    #[test]
    fn test_query_url_encodes_params_as_json() {
        let url = client(false)
            .query_url(PRODUCT_BY_SLUG_QUERY, &[("slug", Value::from("bar-chair"))])
            .unwrap();

        assert_eq!(url.host_str(), Some("abc123.api.sanity.io"));
        let slug = url
            .query_pairs()
            .find(|(k, _)| k == "$slug")
            .map(|(_, v)| v.into_owned());
        assert_eq!(slug.as_deref(), Some("\"bar-chair\""));
    }

    #[test]
    fn test_queries_project_record_fields() {
        for field in ["\"id\": _id", "\"slug\": slug.current", "\"image\": image.asset._ref"] {
            assert!(ALL_PRODUCTS_QUERY.contains(field));
            assert!(PRODUCT_BY_SLUG_QUERY.contains(field));
        }
        assert!(PRODUCT_BY_SLUG_QUERY.contains("[0]"));
    }

    #[test]
    fn test_decode_envelope() {
        let list: Vec<Value> =
            decode_envelope(r#"{"ms": 3, "query": "*", "result": [{"id": "p1"}]}"#).unwrap();
        assert_eq!(list.len(), 1);

        let none: Option<Value> = decode_envelope(r#"{"result": null}"#).unwrap();
        assert!(none.is_none());

        assert!(matches!(
            decode_envelope::<Vec<Value>>("<html>gateway</html>"),
            Err(ContentError::Decode(_))
        ));
        assert!(matches!(
            decode_envelope::<Vec<Value>>(r#"{"error": "bad"}"#),
            Err(ContentError::Decode(_))
        ));
    }
}
