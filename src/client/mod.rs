//! Client for the api.bible REST service.
//!
//! Every call goes through a [`Fetcher`], which keeps status classification
//! and decoding here and transport in
//! [`HttpFetcher`](crate::fetcher::http_fetcher::HttpFetcher).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::app::{BibliaError, Result};
use crate::domain::{Bible, Book, ChapterContent, VerseResult};
use crate::fetcher::{FetchResponse, Fetcher};

pub const DEFAULT_BASE_URL: &str = "https://rest.api.bible/v1";

/// Fixed result cap for verse search.
pub const SEARCH_LIMIT: u32 = 100;

/// Key values left over from sample configuration; treated as unset.
pub const API_KEY_PLACEHOLDERS: &[&str] = &["TU_API_KEY_AQUI", "YOUR_API_KEY", "YOUR_API_KEY_HERE"];

const CHAPTER_QUERY: &[(&str, &str)] = &[
    ("content-type", "text"),
    ("include-notes", "false"),
    ("include-titles", "true"),
    ("include-chapter-numbers", "false"),
    ("include-verse-numbers", "true"),
    ("include-verse-spans", "false"),
];

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct SearchData {
    verses: Vec<VerseResult>,
}

/// Which non-200 statuses get their own error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusPolicy {
    Generic,
    Detailed,
}

pub struct BibleApiClient {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    base_url: Url,
    api_key: String,
}

impl BibleApiClient {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(BibliaError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self {
            fetcher,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && !API_KEY_PLACEHOLDERS.contains(&key)
    }

    /// `GET /bibles?language={code}`
    pub async fn list_bibles(&self, language: &str) -> Result<Vec<Bible>> {
        let mut url = self.endpoint(&["bibles"])?;
        url.query_pairs_mut().append_pair("language", language);

        let response = self.get(&url).await?;
        check_status(&response, StatusPolicy::Generic)?;
        decode::<Vec<Bible>>(&response)
    }

    /// `GET /bibles/{bibleId}/books`
    pub async fn list_books(&self, bible_id: &str) -> Result<Vec<Book>> {
        self.require_api_key()?;
        let url = self.endpoint(&["bibles", bible_id, "books"])?;

        let response = self.get(&url).await?;
        check_status(&response, StatusPolicy::Detailed)?;
        decode::<Vec<Book>>(&response)
    }

    /// `GET /bibles/{bibleId}/chapters/{chapterId}` with plain-text content
    /// and verse numbers enabled.
    pub async fn fetch_chapter(&self, bible_id: &str, chapter_id: &str) -> Result<ChapterContent> {
        self.require_api_key()?;
        let mut url = self.endpoint(&["bibles", bible_id, "chapters", chapter_id])?;
        url.query_pairs_mut().extend_pairs(CHAPTER_QUERY);

        let response = self.get(&url).await?;
        check_status(&response, StatusPolicy::Generic)?;
        decode::<ChapterContent>(&response)
    }

    /// `GET /bibles/{bibleId}/search?query=...&limit=100`
    pub async fn search_verses(&self, bible_id: &str, query: &str) -> Result<Vec<VerseResult>> {
        self.require_api_key()?;
        let mut url = self.endpoint(&["bibles", bible_id, "search"])?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("limit", &SEARCH_LIMIT.to_string());

        let response = self.get(&url).await?;
        check_status(&response, StatusPolicy::Generic)?;
        decode::<SearchData>(&response).map(|data| data.verses)
    }

    fn require_api_key(&self) -> Result<()> {
        if self.has_api_key() {
            Ok(())
        } else {
            Err(BibliaError::ApiKeyNotConfigured)
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BibliaError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: &Url) -> Result<FetchResponse> {
        tracing::debug!("GET {}", url);
        let response = self.fetcher.get(url, &self.api_key).await.inspect_err(|e| {
            tracing::warn!("Request to {} failed: {}", url.path(), e);
        })?;
        if !response.is_ok() {
            tracing::warn!("{} returned HTTP {}", url.path(), response.status);
        }
        Ok(response)
    }
}

fn check_status(response: &FetchResponse, policy: StatusPolicy) -> Result<()> {
    match (response.status, policy) {
        (200, _) => Ok(()),
        (401, StatusPolicy::Detailed) => Err(BibliaError::Unauthorized),
        (403, StatusPolicy::Detailed) => Err(BibliaError::Forbidden),
        (404, StatusPolicy::Detailed) => Err(BibliaError::NotFound),
        (status, _) => {
            let body = if response.body.is_empty() {
                "unknown error"
            } else {
                response.body.as_str()
            };
            Err(BibliaError::InvalidResponse(format!("HTTP {}: {}", status, body)))
        }
    }
}

fn decode<T: DeserializeOwned>(response: &FetchResponse) -> Result<T> {
    serde_json::from_str::<Envelope<T>>(&response.body)
        .map(|envelope| envelope.data)
        .map_err(|e| BibliaError::Decoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::mock::MockFetcher;

    const BIBLE_ID: &str = "592420522e16049f-01";

    const BOOKS_JSON: &str = r#"{"data":[{"id":"GEN","name":"Génesis","nameLong":"Génesis","abbreviation":"Gn","chapters":null}]}"#;

    fn client(fetcher: Arc<MockFetcher>, key: &str) -> BibleApiClient {
        BibleApiClient::new(fetcher, DEFAULT_BASE_URL, key).unwrap()
    }

    #[tokio::test]
    async fn test_list_books() {
        let fetcher = Arc::new(MockFetcher::new().route("/books", 200, BOOKS_JSON));
        let books = client(fetcher.clone(), "secret").list_books(BIBLE_ID).await.unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "GEN");

        let requests = fetcher.requests();
        assert_eq!(
            requests[0].0,
            "https://rest.api.bible/v1/bibles/592420522e16049f-01/books"
        );
        assert_eq!(requests[0].1, "secret");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let fetcher = Arc::new(MockFetcher::new().route("/books", 200, BOOKS_JSON));

        for key in ["", "   ", "TU_API_KEY_AQUI", "YOUR_API_KEY"] {
            let client = client(fetcher.clone(), key);
            assert!(matches!(
                client.list_books(BIBLE_ID).await,
                Err(BibliaError::ApiKeyNotConfigured)
            ));
            assert!(matches!(
                client.fetch_chapter(BIBLE_ID, "GEN.1").await,
                Err(BibliaError::ApiKeyNotConfigured)
            ));
            assert!(matches!(
                client.search_verses(BIBLE_ID, "amor").await,
                Err(BibliaError::ApiKeyNotConfigured)
            ));
        }

        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_books_status_classification() {
        let cases: [(u16, fn(&BibliaError) -> bool); 3] = [
            (401, |e| matches!(e, BibliaError::Unauthorized)),
            (403, |e| matches!(e, BibliaError::Forbidden)),
            (404, |e| matches!(e, BibliaError::NotFound)),
        ];

        for (status, expected) in cases {
            let fetcher = Arc::new(MockFetcher::new().route("/books", status, "{}"));
            let err = client(fetcher, "secret").list_books(BIBLE_ID).await.unwrap_err();
            assert!(expected(&err), "status {} gave {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn test_list_books_other_status_keeps_body() {
        let fetcher = Arc::new(MockFetcher::new().route("/books", 500, "upstream exploded"));
        let err = client(fetcher, "secret").list_books(BIBLE_ID).await.unwrap_err();

        match err {
            BibliaError::InvalidResponse(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_books_decode_error() {
        let fetcher = Arc::new(MockFetcher::new().route("/books", 200, r#"{"data":{"id":"GEN"}}"#));
        let err = client(fetcher, "secret").list_books(BIBLE_ID).await.unwrap_err();
        assert!(matches!(err, BibliaError::Decoding(_)));
    }

    #[tokio::test]
    async fn test_list_bibles_sends_language() {
        let body = r#"{"data":[{"id":"b1","name":"Reina Valera 1909","nameLocal":"Reina Valera 1909","abbreviation":"RVR09","abbreviationLocal":"RVR09","description":"Bible","language":{"id":"spa","name":"Spanish"}}]}"#;
        let fetcher = Arc::new(MockFetcher::new().route("/bibles?", 200, body));

        let bibles = client(fetcher.clone(), "").list_bibles("spa").await.unwrap();

        assert_eq!(bibles.len(), 1);
        assert_eq!(bibles[0].language.id, "spa");
        assert_eq!(fetcher.requests()[0].0, "https://rest.api.bible/v1/bibles?language=spa");
    }

    #[tokio::test]
    async fn test_list_bibles_does_not_distinguish_401() {
        let fetcher = Arc::new(MockFetcher::new().route("/bibles", 401, "unauthorized"));
        let err = client(fetcher, "secret").list_bibles("spa").await.unwrap_err();
        assert!(matches!(err, BibliaError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_chapter_query() {
        let body = r#"{"data":{"id":"GEN.1","number":"1","reference":"Genesis 1","content":"<span class=\"v\">1</span>In the beginning","next":{"id":"GEN.2"}}}"#;
        let fetcher = Arc::new(MockFetcher::new().route("/chapters/GEN.1", 200, body));

        let chapter = client(fetcher.clone(), "secret")
            .fetch_chapter(BIBLE_ID, "GEN.1")
            .await
            .unwrap();

        assert_eq!(chapter.id, "GEN.1");
        assert_eq!(chapter.next.unwrap().id, "GEN.2");

        let url = &fetcher.requests()[0].0;
        assert!(url.starts_with("https://rest.api.bible/v1/bibles/592420522e16049f-01/chapters/GEN.1?"));
        assert!(url.contains("content-type=text"));
        assert!(url.contains("include-notes=false"));
        assert!(url.contains("include-titles=true"));
        assert!(url.contains("include-chapter-numbers=false"));
        assert!(url.contains("include-verse-numbers=true"));
        assert!(url.contains("include-verse-spans=false"));
    }

    #[tokio::test]
    async fn test_fetch_chapter_404_is_generic() {
        let fetcher = Arc::new(MockFetcher::new().route("/chapters/", 404, "not here"));
        let err = client(fetcher, "secret")
            .fetch_chapter(BIBLE_ID, "GEN.99")
            .await
            .unwrap_err();
        assert!(matches!(err, BibliaError::InvalidResponse(ref m) if m.contains("not here")));
    }

    #[tokio::test]
    async fn test_search_encodes_query_and_limits() {
        let body = r#"{"data":{"query":"amor de Dios","verses":[{"id":"JHN.3.16","orgId":"JHN.3.16","bookId":"JHN","chapterId":"JHN.3","text":"Porque de tal manera amó Dios","reference":"Juan 3:16"}]}}"#;
        let fetcher = Arc::new(MockFetcher::new().route("/search", 200, body));

        let verses = client(fetcher.clone(), "secret")
            .search_verses(BIBLE_ID, "amor de Dios&más")
            .await
            .unwrap();

        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].chapter_id, "JHN.3");

        let url = Url::parse(&fetcher.requests()[0].0).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "amor de Dios&más".to_string()),
                ("limit".to_string(), "100".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_decode_error() {
        let fetcher = Arc::new(MockFetcher::new().route("/search", 200, r#"{"data":[]}"#));
        let err = client(fetcher, "secret").search_verses(BIBLE_ID, "fe").await.unwrap_err();
        assert!(matches!(err, BibliaError::Decoding(_)));
    }

    #[test]
    fn test_ids_are_path_escaped() {
        let client = client(Arc::new(MockFetcher::new()), "secret");
        let url = client.endpoint(&["bibles", "a/b", "books"]).unwrap();
        assert_eq!(url.as_str(), "https://rest.api.bible/v1/bibles/a%2Fb/books");
    }

    #[test]
    fn test_base_url_with_trailing_slash() {
        let client = BibleApiClient::new(Arc::new(MockFetcher::new()), "https://example.org/v1/", "k").unwrap();
        let url = client.endpoint(&["bibles"]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/v1/bibles");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = BibleApiClient::new(Arc::new(MockFetcher::new()), "not a url", "k");
        assert!(matches!(result, Err(BibliaError::InvalidUrl(_))));
    }
}
