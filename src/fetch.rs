use crate::error::FetchError;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Retrieves vote result pages from the parliament site.
///
/// One GET per call, no retries. The timeout bounds the whole exchange.
pub struct VoteSource {
    client: reqwest::Client,
    base_url: Url,
}

impl VoteSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vote-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    // base url with `ID=<id>` appended to whatever query it already has
    pub fn page_url(&self, vote_id: u64) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("ID", &vote_id.to_string());
        url
    }

    /// Fetch the raw HTML of the results page for `vote_id`.
    pub async fn fetch_page(&self, vote_id: u64) -> Result<String, FetchError> {
        let url = self.page_url(vote_id);
        debug!(%url, "Fetching vote page");

        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VOTE_URL;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn id_is_appended_to_existing_query() {
        let source = VoteSource::new(DEFAULT_VOTE_URL, TIMEOUT).unwrap();
        assert_eq!(
            source.page_url(48180).as_str(),
            "https://www.nrsr.sk/web/Default.aspx?sid=schodze/hlasovanie/hlasovanie&ID=48180"
        );
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        assert!(matches!(
            VoteSource::new("not a url", TIMEOUT),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn returns_page_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/web/Default.aspx"))
            .and(query_param("ID", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let source =
            VoteSource::new(&format!("{}/web/Default.aspx?sid=x", server.uri()), TIMEOUT).unwrap();

        assert_eq!(source.fetch_page(7).await.unwrap(), "<html>ok</html>");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let source = VoteSource::new(&server.uri(), TIMEOUT).unwrap();

        match source.fetch_page(1).await {
            Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_request_error() {
        // bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = VoteSource::new(&format!("http://{addr}/"), TIMEOUT).unwrap();

        assert!(matches!(
            source.fetch_page(1).await,
            Err(FetchError::Request(_))
        ));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let source = VoteSource::new(&server.uri(), Duration::from_millis(100)).unwrap();

        match source.fetch_page(1).await {
            Err(FetchError::Request(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
