use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
}

/// Where bill pages come from.
#[async_trait::async_trait]
pub trait BillSource: Send + Sync {
    /// Fetch the raw HTML bill page for one reference number.
    async fn fetch_bill_html(&self, reference_number: &str) -> Result<String, FetchError>;
}

/// Fetches bill pages from the utility's public bill site.
///
/// Every call is a fresh `GET`: there is no cache, no retry and no backoff.
/// The whole request (connect, TLS, body) is bounded by `timeout`.
///
/// With `accept_invalid_certs` set, certificate validation toward the bill
/// site is switched off. The site's certificates are regularly expired or
/// served with an incomplete chain, so this is on in the default config.
#[derive(Clone)]
pub struct HttpBillSource {
    client: reqwest::Client,
    base_url: String,
    reference_param: String,
}

impl HttpBillSource {
    pub fn new(
        base_url: &str,
        reference_param: &str,
        timeout: Duration,
        accept_invalid_certs: bool,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            reference_param: reference_param.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl BillSource for HttpBillSource {
    async fn fetch_bill_html(&self, reference_number: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[(self.reference_param.as_str(), reference_number)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "bill site returned non-success status");
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer, timeout: Duration) -> HttpBillSource {
        HttpBillSource::new(
            &format!("{}/general", server.uri()),
            "refno",
            timeout,
            true,
            "bill-client-test",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_sends_reference_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/general"))
            .and(query_param("refno", "04112345678901"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>bill</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let source = source_for(&server, Duration::from_secs(5));
        let html = source.fetch_bill_html("04112345678901").await.unwrap();

        assert_eq!(html, "<html>bill</html>");
    }

    #[tokio::test]
    async fn fetch_maps_server_errors_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = source_for(&server, Duration::from_secs(5));
        let res = source.fetch_bill_html("1").await;

        assert!(matches!(res, Err(FetchError::Status(503))));
    }

    #[tokio::test]
    async fn fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let source = source_for(&server, Duration::from_millis(50));
        let res = source.fetch_bill_html("1").await;

        match res {
            Err(FetchError::Request(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn every_call_hits_the_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(2)
            .mount(&server)
            .await;

        let source = source_for(&server, Duration::from_secs(5));
        source.fetch_bill_html("same").await.unwrap();
        source.fetch_bill_html("same").await.unwrap();
    }
}
