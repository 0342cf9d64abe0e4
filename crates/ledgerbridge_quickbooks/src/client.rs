// --- File: crates/ledgerbridge_quickbooks/src/client.rs ---
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use tracing::{debug, info};

use crate::error::QuickBooksError;
use crate::models::InvoiceCreateRequest;

/// Status and raw body of a QuickBooks API call, uninterpreted.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

impl UpstreamResponse {
    /// The body if the status is one of `accepted`, otherwise an
    /// [`QuickBooksError::Upstream`] carrying the raw body.
    pub fn accept(self, accepted: &[StatusCode]) -> Result<String, QuickBooksError> {
        if accepted.contains(&self.status) {
            Ok(self.body)
        } else {
            Err(QuickBooksError::Upstream {
                status: self.status.as_u16(),
                body: self.body,
            })
        }
    }
}

const COMPANY_PATH: &str = "/v3/company";

/// Company endpoint root for a configured base.
///
/// `QBO_BASE` is commonly just the API host, so `/v3/company` is appended
/// unless the base already ends with it.
pub fn company_base_url(api_base: &str) -> String {
    let base = api_base.trim_end_matches('/');
    if base.ends_with(COMPANY_PATH) {
        base.to_string()
    } else {
        format!("{}{}", base, COMPANY_PATH)
    }
}

/// Authenticated access to one QuickBooks company (realm).
#[derive(Debug, Clone)]
pub struct QuickBooksClient {
    http: Client,
    base_url: String,
    access_token: String,
    realm_id: String,
}

impl QuickBooksClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        realm_id: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: company_base_url(&base_url),
            access_token: access_token.into(),
            realm_id: realm_id.into(),
        }
    }

    pub fn realm_id(&self) -> &str {
        &self.realm_id
    }

    fn company_url(&self, resource: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.realm_id, resource)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.access_token)
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, builder: RequestBuilder) -> Result<UpstreamResponse, QuickBooksError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("QuickBooks API response status: {}", status);
        Ok(UpstreamResponse { status, body })
    }

    /// Run a query-language statement against the generic query endpoint.
    pub async fn query(&self, statement: &str) -> Result<UpstreamResponse, QuickBooksError> {
        let url = self.company_url("query");
        info!("QuickBooks query: {}", statement);
        let builder = self
            .request(Method::POST, &url)
            .header(header::CONTENT_TYPE, "application/text")
            .body(statement.to_string());
        self.send(builder).await
    }

    pub async fn get_company_info(&self) -> Result<UpstreamResponse, QuickBooksError> {
        let url = self.company_url(&format!("companyinfo/{}", self.realm_id));
        info!("Fetching company info for realm {}", self.realm_id);
        self.send(self.request(Method::GET, &url)).await
    }

    pub async fn create_invoice(
        &self,
        payload: &InvoiceCreateRequest,
    ) -> Result<UpstreamResponse, QuickBooksError> {
        let url = self.company_url("invoice");
        info!("Creating invoice in realm {}", self.realm_id);
        // .json() sets Content-Type: application/json
        let builder = self.request(Method::POST, &url).json(payload);
        self.send(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_query_posts_raw_statement_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/company/4620816365/query"))
            .and(header_eq("authorization", "Bearer tok"))
            .and(header_eq("content-type", "application/text"))
            .and(header_eq("accept", "application/json"))
            .and(body_string("SELECT * FROM Customer"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = QuickBooksClient::new(
            Client::new(),
            format!("{}/v3/company/", server.uri()),
            "tok",
            "4620816365",
        );
        let response = client.query("SELECT * FROM Customer").await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "{}");
    }

    #[tokio::test]
    async fn test_company_info_path_repeats_realm() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/company/42/companyinfo/42"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"CompanyInfo":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            QuickBooksClient::new(Client::new(), format!("{}/v3/company", server.uri()), "t", "42");
        let response = client.get_company_info().await.unwrap();
        assert_eq!(response.body, r#"{"CompanyInfo":{}}"#);
    }

    #[test]
    fn test_company_base_url_adds_missing_path() {
        assert_eq!(
            company_base_url("https://quickbooks.api.intuit.com"),
            "https://quickbooks.api.intuit.com/v3/company"
        );
        assert_eq!(
            company_base_url("https://quickbooks.api.intuit.com/"),
            "https://quickbooks.api.intuit.com/v3/company"
        );
        assert_eq!(
            company_base_url("https://sandbox-quickbooks.api.intuit.com/v3/company/"),
            "https://sandbox-quickbooks.api.intuit.com/v3/company"
        );
    }

    #[tokio::test]
    async fn test_host_only_base_reaches_company_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/company/42/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = QuickBooksClient::new(Client::new(), server.uri(), "t", "42");
        let response = client.query("SELECT * FROM Item").await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }

    #[test]
    fn test_accept_maps_other_statuses_to_upstream_error() {
        let ok = UpstreamResponse {
            status: StatusCode::CREATED,
            body: "created".into(),
        };
        assert_eq!(
            ok.accept(&[StatusCode::OK, StatusCode::CREATED]).unwrap(),
            "created"
        );

        let failed = UpstreamResponse {
            status: StatusCode::BAD_REQUEST,
            body: "bad".into(),
        };
        match failed.accept(&[StatusCode::OK]) {
            Err(QuickBooksError::Upstream { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
