use crate::error::{ApiError, NotFound, TransportError, UnexpectedResponse};
use crate::headers::merge_headers;
use crate::settings::ClientSettings;
use anyhow::{anyhow, bail, Context};
use eos_trace_data::{BlockResp, TransactionTraceResp};
use eos_trace_primitives::{BlockNumber, Checksum256};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fmt::{Debug, Formatter};
use tracing::{debug, instrument};


pub const TRACE_API: &str = "trace_api";


/// Client of the node's `/v1/<api>/<endpoint>` JSON RPC.
///
/// Cloning is cheap, clones share the connection pool.
#[derive(Clone)]
pub struct TraceApiClient {
    http: Client,
    base_url: String,
    headers: HeaderMap
}


impl Debug for TraceApiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}


impl TraceApiClient {
    pub fn from_url(base_url: &str) -> anyhow::Result<Self> {
        ClientSettings::default().build(base_url)
    }

    pub fn new(http: Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url).with_context(|| format!("invalid base url - {}", base_url))?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            headers: HeaderMap::new()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers added to every outgoing request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn add_header(&mut self, name: &str, value: &str) -> anyhow::Result<()> {
        let name = HeaderName::try_from(name)
            .with_context(|| format!("invalid header name - {}", name))?;
        let value = HeaderValue::try_from(value)
            .with_context(|| format!("invalid value for header {}", name))?;
        self.headers.append(name, value);
        Ok(())
    }

    pub fn endpoint_url(&self, api: &str, endpoint: &str) -> anyhow::Result<Url> {
        let url = format!("{}/v1/{}/{}", self.base_url, api, endpoint);
        Url::parse(&url).with_context(|| format!("invalid endpoint url - {}", url))
    }

    /// Merges the configured headers into the request, keeping its own ones.
    pub fn apply_headers(&self, req: &mut Request) {
        merge_headers(req.headers_mut(), &self.headers)
    }

    pub fn build_request(&self, url: Url, body: Option<Vec<u8>>) -> anyhow::Result<Request> {
        let mut builder = self.http.post(url);
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }
        let mut req = builder.build()?;
        self.apply_headers(&mut req);
        Ok(req)
    }

    #[instrument(level = "debug", skip_all, err(Debug), fields(
        base_url = %self.base_url,
        api = %api,
        endpoint = %endpoint
    ))]
    pub async fn call<B, R>(
        &self,
        api: &str,
        endpoint: &str,
        body: Option<&B>
    ) -> anyhow::Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned
    {
        let body = body.map(encode_body).transpose()?;
        let url = self.endpoint_url(api, endpoint)?;
        let http_req = self.build_request(url.clone(), body)?;

        debug!("send request");

        let res = self.http.execute(http_req).await.map_err(|source| TransportError {
            url: url.to_string(),
            source
        })?;

        let status = res.status();

        let body = res.bytes().await.map_err(|source| TransportError {
            url: url.to_string(),
            source
        })?;

        debug!(status = status.as_u16(), body_size = body.len(), "got response");

        classify_response(url.as_str(), status, &body)?;

        serde_json::from_slice(&body)
            .with_context(|| format!("failed to parse response from {}", url))
    }

    pub async fn get_block_by_num(&self, num: BlockNumber) -> anyhow::Result<BlockResp> {
        let body = json!({
            "block_num": num.to_string()
        });
        self.call(TRACE_API, "get_block", Some(&body)).await
    }

    pub async fn get_transaction_trace(&self, id: &Checksum256) -> anyhow::Result<TransactionTraceResp> {
        let body = json!({
            "id": id.to_string()
        });
        self.call(TRACE_API, "get_transaction_trace", Some(&body)).await
    }
}


/// Compact JSON, `<`, `>` and `&` are written as is.
pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec(body).context("failed to serialize request body")
}


/// Maps an error status to the error taxonomy, `Ok(())` means the body
/// holds the result.
pub fn classify_response(url: &str, status: StatusCode, body: &[u8]) -> anyhow::Result<()> {
    if status == StatusCode::NOT_FOUND {
        return match serde_json::from_slice::<ApiError>(body) {
            Ok(api_error) => Err(anyhow!(NotFound).context(api_error)),
            Err(_) => Err(anyhow!(NotFound))
        }
    }

    if status.as_u16() > 299 {
        let Ok(api_error) = serde_json::from_slice::<ApiError>(body) else {
            bail!(UnexpectedResponse {
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(body).into_owned()
            })
        };

        // some lookups report missing records as 500
        if api_error.is_unknown_key_error() {
            bail!(NotFound)
        }

        bail!(api_error)
    }

    Ok(())
}
