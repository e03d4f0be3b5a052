use crate::client::TraceApiClient;
use crate::headers::merge_headers;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONNECTION};
use reqwest::Client;
use std::time::Duration;


/// Transport and header configuration of a [TraceApiClient].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    connect_timeout: Duration,
    tls_handshake_timeout: Duration,
    tcp_keepalive: Duration,
    pool_idle_timeout: Duration,
    request_timeout: Option<Duration>,
    keep_alive: bool,
    env_proxy: bool,
    headers: HeaderMap
}


impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            tls_handshake_timeout: Duration::from_secs(10),
            tcp_keepalive: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            request_timeout: None,
            // nodeos does not support persistent connections
            keep_alive: false,
            env_proxy: true,
            headers: HeaderMap::new()
        }
    }
}


impl ClientSettings {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_tls_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.tls_handshake_timeout = timeout;
        self
    }

    pub fn with_tcp_keepalive(mut self, interval: Duration) -> Self {
        self.tcp_keepalive = interval;
        self
    }

    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_keep_alive(mut self, yes: bool) -> Self {
        self.keep_alive = yes;
        self
    }

    /// Whether to honor `HTTP_PROXY` and friends.
    pub fn with_env_proxy(mut self, yes: bool) -> Self {
        self.env_proxy = yes;
        self
    }

    /// Adds a header to every outgoing request. Repeated names accumulate.
    pub fn with_header(mut self, name: &str, value: &str) -> anyhow::Result<Self> {
        let name = HeaderName::try_from(name)
            .with_context(|| format!("invalid header name - {}", name))?;
        let value = HeaderValue::try_from(value)
            .with_context(|| format!("invalid value for header {}", name))?;
        self.headers.append(name, value);
        Ok(self)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    pub fn http_client(&self) -> anyhow::Result<Client> {
        // reqwest bounds TCP connect and TLS handshake with a single timeout
        let mut builder = Client::builder()
            .connect_timeout(self.connect_timeout + self.tls_handshake_timeout)
            .tcp_keepalive(self.tcp_keepalive)
            .pool_idle_timeout(self.pool_idle_timeout)
            .gzip(true);

        if !self.keep_alive {
            let mut default_headers = HeaderMap::new();
            default_headers.insert(CONNECTION, HeaderValue::from_static("close"));
            builder = builder
                .pool_max_idle_per_host(0)
                .default_headers(default_headers);
        }

        if !self.env_proxy {
            builder = builder.no_proxy();
        }

        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().context("failed to build http client")
    }

    pub fn build(&self, base_url: &str) -> anyhow::Result<TraceApiClient> {
        let mut client = TraceApiClient::new(self.http_client()?, base_url)?;
        merge_headers(client.headers_mut(), &self.headers);
        Ok(client)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = ClientSettings::default();
        assert!(!settings.keep_alive());
        assert!(settings.headers().is_empty());
        assert!(settings.http_client().is_ok());
    }

    #[test]
    fn headers_accumulate() {
        let settings = ClientSettings::default()
            .with_header("X-Trace", "1").unwrap()
            .with_header("x-trace", "2").unwrap();

        let values: Vec<_> = settings.headers().get_all("x-trace").iter().collect();
        assert_eq!(values, ["1", "2"]);

        assert!(ClientSettings::default().with_header("bad header", "1").is_err());
        assert!(ClientSettings::default().with_header("x-ok", "bad\nvalue").is_err());
    }

    #[test]
    fn build_applies_headers() {
        let client = ClientSettings::default()
            .with_keep_alive(true)
            .with_request_timeout(Duration::from_secs(5))
            .with_header("x-api-key", "secret").unwrap()
            .build("http://localhost:8888/")
            .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8888");
        assert_eq!(client.headers().get("x-api-key").unwrap(), "secret");
    }
}
