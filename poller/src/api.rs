use std::{future::Future, net::IpAddr, time::Duration};

use anyhow::Context;
use growboard_common::{Config, DeviceListResponse};
use reqwest::{header::HeaderValue, Client, Url};
use thiserror::Error;

pub const DEVICE_LIST_PATH: &str = "/api/user/devInfoListAll";
/// User agent of the vendor's Android app.
pub const CLIENT_USER_AGENT: &str = "okhttp/3.10.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("device list request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode device list: {0}")]
    Decode(#[from] serde_json::Error),
}

pub trait TelemetrySource {
    fn fetch(&self) -> impl Future<Output = Result<DeviceListResponse, FetchError>>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    url: Url,
    token: HeaderValue,
}

impl ApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let endpoint = format!("{}{DEVICE_LIST_PATH}", config.api_base);
        let url = Url::parse_with_params(&endpoint, &[("userId", config.token.as_str())])
            .with_context(|| format!("invalid api_base: {}", config.api_base))?;

        let mut token =
            HeaderValue::from_str(&config.token).context("token is not a valid header value")?;
        token.set_sensitive(true);

        let mut builder = Client::builder()
            .user_agent(CLIENT_USER_AGENT)
            .timeout(REQUEST_TIMEOUT);
        if is_loopback(&url) {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("failed to build http client")?;

        Ok(Self { client, url, token })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn fetch_devices(&self) -> Result<DeviceListResponse, FetchError> {
        let response = self
            .client
            .post(self.url.clone())
            .header("token", self.token.clone())
            .body("")
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl TelemetrySource for ApiClient {
    fn fetch(&self) -> impl Future<Output = Result<DeviceListResponse, FetchError>> {
        self.fetch_devices()
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}
