use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use tokio::time::timeout;

use crate::api::credentials::{bearer_header, AccessToken};
use crate::api::endpoints::{join, Route, Service};
use crate::api::error::ApiError;
use crate::api::reply::Reply;
use crate::config::{Config, ServicesConfig};
use crate::state::Upload;

/// HTTP client bound to the configured backend services.
pub struct ApiClient {
    client: Client,
    services: ServicesConfig,
    request_timeout: Duration,
    page_limit: u32,
}

/// Request body shapes the backend accepts.
enum Payload {
    Empty,
    Json(Value),
    Multipart(Upload),
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(
                config.defaults.connect_timeout_seconds as u64,
            ))
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            client,
            services: config.services.clone(),
            request_timeout: Duration::from_secs(config.defaults.timeout_seconds as u64),
            page_limit: config.defaults.page_limit,
        })
    }

    /// `limit` for paginated list endpoints.
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Identity => &self.services.identity,
            Service::Workshop => &self.services.workshop,
            Service::Community => &self.services.community,
        }
    }

    /// Absolute URL for a route, query included.
    pub fn url(&self, route: &Route) -> Result<Url, ApiError> {
        let raw = join(self.base_url(route.service), &route.path);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !route.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &route.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub async fn get(&self, route: Route, token: Option<&AccessToken>) -> Result<Reply, ApiError> {
        self.send(Method::GET, route, token, Payload::Empty).await
    }

    /// POST with a JSON body, or with no body at all when `body` is `None`.
    pub async fn post(
        &self,
        route: Route,
        token: Option<&AccessToken>,
        body: Option<Value>,
    ) -> Result<Reply, ApiError> {
        let payload = body.map_or(Payload::Empty, Payload::Json);
        self.send(Method::POST, route, token, payload).await
    }

    pub async fn put(
        &self,
        route: Route,
        token: Option<&AccessToken>,
        body: Value,
    ) -> Result<Reply, ApiError> {
        self.send(Method::PUT, route, token, Payload::Json(body)).await
    }

    /// POST a file as the `file` part of a multipart form.
    pub async fn upload(
        &self,
        route: Route,
        token: Option<&AccessToken>,
        upload: Upload,
    ) -> Result<Reply, ApiError> {
        self.send(Method::POST, route, token, Payload::Multipart(upload))
            .await
    }

    async fn send(
        &self,
        method: Method,
        route: Route,
        token: Option<&AccessToken>,
        payload: Payload,
    ) -> Result<Reply, ApiError> {
        let url = self.url(&route)?;
        let mut builder = self.client.request(method.clone(), url.clone());

        if let Some((name, value)) = token.and_then(bearer_header) {
            builder = builder.header(name, value);
        }

        builder = match payload {
            Payload::Empty => builder.header(CONTENT_TYPE, "application/json"),
            Payload::Json(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string()),
            Payload::Multipart(upload) => builder.multipart(multipart_form(upload)?),
        };

        tracing::debug!(method = %method, url = %url, "Sending request");

        match timeout(self.request_timeout, self.execute(builder, &url)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn execute(&self, builder: RequestBuilder, url: &Url) -> Result<Reply, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Connection {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(ApiError::Body)?;
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        tracing::debug!(url = %url, status, has_body = body.is_some(), "Received response");
        Ok(Reply::new(status, body))
    }
}

fn multipart_form(upload: Upload) -> Result<Form, ApiError> {
    let Upload {
        file_name,
        content_type,
        bytes,
    } = upload;
    let mut part = Part::bytes(bytes).file_name(file_name);
    if let Some(mime) = content_type {
        part = part
            .mime_str(&mime)
            .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
    }
    Ok(Form::new().part("file", part))
}
