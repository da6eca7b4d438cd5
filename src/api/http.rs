use crate::api::models::{
    BookingCreate, BookingCreated, ChatRequest, LoginRequest, RestaurantSettings, SlotsResponse,
    TokenResponse,
};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::Session;
use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

/// Thin typed wrapper over the CRM REST API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Extracts FastAPI-style `{"detail": ...}` text, falling back to the raw body.
fn detail_from_body(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        detail: detail_from_body(&body),
    })
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.bearer_auth(session.token())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .timeout(self.request_timeout)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let token: TokenResponse = check(response).await?.json().await?;
        Ok(Session::new(token.access_token))
    }

    pub async fn fetch_slots(
        &self,
        session: &Session,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<SlotsResponse, ApiError> {
        let path = format!("/bookings/{restaurant_id}/{}", date.format("%Y-%m-%d"));
        let response = self
            .authorized(self.client.get(self.url(&path)), session)
            .timeout(self.request_timeout)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn create_booking(
        &self,
        session: &Session,
        booking: &BookingCreate,
    ) -> Result<BookingCreated, ApiError> {
        let response = self
            .authorized(self.client.post(self.url("/bookings")), session)
            .timeout(self.request_timeout)
            .json(booking)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn fetch_settings(
        &self,
        session: &Session,
        restaurant_id: i64,
    ) -> Result<RestaurantSettings, ApiError> {
        let path = format!("/restaurants/{restaurant_id}/settings");
        let response = self
            .authorized(self.client.get(self.url(&path)), session)
            .timeout(self.request_timeout)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update_settings(
        &self,
        session: &Session,
        restaurant_id: i64,
        settings: &RestaurantSettings,
    ) -> Result<RestaurantSettings, ApiError> {
        let path = format!("/restaurants/{restaurant_id}/settings");
        let response = self
            .authorized(self.client.put(self.url(&path)), session)
            .timeout(self.request_timeout)
            .json(settings)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Opens the assistant event stream. No overall timeout: the body stays
    /// open for as long as the assistant keeps producing text.
    pub async fn open_chat_stream(
        &self,
        session: &Session,
        request: &ChatRequest,
    ) -> Result<Response, ApiError> {
        let response = self
            .authorized(self.client.post(self.url("/assistants/chat_stream")), session)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await?;
        check(response).await
    }
}
