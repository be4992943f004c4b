//! This crate contains the REST client and everything shared between views
//! that does not depend on the UI: wire models, errors, configuration and the
//! display normalizer.

pub mod config;
pub mod display;
mod error;
pub mod fiat_amount;
pub mod fiat_currency;
pub mod models;
pub mod prefs;

use dioxus_logger::tracing::debug;
use reqwest::Method;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

pub use config::ClientConfig;
pub use error::ApiError;
use models::Ack;
use models::AuthResponse;
use models::BookmarkRequest;
use models::Comment;
use models::CommentRequest;
use models::Credentials;
use models::LikeRequest;
use models::MyRating;
use models::Place;
use models::PlaceId;
use models::PlaceQuery;
use models::RatingRequest;
use models::Stars;
use models::User;

/// Talks to the REST API.
///
/// Cheap to clone. The bearer token is part of the value, so a signed-in
/// client is derived from the anonymous one with [`ApiClient::with_bearer`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            bearer: None,
        }
    }

    pub fn with_bearer(&self, token: Option<String>) -> Self {
        Self {
            bearer: token.filter(|t| !t.is_empty()),
            ..self.clone()
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer.is_some()
    }

    // --- Auth ---

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidInput("name, email and password are required".into()));
        }
        let body = Credentials {
            name: Some(name),
            email,
            password,
        };
        self.send(self.request(Method::POST, "/api/auth/register").json(&body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = Credentials {
            name: None,
            email: email.trim(),
            password,
        };
        self.send(self.request(Method::POST, "/api/auth/login").json(&body))
            .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.send(self.request(Method::GET, "/api/auth/me")).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send::<Ack>(self.request(Method::POST, "/api/auth/logout"))
            .await
            .map(|_| ())
    }

    // --- Places ---

    pub async fn places(&self, query: &PlaceQuery) -> Result<Vec<Place>, ApiError> {
        self.send_list(self.request(Method::GET, "/api/places").query(&query.to_pairs()))
            .await
    }

    pub async fn place(&self, id: PlaceId) -> Result<Place, ApiError> {
        self.send(self.request(Method::GET, &format!("/api/places/{id}")))
            .await
    }

    pub async fn sample_places(&self) -> Result<Vec<Place>, ApiError> {
        let n = self.config.sample_n;
        self.send_list(self.request(Method::GET, "/api/places/sample").query(&[("n", n)]))
            .await
    }

    // --- Recommendations ---

    pub async fn anonymous_recs(&self) -> Result<Vec<Place>, ApiError> {
        let k = self.config.recs_k;
        self.send_list(self.request(Method::GET, "/api/recs/anonymous").query(&[("k", k)]))
            .await
    }

    /// Personalized recommendations. Fails with
    /// [`ApiError::NeedsOnboarding`] until the caller has liked a place.
    pub async fn hybrid_recs(&self) -> Result<Vec<Place>, ApiError> {
        let k = self.config.recs_k;
        self.send_list(self.request(Method::GET, "/api/recs/hybrid").query(&[("k", k)]))
            .await
    }

    /// Records onboarding likes; returns how many ids were accepted.
    pub async fn like_places(&self, place_ids: &[PlaceId]) -> Result<usize, ApiError> {
        if place_ids.is_empty() {
            return Err(ApiError::InvalidInput("select at least one place".into()));
        }
        let ack: Ack = self
            .send(self.request(Method::POST, "/api/onboarding/like").json(&LikeRequest { place_ids }))
            .await?;
        Ok(ack.count.unwrap_or(place_ids.len()))
    }

    // --- Ratings ---

    pub async fn rate(&self, place_id: PlaceId, rating: Stars) -> Result<(), ApiError> {
        self.send::<Ack>(
            self.request(Method::POST, "/api/ratings")
                .json(&RatingRequest { place_id, rating }),
        )
        .await
        .map(|_| ())
    }

    pub async fn my_ratings(&self) -> Result<Vec<MyRating>, ApiError> {
        self.send_list(self.request(Method::GET, "/api/ratings/me")).await
    }

    /// The caller's previous rating of one place, if any.
    pub async fn my_rating_for(&self, place_id: PlaceId) -> Result<Option<Stars>, ApiError> {
        let ratings = self.my_ratings().await?;
        Ok(ratings
            .into_iter()
            .find(|r| r.place_id == place_id)
            .and_then(|r| Stars::nearest(r.rating)))
    }

    // --- Comments ---

    pub async fn comments(&self, place_id: PlaceId) -> Result<Vec<Comment>, ApiError> {
        self.send_list(
            self.request(Method::GET, "/api/comments")
                .query(&[("place_id", place_id)]),
        )
        .await
    }

    pub async fn add_comment(&self, place_id: PlaceId, text: &str) -> Result<(), ApiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::InvalidInput("comment is empty".into()));
        }
        self.send::<Ack>(
            self.request(Method::POST, "/api/comments")
                .json(&CommentRequest { place_id, text }),
        )
        .await
        .map(|_| ())
    }

    // --- Bookmarks ---

    pub async fn bookmarks(&self) -> Result<Vec<Place>, ApiError> {
        self.send_list(self.request(Method::GET, "/api/bookmarks")).await
    }

    /// Returns `true` when the bookmark was already there.
    pub async fn add_bookmark(&self, place_id: PlaceId) -> Result<bool, ApiError> {
        let ack: Ack = self
            .send(self.request(Method::POST, "/api/bookmarks").json(&BookmarkRequest { place_id }))
            .await?;
        Ok(ack.already)
    }

    pub async fn remove_bookmark(&self, place_id: PlaceId) -> Result<(), ApiError> {
        self.send::<Ack>(self.request(Method::DELETE, &format!("/api/bookmarks/{place_id}")))
            .await
            .map(|_| ())
    }

    // --- Plumbing ---

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.url(path));
        match &self.bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            debug!("{} answered {}: {}", url, status, text);
            return Err(ApiError::from_response(status.as_u16(), &text));
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Like `send`, treating a `null` body as an empty list.
    async fn send_list<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>, ApiError> {
        let list: Option<Vec<T>> = self.send(request).await?;
        Ok(list.unwrap_or_default())
    }
}
