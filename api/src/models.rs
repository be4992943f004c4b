//! Wire types for the REST API.
//!
//! Everything here is owned by the server; the client only reads these and
//! relays create/delete requests.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::display::price_display_with;
use crate::display::rating_display;
use crate::prefs::display_preference::DisplayPreference;

pub type PlaceId = i64;

/// A place as returned by list, recommendation and detail endpoints.
///
/// Lists key places by `place_id`; the onboarding sample keys them by `id`.
/// Detail-only fields are `None` in lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "place_id", alias = "id")]
    pub id: PlaceId,
    #[serde(default)]
    pub place_name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// A number, a preformatted string, or null.
    #[serde(default)]
    pub price: Value,
    /// When present, already the text to show.
    #[serde(default)]
    pub price_text: Option<String>,
    #[serde(default)]
    pub rating: Value,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub hybrid_score: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub gallery1: Option<String>,
    #[serde(default)]
    pub gallery2: Option<String>,
    #[serde(default)]
    pub gallery3: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
}

impl Place {
    pub fn price_label(&self, preference: &DisplayPreference) -> String {
        match self.price_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => price_display_with(&self.price, preference),
        }
    }

    pub fn rating_label(&self) -> String {
        rating_display(&self.rating)
    }

    /// "City • Category", with dashes for blanks.
    pub fn location_label(&self) -> String {
        format!(
            "{} • {}",
            non_blank(&self.city).unwrap_or("-"),
            non_blank(&self.category).unwrap_or("-")
        )
    }

    /// Gallery images that are actually set, in order.
    pub fn gallery(&self) -> Vec<&str> {
        [&self.gallery1, &self.gallery2, &self.gallery3]
            .into_iter()
            .filter_map(non_blank)
            .collect()
    }

    pub fn image_url(&self) -> Option<&str> {
        non_blank(&self.image)
    }

    pub fn map_link(&self) -> Option<&str> {
        non_blank(&self.map_url)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Query for the place search endpoint. Blank fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaceQuery {
    pub q: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl PlaceQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for (key, value) in [("q", &self.q), ("city", &self.city), ("category", &self.category)] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, v.to_string()));
            }
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Returned by login and register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub place_id: Option<PlaceId>,
    pub text: String,
    /// ISO-8601 timestamp as sent by the server.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Comment {
    /// "2024-05-01 13:45" from "2024-05-01T13:45:10.123456".
    pub fn posted_label(&self) -> String {
        let Some(raw) = self.created_at.as_deref() else {
            return String::new();
        };
        match raw.split_once('T') {
            Some((date, time)) => format!("{} {}", date, time.get(..5).unwrap_or(time)),
            None => raw.to_string(),
        }
    }
}

/// One of the caller's own ratings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MyRating {
    pub place_id: PlaceId,
    pub rating: f64,
}

/// A star rating the server accepts: 1 to 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Stars(u8);

impl Stars {
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// The nearest valid star count for a stored rating.
    pub fn nearest(rating: f64) -> Option<Self> {
        if !rating.is_finite() {
            return None;
        }
        Self::new(rating.round().clamp(0.0, 255.0) as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
    /// Set when a bookmark already existed.
    #[serde(default)]
    pub already: bool,
    /// Number of places liked during onboarding.
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub comment_id: Option<i64>,
}

#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RatingRequest {
    pub place_id: PlaceId,
    pub rating: Stars,
}

#[derive(Serialize)]
pub(crate) struct CommentRequest<'a> {
    pub place_id: PlaceId,
    pub text: &'a str,
}

#[derive(Serialize)]
pub(crate) struct BookmarkRequest {
    pub place_id: PlaceId,
}

#[derive(Serialize)]
pub(crate) struct LikeRequest<'a> {
    pub place_ids: &'a [PlaceId],
}
