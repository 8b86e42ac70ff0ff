//! Client for the `GlobalView` REST API.
//!
//! [`GlobalviewClient`] performs the HTTP calls. Each domain module adds the
//! assemblers for its endpoints to the client and exposes the pure mappers
//! that turn raw payloads ([`types`]) into `globalview_core` view models.

mod admin;
pub mod auth;
pub mod bi;
pub mod calls;
pub mod campaigns;
pub mod client;
pub mod communication;
pub mod compose;
pub mod error;
pub mod growth;
pub mod investors;
pub mod query;
pub mod search;
mod session;
pub mod types;

pub use auth::{
    decode_identity, resolve_token, AuthCookies, LoginResponse, LoginUser, TokenIdentity,
    LEGACY_TOKEN_COOKIE, TOKEN_COOKIE, TOKEN_ENV_VAR,
};
pub use bi::TrendPeriod;
pub use client::{GlobalviewClient, RequestOptions};
pub use communication::{FollowUpQuery, OwnerFilter, WeeklyStatusUpdate, HEALTH_WINDOWS};
pub use compose::panel_or_default;
pub use error::ClientError;
pub use query::{ListQuery, QueryParams, SortOrder, ViewMode};
pub use search::{SearchDebouncer, DEFAULT_SEARCH_DEBOUNCE};
