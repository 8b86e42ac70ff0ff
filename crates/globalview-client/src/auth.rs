//! Bearer-token resolution, auth cookies, and token identity decoding.

use std::collections::HashMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Cookie holding the current bearer token.
pub const TOKEN_COOKIE: &str = "gv_token";
/// Cookie name used by older sessions; still read, and cleared on logout.
pub const LEGACY_TOKEN_COOKIE: &str = "globalview_token";
/// Environment variable holding a static fallback token.
pub const TOKEN_ENV_VAR: &str = "GLOBALVIEW_API_TOKEN";

/// The auth cookies of the current caller.
#[derive(Debug, Clone, Default)]
pub struct AuthCookies {
    values: HashMap<String, String>,
}

impl AuthCookies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `Cookie` request header (`a=1; b=2`). Malformed pairs are
    /// skipped.
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Self {
        let values = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect();
        Self { values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Stores `token` under [`TOKEN_COOKIE`] and returns the matching
    /// `Set-Cookie` header value.
    pub fn store_token(&mut self, token: &str) -> String {
        self.values
            .insert(TOKEN_COOKIE.to_string(), token.to_string());
        format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
    }

    /// Clears both token cookies and returns the `Set-Cookie` header values
    /// that expire them on the client.
    pub fn logout(&mut self) -> [String; 2] {
        self.values.remove(TOKEN_COOKIE);
        self.values.remove(LEGACY_TOKEN_COOKIE);
        [TOKEN_COOKIE, LEGACY_TOKEN_COOKIE].map(|name| format!("{name}=; Path=/; Max-Age=0"))
    }
}

/// Resolves the bearer token: [`TOKEN_COOKIE`], then [`LEGACY_TOKEN_COOKIE`],
/// then the static token from configuration.
#[must_use]
pub fn resolve_token(cookies: &AuthCookies, static_token: Option<&str>) -> Option<String> {
    cookies
        .get(TOKEN_COOKIE)
        .or_else(|| cookies.get(LEGACY_TOKEN_COOKIE))
        .or_else(|| static_token.map(str::trim).filter(|t| !t.is_empty()))
        .map(str::to_string)
}

/// User identity read from a token's payload segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: String,
    pub email: Option<String>,
}

/// Reads the identity claims from a JWT without verifying its signature.
///
/// Only used to pick a default "my follow-ups" filter; any decoding failure
/// yields `None`.
#[must_use]
pub fn decode_identity(token: &str) -> Option<TokenIdentity> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;

    let user_id = ["gvUserId", "userId", "sub"]
        .iter()
        .find_map(|key| match claims.get(*key)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })?;
    let email = claims
        .get("email")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    Some(TokenIdentity { user_id, email })
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: LoginUser,
}
