//! Gateway-injected identity headers extractor.

use std::collections::HashSet;

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

/// Verified caller identity injected by the gateway via the
/// `x-crewdir-external-id`, `x-crewdir-username`, and `x-crewdir-roles`
/// headers after token verification.
///
/// Returns 401 if the external id or username is absent or empty, or the
/// roles header is missing entirely. Role and relationship enforcement
/// (403) happens after actor resolution, not here.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Identity-provider subject. Stable across sessions.
    pub external_id: String,
    /// Preferred username as reported by the identity provider.
    pub username: String,
    /// Raw role claim set. Unrecognized claims are carried but ignored.
    pub roles: HashSet<String>,
}

impl Principal {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

fn required_header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn parse_roles(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async
    // fn`), and precise capturing makes `async fn` trip E0195 here. Extract
    // values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let external_id = required_header(parts, "x-crewdir-external-id");
        let username = required_header(parts, "x-crewdir-username");
        let roles = parts
            .headers
            .get("x-crewdir-roles")
            .and_then(|v| v.to_str().ok())
            .map(parse_roles);

        async move {
            let external_id = external_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let username = username.ok_or(StatusCode::UNAUTHORIZED)?;
            let roles = roles.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                external_id,
                username,
                roles,
            })
        }
    }
}
