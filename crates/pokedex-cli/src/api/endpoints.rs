//! API endpoint paths
//!
//! Helper functions to construct endpoint paths relative to the server URL.
//! The relative form is what errors report as the failing endpoint.

/// Build list endpoint path
pub fn list_path(limit: u32, offset: u32) -> String {
    format!("/pokemon?limit={}&offset={}", limit, offset)
}

/// Build by-id endpoint path
pub fn by_id_path(id: u32) -> String {
    format!("/pokemon/{}", id)
}

/// Build by-name endpoint path; the name must already be normalized
pub fn by_name_path(name: &str) -> String {
    format!("/pokemon/name/{}", urlencoding::encode(name))
}

/// Build search endpoint path
pub fn search_path(query: &str, limit: u32, offset: u32) -> String {
    format!(
        "/pokemon/search?q={}&limit={}&offset={}",
        urlencoding::encode(query),
        limit,
        offset
    )
}

/// Join the server URL and an endpoint path
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
