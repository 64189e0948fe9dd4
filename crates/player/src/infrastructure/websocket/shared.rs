//! Helpers shared by the socket client and its tests.

use url::Url;

/// Path of the backend's socket endpoint, relative to the API base
pub const CONNECT_PATH: &str = "/ws/connect";

/// `{base}/ws/connect?user_id={user_id}`
///
/// Any path already on `base` is kept as a prefix.
pub fn session_socket_url(base: &Url, user_id: &str) -> Url {
    let mut url = base.clone();
    let prefix = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{}{}", prefix, CONNECT_PATH));
    url.query_pairs_mut().clear().append_pair("user_id", user_id);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_connect_url_from_root() {
        let base = Url::parse("ws://localhost:8000/").unwrap();
        assert_eq!(
            session_socket_url(&base, "guest-1").as_str(),
            "ws://localhost:8000/ws/connect?user_id=guest-1"
        );
    }

    #[test]
    fn keeps_path_prefix_and_replaces_query() {
        let base = Url::parse("wss://games.example.com/api/?debug=1").unwrap();
        assert_eq!(
            session_socket_url(&base, "alice").as_str(),
            "wss://games.example.com/api/ws/connect?user_id=alice"
        );
    }
}
