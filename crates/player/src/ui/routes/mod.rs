//! Router definition
//!
//! `/` is the landing screen. Everything under `/battle/` is the session
//! screen; the first path segment names the session.

use dioxus::prelude::*;

use nanotour_domain::SessionId;

mod battle;
mod landing;

pub use battle::BattleRoute;
pub use landing::LandingRoute;

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    LandingRoute {},
    #[route("/battle/:..segments")]
    BattleRoute { segments: Vec<String> },
}

impl Route {
    pub fn battle(session_id: &SessionId) -> Self {
        Route::BattleRoute {
            segments: vec![session_id.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::battle_path;

    #[test]
    fn battle_route_renders_its_path() {
        let id = SessionId::new("ABC123").unwrap();
        assert_eq!(Route::battle(&id).to_string(), battle_path(&id));
    }

    #[test]
    fn battle_route_parses_extra_segments() {
        let route: Route = "/battle/ABC123/extra".parse().unwrap();
        let Route::BattleRoute { segments } = route else {
            panic!("expected battle route");
        };
        assert_eq!(
            SessionId::from_route_segments(&segments).map(|id| id.to_string()),
            Some("ABC123".to_string())
        );
    }
}
