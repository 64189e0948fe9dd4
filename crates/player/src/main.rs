//! Nano Tournament Player - composition root binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nanotour_player::infrastructure::http_client::ApiAdapter;
use nanotour_player::infrastructure::platform::create_platform;
use nanotour_player::infrastructure::websocket::DesktopGameConnection;
use nanotour_player::ports::outbound::{ApiPort, GameConnectionPort, PlatformPort};
use nanotour_player::ui::presentation::assets::PLAYER_CSS;
use nanotour_player::{PlayerConfig, UiServices};

fn main() {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nanotour_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Nano Tournament Player");

    let config = match PlayerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(api = %config.api_base(), "Backend configured");

    let api: Arc<dyn ApiPort> = Arc::new(ApiAdapter::from_config(&config));
    let connection: Arc<dyn GameConnectionPort> =
        Arc::new(DesktopGameConnection::from_config(&config));
    let platform: Arc<dyn PlatformPort> = Arc::new(create_platform());

    let head = format!("<style>{}</style>", PLAYER_CSS);
    let cfg = dioxus_desktop::Config::new()
        .with_custom_head(head)
        .with_window(dioxus_desktop::WindowBuilder::new().with_title("Nano Tournament"));

    dioxus::LaunchBuilder::new()
        .with_cfg(cfg)
        .with_context(UiServices::new(api, connection, platform, config.timings))
        .launch(nanotour_player::app);
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
