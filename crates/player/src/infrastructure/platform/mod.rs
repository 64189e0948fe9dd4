//! Platform implementations
//!
//! Desktop is the only shipped target; tests use
//! `ports::outbound::testing::MockPlatform`.

mod desktop;

pub use desktop::{create_platform, DesktopPlatform, DesktopStorageProvider};
