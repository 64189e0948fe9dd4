//! Nano Tournament Protocol - wire types for the game backend
//!
//! This crate contains the types exchanged with the backend service:
//! - REST request bodies (`requests`) and response bodies (`responses`)
//! - WebSocket message types (`ServerMessage` inbound, `ClientMessage` outbound)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and chrono
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - raw `String` ids; the player converts at its edges

pub mod messages;
pub mod requests;
pub mod responses;

// =============================================================================
// WebSocket Message Types
// =============================================================================
pub use messages::{ClientMessage, EventKind, ParticipantEntry, ServerMessage};

// =============================================================================
// REST Types
// =============================================================================
pub use requests::{
    CreateSessionRequest, CreateUserRequest, GenerateCharacterRequest, JoinSessionRequest,
    UpdateSessionRequest,
};
pub use responses::{
    BattleResultResponse, ErrorResponse, HealthResponse, SessionResponse, StartRoundResponse,
    UserResponse,
};
