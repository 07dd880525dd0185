pub mod game_session;
pub mod orchestrator;

pub use game_session::*;
pub use orchestrator::*;
