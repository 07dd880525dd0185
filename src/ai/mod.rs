pub mod evaluation;
pub mod search;
pub mod service;
pub mod mock_service;

pub use evaluation::*;
pub use search::*;
pub use service::*;
pub use mock_service::*;
