pub mod error;
pub mod render;
pub mod report;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
