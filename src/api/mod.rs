mod error;
mod handlers;
mod request_id;
mod server;
mod state;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use request_id::REQUEST_ID_HEADER;
pub use server::{build_router, serve};
pub use state::AppState;
