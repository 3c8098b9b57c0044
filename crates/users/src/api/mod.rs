mod error;
mod users;

pub use error::{ApiError, ErrorResponse};
pub use users::{build_router, UserApiState};
