//! API middleware.

mod access;

pub use access::{access_middleware, is_gated_path, sign_in_url, CurrentUser};
