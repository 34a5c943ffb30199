//! Authentication domain module.

mod model;

pub use model::{AuthResponse, AuthState, Credentials, User};
