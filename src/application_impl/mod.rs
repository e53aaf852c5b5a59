mod account_service_impl;
mod argon2_hasher;
mod jwt_codec;
mod session_manager;

pub use account_service_impl::*;
pub use argon2_hasher::*;
pub use jwt_codec::*;
pub use session_manager::*;
