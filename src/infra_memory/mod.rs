mod account_directory_memory;
mod session_store_memory;

pub use account_directory_memory::*;
pub use session_store_memory::*;
