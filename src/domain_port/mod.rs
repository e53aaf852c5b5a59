// store

mod session_store;

pub use session_store::*;

// repo

mod account_directory;

pub use account_directory::*;
