mod account_directory_mysql;

pub use account_directory_mysql::*;

mod util;
