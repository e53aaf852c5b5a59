mod account;
mod session;
mod subject;
mod token;

pub use account::*;
pub use session::*;
pub use subject::*;
pub use token::*;
