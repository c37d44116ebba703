pub mod args;
pub mod commands;
pub mod session;

pub use args::*;
pub use commands::*;
pub use session::*;
