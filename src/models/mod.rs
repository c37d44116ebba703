pub mod product;
pub mod catalog;
pub mod cart;
pub mod payment;

// Re-exports
pub use product::*;
pub use catalog::*;
pub use cart::*;
pub use payment::*;
