pub mod builtin;
pub mod loader;

pub use loader::Catalog;
