//! Operation layer mirroring the wire contracts: typed request/response
//! shapes plus the functions an HTTP transport would route to. The crate
//! deliberately ships no router; any transport can serialize these.

pub mod duplicates;
pub mod files;
pub mod types;

pub use duplicates::detect;
pub use files::{copy_file, delete_batch, list_contents, upload};
pub use types::*;
