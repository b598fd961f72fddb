pub mod error;
pub mod install;
pub mod probe;
pub mod process;
pub mod tool;

pub use error::InstallError;
pub use tool::{Tool, ToolId};

#[cfg(test)]
pub(crate) mod testing;
