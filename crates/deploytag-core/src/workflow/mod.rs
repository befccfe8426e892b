//! Workflow orchestration for deploytag

mod commit_log;
mod guards;
mod release;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use commit_log::*;
pub use guards::*;
pub use release::*;
pub use session::*;
