//! Exit codes for the CLI

use deploytag_core::{ConfigError, DeployError, GitError, GuardViolation};

/// General error
pub const ERROR: i32 = 1;

/// Configuration error, including a missing release tag
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// A pre-deploy guard refused to continue
pub const GUARD_ERROR: i32 = 5;

/// User cancelled
pub const CANCELLED: i32 = 130;

/// Exit code for an error that ended the run
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(deploy) = err.downcast_ref::<DeployError>() {
        return match deploy {
            DeployError::Config(_) => CONFIG_ERROR,
            DeployError::Guard(_) => GUARD_ERROR,
            DeployError::Git(_) => GIT_ERROR,
            DeployError::Cancelled => CANCELLED,
            DeployError::Io(_) => ERROR,
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        CONFIG_ERROR
    } else if err.downcast_ref::<GuardViolation>().is_some() {
        GUARD_ERROR
    } else if err.downcast_ref::<GitError>().is_some() {
        GIT_ERROR
    } else {
        ERROR
    }
}
