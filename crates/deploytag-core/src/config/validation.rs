//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::template::TagTemplate;

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_naming(config)?;
    validate_display(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_naming(config: &Config) -> Result<()> {
    TagTemplate::parse(&config.tag_template)?;

    let non_empty = [
        ("tag_prefix", config.tag_prefix.as_deref()),
        ("stage", config.stage.as_deref()),
        ("tag", config.tag.as_deref()),
        ("branch", config.branch.as_deref()),
        ("from_tag", config.from_tag.as_deref()),
        ("repository", config.repository.as_deref()),
        ("from_prefix", Some(config.from_prefix.as_str())),
    ];
    for (field, value) in non_empty {
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_display(config: &Config) -> Result<()> {
    if config.show_tags_count == 0 {
        return Err(ConfigError::InvalidValue {
            field: "show_tags_count".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    Ok(())
}
