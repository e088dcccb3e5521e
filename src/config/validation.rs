use thiserror::Error;

use super::models::Config;
use crate::handlers::BUILTIN_HANDLERS;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("[handlers.{name}] does not reference a built-in handler (known: {known})")]
    UnknownHandler { name: String, known: String },

    #[error("tmp_dir must not be empty")]
    EmptyTmpDir,

    #[error("extractor.binary must not be empty")]
    EmptyExtractorBinary,

    #[error("extractor.max_filesize must be positive")]
    ZeroSizeCeiling,

    #[error("delivery.channel_capacity must be positive")]
    ZeroChannelCapacity,
}

/// Cross-field validation run once at startup, after all sources merge.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.tmp_dir.as_os_str().is_empty() {
        return Err(ValidationError::EmptyTmpDir);
    }

    if config.extractor.binary.as_os_str().is_empty() {
        return Err(ValidationError::EmptyExtractorBinary);
    }

    if config.extractor.max_filesize.as_u64() == 0 {
        return Err(ValidationError::ZeroSizeCeiling);
    }

    if config.delivery.channel_capacity == 0 {
        return Err(ValidationError::ZeroChannelCapacity);
    }

    // A [handlers.<name>] section for a handler this build does not ship is
    // a typo we refuse to ignore: the override would silently never apply.
    for name in config.handlers.keys() {
        if !BUILTIN_HANDLERS.contains(&name.as_str()) {
            return Err(ValidationError::UnknownHandler {
                name: name.clone(),
                known: BUILTIN_HANDLERS.join(", "),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_handler_section() {
        let mut config = Config::default();
        config.set_handler_weight("instagram_carousel", 400);

        let result = validate(&config);
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::UnknownHandler { name, .. } if name == "instagram_carousel"
        ));
    }

    #[test]
    fn test_accepts_known_handler_section() {
        let mut config = Config::default();
        config.set_handler_weight("instagram_single", 400);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_zero_limits() {
        let mut config = Config::default();
        config.extractor.max_filesize = crate::humanize::ByteSize(0);
        assert!(matches!(
            validate(&config).unwrap_err(),
            ValidationError::ZeroSizeCeiling
        ));

        let mut config = Config::default();
        config.delivery.channel_capacity = 0;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ValidationError::ZeroChannelCapacity
        ));
    }
}
