// Run configuration - explicit replacement for process-wide flag state

use crate::args::{DistributeArgs, OutputFormat};
use mobydick_core::domain::Visibility;
use mobydick_core::error::{AppError, Result};
use std::fmt;
use std::path::PathBuf;

/// Everything one `distribute` run needs
#[derive(Clone)]
pub struct DistributeConfig {
    pub organisation: String,
    pub token: String,
    pub api_url: Option<String>,
    pub concurrency: usize,
    pub file: PathBuf,
    pub version: String,
    pub private: bool,
    pub dry_run: bool,
    pub output: OutputFormat,
}

impl DistributeConfig {
    /// Missing credentials become empty strings and are rejected by `validate`
    pub fn new(
        organisation: Option<String>,
        token: Option<String>,
        api_url: Option<String>,
        args: DistributeArgs,
    ) -> Self {
        Self {
            organisation: organisation.unwrap_or_default(),
            token: token.unwrap_or_default(),
            api_url: api_url.filter(|url| !url.trim().is_empty()),
            concurrency: args.concurrency,
            file: args.file,
            version: args.workflow_version,
            private: args.private,
            dry_run: args.dry_run,
            output: args.output,
        }
    }

    /// Reject configurations that cannot work before any network activity
    pub fn validate(&self) -> Result<()> {
        if self.organisation.trim().is_empty() {
            return Err(AppError::Config(
                "organisation is required (--organisation or MOBYDICK_ORGANISATION)".to_string(),
            ));
        }
        if self.token.trim().is_empty() {
            return Err(AppError::Config(
                "token is required (--token or GITHUB_TOKEN)".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(AppError::Validation(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.version.trim().is_empty() {
            return Err(AppError::Config("version must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::from_private_flag(self.private)
    }
}

// Keep the token out of logs
impl fmt::Debug for DistributeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributeConfig")
            .field("organisation", &self.organisation)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("concurrency", &self.concurrency)
            .field("file", &self.file)
            .field("version", &self.version)
            .field("private", &self.private)
            .field("dry_run", &self.dry_run)
            .field("output", &self.output)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> DistributeArgs {
        DistributeArgs {
            concurrency: 5,
            file: PathBuf::from("mobydick.yaml"),
            workflow_version: "v1.0.0".to_string(),
            private: false,
            dry_run: false,
            output: OutputFormat::Table,
        }
    }

    fn config() -> DistributeConfig {
        DistributeConfig::new(
            Some("pequod".to_string()),
            Some("secret".to_string()),
            None,
            args(),
        )
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = config();
        config.concurrency = 0;
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_organisation_rejected() {
        let mut config = config();
        config.organisation = "  ".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_blank_token_rejected() {
        let mut config = config();
        config.token = String::new();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_visibility_follows_private_flag() {
        let mut config = config();
        assert_eq!(config.visibility(), Visibility::All);
        config.private = true;
        assert_eq!(config.visibility(), Visibility::Private);
    }

    #[test]
    fn test_blank_api_url_ignored() {
        let config = DistributeConfig::new(
            Some("pequod".to_string()),
            Some("secret".to_string()),
            Some(String::new()),
            args(),
        );
        assert_eq!(config.api_url, None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let config = DistributeConfig::new(None, Some("secret".to_string()), None, args());
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let config = DistributeConfig::new(Some("pequod".to_string()), None, None, args());
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
