use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "projects[0].name")
    pub field_path: String,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// No `projects` list was configured; the subsystem must not start.
    #[error("`i18nHelper.projects` not found!")]
    MissingProjects,

    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings wrapped in the client's configuration section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    /// The `i18nHelper` section
    pub i18n_helper: HelperSettings,
}

/// Settings of the translation helper.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelperSettings {
    /// Translation projects, looked up in this order.
    ///
    /// `None` means the user never configured any, which keeps the
    /// localization subsystem from starting.
    pub projects: Option<Vec<ProjectConfig>>,

    /// Treat a dotted key as one literal top-level key instead of a path.
    pub flatten: bool,
}

/// A named directory holding one translation file per locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Unique project name, shown as the hover table header.
    pub name: String,
    /// Root directory, relative to the workspace root.
    pub path: String,
}

impl ProjectConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

impl HelperSettings {
    /// Returns the configured projects.
    ///
    /// # Errors
    /// `ConfigError::MissingProjects` when no project list was configured.
    pub fn projects(&self) -> Result<&[ProjectConfig], ConfigError> {
        self.projects.as_deref().ok_or(ConfigError::MissingProjects)
    }

    /// # Errors
    /// - Project name or path is empty
    /// - Project name is used twice
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let Some(projects) = &self.projects else {
            return Ok(());
        };

        let mut seen = HashSet::new();
        for (index, project) in projects.iter().enumerate() {
            if project.name.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("projects[{index}].name"),
                    "The project name cannot be empty. Example: \"app\"",
                ));
            } else if !seen.insert(project.name.as_str()) {
                errors.push(ValidationError::new(
                    format!("projects[{index}].name"),
                    format!("Duplicate project name '{}'. Project names must be unique", project.name),
                ));
            }

            if project.path.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("projects[{index}].path"),
                    "The project path cannot be empty. Example: \"i18n/app\"",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn settings_with(projects: Vec<ProjectConfig>) -> HelperSettings {
        HelperSettings { projects: Some(projects), ..HelperSettings::default() }
    }

    #[rstest]
    fn validate_valid_settings() {
        let settings = settings_with(vec![
            ProjectConfig::new("app", "i18n/app"),
            ProjectConfig::new("admin", "i18n/admin"),
        ]);

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: HelperSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings.projects, none());
        assert_that!(settings.flatten, eq(false));
    }

    #[rstest]
    fn deserialize_full_settings() {
        let json = r#"{"projects": [{"name": "app", "path": "i18n/app"}], "flatten": true}"#;

        let settings: HelperSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.flatten, eq(true));
        assert_that!(
            settings.projects.unwrap(),
            elements_are![all![
                field!(ProjectConfig.name, eq("app")),
                field!(ProjectConfig.path, eq("i18n/app"))
            ]]
        );
    }

    #[rstest]
    fn deserialize_wrapped_settings() {
        let json = r#"{"i18nHelper": {"projects": [], "flatten": false}}"#;

        let wrapped: ServerSettings = serde_json::from_str(json).unwrap();

        assert_that!(wrapped.i18n_helper.projects, some(is_empty()));
    }

    #[rstest]
    fn projects_missing_is_configuration_error() {
        let settings = HelperSettings::default();

        let result = settings.projects();

        assert!(matches!(result, Err(ConfigError::MissingProjects)));
        assert_that!(
            ConfigError::MissingProjects.to_string(),
            eq("`i18nHelper.projects` not found!")
        );
    }

    #[rstest]
    #[case::empty_name(ProjectConfig::new("", "i18n/app"), "projects[0].name", "cannot be empty")]
    #[case::blank_name(ProjectConfig::new("  ", "i18n/app"), "projects[0].name", "cannot be empty")]
    #[case::empty_path(ProjectConfig::new("app", ""), "projects[0].path", "cannot be empty")]
    fn validate_invalid_project(
        #[case] project: ProjectConfig,
        #[case] field_path: &str,
        #[case] message: &str,
    ) {
        let result = settings_with(vec![project]).validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq(field_path)),
                field!(ValidationError.message, contains_substring(message))
            ]])
        );
    }

    #[rstest]
    fn validate_duplicate_project_name() {
        let settings = settings_with(vec![
            ProjectConfig::new("app", "i18n/app"),
            ProjectConfig::new("app", "i18n/other"),
        ]);

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("projects[1].name")),
                field!(ValidationError.message, contains_substring("Duplicate project name 'app'"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = settings_with(vec![ProjectConfig::new("", "")]);

        let errors = settings.validate().unwrap_err();
        let error_message = ConfigError::ValidationErrors(errors).to_string();

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. projects[0].name"));
        assert_that!(error_message, contains_substring("2. projects[0].path"));
    }
}
