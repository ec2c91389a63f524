use crate::config::RunConfig;
use crate::core::{FieldFormat, MalformedCardPolicy};
use crate::domain::model::CurrencySwap;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub transform: TransformConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub on_malformed: Option<MalformedCardPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Start from unpadded, untransliterated values.
    pub clean: Option<bool>,
    pub currency_from: Option<String>,
    pub currency_to: Option<String>,
    pub padding: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    pub output_path: Option<String>,
}

impl TomlConfig {
    /// Load a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the value of the environment variable; unknown
    /// variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn field_format(&self) -> Result<FieldFormat> {
        let transform = &self.transform;
        let mut format = if transform.clean.unwrap_or(false) {
            FieldFormat::clean()
        } else {
            FieldFormat::legacy()
        };

        match (&transform.currency_from, &transform.currency_to) {
            (Some(from), Some(to)) => {
                format.currency = Some(CurrencySwap {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            (None, None) => {}
            _ => {
                return Err(EtlError::ConfigValidationError {
                    field: "transform.currency_from".to_string(),
                    message: "currency_from and currency_to must be set together".to_string(),
                });
            }
        }

        if let Some(padding) = transform.padding {
            format.padding = padding;
        }

        Ok(format)
    }

    /// Overlay the file's values on the built-in defaults.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let format = self.field_format()?;
        let defaults = RunConfig::default();

        Ok(RunConfig {
            url: self.source.url.unwrap_or(defaults.url),
            output_path: self.load.output_path.unwrap_or(defaults.output_path),
            on_malformed: self.extract.on_malformed.unwrap_or(defaults.on_malformed),
            format,
            timeout_seconds: self.source.timeout_seconds,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_run_config()?.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
url = "https://books.toscrape.com/catalogue/page-2.html"
timeout_seconds = 20

[extract]
on_malformed = "skip"

[transform]
currency_from = "£"
currency_to = "GBP "
padding = 1

[load]
output_path = "./out/books.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_run_config()
            .unwrap();

        assert_eq!(config.url, "https://books.toscrape.com/catalogue/page-2.html");
        assert_eq!(config.timeout_seconds, Some(20));
        assert_eq!(config.on_malformed, MalformedCardPolicy::Skip);
        assert_eq!(config.output_path, "./out/books.csv");
        assert_eq!(config.format.padding, 1);
        assert_eq!(
            config.format.currency,
            Some(CurrencySwap {
                from: "£".to_string(),
                to: "GBP ".to_string()
            })
        );
    }

    #[test]
    fn test_empty_file_means_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap().into_run_config().unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_clean_transform() {
        let toml_content = r#"
[transform]
clean = true
"#;
        let config = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_run_config()
            .unwrap();
        assert_eq!(config.format, FieldFormat::clean());
    }

    #[test]
    fn test_half_currency_swap_is_rejected() {
        let toml_content = r#"
[transform]
currency_from = "£"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_padding_is_rejected() {
        let toml_content = r#"
[transform]
padding = 9223372036854775807
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            EtlError::InvalidConfigValueError { ref field, .. } if field == "padding"
        ));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let toml_content = r#"
[source]
endpoint = "https://example.com"
"#;
        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CATALOGUE_ETL_TEST_URL", "https://mirror.example.com/science.html");

        let toml_content = r#"
[source]
url = "${CATALOGUE_ETL_TEST_URL}"

[load]
output_path = "${CATALOGUE_ETL_UNSET_VAR}.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.source.url.as_deref(),
            Some("https://mirror.example.com/science.html")
        );
        assert_eq!(
            config.load.output_path.as_deref(),
            Some("${CATALOGUE_ETL_UNSET_VAR}.csv")
        );

        std::env::remove_var("CATALOGUE_ETL_TEST_URL");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[load]
output_path = "science.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.load.output_path.as_deref(), Some("science.csv"));
    }
}
