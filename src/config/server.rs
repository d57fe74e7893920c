use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use validator::{Validate, ValidateError};

use super::ParseError;
use crate::util::figment::FigmentErrorAttachable;
use crate::util::validator::IntoValidatorReport;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub db: super::Database,
    #[serde(default)]
    pub logging: super::Logging,
}

impl Validate for Server {
    fn validate(&self) -> std::result::Result<(), ValidateError> {
        let db = self.db.validate().err();
        ValidateError::field_builder()
            .insert("db", db.unwrap_or_else(|| ValidateError::msg_builder().build()))
            .build()
            .into_result()
    }
}

impl Server {
    /// Loads `.env`, the configuration file and the environment,
    /// then validates the result.
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &figment::Figment) -> Result<Self, ParseError> {
        let config = figment
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ParseError)?;

        Ok(config)
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "usergraph.toml";

    pub(crate) fn figment() -> figment::Figment {
        use figment::providers::{Env, Format, Toml};
        use figment::Figment;

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "db.primary.url".into()),
            )
            // underscores inside field names cannot be told apart from
            // the nesting separator, so they are mapped by hand
            .merge(Env::prefixed("USERGRAPH_").map(|v| match v.as_str() {
                "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
                "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),
                "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),
                _ => v.as_str().replace('_', ".").into(),
            }))
    }
}
