use super::envelope::Envelope;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use tinylink_core::{Alias, ShortenParams};
use tinylink_shortener::validate_url;

/// Body of `POST /url`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

impl SaveUrlRequest {
    /// Checks the request fields in order: url presence, url validity, then
    /// alias. A missing, `null` or empty alias asks for a generated one.
    pub fn into_params(self) -> Result<ShortenParams, AppError> {
        let url = match self.url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(AppError::MissingUrl),
        };
        validate_url(&url).map_err(|_| AppError::InvalidUrl)?;

        let alias = match self.alias {
            Some(alias) if !alias.is_empty() => {
                Some(Alias::new(alias).map_err(|_| AppError::InvalidAlias)?)
            }
            _ => None,
        };

        Ok(ShortenParams { url, alias })
    }
}

/// Envelope plus the alias an operation acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub alias: String,
}

impl AliasResponse {
    pub fn ok(alias: &Alias) -> Self {
        Self {
            envelope: Envelope::ok(),
            alias: alias.to_string(),
        }
    }
}
