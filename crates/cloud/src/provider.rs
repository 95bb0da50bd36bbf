use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use stratus_core::SecureString;

use crate::CloudError;

/// Region and credentials carried by every input record.
///
/// Parsed from the `Key=Value;Key=Value` form:
///
/// ```
/// use stratus_cloud::ProviderParams;
///
/// let params: ProviderParams =
///     "Region=ap-guangzhou;AvailableZone=ap-guangzhou-4;SecretID=AKID;SecretKey=s3cr3t"
///         .parse()
///         .unwrap();
///
/// assert_eq!(params.region, "ap-guangzhou");
/// assert_eq!(params.secret_key.expose(), "s3cr3t");
/// assert!(!format!("{params:?}").contains("s3cr3t"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderParams {
    /// Provider region.
    pub region: String,
    /// Availability zone new resources are placed in.
    pub available_zone: String,
    /// API key id.
    pub secret_id: String,
    /// API key secret.
    pub secret_key: SecureString,
}

impl ProviderParams {
    /// Parse the `Key=Value;...` form.
    ///
    /// An empty string yields all-empty params. Unknown keys are ignored,
    /// empty segments (a trailing `;`) are skipped, and a segment without
    /// `=` is an error.
    pub fn parse(raw: &str) -> Result<Self, CloudError> {
        let mut params = Self::default();
        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let Some((key, value)) = segment.split_once('=') else {
                return Err(CloudError::InvalidProviderParams(format!(
                    "segment `{}` has no `=`",
                    redact(segment)
                )));
            };
            let value = value.trim();
            match key.trim() {
                "Region" => params.region = value.to_owned(),
                "AvailableZone" => params.available_zone = value.to_owned(),
                "SecretID" => params.secret_id = value.to_owned(),
                "SecretKey" => params.secret_key = SecureString::new(value),
                other => tracing::trace!(key = other, "ignoring unknown provider param"),
            }
        }
        Ok(params)
    }

    /// Whether no known key was set.
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
            && self.available_zone.is_empty()
            && self.secret_id.is_empty()
            && self.secret_key.is_empty()
    }
}

/// Deserializes from the `Key=Value;...` string form.
impl<'de> Deserialize<'de> for ProviderParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl FromStr for ProviderParams {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// A malformed segment may be a bare secret.
fn redact(segment: &str) -> String {
    let head: String = segment.chars().take(3).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_string_is_all_empty() {
        let params = ProviderParams::parse("").unwrap();
        assert_eq!(params, ProviderParams::default());
        assert!(params.is_empty());
    }

    #[test]
    fn deserializes_from_string() {
        let params: ProviderParams =
            serde_json::from_str(r#""Region=ap-beijing;SecretKey=k""#).unwrap();
        assert_eq!(params.region, "ap-beijing");
        assert!(!params.is_empty());

        let err = serde_json::from_str::<ProviderParams>(r#""Region""#).unwrap_err();
        assert!(err.to_string().contains("invalid provider params"));
    }

    #[test]
    fn trailing_separator_and_whitespace() {
        let params = ProviderParams::parse(" Region = ap-shanghai ; SecretID=AKID;").unwrap();
        assert_eq!(params.region, "ap-shanghai");
        assert_eq!(params.secret_id, "AKID");
        assert!(params.available_zone.is_empty());
        assert!(params.secret_key.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = ProviderParams::parse("Region=r;Endpoint=cvm.example.com").unwrap();
        assert_eq!(params.region, "r");
    }

    #[test]
    fn value_may_contain_equals() {
        let params = ProviderParams::parse("SecretKey=abc==").unwrap();
        assert_eq!(params.secret_key.expose(), "abc==");
    }

    #[test]
    fn segment_without_separator_is_rejected_without_leaking() {
        let err = ProviderParams::parse("Region=r;supersecretvalue").unwrap_err();
        assert!(matches!(err, CloudError::InvalidProviderParams(_)));
        assert!(!err.to_string().contains("supersecretvalue"));
    }
}
