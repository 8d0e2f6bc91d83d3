//! Object-storage locators.
//!
//! Locators are strings of the form `scheme://bucket/key...`. They are
//! parsed and validated before any network call; a malformed locator is
//! rejected up front.

use std::fmt;
use thiserror::Error;

/// Errors from locator parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("locator '{0}' is missing a scheme separator")]
    MissingScheme(String),

    #[error("locator '{0}' has an empty bucket")]
    EmptyBucket(String),

    #[error("locator '{0}' has an empty key")]
    EmptyKey(String),
}

/// A parsed object-storage locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    scheme: String,
    bucket: String,
    key: String,
}

impl Locator {
    /// Parse a `scheme://bucket/key...` string.
    pub fn parse(s: &str) -> Result<Self, LocatorError> {
        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| LocatorError::MissingScheme(s.to_string()))?;
        if scheme.is_empty() {
            return Err(LocatorError::MissingScheme(s.to_string()));
        }

        let (bucket, key) = match rest.split_once('/') {
            Some((bucket, key)) => (bucket, key),
            None => (rest, ""),
        };
        if bucket.is_empty() {
            return Err(LocatorError::EmptyBucket(s.to_string()));
        }
        if key.is_empty() {
            return Err(LocatorError::EmptyKey(s.to_string()));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Build the object key for `file_name` under this locator's prefix.
    pub fn object_key(&self, file_name: &str) -> String {
        let prefix = self.key.trim_end_matches('/');
        format!("{}/{}", prefix, file_name)
    }

    /// File-name extension of the key, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.key.rsplit('/').next()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let loc = Locator::parse("s3://media/raw/videos/clip.mp4").unwrap();
        assert_eq!(loc.scheme(), "s3");
        assert_eq!(loc.bucket(), "media");
        assert_eq!(loc.key(), "raw/videos/clip.mp4");
        assert_eq!(loc.extension(), Some("mp4"));
    }

    #[test]
    fn test_parse_missing_scheme() {
        assert_eq!(
            Locator::parse("media/raw/clip.mp4"),
            Err(LocatorError::MissingScheme("media/raw/clip.mp4".into()))
        );
    }

    #[test]
    fn test_parse_empty_bucket() {
        assert!(matches!(
            Locator::parse("s3:///raw/clip.mp4"),
            Err(LocatorError::EmptyBucket(_))
        ));
    }

    #[test]
    fn test_parse_empty_key() {
        assert!(matches!(
            Locator::parse("s3://media"),
            Err(LocatorError::EmptyKey(_))
        ));
        assert!(matches!(
            Locator::parse("s3://media/"),
            Err(LocatorError::EmptyKey(_))
        ));
    }

    #[test]
    fn test_object_key_trailing_slash() {
        let loc = Locator::parse("s3://media/hls/abc/").unwrap();
        assert_eq!(loc.object_key("master.m3u8"), "hls/abc/master.m3u8");

        let loc = Locator::parse("s3://media/hls/abc").unwrap();
        assert_eq!(loc.object_key("master.m3u8"), "hls/abc/master.m3u8");
    }

    #[test]
    fn test_extension_absent() {
        let loc = Locator::parse("s3://media/raw/clip").unwrap();
        assert_eq!(loc.extension(), None);
    }

    #[test]
    fn test_display_round_trip() {
        let s = "s3://media/raw/clip.mp4";
        assert_eq!(Locator::parse(s).unwrap().to_string(), s);
    }
}
