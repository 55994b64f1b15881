//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for identifiers and values used throughout the
//! workflow. Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// Remote identifiers
// ============================================================================

/// Google Drive file identifier
///
/// Drive assigns opaque ids consisting of alphanumerics, hyphens and
/// underscores, e.g. "1aBcD3FgHiJkLmNoPqRsTuVwXyZ".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileId(String);

impl FileId {
    /// Create a new FileId
    ///
    /// # Errors
    /// Returns `DomainError::InvalidFileId` if the id is empty or contains
    /// characters outside the Drive id alphabet
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.is_empty() {
            return Err(DomainError::InvalidFileId(
                "File ID cannot be empty".to_string(),
            ));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidFileId(format!(
                "File ID contains invalid characters: {id}"
            )));
        }

        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for FileId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FileId> for String {
    fn from(id: FileId) -> Self {
        id.0
    }
}

/// Listing continuation token (opaque string)
///
/// Returned by the files listing as `nextPageToken`. The token is opaque -
/// we don't validate its contents, only that it's non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageToken(String);

impl PageToken {
    /// Create a new PageToken
    ///
    /// # Errors
    /// Returns error if the token is empty
    pub fn new(token: String) -> Result<Self, DomainError> {
        if token.is_empty() {
            return Err(DomainError::InvalidPageToken(
                "Page token cannot be empty".to_string(),
            ));
        }

        Ok(Self(token))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PageToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for PageToken {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PageToken> for String {
    fn from(token: PageToken) -> Self {
        token.0
    }
}

// ============================================================================
// Page size
// ============================================================================

/// Validated listing page size
///
/// The Drive files listing accepts page sizes between 1 and 1000.
/// The workflow default is 10, matching the upstream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    /// Largest page size the backend accepts
    pub const MAX: u32 = 1000;

    /// Create a new PageSize
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPageSize` if outside 1..=1000
    pub fn new(size: u32) -> Result<Self, DomainError> {
        if size == 0 || size > Self::MAX {
            return Err(DomainError::InvalidPageSize(size));
        }
        Ok(Self(size))
    }

    /// Get the inner value
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = DomainError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

// ============================================================================
// Email
// ============================================================================

/// Validated email address
///
/// Performs basic structural validation: exactly one `@`, a non-empty local
/// part, and a non-empty domain containing at least one dot. Stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new validated Email
    ///
    /// # Errors
    /// Returns `DomainError::InvalidEmail` if the format is invalid
    pub fn new(email: String) -> Result<Self, DomainError> {
        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| DomainError::InvalidEmail(format!("missing '@': {email}")))?;

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::InvalidEmail(format!(
                "empty local part or domain: {email}"
            )));
        }

        if domain.contains('@') {
            return Err(DomainError::InvalidEmail(format!(
                "multiple '@' characters: {email}"
            )));
        }

        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(DomainError::InvalidEmail(format!(
                "malformed domain: {email}"
            )));
        }

        Ok(Self(email.to_lowercase()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod file_id_tests {
        use super::*;

        #[test]
        fn test_valid_id() {
            let id = FileId::new("1aBcD3FgHiJkLmNoPqRsTuVwXyZ_-".to_string()).unwrap();
            assert_eq!(id.as_str(), "1aBcD3FgHiJkLmNoPqRsTuVwXyZ_-");
        }

        #[test]
        fn test_empty_fails() {
            assert!(FileId::new(String::new()).is_err());
        }

        #[test]
        fn test_invalid_chars_fails() {
            assert!(FileId::new("bad/id".to_string()).is_err());
            assert!(FileId::new("bad id".to_string()).is_err());
        }

        #[test]
        fn test_serde_roundtrip() {
            let id = FileId::new("abc123".to_string()).unwrap();
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"abc123\"");
            let parsed: FileId = serde_json::from_str(&json).unwrap();
            assert_eq!(id, parsed);
        }
    }

    mod page_token_tests {
        use super::*;

        #[test]
        fn test_valid_token() {
            let token = PageToken::new("~!!~AI9FV7RnSp...".to_string()).unwrap();
            assert!(!token.as_str().is_empty());
        }

        #[test]
        fn test_empty_fails() {
            assert!(PageToken::new(String::new()).is_err());
        }

        #[test]
        fn test_serde_roundtrip() {
            let token = PageToken::new("next-page-token".to_string()).unwrap();
            let json = serde_json::to_string(&token).unwrap();
            let parsed: PageToken = serde_json::from_str(&json).unwrap();
            assert_eq!(token, parsed);
        }
    }

    mod page_size_tests {
        use super::*;

        #[test]
        fn test_default_is_ten() {
            assert_eq!(PageSize::default().get(), 10);
        }

        #[test]
        fn test_bounds() {
            assert!(PageSize::new(1).is_ok());
            assert!(PageSize::new(1000).is_ok());
            assert!(PageSize::new(0).is_err());
            assert!(PageSize::new(1001).is_err());
        }

        #[test]
        fn test_serde_rejects_out_of_range() {
            let result: Result<PageSize, _> = serde_json::from_str("0");
            assert!(result.is_err());

            let size: PageSize = serde_json::from_str("25").unwrap();
            assert_eq!(size.get(), 25);
        }
    }

    mod email_tests {
        use super::*;

        #[test]
        fn test_valid_email() {
            let email = Email::new("user@example.com".to_string()).unwrap();
            assert_eq!(email.as_str(), "user@example.com");
        }

        #[test]
        fn test_case_normalization() {
            let email = Email::new("User@EXAMPLE.COM".to_string()).unwrap();
            assert_eq!(email.as_str(), "user@example.com");
        }

        #[test]
        fn test_no_at_fails() {
            assert!(Email::new("userexample.com".to_string()).is_err());
        }

        #[test]
        fn test_multiple_at_fails() {
            assert!(Email::new("user@name@example.com".to_string()).is_err());
        }

        #[test]
        fn test_no_domain_dot_fails() {
            assert!(Email::new("user@localhost".to_string()).is_err());
        }

        #[test]
        fn test_empty_parts_fail() {
            assert!(Email::new("@example.com".to_string()).is_err());
            assert!(Email::new("user@".to_string()).is_err());
            assert!(Email::new("user@example..com".to_string()).is_err());
        }
    }
}
