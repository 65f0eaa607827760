use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A page title: one or more ASCII letters or digits.
///
/// Titles double as file names, so anything that reaches the page store has
/// been through [`Title::parse`] first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Title(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid page title: {0:?}")]
pub struct InvalidTitle(pub String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, InvalidTitle> {
        if Self::is_valid(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidTitle(raw.to_string()))
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the file holding this page's body
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.0)
    }

    pub fn view_path(&self) -> String {
        format!("/view/{}", self.0)
    }

    pub fn edit_path(&self) -> String {
        format!("/edit/{}", self.0)
    }
}

impl FromStr for Title {
    type Err = InvalidTitle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
