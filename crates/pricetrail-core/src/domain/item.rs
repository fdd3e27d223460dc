use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Identifier of a tracked item, exactly as keyed in the snapshot.
///
/// Any key is accepted and kept byte for byte, so `"a"` and `"a "` are two
/// items. Only deriving a chart file name needs a stricter form; see
/// [`ItemId::as_file_stem`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as a file name component.
    ///
    /// Rejects empty ids, `.`/`..`, path separators, NUL and control
    /// characters.
    pub fn as_file_stem(&self) -> Result<&str, ValidationError> {
        let id = self.as_str();
        if id.is_empty() {
            return Err(ValidationError::EmptyItemId);
        }
        if id == "." || id == ".." {
            return Err(ValidationError::ReservedItemId);
        }

        for (index, ch) in id.chars().enumerate() {
            if matches!(ch, '/' | '\\' | '\0') || ch.is_control() {
                return Err(ValidationError::ItemIdInvalidChar { ch, index });
            }
        }

        Ok(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0
    }
}
