//! Plain text resources (`texts/*.txt`), e.g. splashes and end poem.

use super::Resource;
use crate::codec::CodecError;
use crate::key::Identifier;
use crate::path::{path_for, Kind};

/// UTF-8 text file keyed by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    key: Identifier,
    content: String,
}

impl Text {
    pub fn new(key: Identifier, content: impl Into<String>) -> Self {
        Self {
            key,
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.content.as_bytes().to_vec()
    }

    /// Decode a text file; the content must be valid UTF-8.
    pub fn from_bytes(key: Identifier, bytes: &[u8]) -> Result<Self, CodecError> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| CodecError::malformed(format!("text is not valid UTF-8: {}", e)))?;
        Ok(Self::new(key, content))
    }
}

impl Resource for Text {
    type Key = Identifier;
    const LABEL: &'static str = "text";

    fn key(&self) -> &Identifier {
        &self.key
    }

    fn path(&self) -> String {
        path_for(Kind::Text, &self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path() {
        let text = Text::new(Identifier::new("minecraft", "splashes").unwrap(), "hi");
        assert_eq!(text.path(), "assets/minecraft/texts/splashes.txt");
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let key = Identifier::new("minecraft", "end").unwrap();
        assert!(Text::from_bytes(key.clone(), &[0xff, 0xfe]).is_err());
        assert_eq!(Text::from_bytes(key, b"ok").unwrap().content(), "ok");
    }
}
