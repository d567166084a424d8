use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reserved separator of persisted id lists.
pub const ID_DELIMITER: char = ';';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppletIdError {
    #[error("applet id is empty")]
    Empty,

    #[error("applet id {0:?} contains the reserved delimiter ';'")]
    ContainsDelimiter(String),
}

/// Identifier of an applet as handed out by the host.
///
/// Ids are opaque to the panel; the only rules are that they are non-empty
/// and never contain [`ID_DELIMITER`], so that they survive a trip through
/// an [`IdList`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppletId(String);

impl AppletId {
    pub fn new(id: impl Into<String>) -> Result<Self, AppletIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AppletIdError::Empty);
        }
        if id.contains(ID_DELIMITER) {
            return Err(AppletIdError::ContainsDelimiter(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AppletId {
    type Err = AppletIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AppletId {
    type Error = AppletIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for AppletId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered list of applet ids as stored in configuration (`a;b;c`).
///
/// Decoding never fails. Entries that no longer name a live applet, or that
/// were never valid ids, are kept as opaque strings: they simply never match
/// during a restore and disappear on the next save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdList(Vec<String>);

impl IdList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a AppletId>,
    {
        Self(ids.into_iter().map(|id| id.as_str().to_owned()).collect())
    }

    pub fn decode(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        Self(raw.split(ID_DELIMITER).map(str::to_owned).collect())
    }

    pub fn encode(&self) -> String {
        self.0.join(";")
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &AppletId) -> bool {
        self.0.iter().any(|entry| entry == id.as_str())
    }
}

impl Serialize for IdList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for IdList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::decode(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> AppletId {
        AppletId::new(s).expect("valid id")
    }

    #[test]
    fn applet_id_rejects_empty_and_delimiter() {
        assert_eq!(AppletId::new(""), Err(AppletIdError::Empty));
        assert_eq!(
            "a;b".parse::<AppletId>(),
            Err(AppletIdError::ContainsDelimiter("a;b".to_string()))
        );
        assert_eq!(id("42").as_str(), "42");
    }

    #[test]
    fn empty_string_decodes_to_empty_list() {
        assert!(IdList::decode("").is_empty());
        assert_eq!(IdList::new().encode(), "");
    }

    #[test]
    fn stale_entries_survive_decoding() {
        let list = IdList::decode("3;;org.kde.gone;1");
        assert_eq!(list.entries(), &["3", "", "org.kde.gone", "1"]);
        assert!(list.contains(&id("org.kde.gone")));
        assert!(!list.contains(&id("2")));
    }

    #[test]
    fn encodes_in_given_order() {
        let ids = [id("3"), id("1"), id("2")];
        assert_eq!(IdList::from_ids(&ids).encode(), "3;1;2");
    }

    #[test]
    fn serializes_as_joined_string() {
        let list = IdList::decode("7;8");
        assert_eq!(serde_json::to_string(&list).unwrap(), "\"7;8\"");
        let back: IdList = serde_json::from_str("\"7;8\"").unwrap();
        assert_eq!(back, list);
    }
}
