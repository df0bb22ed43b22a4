//! Identifiers of the items exchanged with the task API

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};


/// The identifier of a task, as assigned by the server.
///
/// The API is not consistent about the JSON type of these ids (some endpoints send integers, some send strings).
/// This type accepts both, and always behaves as an opaque string in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Generate a random TaskId, as a mocked server would do
    #[cfg(any(test, feature = "integration_tests"))]
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl From<u64> for TaskId {
    fn from(number: u64) -> Self {
        Self { content: number.to_string() }
    }
}
impl FromStr for TaskId {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Signed(i64),
            Text(String),
        }

        let content = match RawId::deserialize(deserializer)? {
            RawId::Number(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
            RawId::Text(s) => s,
        };
        Ok(TaskId{ content })
    }
}
