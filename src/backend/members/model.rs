use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a member, as assigned by the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MemberId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

// The feed sends ids as strings, but numeric ids are normalised to text too.
impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => MemberId(s),
            RawId::Number(n) => MemberId(n.to_string()),
        })
    }
}

/// The editable columns of a member row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    Name,
    Email,
    Role,
}

impl MemberField {
    pub fn label(&self) -> &'static str {
        match self {
            MemberField::Name => "name",
            MemberField::Email => "email",
            MemberField::Role => "role",
        }
    }

    pub fn next(self) -> Self {
        match self {
            MemberField::Name => MemberField::Email,
            MemberField::Email => MemberField::Role,
            MemberField::Role => MemberField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            MemberField::Name => MemberField::Role,
            MemberField::Email => MemberField::Name,
            MemberField::Role => MemberField::Email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Any other properties the feed sends along; they are searchable too.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Member {
    pub fn new(
        id: impl Into<MemberId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn field(&self, field: MemberField) -> &str {
        match field {
            MemberField::Name => &self.name,
            MemberField::Email => &self.email,
            MemberField::Role => &self.role,
        }
    }

    pub fn set_field(&mut self, field: MemberField, value: String) {
        match field {
            MemberField::Name => self.name = value,
            MemberField::Email => self.email = value,
            MemberField::Role => self.role = value,
        }
    }

    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(needle);
        hit(self.id.as_str())
            || hit(&self.name)
            || hit(&self.email)
            || hit(&self.role)
            || self.extra.values().any(|value| match value {
                serde_json::Value::String(s) => hit(s),
                other => hit(&other.to_string()),
            })
    }
}
