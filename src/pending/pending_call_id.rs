use std::fmt;

/// Identifies one in-flight call: the `(name, key)` pair of its packets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingCallId {
    pub name: String,
    pub key: String,
}

impl PendingCallId {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Formats as `name:key`, the form used in diagnostics.
impl fmt::Display for PendingCallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.key)
    }
}
