use std::fmt;

/// Longest host name a session carries (`HOST_NAME_MAX`).
pub const HOST_NAME_MAX: usize = 255;

/// Owned host name bounded to [`HOST_NAME_MAX`] bytes.
///
/// Longer input is truncated at the last character boundary that fits, the
/// way a fixed `HOST_NAME_MAX + 1` buffer would hold it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HostName(String);

impl HostName {
    pub fn new(name: &str) -> Self {
        let mut end = name.len().min(HOST_NAME_MAX);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        Self(name[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for HostName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for HostName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
