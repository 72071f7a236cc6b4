use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

/// Permission name: the stable graph key of a capability.
///
/// Names follow the `"<resource>.<verb>"` convention (e.g. `"shift.update"`)
/// but are otherwise opaque. Statically known names borrow, so the built-in
/// dependency table allocates nothing per entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource part of the name (`"shift"` for `"shift.update"`).
    pub fn resource(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((resource, _)) => resource,
            None => &self.0,
        }
    }

    /// Verb part of the name, if the name carries one.
    pub fn verb(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, verb)| verb)
    }
}

// `Cow<str>` hashes and compares like `str`, so map lookups by `&str` are sound.
impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
