/// A key press observed by the input hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Decoded character(s) for the key, if the platform produced any.
    pub name: Option<String>,
}

impl KeyPress {
    /// True when the decoded name equals `key`.
    pub fn matches(&self, key: &str) -> bool {
        self.name.as_deref() == Some(key)
    }
}
