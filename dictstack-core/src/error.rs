#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictError {
    #[error("No dictionary matching {fragment:?} found.")]
    NoMatch { fragment: String },

    #[error("Invalid dictionary toggle: {token:?}.")]
    InvalidToggle { token: String },

    #[error("duplicate dictionary path: {path}")]
    DuplicatePath { path: String },
}

impl DictError {
    pub fn no_match(fragment: impl Into<String>) -> Self {
        Self::NoMatch {
            fragment: fragment.into(),
        }
    }

    pub fn invalid_toggle(token: impl Into<String>) -> Self {
        Self::InvalidToggle {
            token: token.into(),
        }
    }
}
