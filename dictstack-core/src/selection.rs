use crate::error::DictError;

/// Splits a command argument into trimmed, comma-separated selections.
pub fn split_selections(cmdline: &str) -> Vec<String> {
    cmdline.split(',').map(|s| s.trim().to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Enable,
    Disable,
    Invert,
}

impl ToggleAction {
    pub fn from_sigil(sigil: char) -> Option<Self> {
        match sigil {
            '+' => Some(Self::Enable),
            '-' => Some(Self::Disable),
            '!' => Some(Self::Invert),
            _ => None,
        }
    }

    pub fn apply(self, enabled: bool) -> bool {
        match self {
            Self::Enable => true,
            Self::Disable => false,
            Self::Invert => !enabled,
        }
    }
}

/// A path fragment prefixed with a toggle sigil, e.g. `+spanish/main.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSelection {
    pub action: ToggleAction,
    pub fragment: String,
}

impl ToggleSelection {
    pub fn parse(token: &str) -> Result<Self, DictError> {
        let mut chars = token.chars();
        let sigil = chars.next().ok_or_else(|| DictError::invalid_toggle(""))?;
        let action = ToggleAction::from_sigil(sigil)
            .ok_or_else(|| DictError::invalid_toggle(sigil.to_string()))?;

        Ok(Self {
            action,
            fragment: chars.as_str().trim().to_string(),
        })
    }
}

pub fn parse_toggles<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<ToggleSelection>, DictError> {
    tokens
        .iter()
        .map(|t| ToggleSelection::parse(t.as_ref()))
        .collect()
}
