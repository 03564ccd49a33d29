use crate::commands::DictCommands;
use crate::error::CommandError;
use crate::traits::DictionaryHost;
use std::str::FromStr;

/// One command line, `NAME[:ARGUMENT]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictCommand {
    Priority(String),
    Toggle(String),
    Solo(String),
    EndSolo,
}

impl DictCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Priority(_) => "PRIORITY_DICT",
            Self::Toggle(_) => "TOGGLE_DICT",
            Self::Solo(_) => "SOLO_DICT",
            Self::EndSolo => "END_SOLO_DICT",
        }
    }
}

impl FromStr for DictCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, arg) = line.split_once(':').unwrap_or((line, ""));
        let arg = arg.to_string();

        match name.trim().to_ascii_uppercase().as_str() {
            "PRIORITY_DICT" => Ok(Self::Priority(arg)),
            "TOGGLE_DICT" => Ok(Self::Toggle(arg)),
            "SOLO_DICT" => Ok(Self::Solo(arg)),
            "END_SOLO_DICT" => Ok(Self::EndSolo),
            _ => Err(CommandError::UnknownCommand(name.trim().to_string())),
        }
    }
}

impl DictCommands {
    pub fn execute(
        &mut self,
        host: &mut dyn DictionaryHost,
        command: &DictCommand,
    ) -> Result<(), CommandError> {
        log::debug!("dispatching {}", command.name());
        match command {
            DictCommand::Priority(arg) => self.priority_dict(host, arg),
            DictCommand::Toggle(arg) => self.toggle_dict(host, arg),
            DictCommand::Solo(arg) => self.solo_dict(host, arg),
            DictCommand::EndSolo => self.end_solo_dict(host, ""),
        }
    }

    /// Parses and runs one command line.
    pub fn dispatch(
        &mut self,
        host: &mut dyn DictionaryHost,
        line: &str,
    ) -> Result<(), CommandError> {
        let command: DictCommand = line.parse()?;
        self.execute(host, &command)
    }
}
