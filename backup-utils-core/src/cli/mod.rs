pub mod config;
pub mod logs;
pub mod notify;
pub mod stats;

/// How a command finished, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The viewer found no candidate log file.
    NoLogFiles,
    /// Statistics found no record inside the window.
    NoRecords,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::NoLogFiles | Outcome::NoRecords => 1,
        }
    }
}
