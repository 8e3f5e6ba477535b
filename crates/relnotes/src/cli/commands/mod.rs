//! CLI commands

mod completions;
mod generate;
mod init;
mod presets;

pub use completions::CompletionsCommand;
pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use presets::PresetsCommand;
