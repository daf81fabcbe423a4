use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Guardrail evaluation and tracing demo", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Evaluate text against the guardrail service without tracing (default)
    Check {
        /// Text to evaluate as both prompt and response
        text: Vec<String>,
    },
    /// Evaluate text and export the call as a trace
    Trace {
        /// Prompt text to evaluate
        text: Vec<String>,
    },
    /// Run a guarded chat round trip through OpenAI
    Chat {
        /// Prompt to send to the model
        text: Vec<String>,
    },
}

impl Cli {
    /// The selected command, `check` when none was given.
    pub fn command(self) -> Command {
        self.command
            .unwrap_or(Command::Check { text: Vec::new() })
    }
}

impl Command {
    /// Free text joined back into one string, `None` when nothing was passed.
    pub fn text(&self) -> Option<String> {
        let words = match self {
            Command::Check { text } | Command::Trace { text } | Command::Chat { text } => text,
        };
        (!words.is_empty()).then(|| words.join(" "))
    }
}
