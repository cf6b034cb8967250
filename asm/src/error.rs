use color_print::cprintln;
use thiserror::Error;

use crate::line::{MAX_IDENT, MAX_LINE};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown expression: `{0}`")]
    UnknownComp(String),

    #[error("Unknown jump condition: `{0}`")]
    UnknownJump(String),

    #[error("Unknown destination: `{0}`")]
    UnknownDest(char),

    #[error("Missing operand after `@`")]
    MissingOperand,

    #[error("Cannot parse `{0}` as number")]
    InvalidLiteral(String),

    #[error("Literal `{0}` does not fit in 15 bits")]
    LiteralOutOfRange(String),

    #[error("Re-defined label: `{name}`")]
    RedefinedLabel { name: String, prev: Option<usize> },

    #[error("Program exceeds the 15-bit instruction address space")]
    ProgramTooLarge,

    #[error("No free memory left for variable `{0}`")]
    AddressSpaceExhausted(String),

    #[error("Identifier truncated to {} characters: `{0}`", MAX_IDENT)]
    IdentTruncated(String),

    #[error("Line truncated to {} bytes", MAX_LINE)]
    LineTruncated,

    #[error("Ignored text after operand: `{0}`")]
    TrailingOperand(String),

    #[error("Label `{0}` contains whitespace and cannot be referenced by `@`")]
    SpaceInLabel(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to serialize symbol table")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
}

/// An error or warning attributed to a source line (0-based).
#[derive(Debug)]
pub struct Diag {
    pub level: Level,
    pub line_idx: usize,
    pub error: Error,
}

impl Diag {
    pub fn error(line_idx: usize, error: Error) -> Self {
        Diag {
            level: Level::Error,
            line_idx,
            error,
        }
    }

    pub fn warn(line_idx: usize, error: Error) -> Self {
        Diag {
            level: Level::Warn,
            line_idx,
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print(&self, file: &str, lines: &[String]) {
        match self.level {
            Level::Error => cprintln!("<red,bold>error</>: {}", self.error),
            Level::Warn => cprintln!("<yellow,bold>warn</>: {}", self.error),
        }
        print_location(file, lines, self.line_idx);

        if let Error::RedefinedLabel {
            prev: Some(prev), ..
        } = &self.error
        {
            cprintln!("<green,bold>note</>: Already defined here");
            print_location(file, lines, *prev);
        }
    }
}

impl std::fmt::Display for Diag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_idx + 1, self.error)
    }
}

fn print_location(file: &str, lines: &[String], line_idx: usize) {
    // line_idx is 0-based, display as 1-based
    let line_num = line_idx + 1;
    cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
    cprintln!("      <blue>|</>");

    let line_content = lines.get(line_idx).map(|s| s.as_str()).unwrap_or("");

    cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
    cprintln!("      <blue>|</>");
}
