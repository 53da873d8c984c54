use crate::token::{Expected, Pos, Token};
use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Syntax error: expected {expected}, found {found}")]
    Syntax { expected: Expected, found: Token },

    #[error("Unknown mnemonic: `{0}`")]
    UnknownMnemonic(String, Pos),

    #[error("Unknown register: `%{0}`")]
    UnknownRegister(String, Pos),

    #[error("Undefined label: `{0}`")]
    UndefinedLabel(String, Pos),

    #[error("Re-defined label: `{name}`")]
    DuplicateLabel { name: String, pos: Pos, first: Pos },

    #[error("Literal out of range: `{0}`")]
    InvalidLiteral(String, Pos),

    #[error("Unknown directive: `.{0}`")]
    UnknownDirective(String, Pos),

    #[error("Alignment must be a power of two: {0}")]
    InvalidAlign(u32, Pos),

    #[error("Cannot move back to 0x{target:08X} from 0x{current:08X}")]
    BackwardPosition { target: u32, current: u32, pos: Pos },

    #[error("Program does not fit in the 32-bit address space")]
    AddressOverflow(Pos),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to serialize symbols")]
    Symbols(#[from] serde_yaml::Error),
}

impl Error {
    /// Source position the error points at, if it came from the source text.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            Error::Syntax { found, .. } => Some(found.pos),
            Error::UnknownMnemonic(_, pos)
            | Error::UnknownRegister(_, pos)
            | Error::UndefinedLabel(_, pos)
            | Error::InvalidLiteral(_, pos)
            | Error::UnknownDirective(_, pos)
            | Error::InvalidAlign(_, pos)
            | Error::AddressOverflow(pos)
            | Error::DuplicateLabel { pos, .. }
            | Error::BackwardPosition { pos, .. } => Some(*pos),
            Error::FileOpen(..) | Error::FileCreate(..) | Error::Symbols(_) => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, src: &str) {
        cprintln!("<red,bold>error</>: {}", self);
        if let Some(pos) = self.pos() {
            print_location(file, src, pos);
        }
        if let Error::DuplicateLabel { first, .. } = self {
            cprintln!("<green,bold>note</>: Already defined here");
            print_location(file, src, *first);
        }
    }
}

fn print_location(file: &str, src: &str, pos: Pos) {
    let line = src.lines().nth(pos.line.saturating_sub(1)).unwrap_or("");
    let pad = " ".repeat(pos.col.saturating_sub(1));
    cprintln!("     <blue>--></> <underline>{}:{}</>", file, pos);
    cprintln!("      <blue>|</>");
    cprintln!(" <blue>{:>4} |</> {}", pos.line, line);
    cprintln!("      <blue>|</> {}<red,bold>^</>", pad);
}
