mod assembler;
mod error;
mod label;
pub mod parser;
pub mod resolve;
pub mod scanner;
pub mod token;
pub mod util;

pub use assembler::{assemble, Assembler, Image};
pub use error::Error;
pub use label::Labels;
pub use parser::Parser;
pub use scanner::{parse_with_prefix, Scanner};
