pub mod inst;
pub mod op;
pub mod reg;

pub use inst::Inst;
pub use op::{Opcode, Shape};
pub use reg::Reg;
