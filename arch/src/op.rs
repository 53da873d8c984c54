use num_enum::IntoPrimitive;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    #[default]
    NOP = 0x00,
    HALT = 0x10,
    RRMOVL = 0x20,
    IRMOVL = 0x30,
    RMMOVL = 0x40,
    MRMOVL = 0x50,
    ADDL = 0x60,
    SUBL = 0x61,
    ANDL = 0x62,
    XORL = 0x63,
    JMP = 0x70,
    JLE = 0x71,
    JL = 0x72,
    JE = 0x73,
    JNE = 0x74,
    JGE = 0x75,
    JG = 0x76,
    CALL = 0x80,
    RET = 0x90,
    PUSHL = 0xA0,
    POPL = 0xB0,
}

impl Opcode {
    /// Exact, case-sensitive mnemonic lookup.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}

/// Operand shape class. Decides both the source grammar after the mnemonic
/// and the encoded length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `nop`
    Nullary,
    /// `pushl %rA`
    UnaryReg,
    /// `addl %rA, %rB`
    RegPair,
    /// `jmp dest`
    Branch,
    /// `irmovl $V, %rB`
    ImmToReg,
    /// `rmmovl %rA, D(%rB)`
    RegToMem,
    /// `mrmovl D(%rB), %rA`
    MemToReg,
}

impl Shape {
    pub fn len(self) -> u32 {
        use Shape::*;
        match self {
            Nullary => 1,
            UnaryReg | RegPair => 2,
            Branch => 5,
            ImmToReg | RegToMem | MemToReg => 6,
        }
    }
}

impl Opcode {
    pub fn shape(self) -> Shape {
        use Opcode::*;
        match self {
            NOP | HALT | RET => Shape::Nullary,
            PUSHL | POPL => Shape::UnaryReg,
            RRMOVL | ADDL | SUBL | ANDL | XORL => Shape::RegPair,
            JMP | JLE | JL | JE | JNE | JGE | JG | CALL => Shape::Branch,
            IRMOVL => Shape::ImmToReg,
            RMMOVL => Shape::RegToMem,
            MRMOVL => Shape::MemToReg,
        }
    }

    pub fn len(self) -> u32 {
        self.shape().len()
    }
}
