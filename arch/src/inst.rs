use crate::{
    op::Opcode,
    reg::{pack, Reg},
};

use color_print::cformat;

/// A fully resolved instruction. Every address and immediate is concrete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    NOP(),
    HALT(),
    RET(),

    PUSHL(Reg),
    POPL(Reg),

    RRMOVL(Reg, Reg),
    ADDL(Reg, Reg),
    SUBL(Reg, Reg),
    ANDL(Reg, Reg),
    XORL(Reg, Reg),

    JMP(u32),
    JLE(u32),
    JL(u32),
    JE(u32),
    JNE(u32),
    JGE(u32),
    JG(u32),
    CALL(u32),

    // irmovl $V, %rB
    IRMOVL(u32, Reg),
    // rmmovl %rA, D(%rB)
    RMMOVL(Reg, u32, Reg),
    // mrmovl D(%rB), %rA
    MRMOVL(u32, Reg, Reg),
}

impl Inst {
    pub fn opcode(&self) -> Opcode {
        use Opcode::*;
        match self {
            Inst::NOP() => NOP,
            Inst::HALT() => HALT,
            Inst::RET() => RET,
            Inst::PUSHL(_) => PUSHL,
            Inst::POPL(_) => POPL,
            Inst::RRMOVL(..) => RRMOVL,
            Inst::ADDL(..) => ADDL,
            Inst::SUBL(..) => SUBL,
            Inst::ANDL(..) => ANDL,
            Inst::XORL(..) => XORL,
            Inst::JMP(_) => JMP,
            Inst::JLE(_) => JLE,
            Inst::JL(_) => JL,
            Inst::JE(_) => JE,
            Inst::JNE(_) => JNE,
            Inst::JGE(_) => JGE,
            Inst::JG(_) => JG,
            Inst::CALL(_) => CALL,
            Inst::IRMOVL(..) => IRMOVL,
            Inst::RMMOVL(..) => RMMOVL,
            Inst::MRMOVL(..) => MRMOVL,
        }
    }

    pub fn len(&self) -> u32 {
        self.opcode().len()
    }

    /// Splits the instruction into its encoding fields:
    /// the register byte (`rA`, `rB`) and the 32-bit word, where present.
    fn fields(&self) -> (Option<(Reg, Reg)>, Option<u32>) {
        match *self {
            Inst::NOP() | Inst::HALT() | Inst::RET() => (None, None),
            Inst::PUSHL(ra) | Inst::POPL(ra) => (Some((ra, Reg::NOREG)), None),
            Inst::RRMOVL(ra, rb)
            | Inst::ADDL(ra, rb)
            | Inst::SUBL(ra, rb)
            | Inst::ANDL(ra, rb)
            | Inst::XORL(ra, rb) => (Some((ra, rb)), None),
            Inst::JMP(dest)
            | Inst::JLE(dest)
            | Inst::JL(dest)
            | Inst::JE(dest)
            | Inst::JNE(dest)
            | Inst::JGE(dest)
            | Inst::JG(dest)
            | Inst::CALL(dest) => (None, Some(dest)),
            Inst::IRMOVL(val, rb) => (Some((Reg::NOREG, rb)), Some(val)),
            Inst::RMMOVL(ra, disp, rb) => (Some((ra, rb)), Some(disp)),
            Inst::MRMOVL(disp, rb, ra) => (Some((ra, rb)), Some(disp)),
        }
    }

    /// `[opcode][rA:rB]?[word:4 LE]?`
    pub fn encode(&self) -> Vec<u8> {
        let (regs, word) = self.fields();
        let mut bin = Vec::with_capacity(self.len() as usize);
        bin.push(self.opcode().code());
        if let Some((ra, rb)) = regs {
            bin.push(pack(ra, rb));
        }
        if let Some(word) = word {
            bin.extend_from_slice(&word.to_le_bytes());
        }
        bin
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! rr {
            ($name:expr, $ra:expr, $rb:expr) => {
                cformat!("<r>{:<7}</><b>%{}, %{}</>", $name, $ra, $rb)
            };
        }

        macro_rules! dest {
            ($name:expr, $dest:expr) => {
                cformat!("<r>{:<7}</><y>0x{:0>8X}</>", $name, $dest)
            };
        }

        let name = self.opcode().to_string();
        match self {
            Inst::NOP() | Inst::HALT() | Inst::RET() => cformat!("<r>{}</>", name),
            Inst::PUSHL(ra) | Inst::POPL(ra) => cformat!("<r>{:<7}</><b>%{}</>", name, ra),
            Inst::RRMOVL(ra, rb)
            | Inst::ADDL(ra, rb)
            | Inst::SUBL(ra, rb)
            | Inst::ANDL(ra, rb)
            | Inst::XORL(ra, rb) => rr!(name, ra, rb),
            Inst::JMP(dest)
            | Inst::JLE(dest)
            | Inst::JL(dest)
            | Inst::JE(dest)
            | Inst::JNE(dest)
            | Inst::JGE(dest)
            | Inst::JG(dest)
            | Inst::CALL(dest) => dest!(name, dest),
            Inst::IRMOVL(val, rb) => {
                cformat!("<r>{:<7}</><y>$0x{:X}</>, <b>%{}</>", name, val, rb)
            }
            Inst::RMMOVL(ra, disp, rb) => {
                cformat!("<r>{:<7}</><b>%{}</>, <y>0x{:X}</>(<b>%{}</>)", name, ra, disp, rb)
            }
            Inst::MRMOVL(disp, rb, ra) => {
                cformat!("<r>{:<7}</><y>0x{:X}</>(<b>%{}</>), <b>%{}</>", name, disp, rb, ra)
            }
        }
    }
}
