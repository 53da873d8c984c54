use arch::{op::Shape, Inst, Opcode, Reg};
use std::fmt;

use crate::{
    error::Error,
    label::Labels,
    scanner::Scanner,
    token::{Expected, Pos, Token, TokenKind},
};

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// mnemonic operands...
    Code(Code),
    /// name:
    Label(String, Pos),
    /// .pos 0x100
    Origin(u32, Pos),
    /// .align 4
    Align(u32, Pos),
    /// .long / .word / .byte
    Data(Width, Arg, Pos),
}

impl Stmt {
    pub fn pos(&self) -> Pos {
        match self {
            Stmt::Code(code) => code.pos,
            Stmt::Label(_, pos)
            | Stmt::Origin(_, pos)
            | Stmt::Align(_, pos)
            | Stmt::Data(_, _, pos) => *pos,
        }
    }

    /// Bytes the statement occupies when placed at `offset`.
    pub fn len(&self, offset: u32) -> Result<u32, Error> {
        match self {
            Stmt::Code(code) => Ok(code.op.len()),
            Stmt::Label(..) => Ok(0),
            Stmt::Origin(target, pos) => {
                target
                    .checked_sub(offset)
                    .ok_or(Error::BackwardPosition {
                        target: *target,
                        current: offset,
                        pos: *pos,
                    })
            }
            Stmt::Align(align, _) => {
                let offset = u64::from(offset);
                let mask = u64::from(align - 1);
                let aligned = (offset + mask) & !mask;
                Ok((aligned - offset) as u32)
            }
            Stmt::Data(width, _, _) => Ok(width.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
    Long,
}

impl Width {
    pub fn len(self) -> u32 {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
            Width::Long => 4,
        }
    }

    fn max(self) -> u32 {
        match self {
            Width::Byte => u8::MAX as u32,
            Width::Word => u16::MAX as u32,
            Width::Long => u32::MAX,
        }
    }

    pub fn encode(self, val: u32) -> Vec<u8> {
        val.to_le_bytes()[..self.len() as usize].to_vec()
    }
}

// ----------------------------------------------------------------------------
// Operation

/// One parsed instruction. `ra`/`rb` are the two register nibbles of the
/// encoding, `Reg::NOREG` where the shape leaves them unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub op: Opcode,
    pub ra: Reg,
    pub rb: Reg,
    pub arg: Arg,
    pub pos: Pos,
}

impl Code {
    pub fn new(op: Opcode, pos: Pos) -> Self {
        Code {
            op,
            ra: Reg::NOREG,
            rb: Reg::NOREG,
            arg: Arg::None,
            pos,
        }
    }

    fn regs(self, ra: Reg, rb: Reg) -> Self {
        Code { ra, rb, ..self }
    }

    fn arg(self, arg: Arg) -> Self {
        Code { arg, ..self }
    }
}

impl Code {
    pub fn resolve(&self, labels: &Labels) -> Result<Inst, Error> {
        let (ra, rb) = (self.ra, self.rb);
        let word = || self.arg.resolve(labels, self.pos);
        match self.op {
            Opcode::NOP => Ok(Inst::NOP()),
            Opcode::HALT => Ok(Inst::HALT()),
            Opcode::RET => Ok(Inst::RET()),
            Opcode::PUSHL => Ok(Inst::PUSHL(ra)),
            Opcode::POPL => Ok(Inst::POPL(ra)),
            Opcode::RRMOVL => Ok(Inst::RRMOVL(ra, rb)),
            Opcode::ADDL => Ok(Inst::ADDL(ra, rb)),
            Opcode::SUBL => Ok(Inst::SUBL(ra, rb)),
            Opcode::ANDL => Ok(Inst::ANDL(ra, rb)),
            Opcode::XORL => Ok(Inst::XORL(ra, rb)),
            Opcode::JMP => Ok(Inst::JMP(word()?)),
            Opcode::JLE => Ok(Inst::JLE(word()?)),
            Opcode::JL => Ok(Inst::JL(word()?)),
            Opcode::JE => Ok(Inst::JE(word()?)),
            Opcode::JNE => Ok(Inst::JNE(word()?)),
            Opcode::JGE => Ok(Inst::JGE(word()?)),
            Opcode::JG => Ok(Inst::JG(word()?)),
            Opcode::CALL => Ok(Inst::CALL(word()?)),
            Opcode::IRMOVL => Ok(Inst::IRMOVL(word()?, rb)),
            Opcode::RMMOVL => Ok(Inst::RMMOVL(ra, word()?, rb)),
            Opcode::MRMOVL => Ok(Inst::MRMOVL(word()?, rb, ra)),
        }
    }
}

// ----------------------------------------------------------------------------
// Operand

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    None,
    Imm(Imm),
    Label(String),
}

impl Arg {
    pub fn resolve(&self, labels: &Labels, pos: Pos) -> Result<u32, Error> {
        match self {
            Arg::None => Ok(0),
            Arg::Imm(imm) => Ok(imm.value),
            Arg::Label(name) => {
                let addr = labels
                    .get(name)
                    .ok_or_else(|| Error::UndefinedLabel(name.clone(), pos))?;
                log::trace!("{}: `{}` -> 0x{:08X}", pos, name, addr);
                Ok(addr)
            }
        }
    }
}

/// Literal value together with the base it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Imm {
    pub value: u32,
    pub radix: u32,
}

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.radix {
            16 => write!(f, "0x{:x}", self.value),
            8 => write!(f, "0o{:o}", self.value),
            2 => write!(f, "0b{:b}", self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}

// ----------------------------------------------------------------------------
// Parser

/// Recursive-descent parser over a [`Scanner`]. Stops at the first error.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Parser {
            scanner: Scanner::new(src),
        }
    }

    pub fn parse(mut self) -> Result<Vec<Stmt>, Error> {
        let mut stmts = Vec::new();
        while self.scanner.peek().kind != TokenKind::Eof {
            stmts.push(self.stmt()?);
        }
        log::debug!("parsed {} statements", stmts.len());
        Ok(stmts)
    }
}

// Helpers
impl Parser<'_> {
    /// Next token must be of `kind`
    fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        let token = self.scanner.next();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(Error::Syntax {
                expected: Expected::Kind(kind),
                found: token,
            })
        }
    }

    /// `%name`
    fn reg(&mut self) -> Result<Reg, Error> {
        self.expect(TokenKind::Percent)?;
        let name = self.expect(TokenKind::Ident)?;
        Reg::parse(&name.text).map_err(|_| Error::UnknownRegister(name.text, name.pos))
    }

    /// Integer literal in any base
    fn imm(&mut self) -> Result<Imm, Error> {
        let token = self.scanner.next();
        match (token.kind.radix(), token.value()) {
            (Some(radix), Some(value)) => Ok(Imm { value, radix }),
            (Some(_), None) => Err(Error::InvalidLiteral(token.text, token.pos)),
            (None, _) => Err(Error::Syntax {
                expected: Expected::Literal,
                found: token,
            }),
        }
    }

    /// `D(%rB)`
    fn mem(&mut self) -> Result<(Imm, Reg), Error> {
        let disp = self.imm()?;
        self.expect(TokenKind::LParen)?;
        let base = self.reg()?;
        self.expect(TokenKind::RParen)?;
        Ok((disp, base))
    }
}

// Grammar
impl Parser<'_> {
    fn stmt(&mut self) -> Result<Stmt, Error> {
        let head = self.scanner.next();
        match head.kind {
            TokenKind::Dot => self.directive(head.pos),
            TokenKind::Ident => {
                if self.scanner.peek().kind == TokenKind::Colon {
                    self.scanner.next();
                    Ok(Stmt::Label(head.text, head.pos))
                } else {
                    self.code(head).map(Stmt::Code)
                }
            }
            _ => Err(Error::Syntax {
                expected: Expected::Statement,
                found: head,
            }),
        }
    }

    fn code(&mut self, mnemonic: Token) -> Result<Code, Error> {
        let op = Opcode::parse(&mnemonic.text)
            .map_err(|_| Error::UnknownMnemonic(mnemonic.text.clone(), mnemonic.pos))?;
        let code = Code::new(op, mnemonic.pos);

        match op.shape() {
            Shape::Nullary => Ok(code),
            Shape::UnaryReg => {
                let ra = self.reg()?;
                Ok(code.regs(ra, Reg::NOREG))
            }
            Shape::RegPair => {
                let ra = self.reg()?;
                self.expect(TokenKind::Comma)?;
                let rb = self.reg()?;
                Ok(code.regs(ra, rb))
            }
            Shape::Branch => {
                let dest = self.expect(TokenKind::Ident)?;
                Ok(code.arg(Arg::Label(dest.text)))
            }
            Shape::ImmToReg => {
                self.expect(TokenKind::Dollar)?;
                let imm = self.imm()?;
                self.expect(TokenKind::Comma)?;
                let rb = self.reg()?;
                Ok(code.regs(Reg::NOREG, rb).arg(Arg::Imm(imm)))
            }
            Shape::RegToMem => {
                let ra = self.reg()?;
                self.expect(TokenKind::Comma)?;
                let (disp, rb) = self.mem()?;
                Ok(code.regs(ra, rb).arg(Arg::Imm(disp)))
            }
            Shape::MemToReg => {
                let (disp, rb) = self.mem()?;
                self.expect(TokenKind::Comma)?;
                let ra = self.reg()?;
                Ok(code.regs(ra, rb).arg(Arg::Imm(disp)))
            }
        }
    }

    fn directive(&mut self, pos: Pos) -> Result<Stmt, Error> {
        let name = self.expect(TokenKind::Ident)?;
        match name.text.as_str() {
            "pos" => Ok(Stmt::Origin(self.imm()?.value, pos)),
            "align" => {
                let align = self.imm()?.value;
                if !align.is_power_of_two() {
                    return Err(Error::InvalidAlign(align, pos));
                }
                Ok(Stmt::Align(align, pos))
            }
            "long" => {
                let arg = match self.scanner.peek().kind {
                    TokenKind::Ident => Arg::Label(self.scanner.next().text),
                    _ => Arg::Imm(self.imm()?),
                };
                Ok(Stmt::Data(Width::Long, arg, pos))
            }
            "word" => self.data(Width::Word, pos),
            "byte" => self.data(Width::Byte, pos),
            _ => Err(Error::UnknownDirective(name.text, name.pos)),
        }
    }

    fn data(&mut self, width: Width, pos: Pos) -> Result<Stmt, Error> {
        let at = self.scanner.peek().pos;
        let imm = self.imm()?;
        if imm.value > width.max() {
            return Err(Error::InvalidLiteral(imm.to_string(), at));
        }
        Ok(Stmt::Data(width, Arg::Imm(imm), pos))
    }
}
