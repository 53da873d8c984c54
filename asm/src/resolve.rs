use arch::Inst;

use crate::{error::Error, label::Labels, parser::Stmt};

// ----------------------------------------------------------------------------
// Pass 1: layout

/// A statement placed at its absolute address.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub addr: u32,
    pub len: u32,
    pub stmt: &'a Stmt,
}

/// One past the highest address.
const ADDR_SPACE: u64 = 1 << 32;

#[derive(Debug)]
pub struct Layout<'a> {
    pub items: Vec<Placed<'a>>,
    pub labels: Labels,
    /// Exclusive end address; reaches `1 << 32` when the image ends at `0xFFFF_FFFF`.
    pub end: u64,
}

/// Assigns every statement its address and collects label definitions.
///
/// Statement sizes never depend on label values, so the addresses assigned
/// here are final.
pub fn layout(stmts: &[Stmt], base: u32) -> Result<Layout<'_>, Error> {
    let init = Layout {
        items: Vec::with_capacity(stmts.len()),
        labels: Labels::new(),
        end: u64::from(base),
    };
    let layout = stmts.iter().try_fold(init, |mut acc, stmt| -> Result<Layout<'_>, Error> {
        let overflow = || Error::AddressOverflow(stmt.pos());
        let addr = u32::try_from(acc.end).map_err(|_| overflow())?;
        let len = stmt.len(addr)?;
        if let Stmt::Label(name, pos) = stmt {
            acc.labels.define(name, *pos, addr)?;
        }
        acc.end = u64::from(addr) + u64::from(len);
        if acc.end > ADDR_SPACE {
            return Err(overflow());
        }
        acc.items.push(Placed { addr, len, stmt });
        Ok(acc)
    })?;
    log::debug!(
        "layout: 0x{:08X}..0x{:08X}, {} labels",
        base,
        layout.end,
        layout.labels.len()
    );
    Ok(layout)
}

// ----------------------------------------------------------------------------
// Pass 2: resolution

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Label(String),
    Inst(Inst),
    Data(Vec<u8>),
    /// Zero padding from `.pos` / `.align`
    Fill(u32),
}

impl Output {
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            Output::Label(_) => vec![],
            Output::Inst(inst) => inst.encode(),
            Output::Data(data) => data.clone(),
            Output::Fill(len) => vec![0; *len as usize],
        }
    }
}

/// A resolved statement at its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub addr: u32,
    pub out: Output,
}

/// Substitutes label references of one placed statement. Depends only on the
/// completed label table, so statements can be resolved in any order.
pub fn resolve(placed: &Placed, labels: &Labels) -> Result<Line, Error> {
    let out = match placed.stmt {
        Stmt::Code(code) => Output::Inst(code.resolve(labels)?),
        Stmt::Label(name, _) => Output::Label(name.clone()),
        Stmt::Origin(..) | Stmt::Align(..) => Output::Fill(placed.len),
        Stmt::Data(width, arg, pos) => Output::Data(width.encode(arg.resolve(labels, *pos)?)),
    };
    Ok(Line {
        addr: placed.addr,
        out,
    })
}

impl Layout<'_> {
    pub fn resolve(&self) -> Result<Vec<Line>, Error> {
        self.items
            .iter()
            .map(|placed| resolve(placed, &self.labels))
            .collect()
    }
}
