use crate::{
    error::Error,
    label::Labels,
    parser::Parser,
    resolve::{layout, Line},
};

/// Result of one assembly run.
#[derive(Debug)]
pub struct Image {
    /// Address of `bytes[0]`.
    pub base: u32,
    pub bytes: Vec<u8>,
    pub labels: Labels,
    pub listing: Vec<Line>,
}

#[derive(Debug, Clone, Default)]
pub struct Assembler {
    base: u32,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler::default()
    }

    /// Address the first byte of the image is loaded at.
    pub fn base(self, base: u32) -> Self {
        Assembler { base }
    }

    /// source -> tokens -> statements -> layout -> resolved lines -> bytes.
    /// The first error aborts the run; no partial image is produced.
    pub fn assemble(&self, src: &str) -> Result<Image, Error> {
        let stmts = Parser::new(src).parse()?;
        let layout = layout(&stmts, self.base)?;
        let listing = layout.resolve()?;

        let bytes: Vec<u8> = listing.iter().flat_map(|line| line.out.bytes()).collect();
        debug_assert_eq!(bytes.len() as u64, layout.end - u64::from(self.base));
        log::debug!("assembled {} bytes", bytes.len());

        Ok(Image {
            base: self.base,
            bytes,
            labels: layout.labels,
            listing,
        })
    }
}

/// Assembles `src` at base address 0 and returns the raw bytes.
pub fn assemble(src: &str) -> Result<Vec<u8>, Error> {
    Assembler::new().assemble(src).map(|image| image.bytes)
}
