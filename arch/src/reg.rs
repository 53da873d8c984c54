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
pub enum Reg {
    EAX = 0,
    ECX = 1,
    EDX = 2,
    EBX = 3,
    ESP = 4,
    EBP = 5,
    ESI = 6,
    EDI = 7,
    /// Placeholder nibble for instructions that use a single register.
    #[default]
    #[strum(serialize = "no_reg")]
    #[serde(rename = "no_reg")]
    NOREG = 8,
}

impl Reg {
    /// Exact, case-sensitive lookup of a general-purpose register name.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(Reg::NOREG) | Err(_) => Err(format!("Unknown reg name: {s}")),
            Ok(reg) => Ok(reg),
        }
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}

/// Packs two registers into the `rA:rB` byte.
pub fn pack(ra: Reg, rb: Reg) -> u8 {
    ra.code() << 4 | rb.code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn names() {
        assert_eq!(Reg::parse("eax"), Ok(Reg::EAX));
        assert_eq!(Reg::parse("edi"), Ok(Reg::EDI));
        assert_eq!(Reg::EBP.to_string(), "ebp");
        assert_eq!(Reg::NOREG.to_string(), "no_reg");
    }

    #[test]
    fn lookup_is_exact() {
        assert!(Reg::parse("EAX").is_err());
        assert!(Reg::parse("no_reg").is_err());
        assert!(Reg::parse("noreg").is_err());
        assert!(Reg::parse("r8").is_err());
    }

    #[test]
    fn codes_fit_nibble() {
        for (idx, reg) in Reg::iter().enumerate() {
            assert_eq!(reg.code() as usize, idx);
            assert!(reg.code() <= 0xF);
        }
    }

    #[test]
    fn packing() {
        assert_eq!(pack(Reg::EAX, Reg::NOREG), 0x08);
        assert_eq!(pack(Reg::EDX, Reg::ECX), 0x21);
    }
}
