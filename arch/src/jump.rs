use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString};

/// Jump condition of a compute instruction, tested against the ALU output.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum Jump {
    #[default]
    #[strum(to_string = "")]
    Null = 0b000,
    JGT = 0b001,
    JEQ = 0b010,
    JGE = 0b011,
    JLT = 0b100,
    JNE = 0b101,
    JLE = 0b110,
    JMP = 0b111,
}

impl Jump {
    /// Lookup of the text after `;`. An empty jump part means "never jump".
    pub fn parse(s: &str) -> Option<Jump> {
        s.parse().ok()
    }

    /// 3-bit jump code.
    pub fn to_bin(self) -> u8 {
        self.into()
    }

    pub fn from_bin(bin: u8) -> Jump {
        // all 8 codes are defined
        Jump::try_from(bin & 0b111).unwrap_or_default()
    }
}
