use bimap::BiMap;
use once_cell::sync::Lazy;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// ALU expression of a compute instruction.
///
/// Mnemonics are written with `A` as the second operand; the `M` forms share
/// the same control code and differ only in the source selector bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
pub enum Comp {
    #[strum(to_string = "0")]
    Zero,
    #[strum(to_string = "1")]
    One,
    #[strum(to_string = "-1")]
    NegOne,
    #[strum(to_string = "D")]
    D,
    #[strum(to_string = "A")]
    A,
    #[strum(to_string = "!D")]
    NotD,
    #[strum(to_string = "!A")]
    NotA,
    #[strum(to_string = "-D")]
    NegD,
    #[strum(to_string = "-A")]
    NegA,
    #[strum(to_string = "D+1")]
    IncD,
    #[strum(to_string = "A+1")]
    IncA,
    #[strum(to_string = "D-1")]
    DecD,
    #[strum(to_string = "A-1")]
    DecA,
    #[strum(to_string = "D+A")]
    DPlusA,
    #[strum(to_string = "D-A")]
    DMinusA,
    #[strum(to_string = "A-D")]
    AMinusD,
    #[strum(to_string = "D&A")]
    DAndA,
    #[strum(to_string = "D|A")]
    DOrA,
}

static COMP_BIN: Lazy<BiMap<Comp, u8>> =
    Lazy::new(|| Comp::iter().map(|comp| (comp, comp.to_bin())).collect());

impl Comp {
    /// Exact-match lookup of a normalized expression (`M` already replaced by `A`).
    pub fn parse(s: &str) -> Option<Comp> {
        s.parse().ok()
    }

    /// 6-bit ALU control code.
    pub fn to_bin(self) -> u8 {
        match self {
            Comp::Zero => 0b101010,
            Comp::One => 0b111111,
            Comp::NegOne => 0b111010,
            Comp::D => 0b001100,
            Comp::A => 0b110000,
            Comp::NotD => 0b001101,
            Comp::NotA => 0b110001,
            Comp::NegD => 0b001111,
            Comp::NegA => 0b110011,
            Comp::IncD => 0b011111,
            Comp::IncA => 0b110111,
            Comp::DecD => 0b001110,
            Comp::DecA => 0b110010,
            Comp::DPlusA => 0b000010,
            Comp::DMinusA => 0b010011,
            Comp::AMinusD => 0b000111,
            Comp::DAndA => 0b000000,
            Comp::DOrA => 0b010101,
        }
    }

    pub fn from_bin(bin: u8) -> Option<Comp> {
        COMP_BIN.get_by_right(&(bin & 0b111111)).copied()
    }
}
