use crate::{comp::Comp, dest::Dest, jump::Jump, mem::ADDR_MAX};

use color_print::cformat;
use std::fmt::Display;

/// Second ALU operand: the A register or the memory word it points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Src {
    #[default]
    A,
    M,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    /// `0vvv vvvv vvvv vvvv`
    Addr(u16),
    /// `111a cccc ccdd djjj`
    Comp {
        src: Src,
        comp: Comp,
        dest: Dest,
        jump: Jump,
    },
}

impl Inst {
    const COMP_PREFIX: u16 = 0b111 << 13;

    pub fn to_bin(&self) -> u16 {
        match self {
            Inst::Addr(val) => val & ADDR_MAX,
            Inst::Comp {
                src,
                comp,
                dest,
                jump,
            } => {
                let a = match src {
                    Src::A => 0,
                    Src::M => 1,
                };
                Inst::COMP_PREFIX
                    | a << 12
                    | (comp.to_bin() as u16) << 6
                    | (dest.to_bin() as u16) << 3
                    | jump.to_bin() as u16
            }
        }
    }

    /// Decodes a word. Fails on compute words whose ALU code has no mnemonic.
    pub fn from_bin(bin: u16) -> Option<Inst> {
        if bin & 0x8000 == 0 {
            return Some(Inst::Addr(bin));
        }
        let src = if bin & (1 << 12) == 0 { Src::A } else { Src::M };
        let comp = Comp::from_bin((bin >> 6) as u8 & 0b111111)?;
        let dest = Dest::from_bin((bin >> 3) as u8 & 0b111);
        let jump = Jump::from_bin(bin as u8 & 0b111);
        Some(Inst::Comp {
            src,
            comp,
            dest,
            jump,
        })
    }

    /// `0000000000000010` style text used in `.hack` files.
    pub fn to_bin_str(&self) -> String {
        format!("{:016b}", self.to_bin())
    }

    fn comp_text(src: Src, comp: Comp) -> String {
        match src {
            Src::A => comp.to_string(),
            Src::M => comp.to_string().replace('A', "M"),
        }
    }

    pub fn cformat(&self) -> String {
        match self {
            Inst::Addr(val) => cformat!("<r>@</><y>{}</>", val),
            Inst::Comp {
                src,
                comp,
                dest,
                jump,
            } => {
                let dest = if dest.is_empty() {
                    String::new()
                } else {
                    cformat!("<b>{}</>=", dest)
                };
                let jump = match jump {
                    Jump::Null => String::new(),
                    _ => cformat!(";<r>{}</>", jump),
                };
                cformat!("{}<g>{}</>{}", dest, Inst::comp_text(*src, *comp), jump)
            }
        }
    }
}

impl Display for Inst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inst::Addr(val) => write!(f, "@{}", val),
            Inst::Comp {
                src,
                comp,
                dest,
                jump,
            } => {
                if !dest.is_empty() {
                    write!(f, "{}=", dest)?;
                }
                f.write_str(&Inst::comp_text(*src, *comp))?;
                if *jump != Jump::Null {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(src: Src, comp: &str, dest: &str, jump: &str) -> Inst {
        Inst::Comp {
            src,
            comp: Comp::parse(comp).unwrap(),
            dest: Dest::parse(dest).unwrap(),
            jump: Jump::parse(jump).unwrap(),
        }
    }

    macro_rules! test_inst {
        ($($name:ident: $inst:expr => $bin:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let inst = $inst;
                    assert_eq!(inst.to_bin_str(), $bin);
                    let inst_back = Inst::from_bin(inst.to_bin()).unwrap();
                    assert_eq!(inst, inst_back);
                }
            )*
        }
    }

    test_inst! {
        test_addr_2: Inst::Addr(2) => "0000000000000010",
        test_addr_max: Inst::Addr(32767) => "0111111111111111",
        test_d_eq_a: c(Src::A, "A", "D", "") => "1110110000010000",
        test_d_eq_d_plus_a: c(Src::A, "D+A", "D", "") => "1110000010010000",
        test_m_eq_d: c(Src::A, "D", "M", "") => "1110001100001000",
        test_zero_jmp: c(Src::A, "0", "", "JMP") => "1110101010000111",
        test_am_eq_m_plus_1: c(Src::M, "A+1", "AM", "JGT") => "1111110111101001",
        test_d_eq_d_or_m: c(Src::M, "D|A", "D", "") => "1111010101010000",
        test_amd_eq_minus_1: c(Src::A, "-1", "ADM", "JLE") => "1110111010111110",
    }

    #[test]
    fn addr_is_masked_to_15_bits() {
        assert_eq!(Inst::Addr(0xFFFF).to_bin(), 0x7FFF);
    }

    #[test]
    fn unknown_alu_code() {
        // 111 0 100000 000 000
        assert_eq!(Inst::from_bin(0b1110_1000_0000_0000), None);
    }

    #[test]
    fn display() {
        assert_eq!(Inst::Addr(21).to_string(), "@21");
        assert_eq!(c(Src::M, "D-A", "MD", "JNE").to_string(), "DM=D-M;JNE");
        assert_eq!(c(Src::A, "0", "", "JMP").to_string(), "0;JMP");
        assert_eq!(c(Src::M, "!A", "A", "").to_string(), "A=!M");
    }
}
