use arch::{mem::ADDR_MAX, Comp, Dest, Inst, Jump, Src};
use color_print::cformat;
use std::num::IntErrorKind;

use crate::{error::Error, line::clip_ident, symbols::SymbolTable};

// ----------------------------------------------------------------------------
// Operation

/// An instruction as written, before symbols are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    /// `@value`
    Addr(Imm),
    /// `dest=comp;jump`
    Comp {
        src: Src,
        comp: Comp,
        dest: Dest,
        jump: Jump,
    },
}

impl Code {
    pub fn parse(text: &str) -> Result<Code, Error> {
        let text = strip_comment(text);
        match text.strip_prefix('@') {
            Some(operand) => {
                let operand = operand
                    .split_whitespace()
                    .next()
                    .ok_or(Error::MissingOperand)?;
                Ok(Code::Addr(Imm::parse(operand)?))
            }
            None => Code::parse_comp(text),
        }
    }

    fn parse_comp(text: &str) -> Result<Code, Error> {
        let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();

        let (head, jump) = match text.split_once(';') {
            Some((head, jump)) => (head, Some(jump)),
            None => (text.as_str(), None),
        };
        let (dest, expr) = head.split_once('=').unwrap_or(("", head));

        let dest = Dest::parse(dest).map_err(Error::UnknownDest)?;

        // M and A share one table, told apart by the `a` bit
        let (src, comp) = if expr.contains('M') {
            (Src::M, Comp::parse(&expr.replace('M', "A")))
        } else {
            (Src::A, Comp::parse(expr))
        };
        let comp = comp.ok_or_else(|| Error::UnknownComp(expr.to_string()))?;

        let jump = match jump {
            Some(jump) => Jump::parse(jump).ok_or_else(|| Error::UnknownJump(jump.to_string()))?,
            None => Jump::Null,
        };

        Ok(Code::Comp {
            src,
            comp,
            dest,
            jump,
        })
    }

    /// Resolves symbols, allocating variables on first use.
    pub fn resolve(&self, symbols: &mut SymbolTable, line_idx: usize) -> Result<Inst, Error> {
        match self {
            Code::Addr(imm) => Ok(Inst::Addr(imm.resolve(symbols, line_idx)?)),
            Code::Comp {
                src,
                comp,
                dest,
                jump,
            } => Ok(Inst::Comp {
                src: *src,
                comp: *comp,
                dest: *dest,
                jump: *jump,
            }),
        }
    }

    pub fn cformat(&self, symbols: &SymbolTable) -> String {
        match self {
            Code::Addr(imm) => cformat!("<r>@</>{}", imm.cfmt(symbols)),
            Code::Comp {
                src,
                comp,
                dest,
                jump,
            } => Inst::Comp {
                src: *src,
                comp: *comp,
                dest: *dest,
                jump: *jump,
            }
            .cformat(),
        }
    }
}

fn strip_comment(text: &str) -> &str {
    match text.find("//") {
        Some(idx) => &text[..idx],
        None => text,
    }
}

/// Text following the first token of an `@` operand. Only that token is used.
pub fn trailing_operand(text: &str) -> Option<&str> {
    let operand = strip_comment(text).strip_prefix('@')?.trim();
    let (_, rest) = operand.split_once(char::is_whitespace)?;
    Some(rest.trim_start())
}

// ----------------------------------------------------------------------------
// Immidiate

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(u16),
    Ident(String),
}

impl Imm {
    fn parse(s: &str) -> Result<Imm, Error> {
        match s.chars().next() {
            Some(head) if head.is_ascii_digit() => Ok(Imm::Literal(parse_with_prefix(s)?)),
            _ => Ok(Imm::Ident(s.to_string())),
        }
    }

    pub fn resolve(&self, symbols: &mut SymbolTable, line_idx: usize) -> Result<u16, Error> {
        match self {
            Imm::Literal(v) => Ok(*v),
            Imm::Ident(s) => symbols.get_or_alloc(clip_ident(s), line_idx),
        }
    }

    pub fn cfmt(&self, symbols: &SymbolTable) -> String {
        match self {
            Imm::Ident(s) => match symbols.get_val(clip_ident(s)) {
                Some(v) => cformat!("<g>0x{:0>4X}({})</>", v, s),
                None => cformat!("<r,u>{}</>", s),
            },
            Imm::Literal(v) => cformat!("<y>0x{:0>4X}</>", v),
        }
    }
}

/// Decimal, or `0x`/`0o`/`0b` prefixed. Leading zeros stay decimal.
fn parse_with_prefix(s: &str) -> Result<u16, Error> {
    let (num, radix) = match s.get(..2) {
        Some("0x") => (&s[2..], 16),
        Some("0o") => (&s[2..], 8),
        Some("0b") => (&s[2..], 2),
        _ => (s, 10),
    };
    if num.is_empty() || !num.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::InvalidLiteral(s.to_string()));
    }
    match u64::from_str_radix(num, radix) {
        Ok(v) if v <= ADDR_MAX as u64 => Ok(v as u16),
        Ok(_) => Err(Error::LiteralOutOfRange(s.to_string())),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            Err(Error::LiteralOutOfRange(s.to_string()))
        }
        Err(_) => Err(Error::InvalidLiteral(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(text: &str) -> (Src, Comp, Dest, Jump) {
        match Code::parse(text).unwrap() {
            Code::Comp {
                src,
                comp,
                dest,
                jump,
            } => (src, comp, dest, jump),
            other => panic!("not a compute instruction: {:?}", other),
        }
    }

    #[test]
    fn addr_literal() {
        assert_eq!(Code::parse("@2").unwrap(), Code::Addr(Imm::Literal(2)));
        assert_eq!(Code::parse("@010").unwrap(), Code::Addr(Imm::Literal(10)));
        assert_eq!(Code::parse("@0x10").unwrap(), Code::Addr(Imm::Literal(16)));
        assert_eq!(Code::parse("@0b101").unwrap(), Code::Addr(Imm::Literal(5)));
        assert_eq!(Code::parse("@32767").unwrap(), Code::Addr(Imm::Literal(32767)));
        assert_eq!(Code::parse("@7 // seven").unwrap(), Code::Addr(Imm::Literal(7)));
        assert_eq!(Code::parse("@7//seven").unwrap(), Code::Addr(Imm::Literal(7)));
    }

    #[test]
    fn addr_literal_errors() {
        assert!(matches!(Code::parse("@32768"), Err(Error::LiteralOutOfRange(_))));
        assert!(matches!(
            Code::parse("@99999999999999999999999"),
            Err(Error::LiteralOutOfRange(_))
        ));
        assert!(matches!(Code::parse("@12abc"), Err(Error::InvalidLiteral(_))));
        assert!(matches!(Code::parse("@0x"), Err(Error::InvalidLiteral(_))));
        assert!(matches!(Code::parse("@"), Err(Error::MissingOperand)));
        assert!(matches!(Code::parse("@   // none"), Err(Error::MissingOperand)));
    }

    #[test]
    fn addr_ident() {
        assert_eq!(Code::parse("@LOOP").unwrap(), Code::Addr(Imm::Ident("LOOP".into())));
        assert_eq!(Code::parse("@i  // counter").unwrap(), Code::Addr(Imm::Ident("i".into())));
        assert_eq!(
            Code::parse("@Main.fn$ret.0").unwrap(),
            Code::Addr(Imm::Ident("Main.fn$ret.0".into()))
        );
    }

    #[test]
    fn operand_takes_first_token() {
        assert_eq!(Code::parse("@MY LOOP").unwrap(), Code::Addr(Imm::Ident("MY".into())));
        assert_eq!(trailing_operand("@MY LOOP"), Some("LOOP"));
        assert_eq!(trailing_operand("@1  2 3 // x"), Some("2 3"));
        assert_eq!(trailing_operand("@LOOP  // back"), None);
        assert_eq!(trailing_operand("@LOOP"), None);
        assert_eq!(trailing_operand("D=A // M + 1"), None);
    }

    #[test]
    fn comp_parts() {
        assert_eq!(comp("D=A"), (Src::A, Comp::A, Dest::from_bin(0b010), Jump::Null));
        assert_eq!(comp("0;JMP"), (Src::A, Comp::Zero, Dest::default(), Jump::JMP));
        assert_eq!(comp("AM=M+1;JGT"), (Src::M, Comp::IncA, Dest::from_bin(0b101), Jump::JGT));
        assert_eq!(comp("D;JEQ"), (Src::A, Comp::D, Dest::default(), Jump::JEQ));
        assert_eq!(comp("D=D|M"), (Src::M, Comp::DOrA, Dest::from_bin(0b010), Jump::Null));
        assert_eq!(comp("M=-1"), (Src::A, Comp::NegOne, Dest::from_bin(0b001), Jump::Null));
    }

    #[test]
    fn comp_whitespace_and_comments() {
        assert_eq!(comp("D = D + A // sum"), comp("D=D+A"));
        assert_eq!(comp("AAD M=D"), comp("ADM=D"));
        assert_eq!(comp("0;"), comp("0"));
    }

    #[test]
    fn m_selects_memory() {
        let (src_a, comp_a, dest_a, jump_a) = comp("D=A");
        let (src_m, comp_m, dest_m, jump_m) = comp("D=M");
        assert_eq!((src_a, src_m), (Src::A, Src::M));
        assert_eq!((comp_a, dest_a, jump_a), (comp_m, dest_m, jump_m));
    }

    #[test]
    fn comp_errors() {
        assert!(matches!(Code::parse("D=D*A"), Err(Error::UnknownComp(e)) if e == "D*A"));
        assert!(matches!(Code::parse("D=A+M"), Err(Error::UnknownComp(_))));
        assert!(matches!(Code::parse("D=M+D"), Err(Error::UnknownComp(e)) if e == "M+D"));
        assert!(matches!(Code::parse("0;JXX"), Err(Error::UnknownJump(e)) if e == "JXX"));
        assert!(matches!(Code::parse("X=D"), Err(Error::UnknownDest('X'))));
        assert!(matches!(Code::parse("nop"), Err(Error::UnknownComp(_))));
    }

    #[test]
    fn resolve() {
        let mut symbols = SymbolTable::new();
        symbols.define_label("LOOP", 7, 0).unwrap();

        let inst = Code::parse("@LOOP").unwrap().resolve(&mut symbols, 1).unwrap();
        assert_eq!(inst, Inst::Addr(7));
        let inst = Code::parse("@x").unwrap().resolve(&mut symbols, 2).unwrap();
        assert_eq!(inst, Inst::Addr(16));
        let inst = Code::parse("@KBD").unwrap().resolve(&mut symbols, 3).unwrap();
        assert_eq!(inst, Inst::Addr(24576));
    }

    #[test]
    fn long_ident_resolves_to_clipped_name() {
        let mut symbols = SymbolTable::new();
        let short = "v".repeat(crate::line::MAX_IDENT);
        let long = format!("{}tail", short);
        let imm = Imm::Ident(long);
        assert_eq!(imm.resolve(&mut symbols, 0).unwrap(), 16);
        assert_eq!(symbols.get_val(&short), Some(16));
    }
}
