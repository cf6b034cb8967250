use std::fmt::Display;

/// Destination mask of a compute instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dest {
    pub a: bool,
    pub d: bool,
    pub m: bool,
}

impl Dest {
    pub const A: u8 = 0b100;
    pub const D: u8 = 0b010;
    pub const M: u8 = 0b001;

    /// Sets one flag per `A`, `D` or `M`, ignoring order and repetition.
    /// Returns the first character that is not a destination.
    pub fn parse(s: &str) -> Result<Dest, char> {
        let mut dest = Dest::default();
        for c in s.chars() {
            match c {
                'A' => dest.a = true,
                'D' => dest.d = true,
                'M' => dest.m = true,
                _ => return Err(c),
            }
        }
        Ok(dest)
    }

    pub fn to_bin(self) -> u8 {
        let mut bin = 0;
        if self.a {
            bin |= Dest::A;
        }
        if self.d {
            bin |= Dest::D;
        }
        if self.m {
            bin |= Dest::M;
        }
        bin
    }

    pub fn from_bin(bin: u8) -> Dest {
        Dest {
            a: bin & Dest::A != 0,
            d: bin & Dest::D != 0,
            m: bin & Dest::M != 0,
        }
    }

    pub fn is_empty(self) -> bool {
        self.to_bin() == 0
    }
}

impl Display for Dest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a {
            f.write_str("A")?;
        }
        if self.d {
            f.write_str("D")?;
        }
        if self.m {
            f.write_str("M")?;
        }
        Ok(())
    }
}
