//! Two-pass assembler for the Hack 16-bit CPU.
//!
//! ```
//! let program = hackasm::assemble("(LOOP)\n@LOOP\n0;JMP").unwrap();
//! let words: Vec<u16> = program.words().collect();
//! assert_eq!(words, vec![0b0000000000000000, 0b1110101010000111]);
//! ```

pub mod assembler;
pub mod error;
pub mod file;
pub mod line;
pub mod parser;
pub mod symbols;
pub mod util;

pub use assembler::{assemble, Assembler, Encoded, Program};
pub use error::{Diag, Error, Level};
pub use symbols::{Kind, SymbolTable};
