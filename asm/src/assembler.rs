use arch::{mem::ADDR_MAX, Inst};

use crate::{
    error::{Diag, Error},
    line::{clip_ident, Stmt},
    parser::{trailing_operand, Code, Imm},
    symbols::SymbolTable,
};

/// One instruction of the output and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub line_idx: usize,
    pub pc: u16,
    pub code: Code,
    pub inst: Inst,
}

/// Result of a successful run.
#[derive(Debug)]
pub struct Program {
    pub code: Vec<Encoded>,
    pub symbols: SymbolTable,
    pub warnings: Vec<Diag>,
}

impl Program {
    pub fn words(&self) -> impl Iterator<Item = u16> + '_ {
        self.code.iter().map(|encoded| encoded.inst.to_bin())
    }
}

/// Assembles a whole source text.
pub fn assemble(source: &str) -> Result<Program, Vec<Diag>> {
    Assembler::new().run(source.lines())
}

/// State of one assembly run: the symbol table and the diagnostics so far.
///
/// The stages are public so callers can report progress between them;
/// [`Assembler::run`] chains them.
pub struct Assembler {
    symbols: SymbolTable,
    diags: Vec<Diag>,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            symbols: SymbolTable::new(),
            diags: vec![],
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn run<S: AsRef<str>>(
        mut self,
        lines: impl IntoIterator<Item = S>,
    ) -> Result<Program, Vec<Diag>> {
        let stmts = self.classify(lines);
        self.resolve_labels(&stmts);
        let code = self.encode(&stmts);
        self.finish(code)
    }

    /// Classifies every line, dropping blank and comment lines.
    pub fn classify<S: AsRef<str>>(
        &mut self,
        lines: impl IntoIterator<Item = S>,
    ) -> Vec<(usize, Stmt)> {
        let mut stmts = vec![];
        for (idx, raw) in lines.into_iter().enumerate() {
            let (stmt, warns) = Stmt::parse(raw.as_ref());
            self.diags
                .extend(warns.into_iter().map(|warn| Diag::warn(idx, warn)));
            if let Some(stmt) = stmt {
                stmts.push((idx, stmt));
            }
        }
        stmts
    }

    /// Pass 1: binds every label to the address of the instruction after it.
    pub fn resolve_labels(&mut self, stmts: &[(usize, Stmt)]) {
        let mut pc: usize = 0;
        for (idx, stmt) in stmts {
            match stmt {
                Stmt::Inst(_) => {
                    if pc == ADDR_MAX as usize + 1 {
                        self.diags.push(Diag::error(*idx, Error::ProgramTooLarge));
                    }
                    pc += 1;
                }
                Stmt::Label(name) => {
                    if pc > ADDR_MAX as usize {
                        self.diags.push(Diag::error(*idx, Error::ProgramTooLarge));
                        continue;
                    }
                    if let Err(err) = self.symbols.define_label(name, pc as u16, *idx) {
                        self.diags.push(Diag::error(*idx, err));
                    }
                }
            }
        }
    }

    /// Pass 2: encodes every instruction, allocating variables on first use.
    /// A failing line is reported and skipped.
    pub fn encode(&mut self, stmts: &[(usize, Stmt)]) -> Vec<Encoded> {
        let mut code = vec![];
        let mut pc: u16 = 0;
        for (idx, stmt) in stmts {
            let text = match stmt {
                Stmt::Inst(text) => text,
                Stmt::Label(_) => continue,
            };
            let this_pc = pc;
            pc = pc.wrapping_add(1);

            let parsed = match Code::parse(text) {
                Ok(parsed) => parsed,
                Err(err) => {
                    self.diags.push(Diag::error(*idx, err));
                    continue;
                }
            };
            if let Code::Addr(Imm::Ident(name)) = &parsed {
                if clip_ident(name).len() < name.len() {
                    let warn = Error::IdentTruncated(name.clone());
                    self.diags.push(Diag::warn(*idx, warn));
                }
            }
            if let Some(rest) = trailing_operand(text) {
                let warn = Error::TrailingOperand(rest.to_string());
                self.diags.push(Diag::warn(*idx, warn));
            }
            match parsed.resolve(&mut self.symbols, *idx) {
                Ok(inst) => code.push(Encoded {
                    line_idx: *idx,
                    pc: this_pc,
                    code: parsed,
                    inst,
                }),
                Err(err) => self.diags.push(Diag::error(*idx, err)),
            }
        }
        code
    }

    /// Fails if any error was recorded; warnings are handed back either way.
    pub fn finish(mut self, code: Vec<Encoded>) -> Result<Program, Vec<Diag>> {
        self.diags.sort_by_key(|diag| diag.line_idx);
        if self.diags.iter().any(Diag::is_error) {
            return Err(self.diags);
        }
        Ok(Program {
            code,
            symbols: self.symbols,
            warnings: self.diags,
        })
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
