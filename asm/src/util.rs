use color_print::cformat;

use crate::{assembler::Program, line::Stmt};

/// Listing of the source with the address and binary of every instruction.
pub fn format_dump(path: &str, lines: &[String], program: &Program) -> String {
    let mut out = format!(
        "{}+------[{}]{}\n",
        "-".repeat(23),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );

    let mut encoded = program.code.iter().peekable();
    for (idx, raw) in lines.iter().enumerate() {
        let line_num = idx + 1;

        if let Some(e) = encoded.next_if(|e| e.line_idx == idx) {
            out += &format!(
                "[{:04X}] {:016b} | {:>4}:   {}\n",
                e.pc,
                e.inst.to_bin(),
                line_num,
                e.code.cformat(&program.symbols)
            );
            continue;
        }

        let body = match Stmt::parse(raw).0 {
            Some(Stmt::Label(key)) => {
                let addr = program.symbols.get_val(&key).unwrap_or_default();
                cformat!("<g>({})</> <c>0x{:04X}</>", key, addr)
            }
            _ => cformat!("<dim>{}</>", raw.trim()),
        };
        out += &format!("{:23}| {:>4}: {}\n", "", line_num, body);
    }

    out += &format!("{}+{}\n", "-".repeat(23), "-".repeat(53));
    out
}

pub fn print_dump(path: &str, lines: &[String], program: &Program) {
    print!("{}", format_dump(path, lines, program));
}
