use std::path::PathBuf;

use color_print::cprintln;
use hackasm::{file, symbols::Kind, util, Assembler, Diag};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: PathBuf,

    /// Output file [default: input with `.hack` extension]
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,

    /// Write the symbol table as JSON
    #[clap(short, long)]
    symbols: Option<PathBuf>,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Hack Assembler");

    let input = args.input.display().to_string();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("hack"));

    println!("1. Read Source");
    println!("  < {}", input);
    let lines = match file::read_lines(&args.input) {
        Ok(lines) => lines,
        Err(err) => fail(&err),
    };

    let mut asm = Assembler::new();
    let stmts = asm.classify(&lines);

    println!("2. Resolve Labels");
    asm.resolve_labels(&stmts);
    println!("  - found #{} labels", asm.symbols().count(Kind::Label));

    println!("3. Encode Instructions");
    let code = asm.encode(&stmts);
    println!(
        "  - allocated #{} variables",
        asm.symbols().count(Kind::Variable)
    );

    let program = match asm.finish(code) {
        Ok(program) => program,
        Err(diags) => {
            print_diags(&diags, &input, &lines);
            let count = diags.iter().filter(|d| d.is_error()).count();
            cprintln!("<red,bold>error</>: aborting due to {} previous error(s)", count);
            std::process::exit(1);
        }
    };
    print_diags(&program.warnings, &input, &lines);

    println!("4. Write Output");
    let mut outputs = vec![(output.as_path(), file::format_hack(program.words()))];
    if let Some(path) = &args.symbols {
        match program.symbols.to_json() {
            Ok(json) => outputs.push((path.as_path(), json)),
            Err(err) => fail(&err),
        }
    }
    for (path, _) in &outputs {
        println!("  > {}", path.display());
    }
    if let Err(err) = file::write_all(&outputs) {
        fail(&err);
    }

    if args.dump {
        util::print_dump(&input, &lines, &program);
    }
}

fn print_diags(diags: &[Diag], file: &str, lines: &[String]) {
    for diag in diags {
        diag.print(file, lines);
    }
}

fn fail(err: &hackasm::Error) -> ! {
    cprintln!("<red,bold>error</>: {}", err);
    if let Some(source) = std::error::Error::source(err) {
        cprintln!("  <blue>caused by</>: {}", source);
    }
    std::process::exit(1);
}
