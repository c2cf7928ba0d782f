//! Binary entry point for the `zxpack` command-line tool.
//!
//! Control flow: parse the arguments, compress the one input file, print
//! any warnings to stdout, and map failures to exit code 1. Invoking the
//! tool without arguments prints usage and exits 0.

use zxpack::cli::args::parse_args_from;
use zxpack::cli::help::print_usage;
use zxpack::io::compress_file;

fn run(argv: &[String]) -> anyhow::Result<()> {
    let args = parse_args_from(argv)?;
    let report = compress_file(&args.input, args.output.as_deref(), args.options)?;

    for warning in &report.warnings {
        println!("warning: {warning}");
    }

    println!(
        "{} -> {} ({} -> {} bytes)",
        args.input.display(),
        report.output_path.display(),
        report.input_size,
        report.output_size
    );

    Ok(())
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    if argv.is_empty() {
        print_usage();
        std::process::exit(0);
    }

    if let Err(e) = run(&argv) {
        eprintln!("zxpack: {e}");
        std::process::exit(1);
    }

    std::process::exit(0);
}
