use clap::Parser;
use scanlox::scan;
use std::{
    error::Error,
    fs,
    io::{self, BufRead, Write},
    process,
};
use tracing_subscriber::EnvFilter;

/// Exit status for a script that contained lexical errors.
const EXIT_DATA_ERROR: i32 = 65;

#[derive(Parser, Debug)]
struct Args {
    filename: Option<String>,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.debug);

    match args.filename {
        Some(filename) => run_script(&filename),
        None => repl(),
    }?;

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn run_script(filename: &str) -> Result<(), Box<dyn Error>> {
    let source = String::from_utf8(fs::read(filename)?)?;
    tracing::debug!(filename, bytes = source.len(), "scanning script");

    let had_error = run(&source, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    if had_error {
        process::exit(EXIT_DATA_ERROR);
    }

    Ok(())
}

fn repl() -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    loop {
        let mut buf = String::new();
        io::stdout().write_all(b"> ")?;
        io::stdout().flush()?;
        if stdin.lock().read_line(&mut buf)? == 0 {
            break;
        }

        // Errors on one line don't carry over to the next.
        run(&buf, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    }

    Ok(())
}

/// Print every token of `source` to `out` and every lexical error to `err`.
/// Returns whether any error was reported.
fn run(source: &str, out: &mut impl Write, err: &mut impl Write) -> io::Result<bool> {
    let mut had_error = false;
    for result in scan(source) {
        match result {
            Ok(token) => writeln!(out, "{}", token)?,
            Err(error) => {
                writeln!(err, "{}", error)?;
                had_error = true;
            }
        }
    }
    Ok(had_error)
}

#[cfg(test)]
mod tests {

    use super::*;

    fn run_to_strings(source: &str) -> (String, String, bool) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let had_error = run(source, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            had_error,
        )
    }

    #[test]
    fn test_run_prints_tokens() {
        let (out, err, had_error) = run_to_strings("var x = 1;");
        assert_eq!(
            out,
            "VAR var \nIDENTIFIER x x\nEQUAL = \nNUMBER 1 1\nSEMICOLON ; \n"
        );
        assert_eq!(err, "");
        assert!(!had_error);
    }

    #[test]
    fn test_run_reports_errors() {
        let (out, err, had_error) = run_to_strings("a\n@ b");
        assert_eq!(out, "IDENTIFIER a a\nIDENTIFIER b b\n");
        assert_eq!(
            err,
            "[line 2] Error: Encountered unexpected character @ at position 2\n"
        );
        assert!(had_error);
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["scanlox", "--debug", "script.lox"]).unwrap();
        assert!(args.debug);
        assert_eq!(args.filename.as_deref(), Some("script.lox"));

        assert!(Args::try_parse_from(["scanlox", "a.lox", "b.lox"]).is_err());
    }
}
