use std::io::{self, BufWriter};
use std::process;

use clap::{CommandFactory, Parser};

use kraken_overview::calls::CallTemplate;
use kraken_overview::generate_kraken_calls;

/// Print one kraken command line per gzipped read file found in DIR.
///
/// Nothing is executed; pipe the output into a shell or job runner.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to kraken db dir.
    #[arg(value_name = "DB-PATH")]
    db: String,

    /// Directory with files.
    #[arg(value_name = "DIR")]
    dir: String,

    /// Directory to place new files.
    #[arg(value_name = "OUTDIR")]
    outdir: String,
}

fn main() {
    if std::env::args_os().len() == 1 {
        let _ = Args::command().print_help();
        process::exit(1);
    }
    let args = Args::parse();
    env_logger::init();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut diag = io::stderr();

    if let Err(e) = generate_kraken_calls(
        &args.db,
        &args.dir,
        &args.outdir,
        &CallTemplate::default(),
        &mut out,
        &mut diag,
    ) {
        if e.is_broken_pipe() {
            return;
        }
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
