use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use xcode_breakpoint_generator::debugger::verify_all;
use xcode_breakpoint_generator::instrument::Generator;
use xcode_breakpoint_generator::source::{
    load_translation_units, EntryPointFinder, DEFAULT_MAIN_FILE_PATTERN,
};
use xcode_breakpoint_generator::{init_logging, Error, Result};

#[derive(Parser, Debug)]
#[command(name = "xcode-breakpoint-generator")]
#[command(about = "Generate Xcode breakpoints that log method entry and exit")]
struct Args {
    /// Method description files, one per translation unit
    #[arg(required = true)]
    descriptions: Vec<PathBuf>,

    /// Regex the file holding `main` must match
    #[arg(long, default_value = DEFAULT_MAIN_FILE_PATTERN)]
    main_pattern: String,

    /// Write breakpoints here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the output in a complete .xcbkptlist document
    #[arg(long)]
    bucket: bool,

    /// Replay each method's exit paths and fail on unbalanced tracing
    #[arg(long)]
    verify: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(e.exit_code());
    }
}

fn open_output(args: &Args) -> Result<Box<dyn Write>> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn run(args: &Args) -> Result<()> {
    let finder = EntryPointFinder::new(&args.main_pattern)?;
    let units = load_translation_units(&args.descriptions)?;

    // Fail before touching the output when the entry point is missing or ambiguous.
    let main = finder.find(&units)?;

    let mut generator = Generator::new(open_output(args)?).with_bucket(args.bucket);
    generator.run(&main, &units)?;
    let (_, breakpoints) = generator.finish()?;

    if args.verify {
        let checked = verify_all(&breakpoints, &main, &units)?;
        info!("Verified {} methods", checked);
    }
    Ok(())
}
