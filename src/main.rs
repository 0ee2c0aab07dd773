use clap::Parser;
use log::LevelFilter;
use packihx_wrap::{pack_file, PackError, Packer, DEFAULT_PACKER};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate a packed .hex file with packihx.
#[derive(Parser, Debug, Clone)]
#[command(version)]
struct Args {
    /// Input file.
    input: PathBuf,

    /// Output file.
    output: PathBuf,

    /// Packer program to run instead of packihx.
    #[arg(long, env = "PACKIHX", default_value = DEFAULT_PACKER)]
    packer: OsString,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.verbose);

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<PackError>() {
                // the tool already reported on its own stderr
                Some(err @ PackError::Failed { .. }) => err.exit_code(),
                Some(err) => {
                    eprintln!("ERROR: {}", e);
                    err.exit_code()
                }
                // pack_file only yields PackError today
                None => {
                    eprintln!("ERROR: {}", e);
                    1
                }
            };

            ExitCode::from(code)
        }
    }
}

fn try_main(args: &Args) -> anyhow::Result<()> {
    let packer = Packer::new(args.packer.clone());

    let written = pack_file(&packer, &args.input, &args.output)?;

    log::info!("wrote {} bytes to {}", written, args.output.display());

    Ok(())
}
