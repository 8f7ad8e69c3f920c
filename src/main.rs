use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use meshprep::pipeline::preprocess;

#[derive(Parser, Debug)]
#[command(author, version, about = "Preprocess a mesh into a compressed archive for AR delivery", long_about = None)]
struct Args {
    /// Path to the input mesh file
    #[arg(long, default_value = "airboat.obj")]
    input: PathBuf,

    /// Path for the output .npz archive
    #[arg(long, default_value = "processed_airboat.npz")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match preprocess(&args.input, &args.output) {
        Ok(()) => {
            println!("preprocessing completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error during preprocessing: {e}");
            ExitCode::FAILURE
        }
    }
}
