//! Animated 3x3x3 twisty puzzle, driven from the command line.

mod cli;
mod headless;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    cli::exec(args)
}
