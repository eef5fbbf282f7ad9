use anyhow::Context;
use clap::Parser;
use gridsweep_core::{GameConfig, LayoutGenerator, PlayEngine, RejectionSampler};
use std::io;

mod session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use, logs go to stderr
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let layout = RejectionSampler::from_seed(seed)
        .generate(GameConfig::default())
        .context("Could not generate the minefield")?;

    let mut session = session::Session::new(
        PlayEngine::new(layout),
        io::stdin().lock(),
        io::stdout().lock(),
    );
    let end = session.run().context("Terminal I/O failed")?;
    log::debug!("Finished with {:?}", end);
    Ok(())
}
