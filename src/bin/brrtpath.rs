use brrtpath::cli::{run_cli, Cli};
use brrtpath::logging::{init_logging, LogConfig};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let _guard = init_logging(&LogConfig::from_env())?;
    let cli = Cli::parse();
    run_cli(&cli, &mut std::io::stdout().lock())
}
