use clap::Parser;
use xmlform_cli::{init_tracing, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli.command, &mut out)
}
