use clap::Parser;
use hwameidoc::cli::{Cli, usage_exit_code};
use hwameidoc::commands::handle_command;
use hwameidoc::crypto::init_crypto;
use hwameidoc::instrumentation::init_instrumentation;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // If stderr is gone the exit code is all that is left.
            err.print().ok();
            std::process::exit(usage_exit_code(&err));
        }
    };

    init_instrumentation(cli.verbose);
    init_crypto();

    if let Err(e) = handle_command(&cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
