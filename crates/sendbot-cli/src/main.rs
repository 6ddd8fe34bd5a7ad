mod cmd;
mod output;

use clap::Parser;
use sendbot_core::client::DEFAULT_BOT_URL;

#[derive(Parser)]
#[command(
    name = "send-to-bot",
    about = "Post CI results for the current pull request to tldr-bot",
    version
)]
struct Cli {
    /// report-errors | report-check-results | update-translators
    #[arg(value_name = "ACTION")]
    args: Vec<String>,

    /// Base URL of the bot service
    #[arg(long, env = "SENDBOT_URL", default_value = DEFAULT_BOT_URL)]
    bot_url: String,

    /// Shell command whose stdout is the update-translators comment content
    #[arg(long, env = "SENDBOT_TRANSLATORS_CMD")]
    translators_cmd: Option<String>,

    /// Request timeout in seconds (default: the HTTP client's own)
    #[arg(long, env = "SENDBOT_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Render the comment and print it instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = cmd::send::SendOptions {
        args: cli.args,
        bot_url: cli.bot_url,
        translators_cmd: cli.translators_cmd,
        timeout: cli.timeout,
        dry_run: cli.dry_run,
    };

    if let Err(e) = cmd::send::run(opts, cli.json) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
