use std::io::Write as _;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use risalebot::cli::{Cli, Command, ParseArgs, ReplyArgs};
use risalebot::command::CommandParser;
use risalebot::config::RisaleConfig;
use risalebot::service::RisaleService;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    risalebot::logging::init().context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = cli.config();
    match cli.command {
        Command::Reply(args) => reply(&config, args).await.context("reply")?,
        Command::Parse(args) => parse(args).context("parse")?,
    }

    Ok(())
}

async fn reply(config: &RisaleConfig, args: ReplyArgs) -> anyhow::Result<()> {
    let service = RisaleService::from_config(config)?;
    let response = service.handle_text(&args.text).await;

    let mut out = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &response).context("write json")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", response.text)?;
    }
    Ok(())
}

fn parse(args: ParseArgs) -> anyhow::Result<()> {
    let command = CommandParser::new()?.parse(&args.text);
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, &command).context("write json")?;
    writeln!(out, "\n{command}")?;
    Ok(())
}
