//! Scripted match-3 runner (default binary).
//!
//! Deals a board from the environment and flags, then runs a session that reads
//! JSON commands from `--script <file>` or stdin and writes replies to stdout.

use anyhow::{anyhow, Result};
use log::info;
use tokio::io::{AsyncBufRead, BufReader};

use match3::adapter::{CliArgs, Session, SessionConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = CliArgs::parse(&args)?;
    let config = cli.session_config();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("match3: cannot start runtime: {}", e))?;

    runtime.block_on(run(cli, config))
}

async fn run(cli: CliArgs, config: SessionConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    let reader: Box<dyn AsyncBufRead + Unpin> = match &cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|e| anyhow!("match3: cannot open {}: {}", path.display(), e))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let mut stdout = tokio::io::stdout();
    let summary = session.run(reader, &mut stdout).await?;
    info!(
        "done: {} moves left{}",
        summary.moves_left,
        if summary.game_over { ", game over" } else { "" }
    );
    Ok(())
}
