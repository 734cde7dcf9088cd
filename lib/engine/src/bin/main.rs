use std::io;

use anyhow::Context;
use engine::engine::GameEngine;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // 日志写到 stderr，stdout 只留给协议输出
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    GameEngine::new()
        .run(stdin.lock(), &mut stdout)
        .context("engine loop failed")?;
    Ok(())
}
