use anyhow::{Context, Result};
use clap::Parser;
use climatechat::{ResponseBuffer, ResponseInterpreter};
use serde_json::json;
use std::fs;
use std::io::Read;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// The file holding the response text, or `-` for stdin
    #[arg(required = true)]
    path: String,
}

#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// The file holding a captured response body
    #[arg(required = true)]
    path: String,
    /// The number of bytes delivered per simulated chunk
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    step: u64,
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
        return Ok(bytes);
    }
    fs::read(path).with_context(|| format!("Failed to read '{path}'"))
}

pub fn handle_parse(args: &ParseArgs) -> Result<()> {
    info!("Parsing response from: {}", args.path);
    let interpreter = ResponseInterpreter::new()?;

    let bytes = read_input(&args.path)?;
    let text = String::from_utf8_lossy(&bytes);
    let result = interpreter.parse(&text);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub fn handle_replay(args: &ReplayArgs) -> Result<()> {
    info!("Replaying '{}' in {}-byte chunks", args.path, args.step);
    let interpreter = ResponseInterpreter::new()?;

    let bytes = read_input(&args.path)?;
    let step = usize::try_from(args.step).context("Step does not fit in memory")?;
    let mut buffer = ResponseBuffer::new();

    for chunk in bytes.chunks(step) {
        buffer.push(chunk);
        let update = interpreter.parse(&buffer.text());
        println!(
            "{}",
            json!({
                "bytes": buffer.len(),
                "summary": update.summary,
                "challenges": update.challenge_count(),
            })
        );
    }

    let result = interpreter.parse(&buffer.finish());
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
