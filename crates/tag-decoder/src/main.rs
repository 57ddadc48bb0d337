//! tagdump - decode captured microtag and timestamp logs

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tag_decoder::{
    estimate_clock_offsets, init_logging, parse_microtags, parse_timestamps, read_capture,
    DecoderConfig, Timeline,
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "tagdump", version, about = "Decode captured microtag and timestamp logs")]
struct Cli {
    /// TOML configuration file (tick period, tag names, sync tags)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode base64 microtag records
    Microtags {
        file: PathBuf,
        /// Print a timeline with begin/end spans instead of raw tags
        #[arg(long)]
        timeline: bool,
    },
    /// Decode hex timestamp records into a timeline
    Timestamps { file: PathBuf },
    /// Estimate the counter offset of node B relative to node A
    Offset { file_a: PathBuf, file_b: PathBuf },
    /// Print the configured tags as C defines
    Defines,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = DecoderConfig::load(cli.config.as_deref())?;
    init_logging(&config.log_level)?;

    match cli.command {
        Command::Microtags { file, timeline } => {
            let parsed = parse_microtags(&read_capture(&file)?);
            info!(imported = parsed.entries.len(), skipped = parsed.skipped, "decoded microtags");
            if timeline {
                print!("{}", Timeline::from_microtags(&parsed.entries, &config));
            } else {
                for tag in &parsed.entries {
                    println!("{:04X}:{:08X}", tag.id, tag.data);
                }
            }
        }
        Command::Timestamps { file } => {
            let parsed = parse_timestamps(&read_capture(&file)?);
            if parsed.skipped > 0 {
                warn!(skipped = parsed.skipped, "ignored invalid timestamp records");
            }
            print!("{}", Timeline::from_timestamps(&parsed.entries, &config));
        }
        Command::Offset { file_a, file_b } => {
            let a = parse_timestamps(&read_capture(&file_a)?);
            let b = parse_timestamps(&read_capture(&file_b)?);
            for delta in estimate_clock_offsets(&a.entries, &b.entries, &config.sync)? {
                println!("Counter delta A-->B is: 0x{:06x}", delta);
            }
        }
        Command::Defines => print!("{}", config.defines()),
    }

    Ok(())
}
