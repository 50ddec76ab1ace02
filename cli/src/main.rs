use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use xorshift128plus_core::Arithmetic;
use xs128p::config::CliDefaults;
use xs128p::{
    generate, locate_file, parse_seed, rewind, rewind_count, verify_file, write_output,
    GenerateOptions,
};

#[derive(Parser)]
#[command(name = "xs128p")]
#[command(about = "Reproduce and check the xorshift128+ Math.random stream")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct Seeds {
    /// First state word (decimal or 0x-hex)
    #[arg(long, value_parser = parse_seed)]
    seed_a: u64,

    /// Second state word (decimal or 0x-hex)
    #[arg(long, value_parser = parse_seed)]
    seed_b: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Print the next values of the stream
    Generate {
        #[command(flatten)]
        seeds: Seeds,

        /// Number of values [env: XS128P_DEFAULT_COUNT, default 10]
        #[arg(short, long)]
        count: Option<u32>,

        /// Print raw 64-bit outputs instead of doubles
        #[arg(long)]
        raw: bool,

        #[arg(long, default_value = "engine")]
        arithmetic: Arithmetic,

        /// Emit a JSON report instead of one value per line
        #[arg(long)]
        json: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Advance, then print earlier doubles by stepping the state backwards
    Rewind {
        #[command(flatten)]
        seeds: Seeds,

        #[arg(long)]
        steps: u64,

        #[arg(short, long)]
        count: Option<u32>,
    },

    /// Check recorded doubles (JSON array) against the stream
    Verify {
        #[command(flatten)]
        seeds: Seeds,

        #[arg(short, long)]
        input: PathBuf,

        /// Values drawn before the recording starts
        #[arg(long, default_value_t = 0)]
        skip: u64,

        #[arg(long, default_value = "engine")]
        arithmetic: Arithmetic,

        #[arg(long)]
        journal_out: Option<PathBuf>,
    },

    /// Find the offset at which recorded doubles appear in the stream
    Locate {
        #[command(flatten)]
        seeds: Seeds,

        #[arg(short, long)]
        input: PathBuf,

        /// Largest offset to try [env: XS128P_MAX_SKIP, default 100000]
        #[arg(long)]
        max_skip: Option<u64>,

        #[arg(long, default_value = "engine")]
        arithmetic: Arithmetic,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let defaults = CliDefaults::from_env();

    match args.command {
        Command::Generate {
            seeds,
            count,
            raw,
            arithmetic,
            json,
            out,
        } => {
            let report = generate(&GenerateOptions {
                seed_a: seeds.seed_a,
                seed_b: seeds.seed_b,
                count: count.unwrap_or(defaults.count),
                arithmetic,
                raw,
            })?;
            let rendered = if json {
                let mut text = serde_json::to_string_pretty(&report)
                    .context("failed to serialize stream report")?;
                text.push('\n');
                text
            } else {
                report.to_lines()
            };
            match out {
                Some(path) => write_output(&path, rendered.as_bytes())?,
                None => print!("{rendered}"),
            }
        }
        Command::Rewind {
            seeds,
            steps,
            count,
        } => {
            let report = rewind(
                seeds.seed_a,
                seeds.seed_b,
                steps,
                rewind_count(count, defaults.count, steps),
            )?;
            for (back, value) in report.values.iter().enumerate() {
                println!("{:>6}  {value:?}", steps - back as u64);
            }
            println!(
                "state: s0=0x{:016x} s1=0x{:016x}",
                report.state.s0, report.state.s1
            );
        }
        Command::Verify {
            seeds,
            input,
            skip,
            arithmetic,
            journal_out,
        } => {
            let journal = verify_file(&input, seeds.seed_a, seeds.seed_b, arithmetic, skip)?;

            println!("Sequence verified.");
            println!("  Arithmetic: {}", journal.arithmetic);
            println!("  Skipped:    {}", journal.skip);
            println!("  Values:     {}", journal.count);
            if let Some(state) = journal.final_state {
                println!("  Final s0:   0x{:016x}", state.s0);
                println!("  Final s1:   0x{:016x}", state.s1);
            }

            if let Some(path) = journal_out {
                let json = serde_json::to_vec_pretty(&journal)
                    .context("failed to serialize journal json")?;
                write_output(&path, &json)?;
                println!("  Journal:    {}", path.display());
            }
        }
        Command::Locate {
            seeds,
            input,
            max_skip,
            arithmetic,
        } => {
            let offset = locate_file(
                &input,
                seeds.seed_a,
                seeds.seed_b,
                arithmetic,
                max_skip.unwrap_or(defaults.max_skip),
            )?;
            println!("{offset}");
        }
    }

    Ok(())
}
