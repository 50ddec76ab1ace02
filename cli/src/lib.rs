//! Host-side helpers for the `xs128p` binary: seed parsing, stream reports,
//! and file-backed verification on top of `xorshift128plus-core`.

pub mod config;

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use xorshift128plus_core::{
    locate_window, verify_sequence, Arithmetic, DoubleSource, RngState, SequenceJournal,
    VerifyRequest, XorShift128Plus,
};

/// Parse a 64-bit seed word: decimal, or hexadecimal with a `0x` prefix.
/// Underscores are ignored.
pub fn parse_seed(value: &str) -> Result<u64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != '_').collect();
    let parsed = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse::<u64>(),
    };
    parsed.with_context(|| format!("invalid seed: {value} (expected a u64, decimal or 0x-hex)"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub seed_a: u64,
    pub seed_b: u64,
    pub count: u32,
    pub arithmetic: Arithmetic,
    pub raw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamValues {
    Raw(Vec<u64>),
    Doubles(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamReport {
    pub seed_a: u64,
    pub seed_b: u64,
    pub arithmetic: Arithmetic,
    pub values: StreamValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_state: Option<RngState>,
}

impl StreamReport {
    /// One value per line, doubles in shortest round-trip form.
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        match &self.values {
            StreamValues::Raw(values) => {
                for value in values {
                    let _ = writeln!(out, "{value}");
                }
            }
            StreamValues::Doubles(values) => {
                for value in values {
                    let _ = writeln!(out, "{value:?}");
                }
            }
        }
        out
    }
}

pub fn generate(options: &GenerateOptions) -> Result<StreamReport> {
    let count = options.count as usize;

    let report = match (options.arithmetic, options.raw) {
        (Arithmetic::Engine, true) => {
            let mut rng = XorShift128Plus::new(options.seed_a, options.seed_b);
            let values = rng.raws().take(count).collect();
            stream_report(options, StreamValues::Raw(values), Some(rng.state()))
        }
        (Arithmetic::Engine, false) => {
            let mut rng = XorShift128Plus::new(options.seed_a, options.seed_b);
            let values = rng.doubles().take(count).collect();
            stream_report(options, StreamValues::Doubles(values), Some(rng.state()))
        }
        (Arithmetic::Unbounded, true) => {
            bail!("raw output is only defined for engine arithmetic")
        }
        (Arithmetic::Unbounded, false) => {
            let mut source = options.arithmetic.generator(options.seed_a, options.seed_b);
            let values = (0..count).map(|_| source.next_double()).collect();
            stream_report(options, StreamValues::Doubles(values), None)
        }
    };

    tracing::info!(
        "generated {} values: seed_a=0x{:016x} seed_b=0x{:016x} arithmetic={}",
        count,
        options.seed_a,
        options.seed_b,
        options.arithmetic
    );
    Ok(report)
}

fn stream_report(
    options: &GenerateOptions,
    values: StreamValues,
    final_state: Option<RngState>,
) -> StreamReport {
    StreamReport {
        seed_a: options.seed_a,
        seed_b: options.seed_b,
        arithmetic: options.arithmetic,
        values,
        final_state,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewindReport {
    pub steps: u64,
    /// Most recent first.
    pub values: Vec<f64>,
    /// State after stepping back over `values`.
    pub state: RngState,
}

/// Values to rewind when `--count` is absent: the configured default, capped
/// at the number of steps taken. An explicit count is passed through as-is.
pub fn rewind_count(requested: Option<u32>, default: u32, steps: u64) -> u32 {
    requested.unwrap_or_else(|| default.min(u32::try_from(steps).unwrap_or(u32::MAX)))
}

/// Advance `steps` draws, then walk back over the last `count` of them.
pub fn rewind(seed_a: u64, seed_b: u64, steps: u64, count: u32) -> Result<RewindReport> {
    if u64::from(count) > steps {
        return Err(anyhow!("cannot rewind {count} values after only {steps} steps"));
    }

    let mut rng = XorShift128Plus::new(seed_a, seed_b);
    for _ in 0..steps {
        rng.advance();
    }
    tracing::debug!("advanced {} steps, state={:?}", steps, rng.state());

    let values = (0..count).map(|_| rng.previous_double()).collect();
    Ok(RewindReport {
        steps,
        values,
        state: rng.state(),
    })
}

/// Load a JSON array of doubles recorded from the engine.
pub fn read_observed(path: &Path) -> Result<Vec<f64>> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read observed values: {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| {
        format!(
            "observed values must be a JSON array of numbers: {}",
            path.display()
        )
    })
}

pub fn verify_file(
    path: &Path,
    seed_a: u64,
    seed_b: u64,
    arithmetic: Arithmetic,
    skip: u64,
) -> Result<SequenceJournal> {
    let observed = read_observed(path)?;
    tracing::info!(
        "verifying {} observed values from {} (skip={}, arithmetic={})",
        observed.len(),
        path.display(),
        skip,
        arithmetic
    );

    let journal = verify_sequence(&VerifyRequest {
        seed_a,
        seed_b,
        arithmetic,
        skip,
        observed,
    })
    .with_context(|| format!("verification failed for {}", path.display()))?;
    Ok(journal)
}

pub fn locate_file(
    path: &Path,
    seed_a: u64,
    seed_b: u64,
    arithmetic: Arithmetic,
    max_skip: u64,
) -> Result<u64> {
    let observed = read_observed(path)?;
    let offset = locate_window(seed_a, seed_b, arithmetic, &observed, max_skip)
        .with_context(|| format!("window from {} not found", path.display()))?;
    tracing::info!("located {} values at offset {}", observed.len(), offset);
    Ok(offset)
}

pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)
        .with_context(|| format!("failed writing output: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_A: u64 = 4_412_470_881_888_093_692;
    const SEED_B: u64 = 8_243_466_694_241_266_509;

    fn options(count: u32) -> GenerateOptions {
        GenerateOptions {
            seed_a: SEED_A,
            seed_b: SEED_B,
            count,
            arithmetic: Arithmetic::Engine,
            raw: false,
        }
    }

    #[test]
    fn parses_decimal_and_hex_seeds() {
        assert_eq!(parse_seed("4412470881888093692").unwrap(), SEED_A);
        assert_eq!(parse_seed("0xFFFF_FFFF_FFFF_FFFF").unwrap(), u64::MAX);
        assert_eq!(parse_seed(" 0x10 ").unwrap(), 16);
        assert!(parse_seed("18446744073709551616").is_err());
        assert!(parse_seed("-1").is_err());
        assert!(parse_seed("0xZZ").is_err());
    }

    #[test]
    fn generates_engine_doubles() {
        let report = generate(&options(3)).unwrap();
        assert_eq!(
            report.values,
            StreamValues::Doubles(vec![
                0.1751031207182704,
                0.6591534829432124,
                0.9620362454524973
            ])
        );
        assert_eq!(
            report.to_lines(),
            "0.1751031207182704\n0.6591534829432124\n0.9620362454524973\n"
        );
        assert!(report.final_state.is_some());
    }

    #[test]
    fn generates_raw_outputs() {
        let mut opts = options(2);
        opts.raw = true;
        let report = generate(&opts).unwrap();
        assert_eq!(
            report.to_lines(),
            "12755771333411681099\n2843204892003738512\n"
        );
    }

    #[test]
    fn generates_unbounded_doubles() {
        let mut opts = options(2);
        opts.arithmetic = Arithmetic::Unbounded;
        let report = generate(&opts).unwrap();
        assert_eq!(
            report.values,
            StreamValues::Doubles(vec![0.7532281207182704, 0.2065075797228122])
        );
        assert_eq!(report.final_state, None);

        opts.raw = true;
        assert!(generate(&opts).is_err());
    }

    #[test]
    fn report_json_roundtrips() {
        let report = generate(&options(5)).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: StreamReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn rewind_returns_most_recent_first() {
        let report = rewind(SEED_A, SEED_B, 10, 3).unwrap();
        assert_eq!(
            report.values,
            vec![0.1546914882182665, 0.8497658256826103, 0.914798047185873]
        );

        let mut rng = XorShift128Plus::new(SEED_A, SEED_B);
        for _ in 0..7 {
            rng.advance();
        }
        assert_eq!(report.state, rng.state());
    }

    #[test]
    fn default_rewind_count_is_capped_at_steps() {
        assert_eq!(rewind_count(None, 10, 5), 5);
        assert_eq!(rewind_count(None, 10, 50), 10);
        assert_eq!(rewind_count(None, 10, u64::MAX), 10);
        assert_eq!(rewind_count(Some(7), 10, 5), 7);

        let report = rewind(SEED_A, SEED_B, 5, rewind_count(None, 10, 5)).unwrap();
        assert_eq!(report.values.len(), 5);
        assert_eq!(report.state, RngState::from((SEED_A, SEED_B)));
    }

    #[test]
    fn rewind_cannot_pass_the_seed() {
        assert!(rewind(SEED_A, SEED_B, 2, 3).is_err());
    }

    #[test]
    fn verifies_observed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("observed.json");
        fs::write(&path, "[0.21142763700456035, 0.34411973332038825]").unwrap();

        let journal = verify_file(&path, SEED_A, SEED_B, Arithmetic::Engine, 4).unwrap();
        assert_eq!(journal.count, 2);
        assert_eq!(journal.skip, 4);

        let err = verify_file(&path, SEED_A, SEED_B, Arithmetic::Engine, 0).unwrap_err();
        assert!(format!("{err:#}").contains("sequence mismatch at index 0"));
    }

    #[test]
    fn rejects_malformed_observed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("observed.json");
        fs::write(&path, "{\"not\": \"an array\"}").unwrap();
        assert!(verify_file(&path, SEED_A, SEED_B, Arithmetic::Engine, 0).is_err());

        let missing = dir.path().join("missing.json");
        assert!(read_observed(&missing).is_err());
    }

    #[test]
    fn locates_observed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window.json");
        fs::write(&path, "[0.914798047185873, 0.8497658256826103]").unwrap();

        assert_eq!(
            locate_file(&path, SEED_A, SEED_B, Arithmetic::Engine, 50).unwrap(),
            7
        );
        assert!(locate_file(&path, SEED_A, SEED_B, Arithmetic::Engine, 6).is_err());
    }

    #[test]
    fn writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let report = generate(&options(1)).unwrap();
        write_output(&path, report.to_lines().as_bytes()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0.1751031207182704\n");
    }
}
