//! Run seed selection: `--seed <n>` / `--seed=<n>` from the command line, else a fresh one.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |elapsed| elapsed.as_nanos());
    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    let entropy = (nanos as u64)
        ^ ((nanos >> 64) as u64)
        ^ u64::from(process::id()).rotate_left(17)
        ^ counter.rotate_left(7);
    splitmix(entropy)
}

/// `args[0]` is the program name and is skipped. Unknown arguments are ignored.
pub fn resolve_seed_from_args(args: &[String], generated: u64) -> Result<SeedChoice, String> {
    let mut chosen = None;
    let mut rest = args.iter().skip(1);
    while let Some(argument) = rest.next() {
        let raw = if argument == "--seed" {
            rest.next()
                .map(String::as_str)
                .ok_or_else(|| "missing value for --seed".to_string())?
        } else if let Some(inline) = argument.strip_prefix("--seed=") {
            inline
        } else {
            continue;
        };
        if chosen.is_some() {
            return Err("seed provided more than once".to_string());
        }
        let seed =
            raw.parse::<u64>().map_err(|_| format!("seed value '{raw}' must be a number"))?;
        chosen = Some(seed);
    }
    Ok(chosen.map_or(SeedChoice::Generated(generated), SeedChoice::Cli))
}

fn splitmix(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
