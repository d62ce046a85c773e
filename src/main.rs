//! Times bitmap decoding across set-bit densities and strategies.
//!
//! Bitmaps are filled by setting `density * words` uniformly random bits, and the
//! output buffers are sized to the exact cardinality before timing starts.

use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use bitdecode::{cardinality, BitDecoder, Strategy};

#[derive(Parser, Debug)]
#[command(name = "bitdecode", about = "Times bitmap decoding across densities and strategies")]
struct Cli {
    /// Number of 64-bit words in each bitmap.
    #[arg(long, default_value_t = 100_000)]
    words: usize,
    /// Random bits set per word, before collisions; each in 1..=64.
    #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 4, 8, 16, 32])]
    density: Vec<usize>,
    /// Time only this strategy, rather than all of them.
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,
    /// Untimed decodes before measuring.
    #[arg(long, default_value_t = 5)]
    warmup: usize,
    /// Timed decodes, averaged.
    #[arg(long, default_value_t = 10)]
    iterations: usize,
    /// Split each bitmap into this many shards, decoded in parallel.
    #[arg(long, default_value_t = 1)]
    shards: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Skip bounds checks on the output buffers.
    #[arg(long)]
    unchecked: bool,
}

impl Cli {
    fn validate(&self) -> Result<()> {
        if self.words == 0 {
            bail!("--words must be positive");
        }
        if self.shards == 0 || self.shards > self.words {
            bail!("--shards must be between 1 and --words ({}), got: {}", self.words, self.shards);
        }
        if self.iterations == 0 {
            bail!("--iterations must be positive");
        }
        if let Some(density) = self.density.iter().find(|d| !(1 ..= 64).contains(*d)) {
            bail!("density should be between 1 and 64, got: {}", density);
        }
        Ok(())
    }
}

/// Sets `density * words` random bits in a bitmap of `words` words.
fn generate(words: usize, density: usize, rng: &mut StdRng) -> Vec<u64> {
    let mut bitmap = vec![0u64; words];
    let bits = 64 * words;
    for _ in 0 .. density * words {
        let bit = rng.gen_range(0 .. bits);
        bitmap[bit / 64] |= 1 << (bit % 64);
    }
    bitmap
}

/// Decodes every shard into its buffer, returning the total cardinality.
fn decode_shards(decoder: BitDecoder, shards: &[&[u64]], outs: &mut [Vec<u32>], unchecked: bool) -> Result<usize> {
    let counts = shards
        .par_iter()
        .zip(outs.par_iter_mut())
        .map(|(words, out)| {
            if unchecked {
                // Buffers are sized by `cardinality`, and the checked pass has already accepted the span.
                Ok(unsafe { decoder.decode_unchecked(words, out) })
            } else {
                decoder.decode(words, out)
            }
        })
        .collect::<Result<Vec<usize>, _>>()?;
    Ok(counts.into_iter().sum())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    let strategies = match cli.strategy {
        Some(strategy) => vec![strategy],
        None => Strategy::ALL.to_vec(),
    };
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let shard_len = cli.words.div_ceil(cli.shards);

    for &density in cli.density.iter() {
        let timer = Instant::now();
        let bitmap = generate(cli.words, density, &mut rng);
        let shards: Vec<&[u64]> = bitmap.chunks(shard_len).collect();
        let mut outs: Vec<Vec<u32>> = shards.iter().map(|words| vec![0; cardinality(words)]).collect();
        let expected = cardinality(&bitmap);
        println!("{:?}\tdensity {}: {} words, {} set bits, {} shards", timer.elapsed(), density, cli.words, expected, shards.len());

        for &strategy in strategies.iter() {
            let decoder = BitDecoder::new(strategy);

            // Always validate with the checked path before anything unchecked runs.
            let count = decode_shards(decoder, &shards, &mut outs, false)?;
            if count != expected {
                bail!("{} decoded {} positions, expected {}", strategy, count, expected);
            }
            for _ in 1 .. cli.warmup {
                decode_shards(decoder, &shards, &mut outs, cli.unchecked)?;
            }

            let timer = Instant::now();
            for _ in 0 .. cli.iterations {
                decode_shards(decoder, &shards, &mut outs, cli.unchecked)?;
            }
            let elapsed = timer.elapsed();
            let micros = elapsed.as_secs_f64() * 1e6 / cli.iterations as f64;
            println!("{:?}\t{:<14} density {:>2}: {:>10.3} us/op{}", elapsed, strategy, density, micros, if cli.unchecked { " (unchecked)" } else { "" });
        }
    }

    Ok(())
}
