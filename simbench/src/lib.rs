//! Scenario generation and benchmarking for the wadlz codec.
//!
//! This crate provides:
//!
//! - Deterministic synthetic asset generators (noise, text, records, runs)
//! - A round-trip harness with JSON summary output
//! - Criterion benchmarks for encode and decode throughput
//!
//! # Design Principles
//!
//! - **Reproducible** - All scenarios are deterministic given a seed.
//! - **Realistic** - Scenarios model the byte patterns of packed game assets.
//! - **Measurable** - Output format suitable for CI regression tracking.

use clap::ValueEnum;
use serde::Serialize;

/// Linear congruential generator used by every scenario.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }

    /// Returns a value in `min..=max`.
    pub fn range_usize(&mut self, min: usize, max: usize) -> usize {
        let span = max.saturating_sub(min) + 1;
        min + self.next_u32() as usize % span
    }
}

/// Synthetic input shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Uniform random bytes; incompressible.
    Noise,
    /// Words from a small vocabulary, like scripts and string tables.
    Text,
    /// Fixed-size vertex records with slowly varying fields.
    Records,
    /// Runs of repeated bytes, like cleared texture regions.
    Runs,
    /// Interleaved chunks of every other scenario.
    Mixed,
}

impl Scenario {
    pub const ALL: [Self; 5] = [
        Self::Noise,
        Self::Text,
        Self::Records,
        Self::Runs,
        Self::Mixed,
    ];

    /// Generates `len` bytes for this scenario.
    #[must_use]
    pub fn generate(self, seed: u64, len: usize) -> Vec<u8> {
        let mut rng = Rng::new(seed);
        let mut out = Vec::with_capacity(len);
        match self {
            Self::Noise => fill_noise(&mut rng, &mut out, len),
            Self::Text => fill_text(&mut rng, &mut out, len),
            Self::Records => fill_records(&mut rng, &mut out, len),
            Self::Runs => fill_runs(&mut rng, &mut out, len),
            Self::Mixed => {
                let parts = [Self::Noise, Self::Text, Self::Records, Self::Runs];
                while out.len() < len {
                    let part = parts[rng.next_u32() as usize % parts.len()];
                    let chunk = rng.range_usize(512, 4096).min(len - out.len());
                    let target = out.len() + chunk;
                    match part {
                        Self::Noise => fill_noise(&mut rng, &mut out, target),
                        Self::Text => fill_text(&mut rng, &mut out, target),
                        Self::Records => fill_records(&mut rng, &mut out, target),
                        _ => fill_runs(&mut rng, &mut out, target),
                    }
                }
            }
        }
        out.truncate(len);
        out
    }
}

fn fill_noise(rng: &mut Rng, out: &mut Vec<u8>, len: usize) {
    while out.len() < len {
        out.push(rng.next_u8());
    }
}

const WORDS: [&str; 16] = [
    "player", "spawn", "level", "door", "key", "unlock", "the", "a", "ammo", "health", "crate",
    "enemy", "bolt", "vendor", "ship", "planet",
];

fn fill_text(rng: &mut Rng, out: &mut Vec<u8>, len: usize) {
    while out.len() < len {
        let word = WORDS[rng.next_u32() as usize % WORDS.len()];
        out.extend_from_slice(word.as_bytes());
        out.push(if rng.next_u32() % 12 == 0 { b'\n' } else { b' ' });
    }
    out.truncate(len);
}

fn fill_records(rng: &mut Rng, out: &mut Vec<u8>, len: usize) {
    let mut position = [0i16; 3];
    while out.len() < len {
        for axis in &mut position {
            *axis = axis.wrapping_add((rng.next_u32() % 9) as i16 - 4);
            out.extend_from_slice(&axis.to_le_bytes());
        }
        // Unit normal, material id, padding.
        out.extend_from_slice(&[0x00, 0x00, 0x80, 0x3F]);
        out.push((rng.next_u32() % 4) as u8);
        out.extend_from_slice(&[0x00; 5]);
    }
    out.truncate(len);
}

fn fill_runs(rng: &mut Rng, out: &mut Vec<u8>, len: usize) {
    while out.len() < len {
        let byte = rng.next_u8();
        let run = rng.range_usize(1, 300);
        out.extend(std::iter::repeat(byte).take(run));
    }
    out.truncate(len);
}
