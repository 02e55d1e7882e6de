//! Criterion benchmarks for aleatorio-synth
//!
//! Run with: cargo bench -p aleatorio-synth

use aleatorio_core::{Poly, Sine, Train, Voice, Wagon};
use aleatorio_synth::{PartialTable, PlacementPolicy, deconstruct, place_poly, synthesize};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

const DURATIONS_MS: &[usize] = &[10, 100, 1000];

// ============================================================================
// Tone synthesis
// ============================================================================

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Synthesize");

    for &ms in DURATIONS_MS {
        let len = ms * 44;
        group.bench_with_input(BenchmarkId::new("sine", ms), &len, |b, &len| {
            b.iter(|| black_box(synthesize(black_box(440.0), 0.5, len, 0.0)))
        });
    }

    group.finish();
}

// ============================================================================
// Score deconstruction
// ============================================================================

fn score(voices: usize) -> Poly {
    (0..voices)
        .map(|v| {
            let mut voice = Voice::new();
            for i in 0..8 {
                let f = 110.0 * (1 + v + i) as f64;
                voice.push(Train::new(Wagon::new(Sine::new(f, 0.1, 100), i as f64 / 8.0)));
            }
            voice
        })
        .collect()
}

fn bench_deconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deconstruct");

    for &voices in &[1usize, 4] {
        let mut poly = score(voices);
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        place_poly(&mut poly, &PartialTable::naive(), &PlacementPolicy::Random, &mut rng);

        for &speakers in &[2usize, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("{voices}v"), speakers),
                &speakers,
                |b, &speakers| b.iter(|| black_box(deconstruct(&poly, speakers))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_synthesize, bench_deconstruct);
criterion_main!(benches);
