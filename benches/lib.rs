use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{hint::black_box, time::Duration};

use strider::{
    Scoring,
    smith_waterman::{StripedAligner, StripedSolver, banded, reference},
    simd::PortableVector,
};

fn random_seq(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| b"ACGT"[rng.random_range(0..4)]).collect()
}

/// Mutates roughly one in ten positions, so the pair still aligns end to end
fn mutate(rng: &mut StdRng, seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .map(|&base| {
            if rng.random_bool(0.1) {
                b"ACGT"[rng.random_range(0..4)]
            } else {
                base
            }
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let scoring = Scoring::default();

    let mut group = c.benchmark_group("align");
    for len in [64, 256, 1024] {
        let seq1 = random_seq(&mut rng, len);
        let seq2 = mutate(&mut rng, &seq1);
        group.throughput(Throughput::Elements((len * len) as u64));

        group.bench_with_input(BenchmarkId::new("naive", len), &len, |b, _| {
            b.iter(|| reference::smith_waterman::<i32>(black_box(&seq1), black_box(&seq2), &scoring))
        });
        group.bench_with_input(BenchmarkId::new("banded", len), &len, |b, _| {
            b.iter(|| banded::banded::<i32>(black_box(&seq1), black_box(&seq2), &scoring, 20))
        });

        let aligner = StripedAligner::new(&seq2, &scoring).unwrap();
        group.bench_with_input(
            BenchmarkId::new(format!("striped-{}", aligner.backend()), len),
            &len,
            |b, _| b.iter(|| aligner.align(black_box(&seq1)).unwrap()),
        );

        let portable = StripedSolver::<PortableVector<8>>::new(&seq2, &scoring);
        group.bench_with_input(BenchmarkId::new("striped-portable", len), &len, |b, _| {
            b.iter(|| portable.align(black_box(&seq1)).unwrap())
        });
    }
    group.finish();

    // Score only, no traceback
    let seq1 = random_seq(&mut rng, 2048);
    let seq2 = mutate(&mut rng, &seq1);
    c.bench_function("linear-space score", |b| {
        b.iter(|| reference::score::<i32>(black_box(&seq1), black_box(&seq2), &scoring))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2));
    targets = criterion_benchmark
}
criterion_main!(benches);
