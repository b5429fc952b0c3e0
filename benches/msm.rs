use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_std::UniformRand;
use bnpair::{MsmConfig, msm};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};

fn bench_msm(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("msm_g1");

    for log_size in [8, 10, 12] {
        let size = 1 << log_size;
        let scalars: Vec<Fr> = (0..size).map(|_| Fr::rand(&mut rng)).collect();
        let bases: Vec<G1Affine> = (0..size)
            .map(|_| G1Projective::rand(&mut rng).into_affine())
            .collect();

        group.bench_with_input(BenchmarkId::new("bnpair", size), &size, |b, _| {
            let config = MsmConfig::default();
            b.iter(|| {
                let res = msm(black_box(&bases), black_box(&scalars), &config).unwrap();
                black_box(res);
            });
        });

        group.bench_with_input(BenchmarkId::new("bnpair_sequential", size), &size, |b, _| {
            let config = MsmConfig::sequential();
            b.iter(|| {
                let res = msm(black_box(&bases), black_box(&scalars), &config).unwrap();
                black_box(res);
            });
        });

        group.bench_with_input(BenchmarkId::new("arkworks", size), &size, |b, _| {
            b.iter(|| {
                let res = G1Projective::msm(black_box(&bases), black_box(&scalars)).unwrap();
                black_box(res);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_msm);
criterion_main!(benches);
