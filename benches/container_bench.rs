use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pgm_sorted::SortedContainer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_uniform(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data: Vec<u64> = (0..n).map(|_| rng.gen()).collect();
    data.sort_unstable();
    data.dedup();
    data
}

fn generate_queries(data: &[u64], count: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                data[rng.gen_range(0..data.len())]
            } else {
                rng.gen()
            }
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[100_000usize, 1_000_000] {
        let data = generate_uniform(n, 1);
        group.throughput(Throughput::Elements(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| SortedContainer::from_values(data.iter().copied(), false, 64).unwrap());
        });
    }
    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains");
    let data = generate_uniform(1_000_000, 2);
    let queries = generate_queries(&data, 10_000, 3);
    let container = SortedContainer::from_values(data.iter().copied(), false, 64).unwrap();

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("pgm", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &q in &queries {
                hits += container.contains(black_box(q)) as usize;
            }
            hits
        });
    });
    group.bench_function("binary_search", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &q in &queries {
                hits += data.binary_search(black_box(&q)).is_ok() as usize;
            }
            hits
        });
    });
    group.finish();
}

fn bench_lower_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("lower_bound");
    let data = generate_uniform(1_000_000, 4);
    let queries = generate_queries(&data, 10_000, 5);
    let container = SortedContainer::from_values(data.iter().copied(), false, 64).unwrap();

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("pgm", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for &q in &queries {
                acc = acc.wrapping_add(container.lower_bound(black_box(q)));
            }
            acc
        });
    });
    group.bench_function("partition_point", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for &q in &queries {
                acc = acc.wrapping_add(data.partition_point(|k| *k < black_box(q)));
            }
            acc
        });
    });
    group.finish();
}

fn bench_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("union");
    let a = SortedContainer::from_values(generate_uniform(500_000, 6), false, 64).unwrap();
    let b_side = SortedContainer::from_values(generate_uniform(500_000, 7), false, 64).unwrap();

    group.bench_function("500k_x_500k", |bench| {
        bench.iter(|| a.union(black_box(&b_side)));
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_contains, bench_lower_bound, bench_union);
criterion_main!(benches);
