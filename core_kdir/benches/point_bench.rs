use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use core_kdir::*;

fn random_point<R: Rng>(rng: &mut R, dim: usize, index: usize) -> Point {
    Point::new((0..dim).map(|_| rng.gen::<f32>()).collect(), index).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut group = c.benchmark_group("l2_squared");
    for dim in [2usize, 10, 20, 28, 128].iter() {
        let x = random_point(&mut rng, *dim, 0);
        let y = random_point(&mut rng, *dim, 1);
        group.bench_with_input(BenchmarkId::new("point", dim), &(x, y), |b, (x, y)| {
            b.iter(|| black_box(x).l2_squared(black_box(y)))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
