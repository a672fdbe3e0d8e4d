/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kdir::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_points(rng: &mut SmallRng, count: usize, dim: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let coords: Vec<f32> = (0..dim).map(|_| rng.gen::<f32>()).collect();
            Point::new(coords, i).unwrap()
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0);
    let points = random_points(&mut rng, 10000, 20);
    let queries = random_points(&mut rng, 100, 20);

    let mut build_group = c.benchmark_group("build");
    build_group.sample_size(10);
    for method in &[SplitMethod::MaxSpread, SplitMethod::Random, SplitMethod::Incremental] {
        build_group.bench_with_input(BenchmarkId::from_parameter(method), method, |b, m| {
            b.iter(|| {
                let mut builder = KdTreeBuilder::new();
                builder.set_split_method(*m).set_rng_seed(0);
                builder.build(KdArray::from_slice(&points).unwrap()).unwrap()
            })
        });
    }
    build_group.finish();

    let tree = KdTreeBuilder::new()
        .build(KdArray::from_slice(&points).unwrap())
        .unwrap();
    let mut knn_group = c.benchmark_group("knn");
    for k in &[1usize, 5, 20] {
        knn_group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, k| {
            b.iter(|| {
                for q in &queries {
                    black_box(tree.knn(q, *k).unwrap());
                }
            })
        });
    }
    knn_group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
