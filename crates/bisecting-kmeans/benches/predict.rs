use criterion::*;
use rand::prelude::*;

use bisecting_kmeans::{metric::Euclidean, BisectingKMeansModel, ClusterNode, Partitioned};

fn random_rows(cardinality: usize, dimensionality: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..cardinality)
        .map(|_| (0..dimensionality).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect()
}

/// Pairs up adjacent nodes until one is left, so the tree is balanced.
fn balanced_tree(centers: Vec<Vec<f64>>) -> ClusterNode<f64> {
    let mut nodes = centers
        .into_iter()
        .enumerate()
        .map(|(i, c)| ClusterNode::leaf(i, c))
        .collect::<Vec<_>>();
    let mut next_index = nodes.len();
    let mut height = 0.0;

    while nodes.len() > 1 {
        height += 1.0;
        let mut merged = Vec::with_capacity(nodes.len() / 2 + 1);
        let mut nodes_iter = nodes.into_iter();
        while let Some(left) = nodes_iter.next() {
            match nodes_iter.next() {
                Some(right) => {
                    let center = left
                        .center()
                        .iter()
                        .zip(right.center())
                        .map(|(l, r)| (l + r) / 2.0)
                        .collect();
                    merged.push(ClusterNode::internal(next_index, center, height, left, right));
                    next_index += 1;
                }
                None => merged.push(left),
            }
        }
        nodes = merged;
    }

    nodes.pop().unwrap_or_else(|| unreachable!("There is at least one center."))
}

fn predict(c: &mut Criterion) {
    let seed = 42;
    let dimensionality = 10;
    let cardinality = 100_000;
    let points = random_rows(cardinality, dimensionality, seed);

    for k in [16, 256] {
        let root = balanced_tree(random_rows(k, dimensionality, seed + 1));
        let model = BisectingKMeansModel::new(root, Euclidean).unwrap_or_else(|e| unreachable!("{e}"));

        let mut group = c.benchmark_group(format!("predict-k{k}"));
        group
            .sample_size(10)
            .sampling_mode(SamplingMode::Flat)
            .throughput(Throughput::Elements(cardinality as u64));

        group.bench_function("predict_many", |b| {
            b.iter_with_large_drop(|| model.predict_many(&points));
        });

        group.bench_function("par_predict_many", |b| {
            b.iter_with_large_drop(|| model.par_predict_many(&points));
        });

        for num_partitions in [1, 4, 16] {
            let data = Partitioned::from_vec(points.clone(), num_partitions);
            let id = BenchmarkId::new("par_predict", num_partitions);
            group.bench_with_input(id, &num_partitions, |b, _| {
                b.iter_with_large_drop(|| model.par_predict(&data));
            });
        }

        group.finish();
    }
}

criterion_group!(benches, predict);
criterion_main!(benches);
