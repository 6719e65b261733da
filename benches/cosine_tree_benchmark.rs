use cosine_tree::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn low_rank_matrix(dimension: (usize, usize)) -> Array2<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    f64::random_approximate_low_rank_matrix(dimension, 1.0, 1E-8, &mut rng)
}

fn bench_cosine_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("cosine_tree");

    for &dimension in [(200, 100), (500, 300), (1000, 500)].iter() {
        let mat = low_rank_matrix(dimension);
        let label = format!("{}x{}", dimension.0, dimension.1);

        for &tol in [1E-2, 1E-4].iter() {
            let id = BenchmarkId::new(format!("tol_{:.0E}", tol), &label);
            group.bench_with_input(id, &mat, |b, mat| {
                b.iter(|| {
                    let config = CosineTreeConfig::new(100, tol).with_seed(7);
                    let result = cosine_tree_approximation(black_box(mat), config).unwrap();
                    black_box(result.rank())
                })
            });
        }
    }

    group.finish();
}

fn bench_single_split(c: &mut Criterion) {
    let mat = low_rank_matrix((1000, 1000));

    c.bench_function("split_root_1000x1000", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        b.iter(|| {
            let mut tree = CosineTree::new(&mat);
            let root = tree.root();
            black_box(tree.split(root, &mut rng).unwrap())
        })
    });
}

criterion_group!(benches, bench_cosine_tree, bench_single_split);
criterion_main!(benches);
