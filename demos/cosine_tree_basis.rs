// Adaptive cosine tree approximation of a random low-rank matrix.

use cosine_tree::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dimension = (500, 200);

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mat = f64::random_approximate_low_rank_matrix(dimension, 1.0, 1E-10, &mut rng);

    let config = CosineTreeConfig::new(100, 1E-6).with_seed(1);
    let result = match cosine_tree_approximation(&mat, config) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Approximation failed: {}", err);
            return;
        }
    };

    for (rank, residual) in result.residual_history().iter().step_by(5) {
        println!("rank {:4}  relative residual {:.3E}", rank, residual);
    }

    let rel_diff = f64::rel_diff_fro(result.to_mat().view(), mat.view());

    println!("Rank: {}", result.rank());
    println!("Splits: {}", result.splits());
    println!("Tolerance met: {}", result.tolerance_met());
    println!("Relative Frobenius error: {:.3E}", rel_diff);
}
