//! Data generation utilities for testing.

use rand::prelude::*;

pub fn tabular(car: usize, dim: usize, min: f64, max: f64, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..car)
        .map(|_| (0..dim).map(|_| rng.gen_range(min..max)).collect())
        .collect()
}

pub fn line(max: i32) -> Vec<Vec<f64>> {
    (-max..=max).map(|x| vec![f64::from(x)]).collect()
}
