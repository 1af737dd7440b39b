use knn_select::Dataset;

/// Feature 1 separates the classes, feature 2 is constant.
pub fn separable() -> Dataset {
    Dataset::from_rows(vec![
        vec![1.0, 1.0, 10.0],
        vec![1.0, 1.1, 10.0],
        vec![2.0, 5.0, 10.0],
        vec![2.0, 5.1, 10.0],
    ])
    .unwrap()
}

/// Deterministic pseudo-random table with a few informative columns.
///
/// Features 2 and 5 carry the class signal; the rest are noise generated by
/// a linear congruential sequence so the data is identical on every run.
pub fn noisy(n_samples: usize, n_features: usize) -> Dataset {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((state >> 33) as f64) / ((1u64 << 31) as f64)
    };

    let rows = (0..n_samples)
        .map(|i| {
            let label = if i % 2 == 0 { 1.0 } else { 2.0 };
            let mut row = vec![label];
            for f in 1..=n_features {
                let noise = next();
                let value = if f == 2 || f == 5 {
                    label * 2.0 + noise * 1.5
                } else {
                    noise * 4.0
                };
                row.push(value);
            }
            row
        })
        .collect();

    Dataset::from_rows(rows).unwrap()
}
