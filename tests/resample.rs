use std::collections::BTreeMap;

use geosmote::{
    Balance, ClassPartition, Distance, GeometricSmote, GeometricSmoteConfig, KNearestNeighbors,
    L2Dist, MinorityOnly, SamplingMode, SmoteError, minority_radii, plan_draws,
};
use ndarray::{Array1, Array2, array, s};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn dataset() -> (Array2<f64>, Array1<u8>) {
    let x = array![
        [0.0, 0.0],
        [1.0, 0.5],
        [0.4, 1.2],
        [8.0, 8.0],
        [8.5, 7.5],
        [7.2, 8.1],
        [9.0, 9.2],
        [7.7, 7.0],
        [8.8, 6.9],
        [9.4, 8.3],
    ];
    let y = array![1, 1, 1, 0, 0, 0, 0, 0, 0, 0];
    (x, y)
}

#[test]
fn test_minority_samples_stay_inside_anchor_balls() {
    let (x, y) = dataset();
    let seed = 2024;
    let config = GeometricSmoteConfig::new(SamplingMode::Minority)
        .with_k_neighbors(1)
        .with_seed(seed);
    let mut smote = GeometricSmote::new(config).unwrap();
    let resampled = smote
        .fit_resample(&x, y.view(), &BTreeMap::from([(1u8, 5)]))
        .unwrap();

    assert_eq!(resampled.features.dim(), (15, 2));
    assert_eq!(resampled.features.slice(s![..10, ..]), x);
    assert!(resampled.labels.iter().skip(10).all(|&l| l == 1));

    // replay the draw plan to recover each sample's anchor and radius
    let positive = ClassPartition::new(y.view(), 1u8).positive_rows(x.view());
    let mut search = KNearestNeighbors::<f64>::default();
    let radii = minority_radii(&mut search, positive.view(), 1).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let draws = plan_draws(radii.view(), 5, &mut rng).unwrap();

    let synthetic = resampled.features.slice(s![10.., ..]);
    for (sample, draw) in synthetic.rows().into_iter().zip(&draws) {
        let anchor = positive.row(draw.row);
        let distance = L2Dist.distance(sample, anchor);
        assert!(distance <= radii[[draw.row, draw.col]] + 1e-12);
    }
}

#[test]
fn test_every_mode_balances_and_is_reproducible() {
    let (x, y) = dataset();
    for mode in SamplingMode::ALL {
        let config = GeometricSmoteConfig::new(mode)
            .with_k_neighbors(2)
            .with_seed(7);
        let a = GeometricSmote::new(config.clone())
            .unwrap()
            .fit_resample(&x, y.view(), &Balance)
            .unwrap();
        let b = GeometricSmote::new(config.with_parallel(true))
            .unwrap()
            .fit_resample(&x, y.view(), &Balance)
            .unwrap();

        assert_eq!(a.features.nrows(), 14);
        assert_eq!(a.n_synthetic, BTreeMap::from([(1, 4)]));
        assert_eq!(a, b);
    }
}

#[test]
fn test_mode_name_from_config_string() {
    let config = GeometricSmoteConfig::from_mode_name("majority").unwrap();
    assert_eq!(config.mode, SamplingMode::Majority);

    for name in ["hybrid", " Majority "] {
        let result = GeometricSmoteConfig::from_mode_name(name);
        assert_eq!(result.unwrap_err(), SmoteError::UnknownMode(name.to_string()));
    }
}

#[test]
fn test_too_few_minority_points_surfaces_search_error() {
    let (x, y) = dataset();
    let config = GeometricSmoteConfig::new(SamplingMode::Minority)
        .with_k_neighbors(5)
        .with_seed(0);
    let mut smote = GeometricSmote::new(config).unwrap();
    let result = smote.fit_resample(&x, y.view(), &Balance);
    assert!(matches!(result, Err(SmoteError::Search(_))));
}

#[test]
fn test_minority_only_fills_just_the_smallest_class() {
    let x = array![
        [0.0, 0.0],
        [0.5, 0.2],
        [4.0, 4.0],
        [4.2, 3.9],
        [3.8, 4.1],
        [9.0, 0.0],
        [9.1, 0.3],
        [8.7, 0.1],
        [9.4, 0.2],
        [8.9, 0.4],
    ];
    let y = array![2u8, 2, 1, 1, 1, 0, 0, 0, 0, 0];
    let config = GeometricSmoteConfig::new(SamplingMode::Regular)
        .with_k_neighbors(1)
        .with_seed(11);
    let resampled = GeometricSmote::new(config)
        .unwrap()
        .fit_resample(&x, y.view(), &MinorityOnly)
        .unwrap();

    assert_eq!(resampled.n_synthetic, BTreeMap::from([(2, 3)]));
    assert_eq!(resampled.features.nrows(), 13);
    assert!(resampled.labels.iter().skip(10).all(|&l| l == 2));
}
