// Resamples a small imbalanced dataset and prints the synthetic rows.
use geosmote::{Balance, GeometricSmote, GeometricSmoteConfig, SamplingMode};
use log::LevelFilter;
use ndarray::{array, s};

fn main() {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("GEOSMOTE_LOG", "info"))
        .init();

    let x = array![
        [1.0, 1.0],
        [1.5, 1.2],
        [1.2, 0.7],
        [6.0, 6.0],
        [6.5, 5.5],
        [5.8, 6.3],
        [6.2, 6.8],
        [7.0, 6.1],
        [5.5, 5.9],
        [6.7, 6.4],
    ];
    let y = array![
        "rare", "rare", "rare", "common", "common", "common", "common", "common", "common", "common"
    ];

    for mode in SamplingMode::ALL {
        let config = GeometricSmoteConfig::new(mode)
            .with_k_neighbors(2)
            .with_seed(42);
        let mut smote = match GeometricSmote::new(config) {
            Ok(smote) => smote,
            Err(e) => {
                eprintln!("Invalid configuration: {e}");
                return;
            }
        };

        match smote.fit_resample(&x, y.view(), &Balance) {
            Ok(resampled) => {
                println!("{mode} mode: {:?}", resampled.n_synthetic);
                let synthetic = resampled.features.slice(s![x.nrows().., ..]);
                let labels = resampled.labels.iter().skip(x.nrows());
                for (row, label) in synthetic.rows().into_iter().zip(labels) {
                    println!("  {label:>6} {row}");
                }
            }
            Err(e) => eprintln!("{mode} mode failed: {e}"),
        }
    }
}
