use std::env;

use anyhow::Context;
use constellation_recognition::{Config, RecognitionService};
use futures::future::join_all;
use image_recognition::{BlackWhite, LabelCodec, Recognizer};
use log::info;
use neural_network::{BackPropagation, FeedForward};
use rand::{SeedableRng, rngs::StdRng};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env().context("failed to load the config")?;

    let mut rng = match config.network.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let rule = BackPropagation::new(config.network.learning_rate);
    let network = FeedForward::new(rule, &config.topology(), &mut rng)
        .context("failed to build the network")?;
    let labels = LabelCodec::new(config.app.labels.clone())?;
    let recognizer = Recognizer::new(
        BlackWhite::default(),
        network,
        labels,
        config.app.resize_image,
    )?;

    let app = config.app.clone();
    let service =
        tokio::task::spawn_blocking(move || RecognitionService::start(recognizer, &app, &mut rng))
            .await??;

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        info!("no images to identify");
        return Ok(());
    }

    let identifications = join_all(paths.iter().map(|path| service.identify_file(path))).await;
    for (path, identification) in paths.iter().zip(identifications) {
        match identification {
            Ok(identification) => println!("{path}: {identification}"),
            Err(e) => println!("{path}: {e}"),
        }
    }

    Ok(())
}
