use std::{fs, path::Path, time::Duration};

use constellation_recognition::{AppConfig, Config, Identification, RecognitionService};
use futures::future::join_all;
use image::{Rgba, RgbaImage};
use image_recognition::{BlackWhite, LabelCodec, Recognizer};
use neural_network::{BackPropagation, FeedForward};
use rand::{SeedableRng, rngs::StdRng};
use tempfile::TempDir;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn top_half() -> RgbaImage {
    RgbaImage::from_fn(4, 4, |_, y| if y < 2 { BLACK } else { WHITE })
}

fn bottom_half() -> RgbaImage {
    RgbaImage::from_fn(4, 4, |_, y| if y < 2 { WHITE } else { BLACK })
}

fn write_corpus(root: &Path) {
    for (label, image) in [("north", top_half()), ("south", bottom_half())] {
        let dir = root.join(label);
        fs::create_dir(&dir).unwrap();
        image.save(dir.join("0.png")).unwrap();
        image.save(dir.join("1.bmp")).unwrap();
    }
}

fn config(corpus: &Path) -> Config {
    let json = format!(
        r#"{{
            "network": {{
                "input_nodes": 16,
                "hidden_nodes": 8,
                "hidden_layers": 1,
                "weight_range": 1.0,
                "learning_rate": 0.5,
                "seed": 11
            }},
            "app": {{
                "labels": ["NORTH", "SOUTH"],
                "resize_image": true,
                "training_dir": {dir},
                "training_iterations": "150",
                "identification_timeout_ms": 5000
            }}
        }}"#,
        dir = serde_json::to_string(corpus).unwrap()
    );

    Config::from_json(&json).unwrap()
}

fn start(config: &Config) -> RecognitionService<FeedForward<BackPropagation>, BlackWhite, String> {
    let mut rng = StdRng::seed_from_u64(config.network.seed.unwrap());
    let rule = BackPropagation::new(config.network.learning_rate);
    let network = FeedForward::new(rule, &config.topology(), &mut rng).unwrap();
    let labels = LabelCodec::new(config.app.labels.clone()).unwrap();
    let recognizer =
        Recognizer::new(BlackWhite::default(), network, labels, config.app.resize_image).unwrap();

    RecognitionService::start(recognizer, &config.app, &mut rng).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn trains_at_startup_and_identifies_files_concurrently() {
    let corpus = TempDir::new().unwrap();
    write_corpus(corpus.path());

    let config = config(corpus.path());
    assert_eq!(config.app.training_iterations, 150);
    let service = start(&config);
    assert_eq!(service.timeout(), Some(Duration::from_millis(5000)));

    let queries = TempDir::new().unwrap();
    let north = queries.path().join("north.png");
    let south = queries.path().join("south.png");
    let broken = queries.path().join("broken.png");
    top_half().save(&north).unwrap();
    bottom_half().save(&south).unwrap();
    fs::write(&broken, b"nope").unwrap();

    let paths = [&north, &south, &broken];
    let results = join_all(paths.iter().map(|path| service.identify_file(path))).await;

    let mut results = results.into_iter();
    assert_eq!(
        results.next().unwrap().unwrap(),
        Identification::Recognized("NORTH".to_string())
    );
    assert_eq!(
        results.next().unwrap().unwrap(),
        Identification::Recognized("SOUTH".to_string())
    );
    assert!(results.next().unwrap().is_err());
}

#[tokio::test]
async fn untrained_service_still_answers() {
    let corpus = TempDir::new().unwrap();
    let mut config = config(corpus.path());
    config.app = AppConfig {
        training_iterations: 0,
        identification_timeout_ms: None,
        ..config.app
    };

    let service = start(&config);
    assert_eq!(service.timeout(), None);

    let identification = service.identify(top_half()).await;
    assert!(identification.is_ok());
}
