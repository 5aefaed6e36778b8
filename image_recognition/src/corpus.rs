use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use neural_network::{Network, TrainingPair, TrainingSet};
use rand::Rng;

use crate::{Result, bitmap, codec::ImageCodec, recognizer::Recognizer};

/// Builds training sets out of a directory of labeled images.
///
/// Every subdirectory of the root named after a label (ignoring case) holds sample images of
/// that label. Anything else under the root is ignored.
#[derive(Clone, Debug)]
pub struct TrainingSetGenerator {
    root: PathBuf,
}

impl TrainingSetGenerator {
    /// Creates a new `TrainingSetGenerator`.
    ///
    /// # Arguments
    /// * `root` - The directory holding one subdirectory per label.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads every sample image under the root and encodes it the way `recognizer` would.
    ///
    /// Files that can't be read or decoded are skipped, so are subdirectories that can't be
    /// listed. A missing root yields an empty set.
    ///
    /// # Arguments
    /// * `recognizer` - Provides the labels, their templates and the image encoding.
    /// * `rng` - Used to shuffle the resulting set.
    ///
    /// # Returns
    /// The shuffled training set or an io error if the root exists but can't be listed.
    pub fn generate<N, C, L, R>(
        &self,
        recognizer: &Recognizer<N, C, L>,
        rng: &mut R,
    ) -> Result<TrainingSet>
    where
        N: Network,
        C: ImageCodec,
        L: Clone + PartialEq + fmt::Display,
        R: Rng + ?Sized,
    {
        let directories = match sorted_entries(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("training directory {} not found, no training pairs", self.root.display());
                return Ok(TrainingSet::new());
            }
            Err(e) => return Err(e.into()),
        };

        let labels = recognizer.labels();
        let mut set = TrainingSet::new();

        for directory in directories.into_iter().filter(|path| path.is_dir()) {
            let Some(label) = directory
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| {
                    labels
                        .labels()
                        .iter()
                        .find(|label| label.to_string().to_lowercase() == name.to_lowercase())
                })
            else {
                debug!("no label for directory {}", directory.display());
                continue;
            };

            let Some(target) = labels.template(label) else {
                continue;
            };

            let files = match sorted_entries(&directory) {
                Ok(files) => files,
                Err(e) => {
                    warn!("skipping unreadable directory {}: {e}", directory.display());
                    continue;
                }
            };

            let before = set.len();
            for file in files.into_iter().filter(|path| path.is_file()) {
                match bitmap::open(&file) {
                    Ok(image) => set.push(TrainingPair::named(
                        label.to_string(),
                        recognizer.input_for(&image),
                        target.clone(),
                    )),
                    Err(e) => warn!("skipping training image {}: {e}", file.display()),
                }
            }

            debug!("{} training pairs for {label}", set.len() - before);
        }

        set.shuffle(rng);
        info!("loaded {} training pairs from {}", set.len(), self.root.display());
        Ok(set)
    }
}

fn sorted_entries(directory: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(directory)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()?;

    entries.sort();
    Ok(entries)
}
