//! Data initialization procedures.
//!
//! The app config can list photos expected to exist after the application is
//! started. This module addresses the need for a streamlined way of turning
//! those entries into initial application state.

use std::io::Read;
use std::path::Path;

use crate::{util, Config, Database, Photo, Result};

/// Initializes database state based on entries found in the configuration.
pub fn initialize(config: &Config, db: &Database) -> Result<()> {
    photos(config, db)?;
    Ok(())
}

/// Stores the photos listed in the configuration, reading each from its file
/// on disk. A name that is already present in the store is skipped, so
/// restarts don't duplicate records.
pub fn photos(config: &Config, db: &Database) -> Result<()> {
    for seed in &config.photos {
        let name = match &seed.name {
            Some(name) => name.clone(),
            None => Path::new(&seed.path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| seed.path.clone()),
        };

        if util::find_photo_by_name(db, &name).is_ok() {
            continue;
        }

        let mut bytes = vec![];
        std::fs::File::open(&seed.path)?.read_to_end(&mut bytes)?;

        let ext = Path::new(&seed.path)
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = util::mime_for_extension(&ext);

        let photo = Photo::new(name, mime, util::encode_data_url(mime, &bytes));
        photo.store(db)?;
    }
    Ok(())
}
