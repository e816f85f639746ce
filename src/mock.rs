//! Module tasked with generating mock data to populate the application.

use rand::prelude::SliceRandom;

use crate::{Config, Database, Photo, Result};

/// Smallest valid png, kept as a ready-made payload so mock records hold
/// something a browser will actually render.
const MOCK_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// Generates and saves various mocking data in the database.
pub fn generate(config: &Config, db: &Database) -> Result<()> {
    photos(config, db)?;

    Ok(())
}

pub fn photos(config: &Config, db: &Database) -> Result<()> {
    // leave an already populated collection alone
    if db.len::<Photo>()? > 0 && config.dev.mock_regen != true {
        return Ok(());
    }

    let names = [
        "sunset.png",
        "harbor.png",
        "lighthouse.png",
        "meadow.png",
        "rooftops.png",
    ];
    for name in names.choose_multiple(&mut rand::thread_rng(), 3) {
        let photo = Photo::new(
            name.to_string(),
            "image/png",
            format!("data:image/png;base64,{}", MOCK_PNG_BASE64),
        );
        photo.store(db)?;
    }

    Ok(())
}
