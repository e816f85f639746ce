//! Module handling photo records, the only kind of data this application
//! stores.

use uuid::Uuid;
use validator::ValidateLength;

use crate::db::{Collectable, Database, Identifiable};
use crate::error::ErrorKind;
use crate::Result;

pub type PhotoId = Uuid;

/// A single stored photo. The payload travels as a base64 data url, exactly
/// as the upload produced it; the store never looks inside.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Photo {
    pub id: PhotoId,

    /// Original file name.
    pub name: String,

    /// MIME type, always `image/*` for stored records.
    pub r#type: String,

    /// Base64 data url carrying the encoded image bytes.
    pub data: String,
}

impl Photo {
    /// Creates a record with a freshly assigned id. Ids are assigned here,
    /// never taken from the caller.
    pub fn new(
        name: impl Into<String>,
        r#type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id: PhotoId::new_v4(),
            name: name.into(),
            r#type: r#type.into(),
            data: data.into(),
        }
    }

    /// Gets all stored photos, in whatever order the store yields them.
    pub fn collection(db: &Database) -> Result<Vec<Photo>> {
        db.get_collection::<Photo>()
    }

    pub fn get(id: PhotoId, db: &Database) -> Result<Photo> {
        db.get::<Photo>(id)
    }

    pub fn store(&self, db: &Database) -> Result<()> {
        db.set(self)
    }

    /// Removes the photo by id. An id that was never stored is a no-op.
    pub fn remove(id: PhotoId, db: &Database) -> Result<()> {
        db.remove::<Photo>(id)
    }
}

impl Collectable for Photo {
    fn get_collection_name() -> &'static str {
        "photos"
    }
}

impl Identifiable for Photo {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Upload input as it arrives at the boundary, untrusted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PhotoUpload {
    pub name: String,
    pub r#type: String,
    pub data: String,
}

impl PhotoUpload {
    /// Checks the field constraints, reporting the first offending field.
    /// Nothing reaches the store unless this passes.
    pub fn validate(&self) -> Result<()> {
        if !self.name.validate_length(Some(1), None, None) {
            return Err(ErrorKind::BadInput("name must not be empty".to_string()).into());
        }
        if !is_image_mime(&self.r#type) {
            return Err(ErrorKind::BadInput(format!(
                "type must be an image mime type, got '{}'",
                self.r#type
            ))
            .into());
        }
        if !self.data.validate_length(Some(1), None, None) {
            return Err(ErrorKind::BadInput("data must not be empty".to_string()).into());
        }
        Ok(())
    }
}

/// True for well-formed mime types under the `image` top-level type.
fn is_image_mime(input: &str) -> bool {
    input
        .parse::<mime::Mime>()
        .map(|m| m.type_() == mime::IMAGE)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, r#type: &str, data: &str) -> PhotoUpload {
        PhotoUpload {
            name: name.to_string(),
            r#type: r#type.to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn valid_upload_passes() {
        assert!(upload("a.png", "image/png", "X").validate().is_ok());
        assert!(upload("b.jpg", "image/jpeg", "Y").validate().is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(upload("", "image/png", "X").validate().is_err());
    }

    #[test]
    fn non_image_type_rejected() {
        assert!(upload("a.txt", "text/plain", "X").validate().is_err());
        assert!(upload("a", "image", "X").validate().is_err());
        assert!(upload("a", "image/", "X").validate().is_err());
        assert!(upload("a", "", "X").validate().is_err());
    }

    #[test]
    fn empty_data_rejected() {
        assert!(upload("a.png", "image/png", "").validate().is_err());
    }

    #[test]
    fn new_assigns_distinct_ids() {
        let a = Photo::new("a.png", "image/png", "X");
        let b = Photo::new("a.png", "image/png", "X");
        assert_ne!(a.id, b.id);
    }
}
