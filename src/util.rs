use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::db::Database;
use crate::error::{ErrorKind, Result};
use crate::Photo;

/// Finds a stored photo by its name. Names aren't unique the way ids are;
/// first match wins.
pub fn find_photo_by_name(db: &Database, name: &str) -> Result<Photo> {
    for photo in db.get_collection::<Photo>()? {
        if photo.name == name {
            return Ok(photo);
        }
    }
    Err(ErrorKind::PhotoNotFound(name.to_string()).into())
}

/// Builds a base64 data url out of raw bytes and their mime type.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Splits a base64 data url back into its mime type and decoded bytes.
pub fn decode_data_url(input: &str) -> Result<(String, Vec<u8>)> {
    let rest = input
        .strip_prefix("data:")
        .ok_or_else(|| ErrorKind::BadInput("not a data url".to_string()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| ErrorKind::BadInput("data url is not base64".to_string()))?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| ErrorKind::BadInput(format!("bad base64 payload: {}", e)))?;
    Ok((mime.to_string(), bytes))
}

/// Picks an image mime type based on a file extension. Falls back to png.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_roundtrip() {
        let url = encode_data_url("image/png", b"hello");
        assert!(url.starts_with("data:image/png;base64,"));

        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn decode_rejects_plain_strings() {
        assert!(decode_data_url("X").is_err());
        assert!(decode_data_url("data:image/png,raw-not-base64").is_err());
    }
}
