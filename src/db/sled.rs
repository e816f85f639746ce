use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ErrorKind, Result};

use super::{decode, encode, Collectable, Identifiable};

/// Keyed record store on top of sled.
///
/// Every operation opens the tree backing its collection for just that call;
/// no tree handle outlives a single operation. Opening a tree also creates
/// it, so collections exist from first use.
#[derive(Clone, Debug)]
pub struct SledDb {
    inner: sled::Db,
}

impl SledDb {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let inner = sled::Config::default()
            .path(path)
            .open()
            .map_err(|e| ErrorKind::StorageUnavailable(e.to_string()))?;
        Ok(Self { inner })
    }

    fn tree<T: Collectable>(&self) -> Result<sled::Tree> {
        self.inner
            .open_tree(T::get_collection_name())
            .map_err(|e| ErrorKind::StorageUnavailable(e.to_string()).into())
    }

    /// Gets all the entries from the collection defined for the type. An
    /// empty collection comes back as an empty list, not an error.
    pub fn get_collection<T: DeserializeOwned + Collectable>(&self) -> Result<Vec<T>> {
        let tree = self.tree::<T>()?;
        let mut out = Vec::new();
        for entry in tree.iter() {
            let (_, value_bytes) = entry.map_err(|e| ErrorKind::ReadFailed(e.to_string()))?;
            let value: T =
                decode(&value_bytes).map_err(|e| ErrorKind::ReadFailed(e.kind.to_string()))?;
            out.push(value);
        }
        Ok(out)
    }

    /// Returns the length of the collection as defined for the specified type.
    pub fn len<T: Collectable>(&self) -> Result<usize> {
        Ok(self.tree::<T>()?.len())
    }

    /// Gets an item by id from the collection defined for the item type.
    pub fn get<T: DeserializeOwned + Collectable>(&self, id: Uuid) -> Result<T> {
        let tree = self.tree::<T>()?;
        match tree
            .get(id)
            .map_err(|e| ErrorKind::ReadFailed(e.to_string()))?
        {
            Some(value_bytes) => {
                decode(&value_bytes).map_err(|e| ErrorKind::ReadFailed(e.kind.to_string()).into())
            }
            None => Err(ErrorKind::NotFound(id).into()),
        }
    }

    /// Stores the full item under its id, overwriting any previous value.
    pub fn set<T: Serialize + Identifiable + Collectable>(&self, value: &T) -> Result<()> {
        let tree = self.tree::<T>()?;
        let encoded = encode(value).map_err(|e| ErrorKind::WriteFailed(e.kind.to_string()))?;
        tree.insert(value.get_id(), encoded)
            .map_err(|e| ErrorKind::WriteFailed(e.to_string()))?;
        Ok(())
    }

    /// Removes an item by id. Removing an id that was never stored is a
    /// no-op, not an error.
    pub fn remove<T: Collectable>(&self, id: Uuid) -> Result<()> {
        let tree = self.tree::<T>()?;
        let prior = tree
            .remove(id)
            .map_err(|e| ErrorKind::WriteFailed(e.to_string()))?;
        if prior.is_none() {
            tracing::debug!(
                "removed absent id {} from collection {}",
                id,
                T::get_collection_name()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::SledDb;
    use crate::db::{Collectable, Identifiable};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Uuid,
        text: String,
    }

    impl Collectable for Note {
        fn get_collection_name() -> &'static str {
            "notes"
        }
    }

    impl Identifiable for Note {
        fn get_id(&self) -> Uuid {
            self.id
        }
    }

    fn temp_db() -> (tempfile::TempDir, SledDb) {
        let dir = tempfile::tempdir().unwrap();
        let db = SledDb::new(dir.path()).unwrap();
        (dir, db)
    }

    #[test]
    fn empty_collection_lists_empty() {
        let (_dir, db) = temp_db();
        let notes = db.get_collection::<Note>().unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn set_then_get_roundtrip() {
        let (_dir, db) = temp_db();
        let note = Note {
            id: Uuid::new_v4(),
            text: "first".to_string(),
        };
        db.set(&note).unwrap();

        let got = db.get::<Note>(note.id).unwrap();
        assert_eq!(got, note);
        assert_eq!(db.len::<Note>().unwrap(), 1);
    }

    #[test]
    fn get_missing_is_not_found() {
        let (_dir, db) = temp_db();
        assert!(db.get::<Note>(Uuid::new_v4()).is_err());
    }

    #[test]
    fn remove_missing_is_noop() {
        let (_dir, db) = temp_db();
        db.remove::<Note>(Uuid::new_v4()).unwrap();
        assert_eq!(db.len::<Note>().unwrap(), 0);
    }

    #[test]
    fn remove_deletes_only_target() {
        let (_dir, db) = temp_db();
        let a = Note {
            id: Uuid::new_v4(),
            text: "a".to_string(),
        };
        let b = Note {
            id: Uuid::new_v4(),
            text: "b".to_string(),
        };
        db.set(&a).unwrap();
        db.set(&b).unwrap();

        db.remove::<Note>(a.id).unwrap();

        let left = db.get_collection::<Note>().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, b.id);
    }
}
