//! # Store Tests
//!
//! Session snapshots saved to a JSON file store and read back by a fresh
//! store instance, the way the CLI persists a kitchen between runs.

use kitchenmate::config::SessionConfig;
use kitchenmate::session::KitchenSession;
use kitchenmate::store::{load_snapshot, save_snapshot, DocumentStore, JsonFileStore};
use serde_json::json;
use tempfile::tempdir;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kitchen.json");

        let mut session = KitchenSession::new(SessionConfig::default()).unwrap();
        session.handle_command("set saffron 5");
        session.handle_command("grocery add curry leaves");
        session.handle_command("diet jain on");
        session.load_recipe("Ingredients: 1 cup rice");
        session.handle_command("favourite");
        let snapshot = session.snapshot();

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            save_snapshot(&mut store, "asha", &snapshot).unwrap();
        }
        assert!(path.exists());

        let store = JsonFileStore::open(&path).unwrap();
        let loaded = load_snapshot(&store, "asha").unwrap().unwrap();
        assert_eq!(loaded, snapshot);

        let mut restored = KitchenSession::new(SessionConfig::default()).unwrap();
        restored.restore(loaded);
        assert_eq!(restored.inventory().quantity("saffron"), Some(5));
        assert!(restored.grocery().contains("curry leaves"));
        assert!(restored.config().jain_mode);
        assert_eq!(restored.recipe_book().favourites().count(), 1);
    }

    #[test]
    fn test_unknown_user() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("empty.json")).unwrap();
        assert!(load_snapshot(&store, "nobody").unwrap().is_none());
    }

    #[test]
    fn test_users_are_independent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kitchen.json");
        let mut store = JsonFileStore::open(&path).unwrap();

        let mut first = KitchenSession::new(SessionConfig::default()).unwrap();
        first.handle_command("servings 4");
        let second = KitchenSession::new(SessionConfig::default()).unwrap();

        save_snapshot(&mut store, "first", &first.snapshot()).unwrap();
        save_snapshot(&mut store, "second", &second.snapshot()).unwrap();
        assert!(store.delete("second").unwrap());

        let reopened = JsonFileStore::open(&path).unwrap();
        let loaded = load_snapshot(&reopened, "first").unwrap().unwrap();
        assert_eq!(loaded.config.servings(), 4);
        assert!(load_snapshot(&reopened, "second").unwrap().is_none());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("kitchen.json")).unwrap();
        store.put("asha", json!({ "inventory": "not a pantry" })).unwrap();

        let err = load_snapshot(&store, "asha").unwrap_err();
        assert!(format!("{err:#}").contains("malformed"));
    }

    #[test]
    fn test_corrupt_file_fails_to_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kitchen.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(JsonFileStore::open(&path).is_err());
    }
}
