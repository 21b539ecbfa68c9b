use super::*;
use bucketlist_core::test_support::{contents, example_location, location_at};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[derive(Debug)]
struct StoreFixture {
    path: Utf8PathBuf,
    key: SessionKey,
    _dir: TempDir,
}

impl StoreFixture {
    fn config(&self) -> StoreConfig {
        StoreConfig::new(self.path.clone(), self.key.clone())
    }

    fn open(&self) -> LocationStore {
        LocationStore::open(self.config())
    }
}

#[fixture]
fn workspace() -> StoreFixture {
    let dir = TempDir::new().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("SavedPlaces"))
        .expect("temp dir should be UTF-8");
    StoreFixture {
        path,
        key: SessionKey::from_bytes([42; KEY_LEN]),
        _dir: dir,
    }
}

fn coord(latitude: f64, longitude: f64) -> Coord<f64> {
    Coord {
        x: longitude,
        y: latitude,
    }
}

#[rstest]
fn opens_empty_when_file_missing(workspace: StoreFixture) {
    let store = workspace.open();
    assert!(store.locations().is_empty());
    assert!(matches!(store.load_status(), LoadStatus::Missing));
    assert!(store.selected().is_none());
}

#[rstest]
fn add_appends_and_persists(workspace: StoreFixture) {
    let mut store = workspace.open();
    let id = store
        .add_location(coord(51.501, -0.141))
        .expect("add location");

    let [added] = store.locations() else {
        panic!("expected exactly one location");
    };
    assert_eq!(added.id(), id);
    assert_eq!(added.name, bucketlist_core::DEFAULT_LOCATION_NAME);
    assert_eq!(added.description, "");
    assert_eq!(added.coordinate(), coord(51.501, -0.141));

    let reopened = workspace.open();
    assert_eq!(contents(reopened.locations()), contents(store.locations()));
    assert!(matches!(
        reopened.load_status(),
        LoadStatus::Loaded { count: 1 }
    ));
}

#[rstest]
fn add_preserves_insertion_order(workspace: StoreFixture) {
    let mut store = workspace.open();
    let first = store.add_location(coord(1.0, 1.0)).expect("first");
    let second = store.add_location(coord(2.0, 2.0)).expect("second");
    let third = store.add_location(coord(1.0, 1.0)).expect("third");

    let ids: Vec<_> = workspace.open().locations().iter().map(Location::id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[rstest]
#[case(coord(91.0, 0.0))]
#[case(coord(0.0, 181.0))]
#[case(coord(f64::NAN, 0.0))]
fn add_rejects_invalid_coordinate(workspace: StoreFixture, #[case] coordinate: Coord<f64>) {
    let mut store = workspace.open();
    let err = store
        .add_location(coordinate)
        .expect_err("invalid coordinate should fail");
    assert!(matches!(err, StoreError::InvalidLocation(_)));
    assert!(store.locations().is_empty());
    assert!(!workspace.path.as_std_path().exists());
}

#[rstest]
fn update_without_selection_is_a_no_op(workspace: StoreFixture) {
    let mut store = workspace.open();
    store.add_location(coord(10.0, 10.0)).expect("add");
    let before = store.locations().to_vec();

    let outcome = store
        .update_selected(example_location())
        .expect("update should not fail");

    assert_eq!(outcome, UpdateOutcome::NoSelection);
    assert_eq!(store.locations(), before.as_slice());
    assert_eq!(store.locations()[0].name, before[0].name);
}

#[rstest]
fn update_replaces_only_the_selected_entry(workspace: StoreFixture) {
    let mut store = workspace.open();
    store.add_location(coord(10.0, 10.0)).expect("add first");
    store.add_location(coord(20.0, 20.0)).expect("add second");
    let target = store.locations()[1].clone();
    store.set_selected(Some(target.clone()));

    let edited = target.edited("Home", "Where the heart is");
    let outcome = store.update_selected(edited).expect("update");

    assert_eq!(outcome, UpdateOutcome::Replaced);
    assert_eq!(store.locations()[0].name, bucketlist_core::DEFAULT_LOCATION_NAME);
    assert_eq!(store.locations()[1].name, "Home");
    assert_eq!(store.locations()[1].id(), target.id());

    let reopened = workspace.open();
    assert_eq!(reopened.locations()[1].name, "Home");
    assert_eq!(reopened.locations()[1].description, "Where the heart is");
}

#[rstest]
fn update_may_reissue_identifier(workspace: StoreFixture) {
    let mut store = workspace.open();
    store.add_location(coord(10.0, 10.0)).expect("add");
    let target = store.locations()[0].clone();
    store.set_selected(Some(target.clone()));

    let reissued = target.edited("Renamed", "").with_new_id();
    store
        .update_selected(reissued.clone())
        .expect("update with new id");

    assert_eq!(store.locations()[0].id(), reissued.id());
    assert!(store.find(target.id()).is_none());
}

#[rstest]
fn update_with_stale_selection_is_a_no_op(workspace: StoreFixture) {
    let mut store = workspace.open();
    store.add_location(coord(10.0, 10.0)).expect("add");
    store.set_selected(Some(location_at(30.0, 30.0)));

    let outcome = store
        .update_selected(example_location())
        .expect("update should not fail");

    assert_eq!(outcome, UpdateOutcome::StaleSelection);
    assert_eq!(store.locations()[0].name, bucketlist_core::DEFAULT_LOCATION_NAME);
}

#[rstest]
fn round_trips_unicode_text(workspace: StoreFixture) {
    let mut store = workspace.open();
    store.add_location(coord(48.8584, 2.2945)).expect("add");
    store.set_selected(store.locations().first().cloned());
    let edited = store.locations()[0].edited("Tour Eiffel 🗼", "Dame de fer, « la plus haute »");
    store.update_selected(edited).expect("update");

    let reopened = workspace.open();
    assert_eq!(reopened.locations()[0].name, "Tour Eiffel 🗼");
    assert_eq!(
        reopened.locations()[0].description,
        "Dame de fer, « la plus haute »"
    );
}

#[rstest]
fn persisting_empty_list_round_trips(workspace: StoreFixture) {
    let store = workspace.open();
    store.persist().expect("persist empty list");

    let reopened = workspace.open();
    assert!(reopened.locations().is_empty());
    assert!(matches!(
        reopened.load_status(),
        LoadStatus::Loaded { count: 0 }
    ));
}

#[rstest]
fn protected_file_does_not_contain_plaintext(workspace: StoreFixture) {
    let mut store = workspace.open();
    store.add_location(coord(51.501, -0.141)).expect("add");

    let bytes = std::fs::read(&workspace.path).expect("read store file");
    assert_eq!(&bytes[..4], &SEAL_MAGIC);
    let needle = bucketlist_core::DEFAULT_LOCATION_NAME.as_bytes();
    assert!(!bytes.windows(needle.len()).any(|window| window == needle));
}

#[rstest]
fn unprotected_file_is_plain_json(workspace: StoreFixture) {
    let config = StoreConfig::unprotected(workspace.path.clone());
    let mut store = LocationStore::open(config.clone());
    store.add_location(coord(51.501, -0.141)).expect("add");

    let text = std::fs::read_to_string(&workspace.path).expect("read store file");
    let decoded: Vec<Location> = serde_json::from_str(&text).expect("plain JSON array");
    assert_eq!(contents(&decoded), contents(store.locations()));

    let reopened = LocationStore::open(config);
    assert_eq!(contents(reopened.locations()), contents(store.locations()));
}

#[rstest]
fn wrong_key_loads_empty(workspace: StoreFixture) {
    let mut store = workspace.open();
    store.add_location(coord(51.501, -0.141)).expect("add");

    let locked = LocationStore::open(
        workspace
            .config()
            .with_protection(FileProtection::Complete(SessionKey::from_bytes([1; KEY_LEN]))),
    );
    assert!(locked.locations().is_empty());
    assert!(matches!(
        locked.load_status(),
        LoadStatus::Failed(StoreError::Unseal {
            source: SealError::Decrypt,
            ..
        })
    ));
}

#[rstest]
fn corrupted_plain_file_loads_empty(workspace: StoreFixture) {
    std::fs::write(&workspace.path, b"{ not json").expect("write corrupt file");
    let store = LocationStore::open(StoreConfig::unprotected(workspace.path.clone()));
    assert!(store.locations().is_empty());
    assert!(matches!(
        store.load_status(),
        LoadStatus::Failed(StoreError::Decode { .. })
    ));
}

#[rstest]
fn corrupted_sealed_file_loads_empty(workspace: StoreFixture) {
    std::fs::write(&workspace.path, b"garbage").expect("write corrupt file");
    let store = workspace.open();
    assert!(store.locations().is_empty());
    assert!(matches!(
        store.load_status(),
        LoadStatus::Failed(StoreError::Unseal { .. })
    ));
}

#[cfg(unix)]
#[rstest]
fn failed_persist_keeps_memory_authoritative(workspace: StoreFixture) {
    // A directory squatting on the target path makes the rename fail.
    std::fs::create_dir(&workspace.path).expect("create blocking directory");
    let mut store = workspace.open();

    let err = store
        .add_location(coord(1.0, 2.0))
        .expect_err("persist should fail");

    assert!(matches!(err, StoreError::Write { .. }));
    assert_eq!(store.locations().len(), 1);
}

#[rstest]
fn selection_is_caller_controlled(workspace: StoreFixture) {
    let mut store = workspace.open();
    let id = store.add_location(coord(5.0, 5.0)).expect("add");
    assert!(store.selected().is_none());

    store.set_selected(store.find(id).cloned());
    assert_eq!(store.selected().map(Location::id), Some(id));

    store.set_selected(None);
    assert!(store.selected().is_none());
}
