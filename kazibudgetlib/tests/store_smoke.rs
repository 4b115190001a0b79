use kazibudgetlib::{
    error::BudgetError,
    model::Overrides,
    store::{OverridesStore, ANONYMOUS_USER},
};
use rust_decimal::Decimal;

fn savings(pct: i64) -> Overrides {
    Overrides {
        savings: Some(Decimal::from(pct)),
        ..Overrides::default()
    }
}

#[test]
fn open_creates_dir_and_empty_db() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(".data").join("budgets.json");

    let store = OverridesStore::open(&path).expect("open");
    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    assert!(store.get("u1").expect("get").is_none());
}

#[test]
fn save_then_get() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = OverridesStore::open(dir.path().join("budgets.json")).expect("open");

    let stamp = store.save("u2", &savings(15)).expect("save");
    let got = store.get("u2").expect("get").expect("stored");
    assert_eq!(got.overrides.savings, Some(Decimal::from(15)));
    assert_eq!(got.updated_at, stamp);

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"updatedAt\""), "{raw}");
    assert!(!raw.contains("essentials"), "{raw}");
}

#[test]
fn save_replaces_previous_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = OverridesStore::open(dir.path().join("budgets.json")).expect("open");

    store.save("u3", &savings(15)).expect("save");
    let ov = Overrides {
        essentials: Some(Decimal::from(45)),
        ..Overrides::default()
    };
    store.save("u3", &ov).expect("save again");
    store.save("other", &savings(30)).expect("save other");

    let got = store.get("u3").expect("get").expect("stored");
    assert_eq!(got.overrides, ov);
    let other = store.get("other").expect("get").expect("stored");
    assert_eq!(other.overrides.savings, Some(Decimal::from(30)));
}

#[test]
fn blank_user_is_anonymous() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = OverridesStore::open(dir.path().join("budgets.json")).expect("open");

    store.save("  ", &savings(12)).expect("save");
    assert!(store.get(ANONYMOUS_USER).expect("get").is_some());
}

#[test]
fn remove_reports_presence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = OverridesStore::open(dir.path().join("budgets.json")).expect("open");

    store.save("u4", &savings(10)).expect("save");
    assert!(store.remove("u4").expect("remove"));
    assert!(!store.remove("u4").expect("remove again"));
    assert!(store.get("u4").expect("get").is_none());
}

#[test]
fn corrupt_db_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("budgets.json");
    std::fs::write(&path, "not json").unwrap();

    let store = OverridesStore::open(&path).expect("open");
    assert!(matches!(store.get("u1"), Err(BudgetError::Json(_))));
}
