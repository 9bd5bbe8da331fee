//! Credential store persistence across process restarts.

use tempfile::TempDir;

use visionmate::{LoginOutcome, RegisterOutcome, UserStore};

#[test]
fn users_survive_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("users.db");
    let db_path = db_path.to_str().expect("utf-8 path");

    {
        let mut store = UserStore::open(db_path).expect("open store");
        assert_eq!(
            store
                .add_user("Jane Doe", "jane@example.com", "jane123", "hunter22")
                .expect("add user"),
            RegisterOutcome::Registered
        );
    }

    let mut store = UserStore::open(db_path).expect("reopen store");
    assert_eq!(
        store.check_user("jane123", "hunter22").expect("login"),
        LoginOutcome::Success("Jane Doe".to_string())
    );

    let info = store.user_info("jane123").expect("info").expect("exists");
    assert_eq!(info.email, "jane@example.com");
    assert!(info.last_login.is_some());
}

#[test]
fn duplicates_rejected_across_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("users.db");
    let db_path = db_path.to_str().expect("utf-8 path");

    {
        let mut store = UserStore::open(db_path).expect("open store");
        store
            .add_user("Jane Doe", "jane@example.com", "jane123", "hunter22")
            .expect("add user");
    }

    let mut store = UserStore::open(db_path).expect("reopen store");
    assert_eq!(
        store
            .add_user("Other", "other@example.com", "jane123", "pw123456")
            .expect("add duplicate"),
        RegisterOutcome::UsernameTaken
    );
}

#[test]
fn in_memory_stores_are_isolated() {
    let mut a = UserStore::open(":memory:").expect("open a");
    let mut b = UserStore::open(":memory:").expect("open b");

    a.add_user("Jane Doe", "jane@example.com", "jane123", "hunter22")
        .expect("add user");

    assert_eq!(
        b.check_user("jane123", "hunter22").expect("lookup"),
        LoginOutcome::UnknownUser
    );
}
