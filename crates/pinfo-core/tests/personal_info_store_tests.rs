//! Save / load behaviour of PersonalInfoStore against the in-memory backend

use chrono::{NaiveDate, TimeZone, Utc};
use pinfo_core::{
    FixedClock, KeyValueStore, MemoryKvStore, PersonalInfoRecord, PersonalInfoStore,
    WriteBatch, KEY_DOB, KEY_EMAIL, KEY_NAME,
};

const TEST_NAME: &str = "Test name";
const TEST_EMAIL: &str = "test@email.com";

fn test_record() -> PersonalInfoRecord {
    PersonalInfoRecord::with_birth_date(
        TEST_NAME,
        NaiveDate::from_ymd_opt(1980, 2, 1).unwrap(),
        TEST_EMAIL,
    )
}

#[test]
fn test_save_and_read_personal_information() {
    let store = PersonalInfoStore::new(MemoryKvStore::new());
    let record = test_record();

    assert!(store.save(&record));

    let saved = store.load();
    assert_eq!(saved.name(), record.name());
    assert_eq!(saved.date_of_birth(), record.date_of_birth());
    assert_eq!(saved.email(), record.email());
    assert_eq!(saved, record);
}

#[test]
fn test_round_trip_is_millisecond_exact() {
    let store = PersonalInfoStore::new(MemoryKvStore::new());
    let dob = Utc.timestamp_millis_opt(-62_135_596_800_001).single().unwrap();
    let record = PersonalInfoRecord::new("", dob, "");

    assert!(store.save(&record));
    assert_eq!(store.load(), record);
}

#[test]
fn test_save_personal_information_failed_returns_false() {
    let store = PersonalInfoStore::new(MemoryKvStore::rejecting());
    assert!(!store.save(&test_record()));
}

#[test]
fn test_failed_save_leaves_previous_record() {
    let kv = MemoryKvStore::new();
    let store = PersonalInfoStore::new(&kv);
    assert!(store.save(&test_record()));

    kv.set_reject_commits(true);
    let other = PersonalInfoRecord::new("Other", Utc::now(), "other@email.com");
    assert!(!store.save(&other));

    assert_eq!(store.load(), test_record());
}

#[test]
fn test_load_empty_store_uses_defaults() {
    let clock = FixedClock::from_millis(1_585_699_200_000).unwrap();
    let store = PersonalInfoStore::with_clock(MemoryKvStore::new(), clock);

    let record = store.load();
    assert_eq!(record.name(), "");
    assert_eq!(record.email(), "");
    assert_eq!(record.date_of_birth_millis(), 1_585_699_200_000);
}

#[test]
fn test_load_empty_store_dob_is_now() {
    let store = PersonalInfoStore::new(MemoryKvStore::new());

    let before = Utc::now().timestamp_millis();
    let record = store.load();
    let after = Utc::now().timestamp_millis();

    assert!(record.date_of_birth_millis() >= before);
    assert!(record.date_of_birth_millis() <= after);
}

#[test]
fn test_load_partial_store() {
    let kv = MemoryKvStore::new();
    assert!(kv.commit(WriteBatch::new().put_string(KEY_EMAIL, TEST_EMAIL)));
    let clock = FixedClock::from_millis(0).unwrap();

    let record = PersonalInfoStore::with_clock(&kv, clock).load();
    assert_eq!(record.name(), "");
    assert_eq!(record.email(), TEST_EMAIL);
    assert_eq!(record.date_of_birth_millis(), 0);
}

#[test]
fn test_loads_are_independent() {
    let kv = MemoryKvStore::new();
    let store = PersonalInfoStore::new(&kv);
    assert!(store.save(&test_record()));

    let first = store.load();
    assert!(kv.commit(WriteBatch::new().put_string(KEY_NAME, "Renamed")));
    let second = store.load();

    assert_eq!(first.name(), TEST_NAME);
    assert_eq!(second.name(), "Renamed");
}

#[test]
fn test_wrong_type_under_dob_key_reads_default() {
    let kv = MemoryKvStore::new();
    assert!(kv.commit(WriteBatch::new().put_string(KEY_DOB, "1980-02-01")));
    let clock = FixedClock::from_millis(42).unwrap();

    let record = PersonalInfoStore::with_clock(&kv, clock).load();
    assert_eq!(record.date_of_birth_millis(), 42);
}

#[test]
fn test_concurrent_saves_leave_one_whole_record() {
    let kv = MemoryKvStore::new();
    let record_for = |writer: i64, commit: i64| {
        PersonalInfoRecord::new(
            format!("writer-{}-{}", writer, commit),
            Utc.timestamp_millis_opt(writer * 1_000 + commit).single().unwrap(),
            format!("w{}c{}@email.com", writer, commit),
        )
    };

    std::thread::scope(|scope| {
        for writer in 0..4 {
            let kv = &kv;
            scope.spawn(move || {
                let store = PersonalInfoStore::new(kv);
                for commit in 0..100 {
                    assert!(store.save(&record_for(writer, commit)));
                }
            });
        }
    });

    let loaded = PersonalInfoStore::new(&kv).load();
    let expected = (0..4)
        .flat_map(|w| (0..100).map(move |c| (w, c)))
        .map(|(w, c)| record_for(w, c))
        .find(|r| r.name() == loaded.name())
        .expect("name written by one of the writers");
    assert_eq!(loaded, expected);
}
