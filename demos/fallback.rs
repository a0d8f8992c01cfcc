use serde_json::json;
use std::sync::Arc;
use web_storage::cookies::InMemoryCookieJar;
use web_storage::storage::{InMemoryLocalStore, InMemorySessionStore};
use web_storage::{Environment, Preference, StorageError, StorageFactory};

fn main() -> Result<(), StorageError> {
    // RUST_LOG=debug shows the probing and selection steps
    env_logger::init();

    // Four hosts, each one supporting less than the one before
    let hosts = [
        ("full browser", Environment::in_memory()),
        (
            "private mode (localStorage refuses writes)",
            Environment::builder()
                .local(Arc::new(InMemoryLocalStore::with_quota(0)))
                .session(Arc::new(InMemorySessionStore::new()))
                .cookies(Arc::new(InMemoryCookieJar::new()))
                .build(),
        ),
        (
            "cookies only",
            Environment::builder()
                .cookies(Arc::new(InMemoryCookieJar::new().with_enabled_flag(Some(true))))
                .build(),
        ),
        ("nothing at all", Environment::builder().build()),
    ];

    for (name, env) in hosts {
        let factory = StorageFactory::new(env);
        println!("{}: {:?}", name, factory.capabilities());

        let Some(storage) = factory.create(Preference::Any) else {
            println!("  no storage available");
            continue;
        };

        let outcome = storage.set_with_expiry("last_visit", &json!({"page": "/home", "count": 3}), Some(7));
        println!("  using {}, set -> {:?}", storage.backend(), outcome);
        println!("  get -> {:?}", storage.get("last_visit")?);
        storage.remove("last_visit");
        println!("  after remove -> {:?}", storage.get("last_visit")?);
    }

    Ok(())
}
