// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scope registry behavior as seen by an application.

use logscope::{Error, InMemorySink, Level, Logger, Manager, kv};
use std::sync::Arc;
use std::thread;

fn setup() -> (Arc<Manager>, Arc<InMemorySink>) {
    let sink = Arc::new(InMemorySink::new());
    (Arc::new(Manager::new(Logger::new(sink.clone()))), sink)
}

#[test]
fn scopes_share_the_root_sink() {
    let (manager, sink) = setup();
    let db = manager.register("db", "database logs");
    let http = manager.register("http", "request handling");
    manager.root().info("root", kv![]);
    db.info("db", kv![]);
    http.info("http", kv![]);
    assert_eq!(
        sink.drain_logs(),
        "msg=root level=info\nmsg=db level=info\nmsg=http level=info"
    );
}

#[test]
fn scenario_set_and_get() {
    let (manager, _) = setup();
    manager.register("db", "database logs");
    manager.set_scope_output_level("db", Level::Debug).unwrap();
    assert_eq!(manager.output_level("db"), Ok(Level::Debug));
    assert_eq!(
        manager.output_level("unknown"),
        Err(Error::ScopeNotFound("unknown".to_string()))
    );
}

#[test]
fn fields_derived_from_a_scope_follow_its_level() {
    let (manager, sink) = setup();
    let db = manager.register("db", "");
    let query = db.with(kv!["table", "users"]);
    manager.set_scope_output_level("db", Level::Debug).unwrap();
    query.debug("scan", kv![]);
    assert_eq!(sink.drain_logs(), "msg=scan level=debug table=users");

    let pinned = db.with_independent_level();
    manager.set_scope_output_level("db", Level::Error).unwrap();
    pinned.debug("still debug", kv![]);
    query.debug("silenced", kv![]);
    assert_eq!(sink.drain_logs(), "msg=\"still debug\" level=debug");
}

#[test]
fn deregistered_scope_keeps_emitting() {
    let (manager, sink) = setup();
    let db = manager.register("db", "");
    db.set_level(Level::Debug);
    assert!(manager.deregister("db"));
    assert!(!manager.scopes().contains(&"db".to_string()));

    manager.set_default_output_level(Level::None);
    db.debug("orphan", kv![]);
    assert_eq!(sink.drain_logs(), "msg=orphan level=debug");
}

#[test]
fn concurrent_level_changes_and_emission() {
    let (manager, sink) = setup();
    let names = ["a", "b", "c", "d"];
    for name in names {
        manager.register(name, "");
    }
    let writers: Vec<_> = names
        .iter()
        .map(|name| {
            let manager = manager.clone();
            let name = name.to_string();
            thread::spawn(move || {
                let logger = manager.register(&name, "");
                for i in 0..100 {
                    let level = if i % 2 == 0 { Level::Debug } else { Level::Error };
                    manager.set_scope_output_level(&name, level).unwrap();
                    logger.info("tick", kv!["i", i]);
                }
            })
        })
        .collect();
    let broadcaster = {
        let manager = manager.clone();
        thread::spawn(move || {
            for _ in 0..100 {
                manager.set_default_output_level(Level::Info);
            }
        })
    };
    for handle in writers {
        handle.join().expect("writer thread panicked");
    }
    broadcaster.join().expect("broadcast thread panicked");

    assert_eq!(manager.scopes(), names);
    assert!(sink.drain_lines().iter().all(|l| l.starts_with("msg=tick level=info i=")));
}
