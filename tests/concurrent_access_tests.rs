use std::sync::Arc;
use std::thread;

use serde_json::json;
use to_api::{Entity, Include, Value, to_api};

fn graph() -> Value {
    let users: Vec<Value> = (0..50_i64)
        .map(|i| {
            Value::record(
                Entity::new("User")
                    .attribute("id", i)
                    .with_relation("roles", || vec![Value::symbol("admin")].into()),
            )
        })
        .collect();
    Value::record(Entity::new("Team").with_relation("users", move || users.clone().into()))
}

#[test]
fn test_concurrent_conversions_share_one_graph() {
    let team = Arc::new(graph());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let team = Arc::clone(&team);
            thread::spawn(move || {
                // Half the threads expand roles, half do not.
                let includes = if t % 2 == 0 {
                    vec![Include::map([("users", "roles")])]
                } else {
                    vec![Include::from("users")]
                };
                (t, to_api(&team, &includes).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (t, api) = handle.join().unwrap();
        let users = api["users"].as_array().unwrap();
        assert_eq!(users.len(), 50);
        if t % 2 == 0 {
            assert_eq!(users[7], json!({"id": 7, "roles": ["admin"]}));
        } else {
            assert_eq!(users[7], json!({"id": 7}));
        }
    }
}
