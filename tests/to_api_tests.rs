use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde_json::json;
use to_api::{ApiError, Entity, Include, Record, ToApi, Value, to_api};

fn bar() -> Vec<Include> {
    vec![Include::from(vec!["bar"])]
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn test_string_returns_self() -> anyhow::Result<()> {
    let foo = "thequickbrownfoxjumpsoverthelazydog";
    assert_eq!(to_api(&Value::from(foo), &[])?, json!(foo));
    Ok(())
}

#[test]
fn test_integer_returns_self() -> anyhow::Result<()> {
    assert_eq!(to_api(&Value::Integer(8), &[])?, json!(8));
    Ok(())
}

#[test]
fn test_symbol_returns_its_name() -> anyhow::Result<()> {
    assert_eq!(to_api(&Value::symbol("foo"), &[])?, json!("foo"));
    Ok(())
}

#[test]
fn test_datetime_returns_db_string() -> anyhow::Result<()> {
    let now = NaiveDateTime::parse_from_str("2001-11-28 04:01:59", "%Y-%m-%d %H:%M:%S")?;
    assert_eq!(to_api(&Value::DateTime(now), &[])?, json!("2001-11-28 04:01:59"));
    Ok(())
}

#[test]
fn test_scalars_ignore_includes() -> anyhow::Result<()> {
    let scalars = [
        Value::from("foo"),
        Value::Integer(8),
        Value::symbol("foo"),
        Value::from(chrono::Utc::now()),
        Value::Float(2.5),
        Value::Boolean(false),
        Value::Null,
    ];
    for v in &scalars {
        assert_eq!(to_api(v, &bar())?, to_api(v, &[])?);
    }
    Ok(())
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn test_mapping_converts_all_values() -> anyhow::Result<()> {
    let map: Value = vec![
        ("one", Value::symbol("1 to api")),
        ("two", Value::Integer(2)),
    ]
    .into_iter()
    .collect();

    assert_eq!(to_api(&map, &[])?, json!({"one": "1 to api", "two": 2}));
    Ok(())
}

#[test]
fn test_mapping_keeps_insertion_order() -> anyhow::Result<()> {
    let map: Value = vec![("z", 1_i64), ("a", 2_i64), ("m", 3_i64)].into_iter().collect();
    let api = to_api(&map, &[])?;
    let keys: Vec<_> = api.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
    Ok(())
}

#[test]
fn test_sequence_converts_its_kids() -> anyhow::Result<()> {
    let seq = Value::from(vec![Value::symbol("apiz"), Value::from("b"), Value::Integer(3)]);
    assert_eq!(to_api(&seq, &[])?, json!(["apiz", "b", 3]));
    Ok(())
}

#[test]
fn test_sequence_explodes_on_unsupported_kids() {
    let seq = Value::from(vec![Value::from("fine"), Value::opaque("Regex /boom/")]);
    match to_api(&seq, &[]) {
        Err(ApiError::UnsupportedValue(desc)) => assert!(desc.contains("/boom/")),
        other => panic!("Expected UnsupportedValue, got {:?}", other),
    }
}

#[test]
fn test_bare_unsupported_value_fails() {
    assert!(matches!(
        to_api(&Value::opaque("socket"), &[]),
        Err(ApiError::UnsupportedValue(_))
    ));
}

#[test]
fn test_unsupported_value_deep_in_mapping_fails_whole_call() {
    let inner: Value = vec![("bad", Value::opaque("handle"))].into_iter().collect();
    let outer: Value = vec![("ok", Value::Integer(1)), ("inner", inner)]
        .into_iter()
        .collect();
    assert!(to_api(&outer, &[]).is_err());
}

#[test]
fn test_containers_pass_includes_to_every_element() -> anyhow::Result<()> {
    let kid = Entity::new("Kid")
        .attribute("name", "a")
        .with_relation("bar", || "BAR".into());
    let kid = Value::record(kid);

    let seq = Value::from(vec![kid.clone(), kid.clone()]);
    assert_eq!(
        to_api(&seq, &bar())?,
        json!([{"name": "a", "bar": "BAR"}, {"name": "a", "bar": "BAR"}])
    );

    let map: Value = vec![("one", kid.clone()), ("two", kid)].into_iter().collect();
    assert_eq!(
        to_api(&map, &bar())?,
        json!({"one": {"name": "a", "bar": "BAR"}, "two": {"name": "a", "bar": "BAR"}})
    );
    Ok(())
}

// ============================================================================
// Records
// ============================================================================

/// Hand-written record, the way a model type would plug in.
#[derive(Debug, Default)]
struct FakeRecord {
    attributes: IndexMap<String, Value>,
    associations: Vec<&'static str>,
    valid_api_includes: Option<Vec<&'static str>>,
    calls: Arc<AtomicUsize>,
}

impl Record for FakeRecord {
    fn model_name(&self) -> &str {
        "FakeRecord"
    }

    fn attributes(&self) -> IndexMap<String, Value> {
        self.attributes.clone()
    }

    fn declared_relations(&self) -> BTreeSet<String> {
        self.associations.iter().map(|s| s.to_string()).collect()
    }

    fn relation(&self, name: &str) -> Option<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match name {
            "foopy_pantz" => Some("pantz of foop".into()),
            "yarg" => Some("YYYYARRGG".into()),
            "foo" => Some("FOO".into()),
            _ => None,
        }
    }

    fn valid_api_includes(&self) -> Option<BTreeSet<String>> {
        self.valid_api_includes
            .as_ref()
            .map(|names| names.iter().map(|s| s.to_string()).collect())
    }
}

#[test]
fn test_record_includes_converted_attributes() -> anyhow::Result<()> {
    let mut attributes = IndexMap::new();
    attributes.insert("age".to_string(), Value::symbol("apid_age"));
    let base = FakeRecord {
        attributes,
        ..Default::default()
    };

    assert_eq!(base.to_api(&[])?["age"], json!("apid_age"));
    Ok(())
}

#[test]
fn test_record_expands_declared_relation() -> anyhow::Result<()> {
    let base = FakeRecord {
        associations: vec!["foopy_pantz"],
        ..Default::default()
    };

    let api = base.to_api(&["foopy_pantz".into()])?;
    assert_eq!(api["foopy_pantz"], json!("pantz of foop"));
    Ok(())
}

#[test]
fn test_record_ignores_non_association_includes() -> anyhow::Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = FakeRecord {
        associations: vec!["foopy_pantz"],
        calls: calls.clone(),
        ..Default::default()
    };

    let api = base.to_api(&["yarg".into()])?;
    assert!(api.get("yarg").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn test_record_allows_explicitly_declared_includes() -> anyhow::Result<()> {
    let base = FakeRecord {
        valid_api_includes: Some(vec!["foo"]),
        ..Default::default()
    };

    assert_eq!(base.to_api(&["foo".into()])?["foo"], json!("FOO"));
    Ok(())
}

#[test]
fn test_allow_list_hides_declared_relations() -> anyhow::Result<()> {
    let base = FakeRecord {
        associations: vec!["foopy_pantz"],
        valid_api_includes: Some(vec!["foo"]),
        ..Default::default()
    };

    let api = base.to_api(&["foopy_pantz".into(), "foo".into()])?;
    assert!(api.get("foopy_pantz").is_none());
    assert_eq!(api["foo"], json!("FOO"));
    Ok(())
}

#[test]
fn test_relations_are_not_loaded_without_includes() -> anyhow::Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = FakeRecord {
        associations: vec!["foopy_pantz"],
        calls: calls.clone(),
        ..Default::default()
    };

    assert_eq!(base.to_api(&[])?, json!({}));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn test_allow_listed_name_without_accessor_is_skipped() -> anyhow::Result<()> {
    let base = FakeRecord {
        valid_api_includes: Some(vec!["ghost"]),
        ..Default::default()
    };

    assert_eq!(base.to_api(&["ghost".into()])?, json!({}));
    Ok(())
}

#[test]
fn test_sequence_of_records_converts_each() -> anyhow::Result<()> {
    let base = Entity::new("FakeRecord")
        .with_relation("fake_child_records", || vec![json!({"foo": "bar"})].into());
    let scope = Value::from(vec![Value::record(base)]);

    assert_eq!(
        to_api(&scope, &["fake_child_records".into()])?,
        json!([{"fake_child_records": [{"foo": "bar"}]}])
    );
    Ok(())
}

// ============================================================================
// Include routing
// ============================================================================

fn child() -> Entity {
    Entity::new("FakeChildRecord")
        .attribute("kind", "child")
        .with_relation("foopy_pantz", || "pantz of foop".into())
}

fn base() -> Value {
    let kid = Value::record(child());
    Value::record(
        Entity::new("FakeRecord")
            .with_relation("fake_child_records", move || vec![kid.clone()].into())
            .with_relation("other_relation", || {
                vec![("foo", "bar")].into_iter().collect()
            }),
    )
}

#[test]
fn test_only_passes_includes_to_the_correct_objects() -> anyhow::Result<()> {
    let api = to_api(&base(), &["fake_child_records".into(), "foopy_pantz".into()])?;
    assert_eq!(api, json!({"fake_child_records": [{"kind": "child"}]}));
    Ok(())
}

#[test]
fn test_takes_a_single_arg() -> anyhow::Result<()> {
    let api = to_api(&base(), &["fake_child_records".into()])?;
    assert_eq!(api, json!({"fake_child_records": [{"kind": "child"}]}));
    Ok(())
}

#[test]
fn test_takes_array_with_singles() -> anyhow::Result<()> {
    let api = to_api(
        &base(),
        &[Include::from(vec!["fake_child_records", "foopy_pantz"])],
    )?;
    assert_eq!(api, json!({"fake_child_records": [{"kind": "child"}]}));
    Ok(())
}

#[test]
fn test_takes_array_with_subhash() -> anyhow::Result<()> {
    let api = to_api(
        &base(),
        &[
            Include::map([("fake_child_records", "foopy_pantz")]),
            "other_relation".into(),
        ],
    )?;
    assert_eq!(
        api,
        json!({
            "fake_child_records": [{"kind": "child", "foopy_pantz": "pantz of foop"}],
            "other_relation": {"foo": "bar"},
        })
    );
    Ok(())
}

#[test]
fn test_takes_array_with_singles_and_subhashes() -> anyhow::Result<()> {
    let api = to_api(&base(), &[Include::map([("fake_child_records", "foopy_pantz")])])?;
    assert_eq!(
        api,
        json!({"fake_child_records": [{"kind": "child", "foopy_pantz": "pantz of foop"}]})
    );
    Ok(())
}

#[test]
fn test_richer_include_wins_regardless_of_order() -> anyhow::Result<()> {
    let expected = json!({"fake_child_records": [{"kind": "child", "foopy_pantz": "pantz of foop"}]});

    let bare_last = to_api(
        &base(),
        &[
            Include::map([("fake_child_records", "foopy_pantz")]),
            "fake_child_records".into(),
        ],
    )?;
    let bare_first = to_api(
        &base(),
        &[
            "fake_child_records".into(),
            Include::map([("fake_child_records", "foopy_pantz")]),
        ],
    )?;

    assert_eq!(bare_last, expected);
    assert_eq!(bare_first, expected);
    Ok(())
}

#[test]
fn test_single_record_relation_receives_sub_includes() -> anyhow::Result<()> {
    let kid = Value::record(child());
    let parent = Entity::new("Parent").with_relation("favourite", move || kid.clone());

    let api = to_api(
        &Value::record(parent),
        &[Include::map([("favourite", vec!["foopy_pantz"])])],
    )?;
    assert_eq!(
        api,
        json!({"favourite": {"kind": "child", "foopy_pantz": "pantz of foop"}})
    );
    Ok(())
}

#[test]
fn test_relation_overrides_attribute_of_same_name() -> anyhow::Result<()> {
    let record = Entity::new("Post")
        .attribute("author", 7_i64)
        .with_relation("author", || vec![("name", "ada")].into_iter().collect());

    assert_eq!(to_api(&Value::record(record.clone()), &[])?, json!({"author": 7}));
    assert_eq!(
        record.to_api(&["author".into()])?,
        json!({"author": {"name": "ada"}})
    );
    Ok(())
}

#[test]
fn test_includes_from_json() -> anyhow::Result<()> {
    let includes: Vec<Include> =
        serde_json::from_value(json!([{"fake_child_records": "foopy_pantz"}, "other_relation"]))?;
    let api = to_api(&base(), &includes)?;
    assert_eq!(api["fake_child_records"][0]["foopy_pantz"], json!("pantz of foop"));
    assert_eq!(api["other_relation"], json!({"foo": "bar"}));
    Ok(())
}

#[test]
fn test_meaningless_sub_include_keeps_richer_routing() -> anyhow::Result<()> {
    let expected = json!({"fake_child_records": [{"kind": "child", "foopy_pantz": "pantz of foop"}]});

    for noise in [json!({"fake_child_records": [null]}), json!({"fake_child_records": {}})] {
        let includes = [
            Include::from_json(&json!({"fake_child_records": "foopy_pantz"})),
            Include::from_json(&noise),
        ];
        assert_eq!(to_api(&base(), &includes)?, expected);
    }
    Ok(())
}
