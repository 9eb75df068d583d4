//! ---
//! pprz_section: "02-messaging-data-model"
//! pprz_subsection: "integration-tests"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Integration tests for message projections and schema loading."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
use std::io::Write;

use indexmap::IndexMap;
use pprz_msg::{FieldValue, Message, MessageError, SchemaLookup, SchemaRegistry};

fn gps_registry() -> SchemaRegistry {
    SchemaRegistry::new()
        .with_message(
            "telemetry",
            8,
            "GPS",
            &[
                ("utm_east", "int32"),
                ("utm_north", "int32"),
                ("course", "uint16"),
                ("alt", "float"),
            ],
        )
        .and_then(|r| {
            r.with_message(
                "telemetry",
                30,
                "INFO_MSG",
                &[("msg", "char[]"), ("ids", "uint8[]")],
            )
        })
        .expect("registry")
}

fn gps_values() -> Vec<FieldValue> {
    vec![1200.into(), 3400.into(), 900.into(), 153.2.into()]
}

#[test]
fn gps_scenario_renders_every_projection() {
    let registry = gps_registry();
    let mut msg = Message::new(&registry, "telemetry", "GPS").expect("construct");
    assert_eq!(msg.field_values(), vec![FieldValue::from(0); 4].as_slice());

    msg.set_values(gps_values()).expect("set values");
    assert_eq!(msg.field_values(), gps_values().as_slice());
    assert_eq!(
        msg.to_string(),
        "telemetry.GPS {utm_east : 1200, utm_north : 3400, course : 900, alt : 153.2}"
    );
    assert_eq!(msg.encode_payload(), "1200 3400 900 153.2 ");
}

#[test]
fn string_and_array_payload_tokens() {
    let registry = gps_registry();
    let msg = Message::with_values(
        &registry,
        "telemetry",
        "INFO_MSG",
        vec!["ABC".into(), vec![1, 2, 3].into()],
    )
    .expect("construct");
    assert_eq!(msg.encode_payload(), "\"ABC\" 1,2,3 ");
}

#[test]
fn short_update_is_rejected_without_side_effects() {
    let registry = gps_registry();
    let mut msg = Message::with_values(&registry, "telemetry", "GPS", gps_values()).unwrap();
    let mut short = gps_values();
    short.pop();

    let err = msg.set_values(short).expect_err("count mismatch");
    assert!(matches!(
        err,
        MessageError::FieldCountMismatch { expected: 4, found: 3 }
    ));
    assert_eq!(msg.field_values(), gps_values().as_slice());

    let mut long = gps_values();
    long.push(1.into());
    assert!(msg.set_values(long).is_err());
    assert_eq!(msg.field_values(), gps_values().as_slice());
}

#[test]
fn mapping_header_keys_follow_payload_only_flag() {
    let registry = gps_registry();
    let msg = Message::with_values(&registry, "telemetry", "GPS", gps_values()).unwrap();

    let payload = msg.to_mapping(true);
    assert!(!payload.contains_key("msgname"));
    assert!(!payload.contains_key("msgclass"));
    assert_eq!(
        payload.keys().collect::<Vec<_>>(),
        ["utm_east", "utm_north", "course", "alt"]
    );

    let full = msg.to_mapping(false);
    assert_eq!(
        full.keys().take(2).collect::<Vec<_>>(),
        ["msgname", "msgclass"]
    );
    assert_eq!(full["msgname"], FieldValue::from(msg.msg_name()));
    assert_eq!(full["msgclass"], FieldValue::from(msg.class_name()));
    assert_eq!(full["alt"], FieldValue::from(153.2));
}

#[test]
fn json_parses_back_to_mapping() {
    let registry = gps_registry();
    let gps = Message::with_values(&registry, "telemetry", "GPS", gps_values()).unwrap();
    let info = Message::with_values(
        &registry,
        "telemetry",
        "INFO_MSG",
        vec!["hello".into(), vec![4, 5].into()],
    )
    .unwrap();

    for msg in [&gps, &info] {
        for payload_only in [true, false] {
            let json = msg.to_json(payload_only).expect("json");
            let parsed: IndexMap<String, FieldValue> =
                serde_json::from_str(&json).expect("parse json");
            assert_eq!(parsed, msg.to_mapping(payload_only));
        }
    }
    assert_eq!(
        gps.to_json(false).unwrap(),
        r#"{"msgname":"GPS","msgclass":"telemetry","utm_east":1200,"utm_north":3400,"course":900,"alt":153.2}"#
    );
}

#[test]
fn trait_objects_can_back_construction() {
    let registry = gps_registry();
    let lookup: &dyn SchemaLookup = &registry;
    let names = lookup.message_names("telemetry").unwrap();
    let messages: Vec<Message> = names
        .iter()
        .map(|name| Message::new(lookup, "telemetry", name))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(messages.len(), 2);
    for msg in &messages {
        assert_eq!(msg.field_names().len(), msg.field_values().len());
    }
}

#[test]
fn registry_file_drives_construction() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tempfile");
    writeln!(
        file,
        r#"
[[class]]
name = "datalink"

[[class.message]]
id = 5
name = "SETTING"
fields = [
    {{ name = "index", type = "uint8" }},
    {{ name = "ac_id", type = "uint8" }},
    {{ name = "value", type = "float" }},
]
"#
    )
    .expect("write registry");

    let registry = SchemaRegistry::load(file.path()).expect("load registry");
    let mut msg = Message::new(&registry, "datalink", "SETTING").expect("construct");
    msg.set_values(vec![2.into(), 11.into(), 0.5.into()]).unwrap();
    assert_eq!(msg.id(), 5);
    assert_eq!(msg.encode_payload(), "2 11 0.5 ");

    let err = Message::new(&registry, "telemetry", "SETTING").unwrap_err();
    assert!(err.to_string().contains("unknown message class"));
}

#[test]
fn missing_registry_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = SchemaRegistry::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, MessageError::Io(_)));
}
