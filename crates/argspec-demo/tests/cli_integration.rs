use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const SCHEMA: &str = r#"{
    "name": "greet",
    "description": "Say hello",
    "version": "1.2.0",
    "args": [
        { "name": "who", "description": "Who to greet" },
        { "name": "--greeting", "flag": "g", "default-value": "hello" },
        { "name": "--shout", "flag": "s", "default-value": "false" },
        { "name": "--lang", "default-value": "en", "choices": ["en", "fr"] }
    ]
}"#;

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("argspec-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn write_schema(prefix: &str, body: &str) -> (PathBuf, PathBuf) {
    let dir = make_temp_dir(prefix);
    let path = dir.join("schema.json");
    fs::write(&path, body).expect("failed to write schema");
    (dir, path)
}

fn demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argspec-demo"))
        .args(args)
        .output()
        .expect("failed to run argspec-demo")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn prints_resolved_values() {
    let (dir, schema) = write_schema("values", SCHEMA);
    let schema = schema.to_str().unwrap();
    let out = demo(&[schema, "--", "-s", "--greeting", "hi", "ferris"]);
    assert!(
        out.status.success(),
        "argspec-demo failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        stderr(&out),
    );
    let text = stdout(&out);
    assert!(text.contains("who=ferris\n"), "unexpected output:\n{text}");
    assert!(text.contains("greeting=hi\n"), "unexpected output:\n{text}");
    assert!(text.contains("shout=true\n"), "unexpected output:\n{text}");
    assert!(text.contains("lang=en\n"), "unexpected output:\n{text}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn prints_json_when_asked() {
    let (dir, schema) = write_schema("json", SCHEMA);
    let out = demo(&["--json", schema.to_str().unwrap(), "--", "world"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let value: serde_json::Value =
        serde_json::from_str(&stdout(&out)).expect("output is not JSON");
    assert_eq!(value["who"], "world");
    assert_eq!(value["greeting"], "hello");
    assert_eq!(value["shout"], "false");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn help_and_version_exit_successfully() {
    let (dir, schema) = write_schema("help", SCHEMA);
    let schema = schema.to_str().unwrap();

    let out = demo(&[schema, "--", "-h"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("greet - Say hello"), "unexpected help:\n{text}");
    assert!(text.contains("Usage: greet [OPTIONS] <who>"), "unexpected help:\n{text}");

    let out = demo(&[schema, "--", "--version"]);
    assert!(out.status.success(), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "greet 1.2.0\n");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn input_errors_exit_with_two() {
    let (dir, schema) = write_schema("input", SCHEMA);
    let schema = schema.to_str().unwrap();

    let cases: &[(&[&str], &str)] = &[
        (&[], "too few arguments"),
        (&["a", "b"], "too many arguments"),
        (&["a", "--shout"], "unknown argument: --shout"),
        (&["--greeting"], "missing value for --greeting"),
        (&["--lang", "de", "a"], "invalid value 'de'"),
    ];
    for (tokens, expected) in cases {
        let mut args = vec![schema, "--"];
        args.extend_from_slice(tokens);
        let out = demo(&args);
        assert_eq!(out.status.code(), Some(2), "tokens {tokens:?}: {}", stderr(&out));
        assert!(
            stderr(&out).contains(*expected),
            "tokens {tokens:?}: unexpected stderr:\n{}",
            stderr(&out)
        );
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn broken_declarations_exit_with_one() {
    let (dir, schema) = write_schema(
        "broken",
        r#"{ "name": "bad", "args": [ { "name": "--mode", "flag": "mm" } ] }"#,
    );
    let out = demo(&[schema.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("malformed flag 'mm'"), "stderr:\n{}", stderr(&out));

    let out = demo(&["/nonexistent/argspec/schema.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("failed to read schema"));

    let _ = fs::remove_dir_all(&dir);
}
