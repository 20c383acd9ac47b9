use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use serde::Deserialize;
use splice_fs::{ConfigStore, Error};

#[derive(Debug, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[rstest]
#[case("config.toml", "name = \"test\"\ncount = 42\n")]
#[case("config.json", r#"{"name": "test", "count": 42}"#)]
#[case("config.yaml", "name: test\ncount: 42\n")]
#[case("config.YML", "name: test\ncount: 42\n")]
fn test_load_by_extension(#[case] file: &str, #[case] content: &str) {
    let temp = assert_fs::TempDir::new().unwrap();
    let child = temp.child(file);
    child.write_str(content).unwrap();

    let config: TestConfig = ConfigStore::new().load(child.path()).unwrap();
    assert_eq!(
        config,
        TestConfig {
            name: "test".into(),
            count: 42
        }
    );
}

#[test]
fn test_load_unsupported_extension() {
    let temp = assert_fs::TempDir::new().unwrap();
    let child = temp.child("config.ini");
    child.write_str("name=test").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(child.path());
    assert!(matches!(
        result,
        Err(Error::UnsupportedFormat { ref extension }) if extension == "ini"
    ));
}

#[test]
fn test_load_reports_parse_errors_with_format() {
    let temp = assert_fs::TempDir::new().unwrap();
    let child = temp.child("plan.toml");
    child.write_str("name = ").unwrap();

    let err = ConfigStore::new().load::<TestConfig>(child.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { ref format, .. } if format == "TOML"));
    assert!(predicate::str::contains("plan.toml").eval(&err.to_string()));
    child.assert("name = ");
}
