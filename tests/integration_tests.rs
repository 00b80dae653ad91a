// tests/integration_tests.rs

use tq_lang::cli::{CheckOptions, CheckResult, CliError, execute_check};
use tq_lang::{EncodeOptions, Error, Format, InterpretError, Tq, run, validate};

const SERVERS: &str = r#"
title = "inventory"

[servers.prod]
ip = "10.0.0.1"
ports = [80, 443]

[servers.staging]
ip = "10.0.0.2"
ports = [8080]
"#;

const FRUIT: &str = r#"
[[fruit]]
name = "apple"

[[fruit.color]]
name = "red"

[[fruit.color]]
name = "green"
"#;

const ITEMS: &str = "items = [10, 20, 30, 40]\n";

fn query(input: &str, q: &str) -> Vec<String> {
    run(input.as_bytes(), q).unwrap()
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_nested_key_lookup() {
    assert_eq!(query(SERVERS, ".['servers']['prod']['ip']"), vec!["10.0.0.1"]);
}

#[test]
fn test_iterate_array_of_tables() {
    assert_eq!(
        query(FRUIT, ".['fruit'][0]['color'][]['name']"),
        vec!["red", "green"]
    );
}

#[test]
fn test_iterate_table_in_key_order() {
    assert_eq!(
        query(SERVERS, "['servers'][]['ip']"),
        vec!["10.0.0.1", "10.0.0.2"]
    );
}

#[test]
fn test_span_renders_as_array() {
    assert_eq!(query(ITEMS, ".['items'][1:3]"), vec!["[20, 30]"]);
}

#[test]
fn test_index_out_of_range_is_empty() {
    assert!(query(ITEMS, ".['items'][9]").is_empty());
}

#[test]
fn test_missing_key_is_empty() {
    assert!(query(SERVERS, "['clients']").is_empty());
}

#[test]
fn test_scalar_results_are_encoded() {
    let input = "port = 8080\nenabled = true\nratio = 3.0\nborn = 1979-05-27T07:32:00Z\n";
    assert_eq!(query(input, "['port']"), vec!["8080"]);
    assert_eq!(query(input, "['enabled']"), vec!["true"]);
    assert_eq!(query(input, "['ratio']"), vec!["3.0"]);
    assert_eq!(query(input, "['born']"), vec!["1979-05-27T07:32:00Z"]);
}

#[test]
fn test_strings_are_printed_raw() {
    let input = "motd = \"hello \\\"world\\\"\"\n";
    assert_eq!(query(input, "['motd']"), vec!["hello \"world\""]);
}

#[test]
fn test_empty_query_returns_document() {
    let input = "a = 1\nb = \"x\"\n";
    assert_eq!(query(input, ""), vec!["a = 1\nb = \"x\""]);
    assert_eq!(query(input, "."), query(input, ""));
}

#[test]
fn test_table_result_is_a_document() {
    assert_eq!(
        query(SERVERS, "['servers']['prod']"),
        vec!["ip = \"10.0.0.1\"\nports = [80, 443]"]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_wrong_type() {
    let err = run(ITEMS.as_bytes(), ".['items']['name']").unwrap_err();
    assert!(matches!(
        err,
        Error::Interpret(InterpretError::WrongType { kind: "array", .. })
    ));
    assert_eq!(
        err.to_string(),
        "Interpreter error: cannot query [ array ] ( [10, 20, 30, 40] ) with ( string \"name\" )"
    );
}

#[test]
fn test_query_is_checked_before_document() {
    let err = run(b"not = = toml", "['a'").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_invalid_document() {
    let err = run(b"not = = toml", "['a']").unwrap_err();
    assert!(matches!(err, Error::Codec(_)));
    assert!(err.to_string().starts_with("TOML error:"));
}

#[test]
fn test_lexer_error_surfaces() {
    let err = run(ITEMS.as_bytes(), "['items'] | length").unwrap_err();
    assert!(matches!(err, Error::Lex(_)));
    assert!(err.to_string().contains("Lexer error: disallowed character"));
}

#[test]
fn test_validate() {
    assert!(validate(".['servers'][]['ip']").is_none());
    assert!(validate("").is_none());

    let err = validate("['interfaces'][0").unwrap();
    assert!(err.to_string().ends_with("but got 'EOF'"));
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_inline_tables() {
    let tq = Tq::new(
        Format::Toml,
        EncodeOptions {
            inline_tables: true,
            ..EncodeOptions::default()
        },
    );
    let results = tq.run(SERVERS.as_bytes(), "['servers']").unwrap();
    assert_eq!(
        results,
        vec![
            "prod = { ip = \"10.0.0.1\", ports = [80, 443] }\n\
             staging = { ip = \"10.0.0.2\", ports = [8080] }"
        ]
    );
}

#[test]
fn test_json_format() {
    let input = br#"{"servers": [{"ip": "10.0.0.1"}, {"ip": "10.0.0.2", "port": 22}]}"#;

    let tq = Tq::new(Format::Json, EncodeOptions::default());
    assert_eq!(
        tq.run(input, "['servers'][]['ip']").unwrap(),
        vec!["10.0.0.1", "10.0.0.2"]
    );
    assert_eq!(
        tq.run(input, "['servers'][1]").unwrap(),
        vec!["{\n  \"ip\": \"10.0.0.2\",\n  \"port\": 22\n}"]
    );

    let compact = Tq::new(
        Format::Json,
        EncodeOptions {
            inline_tables: true,
            ..EncodeOptions::default()
        },
    );
    assert_eq!(
        compact.run(input, "['servers'][0]").unwrap(),
        vec!["{\"ip\":\"10.0.0.1\"}"]
    );
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_check_syntax_only() {
    let options = CheckOptions {
        query: ".['a'][0:2]".to_string(),
        syntax_only: true,
        ..CheckOptions::default()
    };
    assert_eq!(execute_check(&options).unwrap(), CheckResult::SyntaxValid);
}

#[test]
fn test_check_syntax_error() {
    let options = CheckOptions {
        query: ".['a'".to_string(),
        syntax_only: true,
        ..CheckOptions::default()
    };
    let err = execute_check(&options).unwrap_err();
    assert!(matches!(err, CliError::Query(Error::Parse(_))));
}

#[test]
fn test_check_without_input() {
    let err = execute_check(&CheckOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_check_concatenates_inputs() {
    let options = CheckOptions {
        query: "['name']".to_string(),
        inputs: vec![b"name = \"a\"".to_vec(), b"other = 1".to_vec(), b"name = \"c\"".to_vec()],
        ..CheckOptions::default()
    };
    assert_eq!(
        execute_check(&options).unwrap(),
        CheckResult::Success(vec!["a".to_string(), "c".to_string()])
    );
}
