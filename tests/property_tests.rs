// tests/property_tests.rs

use proptest::prelude::*;
use tq_lang::ast::Source;
use tq_lang::interpreter::Stage;
use tq_lang::lexer::Lexer;
use tq_lang::value::{Table, Value};
use tq_lang::{compile, run};

/// One well-formed filter as query text.
fn filter() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just("[]".to_string()),
        "[a-z][a-z0-9_-]{0,8}".prop_map(|k| format!("['{}']", k)),
        "[a-z ]{0,8}".prop_map(|k| format!("[\"{}\"]", k)),
        "[a-z][a-z0-9_-]{0,8}".prop_map(|k| format!("[{}]", k)),
        (0usize..50).prop_map(|i| format!("[{}]", i)),
        (proptest::option::of(0usize..50), proptest::option::of(0usize..50)).prop_map(|(l, r)| {
            let bound = |b: Option<usize>| b.map(|n| n.to_string()).unwrap_or_default();
            format!("[{}:{}]", bound(l), bound(r))
        }),
    ]
}

fn query() -> impl Strategy<Value = String> {
    prop::collection::vec((filter(), "[ ]{0,2}"), 0..6).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(filter, ws)| format!("{}{}", filter, ws))
            .collect()
    })
}

fn ints(n: usize) -> Vec<Value> {
    (0..n as i64).map(Value::Integer).collect()
}

proptest! {
    #[test]
    fn well_formed_queries_compile(q in query()) {
        prop_assert!(compile(&q).is_ok(), "failed to compile {:?}", q);
    }

    #[test]
    fn token_text_rebuilds_query(q in query()) {
        let source = Source::new(&q);
        let mut lexer = Lexer::new(&source);
        let (tokens, ok) = lexer.scan_all(false);
        prop_assert!(ok);

        let rebuilt: String = tokens.iter().map(|t| t.text(&source)).collect();
        prop_assert_eq!(rebuilt, q);
    }

    #[test]
    fn arbitrary_input_never_panics(q in "\\PC{0,24}") {
        let _ = compile(&q);
    }

    #[test]
    fn span_stays_within_bounds(
        n in 0usize..20,
        left in proptest::option::of(0usize..30),
        right in proptest::option::of(0usize..30),
    ) {
        let stage = Stage::Span { left, right };
        let result = stage.apply(vec![Value::Array(ints(n))]).unwrap();

        let l = left.unwrap_or(0);
        let r = right.unwrap_or(n).min(n);
        if l >= n || l > r {
            prop_assert!(result.is_empty());
        } else {
            prop_assert_eq!(result, vec![Value::Array(ints(n)[l..r].to_vec())]);
        }
    }

    #[test]
    fn empty_query_returns_document(n in 0usize..10, key in "[a-z]{1,6}") {
        let mut table = Table::new();
        table.insert(key, Value::Array(ints(n)));
        let doc = Value::Table(table);

        let program = compile("").unwrap();
        prop_assert_eq!(program.execute(doc.clone()).unwrap(), vec![doc]);
    }

    #[test]
    fn identity_changes_nothing(n in 0usize..10, dots in 0usize..4) {
        let input = format!("items = {}\n", Value::Array(ints(n)));

        let plain = run(input.as_bytes(), "['items']").unwrap();
        let dotted = run(input.as_bytes(), &format!("{}['items']", ".".repeat(dots))).unwrap();
        prop_assert_eq!(plain, dotted);
    }
}
