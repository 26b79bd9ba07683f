//! Property-based tests for strategy selection.

use bench_outputter::{build_outputter, Config, ConsoleConfig, Format, JsonConfig, SelectedOutputter, Summary};
use proptest::prelude::*;
use std::collections::HashMap;

// ============================================================================
// Strategies
// ============================================================================

fn arb_format() -> impl Strategy<Value = Format> {
    prop_oneof![
        Just(Format::Json),
        Just(Format::PgSql),
        Just(Format::Console),
        any::<i32>().prop_map(Format::from_code),
    ]
}

fn arb_non_empty_summary() -> impl Strategy<Value = Summary> {
    (0u32..1000, 0u32..1000, 0u32..1000, 0u32..1000)
        .prop_filter("at least one result", |(p, f, w, i)| p + f + w + i > 0)
        .prop_map(|(p, f, w, i)| Summary::new(p, f, w, i))
}

fn arb_values() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map("PGSQL_[A-Z]{1,8}", "[a-z0-9.]{0,12}", 0..4)
}

fn arb_config() -> impl Strategy<Value = Config> {
    (
        arb_format(),
        any::<bool>(),
        any::<bool>(),
        prop::option::of("[a-z]{1,10}\\.json"),
        arb_values(),
    )
        .prop_map(|(format, no_remediations, include_test_output, filename, values)| Config {
            console: ConsoleConfig {
                no_remediations,
                include_test_output,
            },
            json: JsonConfig { filename },
            format,
            values,
        })
}

fn assert_console_bound(selected: &SelectedOutputter, config: &Config) {
    match selected {
        SelectedOutputter::Console(o) => {
            assert_eq!(o.no_remediations(), config.console.no_remediations);
            assert_eq!(o.include_test_output(), config.console.include_test_output);
        }
        other => panic!("expected console, got {:?}", other),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn empty_summary_always_selects_console(config in arb_config()) {
        let selected = build_outputter(&Summary::default(), &config);
        assert_console_bound(&selected, &config);
    }

    #[test]
    fn json_format_binds_filename(summary in arb_non_empty_summary(), config in arb_config()) {
        let config = config.with_format(Format::Json);
        match build_outputter(&summary, &config) {
            SelectedOutputter::Json(o) => {
                prop_assert_eq!(o.filename(), config.json.filename.as_deref());
            }
            other => prop_assert!(false, "expected json, got {:?}", other),
        }
    }

    #[test]
    fn pgsql_format_binds_values(summary in arb_non_empty_summary(), config in arb_config()) {
        let config = config.with_format(Format::PgSql);
        match build_outputter(&summary, &config) {
            SelectedOutputter::PgSql(o) => prop_assert_eq!(o.values(), &config.values),
            other => prop_assert!(false, "expected pgsql, got {:?}", other),
        }
    }

    #[test]
    fn other_formats_fall_back_to_console(summary in arb_non_empty_summary(), config in arb_config()) {
        prop_assume!(!matches!(config.format, Format::Json | Format::PgSql));
        let selected = build_outputter(&summary, &config);
        assert_console_bound(&selected, &config);
    }

    #[test]
    fn raw_code_routes_like_its_normalized_format(summary in arb_non_empty_summary(), code in any::<i32>()) {
        let base = Config {
            console: ConsoleConfig { no_remediations: false, include_test_output: false },
            json: JsonConfig { filename: None },
            format: Format::Unrecognized(code),
            values: HashMap::new(),
        };
        let raw = build_outputter(&summary, &base).format();
        let normalized = build_outputter(&summary, &base.clone().with_format(Format::from_code(code))).format();
        prop_assert_eq!(raw, normalized);
    }

    #[test]
    fn format_code_round_trip(code in any::<i32>()) {
        prop_assert_eq!(Format::from_code(code).code(), code);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn pass_only_summary_with_json_file() {
    let config = Config {
        console: ConsoleConfig {
            no_remediations: false,
            include_test_output: false,
        },
        json: JsonConfig {
            filename: Some("report.json".to_string()),
        },
        format: Format::Json,
        values: HashMap::new(),
    };

    let selected = build_outputter(&Summary::new(3, 0, 0, 0), &config);

    assert!(matches!(selected, SelectedOutputter::Json(ref o) if o.filename() == Some("report.json")));
}

#[test]
fn zero_summary_with_pgsql_reports_to_console() {
    let config = Config {
        console: ConsoleConfig {
            no_remediations: true,
            include_test_output: false,
        },
        json: JsonConfig { filename: None },
        format: Format::PgSql,
        values: HashMap::from([("PGSQL_HOST".to_string(), "db".to_string())]),
    };

    let selected = build_outputter(&Summary::new(0, 0, 0, 0), &config);

    assert_console_bound(&selected, &config);
}
