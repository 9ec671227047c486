//! Tests for fix merging and iterated fixing.
#![allow(clippy::unwrap_used)]

use semiquote::analyzer::{analyze_source, fix_source};
use semiquote::config::{QuoteOptions, QuoteStyle, SemiMode, SemiOptions, StyleConfig};
use semiquote::fix::{ByteRangeRewriter, Edit};

fn config(style: QuoteStyle, mode: SemiMode) -> StyleConfig {
    StyleConfig {
        quotes: Some(QuoteOptions {
            style,
            ..QuoteOptions::default()
        }),
        semi: Some(SemiOptions {
            mode,
            ..SemiOptions::default()
        }),
    }
}

const SAMPLE: &str = "\
'use strict'
import a from 'a'
const b = `plain`
class C {
  x = 'y'
  static { run(\"z\") }
  m() { return `t${b}` }
}
if (a) { go() }
";

#[test]
fn test_fixed_output_is_clean() {
    for (style, mode) in [
        (QuoteStyle::Double, SemiMode::Always),
        (QuoteStyle::Single, SemiMode::Never),
        (QuoteStyle::Backtick, SemiMode::Always),
    ] {
        let config = config(style, mode);
        let fixed = fix_source(SAMPLE, &config).unwrap();
        assert!(fixed.remaining.is_empty(), "{style:?} {mode:?}: {:?}", fixed.remaining);
        let again = analyze_source(&fixed.output, &config).unwrap();
        assert!(again.diagnostics.is_empty(), "{style:?} {mode:?}");
    }
}

#[test]
fn test_double_always_output() {
    let fixed = fix_source(SAMPLE, &config(QuoteStyle::Double, SemiMode::Always)).unwrap();
    assert_eq!(
        fixed.output,
        "\
\"use strict\";
import a from \"a\";
const b = \"plain\";
class C {
  x = \"y\";
  static { run(\"z\"); }
  m() { return `t${b}`; }
}
if (a) { go(); }
"
    );
    assert_eq!(fixed.fixes_applied, 11);
}

#[test]
fn test_edits_are_sorted_and_disjoint() {
    let report = analyze_source("a('b')\nc(`d`)", &StyleConfig::default()).unwrap();
    assert_eq!(report.diagnostics.len(), 4);
    assert_eq!(report.edits.len(), 4);
    for pair in report.edits.windows(2) {
        assert!(pair[0].start_byte <= pair[1].start_byte);
        assert!(!pair[0].conflicts_with(&pair[1]));
    }

    let mut rewriter = ByteRangeRewriter::new("a('b')\nc(`d`)");
    rewriter.add_edits(report.edits);
    assert_eq!(rewriter.apply().unwrap(), "a(\"b\");\nc(\"d\");");
}

#[test]
fn test_unfixable_diagnostics_stay_unfixed() {
    let config = config(QuoteStyle::Backtick, SemiMode::Always);
    let fixed = fix_source("var a = '\\1'", &config).unwrap();
    assert_eq!(fixed.output, "var a = '\\1';");
    assert_eq!(fixed.fixes_applied, 1);
    assert_eq!(fixed.remaining.len(), 1);
    assert!(fixed.remaining[0].fix.is_none());
}

#[test]
fn test_unparsable_source_is_an_error() {
    assert!(analyze_source("var a = 'b", &StyleConfig::default()).is_err());
    assert!(fix_source("function (", &StyleConfig::default()).is_err());
}

#[test]
fn test_clean_source_is_untouched() {
    let source = "var a = \"b\";\n";
    let fixed = fix_source(source, &StyleConfig::default()).unwrap();
    assert_eq!(fixed.output, source);
    assert_eq!(fixed.fixes_applied, 0);
}

#[test]
fn test_edit_constructors() {
    assert_eq!(Edit::insert(3, ";").range_len(), 0);
    assert!(Edit::insert(3, ";").is_insertion());
    assert_eq!(Edit::delete(2, 3).replacement, "");
}
