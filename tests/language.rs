use std::{fs, path::Path};

use pretty_assertions::assert_eq;
use walkdir::WalkDir;
use yapl::{YaplError, error::Fault, parse_source, run, run_file};

/// Runs every `tests/scripts/*.yapl` file and compares its printed output with
/// the matching `.out` file. A script with a `.err` file must fail with exactly
/// that diagnostic text.
#[test]
fn script_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "yapl"))
    {
        count += 1;
        check_script(entry.path());
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn check_script(path: &Path) {
    let source =
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
    let expected_out = fs::read_to_string(path.with_extension("out")).unwrap_or_default();
    let expected_err = fs::read_to_string(path.with_extension("err")).ok();
    let name = path.file_name().unwrap().to_string_lossy();

    let mut out = Vec::new();
    let result = run(&source, &name, &mut out);

    assert_eq!(String::from_utf8(out).unwrap(), expected_out, "output of {path:?}");
    match (result, expected_err) {
        (Ok(()), None) => {},
        (Err(e), Some(expected)) => assert_eq!(e.to_string(), expected.trim_end(), "{path:?}"),
        (Ok(()), Some(expected)) => panic!("{path:?} succeeded but should fail with:\n{expected}"),
        (Err(e), None) => panic!("{path:?} failed:\n{e}"),
    }
}

fn output(src: &str) -> String {
    let mut out = Vec::new();
    if let Err(e) = run(src, "inline.yapl", &mut out) {
        panic!("Script failed: {e}");
    }
    String::from_utf8(out).unwrap()
}

fn runtime_fault(src: &str) -> (usize, Fault) {
    match run(src, "inline.yapl", Vec::new()) {
        Err(YaplError::Runtime(e)) => (e.line, e.fault),
        Err(e) => panic!("Expected a runtime fault, got: {e}"),
        Ok(()) => panic!("Script succeeded but was expected to fail"),
    }
}

#[test]
fn product_of_a_declared_sum() {
    assert_eq!(output("x: int = 1 + 2 * 3;\nprint x - 1;"), "6\n");
}

#[test]
fn function_result_in_expression() {
    let src = "add: func(a: int, b: int) -> int {\n    return a + b;\n}\nprint add(2, 3) * 4;";
    assert_eq!(output(src), "20\n");
}

#[test]
fn constant_reassignment_produces_no_output() {
    let mut out = Vec::new();
    let err = run("c: constant int = 1;\nc = 2;\nprint c;", "main.yapl", &mut out).unwrap_err();
    assert!(out.is_empty());
    assert_eq!(err.to_string(), "main.yapl:2: cannot assign to a constant");
}

#[test]
fn syntax_errors_prevent_execution() {
    let mut out = Vec::new();
    let err = run("print 1;\nx: int = ;\nprint 2;", "main.yapl", &mut out).unwrap_err();
    assert!(out.is_empty());
    let YaplError::Syntax(syntax) = err else {
        panic!("expected syntax errors");
    };
    assert_eq!(syntax.errors.len(), 1);
    assert_eq!(syntax.errors[0].line(), 2);
}

#[test]
fn lexical_errors_are_syntax_errors() {
    let err = run("x: int = 1;\ny: int = 2 $ 3;", "lex.yapl", Vec::new()).unwrap_err();
    assert_eq!(err.to_string(), "lex.yapl:2: unrecognized input '$'");
}

#[test]
fn parsed_unit_keeps_file_and_order() {
    let unit = parse_source("a: int = 1;\nprint a;\n{ }", "unit.yapl").unwrap();
    assert_eq!(unit.file, "unit.yapl");
    let lines: Vec<usize> = unit.declarations.iter().map(|d| d.line()).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn runtime_faults_cite_their_line() {
    assert_eq!(runtime_fault("x: int = 1;\n\nprint x / 0;"), (3, Fault::DivideByZero));
    assert_eq!(runtime_fault("f: func(a: int) {\n}\nf();"), (3, Fault::ParamCountMismatch));
    assert_eq!(runtime_fault("f: func() -> int {\n  x: int = 1;\n  return x == 1;\n}\nf();"),
               (3, Fault::WrongReturnType));
    assert_eq!(runtime_fault("print undefined_name;"), (1, Fault::UndefinedVar));
    assert_eq!(runtime_fault("x: int = 9223372036854775807;\nx += 1;"), (2, Fault::Overflow));
}

#[test]
fn program_output_persists_until_the_fault() {
    let mut out = Vec::new();
    let result = run("print \"before\";\nprint missing();\nprint \"after\";", "p.yapl", &mut out);
    assert!(result.is_err());
    assert_eq!(String::from_utf8(out).unwrap(), "before\n");
}

#[test]
fn functions_see_the_calling_scope() {
    let src = "show: func() { print depth; }\n{\n    depth: int = 2;\n    show();\n}";
    assert_eq!(output(src), "2\n");
}

#[test]
fn nested_functions_are_scoped_to_their_block() {
    let src = "{\n    inner: func() -> int { return 1; }\n    print inner();\n}\nprint inner();";
    assert_eq!(runtime_fault(src), (5, Fault::UndefinedFunc));
}

#[test]
fn single_line_programs() {
    assert_eq!(output("x: int = 5; if x > 3 { print x + 1; } else { print 0; }"), "6\n");
    assert_eq!(output("f: func(a: int) -> int { return a * 2; } print f(10);"), "20\n");

    let mut out = Vec::new();
    assert!(run("x: constant int = 1; x = 2;", "one.yapl", &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn only_the_first_true_branch_runs() {
    let src = "if false { print \"A\"; } elif true { print \"B\"; } else { print \"C\"; }";
    assert_eq!(output(src), "B\n");
}

#[test]
fn non_boolean_loop_condition_skips_the_body() {
    assert_eq!(output("i: int = 0;\nwhile i { print 1; }\nprint \"after\";"), "after\n");
}

#[test]
fn run_file_names_diagnostics_after_the_path() {
    let path = Path::new("tests/scripts/arithmetic.yapl");
    let mut out = Vec::new();
    run_file(path, &mut out).unwrap();
    let expected = fs::read_to_string(path.with_extension("out")).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), expected);

    let err = run_file(Path::new("tests/scripts/constant_fault.yapl"), Vec::new()).unwrap_err();
    assert!(err.to_string().starts_with("tests/scripts/constant_fault.yapl:"), "{err}");

    let missing = run_file(Path::new("tests/scripts/no_such_script.yapl"), Vec::new());
    assert!(matches!(missing, Err(YaplError::Io(_))));
}
