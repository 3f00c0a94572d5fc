use std::{collections::HashMap, fs};

use condexpr::{BooleanExpression, ConditionExpression, IntegerExpression, compile};
use walkdir::WalkDir;

fn test_values() -> HashMap<&'static str, i32> {
    HashMap::from([("t", 5), ("t-1", 7), ("one", 1), ("five", 5)])
}

fn assert_value(src: &str, expected: i32) {
    match IntegerExpression::new(src) {
        Ok(expr) => assert_eq!(expr.evaluate(&test_values()), expected, "{src}"),
        Err(e) => panic!("Expression '{src}' failed to compile: {e}"),
    }
}

fn assert_true(src: &str) {
    match IntegerExpression::new(src) {
        Ok(expr) => assert!(expr.is_true(&test_values()), "{src} should be true"),
        Err(e) => panic!("Expression '{src}' failed to compile: {e}"),
    }
}

fn assert_false(src: &str) {
    match IntegerExpression::new(src) {
        Ok(expr) => assert!(!expr.is_true(&test_values()), "{src} should be false"),
        Err(e) => panic!("Expression '{src}' failed to compile: {e}"),
    }
}

fn assert_failure(src: &str, message: &str) {
    match compile(src) {
        Ok(expr) => panic!("Expression '{src}' compiled to {} but was expected to fail", expr.root()),
        Err(e) => assert_eq!(e.to_string(), message, "{src}"),
    }
}

#[test]
fn numbers() {
    assert_failure("1a", "Number 1 and variable merged at index 0");
    assert_value("0", 0);
    assert_value("1", 1);
    assert_value("12", 12);
    assert_value("-1", -1);
    assert_value("-12", -12);
    assert_value("2147483647", i32::MAX);
    assert_value("-2147483648", i32::MIN);
    assert_failure("2147483648", "Number 2147483648 is out of range at index 0");
}

#[test]
fn variables() {
    assert_value("one", 1);
    assert_value("five", 5);
}

#[test]
fn boolean_constants() {
    assert_value(" true", 1);
    assert_value(" true ", 1);
    assert_value("true", 1);
    assert_value("false", 0);
    assert_value("tru", 0);
    assert_value("fals", 0);
    assert_value("tr", 0);
    assert_value("fal", 0);
}

#[test]
fn and_operation() {
    assert_true("true && true");
    assert_false("false && false");
    assert_false("true && false");
    assert_false("false && true");
    assert_value("2 && false", 0);
    assert_value("false && 2", 0);
    assert_value("3 && 2", 1);
    assert_value("2 && 3", 1);
}

#[test]
fn or_operation() {
    assert_true("true || true");
    assert_false("false || false");
    assert_true("true || false");
    assert_true("false || true");
    assert_value("2 || false", 1);
    assert_value("false || 2", 1);
    assert_value("3 || 2", 1);
    assert_value("2 || 3", 1);
}

#[test]
fn equals_operation() {
    assert_true("true == true");
    assert_true("false == false");
    assert_false("true == false");
    assert_false("false == true");
    assert_true("1 == 1");
    assert_true("0 == 0");
    assert_false("1 == 0");
    assert_true("1 == true");
    assert_false("1 == false");
    assert_true("0 == false");
    assert_false("0 == true");
    assert_value("12 == 12", 1);
    assert_value("1 == 12", 0);
}

#[test]
fn not_equals_operation() {
    assert_false("true != true");
    assert_false("false != false");
    assert_true("true != false");
    assert_true("false != true");
    assert_value("1 != 2", 1);
    assert_value("1 != 1", 0);
    assert_false("1 != true");
    assert_false("0 != false");
    assert_true("1 != false");
    assert_true("0 != true");
}

#[test]
fn not_operation() {
    assert_value("!true", 0);
    assert_value("!false", 1);
    assert_value("!!true", 1);
    assert_value("!!false", 0);
    assert_value("!0", 1);
    assert_value("!1", 0);
    assert_value("!5", 0);
    assert_value("!!5", 1);
    assert_value("!-5", 0);
}

#[test]
fn not_depends_on_policy() {
    let bindings = test_values();
    assert_eq!(ConditionExpression::new("!-5").unwrap().evaluate(&bindings), 1);
    assert_eq!(IntegerExpression::new("!-5").unwrap().evaluate(&bindings), 0);
    assert!(!ConditionExpression::new("-1 || 0").unwrap().is_true(&bindings));
    assert!(IntegerExpression::new("-1 || 0").unwrap().is_true(&bindings));
}

#[test]
fn relation_operations() {
    for (src, expected) in [("2 < 5", 1),
                            ("0 < 5", 1),
                            ("5 < 2", 0),
                            ("5 < 5", 0),
                            ("-5 < 0", 1),
                            ("-2 < -5", 0),
                            ("-5 < -2", 1),
                            ("-5 < -5", 0),
                            ("-7 < 5", 1),
                            ("0 <= 5", 1),
                            ("2 <= 5", 1),
                            ("5 <= 2", 0),
                            ("5 <= 5", 1),
                            ("5 <= 0", 0),
                            ("-2 <= -5", 0),
                            ("-5 <= -2", 1),
                            ("-5 <= -5", 1),
                            ("-7 <= 5", 1),
                            ("0 <= -5", 0),
                            ("-5 <= 0", 1),
                            ("5 > 2", 1),
                            ("0 > 5", 0),
                            ("2 > 5", 0),
                            ("5 > 5", 0),
                            ("5 > 0", 1),
                            ("-2 > -5", 1),
                            ("-7 > -5", 0),
                            ("-5 > -5", 0),
                            ("-4 > -5", 1),
                            ("5 >= 0", 1),
                            ("0 >= 5", 0),
                            ("5 >= 2", 1),
                            ("2 >= 5", 0),
                            ("5 >= 5", 1),
                            ("-5 >= 0", 0),
                            ("0 >= -5", 1),
                            ("-7 >= 5", 0),
                            ("-5 >= -5", 1),
                            ("-4 >= -5", 1)]
    {
        assert_value(src, expected);
    }
}

#[test]
fn relation_mixed_precedence() {
    assert_value("5 <= 5 && 2 > 1", 1);
    assert_value("5 > 5 || 2 > 1", 1);
    assert_value("5 > 5 || 1 > 1", 0);
    assert_value("5 <= 5 == 2 > 1", 1);
    assert_value("5 > 5 == 2 > 1", 0);
    assert_value("5 > 5 == 1 > 1", 1);
    assert_value("5 <= 5 != 2 > 1", 0);
    assert_value("5 > 5 != 2 > 1", 1);
    assert_value("5 > 5 != 1 > 1", 0);
    assert_value("5 > 5 != 1 >= 1", 1);
}

#[test]
fn and_or_precedence() {
    assert_true("true && false || true");
    assert_false("false || false && true");
    assert_true("true && !true || !false");
    assert_false("false || !true && !false");
}

#[test]
fn parenthesis() {
    assert_true("(true)");
    assert_true("((true))");
    assert_false("(false)");
    assert_false("((false))");
}

#[test]
fn arithmetic() {
    assert_value("~0", !0);
    assert_value("-0", 0);
    assert_value("-a", 0);
    assert_value("-true", -1);
    assert_value("~-0", -1);
    assert_value("2 + 3", 5);
    assert_value("2 + 0", 2);
    assert_value("5 - 3", 2);
    assert_value("5 - -3", 8);
    assert_value("5 - 0", 5);
    assert_value("2 * 3", 6);
    assert_value("2 * 0", 0);
    assert_value("2 * -3", -6);
    assert_value("-2 * 3", -6);
    assert_value("-2 * -3", 6);
    assert_value("6 / 3", 2);
    assert_value("7 / 3", 2);
    assert_value("-6 / 3", -2);
    assert_value("6 / -3", -2);
    assert_value("-6 / -3", 2);
    assert_value("8 / 3", 2);
    assert_value("6 % 3", 0);
    assert_value("7 % 3", 1);
    assert_value("8 % 3", 2);
    assert_value("7 % 0", 0);
    assert_value("-7 % 3", -1);
    assert_value("7 % -3", 1);
    assert_value("-7 % -3", -1);
    assert_value("8 / 0", 0);
}

#[test]
fn arithmetic_overflow_wraps() {
    assert_value("2147483647 + 1", i32::MIN);
    assert_value("-2147483648 - 1", i32::MAX);
    assert_value("-2147483648 / -1", i32::MIN);
    assert_value("-2147483648 % -1", 0);
    assert_value("- -2147483648", i32::MIN);
}

#[test]
fn arithmetic_mixed() {
    assert_value("~~0", 0);
    assert_value("-~0", 1);
    assert_value("~- 0", -1);
    assert_value("2 * 3 + 4", 10);
    assert_value("2 * 3 - 4", 2);
    assert_value("2 + 3 * 4", 14);
    assert_value("2 + 3 % 4", 5);
    assert_value("2 + 3 / 4", 2);
    assert_value("2 * 3 / 4", 1);
    assert_value("8 / 2 == 4", 1);
    assert_value("~2 + ~3", -7);
    assert_value("~(~2 + ~3)", 6);
}

#[test]
fn hyphen() {
    assert_value("t-1", 7);
    assert_value("-t-1", -7);
    assert_value("t - 1", 4);
    assert_value("-1", -1);
}

#[test]
fn parenthesis_and_mixed_operations() {
    assert_true("(!false)");
    assert_true("!(false)");
    assert_false("!(!false)");
    assert_true("(true) || (false)");
    assert_true("true && (false || true)");
    assert_true("(true && false) || true");
    assert_true("!(true && false) || false");
    assert_true("((true != true) == false) && true");
    assert_false("(true != false) == false && true");
    assert_true("true || ((true != false) != !(false && true))");
    assert_false("((true != false) != !(false && true))");
}

#[test]
fn parser_errors() {
    assert_failure("", "Empty expression");
    assert_failure("   ", "Empty expression");
    assert_failure("()", "Empty parenthesis at index 0");
    assert_failure("! && true",
                   "Missing value or sub-expression or there is an extra operator '!' at index 0 or '&&' at index 2");
    assert_failure("(true", "Unclosed opening parenthesis at index 0");
    assert_failure(")true", "Unmatched closing parenthesis at index 0");
    assert_failure("false)", "Unmatched closing parenthesis at index 5");
    assert_failure("false(", "Missing binary operation before '(' at index 5");
    assert_failure("(", "Missing value or sub-expression at end for '(' operator");
    assert_failure(")", "Unmatched closing parenthesis at index 0");
    assert_failure("false!", "Missing binary operation before '!' at index 5");
    assert_failure("true false", "Missing binary operation before 'false' at index 5");
    assert_failure("true & false", "Unexpected character '&' at index 5 - should it be '&&'?");
    assert_failure("true | false", "Unexpected character '|' at index 5 - should it be '||'?");
    assert_failure("true : false", "Invalid character ':' at index 5");
    assert_failure("true & false && !", "Unexpected character '&' at index 5 - should it be '&&'?");
    assert_failure("(true && !)",
                   "Missing value or sub-expression or there is an extra operator '!' at index 9 or ')' at index 10");
    assert_failure("&& false", "Missing value or sub-expression at beginning for '&&' operator");
    assert_failure("false ||", "Missing value or sub-expression at end for '||' operator");
    assert_failure("1 <", "Missing value or sub-expression at end for '<' operator");
    assert_failure("-1a", "Number -1 and variable merged at index 0");
}

#[test]
fn nested_unclosed_parenthesis_reports_innermost() {
    assert_failure("(1 + (2", "Unclosed opening parenthesis at index 5");
}

#[test]
fn hyphen_parser_errors() {
    assert_failure("-", "Missing value or sub-expression at end for '-' operator");
    assert_failure("-1-1", "Missing binary operation before '-1' at index 2");
    assert_failure("5-1", "Missing binary operation before '-1' at index 1");
    assert_failure("6 -1", "Missing binary operation before '-1' at index 2");
    assert_failure("t -1", "Missing binary operation before '-1' at index 2");
}

#[test]
fn identifier_end_errors() {
    for end in ['-', '.', '@', '$'] {
        let message = format!("Invalid identifier end character at index 1 for 't{end}'");
        assert_failure(&format!("t{end} 1"), &message);
        assert_failure(&format!("t{end}"), &message);
    }
}

#[test]
fn binary_operator_whitespace_errors() {
    // `6- 1` is a spacing error; `t- 1` starts with an invalid identifier.
    assert_failure("6- 1", "Missing whitespace at index 2, before '-' operator.");

    for op in ["+", "*", "/", "%", "<", ">", "&&", "||", "==", "!=", "<=", ">="] {
        let before = format!("Missing whitespace at index {}, before '{op}' operator.", op.len() + 1);
        let after = format!("Missing whitespace at index {}, after '{op}' operator.", op.len() + 2);

        for lhs in ["6", "t"] {
            assert_failure(&format!("{lhs}{op} 1"), &before);
            assert_failure(&format!("{lhs} {op}1"), &after);
            assert_failure(&format!("{lhs}{op}1"), &before);
        }
    }
}

#[test]
fn undefined_symbols_are_false() {
    assert_false("undef1 || undef2");
    assert_value("undef1", 0);
    assert_value("undef1 + undef2", 0);
}

#[test]
fn boolean_tier() {
    let bindings = HashMap::from([("a", true), ("b", false)]);
    let eval = |src: &str| BooleanExpression::new(src).unwrap().evaluate(&bindings);

    assert!(eval("a"));
    assert!(!eval("b"));
    assert!(!eval("undefined"));
    assert!(eval("a && !b"));
    assert!(eval("a == !b"));
    assert!(eval("(a != b) == true"));
    assert!(!eval("a && (b || false)"));
}

#[test]
fn boolean_tier_rejects_integers() {
    let message = |src: &str| BooleanExpression::new(src).unwrap_err().to_string();

    assert_eq!(message("a && 1"),
               "Number '1' at index 5 is not supported in a boolean expression");
    assert_eq!(message("a + b"),
               "Operator '+' at index 2 is not supported in a boolean expression");
    assert_eq!(message("~a"),
               "Operator '~' at index 0 is not supported in a boolean expression");
    assert_eq!(message("-a"),
               "Operator '-' at index 0 is not supported in a boolean expression");
    assert_eq!(message("a< b"),
               "Operator '<' at index 1 is not supported in a boolean expression");
}

#[test]
fn diagnostics_carry_offsets() {
    let error = compile("true false").unwrap_err();
    assert_eq!(error.index(), 5);
    assert_eq!(error.secondary_index(), Some(0));
    assert_eq!(error.render("true false"),
               "Missing binary operation before 'false' at index 5\n  true false\n  ^    ^");

    let error = compile("! && true").unwrap_err();
    assert_eq!(error.index(), 0);
    assert_eq!(error.secondary_index(), Some(2));
}

#[test]
fn deep_nesting_is_rejected_before_descending() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_failure(&source, "Expression is nested too deeply at index 64: more than 64 levels");

    let source = format!("{}1", "!".repeat(10_000));
    assert_failure(&source, "Expression is nested too deeply at index 64: more than 64 levels");

    let source = format!("{}1{}", "-(".repeat(40), ")".repeat(40));
    assert_failure(&source, "Expression is nested too deeply at index 64: more than 64 levels");
}

#[test]
fn nesting_up_to_the_limit_compiles() {
    let source = format!("{}1{}", "(".repeat(64), ")".repeat(64));
    assert_value(&source, 1);

    let source = format!("{}1", "!".repeat(64));
    assert_value(&source, 1);

    let ladder = format!("{}1{}", "one || t && one == t < one + t * (".repeat(64), ")".repeat(64));
    assert_value(&ladder, 1);
}

#[test]
fn long_flat_chains_compile() {
    let source = vec!["1"; 600].join(" + ");
    assert_value(&source, 600);

    let source = vec!["one"; 1000].join(" && ");
    assert_value(&source, 1);
}

#[test]
fn overly_long_expressions_are_rejected() {
    let source = vec!["1"; 2000].join(" + ");
    let error = compile(&source).unwrap_err();
    assert!(error.to_string().starts_with("Expression is too long"), "{error}");
}

#[test]
fn unicode_identifiers_and_whitespace() {
    let bindings = HashMap::from([("aé", 2), ("größe", 40)]);
    let eval = |src: &str| IntegerExpression::new(src).unwrap().evaluate(&bindings);

    assert_eq!(eval("aé + 1"), 3);
    assert_eq!(eval("größe / aé"), 20);
    assert_eq!(eval("1\u{a0}+\u{a0}2"), 3);
    assert_eq!(eval("1 + 2\u{0b}"), 3);
    assert_eq!(eval("\u{3000}aé\u{3000}"), 2);
}

#[test]
fn unicode_offsets_count_characters() {
    assert_failure("ä 1", "Missing binary operation before '1' at index 2");
    assert_failure("größe+ 1", "Missing whitespace at index 6, before '+' operator.");
    assert_failure("größe +1", "Missing whitespace at index 7, after '+' operator.");
    assert_failure("größe ||", "Missing value or sub-expression at end for '||' operator");
    assert_failure("(größe", "Unclosed opening parenthesis at index 0");
    assert_failure("größe # 1", "Invalid character '#' at index 6");
    assert_failure("größe-", "Invalid identifier end character at index 5 for 'größe-'");

    let error = compile("ü ||").unwrap_err();
    assert_eq!(error.index(), 4);
}

#[test]
fn fixture_cases() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "cases"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for case in parse_cases(&content) {
            count += 1;
            if let Err(e) = case.check() {
                panic!("Case on line {} of {:?} failed:\n{}\n{}", case.line, path, case.source, e);
            }
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tier {
    Integer,
    Condition,
    Boolean,
}

struct Case {
    line:     usize,
    tier:     Tier,
    bindings: HashMap<String, i32>,
    source:   String,
    expected: String,
}

impl Case {
    fn check(&self) -> Result<(), String> {
        let actual = match self.tier {
            Tier::Integer => IntegerExpression::new(&self.source).map(|e| e.evaluate(&self.bindings).to_string()),
            Tier::Condition => {
                ConditionExpression::new(&self.source).map(|e| e.evaluate(&self.bindings).to_string())
            },
            Tier::Boolean => {
                let bindings: HashMap<&str, bool> =
                    self.bindings.iter().map(|(k, v)| (k.as_str(), *v != 0)).collect();
                BooleanExpression::new(&self.source).map(|e| e.evaluate(&bindings).to_string())
            },
        };
        let actual = actual.unwrap_or_else(|e| format!("error: {e}"));

        if actual == self.expected {
            Ok(())
        } else {
            Err(format!("expected `{}`, got `{actual}`", self.expected))
        }
    }
}

/// Reads `[tier]` headers, `let name = value` bindings and
/// `source => expected` cases.
fn parse_cases(content: &str) -> Vec<Case> {
    let mut cases = Vec::new();
    let mut tier = Tier::Integer;
    let mut bindings = HashMap::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line {
            "[integer]" => tier = Tier::Integer,
            "[condition]" => tier = Tier::Condition,
            "[boolean]" => tier = Tier::Boolean,
            _ => {
                if let Some(binding) = line.strip_prefix("let ") {
                    let (name, value) = binding.split_once('=').expect("binding needs '='");
                    let value = match value.trim() {
                        "true" => 1,
                        "false" => 0,
                        other => other.parse().expect("binding value must be an integer"),
                    };
                    bindings.insert(name.trim().to_string(), value);
                    continue;
                }

                let (source, expected) =
                    line.split_once(" => ").unwrap_or_else(|| panic!("Malformed case on line {}", i + 1));
                cases.push(Case { line: i + 1,
                                  tier,
                                  bindings: bindings.clone(),
                                  source: source.to_string(),
                                  expected: expected.to_string() });
            },
        }
    }

    cases
}
