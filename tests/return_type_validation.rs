mod common;

use common::{index_from, reflect};
use phpantom_reflect::{Conformance, MethodReflector, PhpValue, ReflectionError};

const SCALARS: &str = concat!(
    "<?php\n",
    "class Scalars {\n",
    "    /**\n",
    "     * Returns an id or a slug.\n",
    "     *\n",
    "     * @param bool $slug\n",
    "     * @return int|string Some text\n",
    "     */\n",
    "    public function id($slug) {}\n",
    "\n",
    "    /**\n",
    "     * @return mixed\n",
    "     */\n",
    "    public function anything() {}\n",
    "\n",
    "    /**\n",
    "     * No tags at all.\n",
    "     */\n",
    "    public function undocumentedReturn() {}\n",
    "\n",
    "    public function noComment() {}\n",
    "\n",
    "    /**\n",
    "     * @return\n",
    "     */\n",
    "    public function blank() {}\n",
    "\n",
    "    /**\n",
    "     * @return integer|double|boolean|array|null|string\n",
    "     */\n",
    "    public function gettypeNames() {}\n",
    "\n",
    "    /** @return int */\n",
    "    public function inlineTag() {}\n",
    "}\n",
);

fn all_values() -> Vec<PhpValue> {
    vec![
        PhpValue::Null,
        PhpValue::Bool(false),
        PhpValue::Int(0),
        PhpValue::Float(1.5),
        PhpValue::String(String::new()),
        PhpValue::list([PhpValue::Int(1)]),
        PhpValue::object("Scalars"),
        PhpValue::object("Unknown\\Thing"),
        PhpValue::Resource { closed: false },
    ]
}

// ─── Construction ───────────────────────────────────────────────────────────

#[test]
fn missing_class_is_a_reflection_error() {
    let index = index_from(SCALARS);
    let err = MethodReflector::new(&index, "Nope", "id").err().unwrap();
    assert_eq!(err, ReflectionError::ClassNotFound("Nope".to_string()));
}

#[test]
fn missing_method_is_a_reflection_error() {
    let index = index_from(SCALARS);
    let err = MethodReflector::new(&index, "Scalars", "nope").err().unwrap();
    assert_eq!(
        err,
        ReflectionError::MethodNotFound {
            class: "Scalars".to_string(),
            method: "nope".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Method Scalars::nope() does not exist");
}

#[test]
fn names_are_case_insensitive() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "\\scalars", "ID");
    assert_eq!(reflector.handle().class, "Scalars");
    assert_eq!(reflector.handle().name(), "id");
}

// ─── Return type parsing through the reflector ──────────────────────────────

#[test]
fn union_types_in_declaration_order() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "id");
    assert_eq!(reflector.return_types(), ["int", "string"]);
}

#[test]
fn union_accepts_each_alternative_only() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "id");

    assert!(reflector.is_valid_return_value(&PhpValue::Int(5)));
    assert!(reflector.is_valid_return_value(&PhpValue::String("x".into())));
    assert!(!reflector.is_valid_return_value(&PhpValue::Float(2.75)));
    assert!(!reflector.is_valid_return_value(&PhpValue::Bool(true)));
    assert!(!reflector.is_valid_return_value(&PhpValue::Null));
    assert_eq!(reflector.check(&PhpValue::Int(5)), Conformance::TypeName);
    assert_eq!(reflector.check(&PhpValue::Float(2.75)), Conformance::NoMatch);
}

#[test]
fn gettype_spellings_match_directly() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "gettypeNames");

    assert!(reflector.is_valid_return_value(&PhpValue::Int(1)));
    assert!(reflector.is_valid_return_value(&PhpValue::Float(1.0)));
    assert!(reflector.is_valid_return_value(&PhpValue::Bool(true)));
    assert!(reflector.is_valid_return_value(&PhpValue::list([])));
    assert!(reflector.is_valid_return_value(&PhpValue::Null));
    assert!(reflector.is_valid_return_value(&PhpValue::String("s".into())));
    assert!(!reflector.is_valid_return_value(&PhpValue::Resource { closed: false }));
}

#[test]
fn mixed_accepts_everything() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "anything");
    for value in all_values() {
        assert!(reflector.is_valid_return_value(&value), "{value:?}");
        assert_eq!(reflector.check(&value), Conformance::Mixed);
    }
}

#[test]
fn no_return_tag_is_fail_open() {
    let index = index_from(SCALARS);
    for method in ["undocumentedReturn", "noComment", "inlineTag"] {
        let reflector = reflect(&index, "Scalars", method);
        assert!(reflector.return_types().is_empty(), "{method}");
        for value in all_values() {
            assert!(reflector.is_valid_return_value(&value), "{method}: {value:?}");
            assert_eq!(reflector.check(&value), Conformance::Unconstrained);
        }
    }
}

#[test]
fn method_without_comment_has_no_doc() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "noComment");
    assert!(reflector.doc_comment().is_none());
}

#[test]
fn blank_tag_yields_blank_token_that_matches_nothing() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "blank");
    assert_eq!(reflector.return_types(), [""]);
    for value in all_values() {
        assert!(!reflector.is_valid_return_value(&value), "{value:?}");
    }
}

#[test]
fn joining_tokens_reproduces_the_type_expression() {
    let index = index_from(concat!(
        "<?php\n",
        "class Repo {\n",
        "    /**\n",
        "     * @return  \\App\\User|null|array   The user.\n",
        "     */\n",
        "    public function find() {}\n",
        "}\n",
    ));
    let reflector = reflect(&index, "Repo", "find");
    assert_eq!(reflector.return_types().join("|"), "\\App\\User|null|array");
}

// ─── Caching ────────────────────────────────────────────────────────────────

#[test]
fn results_are_computed_once() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "id");

    let doc_first = reflector.doc_comment().unwrap();
    let doc_second = reflector.doc_comment().unwrap();
    assert!(std::ptr::eq(doc_first, doc_second));

    let types_first = reflector.return_types();
    let types_second = reflector.return_types();
    assert!(std::ptr::eq(types_first, types_second));
    assert_eq!(types_first, ["int", "string"]);
}

#[test]
fn empty_results_are_cached_too() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "noComment");

    let first = reflector.return_types();
    let second = reflector.return_types();
    assert!(first.is_empty());
    assert!(std::ptr::eq(first, second));
}

#[test]
fn reflector_can_be_shared_between_threads() {
    let index = index_from(SCALARS);
    let reflector = reflect(&index, "Scalars", "id");

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| reflector.return_types().to_vec()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), ["int", "string"]);
        }
    });
}
