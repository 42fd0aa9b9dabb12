//! Unit tests for function wrappers: construction, invocation and combinators.

use fnwrap::prelude::*;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// =============================================================================
// Construction and Invocation
// =============================================================================

#[rstest]
fn unary_apply_and_call_agree() {
    let negate = Function::unary(|value: i32| -value);
    assert_eq!(negate.apply(5), -5);
    assert_eq!(negate.call((5,)), -5);
}

#[rstest]
#[case(0, 0, 0)]
#[case(3, 4, 12)]
#[case(-2, 7, -14)]
#[case(i32::MAX, 1, i32::MAX)]
fn binary_apply_returns_callable_result(#[case] left: i32, #[case] right: i32, #[case] expected: i32) {
    let multiply = Function::binary(|left: i32, right: i32| left * right);
    assert_eq!(multiply.apply(left, right), expected);
}

#[rstest]
fn ternary_apply_mixes_argument_types() {
    let render = Function::ternary(|label: String, count: u8, ratio: f32| {
        format!("{label}:{count}:{ratio:.1}")
    });
    assert_eq!(render.apply("items".to_string(), 3, 0.5), "items:3:0.5");
}

#[rstest]
fn from_tupled_takes_the_whole_tuple() {
    let swap = Function::from_tupled(|(left, right): (char, u8)| (right, left));
    assert_eq!(swap.apply('a', 1), (1, 'a'));
    assert_eq!(swap.arity(), 2);
}

#[rstest]
fn constant_ignores_arguments() {
    let always: Function<(String, i64, bool), &str> = Function::constant("fixed");
    assert_eq!(always.apply("anything".to_string(), -1, true), "fixed");
    assert_eq!(always.apply(String::new(), 0, false), "fixed");
}

#[rstest]
fn callable_side_effects_run_on_every_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let count = Function::unary(move |value: u32| {
        counter.fetch_add(1, Ordering::SeqCst);
        value
    });

    count.apply(1);
    count.apply(1);
    count.apply(1);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[rstest]
fn panics_propagate_from_the_callable() {
    let fails = Function::unary(|value: i32| -> i32 { panic!("cannot handle {value}") });
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| fails.apply(9)));
    assert!(outcome.is_err());
}

// =============================================================================
// Composition
// =============================================================================

#[rstest]
fn compose_transforms_each_argument_first() {
    let subtract = Function::binary(|left: i64, right: i64| left - right);
    let from_text = subtract.compose(
        |text: &str| text.parse::<i64>().unwrap_or_default(),
        |text: String| i64::try_from(text.len()).unwrap_or_default(),
    );

    assert_eq!(from_text.apply("10", "abc".to_string()), 7);
    assert_eq!(from_text.arity(), 2);
}

#[rstest]
fn compose_on_ternary_changes_every_domain() {
    let sum = Function::ternary(|a: u32, b: u32, c: u32| a + b + c);
    let composed = sum.compose(
        |flag: bool| u32::from(flag),
        |character: char| u32::from(character) - u32::from('0'),
        |text: &str| u32::try_from(text.len()).unwrap_or_default(),
    );

    assert_eq!(composed.apply(true, '7', "four"), 12);
}

#[rstest]
fn compose_on_unary() {
    let double = Function::unary(|value: i32| value * 2);
    let from_length = double.compose(|text: &str| i32::try_from(text.len()).unwrap_or_default());
    assert_eq!(from_length.apply("hello"), 10);
}

#[rstest]
fn and_then_changes_only_the_result() {
    let add = Function::binary(|left: u8, right: u8| u16::from(left) + u16::from(right));
    let is_large = add.and_then(|sum| sum > 255);

    assert!(is_large.apply(200, 100));
    assert!(!is_large.apply(1, 2));
    assert_eq!(is_large.arity(), 2);
}

#[rstest]
fn consume_passes_results_to_the_sink() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    let concat = Function::binary(|left: &str, right: &str| format!("{left}{right}"));
    let record: Consumer<(&str, &str)> =
        concat.consume(move |joined| sink.lock().unwrap().push(joined));

    record.apply("ab", "cd");
    record.apply("e", "f");
    assert_eq!(*received.lock().unwrap(), vec!["abcd".to_string(), "ef".to_string()]);
}

#[rstest]
fn combinators_leave_the_original_unchanged() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let original = Function::binary(move |left: i32, right: i32| {
        counter.fetch_add(1, Ordering::SeqCst);
        left + right
    });

    let _composed = original.compose(|value: i32| value * 10, |value: i32| value * 100);
    let _then = original.and_then(|sum| sum * 2);
    let _memoized = original.memoized();
    let _boxed = original.boxed();
    let _tupled = original.tupled();

    assert_eq!(original.apply(1, 2), 3);
    assert_eq!(original.apply(1, 2), 3);
    assert!(!original.is_memoized());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Tupling, Boxing and Projections
// =============================================================================

#[rstest]
fn tupled_destructures_the_aggregate() {
    let divide = Function::binary(|numerator: i32, denominator: i32| numerator / denominator);
    let tupled = divide.tupled();

    assert_eq!(tupled.arity(), 1);
    assert_eq!(tupled.apply((9, 3)), 3);
}

#[rstest]
fn tupled_leading_keeps_the_trailing_argument() {
    let clamp = Function::ternary(|low: i32, high: i32, value: i32| value.clamp(low, high));
    let within = clamp.tupled_leading();

    assert_eq!(within.arity(), 2);
    assert_eq!(within.apply((0, 10), 15), 10);
    assert_eq!(within.apply((0, 10), -3), 0);
}

#[rstest]
fn boxed_widens_primitives_and_keeps_objects() {
    let scale = Function::binary(|label: String, factor: f64| format!("{label}x{factor}"));
    let boxed: Function<(String, Boxed<f64>), String> = scale.boxed();

    assert_eq!(boxed.apply("size".to_string(), Boxed::new(1.5)), "sizex1.5");
}

#[rstest]
fn projections_use_a_single_position() {
    let length = Function::unary(|text: &'static str| text.len());

    assert_eq!(length.as_first_of_two::<u8>().apply("abc", 9), 3);
    assert_eq!(length.as_second_of_two::<u8>().apply(9, "abcd"), 4);
    assert_eq!(length.as_first_of_three::<u8, bool>().apply("a", 1, true), 1);
    assert_eq!(length.as_second_of_three::<u8, bool>().apply(1, "ab", true), 2);
    assert_eq!(length.as_third_of_three::<u8, bool>().apply(1, false, "abcde"), 5);
}

#[rstest]
fn into_fn_works_with_iterator_adapters() {
    let square = Function::unary(|value: u32| value * value);
    let squares: Vec<u32> = (1..=4).map(square.into_fn()).collect();
    assert_eq!(squares, vec![1, 4, 9, 16]);
}

// =============================================================================
// Invalid Arguments
// =============================================================================

#[rstest]
fn try_constructors_accept_present_callables() {
    let function = Function::try_ternary(Some(|a: u8, b: u8, c: u8| a.max(b).max(c)));
    assert_eq!(function.map(|max| max.apply(3, 9, 4)), Ok(9));
}

#[rstest]
fn try_constructors_reject_absent_callables() {
    let absent: Option<fn(u8) -> u8> = None;
    let error = Function::try_unary(absent).unwrap_err();
    assert_eq!(error.operation, "Function::try_unary");
    assert_eq!(error.parameter, "function");

    let absent_tupled: Option<fn((u8, u8)) -> u8> = None;
    let error = Function::try_from_tupled(absent_tupled).unwrap_err();
    assert_eq!(error.operation, "Function::try_from_tupled");
}

#[rstest]
fn try_compose_reports_the_first_absent_position() {
    let add = Function::ternary(|a: i32, b: i32, c: i32| a + b + c);
    let present = Some(|value: i32| value);
    let absent: Option<fn(i32) -> i32> = None;

    let error = add.try_compose(present, absent, absent).unwrap_err();
    assert_eq!(
        error,
        InvalidArgumentError {
            operation: "Function::try_compose",
            parameter: "before_second",
        }
    );

    let composed = add.try_compose(present, present, present).unwrap();
    assert_eq!(composed.apply(1, 2, 3), 6);
}

#[rstest]
fn try_and_then_and_try_consume_reject_absent_functions() {
    let identity = Function::unary(|value: i32| value);

    let absent_after: Option<fn(i32) -> i32> = None;
    let error = identity.try_and_then(absent_after).unwrap_err();
    assert_eq!(error.parameter, "after");

    let absent_sink: Option<fn(i32)> = None;
    let error = identity.try_consume(absent_sink).unwrap_err();
    assert_eq!(error.operation, "Function::try_consume");
    assert_eq!(error.parameter, "sink");

    let doubled = identity.try_and_then(Some(|value: i32| value * 2)).unwrap();
    assert_eq!(doubled.apply(21), 42);
}
