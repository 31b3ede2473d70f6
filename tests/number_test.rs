//! Engine-level tests for snailfish numbers through the public API

use rstest::rstest;

use snailfish::domain::{
    sum, DomainError, Literal, ReductionLimits, Side, Slot, SnailfishNumber,
};
use snailfish::util::testing;

fn number(input: &str) -> SnailfishNumber {
    testing::init_test_setup();
    input.parse().unwrap()
}

// ============================================================
// Construction
// ============================================================

#[rstest]
#[case("[1,2]")]
#[case("[[1,2],3]")]
#[case("[[[[1,3],[5,3]],[[1,3],[8,7]]],[[[4,9],[6,9]],[[8,2],[7,3]]]]")]
#[case("[[[[0,9],2],3],4]")]
fn given_well_formed_literal_when_make_then_unmake_returns_it(#[case] input: &str) {
    let literal: Literal = input.parse().unwrap();
    let number = SnailfishNumber::make(&literal).unwrap();
    assert_eq!(number.unmake(), literal);
}

#[test]
fn given_structured_literal_when_make_then_tree_mirrors_it() {
    let literal = Literal::pair(Literal::pair(1u64, 2u64), 3u64);
    let number = SnailfishNumber::make(&literal).unwrap();
    let root = number.root();
    assert_eq!(number.slot(root, Side::Right).unwrap(), Slot::Regular(3));
    let inner = number.slot(root, Side::Left).unwrap().pair().unwrap();
    assert_eq!(number.node(inner).unwrap().parent, Some(root));
}

#[rstest]
#[case("[1,[2,3,4]]")]
#[case("[[1,2]]")]
#[case("42")]
fn given_bad_arity_when_make_then_malformed_literal(#[case] input: &str) {
    let literal: Literal = input.parse().unwrap();
    let err = SnailfishNumber::make(&literal).unwrap_err();
    assert!(
        matches!(err, DomainError::MalformedLiteral { .. }),
        "unexpected error: {:?}",
        err
    );
}

// ============================================================
// Explode / split
// ============================================================

#[rstest]
#[case("[[[[[9,8],1],2],3],4]", "[[[[0,9],2],3],4]")]
#[case("[7,[6,[5,[4,[3,2]]]]]", "[7,[6,[5,[7,0]]]]")]
#[case("[[6,[5,[4,[3,2]]]],1]", "[[6,[5,[7,0]]],3]")]
#[case("[[3,[2,[1,[7,3]]]],[6,[5,[4,[3,2]]]]]", "[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]")]
fn given_exploding_pair_when_exploded_then_matches_fixture(
    #[case] input: &str,
    #[case] expected: &str,
) {
    let mut n = number(input);
    let pair = n.leftmost_exploding_pair().expect("exploding pair");
    n.explode(pair).unwrap();
    assert_eq!(n.to_string(), expected);
}

#[test]
fn given_large_regular_when_split_then_halves_round_down_then_up() {
    let mut n = number("[11,1]");
    let (pair, side) = n.leftmost_splitting_number().expect("splitting number");
    n.split(pair, side).unwrap();
    assert_eq!(n.to_string(), "[[5,6],1]");
}

// ============================================================
// Addition / reduction / magnitude
// ============================================================

#[test]
fn given_two_numbers_when_added_then_result_is_reduced() {
    let sum = number("[[[[4,3],4],4],[7,[[8,4],9]]]")
        .add(number("[1,1]"), &ReductionLimits::default())
        .unwrap();
    assert_eq!(sum.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
}

#[test]
fn given_sum_when_added_then_operands_are_exclusive_subtrees() {
    let sum = number("[1,2]")
        .add(number("[3,4]"), &ReductionLimits::default())
        .unwrap();
    assert_eq!(sum.pair_count(), 3);
    for (idx, node, _) in sum.iter() {
        for side in Side::BOTH {
            if let Slot::Pair(child) = node.slot(side) {
                assert_eq!(sum.side_of(child), Some((idx, side)));
            }
        }
    }
}

#[test]
fn given_pair_when_magnitude_then_weights_left_three_right_two() {
    assert_eq!(number("[[1,2],[[3,4],5]]").magnitude().unwrap(), 143);
}

#[test]
fn given_stable_number_when_reduced_again_then_nothing_changes() {
    let mut n = number("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
    let before = n.clone();
    let report = n.reduce(&ReductionLimits::default()).unwrap();
    assert_eq!(report.rewrites(), 0);
    assert_eq!(n, before);
}

#[test]
fn given_addition_is_not_commutative_when_summing_both_orders_then_magnitudes_differ() {
    let limits = ReductionLimits::default();
    let ab = number("[[[[4,3],4],4],[7,[[8,4],9]]]")
        .add(number("[1,1]"), &limits)
        .unwrap();
    let ba = number("[1,1]")
        .add(number("[[[[4,3],4],4],[7,[[8,4],9]]]"), &limits)
        .unwrap();
    assert_eq!(ab.magnitude().unwrap(), 1384);
    assert_eq!(ba.magnitude().unwrap(), 927);
}

#[test]
fn given_list_when_summed_then_folds_left() {
    let numbers = ["[1,1]", "[2,2]", "[3,3]", "[4,4]", "[5,5]"]
        .iter()
        .map(|s| number(s))
        .collect::<Vec<_>>();
    let (total, _) = sum(numbers, &ReductionLimits::default()).unwrap().unwrap();
    assert_eq!(total.to_string(), "[[[[3,0],[5,3]],[4,4]],[5,5]]");
}

#[test]
fn given_tiny_step_cap_when_reducing_then_reports_limit() {
    let result = number("[[[[4,3],4],4],[7,[[8,4],9]]]")
        .add(number("[1,1]"), &ReductionLimits { max_steps: 1 });
    assert!(matches!(
        result,
        Err(DomainError::ReductionLimitExceeded { steps: 2 })
    ));
}

// ============================================================
// Limits of the integer and nesting range
// ============================================================

#[test]
fn given_huge_regulars_when_magnitude_then_overflow_error() {
    let result = number("[6148914691236517206,0]").magnitude();
    assert!(matches!(result, Err(DomainError::Overflow(_))));
}

#[test]
fn given_explosion_past_u64_when_adding_then_overflow_error() {
    let result = number("[[[[1,18446744073709551615],18446744073709551615],2],3]")
        .add(number("[4,5]"), &ReductionLimits::default());
    assert!(matches!(result, Err(DomainError::Overflow(_))));
}

#[test]
fn given_runaway_nesting_when_parsing_then_malformed_instead_of_crash() {
    testing::init_test_setup();
    let input = format!("{}1,2{}", "[".repeat(200_000), ",3]".repeat(200_000));
    let result = input.parse::<SnailfishNumber>();
    assert!(matches!(result, Err(DomainError::MalformedLiteral { .. })));
}

#[test]
fn given_nesting_at_limit_when_parsing_then_builds_tree() {
    let depth = snailfish::domain::MAX_NESTING;
    let input = format!("{}1,2]{}", "[".repeat(depth), ",3]".repeat(depth - 1));
    assert_eq!(number(&input).depth(), depth);
}
