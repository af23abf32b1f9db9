use seqrex::{PatternBuilder, Span};

#[test]
fn fifteen_then_one_or_more_forty_two() {
    let pattern = PatternBuilder::<i32>::new()
        .token_eq(15)
        .token_eq(42)
        .one_or_more()
        .unwrap()
        .build();
    let seq = [2, 15, 42, 42, 15];

    let mut m = pattern.matcher(&seq);
    assert!(m.find());
    assert_eq!(m.start(), Some(1));
    assert_eq!(m.size(), Some(3));
    assert!(!m.find());
}

#[test]
fn anchored_beginning_matches_only_at_position_zero() {
    let pattern = PatternBuilder::<i32>::new()
        .beginning()
        .token_eq(2)
        .token_eq(15)
        .token_eq(42)
        .build();
    let seq = [2, 15, 42, 42, 15];

    let mut m = pattern.matcher(&seq);
    assert!(m.find());
    assert_eq!(m.start(), Some(0));
    assert_eq!(m.size(), Some(3));

    let unanchored_mismatch = PatternBuilder::<i32>::new()
        .beginning()
        .token_eq(42)
        .token_eq(42)
        .token_eq(15)
        .ending()
        .unwrap()
        .build();
    let mut m2 = unanchored_mismatch.matcher(&seq);
    assert!(!m2.find());
}

#[test]
fn predicate_iteration_yields_three_matches_in_order() {
    let pattern = PatternBuilder::<i32>::new()
        .token(|n: &i32| n % 10 == 2)
        .build();
    let seq = [2, 15, 42, 42, 15];

    let values: Vec<i32> = pattern
        .matcher(&seq)
        .find_iter()
        .map(|m| seq[m.start()])
        .collect();
    assert_eq!(values, vec![2, 42, 42]);
}

#[test]
fn quantified_group_replace_multiplies_matched_pair() {
    let pattern = PatternBuilder::<i32>::new()
        .token(|n: &i32| n % 10 == 5)
        .count_exact(2)
        .unwrap()
        .build();
    let seq = [5, 5, 10, 17, 25, 7, 1, 25, 25, 2];

    let replaced = pattern.matcher(&seq).replace_with_fn(|m| {
        let whole = m.captures(&seq).group_slice(0).unwrap();
        whole[0] * whole[1]
    });
    assert_eq!(replaced, vec![25, 10, 17, 25, 7, 1, 625, 2]);
}

#[test]
fn split_law_reconstructs_around_quantified_alternation() {
    let pattern = PatternBuilder::<i32>::new()
        .token(|n: &i32| *n == 8 || *n == 5)
        .one_or_more()
        .unwrap()
        .build();
    let seq = [4, 3, 8, 5, 6, 3, 8, 5, 6, 3, 8, 8, 7];

    let pieces: Vec<&[i32]> = pattern.matcher(&seq).split().collect();
    assert_eq!(
        pieces,
        vec![&seq[0..2], &seq[4..6], &seq[8..10], &seq[12..13]]
    );
}

#[test]
fn string_mapped_single_group_quantified() {
    let pattern = PatternBuilder::<char>::new()
        .token_eq('a')
        .group(|g| g.token_eq('b').token_eq('c'))
        .one_or_more()
        .unwrap()
        .token_eq('d')
        .build();
    let seq: Vec<char> = "abcd".chars().collect();

    let mut m = pattern.matcher(&seq);
    assert!(m.find());
    let groups = m.groups().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0], Span::new(0, 4));
    assert_eq!(groups[1], Span::new(1, 3));
}

#[test]
fn string_mapped_nested_group_keeps_only_last_inner_iteration() {
    let pattern = PatternBuilder::<char>::new()
        .group(|g| g.group(|gg| gg.token_eq('a').token_eq('b').token_eq('c')).one_or_more().unwrap())
        .token_eq('d')
        .build();
    let seq: Vec<char> = "abcabcde".chars().collect();

    let mut m = pattern.matcher(&seq);
    assert!(m.find());
    let groups = m.groups().unwrap();
    assert_eq!(
        groups,
        &[Span::new(0, 7), Span::new(0, 6), Span::new(3, 6)]
    );
}
