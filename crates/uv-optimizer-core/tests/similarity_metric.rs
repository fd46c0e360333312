use uv_optimizer_core::similarity::match_fraction;

#[test]
fn empty_buffers_are_fully_similar() {
    assert_eq!(match_fraction(&[], &[]), 1.0);
}

#[test]
fn identical_buffers_match_completely() {
    let a = vec![10u8, 20, 30, 255, 1, 2, 3, 0];
    assert_eq!(match_fraction(&a, &a), 1.0);
}

#[test]
fn channel_difference_of_one_still_matches() {
    let a = [100u8, 100, 100, 255];
    let b = [101u8, 99, 100, 254];
    assert_eq!(match_fraction(&a, &b), 1.0);
}

#[test]
fn channel_difference_of_two_does_not_match() {
    let a = [100u8, 100, 100, 255];
    let b = [102u8, 100, 100, 255];
    assert_eq!(match_fraction(&a, &b), 0.0);
}

#[test]
fn alpha_is_compared_like_any_channel() {
    // both fully transparent, RGB differs beyond tolerance: not a match
    let a = [200u8, 0, 0, 0];
    let b = [0u8, 0, 0, 0];
    assert_eq!(match_fraction(&a, &b), 0.0);
}

#[test]
fn fraction_counts_matching_positions() {
    let a = [0u8, 0, 0, 255, 50, 50, 50, 255, 90, 90, 90, 255, 7, 7, 7, 255];
    let mut b = a;
    b[4] = 200; // break the second pixel
    assert_eq!(match_fraction(&a, &b), 0.75);
}

#[test]
fn symmetric_in_arguments() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let a: Vec<u8> = (0..256).map(|_| rng.gen_range(0..=255u8)).collect();
    let b: Vec<u8> = (0..256).map(|_| rng.gen_range(0..=255u8)).collect();
    assert_eq!(match_fraction(&a, &b), match_fraction(&b, &a));
}
