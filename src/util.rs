//! Small utility helpers used across modules.

use rand::Rng;

/// In-place unbiased shuffle: for i from the last index down to 1,
/// swap element i with a uniformly chosen element at index <= i.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
  for i in (1..items.len()).rev() {
    let j = rng.gen_range(0..=i);
    items.swap(i, j);
  }
}

/// Minimum score to pass: `ceil(pool * percent / 100)`, in integers so that
/// 30 questions at 70% is exactly 21.
pub fn pass_threshold(pool: usize, percent: u32) -> usize {
  (pool * percent as usize).div_ceil(100)
}

/// Log-safe truncation for large strings (question texts can be long).
pub fn trunc_for_log(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn thresholds() {
    assert_eq!(pass_threshold(30, 70), 21);
    assert_eq!(pass_threshold(10, 70), 7);
    assert_eq!(pass_threshold(3, 70), 3);
    assert_eq!(pass_threshold(1, 70), 1);
    assert_eq!(pass_threshold(0, 70), 0);
    assert_eq!(pass_threshold(40, 70), 28);
  }

  #[test]
  fn shuffle_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut v: Vec<u32> = (0..50).collect();
    fisher_yates(&mut v, &mut rng);
    assert_ne!(v, (0..50).collect::<Vec<_>>());
    v.sort_unstable();
    assert_eq!(v, (0..50).collect::<Vec<_>>());
  }

  #[test]
  fn shuffle_handles_tiny_slices() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut empty: [u8; 0] = [];
    fisher_yates(&mut empty, &mut rng);
    let mut one = [9];
    fisher_yates(&mut one, &mut rng);
    assert_eq!(one, [9]);
  }

  #[test]
  fn trunc_respects_char_boundaries() {
    assert_eq!(trunc_for_log("abc", 5), "abc");
    assert!(trunc_for_log("éééé", 2).starts_with("éé…"));
  }
}
