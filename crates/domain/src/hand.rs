//! Hand evaluation for a set of five dice.
//!
//! Two coexisting encodings are produced for a hand:
//!
//! - [`classify`] - the compact code shouted into the room chat ("LS", "25fh",
//!   "4q", "nothing"). This is the wire-visible format other players read.
//! - [`evaluate_hand`] - a verbose English description ("Full House: 2 over 5"),
//!   used for logs and debugging output.
//!
//! [`sum_hand`] supports the reduced three-dice mode, where only the total
//! matters.

use std::collections::HashMap;

/// Where the category letter goes relative to the digit string in a compact
/// code. Both conventions exist in the wild ("fh25" and "25fh"); callers pick
/// one and stick with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterPlacement {
    /// Letter before the digits: "fh25".
    Prefixed,
    /// Letter after the digits: "25fh".
    Suffixed,
}

/// Classify five face values into the compact hand code.
///
/// The values are rendered as digit characters, sorted, and bucketed by
/// frequency. Straights short-circuit to "LS"/"HS"; a hand with no repeated
/// digit is "nothing". Otherwise the code is the repeated digits (descending)
/// plus a category letter: `F` five of a kind, `q` four, `t` three, `fh` full
/// house, `s` pair or two pair.
pub fn classify(values: &[i32; 5], placement: LetterPlacement) -> String {
    let mut chars: Vec<char> = values.iter().flat_map(|v| v.to_string().into_bytes()).map(char::from).collect();
    chars.sort_unstable();
    let sorted: String = chars.iter().collect();

    if sorted == "12345" {
        return "LS".to_string();
    }
    if sorted == "23456" {
        return "HS".to_string();
    }

    let mut counts: HashMap<i32, i32> = HashMap::new();
    for c in &chars {
        *counts.entry(*c as i32 - '0' as i32).or_insert(0) += 1;
    }

    let mut keys: Vec<i32> = Vec::new();
    let mut groups: Vec<i32> = Vec::new();
    for (digit, count) in &counts {
        if *count > 1 {
            keys.push(*digit);
            groups.push(*count);
        }
    }

    if keys.is_empty() {
        return "nothing".to_string();
    }

    // Sorted independently: with two groups a digit is no longer paired with
    // its own count. The published codes rely on this exact behavior.
    keys.sort_unstable_by(|a, b| b.cmp(a));
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let n: String = keys.iter().map(|k| k.to_string()).collect();
    let c: String = groups.iter().map(|g| g.to_string()).collect();

    let letter = match c.as_str() {
        "5" => "F",
        "4" => "q",
        "3" => "t",
        "32" => "fh",
        "22" | "2" => "s",
        _ => "",
    };

    match placement {
        LetterPlacement::Prefixed => format!("{}{}", letter, n),
        LetterPlacement::Suffixed => format!("{}{}", n, letter),
    }
}

/// Describe a hand as a human-readable phrase.
///
/// Categories are checked in strict priority order and the first match wins:
/// full house, five of a kind, four of a kind, straight, three of a kind, two
/// pair, one pair, no pair. Anything other than exactly five values is
/// rejected.
pub fn evaluate_hand(values: &[i32]) -> String {
    if values.len() != 5 {
        return "Invalid input".to_string();
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mut counts: HashMap<i32, i32> = HashMap::new();
    for v in &sorted {
        *counts.entry(*v).or_insert(0) += 1;
    }

    let triple = counts.iter().find(|(_, c)| **c == 3).map(|(v, _)| *v);
    let pair_of_triple = counts.iter().find(|(_, c)| **c == 2).map(|(v, _)| *v);
    if let (Some(t), Some(p)) = (triple, pair_of_triple) {
        return format!("Full House: {} over {}", t, p);
    }

    if let Some((v, _)) = counts.iter().find(|(_, c)| **c == 5) {
        return format!("5 of a Kind: {}", v);
    }

    if let Some((v, _)) = counts.iter().find(|(_, c)| **c == 4) {
        return format!("4 of a Kind: {}", v);
    }

    let consecutive = sorted.windows(2).all(|w| w[1] == w[0] + 1);
    if consecutive || sorted == [1, 2, 3, 4, 5] || sorted == [2, 3, 4, 5, 6] {
        return format!(
            "Straight: {}, {}, {}, {}, {}",
            sorted[0], sorted[1], sorted[2], sorted[3], sorted[4]
        );
    }

    if let Some(t) = triple {
        return format!("3 of a Kind: {}", t);
    }

    // Pairs in ascending value order so the output is deterministic.
    let mut pairs: Vec<i32> = counts
        .iter()
        .filter(|(_, c)| **c == 2)
        .map(|(v, _)| *v)
        .collect();
    pairs.sort_unstable();

    match pairs.as_slice() {
        [a, b] => format!("2 Pair: {} and {}", a, b),
        [a] => format!("1 Pair: {}", a),
        _ => "No Pair".to_string(),
    }
}

/// Sum an arbitrary set of face values, rendered as decimal text.
pub fn sum_hand(values: &[i32]) -> String {
    let sum: i32 = values.iter().sum();
    sum.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_low_straight() {
        assert_eq!(classify(&[3, 1, 5, 2, 4], LetterPlacement::Suffixed), "LS");
    }

    #[test]
    fn test_classify_high_straight() {
        assert_eq!(classify(&[6, 4, 2, 5, 3], LetterPlacement::Suffixed), "HS");
    }

    #[test]
    fn test_classify_no_group_is_nothing() {
        // 1,2,3,4,6 has no repeated digit and is not a straight
        assert_eq!(
            classify(&[1, 2, 3, 4, 6], LetterPlacement::Suffixed),
            "nothing"
        );
    }

    #[test]
    fn test_classify_full_house_suffixed() {
        assert_eq!(
            classify(&[2, 2, 2, 5, 5], LetterPlacement::Suffixed),
            "25fh"
        );
    }

    #[test]
    fn test_classify_full_house_prefixed() {
        assert_eq!(
            classify(&[2, 2, 2, 5, 5], LetterPlacement::Prefixed),
            "fh25"
        );
    }

    #[test]
    fn test_classify_five_of_a_kind() {
        assert_eq!(classify(&[3, 3, 3, 3, 3], LetterPlacement::Suffixed), "3F");
        assert_eq!(classify(&[3, 3, 3, 3, 3], LetterPlacement::Prefixed), "F3");
    }

    #[test]
    fn test_classify_four_of_a_kind() {
        assert_eq!(classify(&[4, 4, 4, 4, 2], LetterPlacement::Suffixed), "4q");
    }

    #[test]
    fn test_classify_three_of_a_kind() {
        assert_eq!(classify(&[6, 6, 6, 1, 2], LetterPlacement::Suffixed), "6t");
    }

    #[test]
    fn test_classify_one_pair() {
        assert_eq!(classify(&[5, 5, 1, 2, 4], LetterPlacement::Suffixed), "5s");
    }

    #[test]
    fn test_classify_two_pair_digits_descend() {
        // Two groups: digits 3 and 2, both pairs. Digit string is descending.
        assert_eq!(
            classify(&[2, 2, 3, 3, 6], LetterPlacement::Suffixed),
            "32s"
        );
    }

    #[test]
    fn test_evaluate_full_house() {
        assert_eq!(evaluate_hand(&[2, 2, 2, 5, 5]), "Full House: 2 over 5");
    }

    #[test]
    fn test_evaluate_five_of_a_kind() {
        assert_eq!(evaluate_hand(&[3, 3, 3, 3, 3]), "5 of a Kind: 3");
    }

    #[test]
    fn test_evaluate_four_of_a_kind() {
        assert_eq!(evaluate_hand(&[4, 2, 4, 4, 4]), "4 of a Kind: 4");
    }

    #[test]
    fn test_evaluate_low_straight() {
        assert_eq!(evaluate_hand(&[5, 4, 3, 2, 1]), "Straight: 1, 2, 3, 4, 5");
    }

    #[test]
    fn test_evaluate_high_straight() {
        assert_eq!(evaluate_hand(&[2, 3, 4, 5, 6]), "Straight: 2, 3, 4, 5, 6");
    }

    #[test]
    fn test_evaluate_three_of_a_kind() {
        assert_eq!(evaluate_hand(&[6, 6, 6, 1, 3]), "3 of a Kind: 6");
    }

    #[test]
    fn test_evaluate_two_pair_ascending() {
        assert_eq!(evaluate_hand(&[3, 2, 3, 2, 6]), "2 Pair: 2 and 3");
    }

    #[test]
    fn test_evaluate_one_pair() {
        assert_eq!(evaluate_hand(&[5, 5, 1, 2, 4]), "1 Pair: 5");
    }

    #[test]
    fn test_evaluate_no_pair() {
        assert_eq!(evaluate_hand(&[1, 2, 3, 4, 6]), "No Pair");
    }

    #[test]
    fn test_evaluate_wrong_count_is_invalid() {
        assert_eq!(evaluate_hand(&[1, 2, 3, 4]), "Invalid input");
        assert_eq!(evaluate_hand(&[]), "Invalid input");
    }

    #[test]
    fn test_sum_hand() {
        assert_eq!(sum_hand(&[1, 2, 3]), "6");
        assert_eq!(sum_hand(&[]), "0");
        assert_eq!(sum_hand(&[6, 6, 6]), "18");
    }
}
