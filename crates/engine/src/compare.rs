//! Cell comparison for column sorting.
//!
//! Two trimmed values compare numerically when both have a numeric reading,
//! otherwise as text. The choice is made per pair, so a column mixing numbers
//! and words does not yield a total order. `stable_sort_by` tolerates that.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Leading-prefix float parse.
///
/// Accepts the longest prefix of `s` that reads as a decimal number:
/// optional sign, digits with an optional fraction, an optional exponent that
/// is only taken when digits follow it, or `Infinity`. Leading whitespace is
/// skipped. `"85%"` reads as 85, `"10a"` as 10, `"apple"` as nothing.
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if bytes.first() == Some(&b'-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Canonically decomposed, lowercased characters of `s`. With `strip_marks`
/// the combining marks are dropped, so `É` reads as `e`.
fn collation_key(s: &str, strip_marks: bool) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(move |c| !(strip_marks && is_combining_mark(*c)))
        .flat_map(char::to_lowercase)
}

/// Case-sensitive, locale-style string ordering.
///
/// Letters compare on their base form first, ignoring case and accents, so
/// `Émile` sorts among the `E`s. Among strings equal at that level the
/// unaccented one comes first, then lowercase before uppercase; code point
/// order breaks what remains.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a, true)
        .cmp(collation_key(b, true))
        .then_with(|| collation_key(a, false).cmp(collation_key(b, false)))
        .then_with(|| a.nfd().map(char::is_uppercase).cmp(b.nfd().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

/// Compare two trimmed display values for an ascending sort.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    match (parse_float(a), parse_float(b)) {
        (Some(x), Some(y)) => OrderedFloat(x).cmp(&OrderedFloat(y)),
        _ => locale_compare(a, b),
    }
}

/// Stable top-down merge sort over `items`.
///
/// Unlike `slice::sort_by`, never panics when `compare` is not a total order.
/// On ties the element from the left half is taken first.
pub fn stable_sort_by<T, F>(items: &mut Vec<T>, compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }

    let mid = items.len() / 2;
    let mut right = items.split_off(mid);
    stable_sort_by(items, compare);
    stable_sort_by(&mut right, compare);

    let left = std::mem::take(items);
    items.reserve(left.len() + right.len());

    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if compare(&right[j], &left[i]) == Ordering::Less {
            items.push(right[j]);
            j += 1;
        } else {
            items.push(left[i]);
            i += 1;
        }
    }
    items.extend_from_slice(&left[i..]);
    items.extend_from_slice(&right[j..]);
}
