//! Natural ("human") ordering of paths and identifiers.
//!
//! Strings are split into alternating text and digit runs. Digit runs
//! compare as integers, text runs compare case-insensitively, so `r2` sorts
//! before `r10`.

use std::cmp::Ordering;

/// Compare two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            // Runs alternate from a leading text run, so kinds line up
            // position by position. Kept total anyway.
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

/// Sort in place, natural order, stable.
pub fn natural_sort<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

#[derive(Debug)]
enum Chunk<'a> {
    Text(String),
    Digits(&'a str),
}

/// Split into `[text, digits, text, digits, ..., text]`, always starting and
/// ending with a (possibly empty) text run.
fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = false;
    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        if is_digit != in_digits {
            out.push(chunk(&s[start..idx], in_digits));
            start = idx;
            in_digits = is_digit;
        }
    }
    out.push(chunk(&s[start..], in_digits));
    if in_digits {
        out.push(Chunk::Text(String::new()));
    }
    out
}

fn chunk(run: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(run)
    } else {
        Chunk::Text(run.to_lowercase())
    }
}

/// Integer comparison of two ASCII digit runs of any length.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(items: &[&str]) -> Vec<String> {
        let mut out: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        natural_sort(&mut out);
        out
    }

    #[test]
    fn numeric_runs_compare_as_integers() {
        assert_eq!(sorted(&["r10", "r2", "r1"]), vec!["r1", "r2", "r10"]);
    }

    #[test]
    fn member_labels_sort_by_each_index() {
        assert_eq!(
            sorted(&["r1i1p10f1", "r1i1p2f1", "r10i1p1f1", "r2i1p1f1"]),
            vec!["r1i1p2f1", "r1i1p10f1", "r2i1p1f1", "r10i1p1f1"]
        );
    }

    #[test]
    fn text_runs_ignore_case() {
        assert_eq!(sorted(&["b", "A", "a2", "a10"]), vec!["A", "a2", "a10", "b"]);
    }

    #[test]
    fn leading_zeros_tie_and_keep_input_order() {
        assert_eq!(sorted(&["v01", "v1", "v001"]), vec!["v01", "v1", "v001"]);
    }

    #[test]
    fn long_digit_runs_do_not_overflow() {
        assert_eq!(
            sorted(&["x123456789012345678901234567890", "x99"]),
            vec!["x99", "x123456789012345678901234567890"]
        );
    }

    #[test]
    fn leading_digits_sort_before_text() {
        assert_eq!(sorted(&["abc", "10", "9"]), vec!["9", "10", "abc"]);
    }
}
