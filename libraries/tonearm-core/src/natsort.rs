//! Natural-sort comparator.
//!
//! Directory listings, release lists, and tag keys are ordered with this
//! comparator so that repeated scans of the same tree produce identical
//! snapshots: digit runs compare numerically ("disc 2" before "disc 10"),
//! everything else compares case-insensitively.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings in natural order.
///
/// Case-insensitive; consecutive ASCII digits are compared as whole numbers
/// of arbitrary length. Strings that differ only in case or in digit padding
/// fall back to plain byte order so the comparator stays a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let an = take_digits(&mut ai);
                    let bn = take_digits(&mut bi);
                    let ord = cmp_digit_runs(&an, &bn);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let al = ac.to_lowercase().next().unwrap_or(ac);
                    let bl = bc.to_lowercase().next().unwrap_or(bc);
                    if al != bl {
                        return al.cmp(&bl);
                    }
                    ai.next();
                    bi.next();
                }
            }
        }
    }

    // Equal under case folding and digit normalization; tie-break on bytes.
    a.cmp(b)
}

fn take_digits(iter: &mut Peekable<Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(c) = iter.peek() {
        if c.is_ascii_digit() {
            out.push(*c);
            iter.next();
        } else {
            break;
        }
    }
    out
}

/// Compare two digit runs numerically without overflowing on long runs.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a_stripped = a.trim_start_matches('0');
    let b_stripped = b.trim_start_matches('0');
    a_stripped
        .len()
        .cmp(&b_stripped.len())
        .then_with(|| a_stripped.cmp(b_stripped))
}
