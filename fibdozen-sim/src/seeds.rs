use anyhow::{Result, bail};
use std::collections::HashSet;

/// Resolve a list of CLI seed arguments into wheel seeds.
///
/// Supports literal integers (negative values use their magnitude) and the
/// keyword `random`, which draws a fresh seed from OS entropy. Duplicates are
/// dropped while keeping first-seen order; an empty list yields one random seed.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut pending: Vec<u64> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("random") {
            pending.push(rand::random::<u64>());
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            pending.push(value.unsigned_abs());
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            pending.push(value);
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    let mut seen = HashSet::new();
    pending.retain(|seed| seen.insert(*seed));

    if pending.is_empty() {
        pending.push(rand::random::<u64>());
    }

    Ok(pending)
}
