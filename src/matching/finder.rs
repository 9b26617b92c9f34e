use std::collections::{HashMap, HashSet};

use super::{MatchPolicy, MatchResult, TokenMatch};
use crate::error::{HashError, Result};

/// Compare two token sequences under `policy`.
pub fn find_matches<S: AsRef<str>>(a: &[S], b: &[S], policy: MatchPolicy) -> Result<MatchResult> {
    let matches = match policy {
        MatchPolicy::Set => set_matches(a, b),
        MatchPolicy::Positional { strict } => {
            if strict && a.len() != b.len() {
                return Err(HashError::range(format!(
                    "strict positional match needs equal lengths ({} vs {})",
                    a.len(),
                    b.len()
                )));
            }
            positional_matches(a, b)
        }
    };
    Ok(MatchResult { policy, matches })
}

/// Distinct shared values ordered by first occurrence in `a`.
fn set_matches<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<TokenMatch> {
    // first index of every value in b
    let mut first_in_b: HashMap<&str, usize> = HashMap::with_capacity(b.len());
    for (i, t) in b.iter().enumerate() {
        first_in_b.entry(t.as_ref()).or_insert(i);
    }

    let mut seen = HashSet::<&str>::new();
    let mut out = Vec::new();
    for (index_a, t) in a.iter().enumerate() {
        let t = t.as_ref();
        if !seen.insert(t) {
            continue;
        }
        if let Some(&index_b) = first_in_b.get(t) {
            out.push(TokenMatch {
                token: t.to_string(),
                index_a,
                index_b,
            });
        }
    }
    out
}

fn positional_matches<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<TokenMatch> {
    a.iter()
        .zip(b.iter())
        .enumerate()
        .filter(|(_, (x, y))| x.as_ref() == y.as_ref())
        .map(|(i, (x, _))| TokenMatch {
            token: x.as_ref().to_string(),
            index_a: i,
            index_b: i,
        })
        .collect()
}
