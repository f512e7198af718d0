// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Low-level lexical helpers for the attribute wire format.

use crate::error::{PbsError, PbsResult};

/// Split `text` on `delim`, treating parenthesized spans as atomic.
///
/// Attribute values embed sub-records like
/// `jobs=419.master(cput=2367,mem=6562224kb)` where the delimiter occurs
/// freely inside the parentheses and must not split the token. Joining the
/// result with `delim` reproduces the input, except that a single trailing
/// top-level delimiter is dropped (no trailing empty token). An empty input
/// yields an empty vector, not `[""]`, so absent values never become
/// spurious attributes.
pub fn split_outside_parens(text: &str, delim: char) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;

    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if c == delim && depth == 0 => {
                tokens.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Expand compact range notation into explicit id strings:
/// `"3,5,7-9"` -> `["3", "5", "7", "8", "9"]`.
///
/// Output is canonical decimal (leading zeros are not preserved). A
/// subrange with `end < start` expands to nothing; a token that is neither
/// an integer nor an integer pair is a [`PbsError::MalformedRange`].
pub fn expand_range(text: &str) -> PbsResult<Vec<String>> {
    let mut ids = Vec::new();
    for token in text.split(',') {
        let (start, end) = match token.split_once('-') {
            Some((start, end)) => (parse_bound(token, start)?, parse_bound(token, end)?),
            None => {
                let id = parse_bound(token, token)?;
                (id, id)
            }
        };
        for id in start..=end {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

fn parse_bound(token: &str, bound: &str) -> PbsResult<u64> {
    bound
        .trim()
        .parse()
        .map_err(|_| PbsError::MalformedRange(token.to_string()))
}

/// True for tokens shaped like `5` or `8-9`.
///
/// Comma-splitting at assembly time cuts range-compacted lists such as
/// `node1/4,5,8-9` into `["node1/4", "5", "8-9"]`; the typed views use
/// this predicate to recognize the bare continuation tokens and rejoin
/// them before slot expansion.
pub fn is_bare_range(token: &str) -> bool {
    fn is_digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }
    match token.split_once('-') {
        Some((start, end)) => is_digits(start) && is_digits(end),
        None => is_digits(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Full node status line from a 24-core Torque node, parenthesized
    // per-job sub-records included.
    const NODE_STATUS: &str = "rectime=1424696750,macaddr=40:a8:f0:2f:17:f4,cpuclock=Fixed,varattr=,jobs=419[1].master(cput=236745,energy_used=0,mem=6562224kb,vmem=7391872kb,walltime=22647,session_id=15941) 446[1].master(cput=7385,energy_used=0,mem=202936kb,vmem=368184kb,walltime=7391,session_id=30940),state=free,size=456341748kb:459945088kb,netload=587288451179,gres=,loadave=18.07,ncpus=24,physmem=65850220kb,availmem=77961112kb,totmem=86821736kb,idletime=13933,nusers=1,nsessions=7,sessions=31904 31718,uname=Linux node24 3.10.0 #1 SMP Wed Feb 4 08:16:54 CET 2015 x86_64,opsys=linux";

    #[test]
    fn test_split_comma_round_trip() {
        let tokens = split_outside_parens(NODE_STATUS, ',');
        assert_eq!(tokens.join(","), NODE_STATUS);
        // Commas inside the parenthesized job stats did not split.
        assert!(tokens.iter().any(|t| t.starts_with("jobs=") && t.contains("cput=236745,")));
    }

    #[test]
    fn test_split_equals_round_trip() {
        let jobs = "jobs=419[1].master(cput=236745,energy_used=0) 446[1].master(cput=7385,energy_used=0)";
        let tokens = split_outside_parens(jobs, '=');
        assert_eq!(tokens.join("="), jobs);
        assert_eq!(tokens[0], "jobs");
    }

    #[test]
    fn test_split_plain() {
        assert_eq!(split_outside_parens("a,b,c", ','), vec!["a", "b", "c"]);
        assert_eq!(split_outside_parens("a,,b", ','), vec!["a", "", "b"]);
        assert_eq!(split_outside_parens("no-delimiter", ','), vec!["no-delimiter"]);
    }

    #[test]
    fn test_split_delimiter_before_paren() {
        assert_eq!(
            split_outside_parens("a,(b,c),d", ','),
            vec!["a", "(b,c)", "d"]
        );
    }

    #[test]
    fn test_split_other_delimiter_inside_parens() {
        assert_eq!(
            split_outside_parens("k=(a=b,c=d)", '='),
            vec!["k", "(a=b,c=d)"]
        );
    }

    #[test]
    fn test_split_trailing_delimiter_dropped() {
        assert_eq!(split_outside_parens("a,b,", ','), vec!["a", "b"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_outside_parens("", ',').is_empty());
    }

    #[test]
    fn test_split_unbalanced_parens() {
        // An unmatched open paren swallows the rest of the string.
        assert_eq!(split_outside_parens("a,(b,c", ','), vec!["a", "(b,c"]);
        // A stray close paren degrades to a plain split.
        assert_eq!(split_outside_parens("a),b", ','), vec!["a)", "b"]);
    }

    #[test]
    fn test_expand_range_totality() {
        assert_eq!(
            expand_range("3,5,7-9").unwrap(),
            vec!["3", "5", "7", "8", "9"]
        );
        assert_eq!(expand_range("1").unwrap(), vec!["1"]);
        assert_eq!(expand_range("2-2").unwrap(), vec!["2"]);
    }

    #[test]
    fn test_expand_range_descending_is_empty() {
        assert!(expand_range("9-7").unwrap().is_empty());
        assert_eq!(expand_range("1,9-7,2").unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn test_expand_range_malformed() {
        assert!(matches!(
            expand_range("a-b"),
            Err(PbsError::MalformedRange(_))
        ));
        assert!(expand_range("").is_err());
        assert!(expand_range("1,x").is_err());
        assert!(expand_range("1-2-3").is_err());
    }

    #[test]
    fn test_is_bare_range() {
        assert!(is_bare_range("5"));
        assert!(is_bare_range("8-9"));
        assert!(is_bare_range("10-12"));
        assert!(!is_bare_range("node1/4"));
        assert!(!is_bare_range("5-"));
        assert!(!is_bare_range("-5"));
        assert!(!is_bare_range(""));
        assert!(!is_bare_range("419[1].master"));
    }
}
