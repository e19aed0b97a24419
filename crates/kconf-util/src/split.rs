use itertools::Itertools;

/// Strip exactly one layer of matching surrounding quotes (`"` or `'`). Input without a matching
/// pair is returned unchanged.
///
/// # Example
///
/// ```
/// use kconf_util::split::strip_matching_quotes;
/// assert_eq!(strip_matching_quotes("\"abc\""), "abc");
/// assert_eq!(strip_matching_quotes("\"\"abc\"\""), "\"abc\"");
/// assert_eq!(strip_matching_quotes("'abc\""), "'abc\"");
/// ```
pub fn strip_matching_quotes(input: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = input
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }

    input
}

/// Whether `input` is wrapped in a single pair of parentheses that spans all of it, e.g. `(A)` or
/// `(A || (B))`, but not `(A) || (B)`.
pub fn is_fully_parenthesized(input: &str) -> bool {
    let input = input.trim();
    if !input.starts_with('(') || !input.ends_with(')') {
        return false;
    }

    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != input.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0
}

/// Join expression clauses with `&&`. Clauses that contain an `||` are parenthesised (unless they
/// already are) so the conjunction binds the way it reads.
pub fn join_conjunction<'a, I>(clauses: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    clauses
        .into_iter()
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| {
            if clause.contains("||") && !is_fully_parenthesized(clause) {
                format!("({clause})")
            } else {
                clause.to_string()
            }
        })
        .join("&&")
}
