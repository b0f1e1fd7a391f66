//! Parsing for salary strings written in thousands (`"45k"`, `"40k - 55k €"`).

/// Inclusive salary range in thousands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

/// Every integer immediately followed by `k`/`K`, in order of appearance.
fn thousands_values(raw: &str) -> Vec<u32> {
    let mut values = Vec::new();
    let mut digits = String::new();

    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if !digits.is_empty() && (ch == 'k' || ch == 'K') {
            if let Ok(value) = digits.parse::<u32>() {
                values.push(value);
            }
        }
        digits.clear();
    }

    values
}

/// Candidate expectation: the first `Nk` token.
pub(crate) fn parse_expectation(raw: &str) -> Option<u32> {
    thousands_values(raw).into_iter().next()
}

/// Job range: `Nk - Mk`, or a single `Nk` treated as a fixed salary.
pub(crate) fn parse_range(raw: &str) -> Option<SalaryRange> {
    let values = thousands_values(raw);
    match values.as_slice() {
        [] => None,
        [single] => Some(SalaryRange {
            min: *single,
            max: *single,
        }),
        [first, second, ..] => Some(SalaryRange {
            min: (*first).min(*second),
            max: (*first).max(*second),
        }),
    }
}
