use std::cmp::Ordering;
use std::str::FromStr;

/// Folds a name or version into its match form: trimmed and lowercased.
pub fn normalize_key_part(value: &str) -> String {
    value.trim().to_lowercase()
}

/// VersionMatcher policy deciding whether an installed version is affected
///
/// Both arguments arrive already normalized with [`normalize_key_part`].
pub trait VersionMatcher {
    fn matches(&self, installed: &str, affected: &str) -> bool;
}

/// Exact equality of normalized versions (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactVersionMatcher;

impl VersionMatcher for ExactVersionMatcher {
    fn matches(&self, installed: &str, affected: &str) -> bool {
        installed == affected
    }
}

/// Comparator ranges such as `>=1.0, <2.0`
///
/// A record version without any comparator falls back to exact equality, so
/// feeds that only carry concrete versions behave like [`ExactVersionMatcher`].
/// Segments are compared numerically when both sides are numbers and
/// lexically otherwise; missing trailing segments count as `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeVersionMatcher;

impl RangeVersionMatcher {
    fn is_range(affected: &str) -> bool {
        affected.contains(['<', '>', '=', '!'])
    }

    fn satisfies(installed: &str, constraint: &str) -> bool {
        let constraint = constraint.trim();
        let (op, version) = [">=", "<=", "==", "!=", ">", "<", "="]
            .iter()
            .find_map(|op| constraint.strip_prefix(op).map(|rest| (*op, rest.trim())))
            .unwrap_or(("==", constraint));

        if version.is_empty() {
            return false;
        }

        let ordering = compare_versions(installed, version);
        match op {
            ">=" => ordering != Ordering::Less,
            "<=" => ordering != Ordering::Greater,
            ">" => ordering == Ordering::Greater,
            "<" => ordering == Ordering::Less,
            "!=" => ordering != Ordering::Equal,
            _ => ordering == Ordering::Equal,
        }
    }
}

impl VersionMatcher for RangeVersionMatcher {
    fn matches(&self, installed: &str, affected: &str) -> bool {
        if !Self::is_range(affected) {
            return installed == affected;
        }
        affected
            .split(',')
            .all(|constraint| Self::satisfies(installed, constraint))
    }
}

/// Compares dotted versions segment by segment.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left_parts: Vec<&str> = left.split(['.', '-', '+']).collect();
    let right_parts: Vec<&str> = right.split(['.', '-', '+']).collect();
    let len = left_parts.len().max(right_parts.len());

    for i in 0..len {
        let l = left_parts.get(i).copied().unwrap_or("0");
        let r = right_parts.get(i).copied().unwrap_or("0");
        let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            _ => l.cmp(r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// Configured matching mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionMatching {
    #[default]
    Exact,
    Range,
}

impl VersionMatching {
    pub fn matcher(&self) -> Box<dyn VersionMatcher> {
        match self {
            VersionMatching::Exact => Box::new(ExactVersionMatcher),
            VersionMatching::Range => Box::new(RangeVersionMatcher),
        }
    }
}

impl FromStr for VersionMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(VersionMatching::Exact),
            "range" => Ok(VersionMatching::Range),
            _ => Err(format!(
                "Invalid version matching mode: {}. Please specify 'exact' or 'range'",
                s
            )),
        }
    }
}
