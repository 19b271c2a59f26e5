//! Two-agent item rankings.

use super::{parse_int, FileFormat, ParseError};

/// Rankings of items `1..=n` by two agents, best first.
///
/// The file holds `n`, then agent 1's permutation, then agent 2's.
///
/// # Examples
///
/// ```
/// use oracleforge_oracles::format::Preferences;
/// use oracleforge_oracles::FileFormat;
///
/// let prefs = Preferences::parse("3\n1 2 3\n3 2 1\n").unwrap();
/// assert_eq!(prefs.items(), 3);
/// assert_eq!(prefs.ranking(1), &[3, 2, 1]);
/// assert!(Preferences::parse("2\n1 1\n1 2\n").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    rankings: [Vec<i64>; 2],
}

impl Preferences {
    pub fn items(&self) -> usize {
        self.rankings[0].len()
    }

    /// Ranking of agent `agent` (0 or 1), best item first.
    ///
    /// # Panics
    ///
    /// Panics if `agent > 1`.
    pub fn ranking(&self, agent: usize) -> &[i64] {
        &self.rankings[agent]
    }
}

fn check_permutation(ranking: &[i64], n: usize, agent: usize) -> Result<(), ParseError> {
    let mut seen = vec![false; n];
    for &item in ranking {
        let slot = usize::try_from(item)
            .ok()
            .filter(|&i| (1..=n).contains(&i))
            .ok_or_else(|| {
                ParseError::Preferences(format!("agent {}: item {item} is out of 1..={n}", agent + 1))
            })?;
        if std::mem::replace(&mut seen[slot - 1], true) {
            return Err(ParseError::Preferences(format!(
                "agent {}: item {item} ranked twice",
                agent + 1
            )));
        }
    }
    Ok(())
}

impl FileFormat for Preferences {
    const NAME: &'static str = "preferences";

    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut numbers = Vec::new();
        for (index, line) in text.lines().enumerate() {
            for token in line.split_ascii_whitespace() {
                numbers.push(parse_int(token, index + 1)?);
            }
        }

        let (&count, rest) = numbers
            .split_first()
            .ok_or_else(|| ParseError::Preferences("missing item count".into()))?;
        let n = usize::try_from(count)
            .map_err(|_| ParseError::Preferences(format!("negative item count {count}")))?;
        if rest.len() != 2 * n {
            return Err(ParseError::Preferences(format!(
                "expected {} ranked items, found {}",
                2 * n,
                rest.len()
            )));
        }

        let (first, second) = rest.split_at(n);
        check_permutation(first, n, 0)?;
        check_permutation(second, n, 1)?;
        Ok(Self {
            rankings: [first.to_vec(), second.to_vec()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_on_one_line() {
        let prefs = Preferences::parse("2 2 1 1 2").unwrap();
        assert_eq!(prefs.ranking(0), &[2, 1]);
        assert_eq!(prefs.ranking(1), &[1, 2]);
    }

    #[test]
    fn test_rejects_bad_files() {
        assert!(Preferences::parse("").is_err());
        assert!(Preferences::parse("2\n1 2\n1\n").is_err());
        assert!(Preferences::parse("2\n1 3\n1 2\n").is_err());
        assert!(Preferences::parse("2\n1 2\n2 2\n").is_err());
        assert!(matches!(
            Preferences::parse("2\n1 a\n1 2\n"),
            Err(ParseError::InvalidToken { line: 2, .. })
        ));
    }
}
