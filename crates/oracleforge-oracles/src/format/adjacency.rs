//! Edge list files with alternating `from` / `to` tokens.

use super::{FileFormat, ParseError};

/// Directed edges between vertex names, in file order.
///
/// Tokens are whitespace separated and may span lines freely. Lines
/// starting with `%` or `#` are comments.
///
/// # Examples
///
/// ```
/// use oracleforge_oracles::format::AdjacencyList;
/// use oracleforge_oracles::FileFormat;
///
/// let graph = AdjacencyList::parse("% triangle\na b\nb c c\na\n").unwrap();
/// assert_eq!(graph.edges().len(), 3);
/// assert_eq!(graph.edges()[2], ("c".to_string(), "a".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList {
    edges: Vec<(String, String)>,
}

impl AdjacencyList {
    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }
}

impl FileFormat for AdjacencyList {
    const NAME: &'static str = "adjacency";

    fn parse(text: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('%') && !line.starts_with('#'))
            .flat_map(str::split_ascii_whitespace)
            .collect();

        if tokens.len() % 2 != 0 {
            return Err(ParseError::OddTokenCount(tokens.len()));
        }

        let edges = tokens
            .chunks_exact(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect();
        Ok(Self { edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_across_lines() {
        let graph = AdjacencyList::parse("# comment\n1 2 2\n3\n\n").unwrap();
        assert_eq!(
            graph.edges(),
            &[("1".into(), "2".into()), ("2".into(), "3".into())]
        );
    }

    #[test]
    fn test_odd_token_count() {
        assert_eq!(
            AdjacencyList::parse("a b c\n"),
            Err(ParseError::OddTokenCount(3))
        );
    }
}
