//! The built-in sweep roster.
//!
//! Five production host graphs and six query patterns, in the order the
//! production sweeps run them. Dataset paths are formed by joining a
//! caller-supplied data root with the well-known file names.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use std::path::Path;
use thiserror::Error;

use crate::graph::GraphFile;
use crate::pattern::Pattern;

/// The six production query patterns, p1 through p6. Orders 5, 6, 6, 6, 7, 7.
pub const BUILTIN_PATTERNS: [&str; 6] = [
    "0111010011100011100001100",
    "011011101110110101011000110000101000",
    "011111101000110111101010101101101010",
    "011110101101110000110000100001010010",
    "0111111101111111011101110100111100011100001100000",
    "0111111101111111011001110100111100011000001100000",
];

lazy_static! {
    /// Dataset key -> file name, in sweep order.
    static ref BUILTIN_GRAPHS: IndexMap<&'static str, &'static str> = IndexMap::from([
        ("wv", "wiki-vote.g"),
        ("pt", "patents.g"),
        ("mc", "mico.g"),
        ("lj", "livejournal.g"),
        ("ok", "orkut.g"),
    ]);
}

/// Errors produced when selecting from the built-in roster.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum PresetError {
    /// A requested dataset key is not in the built-in table.
    #[error("unknown graph key {0:?} (known: wv, pt, mc, lj, ok)")]
    UnknownGraph(String),
    /// A requested pattern number is outside 1..=6.
    #[error("unknown pattern number {0} (patterns are numbered 1..={count})", count = BUILTIN_PATTERNS.len())]
    UnknownPattern(usize),
}

/// All built-in datasets under `data_root`, in sweep order.
pub fn builtin_graphs(data_root: &Path) -> Vec<GraphFile> {
    BUILTIN_GRAPHS
        .iter()
        .map(|(key, file)| {
            GraphFile::new(key, data_root.join(file)).expect("builtin keys are valid")
        })
        .collect()
}

/// A subset of the built-in datasets, selected by key. The result keeps the
/// roster order regardless of the order keys are requested in.
pub fn select_graphs(data_root: &Path, keys: &[String]) -> Result<Vec<GraphFile>, PresetError> {
    for key in keys {
        if !BUILTIN_GRAPHS.contains_key(key.as_str()) {
            return Err(PresetError::UnknownGraph(key.clone()));
        }
    }
    Ok(builtin_graphs(data_root)
        .into_iter()
        .filter(|g| keys.iter().any(|k| k == g.key()))
        .collect())
}

/// All built-in patterns, in sweep order.
pub fn builtin_patterns() -> Vec<Pattern> {
    BUILTIN_PATTERNS
        .iter()
        .map(|bits| Pattern::new(bits).expect("builtin patterns are valid"))
        .collect()
}

/// A subset of the built-in patterns, selected by 1-based number. The result
/// keeps the roster order regardless of the order numbers are requested in.
pub fn select_patterns(numbers: &[usize]) -> Result<Vec<Pattern>, PresetError> {
    for &n in numbers {
        if n == 0 || n > BUILTIN_PATTERNS.len() {
            return Err(PresetError::UnknownPattern(n));
        }
    }
    Ok(builtin_patterns()
        .into_iter()
        .enumerate()
        .filter(|(i, _)| numbers.contains(&(i + 1)))
        .map(|(_, p)| p)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn graphs_keep_declared_order() {
        let graphs = builtin_graphs(Path::new("data"));
        let keys: Vec<&str> = graphs.iter().map(|g| g.key()).collect();
        assert_eq!(keys, ["wv", "pt", "mc", "lj", "ok"]);
    }

    #[test]
    fn graph_paths_join_data_root() {
        let graphs = builtin_graphs(Path::new("/srv/graphs"));
        assert_eq!(graphs[0].path(), PathBuf::from("/srv/graphs/wiki-vote.g"));
        assert_eq!(graphs[4].path(), PathBuf::from("/srv/graphs/orkut.g"));
    }

    #[test]
    fn pattern_orders() {
        let orders: Vec<usize> = builtin_patterns().iter().map(Pattern::order).collect();
        assert_eq!(orders, [5, 6, 6, 6, 7, 7]);
    }

    #[test]
    fn all_builtin_patterns_are_square() {
        assert!(builtin_patterns().iter().all(Pattern::is_square));
    }

    #[test]
    fn select_graphs_keeps_roster_order() {
        let keys = vec!["mc".to_string(), "wv".to_string()];
        let graphs = select_graphs(Path::new("data"), &keys).unwrap();
        let got: Vec<&str> = graphs.iter().map(|g| g.key()).collect();
        assert_eq!(got, ["wv", "mc"]);
    }

    #[test]
    fn select_graphs_unknown_key() {
        let keys = vec!["wv".to_string(), "bogus".to_string()];
        assert_eq!(
            select_graphs(Path::new("data"), &keys),
            Err(PresetError::UnknownGraph("bogus".to_string()))
        );
    }

    #[test]
    fn select_patterns_by_number() {
        let patterns = select_patterns(&[5, 1]).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].bits(), BUILTIN_PATTERNS[0]);
        assert_eq!(patterns[1].bits(), BUILTIN_PATTERNS[4]);
    }

    #[test]
    fn select_patterns_rejects_zero_and_out_of_range() {
        assert_eq!(select_patterns(&[0]), Err(PresetError::UnknownPattern(0)));
        assert_eq!(select_patterns(&[7]), Err(PresetError::UnknownPattern(7)));
    }
}
