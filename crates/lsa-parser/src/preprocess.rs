//! Text normalization applied before lexing.

/// Normalizes raw scheme text.
///
/// Grouping characters `(`, `)` and `|` only help human readers and are
/// removed. Vertex prefixes `y`, `x` and `p` are uppercased. The
/// unconditional marker `W` and the Cyrillic marker suffixes `Н` and `К`
/// are lowercased, so `YН` reads as `Yн`. Whitespace runs collapse to one
/// space and the result is trimmed.
pub fn preprocess(raw: &str) -> String {
    let normalized: String = raw
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '|'))
        .map(|c| match c {
            'y' | 'x' | 'p' => c.to_ascii_uppercase(),
            'W' => 'w',
            'Н' => 'н',
            'К' => 'к',
            _ => c,
        })
        .collect();

    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_grouping_characters() {
        assert_eq!(
            preprocess("Yн X0 (↑1 | Y0 w↑2) ↓1 Y1 ↓2 Yк"),
            "Yн X0 ↑1 Y0 w↑2 ↓1 Y1 ↓2 Yк"
        );
    }

    #[test]
    fn test_normalizes_case() {
        assert_eq!(preprocess("yн x1 p2 W↑3 y4 yк"), "Yн X1 P2 w↑3 Y4 Yк");
    }

    #[test]
    fn test_lowercases_marker_suffixes() {
        assert_eq!(preprocess("YН Y1 YК"), "Yн Y1 Yк");
        assert_eq!(preprocess("yН x1 ↑1 y2 ↓1 yК"), "Yн X1 ↑1 Y2 ↓1 Yк");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(preprocess("  Yн\t\n Y1   Yк \n"), "Yн Y1 Yк");
        assert_eq!(preprocess(" ( | ) "), "");
    }

    #[test]
    fn test_idempotent() {
        let once = preprocess("yн (x1 ↑1 | y2) ↓1 yк");
        assert_eq!(preprocess(&once), once);
    }
}
