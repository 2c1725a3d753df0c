//! Sequence notation: which symbols a glyph batch contains

/// Split a sequence into symbols
///
/// A comma switches to list notation (`"0,1,10"`), where items are trimmed and
/// empties dropped. Without a comma every character is one symbol, spaces included.
pub fn tokenize(sequence: &str) -> Vec<String> {
    if sequence.contains(',') {
        sequence
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        sequence.chars().map(String::from).collect()
    }
}

/// Preview label of a symbol
pub fn label_for(symbol: &str) -> String {
    if symbol == " " {
        "space".to_string()
    } else {
        symbol.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characters_become_items() {
        assert_eq!(tokenize("AB"), vec!["A", "B"]);
        assert_eq!(tokenize("0123456789-").len(), 11);
    }

    #[test]
    fn comma_list_is_trimmed() {
        assert_eq!(tokenize("0,1,2,10,11"), vec!["0", "1", "2", "10", "11"]);
        assert_eq!(tokenize(" AM , PM ,, "), vec!["AM", "PM"]);
    }

    #[test]
    fn empty_inputs() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(",,,").is_empty());
    }

    #[test]
    fn spaces_survive_character_mode() {
        assert_eq!(tokenize("a b"), vec!["a", " ", "b"]);
        assert_eq!(label_for(" "), "space");
        assert_eq!(label_for("x"), "x");
    }

    #[test]
    fn multibyte_characters_stay_whole() {
        assert_eq!(tokenize("°℃"), vec!["°", "℃"]);
    }
}
