//! Command line splitting.
//!
//! Words are separated by whitespace. Single or double quotes group text
//! into one word and are removed; `""` yields an empty word. An unclosed
//! quote runs to the end of the line.

pub fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokenize("  git   status "), vec!["git", "status"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            tokenize(r#"git commit -m "first commit""#),
            vec!["git", "commit", "-m", "first commit"]
        );
        assert_eq!(
            tokenize("write a.txt 'it said \"hi\"'"),
            vec!["write", "a.txt", "it said \"hi\""]
        );
    }

    #[test]
    fn empty_quotes_make_an_empty_word() {
        assert_eq!(tokenize(r#"git commit -m """#), vec!["git", "commit", "-m", ""]);
    }

    #[test]
    fn adjacent_quoted_text_joins_the_word() {
        assert_eq!(tokenize(r#"-m"a b"c"#), vec!["-ma bc"]);
    }

    #[test]
    fn unclosed_quote_runs_to_end() {
        assert_eq!(tokenize("write x 'open ended"), vec!["write", "x", "open ended"]);
    }
}
