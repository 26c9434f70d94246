/// Splits a line into whitespace-separated words, keeping double-quoted
/// words together. Quotes are stripped; an unterminated quote runs to the
/// end of the line.
#[must_use]
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut word = String::new();
        if c == '"' {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                word.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                word.push(c);
                chars.next();
            }
        }
        words.push(word);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words() {
        assert_eq!(split_words("  vp 1 2.5  -3 "), vec!["vp", "1", "2.5", "-3"]);
    }

    #[test]
    fn quoted_words() {
        assert_eq!(split_words(r#"joint "left arm" 0"#), vec!["joint", "left arm", "0"]);
        assert_eq!(split_words(r#"mesh """#), vec!["mesh", ""]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(split_words(r#"print "hello world"#), vec!["print", "hello world"]);
    }
}
