//! Line-local syntax classification for termod.
//!
//! A pure, stateless tokenizer: given a line of text and a character
//! offset, [`classify`] returns the token category at that offset and
//! how many characters it spans. The renderer calls it repeatedly,
//! advancing the offset by the returned length, to colorize a line.
//!
//! Classification never carries state across lines, so multi-line
//! strings and comments are not recognized. That keeps rendering O(line)
//! and restartable from any scroll position.

/// Token category assigned to a span of line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    /// Plain text, whitespace, or unrecognized characters
    None,
    /// Language keyword
    Keyword,
    /// Sigil-prefixed special variable (e.g. `@env`)
    Special,
    /// Double-quoted string literal
    String,
    /// Numeric literal
    Number,
    /// Line comment (`//` to end of line)
    Comment,
    /// Operator or punctuation
    Operator,
    /// Identifier directly followed by `(`
    Call,
}

/// A classified span: category plus consumed length in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub category: TokenCategory,
    pub len: usize,
}

/// Language keywords (closed set).
const KEYWORDS: &[&str] = &[
    "break", "case", "const", "continue", "else", "enum", "false", "fn", "for", "if", "import",
    "in", "let", "loop", "match", "null", "return", "struct", "true", "type", "while",
];

/// Sigil-prefixed special variables (closed set).
const SPECIAL_VARS: &[&str] = &[
    "@args", "@env", "@err", "@file", "@fn", "@line", "@mod", "@self",
];

/// Recognized two-character operators.
const TWO_CHAR_OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "->", "=>", "::", "+=", "-=", "*=", "/=", "<<", ">>",
];

/// Single characters treated as operators.
const OPERATOR_CHARS: &str = "+-*/%=<>!&|^.,;:()[]{}";

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '~'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-' || ch == '~'
}

/// Classify the token starting at `offset` (a character index) in `line`.
///
/// Always consumes at least one character when `offset` is within the
/// line; returns a zero-length `None` token at or past the end.
pub fn classify(line: &str, offset: usize) -> Token {
    let chars: Vec<char> = line.chars().collect();

    if offset >= chars.len() {
        return Token {
            category: TokenCategory::None,
            len: 0,
        };
    }

    let ch = chars[offset];

    // 1. Whitespace run
    if ch.is_whitespace() {
        let len = chars[offset..].iter().take_while(|c| c.is_whitespace()).count();
        return Token {
            category: TokenCategory::None,
            len,
        };
    }

    // 2. Line comment to end of line
    if ch == '/' && chars.get(offset + 1) == Some(&'/') {
        return Token {
            category: TokenCategory::Comment,
            len: chars.len() - offset,
        };
    }

    // 3. String literal, backslash escapes the following character
    if ch == '"' {
        let mut len = 1;
        let mut i = offset + 1;
        while i < chars.len() {
            match chars[i] {
                '\\' if i + 1 < chars.len() => {
                    len += 2;
                    i += 2;
                }
                '"' => {
                    len += 1;
                    break;
                }
                _ => {
                    len += 1;
                    i += 1;
                }
            }
        }
        return Token {
            category: TokenCategory::String,
            len,
        };
    }

    // 4. Number: digits with interior dots
    if ch.is_ascii_digit() {
        let mut len = 0;
        let mut i = offset;
        while i < chars.len() {
            if chars[i].is_ascii_digit() {
                len += 1;
                i += 1;
            } else if chars[i] == '.' && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()) {
                len += 1;
                i += 1;
            } else {
                break;
            }
        }
        return Token {
            category: TokenCategory::Number,
            len,
        };
    }

    // 5. Sigil-prefixed variable reference
    if ch == '@' {
        let ident_len = chars[offset + 1..]
            .iter()
            .take_while(|c| is_ident_continue(**c))
            .count();
        let len = 1 + ident_len;
        let word: String = chars[offset..offset + len].iter().collect();
        let category = if SPECIAL_VARS.contains(&word.as_str()) {
            TokenCategory::Special
        } else {
            TokenCategory::None
        };
        return Token { category, len };
    }

    // 6. Identifier: keyword, function call, or plain
    if is_ident_start(ch) {
        let len = chars[offset..]
            .iter()
            .take_while(|c| is_ident_continue(**c))
            .count();
        let word: String = chars[offset..offset + len].iter().collect();

        if KEYWORDS.contains(&word.as_str()) {
            return Token {
                category: TokenCategory::Keyword,
                len,
            };
        }

        // Lookahead past whitespace for a call site
        let next = chars[offset + len..].iter().find(|c| !c.is_whitespace());
        let category = if next == Some(&'(') {
            TokenCategory::Call
        } else {
            TokenCategory::None
        };
        return Token { category, len };
    }

    // 7. Operators, two-character forms first
    if OPERATOR_CHARS.contains(ch) {
        if let Some(&next) = chars.get(offset + 1) {
            let pair: String = [ch, next].iter().collect();
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                return Token {
                    category: TokenCategory::Operator,
                    len: 2,
                };
            }
        }
        return Token {
            category: TokenCategory::Operator,
            len: 1,
        };
    }

    // 8. Anything else
    Token {
        category: TokenCategory::None,
        len: 1,
    }
}

/// Tokenize a whole line by repeated classification.
pub fn tokenize(line: &str) -> Vec<Token> {
    let total = line.chars().count();
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < total {
        let token = classify(line, offset);
        debug_assert!(token.len > 0);
        offset += token.len.max(1);
        tokens.push(token);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(line: &str, offset: usize) -> TokenCategory {
        classify(line, offset).category
    }

    #[test]
    fn test_whitespace_run() {
        let token = classify("   let", 0);
        assert_eq!(token.category, TokenCategory::None);
        assert_eq!(token.len, 3);
    }

    #[test]
    fn test_comment_to_end_of_line() {
        let token = classify("x // trailing note", 2);
        assert_eq!(token.category, TokenCategory::Comment);
        assert_eq!(token.len, 16);
    }

    #[test]
    fn test_string_with_escape() {
        let token = classify(r#""a\"b" rest"#, 0);
        assert_eq!(token.category, TokenCategory::String);
        assert_eq!(token.len, 6);
    }

    #[test]
    fn test_unterminated_string_runs_to_eol() {
        let token = classify("\"open ended", 0);
        assert_eq!(token.category, TokenCategory::String);
        assert_eq!(token.len, 11);
    }

    #[test]
    fn test_number_with_interior_dot() {
        let token = classify("3.14 + 2", 0);
        assert_eq!(token.category, TokenCategory::Number);
        assert_eq!(token.len, 4);
    }

    #[test]
    fn test_number_trailing_dot_not_consumed() {
        let token = classify("12.", 0);
        assert_eq!(token.category, TokenCategory::Number);
        assert_eq!(token.len, 2);
    }

    #[test]
    fn test_keyword() {
        let token = classify("return x", 0);
        assert_eq!(token.category, TokenCategory::Keyword);
        assert_eq!(token.len, 6);
    }

    #[test]
    fn test_special_variable() {
        assert_eq!(cat("@env", 0), TokenCategory::Special);
        assert_eq!(classify("@env", 0).len, 4);
    }

    #[test]
    fn test_unknown_sigil_variable_is_plain() {
        assert_eq!(cat("@custom", 0), TokenCategory::None);
        assert_eq!(classify("@custom", 0).len, 7);
    }

    #[test]
    fn test_function_call_lookahead() {
        assert_eq!(cat("print(x)", 0), TokenCategory::Call);
        assert_eq!(cat("print (x)", 0), TokenCategory::Call);
        assert_eq!(cat("print", 0), TokenCategory::None);
    }

    #[test]
    fn test_two_char_operator() {
        let token = classify("==", 0);
        assert_eq!(token.category, TokenCategory::Operator);
        assert_eq!(token.len, 2);
    }

    #[test]
    fn test_single_char_operator() {
        let token = classify("=x", 0);
        assert_eq!(token.category, TokenCategory::Operator);
        assert_eq!(token.len, 1);
    }

    #[test]
    fn test_fallback_single_char() {
        let token = classify("#", 0);
        assert_eq!(token.category, TokenCategory::None);
        assert_eq!(token.len, 1);
    }

    #[test]
    fn test_offset_past_end() {
        let token = classify("ab", 5);
        assert_eq!(token.len, 0);
    }

    #[test]
    fn test_tokenize_covers_line() {
        let line = "let x = call(3.14) // done";
        let tokens = tokenize(line);
        let total: usize = tokens.iter().map(|t| t.len).sum();
        assert_eq!(total, line.chars().count());
        assert_eq!(tokens[0].category, TokenCategory::Keyword);
    }

    #[test]
    fn test_identifier_with_dash_and_tilde() {
        let token = classify("~tmp-name rest", 0);
        assert_eq!(token.category, TokenCategory::None);
        assert_eq!(token.len, 9);
    }
}
