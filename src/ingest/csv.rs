//! Single-line CSV splitting.

use std::mem::take;

/// Split one line into fields on commas, keeping commas inside double quotes.
///
/// Quote characters only toggle the quoted state and are never copied into a
/// field; doubled quotes are not an escape. A trailing field is always
/// emitted, so the result has at least one element.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_comma_stays_in_field() {
        assert_eq!(parse_row(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_plain_split() {
        assert_eq!(parse_row("one,two,three"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_empty_fields_are_kept() {
        assert_eq!(parse_row(""), vec![""]);
        assert_eq!(parse_row("a,"), vec!["a", ""]);
        assert_eq!(parse_row(",,"), vec!["", "", ""]);
    }

    #[test]
    fn test_quotes_are_consumed() {
        assert_eq!(parse_row(r#""Free""#), vec!["Free"]);
        // No escaped-quote support: a doubled quote toggles twice.
        assert_eq!(parse_row(r#""say ""hi""","x""#), vec!["say hi", "x"]);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest_of_line() {
        assert_eq!(parse_row(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_whitespace_is_preserved() {
        assert_eq!(parse_row(" a , b "), vec![" a ", " b "]);
    }
}
