//! Postal-code range lists.
//!
//! Scraped city rows carry their postal codes as a single cell in a small
//! list syntax:
//!
//! ```text
//! list    := segment ("," segment)*
//! segment := "" | code | range
//! range   := code sep code        sep := "–" (en dash) | "-"
//! code    := digit+
//! ```
//!
//! `expand_code_list` turns such a cell into one code per entry, expanding
//! ranges inclusively. Zero-padding is significant: codes generated from a
//! range are padded to the width of the range's start code. Empty segments
//! (trailing or doubled commas) are skipped; anything else that is not a
//! digit, separator, or whitespace is an error.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{0}' in postal-code list")]
    UnexpectedChar(char),

    #[error("'{0}' is not a code or a start–end range")]
    MalformedRange(String),

    #[error("range '{0}' runs backwards")]
    BackwardsRange(String),
}

/// Expand a range-list cell into individual postal codes, in list order.
pub fn expand_code_list(input: &str) -> Result<Vec<String>, ParseError> {
    let mut codes = Vec::new();
    for segment in input.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        expand_segment(segment, &mut codes)?;
    }
    Ok(codes)
}

fn expand_segment(segment: &str, codes: &mut Vec<String>) -> Result<(), ParseError> {
    let mut parts: Vec<String> = Vec::with_capacity(2);
    let mut current = String::new();

    for ch in segment.chars() {
        match ch {
            '0'..='9' => current.push(ch),
            '–' | '-' => {
                // Second separator means the segment is not a plain range
                if !parts.is_empty() {
                    return Err(ParseError::MalformedRange(segment.to_string()));
                }
                parts.push(std::mem::take(&mut current));
            }
            c if c.is_whitespace() => {}
            c => return Err(ParseError::UnexpectedChar(c)),
        }
    }
    parts.push(current);

    match parts.as_slice() {
        [code] if !code.is_empty() => {
            codes.push(code.clone());
            Ok(())
        }
        [start, end] if !start.is_empty() && !end.is_empty() => {
            expand_range(segment, start, end, codes)
        }
        _ => Err(ParseError::MalformedRange(segment.to_string())),
    }
}

fn expand_range(
    segment: &str,
    start: &str,
    end: &str,
    codes: &mut Vec<String>,
) -> Result<(), ParseError> {
    let width = start.len();
    let start_n: u64 = start
        .parse()
        .map_err(|_| ParseError::MalformedRange(segment.to_string()))?;
    let end_n: u64 = end
        .parse()
        .map_err(|_| ParseError::MalformedRange(segment.to_string()))?;

    if end_n < start_n {
        return Err(ParseError::BackwardsRange(segment.to_string()));
    }

    for n in start_n..=end_n {
        codes.push(format!("{n:0width$}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_code() {
        assert_eq!(expand_code_list("78267").unwrap(), vec!["78267"]);
    }

    #[test]
    fn test_comma_list() {
        assert_eq!(
            expand_code_list("10115, 10117,10119").unwrap(),
            vec!["10115", "10117", "10119"]
        );
    }

    #[test]
    fn test_en_dash_range() {
        assert_eq!(
            expand_code_list("73430–73434").unwrap(),
            vec!["73430", "73431", "73432", "73433", "73434"]
        );
    }

    #[test]
    fn test_hyphen_range() {
        assert_eq!(expand_code_list("101-103").unwrap(), vec!["101", "102", "103"]);
    }

    #[test]
    fn test_mixed_list_and_range() {
        assert_eq!(
            expand_code_list("06420, 73430–73432").unwrap(),
            vec!["06420", "73430", "73431", "73432"]
        );
    }

    #[test]
    fn test_zero_padding_kept() {
        assert_eq!(
            expand_code_list("00098–00101").unwrap(),
            vec!["00098", "00099", "00100", "00101"]
        );
    }

    #[test]
    fn test_empty_segments_skipped() {
        assert_eq!(
            expand_code_list("10115,, 10117,").unwrap(),
            vec!["10115", "10117"]
        );
        assert_eq!(expand_code_list("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_inner_whitespace_in_range() {
        assert_eq!(
            expand_code_list("01824 – 01826").unwrap(),
            vec!["01824", "01825", "01826"]
        );
    }

    #[test]
    fn test_stray_character_fails() {
        assert_eq!(
            expand_code_list("10115a").unwrap_err(),
            ParseError::UnexpectedChar('a')
        );
    }

    #[test]
    fn test_dangling_separator_fails() {
        assert!(matches!(
            expand_code_list("–10115").unwrap_err(),
            ParseError::MalformedRange(_)
        ));
        assert!(matches!(
            expand_code_list("10115–").unwrap_err(),
            ParseError::MalformedRange(_)
        ));
    }

    #[test]
    fn test_double_separator_fails() {
        assert!(matches!(
            expand_code_list("10–11–12").unwrap_err(),
            ParseError::MalformedRange(_)
        ));
    }

    #[test]
    fn test_backwards_range_fails() {
        assert_eq!(
            expand_code_list("73434–73430").unwrap_err(),
            ParseError::BackwardsRange("73434–73430".to_string())
        );
    }
}
