//! Textual state vector input
//!
//! Accepted forms:
//! - `[0.707, 0, 0, 0.707]` or `0.707, 0, 0, 0.707` (comma separated)
//! - `1 0 0 1` (whitespace separated, used only when no comma is present)
//! - complex components `1+2i`, `0.5-0.5i`, `-i`, `3i`; `j` may be used in
//!   place of `i` and a component may be wrapped in parentheses, `(1+2j)`

use crate::error::{Result, StateError};
use num_complex::Complex64;

/// Parse a textual state vector into its amplitudes
///
/// # Errors
/// [`StateError::Parse`] on the first token that is empty, malformed or not
/// finite, and when the input contains no tokens at all.
///
/// # Example
/// ```
/// use schmidt_state::parse_state;
/// use num_complex::Complex64;
///
/// let state = parse_state("[1, 0, 0, 1-2i]").unwrap();
/// assert_eq!(state.len(), 4);
/// assert_eq!(state[3], Complex64::new(1.0, -2.0));
///
/// assert!(parse_state("abc,,1").is_err());
/// ```
pub fn parse_state(text: &str) -> Result<Vec<Complex64>> {
    let cleaned = text
        .trim()
        .trim_matches(|c| c == '[' || c == ']')
        .trim();

    let tokens: Vec<&str> = if cleaned.contains(',') {
        cleaned.split(',').collect()
    } else {
        cleaned.split_whitespace().collect()
    };

    if tokens.is_empty() {
        return Err(StateError::parse("", 0, "no components given"));
    }

    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| parse_complex(token, position))
        .collect()
}

/// Parse a single component
///
/// `position` is only used for error reporting.
pub fn parse_complex(token: &str, position: usize) -> Result<Complex64> {
    let trimmed = token.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(trimmed)
        .trim();

    if inner.is_empty() {
        return Err(StateError::parse(token, position, "is empty"));
    }

    let value = match inner.strip_suffix(|c: char| matches!(c, 'i' | 'j' | 'I' | 'J')) {
        Some(body) => parse_imaginary_form(body),
        None => parse_real(inner).map(|re| Complex64::new(re, 0.0)),
    };

    match value {
        Some(z) if z.re.is_finite() && z.im.is_finite() => Ok(z),
        Some(_) => Err(StateError::parse(token, position, "is not finite")),
        None => Err(StateError::parse(token, position, "is not a complex number")),
    }
}

/// Body of `a+bi`, `a-bi` or `bi` with the imaginary unit already stripped
fn parse_imaginary_form(body: &str) -> Option<Complex64> {
    match split_point(body) {
        Some(split) => {
            let re = parse_real(&body[..split])?;
            let im = parse_coefficient(&body[split..])?;
            Some(Complex64::new(re, im))
        }
        None => parse_coefficient(body).map(|im| Complex64::new(0.0, im)),
    }
}

/// Index of the sign separating real and imaginary parts
///
/// A leading sign and the sign of an exponent (`1e-3`) do not count.
fn split_point(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len())
        .rev()
        .find(|&idx| {
            matches!(bytes[idx], b'+' | b'-') && !matches!(bytes[idx - 1], b'e' | b'E')
        })
}

/// Imaginary coefficient; a bare sign means ±1
fn parse_coefficient(text: &str) -> Option<f64> {
    match text.trim() {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        other => parse_real(other),
    }
}

fn parse_real(text: &str) -> Option<f64> {
    let text = text.trim();
    // f64::from_str accepts "inf"/"nan" spellings; only numeric literals are components
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Render amplitudes in a form [`parse_state`] reads back
pub fn format_state(amplitudes: &[Complex64]) -> String {
    let parts: Vec<String> = amplitudes
        .iter()
        .map(|z| {
            if z.im == 0.0 {
                format!("{}", z.re)
            } else if z.im < 0.0 {
                format!("{}-{}i", z.re, -z.im)
            } else {
                format!("{}+{}i", z.re, z.im)
            }
        })
        .collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_parse_bracketed_commas() {
        let state = parse_state("[0.707, 0, 0, 0.707]").unwrap();
        assert_eq!(
            state,
            vec![c(0.707, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.707, 0.0)]
        );
    }

    #[test]
    fn test_parse_whitespace_separated() {
        let state = parse_state("  1 0\t0\n1 ").unwrap();
        assert_eq!(state.len(), 4);
        assert_eq!(state[3], c(1.0, 0.0));
    }

    #[test]
    fn test_parse_complex_forms() {
        let state = parse_state("1+2i, 0.5-0.25i, -i, 3j, (1-1j), +i").unwrap();
        assert_eq!(
            state,
            vec![
                c(1.0, 2.0),
                c(0.5, -0.25),
                c(0.0, -1.0),
                c(0.0, 3.0),
                c(1.0, -1.0),
                c(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_parse_exponents() {
        let state = parse_state("1e-3, -2.5E+2, 1e-3+2e-3i").unwrap();
        assert_eq!(state[0], c(1e-3, 0.0));
        assert_eq!(state[1], c(-250.0, 0.0));
        assert_eq!(state[2], c(1e-3, 2e-3));
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_state("abc,,1").unwrap_err();
        assert!(matches!(err, StateError::Parse { position: 0, .. }));
    }

    #[test]
    fn test_parse_empty_token() {
        let err = parse_state("1,,1").unwrap_err();
        assert!(matches!(err, StateError::Parse { position: 1, .. }));
    }

    #[test]
    fn test_parse_trailing_comma() {
        assert!(parse_state("1, 0,").is_err());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_state(""), Err(StateError::Parse { .. })));
        assert!(matches!(parse_state("[ ]"), Err(StateError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(parse_state("inf, 0").is_err());
        assert!(parse_state("nan").is_err());
        assert!(parse_state("1e400").is_err());
    }

    #[test]
    fn test_parse_rejects_double_unit() {
        assert!(parse_state("1ii").is_err());
        assert!(parse_state("1+2i+3i").is_err());
    }

    #[test]
    fn test_format_reparses() {
        let state = vec![c(0.5, 0.0), c(0.0, -0.5), c(-0.5, 0.25), c(0.0, 0.0)];
        let text = format_state(&state);
        assert_eq!(parse_state(&text).unwrap(), state);
    }
}
