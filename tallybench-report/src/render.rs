//! Presentation-boundary rendering helpers.
//!
//! Rounding lives here and only here: values that feed further statistics
//! are never rounded.

/// Round to 2 decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render an RSD percentage, flagging the undefined case explicitly.
pub fn format_rsd(rsd: Option<f64>) -> String {
    match rsd {
        Some(value) => format!("{:.2}", value),
        None => "undefined".to_string(),
    }
}

/// Escape an instance key for inclusion in a LaTeX table cell.
///
/// The escaped form is display-only; the underlying key used for joins is
/// never altered.
pub fn latex_escape(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '_' | '%' | '&' | '#' | '$' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\\' => out.push_str("\\textbackslash{}"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_at_two_decimals() {
        assert_eq!(round2(52.704_627), 52.7);
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(3.141_59), 3.14);
    }

    #[test]
    fn rsd_undefined_is_spelled_out() {
        assert_eq!(format_rsd(Some(52.704_627)), "52.70");
        assert_eq!(format_rsd(None), "undefined");
    }

    #[test]
    fn escapes_latex_specials() {
        assert_eq!(latex_escape("brock200_1"), "brock200\\_1");
        assert_eq!(latex_escape("gen200_p0.9_44"), "gen200\\_p0.9\\_44");
        assert_eq!(latex_escape("50%&"), "50\\%\\&");
        assert_eq!(latex_escape("a~b"), "a\\textasciitilde{}b");
    }

    #[test]
    fn plain_keys_pass_through() {
        assert_eq!(latex_escape("keller4"), "keller4");
    }
}
