//! Rewrites LaTeX into plain, readable Unicode for the text fallback.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FRAC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\frac\{([^{}]+)\}\{([^{}]+)\}").expect("frac pattern is valid"));
static SQRT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\sqrt\{([^{}]+)\}").expect("sqrt pattern is valid"));
static MACRO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\([a-zA-Z]+)").expect("macro pattern is valid"));

/// Upper bound on frac/sqrt rewriting rounds; each round unwraps one level
/// of nesting.
const MAX_NESTING: usize = 16;

fn macro_replacement(name: &str) -> Option<&'static str> {
    let replacement = match name {
        "pi" => "π",
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "theta" => "θ",
        "lambda" => "λ",
        "mu" => "μ",
        "sigma" => "σ",
        "phi" => "φ",
        "omega" => "ω",
        "Delta" => "Δ",
        "infty" => "∞",
        "sum" => "∑",
        "int" => "∫",
        "times" => "×",
        "cdot" => "·",
        "pm" => "±",
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "neq" | "ne" => "≠",
        "lim" => "lim",
        "sin" => "sin",
        "cos" => "cos",
        "tan" => "tan",
        "log" => "log",
        "ln" => "ln",
        "exp" => "exp",
        "left" | "right" => "",
        _ => return None,
    };
    Some(replacement)
}

/// Converts common LaTeX constructs to Unicode text.
///
/// `\frac{a}{b}` becomes `(a)/(b)`, `\sqrt{x}` becomes `√(x)`, Greek letters
/// and operators become their symbols, and function names lose their
/// backslash. Unknown macros are left untouched.
pub fn latex_to_unicode(latex: &str) -> String {
    let mut text = latex.trim().to_string();

    for _ in 0..MAX_NESTING {
        let next = FRAC.replace_all(&text, "($1)/($2)");
        let next = SQRT.replace_all(&next, "√($1)").into_owned();
        if next == text {
            break;
        }
        text = next;
    }

    MACRO
        .replace_all(&text, |caps: &Captures| {
            let name = &caps[1];
            match macro_replacement(name) {
                Some(replacement) => replacement.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_and_roots() {
        assert_eq!(latex_to_unicode(r"\frac{a}{b}"), "(a)/(b)");
        assert_eq!(latex_to_unicode(r"\sqrt{x+1}"), "√(x+1)");
    }

    #[test]
    fn nested_constructs_unwrap() {
        assert_eq!(latex_to_unicode(r"\frac{\sqrt{2}}{2}"), "(√(2))/(2)");
    }

    #[test]
    fn greek_and_operators() {
        assert_eq!(latex_to_unicode(r"2\pi r"), "2π r");
        assert_eq!(latex_to_unicode(r"\sum_{i=1}^{n} i"), "∑_{i=1}^{n} i");
        assert_eq!(latex_to_unicode(r"\int_0^\infty"), "∫_0^∞");
        assert_eq!(latex_to_unicode(r"\lim_{x \to 0} \sin x"), r"lim_{x \to 0} sin x");
    }

    #[test]
    fn whole_macro_names_only() {
        assert_eq!(latex_to_unicode(r"\pix"), r"\pix");
        assert_eq!(latex_to_unicode(r"\pi2"), "π2");
    }
}
