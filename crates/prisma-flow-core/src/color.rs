//! CSS colors for diagram styling.
//!
//! Style configuration names colors the way a stylesheet would (`"white"`,
//! `"#dbe9f6"`, `"rgb(60 60 60 / 0.8)"`). [`Color`] keeps the parsed value
//! and prints it back in the same CSS form when it is written into an SVG
//! attribute.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Errors
    ///
    /// Returns a message naming `css` if it is not a color the CSS parser
    /// accepts.
    ///
    /// # Examples
    ///
    /// ```
    /// use prisma_flow_core::color::Color;
    ///
    /// let band = Color::new("#dbe9f6").unwrap();
    /// assert_eq!(band.alpha(), 1.0);
    /// assert!(Color::new("light-ish blue").is_err());
    /// ```
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    /// Opacity between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns a form of this color usable inside an SVG element id.
    ///
    /// Only ASCII letters, digits and `_` survive, and the result always
    /// starts with a letter.
    ///
    /// ```
    /// use prisma_flow_core::color::Color;
    ///
    /// assert_eq!(Color::new("navy").unwrap().to_id_safe_string(), "navy");
    /// let band = Color::new("#336699").unwrap().to_id_safe_string();
    /// assert!(!band.contains('#'));
    /// ```
    pub fn to_id_safe_string(self) -> String {
        let css = self.to_string();
        let mut id = String::with_capacity(css.len() + 3);
        for c in css.chars() {
            match c {
                '#' => id.push_str("hex"),
                c if c.is_ascii_alphanumeric() => id.push(c),
                _ => id.push('_'),
            }
        }

        if !id.starts_with(|c: char| c.is_ascii_alphabetic()) {
            id.insert_str(0, "c_");
        }
        id
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parses_css_forms() {
        for css in ["white", "#dbe9f6", "#fff", "rgb(60, 60, 60)", "hsl(210 50% 90%)"] {
            assert!(Color::new(css).is_ok(), "{css} should parse");
        }
    }

    #[test]
    fn test_color_error_names_input() {
        let err = Color::new("chartreuse-ish").unwrap_err();
        assert!(err.contains("chartreuse-ish"), "unexpected message: {err}");
    }

    #[test]
    fn test_color_default_is_opaque_black() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn test_color_alpha_from_css() {
        let faded = Color::new("rgba(0, 0, 0, 0.25)").unwrap();
        assert_eq!(faded.alpha(), 0.25);
    }

    #[test]
    fn test_id_safe_string_for_functional_notation() {
        let id = Color::new("rgb(255, 0, 0)").unwrap().to_id_safe_string();
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        assert!(id.starts_with(|c: char| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_equal_css_compares_equal() {
        assert_eq!(Color::new("red").unwrap(), Color::new("red").unwrap());
        assert_ne!(Color::new("red").unwrap(), Color::new("blue").unwrap());
    }
}
