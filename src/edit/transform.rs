use std::fmt;

/// Pure text rewrite applied to the current content of a span.
pub enum Transformation {
    Lowercase,
    Uppercase,
    /// First character upper case, the rest lower case.
    Capitalize,
    /// First character lower case, the rest lower case.
    Decapitalize,
    Custom(Box<dyn Fn(&str) -> String>),
}

impl Transformation {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        Transformation::Custom(Box::new(f))
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Transformation::Lowercase => text.to_lowercase(),
            Transformation::Uppercase => text.to_uppercase(),
            Transformation::Capitalize => recase_first(text, true),
            Transformation::Decapitalize => recase_first(text, false),
            Transformation::Custom(f) => f(text),
        }
    }
}

fn recase_first(text: &str, upper: bool) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut result: String = if upper {
        first.to_uppercase().collect()
    } else {
        first.to_lowercase().collect()
    };
    result.push_str(&chars.as_str().to_lowercase());
    result
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformation::Lowercase => write!(f, "Lowercase"),
            Transformation::Uppercase => write!(f, "Uppercase"),
            Transformation::Capitalize => write!(f, "Capitalize"),
            Transformation::Decapitalize => write!(f, "Decapitalize"),
            Transformation::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
