use std::fmt;

/// Location of a node inside the error tree, rendered as `$.url.site[2]`.
///
/// Segments borrow from the caller's stack frames so nothing is allocated
/// until a path is actually reported.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Path<'a> {
    Root,
    Field(&'a Path<'a>, &'a str),
    Index(&'a Path<'a>, usize),
}

impl<'a> Path<'a> {
    pub(crate) fn field(&'a self, key: &'a str) -> Path<'a> {
        Path::Field(self, key)
    }

    pub(crate) fn index(&'a self, index: usize) -> Path<'a> {
        Path::Index(self, index)
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Root => write!(f, "$"),
            Path::Field(parent, key) if is_plain_key(key) => write!(f, "{parent}.{key}"),
            Path::Field(parent, key) => write!(f, "{parent}[{key:?}]"),
            Path::Index(parent, index) => write!(f, "{parent}[{index}]"),
        }
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_path() {
        let root = Path::Root;
        let urls = root.field("urls");
        let second = urls.index(2);
        let site = second.field("site");

        assert_eq!(site.to_string(), "$.urls[2].site");
        assert_eq!(root.to_string(), "$");
    }

    #[test]
    fn test_keys_with_separators_are_bracketed() {
        let root = Path::Root;
        let dotted = root.field("a.b");
        let bracket = dotted.field("x[0]");
        let quoted = root.field("say \"hi\"");
        let empty = root.field("");

        assert_eq!(bracket.to_string(), r#"$["a.b"]["x[0]"]"#);
        assert_eq!(quoted.to_string(), r#"$["say \"hi\""]"#);
        assert_eq!(empty.to_string(), r#"$[""]"#);
        assert_eq!(root.field("non_field-errors").to_string(), "$.non_field-errors");
    }
}
