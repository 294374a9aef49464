use crate::incrementer::VersionCode;
use crate::incrementer::coercion::KEY_PREFIX;

/// The text of a properties file as ordered lines, each keeping its own terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertiesDocument {
    lines: Vec<String>,
}

/// A line that declares the version code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCodeLine {
    pub index: usize,
    pub raw: String,
    pub value: VersionCode,
}

impl PropertiesDocument {
    pub fn parse(contents: &str) -> Self {
        Self {
            lines: contents.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn render(&self) -> String {
        self.lines.concat()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Indices of lines starting with `VERSION_CODE`, case-sensitive and without leading whitespace.
    pub fn version_code_indices(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.starts_with(KEY_PREFIX))
            .map(|(index, _)| index)
            .collect()
    }

    /// Swaps the line at `index`, returning `false` when there is no such line.
    pub fn replace_line(&mut self, index: usize, line: String) -> bool {
        match self.lines.get_mut(index) {
            Some(existing) => {
                *existing = line;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_is_lossless() {
        let inputs = [
            "",
            "VERSION_CODE=1",
            "a=b\nVERSION_CODE=1\n",
            "a=b\r\nVERSION_CODE=1\r\nc=d",
            "\n\n\r\n",
        ];
        for input in inputs {
            assert_eq!(PropertiesDocument::parse(input).render(), input);
        }
    }

    #[test]
    fn test_lines_keep_terminators() {
        let doc = PropertiesDocument::parse("a=b\r\nVERSION_CODE=3\nlast");
        assert_eq!(doc.lines(), ["a=b\r\n", "VERSION_CODE=3\n", "last"]);
    }

    #[test]
    fn test_version_code_indices() {
        let doc = PropertiesDocument::parse(
            "VERSION_NAME=1.0\nVERSION_CODE=3\n  VERSION_CODE=4\nversion_code=5\nVERSION_CODE_EXTRA=6\n",
        );
        assert_eq!(doc.version_code_indices(), vec![1, 4]);
    }

    #[test]
    fn test_replace_line() {
        let mut doc = PropertiesDocument::parse("a=b\nVERSION_CODE=3\n");
        assert!(doc.replace_line(1, "VERSION_CODE=4\r\n".to_string()));
        assert_eq!(doc.render(), "a=b\nVERSION_CODE=4\r\n");
    }

    #[test]
    fn test_replace_line_out_of_range() {
        let mut doc = PropertiesDocument::parse("a=b\nVERSION_CODE=3\n");
        assert!(!doc.replace_line(2, "VERSION_CODE=4\r\n".to_string()));
        assert_eq!(doc.render(), "a=b\nVERSION_CODE=3\n");
    }
}
