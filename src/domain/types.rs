/// Marker prefix the renderer interprets as "show an image at this path"
/// instead of literal text. Handlers emit it verbatim; the dispatcher never
/// rewrites output lines.
pub const IMAGE_MARKER: &str = "IMAGE:";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OutputLine {
    Text(String),
    Image { path: String },
}

impl OutputLine {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(IMAGE_MARKER) {
            Some(rest) => Self::Image {
                path: rest.trim().to_string(),
            },
            None => Self::Text(raw.to_string()),
        }
    }
}

/// One scroll-back entry: the submitted line plus the raw output lines it
/// produced. Raw strings are kept so image-marker lines survive byte-for-byte.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    pub command: String,
    pub outputs: Vec<String>,
}

impl HistoryEntry {
    pub fn new(command: impl Into<String>, text: &str) -> Self {
        Self {
            command: command.into(),
            outputs: text.split('\n').map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_marker_line_parses_to_trimmed_path() {
        assert_eq!(
            OutputLine::parse("IMAGE:/team/x.jpg"),
            OutputLine::Image {
                path: "/team/x.jpg".to_string()
            }
        );
        assert_eq!(
            OutputLine::parse("IMAGE:  /team/y.jpg  "),
            OutputLine::Image {
                path: "/team/y.jpg".to_string()
            }
        );
    }

    #[test]
    fn plain_lines_pass_through_unchanged() {
        assert_eq!(
            OutputLine::parse("image: not a marker"),
            OutputLine::Text("image: not a marker".to_string())
        );
        assert_eq!(OutputLine::parse(""), OutputLine::Text(String::new()));
    }

    #[test]
    fn entry_splits_output_on_newlines() {
        let entry = HistoryEntry::new("team", "a\nb\n\nc");
        assert_eq!(entry.outputs, vec!["a", "b", "", "c"]);
    }
}
