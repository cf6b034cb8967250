use crate::error::Error;

/// Size of the line buffer. Longer lines are cut here.
pub const MAX_LINE: usize = 128;

/// Labels and variable names are cut to this many characters.
pub const MAX_IDENT: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `(NAME)`
    Label(String),
    /// Instruction text with leading spaces stripped.
    Inst(String),
}

impl Stmt {
    /// Classifies one raw source line. `None` means the line is blank or a comment.
    /// Truncations are reported as warnings, never as failures.
    pub fn parse(raw: &str) -> (Option<Stmt>, Vec<Error>) {
        let mut warns = vec![];

        let (raw, cut) = clip_line(raw);
        if cut {
            warns.push(Error::LineTruncated);
        }

        let code = raw.trim_start_matches(' ');
        let head = match code.chars().next() {
            Some(head) => head,
            None => return (None, warns),
        };

        if head < ' ' || head > 'z' || head == '/' {
            return (None, warns);
        }

        // (LOOP)
        if head == '(' {
            let body = &code[1..];
            let name = match body.find(')') {
                Some(end) => &body[..end],
                None => body,
            };
            let clipped = clip_ident(name);
            if clipped.len() < name.len() {
                warns.push(Error::IdentTruncated(name.to_string()));
            }
            if clipped.contains(char::is_whitespace) {
                warns.push(Error::SpaceInLabel(clipped.to_string()));
            }
            return (Some(Stmt::Label(clipped.to_string())), warns);
        }

        (Some(Stmt::Inst(code.to_string())), warns)
    }
}

/// Cuts a line to at most `MAX_LINE` bytes on a character boundary.
fn clip_line(raw: &str) -> (&str, bool) {
    if raw.len() <= MAX_LINE {
        return (raw, false);
    }
    let mut end = MAX_LINE;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    (&raw[..end], true)
}

/// Cuts an identifier to at most `MAX_IDENT` characters.
pub fn clip_ident(name: &str) -> &str {
    match name.char_indices().nth(MAX_IDENT) {
        Some((end, _)) => &name[..end],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(raw: &str) -> Option<Stmt> {
        let (stmt, warns) = Stmt::parse(raw);
        assert!(warns.is_empty(), "{:?}", warns);
        stmt
    }

    #[test]
    fn ignorable() {
        assert_eq!(stmt(""), None);
        assert_eq!(stmt("     "), None);
        assert_eq!(stmt("// comment"), None);
        assert_eq!(stmt("   / anything"), None);
        assert_eq!(stmt("\tD=A"), None);
        assert_eq!(stmt("{"), None);
        assert_eq!(stmt("~x"), None);
    }

    #[test]
    fn label() {
        assert_eq!(stmt("(LOOP)"), Some(Stmt::Label("LOOP".into())));
        assert_eq!(stmt("   (END) // done"), Some(Stmt::Label("END".into())));
        assert_eq!(stmt("(Main.loop$1)"), Some(Stmt::Label("Main.loop$1".into())));
    }

    #[test]
    fn unterminated_label() {
        assert_eq!(stmt("(LOOP"), Some(Stmt::Label("LOOP".into())));
        assert_eq!(stmt("()"), Some(Stmt::Label("".into())));
    }

    #[test]
    fn label_with_space_warns() {
        let (stmt, warns) = Stmt::parse("(MY LOOP)");
        assert_eq!(stmt, Some(Stmt::Label("MY LOOP".into())));
        assert!(matches!(warns.as_slice(), [Error::SpaceInLabel(name)] if name == "MY LOOP"));
    }

    #[test]
    fn instruction() {
        assert_eq!(stmt("@2"), Some(Stmt::Inst("@2".into())));
        assert_eq!(stmt("    D=D+A // add"), Some(Stmt::Inst("D=D+A // add".into())));
        assert_eq!(stmt("0;JMP"), Some(Stmt::Inst("0;JMP".into())));
    }

    #[test]
    fn long_label_is_truncated() {
        let name = "L".repeat(MAX_IDENT + 10);
        let (stmt, warns) = Stmt::parse(&format!("({})", name));
        assert_eq!(stmt, Some(Stmt::Label("L".repeat(MAX_IDENT))));
        assert!(matches!(warns.as_slice(), [Error::IdentTruncated(_)]));
    }

    #[test]
    fn long_line_is_truncated() {
        let raw = format!("@{}", "x".repeat(MAX_LINE * 2));
        let (stmt, warns) = Stmt::parse(&raw);
        assert_eq!(stmt, Some(Stmt::Inst(raw[..MAX_LINE].to_string())));
        assert!(matches!(warns.as_slice(), [Error::LineTruncated]));
    }

    #[test]
    fn clip_multibyte() {
        let raw = format!("{}é", "a".repeat(MAX_LINE - 1));
        let (clipped, cut) = clip_line(&raw);
        assert!(cut);
        assert_eq!(clipped.len(), MAX_LINE - 1);
        assert_eq!(clip_ident("short"), "short");
    }
}
