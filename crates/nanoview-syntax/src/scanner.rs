//! Quote- and bracket-aware scanning
//!
//! Every splitter in this crate walks text through the same small state
//! machine. A character is *structural* when it is read in [`ScanState::Normal`]
//! and leaves the machine in `Normal`; only structural characters may act as
//! delimiters.

/// Lexical context of the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any literal or IRI
    Normal,
    /// Inside `"..."`
    InSingleQuote,
    /// Inside `"""..."""`
    InTripleQuote,
    /// Inside `<...>`
    InAngleBracket,
}

/// One scanner step: a character (or a `"""` run) and the transition it caused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Byte offset of the step in the scanned text
    pub offset: usize,
    /// Byte length of the step (3 for a `"""` run)
    pub len: usize,
    /// First character of the step
    pub ch: char,
    /// State before the step
    pub before: ScanState,
    /// State after the step
    pub after: ScanState,
}

impl Step {
    /// Whether the step is a structural character
    pub fn is_structural(&self) -> bool {
        self.before == ScanState::Normal && self.after == ScanState::Normal
    }
}

/// Iterator over the [`Step`]s of a text
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    state: ScanState,
    prev: Option<char>,
}

impl<'a> Scanner<'a> {
    /// Start scanning `text` in [`ScanState::Normal`]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            state: ScanState::Normal,
            prev: None,
        }
    }

    /// Current state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// A quote right after a backslash never opens or closes a single-quoted literal
    fn transition(&self, ch: char, triple: bool, escaped: bool) -> ScanState {
        match self.state {
            ScanState::Normal if triple => ScanState::InTripleQuote,
            ScanState::Normal if ch == '"' && !escaped => ScanState::InSingleQuote,
            ScanState::Normal if ch == '<' => ScanState::InAngleBracket,
            ScanState::InTripleQuote if triple => ScanState::Normal,
            ScanState::InSingleQuote if ch == '"' && !escaped => ScanState::Normal,
            ScanState::InAngleBracket if ch == '>' => ScanState::Normal,
            state => state,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let rest = &self.text[self.pos..];
        let ch = rest.chars().next()?;

        let escaped = self.prev == Some('\\');
        let triple = rest.starts_with("\"\"\"")
            && match self.state {
                ScanState::Normal => !escaped,
                ScanState::InTripleQuote => true,
                _ => false,
            };
        let len = if triple { 3 } else { ch.len_utf8() };

        let before = self.state;
        let after = self.transition(ch, triple, escaped);
        let step = Step {
            offset: self.pos,
            len,
            ch,
            before,
            after,
        };

        self.state = after;
        self.prev = Some(ch);
        self.pos += len;
        Some(step)
    }
}

/// Split `text` at every structural character accepted by `is_delimiter`.
///
/// Delimiters are dropped; pieces are trimmed and empty pieces skipped. The
/// predicate also sees the text following the delimiter.
pub fn split_structural<'a, F>(text: &'a str, mut is_delimiter: F) -> Vec<&'a str>
where
    F: FnMut(char, &'a str) -> bool,
{
    let mut pieces = Vec::new();
    let mut start = 0;

    for step in Scanner::new(text) {
        if step.is_structural() && is_delimiter(step.ch, &text[step.offset + step.len..]) {
            push_trimmed(&mut pieces, &text[start..step.offset]);
            start = step.offset + step.len;
        }
    }
    push_trimmed(&mut pieces, &text[start..]);
    pieces
}

fn push_trimmed<'a>(pieces: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        pieces.push(piece);
    }
}

/// Byte offsets of every structural occurrence of `ch`
pub fn structural_positions(text: &str, ch: char) -> impl Iterator<Item = usize> + '_ {
    Scanner::new(text)
        .filter(move |step| step.is_structural() && step.ch == ch)
        .map(|step| step.offset)
}

/// Whether the text at `offset` starts outside any literal or IRI
pub fn is_structural_offset(text: &str, offset: usize) -> bool {
    Scanner::new(text)
        .find(|step| step.offset >= offset)
        .map_or(false, |step| step.offset == offset && step.before == ScanState::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(text: &str) -> Vec<ScanState> {
        Scanner::new(text).map(|s| s.after).collect()
    }

    #[test]
    fn test_single_quote_transitions() {
        use ScanState::*;
        assert_eq!(states(r#"a"b"c"#), vec![Normal, InSingleQuote, InSingleQuote, Normal, Normal]);
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let mut scanner = Scanner::new(r#""a\"b""#);
        let steps: Vec<Step> = scanner.by_ref().collect();
        assert_eq!(steps[3].ch, '"');
        assert_eq!(steps[3].after, ScanState::InSingleQuote);
        assert_eq!(scanner.state(), ScanState::Normal);
    }

    #[test]
    fn test_escaped_quote_does_not_open() {
        let steps: Vec<Step> = Scanner::new(r#"a\"b, c"#).collect();
        assert_eq!(steps[2].ch, '"');
        assert_eq!(steps[2].after, ScanState::Normal);
        assert!(steps[4].is_structural());
        assert_eq!(split_structural(r#"a\"b, c"#, |c, _| c == ','), vec![r#"a\"b"#, "c"]);

        let steps: Vec<Step> = Scanner::new(r#"x\"""y"#).collect();
        assert_eq!(steps[2].len, 1);
        assert!(steps.iter().all(|s| s.after != ScanState::InTripleQuote));
    }

    #[test]
    fn test_triple_quote_is_one_step() {
        let steps: Vec<Step> = Scanner::new(r#""""a"b""""#).collect();
        assert_eq!(steps[0].len, 3);
        assert_eq!(steps[0].after, ScanState::InTripleQuote);
        // a lone quote inside a triple-quoted region changes nothing
        assert_eq!(steps[2].after, ScanState::InTripleQuote);
        assert_eq!(steps.last().map(|s| s.after), Some(ScanState::Normal));
    }

    #[test]
    fn test_angle_brackets() {
        let steps: Vec<Step> = Scanner::new("<a,b>,c").collect();
        assert!(!steps[2].is_structural());
        assert!(steps[5].is_structural());
    }

    #[test]
    fn test_unterminated_quote_stays_open() {
        let mut scanner = Scanner::new(r#"x "open, still"#);
        scanner.by_ref().for_each(drop);
        assert_eq!(scanner.state(), ScanState::InSingleQuote);
        assert_eq!(split_structural(r#"x "open, still"#, |c, _| c == ','), vec![r#"x "open, still"#]);
    }

    #[test]
    fn test_structural_offsets() {
        let text = r#"a "{" { b }"#;
        let braces: Vec<usize> = structural_positions(text, '{').collect();
        assert_eq!(braces, vec![6]);
        assert!(is_structural_offset(text, 0));
        assert!(!is_structural_offset(text, 3));
    }
}
