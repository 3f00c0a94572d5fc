use std::ops::Range;

use logos::Logos;

use crate::error::LexError;

/// Punctuation that may appear inside an identifier by default.
pub const DEFAULT_CONTINUATION: &[char] = &['-', '.', '@', '$'];

/// Scanner configuration.
///
/// Selects which punctuation characters may continue an identifier, so that
/// names such as `t-1` or `ammo.full` stay a single token. A continuation
/// character must be followed by another identifier character; an identifier
/// ending in one is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    continuation: Vec<char>,
}

impl ScanConfig {
    /// Creates a configuration accepting the given continuation punctuation.
    ///
    /// Characters that already have a meaning of their own (letters, digits,
    /// `_`, whitespace, parentheses and operator characters) are ignored.
    #[must_use]
    pub fn new(continuation: impl IntoIterator<Item = char>) -> Self {
        let mut continuation: Vec<char> =
            continuation.into_iter()
                        .filter(|&c| c.is_ascii_punctuation() && c != '_' && !is_reserved(c))
                        .collect();
        continuation.sort_unstable();
        continuation.dedup();
        Self { continuation }
    }

    /// Returns the accepted continuation punctuation.
    #[must_use]
    pub fn continuation(&self) -> &[char] {
        &self.continuation
    }

    /// Tests whether `c` is configured as continuation punctuation.
    #[must_use]
    pub fn is_continuation(&self, c: char) -> bool {
        self.continuation.contains(&c)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTINUATION.iter().copied())
    }
}

/// Characters with a fixed meaning that can never continue an identifier.
///
/// `-` is absent on purpose: it is both the subtraction operator and the
/// default hyphen of names like `t-1`.
const fn is_reserved(c: char) -> bool {
    matches!(c,
             '~' | '!' | '%' | '^' | '&' | '*' | '(' | ')' | '+' | '=' | '[' | ']' | '{' | '}'
             | '|' | ':' | ';' | '\'' | '"' | '<' | '>' | '?' | ',' | '/')
}

/// Raw lexeme recognised by the generated automaton.
///
/// logos reports byte spans; the [`Scanner`] turns them into character
/// offsets.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = ScanConfig, error = ScanFailure)]
#[logos(skip r"\s+")]
enum Lexeme<'s> {
    /// Digits, optionally fused with a directly preceding `-`.
    #[regex(r"-?[0-9]+", scan_number)]
    Number(i32),
    /// Identifiers and the `true` / `false` keywords.
    #[regex(r"[\p{Alphabetic}_][\p{Alphabetic}0-9_]*", scan_word)]
    Word(&'s str),
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
}

/// Error channel of the generated automaton.
///
/// `Unrecognized` is what logos reports for input no rule matches; it is
/// turned into a [`LexError`] once the offending character is known.
#[derive(Debug, Clone, PartialEq, Default)]
enum ScanFailure {
    #[default]
    Unrecognized,
    Rejected(LexError),
}

impl From<LexError> for ScanFailure {
    fn from(error: LexError) -> Self {
        Self::Rejected(error)
    }
}

/// Parses a number literal and rejects literals glued to an identifier.
fn scan_number<'s>(lex: &logos::Lexer<'s, Lexeme<'s>>) -> Result<i32, LexError> {
    let number = lex.slice();
    let index = char_index(lex.source(), lex.span().start);

    if let Some(next) = lex.remainder().chars().next()
       && (next.is_alphabetic() || next == '_')
    {
        return Err(LexError::MergedNumber { number: number.to_string(),
                                            index });
    }

    number.parse()
          .map_err(|_| LexError::NumberOutOfRange { number: number.to_string(),
                                                    index })
}

/// Extends an identifier through continuation punctuation.
///
/// The regex stops at the first non-word character. From there the word keeps
/// growing through configured punctuation and further word characters, and is
/// rejected if it ends on punctuation.
fn scan_word<'s>(lex: &mut logos::Lexer<'s, Lexeme<'s>>) -> Result<&'s str, LexError> {
    let mut last = None;
    for c in lex.remainder().chars() {
        if c.is_alphanumeric() || c == '_' || lex.extras.is_continuation(c) {
            last = Some(c);
            lex.bump(c.len_utf8());
        } else {
            break;
        }
    }

    let word = lex.slice();
    match last {
        Some(c) if lex.extras.is_continuation(c) => {
            let index = char_index(lex.source(), lex.span().end) - 1;
            Err(LexError::InvalidIdentifierEnd { identifier: word.to_string(),
                                                 index })
        },
        _ => Ok(word),
    }
}

/// Converts a byte offset into `source` to a character offset.
fn char_index(source: &str, byte: usize) -> usize {
    source.get(..byte).map_or(byte, |prefix| prefix.chars().count())
}

/// Operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `!`
    Bang,
    /// `~`
    Tilde,
    /// `-`, negation or subtraction depending on position.
    Minus,
    /// `+`
    Plus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
}

impl Operator {
    /// Returns the operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Bang => "!",
            Self::Tilde => "~",
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
        }
    }
}

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'s> {
    /// An integer literal, possibly a fused negative one.
    Number(i32),
    /// A variable name.
    Identifier(&'s str),
    /// `true` or `false`.
    Bool(bool),
    /// An operator symbol.
    Operator(Operator),
    /// `(`
    LParen,
    /// `)`
    RParen,
}

/// A token with its position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s> {
    /// What was scanned.
    pub kind:   TokenKind<'s>,
    /// Byte span of the token.
    pub span:   Range<usize>,
    /// Character offsets of the token, as reported in diagnostics.
    pub chars:  Range<usize>,
    /// The token as written.
    pub text:   &'s str,
    /// Whether whitespace (or the start of input) precedes the token.
    pub spaced: bool,
}

/// Turns source text into a stream of positioned tokens.
///
/// The scanner is an iterator over `Result<Token, LexError>` and stops after
/// the first error.
pub struct Scanner<'s> {
    lexer:    logos::Lexer<'s, Lexeme<'s>>,
    last_end: Option<usize>,
    cursor:   (usize, usize),
    failed:   bool,
}

impl<'s> Scanner<'s> {
    /// Creates a scanner with the default continuation punctuation.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self::with_config(source, ScanConfig::default())
    }

    /// Creates a scanner with explicit configuration.
    #[must_use]
    pub fn with_config(source: &'s str, config: ScanConfig) -> Self {
        Self { lexer:    Lexeme::lexer_with_extras(source, config),
               last_end: None,
               cursor:   (0, 0),
               failed:   false, }
    }

    /// Returns the source being scanned.
    #[must_use]
    pub fn source(&self) -> &'s str {
        self.lexer.source()
    }

    /// Character offset of the byte offset `byte`, which must not lie before
    /// the last token handed out.
    fn advance_to(&mut self, byte: usize) -> usize {
        let (from_byte, from_char) = self.cursor;
        let skipped = self.source()
                          .get(from_byte..byte)
                          .map_or(0, |gap| gap.chars().count());
        self.cursor = (byte, from_char + skipped);
        self.cursor.1
    }

    /// Length of the source in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.source().chars().count()
    }
}

impl<'s> Iterator for Scanner<'s> {
    type Item = Result<Token<'s>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let lexeme = match self.lexer.next()? {
            Ok(lexeme) => lexeme,
            Err(failure) => {
                self.failed = true;
                let start = self.lexer.span().start;
                let error = match failure {
                    ScanFailure::Rejected(error) => error,
                    ScanFailure::Unrecognized => {
                        let character = self.source()[start..].chars().next().unwrap_or('\0');
                        LexError::unrecognized(character, self.advance_to(start))
                    },
                };
                return Some(Err(error));
            },
        };

        let kind = match lexeme {
            Lexeme::Number(value) => TokenKind::Number(value),
            Lexeme::Word("true") => TokenKind::Bool(true),
            Lexeme::Word("false") => TokenKind::Bool(false),
            Lexeme::Word(name) => TokenKind::Identifier(name),
            Lexeme::LParen => TokenKind::LParen,
            Lexeme::RParen => TokenKind::RParen,
            Lexeme::Bang => TokenKind::Operator(Operator::Bang),
            Lexeme::Tilde => TokenKind::Operator(Operator::Tilde),
            Lexeme::Minus => TokenKind::Operator(Operator::Minus),
            Lexeme::Plus => TokenKind::Operator(Operator::Plus),
            Lexeme::Star => TokenKind::Operator(Operator::Star),
            Lexeme::Slash => TokenKind::Operator(Operator::Slash),
            Lexeme::Percent => TokenKind::Operator(Operator::Percent),
            Lexeme::Less => TokenKind::Operator(Operator::Less),
            Lexeme::LessEqual => TokenKind::Operator(Operator::LessEqual),
            Lexeme::Greater => TokenKind::Operator(Operator::Greater),
            Lexeme::GreaterEqual => TokenKind::Operator(Operator::GreaterEqual),
            Lexeme::EqualEqual => TokenKind::Operator(Operator::EqualEqual),
            Lexeme::BangEqual => TokenKind::Operator(Operator::BangEqual),
            Lexeme::AmpAmp => TokenKind::Operator(Operator::AmpAmp),
            Lexeme::PipePipe => TokenKind::Operator(Operator::PipePipe),
        };

        let span = self.lexer.span();
        let spaced = self.last_end.is_none_or(|end| end < span.start);
        self.last_end = Some(span.end);

        let chars = self.advance_to(span.start)..self.advance_to(span.end);

        Some(Ok(Token { kind,
                        text: self.lexer.slice(),
                        span,
                        chars,
                        spaced }))
    }
}

/// Tests whether `c` is whitespace the scanner skips.
#[must_use]
pub fn is_blank(c: char) -> bool {
    c.is_whitespace()
}
