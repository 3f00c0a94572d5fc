use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Operator, Scanner, Token, TokenKind, is_blank},
        parser::core::{Grammar, ParseResult},
    },
};

/// Most operators and parentheses a single expression may contain.
///
/// A length limit: it bounds the size of the tree, and with it the depth of a
/// flat chain such as `a + b + c + ...` that evaluation and drop recurse
/// through.
pub const MAX_OPERATORS: usize = 1024;

/// Deepest nesting of open parentheses and pending prefix operators.
///
/// Each level costs the parser a few stack frames, so the limit is checked as
/// a token is pulled, before the parser descends into it.
pub const MAX_NESTING: usize = 64;

/// The grammatical role a token plays at its position.
///
/// `-` is the only token whose role depends on what precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A number, identifier or boolean literal.
    Value,
    /// A prefix operator.
    Prefix(UnaryOperator),
    /// An infix operator.
    Infix(BinaryOperator),
    /// `(`
    Open,
    /// `)`
    Close,
}

impl Role {
    /// Whether the token consumes the sub-expression to its left.
    #[must_use]
    pub const fn takes_left(self) -> bool {
        matches!(self, Self::Infix(_) | Self::Close)
    }

    /// Whether the token consumes the sub-expression to its right.
    #[must_use]
    pub const fn takes_right(self) -> bool {
        matches!(self, Self::Prefix(_) | Self::Infix(_) | Self::Open)
    }

    /// Fixed symbol of operators and parentheses; values have none.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Value => "",
            Self::Prefix(op) => op.symbol(),
            Self::Infix(op) => op.symbol(),
            Self::Open => "(",
            Self::Close => ")",
        }
    }

    /// Determines the role of `kind` given the role of the token before it.
    #[must_use]
    pub fn classify(kind: TokenKind<'_>, previous: Option<Self>) -> Self {
        let op = match kind {
            TokenKind::Number(_) | TokenKind::Identifier(_) | TokenKind::Bool(_) => {
                return Self::Value;
            },
            TokenKind::LParen => return Self::Open,
            TokenKind::RParen => return Self::Close,
            TokenKind::Operator(op) => op,
        };

        match op {
            Operator::Bang => Self::Prefix(UnaryOperator::Not),
            Operator::Tilde => Self::Prefix(UnaryOperator::BitNot),
            Operator::Minus if previous.is_none_or(Self::takes_right) => {
                Self::Prefix(UnaryOperator::Negate)
            },
            Operator::Minus => Self::Infix(BinaryOperator::Sub),
            Operator::Plus => Self::Infix(BinaryOperator::Add),
            Operator::Star => Self::Infix(BinaryOperator::Mul),
            Operator::Slash => Self::Infix(BinaryOperator::Div),
            Operator::Percent => Self::Infix(BinaryOperator::Mod),
            Operator::Less => Self::Infix(BinaryOperator::Lt),
            Operator::LessEqual => Self::Infix(BinaryOperator::Le),
            Operator::Greater => Self::Infix(BinaryOperator::Gt),
            Operator::GreaterEqual => Self::Infix(BinaryOperator::Ge),
            Operator::EqualEqual => Self::Infix(BinaryOperator::Eq),
            Operator::BangEqual => Self::Infix(BinaryOperator::NotEq),
            Operator::AmpAmp => Self::Infix(BinaryOperator::And),
            Operator::PipePipe => Self::Infix(BinaryOperator::Or),
        }
    }
}

/// A token together with the role it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<'s> {
    /// Role at this position.
    pub role:  Role,
    /// The scanned token.
    pub token: Token<'s>,
}

impl Item<'_> {
    /// Character offset of the token.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.token.chars.start
    }
}

/// Position and role of the last token handed out.
#[derive(Debug, Clone, Copy)]
struct Previous {
    role:     Role,
    start:    usize,
    end:      usize,
    end_byte: usize,
}

/// An open parenthesis and the prefix operators applied to it.
#[derive(Debug, Clone, Copy)]
struct Opener {
    index:    usize,
    prefixes: usize,
}

/// Pulls tokens from the scanner on demand and validates each one against its
/// predecessor.
///
/// Every local rule of the grammar is enforced here: the spacing contract,
/// adjacent values or operators, parenthesis balance and dangling operators.
/// Checks run in source order as tokens are pulled, so the first violation in
/// the text is the one reported. The parser on top only arranges validated
/// tokens by precedence.
pub struct TokenStream<'s> {
    scanner:   Scanner<'s>,
    grammar:   Grammar,
    previous:  Option<Previous>,
    openers:   Vec<Opener>,
    held:      usize,
    prefixes:  usize,
    operators: usize,
    lookahead: Option<Item<'s>>,
    exhausted: bool,
}

impl<'s> TokenStream<'s> {
    /// Wraps a scanner.
    #[must_use]
    pub const fn new(scanner: Scanner<'s>, grammar: Grammar) -> Self {
        Self { scanner,
               grammar,
               previous: None,
               openers: Vec::new(),
               held: 0,
               prefixes: 0,
               operators: 0,
               lookahead: None,
               exhausted: false }
    }

    /// Returns the next token without consuming it, or `None` at the end of a
    /// well-formed input.
    pub fn peek(&mut self) -> ParseResult<Option<&Item<'s>>> {
        if self.lookahead.is_none() && !self.exhausted {
            self.lookahead = self.pull()?;
            self.exhausted = self.lookahead.is_none();
        }
        Ok(self.lookahead.as_ref())
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> ParseResult<Option<Item<'s>>> {
        self.peek()?;
        Ok(self.lookahead.take())
    }

    fn pull(&mut self) -> ParseResult<Option<Item<'s>>> {
        self.check_space_after()?;

        let Some(token) = self.scanner.next().transpose()? else {
            self.finish()?;
            return Ok(None);
        };

        let role = Role::classify(token.kind, self.previous.map(|p| p.role));
        let start = token.chars.start;

        self.check_grammar(&token, role)?;

        if let Role::Infix(op) = role
           && !token.spaced
        {
            return Err(ParseError::MissingWhitespaceBefore { operator: op.symbol(),
                                                             index:    token.chars.end, }.into());
        }

        self.track_nesting(role, start)?;

        if role != Role::Value {
            self.operators += 1;
            if self.operators > MAX_OPERATORS {
                return Err(ParseError::TooLong { limit: MAX_OPERATORS,
                                                 index: start, }.into());
            }
        }

        self.check_neighbours(&token, role)?;

        self.previous = Some(Previous { role,
                                        start,
                                        end: token.chars.end,
                                        end_byte: token.span.end });
        Ok(Some(Item { role, token }))
    }

    /// Balances parentheses and bounds how deep the parser will descend.
    ///
    /// The depth is the number of open parentheses plus every prefix operator
    /// still waiting for its operand, including those in front of an open
    /// parenthesis.
    fn track_nesting(&mut self, role: Role, start: usize) -> ParseResult<()> {
        match role {
            Role::Close => {
                let Some(opener) = self.openers.pop() else {
                    return Err(ParseError::UnmatchedParenthesis { index: start }.into());
                };
                self.held -= opener.prefixes;
            },
            Role::Open => {
                self.openers.push(Opener { index:    start,
                                           prefixes: self.prefixes, });
                self.held += self.prefixes;
                self.prefixes = 0;
            },
            Role::Prefix(_) => self.prefixes += 1,
            Role::Value | Role::Infix(_) => self.prefixes = 0,
        }

        if self.openers.len() + self.held + self.prefixes > MAX_NESTING {
            return Err(ParseError::TooDeep { limit: MAX_NESTING,
                                             index: start, }.into());
        }
        Ok(())
    }

    /// An infix operator must be followed by whitespace.
    fn check_space_after(&self) -> ParseResult<()> {
        if let Some(Previous { role: Role::Infix(op),
                               end,
                               end_byte,
                               .. }) = self.previous
           && let Some(next) = self.scanner.source()[end_byte..].chars().next()
           && !is_blank(next)
        {
            return Err(ParseError::MissingWhitespaceAfter { operator: op.symbol(),
                                                            index:    end, }.into());
        }
        Ok(())
    }

    /// Rejects what the boolean tier cannot express.
    fn check_grammar(&self, token: &Token<'_>, role: Role) -> ParseResult<()> {
        if self.grammar != Grammar::Boolean {
            return Ok(());
        }

        match (token.kind, role) {
            (TokenKind::Number(_), _) => {
                Err(ParseError::UnsupportedNumber { number: token.text.to_string(),
                                                    index:  token.chars.start, }.into())
            },
            (_, Role::Prefix(UnaryOperator::BitNot | UnaryOperator::Negate)) => {
                Err(ParseError::UnsupportedOperator { operator: role.symbol(),
                                                      index:    token.chars.start, }.into())
            },
            (_, Role::Infix(op)) if !op.is_logical() => {
                Err(ParseError::UnsupportedOperator { operator: op.symbol(),
                                                      index:    token.chars.start, }.into())
            },
            _ => Ok(()),
        }
    }

    /// Exactly one of two consecutive tokens must take the other as operand.
    fn check_neighbours(&self, token: &Token<'_>, role: Role) -> ParseResult<()> {
        let start = token.chars.start;

        let Some(previous) = self.previous else {
            if role.takes_left() {
                return Err(ParseError::MissingOperandAtBeginning { operator: role.symbol(),
                                                                   index:    start, }.into());
            }
            return Ok(());
        };

        if previous.role == Role::Open && role == Role::Close {
            return Err(ParseError::EmptyParenthesis { index: previous.start }.into());
        }

        if previous.role.takes_right() == role.takes_left() {
            if previous.role.takes_right() {
                return Err(ParseError::ExtraOperator { first:        previous.role.symbol(),
                                                       first_index:  previous.start,
                                                       second:       role.symbol(),
                                                       second_index: start, }.into());
            }
            return Err(ParseError::MissingBinaryOperation { token:          token.text.to_string(),
                                                            index:          start,
                                                            previous_index: previous.start, }.into());
        }

        Ok(())
    }

    /// Checks the end of the input.
    fn finish(&self) -> ParseResult<()> {
        match self.previous {
            None => Err(ParseError::EmptyExpression.into()),
            Some(previous) if previous.role.takes_right() => {
                Err(ParseError::MissingOperandAtEnd { operator: previous.role.symbol(),
                                                      index:    self.scanner.char_len(), }.into())
            },
            Some(_) => match self.openers.last() {
                Some(opener) => Err(ParseError::UnclosedParenthesis { index: opener.index }.into()),
                None => Ok(()),
            },
        }
    }
}
