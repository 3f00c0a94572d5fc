use std::fmt;

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `!`, logical negation under the active truthiness policy.
    Not,
    /// `~`, bitwise complement.
    BitNot,
    /// `-`, arithmetic negation.
    Negate,
}

impl UnaryOperator {
    /// Returns the operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Negate => "-",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

/// Binding power of prefix operators; higher than every infix operator.
pub const UNARY_PRECEDENCE: u8 = 16;

impl BinaryOperator {
    /// Returns the binding power of the operator. Higher binds tighter.
    ///
    /// ```
    /// use condexpr::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::Mul.precedence() > BinaryOperator::Add.precedence());
    /// assert!(BinaryOperator::And.precedence() > BinaryOperator::Or.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 3,
            Self::And => 4,
            Self::Eq | Self::NotEq => 8,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 9,
            Self::Add | Self::Sub => 11,
            Self::Mul | Self::Div | Self::Mod => 12,
        }
    }

    /// Returns the operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// Whether the operator belongs to the boolean tier.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::Or | Self::And | Self::Eq | Self::NotEq)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A node of the expression tree.
///
/// Each node exclusively owns its children. Parentheses only steer parsing
/// and leave no trace in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer literal.
    Number(i32),
    /// `true` or `false`.
    Bool(bool),
    /// Reference to a variable by name.
    Variable(String),
    /// A prefix operation.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
    },
    /// An infix operation.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
}

impl Expr {
    /// Builds a prefix operation node.
    #[must_use]
    pub fn unary(op: UnaryOperator, operand: Self) -> Self {
        Self::Unary { op,
                      operand: Box::new(operand) }
    }

    /// Builds an infix operation node.
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Self {
        Self::Binary { op,
                       left: Box::new(left),
                       right: Box::new(right) }
    }

    /// Calls `visit` with the name of every variable reference, left to right.
    pub fn for_each_variable<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Self::Number(_) | Self::Bool(_) => {},
            Self::Variable(name) => visit(name),
            Self::Unary { operand, .. } => operand.for_each_variable(visit),
            Self::Binary { left, right, .. } => {
                left.for_each_variable(visit);
                right.for_each_variable(visit);
            },
        }
    }
}

/// Prints the tree fully parenthesised, which makes the parsed precedence
/// visible.
///
/// ```
/// use condexpr::compile;
///
/// let compiled = compile("1 + 2 * -x").unwrap();
/// assert_eq!(compiled.root().to_string(), "(1 + (2 * (-x)))");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Variable(name) => f.write_str(name),
            Self::Unary { op, operand } => write!(f, "({op}{operand})"),
            Self::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}
