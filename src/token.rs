use std::fmt::{self, Display, Formatter};
use strum_macros::EnumDiscriminants;

#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(derive(Hash))]
#[strum_discriminants(name(TokenType))]
pub enum Token {
    Illegal(char),
    Eof,

    // Identifiers and literals
    Ident(String),
    Int(String),
    String(String),

    // Operators
    Assign,
    Plus,
    Minus,
    Slash,
    Asterisk,
    Bang,
    LT,
    GT,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,

    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Else,
    False,
    Function,
    If,
    Let,
    Return,
    True,
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        match text {
            "let" => Self::Let,
            "fn" => Self::Function,
            "if" => Self::If,
            "return" => Self::Return,
            "true" => Self::True,
            "else" => Self::Else,
            "false" => Self::False,
            identifier => Self::Ident(identifier.to_owned()),
        }
    }
}

impl Token {
    pub fn is(&self, token_type: TokenType) -> bool {
        TokenType::from(self) == token_type
    }

    pub fn token_type(&self) -> TokenType {
        TokenType::from(self)
    }

    /// The exact source text this token was read from.
    pub fn literal(&self) -> String {
        match self {
            Self::Illegal(c) => c.to_string(),
            Self::Eof => String::new(),
            Self::Ident(s) | Self::Int(s) | Self::String(s) => s.clone(),
            Self::Assign => "=".to_owned(),
            Self::Plus => "+".to_owned(),
            Self::Minus => "-".to_owned(),
            Self::Slash => "/".to_owned(),
            Self::Asterisk => "*".to_owned(),
            Self::Bang => "!".to_owned(),
            Self::LT => "<".to_owned(),
            Self::GT => ">".to_owned(),
            Self::Eq => "==".to_owned(),
            Self::NotEq => "!=".to_owned(),
            Self::Comma => ",".to_owned(),
            Self::Semicolon => ";".to_owned(),
            Self::LParen => "(".to_owned(),
            Self::RParen => ")".to_owned(),
            Self::LBrace => "{".to_owned(),
            Self::RBrace => "}".to_owned(),
            Self::Else => "else".to_owned(),
            Self::False => "false".to_owned(),
            Self::Function => "fn".to_owned(),
            Self::If => "if".to_owned(),
            Self::Let => "let".to_owned(),
            Self::Return => "return".to_owned(),
            Self::True => "true".to_owned(),
        }
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Ident => "IDENT",
            Self::Int => "INT",
            Self::String => "STRING",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Slash => "/",
            Self::Asterisk => "*",
            Self::Bang => "!",
            Self::LT => "<",
            Self::GT => ">",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Else => "ELSE",
            Self::False => "FALSE",
            Self::Function => "FUNCTION",
            Self::If => "IF",
            Self::Let => "LET",
            Self::Return => "RETURN",
            Self::True => "TRUE",
        };
        write!(f, "{}", name)
    }
}
