mod expression;
mod statement;
pub use expression::*;
pub use statement::*;

use crate::token::Token;
use std::fmt::{Display, Formatter};

/// Shared capability of every syntax tree node: the literal text of the token
/// that introduced it, plus a canonical source rendering through `Display`.
pub trait Node: Display {
    fn token_literal(&self) -> String;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for stmt in self.statements.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl Node for Program {
    fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Node::token_literal)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Node for Identifier {
    fn token_literal(&self) -> String {
        self.token.literal()
    }
}

impl From<Token> for Identifier {
    fn from(token: Token) -> Self {
        let value = token.literal();
        Self { token, value }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Token::Ident(name.to_owned()).into()
    }

    #[test]
    fn test_display() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                token: Token::Let,
                name: ident("myVar"),
                value: Expression::Identifier(ident("anotherVar")),
            })],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn test_display_nested() {
        let body = BlockStatement {
            token: Token::LBrace,
            statements: vec![Statement::Return(ReturnStatement {
                token: Token::Return,
                return_value: Expression::Infix(InfixExpression {
                    left: Box::new(Expression::Identifier(ident("x"))),
                    operator: Operator::Plus,
                    right: Box::new(Expression::String(StringLiteral {
                        value: "y".to_owned(),
                    })),
                }),
            })],
        };
        let call = Expression::Call(CallExpression {
            function: Box::new(Expression::Function(FunctionLiteral {
                parameters: vec![ident("x")],
                body,
            })),
            arguments: vec![
                Expression::IntegerLiteral(1),
                Expression::Prefix(PrefixExpression {
                    operator: Operator::Bang,
                    right: Box::new(Expression::Boolean(Boolean(true))),
                }),
            ],
        });

        assert_eq!(
            call.to_string(),
            "fn(x) { return (x + \"y\"); }(1, (!true))"
        );
        assert_eq!(call.token_literal(), "(");
    }

    #[test]
    fn test_empty_program() {
        let program = Program::default();
        assert_eq!(program.to_string(), "");
        assert_eq!(program.token_literal(), "");
    }
}
