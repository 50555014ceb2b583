mod tracing;

use crate::ast::{self, Expression, Statement};
use crate::token::{Token, TokenType};
use custom_error::custom_error;
use std::collections::HashMap;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{expected: TokenType, got: TokenType} = "expected next token to be {expected}, got {got} instead",
    NoPrefixParseFn{token_type: TokenType} = "no prefix parse function for {token_type} found",
    InvalidInteger{literal: String} = "could not parse \"{literal}\" as integer",
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

impl From<TokenType> for Precedence {
    fn from(token_type: TokenType) -> Self {
        match token_type {
            TokenType::Eq | TokenType::NotEq => Self::Equals,
            TokenType::LT | TokenType::GT => Self::LessGreater,
            TokenType::Plus | TokenType::Minus => Self::Sum,
            TokenType::Slash | TokenType::Asterisk => Self::Product,
            TokenType::LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

type PrefixParseFn<I> = fn(&mut Parser<I>) -> Option<Expression>;
type InfixParseFn<I> = fn(&mut Parser<I>, Expression) -> Option<Expression>;

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,

    prefix_parse_fns: HashMap<TokenType, PrefixParseFn<I>>,
    infix_parse_fns: HashMap<TokenType, InfixParseFn<I>>,

    trace_level: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(mut tokens: I) -> Self {
        let cur_token = tokens.next().unwrap_or(Token::Eof);
        let peek_token = tokens.next().unwrap_or(Token::Eof);

        let mut prefix_parse_fns: HashMap<TokenType, PrefixParseFn<I>> = HashMap::new();
        prefix_parse_fns.insert(TokenType::Ident, Self::parse_identifier);
        prefix_parse_fns.insert(TokenType::Int, Self::parse_integer_literal);
        prefix_parse_fns.insert(TokenType::String, Self::parse_string_literal);
        prefix_parse_fns.insert(TokenType::True, Self::parse_boolean);
        prefix_parse_fns.insert(TokenType::False, Self::parse_boolean);
        prefix_parse_fns.insert(TokenType::Bang, Self::parse_prefix_expression);
        prefix_parse_fns.insert(TokenType::Minus, Self::parse_prefix_expression);
        prefix_parse_fns.insert(TokenType::LParen, Self::parse_grouped_expression);
        prefix_parse_fns.insert(TokenType::If, Self::parse_if_expression);
        prefix_parse_fns.insert(TokenType::Function, Self::parse_function_literal);

        let mut infix_parse_fns: HashMap<TokenType, InfixParseFn<I>> = HashMap::new();
        for token_type in [
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Slash,
            TokenType::Asterisk,
            TokenType::Eq,
            TokenType::NotEq,
            TokenType::LT,
            TokenType::GT,
        ]
        .iter()
        {
            infix_parse_fns.insert(*token_type, Self::parse_infix_expression);
        }
        infix_parse_fns.insert(TokenType::LParen, Self::parse_call_expression);

        Self {
            tokens,
            cur_token,
            peek_token,
            errors: vec![],
            prefix_parse_fns,
            infix_parse_fns,
            trace_level: 0,
        }
    }

    fn next_token(&mut self) {
        let next = self.tokens.next().unwrap_or(Token::Eof);
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
    }

    /// Parses every statement up to end of input. Malformed statements are
    /// skipped and reported; the returned program holds the ones that parsed.
    pub fn parse_program(mut self) -> (ast::Program, Vec<ParseError>) {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt)
            }
            self.next_token();
        }

        (program, self.errors)
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type() {
            TokenType::Let => self.parse_let_statement().map(Statement::Let),
            TokenType::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expr),
        }
    }

    fn parse_let_statement(&mut self) -> Option<ast::LetStatement> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }

        let name: ast::Identifier = self.cur_token.clone().into();

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ast::ReturnStatement> {
        let token = self.cur_token.clone();

        self.next_token();
        let return_value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ReturnStatement {
            token,
            return_value,
        })
    }

    fn parse_expression_statement(&mut self) -> Option<ast::ExpressionStatement> {
        self.traced("expression_statement", |parser| {
            let token = parser.cur_token.clone();
            let expression = parser.parse_expression(Precedence::Lowest)?;

            if parser.peek_token.is(TokenType::Semicolon) {
                parser.next_token();
            }

            Some(ast::ExpressionStatement { token, expression })
        })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        self.traced("expression", |parser| {
            let prefix = match parser.prefix_parse_fns.get(&parser.cur_token.token_type()) {
                Some(prefix) => *prefix,
                None => {
                    parser.errors.push(ParseError::NoPrefixParseFn {
                        token_type: parser.cur_token.token_type(),
                    });
                    return None;
                }
            };
            let mut left = prefix(parser)?;

            while !parser.peek_token.is(TokenType::Semicolon)
                && precedence < parser.peek_precedence()
            {
                let infix = match parser.infix_parse_fns.get(&parser.peek_token.token_type()) {
                    Some(infix) => *infix,
                    None => return Some(left),
                };
                parser.next_token();
                left = infix(parser, left)?;
            }

            Some(left)
        })
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.clone().into()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        self.traced("integer_literal", |parser| {
            let literal = parser.cur_token.literal();
            match literal.parse::<i64>() {
                Ok(value) => Some(Expression::IntegerLiteral(value)),
                Err(_) => {
                    parser.errors.push(ParseError::InvalidInteger { literal });
                    None
                }
            }
        })
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::String(ast::StringLiteral {
            value: self.cur_token.literal(),
        }))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(
            self.cur_token.is(TokenType::True).into(),
        ))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        self.traced("prefix_expression", |parser| {
            let operator = ast::Operator::from_token(&parser.cur_token)?;

            parser.next_token();
            let right = parser.parse_expression(Precedence::Prefix)?;

            Some(Expression::Prefix(ast::PrefixExpression {
                operator,
                right: Box::new(right),
            }))
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        self.traced("infix_expression", |parser| {
            let operator = ast::Operator::from_token(&parser.cur_token)?;
            let precedence = parser.cur_precedence();

            parser.next_token();
            let right = parser.parse_expression(precedence)?;

            Some(Expression::Infix(ast::InfixExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            }))
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token.is(TokenType::Else) {
            self.next_token();

            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }

            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(ast::IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_block_statement(&mut self) -> ast::BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = vec![];

        self.next_token();

        while !self.cur_token.is(TokenType::RBrace) && !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        ast::BlockStatement { token, statements }
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::Function(ast::FunctionLiteral { parameters, body }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Identifier>> {
        let mut identifiers = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(identifiers);
        }

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        identifiers.push(self.cur_token.clone().into());

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            identifiers.push(self.cur_token.clone().into());
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(identifiers)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_call_arguments()?;

        Some(Expression::Call(ast::CallExpression {
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(arguments)
    }

    fn peek_precedence(&self) -> Precedence {
        self.peek_token.token_type().into()
    }

    fn cur_precedence(&self) -> Precedence {
        self.cur_token.token_type().into()
    }

    fn expect_peek(&mut self, expected: TokenType) -> bool {
        if self.peek_token.is(expected) {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenType) {
        self.errors.push(ParseError::UnexpectedToken {
            expected,
            got: self.peek_token.token_type(),
        });
    }
}
