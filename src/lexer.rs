use crate::token::Token;

pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}

impl Lexer {
    pub fn new(input: impl Into<String>) -> Self {
        let mut lexer = Self {
            input: input.into(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::Eq
                } else {
                    Token::Assign
                }
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Asterisk,
            b'/' => Token::Slash,
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::NotEq
                } else {
                    Token::Bang
                }
            }
            b'<' => Token::LT,
            b'>' => Token::GT,
            b';' => Token::Semicolon,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b',' => Token::Comma,
            b'{' => Token::LBrace,
            b'}' => Token::RBrace,
            b'"' => Token::String(self.read_string().to_owned()),
            // An embedded NUL byte falls through to Illegal.
            0 if self.position >= self.input.len() => return Token::Eof,
            c => {
                if is_letter(c) {
                    return Token::from(self.read_identifier());
                } else if c.is_ascii_digit() {
                    return Token::Int(self.read_number().to_owned());
                } else {
                    Token::Illegal(self.read_illegal_char())
                }
            }
        };
        self.read_char();
        token
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    /// Leaves the lexer on the closing quote, or at end of input when the
    /// string is unterminated.
    fn read_string(&mut self) -> &str {
        let start = self.position + 1;
        loop {
            self.read_char();
            if self.ch == b'"' || self.position >= self.input.len() {
                break;
            }
        }
        &self.input[start..self.position.min(self.input.len())]
    }

    /// Consumes every byte of the character at the current position except
    /// the last, which `next_token` steps over.
    fn read_illegal_char(&mut self) -> char {
        let ch = self.input[self.position..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        for _ in 1..ch.len_utf8() {
            self.read_char();
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_ascii_whitespace() {
            self.read_char();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_next_token() {
        let input = r#"let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
!-/*5;
5 < 10 > 5;

if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;
10 != 9;
"foobar"
"foo bar"
"#;

        let cases = vec![
            Token::Let,
            Token::Ident("five".to_owned()),
            Token::Assign,
            Token::Int("5".to_owned()),
            Token::Semicolon,
            Token::Let,
            Token::Ident("ten".to_owned()),
            Token::Assign,
            Token::Int("10".to_owned()),
            Token::Semicolon,
            Token::Let,
            Token::Ident("add".to_owned()),
            Token::Assign,
            Token::Function,
            Token::LParen,
            Token::Ident("x".to_owned()),
            Token::Comma,
            Token::Ident("y".to_owned()),
            Token::RParen,
            Token::LBrace,
            Token::Ident("x".to_owned()),
            Token::Plus,
            Token::Ident("y".to_owned()),
            Token::Semicolon,
            Token::RBrace,
            Token::Semicolon,
            Token::Let,
            Token::Ident("result".to_owned()),
            Token::Assign,
            Token::Ident("add".to_owned()),
            Token::LParen,
            Token::Ident("five".to_owned()),
            Token::Comma,
            Token::Ident("ten".to_owned()),
            Token::RParen,
            Token::Semicolon,
            Token::Bang,
            Token::Minus,
            Token::Slash,
            Token::Asterisk,
            Token::Int("5".to_owned()),
            Token::Semicolon,
            Token::Int("5".to_owned()),
            Token::LT,
            Token::Int("10".to_owned()),
            Token::GT,
            Token::Int("5".to_owned()),
            Token::Semicolon,
            Token::If,
            Token::LParen,
            Token::Int("5".to_owned()),
            Token::LT,
            Token::Int("10".to_owned()),
            Token::RParen,
            Token::LBrace,
            Token::Return,
            Token::True,
            Token::Semicolon,
            Token::RBrace,
            Token::Else,
            Token::LBrace,
            Token::Return,
            Token::False,
            Token::Semicolon,
            Token::RBrace,
            Token::Int("10".to_owned()),
            Token::Eq,
            Token::Int("10".to_owned()),
            Token::Semicolon,
            Token::Int("10".to_owned()),
            Token::NotEq,
            Token::Int("9".to_owned()),
            Token::Semicolon,
            Token::String("foobar".to_owned()),
            Token::String("foo bar".to_owned()),
            Token::Eof,
        ];

        let lexer = Lexer::new(input);

        for (case, token) in cases.into_iter().zip(lexer) {
            assert_eq!(token, case);
        }
    }

    #[test]
    fn test_illegal_and_eof() {
        let tokens: Vec<Token> = Lexer::new("a @ b").take(5).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_owned()),
                Token::Illegal('@'),
                Token::Ident("b".to_owned()),
                Token::Eof,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_illegal_multibyte_char() {
        let tokens: Vec<Token> = Lexer::new("let é = 1;").take(6).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Let,
                Token::Illegal('é'),
                Token::Assign,
                Token::Int("1".to_owned()),
                Token::Semicolon,
                Token::Eof,
            ]
        );
        assert_eq!(tokens[1].literal(), "é");
    }

    #[test]
    fn test_unterminated_string() {
        let tokens: Vec<Token> = Lexer::new("\"abc").take(2).collect();
        assert_eq!(tokens, vec![Token::String("abc".to_owned()), Token::Eof]);
    }
}
