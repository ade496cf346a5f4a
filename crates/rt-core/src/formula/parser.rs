//! Formula parser for R-style formulas
//!
//! This parser implements the subset of R-style formula syntax needed to
//! name the rows of a regression table:
//! - Response variables: y ~ x1 + x2, several responses: y1 + y2 ~ x
//! - Intercept control: y ~ 0 + x1, y ~ x1 - 1, y ~ 1
//! - Interactions: x1:x2, log(x1):x2
//! - Function calls: log(x), poly(x, 2)
//! - Absorbed fixed effects: fe(state)
//! - Term removal: y ~ x1 + x2 - x2

use crate::formula::error::{FormulaError, FormulaResult};
use crate::formula::{Formula, Term, TermKind};
use std::iter::Peekable;
use std::str::Chars;

/// Formula parser
pub struct FormulaParser<'a> {
    chars: Peekable<Chars<'a>>,
    original: String,
    position: usize,
}

/// Sign of a right-hand side item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Plus,
    Minus,
}

impl<'a> FormulaParser<'a> {
    /// Create a new parser
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            original: input.to_string(),
            position: 0,
        }
    }

    /// Parse a formula
    pub fn parse(formula: &str) -> FormulaResult<Formula> {
        let mut parser = FormulaParser::new(formula);
        parser.parse_formula()
    }

    fn parse_formula(&mut self) -> FormulaResult<Formula> {
        self.skip_whitespace();

        if self.chars.peek().is_none() {
            return Err(FormulaError::EmptyFormula);
        }

        let response = self.parse_lhs()?;
        self.parse_tilde()?;
        let (has_intercept, terms) = self.parse_rhs()?;

        self.skip_whitespace();
        if self.chars.peek().is_some() {
            let remaining: String = self.chars.clone().collect();
            return Err(FormulaError::syntax_with_context(
                self.position,
                "Trailing characters after formula",
                format!("Unexpected: '{}'", remaining),
            ));
        }

        Ok(Formula {
            response,
            terms,
            has_intercept,
            original: self.original.clone(),
        })
    }

    /// Parse the left side of `~`, possibly several responses joined by `+`
    fn parse_lhs(&mut self) -> FormulaResult<Vec<Term>> {
        self.skip_whitespace();

        let mut response = Vec::new();
        if self.peek_char() == Some('~') {
            return Ok(response);
        }

        loop {
            response.push(self.parse_term()?);
            self.skip_whitespace();
            match self.peek_char() {
                Some('+') => {
                    self.advance();
                    self.skip_whitespace();
                }
                Some('~') => return Ok(response),
                Some(c) => {
                    return Err(FormulaError::syntax_with_context(
                        self.position,
                        "Expected '~' after response variable",
                        format!("Found '{}' instead", c),
                    ));
                }
                None => {
                    return Err(FormulaError::syntax(
                        self.position,
                        "Unexpected end of formula, expected '~'",
                    ));
                }
            }
        }
    }

    /// Parse right-hand side of formula
    fn parse_rhs(&mut self) -> FormulaResult<(bool, Vec<Term>)> {
        self.skip_whitespace();

        let mut has_intercept = true;
        let mut terms: Vec<Term> = Vec::new();

        if self.chars.peek().is_none() {
            return Ok((has_intercept, terms));
        }

        let mut sign = Sign::Plus;
        loop {
            self.skip_whitespace();

            match self.peek_char() {
                None => {
                    return Err(FormulaError::syntax(
                        self.position,
                        "Expected term after operator",
                    ));
                }
                Some('+') => {
                    return Err(FormulaError::syntax(
                        self.position,
                        "Expected term before '+'",
                    ));
                }
                _ => {}
            }

            let start = self.position;
            let term = self.parse_term()?;

            match (&term.kind, sign) {
                (TermKind::Literal(text), _) if text == "0" || text == "1" => {
                    // `+ 0` and `- 1` drop the intercept, `+ 1` and `- 0` keep it
                    has_intercept = (text == "1") == (sign == Sign::Plus);
                }
                (TermKind::Literal(text), _) => {
                    return Err(FormulaError::syntax_with_context(
                        start,
                        "Numeric literals are only allowed as function arguments",
                        format!("Found '{}'", text),
                    ));
                }
                (_, Sign::Plus) => {
                    if !terms.contains(&term) {
                        terms.push(term);
                    }
                }
                (_, Sign::Minus) => terms.retain(|t| t != &term),
            }

            self.skip_whitespace();
            sign = match self.peek_char() {
                Some('+') => Sign::Plus,
                Some('-') => Sign::Minus,
                _ => break,
            };
            self.advance();
        }

        Ok((has_intercept, terms))
    }

    /// Parse a term (can be a product of factors separated by ':')
    fn parse_term(&mut self) -> FormulaResult<Term> {
        let first_factor = self.parse_factor()?;

        self.skip_whitespace();
        if self.peek_char() != Some(':') {
            return Ok(first_factor);
        }

        let mut factors = vec![first_factor];
        while self.peek_char() == Some(':') {
            self.advance();
            self.skip_whitespace();
            factors.push(self.parse_factor()?);
            self.skip_whitespace();
        }

        if factors
            .iter()
            .any(|f| matches!(f.kind, TermKind::Literal(_)) || f.is_fixed_effect())
        {
            return Err(FormulaError::invalid_structure(
                "Interaction factors must be variables or function calls",
                "Write fixed effects as a separate term, e.g. y ~ x + fe(group)",
            ));
        }

        Ok(Term::interaction(factors))
    }

    /// Parse a factor (variable, function call, or numeric literal)
    fn parse_factor(&mut self) -> FormulaResult<Term> {
        self.skip_whitespace();

        match self.peek_char() {
            Some(c) if c.is_alphabetic() => self.parse_identifier_or_function(),
            Some(c) if c.is_ascii_digit() => self.parse_numeric_literal(),
            Some('(') => Err(FormulaError::invalid_structure(
                "Parenthesized groups are not supported",
                "Expand the group into separate terms",
            )),
            Some(c) => Err(FormulaError::syntax(
                self.position,
                format!("Unexpected character '{}' in factor", c),
            )),
            None => Err(FormulaError::syntax(
                self.position,
                "Unexpected end of input, expected factor",
            )),
        }
    }

    /// Parse an identifier or function call
    fn parse_identifier_or_function(&mut self) -> FormulaResult<Term> {
        let ident = self.parse_identifier()?;

        self.skip_whitespace();
        if self.peek_char() == Some('(') {
            self.parse_function_call(&ident)
        } else {
            Ok(Term::variable(&ident))
        }
    }

    /// Parse a function call
    fn parse_function_call(&mut self, func_name: &str) -> FormulaResult<Term> {
        self.advance(); // '('

        let mut args = Vec::new();
        loop {
            self.skip_whitespace();

            if self.peek_char() == Some(')') {
                if args.is_empty() {
                    return Err(FormulaError::syntax(
                        self.position,
                        format!("Function '{}' requires at least one argument", func_name),
                    ));
                }
                self.advance();
                break;
            }

            args.push(self.parse_term()?);

            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.advance();
                }
                Some(')') => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    return Err(FormulaError::syntax(
                        self.position,
                        format!("Expected ',' or ')', found '{}'", c),
                    ));
                }
                None => {
                    return Err(FormulaError::syntax(
                        self.position,
                        "Unexpected end of input, expected ')'",
                    ));
                }
            }
        }

        Ok(Term::function(func_name, args))
    }

    /// Parse a numeric literal such as `2` or `0.5`
    fn parse_numeric_literal(&mut self) -> FormulaResult<Term> {
        let mut literal = String::new();
        let start_pos = self.position;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || (c == '.' && !literal.contains('.')) {
                literal.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if literal.is_empty() || literal.ends_with('.') {
            return Err(FormulaError::syntax(start_pos, "Invalid numeric literal"));
        }

        Ok(Term::literal(&literal))
    }

    /// Parse an identifier
    fn parse_identifier(&mut self) -> FormulaResult<String> {
        let mut ident = String::new();
        let start_pos = self.position;

        match self.peek_char() {
            Some(c) if c.is_alphabetic() => {
                ident.push(c);
                self.advance();
            }
            Some(c) => {
                return Err(FormulaError::syntax(
                    start_pos,
                    format!("Identifier must start with a letter, found '{}'", c),
                ));
            }
            None => {
                return Err(FormulaError::syntax(
                    start_pos,
                    "Unexpected end of input, expected identifier",
                ));
            }
        }

        // Subsequent characters can be alphanumeric, underscore, or period
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' || c == '.' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        Ok(ident)
    }

    /// Parse tilde operator
    fn parse_tilde(&mut self) -> FormulaResult<()> {
        self.skip_whitespace();

        match self.peek_char() {
            Some('~') => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(FormulaError::syntax(
                self.position,
                format!("Expected '~', found '{}'", c),
            )),
            None => Err(FormulaError::syntax(
                self.position,
                "Unexpected end of formula, expected '~'",
            )),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn advance(&mut self) {
        if self.chars.next().is_some() {
            self.position += 1;
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }
}
