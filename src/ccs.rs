//! Reader for CCS-style process equations.
//!
//! A file is a list of equations `Name = expr`, separated by newlines or `;`.
//! Everything after `#` on a line is a comment.
//!
//! ```text
//! expr   := prefix ('+' prefix)*
//! prefix := action '.' prefix | atom
//! atom   := '0' | Name | '(' expr ')'
//! ```
//!
//! Process names start with an uppercase letter, actions with a lowercase
//! letter. The actions `tau` and `i` are internal.
//!
//! Every constant becomes a state named after it. Other states are named by
//! their term, and structurally equal terms share one state.
//!
//! # Examples
//!
//! ```
//! use spectroscopy_rs::ccs;
//!
//! let lts = ccs::parse("Div = tau.Div; P = a.(b.0 + tau.Div)").unwrap();
//! let div = lts.process("Div").unwrap();
//! assert_eq!(lts.transitions_of(div)[0].target, div);
//! assert!(lts.process("P").is_some());
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::lts::Lts;
use crate::types::ProcessId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line of the offending equation.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parses process equations into a transition system.
pub fn parse(text: &str) -> Result<Lts, ParseError> {
    let mut terms = Terms::default();
    let mut equations: Vec<Equation> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_num = i + 1;
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        for chunk in line.split(';') {
            let tokens = tokenize(chunk, line_num)?;
            if tokens.is_empty() {
                continue;
            }
            let mut parser = Parser {
                tokens,
                pos: 0,
                line: line_num,
                terms: &mut terms,
                references: Vec::new(),
            };
            let (name, body) = parser.equation()?;
            let references = parser.references;
            if equations.iter().any(|e| e.name == name) {
                return Err(ParseError::new(line_num, format!("process {} is defined twice", name)));
            }
            equations.push(Equation {
                name,
                body,
                line: line_num,
                references,
            });
        }
    }

    let defs: HashMap<String, TermId> = equations.iter().map(|e| (e.name.clone(), e.body)).collect();
    for e in &equations {
        if let Some(missing) = e.references.iter().find(|r| !defs.contains_key(*r)) {
            return Err(ParseError::new(e.line, format!("undefined process {}", missing)));
        }
    }
    for e in &equations {
        if let Some(cycle) = unguarded_cycle(&terms, &defs, &e.name) {
            return Err(ParseError::new(
                e.line,
                format!("unguarded recursion through {}", cycle.join(" -> ")),
            ));
        }
    }

    let roots: Vec<TermId> = equations
        .iter()
        .map(|e| terms.lookup(&Term::Name(e.name.clone())))
        .collect();
    let mut builder = LtsBuilder {
        terms: &terms,
        defs: &defs,
        lts: Lts::new(),
        states: HashMap::new(),
    };
    for root in roots {
        builder.state(root);
    }
    log::debug!(
        "Parsed {} equations into {} states and {} transitions",
        equations.len(),
        builder.lts.num_states(),
        builder.lts.num_transitions()
    );
    Ok(builder.lts)
}

struct Equation {
    name: String,
    body: TermId,
    line: usize,
    references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Zero,
    Dot,
    Plus,
    Eq,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "'{}'", s),
            Token::Zero => write!(f, "'0'"),
            Token::Dot => write!(f, "'.'"),
            Token::Plus => write!(f, "'+'"),
            Token::Eq => write!(f, "'='"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

fn tokenize(input: &str, line: usize) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0' => {
                chars.next();
                tokens.push(Token::Zero);
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Eq);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '\'' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            _ => return Err(ParseError::new(line, format!("unexpected character '{}'", c))),
        }
    }
    Ok(tokens)
}

fn is_process_name(ident: &str) -> bool {
    ident.starts_with(|c: char| c.is_uppercase())
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct TermId(usize);

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
enum Term {
    Nil,
    Prefix(String, TermId),
    /// At least two distinct summands, none of them `0` or a choice.
    Choice(Vec<TermId>),
    Name(String),
}

/// Hash-consed term storage.
#[derive(Debug, Default)]
struct Terms {
    terms: Vec<Term>,
    index: HashMap<Term, TermId>,
}

impl Terms {
    fn get(&self, id: TermId) -> &Term {
        &self.terms[id.0]
    }

    fn lookup(&mut self, term: &Term) -> TermId {
        if let Some(&id) = self.index.get(term) {
            return id;
        }
        let id = TermId(self.terms.len());
        self.terms.push(term.clone());
        self.index.insert(term.clone(), id);
        id
    }

    fn nil(&mut self) -> TermId {
        self.lookup(&Term::Nil)
    }

    fn prefix(&mut self, action: &str, then: TermId) -> TermId {
        let label = if action == "i" { "tau" } else { action };
        self.lookup(&Term::Prefix(label.to_string(), then))
    }

    fn choice(&mut self, summands: Vec<TermId>) -> TermId {
        let mut flat = Vec::new();
        for s in summands {
            match self.get(s) {
                Term::Nil => {}
                Term::Choice(inner) => flat.extend(inner.iter().copied()),
                _ => flat.push(s),
            }
        }
        flat.sort_unstable_by_key(|t| t.0);
        flat.dedup();
        match flat.len() {
            0 => self.nil(),
            1 => flat[0],
            _ => self.lookup(&Term::Choice(flat)),
        }
    }

    fn display(&self, id: TermId) -> String {
        match self.get(id) {
            Term::Nil => "0".to_string(),
            Term::Prefix(a, then) => match self.get(*then) {
                Term::Choice(_) => format!("{}.({})", a, self.display(*then)),
                _ => format!("{}.{}", a, self.display(*then)),
            },
            Term::Choice(summands) => summands
                .iter()
                .map(|&s| self.display(s))
                .collect::<Vec<_>>()
                .join(" + "),
            Term::Name(name) => name.clone(),
        }
    }
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    line: usize,
    terms: &'a mut Terms,
    references: Vec<String>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.line, message)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        match self.next() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(self.error(format!("expected {}, found {}", expected, t))),
            None => Err(self.error(format!("expected {}, found end of equation", expected))),
        }
    }

    fn equation(&mut self) -> Result<(String, TermId), ParseError> {
        let name = match self.next() {
            Some(Token::Ident(name)) if is_process_name(&name) => name,
            Some(t) => return Err(self.error(format!("expected process name, found {}", t))),
            None => return Err(self.error("expected process name")),
        };
        self.expect(Token::Eq)?;
        let body = self.expr()?;
        if let Some(t) = self.peek() {
            return Err(self.error(format!("unexpected {} after expression", t)));
        }
        Ok((name, body))
    }

    fn expr(&mut self) -> Result<TermId, ParseError> {
        let mut summands = vec![self.prefix()?];
        while self.peek() == Some(&Token::Plus) {
            self.next();
            summands.push(self.prefix()?);
        }
        Ok(self.terms.choice(summands))
    }

    fn prefix(&mut self) -> Result<TermId, ParseError> {
        match self.peek() {
            Some(Token::Ident(ident)) if !is_process_name(ident) => {
                let action = ident.clone();
                self.next();
                self.expect(Token::Dot)?;
                let then = self.prefix()?;
                Ok(self.terms.prefix(&action, then))
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<TermId, ParseError> {
        match self.next() {
            Some(Token::Zero) => Ok(self.terms.nil()),
            Some(Token::Ident(name)) => {
                self.references.push(name.clone());
                Ok(self.terms.lookup(&Term::Name(name)))
            }
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(t) => Err(self.error(format!("expected process, found {}", t))),
            None => Err(self.error("expected process, found end of equation")),
        }
    }
}

/// Names reachable from a term without passing an action prefix.
fn unguarded_names(terms: &Terms, id: TermId, out: &mut Vec<String>) {
    match terms.get(id) {
        Term::Nil | Term::Prefix(..) => {}
        Term::Choice(summands) => {
            for &s in summands {
                unguarded_names(terms, s, out);
            }
        }
        Term::Name(name) => out.push(name.clone()),
    }
}

/// Finds a chain of unguarded references leading from `start` back to itself.
fn unguarded_cycle(terms: &Terms, defs: &HashMap<String, TermId>, start: &str) -> Option<Vec<String>> {
    let mut visited = HashSet::new();
    let mut stack = vec![vec![start.to_string()]];
    while let Some(path) = stack.pop() {
        let last = &path[path.len() - 1];
        let mut next = Vec::new();
        unguarded_names(terms, defs[last], &mut next);
        for name in next {
            let mut extended = path.clone();
            extended.push(name.clone());
            if name == start {
                return Some(extended);
            }
            if visited.insert(name) {
                stack.push(extended);
            }
        }
    }
    None
}

struct LtsBuilder<'a> {
    terms: &'a Terms,
    defs: &'a HashMap<String, TermId>,
    lts: Lts,
    states: HashMap<TermId, ProcessId>,
}

impl LtsBuilder<'_> {
    fn state(&mut self, id: TermId) -> ProcessId {
        if let Some(&s) = self.states.get(&id) {
            return s;
        }
        let s = self.lts.add_state(self.terms.display(id));
        self.states.insert(id, s);
        for (label, target) in self.steps(id) {
            let action = self.lts.action(&label);
            let t = self.state(target);
            self.lts.add_transition(s, action, t);
        }
        s
    }

    fn steps(&self, id: TermId) -> Vec<(String, TermId)> {
        match self.terms.get(id) {
            Term::Nil => Vec::new(),
            Term::Prefix(a, then) => vec![(a.clone(), *then)],
            Term::Choice(summands) => summands.iter().flat_map(|&s| self.steps(s)).collect(),
            Term::Name(name) => self.steps(self.defs[name]),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::Action;

    fn targets(lts: &Lts, name: &str) -> Vec<String> {
        let p = lts.process(name).unwrap();
        let mut out: Vec<String> = lts
            .transitions_of(p)
            .iter()
            .map(|t| format!("{}:{}", lts.label(t.action), lts.name(t.target)))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_simple() {
        let lts = parse("P = a.b.0 + c.0").unwrap();
        assert_eq!(targets(&lts, "P"), vec!["a:b.0", "c:0"]);
        assert_eq!(targets(&lts, "b.0"), vec!["b:0"]);
        assert_eq!(targets(&lts, "0"), Vec::<String>::new());
    }

    #[test]
    fn test_sharing() {
        let lts = parse("P = a.c.0 + b.c.0\nQ = c.0").unwrap();
        // `c.0` is one state, reachable from both P's summands; Q is its own state.
        assert_eq!(targets(&lts, "P"), vec!["a:c.0", "b:c.0"]);
        assert_eq!(targets(&lts, "Q"), vec!["c:0"]);
        assert_eq!(lts.num_states(), 4);
    }

    #[test]
    fn test_tau() {
        let lts = parse("P = tau.0 + i.a.0").unwrap();
        let p = lts.process("P").unwrap();
        assert!(lts.transitions_of(p).iter().all(|t| t.action == Action::TAU));
        assert_eq!(lts.transitions_of(p).len(), 2);
    }

    #[test]
    fn test_recursion() {
        let lts = parse("Div = tau.Div\nP = a.P + b.(Q + 0)\nQ = c.0").unwrap();
        assert_eq!(targets(&lts, "Div"), vec!["tau:Div"]);
        assert_eq!(targets(&lts, "P"), vec!["a:P", "b:Q"]);
    }

    #[test]
    fn test_unguarded_choice_inherits_transitions() {
        let lts = parse("P = Q + a.0; Q = b.0").unwrap();
        assert_eq!(targets(&lts, "P"), vec!["a:0", "b:0"]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# scenario\n\nP = a.0 # trailing\n  ;  ; Q = 0\n";
        let lts = parse(text).unwrap();
        assert!(lts.process("P").is_some());
        assert!(lts.process("Q").is_some());
    }

    #[test]
    fn test_undefined_name() {
        let err = parse("P = a.0\nQ = a.R").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("undefined process R"));
    }

    #[test]
    fn test_unguarded_recursion() {
        let err = parse("P = Q + a.0\nQ = P").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("unguarded"));
        assert!(parse("P = P").is_err());
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse("P = a").unwrap_err().line, 1);
        assert!(parse("P = a.0 +").is_err());
        assert!(parse("p = a.0").is_err());
        assert!(parse("P = (a.0").is_err());
        assert!(parse("P = a.0 b.0").is_err());
        assert!(parse("P = a.0 & b.0").unwrap_err().message.contains("unexpected character"));
        assert!(parse("P = 0\nP = a.0").unwrap_err().message.contains("defined twice"));
    }
}
