//! Kotlin type syntax, as written in manifests.
//!
//! ```text
//! type     := "suspend"? params "->" type
//!           | "(" type ")" "?"?
//!           | "*"
//!           | name ("<" type ("," type)* ">")? "?"?
//! params   := "(" (param ("," param)*)? ")"
//! param    := (ident ":")? type
//! name     := ident ("." ident)*
//! ```
//!
//! Names are resolved while parsing, see [`TypeScope`].

use fakt_ir::SourceType;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// A syntax error with its byte offset in the type text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct TypeSyntaxError {
    pub message: String,
    pub offset: usize,
}

/// Simple names every Kotlin file sees without imports, mapped to their
/// packages.
const BUILTINS: &[(&str, &str)] = &[
    ("Any", "kotlin"),
    ("Array", "kotlin"),
    ("Boolean", "kotlin"),
    ("BooleanArray", "kotlin"),
    ("Byte", "kotlin"),
    ("ByteArray", "kotlin"),
    ("Char", "kotlin"),
    ("CharArray", "kotlin"),
    ("CharSequence", "kotlin"),
    ("Comparable", "kotlin"),
    ("Double", "kotlin"),
    ("DoubleArray", "kotlin"),
    ("Enum", "kotlin"),
    ("Exception", "kotlin"),
    ("Float", "kotlin"),
    ("FloatArray", "kotlin"),
    ("Int", "kotlin"),
    ("IntArray", "kotlin"),
    ("Lazy", "kotlin"),
    ("Long", "kotlin"),
    ("LongArray", "kotlin"),
    ("Nothing", "kotlin"),
    ("Number", "kotlin"),
    ("Pair", "kotlin"),
    ("Result", "kotlin"),
    ("Short", "kotlin"),
    ("ShortArray", "kotlin"),
    ("String", "kotlin"),
    ("Throwable", "kotlin"),
    ("Triple", "kotlin"),
    ("Unit", "kotlin"),
    ("ArrayList", "kotlin.collections"),
    ("Collection", "kotlin.collections"),
    ("HashMap", "kotlin.collections"),
    ("HashSet", "kotlin.collections"),
    ("Iterable", "kotlin.collections"),
    ("Iterator", "kotlin.collections"),
    ("LinkedHashMap", "kotlin.collections"),
    ("LinkedHashSet", "kotlin.collections"),
    ("List", "kotlin.collections"),
    ("Map", "kotlin.collections"),
    ("MutableCollection", "kotlin.collections"),
    ("MutableIterable", "kotlin.collections"),
    ("MutableList", "kotlin.collections"),
    ("MutableMap", "kotlin.collections"),
    ("MutableSet", "kotlin.collections"),
    ("Set", "kotlin.collections"),
    ("Sequence", "kotlin.sequences"),
];

/// Name resolution context for one member.
///
/// Lookup order: in-scope type parameters, explicit imports, Kotlin
/// built-ins, then the declaration's own package. A dotted name whose first
/// segment is lowercase is taken as already qualified.
#[derive(Clone, Debug)]
pub struct TypeScope<'a> {
    package: &'a str,
    imports: &'a [String],
    type_parameters: FxHashSet<String>,
}

impl<'a> TypeScope<'a> {
    pub fn new(package: &'a str, imports: &'a [String]) -> Self {
        TypeScope {
            package,
            imports,
            type_parameters: FxHashSet::default(),
        }
    }

    /// A nested scope with additional type parameters visible.
    #[must_use]
    pub fn with_type_parameters<'n>(&self, names: impl IntoIterator<Item = &'n str>) -> Self {
        let mut scope = self.clone();
        scope
            .type_parameters
            .extend(names.into_iter().map(str::to_string));
        scope
    }

    fn is_type_parameter(&self, name: &str) -> bool {
        self.type_parameters.contains(name)
    }

    /// Fully-qualified class name for a written (possibly dotted) name.
    pub fn resolve_class(&self, written: &str) -> String {
        let (first, rest) = match written.split_once('.') {
            Some((first, rest)) => (first, Some(rest)),
            None => (written, None),
        };
        let with_rest = |base: &str| match rest {
            Some(rest) => format!("{base}.{rest}"),
            None => base.to_string(),
        };

        if let Some(import) = self
            .imports
            .iter()
            .find(|import| import.rsplit('.').next() == Some(first))
        {
            return with_rest(import);
        }
        if let Some((_, package)) = BUILTINS.iter().find(|(name, _)| *name == first) {
            return with_rest(&format!("{package}.{first}"));
        }
        if rest.is_some() && first.chars().next().is_some_and(char::is_lowercase) {
            return written.to_string();
        }
        if self.package.is_empty() {
            written.to_string()
        } else {
            format!("{}.{written}", self.package)
        }
    }
}

/// Parse and resolve one type.
pub fn parse_type(text: &str, scope: &TypeScope<'_>) -> Result<SourceType, TypeSyntaxError> {
    let tokens = lex(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        scope,
        end: text.len(),
    };
    let ty = parser.ty()?;
    match parser.peek() {
        None => Ok(ty),
        Some(_) => Err(parser.error("unexpected trailing input")),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Ident(String),
    LParen,
    RParen,
    Lt,
    Gt,
    Comma,
    Colon,
    Dot,
    Arrow,
    Question,
    Star,
}

fn lex(text: &str) -> Result<Vec<(Token, usize)>, TypeSyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '<' => Token::Lt,
            '>' => Token::Gt,
            ',' => Token::Comma,
            ':' => Token::Colon,
            '.' => Token::Dot,
            '?' => Token::Question,
            '*' => Token::Star,
            '-' => match chars.next() {
                Some((_, '>')) => Token::Arrow,
                _ => {
                    return Err(TypeSyntaxError {
                        message: "expected `->`".to_string(),
                        offset,
                    })
                }
            },
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            other => {
                return Err(TypeSyntaxError {
                    message: format!("unexpected character `{other}`"),
                    offset,
                })
            }
        };
        tokens.push((token, offset));
    }
    Ok(tokens)
}

struct Parser<'s, 'a> {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    scope: &'s TypeScope<'a>,
    end: usize,
}

impl Parser<'_, '_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn peek_at(&self, ahead: usize) -> Option<&Token> {
        self.tokens.get(self.pos + ahead).map(|(token, _)| token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |(_, offset)| *offset)
    }

    fn error(&self, message: &str) -> TypeSyntaxError {
        TypeSyntaxError {
            message: message.to_string(),
            offset: self.offset(),
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token, what: &str) -> Result<(), TypeSyntaxError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {what}")))
        }
    }

    fn ident(&mut self) -> Result<String, TypeSyntaxError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error("expected a type name")),
        }
    }

    fn ty(&mut self) -> Result<SourceType, TypeSyntaxError> {
        if matches!(self.peek(), Some(Token::Ident(kw)) if kw == "suspend")
            && self.peek_at(1) == Some(&Token::LParen)
        {
            self.pos += 1;
            let params = self.params()?;
            return self.function(params, true);
        }

        match self.peek() {
            Some(Token::LParen) => {
                let params = self.params()?;
                if self.peek() == Some(&Token::Arrow) {
                    return self.function(params, false);
                }
                let mut params = params.into_iter();
                match (params.next(), params.next()) {
                    (Some(inner), None) => Ok(self.nullable_suffix(inner)),
                    _ => Err(self.error("expected `->` after a parameter list")),
                }
            }
            Some(Token::Star) => {
                self.pos += 1;
                Ok(SourceType::Star)
            }
            Some(Token::Ident(kw))
                if (kw == "out" || kw == "in")
                    && matches!(self.peek_at(1), Some(Token::Ident(_) | Token::LParen)) =>
            {
                Err(self.error("use-site variance is not supported"))
            }
            _ => self.named(),
        }
    }

    /// `(A, name: B)`; parameter names are dropped.
    fn params(&mut self) -> Result<Vec<SourceType>, TypeSyntaxError> {
        self.expect(&Token::LParen, "`(`")?;
        let mut params = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(params);
        }
        loop {
            if matches!(self.peek(), Some(Token::Ident(_))) && self.peek_at(1) == Some(&Token::Colon)
            {
                self.pos += 2;
            }
            params.push(self.ty()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen, "`,` or `)`")?;
            return Ok(params);
        }
    }

    fn function(
        &mut self,
        parameters: Vec<SourceType>,
        is_suspend: bool,
    ) -> Result<SourceType, TypeSyntaxError> {
        self.expect(&Token::Arrow, "`->`")?;
        let return_type = self.ty()?;
        Ok(SourceType::function(parameters, return_type, is_suspend))
    }

    fn named(&mut self) -> Result<SourceType, TypeSyntaxError> {
        let start = self.offset();
        let mut written = self.ident()?;
        while self.peek() == Some(&Token::Dot) {
            self.pos += 1;
            written.push('.');
            written.push_str(&self.ident()?);
        }

        let mut arguments = Vec::new();
        if self.eat(&Token::Lt) {
            loop {
                arguments.push(self.ty()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::Gt, "`,` or `>`")?;
                break;
            }
        }

        let ty = if self.scope.is_type_parameter(&written) {
            if !arguments.is_empty() {
                return Err(TypeSyntaxError {
                    message: format!("type parameter `{written}` cannot take type arguments"),
                    offset: start,
                });
            }
            SourceType::type_parameter(written)
        } else {
            SourceType::applied(self.scope.resolve_class(&written), arguments)
        };
        Ok(self.nullable_suffix(ty))
    }

    fn nullable_suffix(&mut self, ty: SourceType) -> SourceType {
        if self.eat(&Token::Question) {
            ty.nullable()
        } else {
            ty
        }
    }
}
