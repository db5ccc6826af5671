//! Embedded remote callables.
//!
//! A callable is not a closure: it is a text-substitution contract with the
//! remote query engine. It may reference only its own parameter and the
//! engine's globals, so it is carried as a parameter name plus a body
//! template rather than introspected from a live function value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CayleyError, Result};

static PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*function\s*\(([^)]*)\)").expect("param regex"));
static BODY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(.*)\}").expect("body regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// A remote-engine callable: one formal parameter and a body template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    param: String,
    body: String,
}

impl Callable {
    /// Builds a callable from a parameter name and a body template that
    /// references it.
    pub fn new(param: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            param: param.into().trim().to_owned(),
            body: body.into().trim().to_owned(),
        }
    }

    /// Parses a callable out of function-literal source text, e.g.
    /// `function(data) { g.Emit(data); }`.
    ///
    /// The source is whitespace-normalized first; the function head must
    /// carry a single parenthesized parameter, and the body must be
    /// brace-delimited. Parentheses inside the body never count as the
    /// parameter list.
    pub fn parse(source: &str) -> Result<Self> {
        let flat = normalize_whitespace(source);
        let param = PARAM_RE
            .captures(&flat)
            .map(|c| c[1].trim().to_owned())
            .ok_or_else(|| {
                CayleyError::MalformedCallable(format!(
                    "no parenthesized parameter in '{flat}'"
                ))
            })?;
        if param.is_empty() {
            return Err(CayleyError::MalformedCallable(format!(
                "empty parameter list in '{flat}'"
            )));
        }
        if param.contains(',') {
            return Err(CayleyError::MalformedCallable(format!(
                "expected a single parameter, got '({param})'"
            )));
        }
        let body = BODY_RE
            .captures(&flat)
            .map(|c| c[1].trim().to_owned())
            .ok_or_else(|| {
                CayleyError::MalformedCallable(format!("no brace-delimited body in '{flat}'"))
            })?;
        Ok(Self { param, body })
    }

    /// The formal parameter name.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// The body template.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Function-literal form, used when a verb renders the callable inline.
    pub(crate) fn source_text(&self) -> String {
        format!("function({}){{ {} }}", self.param, self.body)
    }

    /// Body with every free occurrence of the parameter renamed.
    pub(crate) fn body_renamed(&self, fresh: &str) -> Result<String> {
        let pattern = format!(r"\b{}\b", regex::escape(&self.param));
        let re = Regex::new(&pattern).map_err(|e| {
            CayleyError::MalformedCallable(format!("parameter '{}': {e}", self.param))
        })?;
        Ok(re.replace_all(&self.body, fresh).into_owned())
    }
}

fn normalize_whitespace(source: &str) -> String {
    let without_newlines = source.replace(['\r', '\n'], "");
    WS_RE.replace_all(&without_newlines, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_param_and_body() {
        let callable = Callable::parse("function(data) { g.Emit(data); }").expect("parse");
        assert_eq!(callable.param(), "data");
        assert_eq!(callable.body(), "g.Emit(data);");
    }

    #[test]
    fn parse_normalizes_whitespace() {
        let callable = Callable::parse(
            "function(data) {\n  for (var item in data) {\n    g.Emit(data[item]);\n  }\n}",
        )
        .expect("parse");
        assert_eq!(
            callable.body(),
            "for (var item in data) { g.Emit(data[item]); }"
        );
    }

    #[test]
    fn rejects_missing_parameter() {
        assert!(matches!(
            Callable::parse("function() { g.Emit(1); }"),
            Err(CayleyError::MalformedCallable(_))
        ));
    }

    #[test]
    fn body_parentheses_never_stand_in_for_the_parameter() {
        // The head is empty; the first parenthesized token lives in the body.
        let err = Callable::parse("function() { g.Emit(someValue); g.Emit(1); }").unwrap_err();
        assert!(matches!(err, CayleyError::MalformedCallable(_)));
    }

    #[test]
    fn head_whitespace_is_tolerated() {
        let callable = Callable::parse("  function (d) { g.Emit(d); }").expect("parse");
        assert_eq!(callable.param(), "d");
        assert_eq!(callable.body(), "g.Emit(d);");
    }

    #[test]
    fn rejects_multiple_parameters() {
        assert!(matches!(
            Callable::parse("function(a, b) { g.Emit(a); }"),
            Err(CayleyError::MalformedCallable(_))
        ));
    }

    #[test]
    fn rejects_missing_body() {
        assert!(matches!(
            Callable::parse("function(data) g.Emit(data);"),
            Err(CayleyError::MalformedCallable(_))
        ));
    }

    #[test]
    fn rename_respects_word_boundaries() {
        let callable = Callable::new("data", "data_x + data + metadata");
        let renamed = callable.body_renamed("cay_1").expect("rename");
        assert_eq!(renamed, "data_x + cay_1 + metadata");
    }

    #[test]
    fn rename_hits_every_occurrence() {
        let callable = Callable::new("x", "g.Emit(x); g.Emit(x);");
        let renamed = callable.body_renamed("cay_2").expect("rename");
        assert_eq!(renamed, "g.Emit(cay_2); g.Emit(cay_2);");
    }

    #[test]
    fn greedy_body_keeps_inner_braces() {
        let callable =
            Callable::parse("function(d) { if (d) { g.Emit(d); } }").expect("parse");
        assert_eq!(callable.body(), "if (d) { g.Emit(d); }");
    }
}
