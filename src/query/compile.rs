//! The text compiler: turns a call log into a single-line program for the
//! remote query engine.
//!
//! The verb owning an argument list governs how that list is rendered; the
//! four collecting terminals additionally rewrite the whole program so their
//! callable body runs as continuation code inside the remote engine.

use crate::error::{CayleyError, Result};

use super::callable::Callable;
use super::ids::IdSource;
use super::path::{Call, CallArg};
use super::verb::Verb;

/// Compiles a call log. An empty log compiles to the empty string; callers
/// must treat that as an error before dispatch.
pub(crate) fn compile(calls: &[Call], ids: &dyn IdSource) -> Result<String> {
    if calls.is_empty() {
        return Ok(String::new());
    }
    let mut text = String::from("g.");
    for call in calls {
        match call.verb {
            Verb::Vertex => {
                let params = vertex_params(call)?;
                push_segment(&mut text, call.verb, &params);
            }
            Verb::Out | Verb::In => {
                let params = hop_params(call)?;
                push_segment(&mut text, call.verb, &params);
            }
            Verb::Follow | Verb::FollowR => {
                let params = morphism_params(call, ids)?;
                push_segment(&mut text, call.verb, &params);
            }
            verb => {
                let (params, splice) = generic_params(call, ids)?;
                match splice {
                    Some(callable) if params.is_empty() => {
                        splice_terminal(&mut text, verb, callable, ids)?;
                    }
                    Some(_) => {
                        return Err(CayleyError::UnsupportedArgument {
                            verb: verb.name(),
                            detail: "a spliced callable cannot be combined with other arguments"
                                .into(),
                        });
                    }
                    None => push_segment(&mut text, verb, &params),
                }
            }
        }
    }
    text.pop();
    Ok(text)
}

fn push_segment(text: &mut String, verb: Verb, params: &str) {
    text.push_str(verb.name());
    text.push('(');
    text.push_str(params);
    text.push_str(").");
}

/// Vertex selection considers only its first argument: a single string
/// renders as one quoted literal, a list flattens to comma-separated quoted
/// literals without the surrounding brackets.
fn vertex_params(call: &Call) -> Result<String> {
    match call.args.first() {
        None => Ok(String::new()),
        Some(CallArg::Str(node)) => Ok(quote(node)),
        Some(CallArg::List(nodes)) => {
            let rendered: Result<Vec<String>> = nodes.iter().map(|n| json_literal(n)).collect();
            Ok(rendered?.join(","))
        }
        Some(other) => Err(unsupported(call.verb, other)),
    }
}

/// Single-hop traversals render every argument as a JSON literal, lists
/// keeping their brackets.
fn hop_params(call: &Call) -> Result<String> {
    let mut parts = Vec::with_capacity(call.args.len());
    for arg in &call.args {
        parts.push(match arg {
            CallArg::Str(s) => json_literal(s)?,
            CallArg::Int(n) => n.to_string(),
            CallArg::List(items) => serde_json::to_string(items)?,
            other => return Err(unsupported(call.verb, other)),
        });
    }
    Ok(parts.join(","))
}

/// Morphism embedding compiles the path argument recursively and splices the
/// result in unparenthesized.
fn morphism_params(call: &Call, ids: &dyn IdSource) -> Result<String> {
    match call.args.first() {
        Some(CallArg::Path(path)) => compile(path.calls(), ids),
        _ => Err(CayleyError::UnsupportedArgument {
            verb: call.verb.name(),
            detail: "expected a morphism path".into(),
        }),
    }
}

/// Every other verb renders integers bare, strings quoted, nested paths
/// recursively compiled, and callables inline only where the verb accepts
/// them; a list where a scalar is expected is fatal.
fn generic_params<'a>(
    call: &'a Call,
    ids: &dyn IdSource,
) -> Result<(String, Option<&'a Callable>)> {
    let mut parts = Vec::new();
    let mut splice = None;
    for arg in &call.args {
        match arg {
            CallArg::Str(s) => parts.push(quote(s)),
            CallArg::Int(n) => parts.push(n.to_string()),
            CallArg::Path(path) => parts.push(compile(path.calls(), ids)?),
            CallArg::Script(callable) => {
                if call.verb.inlines_callable() {
                    parts.push(callable.source_text());
                } else if call.verb.splices_callable() {
                    splice = Some(callable);
                } else {
                    return Err(unsupported(call.verb, arg));
                }
            }
            CallArg::List(_) => return Err(unsupported(call.verb, arg)),
        }
    }
    Ok((parts.join(","), splice))
}

/// Rewrites the program so the callable body continues from a fresh binding
/// holding the materialized prefix. The remote engine does not accept a
/// parenthesized callback for these verbs; only this substitution yields
/// runnable code there.
fn splice_terminal(
    text: &mut String,
    verb: Verb,
    callable: &Callable,
    ids: &dyn IdSource,
) -> Result<()> {
    let mut fresh = ids.fresh();
    while text.contains(&fresh) || callable.body().contains(&fresh) {
        fresh = ids.fresh();
    }
    let body = callable.body_renamed(&fresh)?;
    *text = format!("var {fresh}={text}{}();{body}.", verb.name());
    Ok(())
}

fn quote(s: &str) -> String {
    format!("\"{s}\"")
}

fn json_literal(s: &str) -> Result<String> {
    Ok(serde_json::to_string(s)?)
}

fn unsupported(verb: Verb, arg: &CallArg) -> CayleyError {
    let detail = match arg {
        CallArg::Str(_) => "string",
        CallArg::Int(_) => "integer",
        CallArg::List(_) => "list",
        CallArg::Script(_) => "callable",
        CallArg::Path(_) => "path",
    };
    CayleyError::UnsupportedArgument {
        verb: verb.name(),
        detail: format!("{detail} argument cannot be rendered here"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::path::{Path, Traversal};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SequentialIds {
        counter: AtomicUsize,
    }

    impl SequentialIds {
        fn new() -> Self {
            Self {
                counter: AtomicUsize::new(0),
            }
        }
    }

    impl IdSource for SequentialIds {
        fn fresh(&self) -> String {
            let n = self.counter.fetch_add(1, Ordering::Relaxed);
            format!("cay_t{n}")
        }
    }

    fn compile_path(path: &Path) -> Result<String> {
        compile(path.calls(), &SequentialIds::new())
    }

    fn vertex(node: &str) -> Path {
        Path::seeded(Verb::Vertex, vec![CallArg::Str(node.into())])
    }

    #[test]
    fn empty_log_compiles_to_empty_text() {
        assert_eq!(compile_path(&Path::default()).expect("compile"), "");
    }

    #[test]
    fn terminal_without_arguments_has_no_trailing_separator() {
        let path = vertex("</user/a>").append(Verb::All, vec![]);
        assert_eq!(compile_path(&path).expect("compile"), "g.V(\"</user/a>\").All()");
    }

    #[test]
    fn vertex_list_flattens_without_brackets() {
        let path = Path::seeded(
            Verb::Vertex,
            vec![CallArg::List(vec!["</a>".into(), "</b>".into()])],
        )
        .append(Verb::All, vec![]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "g.V(\"</a>\",\"</b>\").All()"
        );
    }

    #[test]
    fn bare_vertex_renders_empty_parens() {
        let path = Path::seeded(Verb::Vertex, vec![]).append(Verb::GetLimit, vec![CallArg::Int(1)]);
        assert_eq!(compile_path(&path).expect("compile"), "g.V().GetLimit(1)");
    }

    #[test]
    fn hop_lists_keep_their_brackets() {
        let path = vertex("</a>")
            .out_tagged(vec!["<follows>", "<userId>"], vec!["predicate", "extra"])
            .append(Verb::All, vec![]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "g.V(\"</a>\").Out([\"<follows>\",\"<userId>\"],[\"predicate\",\"extra\"]).All()"
        );
    }

    #[test]
    fn hop_scalar_arguments_are_quoted() {
        let path = vertex("</a>")
            .out_tagged("<follows>", "predicate")
            .append(Verb::All, vec![]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "g.V(\"</a>\").Out(\"<follows>\",\"predicate\").All()"
        );
    }

    #[test]
    fn generic_verbs_mix_strings_and_integers() {
        let path = vertex("</a>")
            .has("<gender>", "F")
            .limit(2)
            .append(Verb::All, vec![]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "g.V(\"</a>\").Has(\"<gender>\",\"F\").Limit(2).All()"
        );
    }

    #[test]
    fn morphism_embeds_recursively() {
        let popular = Path::morphism().out("<follows>").r#in("<follows>");
        let path = vertex("</a>").follow(popular).append(Verb::All, vec![]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "g.V(\"</a>\").Follow(g.M().Out(\"<follows>\").In(\"<follows>\")).All()"
        );
    }

    #[test]
    fn join_verbs_embed_their_path_argument() {
        let other = Path::morphism().out("<status>");
        let path = vertex("</a>").intersect(other).append(Verb::All, vec![]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "g.V(\"</a>\").Intersect(g.M().Out(\"<status>\")).All()"
        );
    }

    #[test]
    fn for_each_renders_callable_inline() {
        let callable = Callable::new("data", "g.Emit(data);");
        let path = vertex("</a>").append(Verb::ForEach, vec![CallArg::Script(callable)]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "g.V(\"</a>\").ForEach(function(data){ g.Emit(data); })"
        );
    }

    #[test]
    fn for_each_with_limit_keeps_argument_order() {
        let callable = Callable::new("data", "g.Emit(data);");
        let path = vertex("</a>").append(
            Verb::ForEach,
            vec![CallArg::Int(1), CallArg::Script(callable)],
        );
        assert_eq!(
            compile_path(&path).expect("compile"),
            "g.V(\"</a>\").ForEach(1,function(data){ g.Emit(data); })"
        );
    }

    #[test]
    fn collecting_terminal_splices_callable_body() {
        let callable = Callable::new("data", "for (var item in data) { g.Emit(data[item]); }");
        let path = vertex("</a>").append(Verb::ToArray, vec![CallArg::Script(callable)]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "var cay_t0=g.V(\"</a>\").ToArray();\
             for (var item in cay_t0) { g.Emit(cay_t0[item]); }"
        );
    }

    #[test]
    fn splice_renames_every_parameter_occurrence() {
        let callable = Callable::new("x", "g.Emit(x); g.Emit(x);");
        let path = vertex("</a>").append(Verb::ToValue, vec![CallArg::Script(callable)]);
        let text = compile_path(&path).expect("compile");
        assert_eq!(
            text,
            "var cay_t0=g.V(\"</a>\").ToValue();g.Emit(cay_t0); g.Emit(cay_t0);"
        );
        assert!(!text.contains("g.Emit(x)"));
    }

    #[test]
    fn splice_retries_colliding_identifiers() {
        // The prefix deliberately contains the first candidate.
        let callable = Callable::new("data", "g.Emit(data);");
        let path = vertex("cay_t0").append(Verb::TagArray, vec![CallArg::Script(callable)]);
        assert_eq!(
            compile_path(&path).expect("compile"),
            "var cay_t1=g.V(\"cay_t0\").TagArray();g.Emit(cay_t1);"
        );
    }

    #[test]
    fn splice_terminal_rejects_extra_arguments() {
        let callable = Callable::new("data", "g.Emit(data);");
        let path = vertex("</a>").append(
            Verb::ToArray,
            vec![CallArg::Int(1), CallArg::Script(callable)],
        );
        assert!(matches!(
            compile_path(&path),
            Err(CayleyError::UnsupportedArgument { verb: "ToArray", .. })
        ));
    }

    #[test]
    fn list_where_scalar_expected_is_fatal() {
        let path = vertex("</a>").append(
            Verb::Has,
            vec![CallArg::List(vec!["<gender>".into(), "F".into()])],
        );
        assert!(matches!(
            compile_path(&path),
            Err(CayleyError::UnsupportedArgument { verb: "Has", .. })
        ));
    }

    #[test]
    fn follow_without_path_is_fatal() {
        let path = vertex("</a>").append(Verb::Follow, vec![CallArg::Str("oops".into())]);
        assert!(matches!(
            compile_path(&path),
            Err(CayleyError::UnsupportedArgument { verb: "Follow", .. })
        ));
    }

    #[test]
    fn path_where_vertex_expects_nodes_is_fatal() {
        let path = Path::seeded(Verb::Vertex, vec![CallArg::Path(Path::morphism())]);
        assert!(matches!(
            compile_path(&path),
            Err(CayleyError::UnsupportedArgument { verb: "V", .. })
        ));
    }
}
