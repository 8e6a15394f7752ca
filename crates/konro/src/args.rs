//! Argument-string handling for engine construction.
//!
//! Engine arguments arrive as a single whitespace-delimited string in the
//! style of a command line. The engine loader receives them as a token
//! sequence; when the model is supplied from memory instead of a path, the
//! model-path flag is removed before the loader ever sees it.

/// Split a whitespace-delimited argument string into tokens.
pub(crate) fn tokenize(args: &str) -> Vec<String> {
    args.split_whitespace().map(str::to_string).collect()
}

/// Remove the `-m`/`--model` flag and its following value from `tokens`.
///
/// Applied when the model source is an in-memory buffer or a mapped region,
/// where a path argument would point the loader at the wrong place.
pub(crate) fn strip_model_flag(tokens: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        if token == "-m" || token == "--model" {
            // Drop the flag's value as well.
            let _ = iter.next();
            continue;
        }
        out.push(token);
    }
    out
}
