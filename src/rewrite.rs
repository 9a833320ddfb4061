//! Rewrites entity references embedded in OWL functional-syntax axiom text.
//!
//! Two lexical forms are replaced:
//!
//! - bracketed absolute references `<...>` (no nested angle brackets), replaced
//!   brackets included by the text-seeded id of the inner IRI under
//!   [`REFERENCE_NAMESPACE`];
//! - colon-prefixed legacy codes `:609096000` or `:40316-2`, where the code run
//!   is replaced by the resolver's content-addressed id and the colon is kept.
//!
//! Bracketed references take precedence: a code inside brackets is part of the
//! reference and is never rewritten on its own. Both forms are matched in one
//! left-to-right scan over the input, so substituted ids are never rescanned.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::constants::identity::REFERENCE_NAMESPACE;
use crate::errors::IdentityError;
use crate::identity::{IdentityResolver, derive_from_text};

const REFERENCE_PATTERN: &str = r"<(?P<iri>[^<>]+)>|:(?P<code>[0-9]+(?:-[0-9]+)*)";

fn reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(REFERENCE_PATTERN).expect("reference pattern is valid"))
}

/// Rewrite every embedded reference in `text`.
///
/// Returns the input borrowed when nothing matched.
pub fn rewrite_references<'a>(
    text: &'a str,
    resolver: &IdentityResolver,
) -> Result<Cow<'a, str>, IdentityError> {
    let regex = reference_regex();
    let mut matches = regex.captures_iter(text).peekable();
    if matches.peek().is_none() {
        return Ok(Cow::Borrowed(text));
    }

    let mut rewritten = String::with_capacity(text.len() + 64);
    let mut last = 0;
    for captures in matches {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        rewritten.push_str(&text[last..whole.start()]);
        rewritten.push_str(&substitute(&captures, resolver)?);
        last = whole.end();
    }
    rewritten.push_str(&text[last..]);
    Ok(Cow::Owned(rewritten))
}

fn substitute(captures: &Captures<'_>, resolver: &IdentityResolver) -> Result<String, IdentityError> {
    if let Some(iri) = captures.name("iri") {
        return Ok(derive_from_text(&REFERENCE_NAMESPACE, iri.as_str()).to_string());
    }
    match captures.name("code") {
        Some(code) => Ok(format!(":{}", resolver.resolve_code(code.as_str())?)),
        None => Ok(captures[0].to_string()),
    }
}
