//! Flags `take` and `first` inside effect and epic pipelines.
//!
//! Effects (NgRx) and epics (redux-observable) are long-lived pipelines
//! built on an actions stream. A `take(1)` or `first()` placed directly in
//! such a pipeline completes the whole effect after the first action.

use regex::Regex;
use rxlint_syntax::{Field, NodeId, NodeKind, SyntaxKind};
use serde_json::Value;

use crate::pattern::Selector;

use super::{
    Check, CheckConfigError, CheckContext, CheckKind, CheckMetadata, HandlerError, Listener,
    OptionSchema, options_object, string_option,
};

/// Default pattern for names of action streams.
pub const DEFAULT_OBSERVABLE_PATTERN: &str = r"[Aa]ction(s|s\$|\$)$";

static METADATA: CheckMetadata = CheckMetadata {
    id: "no-unsafe-first",
    description: "Forbids unsafe `first`/`take` usage in effects and epics.",
    category: "Best Practices",
    recommended: false,
    kind: CheckKind::Problem,
    messages: &[(
        "forbidden",
        "Unsafe first and take usage in effects and epics are forbidden.",
    )],
    options: &[OptionSchema {
        name: "observable",
        value_type: "string",
        description: "Regular expression identifying the action observables from which \
                      effects and epics are composed.",
        default: Some(DEFAULT_OBSERVABLE_PATTERN),
    }],
};

/// `actions$.pipe(ofType(...), take(1))`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnsafeFirst;

impl Check for NoUnsafeFirst {
    fn metadata(&self) -> &'static CheckMetadata {
        &METADATA
    }

    fn configure(&self, options: &Value) -> Result<Vec<Listener>, CheckConfigError> {
        let record = options_object(&METADATA, options)?;
        let source = string_option(&METADATA, &record, "observable")?
            .unwrap_or(DEFAULT_OBSERVABLE_PATTERN);
        let observable = Regex::new(source)
            .map_err(|error| CheckConfigError::invalid_regex(METADATA.id, "observable", error))?;

        // `actions$.pipe(...)` or `this.actions$.pipe(...)`.
        let receiver = Selector::name_matches(observable.clone()).or(
            Selector::kind(SyntaxKind::MemberExpression).and(Selector::field(
                Field::Property,
                Selector::name_matches(observable),
            )),
        );
        let pipe_call = Selector::kind(SyntaxKind::CallExpression).and(Selector::field(
            Field::Callee,
            Selector::kind(SyntaxKind::MemberExpression)
                .and(Selector::field(Field::Property, Selector::name("pipe")))
                .and(Selector::field(Field::Object, receiver)),
        ));
        let listener = Listener::new(pipe_call, check_pipe)
            .map_err(|error| CheckConfigError::pattern(METADATA.id, error))?;
        Ok(vec![listener])
    }
}

fn check_pipe(call: NodeId, cx: &mut CheckContext<'_>) -> Result<(), HandlerError> {
    let tree = cx.tree();
    let Some(receiver) = tree
        .field(call, Field::Callee)
        .and_then(|callee| tree.field(callee, Field::Object))
    else {
        return Ok(());
    };
    let oracle = cx.oracle();
    if !oracle.is_reference_type(receiver) || !oracle.could_be_observable(receiver) {
        return Ok(());
    }
    for stage in tree.arguments(call).unwrap_or_default() {
        let Some(NodeKind::CallExpression { callee, .. }) = tree.kind(*stage) else {
            continue;
        };
        if tree
            .identifier_name(*callee)
            .is_some_and(is_truncating_operator)
        {
            cx.report(*stage, "forbidden", Some(*callee))?;
        }
    }
    Ok(())
}

fn is_truncating_operator(name: &str) -> bool {
    matches!(name, "take" | "first")
}
