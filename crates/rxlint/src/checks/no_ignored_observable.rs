//! Flags calls whose observable result is discarded.

use rxlint_syntax::{Field, NodeId, SyntaxKind};
use serde_json::Value;

use crate::pattern::Selector;

use super::{
    Check, CheckConfigError, CheckContext, CheckKind, CheckMetadata, HandlerError, Listener,
    options_object,
};

static METADATA: CheckMetadata = CheckMetadata {
    id: "no-ignored-observable",
    description: "Forbids the ignoring of observables returned by functions.",
    category: "Best Practices",
    recommended: false,
    kind: CheckKind::Problem,
    messages: &[("forbidden", "Ignoring a returned Observable is forbidden.")],
    options: &[],
};

/// `doThing();` where `doThing` returns an observable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIgnoredObservable;

impl Check for NoIgnoredObservable {
    fn metadata(&self) -> &'static CheckMetadata {
        &METADATA
    }

    fn configure(&self, options: &Value) -> Result<Vec<Listener>, CheckConfigError> {
        options_object(&METADATA, options)?;
        let statement_call = Selector::kind(SyntaxKind::CallExpression).and(Selector::field_of(
            Field::Expression,
            Selector::kind(SyntaxKind::ExpressionStatement),
        ));
        let listener = Listener::new(statement_call, check_call)
            .map_err(|error| CheckConfigError::pattern(METADATA.id, error))?;
        Ok(vec![listener])
    }
}

fn check_call(call: NodeId, cx: &mut CheckContext<'_>) -> Result<(), HandlerError> {
    if cx.oracle().could_be_observable(call) {
        cx.report(call, "forbidden", None)?;
    }
    Ok(())
}
