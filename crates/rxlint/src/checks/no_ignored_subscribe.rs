//! Flags `subscribe()` calls that pass no handlers.

use rxlint_syntax::{Field, NodeId, SyntaxKind};
use serde_json::Value;

use crate::pattern::Selector;

use super::{
    Check, CheckConfigError, CheckContext, CheckKind, CheckMetadata, HandlerError, Listener,
    options_object,
};

static METADATA: CheckMetadata = CheckMetadata {
    id: "no-ignored-subscribe",
    description: "Forbids the calling of `subscribe` without specifying arguments.",
    category: "RxJS",
    recommended: false,
    kind: CheckKind::Problem,
    messages: &[("forbidden", "Calling subscribe without arguments is forbidden.")],
    options: &[],
};

/// `source$.subscribe();`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIgnoredSubscribe;

impl Check for NoIgnoredSubscribe {
    fn metadata(&self) -> &'static CheckMetadata {
        &METADATA
    }

    fn configure(&self, options: &Value) -> Result<Vec<Listener>, CheckConfigError> {
        options_object(&METADATA, options)?;
        let bare_subscribe = Selector::kind(SyntaxKind::MemberExpression)
            .and(Selector::field(Field::Property, Selector::name("subscribe")))
            .and(Selector::field_of(
                Field::Callee,
                Selector::kind(SyntaxKind::CallExpression).and(Selector::argument_count(0)),
            ));
        let listener = Listener::new(bare_subscribe, check_member)
            .map_err(|error| CheckConfigError::pattern(METADATA.id, error))?;
        Ok(vec![listener])
    }
}

fn check_member(member: NodeId, cx: &mut CheckContext<'_>) -> Result<(), HandlerError> {
    let tree = cx.tree();
    let (Some(object), Some(property)) = (
        tree.field(member, Field::Object),
        tree.field(member, Field::Property),
    ) else {
        return Ok(());
    };
    if cx.oracle().could_be_observable(object) {
        cx.report(member, "forbidden", Some(property))?;
    }
    Ok(())
}
