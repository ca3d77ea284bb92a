//! Variable bindings and template rendering.

use super::{Segment, Template};
use std::collections::HashMap;
use std::fmt;

/// What to emit for a variable that has no binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnboundVariable {
    /// Emit the placeholder unchanged, e.g. `{topic}`.
    #[default]
    Keep,
    /// Emit nothing.
    Empty,
}

type Producer<'a> = Box<dyn Fn() -> String + Send + Sync + 'a>;

/// Variable name to value producer mapping used for rendering.
#[derive(Default)]
pub struct Bindings<'a> {
    producers: HashMap<String, Producer<'a>>,
    unbound: UnboundVariable,
}

impl<'a> Bindings<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable to a producer invoked once per occurrence.
    pub fn bind(
        mut self,
        name: impl Into<String>,
        producer: impl Fn() -> String + Send + Sync + 'a,
    ) -> Self {
        self.producers.insert(name.into(), Box::new(producer));
        self
    }

    /// Choose the policy for variables without a binding.
    pub fn unbound(mut self, policy: UnboundVariable) -> Self {
        self.unbound = policy;
        self
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.producers.contains_key(name)
    }

    pub(super) fn render(&self, template: &Template) -> String {
        let mut out = String::with_capacity(template.raw().len());
        for segment in template.segments() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => match self.producers.get(name) {
                    Some(producer) => out.push_str(&producer()),
                    None if self.unbound == UnboundVariable::Keep => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                    None => {}
                },
            }
        }
        out
    }
}

impl fmt::Debug for Bindings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.producers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Bindings")
            .field("names", &names)
            .field("unbound", &self.unbound)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn substitutes_bound_variables() {
        let template = Template::parse("{topic}/{partition}/").expect("parse");
        let bindings = Bindings::new()
            .bind("topic", || "orders".to_string())
            .bind("partition", || "7".to_string());
        assert_eq!(template.render(&bindings), "orders/7/");
    }

    #[test]
    fn unbound_policy_controls_unknown_variables() {
        let template = Template::parse("a/{unknown}/b").expect("parse");
        assert_eq!(template.render(&Bindings::new()), "a/{unknown}/b");
        assert_eq!(
            template.render(&Bindings::new().unbound(UnboundVariable::Empty)),
            "a//b"
        );
    }

    #[test]
    fn producer_runs_per_occurrence_and_render_is_stable() {
        let calls = AtomicUsize::new(0);
        let template = Template::parse("{x}-{x}").expect("parse");
        let bindings = Bindings::new().bind("x", || {
            calls.fetch_add(1, Ordering::SeqCst);
            "v".to_string()
        });
        assert_eq!(template.render(&bindings), "v-v");
        assert_eq!(template.render(&bindings), "v-v");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
