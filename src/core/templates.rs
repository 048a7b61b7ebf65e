//! Message templates for state transitions.
//!
//! Every "already on" / "now on" / "created" message the switcher prints after a
//! transition comes from the static [`TEMPLATES`] table and is rendered by
//! [`render_template`], which fills `{state}`, `{title}` and `{base}` placeholders in a
//! single pass and highlights branch names.
//!
//! # Public API
//! - [`Templates`]: Template definitions for transition messages
//! - [`TemplateContext`]: Values substituted into a template
//! - [`TEMPLATES`]: Global template instance
//! - [`render_template`]: Rendering with colors
//! - [`render_template_plain`]: Plain text rendering for testing
//! - [`strip_ansi_codes`]: Utility for removing color codes

use crate::core::state::State;
use colored::*;
use std::fmt::Write;

/// Template definitions for transition messages
pub struct Templates {
    pub model_ready: &'static str,
    pub model_now: &'static str,
    pub rewrite_ready: &'static str,
    pub rewrite_now: &'static str,
    pub rewrite_created: &'static str,
}

/// Global templates instance
pub static TEMPLATES: Templates = Templates {
    model_ready: "Already on {state} branch\n  Ready for {title} model work",
    model_now: "Now on {state} branch\n  Ready for {title} model work",
    rewrite_ready: "Already on {state} branch\n  Ready for rewrite work",
    rewrite_now: "Now on {state} branch\n  Ready for rewrite work",
    rewrite_created: "Created {state} branch from {base}\n  Ready for rewrite work",
};

impl Templates {
    /// Message for staying on the active state that is already checked out
    pub fn ready_for(&self, state: State) -> &'static str {
        match state {
            State::Rewrite => self.rewrite_ready,
            _ => self.model_ready,
        }
    }

    /// Message after switching onto an active state
    pub fn now_on(&self, state: State) -> &'static str {
        match state {
            State::Rewrite => self.rewrite_now,
            _ => self.model_now,
        }
    }
}

/// Context for template rendering
#[derive(Debug, Default)]
pub struct TemplateContext<'a> {
    pub state: Option<&'a str>,
    pub title: Option<&'a str>,
    pub base: Option<&'a str>,
}

impl<'a> TemplateContext<'a> {
    pub fn for_state(state: State) -> Self {
        TemplateContext {
            state: Some(state.branch_name()),
            title: Some(state.title()),
            base: None,
        }
    }
}

/// Render a template with context, highlighting branch names
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    let mut output = String::with_capacity(template.len() + 64);
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            output.push(ch);
            continue;
        }

        let mut placeholder = String::new();
        let mut found_closing = false;
        for next_ch in chars.by_ref() {
            if next_ch == '}' {
                found_closing = true;
                break;
            }
            placeholder.push(next_ch);
        }

        if !found_closing {
            output.push(ch);
            output.push_str(&placeholder);
            continue;
        }

        match (placeholder.as_str(), context) {
            ("state", TemplateContext { state: Some(v), .. })
            | ("base", TemplateContext { base: Some(v), .. }) => {
                let _ = write!(output, "{}", v.blue());
            }
            ("title", TemplateContext { title: Some(v), .. }) => output.push_str(v),
            _ => {
                // Unknown or missing placeholder, keep as-is
                let _ = write!(output, "{{{placeholder}}}");
            }
        }
    }

    output
}

/// Strip ANSI color codes for testing
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Render template without colors for testing
pub fn render_template_plain(template: &str, context: &TemplateContext) -> String {
    strip_ansi_codes(&render_template(template, context))
}
