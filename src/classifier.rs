use crate::models::{StateRegistry, UNKNOWN_STATE};

/// Decides whether a raw college entry follows the `CODE - NAME`
/// convention of the code-format state. Kept behind a trait so the
/// matching can be tightened (e.g. require a known code prefix) without
/// touching the classification pipeline.
pub trait CodeFormatRule {
    fn matches(&self, value: &str) -> bool;
}

/// The original rule: any hyphen anywhere marks a code-format entry.
/// Deliberately coarse — it also catches hyphens inside names that have
/// nothing to do with the convention.
pub struct HyphenAnywhere;

impl CodeFormatRule for HyphenAnywhere {
    fn matches(&self, value: &str) -> bool {
        value.contains('-')
    }
}

pub struct StateClassifier<'a> {
    registry: &'a StateRegistry,
    code_format_state: &'a str,
    code_format_rule: Box<dyn CodeFormatRule>,
}

impl<'a> StateClassifier<'a> {
    pub fn new(registry: &'a StateRegistry, code_format_state: &'a str) -> Self {
        Self {
            registry,
            code_format_state,
            code_format_rule: Box::new(HyphenAnywhere),
        }
    }

    pub fn with_rule(
        registry: &'a StateRegistry,
        code_format_state: &'a str,
        rule: Box<dyn CodeFormatRule>,
    ) -> Self {
        Self {
            registry,
            code_format_state,
            code_format_rule: rule,
        }
    }

    /// Maps one raw college value to exactly one state. Total: absent,
    /// blank, or unrecognized values all resolve to `Unknown`, never an
    /// error. The code-format rule takes precedence over alias and
    /// membership checks.
    pub fn classify(&self, raw: Option<&str>) -> String {
        let trimmed = match raw {
            Some(value) => value.trim(),
            None => return UNKNOWN_STATE.to_string(),
        };

        if self.code_format_rule.matches(trimmed) {
            return self.code_format_state.to_string();
        }

        let candidate = self.registry.resolve_alias(trimmed);
        if self.registry.is_known_state(candidate) {
            candidate.to_string()
        } else {
            UNKNOWN_STATE.to_string()
        }
    }

    /// Extracts the college name from a code-format entry: everything
    /// after the FIRST hyphen, trimmed. Later hyphens stay part of the
    /// name. Returns `None` for any other state or when no hyphen is
    /// present; a blank name portion comes back as `Some("")`.
    pub fn extract_college_name(&self, raw: Option<&str>, state: &str) -> Option<String> {
        if state != self.code_format_state {
            return None;
        }
        let value = raw?;
        let (_, name) = value.split_once('-')?;
        Some(name.trim().to_string())
    }
}
