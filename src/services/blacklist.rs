//! Case-insensitive operation blacklists.
//!
//! Built once from configuration and never mutated afterwards; lookups take
//! `&self` only so the sets can be shared across requests without locking.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

/// Value written in place of a redacted variable.
pub const REDACTION_MARKER: &str = "(omitted)";

/// Set of uppercase-normalized operation names.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    methods: HashSet<String>,
}

impl Blacklist {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            methods: methods
                .into_iter()
                .map(|m| m.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Exact, case-insensitive membership. No prefix or wildcard matching.
    pub fn contains(&self, operation: &str) -> bool {
        self.methods.contains(&operation.to_uppercase())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Variables to hide from audit logs, per operation.
///
/// Operation names are case-insensitive; variable names are matched exactly.
#[derive(Debug, Clone, Default)]
pub struct VariableRedaction {
    by_operation: HashMap<String, HashSet<String>>,
}

impl VariableRedaction {
    pub fn new<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut by_operation: HashMap<String, HashSet<String>> = HashMap::new();
        for (operation, variables) in entries {
            by_operation
                .entry(operation.as_ref().to_uppercase())
                .or_default()
                .extend(variables.into_iter().map(Into::into));
        }
        Self { by_operation }
    }

    pub fn variables_for(&self, operation: &str) -> Option<&HashSet<String>> {
        self.by_operation.get(&operation.to_uppercase())
    }

    /// Copy of `variables` with every flagged name that is present replaced
    /// by [`REDACTION_MARKER`]. The input is left untouched.
    pub fn redact(&self, operation: &str, variables: &Map<String, Value>) -> Map<String, Value> {
        let mut redacted = variables.clone();
        if let Some(flagged) = self.variables_for(operation) {
            for name in flagged {
                if let Some(value) = redacted.get_mut(name) {
                    *value = Value::String(REDACTION_MARKER.to_string());
                }
            }
        }
        redacted
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn membership_ignores_case_both_ways() {
        let bl = Blacklist::new(["AnYmEtHoD"]);
        assert!(bl.contains("anyMethod"));
        assert!(bl.contains("ANYMETHOD"));

        let bl = Blacklist::new(["anyMethod"]);
        assert!(bl.contains("AnYmEtHoD"));
    }

    #[test]
    fn absent_name_is_never_matched() {
        let bl: Blacklist = ["login"].into_iter().collect();
        assert!(!bl.contains("log"));
        assert!(!bl.contains("login2"));
        assert!(!bl.contains(""));
        assert!(!Blacklist::default().contains("login"));
    }

    #[test]
    fn redacts_only_flagged_variables() {
        let redaction = VariableRedaction::new([("Login", vec!["password"])]);
        let vars = json!({"user": "alice", "password": "hunter2"});
        let vars = vars.as_object().unwrap();

        let redacted = redaction.redact("LOGIN", vars);

        assert_eq!(redacted["user"], json!("alice"));
        assert_eq!(redacted["password"], json!(REDACTION_MARKER));
        assert_eq!(vars["password"], json!("hunter2"));
    }

    #[test]
    fn missing_flagged_variable_is_not_inserted() {
        let redaction = VariableRedaction::new([("login", vec!["password"])]);
        let vars = json!({"user": "alice"});

        let redacted = redaction.redact("login", vars.as_object().unwrap());

        assert!(!redacted.contains_key("password"));
    }

    #[test]
    fn entries_for_same_operation_are_merged() {
        let redaction =
            VariableRedaction::new([("login", vec!["password"]), ("LOGIN", vec!["otp"])]);
        let flagged = redaction.variables_for("Login").unwrap();
        assert!(flagged.contains("password"));
        assert!(flagged.contains("otp"));
    }
}
