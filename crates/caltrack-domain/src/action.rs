//! Action normalizer - folds raw action labels into canonical verbs

use crate::command::Command;
use crate::record::RecordKind;

/// Canonical dispatch verbs.
///
/// Raw labels arrive from the translator in an inconsistent vocabulary;
/// normalization is case/space-insensitive and many-to-one. A label outside
/// the vocabulary passes through as `Unrecognized` so dispatch can report
/// it instead of this layer raising.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create tracker entries
    Add,
    /// Create a weight record
    AddWeight,
    /// List tracker entries
    Read,
    /// List weight records
    ReadWeight,
    /// Merge field changes into a tracker entry
    Update,
    /// Merge field changes into a weight record
    UpdateWeight,
    /// Remove tracker entries
    Delete,
    /// Remove weight records
    DeleteWeight,
    /// A label outside the known vocabulary, carried through unchanged
    Unrecognized(String),
}

impl Action {
    /// Normalize a raw action label.
    pub fn normalize(raw: &str) -> Self {
        let folded = raw.trim().to_lowercase().replace(' ', "_");
        match folded.as_str() {
            "show" | "read" | "list" | "show_meals" | "list_meals" | "show_food"
            | "list_foods" | "show_activity" | "list_activity" | "show_activities"
            | "show_fluid" | "list_fluid" | "show_fluids" | "show_all" => Self::Read,
            "show_weight" | "read_weight" | "list_weight" => Self::ReadWeight,
            "add" | "add_food" | "consume" => Self::Add,
            "add_weight" => Self::AddWeight,
            "update" | "change" | "modify" => Self::Update,
            "update_weight" | "change_weight" => Self::UpdateWeight,
            "delete" | "remove" => Self::Delete,
            "delete_weight" | "remove_weight" => Self::DeleteWeight,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    /// Normalize the action of a full command.
    ///
    /// Priority override: when the command already carries an entries
    /// payload whose first element is a tracker type, the canonical action
    /// is `add` regardless of the raw label. A mangled or missing label
    /// upstream must not stop an add that clearly carries entries.
    pub fn of_command(cmd: &Command) -> Self {
        let first_entry_kind = cmd
            .entries
            .as_ref()
            .and_then(|entries| entries.first())
            .and_then(|entry| entry.get("type"))
            .and_then(|tag| tag.as_str())
            .and_then(RecordKind::parse);
        if let Some(kind) = first_entry_kind {
            if kind.is_tracker() {
                return Self::Add;
            }
        }
        Self::normalize(&cmd.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command_with(action: &str, entries: Option<serde_json::Value>) -> Command {
        let mut value = json!({ "action": action });
        if let Some(entries) = entries {
            value["entries"] = entries;
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_read_synonyms() {
        for raw in [
            "show", "read", "list", "show_meals", "list_meals", "show_food", "list_foods",
            "show_activity", "list_activity", "show_activities", "show_fluid", "list_fluid",
            "show_fluids", "show_all",
        ] {
            assert_eq!(Action::normalize(raw), Action::Read, "raw label: {}", raw);
        }
    }

    #[test]
    fn test_weight_synonyms() {
        assert_eq!(Action::normalize("show_weight"), Action::ReadWeight);
        assert_eq!(Action::normalize("list_weight"), Action::ReadWeight);
        assert_eq!(Action::normalize("change_weight"), Action::UpdateWeight);
        assert_eq!(Action::normalize("remove_weight"), Action::DeleteWeight);
    }

    #[test]
    fn test_case_and_space_insensitive() {
        assert_eq!(Action::normalize("Show Meals"), Action::Read);
        assert_eq!(Action::normalize("  ADD FOOD "), Action::Add);
        assert_eq!(Action::normalize("Remove Weight"), Action::DeleteWeight);
    }

    #[test]
    fn test_unrecognized_passes_through_unchanged() {
        assert_eq!(
            Action::normalize("Defenestrate"),
            Action::Unrecognized("Defenestrate".to_string())
        );
    }

    #[test]
    fn test_entries_payload_forces_add() {
        let cmd = command_with(
            "delete",
            Some(json!([{ "type": "food", "description": "toast", "kcal": 150 }])),
        );
        assert_eq!(Action::of_command(&cmd), Action::Add);
    }

    #[test]
    fn test_weight_entry_does_not_force_add() {
        let cmd = command_with("add_weight", Some(json!([{ "type": "weight", "kg": 80.0 }])));
        assert_eq!(Action::of_command(&cmd), Action::AddWeight);
    }

    #[test]
    fn test_empty_entries_fall_back_to_label() {
        let cmd = command_with("update", Some(json!([])));
        assert_eq!(Action::of_command(&cmd), Action::Update);
    }
}
