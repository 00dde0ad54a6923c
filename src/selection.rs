/// An ordered set of selected string keys.
///
/// Keys are unique and keep their insertion order. Membership is never checked
/// against a catalog, unknown keys are valid members.
///
/// Two selections are equal when they hold the same keys, in any order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    keys: Vec<String>,
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.keys.len() == other.keys.len() && self.keys.iter().all(|k| other.is_selected(k))
    }
}

impl Eq for Selection {}

/// One entry of an option catalog, mapping a key to its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl Selection {
    pub fn empty() -> Self {
        Self { keys: Vec::new() }
    }

    /// Builds a selection from keys, dropping repeated keys after their first occurrence.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::empty();
        for k in keys {
            if !selection.is_selected(k.as_ref()) {
                selection.keys.push(k.as_ref().to_string());
            }
        }
        selection
    }

    /// Removes `key` if present, otherwise appends it.
    pub fn toggle(&self, key: &str) -> Selection {
        let keys = if self.is_selected(key) {
            self.keys.iter().filter(|k| *k != key).cloned().collect()
        } else {
            let mut keys = self.keys.clone();
            keys.push(key.to_string());
            keys
        };
        Selection { keys }
    }

    pub fn clear(&self) -> Selection {
        Selection::empty()
    }

    // Linear scan, selections are tiny.
    pub fn is_selected(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn display_label(&self, catalog: &[SelectOption], placeholder: &str) -> String {
        display_label(self, catalog, placeholder)
    }
}

/// Label shown on a closed selector.
///
/// Selected keys are resolved against `catalog` in catalog order. No resolved
/// label gives `placeholder`, one gives that label, more give `"<n> selected"`.
pub fn display_label(selected: &Selection, catalog: &[SelectOption], placeholder: &str) -> String {
    let labels: Vec<&str> = catalog
        .iter()
        .filter(|o| selected.is_selected(&o.value))
        .map(|o| o.label.as_str())
        .collect();

    match labels.as_slice() {
        [] => placeholder.to_string(),
        [single] => single.to_string(),
        many => format!("{} selected", many.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<SelectOption> {
        vec![
            SelectOption::new("id", "Ticket ID"),
            SelectOption::new("subject", "Subject"),
            SelectOption::new("status", "Status"),
        ]
    }

    #[test]
    fn toggle_appends_missing_key() {
        let s = Selection::from_keys(["id"]).toggle("status");
        assert_eq!(s.keys(), &["id".to_string(), "status".to_string()]);
    }

    #[test]
    fn toggle_removes_present_key_keeping_order() {
        let s = Selection::from_keys(["id", "subject", "status"]).toggle("subject");
        assert_eq!(s.keys(), &["id".to_string(), "status".to_string()]);
    }

    #[test]
    fn toggle_does_not_mutate_input() {
        let original = Selection::from_keys(["id", "subject"]);
        let _ = original.toggle("id");
        assert_eq!(original, Selection::from_keys(["id", "subject"]));
    }

    #[test]
    fn toggle_twice_is_identity() {
        let original = Selection::from_keys(["id", "subject"]);
        assert_eq!(original.toggle("status").toggle("status"), original);

        let twice = original.toggle("id").toggle("id");
        assert_eq!(twice, original);
        assert_eq!(twice.keys(), &["subject".to_string(), "id".to_string()]);
    }

    #[test]
    fn equality_ignores_order_but_not_members() {
        let a = Selection::from_keys(["id", "status"]);
        assert_eq!(a, Selection::from_keys(["status", "id"]));
        assert_ne!(a, Selection::from_keys(["id"]));
        assert_ne!(a, Selection::from_keys(["id", "subject"]));
        assert_ne!(a, Selection::from_keys(["id", "status", "subject"]));
        assert_eq!(Selection::empty(), Selection::empty().clear());
    }

    #[test]
    fn reinserted_key_moves_to_the_end() {
        let original = Selection::from_keys([
            "id",
            "subject",
            "impactedAccount",
            "category",
            "subcategory",
            "created",
            "status",
        ]);
        let s = original.toggle("status").toggle("status");
        assert_eq!(s.keys().last().map(String::as_str), Some("status"));

        let s = original.toggle("id").toggle("id");
        assert_eq!(s.keys().first().map(String::as_str), Some("subject"));
        assert_eq!(s.keys().last().map(String::as_str), Some("id"));
        assert_eq!(s.len(), 7);
    }

    #[test]
    fn toggle_accepts_keys_outside_the_catalog() {
        let s = Selection::empty().toggle("priority");
        assert!(s.is_selected("priority"));
    }

    #[test]
    fn clear_always_empties() {
        assert!(Selection::empty().clear().is_empty());
        assert!(Selection::from_keys(["id", "status"]).clear().is_empty());
    }

    #[test]
    fn from_keys_drops_duplicates() {
        let s = Selection::from_keys(["id", "status", "id"]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn label_for_empty_selection_is_placeholder() {
        let label = display_label(&Selection::empty(), &catalog(), "Select options...");
        assert_eq!(label, "Select options...");
    }

    #[test]
    fn label_for_single_selection_is_catalog_label() {
        let s = Selection::from_keys(["subject"]);
        assert_eq!(s.display_label(&catalog(), "none"), "Subject");
    }

    #[test]
    fn label_for_many_is_count() {
        let s = Selection::from_keys(["status", "id"]);
        assert_eq!(s.display_label(&catalog(), "none"), "2 selected");
        let s = s.toggle("subject");
        assert_eq!(s.display_label(&catalog(), "none"), "3 selected");
    }

    #[test]
    fn label_ignores_keys_outside_the_catalog() {
        let s = Selection::from_keys(["priority", "id"]);
        assert_eq!(s.display_label(&catalog(), "none"), "Ticket ID");
        let s = Selection::from_keys(["priority"]);
        assert_eq!(s.display_label(&catalog(), "none"), "none");
    }
}
