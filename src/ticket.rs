/// One ticket record. All fields are compared as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub impacted_account: String,
    pub category: String,
    pub subcategory: String,
    pub created: String,
    pub status: String,
}

impl Ticket {
    pub fn new(
        id: &str,
        subject: &str,
        impacted_account: &str,
        category: &str,
        subcategory: &str,
        created: &str,
        status: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            subject: subject.to_string(),
            impacted_account: impacted_account.to_string(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            created: created.to_string(),
            status: status.to_string(),
        }
    }

    pub fn field(&self, column: ColumnKey) -> &str {
        match column {
            ColumnKey::Id => &self.id,
            ColumnKey::Subject => &self.subject,
            ColumnKey::ImpactedAccount => &self.impacted_account,
            ColumnKey::Category => &self.category,
            ColumnKey::Subcategory => &self.subcategory,
            ColumnKey::Created => &self.created,
            ColumnKey::Status => &self.status,
        }
    }

    pub fn field_mut(&mut self, column: ColumnKey) -> &mut String {
        match column {
            ColumnKey::Id => &mut self.id,
            ColumnKey::Subject => &mut self.subject,
            ColumnKey::ImpactedAccount => &mut self.impacted_account,
            ColumnKey::Category => &mut self.category,
            ColumnKey::Subcategory => &mut self.subcategory,
            ColumnKey::Created => &mut self.created,
            ColumnKey::Status => &mut self.status,
        }
    }
}

/// A displayable and sortable ticket field.
///
/// The declaration order is the canonical column order used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKey {
    Id,
    Subject,
    ImpactedAccount,
    Category,
    Subcategory,
    Created,
    Status,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 7] = [
        ColumnKey::Id,
        ColumnKey::Subject,
        ColumnKey::ImpactedAccount,
        ColumnKey::Category,
        ColumnKey::Subcategory,
        ColumnKey::Created,
        ColumnKey::Status,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ColumnKey::Id => "id",
            ColumnKey::Subject => "subject",
            ColumnKey::ImpactedAccount => "impactedAccount",
            ColumnKey::Category => "category",
            ColumnKey::Subcategory => "subcategory",
            ColumnKey::Created => "created",
            ColumnKey::Status => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::Id => "Ticket ID",
            ColumnKey::Subject => "Subject",
            ColumnKey::ImpactedAccount => "Impacted Account",
            ColumnKey::Category => "Category",
            ColumnKey::Subcategory => "Subcategory",
            ColumnKey::Created => "Created",
            ColumnKey::Status => "Status",
        }
    }

    /// Upper case table header.
    pub fn header(self) -> String {
        self.label().to_uppercase()
    }

    pub fn from_key(key: &str) -> Option<ColumnKey> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Matches a CSV header either by key or by label, ignoring case.
    pub fn from_header(header: &str) -> Option<ColumnKey> {
        let h = header.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(h) || c.label().eq_ignore_ascii_case(h))
    }
}

/// Status filter choices. `All` applies no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Closed,
    Pending,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Open,
        StatusFilter::Closed,
        StatusFilter::Pending,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Open => "open",
            StatusFilter::Closed => "closed",
            StatusFilter::Pending => "pending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Open => "Open",
            StatusFilter::Closed => "Closed",
            StatusFilter::Pending => "Pending",
        }
    }

    pub fn from_key(key: &str) -> Option<StatusFilter> {
        Self::ALL
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn next(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Open,
            StatusFilter::Open => StatusFilter::Closed,
            StatusFilter::Closed => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::All,
        }
    }

    pub fn matches(self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            s => status.to_lowercase() == s.key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_declaration() {
        let keys: Vec<&str> = ColumnKey::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "subject",
                "impactedAccount",
                "category",
                "subcategory",
                "created",
                "status"
            ]
        );
    }

    #[test]
    fn unknown_column_key_is_none() {
        assert_eq!(ColumnKey::from_key("priority"), None);
        assert_eq!(ColumnKey::from_key("Status"), None);
        assert_eq!(ColumnKey::from_key("status"), Some(ColumnKey::Status));
    }

    #[test]
    fn header_lookup_accepts_key_and_label() {
        assert_eq!(
            ColumnKey::from_header("Impacted Account"),
            Some(ColumnKey::ImpactedAccount)
        );
        assert_eq!(
            ColumnKey::from_header("impactedaccount"),
            Some(ColumnKey::ImpactedAccount)
        );
        assert_eq!(ColumnKey::header(ColumnKey::Id), "TICKET ID");
    }

    #[test]
    fn status_filter_matching_ignores_case() {
        assert!(StatusFilter::Closed.matches("Closed"));
        assert!(StatusFilter::Closed.matches("CLOSED"));
        assert!(!StatusFilter::Closed.matches("Open"));
        assert!(StatusFilter::All.matches("anything"));
    }

    #[test]
    fn status_filter_cycles_back_to_all() {
        let mut s = StatusFilter::All;
        for _ in 0..4 {
            s = s.next();
        }
        assert_eq!(s, StatusFilter::All);
        assert_eq!(StatusFilter::from_key("Pending"), Some(StatusFilter::Pending));
        assert_eq!(StatusFilter::from_key("resolved"), None);
    }
}
