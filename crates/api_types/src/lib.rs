use serde::{Deserialize, Serialize};

pub mod record {
    use super::*;
    use chrono::NaiveDate;

    /// A stored record as returned by every read endpoint.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct RecordView {
        pub id: String,
        pub name: String,
        /// Signed decimal amount, negative for expenses.
        pub amount: f64,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: NaiveDate,
        pub notes: String,
        /// Public URL of the attachment, empty when there is none.
        pub attachment: String,
    }

    /// Response of insert and update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordSaved {
        pub message: String,
        pub record: RecordView,
    }

    /// Optional `?limit=` of the listing endpoints.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ListLimit {
        pub limit: Option<usize>,
    }

    /// `?s=` of the search endpoint.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SearchQuery {
        pub s: Option<String>,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Dashboard {
        /// Records dated in the current month.
        pub month_records: usize,
        /// Sum of all amounts, whatever their date.
        pub total_amount: f64,
    }
}

/// Plain `{"message": ...}` body used by delete and by every error.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub records: usize,
}
