//! Transaction record produced by the SMS parser

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of money movement
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnType {
    #[default]
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

impl TxnType {
    /// Verb used when synthesizing a description
    pub fn verb(&self) -> &'static str {
        match self {
            TxnType::Debit => "Payment",
            TxnType::Credit => "Received",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Debit => "debit",
            TxnType::Credit => "credit",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of spending categories
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Food & Beverages")]
    FoodAndBeverages,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Cash Withdrawal")]
    CashWithdrawal,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Banking & Finance")]
    BankingAndFinance,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::FoodAndBeverages,
        Category::Shopping,
        Category::Entertainment,
        Category::Transport,
        Category::BillsAndUtilities,
        Category::Healthcare,
        Category::CashWithdrawal,
        Category::Income,
        Category::Education,
        Category::BankingAndFinance,
        Category::Other,
    ];

    /// Display label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndBeverages => "Food & Beverages",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Transport => "Transport",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Healthcare => "Healthcare",
            Category::CashWithdrawal => "Cash Withdrawal",
            Category::Income => "Income",
            Category::Education => "Education",
            Category::BankingAndFinance => "Banking & Finance",
            Category::Other => "Other",
        }
    }

    /// Reverse of [`Category::label`]; unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Category {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == label)
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recipient used when nothing in the message identifies the counterparty
pub const UNKNOWN_RECIPIENT: &str = "Unknown";

/// A transaction extracted from one notification message.
///
/// Every field is always populated; extraction failures fall back to the
/// defaults of [`Transaction::unparsed`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    /// Non-negative; 0 when no amount was found
    pub amount: f64,
    /// Raw date text as it appeared in the message, not normalized
    pub date: String,
    pub recipient: String,
    pub category: Category,
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    /// Available balance after the transaction, if the message reported one
    pub balance: Option<f64>,
    pub description: String,
}

impl Transaction {
    /// The record returned for text with no recognizable fields
    pub fn unparsed() -> Self {
        Self::new(TxnType::Debit, 0.0, "", UNKNOWN_RECIPIENT, Category::Other, "", None)
    }

    /// Build a transaction, deriving the description from type and recipient
    pub fn new(
        txn_type: TxnType,
        amount: f64,
        date: impl Into<String>,
        recipient: impl Into<String>,
        category: Category,
        transaction_id: impl Into<String>,
        balance: Option<f64>,
    ) -> Self {
        let recipient = recipient.into();
        Self {
            txn_type,
            amount,
            date: date.into(),
            description: describe(txn_type, &recipient),
            recipient,
            category,
            transaction_id: transaction_id.into(),
            balance,
        }
    }

    pub fn is_debit(&self) -> bool {
        self.txn_type == TxnType::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.txn_type == TxnType::Credit
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::unparsed()
    }
}

/// `"Payment to X"` for debits, `"Received to X"` for credits
pub fn describe(txn_type: TxnType, recipient: &str) -> String {
    format!("{} to {}", txn_type.verb(), recipient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsed_defaults() {
        let t = Transaction::unparsed();
        assert_eq!(t.txn_type, TxnType::Debit);
        assert_eq!(t.amount, 0.0);
        assert_eq!(t.recipient, "Unknown");
        assert_eq!(t.category, Category::Other);
        assert_eq!(t.balance, None);
        assert_eq!(t.description, "Payment to Unknown");
    }

    #[test]
    fn test_description_follows_type() {
        let t = Transaction::new(TxnType::Credit, 10.0, "", "ACME", Category::Income, "", None);
        assert_eq!(t.description, "Received to ACME");
        assert!(t.is_credit());
    }

    #[test]
    fn test_serialized_field_names() {
        let t = Transaction::new(
            TxnType::Debit,
            1250.5,
            "05-JAN-2024",
            "STARBUCKS",
            Category::FoodAndBeverages,
            "T1",
            Some(10.0),
        );
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["type"], "debit");
        assert_eq!(v["category"], "Food & Beverages");
        assert_eq!(v["transactionId"], "T1");
        assert_eq!(v["balance"], 10.0);
    }

    #[test]
    fn test_category_labels_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.label()), c);
        }
        assert_eq!(Category::from_label("Groceries"), Category::Other);
    }
}
