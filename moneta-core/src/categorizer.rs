//! Deterministic recipient → category rules.
//!
//! Priority: exact business name > partial business name > generic keywords > Other.
//! Both tables are ordered slices; the first entry that matches wins.

use crate::transaction::Category;

/// Known merchants and payer keywords, upper-case, in match priority order.
///
/// The partial-match pass walks this slice front to back, so an entry that is
/// a substring of a later one (or of a common recipient) shadows it. Reorder
/// with care.
pub const KNOWN_BUSINESSES: &[(&str, Category)] = &[
    ("STAR B", Category::FoodAndBeverages),
    ("STARBUCKS", Category::FoodAndBeverages),
    ("MCDONALDS", Category::FoodAndBeverages),
    ("KFC", Category::FoodAndBeverages),
    ("PIZZA HUT", Category::FoodAndBeverages),
    ("DOMINOS", Category::FoodAndBeverages),
    ("SWIGGY", Category::FoodAndBeverages),
    ("ZOMATO", Category::FoodAndBeverages),
    ("UBER EATS", Category::FoodAndBeverages),
    ("AMAZON", Category::Shopping),
    ("AMZN", Category::Shopping),
    ("FLIPKART", Category::Shopping),
    ("MYNTRA", Category::Shopping),
    ("BIGBASKET", Category::Shopping),
    ("NETFLIX", Category::Entertainment),
    ("SPOTIFY", Category::Entertainment),
    ("PRIME VIDEO", Category::Entertainment),
    ("YOUTUBE", Category::Entertainment),
    ("HOTSTAR", Category::Entertainment),
    ("UBER", Category::Transport),
    ("OLA", Category::Transport),
    ("RAPIDO", Category::Transport),
    ("METRO", Category::Transport),
    ("PETROL", Category::Transport),
    ("FUEL", Category::Transport),
    ("ELECTRICITY", Category::BillsAndUtilities),
    ("WATER", Category::BillsAndUtilities),
    ("GAS", Category::BillsAndUtilities),
    ("INTERNET", Category::BillsAndUtilities),
    ("MOBILE", Category::BillsAndUtilities),
    ("RECHARGE", Category::BillsAndUtilities),
    ("HOSPITAL", Category::Healthcare),
    ("PHARMACY", Category::Healthcare),
    ("CLINIC", Category::Healthcare),
    ("APOLLO", Category::Healthcare),
    ("ATM", Category::CashWithdrawal),
    ("CASH", Category::CashWithdrawal),
    ("WITHDRAWAL", Category::CashWithdrawal),
    ("SALARY", Category::Income),
    ("DIVIDEND", Category::Income),
    ("INTEREST", Category::Income),
    ("REFUND", Category::Income),
    ("CASHBACK", Category::Income),
];

/// Generic lower-case keywords, tried only when no business entry matched
pub const KEYWORD_GROUPS: &[(&[&str], Category)] = &[
    (&["restaurant", "cafe", "food", "kitchen", "dining"], Category::FoodAndBeverages),
    (&["shop", "store", "mall", "market", "retail"], Category::Shopping),
    (&["hospital", "clinic", "medical", "pharmacy", "doctor"], Category::Healthcare),
    (&["school", "college", "university", "education", "course"], Category::Education),
    (&["bank", "atm", "loan", "emi", "finance"], Category::BankingAndFinance),
];

/// Categorize a recipient name
pub fn categorize(recipient: &str) -> Category {
    let upper = recipient.to_uppercase();

    if let Some(category) = exact_business(&upper) {
        return category;
    }

    if let Some(category) = partial_business(&upper) {
        return category;
    }

    let lower = recipient.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

fn exact_business(upper: &str) -> Option<Category> {
    KNOWN_BUSINESSES
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, category)| *category)
}

/// Either side may contain the other: "AMAZON PAY" hits "AMAZON", and a
/// truncated "STAR" hits "STAR B".
fn partial_business(upper: &str) -> Option<Category> {
    KNOWN_BUSINESSES
        .iter()
        .find(|(name, _)| upper.contains(name) || name.contains(upper))
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(categorize("STARBUCKS"), Category::FoodAndBeverages);
        assert_eq!(categorize("netflix"), Category::Entertainment);
    }

    #[test]
    fn test_partial_match_recipient_contains_entry() {
        assert_eq!(categorize("AMAZON PAY"), Category::Shopping);
        assert_eq!(categorize("HP PETROL PUMP"), Category::Transport);
    }

    #[test]
    fn test_partial_match_entry_contains_recipient() {
        // "STAR" is inside "STAR B", the first entry
        assert_eq!(categorize("Star"), Category::FoodAndBeverages);
    }

    #[test]
    fn test_partial_match_uses_table_order() {
        // both "UBER EATS" and "UBER" are substrings; food is listed first
        assert_eq!(categorize("UBER EATS INDIA"), Category::FoodAndBeverages);
        assert_eq!(categorize("UBER INDIA"), Category::Transport);
    }

    #[test]
    fn test_keyword_groups() {
        assert_eq!(categorize("Green Leaf Restaurant"), Category::FoodAndBeverages);
        assert_eq!(categorize("Corner Store"), Category::Shopping);
        assert_eq!(categorize("City Medical Centre"), Category::Healthcare);
        assert_eq!(categorize("DPS School"), Category::Education);
        assert_eq!(categorize("Home Loan"), Category::BankingAndFinance);
    }

    #[test]
    fn test_keyword_group_order() {
        // "food" (first group) beats "market" (second group)
        assert_eq!(categorize("Food Market"), Category::FoodAndBeverages);
    }

    #[test]
    fn test_fallback_other() {
        assert_eq!(categorize("Unknown"), Category::Other);
        assert_eq!(categorize("J DOE"), Category::Other);
    }

    #[test]
    fn test_table_has_no_duplicates() {
        let mut names: Vec<_> = KNOWN_BUSINESSES.iter().map(|(n, _)| *n).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
