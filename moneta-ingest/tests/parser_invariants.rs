use moneta_core::{Category, TxnType};
use moneta_ingest::{ingest_batch, split_dump, TransactionParser};
use chrono::{TimeZone, Utc};

/// Real-world shaped messages plus junk. Every one must parse into a valid record.
const CORPUS: &[&str] = &[
    "",
    " ",
    "hello world",
    "Spent Rs. 1,250.50 at STARBUCKS on 05-JAN-2024",
    "INR 500 credited to your account, REF NO ABC123",
    "Avl bal INR 10,000.75",
    "Dear Customer, Rs.250.00 debited from A/c XX1234 on 05-01-2024 by UPI/DR/401234567890/ZOMATO LTD. Avl bal Rs 9,750.00",
    "Your a/c XX99 is credited with INR 45,000.00 on 01/03/2024 towards SALARY. Clear Bal INR 1,02,340.10",
    "Refund of Rs 349 from FLIPKART processed. TXN ID FK0099",
    "ATM WDL: INR 2,000 withdrawn at HDFC ATM MG ROAD on 3 Mar 2024",
    "₹₹₹ ... ,,, 1,2,3,4 .... Rs.",
    "Rs 9999999999999999999999999999999999999999 paid",
    "to . at . from .",
    "ünïcödé tëxt — ₹ 12 spent at CAFÉ NOIR",
    "BCCB INR UPI",
    "amount of Rs. 18.00 is due",
    "\n\n\t",
];

#[test]
fn test_every_message_yields_valid_record() {
    for text in CORPUS {
        let t = TransactionParser::parse(text);
        assert!(t.amount >= 0.0 && t.amount.is_finite(), "amount for {text:?}");
        assert!(t.balance.is_none_or(|b| b >= 0.0), "balance for {text:?}");
        assert!(!t.recipient.is_empty(), "recipient for {text:?}");
        assert!(Category::ALL.contains(&t.category), "category for {text:?}");
        assert!(!t.description.is_empty());
        let verb = match t.txn_type {
            TxnType::Debit => "Payment",
            TxnType::Credit => "Received",
        };
        assert_eq!(t.description, format!("{verb} to {}", t.recipient));
    }
}

#[test]
fn test_parse_is_idempotent() {
    for text in CORPUS {
        assert_eq!(TransactionParser::parse(text), TransactionParser::parse(text));
    }
}

#[test]
fn test_parallel_parsing_matches_sequential() {
    let sequential: Vec<_> = CORPUS.iter().map(|t| TransactionParser::parse(t)).collect();

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| CORPUS.iter().map(|t| TransactionParser::parse(t)).collect::<Vec<_>>()))
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), sequential);
    }
}

#[test]
fn test_salary_credit() {
    let t = TransactionParser::parse(CORPUS[7]);
    assert_eq!(t.txn_type, TxnType::Credit);
    assert_eq!(t.amount, 45000.0);
    assert_eq!(t.date, "01/03/2024");
}

#[test]
fn test_refund_message() {
    let t = TransactionParser::parse(CORPUS[8]);
    assert_eq!(t.txn_type, TxnType::Credit);
    assert_eq!(t.amount, 349.0);
    // the lazy "from" capture runs to the period
    assert_eq!(t.recipient, "FLIPKART processed");
    assert_eq!(t.category, Category::Shopping);
}

#[test]
fn test_dump_to_ledger_entries() {
    let dump = "\
VM-BCCBNK: Rs 120 paid to UBER on 02-02-2024. Avl bal Rs 880
AD-SALARY: INR 50,000 credited. Balance INR 50,880
";
    let now = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
    let entries = ingest_batch(&split_dump(dump), "sms", now);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].sender.as_deref(), Some("VM-BCCBNK"));
    assert_eq!(entries[0].transaction.category, Category::Transport);
    assert_eq!(entries[0].transaction.balance, Some(880.0));
    assert_eq!(entries[1].transaction.txn_type, TxnType::Credit);
    assert_eq!(entries[1].transaction.balance, Some(50880.0));
}

#[test]
fn test_parsed_record_json_field_names() {
    let v = serde_json::to_value(TransactionParser::parse(CORPUS[4])).unwrap();
    assert_eq!(v["type"], "credit");
    assert_eq!(v["transactionId"], "ABC123");
    assert_eq!(v["amount"], 500.0);
    assert!(v["balance"].is_null());
    assert!(v.get("txn_type").is_none());
    assert!(v.get("transaction_id").is_none());
}
