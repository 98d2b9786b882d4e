//! Deposit JSON fixtures in the wire format of the report API

use serde_json::{Value, json};

/// One deposit record as the API sends it
pub fn deposit_json(id: &str) -> Value {
    json!({
        "transactionId": id,
        "phone": "+5511988887777",
        "coldWallet": "bc1qfixturewallet",
        "network": "lightning",
        "paymentMethod": "pix",
        "documentId": "12.345.678/0001-90",
        "transactionDate": "2024-05-10T09:30:00Z",
        "coupon": "WELCOME",
        "valueBTC": 0.002,
        "valueBRL": 650.5,
        "status": "paid",
        "discountValue": 5,
        "valueCollected": 617.975
    })
}

/// A page body with `count` deposits whose ids are `<prefix>-<index>`
pub fn page_json(prefix: &str, count: usize, total_pages: u32) -> Value {
    let data: Vec<Value> = (0..count)
        .map(|i| deposit_json(&format!("{prefix}-{i}")))
        .collect();
    json!({ "data": data, "totalPages": total_pages })
}

/// An API error body
pub fn error_json(code: &str, message: Option<&str>) -> Value {
    match message {
        Some(message) => json!({ "code": code, "message": message }),
        None => json!({ "code": code }),
    }
}
