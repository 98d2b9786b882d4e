//! Export column mapping
//!
//! The export has a fixed set of human-readable columns in a fixed order; each
//! column knows its header label and how to render its cell from a deposit.

use crate::types::ReportedDeposit;

/// One column of the export artifact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportColumn {
    /// Transaction identifier
    TransactionId,
    /// Payer phone number
    Phone,
    /// Destination wallet
    Wallet,
    /// Blockchain network
    Network,
    /// Payment method
    PaymentMethod,
    /// Payer document (CPF/CNPJ)
    DocumentId,
    /// Transaction timestamp
    TransactionDate,
    /// Coupon code, empty when none
    Coupon,
    /// Value in the source asset
    ValueInAsset,
    /// Value in local currency
    ValueInLocalCurrency,
    /// Deposit status
    Status,
    /// Discount, rendered as a percentage string
    Discount,
    /// Collected value
    CollectedValue,
}

impl ExportColumn {
    /// Every column, in export order
    pub const ALL: [ExportColumn; 13] = [
        ExportColumn::TransactionId,
        ExportColumn::Phone,
        ExportColumn::Wallet,
        ExportColumn::Network,
        ExportColumn::PaymentMethod,
        ExportColumn::DocumentId,
        ExportColumn::TransactionDate,
        ExportColumn::Coupon,
        ExportColumn::ValueInAsset,
        ExportColumn::ValueInLocalCurrency,
        ExportColumn::Status,
        ExportColumn::Discount,
        ExportColumn::CollectedValue,
    ];

    /// Header label
    pub fn label(&self) -> &'static str {
        match self {
            ExportColumn::TransactionId => "Transaction ID",
            ExportColumn::Phone => "Phone",
            ExportColumn::Wallet => "Wallet",
            ExportColumn::Network => "Selected Network",
            ExportColumn::PaymentMethod => "Payment Method",
            ExportColumn::DocumentId => "Document ID (CPF/CNPJ)",
            ExportColumn::TransactionDate => "Transaction Date",
            ExportColumn::Coupon => "Coupon",
            ExportColumn::ValueInAsset => "Value in source asset",
            ExportColumn::ValueInLocalCurrency => "Value in local currency",
            ExportColumn::Status => "Status",
            ExportColumn::Discount => "Discount",
            ExportColumn::CollectedValue => "Collected Value",
        }
    }

    /// Cell value for `deposit`
    pub fn value(&self, deposit: &ReportedDeposit) -> String {
        match self {
            ExportColumn::TransactionId => deposit.transaction_id.clone(),
            ExportColumn::Phone => deposit.phone.clone(),
            ExportColumn::Wallet => deposit.wallet.clone(),
            ExportColumn::Network => deposit.network.clone(),
            ExportColumn::PaymentMethod => deposit.payment_method.clone(),
            ExportColumn::DocumentId => deposit.document_id.clone(),
            ExportColumn::TransactionDate => deposit.transaction_date.clone(),
            ExportColumn::Coupon => deposit.coupon.clone().unwrap_or_default(),
            ExportColumn::ValueInAsset => deposit.value_in_asset.to_string(),
            ExportColumn::ValueInLocalCurrency => deposit.value_in_local_currency.to_string(),
            ExportColumn::Status => deposit.status.to_string(),
            ExportColumn::Discount => format!("{}%", deposit.discount_percent),
            ExportColumn::CollectedValue => deposit.value_collected.to_string(),
        }
    }
}

/// Header labels of `columns`, in order
pub fn header(columns: &[ExportColumn]) -> Vec<&'static str> {
    columns.iter().map(ExportColumn::label).collect()
}

/// Cells of one deposit for `columns`, in order
pub fn render_row(deposit: &ReportedDeposit, columns: &[ExportColumn]) -> Vec<String> {
    columns.iter().map(|c| c.value(deposit)).collect()
}
