//! Joins held positions with aggregated earnings into statement rows.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::classify::Classifier;
use crate::earnings::{EarningsByProduct, REAL_DECIMAL_PLACES};
use crate::positions::{self, PositionRecord};
use crate::reference::ReferenceTable;

/// CNPJ cell when the registry is loaded but has no entry for the product.
pub const CNPJ_NOT_FOUND: &str = "Não encontrado";
/// CNPJ cell when no registry source is configured at all.
pub const CNPJ_UNAVAILABLE: &str = "Em desenvolvimento...";

/// One row of the Bens e Direitos statement, in declaration column order.
#[derive(Debug, Clone, Serialize)]
pub struct AssetRow {
    #[serde(rename = "Grupo")]
    pub group: String,
    #[serde(rename = "Código")]
    pub code: String,
    #[serde(rename = "CNPJ")]
    pub cnpj: String,
    #[serde(rename = "Discriminação")]
    pub description: String,
    #[serde(rename = "Situação final")]
    pub final_position: Decimal,
    #[serde(rename = "Juros Sobre Capital Próprio")]
    pub equity_interest: Decimal,
    #[serde(rename = "Dividendo")]
    pub dividend: Decimal,
    #[serde(rename = "Rendimento")]
    pub income: Decimal,
}

/// Build statement rows from positions, preserving input order.
///
/// Positions with no remaining balance (net quantity <= 0) are dropped.
/// Earnings and registry lookups go through the normalized join key;
/// products without earnings report zeros.
pub fn assets_and_rights(
    positions: &[PositionRecord],
    earnings: &EarningsByProduct,
    reference: Option<&ReferenceTable>,
    classifier: Classifier,
) -> Vec<AssetRow> {
    let mut rows = Vec::new();
    for position in positions {
        let code = positions::join_key(&position.trading_code);

        if position.net_quantity <= Decimal::ZERO {
            log::debug!(
                "skipping {}: net quantity {}",
                position.trading_code,
                position.net_quantity
            );
            continue;
        }

        let final_position =
            (position.net_quantity * position.average_buy_price).round_dp(REAL_DECIMAL_PLACES);

        let product_earnings = earnings.get(code).copied().unwrap_or_default();

        let (kind, cnpj) = match reference {
            Some(table) => match table.lookup(code) {
                Some(info) => (Some(info.kind.as_str()), info.cnpj.clone()),
                None => (None, CNPJ_NOT_FOUND.to_string()),
            },
            None => (None, CNPJ_UNAVAILABLE.to_string()),
        };
        let classification = classifier(kind);

        rows.push(AssetRow {
            group: classification.group.to_string(),
            code: classification.code.to_string(),
            cnpj,
            description: discrimination(code, &position.institution, position.average_buy_price),
            final_position,
            equity_interest: product_earnings.equity_interest.round_dp(REAL_DECIMAL_PLACES),
            dividend: product_earnings.dividend.round_dp(REAL_DECIMAL_PLACES),
            income: product_earnings.income.round_dp(REAL_DECIMAL_PLACES),
        });
    }
    rows
}

fn discrimination(code: &str, institution: &str, average_buy_price: Decimal) -> String {
    format!(
        "Compra de {} na {} com custo médio de R$ {:.2}",
        code, institution, average_buy_price
    )
}
