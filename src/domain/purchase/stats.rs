use rust_decimal::Decimal;
use serde::Serialize;

use super::Purchase;

/// Aggregate spending figures over all purchases
///
/// # Tie-break
/// When several product names share the highest purchase count, the name
/// that was purchased first (in stored order) is the `top_product`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseStats {
    #[serde(with = "crate::domain::money::as_number")]
    pub total_spent: Decimal,
    pub total_items: usize,
    pub top_product: Option<String>,
    pub top_product_count: usize,
}

/// Per-product purchase figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPurchaseStats {
    pub name: String,
    pub count: usize,
    #[serde(with = "crate::domain::money::as_number")]
    pub total_spent: Decimal,
}

impl PurchaseStats {
    pub fn compute(purchases: &[Purchase]) -> Self {
        let mut top_product = None;
        let mut top_product_count = 0;

        // Strict comparison keeps the earliest group on ties
        for group in group_by_product(purchases) {
            if group.count > top_product_count {
                top_product_count = group.count;
                top_product = Some(group.name);
            }
        }

        Self {
            total_spent: purchases.iter().map(|p| p.price).sum(),
            total_items: purchases.len(),
            top_product,
            top_product_count,
        }
    }
}

impl ProductPurchaseStats {
    /// Groups purchases by product name, most purchased first
    ///
    /// Products with equal counts keep the order of their first purchase.
    pub fn compute(purchases: &[Purchase]) -> Vec<Self> {
        let mut groups = group_by_product(purchases);
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups
    }
}

/// Groups in order of first occurrence
fn group_by_product(purchases: &[Purchase]) -> Vec<ProductPurchaseStats> {
    let mut groups: Vec<ProductPurchaseStats> = Vec::new();
    for purchase in purchases {
        match groups.iter_mut().find(|g| g.name == purchase.product_name) {
            Some(group) => {
                group.count += 1;
                group.total_spent += purchase.price;
            }
            None => groups.push(ProductPurchaseStats {
                name: purchase.product_name.clone(),
                count: 1,
                total_spent: purchase.price,
            }),
        }
    }
    groups
}

/// Orders purchases by purchase date, most recent first
///
/// The sort is stable: purchases on the same date keep their relative order.
pub fn sort_by_date_desc(purchases: &mut [Purchase]) {
    purchases.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
}
