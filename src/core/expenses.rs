//! Expense breakdown by category for a reporting period.
use crate::core::transaction::Transaction;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Number of categories reported individually before the rest is folded
/// into [`OTHER_CATEGORY`].
pub const TOP_CATEGORIES: usize = 7;
pub const OTHER_CATEGORY: &str = "Other";
pub const CASH_CATEGORY: &str = "Cash";
pub const TRANSFERS_CATEGORY: &str = "Transfers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Spending on the categories that are always reported, ranked or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedCategories {
    pub cash: Decimal,
    pub transfers: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub main: Vec<CategoryTotal>,
    pub fixed: FixedCategories,
}

/// Rounds to whole units, halves going to the even neighbour.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Summarises the expenses (negative amounts) in `transactions`.
///
/// Categories are ranked by total spend, largest first. The top
/// [`TOP_CATEGORIES`] are listed individually and the remainder is summed
/// into a trailing [`OTHER_CATEGORY`] entry when it is positive. Equal totals
/// keep the order in which their category first appeared in the input.
/// Cash and transfers are reported separately, whatever their rank.
pub fn aggregate(transactions: &[Transaction]) -> ExpenseSummary {
    // Insertion-ordered groups so that the stable sort below breaks ties by
    // first appearance.
    let mut groups: Vec<(&str, Decimal)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total = Decimal::ZERO;

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let amount = txn.amount.abs();
        total += amount;
        match index.get(txn.category.as_str()) {
            Some(&i) => groups[i].1 += amount,
            None => {
                index.insert(txn.category.as_str(), groups.len());
                groups.push((txn.category.as_str(), amount));
            }
        }
    }

    let fixed_sum = |category: &str| {
        index
            .get(category)
            .map_or(Decimal::ZERO, |&i| round_amount(groups[i].1))
    };
    let fixed = FixedCategories {
        cash: fixed_sum(CASH_CATEGORY),
        transfers: fixed_sum(TRANSFERS_CATEGORY),
    };

    groups.sort_by(|a, b| b.1.cmp(&a.1));
    let split = groups.len().min(TOP_CATEGORIES);
    let (top, rest) = groups.split_at(split);

    let mut main: Vec<CategoryTotal> = top
        .iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount: round_amount(*amount),
        })
        .collect();

    let other: Decimal = rest.iter().map(|(_, amount)| *amount).sum();
    if other > Decimal::ZERO {
        main.push(CategoryTotal {
            category: OTHER_CATEGORY.to_string(),
            amount: round_amount(other),
        });
    }

    debug!(
        categories = groups.len(),
        folded = rest.len(),
        "Aggregated expenses"
    );

    ExpenseSummary {
        total: round_amount(total),
        main,
        fixed,
    }
}
