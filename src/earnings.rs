//! Per-product aggregation of income events.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::events::{self, EventCategory, EventRecord};

/// Statement amounts are held at centavo precision.
pub const REAL_DECIMAL_PLACES: u32 = 2;

/// Running totals of the three income categories for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductEarnings {
    pub income: Decimal,
    pub equity_interest: Decimal,
    pub dividend: Decimal,
}

impl ProductEarnings {
    /// Add a value to a category total. The total is re-rounded to
    /// centavos after every single addition, not once at the end;
    /// summing first and rounding once can differ by a centavo.
    pub fn add(&mut self, category: EventCategory, value: Decimal) {
        let total = match category {
            EventCategory::Income => &mut self.income,
            EventCategory::EquityInterest => &mut self.equity_interest,
            EventCategory::Dividend => &mut self.dividend,
        };
        *total = (*total + value).round_dp(REAL_DECIMAL_PLACES);
    }

    #[cfg(test)]
    pub fn get(&self, category: EventCategory) -> Decimal {
        match category {
            EventCategory::Income => self.income,
            EventCategory::EquityInterest => self.equity_interest,
            EventCategory::Dividend => self.dividend,
        }
    }

    pub fn total(&self) -> Decimal {
        self.income + self.equity_interest + self.dividend
    }
}

/// Earnings per product code. Built in one pass, read-only afterwards.
#[derive(Debug, Default)]
pub struct EarningsByProduct {
    by_product: HashMap<String, ProductEarnings>,
}

impl EarningsByProduct {
    pub fn get(&self, code: &str) -> Option<&ProductEarnings> {
        self.by_product.get(code)
    }

    pub fn len(&self) -> usize {
        self.by_product.len()
    }

    /// Entries ordered by product code, for display.
    pub fn sorted(&self) -> Vec<(&str, &ProductEarnings)> {
        let mut entries: Vec<_> = self
            .by_product
            .iter()
            .map(|(code, earnings)| (code.as_str(), earnings))
            .collect();
        entries.sort_by_key(|(code, _)| *code);
        entries
    }
}

/// Aggregate income events per product in one pass over the table.
/// Rows with an unrecognized event type are excluded, not an error.
pub fn aggregate_earnings(events: &[EventRecord]) -> EarningsByProduct {
    let mut by_product: HashMap<String, ProductEarnings> = HashMap::new();
    for record in events {
        let Some(category) = EventCategory::from_label(&record.event_type) else {
            log::debug!("ignoring event type \"{}\"", record.event_type);
            continue;
        };
        let code = events::product_code(&record.product);
        by_product
            .entry(code.to_string())
            .or_default()
            .add(category, record.net_value);
    }
    EarningsByProduct { by_product }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn event(event_type: &str, product: &str, net_value: Decimal) -> EventRecord {
        EventRecord {
            event_type: event_type.to_string(),
            product: product.to_string(),
            net_value,
        }
    }

    #[test]
    fn groups_by_product_code_and_category() {
        let events = vec![
            event("Dividendo", "ABC - COMPANHIA ABC", dec!(10.00)),
            event("Dividendo", "ABC - COMPANHIA ABC SA", dec!(5.00)),
            event("Juros Sobre Capital Próprio", "ABC - COMPANHIA ABC", dec!(2.50)),
            event("Rendimento", "XYZ11 - FUNDO XYZ", dec!(1.25)),
        ];

        let earnings = aggregate_earnings(&events);
        assert_eq!(earnings.len(), 2);

        let abc = earnings.get("ABC").unwrap();
        assert_eq!(abc.dividend, dec!(15.00));
        assert_eq!(abc.equity_interest, dec!(2.50));
        assert_eq!(abc.income, dec!(0));

        let xyz = earnings.get("XYZ11").unwrap();
        assert_eq!(xyz.income, dec!(1.25));
        assert_eq!(xyz.dividend, dec!(0));
    }

    #[test]
    fn unrecognized_event_types_leave_totals_unchanged() {
        let recognized = vec![event("Dividendo", "ABC - COMPANHIA ABC", dec!(10.00))];
        let mut with_noise = recognized.clone();
        with_noise.push(event("Aluguel", "ABC - COMPANHIA ABC", dec!(99.99)));
        with_noise.push(event("dividendo", "ABC - COMPANHIA ABC", dec!(99.99)));
        with_noise.push(event("Leilão de Fração", "ABC - COMPANHIA ABC", dec!(99.99)));

        let baseline = aggregate_earnings(&recognized);
        let noisy = aggregate_earnings(&with_noise);
        assert_eq!(baseline.get("ABC"), noisy.get("ABC"));
        assert_eq!(noisy.len(), 1);
    }

    #[test]
    fn totals_are_rounded_after_every_addition() {
        // 0.005 rounds to 0.00 (banker's) on each step; a single final
        // rounding of 0.010 would give 0.01 instead.
        let events = vec![
            event("Dividendo", "ABC - COMPANHIA ABC", dec!(0.005)),
            event("Dividendo", "ABC - COMPANHIA ABC", dec!(0.005)),
        ];
        let earnings = aggregate_earnings(&events);
        assert_eq!(earnings.get("ABC").unwrap().dividend, dec!(0.00));
    }

    #[test]
    fn step_rounding_differs_from_final_rounding() {
        // Per-step: 10.004 -> 10.00, then 20.004 -> 20.00.
        // Final-only rounding of 20.008 would give 20.01.
        let events = vec![
            event("Dividendo", "ABC - COMPANHIA ABC", dec!(10.004)),
            event("Dividendo", "ABC - COMPANHIA ABC", dec!(10.004)),
        ];
        let earnings = aggregate_earnings(&events);
        assert_eq!(earnings.get("ABC").unwrap().dividend, dec!(20.00));
    }

    #[test]
    fn label_without_separator_is_its_own_code() {
        let events = vec![event("Rendimento", "XYZ", dec!(3.00))];
        let earnings = aggregate_earnings(&events);
        assert_eq!(earnings.get("XYZ").unwrap().income, dec!(3.00));
    }

    #[test]
    fn negative_values_reduce_the_total() {
        let events = vec![
            event("Dividendo", "ABC - COMPANHIA ABC", dec!(10.00)),
            event("Dividendo", "ABC - COMPANHIA ABC", dec!(-2.50)),
        ];
        let earnings = aggregate_earnings(&events);
        assert_eq!(earnings.get("ABC").unwrap().dividend, dec!(7.50));
    }

    #[test]
    fn sorted_orders_by_product_code() {
        let events = vec![
            event("Dividendo", "XYZ11 - FUNDO XYZ", dec!(1.00)),
            event("Dividendo", "ABC - COMPANHIA ABC", dec!(1.00)),
            event("Dividendo", "MMM3 - EMPRESA MMM", dec!(1.00)),
        ];
        let earnings = aggregate_earnings(&events);
        let codes: Vec<&str> = earnings.sorted().into_iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["ABC", "MMM3", "XYZ11"]);
    }

    #[test]
    fn category_totals_sum() {
        let mut totals = ProductEarnings::default();
        totals.add(EventCategory::Income, dec!(1.00));
        totals.add(EventCategory::EquityInterest, dec!(2.00));
        totals.add(EventCategory::Dividend, dec!(3.00));
        assert_eq!(totals.total(), dec!(6.00));
        assert_eq!(totals.get(EventCategory::EquityInterest), dec!(2.00));
    }
}
