//! Budget summaries and currency formatting
//!
//! The currency format reported with each budget drives how balances are
//! shown and how typed balances are cleaned up before parsing. It never
//! touches milliunit arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Milliunits;

/// Display conventions of a budget's currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub decimal_digits: u8,
    pub decimal_separator: String,
    pub group_separator: String,
    pub symbol_first: bool,
    pub currency_symbol: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            decimal_digits: 2,
            decimal_separator: ".".into(),
            group_separator: ",".into(),
            symbol_first: true,
            currency_symbol: "$".into(),
        }
    }
}

impl CurrencyFormat {
    /// Format an amount for display, e.g. `-$1,234.56` or `1.234,56€`
    pub fn format(&self, amount: Milliunits) -> String {
        let digits = u32::from(self.decimal_digits.min(3));
        let step = 10u64.pow(3 - digits);
        let units = (amount.value().unsigned_abs() + step / 2) / step;
        let scale = 10u64.pow(digits);

        let mut number = group_digits(units / scale, &self.group_separator);
        if digits > 0 {
            number.push_str(&self.decimal_separator);
            number.push_str(&format!("{:0width$}", units % scale, width = digits as usize));
        }

        let sign = if amount.is_negative() && units != 0 { "-" } else { "" };
        if self.symbol_first {
            format!("{}{}{}", sign, self.currency_symbol, number)
        } else {
            format!("{}{}{}", sign, number, self.currency_symbol)
        }
    }

    /// Turn a balance typed in this currency's conventions into the plain
    /// decimal form accepted by [`Milliunits::parse`]
    ///
    /// Strips the currency symbol and whitespace. Group separators are only
    /// removed where they split the integer part into proper groups of three,
    /// and a single decimal separator is mapped to `.`. Without a decimal
    /// separator a `.` is read as the decimal point. Input that fits none of
    /// this is returned as is for the parser to reject.
    pub fn normalize_input(&self, input: &str) -> String {
        let mut cleaned = input.trim().to_string();
        if !self.currency_symbol.is_empty() {
            cleaned = cleaned.replace(&self.currency_symbol, "");
        }
        cleaned.retain(|c| !c.is_whitespace());

        let (sign, body) = match cleaned.chars().next() {
            Some(c @ ('+' | '-')) => (c.to_string(), cleaned[1..].to_string()),
            _ => (String::new(), cleaned.clone()),
        };
        let decimal = if self.decimal_separator.is_empty() {
            "."
        } else {
            self.decimal_separator.as_str()
        };
        let group = self.group_separator.trim();

        let (integer, fraction) = match body.split_once(decimal) {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (body.as_str(), None),
        };

        let integer = if is_plain_digits(integer) {
            integer.to_string()
        } else if !group.is_empty() && group != decimal && is_grouped(integer, group) {
            // "1.234" with no decimal separator keeps its dot
            if fraction.is_none() && group == "." {
                return cleaned;
            }
            integer.replace(group, "")
        } else {
            return cleaned;
        };

        match fraction {
            Some(fraction) if fraction.chars().all(|c| c.is_ascii_digit()) => {
                format!("{}{}.{}", sign, integer, fraction)
            }
            Some(_) => cleaned,
            None => format!("{}{}", sign, integer),
        }
    }
}

fn is_plain_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// `1,234,567` style: a lead group of one to three digits, then groups of three
fn is_grouped(s: &str, separator: &str) -> bool {
    let mut groups = s.split(separator);
    let lead_ok = groups
        .next()
        .map(|g| (1..=3).contains(&g.len()) && is_plain_digits(g))
        .unwrap_or(false);
    let mut rest = 0;
    for g in groups {
        if g.len() != 3 || !is_plain_digits(g) {
            return false;
        }
        rest += 1;
    }
    lead_ok && rest > 0
}

fn group_digits(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// A budget as listed by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub id: BudgetId,
    pub name: String,
    #[serde(default)]
    pub currency_format: CurrencyFormat,
}

impl BudgetSummary {
    pub fn new(id: impl Into<BudgetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            currency_format: CurrencyFormat::default(),
        }
    }

    /// Attach a currency format
    pub fn with_currency_format(mut self, currency_format: CurrencyFormat) -> Self {
        self.currency_format = currency_format;
        self
    }
}

impl fmt::Display for BudgetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
