//! Plain-text rendering of conversion results.

use ratequote_common::RateGroup;
use ratequote_feed::PairExchanger;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a converted value for display.
///
/// Whole numbers print without decimals; everything else is rounded half away
/// from zero to two decimals, and a `.00` left over after rounding is dropped.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }

    let s = match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_string(),
        None => format!("{:.2}", value),
    };
    let s = pad_two_decimals(s);
    match s.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}

fn pad_two_decimals(s: String) -> String {
    match s.split_once('.') {
        None => format!("{}.00", s),
        Some((whole, frac)) if frac.len() < 2 => format!("{}.{:0<2}", whole, frac),
        Some(_) => s,
    }
}

/// One line per direction: `<amount> <src> - <buy> (buy) <sell> (sell) <dst>`.
///
/// Returns `None` when either side has no result for `amount`.
pub fn render_pair(amount: f64, entry: &PairExchanger) -> Option<String> {
    let buy = entry.buy(amount).ok()?;
    let sell = entry.sell(amount).ok()?;
    Some(format!(
        "{} {} - {} (buy) {} (sell) {}",
        format_value(amount),
        entry.src(),
        format_value(buy),
        format_value(sell),
        entry.dst()
    ))
}

/// Render forward and reverse quotes for `amount`, one section per group in
/// the order given. Pairs with no result in either direction are skipped, and
/// groups left empty are omitted.
pub fn render_quotes(amount: f64, entries: &[&PairExchanger], groups: &[RateGroup]) -> String {
    let mut out = String::new();

    for group in groups {
        let mut section = String::new();

        for entry in entries.iter().filter(|e| e.group() == group) {
            let forward = render_pair(amount, entry);
            let reverse = render_pair(amount, &entry.invert());
            if forward.is_none() && reverse.is_none() {
                continue;
            }

            for line in forward.iter().chain(reverse.iter()) {
                section.push_str(line);
                section.push('\n');
            }
            section.push('\n');
        }

        if !section.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&group.description());
            out.push_str("\n\n");
            out.push_str(&section);
        }
    }

    out
}
