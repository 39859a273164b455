//! User-facing message templates.
//!
//! Presentation only: the single rule living here is the three-way branch on
//! the sign of the quote's change, which picks the direction icon.

use chrono::NaiveDateTime;

use crate::calculator::TierPrices;
use crate::quote::Quote;

/// Reply sent when the quote source failed.
pub const QUOTE_ERROR: &str = "❌ هەڵە ڕوویدا لە وەرگرتنی نرخەکان";
/// Acknowledgement for `/subscribe`.
pub const SUBSCRIBED: &str = "✅ بەشداریت کراوە! بە /price نرخەکان وەربگرە";
/// Acknowledgement for `/unsubscribe`.
pub const UNSUBSCRIBED: &str = "❌ بەشداریت هەڵوەشێنرایەوە.";
/// `/setdollar` with an argument that is not a number.
pub const INVALID_RATE: &str = "❌ تکایە نرخی دروست بنووسە (نموونە: /setdollar 1450)";
/// `/setdollar` without an argument.
pub const MISSING_RATE: &str = "❌ تکایە نرخی دۆلار بنووسە (نموونە: /setdollar 1450)";
/// Reply to free text that is not a price request.
pub const HINT: &str = "🤔 تکایە /start بەکاربێنە بۆ زانینی فەرمانەکان.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Direction of the latest price move.
pub fn change_icon(change_usd: f64) -> &'static str {
    if change_usd > 0.0 {
        "🟢"
    } else if change_usd < 0.0 {
        "🔴"
    } else {
        "⚪"
    }
}

/// Render the price report sent for `/price`.
///
/// A failed quote yields exactly [`QUOTE_ERROR`], whatever the other arguments.
pub fn format_report(
    quote: &Quote,
    tier_prices: &TierPrices,
    exchange_rate: f64,
    timestamp: NaiveDateTime,
) -> String {
    if !quote.ok {
        return QUOTE_ERROR.to_string();
    }

    let tier_lines: Vec<String> = tier_prices
        .iter()
        .map(|(tier, price)| {
            format!(
                "{} {}: {} دینار",
                tier.marker(),
                tier.local_name(),
                group_thousands(*price, 0)
            )
        })
        .collect();

    format!(
        "🏅 *نرخی زێر*\n\
        \n\
        {icon} *نرخی ئۆنسە:* {price} USD\n\
        📈 *گۆڕان:* {change} USD\n\
        \n\
        *نرخی مەسقاڵ (5 گرام) بە دینار:*\n\
        \n\
        {tiers}\n\
        \n\
        💵 *نرخی دۆلار:* 1 USD = {rate} دینار\n\
        \n\
        ⏰ {time}",
        icon = change_icon(quote.change_usd),
        price = group_thousands(quote.unit_price_usd, 2),
        change = signed_thousands(quote.change_usd, 2),
        tiers = tier_lines.join("\n"),
        rate = group_thousands(exchange_rate, 0),
        time = timestamp.format(TIMESTAMP_FORMAT),
    )
}

/// Greeting sent for `/start`.
pub fn welcome_text(first_name: &str) -> String {
    format!(
        "سڵاو {first_name}! 👋\n\
        \n\
        من بۆتی نرخی زێرم.\n\
        \n\
        **فەرمانەکان:**\n\
        /price - نرخی ئێستای زێر\n\
        /subscribe - بەشداریکردن\n\
        /unsubscribe - کۆتایی بە بەشداری\n\
        /setdollar - گۆڕینی نرخی دۆلار\n\
        \n\
        🔄 نرخەکان هەر جارێک دەتوانیت بە /price وەریبگریت"
    )
}

/// Confirmation sent after `/setdollar` replaced the exchange rate.
pub fn rate_changed(exchange_rate: f64) -> String {
    format!(
        "✅ نرخی دۆلار گۆڕدرا بۆ: {} دینار",
        group_thousands(exchange_rate, 0)
    )
}

/// Format `value` with `decimals` fraction digits and comma-separated thousands.
///
/// Non-finite values are rendered as-is.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    // "-0" / "-0.00" after rounding is shown unsigned
    if value < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

fn signed_thousands(value: f64, decimals: usize) -> String {
    let grouped = group_thousands(value, decimals);
    if grouped.starts_with('-') {
        grouped
    } else {
        format!("+{grouped}")
    }
}
