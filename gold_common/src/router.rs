//! Maps an inbound chat message to the reply the bot sends back.
//!
//! `CommandRouter` owns the application state and the quote source; both
//! transports (Telegram and the local console) hand it the text of each
//! message together with the identity of its author, and send back whatever
//! [`Reply`] it returns. `None` means the message gets no answer.
//!
//! Routing rules:
//! - `/start`, `/price`, `/subscribe`, `/unsubscribe`, `/setdollar <value>`
//!   run the matching handler.
//! - Command names match case-insensitively.
//! - Unknown `/commands`, commands addressed to another bot and blank
//!   messages are ignored.
//! - Free text mentioning gold or price (see [`PRICE_KEYWORDS`]) is treated
//!   as `/price`; anything else gets a hint pointing at `/start`.

use chrono::Local;
use log::{debug, error, info};

use crate::calculator::compute_tier_prices;
use crate::command::{Command, CommandParseError, parse_command_for};
use crate::error::BotError;
use crate::report::{self, HINT, INVALID_RATE, MISSING_RATE, QUOTE_ERROR, SUBSCRIBED, UNSUBSCRIBED};
use crate::result::Result;
use crate::source::QuoteSource;
use crate::state::AppState;
use crate::subscription::UserId;

/// Words that turn free text into a price request (matched case-insensitively).
pub const PRICE_KEYWORDS: [&str; 4] = ["زێر", "نرخ", "gold", "price"];

/// Author of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Platform user identifier.
    pub id: UserId,
    /// Display name used in the greeting.
    pub first_name: Option<String>,
}

impl Caller {
    /// Create a caller.
    pub fn new(id: UserId, first_name: Option<String>) -> Self {
        Self { id, first_name }
    }
}

/// How the transport should render a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    /// Send as-is.
    Plain,
    /// Interpret `*bold*` markers.
    Markdown,
}

/// Text to send back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message body.
    pub text: String,
    /// Rendering mode.
    pub format: ReplyFormat,
}

impl Reply {
    /// Reply sent without markup.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Plain,
        }
    }

    /// Reply rendered as Markdown.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Markdown,
        }
    }
}

/// Dispatches messages to the command handlers.
pub struct CommandRouter {
    state: AppState,
    source: Box<dyn QuoteSource>,
    bot_name: Option<String>,
}

impl CommandRouter {
    /// Create a router owning `state` and fetching quotes from `source`.
    pub fn new(state: AppState, source: Box<dyn QuoteSource>) -> Self {
        Self {
            state,
            source,
            bot_name: None,
        }
    }

    /// Only answer `/command@mention` when the mention is `bot_name`.
    pub fn with_bot_name(mut self, bot_name: impl Into<String>) -> Self {
        self.bot_name = Some(bot_name.into());
        self
    }

    /// Shared state, for inspection.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Produce the reply for `text` sent by `caller`, if any.
    pub fn handle(&self, caller: &Caller, text: &str) -> Option<Reply> {
        match parse_command_for(text, self.bot_name.as_deref()) {
            Ok(command) => Some(self.execute(caller, command)),
            Err(CommandParseError::NotACommand) => self.handle_text(caller, text),
            Err(CommandParseError::UnknownCommand(name)) => {
                info!("Ignoring unknown command {} from {}", name, caller.id);
                None
            }
            Err(CommandParseError::AddressedElsewhere(bot)) => {
                debug!("Ignoring command for {} from {}", bot, caller.id);
                None
            }
        }
    }

    /// Run a parsed command.
    pub fn execute(&self, caller: &Caller, command: Command) -> Reply {
        match command {
            Command::Start => self.start(caller),
            Command::Price => self.price(caller),
            Command::Subscribe => self.subscribe(caller),
            Command::Unsubscribe => self.unsubscribe(caller),
            Command::SetDollar(raw) => match self.set_exchange_rate(raw.as_deref()) {
                Ok(rate) => Reply::plain(report::rate_changed(rate)),
                Err(BotError::MissingArgument(_)) => Reply::plain(MISSING_RATE),
                Err(BotError::InvalidExchangeRate(_)) => Reply::plain(INVALID_RATE),
                Err(e) => {
                    error!("Failed to update exchange rate: {}", e);
                    Reply::plain(INVALID_RATE)
                }
            },
        }
    }

    /// Current exchange rate.
    pub fn exchange_rate(&self) -> Result<f64> {
        self.state.exchange_rate()
    }

    /// Parse `raw` and make it the new exchange rate.
    ///
    /// The rate is left untouched when `raw` is missing or not a number.
    pub fn set_exchange_rate(&self, raw: Option<&str>) -> Result<f64> {
        let raw = raw.ok_or(BotError::MissingArgument("rate"))?;
        let rate: f64 = raw
            .trim()
            .parse()
            .map_err(|_| BotError::InvalidExchangeRate(raw.to_string()))?;
        self.state.set_exchange_rate(rate)?;
        info!("Exchange rate changed to: {}", rate);
        Ok(rate)
    }

    fn handle_text(&self, caller: &Caller, text: &str) -> Option<Reply> {
        if text.trim().is_empty() {
            return None;
        }
        if is_price_request(text) {
            Some(self.price(caller))
        } else {
            Some(Reply::plain(HINT))
        }
    }

    fn start(&self, caller: &Caller) -> Reply {
        let name = caller.first_name.as_deref().unwrap_or_default();
        info!("New user: {}", name);
        Reply::plain(report::welcome_text(name))
    }

    fn price(&self, caller: &Caller) -> Reply {
        let quote = self.source.fetch_quote();
        let rate = match self.state.exchange_rate() {
            Ok(rate) => rate,
            Err(e) => {
                error!("Failed to read exchange rate: {}", e);
                return Reply::markdown(QUOTE_ERROR);
            }
        };
        let tier_prices = compute_tier_prices(quote.unit_price_usd, rate);
        let text = report::format_report(&quote, &tier_prices, rate, Local::now().naive_local());
        info!("Price sent to: {}", caller.id);
        Reply::markdown(text)
    }

    fn subscribe(&self, caller: &Caller) -> Reply {
        if let Err(e) = self.state.subscribe(caller.id) {
            error!("Failed to subscribe {}: {}", caller.id, e);
        } else {
            info!("New subscriber: {}", caller.id);
        }
        Reply::plain(SUBSCRIBED)
    }

    fn unsubscribe(&self, caller: &Caller) -> Reply {
        if let Err(e) = self.state.unsubscribe(caller.id) {
            error!("Failed to unsubscribe {}: {}", caller.id, e);
        } else {
            info!("Subscriber removed: {}", caller.id);
        }
        Reply::plain(UNSUBSCRIBED)
    }
}

/// Whether free text asks for the price.
pub fn is_price_request(text: &str) -> bool {
    let text = text.to_lowercase();
    PRICE_KEYWORDS.iter().any(|word| text.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FixedQuoteSource, SyntheticQuoteSource};

    fn router() -> CommandRouter {
        CommandRouter::new(
            AppState::new(1450.0),
            Box::new(FixedQuoteSource::new(1950.75, 2.5)),
        )
    }

    fn caller() -> Caller {
        Caller::new(42, Some("Aram".to_string()))
    }

    #[test]
    fn price_command_renders_report() {
        let reply = router().handle(&caller(), "/price").unwrap();
        assert_eq!(reply.format, ReplyFormat::Markdown);
        assert!(reply.text.contains("1,950.75 USD"));
        assert!(reply.text.contains("+2.50 USD"));
        assert!(reply.text.contains("1 USD = 1,450 دینار"));
    }

    #[test]
    fn failed_quote_replies_with_error() {
        let router = CommandRouter::new(
            AppState::new(1450.0),
            Box::new(SyntheticQuoteSource::new(1950.75, -1.0)),
        );
        let reply = router.handle(&caller(), "/price").unwrap();
        assert_eq!(reply.text, QUOTE_ERROR);
    }

    #[test]
    fn start_greets_by_name() {
        let reply = router().handle(&caller(), "/start").unwrap();
        assert_eq!(reply.format, ReplyFormat::Plain);
        assert!(reply.text.starts_with("سڵاو Aram!"));
    }

    #[test]
    fn start_without_name_still_greets() {
        let reply = router().handle(&Caller::new(1, None), "/start").unwrap();
        assert!(reply.text.starts_with("سڵاو !"));
    }

    #[test]
    fn subscribe_and_unsubscribe_round_trip() {
        let router = router();
        assert_eq!(router.handle(&caller(), "/subscribe").unwrap().text, SUBSCRIBED);
        assert!(router.state().is_subscribed(42).unwrap());
        assert_eq!(router.handle(&caller(), "/unsubscribe").unwrap().text, UNSUBSCRIBED);
        assert!(!router.state().is_subscribed(42).unwrap());
    }

    #[test]
    fn unsubscribe_of_non_member_still_acknowledges() {
        let router = router();
        let reply = router.handle(&caller(), "/unsubscribe").unwrap();
        assert_eq!(reply.text, UNSUBSCRIBED);
        assert_eq!(router.state().subscriber_count().unwrap(), 0);
    }

    #[test]
    fn setdollar_replaces_rate() {
        let router = router();
        let reply = router.handle(&caller(), "/setdollar 1480").unwrap();
        assert_eq!(reply.text, report::rate_changed(1480.0));
        assert_eq!(router.exchange_rate().unwrap(), 1480.0);

        let price = router.handle(&caller(), "/price").unwrap();
        assert!(price.text.contains("1 USD = 1,480 دینار"));
    }

    #[test]
    fn setdollar_rejects_garbage() {
        let router = router();
        assert!(matches!(
            router.set_exchange_rate(Some("abc")),
            Err(BotError::InvalidExchangeRate(_))
        ));
        assert_eq!(router.handle(&caller(), "/setdollar abc").unwrap().text, INVALID_RATE);
        assert_eq!(router.exchange_rate().unwrap(), 1450.0);
    }

    #[test]
    fn setdollar_without_argument() {
        let router = router();
        assert!(matches!(
            router.set_exchange_rate(None),
            Err(BotError::MissingArgument(_))
        ));
        assert_eq!(router.handle(&caller(), "/setdollar").unwrap().text, MISSING_RATE);
        assert_eq!(router.exchange_rate().unwrap(), 1450.0);
    }

    #[test]
    fn setdollar_accepts_decimals() {
        let router = router();
        assert_eq!(router.set_exchange_rate(Some("1450")).unwrap(), 1450.0);
        assert_eq!(router.set_exchange_rate(Some("1312.75")).unwrap(), 1312.75);
    }

    #[test]
    fn keyword_text_is_a_price_request() {
        let router = router();
        let by_text = router.handle(&caller(), "what is the gold price today").unwrap();
        assert_eq!(by_text.format, ReplyFormat::Markdown);
        assert!(by_text.text.contains("1,950.75 USD"));

        assert!(router.handle(&caller(), "GOLD?").unwrap().text.contains("USD"));
        assert!(router.handle(&caller(), "نرخی زێر چەندە").unwrap().text.contains("USD"));
    }

    #[test]
    fn other_text_gets_hint() {
        let reply = router().handle(&caller(), "hello").unwrap();
        assert_eq!(reply, Reply::plain(HINT));
    }

    #[test]
    fn command_names_ignore_case() {
        let router = router();
        let report = router.handle(&caller(), "/PRICE").unwrap();
        assert!(report.text.contains("1,950.75 USD"));

        assert_eq!(router.handle(&caller(), "/Subscribe").unwrap().text, SUBSCRIBED);
        assert!(router.state().is_subscribed(42).unwrap());
    }

    #[test]
    fn commands_for_other_bots_are_ignored() {
        let router = router().with_bot_name("gold_bot");
        assert!(router.handle(&caller(), "/price@other_bot").is_none());
        assert!(router.handle(&caller(), "/subscribe@other_bot").is_none());
        assert!(!router.state().is_subscribed(42).unwrap());

        assert!(router.handle(&caller(), "/price@gold_bot").is_some());
        assert!(router.handle(&caller(), "/price").is_some());
    }

    #[test]
    fn unknown_command_and_blank_text_are_ignored() {
        let router = router();
        assert!(router.handle(&caller(), "/help").is_none());
        assert!(router.handle(&caller(), "").is_none());
        assert!(router.handle(&caller(), "  \n ").is_none());
    }
}
