//! Colorful console output for oracle events.
//!
//! Provides a `tracing` layer that formats registry and oracle events with
//! colors. Enabled with the `console` feature.
//!
//! ## Log Levels
//!
//! - **INFO**: registry construction
//! - **DEBUG**: one line per evaluation, skipped enumerations
//! - **WARN**: ignored learning requests, expensive learning
//! - **ERROR**: a built-in oracle rejected at registration
//! - **TRACE**: conformance probes

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the oracle console layer.
///
/// Safe to call multiple times - only the first call has effect. The
/// default filter is `oracleforge=info`, overridable through `RUST_LOG`.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(
                "oracleforge=info"
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            )
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(OracleConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats oracle events with colors.
pub struct OracleConsoleLayer;

impl<S: Subscriber> Layer<S> for OracleConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("oracleforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    oracle: Option<String>,
    reason: Option<String>,
    fact: Option<String>,
    oracle_count: Option<u64>,
    definite: Option<u64>,
    possible: Option<u64>,
    nogoods: Option<u64>,
    facts: Option<u64>,
    undefined: Option<u64>,
    limit: Option<u64>,
}

impl EventVisitor {
    fn set_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "oracle" => self.oracle = Some(value),
            "reason" => self.reason = Some(value),
            "fact" => self.fact = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field, s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "oracle_count" => self.oracle_count = Some(value),
            "definite" => self.definite = Some(value),
            "possible" => self.possible = Some(value),
            "nogoods" => self.nogoods = Some(value),
            "facts" => self.facts = Some(value),
            "undefined" => self.undefined = Some(value),
            "limit" => self.limit = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "registry_ready" => format_registry_ready(v),
        "evaluated" => format_evaluated(v),
        "learning_ignored" => format_learning_ignored(v),
        "builtin_rejected" => format_builtin_rejected(v),
        "expensive_learning" => format_expensive_learning(v),
        "enumeration_skipped" => format_enumeration_skipped(v),
        "conformance_probe" if level == Level::TRACE => format_probe(v),
        _ => String::new(),
    }
}

fn oracle_tag(v: &EventVisitor) -> String {
    format!("&{}", v.oracle.as_deref().unwrap_or("?"))
        .bright_cyan()
        .to_string()
}

fn format_registry_ready(v: &EventVisitor) -> String {
    format!(
        "{} {} oracles registered",
        "▶".bright_green().bold(),
        v.oracle_count.unwrap_or(0).bright_yellow()
    )
}

fn format_evaluated(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} │ {} definite │ {} possible",
        "●".bright_blue(),
        oracle_tag(v),
        v.definite.unwrap_or(0).bright_green(),
        v.possible.unwrap_or(0).bright_yellow()
    );
    if let Some(nogoods) = v.nogoods.filter(|&n| n > 0) {
        output.push_str(&format!(" │ {} nogoods", nogoods.bright_magenta()));
    }
    output
}

fn format_learning_ignored(v: &EventVisitor) -> String {
    format!(
        "{} {} learning request ignored: {}",
        "!".yellow().bold(),
        oracle_tag(v),
        v.reason.as_deref().unwrap_or("unsupported")
    )
}

fn format_builtin_rejected(v: &EventVisitor) -> String {
    format!(
        "{} {} not registered: {}",
        "✗".bright_red().bold(),
        oracle_tag(v),
        v.reason.as_deref().unwrap_or("rejected")
    )
}

fn format_expensive_learning(v: &EventVisitor) -> String {
    let facts = v.facts.unwrap_or(0);
    format!(
        "{} {} learning over {} facts emits 2^{} nogoods",
        "!".yellow().bold(),
        oracle_tag(v),
        facts.bright_red(),
        facts.saturating_sub(1)
    )
}

fn format_enumeration_skipped(v: &EventVisitor) -> String {
    format!(
        "{} {} {} undefined facts exceed the enumeration limit {}, answer left possible",
        "·".bright_black(),
        oracle_tag(v),
        v.undefined.unwrap_or(0).yellow(),
        v.limit.unwrap_or(0)
    )
}

fn format_probe(v: &EventVisitor) -> String {
    format!(
        "{} {} probing {}",
        "·".bright_black(),
        oracle_tag(v),
        v.fact.as_deref().unwrap_or("?").bright_black()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            oracle: Some("parity".to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_known_events_are_formatted() {
        let mut v = visitor("evaluated");
        v.definite = Some(2);
        v.nogoods = Some(4);
        let line = format_event(&v, Level::DEBUG);
        assert!(line.contains("parity"));
        assert!(line.contains("nogoods"));

        let mut v = visitor("expensive_learning");
        v.facts = Some(20);
        assert!(format_event(&v, Level::WARN).contains("2^19"));

        let mut v = visitor("builtin_rejected");
        v.reason = Some("oracle `parity` is already registered".to_string());
        assert!(format_event(&v, Level::ERROR).contains("already registered"));
    }

    #[test]
    fn test_unknown_events_are_dropped() {
        assert!(format_event(&visitor("something_else"), Level::INFO).is_empty());
        assert!(format_event(&visitor("conformance_probe"), Level::DEBUG).is_empty());
    }
}
