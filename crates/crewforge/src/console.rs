//! Colorful console output for assignment runs.
//!
//! Provides a `tracing` layer that formats the pipeline's structured events
//! with colors. Enabled by the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVES: [&str; 3] = ["crewforge=info", "crewforge_model=info", "crewforge_solver=info"];

/// Installs the console layer as the global subscriber.
///
/// Safe to call multiple times; only the first call has effect. `RUST_LOG`
/// is honored on top of the default directives.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        for directive in DEFAULT_DIRECTIVES {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(CrewConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!(
        "CrewForge v{} - crew assignment by constraint model\n",
        env!("CARGO_PKG_VERSION")
    );
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats pipeline events with colors.
pub struct CrewConsoleLayer;

impl<S: Subscriber> Layer<S> for CrewConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("crewforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    status: Option<String>,
    engine: Option<String>,
    error: Option<String>,
    violation: Option<String>,
    objective: Option<String>,
    decidable: Option<u64>,
    crews: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    nodes: Option<u64>,
    solutions: Option<u64>,
    assigned: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = value.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(value),
            "message" => self.message = Some(value),
            "status" => self.status = Some(value),
            "engine" => self.engine = Some(value),
            "error" => self.error = Some(value),
            "violation" => self.violation = Some(value),
            "objective" => self.objective = Some(value),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "objective" {
            self.objective = Some(format!("{value:.3}"));
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "decidable" => self.decidable = Some(value),
            "crews" => self.crews = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "nodes" => self.nodes = Some(value),
            "solutions" => self.solutions = Some(value),
            "assigned" => self.assigned = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("assignment_start") => format!(
            "{} {} {} {} people to place on {} crews ({})",
            timestamp().bright_black(),
            "INFO".bright_green(),
            "[Assign]".bright_cyan(),
            v.decidable.unwrap_or(0).bright_yellow(),
            v.crews.unwrap_or(0).bright_yellow(),
            v.engine.as_deref().unwrap_or("engine").white()
        ),
        Some("model_built") => format!(
            "{} {} {} variables ({}), constraints ({})",
            timestamp().bright_black(),
            "INFO".bright_green(),
            "[Model]".bright_cyan(),
            v.variables.unwrap_or(0).bright_yellow(),
            v.constraints.unwrap_or(0).bright_yellow()
        ),
        Some("solve_end") => format!(
            "{} {} {} {}: objective ({}), nodes ({}), solutions ({}), time spent ({})",
            timestamp().bright_black(),
            "INFO".bright_green(),
            "[Solver]".bright_cyan(),
            format_status(v.status.as_deref().unwrap_or("?")),
            v.objective.as_deref().unwrap_or("none").bright_magenta(),
            v.nodes.unwrap_or(0).white(),
            v.solutions.unwrap_or(0).white(),
            format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
        ),
        Some("improvement") => format!(
            "    {} objective {} at node {}",
            "->".bright_blue(),
            v.objective.as_deref().unwrap_or("?").bright_green(),
            v.nodes.unwrap_or(0).white()
        ),
        Some("validation_failed") => format!(
            "{} {} {} {}",
            timestamp().bright_black(),
            "ERROR".bright_red().bold(),
            "[Validate]".bright_cyan(),
            v.violation.as_deref().unwrap_or("").red()
        ),
        Some("assignment_end") => format_assignment_end(v),
        _ if level <= Level::WARN => format!(
            "{} {} {}",
            timestamp().bright_black(),
            "WARN".bright_yellow(),
            v.message.as_deref().unwrap_or("")
        ),
        _ => String::new(),
    }
}

fn format_assignment_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("?");
    let mut output = format!(
        "{} {} {} {} in {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Assign]".bright_cyan(),
        format_status(status),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    );
    match (&v.error, v.assigned) {
        (Some(error), _) => output.push_str(&format!(": {}", error.red())),
        (None, Some(assigned)) => output.push_str(&format!(
            ": {} people assigned, objective {}",
            assigned.bright_yellow(),
            v.objective.as_deref().unwrap_or("?").bright_magenta().bold()
        )),
        (None, None) => {}
    }
    output
}

fn format_status(status: &str) -> String {
    match status {
        "OPTIMAL" | "Optimal" => status.bright_green().bold().to_string(),
        "FEASIBLE" | "Feasible" => status.bright_yellow().bold().to_string(),
        _ => status.bright_red().bold().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("objective_composed".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::DEBUG, &visitor).is_empty());
    }

    #[test]
    fn test_assignment_end_shows_error() {
        let visitor = EventVisitor {
            event: Some("assignment_end".to_string()),
            status: Some("INFEASIBLE".to_string()),
            error: Some("No assignment satisfies the hard constraints".to_string()),
            ..EventVisitor::default()
        };
        let line = format_event(Level::INFO, &visitor);
        assert!(line.contains("INFEASIBLE"));
        assert!(line.contains("No assignment satisfies"));
    }
}
