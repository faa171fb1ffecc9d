use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use clap::Parser;
use punchcard::prelude::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Punch in and out from the terminal.
#[derive(Parser, Debug)]
#[command(name = "punch-cli", version)]
struct Args {
    /// Attendance API base URL.
    #[arg(long, default_value = punchcard::remote::DEFAULT_BASE_URL)]
    api_url: String,

    #[arg(long, short, default_value = "test")]
    username: String,

    #[arg(long, short, default_value = "test")]
    password: String,

    /// Reported latitude, in degrees.
    #[arg(long, allow_hyphen_values = true, default_value_t = 12.9716)]
    latitude: f64,

    /// Reported longitude, in degrees.
    #[arg(long, allow_hyphen_values = true, default_value_t = 77.5946)]
    longitude: f64,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    In,
    Out,
    Toggle,
    Status,
    History,
    Logout,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            "toggle" | "t" => Some(Self::Toggle),
            "status" | "s" => Some(Self::Status),
            "history" | "h" => Some(Self::History),
            "logout" => Some(Self::Logout),
            "help" | "?" => Some(Self::Help),
            "quit" | "exit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

const HELP: &str = "commands: in, out, toggle, status, history, logout, quit";

/// The next input line, or `None` at end of input or on a read error.
async fn next_input<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read input");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn format_duration(d: TimeDelta) -> String {
    let minutes = d.num_minutes().max(0);
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn print_status(state: &SessionState) {
    let now = Utc::now();
    match state.current() {
        Some(open) => println!(
            "{} since {} ({})",
            state.status(),
            format_time(open.punched_in_at()),
            format_duration(open.elapsed(now)),
        ),
        None => println!("{}", state.status()),
    }
}

fn print_history(state: &SessionState) {
    let entries = state.entries();
    if entries.is_empty() {
        println!("no entries yet");
        return;
    }
    let now = Utc::now();
    for entry in &entries {
        let end = entry
            .punched_out_at()
            .map_or_else(|| "running".to_string(), format_time);
        println!(
            "{}  {:<19}  {}",
            format_time(entry.punched_in_at()),
            end,
            format_duration(entry.duration(now)),
        );
    }
    println!("total: {}", format_duration(state.total_worked(now)));
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), PunchcardError> {
    init_tracing("warn,punchcard=info");
    let args = Args::parse();

    let geo = FixedLocation::from_degrees(args.latitude, args.longitude)?;
    let app = Punchcard::builder()
        .api_url(&args.api_url)
        .timeout(Duration::from_secs(args.timeout_secs))
        .build(StaticAuthenticator::development(), geo)?;

    let who = app.login(&args.username, &args.password).await?;
    println!("logged in as {} ({})", who.name, who.id);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = next_input(&mut lines).await else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let Some(command) = Command::parse(&line) else {
            println!("unknown command: {}", line.trim());
            println!("{HELP}");
            continue;
        };

        let result = match command {
            Command::In => app.punch_in().await.map(|()| print_status(&app.snapshot())),
            Command::Out => app.punch_out().await.map(|()| print_status(&app.snapshot())),
            Command::Toggle => app.toggle().await.map(|_| print_status(&app.snapshot())),
            Command::Status => {
                print_status(&app.snapshot());
                Ok(())
            }
            Command::History => {
                print_history(&app.snapshot());
                Ok(())
            }
            Command::Logout => app.logout().map(|_| println!("logged out")),
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => break,
        };

        match result {
            Ok(()) if command == Command::Logout => break,
            Ok(()) => {}
            Err(e) => {
                tracing::debug!(error = ?e, "command failed");
                println!("error: {e}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse_accepts_aliases() {
        assert_eq!(Command::parse("in"), Some(Command::In));
        assert_eq!(Command::parse("  OUT \n"), Some(Command::Out));
        assert_eq!(Command::parse("t"), Some(Command::Toggle));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
    }

    #[test]
    fn test_command_parse_unknown_is_none() {
        assert_eq!(Command::parse("lunch"), None);
    }

    #[tokio::test]
    async fn test_next_input_reads_lines_until_end() {
        let mut lines = BufReader::new(&b"in\nout\n"[..]).lines();

        assert_eq!(next_input(&mut lines).await.as_deref(), Some("in"));
        assert_eq!(next_input(&mut lines).await.as_deref(), Some("out"));
        assert_eq!(next_input(&mut lines).await, None);
    }

    #[tokio::test]
    async fn test_next_input_read_error_ends_input() {
        let mut lines = BufReader::new(&b"\xff\xfe\n"[..]).lines();

        assert_eq!(next_input(&mut lines).await, None);
    }

    #[test]
    fn test_format_duration_hours_and_minutes() {
        assert_eq!(format_duration(TimeDelta::minutes(135)), "2h 15m");
        assert_eq!(format_duration(TimeDelta::seconds(59)), "0h 00m");
        assert_eq!(format_duration(TimeDelta::minutes(-5)), "0h 00m");
    }

    #[test]
    fn test_args_parse_negative_coordinates() {
        let args = Args::parse_from([
            "punch-cli",
            "--latitude",
            "-33.86",
            "--longitude",
            "151.2",
        ]);
        assert_eq!(args.latitude, -33.86);
        assert_eq!(args.username, "test");
    }
}
