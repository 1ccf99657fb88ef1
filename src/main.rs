use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use phone_sleep::device::{self, DEFAULT_BUTTON_PIN, DEFAULT_SUPPRESSOR_PIN};
use phone_sleep::*;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::EnvFilter;

/// Suppress the telephone ring outside awake hours.
///
/// Times are given as HHMM, e.g. `phone-sleep 715 2245` wakes at 7:15 and
/// sleeps at 22:45. Missing or invalid times fall back to 0730 and 2245.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Cli {
    /// Wake time (HHMM, 0000-2359)
    #[arg(allow_hyphen_values = true)]
    wake_time: Option<String>,

    /// Sleep time (HHMM, 0000-2359)
    #[arg(allow_hyphen_values = true)]
    sleep_time: Option<String>,

    /// Anything after the sleep time is ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    extra: Vec<String>,

    /// BCM number of the override button pin
    #[arg(long, default_value_t = DEFAULT_BUTTON_PIN)]
    button_pin: u8,

    /// BCM number of the ring-suppressor pin
    #[arg(long, default_value_t = DEFAULT_SUPPRESSOR_PIN)]
    suppressor_pin: u8,
}

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| EnvFilter::new("phone_sleep=info")),
        )
        .compact()
        .init();

    color_eyre::install()?;

    let cli = Cli::parse();
    debug!("Parsed command line arguments: {:?}", cli);
    if !cli.extra.is_empty() {
        debug!("Ignoring extra arguments: {:?}", cli.extra);
    }

    let schedule = ScheduleConfig::from_args(cli.wake_time.as_deref(), cli.sleep_time.as_deref());

    let (button, suppressor) = match device::acquire(cli.button_pin, cli.suppressor_pin) {
        Ok(pins) => pins,
        Err(e) => {
            error!("Failed to initialize GPIO: {}", e);
            return Err(e).wrap_err("cannot drive the ring suppressor without GPIO access");
        }
    };

    let mut control = ControlLoop::new(schedule, SystemClock, button, suppressor)?;

    let mut terminate = signal(SignalKind::terminate())?;
    let shutdown = async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("Received SIGINT"),
            _ = terminate.recv() => info!("Received SIGTERM"),
        }
    };

    control.run(shutdown).await?;
    info!("Stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("phone-sleep").chain(args.iter().copied())).unwrap()
    }

    fn schedule_of(cli: &Cli) -> ScheduleConfig {
        ScheduleConfig::from_args(cli.wake_time.as_deref(), cli.sleep_time.as_deref())
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn first_positional_is_wake_second_is_sleep() {
        let cli = parse(&["715", "2300"]);
        assert_eq!(cli.wake_time.as_deref(), Some("715"));
        assert_eq!(cli.sleep_time.as_deref(), Some("2300"));

        let schedule = schedule_of(&cli);
        assert_eq!(schedule.wake, TimeOfDay::new(715).unwrap());
        assert_eq!(schedule.sleep, TimeOfDay::new(2300).unwrap());
    }

    #[test]
    fn no_arguments_use_defaults() {
        let cli = parse(&[]);
        assert_eq!(schedule_of(&cli), ScheduleConfig::default());
        assert_eq!(cli.button_pin, DEFAULT_BUTTON_PIN);
        assert_eq!(cli.suppressor_pin, DEFAULT_SUPPRESSOR_PIN);
    }

    #[test]
    fn hyphenated_garbage_falls_back_to_default() {
        let cli = parse(&["-abc", "2245"]);
        assert_eq!(cli.wake_time.as_deref(), Some("-abc"));
        assert_eq!(schedule_of(&cli).wake, DEFAULT_WAKE_TIME);

        let cli = parse(&["715", "-x"]);
        assert_eq!(schedule_of(&cli).sleep, DEFAULT_SLEEP_TIME);
    }

    #[test]
    fn negative_times_use_absolute_value() {
        let cli = parse(&["-715", "2245"]);
        assert_eq!(schedule_of(&cli).wake, TimeOfDay::new(715).unwrap());
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let cli = parse(&["715", "2300", "extra", "-z", "99"]);
        assert_eq!(cli.extra, ["extra", "-z", "99"]);
        assert_eq!(schedule_of(&cli).wake, TimeOfDay::new(715).unwrap());
        assert_eq!(schedule_of(&cli).sleep, TimeOfDay::new(2300).unwrap());
    }

    #[test]
    fn pin_options_still_parse() {
        let cli = parse(&["--button-pin", "5", "--suppressor-pin", "6", "715"]);
        assert_eq!(cli.button_pin, 5);
        assert_eq!(cli.suppressor_pin, 6);
        assert_eq!(cli.wake_time.as_deref(), Some("715"));
    }
}
