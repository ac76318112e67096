use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
  #[arg(
    short,
    long,
    value_name = "FLOAT",
    help = "Tick rate, i.e. number of ticks per second",
    default_value_t = 4.0,
    value_parser = parse_rate
  )]
  pub tick_rate: f64,

  #[arg(
    short,
    long,
    value_name = "FLOAT",
    help = "Frame rate, i.e. number of frames per second",
    default_value_t = 30.0,
    value_parser = parse_rate
  )]
  pub frame_rate: f64,

  #[arg(long, value_name = "STRING", help = "Title shown above the list, overrides the config file")]
  pub title: Option<String>,
}

/// Parses a tick or frame rate. Accepts finite values above zero.
fn parse_rate(value: &str) -> Result<f64, String> {
  let rate: f64 = value.parse().map_err(|_| format!("'{value}' is not a number"))?;
  if rate.is_finite() && rate > 0.0 { Ok(rate) } else { Err(format!("rate must be a positive number, got {value}")) }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_defaults() {
    let cli = Cli::try_parse_from(["rowkit"]).unwrap();
    assert_eq!(cli.tick_rate, 4.0);
    assert_eq!(cli.frame_rate, 30.0);
    assert_eq!(cli.title, None);
  }

  #[test]
  fn test_accepts_fractional_rates() {
    let cli = Cli::try_parse_from(["rowkit", "--tick-rate", "0.5", "--frame-rate", "12"]).unwrap();
    assert_eq!(cli.tick_rate, 0.5);
    assert_eq!(cli.frame_rate, 12.0);
  }

  #[test]
  fn test_rejects_zero_negative_and_non_finite_rates() {
    assert!(Cli::try_parse_from(["rowkit", "--tick-rate", "0"]).is_err());
    assert!(Cli::try_parse_from(["rowkit", "--frame-rate", "-5"]).is_err());
    assert!(Cli::try_parse_from(["rowkit", "--tick-rate", "inf"]).is_err());
    assert!(Cli::try_parse_from(["rowkit", "--frame-rate", "NaN"]).is_err());
    assert!(Cli::try_parse_from(["rowkit", "--tick-rate", "fast"]).is_err());
  }
}
