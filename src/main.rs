use chrono::Utc;
use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use waypoint::app_config::AppConfig;
use waypoint::decision_engine::{DecisionNodeKind, TraversalSession};
use waypoint::domain::{Cardinal, Coordinate};
use waypoint::SurvivalAssistant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let assistant = SurvivalAssistant::from_config(&config).await?;
    info!("🔥 {} is ready", env!("CARGO_PKG_NAME"));

    let args = env::args().skip(1).collect::<Vec<_>>();
    match args.first().map(String::as_str) {
        None | Some("guide") => guide(&assistant, &config, &args),
        Some("protocols") => {
            for name in assistant.list_available_protocols() {
                println!("{}", name);
            }
            Ok(())
        }
        Some("protocol") => match args.get(1) {
            Some(name) => {
                let locale = args.get(2).map(String::as_str).unwrap_or(config.core().locale());
                run_protocol(assistant.begin_protocol(name, locale)?).await
            }
            None => Err("usage: waypoint protocol <name> [locale]".into()),
        },
        Some(command) => Err(format!("unknown command '{}', expected guide, protocols or protocol", command).into()),
    }
}

fn guide(assistant: &SurvivalAssistant, config: &AppConfig, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let current = position(args.get(1..).unwrap_or_default(), config.location())?;
    let locale = args.get(3).map(String::as_str).unwrap_or(config.core().locale());
    let now = Utc::now();

    let result = assistant.find_guidance_to_nearest_safety_at(current, locale, now);
    println!("{} ({:.0} km)", result.nearest.point.name(), result.nearest.distance_km);
    println!(
        "{:.0}° {} | {}",
        result.guidance.bearing,
        Cardinal::from_bearing(result.guidance.bearing),
        result.guidance.reference_body
    );
    println!("{}", result.guidance.instruction);

    if let Some(orion) = assistant.advisor().guide_by_orion(current, result.nearest.point.coordinate(), locale, now) {
        println!("{} | {}", orion.reference_body, orion.instruction);
    }

    Ok(())
}

/// Parses `[latitude longitude ...]`, falling back to `configured` when both are left out.
fn position(args: &[String], configured: Coordinate) -> Result<Coordinate, String> {
    match (args.first(), args.get(1)) {
        (None, _) => Ok(configured),
        (Some(_), None) => Err("usage: waypoint guide [latitude longitude] [locale]".to_string()),
        (Some(latitude), Some(longitude)) => {
            let parse = |value: &str| value.parse::<f64>().map_err(|error| format!("invalid number '{}': {}", value, error));
            Coordinate::new(parse(latitude)?, parse(longitude)?).ok_or_else(|| format!("invalid coordinate {}, {}", latitude, longitude))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn uses_the_configured_position_without_arguments() {
        let configured = Coordinate::new(25.0, 29.0).unwrap();
        assert_eq!(position(&[], configured), Ok(configured));
    }

    #[test]
    fn parses_the_given_position() {
        let result = position(&args(&["-33.9", "18.4", "ar"]), Coordinate::default());
        assert_eq!(result, Ok(Coordinate::new(-33.9, 18.4).unwrap()));
    }

    #[rstest]
    #[case::latitude_only(&["25.0"], "usage: waypoint guide [latitude longitude] [locale]")]
    #[case::out_of_range(&["95.0", "29.0"], "invalid coordinate 95.0, 29.0")]
    fn rejects_an_incomplete_or_invalid_position(#[case] values: &[&str], #[case] expected: &str) {
        assert_eq!(position(&args(values), Coordinate::default()), Err(expected.to_string()));
    }

    #[test]
    fn rejects_a_position_that_is_not_a_number() {
        let result = position(&args(&["north", "29.0"]), Coordinate::default());
        assert!(result.unwrap_err().starts_with("invalid number 'north'"));
    }
}

async fn run_protocol(mut session: TraversalSession) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", session.tree().title());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while !session.is_finished() {
        let is_question = matches!(session.current_node().kind(), DecisionNodeKind::Question { .. });
        if is_question {
            println!("{} [y/n]", session.current_prompt());
        } else {
            println!("{} [enter]", session.current_prompt());
        }

        let Some(line) = lines.next_line().await? else {
            warn!("⚠️ Input closed, abandoning '{}'", session.tree().name());
            return Ok(());
        };

        let yes = match line.trim().to_lowercase().as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ if !is_question => true,
            other => {
                warn!("⚠️ Expected y or n, got '{}'", other);
                continue;
            }
        };
        session.answer(yes)?;
    }

    println!("{}", session.current_prompt());
    Ok(())
}
