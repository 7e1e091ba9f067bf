// Recovery Coach console harness
// Reads `user_id<TAB>message[<TAB>context json]` lines from stdin, prints one JSON reply per line.

use anyhow::{Context, Result};
use recovery_coach::risk::RiskContext;
use recovery_coach::telemetry::{init_tracing, LogFormat};
use recovery_coach::{CoachConfig, CoachHandle, UserId};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

fn parse_line(line: &str) -> Result<(UserId, String, RiskContext)> {
    let mut parts = line.splitn(3, '\t');
    let user_id = UserId::new(parts.next().unwrap_or_default())?;
    let text = parts
        .next()
        .context("expected user_id<TAB>message")?
        .to_string();
    let context = match parts.next().map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => serde_json::from_str(json).context("invalid context JSON")?,
        None => RiskContext::default(),
    };
    Ok((user_id, text, context))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = CoachConfig::from_env().context("invalid configuration")?;
    init_tracing("recovery-coach", LogFormat::from_env())?;
    info!(
        history_cap = config.history_cap,
        tone = %config.default_tone,
        "Recovery coach ready, reading stdin"
    );

    let coach = CoachHandle::from_config(&config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let (user_id, text, context) = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Skipping line: {:#}", e);
                continue;
            }
        };

        match coach.handle_message(user_id, text, context).await {
            Ok(reply) => {
                let mut json = serde_json::to_vec(&reply)?;
                json.push(b'\n');
                stdout.write_all(&json).await?;
                stdout.flush().await?;
            }
            Err(e) => error!("Request failed: {}", e),
        }
    }

    coach.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let (user, text, context) = parse_line("u1\tпривет").unwrap();
        assert_eq!(user.as_str(), "u1");
        assert_eq!(text, "привет");
        assert_eq!(context, RiskContext::default());
    }

    #[test]
    fn test_parse_line_with_context() {
        let (_, _, context) = parse_line("u1\tтяжело\t{\"craving_level\": 5, \"sober_days\": 3}").unwrap();
        assert_eq!(context.numeric.craving_level, Some(5.0));
        assert_eq!(context.sober_days, Some(3));
    }

    #[test]
    fn test_parse_line_rejects_missing_message() {
        assert!(parse_line("u1").is_err());
        assert!(parse_line("  \tтекст").is_err());
    }
}
