//! Scripted navigation: a comma-separated list of steps such as
//! `next,prev,goto:5,zoom-in,zoom-out,reset,toggle`.

use anyhow::{Context, Result, bail};
use flipbook_core::Intent;

/// One parsed step, keeping its source text for the report
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub label: String,
    pub intent: Intent,
}

pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            Ok(Step {
                label: token.to_string(),
                intent: parse_step(token)?,
            })
        })
        .collect()
}

fn parse_step(token: &str) -> Result<Intent> {
    let (name, arg) = match token.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (token, None),
    };

    let intent = match (name.to_ascii_lowercase().as_str(), arg) {
        ("next", None) => Intent::NextPage,
        ("prev" | "previous", None) => Intent::PreviousPage,
        ("goto", Some(page)) => Intent::GoToPage(
            page.parse()
                .with_context(|| format!("Invalid page number in '{}'", token))?,
        ),
        ("zoom-in", None) => Intent::AdjustZoom(1),
        ("zoom-out", None) => Intent::AdjustZoom(-1),
        ("zoom", Some(level)) => Intent::SetZoom(
            level
                .parse()
                .with_context(|| format!("Invalid zoom level in '{}'", token))?,
        ),
        ("reset", None) => Intent::ResetZoom,
        ("toggle", None) => Intent::ToggleZoom,
        ("pan", Some(delta)) => {
            let (dx, dy) = parse_pair(delta, ':')
                .with_context(|| format!("Expected pan:DX:DY, got '{}'", token))?;
            Intent::Pan { dx, dy }
        }
        ("resize", Some(size)) => {
            let (width, height) = parse_pair(size, 'x')
                .with_context(|| format!("Expected resize:WIDTHxHEIGHT, got '{}'", token))?;
            Intent::Resize { width, height }
        }
        _ => bail!("Unknown step '{}'", token),
    };
    Ok(intent)
}

fn parse_pair(text: &str, separator: char) -> Result<(f32, f32)> {
    let Some((a, b)) = text.split_once(separator) else {
        bail!("missing '{}'", separator);
    };
    Ok((a.trim().parse()?, b.trim().parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intents(script: &str) -> Vec<Intent> {
        parse_script(script)
            .unwrap()
            .into_iter()
            .map(|step| step.intent)
            .collect()
    }

    #[test]
    fn test_parses_all_steps() {
        assert_eq!(
            intents("next,prev,goto:5,zoom-in,zoom-out,reset,toggle"),
            vec![
                Intent::NextPage,
                Intent::PreviousPage,
                Intent::GoToPage(5),
                Intent::AdjustZoom(1),
                Intent::AdjustZoom(-1),
                Intent::ResetZoom,
                Intent::ToggleZoom,
            ]
        );
    }

    #[test]
    fn test_parses_arguments() {
        assert_eq!(
            intents(" zoom:2.5 , pan:10:-4, resize:800x600 ,"),
            vec![
                Intent::SetZoom(2.5),
                Intent::Pan { dx: 10.0, dy: -4.0 },
                Intent::Resize {
                    width: 800.0,
                    height: 600.0
                },
            ]
        );
        assert_eq!(parse_script("NEXT").unwrap()[0].label, "NEXT");
    }

    #[test]
    fn test_rejects_bad_steps() {
        assert!(parse_script("jump").is_err());
        assert!(parse_script("goto:first").is_err());
        assert!(parse_script("goto").is_err());
        assert!(parse_script("next:2").is_err());
        assert!(parse_script("resize:800").is_err());
    }

    #[test]
    fn test_empty_script() {
        assert!(parse_script("").unwrap().is_empty());
    }
}
