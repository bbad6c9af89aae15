mod script;

use actionhub_input::{ActionId, InputSettings};
use anyhow::Context;
use clap::{Parser, Subcommand};
use script::{Script, replay};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "actionhub-cli", about = "Replay input callbacks through the action layer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the action catalogue
    Info {
        /// Settings file whose policy overrides should be shown
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Replay a YAML script of raw callbacks and print the hub state
    Replay {
        /// Script to replay
        script: PathBuf,
        /// Settings file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in walkthrough script
    Demo,
}

const DEMO_SCRIPT: &str = r#"
devices:
  mouse: true
  gamepads: 1
steps:
  - op: callback
    action: move
    phase: performed
    value: [0.5, -0.3]
    device: Keyboard
  - op: callback
    action: jump
    phase: started
    value: true
    device: Keyboard
  - op: callback
    action: rotate
    phase: performed
    value: [4.0, 2.0]
    device: Mouse
  - op: callback
    action: rotate_controller
    phase: performed
    value: [0.25, 0.75]
    device: XInputGamepad
  - op: callback
    action: attack
    phase: started
    device: Mouse
  - op: callback
    action: attack
    phase: performed
    device: Mouse
  - op: callback
    action: jump
    phase: canceled
    device: Keyboard
  - op: callback
    action: scroll_wheel
    phase: performed
    value: [0.0, 120.0]
    device: Mouse
"#;

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<InputSettings> {
    match path {
        Some(path) => InputSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(InputSettings::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { config } => {
            let settings = load_settings(config.as_ref())?;
            println!("actionhub-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", actionhub_input::crate_info());
            for action in ActionId::ALL {
                match action.button() {
                    Some(button) => println!(
                        "  {:<18} button  {:?}",
                        action.name(),
                        settings.policy_for(button)
                    ),
                    None => println!("  {:<18} {:?}", action.name(), action.kind()),
                }
            }
        }
        Commands::Replay {
            script,
            config,
            json,
        } => {
            let settings = load_settings(config.as_ref())?;
            let parsed = Script::load(&script)
                .with_context(|| format!("failed to load script {}", script.display()))?;
            let outcome = replay(&parsed, &settings);
            for err in &outcome.errors {
                eprintln!("step {}: {}", err.index, err.message);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.snapshot)?);
            } else {
                println!(
                    "Replayed {} steps ({} rejected)",
                    outcome.steps_run,
                    outcome.errors.len()
                );
                println!("{}", outcome.snapshot);
            }
        }
        Commands::Demo => {
            let parsed = Script::from_yaml_str(DEMO_SCRIPT)?;
            let outcome = replay(&parsed, &InputSettings::default());
            println!("{}", outcome.snapshot);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_script_runs_clean() {
        let parsed = Script::from_yaml_str(DEMO_SCRIPT).unwrap();
        let outcome = replay(&parsed, &InputSettings::default());
        assert!(outcome.errors.is_empty());
        let snap = outcome.snapshot;
        assert!(!snap.buttons[&actionhub_input::ButtonAction::Jump]);
        assert!(snap.buttons[&actionhub_input::ButtonAction::Attack]);
        assert_eq!(snap.scroll_wheel_input, 120.0);
        assert_eq!(snap.rotate_controller_input, glam::Vec2::new(0.25, -0.75));
    }

    #[test]
    fn cli_parses_replay() {
        let cli = Cli::try_parse_from(["actionhub-cli", "replay", "run.yaml", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Replay { json: true, .. }));
    }
}
