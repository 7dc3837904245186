use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing::info;

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::input::InputScript;
use crate::scene::SceneKind;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "cmd-history-grid",
    about = "Scripted undo/redo scenes driven by a command history",
    version
)]
pub struct Cli {
    /// TOML config file; built-in defaults when absent.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a scene over a key script and print the final HUD.
    Run(RunArgs),

    /// Print the effective configuration as TOML.
    #[command(name = "show-config")]
    ShowConfig,
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["script", "script_file"])
))]
pub struct RunArgs {
    #[arg(value_enum)]
    pub scene: SceneKind,

    /// Inline key script, e.g. "d . d . z".
    #[arg(long)]
    pub script: Option<String>,

    /// Read the key script from a file.
    #[arg(long)]
    pub script_file: Option<PathBuf>,

    /// Print one line per frame before the final HUD.
    #[arg(long)]
    pub trace_frames: bool,
}

impl RunArgs {
    fn load_script(&self) -> Result<InputScript> {
        match (&self.script, &self.script_file) {
            (Some(inline), None) => InputScript::parse(inline),
            (None, Some(path)) => InputScript::parse(&read_script(path)?),
            _ => Err(GridError::invalid(
                "exactly one of --script or --script-file is required",
            )),
        }
    }
}

fn read_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| GridError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

pub fn run_with_output(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = GridConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Run(args) => run_scene(&args, &config, out),
        Commands::ShowConfig => {
            write!(out, "{}", config.to_toml_string()?)?;
            Ok(())
        }
    }
}

fn run_scene(args: &RunArgs, config: &GridConfig, out: &mut impl Write) -> Result<()> {
    let script = args.load_script()?;
    let mut session = Session::new(args.scene.build(config));
    info!(
        scene = session.scene().title(),
        frames = script.len(),
        "running script"
    );

    for &held in script.frames() {
        let Some(report) = session.step(held) else {
            break;
        };
        if args.trace_frames {
            writeln!(
                out,
                "frame {:>3}  keys={:<12} History: {}   Cursor: {}",
                report.frame,
                report.keys_label(),
                report.history_count,
                report.cursor
            )?;
        }
    }

    let summary = session.summary();
    write!(out, "{}", summary.hud)?;
    writeln!(
        out,
        "Frames: {}{}",
        summary.frames,
        if summary.quit { " (quit)" } else { "" }
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::error::GridError;
    use crate::scene::SceneKind;

    use super::{Cli, Commands, RunArgs, run_with_output};

    fn run_args(scene: SceneKind, script: &str) -> RunArgs {
        RunArgs {
            scene,
            script: Some(script.to_string()),
            script_file: None,
            trace_frames: false,
        }
    }

    fn output(cli: Cli) -> String {
        let mut out = Vec::new();
        run_with_output(cli, &mut out).expect("command should succeed");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn run_command_prints_final_hud() {
        let text = output(Cli {
            config: None,
            command: Commands::Run(run_args(SceneKind::Player, "d . d . z")),
        });
        assert!(text.contains("Player: (656, 360)"), "{text}");
        assert!(text.contains("History: 2   Cursor: 1"), "{text}");
        assert!(text.ends_with("Frames: 5\n"), "{text}");
    }

    #[test]
    fn trace_frames_prints_each_frame() {
        let mut args = run_args(SceneKind::Player, "d z y q");
        args.trace_frames = true;
        let text = output(Cli {
            config: None,
            command: Commands::Run(args),
        });
        let frames: Vec<&str> = text.lines().filter(|l| l.starts_with("frame")).collect();
        assert_eq!(frames.len(), 4, "{text}");
        assert!(frames[1].ends_with("History: 1   Cursor: 0"), "{text}");
        assert!(text.ends_with("Frames: 4 (quit)\n"), "{text}");
    }

    #[test]
    fn show_config_prints_toml() {
        let text = output(Cli {
            config: None,
            command: Commands::ShowConfig,
        });
        assert!(text.contains("[screen]"), "{text}");
        assert!(text.contains("width = 1280"), "{text}");
    }

    #[test]
    fn bad_script_is_a_usage_error() {
        let mut out = Vec::new();
        let error = run_with_output(
            Cli {
                config: None,
                command: Commands::Run(run_args(SceneKind::Units, "t x")),
            },
            &mut out,
        )
        .expect_err("unknown key should fail");
        assert!(matches!(error, GridError::InvalidScript { frame: 1, .. }), "{error}");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn parser_requires_one_script_source() {
        assert!(Cli::try_parse_from(["cmd-history-grid", "run", "player"]).is_err());
        assert!(
            Cli::try_parse_from([
                "cmd-history-grid",
                "run",
                "player",
                "--script",
                "d",
                "--script-file",
                "keys.txt",
            ])
            .is_err()
        );

        let cli = Cli::try_parse_from(["cmd-history-grid", "run", "units", "--script", "t d"])
            .expect("valid arguments");
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.scene, SceneKind::Units);
                assert_eq!(args.script.as_deref(), Some("t d"));
            }
            Commands::ShowConfig => panic!("expected run"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["cmd-history-grid", "show-config", "--config", "grid.toml"])
            .expect("valid arguments");
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("grid.toml")));
    }
}
