// PMT command-line front end
// Parses a command, runs it through the Project Model and prints the message verbatim
//
// Run with: cargo run --bin pmt -- project list

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pmt_lib::models::{filter_by_tool, OperationResult};
use pmt_lib::{PmtConfig, ProjectModel};

use cli::{AssetCommand, Cli, Command, EngineCommand, ProjectCommand};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("[pmt] {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Run one command; `Ok(false)` means the operation reported a failure
fn run(cli: Cli) -> Result<bool> {
    let config = PmtConfig::load(cli.base_path.clone(), cli.config.clone())
        .context("loading PMT configuration")?;
    let model = ProjectModel::initialize(config).context("initializing studio base folder")?;
    let json = cli.json;

    let result = match cli.command {
        Command::Init => OperationResult::ok(format!(
            "Studio ready at {}.",
            model.layout().base().display()
        )),
        Command::Project(command) => match command {
            ProjectCommand::List => {
                if json {
                    print_json(&model.projects())?;
                } else {
                    for name in model.list_projects() {
                        println!("{}", name);
                    }
                }
                return Ok(true);
            }
            ProjectCommand::Show { name } => {
                let Some(record) = model.project(&name) else {
                    return Ok(report(
                        OperationResult::fail(&pmt_lib::PmtError::ProjectNotFound { name }),
                        json,
                    ));
                };
                print_json(&record)?;
                return Ok(true);
            }
            ProjectCommand::Create { name } => model.create_project(&name),
            ProjectCommand::Rename { old_name, new_name } => {
                model.rename_project(&old_name, &new_name)
            }
            ProjectCommand::Delete { name } => model.delete_project(&name),
        },
        Command::Asset(command) => match command {
            AssetCommand::List { project, tool } => {
                let assets = model.list_assets(&project);
                let assets = match tool {
                    Some(tool) => filter_by_tool(&assets, tool),
                    None => assets,
                };

                if json {
                    print_json(&assets)?;
                } else {
                    for (name, record) in &assets {
                        let tools: Vec<String> =
                            record.present_tools().iter().map(|t| t.to_string()).collect();
                        println!("{}\t{}\t{}", name, record.asset_type, tools.join(","));
                    }
                }
                return Ok(true);
            }
            AssetCommand::Create(args) => model.create_asset(
                &args.project,
                args.asset_type,
                &args.name,
                &args.tools(),
                args.individual_files,
            ),
            AssetCommand::Delete {
                project,
                name,
                tool,
            } => model.delete_asset(&project, &name, tool),
            AssetCommand::Copy(args) => {
                model.copy_move_asset(&args.source, &args.targets, &args.name, false)
            }
            AssetCommand::Move(args) => {
                model.copy_move_asset(&args.source, &args.targets, &args.name, true)
            }
            AssetCommand::Rename {
                project,
                old_name,
                new_name,
            } => model.rename_asset(&project, &old_name, &new_name),
            AssetCommand::Open { path } => model.open_asset(&path),
            AssetCommand::Export {
                project,
                name,
                import,
            } => model.export_asset_from_maya(&project, &name, import),
        },
        Command::Engine(command) => match command {
            EngineCommand::Create { project } => model.create_unreal_project(&project),
            EngineCommand::Import { project, fbx } => model.import_asset_to_unreal(&project, &fbx),
        },
    };

    Ok(report(result, json))
}

/// Print the operation message, stdout on success and stderr on failure
fn report(result: OperationResult, json: bool) -> bool {
    let success = result.success;

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
    } else if success {
        println!("{}", result.message);
    } else {
        eprintln!("{}", result.message);
    }

    success
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn run_args(base: &std::path::Path, args: &[&str]) -> bool {
        let mut argv = vec!["pmt", "--base-path", base.to_str().unwrap()];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn test_project_and_asset_commands() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("PMT");

        assert!(run_args(&base, &["init"]));
        assert!(run_args(&base, &["project", "create", "Demo"]));
        assert!(!run_args(&base, &["project", "create", "Demo"]));
        assert!(run_args(
            &base,
            &["asset", "create", "Demo", "Hero", "--type", "Characters", "--maya"]
        ));
        assert!(base
            .join("Demo")
            .join("Art Depot")
            .join("Characters")
            .join("Hero")
            .join("Maya")
            .join("char_Hero.ma")
            .is_file());
        assert!(run_args(&base, &["asset", "list", "Demo", "--json"]));
        assert!(run_args(&base, &["asset", "delete", "Demo", "Hero", "--tool", "maya"]));
        assert!(run_args(&base, &["project", "delete", "Demo"]));
        assert!(!base.join("Demo").exists());
    }

    #[test]
    fn test_show_unknown_project_fails() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("PMT");
        assert!(!run_args(&base, &["project", "show", "Ghost"]));
    }
}
