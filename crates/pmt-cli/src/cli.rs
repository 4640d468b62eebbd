// Command-line definitions
// One subcommand per Project Model operation

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pmt_lib::models::{AssetType, DccTool};

#[derive(Parser, Debug)]
#[command(name = "pmt", version, about = "Studio project and asset manager")]
pub struct Cli {
    /// Studio base folder (defaults to PMT_BASE_PATH, then <local app data>/PMT)
    #[arg(long, global = true, value_name = "DIR")]
    pub base_path: Option<PathBuf>,

    /// Path config file with MAYA / SUBSTANCE / UNREAL entries
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the base folder, parent manifest and Studio Assets
    Init,
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Manage assets inside a project
    #[command(subcommand)]
    Asset(AssetCommand),
    /// Unreal Engine project and imports
    #[command(subcommand)]
    Engine(EngineCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List registered projects
    List,
    /// Show one project record
    Show { name: String },
    /// Create a project with the standard depot layout
    Create { name: String },
    /// Rename a project folder and its manifest entry
    Rename { old_name: String, new_name: String },
    /// Delete a project folder and its manifest entry
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum AssetCommand {
    /// List assets of a project
    List {
        project: String,
        /// Only assets with a file for this tool
        #[arg(long)]
        tool: Option<DccTool>,
    },
    /// Create an asset with placeholder DCC files
    Create(CreateAssetArgs),
    /// Delete one tool's files; the asset goes once nothing is left
    Delete {
        project: String,
        name: String,
        #[arg(long)]
        tool: DccTool,
    },
    /// Copy an asset into other projects
    Copy(TransferArgs),
    /// Move an asset into other projects
    Move(TransferArgs),
    /// Rename an asset and its DCC files
    Rename {
        project: String,
        old_name: String,
        new_name: String,
    },
    /// Open a DCC file or folder with the default application
    Open { path: PathBuf },
    /// Export the Maya scene of an asset to FBX
    Export {
        project: String,
        name: String,
        /// Import the FBX into the project's Unreal project afterwards
        #[arg(long)]
        import: bool,
    },
}

#[derive(Args, Debug)]
pub struct CreateAssetArgs {
    pub project: String,
    pub name: String,
    /// Characters, Environments or Props
    #[arg(long = "type", short = 't')]
    pub asset_type: AssetType,
    #[arg(long)]
    pub maya: bool,
    #[arg(long)]
    pub substance: bool,
    /// Add missing tool files to an existing asset
    #[arg(long)]
    pub individual_files: bool,
}

impl CreateAssetArgs {
    pub fn tools(&self) -> Vec<DccTool> {
        let mut tools = Vec::new();
        if self.maya {
            tools.push(DccTool::Maya);
        }
        if self.substance {
            tools.push(DccTool::Substance);
        }
        tools
    }
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    pub source: String,
    pub name: String,
    /// Target project; repeat for several
    #[arg(long = "to", required = true, value_name = "PROJECT")]
    pub targets: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum EngineCommand {
    /// Create the Unreal project from the empty template
    Create { project: String },
    /// Import an FBX file into the project's Unreal project
    Import { project: String, fbx: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_asset() {
        let cli = Cli::try_parse_from([
            "pmt", "asset", "create", "Demo", "Hero", "--type", "char", "--maya",
        ])
        .unwrap();

        let Command::Asset(AssetCommand::Create(args)) = cli.command else {
            panic!("expected asset create");
        };
        assert_eq!(args.asset_type, AssetType::Characters);
        assert_eq!(args.tools(), vec![DccTool::Maya]);
        assert!(!args.individual_files);
    }

    #[test]
    fn test_parse_move_with_targets() {
        let cli = Cli::try_parse_from([
            "pmt", "asset", "move", "P", "Forest", "--to", "Q", "--to", "R",
        ])
        .unwrap();

        let Command::Asset(AssetCommand::Move(args)) = cli.command else {
            panic!("expected asset move");
        };
        assert_eq!(args.targets, vec!["Q".to_string(), "R".to_string()]);
    }

    #[test]
    fn test_move_requires_target() {
        assert!(Cli::try_parse_from(["pmt", "asset", "move", "P", "Forest"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pmt", "project", "list", "--base-path", "/tmp/studio", "--json", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.base_path, Some(PathBuf::from("/tmp/studio")));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_tool_rejected() {
        let result = Cli::try_parse_from([
            "pmt", "asset", "delete", "Demo", "Hero", "--tool", "blender",
        ]);
        assert!(result.is_err());
    }
}
