use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use jit::Repository;
use jit::artifacts::core::PagerWriter;
use minus::Pager;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Filter directives for diagnostics on stderr, e.g. `JIT_LOG=debug`
const LOG_ENV: &str = "JIT_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";
/// Set to any value to print the log straight to stdout
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "jit",
    version = "0.1.0",
    about = "A minimal version control engine",
    long_about = "jit tracks file content through a staging index, records snapshots \
    in a single commit log shared by all branches, and merges branches with a two-way \
    comparison that marks conflicting files for manual resolution.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages the given files. Directories are staged recursively."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record the staged files on the current branch"
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the commit log, most recent first")]
    Log,
    #[command(
        name = "checkout",
        about = "Restore working files from a commit",
        long_about = "This command overwrites the files recorded by the given commit. \
        Other files, HEAD and the branches are left as they are."
    )]
    Checkout {
        #[arg(index = 1, help = "The commit position")]
        position: usize,
    },
    #[command(name = "branch", about = "Create or list branches")]
    Branch {
        #[command(subcommand)]
        action: BranchAction,
    },
    #[command(
        name = "switch",
        about = "Point HEAD at another branch",
        long_about = "This command changes the current branch. Working files are not rewritten; \
        use checkout to restore them."
    )]
    Switch {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
    #[command(
        name = "merge",
        about = "Merge another branch into the current one"
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        name: String,
    },
    #[command(
        name = "hash-object",
        about = "Compute a file's digest and optionally store its content"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Store the content in the object store")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the content stored under a digest")]
    CatFile {
        #[arg(index = 1, help = "The content digest")]
        digest: String,
    },
    #[command(name = "show", about = "Print a file as recorded by a commit")]
    Show {
        #[arg(index = 1, help = "The commit position")]
        position: usize,
        #[arg(index = 2, help = "The file path")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum BranchAction {
    #[command(name = "create", about = "Create a branch at the current commit")]
    Create {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "list", about = "List branches and their commits")]
    List,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let root = path.as_deref().unwrap_or(pwd.as_path());
            open(root)?.init()?
        }
        Commands::Add { paths } => {
            let report = open(&pwd)?.add(paths)?;
            if !report.is_complete() {
                anyhow::bail!("{} path(s) could not be staged", report.failed_count());
            }
        }
        Commands::Commit { message } => {
            open(&pwd)?.commit(message)?;
        }
        Commands::Log => {
            if std::io::stdout().is_terminal() && std::env::var_os(NO_PAGER_ENV).is_none() {
                let pager = Pager::new();
                let repository =
                    Repository::new(&pwd, Box::new(PagerWriter::new(pager.clone())))?;
                repository.log()?;
                minus::page_all(pager)?;
            } else {
                open(&pwd)?.log()?
            }
        }
        Commands::Checkout { position } => open(&pwd)?.checkout(*position)?,
        Commands::Branch { action } => match action {
            BranchAction::Create { name } => open(&pwd)?.create_branch(name)?,
            BranchAction::List => open(&pwd)?.list_branches()?,
        },
        Commands::Switch { name } => open(&pwd)?.switch_branch(name)?,
        Commands::Merge { name } => {
            open(&pwd)?.merge(name)?;
        }
        Commands::HashObject { write, file } => {
            open(&pwd)?.hash_object(file, *write)?;
        }
        Commands::CatFile { digest } => open(&pwd)?.cat_file(digest)?,
        Commands::Show { position, path } => open(&pwd)?.show(*position, path)?,
    }

    Ok(())
}

fn open(root: &Path) -> jit::Result<Repository> {
    Repository::new(root, Box::new(std::io::stdout()))
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
