use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use locker_core::{Category, VERSION};

/// Locker - notes, links, credentials and files in your digital locker
#[derive(Parser)]
#[command(name = "locker")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "LOCKER_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Path to the session file
    #[arg(long, global = true, env = "LOCKER_SESSION", value_name = "PATH")]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (pretty, plain, json)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show whether a session is active
    Status,

    /// Log in with email and password
    Login(LoginArgs),

    /// Log in with email and 6-digit MPIN
    LoginMpin(LoginMpinArgs),

    /// Create an account
    Signup(SignupArgs),

    /// Forget the local session
    Logout,

    /// Set or change the MPIN
    SetMpin(SetMpinArgs),

    /// Show or update the profile
    Profile(ProfileArgs),

    /// Change the account password
    Password(PasswordArgs),

    /// Manage notes
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },

    /// Manage links
    Links {
        #[command(subcommand)]
        command: LinksCommand,
    },

    /// Manage credentials
    Creds {
        #[command(subcommand)]
        command: CredsCommand,
    },

    /// Manage files
    Files {
        #[command(subcommand)]
        command: FilesCommand,
    },

    /// Search across all record kinds
    Search(SearchArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "LOCKER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the `login-mpin` command
#[derive(Args)]
pub struct LoginMpinArgs {
    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// 6-digit MPIN (prompted when omitted)
    #[arg(long, env = "LOCKER_MPIN", hide_env_values = true)]
    pub mpin: Option<String>,
}

/// Arguments for the `signup` command
#[derive(Args)]
pub struct SignupArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted with confirmation when omitted)
    #[arg(long, env = "LOCKER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Password confirmation (defaults to the password when given by flag)
    #[arg(long)]
    pub confirm: Option<String>,
}

/// Arguments for the `set-mpin` command
#[derive(Args)]
pub struct SetMpinArgs {
    /// Current MPIN, required when one is already set
    #[arg(long)]
    pub old: Option<String>,

    /// New 6-digit MPIN
    #[arg(long)]
    pub new: Option<String>,

    /// New MPIN again
    #[arg(long)]
    pub confirm: Option<String>,
}

/// Arguments for the `profile` command
#[derive(Args)]
pub struct ProfileArgs {
    /// New full name
    #[arg(long)]
    pub name: Option<String>,

    /// New email
    #[arg(long)]
    pub email: Option<String>,
}

/// Arguments for the `password` command
#[derive(Args)]
pub struct PasswordArgs {
    /// Current password
    #[arg(long)]
    pub old: Option<String>,

    /// New password
    #[arg(long)]
    pub new: Option<String>,
}

/// Arguments shared by `list` subcommands
#[derive(Args)]
pub struct ListArgs {
    /// Show masked values in clear
    #[arg(long)]
    pub reveal: bool,
}

/// Arguments shared by `show` subcommands
#[derive(Args)]
pub struct ShowArgs {
    /// Record ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Show masked values in clear
    #[arg(long)]
    pub reveal: bool,
}

/// Arguments shared by `share` subcommands
#[derive(Args)]
pub struct ShareArgs {
    /// Record ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments shared by `delete` subcommands
#[derive(Args)]
pub struct DeleteArgs {
    /// Record ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand)]
pub enum NotesCommand {
    /// List notes
    List(ListArgs),
    /// Show one note
    Show(ShowArgs),
    /// Add a note
    Add(NoteArgs),
    /// Edit a note
    Edit(NoteEditArgs),
    /// Delete a note
    Delete(DeleteArgs),
    /// Print a note as share text
    Share(ShareArgs),
}

#[derive(Args)]
pub struct NoteArgs {
    /// Note title
    #[arg(long)]
    pub title: Option<String>,

    /// Note body
    #[arg(long)]
    pub body: Option<String>,
}

#[derive(Args)]
pub struct NoteEditArgs {
    /// Note ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub fields: NoteArgs,
}

#[derive(Subcommand)]
pub enum LinksCommand {
    /// List links
    List(ListArgs),
    /// Show one link
    Show(ShowArgs),
    /// Add a link
    Add(LinkArgs),
    /// Edit a link
    Edit(LinkEditArgs),
    /// Delete a link
    Delete(DeleteArgs),
    /// Print a link as share text
    Share(ShareArgs),
}

#[derive(Args)]
pub struct LinkArgs {
    /// Link title
    #[arg(long)]
    pub title: Option<String>,

    /// Link URL
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Args)]
pub struct LinkEditArgs {
    /// Link ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub fields: LinkArgs,
}

#[derive(Subcommand)]
pub enum CredsCommand {
    /// List credentials
    List(ListArgs),
    /// Show one credential
    Show(ShowArgs),
    /// Add a credential
    Add(CredArgs),
    /// Edit a credential
    Edit(CredEditArgs),
    /// Delete a credential
    Delete(DeleteArgs),
    /// Print a credential as share text
    Share(ShareArgs),
}

#[derive(Args)]
pub struct CredArgs {
    /// Site or app name
    #[arg(long)]
    pub site: Option<String>,

    /// Username on the site
    #[arg(long)]
    pub username: Option<String>,

    /// Email used on the site
    #[arg(long)]
    pub email: Option<String>,

    /// Password for the site (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct CredEditArgs {
    /// Credential ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub fields: CredArgs,
}

#[derive(Subcommand)]
pub enum FilesCommand {
    /// List files
    List(ListArgs),
    /// Show one file
    Show(ShowArgs),
    /// Upload a file
    Add(FileArgs),
    /// Edit a file's title or description
    Edit(FileEditArgs),
    /// Delete a file
    Delete(DeleteArgs),
    /// Print a file as share text
    Share(ShareArgs),
    /// Download a file
    Download(DownloadArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// Path of the file to upload
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// File title
    #[arg(long)]
    pub title: Option<String>,

    /// Optional description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct FileEditArgs {
    /// File ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Replace the stored file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// File ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Destination file or directory
    #[arg(value_name = "DEST", default_value = ".")]
    pub dest: PathBuf,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Open one result group as a full list
    #[arg(long, value_enum, value_name = "KIND")]
    pub open: Option<SearchGroup>,
}

/// Result group names accepted by `search --open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchGroup {
    Files,
    Links,
    Creds,
    Notes,
}

impl From<SearchGroup> for Category {
    fn from(group: SearchGroup) -> Self {
        match group {
            SearchGroup::Files => Category::Docs,
            SearchGroup::Links => Category::Links,
            SearchGroup::Creds => Category::Creds,
            SearchGroup::Notes => Category::Notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["locker", "notes", "list", "--json", "--reveal"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Notes {
                command: NotesCommand::List(args),
            }) => assert!(args.reveal),
            _ => panic!("expected notes list"),
        }
    }

    #[test]
    fn test_search_open_maps_to_category() {
        let cli = Cli::try_parse_from(["locker", "search", "git", "--open", "creds"]).unwrap();
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.query, "git");
                assert_eq!(args.open.map(Category::from), Some(Category::Creds));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_download_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["locker", "files", "download", "f1"]).unwrap();
        match cli.command {
            Some(Commands::Files {
                command: FilesCommand::Download(args),
            }) => assert_eq!(args.dest, PathBuf::from(".")),
            _ => panic!("expected files download"),
        }
    }
}
