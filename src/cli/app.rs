//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{bucket, config_cmd, lecture, results, student, tui};
use crate::api::{Backend, HttpBackend, OfflineBackend};
use crate::storage::{Home, Session};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "REGSIM_LOG";

#[derive(Parser)]
#[command(name = "regsim")]
#[command(author, version, about = "Course-registration simulation client")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured one)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Backend base URL
    #[arg(long, global = true, env = "REGSIM_SERVER")]
    pub server: Option<String>,

    /// Do not contact the backend; reads show demo data
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        nickname: String,
        password: String,
    },

    /// Forget the session
    Logout,

    /// Show the logged-in student
    Whoami,

    /// Create an account
    Signup {
        nickname: String,
        password: String,
        /// Password again
        confirm: String,
        /// Real name
        name: String,
    },

    /// Complete the student profile (college, department, grade, number)
    Onboard {
        #[arg(long)]
        college: i64,

        #[arg(long)]
        department: i64,

        #[arg(long)]
        grade: u8,

        /// 8-digit student number
        #[arg(long = "student-number")]
        student_number: String,
    },

    /// Email verification
    #[command(subcommand)]
    Verify(student::VerifyCommands),

    /// Search lectures
    Lectures {
        /// Filter by course name
        #[arg(long, conflicts_with = "professor")]
        name: Option<String>,

        /// Filter by professor
        #[arg(long)]
        professor: Option<String>,

        /// Target grade (1-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        grade: Option<u8>,

        /// Start after this teach id
        #[arg(long)]
        cursor: Option<i64>,

        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
    },

    /// Manage buckets and course priorities
    #[command(subcommand)]
    Bucket(bucket::BucketCommands),

    /// Show simulation results
    Results {
        /// Show the report of one run
        test_id: Option<i64>,
    },

    /// Measure reaction time (interactive)
    Reaction,

    /// Open the interactive terminal UI
    Tui {
        /// View to open first
        #[arg(long, value_enum, default_value = "buckets")]
        view: tui::View,
    },

    /// Show or change configuration
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

impl Commands {
    /// Commands that take over the terminal
    fn is_interactive(&self) -> bool {
        matches!(self, Commands::Reaction | Commands::Tui { .. })
    }
}

/// Resolved settings and local files shared by all commands
pub struct Env {
    pub home: Home,
    pub output: Output,
    server: Option<String>,
    offline: bool,
}

impl Env {
    pub fn new(home: Home, output: Output, server: Option<String>, offline: bool) -> Self {
        Self {
            home,
            output,
            server,
            offline,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline || self.home.config().offline
    }

    pub fn server_url(&self) -> &str {
        self.server
            .as_deref()
            .unwrap_or(&self.home.config().server_url)
    }

    /// Builds the backend client, authenticated with the session token
    pub fn backend(&self, session: &Session) -> Result<Box<dyn Backend>> {
        if self.is_offline() {
            self.output.verbose_ctx("backend", "offline mode");
            return Ok(Box::new(OfflineBackend));
        }

        self.output
            .verbose_ctx("backend", &format!("using {}", self.server_url()));
        let backend = HttpBackend::new(self.server_url(), self.home.config().timeout())?
            .with_token(session.token.clone());
        Ok(Box::new(backend))
    }

    pub fn load_session(&self) -> Result<Session> {
        self.home.session_store().load()
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.home.session_store().save(session)
    }
}

fn init_tracing(verbose: bool, interactive: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "regsim=debug" } else { "warn" }));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // Log lines would tear the alternate screen apart
    if interactive {
        let _ = builder.with_writer(std::io::sink).try_init();
    } else {
        let _ = builder.with_writer(std::io::stderr).try_init();
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.command.is_interactive());

    let home = Home::open_default()?;
    let format = cli
        .format
        .unwrap_or_else(|| home.config().default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose_ctx("home", &home.dir().display().to_string());
    let env = Env::new(home, output, cli.server, cli.offline);

    match cli.command {
        Commands::Login { nickname, password } => student::login(&env, &nickname, &password)?,
        Commands::Logout => student::logout(&env)?,
        Commands::Whoami => student::whoami(&env)?,
        Commands::Signup {
            nickname,
            password,
            confirm,
            name,
        } => student::signup(&env, &nickname, &password, &confirm, &name)?,
        Commands::Onboard {
            college,
            department,
            grade,
            student_number,
        } => student::onboard(&env, college, department, grade, &student_number)?,
        Commands::Verify(cmd) => student::verify(&env, cmd)?,

        Commands::Lectures {
            name,
            professor,
            grade,
            cursor,
            pages,
        } => lecture::search(&env, name, professor, grade, cursor, pages)?,

        Commands::Bucket(cmd) => bucket::run(cmd, &env)?,

        Commands::Results { test_id } => results::show(&env, test_id)?,

        Commands::Reaction => tui::run(&env, tui::View::Reaction)?,
        Commands::Tui { view } => tui::run(&env, view)?,

        Commands::Config(cmd) => config_cmd::run(cmd, env)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_bucket_move() {
        let cli = Cli::try_parse_from(["regsim", "--offline", "bucket", "move", "2", "up"]).unwrap();
        assert!(cli.offline);
        assert!(matches!(cli.command, Commands::Bucket(_)));
    }

    #[test]
    fn lecture_filters_conflict() {
        let result = Cli::try_parse_from(["regsim", "lectures", "--name", "a", "--professor", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn grade_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["regsim", "lectures", "--grade", "5"]).is_err());
        assert!(Cli::try_parse_from(["regsim", "lectures", "--grade", "4"]).is_ok());
    }

    #[test]
    fn interactive_commands() {
        let cli = Cli::try_parse_from(["regsim", "reaction"]).unwrap();
        assert!(cli.command.is_interactive());
        let cli = Cli::try_parse_from(["regsim", "whoami"]).unwrap();
        assert!(!cli.command.is_interactive());
    }
}
