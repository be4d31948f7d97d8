//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::student::StudentRecord;

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Administrator username
    #[arg(short, long)]
    pub username: String,

    /// Administrator password
    #[arg(short, long)]
    pub password: String,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Student management commands.
#[derive(Debug, Subcommand)]
pub enum StudentCommand {
    /// Register a new student
    Add(AddStudentCommand),

    /// List registered students
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Replace the student record at the given position
    Update(UpdateStudentCommand),

    /// Preview and validate a draft record without registering it
    Draft(DraftStudentCommand),
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddStudentCommand {
    /// The record fields
    #[command(flatten)]
    pub record: StudentArgs,
}

/// Draft command arguments.
#[derive(Debug, Args)]
pub struct DraftStudentCommand {
    /// The draft record fields
    #[command(flatten)]
    pub record: StudentArgs,

    /// Output the draft as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateStudentCommand {
    /// Position of the record to replace (zero-based)
    pub index: usize,

    /// The replacement record fields
    #[command(flatten)]
    pub record: StudentArgs,
}

/// Student record fields as CLI arguments.
#[derive(Debug, Args)]
pub struct StudentArgs {
    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Middle initial, one to three letters
    #[arg(long)]
    pub middle_initial: String,

    /// Family name
    #[arg(long)]
    pub last_name: String,

    /// Birthday as YYYY-MM-DD
    #[arg(long)]
    pub birth_day: String,

    /// Age in years
    #[arg(long)]
    pub age: u32,

    /// Home address
    #[arg(long)]
    pub address: String,

    /// Course identifier (repeat for multiple courses)
    #[arg(long = "course", value_name = "COURSE")]
    pub courses: Vec<String>,
}

impl From<StudentArgs> for StudentRecord {
    fn from(args: StudentArgs) -> Self {
        Self {
            first_name: args.first_name,
            middle_initial: args.middle_initial,
            last_name: args.last_name,
            birth_day: args.birth_day,
            age: args.age,
            address: args.address,
            courses: args.courses,
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
