mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "karne",
    version,
    about = "Split a class's report-card PDF into one file per student"
)]
struct Cli {
    /// Roster store (JSON)
    #[arg(
        long,
        global = true,
        env = "KARNE_DATA",
        value_name = "FILE",
        default_value = "data/student_data.json"
    )]
    data: PathBuf,

    /// Log level for the PDF library's own diagnostics
    #[arg(long, global = true, value_name = "LEVEL", default_value = "error")]
    pdf_log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage classes
    Class {
        #[command(subcommand)]
        action: ClassAction,
    },
    /// Manage the students of a class
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },
    /// Import students from a spreadsheet (xlsx/xls/ods) into a class
    Import {
        class: String,
        file: PathBuf,
    },
    /// Split a report-card PDF into per-student pages
    Split {
        /// Class whose roster is matched against the pages
        class: String,

        /// Path to the multi-page PDF
        pdf_file: PathBuf,

        /// Write one PDF per report into this directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Write all reports into a single ZIP archive
        #[arg(long, value_name = "FILE")]
        zip: Option<PathBuf>,

        /// File naming: number (roster number) or name (student name)
        #[arg(long, default_value = "number")]
        naming: String,

        /// Discard the report for this 1-based page (repeatable)
        #[arg(long = "drop-page", value_name = "N")]
        drop_page: Vec<usize>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum ClassAction {
    /// List classes and their student counts
    List,
    /// Create an empty class
    Add { name: String },
    /// Delete a class and all its students
    Remove { name: String },
}

#[derive(Subcommand)]
enum StudentAction {
    /// List the students of a class in roster order
    List {
        class: String,
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Add a student (replaces a student with the same name)
    Add {
        class: String,
        #[command(flatten)]
        student: StudentArgs,
    },
    /// Replace a student's record, optionally renaming them
    Update {
        class: String,
        /// Current name of the student
        old_name: String,
        #[command(flatten)]
        student: StudentArgs,
    },
    /// Remove a student from a class
    Remove { class: String, name: String },
}

#[derive(Args)]
pub struct StudentArgs {
    /// Full name as printed on the report card
    pub name: String,
    /// School roster number
    pub roster_number: String,

    #[arg(long)]
    pub mother_name: Option<String>,
    #[arg(long)]
    pub mother_email: Option<String>,
    #[arg(long)]
    pub mother_phone: Option<String>,
    #[arg(long)]
    pub father_name: Option<String>,
    #[arg(long)]
    pub father_email: Option<String>,
    #[arg(long)]
    pub father_phone: Option<String>,
}

fn init_logger(pdf_log_level: LevelFilter) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.parse_filters(&format!("lopdf={pdf_log_level}"));
    builder.parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.pdf_log_level);

    let data = cli.data;
    let result = match cli.command {
        Commands::Class { action } => match action {
            ClassAction::List => commands::class::list(&data),
            ClassAction::Add { name } => commands::class::add(&data, &name),
            ClassAction::Remove { name } => commands::class::remove(&data, &name),
        },
        Commands::Student { action } => match action {
            StudentAction::List { class, output } => {
                commands::student::list(&data, &class, &output)
            }
            StudentAction::Add { class, student } => {
                commands::student::add(&data, &class, student)
            }
            StudentAction::Update {
                class,
                old_name,
                student,
            } => commands::student::update(&data, &class, &old_name, student),
            StudentAction::Remove { class, name } => {
                commands::student::remove(&data, &class, &name)
            }
        },
        Commands::Import { class, file } => commands::import::run(&data, &class, &file),
        Commands::Split {
            class,
            pdf_file,
            out_dir,
            zip,
            naming,
            drop_page,
            output,
        } => commands::split::run(
            &data,
            &class,
            pdf_file,
            commands::split::SplitOutput {
                out_dir,
                zip,
                naming,
                drop_pages: drop_page,
            },
            &output,
            cli.pdf_log_level,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
