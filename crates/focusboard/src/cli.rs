use clap::{Args, Parser, Subcommand, ValueEnum};
use focusboard_core::FilterRequest;
use focusboard_report::{DocumentFormat, ExportFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "focusboard")]
#[command(version)]
#[command(about = "Filter, summarize, chart and export focus session history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the aggregate and requested charts as JSON
    View {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export filtered sessions to a file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(short, long, value_enum, default_value_t = ExportKind::Csv)]
        format: ExportKind,

        /// Destination file (defaults to ~/.focusboard/exports/)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export filtered sessions and send them through the relay
    Send {
        #[command(flatten)]
        filter: FilterArgs,

        /// Destination address
        #[arg(long)]
        to: String,

        #[arg(short, long, value_enum, default_value_t = ExportKind::Csv)]
        format: ExportKind,
    },

    /// List available charts
    Charts,

    /// Fetch session history from the API and replace the data file
    Ingest {
        /// Account to fetch (overrides config)
        #[arg(long)]
        user: Option<String>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,
}

/// Filter and chart selection shared by every data command
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Keep only these goals (repeatable)
    #[arg(long = "goal")]
    pub goals: Vec<String>,

    /// Case-insensitive text matched against every field
    #[arg(long)]
    pub search: Option<String>,

    /// Chart to derive (repeatable, see `focusboard charts`)
    #[arg(long = "chart")]
    pub charts: Vec<String>,
}

impl FilterArgs {
    pub fn to_request(&self) -> FilterRequest {
        FilterRequest {
            start_date: self.start.clone(),
            end_date: self.end.clone(),
            goals: self.goals.clone(),
            search_query: self.search.clone(),
            plot_options: self.charts.clone(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Document,
    DocumentJson,
}

impl From<ExportKind> for ExportFormat {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Csv => ExportFormat::Delimited,
            ExportKind::Document => ExportFormat::Document(DocumentFormat::Text),
            ExportKind::DocumentJson => ExportFormat::Document(DocumentFormat::Json),
        }
    }
}
