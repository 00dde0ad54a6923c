use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use tickets::controller::Controller;
use tickets::dataset;
use tickets::domain::{TableConfig, TicketError};
use tickets::logging;
use tickets::model::{Model, Status};
use tickets::pipeline::{SortDirection, SortState};
use tickets::ticket::StatusFilter;
use tickets::ui::TableUI;

/// A terminal dashboard for support tickets.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file with ticket rows. Shows the built-in tickets when omitted.
    path: Option<String>,

    /// Initial status filter (all, open, closed, pending).
    #[arg(long, default_value = "all", value_parser = parse_status)]
    status: StatusFilter,

    /// Initial search term.
    #[arg(long, default_value = "")]
    search: String,

    /// Comma separated list of visible column keys.
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Column key to sort by.
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long)]
    desc: bool,

    /// Event poll time in milliseconds.
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Log file location.
    #[arg(long)]
    log_file: Option<String>,
}

fn parse_status(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::from_key(s).ok_or_else(|| format!("unknown status \"{s}\""))
}

fn expand(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(p) => PathBuf::from(p.as_ref()),
        Err(_) => PathBuf::from(path),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Err(e) => {
            ratatui::restore();
            error!("Exiting with error: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => {
            ratatui::restore();
            ExitCode::SUCCESS
        }
    }
}

fn config_from_args(args: &Args) -> TableConfig {
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let sort = match &args.sort {
        Some(key) => SortState::from_key(key, direction),
        None => SortState::new(None, direction),
    };
    let mut cfg = TableConfig::default()
        .event_poll_time(args.poll_ms)
        .initial_status(args.status)
        .initial_search(args.search.clone())
        .initial_sort(sort);
    if let Some(columns) = &args.columns {
        cfg = cfg.initial_columns(columns.iter().map(|c| c.trim().to_string()).collect());
    }
    cfg
}

fn run(args: Args) -> Result<(), TicketError> {
    let log_file = args
        .log_file
        .as_deref()
        .map(expand)
        .unwrap_or_else(|| std::env::temp_dir().join("tickets.log"));
    logging::init(&log_file)?;

    let cfg = config_from_args(&args);
    info!("Starting tickets with {:?}", cfg);

    let tickets = match &args.path {
        Some(path) => dataset::load(expand(path))?,
        None => dataset::builtin(),
    };

    let mut terminal = ratatui::init();
    let height = terminal.size()?.height as usize;

    let mut model = Model::init(&cfg, tickets, height);
    let mut ui = TableUI::new();
    let controller = Controller::new(&cfg);

    while model.status != Status::QUITTING {
        terminal.draw(|f| ui.draw(&model, f))?;

        if let Some(message) = controller.handle_event(&model)? {
            model.update(message)?;
        };
    }

    Ok(())
}
