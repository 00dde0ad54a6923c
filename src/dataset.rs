use polars::prelude::*;
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::TicketError;
use crate::ticket::{ColumnKey, Ticket};

/// The tickets shown when no data file is given.
pub fn builtin() -> Vec<Ticket> {
    vec![
        Ticket::new(
            "#480771",
            "FTP Connection Timeout Issue",
            "ACC-10234",
            "FTP",
            "File Transferring",
            "Jun 10, 2025",
            "Closed",
        ),
        Ticket::new(
            "#521247",
            "Double Billing Issue",
            "billing@company.com",
            "Billing",
            "Invoice",
            "Jun 17, 2025",
            "Open",
        ),
        Ticket::new(
            "#508301",
            "500 Internal Server Error",
            "ACC-45678",
            "Web",
            "404/5 Errors",
            "Jun 11, 2025",
            "Closed",
        ),
    ]
}

/// A csv column converted to strings, tagged with the ticket field it feeds.
struct LoadedColumn {
    key: ColumnKey,
    data: Vec<String>,
}

pub fn load(path: PathBuf) -> Result<Vec<Ticket>, TicketError> {
    check_file(&path)?;
    let start_time = Instant::now();

    let frame = load_csv(&path)?;
    let df = frame.collect()?;

    // Each column is converted in its own thread. Columns that do not map to a
    // ticket field are skipped.
    let names = df.get_column_names();
    let c_: Result<Vec<Option<LoadedColumn>>, _> = names
        .par_iter()
        .map(|name| load_column(&df, name))
        .collect();
    let columns: Vec<LoadedColumn> = c_?.into_iter().flatten().collect();

    for key in ColumnKey::ALL {
        if !columns.iter().any(|c| c.key == key) {
            return Err(TicketError::MissingColumn(key.key().to_string()));
        }
    }

    let mut tickets = vec![Ticket::default(); df.height()];
    for column in columns {
        for (ticket, value) in tickets.iter_mut().zip(column.data) {
            *ticket.field_mut(column.key) = value;
        }
    }

    info!(
        "Loaded {} tickets from {:?} in {}ms",
        tickets.len(),
        path,
        start_time.elapsed().as_millis()
    );
    Ok(tickets)
}

fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.into()))
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
}

fn load_column(df: &DataFrame, col_name: &str) -> Result<Option<LoadedColumn>, PolarsError> {
    let Some(key) = ColumnKey::from_header(col_name) else {
        warn!("Ignoring unknown column \"{col_name}\"");
        return Ok(None);
    };

    let col = df.column(col_name)?.cast(&DataType::String)?;
    let series = col.str()?;
    let data: Vec<String> = series
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect();

    debug!("Column \"{col_name}\" -> {:?}, {} rows", key, data.len());
    Ok(Some(LoadedColumn { key, data }))
}

fn check_file(path: &Path) -> Result<(), TicketError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TicketError::FileNotFound,
        ErrorKind::PermissionDenied => TicketError::PermissionDenied,
        _ => TicketError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(TicketError::LoadingFailed("Not a file!".into()));
    }

    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("CSV") => Ok(()),
        _ => Err(TicketError::UnknownFileType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("tickets_dataset_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn builtin_has_three_tickets() {
        let rows = builtin();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].id, "#521247");
        assert_eq!(rows[1].status, "Open");
    }

    #[test]
    fn loads_csv_with_reordered_and_labelled_headers() {
        let path = write_temp(
            "reordered.csv",
            "status,Ticket ID,subject,impactedAccount,category,subcategory,created,priority\n\
             Pending,#1,\"Login fails, again\",ACC-1,Auth,SSO,\"Jun 1, 2025\",high\n\
             Open,#2,Slow page,,Web,Perf,\"Jun 2, 2025\",low\n",
        );
        let tickets = load(path).unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].id, "#1");
        assert_eq!(tickets[0].status, "Pending");
        assert_eq!(tickets[0].subject, "Login fails, again");
        assert_eq!(tickets[0].created, "Jun 1, 2025");
        assert_eq!(tickets[1].impacted_account, "");
    }

    #[test]
    fn missing_column_is_an_error() {
        let path = write_temp("missing.csv", "id,subject\n#1,a\n");
        assert!(matches!(load(path), Err(TicketError::MissingColumn(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("tickets_dataset_tests/does_not_exist.csv");
        assert!(matches!(load(path), Err(TicketError::FileNotFound)));
    }

    #[test]
    fn non_csv_is_rejected() {
        let path = write_temp("tickets.json", "[]");
        assert!(matches!(load(path), Err(TicketError::UnknownFileType)));
    }
}
