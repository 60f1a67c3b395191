use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::domain::{EmployeeId, EmployeeRecord};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read employee roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid employee roster CSV: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads employee rosters exported as CSV.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EmployeeRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EmployeeRecord>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<RosterRow>()
            .map(|row| row.map(EmployeeRecord::from))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(records = records.len(), "imported employee roster");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Employee_ID", alias = "employee_id")]
    employee_id: String,
    #[serde(rename = "Dept", alias = "department")]
    department: String,
    #[serde(rename = "Revenue_KPI", alias = "revenue_kpi")]
    revenue_kpi: f64,
    #[serde(rename = "Quality_Score", alias = "quality_score")]
    quality_score: f64,
    #[serde(rename = "CSAT_KPI", alias = "csat_kpi")]
    csat_kpi: f64,
    #[serde(rename = "Base_Bonus_Target", alias = "base_bonus_target")]
    base_bonus_target: f64,
}

impl From<RosterRow> for EmployeeRecord {
    fn from(row: RosterRow) -> Self {
        Self {
            employee_id: EmployeeId(row.employee_id),
            department: row.department,
            revenue_kpi: row.revenue_kpi,
            quality_score: row.quality_score,
            csat_kpi: row.csat_kpi,
            base_bonus_target: row.base_bonus_target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_export_column_names() {
        let csv = "Employee_ID,Dept,Revenue_KPI,Quality_Score,CSAT_KPI,Base_Bonus_Target\n\
EMP-001, Sales ,112.4,88.1,4.6,5000\n\
EMP-002,Eng,94.0,61.5,3.2,10000\n";

        let records = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id, EmployeeId::from("EMP-001"));
        assert_eq!(records[0].department, "Sales");
        assert_eq!(records[1].base_bonus_target, 10000.0);
    }

    #[test]
    fn accepts_snake_case_headers() {
        let csv = "employee_id,department,revenue_kpi,quality_score,csat_kpi,base_bonus_target\n\
EMP-010,Ops,100,80,4.0,5000\n";

        let records = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");
        assert_eq!(records[0].quality_score, 80.0);
        assert_eq!(records[0].csat_kpi, 4.0);
    }

    #[test]
    fn rejects_non_numeric_metrics() {
        let csv = "Employee_ID,Dept,Revenue_KPI,Quality_Score,CSAT_KPI,Base_Bonus_Target\n\
EMP-001,Sales,high,88.1,4.6,5000\n";

        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("bad metric");
        assert!(matches!(error, RosterImportError::Csv(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error =
            RosterImporter::from_path("./does-not-exist.csv").expect_err("expected io error");

        match error {
            RosterImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
