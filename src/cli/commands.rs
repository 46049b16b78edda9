//! CLI command implementations
//!
//! Each command opens what it needs, does its work, closes every store it
//! opened and returns the response payload. `run` writes that payload (or
//! the error) as one JSON object on stdout.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::codec::FieldError;
use crate::config::Config;
use crate::document::{Document, DocumentRow};
use crate::observability::Logger;
use crate::operator::OperatorTable;
use crate::record::{CatalogRecord, CustomerRecord, FixedRecord};
use crate::storage::{CatalogDb, CustomerDb, RecordFile};

use super::args::{Cli, Command, DocumentAction, OperatorAction, RecordAction};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match run_command(cli) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Load configuration, apply the log level and run the command
pub fn run_command(cli: Cli) -> CliResult<Value> {
    let config = match cli.config {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    Logger::set_min_severity(config.severity()?);

    execute(&config, cli.command)
}

/// Run one command against the stores described by `config`
pub fn execute(config: &Config, command: Command) -> CliResult<Value> {
    match command {
        Command::Init => init(config),
        Command::Catalog { action } => run_record_action::<CatalogRecord>(
            &config.catalog_path(),
            config.catalog_layout,
            action,
        ),
        Command::Customer { action } => run_record_action::<CustomerRecord>(
            &config.customer_path(),
            config.customer_layout,
            action,
        ),
        Command::Document { action } => run_document_action(config, action),
        Command::Operator { action } => run_operator_action(config, action),
    }
}

/// Create the data directory, both stores and the operator table
///
/// Existing stores and tables are kept as they are.
pub fn init(config: &Config) -> CliResult<Value> {
    let data_dir = config.data_path();
    fs::create_dir_all(data_dir).map_err(|e| {
        CliError::io_error(format!(
            "Failed to create directory {}: {}",
            data_dir.display(),
            e
        ))
    })?;

    let catalog = CatalogDb::open_or_create(config.catalog_path(), config.catalog_layout)?;
    let catalog_records = catalog.record_count();
    catalog.close()?;

    let customers = CustomerDb::open_or_create(config.customer_path(), config.customer_layout)?;
    let customer_records = customers.record_count();
    customers.close()?;

    let operator_path = config.operator_path();
    let operators = match OperatorTable::load_from_file(&operator_path, &config.operator_key)? {
        Some(table) => table,
        None => {
            let table = OperatorTable::new();
            table.save_to_file(&operator_path, &config.operator_key)?;
            table
        }
    };

    Ok(json!({
        "data_dir": config.data_dir,
        "catalog_records": catalog_records,
        "customer_records": customer_records,
        "operators": operators.record_count(),
    }))
}

fn run_record_action<R>(path: &Path, layout: R::Layout, action: RecordAction) -> CliResult<Value>
where
    R: FixedRecord + Default + Serialize,
    R::Field: FromStr<Err = FieldError>,
{
    let mut store =
        RecordFile::<R>::open(path, layout)?.ok_or_else(|| CliError::not_initialized(path))?;

    let data = match action {
        RecordAction::Count => json!({ "count": store.record_count() }),
        RecordAction::List => {
            let records = store.read_all()?;
            json!({ "count": records.len(), "records": records })
        }
        RecordAction::Show { index } => {
            let record = store.read_record(index)?;
            json!({ "index": index, "record": record })
        }
        RecordAction::Add { set } => {
            let record = apply_assignments(R::default(), &set)?;
            let index = store.append_record(&record)?;
            json!({ "index": index, "record": record })
        }
        RecordAction::Insert { index, set } => {
            let record = apply_assignments(R::default(), &set)?;
            store.insert_record(index, &record)?;
            json!({ "index": index, "record": record })
        }
        RecordAction::Update { index, set } => {
            let record = apply_assignments(store.read_record(index)?, &set)?;
            store.update_record(index, &record)?;
            json!({ "index": index, "record": record })
        }
        RecordAction::Remove { index } => {
            let removed = store.read_record(index)?;
            store.remove_record(index)?;
            json!({ "index": index, "removed": removed, "count": store.record_count() })
        }
    };

    store.close()?;
    Ok(data)
}

fn apply_assignments<R>(mut record: R, assignments: &[(String, String)]) -> CliResult<R>
where
    R: FixedRecord,
    R::Field: FromStr<Err = FieldError>,
{
    for (name, value) in assignments {
        let field: R::Field = name.parse()?;
        record.set_field_value(field, value)?;
    }
    Ok(record)
}

fn run_document_action(config: &Config, action: DocumentAction) -> CliResult<Value> {
    match action {
        DocumentAction::Show { path } => {
            let document = Document::load_from_file(&path, &config.customer_layout)?;
            Ok(serde_json::to_value(&document)?)
        }
        DocumentAction::AddRow { path, set } => {
            let mut document = if path.exists() {
                Document::load_from_file(&path, &config.customer_layout)?
            } else {
                Document::new()
            };

            let mut row = DocumentRow::default();
            for (name, value) in &set {
                row.set_field_value(name, value)?;
            }
            document.rows.push_back(row.clone());
            document.save_to_file(&path, &config.customer_layout)?;

            Ok(json!({
                "path": path.display().to_string(),
                "rows": document.rows.row_count(),
                "row": row,
            }))
        }
    }
}

fn run_operator_action(config: &Config, action: OperatorAction) -> CliResult<Value> {
    let path = config.operator_path();
    let key = &config.operator_key;
    let mut table =
        OperatorTable::load_from_file(&path, key)?.ok_or_else(|| CliError::not_initialized(&path))?;

    match action {
        OperatorAction::Count => Ok(json!({ "count": table.record_count() })),
        OperatorAction::List => Ok(json!({
            "count": table.record_count(),
            "operators": table.operators(),
        })),
        OperatorAction::Find { name } => {
            Ok(json!({ "name": name, "index": table.find_operator(&name) }))
        }
        OperatorAction::Set { name, password } => {
            let index = table.set_operator(&name, &password)?;
            table.save_to_file(&path, key)?;
            Ok(json!({ "index": index, "count": table.record_count() }))
        }
        OperatorAction::Remove { index } => {
            let removed = table.remove_record(index)?;
            table.save_to_file(&path, key)?;
            Ok(json!({
                "index": index,
                "removed": removed,
                "count": table.record_count(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().join("data").display().to_string(),
            ..Config::default()
        }
    }

    fn set(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn catalog(config: &Config, action: RecordAction) -> CliResult<Value> {
        execute(config, Command::Catalog { action })
    }

    #[test]
    fn test_init_creates_stores() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let data = init(&config).unwrap();
        assert_eq!(data["catalog_records"], 0);
        assert!(config.catalog_path().exists());
        assert!(config.customer_path().exists());

        // Running init again keeps existing stores
        catalog(
            &config,
            RecordAction::Add {
                set: set(&[("code", "A1")]),
            },
        )
        .unwrap();
        let data = init(&config).unwrap();
        assert_eq!(data["catalog_records"], 1);
    }

    fn operator(config: &Config, action: OperatorAction) -> CliResult<Value> {
        execute(config, Command::Operator { action })
    }

    #[test]
    fn test_operator_set_find_remove() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let data = init(&config).unwrap();
        assert_eq!(data["operators"], 0);

        for (name, password) in [("Claire", "tulip"), ("Martin", "rose")] {
            operator(
                &config,
                OperatorAction::Set {
                    name: name.to_string(),
                    password: password.to_string(),
                },
            )
            .unwrap();
        }

        let found = operator(
            &config,
            OperatorAction::Find {
                name: "MARTIN".to_string(),
            },
        )
        .unwrap();
        assert_eq!(found["index"], 1);

        let listed = operator(&config, OperatorAction::List).unwrap();
        assert_eq!(listed["operators"][0]["name"], "Claire");
        assert!(listed["operators"][0].get("password").is_none());

        let removed = operator(&config, OperatorAction::Remove { index: 0 }).unwrap();
        assert_eq!(removed["removed"]["name"], "Claire");
        assert_eq!(removed["count"], 1);

        let table = OperatorTable::load_from_file(config.operator_path(), &config.operator_key)
            .unwrap()
            .unwrap();
        assert_eq!(table.name(0).unwrap(), "Martin");
        assert_eq!(table.password(0).unwrap(), "rose");
    }

    #[test]
    fn test_operator_before_init() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let err = operator(&config, OperatorAction::Count).unwrap_err();
        assert_eq!(err.code_str(), "INV_CLI_NOT_INITIALIZED");
    }

    #[test]
    fn test_catalog_commands_before_init() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let err = catalog(&config, RecordAction::Count).unwrap_err();
        assert_eq!(err.code_str(), "INV_CLI_NOT_INITIALIZED");
    }

    #[test]
    fn test_catalog_add_insert_update_remove() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        init(&config).unwrap();

        catalog(
            &config,
            RecordAction::Add {
                set: set(&[("code", "ABC123"), ("designation", "Widget"), ("selling_price", "2")]),
            },
        )
        .unwrap();
        catalog(
            &config,
            RecordAction::Insert {
                index: 0,
                set: set(&[("code", "ZZ9")]),
            },
        )
        .unwrap();
        catalog(
            &config,
            RecordAction::Update {
                index: 1,
                set: set(&[("unity", "pcs")]),
            },
        )
        .unwrap();

        let listed = catalog(&config, RecordAction::List).unwrap();
        assert_eq!(listed["count"], 2);
        assert_eq!(listed["records"][0]["code"], "ZZ9");
        assert_eq!(listed["records"][1]["code"], "ABC123");
        assert_eq!(listed["records"][1]["unity"], "pcs");
        assert_eq!(listed["records"][1]["selling_price"], 2.0);

        let removed = catalog(&config, RecordAction::Remove { index: 0 }).unwrap();
        assert_eq!(removed["removed"]["code"], "ZZ9");
        assert_eq!(removed["count"], 1);
    }

    #[test]
    fn test_invalid_field_value_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        init(&config).unwrap();

        let err = catalog(
            &config,
            RecordAction::Add {
                set: set(&[("code", "AB-1")]),
            },
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "INV_CLI_INVALID_ARGUMENT");

        let err = catalog(
            &config,
            RecordAction::Add {
                set: set(&[("colour", "red")]),
            },
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "INV_CLI_INVALID_ARGUMENT");

        let count = catalog(&config, RecordAction::Count).unwrap();
        assert_eq!(count["count"], 0);
    }

    #[test]
    fn test_show_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        init(&config).unwrap();

        let err = execute(
            &config,
            Command::Customer {
                action: RecordAction::Show { index: 0 },
            },
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "INV_INDEX_OUT_OF_BOUNDS");
    }

    #[test]
    fn test_document_add_row_then_show() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let path = temp_dir.path().join("quote.doc");

        for code in ["A1", "B2"] {
            execute(
                &config,
                Command::Document {
                    action: DocumentAction::AddRow {
                        path: path.clone(),
                        set: set(&[("code", code), ("quantity", "3")]),
                    },
                },
            )
            .unwrap();
        }

        let shown = execute(
            &config,
            Command::Document {
                action: DocumentAction::Show { path },
            },
        )
        .unwrap();
        assert_eq!(shown["doc_type"], "quotation");
        assert_eq!(shown["rows"][1]["code"], "B2");
        assert_eq!(shown["rows"][1]["quantity"], 3.0);
    }
}
