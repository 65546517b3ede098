use std::collections::HashMap;

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::table::Table;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DisplayStyle {
    Table,
    Json,
    Csv,
}

/// Rendering contract for records shown by the list subcommands.
pub trait TerminalDisplay {
    fn table_titles() -> Vec<&'static str>;
    fn table_row(self) -> Vec<String>;

    fn csv_titles() -> Vec<&'static str>;
    fn csv_row(self) -> HashMap<&'static str, String>;
}

pub fn display_json<T: Serialize>(o: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&o)?);
    Ok(())
}

pub fn display_list<T: Serialize + TerminalDisplay>(
    list: Vec<T>,
    style: DisplayStyle,
    headless: bool,
    csv_titles: Option<String>,
) -> Result<()> {
    match style {
        DisplayStyle::Table => {
            if list.is_empty() {
                println!("<empty list>");
                return Ok(());
            }
            let mut table = Table::new(T::table_titles(), headless);
            for item in list {
                table.add(item.table_row());
            }
            table.show();
        }
        DisplayStyle::Csv => {
            let titles = select_csv_titles::<T>(csv_titles)?;
            if !headless {
                println!("{}", titles.join(","));
            }
            for item in list {
                let mut row = item.csv_row();
                let values: Vec<_> = titles
                    .iter()
                    .map(|title| escape_csv(row.remove(*title).unwrap_or_default()))
                    .collect();
                println!("{}", values.join(","));
            }
        }
        DisplayStyle::Json => display_json(list)?,
    }
    Ok(())
}

fn select_csv_titles<T: TerminalDisplay>(filter: Option<String>) -> Result<Vec<&'static str>> {
    let mut titles = T::csv_titles();
    if let Some(filter) = filter {
        let wanted: Vec<_> = filter.split(',').map(str::trim).collect();
        titles.retain(|t| wanted.contains(t));
    }
    if titles.is_empty() {
        bail!("No csv column to display, available: {:?}", T::csv_titles());
    }
    Ok(titles)
}

// Offering descriptions are free text, quote cells that would break the
// separator.
fn escape_csv(value: String) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row;

    impl TerminalDisplay for Row {
        fn table_titles() -> Vec<&'static str> {
            vec!["Id", "Name"]
        }

        fn table_row(self) -> Vec<String> {
            vec![String::from("p1"), String::from("Plomería")]
        }

        fn csv_titles() -> Vec<&'static str> {
            vec!["id", "name", "active"]
        }

        fn csv_row(self) -> HashMap<&'static str, String> {
            HashMap::new()
        }
    }

    #[test]
    fn test_select_csv_titles() {
        assert_eq!(
            select_csv_titles::<Row>(None).unwrap(),
            vec!["id", "name", "active"]
        );
        assert_eq!(
            select_csv_titles::<Row>(Some(String::from("name, active"))).unwrap(),
            vec!["name", "active"]
        );
        assert_eq!(
            select_csv_titles::<Row>(Some(String::from("active,id"))).unwrap(),
            vec!["id", "active"]
        );

        assert!(select_csv_titles::<Row>(Some(String::from("nope"))).is_err());
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv(String::from("Electricista")), "Electricista");
        assert_eq!(
            escape_csv(String::from("Cambio de enchufes, revisión")),
            "\"Cambio de enchufes, revisión\""
        );
        assert_eq!(escape_csv(String::from("say \"hi\"")), "\"say \"\"hi\"\"\"");
    }
}
