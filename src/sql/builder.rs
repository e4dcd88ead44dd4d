//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the customers table.

use crate::customer::FilterField;

pub const CUSTOMERS_TABLE: &str = "customers";

/// Columns written on insert/update, in bind order.
const WRITE_COLUMNS: &[&str] = &[
    "firstname",
    "lastname",
    "email",
    "phone",
    "street_line1",
    "street_line2",
    "city",
    "state",
    "country",
    "zipcode",
    "acc_active",
];

/// Quote identifier for PostgreSQL (safe: only from config and constants).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

fn select_column_list() -> String {
    std::iter::once("id")
        .chain(WRITE_COLUMNS.iter().copied())
        .chain(["created_at", "updated_at"])
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parameterized statements bound to one qualified customers table.
#[derive(Clone, Debug)]
pub struct CustomerQueries {
    table: String,
}

impl CustomerQueries {
    pub fn new(schema: &str) -> Self {
        CustomerQueries {
            table: qualified_table(schema, CUSTOMERS_TABLE),
        }
    }

    /// SELECT every row, insertion (id) order.
    pub fn select_all(&self) -> String {
        format!("SELECT {} FROM {} ORDER BY \"id\"", select_column_list(), self.table)
    }

    /// SELECT by primary key. Param: $1 id.
    pub fn select_by_id(&self) -> String {
        format!("SELECT {} FROM {} WHERE \"id\" = $1", select_column_list(), self.table)
    }

    /// SELECT by exact email. Param: $1 email.
    pub fn select_by_email(&self) -> String {
        format!("SELECT {} FROM {} WHERE \"email\" = $1", select_column_list(), self.table)
    }

    /// SELECT rows whose column equals $1, insertion order.
    pub fn select_by_field(&self, field: FilterField) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY \"id\"",
            select_column_list(),
            self.table,
            quoted(field.column())
        )
    }

    /// INSERT writable columns plus both timestamps. Params: WRITE_COLUMNS, then created_at, updated_at.
    pub fn insert(&self) -> String {
        let cols: Vec<String> = WRITE_COLUMNS
            .iter()
            .copied()
            .chain(["created_at", "updated_at"])
            .map(quoted)
            .collect();
        let placeholders: Vec<String> = (1..=cols.len()).map(|n| format!("${}", n)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.table,
            cols.join(", "),
            placeholders.join(", "),
            select_column_list()
        )
    }

    /// UPDATE writable columns and updated_at by id. Params: WRITE_COLUMNS, then updated_at, then id.
    /// updated_at never drops below created_at.
    pub fn update(&self) -> String {
        let mut sets: Vec<String> = WRITE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", quoted(c), i + 1))
            .collect();
        let n = WRITE_COLUMNS.len();
        sets.push(format!("\"updated_at\" = GREATEST(${}, \"created_at\")", n + 1));
        format!(
            "UPDATE {} SET {} WHERE \"id\" = ${} RETURNING {}",
            self.table,
            sets.join(", "),
            n + 2,
            select_column_list()
        )
    }

    /// DELETE by primary key. Param: $1 id.
    pub fn delete(&self) -> String {
        format!("DELETE FROM {} WHERE \"id\" = $1", self.table)
    }
}
