//! Query result cursor
//!
//! A one-shot iterator over result rows. Column positions are looked up by
//! name once, then values are read by index for each row.

use anyhow::{anyhow, Result};
use rusqlite::types::Value;

#[derive(Debug)]
pub struct Cursor {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Vec<Value>>,
}

impl Cursor {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows not yet consumed
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like `column_index` but an error names the missing column
    pub fn column_index_or_err(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| anyhow!("column '{}' not in projection {:?}", name, self.columns))
    }
}

impl Iterator for Cursor {
    type Item = CursorRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|values| CursorRow { values })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// One result row
#[derive(Debug, Clone)]
pub struct CursorRow {
    values: Vec<Value>,
}

impl CursorRow {
    /// Integer value; `None` for NULL, missing, or non-integer cells
    pub fn get_i64(&self, index: usize) -> Option<i64> {
        match self.values.get(index)? {
            Value::Integer(v) => Some(*v),
            Value::Real(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Non-negative integer value (sizes)
    pub fn get_u64(&self, index: usize) -> Option<u64> {
        self.get_i64(index).and_then(|v| u64::try_from(v).ok())
    }

    /// Text value; integers are rendered as text, NULL is `None`
    pub fn get_string(&self, index: usize) -> Option<String> {
        match self.values.get(index)? {
            Value::Text(s) => Some(s.clone()),
            Value::Integer(v) => Some(v.to_string()),
            Value::Real(v) => Some(v.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor() -> Cursor {
        Cursor::new(
            vec!["_id".to_string(), "_display_name".to_string(), "_size".to_string()],
            vec![
                vec![Value::Integer(1), Value::Text("a.mp3".to_string()), Value::Integer(10)],
                vec![Value::Integer(2), Value::Null, Value::Null],
            ],
        )
    }

    #[test]
    fn test_column_lookup() {
        let c = cursor();
        assert_eq!(c.column_index("_size"), Some(2));
        assert!(c.column_index("number").is_none());
        assert!(c.column_index_or_err("number").is_err());
    }

    #[test]
    fn test_iterates_once_in_order() {
        let mut c = cursor();
        assert_eq!(c.remaining(), 2);
        let first = c.next().unwrap();
        assert_eq!(first.get_i64(0), Some(1));
        assert_eq!(first.get_string(1).as_deref(), Some("a.mp3"));
        assert_eq!(first.get_u64(2), Some(10));

        let second = c.next().unwrap();
        assert_eq!(second.get_string(1), None);
        assert_eq!(second.get_u64(2), None);

        assert!(c.next().is_none());
        assert!(c.next().is_none());
    }

    #[test]
    fn test_negative_size_is_none() {
        let row = CursorRow {
            values: vec![Value::Integer(-5)],
        };
        assert_eq!(row.get_u64(0), None);
        assert_eq!(row.get_i64(0), Some(-5));
    }
}
