use queryeval_core::{ColumnSchema, ForeignKeyRef, SchemaSnapshot, TableSchema};
use tracing::warn;

use crate::connect::Connection;
use crate::error::DbError;

/// SQL Server system-catalog metadata query: tables, columns, their
/// types, nullability, primary-key membership, and foreign-key
/// targets. Ordered by `table_name, column_id` so column order within
/// a table is stable and first-seen-preserving.
const META_QUERY: &str = r#"
SELECT
    t.name AS table_name,
    c.name AS column_name,
    ty.name AS data_type,
    c.is_nullable,
    CASE WHEN pk.column_id IS NOT NULL THEN 1 ELSE 0 END AS is_primary_key,
    fk.referenced_table,
    fk.referenced_column
FROM sys.tables t
INNER JOIN sys.columns c ON t.object_id = c.object_id
INNER JOIN sys.types ty ON c.user_type_id = ty.user_type_id
LEFT JOIN (
    SELECT i.object_id, ic.column_id
    FROM sys.indexes i
    INNER JOIN sys.index_columns ic ON i.object_id = ic.object_id AND i.index_id = ic.index_id
    WHERE i.is_primary_key = 1
) pk ON t.object_id = pk.object_id AND c.column_id = pk.column_id
LEFT JOIN (
    SELECT
        fkc.parent_object_id,
        fkc.parent_column_id,
        rt.name AS referenced_table,
        rc.name AS referenced_column
    FROM sys.foreign_key_columns fkc
    INNER JOIN sys.tables rt ON fkc.referenced_object_id = rt.object_id
    INNER JOIN sys.columns rc ON fkc.referenced_object_id = rc.object_id AND fkc.referenced_column_id = rc.column_id
) fk ON t.object_id = fk.parent_object_id AND c.column_id = fk.parent_column_id
WHERE t.is_ms_shipped = 0
ORDER BY t.name, c.column_id;
"#;

/// Extracts schema metadata from the target database (spec §4.9). Never
/// propagates an error to the caller: any failure collapses to an
/// empty `SchemaSnapshot` carrying the error message.
pub async fn inspect(conn: &mut Connection) -> SchemaSnapshot {
    match try_inspect(conn).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "schema introspection failed");
            SchemaSnapshot::failed(e.to_string())
        }
    }
}

async fn try_inspect(conn: &mut Connection) -> Result<SchemaSnapshot, DbError> {
    let stream = conn.simple_query(META_QUERY).await?;
    let rows = stream.into_first_result().await?;

    let mut tables: Vec<TableSchema> = Vec::new();
    let mut index_of: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for row in rows {
        let table_name: &str = row.get("table_name").unwrap_or_default();
        let column_name: &str = row.get("column_name").unwrap_or_default();
        let data_type: &str = row.get("data_type").unwrap_or_default();
        let is_nullable: bool = row.get("is_nullable").unwrap_or(false);
        let is_primary_key: i32 = row.get("is_primary_key").unwrap_or(0);
        let referenced_table: Option<&str> = row.get("referenced_table");
        let referenced_column: Option<&str> = row.get("referenced_column");

        let idx = *index_of.entry(table_name.to_string()).or_insert_with(|| {
            tables.push(TableSchema {
                name: table_name.to_string(),
                columns: Vec::new(),
            });
            tables.len() - 1
        });

        let references = referenced_table.map(|t| ForeignKeyRef {
            table: t.to_string(),
            column: referenced_column.unwrap_or_default().to_string(),
        });

        tables[idx].columns.push(ColumnSchema {
            name: column_name.to_string(),
            data_type: data_type.to_uppercase(),
            is_nullable,
            is_primary_key: is_primary_key != 0,
            is_foreign_key: references.is_some(),
            references,
        });
    }

    Ok(SchemaSnapshot { tables, error: None })
}
