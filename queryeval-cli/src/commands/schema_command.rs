use anyhow::Result;
use comfy_table::{ContentArrangement, Table};
use queryeval_db::connect;

const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Dumps the schema of `conn` (tables, columns, keys) as a table.
pub async fn execute(conn: &str) -> Result<()> {
    let mut connection = connect(conn, CONNECT_TIMEOUT).await?;
    let snapshot = queryeval_db::inspect(&mut connection).await;

    if let Some(error) = &snapshot.error {
        anyhow::bail!("schema introspection failed: {error}");
    }

    for table in &snapshot.tables {
        println!("\n{}", table.name);

        let mut rendered = Table::new();
        rendered.set_content_arrangement(ContentArrangement::Dynamic);
        rendered.set_header(vec!["column", "type", "nullable", "pk", "fk", "references"]);

        for column in &table.columns {
            let references = column
                .references
                .as_ref()
                .map(|r| format!("{}.{}", r.table, r.column))
                .unwrap_or_default();

            rendered.add_row(vec![
                column.name.clone(),
                column.data_type.clone(),
                column.is_nullable.to_string(),
                column.is_primary_key.to_string(),
                column.is_foreign_key.to_string(),
                references,
            ]);
        }

        println!("{rendered}");
    }

    Ok(())
}
