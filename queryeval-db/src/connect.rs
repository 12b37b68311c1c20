use std::time::Duration;

use tiberius::{Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::error::DbError;

/// A live connection to the target SQL Server. `tiberius` runs over a
/// plain `tokio::net::TcpStream`; `tokio-util`'s compat shim is what
/// bridges tiberius's `AsyncRead + AsyncWrite` expectations to tokio's.
pub type Connection = Client<Compat<TcpStream>>;

/// Opens a connection with a hard connect timeout (spec §4.2 step 3,
/// §4.6 step 2). `connection_string` is a tiberius ADO-style string —
/// the pure-Rust driver's analogue of the ODBC connection strings the
/// prototype this system replaces used.
pub async fn connect(connection_string: &str, connect_timeout: Duration) -> Result<Connection, DbError> {
    let config = Config::from_ado_string(connection_string)
        .map_err(|e| DbError::InvalidConnectionString(e.to_string()))?;

    let attempt = async {
        let tcp = TcpStream::connect(config.get_addr()).await?;
        tcp.set_nodelay(true)?;
        let client = Client::connect(config, tcp.compat_write()).await?;
        Ok::<Connection, DbError>(client)
    };

    match tokio::time::timeout(connect_timeout, attempt).await {
        Ok(result) => result,
        Err(_) => Err(DbError::ConnectTimeout(connect_timeout)),
    }
}
