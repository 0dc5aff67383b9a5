use std::{
    convert::Infallible,
    env,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use hyper::{server::conn::http1, service};
use hyper_util::rt::TokioIo;
use tokio::{net::TcpListener, runtime::Runtime};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let port: u16 = env::var("PORT")?.parse()?;
    let username = env::var("PG_USERNAME")?;
    let password = env::var("PG_PASSWORD")?;
    let hostname = env::var("PG_HOSTNAME")?;
    let database = env::var("PG_DATABASE")?;
    let pg_port = match env::var("PG_PORT") {
        Ok(value) => value.parse()?,
        _ => 5432,
    };

    let runtime = Runtime::new()?;

    // Connect to the database and prepare the schema
    let db = runtime.block_on(async {
        let (client, connection) = db::Config::new()
            .user(&username)
            .password(&password)
            .host(&hostname)
            .dbname(&database)
            .port(pg_port)
            .connect(db::NoTls)
            .await?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                log::error!("database connection error: {err}");
            }
        });
        let db = db::Database::from(client);
        if db.setup().await.is_err() {
            anyhow::bail!("failed to prepare the database schema");
        }
        anyhow::Ok(db)
    })?;
    let db = Arc::new(db);

    // Accept connections until interrupted
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    runtime.block_on(async {
        let listener = TcpListener::bind(addr).await?;
        log::info!("server running on http://{addr}");
        loop {
            let (stream, _) = tokio::select! {
                accepted = listener.accept() => accepted?,
                _ = tokio::signal::ctrl_c() => break,
            };
            let db_outer = db.clone();
            tokio::spawn(async move {
                let service = service::service_fn(move |req| {
                    let db_inner = db_outer.clone();
                    async move { Ok::<_, Infallible>(api::try_respond(req, &db_inner).await) }
                });
                if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(stream), service).await {
                    log::error!("failed to serve connection: {err}");
                }
            });
        }
        log::info!("shutting down");
        anyhow::Ok(())
    })?;
    Ok(())
}
