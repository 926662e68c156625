use anyhow::Result;
use clap::Parser;

use gbserver_api::config::ServerArgs;
use gbserver_core::logging_facility::{init, Profile};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init(Profile::from(args.log_format));

    gbserver_api::serve(&args).await
}
