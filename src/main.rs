use clap::Parser;

use wealthplan::api::{Cli, Command, init_tracing, run_http_server, run_recommend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Command::Serve(args) => run_http_server(args).await,
        Command::Recommend(args) => {
            let recommendation = run_recommend(args)?;
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
            Ok(())
        }
    }
}
