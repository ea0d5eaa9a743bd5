use clap::Parser;

use shortener::cli::Cli;
use shortener::config::{get_config, init_config_from};
use shortener::interfaces::cli::{run_cli, run_offline};
use shortener::system::lifetime::shutdown::release_store;
use shortener::system::lifetime::startup::prepare_or_exit;
use shortener::system::logging::init_logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref());
    let config = get_config();
    let guard = init_logging(&config.logging);

    // 不需要存储的命令直接执行
    let result = match run_offline(&cli.command) {
        Some(result) => result,
        None => {
            let ctx = prepare_or_exit(&config);
            let result = run_cli(cli.command, &ctx).await;
            release_store(ctx.store.clone()).await;
            result
        }
    };

    // 退出前刷新日志
    drop(guard);
    if let Err(e) = result {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
