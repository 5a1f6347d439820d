use anyhow::Result;
use clap::Parser;
use phase_predict_submit::cli::{Cli, USAGE};
use phase_predict_submit::services::OutputPaths;
use phase_predict_submit::utils::logging;
use phase_predict_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    let cli = Cli::parse();
    let Some(input) = cli.input.clone() else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };

    // 加载配置
    let mut config = Config::load()?;
    cli.apply(&mut config);

    let outputs = OutputPaths::from_base(&cli.output_base()?);

    // 运行级错误已记录到错误表，这里不再向外抛出
    let _outcome = App::new(config, input, outputs).run().await?;

    Ok(())
}
