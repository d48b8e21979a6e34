use anyhow::Result;
use cfstream::api::StreamError;
use cfstream::cli;
use cfstream::config::APP_CONFIG;
use cfstream::config::error::ConfigError;
use cfstream::presentation::output;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let machine_output = cli::is_machine_output(&args);

    if let Err(e) = run(&args).await {
        handle_error(e, machine_output);
    }
}

/// ログ出力の初期化
///
/// RUST_LOG が無ければ APP_CONFIG のフィルタを使う。出力先は stderr。
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(APP_CONFIG.logging.default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// アプリケーションのメイン処理
async fn run(args: &[String]) -> Result<()> {
    let cli = cli::parse_args(args)?;
    let result = cli::execute(&cli).await?;
    output::output_result(&result, cli.machine_output)
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とヒントを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) -> ! {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    output::output_error(&error, exit_code, hint.as_deref(), machine_output);

    std::process::exit(exit_code);
}

/// エラーチェーンから終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(stream_err) = cause.downcast_ref::<StreamError>() {
            return stream_err.severity().exit_code();
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        if let Some(stream_err) = cause.downcast_ref::<StreamError>() {
            if let Some(hint) = stream_err.hint() {
                return Some(hint.to_string());
            }
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            if let Some(hint) = config_err.hint() {
                return Some(hint.to_string());
            }
        }
    }

    None
}
