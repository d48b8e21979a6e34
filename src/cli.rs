use crate::commands::{self, CommandResult};
use crate::presentation::{input, progress};
use anyhow::{Context, Result, bail};

/// グローバルフラグ
pub const MACHINE_FLAG: &str = "--machine";

/// 解析済みのコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { stdin: bool },
    Logout,
    Whoami,
    Upload { file_path: String, progress: bool },
    Status { resource_url: String },
    Delete { resource_url: String, force: bool },
    Code { resource_url: String },
    Allow { resource_url: String, origins: String },
    RequireSigned { resource_url: String },
    Help,
}

/// 解析済みのCLI引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub machine_output: bool,
    pub command: Command,
}

/// `--machine` が指定されているか（エラー出力形式の決定に使う）
pub fn is_machine_output(args: &[String]) -> bool {
    args.iter().skip(1).any(|arg| arg == MACHINE_FLAG)
}

/// CLI引数を解析する
///
/// `args[0]` はプログラム名。コマンドが無い場合は help として扱う。
pub fn parse_args(args: &[String]) -> Result<Cli> {
    let machine_output = is_machine_output(args);
    let rest: Vec<&str> = args
        .iter()
        .skip(1)
        .map(String::as_str)
        .filter(|arg| *arg != MACHINE_FLAG)
        .collect();

    let Some((&command, params)) = rest.split_first() else {
        return Ok(Cli {
            machine_output,
            command: Command::Help,
        });
    };

    let has_flag = |flag: &str| params.iter().any(|param| *param == flag);
    let positional: Vec<&str> = params
        .iter()
        .copied()
        .filter(|arg| !arg.starts_with("--"))
        .collect();
    let nth = |index: usize, what: &str| -> Result<String> {
        positional
            .get(index)
            .map(|s| s.to_string())
            .with_context(|| format!("Please specify {} for {} command", what, command))
    };

    let command = match command {
        "login" => Command::Login {
            stdin: has_flag("--stdin"),
        },
        "logout" => Command::Logout,
        "whoami" => Command::Whoami,
        "upload" => Command::Upload {
            file_path: nth(0, "a file path")?,
            progress: has_flag("--progress"),
        },
        "status" => Command::Status {
            resource_url: nth(0, "a resource URL")?,
        },
        "delete" => Command::Delete {
            resource_url: nth(0, "a resource URL")?,
            force: has_flag("--force"),
        },
        "code" => Command::Code {
            resource_url: nth(0, "a resource URL")?,
        },
        "allow" => Command::Allow {
            resource_url: nth(0, "a resource URL")?,
            origins: nth(1, "an origin hostname")?,
        },
        "require-signed" => Command::RequireSigned {
            resource_url: nth(0, "a resource URL")?,
        },
        "help" | "--help" | "-h" => Command::Help,
        other => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            other
        ),
    };

    Ok(Cli {
        machine_output,
        command,
    })
}

/// 解析済みコマンドを実行する
pub async fn execute(cli: &Cli) -> Result<CommandResult> {
    let machine_output = cli.machine_output;

    match &cli.command {
        Command::Login { stdin } => {
            let credentials = if *stdin {
                input::read_credentials_from_stdin()?
            } else {
                input::read_credentials_interactive()?
            };
            commands::login::execute(credentials)
                .await
                .context("Login command failed")
        }
        Command::Logout => commands::logout::execute()
            .await
            .context("Logout command failed"),
        Command::Whoami => commands::whoami::execute()
            .await
            .context("Whoami command failed"),
        Command::Upload {
            file_path,
            progress: show_progress,
        } => {
            let show_progress = *show_progress;
            commands::upload::execute(file_path, |p| {
                if show_progress {
                    progress::report(&p, machine_output);
                }
            })
            .await
            .context("Upload command failed")
        }
        Command::Status { resource_url } => commands::status::execute(resource_url)
            .await
            .context("Status command failed"),
        Command::Delete {
            resource_url,
            force,
        } => commands::delete::execute(resource_url, *force || machine_output)
            .await
            .context("Delete command failed"),
        Command::Code { resource_url } => commands::code::execute(resource_url)
            .await
            .context("Code command failed"),
        Command::Allow {
            resource_url,
            origins,
        } => commands::allow::execute(resource_url, origins)
            .await
            .context("Allow command failed"),
        Command::RequireSigned { resource_url } => {
            commands::require_signed::execute(resource_url)
                .await
                .context("Require-signed command failed")
        }
        Command::Help => commands::help::execute().await,
    }
}
