//! Notify Overflow CLI
//!
//! 按服务的长度限制截断或拆分通知，并发送到 JSON / Form Webhook

use anyhow::Result;
use clap::{Parser, Subcommand};
use notify_overflow::cli::{handle_chunk, handle_send, ChunkArgs, SendArgs};
use notify_overflow::notification::registry;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "nfo")]
#[command(about = "Notify Overflow - 按服务限制截断或拆分通知消息")]
#[command(version)]
struct Cli {
    /// 输出调试日志
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 发送通知
    Send(SendArgs),
    /// 预览溢出处理结果
    Chunk(ChunkArgs),
    /// 列出支持的服务 schema
    Schemas {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // 通过 RUST_LOG 环境变量控制日志级别，默认为 warn
    // 例如: RUST_LOG=debug nfo send json://localhost -b hello
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("notify_overflow={0},nfo={0}", default_level))
    });

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Send(args) => handle_send(args),
        Commands::Chunk(args) => {
            handle_chunk(args)?;
            Ok(true)
        }
        Commands::Schemas { json } => {
            if json {
                let entries: Vec<serde_json::Value> = registry::entries()
                    .iter()
                    .map(|entry| {
                        serde_json::json!({
                            "name": entry.name,
                            "protocol": entry.protocol,
                            "secure_protocol": entry.secure_protocol,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in registry::entries() {
                    match entry.secure_protocol {
                        Some(secure) => {
                            println!("{:<8} {}://, {}://", entry.name, entry.protocol, secure)
                        }
                        None => println!("{:<8} {}://", entry.name, entry.protocol),
                    }
                }
            }
            Ok(true)
        }
    }
}
