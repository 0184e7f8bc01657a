//! pdfdeck - Arrange PDF files, merge them, preview and save the result.
//!
//! Runs an interactive session that reads one command per line from stdin
//! or from a script file.

mod cli;
mod shell;

#[cfg(test)]
mod test_pdf;

use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use std::process;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::Cli;
use crate::shell::{Command, Flow, Shell};
use pdfdeck::notice;
use pdfdeck::output::OutputFormatter;
use pdfdeck::session::Session;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<pdfdeck::PdfDeckError>()
                .map_or(1, pdfdeck::PdfDeckError::exit_code);
            process::exit(code);
        }
    }
}

/// Main application logic. Returns the process exit code.
async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    let (sender, receiver) = notice::channel();
    let session = Session::new(config, sender)?;
    let mut shell = Shell::new(session, formatter.clone(), receiver, cli.output_dir.clone());

    let interactive = cli.script.is_none() && std::io::stdin().is_terminal();
    if interactive {
        formatter.section(&format!("{} v{}", pdfdeck::NAME, pdfdeck::VERSION));
        formatter.info("Type 'help' for a list of commands");
    }

    if !cli.inputs.is_empty() {
        shell.run(Command::Load(cli.inputs.clone())).await;
    }

    match &cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            read_commands(&mut shell, BufReader::new(file), false).await?;
        }
        None => {
            read_commands(&mut shell, BufReader::new(tokio::io::stdin()), interactive).await?;
        }
    }

    shell.finish().await;
    formatter.debug(&format!(
        "Session ended with {} file(s) selected",
        shell.session().list().len()
    ));

    // A script run reports its last failure; an interactive run does not.
    let code = match shell.last_error() {
        Some(err) if !interactive => err.exit_code(),
        _ => 0,
    };
    Ok(code)
}

/// Feed lines from `input` to the shell until it ends or `quit` is read.
async fn read_commands<R>(shell: &mut Shell, input: R, prompt: bool) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut stdout = tokio::io::stdout();

    loop {
        if prompt {
            stdout.write_all(b"pdfdeck> ").await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await.context("Failed to read command")? else {
            break;
        };

        if shell.run_line(&line).await == Flow::Quit {
            break;
        }
    }

    Ok(())
}
