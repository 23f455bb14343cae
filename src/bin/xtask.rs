use std::env::{args, var};
use std::process::Command;

use anyhow::{anyhow, ensure, Result};

fn main() -> Result<()> {
    match args().nth(1).as_deref() {
        None => default(),
        Some("server") => server(),
        Some(name) => Err(anyhow!("Unknown task {}", name)),
    }
}

fn default() -> Result<()> {
    let status = Command::new("cargo").arg("fmt").status()?;

    ensure!(status.success(), "Rustfmt failed with status {:?}", status);

    let status = Command::new("cargo")
        .args(["clippy", "--all-targets"])
        .status()?;

    ensure!(status.success(), "Clippy failed with status {:?}", status);

    let status = Command::new("cargo").arg("test").status()?;

    ensure!(status.success(), "Tests failed with status {:?}", status);

    Ok(())
}

fn server() -> Result<()> {
    let mut command = Command::new("cargo");

    command.args(["run", "--bin", "server"]).envs([
        ("BIND_ADDR", "127.0.0.1:8081"),
        ("REQUEST_LIMIT", "32"),
        ("RUST_LOG", "info,contact_relay=debug,server=debug"),
    ]);

    if var("CONFIG_PATH").is_err() {
        command.env("CONFIG_PATH", "deployment/contact-relay.toml");
    }

    let status = command.status()?;

    ensure!(status.success(), "Server failed with status {:?}", status);

    Ok(())
}
