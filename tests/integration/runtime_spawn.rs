use std::time::Duration;

use anyhow::{Context, Result};
use rmcp::{model::ClientInfo, serve_client};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::timeout,
};

use crate::common::{server_command, spawn_server_process};

async fn listed_tools(envs: &[(&str, &str)], args: &[&str]) -> Result<Vec<String>> {
    let (mut child, transport, stderr_task) = spawn_server_process(envs, args).await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    let mut names: Vec<String> = list.tools.iter().map(|tool| tool.name.to_string()).collect();
    names.sort();

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(names)
}

/// Run the server to completion with stdin closed and return (exit code, stderr).
async fn run_to_exit(envs: &[(&str, &str)], args: &[&str]) -> Result<(Option<i32>, String)> {
    let mut command = server_command(envs, args);
    command.stdin(std::process::Stdio::null());
    let output = timeout(Duration::from_secs(10), command.output()).await??;
    Ok((
        output.status.code(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    ))
}

#[tokio::test]
async fn services_filter_limits_listed_tools() -> Result<()> {
    let names = listed_tools(&[("SERVICES", "droplets")], &[]).await?;
    assert_eq!(names, vec!["droplet_action", "droplet_get", "droplet_list"]);
    Ok(())
}

#[tokio::test]
async fn no_services_lists_every_group() -> Result<()> {
    let names = listed_tools(&[], &[]).await?;
    for expected in [
        "account_get_information",
        "balance_get",
        "apps_list",
        "apps_get_info",
        "droplet_list",
        "domain_list",
        "domain_record_list",
        "firewall_list",
    ] {
        assert!(
            names.iter().any(|name| name == expected),
            "list_tools should include {expected}: {names:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn flags_take_precedence_over_environment() -> Result<()> {
    let names = listed_tools(&[("SERVICES", "nonexistent")], &["--services", "apps"]).await?;
    assert_eq!(names, vec!["apps_get_info", "apps_list"]);
    Ok(())
}

#[tokio::test]
async fn unknown_service_exits_with_failure() -> Result<()> {
    let (code, stderr) = run_to_exit(&[("SERVICES", "droplets,nonexistent")], &[]).await?;
    assert_eq!(code, Some(1), "stderr: {stderr}");
    assert!(
        stderr.contains("Failed to register tools: unknown service: nonexistent"),
        "stderr should name the unknown service: {stderr}"
    );
    Ok(())
}

#[tokio::test]
async fn invalid_endpoint_exits_with_failure() -> Result<()> {
    let (code, stderr) = run_to_exit(&[("DIGITALOCEAN_API_ENDPOINT", "not a url")], &[]).await?;
    assert_eq!(code, Some(1), "stderr: {stderr}");
    assert!(
        stderr.contains("Failed to create DigitalOcean client"),
        "stderr should explain the client failure: {stderr}"
    );
    Ok(())
}

#[tokio::test]
async fn missing_token_warns_but_keeps_starting() -> Result<()> {
    let (code, stderr) = run_to_exit(&[("LOG_LEVEL", "warn")], &[]).await?;
    assert!(code.is_some(), "process should exit once stdin closes");
    assert!(
        stderr.contains("DigitalOcean API token not provided"),
        "stderr should carry the missing-token warning: {stderr}"
    );
    assert!(
        !stderr.contains("Failed to create DigitalOcean client")
            && !stderr.contains("Failed to register tools"),
        "a missing token must not stop startup: {stderr}"
    );
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn sigterm_shuts_down_gracefully() -> Result<()> {
    let mut child = server_command(&[("LOG_LEVEL", "debug")], &[])
        .spawn()
        .context("failed to spawn server process")?;
    // Keep stdin open so only the signal can end the process.
    let _stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take().context("child stderr")?;

    let mut lines = BufReader::new(stderr).lines();
    let ready = timeout(Duration::from_secs(10), async {
        while let Ok(Some(line)) = lines.next_line().await {
            if line.contains("starting MCP server") {
                return true;
            }
        }
        false
    })
    .await?;
    assert!(ready, "server should log its startup event");

    let pid = child.id().context("child pid")? as libc::pid_t;
    // SAFETY: `pid` belongs to a child this test spawned and has not reaped.
    let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
    assert_eq!(rc, 0, "kill(SIGTERM) should succeed");

    let drain_task = drain_lines(lines);
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(status.success(), "SIGTERM should exit 0, got {status:?}");
    let log = drain_task.await?;
    assert!(
        log.contains("Server shutdown gracefully"),
        "shutdown should be logged: {log}"
    );
    drop(stdout);
    Ok(())
}

#[cfg(unix)]
fn drain_lines(
    mut lines: tokio::io::Lines<BufReader<tokio::process::ChildStderr>>,
) -> tokio::task::JoinHandle<String> {
    tokio::spawn(async move {
        let mut log = String::new();
        while let Ok(Some(line)) = lines.next_line().await {
            log.push_str(&line);
            log.push('\n');
        }
        log
    })
}
