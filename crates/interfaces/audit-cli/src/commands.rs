use std::time::Duration;

use anyhow::Context;
use audit_app_core::{
    scan_vm, LogLineVm, ResultCardVm, ScanPhase, ScanSequencer, ScanState, IDLE_HINT, IDLE_PROMPT,
};
use audit_core::formats::{catalog_to_json, load_catalog};
use audit_core::{Catalog, StyleTag};
use camino::{Utf8Path, Utf8PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::leads::TerminalLeadCapture;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub catalog: Option<Utf8PathBuf>,
    pub speed: f64,
    pub unlock: Option<String>,
    pub restart_after_ms: Option<u64>,
    pub json: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            catalog: None,
            speed: audit_config::DEFAULT_SPEED,
            unlock: None,
            restart_after_ms: None,
            json: false,
        }
    }
}

/// Load `path` (or the built-in catalog) and apply the clamped speed factor.
pub fn resolve_catalog(path: Option<&Utf8Path>, speed: f64) -> anyhow::Result<Catalog> {
    let catalog = match path {
        Some(p) => load_catalog(p)?,
        None => Catalog::shadow_audit(),
    };
    let speed = audit_config::clamp_speed(speed);
    catalog
        .scaled(speed)
        .with_context(|| format!("Catalog cannot run at {speed}x"))
}

fn style_marker(style: StyleTag) -> &'static str {
    match style {
        StyleTag::Info => "·",
        StyleTag::Highlight => "»",
        StyleTag::Muted => " ",
        StyleTag::Success => "+",
        StyleTag::Warning => "~",
        StyleTag::Error => "!",
    }
}

fn render_line(line: &LogLineVm) -> String {
    format!("   {} {}", style_marker(line.style), line.render())
}

// A hidden bar (non-tty stderr) swallows println, so fall back to stdout.
fn emit_line(pb: &ProgressBar, line: String) {
    if pb.is_hidden() {
        println!("{line}");
    } else {
        pb.println(line);
    }
}

fn print_result_card(card: &ResultCardVm) {
    println!("\n:: {}", card.headline.to_uppercase());
    println!("   {}", card.amount);
    println!("   {}", card.narrative);
    for v in &card.verifications {
        println!("   > {v}");
    }
}

fn print_breakdown(card: &ResultCardVm) {
    if let Some(breakdown) = &card.breakdown {
        println!("\n:: Full Forensic Report");
        for line in breakdown {
            println!("   {line}");
        }
    }
}

pub async fn cmd_run(opts: RunOptions) -> anyhow::Result<ScanState> {
    let catalog = resolve_catalog(opts.catalog.as_deref(), opts.speed)?;

    println!(":: INITIALIZE SHADOW AUDIT");
    println!("   {IDLE_PROMPT} ({IDLE_HINT})");
    let source = opts
        .catalog
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_else(|| audit_config::DEFAULT_CATALOG_NAME.to_string());
    println!("   Catalog: {source} ({} steps)", catalog.len());

    let mut seq = ScanSequencer::with_lead_capture(catalog, TerminalLeadCapture);
    let mut rx = seq.subscribe();

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.green}] {pos}%")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );
    pb.enable_steady_tick(Duration::from_millis(audit_config::RENDER_TICK_MS));

    let mut current_run = Some(seq.start_run()?);
    let mut printed = 0usize;

    let restart = async {
        match opts.restart_after_ms {
            Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(restart);
    let mut restarted = false;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = &mut restart, if !restarted => {
                restarted = true;
                emit_line(&pb, ":: Restart requested, superseding current run".into());
                current_run = Some(seq.start_run()?);
            }
        }

        let state = seq.state();
        if state.session.run_id != current_run {
            continue;
        }
        let vm = scan_vm(&state);
        if vm.lines.len() < printed {
            printed = 0;
        }
        for line in &vm.lines[printed..] {
            emit_line(&pb, render_line(line));
        }
        printed = vm.lines.len();
        pb.set_position(u64::from(vm.progress));
        pb.set_message(vm.status_label.clone());

        if vm.phase == ScanPhase::Complete {
            break;
        }
    }
    pb.finish_and_clear();

    if let Some(card) = scan_vm(&seq.state()).result {
        print_result_card(&card);
        match opts.unlock.as_deref() {
            Some(contact) => {
                if seq.request_unlock(contact) {
                    if let Some(card) = scan_vm(&seq.state()).result {
                        print_breakdown(&card);
                    }
                } else {
                    println!("\n   A contact address is required to unlock the report.");
                }
            }
            None => println!("\n   [{}] re-run with --unlock <email>", card.call_to_action),
        }
    }

    let state = seq.state();
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(state)
}

pub fn cmd_catalog(path: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let catalog = match path {
        Some(p) => load_catalog(&p)?,
        None => Catalog::shadow_audit(),
    };
    println!("{}", catalog_to_json(&catalog)?);
    Ok(())
}
