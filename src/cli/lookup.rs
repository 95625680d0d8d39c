use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use tokio::sync::broadcast::error::TryRecvError;

use crate::config::Config;
use crate::fetch::{
    FetchLifecycle, LifecycleMode, PokeApiClient, ReducerDriver, RequestState, StalePolicy,
    TaggedAction, View,
};

fn print_state<E: Display, W: Write>(
    state: &RequestState<E>,
    name: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "[{}] {}", state.status(), View::of(state, name))?;
    Ok(())
}

pub(super) async fn lookup<W: Write>(
    config: &Config,
    names: &[String],
    mode: LifecycleMode,
    stale: StalePolicy,
    out: &mut W,
) -> anyhow::Result<()> {
    let client = PokeApiClient::new(&config.api).context("building API client")?;
    let lifecycle = FetchLifecycle::new(client, mode, stale);
    let mut transitions = lifecycle.subscribe();

    print_state(&lifecycle.state(), "", out)?;

    let names: Vec<&str> = if names.is_empty() {
        vec![""]
    } else {
        names.iter().map(String::as_str).collect()
    };

    for name in names {
        lifecycle.observe(name).await?;

        loop {
            match transitions.try_recv() {
                Ok(transition) => print_state(&transition.state, &transition.name, out)?,
                Err(TryRecvError::Lagged(skipped)) => {
                    writeln!(out, "({} transitions skipped)", skipped)?;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    Ok(())
}

pub(super) fn replay<W: Write>(file: &Path, out: &mut W) -> anyhow::Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let actions: Vec<TaggedAction<Value>> =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", file.display()))?;

    let mut driver = ReducerDriver::<Value>::new();
    let mut name = String::new();

    for (index, action) in actions.into_iter().enumerate() {
        if let Some(next) = &action.name {
            name = next.clone();
        }
        let tag = action.tag.clone();
        driver
            .dispatch_tagged(action)
            .with_context(|| format!("action #{} ({})", index + 1, tag))?;
        print_state(driver.state(), &name, out)?;
    }

    Ok(())
}
