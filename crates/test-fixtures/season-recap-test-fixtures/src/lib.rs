use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    datasets: HashMap<String, String>,
    scripts: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Season datasets in the wire format accepted by `SeasonDataset::from_json`.
pub mod datasets {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.datasets.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.datasets, "dataset", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        super::load_json(lookup(&MANIFEST.datasets, "dataset", name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.datasets, "dataset", name)?))
    }
}

/// Recorded input scripts: a list of `(dt_ms, inputs)` steps fed to the page.
pub mod scripts {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(bound(deserialize = "I: DeserializeOwned + Default"))]
    pub struct Script<I> {
        pub steps: Vec<ScriptStep<I>>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(bound(deserialize = "I: DeserializeOwned + Default"))]
    pub struct ScriptStep<I> {
        pub dt_ms: f64,
        #[serde(default)]
        pub inputs: I,
    }

    pub fn keys() -> Vec<String> {
        MANIFEST.scripts.keys().cloned().collect()
    }

    pub fn load<I: DeserializeOwned + Default>(name: &str) -> Result<Script<I>> {
        super::load_json(lookup(&MANIFEST.scripts, "script", name)?)
    }
}
