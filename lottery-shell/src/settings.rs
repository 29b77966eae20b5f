use std::{fs::File, path::Path};

use lottery::LotteryConfig;
use serde::{de::DeserializeOwned, Deserialize};

/// Contents of the `--input-settings` file. Every field is optional:
///
/// ```json
/// { "initial_pot": 200, "ticket_price": 10, "seed": 42 }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ShellSettings {
    #[serde(flatten)]
    pub lottery: LotteryConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Generically load a json file
pub fn load_json_from_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = File::open(path).map_err(Box::new)?;
    Ok(serde_json::from_reader(f)?)
}
